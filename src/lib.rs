//! Batched Lloyd's k-means over dense numeric data, with variants for
//! non-zero-restricted inputs and a pinned background center.
//!
//! The crate is a single numeric kernel exposed as a family of library
//! functions; there is no larger system around it. Every step of the
//! iteration is expressed as batched array operations: the assignment step
//! broadcasts the observation and center matrices into a pairwise distance
//! matrix, and the update step recomputes centers through a one-hot
//! membership indicator. Degenerate (empty) clusters keep their previous
//! center instead of collapsing to NaN.
//!
//! ## Entry points
//!
//! * [`lloyd`] - plain full-batch k-means with Forgy initialization.
//! * [`lloyd_nnz`] - centers seeded from the rows flagged eligible by a
//!   companion vector, plus a zero background center that is updated like any
//!   other.
//! * [`lloyd_nnz_fixed_0_center`] - like the above but with `n_clusters + 1`
//!   centers, the trailing background center pinned to the zero vector for the
//!   whole run.
//! * [`lloyd_fixed_nnz`] - the entire run restricted to the eligible rows,
//!   with `n_clusters - 1` centers and no background center; the returned
//!   assignment indexes the restricted subset (see [`nonzero_indices`]).
//!
//! The assignment step alone is available as [`choose_centers`], and the
//! Forgy initializations as [`forgy_initialization`],
//! [`forgy_initialization_nnz`] and [`forgy_initialization_fixed_nnz`]. All
//! randomness flows through a caller-supplied [`rand::Rng`], so runs are
//! reproducible from a seed.
//!
//! ```
//! use lloyd_kmeans::{lloyd, LloydParams};
//! use ndarray::array;
//! use rand::SeedableRng;
//! use rand_xoshiro::Xoshiro256Plus;
//!
//! let observations = array![[0., 0.], [0., 0.], [10., 10.], [10., 10.]];
//! let params = LloydParams::new(2).tolerance(1e-4).check().unwrap();
//! let mut rng = Xoshiro256Plus::seed_from_u64(42);
//!
//! let (memberships, centers) = lloyd(&observations.view(), &params, &mut rng).unwrap();
//! assert_eq!(memberships.len(), 4);
//! assert_eq!(centers.nrows(), 2);
//! ```

mod algorithm;
mod errors;
mod hyperparams;
mod init;
mod utils;

pub use algorithm::*;
pub use errors::*;
pub use hyperparams::*;
pub use init::*;
pub use utils::*;

use ndarray::NdFloat;
use num_traits::{FromPrimitive, NumCast, Signed};
use std::iter::Sum;

/// Floating point numbers
///
/// This trait bound multiplexes to the most common assumptions on floating
/// point numbers and implements them for 32bit and 64bit floating points.
pub trait Float:
    NdFloat + FromPrimitive + Signed + Sum + Default + approx::AbsDiffEq<Epsilon = Self>
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}
impl Float for f64 {}
