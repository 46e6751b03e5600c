use crate::errors::{LloydError, LloydParamsError};
use crate::Float;
use ndarray::{s, Array2, ArrayView1, ArrayView2, Axis};
use rand::seq::index;
use rand::Rng;

/// Row indices with a non-zero entry in the eligibility vector `xp`.
///
/// The restricted variant [`lloyd_fixed_nnz`](crate::lloyd_fixed_nnz) returns
/// assignments that index the eligible subset; this list maps them back to
/// rows of the original matrix.
pub fn nonzero_indices<F: Float>(xp: &ArrayView1<F>) -> Vec<usize> {
    xp.iter()
        .enumerate()
        .filter(|(_, &x)| x != F::zero())
        .map(|(index, _)| index)
        .collect()
}

/// Forgy initialization: `n_clusters` distinct rows of `observations`,
/// sampled uniformly without replacement, become the initial centers.
pub fn forgy_initialization<F: Float>(
    observations: &ArrayView2<F>,
    n_clusters: usize,
    rng: &mut impl Rng,
) -> Result<Array2<F>, LloydError> {
    if n_clusters == 0 {
        return Err(LloydParamsError::NClusters.into());
    }
    let n_samples = observations.nrows();
    if n_clusters > n_samples {
        return Err(LloydError::InsufficientCandidates {
            requested: n_clusters,
            available: n_samples,
        });
    }
    let indices = index::sample(rng, n_samples, n_clusters).into_vec();
    Ok(observations.select(Axis(0), &indices))
}

/// Forgy initialization over the eligible rows, with an explicit all-zero
/// background center appended as the last row.
///
/// Draws `n_clusters - 1` distinct rows from those flagged by `xp`; the
/// returned matrix has `n_clusters` rows in total.
pub fn forgy_initialization_nnz<F: Float>(
    observations: &ArrayView2<F>,
    xp: &ArrayView1<F>,
    n_clusters: usize,
    rng: &mut impl Rng,
) -> Result<Array2<F>, LloydError> {
    if n_clusters == 0 {
        return Err(LloydParamsError::NClusters.into());
    }
    let drawn = eligible_sample(observations, xp, n_clusters - 1, rng)?;
    let mut centers = Array2::zeros((n_clusters, observations.ncols()));
    centers.slice_mut(s![..n_clusters - 1, ..]).assign(&drawn);
    Ok(centers)
}

/// Forgy initialization over the eligible rows with no background row
/// appended: `n_clusters - 1` centers in total.
///
/// Used by the restricted variant, which keeps the background class outside
/// the center matrix altogether.
pub fn forgy_initialization_fixed_nnz<F: Float>(
    observations: &ArrayView2<F>,
    xp: &ArrayView1<F>,
    n_clusters: usize,
    rng: &mut impl Rng,
) -> Result<Array2<F>, LloydError> {
    if n_clusters < 2 {
        return Err(LloydError::TooFewClusters(n_clusters));
    }
    eligible_sample(observations, xp, n_clusters - 1, rng)
}

// Sample `n_draws` distinct rows from the subset flagged by `xp`.
fn eligible_sample<F: Float>(
    observations: &ArrayView2<F>,
    xp: &ArrayView1<F>,
    n_draws: usize,
    rng: &mut impl Rng,
) -> Result<Array2<F>, LloydError> {
    if xp.len() != observations.nrows() {
        return Err(LloydError::MaskMismatch {
            mask_len: xp.len(),
            n_observations: observations.nrows(),
        });
    }
    let candidates = nonzero_indices(xp);
    if n_draws > candidates.len() {
        return Err(LloydError::InsufficientCandidates {
            requested: n_draws,
            available: candidates.len(),
        });
    }
    let indices = index::sample(rng, candidates.len(), n_draws)
        .into_iter()
        .map(|sampled| candidates[sampled])
        .collect::<Vec<_>>();
    Ok(observations.select(Axis(0), &indices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;

    #[test]
    fn forgy_draws_distinct_data_rows() {
        let mut rng = Xoshiro256Plus::seed_from_u64(42);
        let observations = array![[0., 0.], [1., 1.], [2., 2.], [3., 3.], [4., 4.]];
        let centers = forgy_initialization(&observations.view(), 3, &mut rng).unwrap();
        assert_eq!(centers.dim(), (3, 2));

        let mut seen = Vec::new();
        for center in centers.rows() {
            let row = observations
                .rows()
                .into_iter()
                .position(|obs| obs == center)
                .expect("center is a data row");
            assert!(!seen.contains(&row), "row {} drawn twice", row);
            seen.push(row);
        }
    }

    #[test]
    fn forgy_rejects_more_clusters_than_points() {
        let mut rng = Xoshiro256Plus::seed_from_u64(42);
        let observations = array![[0., 0.], [1., 1.], [2., 2.]];
        let res = forgy_initialization(&observations.view(), 4, &mut rng);
        assert!(matches!(
            res,
            Err(LloydError::InsufficientCandidates {
                requested: 4,
                available: 3
            })
        ));
    }

    #[test]
    fn nnz_variant_appends_a_zero_background_row() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0);
        let observations = array![[1., 1.], [2., 2.], [0., 0.], [3., 3.]];
        let xp = array![1., 2., 0., 3.];
        let centers =
            forgy_initialization_nnz(&observations.view(), &xp.view(), 3, &mut rng).unwrap();

        assert_eq!(centers.dim(), (3, 2));
        assert_eq!(centers.row(2), array![0., 0.]);
        // the drawn rows come from the eligible subset, which excludes row 2
        for center in centers.rows().into_iter().take(2) {
            assert!(center != array![0., 0.]);
        }
    }

    #[test]
    fn nnz_variant_counts_only_eligible_rows() {
        let mut rng = Xoshiro256Plus::seed_from_u64(1);
        let observations = array![[1., 1.], [2., 2.], [0., 0.], [3., 3.], [4., 4.], [0., 0.]];
        let xp = array![1., 1., 0., 1., 0., 0.];
        // 3 eligible rows cannot seed the 4 draws a K of 5 needs
        let res = forgy_initialization_nnz(&observations.view(), &xp.view(), 5, &mut rng);
        assert!(matches!(
            res,
            Err(LloydError::InsufficientCandidates {
                requested: 4,
                available: 3
            })
        ));
    }

    #[test]
    fn fixed_nnz_variant_has_no_background_row() {
        let mut rng = Xoshiro256Plus::seed_from_u64(2);
        let observations = array![[1., 1.], [2., 2.], [0., 0.], [3., 3.]];
        let xp = array![1., 1., 0., 1.];
        let centers =
            forgy_initialization_fixed_nnz(&observations.view(), &xp.view(), 3, &mut rng).unwrap();
        assert_eq!(centers.dim(), (2, 2));
        for center in centers.rows() {
            assert!(center != array![0., 0.]);
        }
    }

    #[test]
    fn fixed_nnz_variant_needs_two_clusters() {
        let mut rng = Xoshiro256Plus::seed_from_u64(3);
        let observations = array![[1., 1.], [2., 2.]];
        let xp = array![1., 1.];
        let res = forgy_initialization_fixed_nnz(&observations.view(), &xp.view(), 1, &mut rng);
        assert!(matches!(res, Err(LloydError::TooFewClusters(1))));
    }

    #[test]
    fn eligibility_vector_must_match_the_observations() {
        let mut rng = Xoshiro256Plus::seed_from_u64(4);
        let observations = array![[1., 1.], [2., 2.], [3., 3.]];
        let xp = array![1., 1.];
        let res = forgy_initialization_nnz(&observations.view(), &xp.view(), 2, &mut rng);
        assert!(matches!(
            res,
            Err(LloydError::MaskMismatch {
                mask_len: 2,
                n_observations: 3
            })
        ));
    }

    #[test]
    fn nonzero_indices_reports_positions() {
        let xp = array![0.0, 0.5, 0.0, -2.0, 1.0];
        assert_eq!(nonzero_indices(&xp.view()), vec![1, 3, 4]);
        assert_eq!(nonzero_indices(&array![0.0, 0.0].view()), Vec::<usize>::new());
    }
}
