use crate::errors::LloydError;
use crate::hyperparams::{Backend, LloydValidParams};
use crate::init::{
    forgy_initialization, forgy_initialization_fixed_nnz, forgy_initialization_nnz,
    nonzero_indices,
};
use crate::Float;
use log::info;
use ndarray::{Array1, Array2, Array3, ArrayView1, ArrayView2, Axis, Zip};
use rand::Rng;

/// For every observation, the index of the nearest center under squared
/// euclidean distance, ties going to the lowest index.
///
/// The computation is batched: the `(n, d)` observation matrix and the
/// `(k, d)` center matrix are broadcast against each other and reduced into an
/// `(n, k)` distance matrix, which is then collapsed row by row. There is no
/// per-observation distance loop. The distance matrix is a temporary local to
/// this call and is freed on every exit path.
pub fn choose_centers<F: Float>(
    observations: &ArrayView2<F>,
    centers: &ArrayView2<F>,
    backend: Backend,
) -> Result<Array1<usize>, LloydError> {
    let distances = pairwise_sq_distances(observations, centers)?;
    let mut memberships = Array1::zeros(observations.nrows());
    let assign = |row: ArrayView1<F>, membership: &mut usize| *membership = argmin_row(&row);
    match backend {
        Backend::Rayon => Zip::from(distances.axis_iter(Axis(0)))
            .and(&mut memberships)
            .par_for_each(assign),
        Backend::Serial => Zip::from(distances.axis_iter(Axis(0)))
            .and(&mut memberships)
            .for_each(assign),
    }
    Ok(memberships)
}

/// Full-batch Lloyd's algorithm over all rows, with centers seeded by plain
/// Forgy sampling.
///
/// Returns the final assignment vector and the `(n_clusters, d)` center
/// matrix. The run stops once the squared sum of per-center shifts falls
/// below the tolerance, or after `max_n_iterations`, whichever comes first;
/// the centers are best-effort within that budget.
pub fn lloyd<F: Float>(
    observations: &ArrayView2<F>,
    params: &LloydValidParams<F>,
    rng: &mut impl Rng,
) -> Result<(Array1<usize>, Array2<F>), LloydError> {
    let centroids = forgy_initialization(observations, params.n_clusters(), rng)?;
    run_lloyd(observations, centroids, params.n_clusters(), params)
}

/// Lloyd over all rows with the eligible-subset initialization: the last of
/// the `n_clusters` centers starts at the zero vector and is updated like any
/// other.
pub fn lloyd_nnz<F: Float>(
    observations: &ArrayView2<F>,
    xp: &ArrayView1<F>,
    params: &LloydValidParams<F>,
    rng: &mut impl Rng,
) -> Result<(Array1<usize>, Array2<F>), LloydError> {
    let centroids = forgy_initialization_nnz(observations, xp, params.n_clusters(), rng)?;
    run_lloyd(observations, centroids, params.n_clusters(), params)
}

/// Lloyd over all rows with `n_clusters + 1` centers, the trailing one pinned.
///
/// Initialization draws `n_clusters` eligible rows and appends the zero
/// background row; the update step rewrites only the first `n_clusters`
/// centers, so the background row keeps its initialization value (the zero
/// vector) for the whole run, no matter how many points fall into it.
pub fn lloyd_nnz_fixed_0_center<F: Float>(
    observations: &ArrayView2<F>,
    xp: &ArrayView1<F>,
    params: &LloydValidParams<F>,
    rng: &mut impl Rng,
) -> Result<(Array1<usize>, Array2<F>), LloydError> {
    let centroids = forgy_initialization_nnz(observations, xp, params.n_clusters() + 1, rng)?;
    run_lloyd(observations, centroids, params.n_clusters(), params)
}

/// Lloyd restricted to the eligible rows, with `n_clusters - 1` centers and
/// no background center.
///
/// This variant has a different contract from its siblings: assignment and
/// update only ever see the rows flagged by `xp`, and the returned assignment
/// vector has one entry per *eligible* row, indexing that subset. Map the
/// entries back to original row ids through
/// [`nonzero_indices`](crate::nonzero_indices). Requires `n_clusters >= 2`.
pub fn lloyd_fixed_nnz<F: Float>(
    observations: &ArrayView2<F>,
    xp: &ArrayView1<F>,
    params: &LloydValidParams<F>,
    rng: &mut impl Rng,
) -> Result<(Array1<usize>, Array2<F>), LloydError> {
    let centroids = forgy_initialization_fixed_nnz(observations, xp, params.n_clusters(), rng)?;
    let restricted = observations.select(Axis(0), &nonzero_indices(xp));
    let n_centers = centroids.nrows();
    run_lloyd(&restricted.view(), centroids, n_centers, params)
}

/// The iterate-to-convergence loop shared by every entry point.
///
/// `n_updated` bounds the update step: centers with index `n_updated` and
/// above are pinned to their initialization value. The assignment returned is
/// the one that produced the final update; it is not recomputed against the
/// final centers.
fn run_lloyd<F: Float>(
    observations: &ArrayView2<F>,
    mut centroids: Array2<F>,
    n_updated: usize,
    params: &LloydValidParams<F>,
) -> Result<(Array1<usize>, Array2<F>), LloydError> {
    let mut memberships = choose_centers(observations, &centroids.view(), params.backend())?;
    let mut converged = false;

    for iteration in 0..params.max_n_iterations() {
        let new_centroids =
            compute_centroids(&centroids, observations, &memberships.view(), n_updated);
        let shift = center_shift(&centroids, &new_centroids);
        centroids = new_centroids;

        if params.verbose() {
            info!("iteration {}: center shift {}", iteration, shift);
        }
        if shift * shift < params.tolerance() {
            converged = true;
            break;
        }
        if iteration + 1 < params.max_n_iterations() {
            memberships = choose_centers(observations, &centroids.view(), params.backend())?;
        }
    }

    if params.verbose() && !converged && params.max_n_iterations() > 0 {
        info!(
            "stopped after {} iterations without meeting the tolerance",
            params.max_n_iterations()
        );
    }
    Ok((memberships, centroids))
}

/// One update step.
///
/// Per-cluster sums and counts are obtained through the one-hot membership
/// indicator: `sums = indicator^T . observations`, `counts` as the indicator's
/// column sums. Every cluster that received at least one observation becomes
/// the mean of its members; empty clusters keep their previous center, which
/// is also what guards the division. Centers with index `n_updated` and above
/// are pinned and never rewritten.
fn compute_centroids<F: Float>(
    old_centroids: &Array2<F>,
    observations: &ArrayView2<F>,
    memberships: &ArrayView1<usize>,
    n_updated: usize,
) -> Array2<F> {
    let n_clusters = old_centroids.nrows();
    let mut one_hot: Array2<F> = Array2::zeros((observations.nrows(), n_clusters));
    for (row, &cluster) in memberships.iter().enumerate() {
        one_hot[(row, cluster)] = F::one();
    }
    let sums = one_hot.t().dot(observations);
    let counts = one_hot.sum_axis(Axis(0));

    let mut centroids = old_centroids.clone();
    for cluster in 0..n_updated {
        if counts[cluster] > F::zero() {
            centroids
                .row_mut(cluster)
                .assign(&(&sums.row(cluster) / counts[cluster]));
        }
    }
    centroids
}

// Sum (not mean) of the per-center euclidean shifts.
fn center_shift<F: Float>(old_centroids: &Array2<F>, new_centroids: &Array2<F>) -> F {
    let mut diff = new_centroids - old_centroids;
    diff.mapv_inplace(|x| x * x);
    diff.sum_axis(Axis(1)).mapv(|x| x.sqrt()).sum()
}

fn pairwise_sq_distances<F: Float>(
    observations: &ArrayView2<F>,
    centers: &ArrayView2<F>,
) -> Result<Array2<F>, LloydError> {
    let (n_samples, n_features) = observations.dim();
    let (n_centers, center_features) = centers.dim();
    if n_features != center_features {
        return Err(LloydError::ShapeMismatch {
            observation_features: n_features,
            center_features,
        });
    }
    if n_centers == 0 {
        return Err(LloydError::NoCenters);
    }

    let lhs = observations.view().insert_axis(Axis(1));
    let rhs = centers.view().insert_axis(Axis(0));
    // Both broadcasts only stretch the freshly inserted unit axes.
    let shape = (n_samples, n_centers, n_features);
    let lhs = lhs.broadcast(shape).expect("unit axis broadcast");
    let rhs = rhs.broadcast(shape).expect("unit axis broadcast");
    let mut diff: Array3<F> = &lhs - &rhs;
    diff.mapv_inplace(|x| x * x);
    Ok(diff.sum_axis(Axis(2)))
}

fn argmin_row<F: Float>(row: &ArrayView1<F>) -> usize {
    let mut min_index = 0;
    let mut min_distance = row[0];
    for (index, &distance) in row.iter().enumerate() {
        if distance < min_distance {
            min_index = index;
            min_distance = distance;
        }
    }
    min_index
}
