use ndarray::{s, Array, Array2, ArrayBase, Data, Ix2};
use ndarray_rand::rand_distr::StandardNormal;
use ndarray_rand::RandomExt;
use rand::Rng;

/// Given an input matrix `blob_centroids`, with shape `(n_blobs, n_features)`,
/// generate `blob_size` points (a "blob") around each of its rows, each blob
/// sampled from a unit-variance normal distribution centered on its row.
///
/// Handy for assembling synthetic datasets to exercise the clustering entry
/// points on a best-case input.
pub fn generate_blobs(
    blob_size: usize,
    blob_centroids: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    rng: &mut impl Rng,
) -> Array2<f64> {
    let (n_centroids, n_features) = blob_centroids.dim();
    let mut blobs: Array2<f64> = Array2::zeros((n_centroids * blob_size, n_features));

    for (blob_index, centroid) in blob_centroids.rows().into_iter().enumerate() {
        let shape = (blob_size, n_features);
        let blob: Array2<f64> = Array::random_using(shape, StandardNormal, rng) + centroid;
        blobs
            .slice_mut(s![blob_index * blob_size..(blob_index + 1) * blob_size, ..])
            .assign(&blob);
    }
    blobs
}
