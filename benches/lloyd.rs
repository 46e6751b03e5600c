use criterion::{
    black_box, criterion_group, criterion_main, AxisScale, BenchmarkId, Criterion,
    PlotConfiguration,
};
use lloyd_kmeans::{generate_blobs, lloyd, LloydParams};
use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

fn lloyd_bench(c: &mut Criterion) {
    let mut rng = Xoshiro256Plus::seed_from_u64(40);
    let cluster_sizes = vec![(100, 4), (400, 10), (3000, 10)];

    let mut benchmark = c.benchmark_group("lloyd");
    benchmark.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));
    for (blob_size, n_clusters) in cluster_sizes {
        let n_features = 3;
        let centroids =
            Array2::random_using((n_clusters, n_features), Uniform::new(-30., 30.), &mut rng);
        let data = generate_blobs(blob_size, &centroids, &mut rng);
        let params = LloydParams::new(n_clusters)
            .max_n_iterations(1000)
            .tolerance(1e-3)
            .check()
            .unwrap();
        benchmark.bench_function(BenchmarkId::new("lloyd", blob_size), |bencher| {
            bencher.iter(|| {
                let mut run_rng = Xoshiro256Plus::seed_from_u64(40);
                lloyd(black_box(&data.view()), &params, &mut run_rng).unwrap()
            });
        });
    }

    benchmark.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = lloyd_bench
}
criterion_main!(benches);
