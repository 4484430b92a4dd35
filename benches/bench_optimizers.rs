use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use tspalg::{
    construction::{MstConstructor, TourConstructor},
    instance::Instance,
    local_search::{HillClimbing, Neighborhood, SearchVariant, SimulatedAnnealing, TabuSearch},
    optimizer::Optimizer,
    rng::RandomNumberGenerator,
};

fn scattered(n: usize, seed: u64) -> Instance {
    let mut rng = RandomNumberGenerator::from_seed(seed);
    let points: Vec<(f64, f64)> = (0..n)
        .map(|_| (rng.uniform() * 1000.0, rng.uniform() * 1000.0))
        .collect();
    Instance::from_points(&points)
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("mst_construction");
    for size in [50, 200, 800] {
        let instance = scattered(size, 1);
        group.bench_with_input(BenchmarkId::from_parameter(size), &instance, |b, instance| {
            let mut rng = RandomNumberGenerator::from_seed(2);
            b.iter(|| MstConstructor::new().construct(black_box(instance), &mut rng))
        });
    }
    group.finish();
}

fn bench_local_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("local_search");
    group.sample_size(20);
    for size in [50, 200] {
        let instance = scattered(size, 3);
        let mut rng = RandomNumberGenerator::from_seed(4);
        let start = MstConstructor::new().construct(&instance, &mut rng).unwrap().tour;

        let hill_climbing = HillClimbing::new(size, SearchVariant::BestOfSample).unwrap();
        group.bench_with_input(BenchmarkId::new("hill_climbing", size), &start, |b, start| {
            b.iter(|| hill_climbing.optimize_with_rng(&instance, start.clone(), &mut rng))
        });

        let annealing = SimulatedAnnealing::for_instance(&instance);
        group.bench_with_input(BenchmarkId::new("annealing", size), &start, |b, start| {
            b.iter(|| annealing.optimize_with_rng(&instance, start.clone(), &mut rng))
        });

        for neighborhood in [Neighborhood::Full, Neighborhood::Sampled] {
            let tabu = TabuSearch::default().with_neighborhood(neighborhood);
            let id = BenchmarkId::new(format!("tabu_{neighborhood:?}").to_lowercase(), size);
            group.bench_with_input(id, &start, |b, start| {
                b.iter(|| tabu.optimize_with_rng(&instance, start.clone(), &mut rng))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_construction, bench_local_search);
criterion_main!(benches);
