use tspalg::{
    construction::{MstConstructor, RandomSampling, TourConstructor},
    evolution::{IslandLauncher, IslandOptions},
    instance::Instance,
    local_search::{HillClimbing, MoveKind, Neighborhood, SearchVariant, SimulatedAnnealing, TabuSearch},
    optimizer::{Optimizer, Solution},
    rng::RandomNumberGenerator,
    tour::Tour,
};

const TOLERANCE: f64 = 1e-6;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_test_writer()
        .try_init();
}

// Four corners of a square and its center.
fn square_with_center() -> Instance {
    Instance::from_points(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (5.0, 5.0)])
}

fn permutations(items: &[usize]) -> Vec<Vec<usize>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut result = Vec::new();
    for (i, &first) in items.iter().enumerate() {
        let mut rest = items.to_vec();
        rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, first);
            result.push(tail);
        }
    }
    result
}

/// Shortest cycle over all orderings that start at city 0.
fn brute_force_optimum(instance: &Instance) -> f64 {
    let rest: Vec<usize> = (1..instance.len()).collect();
    permutations(&rest)
        .into_iter()
        .map(|tail| {
            let mut order = vec![0];
            order.extend(tail);
            let tour = Tour::new(order, instance.len()).unwrap();
            instance.tour_length(&tour).unwrap()
        })
        .fold(f64::INFINITY, f64::min)
}

fn assert_optimal(instance: &Instance, solution: &Solution, optimum: f64, name: &str) {
    assert!(
        solution.tour.is_permutation_of(instance.len()),
        "{name} returned an invalid tour: {}",
        solution.tour
    );
    let exact = instance.tour_length(&solution.tour).unwrap();
    assert!((exact - solution.length).abs() < TOLERANCE, "{name} misreported its length");
    assert!(
        (solution.length - optimum).abs() < TOLERANCE,
        "{name} found {} but the optimum is {}",
        solution.length,
        optimum
    );
}

#[test]
fn test_brute_force_reference() {
    let instance = square_with_center();
    assert_eq!(permutations(&[1, 2, 3, 4]).len(), 24);
    let expected = 30.0 + 2.0 * 50f64.sqrt();
    assert!((brute_force_optimum(&instance) - expected).abs() < 1e-9);
}

#[test]
fn test_constructors() {
    init_tracing();
    let instance = square_with_center();
    let optimum = brute_force_optimum(&instance);
    let mut rng = RandomNumberGenerator::from_seed(100);

    let mst = MstConstructor::new().construct(&instance, &mut rng).unwrap();
    assert!(mst.tour.is_permutation_of(5));
    assert!(mst.length <= 2.0 * optimum);

    let sampled = RandomSampling::new(300).unwrap().construct(&instance, &mut rng).unwrap();
    assert_optimal(&instance, &sampled, optimum, "random sampling");
}

#[test]
fn test_hill_climbing_restarts() {
    init_tracing();
    let instance = square_with_center();
    let optimum = brute_force_optimum(&instance);
    let mut rng = RandomNumberGenerator::from_seed(101);

    for variant in [SearchVariant::BestOfSample, SearchVariant::FirstImprovement] {
        let climber = HillClimbing::new(20, variant).unwrap().with_move_kind(MoveKind::Reverse);
        let mut best: Option<Solution> = None;
        for _ in 0..40 {
            let start = Tour::random(5, &mut rng);
            let start_length = instance.tour_length(&start).unwrap();
            let solution = climber.optimize_with_rng(&instance, start, &mut rng).unwrap();
            assert!(solution.length <= start_length + TOLERANCE);
            if best.as_ref().map_or(true, |b| solution.length < b.length) {
                best = Some(solution);
            }
        }
        assert_optimal(&instance, &best.unwrap(), optimum, "hill climbing");
    }
}

#[test]
fn test_simulated_annealing() {
    init_tracing();
    let instance = square_with_center();
    let optimum = brute_force_optimum(&instance);
    let mut rng = RandomNumberGenerator::from_seed(102);

    let annealing = SimulatedAnnealing::for_instance(&instance)
        .with_epoch_length(50)
        .with_max_epochs_without_improvement(50);
    let start = MstConstructor::new().construct(&instance, &mut rng).unwrap().tour;
    let solution = annealing.optimize_with_rng(&instance, start, &mut rng).unwrap();
    assert_optimal(&instance, &solution, optimum, "simulated annealing");
}

#[test]
fn test_tabu_search() {
    init_tracing();
    let instance = square_with_center();
    let optimum = brute_force_optimum(&instance);

    for neighborhood in [Neighborhood::Full, Neighborhood::Sampled] {
        let mut rng = RandomNumberGenerator::from_seed(103);
        let tabu = TabuSearch::new(3, 60).unwrap().with_neighborhood(neighborhood);
        let solution = tabu.optimize_random(&instance, &mut rng).unwrap();
        assert_optimal(&instance, &solution, optimum, "tabu search");
    }
}

#[test]
fn test_island_genetic_algorithm() {
    init_tracing();
    let instance = square_with_center();
    let optimum = brute_force_optimum(&instance);
    let mut rng = RandomNumberGenerator::from_seed(104);

    let options = IslandOptions::builder()
        .population_size(80)
        .islands(4)
        .epochs(4)
        .generations_per_epoch(30)
        .build();
    let launcher = IslandLauncher::new(options).unwrap();
    let seed = MstConstructor::new().construct(&instance, &mut rng).unwrap().tour;
    let solution = launcher.optimize_with_rng(&instance, seed, &mut rng).unwrap();
    assert_optimal(&instance, &solution, optimum, "island genetic algorithm");
}

#[test]
fn test_every_optimizer_through_the_trait() {
    init_tracing();
    let instance = square_with_center();
    let optimizers: Vec<Box<dyn Optimizer>> = vec![
        Box::new(HillClimbing::default()),
        Box::new(SimulatedAnnealing::for_instance(&instance)),
        Box::new(TabuSearch::default()),
        Box::new(
            IslandLauncher::new(
                IslandOptions::builder()
                    .population_size(20)
                    .islands(2)
                    .epochs(2)
                    .generations_per_epoch(5)
                    .build(),
            )
            .unwrap(),
        ),
    ];

    let mut rng = RandomNumberGenerator::from_seed(105);
    for optimizer in &optimizers {
        let start = Tour::random(5, &mut rng);
        let start_length = instance.tour_length(&start).unwrap();
        let solution = optimizer.optimize_with_rng(&instance, start, &mut rng).unwrap();
        assert!(solution.tour.is_permutation_of(5), "{optimizer:?}");
        assert!(solution.length <= start_length + TOLERANCE, "{optimizer:?}");
    }
}

#[test]
fn test_empty_and_single_city_instances() {
    let empty = Instance::default();
    let single = Instance::from_points(&[(3.0, 4.0)]);
    let mut rng = RandomNumberGenerator::from_seed(106);

    assert!(MstConstructor::new().construct(&empty, &mut rng).is_err());
    assert!(TabuSearch::default().optimize_random(&empty, &mut rng).is_err());

    let solution = SimulatedAnnealing::for_instance(&single)
        .optimize(&single, Tour::identity(1))
        .unwrap();
    assert_eq!(solution.length, 0.0);
    assert_eq!(solution.tour.as_slice(), &[0]);

    let mst = MstConstructor::new().construct(&single, &mut rng).unwrap();
    assert_eq!(mst.length, 0.0);
}
