use proptest::prelude::*;

use tspalg::{
    breeding::{ox, ox_with_segment, pmx, pmx_with_segment, swap_mutation, Breeder},
    instance::Instance,
    rng::RandomNumberGenerator,
    tour::{Move, Tour},
};

fn permutation(n: usize) -> impl Strategy<Value = Vec<usize>> {
    Just((0..n).collect::<Vec<usize>>()).prop_shuffle()
}

/// Two parents of the same length `>= 4` and a segment inside them.
fn parents_and_segment() -> impl Strategy<Value = (Vec<usize>, Vec<usize>, usize, usize)> {
    (4usize..40).prop_flat_map(|n| (permutation(n), permutation(n), 0..n, 0..n))
        .prop_map(|(p1, p2, a, b)| (p1, p2, a.min(b), a.max(b)))
}

fn is_permutation(child: &[usize], n: usize) -> bool {
    let mut sorted = child.to_vec();
    sorted.sort_unstable();
    sorted == (0..n).collect::<Vec<_>>()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn pmx_children_are_permutations((p1, p2, start, end) in parents_and_segment()) {
        let child = pmx_with_segment(&p1, &p2, start, end);
        prop_assert!(is_permutation(&child, p1.len()));
        prop_assert_eq!(&child[start..=end], &p1[start..=end]);
    }

    #[test]
    fn ox_children_are_permutations((p1, p2, start, end) in parents_and_segment()) {
        let child = ox_with_segment(&p1, &p2, start, end);
        prop_assert!(is_permutation(&child, p1.len()));
        prop_assert_eq!(&child[start..=end], &p1[start..=end]);

        // Outside the segment, cities keep their relative order from parent 2.
        let outside: Vec<usize> = child
            .iter()
            .enumerate()
            .filter(|(i, _)| *i < start || *i > end)
            .map(|(_, &c)| c)
            .collect();
        let expected: Vec<usize> = p2
            .iter()
            .copied()
            .filter(|c| !p1[start..=end].contains(c))
            .collect();
        prop_assert_eq!(outside, expected);
    }

    #[test]
    fn random_segment_operators_are_valid((p1, p2, _, _) in parents_and_segment(), seed in any::<u64>()) {
        let mut rng = RandomNumberGenerator::from_seed(seed);
        prop_assert!(is_permutation(&pmx(&p1, &p2, &mut rng), p1.len()));
        prop_assert!(is_permutation(&ox(&p1, &p2, &mut rng), p1.len()));
    }

    #[test]
    fn breeding_and_mutation_keep_permutations(
        (p1, p2, _, _) in parents_and_segment(),
        seed in any::<u64>(),
        crossover in 0.0f64..=1.0,
        mutation in 0.0f64..=1.0,
    ) {
        let n = p1.len();
        let mut rng = RandomNumberGenerator::from_seed(seed);
        let parent1 = Tour::new(p1, n).unwrap();
        let parent2 = Tour::new(p2, n).unwrap();
        let child = Breeder::new(crossover, 0.5, mutation).breed(&parent1, &parent2, &mut rng);
        prop_assert!(child.is_permutation_of(n));

        let mut genes = child.into_inner();
        swap_mutation(&mut genes, &mut rng);
        prop_assert!(is_permutation(&genes, n));
    }

    #[test]
    fn distance_is_symmetric_and_non_negative(
        points in prop::collection::vec((-1e3f64..1e3, -1e3f64..1e3), 2..20),
    ) {
        let instance = Instance::from_points(&points);
        for a in 0..instance.len() {
            prop_assert_eq!(instance.distance(a, a), 0.0);
            for b in 0..instance.len() {
                let d = instance.distance(a, b);
                prop_assert!(d >= 0.0);
                prop_assert_eq!(d, instance.distance(b, a));
            }
        }
    }

    #[test]
    fn reversal_keeps_permutation_and_length_is_rotation_invariant(
        order in (3usize..30).prop_flat_map(permutation),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
        seed in any::<u64>(),
    ) {
        let n = order.len();
        let mut rng = RandomNumberGenerator::from_seed(seed);
        let points: Vec<(f64, f64)> = (0..n).map(|_| (rng.uniform() * 50.0, rng.uniform() * 50.0)).collect();
        let instance = Instance::from_points(&points);

        let mut tour = Tour::new(order.clone(), n).unwrap();
        let length = instance.tour_length(&tour).unwrap();

        let mut rotated = order.clone();
        rotated.rotate_left(a.index(n));
        let rotated = Tour::new(rotated, n).unwrap();
        prop_assert!((instance.tour_length(&rotated).unwrap() - length).abs() < 1e-9);

        if let Some(mv) = Move::new(a.index(n), b.index(n)) {
            tour.reverse(mv);
            prop_assert!(tour.is_permutation_of(n));
        }
    }
}
