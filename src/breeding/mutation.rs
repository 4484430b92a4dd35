use crate::rng::RandomNumberGenerator;

/// Swaps two distinct random positions. Chromosomes shorter than two genes are
/// left unchanged.
pub fn swap_mutation(genes: &mut [usize], rng: &mut RandomNumberGenerator) {
    if genes.len() < 2 {
        return;
    }
    let (i, j) = rng.distinct_pair(genes.len());
    genes.swap(i, j);
}
