//! A single weighted-sampling primitive shared by the generator, mutation, and
//! time-slot weighting, per the one-primitive recommendation for this kind of search.

use rand::distributions::WeightedIndex;
use rand::prelude::*;

/// Samples an index into `weights` with probability proportional to its weight.
/// Every weight must be finite and non-negative, and at least one must be positive.
pub fn weighted_index<R: Rng + ?Sized>(rng: &mut R, weights: &[f64]) -> usize {
    WeightedIndex::new(weights)
        .expect("weighted_index requires at least one positive weight")
        .sample(rng)
}

/// Picks an element from `items` with probability proportional to `weight_fn`.
pub fn weighted_pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T], weight_fn: impl Fn(&T) -> f64) -> &'a T {
    let weights: Vec<f64> = items.iter().map(weight_fn).collect();
    &items[weighted_index(rng, &weights)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    #[test]
    fn weighted_index_favors_heavier_weight() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut counts = [0usize; 2];
        for _ in 0..2000 {
            counts[weighted_index(&mut rng, &[1.0, 9.0])] += 1;
        }
        assert!(counts[1] > counts[0]);
    }

    #[test]
    fn weighted_index_is_reproducible_from_seed() {
        let weights = [1.0, 2.0, 3.0, 4.0];
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let sequence_a: Vec<usize> = (0..20).map(|_| weighted_index(&mut a, &weights)).collect();
        let sequence_b: Vec<usize> = (0..20).map(|_| weighted_index(&mut b, &weights)).collect();
        assert_eq!(sequence_a, sequence_b);
    }
}
