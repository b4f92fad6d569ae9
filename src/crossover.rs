//! # Crossover Trait
//!
//! The `Crossover` trait recombines two parents into two children of the same
//! "shape". The engine treats it as an opaque capability; the one concrete
//! implementation here, [`OnePointCrossover`], exemplifies the contract for
//! fixed-length sequence representations.

use crate::rng::RandomNumberGenerator;

/// Forms two new children by crossing over two parents.
///
/// Implementations must produce children with the same shape as the parents
/// (for sequence representations: the same length), so that population
/// invariants survive recombination.
pub trait Crossover<T>: Send + Sync {
    /// Recombines `parent1` and `parent2` into two children.
    fn crossover(
        &self,
        parent1: &T,
        parent2: &T,
        rng: &mut RandomNumberGenerator,
    ) -> (T, T);
}

/// One-point recombination on fixed-length sequences.
///
/// A split index `j` is drawn uniformly from `[0, len)`; the first child takes
/// `parent1[..j]` followed by `parent2[j..]`, the second child the reverse.
/// Applying the operator with the parents swapped and the same split yields
/// the swapped pair of children.
///
/// Both parents must be non-empty and of equal length; the operator indexes
/// one parent by the other's length and will panic on a mismatch.
///
/// ## Example
///
/// ```rust
/// use microga::crossover::{Crossover, OnePointCrossover};
/// use microga::rng::RandomNumberGenerator;
///
/// let mut rng = RandomNumberGenerator::from_seed(7);
/// let crossover = OnePointCrossover;
/// let (child1, child2) = crossover.crossover(&vec![0u8, 0, 0, 0], &vec![1u8, 1, 1, 1], &mut rng);
/// assert_eq!(child1.len(), 4);
/// assert_eq!(child2.len(), 4);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct OnePointCrossover;

impl OnePointCrossover {
    fn cross_at<G: Clone>(parent1: &[G], parent2: &[G], split: usize) -> (Vec<G>, Vec<G>) {
        let mut child1 = Vec::with_capacity(parent1.len());
        let mut child2 = Vec::with_capacity(parent2.len());

        child1.extend_from_slice(&parent1[..split]);
        child1.extend_from_slice(&parent2[split..]);

        child2.extend_from_slice(&parent2[..split]);
        child2.extend_from_slice(&parent1[split..]);

        (child1, child2)
    }
}

impl<G> Crossover<Vec<G>> for OnePointCrossover
where
    G: Clone + Send + Sync,
{
    fn crossover(
        &self,
        parent1: &Vec<G>,
        parent2: &Vec<G>,
        rng: &mut RandomNumberGenerator,
    ) -> (Vec<G>, Vec<G>) {
        let split = rng.gen_range(0..parent1.len());
        Self::cross_at(parent1, parent2, split)
    }
}
