//! # Mutation Trait
//!
//! The `Mutation` trait produces a "nearby" variant of an individual. There is
//! no default implementation; it is purely a capability contract, and an
//! engine configured without one simply never mutates.

use crate::rng::RandomNumberGenerator;

/// Produces a variant of the given individual.
///
/// The engine flips a coin with its configured mutation chance for every
/// freshly produced child and calls this method on success, so implementations
/// should apply their perturbation unconditionally.
///
/// ## Example
///
/// ```rust
/// use microga::mutation::Mutation;
/// use microga::rng::RandomNumberGenerator;
///
/// struct FlipBit;
///
/// impl Mutation<Vec<u8>> for FlipBit {
///     fn mutate(&self, mut individual: Vec<u8>, rng: &mut RandomNumberGenerator) -> Vec<u8> {
///         let i = rng.gen_range(0..individual.len());
///         individual[i] ^= 1;
///         individual
///     }
/// }
/// ```
pub trait Mutation<T>: Send + Sync {
    /// Returns a mutated copy of `individual`.
    fn mutate(&self, individual: T, rng: &mut RandomNumberGenerator) -> T;
}
