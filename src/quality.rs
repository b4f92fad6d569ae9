//! # QualityFunction Trait
//!
//! The `QualityFunction` trait scores individuals. Higher scores are better.
//! It is the one capability the engine cannot run without.

/// Assigns a real-valued quality to an individual; higher is better.
///
/// The engine caches the score of every individual once per generation and
/// hands the cached array to the selection strategy, so implementations must
/// be deterministic for the cache to stay meaningful (the engine does not
/// enforce this). Evaluation may run in parallel across the population, hence
/// the `Send + Sync` bound.
///
/// ## Example
///
/// ```rust
/// use microga::quality::QualityFunction;
///
/// struct CountOnes;
///
/// impl QualityFunction<Vec<u8>> for CountOnes {
///     fn quality(&self, individual: &Vec<u8>) -> f64 {
///         individual.iter().filter(|&&bit| bit == 1).count() as f64
///     }
/// }
/// ```
pub trait QualityFunction<T>: Send + Sync {
    /// Computes the quality of the given individual.
    fn quality(&self, individual: &T) -> f64;
}
