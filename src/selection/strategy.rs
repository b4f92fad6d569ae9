use std::fmt::Debug;

use crate::error::Result;
use crate::rng::RandomNumberGenerator;

/// Trait for selection strategies.
///
/// A selection strategy maps the population's quality array to the index of a
/// chosen parent. The engine calls [`preprocess`](Selection::preprocess)
/// exactly once per generation, before any selection, so strategies can build
/// whatever per-generation state they need (cumulative distributions, rank
/// tables); [`select`](Selection::select) is then called once per parent draw
/// against that state. Sampling is with replacement: the same index may be
/// returned on consecutive calls.
///
/// # Examples
///
/// ```
/// use microga::selection::{Selection, TournamentSelection};
/// use microga::rng::RandomNumberGenerator;
/// use microga::error::Result;
///
/// fn main() -> Result<()> {
///     let qualities = vec![0.5, 0.8, 0.3, 0.9, 0.1];
///     let mut rng = RandomNumberGenerator::from_seed(42);
///
///     let mut selection = TournamentSelection::default();
///     selection.preprocess(&qualities);
///     let parent = selection.select(&qualities, &mut rng)?;
///
///     assert!(parent < qualities.len());
///     Ok(())
/// }
/// ```
pub trait Selection: Debug + Send {
    /// Builds the per-generation selection state from the quality array.
    ///
    /// Called once per generation before any `select` call. Strategies without
    /// per-generation state may implement this as a no-op.
    fn preprocess(&mut self, qualities: &[f64]);

    /// Returns the index of one selected individual.
    ///
    /// # Arguments
    ///
    /// * `qualities` - The quality array the engine last passed to `preprocess`.
    /// * `rng` - The random number generator driving the draw.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The strategy requires `preprocess` and it has not been called
    /// - The quality array is empty
    fn select(&self, qualities: &[f64], rng: &mut RandomNumberGenerator) -> Result<usize>;
}
