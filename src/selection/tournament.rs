use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;
use crate::selection::strategy::Selection;

/// A selection strategy that picks the winner of a randomly drawn tournament.
///
/// Each `select` call draws `size` contestant indices uniformly at random
/// *with replacement* from the population. With probability `p` the contestant
/// with the highest quality wins (ties broken by first-drawn); otherwise a
/// uniformly random contestant from the same drawn set wins, which may still
/// happen to be the best one.
///
/// Tournament selection is stateless, so `preprocess` is a no-op. Selection
/// pressure grows with both `size` and `p`; with `size` of 1 every draw
/// returns its single contestant regardless of `p`.
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
///     let mut selection = TournamentSelection::new(3, 0.8)?;
///     selection.preprocess(&qualities);
///     let parent = selection.select(&qualities, &mut rng)?;
///
///     assert!(parent < qualities.len());
///     Ok(())
/// }
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct TournamentSelection {
    size: usize,
    p: f64,
}

impl TournamentSelection {
    /// Creates a new TournamentSelection strategy.
    ///
    /// # Arguments
    ///
    /// * `size` - The number of contestants drawn per tournament. Must be at
    ///   least 1.
    /// * `p` - The probability that the best contestant wins. Must be in
    ///   `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if `size` is 0 or `p` is
    /// outside `[0, 1]`.
    pub fn new(size: usize, p: f64) -> Result<Self> {
        Self::validate_size(size)?;
        Self::validate_p(p)?;

        Ok(Self { size, p })
    }

    /// Returns the tournament size.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the probability that the best contestant wins.
    pub fn p(&self) -> f64 {
        self.p
    }

    /// Sets the tournament size.
    ///
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if `size` is 0.
    pub fn set_size(&mut self, size: usize) -> Result<()> {
        Self::validate_size(size)?;
        self.size = size;
        Ok(())
    }

    /// Sets the probability that the best contestant wins.
    ///
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if `p` is outside `[0, 1]`.
    pub fn set_p(&mut self, p: f64) -> Result<()> {
        Self::validate_p(p)?;
        self.p = p;
        Ok(())
    }

    fn validate_size(size: usize) -> Result<()> {
        if size < 1 {
            return Err(GeneticError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_p(p: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&p) {
            return Err(GeneticError::Configuration(format!(
                "Tournament win probability must be in [0, 1], got {}",
                p
            )));
        }
        Ok(())
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self { size: 20, p: 0.9 }
    }
}

impl Selection for TournamentSelection {
    fn preprocess(&mut self, _qualities: &[f64]) {}

    fn select(&self, qualities: &[f64], rng: &mut RandomNumberGenerator) -> Result<usize> {
        if qualities.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        let mut contestants = Vec::with_capacity(self.size);
        for _ in 0..self.size {
            contestants.push(rng.gen_range(0..qualities.len()));
        }

        if rng.gen_bool(self.p) {
            // First-drawn contestant wins quality ties.
            let mut winner = contestants[0];
            for &contestant in &contestants[1..] {
                if qualities[contestant] > qualities[winner] {
                    winner = contestant;
                }
            }
            Ok(winner)
        } else {
            Ok(contestants[rng.gen_range(0..self.size)])
        }
    }
}
