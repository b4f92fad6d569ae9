use std::cmp::Ordering;

use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;
use crate::selection::roulette::CumulativeWheel;
use crate::selection::strategy::Selection;

/// A selection strategy that picks individuals by their quality rank rather
/// than their raw quality value.
///
/// Rank selection limits the influence of outliers: the best individual in
/// the current population gets rank 0 and selection weight `p`, the next
/// `p^2`, and so on down the ranking. Because the weights depend only on rank,
/// the cumulative wheel is cached and rebuilt only when the population size or
/// `p` changes; the rank-to-index table, which does depend on the actual
/// quality values, is rebuilt on every `preprocess` call. Individuals with
/// equal quality are ranked in original index order.
///
/// # Examples
///
/// ```
/// use microga::selection::{RankSelection, Selection};
/// use microga::rng::RandomNumberGenerator;
/// use microga::error::Result;
///
/// fn main() -> Result<()> {
///     let qualities = vec![10.0, 40.0, 20.0, 30.0];
///     let mut rng = RandomNumberGenerator::from_seed(42);
///
///     let mut selection = RankSelection::with_p(0.9)?;
///     selection.preprocess(&qualities);
///     let parent = selection.select(&qualities, &mut rng)?;
///
///     assert!(parent < qualities.len());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RankSelection {
    /// Decay of the rank weights; rank `r` carries weight `p^(r+1)`.
    p: f64,
    wheel: Option<CumulativeWheel>,
    rank_to_index: Vec<usize>,
}

impl RankSelection {
    /// Creates a new RankSelection strategy with the default decay of 0.9.
    pub fn new() -> Self {
        Self {
            p: 0.9,
            wheel: None,
            rank_to_index: Vec::new(),
        }
    }

    /// Creates a new RankSelection strategy with the specified decay.
    ///
    /// # Arguments
    ///
    /// * `p` - The rank-weight decay. Must be in the open interval (0, 1).
    ///   Values close to 1 flatten the distribution; values close to 0
    ///   concentrate nearly all selection probability on the best ranks.
    ///
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if `p` is outside (0, 1).
    pub fn with_p(p: f64) -> Result<Self> {
        Self::validate_p(p)?;

        Ok(Self {
            p,
            wheel: None,
            rank_to_index: Vec::new(),
        })
    }

    /// Returns the rank-weight decay.
    pub fn p(&self) -> f64 {
        self.p
    }

    /// Sets the rank-weight decay and invalidates the cached wheel.
    ///
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if `p` is outside (0, 1).
    pub fn set_p(&mut self, p: f64) -> Result<()> {
        Self::validate_p(p)?;
        self.p = p;
        self.wheel = None;
        Ok(())
    }

    fn validate_p(p: f64) -> Result<()> {
        if !(p > 0.0 && p < 1.0) {
            return Err(GeneticError::Configuration(format!(
                "Rank selection decay must be in (0, 1), got {}",
                p
            )));
        }
        Ok(())
    }
}

impl Default for RankSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl Selection for RankSelection {
    fn preprocess(&mut self, qualities: &[f64]) {
        let n = qualities.len();

        if self.wheel.as_ref().map_or(true, |wheel| wheel.len() != n) {
            let p = self.p;
            self.wheel = Some(CumulativeWheel::from_weights(
                (1..=n as i32).map(|rank| p.powi(rank)),
            ));
        }

        // The rank-to-index mapping always tracks the current qualities, even
        // when the wheel itself is reused. Best individual first; the stable
        // sort keeps equal qualities in original index order.
        let mut indices: Vec<usize> = (0..n).collect();
        indices.sort_by(|&a, &b| {
            qualities[b]
                .partial_cmp(&qualities[a])
                .unwrap_or(Ordering::Equal)
        });
        self.rank_to_index = indices;
    }

    fn select(&self, _qualities: &[f64], rng: &mut RandomNumberGenerator) -> Result<usize> {
        let wheel = self.wheel.as_ref().ok_or_else(|| {
            GeneticError::Selection("preprocess must be called before rank selection".to_string())
        })?;

        if wheel.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        // The wheel gives us the rank of the individual we want to return.
        let rank = wheel.spin(rng);
        Ok(self.rank_to_index[rank])
    }
}
