use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;
use crate::selection::strategy::Selection;

/// A cumulative-weight distribution that can be sampled in O(log N).
///
/// Holds the running sums of a weight sequence together with their total.
/// Spinning draws a uniform slice in `[0, total)` and binary-searches for the
/// smallest index whose cumulative weight exceeds it, clamping to the last
/// index when rounding pushes the search past the end.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CumulativeWheel {
    cumulative: Vec<f64>,
    total: f64,
}

impl CumulativeWheel {
    pub(crate) fn from_weights<I>(weights: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut cumulative = Vec::new();
        let mut total = 0.0;

        for weight in weights {
            total += weight;
            cumulative.push(total);
        }

        Self { cumulative, total }
    }

    pub(crate) fn len(&self) -> usize {
        self.cumulative.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// Draws one index from the distribution.
    ///
    /// The wheel must be non-empty. Weights are expected to be non-negative;
    /// with negative or all-zero weights the returned index is arbitrary.
    pub(crate) fn spin(&self, rng: &mut RandomNumberGenerator) -> usize {
        // Scaling a unit draw avoids an empty sampling range when the total
        // collapses to zero.
        let slice = rng.gen_range(0.0..1.0) * self.total;
        let index = self.cumulative.partition_point(|&sum| sum <= slice);

        index.min(self.cumulative.len() - 1)
    }
}

/// A selection strategy that picks individuals with probability proportional
/// to their quality (fitness-proportionate selection).
///
/// `preprocess` builds a [cumulative wheel](CumulativeWheel) over the raw
/// quality values; each `select` spins it. Qualities must behave as
/// non-negative weights: with negative or all-zero qualities the selected
/// index is undefined (no normalization or special-casing is applied).
///
/// # Examples
///
/// ```
/// use microga::selection::{RouletteSelection, Selection};
/// use microga::rng::RandomNumberGenerator;
/// use microga::error::Result;
///
/// fn main() -> Result<()> {
///     let qualities = vec![1.0, 2.0, 3.0, 4.0];
///     let mut rng = RandomNumberGenerator::from_seed(42);
///
///     let mut selection = RouletteSelection::new();
///     selection.preprocess(&qualities);
///     let parent = selection.select(&qualities, &mut rng)?;
///
///     assert!(parent < qualities.len());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouletteSelection {
    wheel: Option<CumulativeWheel>,
}

impl RouletteSelection {
    /// Creates a new RouletteSelection strategy.
    pub fn new() -> Self {
        Self { wheel: None }
    }
}

impl Selection for RouletteSelection {
    fn preprocess(&mut self, qualities: &[f64]) {
        // The wheel depends on the actual quality values, so it is rebuilt
        // every generation.
        self.wheel = Some(CumulativeWheel::from_weights(qualities.iter().copied()));
    }

    fn select(&self, _qualities: &[f64], rng: &mut RandomNumberGenerator) -> Result<usize> {
        let wheel = self.wheel.as_ref().ok_or_else(|| {
            GeneticError::Selection(
                "preprocess must be called before roulette selection".to_string(),
            )
        })?;

        if wheel.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        Ok(wheel.spin(rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_before_preprocess_fails() {
        let selection = RouletteSelection::new();
        let mut rng = RandomNumberGenerator::from_seed(42);

        assert!(selection.select(&[1.0, 2.0], &mut rng).is_err());
    }

    #[test]
    fn test_select_on_empty_qualities_fails() {
        let mut selection = RouletteSelection::new();
        let mut rng = RandomNumberGenerator::from_seed(42);

        selection.preprocess(&[]);
        assert!(selection.select(&[], &mut rng).is_err());
    }

    #[test]
    fn test_single_individual_is_always_selected() {
        let mut selection = RouletteSelection::new();
        let mut rng = RandomNumberGenerator::from_seed(42);
        let qualities = vec![3.5];

        selection.preprocess(&qualities);

        for _ in 0..20 {
            assert_eq!(selection.select(&qualities, &mut rng).unwrap(), 0);
        }
    }

    #[test]
    fn test_zero_weight_individual_is_never_selected() {
        let mut selection = RouletteSelection::new();
        let mut rng = RandomNumberGenerator::from_seed(42);
        let qualities = vec![0.0, 1.0, 0.0, 1.0];

        selection.preprocess(&qualities);

        for _ in 0..500 {
            let index = selection.select(&qualities, &mut rng).unwrap();
            assert!(index == 1 || index == 3);
        }
    }

    #[test]
    fn test_selection_frequencies_track_quality() {
        let mut selection = RouletteSelection::new();
        let mut rng = RandomNumberGenerator::from_seed(42);
        let qualities = vec![1.0, 2.0, 3.0, 4.0];
        let trials = 40_000;

        selection.preprocess(&qualities);

        let mut counts = [0usize; 4];
        for _ in 0..trials {
            counts[selection.select(&qualities, &mut rng).unwrap()] += 1;
        }

        // Expected frequency of index i is qualities[i] / 10.
        for (i, &count) in counts.iter().enumerate() {
            let observed = count as f64 / trials as f64;
            let expected = qualities[i] / 10.0;
            assert!(
                (observed - expected).abs() < 0.02,
                "index {}: observed {} expected {}",
                i,
                observed,
                expected
            );
        }
    }

    #[test]
    fn test_wheel_cumulative_sums() {
        let wheel = CumulativeWheel::from_weights([1.0, 2.0, 3.0]);

        assert_eq!(wheel.len(), 3);
        assert_eq!(wheel.cumulative, vec![1.0, 3.0, 6.0]);
        assert_eq!(wheel.total, 6.0);
    }

    #[test]
    fn test_wheel_spin_stays_in_bounds() {
        let wheel = CumulativeWheel::from_weights([0.1, 0.1, 0.1]);
        let mut rng = RandomNumberGenerator::from_seed(7);

        for _ in 0..1000 {
            assert!(wheel.spin(&mut rng) < 3);
        }
    }
}
