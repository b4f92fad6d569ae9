//! # EngineOptions
//!
//! The `EngineOptions` struct holds the tunables of the evolution engine:
//! crossover chance, mutation chance, elitist fraction, and whether quality
//! evaluation runs in parallel. All ranges are validated at construction and
//! in the setters.
//!
//! ## Example
//!
//! ```rust
//! use microga::evolution::options::EngineOptions;
//!
//! let custom_options = EngineOptions::builder()
//!     .crossover_chance(0.8)
//!     .mutation_chance(0.05)
//!     .elitist_fraction(0.1)
//!     .parallel_evaluation(false)
//!     .build()
//!     .unwrap();
//!
//! let default_options = EngineOptions::default();
//! assert_eq!(default_options.crossover_chance(), 0.7);
//! ```

use crate::error::{GeneticError, Result};

/// Configuration for the evolution engine.
///
/// Defaults: crossover chance 0.7, mutation chance 0.1, elitist fraction 0,
/// parallel evaluation on.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    crossover_chance: f64,
    mutation_chance: f64,
    elitist_fraction: f64,
    parallel_evaluation: bool,
}

impl EngineOptions {
    /// Creates a new `EngineOptions` instance with the specified parameters.
    ///
    /// # Arguments
    ///
    /// * `crossover_chance` - Probability of producing a pair of children by
    ///   crossover, in `[0, 1]`.
    /// * `mutation_chance` - Probability of mutating each freshly produced
    ///   child, in `[0, 1]`.
    /// * `elitist_fraction` - Fraction of the population carried over
    ///   unchanged each generation, in `[0, 1]`. A fraction of 1.0 carries
    ///   the whole population and disables selection, crossover, and
    ///   mutation.
    /// * `parallel_evaluation` - Whether quality re-evaluation runs in
    ///   parallel across the population.
    ///
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error when a parameter is
    /// outside its range.
    pub fn new(
        crossover_chance: f64,
        mutation_chance: f64,
        elitist_fraction: f64,
        parallel_evaluation: bool,
    ) -> Result<Self> {
        validate_chance("crossover chance", crossover_chance)?;
        validate_chance("mutation chance", mutation_chance)?;
        validate_chance("elitist fraction", elitist_fraction)?;

        Ok(Self {
            crossover_chance,
            mutation_chance,
            elitist_fraction,
            parallel_evaluation,
        })
    }

    pub fn crossover_chance(&self) -> f64 {
        self.crossover_chance
    }

    pub fn mutation_chance(&self) -> f64 {
        self.mutation_chance
    }

    pub fn elitist_fraction(&self) -> f64 {
        self.elitist_fraction
    }

    pub fn parallel_evaluation(&self) -> bool {
        self.parallel_evaluation
    }

    /// Sets the crossover chance.
    ///
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if the value is outside `[0, 1]`.
    pub fn set_crossover_chance(&mut self, chance: f64) -> Result<()> {
        validate_chance("crossover chance", chance)?;
        self.crossover_chance = chance;
        Ok(())
    }

    /// Sets the mutation chance.
    ///
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if the value is outside `[0, 1]`.
    pub fn set_mutation_chance(&mut self, chance: f64) -> Result<()> {
        validate_chance("mutation chance", chance)?;
        self.mutation_chance = chance;
        Ok(())
    }

    /// Sets the elitist fraction.
    ///
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if the value is outside `[0, 1]`.
    pub fn set_elitist_fraction(&mut self, fraction: f64) -> Result<()> {
        validate_chance("elitist fraction", fraction)?;
        self.elitist_fraction = fraction;
        Ok(())
    }

    /// Enables or disables parallel quality evaluation.
    pub fn set_parallel_evaluation(&mut self, parallel: bool) {
        self.parallel_evaluation = parallel;
    }

    /// Returns a builder for creating an `EngineOptions` instance.
    pub fn builder() -> EngineOptionsBuilder {
        EngineOptionsBuilder::default()
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            crossover_chance: 0.7,
            mutation_chance: 0.1,
            elitist_fraction: 0.0,
            parallel_evaluation: true,
        }
    }
}

fn validate_chance(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(GeneticError::Configuration(format!(
            "{} must be in [0, 1], got {}",
            name, value
        )));
    }
    Ok(())
}

/// Builder for `EngineOptions`.
///
/// Provides a fluent interface for constructing `EngineOptions` instances.
#[derive(Debug, Clone, Default)]
pub struct EngineOptionsBuilder {
    crossover_chance: Option<f64>,
    mutation_chance: Option<f64>,
    elitist_fraction: Option<f64>,
    parallel_evaluation: Option<bool>,
}

impl EngineOptionsBuilder {
    /// Sets the crossover chance.
    pub fn crossover_chance(mut self, value: f64) -> Self {
        self.crossover_chance = Some(value);
        self
    }

    /// Sets the mutation chance.
    pub fn mutation_chance(mut self, value: f64) -> Self {
        self.mutation_chance = Some(value);
        self
    }

    /// Sets the elitist fraction.
    pub fn elitist_fraction(mut self, value: f64) -> Self {
        self.elitist_fraction = Some(value);
        self
    }

    /// Enables or disables parallel quality evaluation.
    pub fn parallel_evaluation(mut self, value: bool) -> Self {
        self.parallel_evaluation = Some(value);
        self
    }

    /// Builds the `EngineOptions` instance.
    ///
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error when a parameter is
    /// outside its range.
    pub fn build(self) -> Result<EngineOptions> {
        let defaults = EngineOptions::default();

        EngineOptions::new(
            self.crossover_chance.unwrap_or(defaults.crossover_chance),
            self.mutation_chance.unwrap_or(defaults.mutation_chance),
            self.elitist_fraction.unwrap_or(defaults.elitist_fraction),
            self.parallel_evaluation
                .unwrap_or(defaults.parallel_evaluation),
        )
    }
}
