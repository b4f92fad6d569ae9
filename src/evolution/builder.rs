use std::fmt::Debug;

use crate::crossover::Crossover;
use crate::error::{GeneticError, Result};
use crate::evolution::engine::EvolutionEngine;
use crate::evolution::observer::{GenerationSummary, Observer};
use crate::evolution::options::EngineOptions;
use crate::mutation::Mutation;
use crate::quality::QualityFunction;
use crate::rng::RandomNumberGenerator;
use crate::selection::Selection;

/// Builder for [`EvolutionEngine`].
///
/// The quality function and selection strategy are required; crossover,
/// mutation, options, RNG, and the generation observer are optional. Missing
/// required capabilities fail fast with a `GeneticError::Configuration` from
/// [`build`](Self::build).
///
/// # Examples
///
/// ```
/// use microga::evolution::EvolutionEngineBuilder;
/// use microga::quality::QualityFunction;
/// use microga::selection::RouletteSelection;
///
/// struct Identity;
///
/// impl QualityFunction<f64> for Identity {
///     fn quality(&self, individual: &f64) -> f64 {
///         *individual
///     }
/// }
///
/// fn main() -> microga::Result<()> {
///     let engine = EvolutionEngineBuilder::new()
///         .with_quality(Identity)
///         .with_selection(RouletteSelection::new())
///         .with_seed(42)
///         .build()?;
///     drop(engine);
///     Ok(())
/// }
/// ```
pub struct EvolutionEngineBuilder<T> {
    quality: Option<Box<dyn QualityFunction<T>>>,
    crossover: Option<Box<dyn Crossover<T>>>,
    mutation: Option<Box<dyn Mutation<T>>>,
    selection: Option<Box<dyn Selection>>,
    options: EngineOptions,
    rng: Option<RandomNumberGenerator>,
    observer: Option<Observer<T>>,
}

impl<T> EvolutionEngineBuilder<T>
where
    T: Clone + Debug + Send + Sync,
{
    pub fn new() -> Self {
        Self {
            quality: None,
            crossover: None,
            mutation: None,
            selection: None,
            options: EngineOptions::default(),
            rng: None,
            observer: None,
        }
    }

    /// Sets the quality function. Required.
    pub fn with_quality(mut self, quality: impl QualityFunction<T> + 'static) -> Self {
        self.quality = Some(Box::new(quality));
        self
    }

    /// Sets the crossover capability.
    pub fn with_crossover(mut self, crossover: impl Crossover<T> + 'static) -> Self {
        self.crossover = Some(Box::new(crossover));
        self
    }

    /// Sets the mutation capability.
    pub fn with_mutation(mut self, mutation: impl Mutation<T> + 'static) -> Self {
        self.mutation = Some(Box::new(mutation));
        self
    }

    /// Sets the selection strategy. Required.
    pub fn with_selection(mut self, selection: impl Selection + 'static) -> Self {
        self.selection = Some(Box::new(selection));
        self
    }

    /// Sets the engine configuration.
    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the random number generator.
    pub fn with_rng(mut self, rng: RandomNumberGenerator) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Seeds the engine's random number generator for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Some(RandomNumberGenerator::from_seed(seed));
        self
    }

    /// Sets the generation observer, invoked once per completed generation.
    pub fn with_observer(
        mut self,
        observer: impl for<'a> FnMut(GenerationSummary<'a, T>) + Send + 'static,
    ) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Builds the engine.
    ///
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error when the quality function
    /// or selection strategy is missing.
    pub fn build(self) -> Result<EvolutionEngine<T>> {
        let quality = self.quality.ok_or_else(|| {
            GeneticError::Configuration("Quality function not specified".to_string())
        })?;

        let selection = self.selection.ok_or_else(|| {
            GeneticError::Configuration("Selection strategy not specified".to_string())
        })?;

        Ok(EvolutionEngine::from_parts(
            quality,
            self.crossover,
            self.mutation,
            selection,
            self.options,
            self.rng.unwrap_or_default(),
            self.observer,
        ))
    }
}

impl<T> Default for EvolutionEngineBuilder<T>
where
    T: Clone + Debug + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}
