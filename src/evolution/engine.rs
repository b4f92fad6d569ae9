//! # EvolutionEngine
//!
//! The `EvolutionEngine` owns the population, its index-aligned quality cache,
//! and the generation counter, and drives the generation cycle: carry the
//! elite, let the selection strategy preprocess the qualities, fill the
//! remaining slots through selection/crossover/mutation, then re-evaluate the
//! new population and advance the counter.
//!
//! ## Example
//!
//! ```rust
//! use microga::evolution::EvolutionEngine;
//! use microga::quality::QualityFunction;
//! use microga::selection::TournamentSelection;
//!
//! struct CountOnes;
//!
//! impl QualityFunction<Vec<u8>> for CountOnes {
//!     fn quality(&self, individual: &Vec<u8>) -> f64 {
//!         individual.iter().filter(|&&bit| bit == 1).count() as f64
//!     }
//! }
//!
//! fn main() -> microga::Result<()> {
//!     let mut engine = EvolutionEngine::builder()
//!         .with_quality(CountOnes)
//!         .with_selection(TournamentSelection::new(3, 0.9)?)
//!         .build()?;
//!
//!     engine.initialize(vec![vec![0u8, 1, 0, 1], vec![1u8, 1, 0, 0]])?;
//!     let result = engine.run_for_generations(5)?;
//!     assert!(result.quality >= 0.0);
//!     Ok(())
//! }
//! ```

use std::fmt::Debug;

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::crossover::Crossover;
use crate::error::{GeneticError, Result};
use crate::evolution::builder::EvolutionEngineBuilder;
use crate::evolution::observer::{GenerationSummary, Observer};
use crate::evolution::options::EngineOptions;
use crate::mutation::Mutation;
use crate::quality::QualityFunction;
use crate::rng::RandomNumberGenerator;
use crate::selection::Selection;

/// Represents the outcome of a fixed-length run: the best individual of the
/// final generation and its quality.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionResult<T> {
    /// The best individual of the final population.
    pub best: T,
    /// The quality of the best individual.
    pub quality: f64,
}

/// Represents the outcome of a threshold-bounded run.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdResult<T> {
    /// The best individual of the final population. Its quality may still be
    /// below the threshold when the generation budget ran out first.
    pub best: T,
    /// The quality of the best individual.
    pub quality: f64,
    /// The generation counter at which the run stopped.
    pub generations: usize,
}

/// Population, quality cache, and best-of-generation tracking.
///
/// `qualities[i]` always equals the quality of `population[i]` after any
/// (re-)evaluation. `best`/`best_quality` describe the maximum of the
/// *current* population only; with little or no elitism the reported best can
/// regress between generations, which keeps best tracking O(N) and stateless.
struct EngineState<T> {
    population: Vec<T>,
    qualities: Vec<f64>,
    best: T,
    best_quality: f64,
    generation: usize,
}

/// Drives the evolution of a fixed-size population toward higher quality.
///
/// The individual representation `T` is opaque to the engine; all
/// representation-specific behavior enters through the injected capabilities:
/// a [`QualityFunction`] and [`Selection`] strategy (required), plus optional
/// [`Crossover`] and [`Mutation`] operators. A chance parameter whose operator
/// is not configured is simply ignored in that dimension.
///
/// A generation advance either fully completes or leaves the previous
/// population untouched; no partially built generation is ever observable.
pub struct EvolutionEngine<T> {
    quality: Box<dyn QualityFunction<T>>,
    crossover: Option<Box<dyn Crossover<T>>>,
    mutation: Option<Box<dyn Mutation<T>>>,
    selection: Box<dyn Selection>,
    options: EngineOptions,
    rng: RandomNumberGenerator,
    observer: Option<Observer<T>>,
    state: Option<EngineState<T>>,
}

impl<T> EvolutionEngine<T>
where
    T: Clone + Debug + Send + Sync,
{
    /// Returns a builder for assembling an engine from its capabilities.
    pub fn builder() -> EvolutionEngineBuilder<T> {
        EvolutionEngineBuilder::new()
    }

    pub(crate) fn from_parts(
        quality: Box<dyn QualityFunction<T>>,
        crossover: Option<Box<dyn Crossover<T>>>,
        mutation: Option<Box<dyn Mutation<T>>>,
        selection: Box<dyn Selection>,
        options: EngineOptions,
        rng: RandomNumberGenerator,
        observer: Option<Observer<T>>,
    ) -> Self {
        Self {
            quality,
            crossover,
            mutation,
            selection,
            options,
            rng,
            observer,
            state: None,
        }
    }

    /// Returns the engine configuration.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Returns the engine configuration for in-place adjustment between runs.
    pub fn options_mut(&mut self) -> &mut EngineOptions {
        &mut self.options
    }

    /// Returns the generation counter; 0 before any generation completed.
    pub fn generation(&self) -> usize {
        self.state.as_ref().map_or(0, |state| state.generation)
    }

    /// Returns the best individual of the current population and its quality.
    pub fn best(&self) -> Option<(&T, f64)> {
        self.state
            .as_ref()
            .map(|state| (&state.best, state.best_quality))
    }

    /// Returns the current population.
    pub fn population(&self) -> Option<&[T]> {
        self.state.as_ref().map(|state| state.population.as_slice())
    }

    /// Returns the quality cache, index-aligned with the population.
    pub fn qualities(&self) -> Option<&[f64]> {
        self.state.as_ref().map(|state| state.qualities.as_slice())
    }

    /// Initializes the engine with a copy of the given population.
    ///
    /// Resets the generation counter to 0 and evaluates all qualities. The
    /// population size is fixed from here on: every later generation has
    /// exactly this length.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::EmptyPopulation` if `individuals` is empty, and
    /// `GeneticError::FitnessCalculation` if evaluation yields a non-finite
    /// quality.
    pub fn initialize(&mut self, individuals: Vec<T>) -> Result<()> {
        if individuals.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        let qualities = self.evaluate(&individuals)?;
        let (best_index, best_quality) = best_of(&qualities);
        let best = individuals[best_index].clone();
        let mean_quality = mean(&qualities);

        debug!(
            population = individuals.len(),
            best_quality, mean_quality, "population initialized"
        );

        if let Some(observer) = &mut self.observer {
            observer(GenerationSummary {
                generation: 0,
                best: &best,
                best_quality,
                mean_quality,
            });
        }

        self.state = Some(EngineState {
            population: individuals,
            qualities,
            best,
            best_quality,
            generation: 0,
        });

        Ok(())
    }

    /// Advances the evolution by exactly one generation.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::NotInitialized` if [`initialize`](Self::initialize)
    /// has not been called, and `GeneticError::FitnessCalculation` if the new
    /// generation evaluates to a non-finite quality. On error the previous
    /// population, qualities, and counter are left untouched.
    pub fn advance_one_generation(&mut self) -> Result<()> {
        let state = self.state.as_mut().ok_or(GeneticError::NotInitialized)?;
        let size = state.population.len();

        let mut next = elite_individuals(
            self.options.elitist_fraction(),
            &state.population,
            &state.qualities,
            &state.best,
        );
        trace!(elite = next.len(), "carried elite individuals");

        self.selection.preprocess(&state.qualities);

        while next.len() < size {
            if let Some(crossover) = &self.crossover {
                // The pair path needs two free slots; with one slot left we
                // fall through to the single-individual path, so the loop can
                // never overshoot the population size.
                if next.len() + 2 <= size && self.rng.gen_bool(self.options.crossover_chance()) {
                    let first = self.selection.select(&state.qualities, &mut self.rng)?;
                    let second = self.selection.select(&state.qualities, &mut self.rng)?;

                    let (child1, child2) = crossover.crossover(
                        &state.population[first],
                        &state.population[second],
                        &mut self.rng,
                    );

                    next.push(maybe_mutate(
                        self.mutation.as_deref(),
                        self.options.mutation_chance(),
                        child1,
                        &mut self.rng,
                    ));
                    next.push(maybe_mutate(
                        self.mutation.as_deref(),
                        self.options.mutation_chance(),
                        child2,
                        &mut self.rng,
                    ));
                    continue;
                }
            }

            let index = self.selection.select(&state.qualities, &mut self.rng)?;
            next.push(maybe_mutate(
                self.mutation.as_deref(),
                self.options.mutation_chance(),
                state.population[index].clone(),
                &mut self.rng,
            ));
        }

        // Commit only once the whole new generation evaluated cleanly.
        let qualities = self.evaluate(&next)?;
        let (best_index, best_quality) = best_of(&qualities);
        let mean_quality = mean(&qualities);

        let state = self.state.as_mut().ok_or(GeneticError::NotInitialized)?;
        state.best = next[best_index].clone();
        state.best_quality = best_quality;
        state.population = next;
        state.qualities = qualities;
        state.generation += 1;

        debug!(
            generation = state.generation,
            best_quality, mean_quality, "generation complete"
        );

        if let Some(observer) = &mut self.observer {
            observer(GenerationSummary {
                generation: state.generation,
                best: &state.best,
                best_quality,
                mean_quality,
            });
        }

        Ok(())
    }

    /// Advances exactly `generations` generations and returns the best
    /// individual of the final population together with its quality.
    ///
    /// With `generations` of 0 this returns the current best unchanged.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::NotInitialized` if [`initialize`](Self::initialize)
    /// has not been called, or any error from advancing a generation.
    pub fn run_for_generations(&mut self, generations: usize) -> Result<EvolutionResult<T>> {
        if self.state.is_none() {
            return Err(GeneticError::NotInitialized);
        }

        for _ in 0..generations {
            self.advance_one_generation()?;
        }

        let state = self.state.as_ref().ok_or(GeneticError::NotInitialized)?;
        Ok(EvolutionResult {
            best: state.best.clone(),
            quality: state.best_quality,
        })
    }

    /// Advances generations until the best quality reaches `threshold` or the
    /// generation counter reaches `max_generations`, whichever comes first.
    ///
    /// The predicate is tested before each advance: an initial population
    /// already at or above the threshold returns immediately at generation 0
    /// without advancing. When the budget runs out first, the returned
    /// quality may still be below the threshold.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::NotInitialized` if [`initialize`](Self::initialize)
    /// has not been called, or any error from advancing a generation.
    pub fn run_until_threshold(
        &mut self,
        threshold: f64,
        max_generations: usize,
    ) -> Result<ThresholdResult<T>> {
        loop {
            {
                let state = self.state.as_ref().ok_or(GeneticError::NotInitialized)?;
                if state.generation >= max_generations || state.best_quality >= threshold {
                    return Ok(ThresholdResult {
                        best: state.best.clone(),
                        quality: state.best_quality,
                        generations: state.generation,
                    });
                }
            }

            self.advance_one_generation()?;
        }
    }

    /// Evaluates the quality of every individual, in parallel when enabled.
    ///
    /// Quality evaluation is a pure per-individual function with no shared
    /// mutable state, so the parallel path is a plain data-parallel map.
    fn evaluate(&self, population: &[T]) -> Result<Vec<f64>> {
        let quality = self.quality.as_ref();

        let qualities: Vec<f64> = if self.options.parallel_evaluation() {
            population
                .par_iter()
                .map(|individual| quality.quality(individual))
                .collect()
        } else {
            population
                .iter()
                .map(|individual| quality.quality(individual))
                .collect()
        };

        if let Some(bad) = qualities.iter().find(|quality| !quality.is_finite()) {
            return Err(GeneticError::FitnessCalculation(format!(
                "Non-finite quality score encountered: {}",
                bad
            )));
        }

        Ok(qualities)
    }
}

/// Applies the mutation capability with the configured probability.
fn maybe_mutate<T>(
    mutation: Option<&dyn Mutation<T>>,
    chance: f64,
    child: T,
    rng: &mut RandomNumberGenerator,
) -> T {
    match mutation {
        Some(mutation) if rng.gen_bool(chance) => mutation.mutate(child, rng),
        _ => child,
    }
}

/// Returns the index and quality of the first maximum in `qualities`.
///
/// `qualities` must be non-empty.
fn best_of(qualities: &[f64]) -> (usize, f64) {
    let mut best_index = 0;
    let mut best_quality = f64::NEG_INFINITY;

    for (index, &quality) in qualities.iter().enumerate() {
        if quality > best_quality {
            best_index = index;
            best_quality = quality;
        }
    }

    (best_index, best_quality)
}

fn mean(qualities: &[f64]) -> f64 {
    qualities.iter().sum::<f64>() / qualities.len() as f64
}

/// Clones the `ceil(fraction * N)` highest-quality individuals.
///
/// An already admitted individual is never displaced by one of merely *equal*
/// quality, so ties resolve to whichever individual was encountered first.
fn elite_individuals<T: Clone>(
    fraction: f64,
    population: &[T],
    qualities: &[f64],
    best: &T,
) -> Vec<T> {
    if fraction == 0.0 {
        return Vec::new();
    }

    let count = (fraction * population.len() as f64).ceil() as usize;

    if count == 0 {
        return Vec::new();
    }

    if count == 1 {
        return vec![best.clone()];
    }

    // Bounded top-`count` structure, kept sorted by descending quality.
    let mut elite: Vec<(f64, usize)> = Vec::with_capacity(count);

    for (index, &quality) in qualities.iter().enumerate() {
        if elite.len() < count {
            let position = elite.partition_point(|&(held, _)| held >= quality);
            elite.insert(position, (quality, index));
        } else if quality > elite[count - 1].0 {
            elite.pop();
            let position = elite.partition_point(|&(held, _)| held >= quality);
            elite.insert(position, (quality, index));
        }
    }

    elite
        .into_iter()
        .map(|(_, index)| population[index].clone())
        .collect()
}
