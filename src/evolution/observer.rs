//! # Generation Observer
//!
//! Once per completed generation (and once on initialization) the engine can
//! report a [`GenerationSummary`] to an optional observer callback. The
//! observer is a plain `FnMut`, decoupled from the advancement logic, and is
//! the crate's reporting surface for progress bars, logging, or convergence
//! plots.

/// A snapshot of the population handed to the generation observer.
#[derive(Debug)]
pub struct GenerationSummary<'a, T> {
    /// The generation counter after this generation completed. 0 means the
    /// summary describes the freshly initialized population.
    pub generation: usize,
    /// The best individual of the current population.
    pub best: &'a T,
    /// The quality of the best individual.
    pub best_quality: f64,
    /// The arithmetic mean of all qualities in the current population.
    pub mean_quality: f64,
}

/// The observer callback type stored by the engine.
pub type Observer<T> = Box<dyn for<'a> FnMut(GenerationSummary<'a, T>) + Send>;
