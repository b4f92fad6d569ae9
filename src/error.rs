//! # Error Types
//!
//! This module defines the error type used throughout the evolutionary engine.
//! It provides specific error variants for the failure scenarios that can occur
//! while configuring or driving an evolution.
//!
//! Failures here are programming or configuration errors, never transient
//! conditions, so there is no retry machinery anywhere in the crate.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use microga::error::{GeneticError, Result};
//!
//! fn some_function() -> Result<()> {
//!     // Function implementation
//!     Ok(())
//! }
//!
//! fn caller() {
//!     match some_function() {
//!         Ok(_) => println!("Success!"),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

use thiserror::Error;

/// Represents errors that can occur while configuring or running the engine.
#[derive(Error, Debug)]
pub enum GeneticError {
    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when an empty population is encountered.
    /// Selection strategies are undefined over zero individuals.
    #[error("Empty population error: cannot operate on an empty population")]
    EmptyPopulation,

    /// Error that occurs when a run/advance method is called before
    /// [`initialize`](crate::evolution::EvolutionEngine::initialize).
    #[error("Engine not initialized: call initialize() before advancing generations")]
    NotInitialized,

    /// Error that occurs when a quality evaluation produces an unusable value.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// Error that occurs when a selection strategy is used incorrectly.
    #[error("Selection error: {0}")]
    Selection(String),
}

/// A specialized Result type for engine operations.
///
/// This type is a convenience wrapper around `std::result::Result` with the
/// error type fixed to `GeneticError`.
///
/// ## Examples
///
/// ```rust
/// use microga::error::{GeneticError, Result};
///
/// fn may_fail() -> Result<i32> {
///     // Some operation that might fail
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, GeneticError>;
