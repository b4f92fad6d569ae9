pub mod crossover;
pub mod error;
pub mod evolution;
pub mod mutation;
pub mod quality;
pub mod rng;
pub mod selection;

// Re-export commonly used types for convenience
pub use crossover::{Crossover, OnePointCrossover};
pub use error::{GeneticError, Result};
pub use evolution::{
    EngineOptions, EvolutionEngine, EvolutionEngineBuilder, EvolutionResult, GenerationSummary,
    ThresholdResult,
};
pub use mutation::Mutation;
pub use quality::QualityFunction;
pub use rng::RandomNumberGenerator;
pub use selection::{RankSelection, RouletteSelection, Selection, TournamentSelection};
