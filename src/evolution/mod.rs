pub mod builder;
pub mod engine;
pub mod observer;
pub mod options;

pub use builder::EvolutionEngineBuilder;
pub use engine::{EvolutionEngine, EvolutionResult, ThresholdResult};
pub use observer::{GenerationSummary, Observer};
pub use options::{EngineOptions, EngineOptionsBuilder};
