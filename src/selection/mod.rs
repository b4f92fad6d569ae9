pub mod rank;
pub mod roulette;
pub mod strategy;
pub mod tournament;

pub use rank::RankSelection;
pub use roulette::RouletteSelection;
pub use strategy::Selection;
pub use tournament::TournamentSelection;
