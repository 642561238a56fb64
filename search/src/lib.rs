mod config;
mod engine;
mod move_ordering;

pub use config::{PhaseDepths, SearchConfig};
pub use engine::AlphaBeta;
pub use move_ordering::{MoveScorer, OrderingWeights};
