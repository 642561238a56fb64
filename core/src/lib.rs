//! Move selection for a single live game: a canned opening reply, an
//! endgame tablebase lookup, or a shallow alpha-beta search with a few
//! move-level heuristics on top.

mod adjustments;
mod config;
mod opening;
mod selector;

pub use adjustments::{worst_hanging_loss, Adjustments};
pub use config::{ConfigError, EngineConfig, OracleConfig};
pub use opening::{OpeningBook, OpeningConfig};
pub use selector::{Engine, SelectionReport, SelectionSource};
