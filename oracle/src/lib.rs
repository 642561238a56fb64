//! Endgame tablebase lookups.
//!
//! [`EndgameOracle`] asks a [`Tablebase`] for the best move once few enough
//! pieces remain, and turns every failure into "no answer".

mod client;
mod error;
mod lichess;
mod tablebase;

pub use client::{EndgameOracle, DEFAULT_MAX_PIECES};
pub use error::OracleError;
pub use lichess::{LichessTablebase, LICHESS_TABLEBASE_URL};
pub use tablebase::{Outcome, Tablebase, TablebaseMove};
