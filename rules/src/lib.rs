//! The rules-engine boundary of the move selector.
//!
//! The search core never derives chess rules itself. It talks to a live
//! position through the [`Position`] trait, and [`Game`] is the concrete
//! implementation backed by the `chess` crate.

mod board;
mod error;
mod game;
mod material;
mod moves;
mod notation;
mod position;

pub use board::{count_pieces, game_phase, GamePhase, Grid};
pub use error::GameError;
pub use game::Game;
pub use material::has_insufficient_material;
pub use moves::{Move, MoveKind};
pub use position::{Position, ScopedMove};

pub use chess::{CastleRights, Color, Piece, Square};
