use async_trait::async_trait;

use crate::error::OracleError;

/// Game-theoretic result of a move, for the side that plays it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    /// Won, but only past the fifty-move rule.
    CursedWin,
    Draw,
    /// Lost, but the fifty-move rule saves the game.
    BlessedLoss,
    Loss,
    Unknown,
}

/// Longest distance the metric distinguishes.
const MAX_DISTANCE: u32 = 9_999;

/// One candidate move reported by a tablebase.
#[derive(Debug, Clone, PartialEq)]
pub struct TablebaseMove {
    pub uci: String,
    pub san: String,
    pub outcome: Outcome,
    /// Plies to mate, or to the next zeroing move when the tablebase only
    /// knows that.
    pub distance: Option<u32>,
    /// The move mates on the spot.
    pub checkmate: bool,
}

impl TablebaseMove {
    /// Ranking key: higher is better for the mover.
    ///
    /// Wins rank above draws above losses. Among wins the shortest distance
    /// is best, among losses the longest. Unknown results have no rank.
    pub fn metric(&self) -> Option<i64> {
        let distance = if self.checkmate {
            0
        } else {
            self.distance.unwrap_or(MAX_DISTANCE).min(MAX_DISTANCE)
        } as i64;

        let band = (MAX_DISTANCE as i64 + 1) * 2;
        match self.outcome {
            Outcome::Win => Some(2 * band - distance),
            Outcome::CursedWin => Some(band - distance),
            Outcome::Draw => Some(0),
            Outcome::BlessedLoss => Some(-band + distance),
            Outcome::Loss => Some(-2 * band + distance),
            Outcome::Unknown => None,
        }
    }
}

/// An endgame database keyed by FEN.
#[async_trait]
pub trait Tablebase: Send + Sync {
    /// Candidate moves for the side to move in `fen`, in the database's
    /// own order.
    async fn probe(&self, fen: &str) -> Result<Vec<TablebaseMove>, OracleError>;
}
