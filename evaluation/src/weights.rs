use serde::{Deserialize, Serialize};

use crate::piece_values::PieceValues;
use crate::scores::MATE_SCORE;

/// The evaluator's weight table. Fixed when the evaluator is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub piece_values: PieceValues,
    /// Add the built-in piece-square tables on top of material.
    pub positional: bool,
    /// Per castling right still held.
    pub castling_rights_bonus: f32,
    pub mate_score: f32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            piece_values: PieceValues::default(),
            positional: true,
            castling_rights_bonus: 10.0,
            mate_score: MATE_SCORE,
        }
    }
}
