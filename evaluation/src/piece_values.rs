use chess::Piece;
use serde::{Deserialize, Serialize};

/// Base material value of each piece kind, in centipawns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieceValues {
    pub pawn: f32,
    pub knight: f32,
    pub bishop: f32,
    pub rook: f32,
    pub queen: f32,
    /// Both kings are always on the board, so this only matters to callers
    /// that price captures of or by the king.
    pub king: f32,
}

impl Default for PieceValues {
    fn default() -> Self {
        Self {
            pawn: 100.0,
            knight: 320.0,
            bishop: 330.0,
            rook: 500.0,
            queen: 900.0,
            king: 0.0,
        }
    }
}

impl PieceValues {
    #[inline(always)]
    pub fn get(&self, piece: Piece) -> f32 {
        match piece {
            Piece::Pawn => self.pawn,
            Piece::Knight => self.knight,
            Piece::Bishop => self.bishop,
            Piece::Rook => self.rook,
            Piece::Queen => self.queen,
            Piece::King => self.king,
        }
    }
}
