use chess::{Color, Piece};

use crate::position::Position;

/// 8x8 board view indexed `[rank][file]`, `[0][0]` being a1.
///
/// `grid[rank][file]` corresponds to square index `rank * 8 + file`, the same
/// index `chess::Square::to_index` uses.
pub type Grid = [[Option<(Piece, Color)>; 8]; 8];

/// Coarse stage of the game, used to pick the search depth and to gate the
/// opening-only heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Opening,
    Middlegame,
    Endgame,
}

const OPENING_PHASE: f32 = 0.85;
const ENDGAME_PHASE: f32 = 0.35;
const OPENING_MOVES: u32 = 10;

impl GamePhase {
    pub fn of(position: &dyn Position) -> Self {
        let phase = game_phase(&position.board_grid());
        if phase <= ENDGAME_PHASE {
            GamePhase::Endgame
        } else if phase >= OPENING_PHASE && position.fullmove_number() <= OPENING_MOVES {
            GamePhase::Opening
        } else {
            GamePhase::Middlegame
        }
    }
}

/// Remaining non-pawn material scaled to 1.0 (full set) .. 0.0 (bare kings).
#[inline(always)]
pub fn game_phase(grid: &Grid) -> f32 {
    let mut score = 0u32;
    for (piece, _) in grid.iter().flatten().flatten() {
        score += match piece {
            Piece::Knight | Piece::Bishop => 1,
            Piece::Rook => 2,
            Piece::Queen => 4,
            Piece::Pawn | Piece::King => 0,
        };
    }

    (score.min(24) as f32) / 24.0
}

/// Number of pieces (kings and pawns included) in the placement field of a
/// FEN string. Anything after the first space is ignored.
pub fn count_pieces(fen: &str) -> usize {
    fen.split_whitespace()
        .next()
        .unwrap_or("")
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .count()
}
