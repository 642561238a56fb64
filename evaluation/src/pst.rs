use chess::{Color, Piece};

/// Positional bonus in centipawns for `piece` of `color` on square index
/// `square` (a1 = 0, h8 = 63). Tables are written from White's side and
/// mirrored vertically for Black.
#[inline(always)]
pub fn square_bonus(piece: Piece, color: Color, square: usize) -> f32 {
    let index = match color {
        Color::White => square,
        Color::Black => square ^ 56,
    };
    table(piece)[index]
}

#[inline(always)]
fn table(piece: Piece) -> &'static [f32; 64] {
    match piece {
        Piece::Pawn => &PAWN_PST,
        Piece::Knight => &KNIGHT_PST,
        Piece::Bishop => &BISHOP_PST,
        Piece::Rook => &ROOK_PST,
        Piece::Queen => &QUEEN_PST,
        Piece::King => &KING_PST,
    }
}

// - Central pawns pushed two squares are rewarded
// - d2/e2 left at home is penalized
const PAWN_PST: [f32; 64] = [
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // RANK 1: a1..h1
    5.0, 10.0, 10.0, -20.0, -20.0, 10.0, 10.0, 5.0, // RANK 2
    5.0, -5.0, -10.0, 0.0, 0.0, -10.0, -5.0, 5.0, // RANK 3
    0.0, 0.0, 0.0, 20.0, 20.0, 0.0, 0.0, 0.0, // RANK 4
    5.0, 5.0, 10.0, 25.0, 25.0, 10.0, 5.0, 5.0, // RANK 5
    10.0, 10.0, 20.0, 30.0, 30.0, 20.0, 10.0, 10.0, // RANK 6
    50.0, 50.0, 50.0, 50.0, 50.0, 50.0, 50.0, 50.0, // RANK 7
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // RANK 8
];

// - Knights on the rim are dim
const KNIGHT_PST: [f32; 64] = [
    -50.0, -40.0, -30.0, -30.0, -30.0, -30.0, -40.0, -50.0, // RANK 1: a1..h1
    -40.0, -20.0, 0.0, 5.0, 5.0, 0.0, -20.0, -40.0, // RANK 2
    -30.0, 5.0, 10.0, 15.0, 15.0, 10.0, 5.0, -30.0, // RANK 3
    -30.0, 0.0, 15.0, 20.0, 20.0, 15.0, 0.0, -30.0, // RANK 4
    -30.0, 5.0, 15.0, 20.0, 20.0, 15.0, 5.0, -30.0, // RANK 5
    -30.0, 0.0, 10.0, 15.0, 15.0, 10.0, 0.0, -30.0, // RANK 6
    -40.0, -20.0, 0.0, 0.0, 0.0, 0.0, -20.0, -40.0, // RANK 7
    -50.0, -40.0, -30.0, -30.0, -30.0, -30.0, -40.0, -50.0, // RANK 8
];

// - Long diagonals and b2/g2 fianchetto squares
const BISHOP_PST: [f32; 64] = [
    -20.0, -10.0, -10.0, -10.0, -10.0, -10.0, -10.0, -20.0, // RANK 1: a1..h1
    -10.0, 5.0, 0.0, 0.0, 0.0, 0.0, 5.0, -10.0, // RANK 2
    -10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, -10.0, // RANK 3
    -10.0, 0.0, 10.0, 10.0, 10.0, 10.0, 0.0, -10.0, // RANK 4
    -10.0, 5.0, 5.0, 10.0, 10.0, 5.0, 5.0, -10.0, // RANK 5
    -10.0, 0.0, 5.0, 10.0, 10.0, 5.0, 0.0, -10.0, // RANK 6
    -10.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -10.0, // RANK 7
    -20.0, -10.0, -10.0, -10.0, -10.0, -10.0, -10.0, -20.0, // RANK 8
];

// - Seventh rank and central files
const ROOK_PST: [f32; 64] = [
    0.0, 0.0, 0.0, 5.0, 5.0, 0.0, 0.0, 0.0, // RANK 1: a1..h1
    -5.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -5.0, // RANK 2
    -5.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -5.0, // RANK 3
    -5.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -5.0, // RANK 4
    -5.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -5.0, // RANK 5
    -5.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -5.0, // RANK 6
    5.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 5.0, // RANK 7
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // RANK 8
];

const QUEEN_PST: [f32; 64] = [
    -20.0, -10.0, -10.0, -5.0, -5.0, -10.0, -10.0, -20.0, // RANK 1: a1..h1
    -10.0, 0.0, 5.0, 0.0, 0.0, 0.0, 0.0, -10.0, // RANK 2
    -10.0, 5.0, 5.0, 5.0, 5.0, 5.0, 0.0, -10.0, // RANK 3
    0.0, 0.0, 5.0, 5.0, 5.0, 5.0, 0.0, -5.0, // RANK 4
    -5.0, 0.0, 5.0, 5.0, 5.0, 5.0, 0.0, -5.0, // RANK 5
    -10.0, 0.0, 5.0, 5.0, 5.0, 5.0, 0.0, -10.0, // RANK 6
    -10.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -10.0, // RANK 7
    -20.0, -10.0, -10.0, -5.0, -5.0, -10.0, -10.0, -20.0, // RANK 8
];

// - Middlegame shelter: castled corners good, advanced king bad
const KING_PST: [f32; 64] = [
    20.0, 30.0, 10.0, 0.0, 0.0, 10.0, 30.0, 20.0, // RANK 1: a1..h1
    20.0, 20.0, 0.0, 0.0, 0.0, 0.0, 20.0, 20.0, // RANK 2
    -10.0, -20.0, -20.0, -20.0, -20.0, -20.0, -20.0, -10.0, // RANK 3
    -20.0, -30.0, -30.0, -40.0, -40.0, -30.0, -30.0, -20.0, // RANK 4
    -30.0, -40.0, -40.0, -50.0, -50.0, -40.0, -40.0, -30.0, // RANK 5
    -30.0, -40.0, -40.0, -50.0, -50.0, -40.0, -40.0, -30.0, // RANK 6
    -30.0, -40.0, -40.0, -50.0, -50.0, -40.0, -40.0, -30.0, // RANK 7
    -30.0, -40.0, -40.0, -50.0, -50.0, -40.0, -40.0, -30.0, // RANK 8
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_tables_mirror_white() {
        // e2 for White is e7 for Black
        assert_eq!(
            square_bonus(Piece::Pawn, Color::White, 12),
            square_bonus(Piece::Pawn, Color::Black, 52)
        );
        // g1 for White is g8 for Black
        assert_eq!(
            square_bonus(Piece::King, Color::White, 6),
            square_bonus(Piece::King, Color::Black, 62)
        );
    }

    #[test]
    fn test_centre_beats_rim() {
        // d4 vs a4
        assert!(square_bonus(Piece::Knight, Color::White, 27) > square_bonus(Piece::Knight, Color::White, 24));
    }
}
