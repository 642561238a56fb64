use chess::{BitBoard, Board, Color, Piece, EMPTY};

const LIGHT_SQUARES_MASK: u64 = 0x55AA55AA55AA55AA;

/// Dead drawn material for both sides:
/// - K vs K
/// - K+N vs K and K+B vs K (either side)
/// - K+B vs K+B with bishops on the same square color
#[inline(always)]
pub fn has_insufficient_material(board: &Board) -> bool {
    let heavy = board.pieces(Piece::Pawn) | board.pieces(Piece::Rook) | board.pieces(Piece::Queen);
    if heavy != EMPTY {
        return false;
    }

    let white = board.color_combined(Color::White);
    let black = board.color_combined(Color::Black);
    let knights = board.pieces(Piece::Knight);
    let bishops = board.pieces(Piece::Bishop);

    let white_minors = ((knights | bishops) & white).popcnt();
    let black_minors = ((knights | bishops) & black).popcnt();

    if white_minors + black_minors <= 1 {
        return true;
    }

    let white_bishops = bishops & white;
    let black_bishops = bishops & black;
    if white_minors == 1 && black_minors == 1 && white_bishops.popcnt() == 1 && black_bishops.popcnt() == 1 {
        let light = BitBoard(LIGHT_SQUARES_MASK);
        return ((white_bishops & light) == EMPTY) == ((black_bishops & light) == EMPTY);
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_material_k_vs_k() {
        let board: Board = "k7/8/8/8/8/8/8/K7 w - - 0 1".parse().unwrap();
        assert!(has_insufficient_material(&board));
    }

    #[test]
    fn test_insufficient_material_minor_vs_k() {
        let board: Board = "k7/8/8/8/8/8/8/KN6 w - - 0 1".parse().unwrap();
        assert!(has_insufficient_material(&board));

        let board: Board = "kb6/8/8/8/8/8/8/K7 w - - 0 1".parse().unwrap();
        assert!(has_insufficient_material(&board));
    }

    #[test]
    fn test_same_colored_bishops_are_drawn() {
        // c1 and f8 are both dark squares
        let board: Board = "k4b2/8/8/8/8/8/8/K1B5 w - - 0 1".parse().unwrap();
        assert!(has_insufficient_material(&board));

        // c1 dark, c8 light
        let board: Board = "k1b5/8/8/8/8/8/8/K1B5 w - - 0 1".parse().unwrap();
        assert!(!has_insufficient_material(&board));
    }

    #[test]
    fn test_sufficient_material() {
        let board: Board = "k7/8/8/8/8/8/8/KNN5 w - - 0 1".parse().unwrap();
        assert!(!has_insufficient_material(&board));

        let board: Board = "k7/p7/8/8/8/8/8/K7 w - - 0 1".parse().unwrap();
        assert!(!has_insufficient_material(&board));
    }
}
