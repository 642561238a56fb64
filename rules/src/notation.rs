use arrayvec::ArrayVec;
use chess::{Board, BoardStatus, ChessMove, Piece, Square, EMPTY};

use crate::moves::MoveKind;

/// Standard algebraic notation for `mv`, which must be legal on `board`.
///
/// `legal` is the full legal move list of `board` and is used to
/// disambiguate moves of same-kind pieces to the same square.
pub(crate) fn san(board: &Board, mv: ChessMove, piece: Piece, kind: MoveKind, legal: &[ChessMove]) -> String {
    let mut out = String::with_capacity(8);

    match kind {
        MoveKind::CastleShort => out.push_str("O-O"),
        MoveKind::CastleLong => out.push_str("O-O-O"),
        _ => {
            let capture = matches!(
                kind,
                MoveKind::Capture(_) | MoveKind::EnPassant | MoveKind::Promotion { captured: Some(_), .. }
            );

            if piece == Piece::Pawn {
                if capture {
                    out.push(file_char(mv.get_source()));
                }
            } else {
                out.push(piece_letter(piece));
                disambiguate(board, mv, piece, legal, &mut out);
            }

            if capture {
                out.push('x');
            }
            out.push_str(&mv.get_dest().to_string());

            if let Some(promoted) = mv.get_promotion() {
                out.push('=');
                out.push(piece_letter(promoted));
            }
        }
    }

    let after = board.make_move_new(mv);
    if *after.checkers() != EMPTY {
        out.push(if after.status() == BoardStatus::Checkmate { '#' } else { '+' });
    }

    out
}

fn disambiguate(board: &Board, mv: ChessMove, piece: Piece, legal: &[ChessMove], out: &mut String) {
    let from = mv.get_source();
    let rivals: ArrayVec<Square, 8> = legal
        .iter()
        .filter(|other| {
            other.get_dest() == mv.get_dest()
                && other.get_source() != from
                && board.piece_on(other.get_source()) == Some(piece)
        })
        .map(|other| other.get_source())
        .take(8)
        .collect();

    if rivals.is_empty() {
        return;
    }

    let shares_file = rivals.iter().any(|sq| sq.get_file() == from.get_file());
    let shares_rank = rivals.iter().any(|sq| sq.get_rank() == from.get_rank());

    if !shares_file {
        out.push(file_char(from));
    } else if !shares_rank {
        out.push(rank_char(from));
    } else {
        out.push(file_char(from));
        out.push(rank_char(from));
    }
}

#[inline(always)]
fn file_char(square: Square) -> char {
    (b'a' + square.get_file().to_index() as u8) as char
}

#[inline(always)]
fn rank_char(square: Square) -> char {
    (b'1' + square.get_rank().to_index() as u8) as char
}

pub(crate) fn piece_letter(piece: Piece) -> char {
    match piece {
        Piece::Pawn => 'P',
        Piece::Knight => 'N',
        Piece::Bishop => 'B',
        Piece::Rook => 'R',
        Piece::Queen => 'Q',
        Piece::King => 'K',
    }
}

#[cfg(test)]
mod tests {
    use crate::{Game, Position};

    fn notations(fen: &str) -> Vec<String> {
        let game: Game = fen.parse().unwrap();
        game.legal_moves().iter().map(|mv| mv.notation().to_string()).collect()
    }

    #[test]
    fn test_start_position_notation() {
        let moves = notations("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert_eq!(moves.len(), 20);
        assert!(moves.contains(&"e4".to_string()));
        assert!(moves.contains(&"Nf3".to_string()));
        assert!(moves.contains(&"Na3".to_string()));
    }

    #[test]
    fn test_castling_and_mate_suffix() {
        let moves = notations("6k1/5ppp/8/8/8/8/5PPP/R3K2R w KQ - 0 1");
        assert!(moves.contains(&"O-O".to_string()));
        assert!(moves.contains(&"O-O-O".to_string()));
        assert!(moves.contains(&"Ra8#".to_string()));
        assert_eq!(moves.iter().filter(|mv| mv.ends_with('#')).count(), 1);

        let moves = notations("4k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
        assert!(moves.contains(&"Ra8+".to_string()));
        assert!(moves.contains(&"O-O-O".to_string()));
    }

    #[test]
    fn test_disambiguation() {
        // Two knights can reach d2, two rooks share the a-file.
        let moves = notations("4k3/8/8/R7/8/8/8/RN2KN2 w - - 0 1");
        assert!(moves.contains(&"Nbd2".to_string()));
        assert!(moves.contains(&"Nfd2".to_string()));
        assert!(moves.contains(&"R5a3".to_string()));
        assert!(moves.contains(&"R1a3".to_string()));
    }

    #[test]
    fn test_pawn_capture_and_promotion() {
        let moves = notations("1r2k3/P7/8/3p4/4P3/8/8/4K3 w - - 0 1");
        assert!(moves.contains(&"exd5".to_string()));
        assert!(moves.contains(&"a8=Q".to_string()));
        assert!(moves.contains(&"axb8=Q+".to_string()));
        assert!(moves.contains(&"axb8=N".to_string()));
    }
}
