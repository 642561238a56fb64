use std::fmt;

use chess::{Piece, Square};

/// What a move does beyond relocating the moving piece.
///
/// Every combination that cannot occur on a board (a castling capture, a
/// promotion by a knight, ...) is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Quiet,
    /// A pawn's initial two-square advance.
    DoublePush,
    Capture(Piece),
    EnPassant,
    CastleShort,
    CastleLong,
    Promotion {
        promoted: Piece,
        captured: Option<Piece>,
    },
}

/// An immutable legal transition produced by the rules engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    piece: Piece,
    from: Square,
    to: Square,
    kind: MoveKind,
    notation: String,
}

impl Move {
    pub fn new(piece: Piece, from: Square, to: Square, kind: MoveKind, notation: String) -> Self {
        Self {
            piece,
            from,
            to,
            kind,
            notation,
        }
    }

    #[inline(always)]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    #[inline(always)]
    pub fn from(&self) -> Square {
        self.from
    }

    #[inline(always)]
    pub fn to(&self) -> Square {
        self.to
    }

    #[inline(always)]
    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    /// Standard algebraic notation, including the `+`/`#` suffix.
    pub fn notation(&self) -> &str {
        &self.notation
    }

    #[inline(always)]
    pub fn captured(&self) -> Option<Piece> {
        match self.kind {
            MoveKind::Capture(piece) => Some(piece),
            MoveKind::EnPassant => Some(Piece::Pawn),
            MoveKind::Promotion { captured, .. } => captured,
            _ => None,
        }
    }

    #[inline(always)]
    pub fn promotion(&self) -> Option<Piece> {
        match self.kind {
            MoveKind::Promotion { promoted, .. } => Some(promoted),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn is_capture(&self) -> bool {
        self.captured().is_some()
    }

    #[inline(always)]
    pub fn is_castle(&self) -> bool {
        matches!(self.kind, MoveKind::CastleShort | MoveKind::CastleLong)
    }

    /// Coordinate notation as used by UCI, e.g. `e2e4` or `e7e8q`.
    pub fn uci(&self) -> String {
        match self.promotion() {
            Some(piece) => format!("{}{}{}", self.from, self.to, promotion_letter(piece)),
            None => format!("{}{}", self.from, self.to),
        }
    }

    /// True when `notation` names this move, either in SAN (check and
    /// annotation suffixes ignored) or in coordinate notation.
    pub fn matches(&self, notation: &str) -> bool {
        let wanted = strip_suffixes(notation.trim());
        if wanted.is_empty() {
            return false;
        }
        strip_suffixes(&self.notation) == wanted || self.uci().eq_ignore_ascii_case(wanted)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation)
    }
}

/// Drops trailing check, mate and annotation marks from a SAN string.
pub(crate) fn strip_suffixes(notation: &str) -> &str {
    notation.trim_end_matches(['+', '#', '!', '?'])
}

fn promotion_letter(piece: Piece) -> char {
    match piece {
        Piece::Knight => 'n',
        Piece::Bishop => 'b',
        Piece::Rook => 'r',
        _ => 'q',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn square(name: &str) -> Square {
        Square::from_str(name).unwrap()
    }

    #[test]
    fn test_captured_piece_per_kind() {
        let capture = Move::new(
            Piece::Knight,
            square("f3"),
            square("e5"),
            MoveKind::Capture(Piece::Pawn),
            "Nxe5".to_string(),
        );
        assert_eq!(capture.captured(), Some(Piece::Pawn));

        let promotion = Move::new(
            Piece::Pawn,
            square("b7"),
            square("a8"),
            MoveKind::Promotion {
                promoted: Piece::Queen,
                captured: Some(Piece::Rook),
            },
            "bxa8=Q".to_string(),
        );
        assert_eq!(promotion.captured(), Some(Piece::Rook));
        assert_eq!(promotion.promotion(), Some(Piece::Queen));
        assert_eq!(promotion.uci(), "b7a8q");

        let castle = Move::new(
            Piece::King,
            square("e1"),
            square("g1"),
            MoveKind::CastleShort,
            "O-O".to_string(),
        );
        assert!(castle.is_castle());
        assert!(!castle.is_capture());
    }

    #[test]
    fn test_matches_san_and_uci() {
        let mv = Move::new(
            Piece::Rook,
            square("a1"),
            square("a8"),
            MoveKind::Quiet,
            "Ra8#".to_string(),
        );
        assert!(mv.matches("Ra8"));
        assert!(mv.matches("Ra8#"));
        assert!(mv.matches("Ra8+"));
        assert!(mv.matches("a1a8"));
        assert!(!mv.matches("Ra7"));
        assert!(!mv.matches(""));
    }
}
