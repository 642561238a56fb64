use evaluation::PieceValues;
use rules::{Color, GamePhase, Move, MoveKind, Piece, Position, ScopedMove};
use serde::{Deserialize, Serialize};

/// Move-level bonuses and penalties the evaluator does not model, in
/// centipawns. Positive values of [`Adjustments::score`] favour the mover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Adjustments {
    /// King steps that are not castling, outside the endgame.
    pub king_move_penalty: f32,
    /// Quiet pawn pushes into the opponent's half.
    pub pawn_advance_penalty: f32,
    /// Pawns leaving one of `flagged_pawn_origins` from their start rank.
    pub flagged_pawn_penalty: f32,
    pub flagged_pawn_origins: Vec<String>,
    pub castling_bonus: f32,
    /// Knight or bishop leaving its home rank in the opening.
    pub development_bonus: f32,
    /// Any queen move in the opening.
    pub early_queen_penalty: f32,
    /// Checks that do not mate.
    pub check_penalty: f32,
    /// Scales the worst material the opponent can win straight away.
    pub hanging_loss_multiplier: f32,
}

impl Default for Adjustments {
    fn default() -> Self {
        Self {
            king_move_penalty: 30.0,
            pawn_advance_penalty: 20.0,
            flagged_pawn_penalty: 50.0,
            flagged_pawn_origins: vec!["f2".to_string(), "f7".to_string()],
            castling_bonus: 40.0,
            development_bonus: 15.0,
            early_queen_penalty: 25.0,
            check_penalty: 0.0,
            hanging_loss_multiplier: 1.2,
        }
    }
}

impl Adjustments {
    /// Every adjustment off. Root scores are then pure search values.
    pub fn none() -> Self {
        Self {
            king_move_penalty: 0.0,
            pawn_advance_penalty: 0.0,
            flagged_pawn_penalty: 0.0,
            flagged_pawn_origins: Vec::new(),
            castling_bonus: 0.0,
            development_bonus: 0.0,
            early_queen_penalty: 0.0,
            check_penalty: 0.0,
            hanging_loss_multiplier: 0.0,
        }
    }

    /// Every numeric term with its name.
    pub fn terms(&self) -> [(&'static str, f32); 8] {
        [
            ("king_move_penalty", self.king_move_penalty),
            ("pawn_advance_penalty", self.pawn_advance_penalty),
            ("flagged_pawn_penalty", self.flagged_pawn_penalty),
            ("castling_bonus", self.castling_bonus),
            ("development_bonus", self.development_bonus),
            ("early_queen_penalty", self.early_queen_penalty),
            ("check_penalty", self.check_penalty),
            ("hanging_loss_multiplier", self.hanging_loss_multiplier),
        ]
    }

    /// Sum of all adjustments for `mv` played by `mover`.
    ///
    /// `gives_check` and `hanging_loss` describe the position after the move;
    /// see [`worst_hanging_loss`].
    pub fn score(&self, mv: &Move, mover: Color, phase: GamePhase, gives_check: bool, hanging_loss: f32) -> f32 {
        let mut score = 0.0;
        let home_rank = match mover {
            Color::White => 0,
            Color::Black => 7,
        };
        let from_rank = mv.from().get_rank().to_index();

        match mv.piece() {
            Piece::King if mv.is_castle() => score += self.castling_bonus,
            Piece::King if phase != GamePhase::Endgame => score -= self.king_move_penalty,
            Piece::Knight | Piece::Bishop if phase == GamePhase::Opening && from_rank == home_rank => {
                score += self.development_bonus
            }
            Piece::Queen if phase == GamePhase::Opening => score -= self.early_queen_penalty,
            Piece::Pawn => {
                if self.is_advance(mv, mover) {
                    score -= self.pawn_advance_penalty;
                }
                if self.is_flagged(mv, mover) {
                    score -= self.flagged_pawn_penalty;
                }
            }
            _ => {}
        }

        if gives_check {
            score -= self.check_penalty;
        }

        score - hanging_loss * self.hanging_loss_multiplier
    }

    fn is_advance(&self, mv: &Move, mover: Color) -> bool {
        if !matches!(mv.kind(), MoveKind::Quiet | MoveKind::DoublePush) {
            return false;
        }
        let to_rank = mv.to().get_rank().to_index();
        match mover {
            Color::White => to_rank >= 4,
            Color::Black => to_rank <= 3,
        }
    }

    fn is_flagged(&self, mv: &Move, mover: Color) -> bool {
        if !matches!(mv.kind(), MoveKind::Quiet | MoveKind::DoublePush) {
            return false;
        }
        let start_rank = match mover {
            Color::White => 1,
            Color::Black => 6,
        };
        if mv.from().get_rank().to_index() != start_rank {
            return false;
        }

        let origin = mv.from().to_string();
        self.flagged_pawn_origins
            .iter()
            .any(|square| square.eq_ignore_ascii_case(&origin))
    }
}

/// Largest material the side to move in `position` wins with a single
/// capture. A capture on a defended square only counts what is left after
/// the recapture.
pub fn worst_hanging_loss(position: &mut dyn Position, values: &PieceValues) -> f32 {
    let mut worst = 0.0f32;

    for reply in position.legal_moves() {
        let Some(victim) = reply.captured() else {
            continue;
        };

        let mut loss = values.get(victim);
        let square = reply.to();
        let defended = {
            let after = ScopedMove::new(&mut *position, &reply);
            after
                .legal_moves()
                .iter()
                .any(|recapture| recapture.to() == square && recapture.is_capture())
        };
        if defended {
            loss = (loss - values.get(reply.piece())).max(0.0);
        }

        worst = worst.max(loss);
    }

    worst
}

#[cfg(test)]
mod tests {
    use super::*;
    use rules::Game;

    fn find(game: &Game, notation: &str) -> Move {
        game.legal_moves().into_iter().find(|mv| mv.matches(notation)).unwrap()
    }

    fn adjust(fen: &str, notation: &str, phase: GamePhase) -> f32 {
        let game: Game = fen.parse().unwrap();
        let mv = find(&game, notation);
        Adjustments::default().score(&mv, game.side_to_move(), phase, false, 0.0)
    }

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn test_development_and_queen() {
        assert_eq!(adjust(START, "Nf3", GamePhase::Opening), 15.0);
        assert_eq!(adjust(START, "Nf3", GamePhase::Middlegame), 0.0);

        let game = "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2";
        assert_eq!(adjust(game, "Qh5", GamePhase::Opening), -25.0);
        assert_eq!(adjust(game, "Ke2", GamePhase::Opening), -30.0);
    }

    #[test]
    fn test_flagged_pawn_moves() {
        let black = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";
        assert_eq!(adjust(black, "f6", GamePhase::Opening), -50.0);
        assert_eq!(adjust(black, "f5", GamePhase::Opening), -50.0);
        assert_eq!(adjust(black, "e5", GamePhase::Opening), 0.0);

        assert_eq!(adjust(START, "f3", GamePhase::Opening), -50.0);

        // Captures off the flagged square are not pushes
        let capture = "rnbqkbnr/ppp1pppp/4P3/8/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 3";
        assert_eq!(adjust(capture, "fxe6", GamePhase::Opening), 0.0);
        assert_eq!(adjust(capture, "f6", GamePhase::Opening), -50.0);
    }

    #[test]
    fn test_pawn_advance_into_enemy_half() {
        // Black pushing to the fourth rank
        let game = "4k3/8/8/4p3/8/8/8/4K3 b - - 0 1";
        assert_eq!(adjust(game, "e4", GamePhase::Endgame), -20.0);

        // White pushing to the fifth rank
        let game = "4k3/8/8/8/4P3/8/8/4K3 w - - 0 1";
        assert_eq!(adjust(game, "e5", GamePhase::Endgame), -20.0);

        // Staying at home is fine
        assert_eq!(adjust(START, "e3", GamePhase::Opening), 0.0);
    }

    #[test]
    fn test_castling_and_endgame_king() {
        let game = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        assert_eq!(adjust(game, "O-O", GamePhase::Middlegame), 40.0);
        assert_eq!(adjust(game, "Kd1", GamePhase::Endgame), 0.0);
    }

    #[test]
    fn test_check_and_hanging_penalties() {
        let game: Game = START.parse().unwrap();
        let mv = find(&game, "e4");
        let adjustments = Adjustments {
            check_penalty: 10.0,
            hanging_loss_multiplier: 1.5,
            ..Adjustments::default()
        };

        assert_eq!(adjustments.score(&mv, Color::White, GamePhase::Middlegame, true, 0.0), -10.0);
        assert_eq!(adjustments.score(&mv, Color::White, GamePhase::Middlegame, false, 100.0), -150.0);
        assert_eq!(Adjustments::none().score(&mv, Color::White, GamePhase::Opening, true, 900.0), 0.0);
    }

    #[test]
    fn test_worst_hanging_loss() {
        let values = PieceValues::default();

        // Black to move can take the undefended rook on d4 with the queen
        let mut game: Game = "3qk3/8/8/8/3R4/8/8/4K3 b - - 0 1".parse().unwrap();
        assert_eq!(worst_hanging_loss(&mut game, &values), 500.0);

        // A knight on d4 defended by the e3 pawn: QxN loses the queen back
        let mut game: Game = "3qk3/8/8/8/3N4/4P3/8/4K3 b - - 0 1".parse().unwrap();
        assert_eq!(worst_hanging_loss(&mut game, &values), 0.0);

        // Pawn takes a defended knight: still wins N minus P
        let mut game: Game = "4k3/8/8/4p3/3N4/4P3/8/4K3 b - - 0 1".parse().unwrap();
        assert_eq!(worst_hanging_loss(&mut game, &values), 220.0);

        let before = game.fen();
        worst_hanging_loss(&mut game, &values);
        assert_eq!(game.fen(), before);
    }
}
