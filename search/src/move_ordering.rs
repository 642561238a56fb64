use evaluation::PieceValues;
use rules::{Move, MoveKind, Position};
use serde::{Deserialize, Serialize};

/// Fixed bonuses used when ordering children, in centipawns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderingWeights {
    pub castle_bonus: f32,
    /// Bonus for moves that give check. 0 skips the check test entirely.
    pub check_bonus: f32,
}

impl Default for OrderingWeights {
    fn default() -> Self {
        Self {
            castle_bonus: 60.0,
            check_bonus: 50.0,
        }
    }
}

/// Cheap sort key for candidate moves. Only decides the order children are
/// searched in, never which move is played.
#[derive(Debug, Clone, Default)]
pub struct MoveScorer {
    values: PieceValues,
    weights: OrderingWeights,
}

impl MoveScorer {
    pub fn new(values: PieceValues, weights: OrderingWeights) -> Self {
        Self { values, weights }
    }

    pub fn score(&self, mv: &Move, position: &dyn Position) -> f32 {
        let mut score = match mv.kind() {
            MoveKind::Capture(victim) => self.values.get(victim),
            MoveKind::EnPassant => self.values.pawn,
            MoveKind::Promotion { promoted, captured } => {
                self.values.get(promoted) + captured.map_or(0.0, |piece| self.values.get(piece))
            }
            MoveKind::CastleShort | MoveKind::CastleLong => self.weights.castle_bonus,
            MoveKind::Quiet | MoveKind::DoublePush => 0.0,
        };

        if self.weights.check_bonus != 0.0 && position.gives_check(mv) {
            score += self.weights.check_bonus;
        }

        score
    }

    /// Best-looking moves first. Equal scores keep generator order.
    pub fn order(&self, moves: Vec<Move>, position: &dyn Position) -> Vec<Move> {
        let mut scored: Vec<(f32, Move)> = moves
            .into_iter()
            .map(|mv| (self.score(&mv, position), mv))
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.into_iter().map(|(_, mv)| mv).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rules::Game;

    fn find<'a>(moves: &'a [Move], notation: &str) -> &'a Move {
        moves.iter().find(|mv| mv.matches(notation)).unwrap()
    }

    #[test]
    fn test_captures_ranked_by_victim() {
        let game: Game = "4k3/8/8/2q1r3/3P4/8/8/7K w - - 0 1".parse().unwrap();
        let scorer = MoveScorer::default();
        let moves = game.legal_moves();

        let takes_queen = scorer.score(find(&moves, "dxc5"), &game);
        let takes_rook = scorer.score(find(&moves, "dxe5"), &game);
        let quiet = scorer.score(find(&moves, "d5"), &game);

        assert!(takes_queen > takes_rook);
        assert!(takes_rook > quiet);
        assert_eq!(quiet, 0.0);
    }

    #[test]
    fn test_castling_and_check_bonus() {
        let game: Game = "4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1".parse().unwrap();
        let scorer = MoveScorer::default();
        let moves = game.legal_moves();

        assert_eq!(scorer.score(find(&moves, "O-O"), &game), 60.0);
        assert_eq!(scorer.score(find(&moves, "Ra8+"), &game), 50.0);
        assert_eq!(scorer.score(find(&moves, "Ra2"), &game), 0.0);

        let no_checks = MoveScorer::new(
            PieceValues::default(),
            OrderingWeights {
                check_bonus: 0.0,
                ..OrderingWeights::default()
            },
        );
        assert_eq!(no_checks.score(find(&moves, "Ra8+"), &game), 0.0);
    }

    #[test]
    fn test_order_is_stable() {
        let game = Game::new();
        let scorer = MoveScorer::default();
        let generated = game.legal_moves();

        // Nothing stands out in the start position, so order is untouched
        let ordered = scorer.order(generated.clone(), &game);
        assert_eq!(ordered, generated);
    }

    #[test]
    fn test_order_puts_captures_first() {
        let game: Game = "4k3/8/8/2q5/3P4/8/8/4K3 w - - 0 1".parse().unwrap();
        let scorer = MoveScorer::default();
        let ordered = scorer.order(game.legal_moves(), &game);
        assert!(ordered[0].matches("dxc5"));
    }
}
