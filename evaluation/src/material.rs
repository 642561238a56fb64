use chess::{CastleRights, Color};
use rules::Position;

use crate::def::Evaluator;
use crate::pst::square_bonus;
use crate::scores::DRAW_SCORE;
use crate::weights::Weights;

/// Material plus piece-square evaluation, scored from White's side.
pub struct MaterialEvaluator {
    weights: Weights,
}

impl MaterialEvaluator {
    pub fn new(weights: Weights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    #[inline(always)]
    fn castling_bonus(&self, rights: CastleRights) -> f32 {
        let count = match rights {
            CastleRights::NoRights => 0.0,
            CastleRights::KingSide | CastleRights::QueenSide => 1.0,
            CastleRights::Both => 2.0,
        };
        count * self.weights.castling_rights_bonus
    }
}

impl Default for MaterialEvaluator {
    fn default() -> Self {
        Self::new(Weights::default())
    }
}

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, position: &dyn Position) -> f32 {
        if position.is_checkmate() {
            return match position.side_to_move() {
                Color::White => -self.weights.mate_score,
                Color::Black => self.weights.mate_score,
            };
        }
        if position.is_draw() {
            return DRAW_SCORE;
        }

        let grid = position.board_grid();
        let values = &self.weights.piece_values;
        let mut score = 0.0;

        for (rank, row) in grid.iter().enumerate() {
            for (file, cell) in row.iter().enumerate() {
                let Some((piece, color)) = *cell else {
                    continue;
                };

                let mut value = values.get(piece);
                if self.weights.positional {
                    value += square_bonus(piece, color, rank * 8 + file);
                }

                match color {
                    Color::White => score += value,
                    Color::Black => score -= value,
                }
            }
        }

        score += self.castling_bonus(position.castling_rights(Color::White));
        score -= self.castling_bonus(position.castling_rights(Color::Black));

        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PieceValues;
    use rules::Game;

    fn material_only() -> MaterialEvaluator {
        MaterialEvaluator::new(Weights {
            positional: false,
            castling_rights_bonus: 0.0,
            ..Weights::default()
        })
    }

    #[test]
    fn test_start_position_is_balanced() {
        let game = Game::new();
        assert_eq!(MaterialEvaluator::default().evaluate(&game), 0.0);
        assert_eq!(material_only().evaluate(&game), 0.0);
    }

    #[test]
    fn test_material_is_white_positive() {
        // White is a rook up
        let game: Game = "4k3/8/8/8/8/8/8/R3K3 w - - 0 1".parse().unwrap();
        assert_eq!(material_only().evaluate(&game), 500.0);

        // Same position with Black to move keeps the sign
        let game: Game = "4k3/8/8/8/8/8/8/R3K3 b - - 0 1".parse().unwrap();
        assert_eq!(material_only().evaluate(&game), 500.0);

        let game: Game = "r3k3/8/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        assert_eq!(material_only().evaluate(&game), -500.0);
    }

    #[test]
    fn test_checkmate_scores() {
        let evaluator = MaterialEvaluator::default();

        // Black is mated by Ra8
        let game: Game = "R5k1/5ppp/8/8/8/8/5PPP/6K1 b - - 0 1".parse().unwrap();
        assert_eq!(evaluator.evaluate(&game), evaluator.weights().mate_score);

        // Fool's mate, White is mated
        let game: Game = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3"
            .parse()
            .unwrap();
        assert_eq!(evaluator.evaluate(&game), -evaluator.weights().mate_score);
    }

    #[test]
    fn test_draws_score_zero() {
        // Stalemate with Black a queen down
        let game: Game = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1".parse().unwrap();
        assert_eq!(MaterialEvaluator::default().evaluate(&game), 0.0);
    }

    #[test]
    fn test_castling_rights_bonus() {
        let evaluator = MaterialEvaluator::new(Weights {
            positional: false,
            castling_rights_bonus: 10.0,
            ..Weights::default()
        });

        let game: Game = "r3k2r/8/8/8/8/8/8/R3K2R w KQk - 0 1".parse().unwrap();
        assert_eq!(evaluator.evaluate(&game), 10.0);
    }

    #[test]
    fn test_custom_piece_values() {
        let evaluator = MaterialEvaluator::new(Weights {
            piece_values: PieceValues {
                pawn: 1.0,
                knight: 3.0,
                bishop: 3.0,
                rook: 5.0,
                queen: 9.0,
                king: 0.0,
            },
            positional: false,
            castling_rights_bonus: 0.0,
            ..Weights::default()
        });

        let game: Game = "4k3/pp6/8/8/8/8/8/3QK3 w - - 0 1".parse().unwrap();
        assert_eq!(evaluator.evaluate(&game), 7.0);
    }

    #[test]
    fn test_positional_terms_reward_development() {
        let evaluator = MaterialEvaluator::default();
        // Pawns on both sides keep these from being dead draws.
        let home: Game = "4k3/p7/8/8/8/8/P7/1N2K3 w - - 0 1".parse().unwrap();
        let centre: Game = "4k3/p7/8/8/3N4/8/P7/4K3 w - - 0 1".parse().unwrap();
        assert!(!home.is_draw());
        assert!(!centre.is_draw());
        assert!(evaluator.evaluate(&centre) > evaluator.evaluate(&home));
    }
}
