use evaluation::scores::MATE_PLY_BONUS;
use evaluation::Evaluator;
use rules::{Color, Position, ScopedMove};

use crate::move_ordering::MoveScorer;

/// Fixed-depth minimax with alpha-beta pruning over one live position.
///
/// Every child is entered through a [`ScopedMove`], so the position is back
/// in its original state whenever `search` returns, pruned or not. Scores
/// follow the evaluator's convention: positive favours White.
pub struct AlphaBeta<'a> {
    evaluator: &'a dyn Evaluator,
    scorer: &'a MoveScorer,
    nodes: u64,
}

impl<'a> AlphaBeta<'a> {
    pub fn new(evaluator: &'a dyn Evaluator, scorer: &'a MoveScorer) -> Self {
        Self {
            evaluator,
            scorer,
            nodes: 0,
        }
    }

    /// Nodes visited since construction.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn search(
        &mut self,
        position: &mut dyn Position,
        depth: u8,
        maximizing: bool,
        mut alpha: f32,
        mut beta: f32,
    ) -> f32 {
        self.nodes += 1;

        if depth == 0 || position.is_game_over() {
            return self.leaf(position, depth);
        }

        let moves = self.scorer.order(position.legal_moves(), position);

        if maximizing {
            let mut best = f32::NEG_INFINITY;
            for mv in &moves {
                let mut child = ScopedMove::new(&mut *position, mv);
                let value = self.search(&mut *child, depth - 1, false, alpha, beta);

                best = best.max(value);
                alpha = alpha.max(best);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = f32::INFINITY;
            for mv in &moves {
                let mut child = ScopedMove::new(&mut *position, mv);
                let value = self.search(&mut *child, depth - 1, true, alpha, beta);

                best = best.min(value);
                beta = beta.min(best);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }

    /// Static score, with mates found higher in the tree pushed further out
    /// so the search prefers the quickest one.
    #[inline(always)]
    fn leaf(&self, position: &dyn Position, depth: u8) -> f32 {
        let score = self.evaluator.evaluate(position);
        if depth == 0 || !position.is_checkmate() {
            return score;
        }

        let bonus = depth as f32 * MATE_PLY_BONUS;
        match position.side_to_move() {
            Color::White => score - bonus,
            Color::Black => score + bonus,
        }
    }
}
