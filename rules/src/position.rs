use std::ops::{Deref, DerefMut};

use chess::{CastleRights, Color, Piece, Square};

use crate::board::Grid;
use crate::moves::Move;

/// The narrow interface the search core consumes from a rules engine.
///
/// Implementations own the full game state. `apply` and `undo` are strictly
/// paired: `undo` restores board, side to move, rights and counters exactly.
/// Passing a move that was not produced by `legal_moves` for the current
/// state is a programming error and may panic.
pub trait Position {
    /// Legal moves in generator order.
    fn legal_moves(&self) -> Vec<Move>;
    fn apply(&mut self, mv: &Move);
    fn undo(&mut self);

    /// Whether playing `mv` checks the opponent. Never mutates `self`.
    fn gives_check(&self, mv: &Move) -> bool;

    fn is_check(&self) -> bool;
    fn is_checkmate(&self) -> bool;
    fn is_draw(&self) -> bool;
    fn is_game_over(&self) -> bool {
        self.is_checkmate() || self.is_draw()
    }

    fn side_to_move(&self) -> Color;
    fn piece_at(&self, square: Square) -> Option<(Piece, Color)>;
    fn board_grid(&self) -> Grid;
    fn castling_rights(&self, color: Color) -> CastleRights;

    /// Notations of every move played so far, oldest first.
    fn move_history(&self) -> &[String];

    /// Starts at 1 and increments after each Black move.
    fn fullmove_number(&self) -> u32;

    /// FEN of the current position.
    fn fen(&self) -> String;
}

/// Applies a move for the lifetime of the guard.
///
/// The move is undone when the guard is dropped, whichever way the scope is
/// left. [`ScopedMove::commit`] keeps it on the board instead.
pub struct ScopedMove<'a, P: Position + ?Sized> {
    position: &'a mut P,
    committed: bool,
}

impl<'a, P: Position + ?Sized> ScopedMove<'a, P> {
    #[inline(always)]
    pub fn new(position: &'a mut P, mv: &Move) -> Self {
        position.apply(mv);
        Self {
            position,
            committed: false,
        }
    }

    /// Leaves the move applied.
    pub fn commit(mut self) {
        self.committed = true;
    }
}

impl<P: Position + ?Sized> Deref for ScopedMove<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        &*self.position
    }
}

impl<P: Position + ?Sized> DerefMut for ScopedMove<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        &mut *self.position
    }
}

impl<P: Position + ?Sized> Drop for ScopedMove<'_, P> {
    fn drop(&mut self) {
        if !self.committed {
            self.position.undo();
        }
    }
}
