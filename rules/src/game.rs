use std::str::FromStr;

use chess::{
    Board, BoardStatus, CastleRights, ChessMove, Color, MoveGen, Piece, Square, ALL_SQUARES, EMPTY,
};

use crate::board::Grid;
use crate::error::GameError;
use crate::material::has_insufficient_material;
use crate::moves::{Move, MoveKind};
use crate::notation::san;
use crate::position::Position;

const FIFTY_MOVE_PLIES: u32 = 100;

/// A live game backed by the `chess` crate.
///
/// Keeps everything `chess::Board` does not track on its own: the move
/// counters, the notation history, repetition hashes and the undo stack.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    halfmove_clock: u32,
    fullmove_number: u32,
    history: Vec<String>,
    /// Hash of every position reached so far, current position last.
    hashes: Vec<u64>,
    undo_stack: Vec<Snapshot>,
}

#[derive(Debug, Clone, Copy)]
struct Snapshot {
    board: Board,
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl Default for Game {
    fn default() -> Self {
        Self::from_board(Board::default(), 0, 1)
    }
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        let board = Board::from_str(fen).map_err(|_| GameError::InvalidFen(fen.to_string()))?;

        let mut fields = fen.split_whitespace().skip(4);
        let halfmove_clock = fields.next().and_then(|f| f.parse().ok()).unwrap_or(0);
        let fullmove_number = fields
            .next()
            .and_then(|f| f.parse().ok())
            .unwrap_or(1)
            .max(1);

        Ok(Self::from_board(board, halfmove_clock, fullmove_number))
    }

    fn from_board(board: Board, halfmove_clock: u32, fullmove_number: u32) -> Self {
        Self {
            board,
            halfmove_clock,
            fullmove_number,
            history: Vec::new(),
            hashes: vec![board.get_hash()],
            undo_stack: Vec::new(),
        }
    }

    #[inline(always)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline(always)]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Resolves a SAN or coordinate notation against the legal moves and
    /// plays it.
    pub fn play(&mut self, notation: &str) -> Result<Move, GameError> {
        let mv = self
            .legal_moves()
            .into_iter()
            .find(|mv| mv.matches(notation))
            .ok_or_else(|| GameError::IllegalMove {
                notation: notation.to_string(),
                fen: self.fen(),
            })?;

        self.apply(&mv);
        Ok(mv)
    }

    fn describe(&self, chess_move: ChessMove, legal: &[ChessMove]) -> Option<Move> {
        let from = chess_move.get_source();
        let to = chess_move.get_dest();
        let piece = self.board.piece_on(from)?;
        let target = self.board.piece_on(to);

        let file_delta = from.get_file().to_index().abs_diff(to.get_file().to_index());
        let rank_delta = from.get_rank().to_index().abs_diff(to.get_rank().to_index());

        let kind = match (piece, chess_move.get_promotion(), target) {
            (Piece::King, _, _) if file_delta == 2 => {
                if to.get_file().to_index() > from.get_file().to_index() {
                    MoveKind::CastleShort
                } else {
                    MoveKind::CastleLong
                }
            }
            (_, Some(promoted), captured) => MoveKind::Promotion { promoted, captured },
            (_, None, Some(captured)) => MoveKind::Capture(captured),
            (Piece::Pawn, None, None) if file_delta == 1 => MoveKind::EnPassant,
            (Piece::Pawn, None, None) if rank_delta == 2 => MoveKind::DoublePush,
            _ => MoveKind::Quiet,
        };

        let notation = san(&self.board, chess_move, piece, kind, legal);
        Some(Move::new(piece, from, to, kind, notation))
    }

    /// Fifty-move rule, dead material or threefold repetition.
    fn drawn_by_rule(&self) -> bool {
        self.halfmove_clock >= FIFTY_MOVE_PLIES
            || has_insufficient_material(&self.board)
            || self.is_repetition()
    }

    fn is_repetition(&self) -> bool {
        let Some(&current) = self.hashes.last() else {
            return false;
        };
        let window = self.halfmove_clock as usize + 1;
        self.hashes
            .iter()
            .rev()
            .take(window)
            .filter(|&&hash| hash == current)
            .count()
            >= 3
    }
}

#[inline(always)]
fn to_chess_move(mv: &Move) -> ChessMove {
    ChessMove::new(mv.from(), mv.to(), mv.promotion())
}

impl FromStr for Game {
    type Err = GameError;

    fn from_str(fen: &str) -> Result<Self, Self::Err> {
        Self::from_fen(fen)
    }
}

impl Position for Game {
    fn legal_moves(&self) -> Vec<Move> {
        let legal: Vec<ChessMove> = MoveGen::new_legal(&self.board).collect();
        legal
            .iter()
            .filter_map(|&chess_move| self.describe(chess_move, &legal))
            .collect()
    }

    fn apply(&mut self, mv: &Move) {
        let chess_move = to_chess_move(mv);
        assert!(
            self.board.legal(chess_move),
            "move {} ({}) is not legal in {}",
            mv,
            mv.uci(),
            self.fen()
        );

        self.undo_stack.push(Snapshot {
            board: self.board,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        });

        let mover = self.board.side_to_move();
        self.board = self.board.make_move_new(chess_move);

        if mv.piece() == Piece::Pawn || mv.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if mover == Color::Black {
            self.fullmove_number += 1;
        }

        self.history.push(mv.notation().to_string());
        self.hashes.push(self.board.get_hash());
    }

    fn undo(&mut self) {
        let Some(snapshot) = self.undo_stack.pop() else {
            panic!("undo called with no move to take back in {}", self.fen());
        };

        self.board = snapshot.board;
        self.halfmove_clock = snapshot.halfmove_clock;
        self.fullmove_number = snapshot.fullmove_number;
        self.history.pop();
        self.hashes.pop();
    }

    fn gives_check(&self, mv: &Move) -> bool {
        let chess_move = to_chess_move(mv);
        debug_assert!(self.board.legal(chess_move));
        *self.board.make_move_new(chess_move).checkers() != EMPTY
    }

    #[inline(always)]
    fn is_check(&self) -> bool {
        *self.board.checkers() != EMPTY
    }

    fn is_checkmate(&self) -> bool {
        self.board.status() == BoardStatus::Checkmate
    }

    fn is_draw(&self) -> bool {
        match self.board.status() {
            BoardStatus::Checkmate => false,
            BoardStatus::Stalemate => true,
            BoardStatus::Ongoing => self.drawn_by_rule(),
        }
    }

    fn is_game_over(&self) -> bool {
        match self.board.status() {
            BoardStatus::Checkmate | BoardStatus::Stalemate => true,
            BoardStatus::Ongoing => self.drawn_by_rule(),
        }
    }

    #[inline(always)]
    fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    #[inline(always)]
    fn piece_at(&self, square: Square) -> Option<(Piece, Color)> {
        self.board.piece_on(square).zip(self.board.color_on(square))
    }

    fn board_grid(&self) -> Grid {
        let mut grid: Grid = [[None; 8]; 8];
        for square in ALL_SQUARES {
            let index = square.to_index();
            grid[index / 8][index % 8] = self.piece_at(square);
        }
        grid
    }

    fn castling_rights(&self, color: Color) -> CastleRights {
        self.board.castle_rights(color)
    }

    fn move_history(&self) -> &[String] {
        &self.history
    }

    fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    fn fen(&self) -> String {
        let board = self.board.to_string();
        let position: Vec<&str> = board.split_whitespace().take(4).collect();
        format!(
            "{} {} {}",
            position.join(" "),
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}
