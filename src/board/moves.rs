// Copyright 2023 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::grid::Board;
use super::material::Piece;
use super::position::Position;
use super::ranges::{hypothetical, PieceRangeProvider, StandardRanges};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MoveError {
    #[error("Not a legal move: {0}")]
    InvalidMove(Move),
    #[error("Game is already over")]
    GameOver,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }

    /// The move that undoes this one.
    pub fn inverse(&self) -> Self {
        Self::new(self.to, self.from)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Per-kind movement rules, without any notion of check beyond a king
/// refusing to step onto an attacked cell.
pub trait MoveValidator {
    fn is_valid_quiet_move(&self, mv: &Move, piece: &Piece, board: &Board) -> bool;
    fn is_valid_capture_move(&self, mv: &Move, piece: &Piece, board: &Board) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardValidator<R = StandardRanges> {
    ranges: R,
}

impl<R: PieceRangeProvider> StandardValidator<R> {
    pub fn new(ranges: R) -> Self {
        Self { ranges }
    }

    fn is_well_formed(&self, mv: &Move, piece: &Piece, board: &Board) -> bool {
        mv.from != mv.to
            && mv.from == piece.position()
            && board.contains(mv.from)
            && board.contains(mv.to)
            && board[mv.from].as_ref() == Some(piece)
    }

    // a king may not end its move on a cell the opponent attacks
    fn leaves_king_safe(&self, mv: &Move, piece: &Piece, board: &Board) -> bool {
        if !piece.is_king() {
            return true;
        }
        match hypothetical(board, mv.from, mv.to) {
            Some(after) => !self.ranges.is_attacked(mv.to, !piece.owner(), &after),
            None => false,
        }
    }
}

impl<R: PieceRangeProvider> MoveValidator for StandardValidator<R> {
    fn is_valid_quiet_move(&self, mv: &Move, piece: &Piece, board: &Board) -> bool {
        self.is_well_formed(mv, piece, board)
            && board[mv.to].is_none()
            && self.ranges.movement_range(piece, board).contains(&mv.to)
            && self.leaves_king_safe(mv, piece, board)
    }

    fn is_valid_capture_move(&self, mv: &Move, piece: &Piece, board: &Board) -> bool {
        self.is_well_formed(mv, piece, board)
            && matches!(&board[mv.to], Some(target) if target.owner() != piece.owner())
            && self.ranges.attack_range(piece, board).contains(&mv.to)
            && self.leaves_king_safe(mv, piece, board)
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use PieceKind::*;
    use Player::*;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    fn mv(from: (usize, usize), to: (usize, usize)) -> Move {
        Move::new(from.into(), to.into())
    }

    fn validator() -> StandardValidator {
        StandardValidator::default()
    }

    fn board_with(pieces: &[(PieceKind, Player, (usize, usize))]) -> Board {
        let mut board = Board::new(5, 5);
        for (kind, owner, at) in pieces {
            board.place(Piece::new(*kind, *owner, (*at).into())).unwrap();
        }
        board
    }

    #[test]
    fn test_quiet_move() {
        let board = board_with(&[(Rook, A, (4, 0))]);
        let rook = board[pos(4, 0)].clone().unwrap();
        let validator = validator();
        assert!(validator.is_valid_quiet_move(&mv((4, 0), (0, 0)), &rook, &board));
        assert!(!validator.is_valid_quiet_move(&mv((4, 0), (3, 1)), &rook, &board));
        assert!(!validator.is_valid_capture_move(&mv((4, 0), (0, 0)), &rook, &board));
    }
    #[test]
    fn test_quiet_move_blocked() {
        let board = board_with(&[(Rook, A, (4, 0)), (Pawn, A, (2, 0))]);
        let rook = board[pos(4, 0)].clone().unwrap();
        let validator = validator();
        assert!(validator.is_valid_quiet_move(&mv((4, 0), (3, 0)), &rook, &board));
        assert!(!validator.is_valid_quiet_move(&mv((4, 0), (1, 0)), &rook, &board));
        assert!(!validator.is_valid_capture_move(&mv((4, 0), (2, 0)), &rook, &board));
    }
    #[test]
    fn test_capture_move() {
        let board = board_with(&[(Bishop, B, (0, 0)), (Knight, A, (3, 3))]);
        let bishop = board[pos(0, 0)].clone().unwrap();
        let validator = validator();
        assert!(validator.is_valid_capture_move(&mv((0, 0), (3, 3)), &bishop, &board));
        assert!(!validator.is_valid_quiet_move(&mv((0, 0), (3, 3)), &bishop, &board));
        assert!(!validator.is_valid_capture_move(&mv((0, 0), (4, 4)), &bishop, &board));
    }
    #[test]
    fn test_move_must_start_at_piece() {
        let board = board_with(&[(Rook, A, (4, 0))]);
        let rook = board[pos(4, 0)].clone().unwrap();
        let validator = validator();
        assert!(!validator.is_valid_quiet_move(&mv((3, 0), (2, 0)), &rook, &board));
        assert!(!validator.is_valid_quiet_move(&mv((4, 0), (4, 0)), &rook, &board));
        assert!(!validator.is_valid_quiet_move(&mv((4, 0), (4, 9)), &rook, &board));
    }
    #[test]
    fn test_king_cannot_step_into_attack() {
        let board = board_with(&[(King, A, (4, 4)), (Rook, B, (3, 0))]);
        let king = board[pos(4, 4)].clone().unwrap();
        let validator = validator();
        assert!(!validator.is_valid_quiet_move(&mv((4, 4), (3, 4)), &king, &board));
        assert!(!validator.is_valid_quiet_move(&mv((4, 4), (3, 3)), &king, &board));
        assert!(validator.is_valid_quiet_move(&mv((4, 4), (4, 3)), &king, &board));
    }
    #[test]
    fn test_king_cannot_retreat_along_attack_line() {
        // (4, 3) is still on the rook's line once the king stands there
        let board = board_with(&[(King, A, (4, 4)), (Rook, B, (4, 0))]);
        let king = board[pos(4, 4)].clone().unwrap();
        let validator = validator();
        assert!(!validator.is_valid_quiet_move(&mv((4, 4), (4, 3)), &king, &board));
        assert!(validator.is_valid_quiet_move(&mv((4, 4), (3, 4)), &king, &board));
    }
    #[test]
    fn test_king_capture_of_defended_piece() {
        let board = board_with(&[(King, A, (4, 4)), (Rook, B, (3, 4)), (Rook, B, (0, 4))]);
        let king = board[pos(4, 4)].clone().unwrap();
        let validator = validator();
        assert!(!validator.is_valid_capture_move(&mv((4, 4), (3, 4)), &king, &board));
    }
    #[test]
    fn test_inverse() {
        let m = mv((1, 2), (3, 4));
        assert_eq!(m.inverse(), mv((3, 4), (1, 2)));
        assert_eq!(m.to_string(), "(1, 2) -> (3, 4)");
    }
}
