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

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::ops::Index;
use thiserror::Error;

use super::material::{Piece, Player};
use super::position::{Offset, Position};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BoardError {
    #[error("Position {0} is outside the board")]
    OutOfBounds(Position),
}
use BoardError::*;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Cell {
    position: Position,
    piece: Option<Piece>,
}

impl Cell {
    fn new(position: Position) -> Self {
        Self {
            position,
            piece: None,
        }
    }
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }
    #[inline]
    pub fn piece(&self) -> Option<&Piece> {
        self.piece.as_ref()
    }
}

/// A fixed `rows` x `cols` grid stored row-major. Cloning yields an
/// independent board with its own copies of every piece.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(Cell::new(Position::new(row, col)));
            }
        }
        Self { rows, cols, cells }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }
    #[inline]
    pub fn contains(&self, position: Position) -> bool {
        position.row() < self.rows && position.col() < self.cols
    }

    /// `position + offset`, if it lands on the board.
    #[inline]
    pub fn step(&self, position: Position, offset: Offset) -> Option<Position> {
        (position + offset).filter(|next| self.contains(*next))
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Occupied cells in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.cells.iter().filter_map(Cell::piece)
    }

    pub fn pieces_of(&self, player: Player) -> impl Iterator<Item = &Piece> {
        self.pieces().filter(move |piece| piece.owner() == player)
    }

    pub fn piece_at(&self, position: Position) -> Result<Option<&Piece>> {
        let index = self.index_of(position)?;
        Ok(self.cells[index].piece())
    }

    /// Places `piece` (or clears the cell when `None`), returning the
    /// previous occupant. A placed piece takes on `position`.
    pub fn set_piece_at(
        &mut self,
        position: Position,
        piece: Option<Piece>,
    ) -> Result<Option<Piece>> {
        let index = self.index_of(position)?;
        let piece = piece.map(|mut piece| {
            piece.set_position(position);
            piece
        });
        Ok(std::mem::replace(&mut self.cells[index].piece, piece))
    }

    /// Places `piece` at its own stored position.
    pub fn place(&mut self, piece: Piece) -> Result<Option<Piece>> {
        self.set_piece_at(piece.position(), Some(piece))
    }

    pub fn remove(&mut self, position: Position) -> Result<Option<Piece>> {
        self.set_piece_at(position, None)
    }

    /// Moves whatever stands on `from` to `to`, returning the piece that was
    /// on `to`. Nothing changes if `from` is empty or either end is off
    /// the board.
    pub fn move_piece(&mut self, from: Position, to: Position) -> Result<Option<Piece>> {
        self.index_of(to)?;
        let Some(piece) = self.remove(from)? else {
            return Ok(None);
        };
        self.set_piece_at(to, Some(piece))
    }

    pub fn find_king(&self, player: Player) -> Option<Position> {
        self.pieces()
            .find(|piece| piece.is_king() && piece.owner() == player)
            .map(Piece::position)
    }

    fn index_of(&self, position: Position) -> Result<usize> {
        if !self.contains(position) {
            return Err(OutOfBounds(position).into());
        }
        Ok(position.row() * self.cols + position.col())
    }
}

impl Index<Position> for Board {
    type Output = Option<Piece>;

    /// Panics if `position` is not on the board.
    fn index(&self, position: Position) -> &Self::Output {
        assert!(self.contains(position), "{position} is outside the board");
        &self.cells[position.row() * self.cols + position.col()].piece
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

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(6, 4);
        assert_eq!(board.rows(), 6);
        assert_eq!(board.cols(), 4);
        assert_eq!(board.cells().count(), 24);
        assert_eq!(board.pieces().count(), 0);
    }
    #[test]
    fn test_cells_know_their_position() {
        let board = Board::new(2, 3);
        let positions: Vec<Position> = board.cells().map(Cell::position).collect();
        assert_eq!(positions[0], pos(0, 0));
        assert_eq!(positions[2], pos(0, 2));
        assert_eq!(positions[3], pos(1, 0));
    }
    #[test]
    fn test_set_piece_updates_piece_position() {
        let mut board = Board::new(5, 5);
        let rook = Piece::new(Rook, A, pos(0, 0));
        board.set_piece_at(pos(3, 2), Some(rook)).unwrap();
        let placed = board.piece_at(pos(3, 2)).unwrap().unwrap();
        assert_eq!(placed.position(), pos(3, 2));
        assert_eq!(board.piece_at(pos(0, 0)).unwrap(), None);
    }
    #[test]
    fn test_set_piece_returns_previous() {
        let mut board = Board::new(5, 5);
        board.place(Piece::new(Rook, A, pos(1, 1))).unwrap();
        let previous = board.remove(pos(1, 1)).unwrap();
        assert_eq!(previous.map(|p| p.kind()), Some(Rook));
        assert!(board[pos(1, 1)].is_none());
    }
    #[test]
    fn test_out_of_bounds() {
        let mut board = Board::new(5, 4);
        let err = board.piece_at(pos(5, 0)).unwrap_err();
        assert_eq!(
            err.downcast_ref::<BoardError>(),
            Some(&BoardError::OutOfBounds(pos(5, 0)))
        );
        assert!(board.piece_at(pos(0, 4)).is_err());
        assert!(board.set_piece_at(pos(9, 9), None).is_err());
        assert!(board.place(Piece::new(King, B, pos(0, 7))).is_err());
    }
    #[test]
    #[should_panic]
    fn test_index_out_of_bounds_panics() {
        let board = Board::new(3, 3);
        let _ = &board[pos(3, 0)];
    }
    #[test]
    fn test_find_king() {
        let mut board = Board::new(5, 5);
        board.place(Piece::new(King, A, pos(4, 4))).unwrap();
        board.place(Piece::new(Queen, B, pos(0, 0))).unwrap();
        assert_eq!(board.find_king(A), Some(pos(4, 4)));
        assert_eq!(board.find_king(B), None);
    }
    #[test]
    fn test_clone_is_independent() {
        let mut board = Board::new(5, 5);
        board.place(Piece::new(Knight, A, pos(2, 2))).unwrap();
        let mut copy = board.clone();
        copy.remove(pos(2, 2)).unwrap();
        copy.place(Piece::new(Pawn, B, pos(0, 0))).unwrap();
        assert!(board[pos(2, 2)].is_some());
        assert!(board[pos(0, 0)].is_none());
        assert_eq!(copy.pieces().count(), 1);
    }
    #[test]
    fn test_step_stays_on_board() {
        let board = Board::new(3, 3);
        assert_eq!(board.step(pos(2, 2), Offset::new(1, 0)), None);
        assert_eq!(board.step(pos(2, 2), Offset::new(-1, -2)), Some(pos(1, 0)));
    }
}
