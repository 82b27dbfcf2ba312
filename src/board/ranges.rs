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

use strum::IntoEnumIterator;

use super::grid::Board;
use super::material::{Piece, PieceKind, Player};
use super::position::{Direction, Offset, Position};

use PieceKind::*;

/// Geometry of every piece kind on a given board.
///
/// Implementors supply `attack_range` and `movement_range`; the remaining
/// queries are derived from those two and evaluated on cloned boards, so
/// none of them mutate the board they are handed.
pub trait PieceRangeProvider {
    /// Cells `piece` could capture into, whether or not anything stands
    /// there. Cells held by the piece's own side are included. Cells off
    /// the board are ignored by every query below.
    fn attack_range(&self, piece: &Piece, board: &Board) -> Vec<Position>;

    /// Cells `piece` could move to, quietly or by capturing.
    fn movement_range(&self, piece: &Piece, board: &Board) -> Vec<Position>;

    fn is_attacked(&self, position: Position, by: Player, board: &Board) -> bool {
        board
            .pieces_of(by)
            .any(|piece| self.attack_range(piece, board).contains(&position))
    }

    /// Opposing pieces `piece` could take right now. A king never lists a
    /// piece whose cell is covered by the opponent.
    fn capturable_pieces(&self, piece: &Piece, board: &Board) -> Vec<Piece> {
        self.attack_range(piece, board)
            .into_iter()
            .filter_map(|position| board.piece_at(position).ok().flatten())
            .filter(|target| target.owner() != piece.owner())
            .filter(|target| {
                !piece.is_king()
                    || hypothetical(board, piece.position(), target.position())
                        .map(|after| !self.is_attacked(target.position(), target.owner(), &after))
                        .unwrap_or(false)
            })
            .cloned()
            .collect()
    }

    /// Whether moving `piece` to `destination` would put the opposing king
    /// inside its attack range.
    fn may_threaten_king(&self, piece: &Piece, destination: Position, board: &Board) -> bool {
        let Some(after) = hypothetical(board, piece.position(), destination) else {
            return false;
        };
        let (Some(king), Some(moved)) = (after.find_king(!piece.owner()), &after[destination])
        else {
            return false;
        };
        self.attack_range(moved, &after).contains(&king)
    }

    fn is_capturable(&self, piece: &Piece, board: &Board) -> bool {
        board
            .pieces_of(!piece.owner())
            .any(|other| self.capturable_pieces(other, board).contains(piece))
    }
}

/// The board after moving whatever stands on `from` to `to`.
pub(crate) fn hypothetical(board: &Board, from: Position, to: Position) -> Option<Board> {
    let mut after = board.clone();
    after.move_piece(from, to).ok()?;
    Some(after)
}

const KNIGHT_OFFSETS: [Offset; 8] = [
    Offset::new(-2, -1),
    Offset::new(-2, 1),
    Offset::new(2, -1),
    Offset::new(2, 1),
    Offset::new(-1, -2),
    Offset::new(-1, 2),
    Offset::new(1, -2),
    Offset::new(1, 2),
];

/// Standard chess geometry on an arbitrary rectangle. Pawns step one cell
/// forward and capture one cell diagonally forward; there is no double
/// step, en passant or promotion.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRanges;

impl PieceRangeProvider for StandardRanges {
    fn attack_range(&self, piece: &Piece, board: &Board) -> Vec<Position> {
        let from = piece.position();
        match piece.kind() {
            King => Direction::iter()
                .filter_map(|dir| board.step(from, dir.into()))
                .collect(),
            Queen => rays(board, from, Direction::iter()),
            Rook => rays(board, from, Direction::horizontals()),
            Bishop => rays(board, from, Direction::diagonals()),
            Knight => KNIGHT_OFFSETS
                .into_iter()
                .filter_map(|offset| board.step(from, offset))
                .collect(),
            Pawn => {
                let forward = piece.owner().forward();
                [Offset::new(forward, -1), Offset::new(forward, 1)]
                    .into_iter()
                    .filter_map(|offset| board.step(from, offset))
                    .collect()
            }
        }
    }

    fn movement_range(&self, piece: &Piece, board: &Board) -> Vec<Position> {
        let is_opponent =
            |position: Position| matches!(&board[position], Some(p) if p.owner() != piece.owner());
        if piece.kind().is_pawn() {
            let mut result: Vec<Position> = board
                .step(piece.position(), piece.forward())
                .filter(|ahead| board[*ahead].is_none())
                .into_iter()
                .collect();
            result.extend(
                self.attack_range(piece, board)
                    .into_iter()
                    .filter(|position| is_opponent(*position)),
            );
            return result;
        }
        self.attack_range(piece, board)
            .into_iter()
            .filter(|position| board[*position].is_none() || is_opponent(*position))
            .collect()
    }
}

/// Cells along each direction up to and including the first occupied one.
fn rays<I>(board: &Board, from: Position, directions: I) -> Vec<Position>
where
    I: IntoIterator<Item = Direction>,
{
    let mut result = Vec::new();
    for dir in directions {
        let mut next = board.step(from, dir.into());
        while let Some(position) = next {
            result.push(position);
            if board[position].is_some() {
                break;
            }
            next = board.step(position, dir.into());
        }
    }
    result
}
