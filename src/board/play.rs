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
use strum::IntoEnumIterator;
use tracing::{debug, trace};

use super::grid::Board;
use super::material::{Piece, Player};
use super::moves::{Move, MoveError, MoveValidator, StandardValidator};
use super::position::{Direction, Position};
use super::ranges::{PieceRangeProvider, StandardRanges};

use MoveError::*;

/// A board plus the side to move.
///
/// Everything except `execute_move` and `alternate_player` is a query.
/// Hypothetical positions are always evaluated on a cloned board.
#[derive(Debug, Clone)]
pub struct GameState<R = StandardRanges, V = StandardValidator> {
    board: Board,
    current: Player,
    ranges: R,
    validator: V,
}

impl GameState {
    /// Starts a game on `board` with `Player::A` to move.
    pub fn new(board: Board) -> Self {
        Self::with_rules(board, StandardRanges, StandardValidator::default())
    }
}

impl<R, V> GameState<R, V>
where
    R: PieceRangeProvider,
    V: MoveValidator,
{
    pub fn with_rules(board: Board, ranges: R, validator: V) -> Self {
        Self {
            board,
            current: Player::A,
            ranges,
            validator,
        }
    }

    pub fn with_current_player(mut self, player: Player) -> Self {
        self.current = player;
        self
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }
    #[inline]
    pub fn current_player(&self) -> Player {
        self.current
    }
    #[inline]
    pub fn player_a(&self) -> Player {
        Player::A
    }
    #[inline]
    pub fn player_b(&self) -> Player {
        Player::B
    }

    pub fn alternate_player(&mut self) {
        self.current = !self.current;
        trace!(player = %self.current, "turn passed");
    }

    #[inline]
    pub fn is_check(&self) -> bool {
        self.find_threatened_king().is_some()
    }

    /// A king standing in an opposing piece's attack range. When both kings
    /// are attacked the side to move's king wins, otherwise the first one
    /// found scanning row by row.
    pub fn find_threatened_king(&self) -> Option<Piece> {
        let mut found = None;
        for piece in self.board.pieces() {
            for position in self.ranges.attack_range(piece, &self.board) {
                let Ok(Some(king)) = self.board.piece_at(position) else {
                    continue;
                };
                if king.is_king() && king.owner() != piece.owner() {
                    if king.owner() == self.current {
                        trace!(king = %king, attacker = %piece, "king threatened");
                        return Some(king.clone());
                    }
                    found.get_or_insert_with(|| king.clone());
                }
            }
        }
        if let Some(king) = &found {
            trace!(king = %king, "waiting side's king threatened");
        }
        found
    }

    pub fn find_threatening_piece(&self, king: &Piece) -> Option<Piece> {
        self.threatening_pieces(king).into_iter().next()
    }

    /// Every opposing piece attacking `king`, in row-major order.
    pub fn threatening_pieces(&self, king: &Piece) -> Vec<Piece> {
        self.board
            .pieces()
            .filter(|piece| piece.owner() != king.owner())
            .filter(|piece| {
                self.ranges
                    .attack_range(piece, &self.board)
                    .contains(&king.position())
            })
            .cloned()
            .collect()
    }

    /// Whether taking `piece` off the board would leave its own king
    /// attacked, i.e. the piece is pinned.
    pub fn is_king_defended_by(&self, piece: &Piece) -> bool {
        let mut without = self.board.clone();
        if without.remove(piece.position()).is_err() {
            return false;
        }
        match without.find_king(piece.owner()) {
            Some(king) => self.ranges.is_attacked(king, !piece.owner(), &without),
            None => false,
        }
    }

    /// Pieces of the side to move that may act. Only a threat to the side
    /// to move's own king narrows the choice; a threat to the waiting
    /// side's king leaves the position open.
    pub fn legal_pieces(&self) -> Vec<Piece> {
        let king = self
            .find_threatened_king()
            .filter(|king| king.owner() == self.current);
        let Some(king) = king else {
            return self
                .board
                .pieces_of(self.current)
                .filter(|piece| !self.is_king_defended_by(piece))
                .cloned()
                .collect();
        };
        let mut result = Vec::new();
        if self.can_king_escape(&king) {
            result.push(king.clone());
        }
        // with more than one attacker only the king itself can help
        if let [attacker] = self.threatening_pieces(&king).as_slice() {
            let helpers = self
                .interposing_pieces(&king, attacker)
                .into_iter()
                .chain(self.capturing_pieces(attacker));
            for piece in helpers {
                if !result.contains(&piece) {
                    result.push(piece);
                }
            }
        }
        result
    }

    pub fn is_terminal(&self) -> bool {
        let Some(king) = self.find_threatened_king() else {
            return false;
        };
        let terminal = match self.threatening_pieces(&king).as_slice() {
            [attacker] => {
                !self.ranges.is_capturable(attacker, &self.board)
                    && self.interposing_pieces(&king, attacker).is_empty()
                    && !self.can_king_escape(&king)
            }
            _ => !self.can_king_escape(&king),
        };
        if terminal {
            debug!(king = %king, "king cannot be saved");
        }
        terminal
    }

    /// The side to move once the position is terminal.
    pub fn winner(&self) -> Option<Player> {
        self.is_terminal().then_some(self.current)
    }

    pub fn can_king_escape(&self, king: &Piece) -> bool {
        Direction::iter()
            .filter_map(|dir| self.board.step(king.position(), dir.into()))
            .map(|to| Move::new(king.position(), to))
            .any(|mv| {
                self.validator.is_valid_quiet_move(&mv, king, &self.board)
                    || self.validator.is_valid_capture_move(&mv, king, &self.board)
            })
    }

    pub fn positions_between(&self, from: Position, to: Position) -> Vec<Position> {
        from.between(to)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for piece in self.legal_pieces() {
            for destination in self.ranges.movement_range(&piece, &self.board) {
                let mv = Move::new(piece.position(), destination);
                let allowed = if piece.is_king() {
                    self.validator.is_valid_quiet_move(&mv, &piece, &self.board)
                        || self.validator.is_valid_capture_move(&mv, &piece, &self.board)
                } else {
                    self.approaches_opposing_king(&piece, destination)
                        || self
                            .ranges
                            .may_threaten_king(&piece, destination, &self.board)
                };
                if allowed {
                    moves.push(mv);
                }
            }
        }
        moves
    }

    /// Applies `mv` for the side to move and hands the turn over, returning
    /// any captured piece. A rejected move leaves the state untouched.
    pub fn execute_move(&mut self, mv: Move) -> Result<Option<Piece>> {
        self.board.piece_at(mv.to)?;
        let piece = match self.board.piece_at(mv.from)? {
            Some(piece) if piece.owner() == self.current => piece.clone(),
            _ => {
                debug!(%mv, player = %self.current, "no piece of the side to move at origin");
                return Err(InvalidMove(mv).into());
            }
        };
        let quiet = self.validator.is_valid_quiet_move(&mv, &piece, &self.board);
        if !quiet && !self.validator.is_valid_capture_move(&mv, &piece, &self.board) {
            debug!(%mv, piece = %piece, "move rejected");
            return Err(InvalidMove(mv).into());
        }
        let captured = self.board.move_piece(mv.from, mv.to)?;
        trace!(%mv, piece = %piece, captured = ?captured.as_ref().map(Piece::kind), "move applied");
        self.alternate_player();
        Ok(captured)
    }

    fn approaches_opposing_king(&self, piece: &Piece, destination: Position) -> bool {
        match self.board.find_king(!piece.owner()) {
            Some(king) => destination.distance_to(king) < piece.position().distance_to(king),
            None => false,
        }
    }

    // pieces of the king's side that can step onto the attack line
    fn interposing_pieces(&self, king: &Piece, attacker: &Piece) -> Vec<Piece> {
        let line = self.positions_between(king.position(), attacker.position());
        self.board
            .pieces_of(king.owner())
            .filter(|piece| !piece.is_king())
            .filter(|piece| {
                line.iter().any(|cell| {
                    let mv = Move::new(piece.position(), *cell);
                    self.validator.is_valid_quiet_move(&mv, piece, &self.board)
                })
            })
            .cloned()
            .collect()
    }

    fn capturing_pieces(&self, target: &Piece) -> Vec<Piece> {
        self.board
            .pieces_of(!target.owner())
            .filter(|piece| {
                self.ranges
                    .capturable_pieces(piece, &self.board)
                    .contains(target)
            })
            .cloned()
            .collect()
    }
}
