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
#[cfg(feature = "random")]
use rand::{thread_rng, Rng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Board, GameState, Move, MoveError, MoveValidator, Piece, PieceRangeProvider, Player,
    StandardRanges, StandardValidator,
};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameId(u64);

impl GameId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }
    pub fn value(&self) -> u64 {
        self.0
    }
    #[cfg(feature = "random")]
    pub fn random() -> Self {
        Self(thread_rng().gen())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Win(Player, WinReason),
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum WinReason {
    CheckMate,
    Resigned,
}

/// Drives one game: applies moves in turn and stops accepting them once a
/// result is known.
#[derive(Debug, Clone)]
pub struct Game<R = StandardRanges, V = StandardValidator> {
    id: GameId,
    state: GameState<R, V>,
    history: Vec<Move>,
    result: Option<GameResult>,
}

impl Game {
    pub fn new(id: GameId, board: Board) -> Self {
        Self::from_state(id, GameState::new(board))
    }
}

impl<R, V> Game<R, V>
where
    R: PieceRangeProvider,
    V: MoveValidator,
{
    pub fn from_state(id: GameId, state: GameState<R, V>) -> Self {
        let mut game = Self {
            id,
            state,
            history: Vec::new(),
            result: None,
        };
        game.update_result();
        game
    }

    pub fn id(&self) -> GameId {
        self.id
    }
    pub fn state(&self) -> &GameState<R, V> {
        &self.state
    }
    pub fn history(&self) -> &[Move] {
        &self.history
    }
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    pub fn submit_move(&mut self, mv: Move) -> Result<Option<Piece>> {
        if self.result.is_some() {
            return Err(MoveError::GameOver.into());
        }
        let captured = self.state.execute_move(mv)?;
        self.history.push(mv);
        self.update_result();
        Ok(captured)
    }

    pub fn resign(&mut self, player: Player) -> Result<GameResult> {
        if self.result.is_some() {
            return Err(MoveError::GameOver.into());
        }
        let result = GameResult::Win(!player, WinReason::Resigned);
        debug!(game = self.id.value(), %player, "resigned");
        self.result = Some(result);
        Ok(result)
    }

    fn update_result(&mut self) {
        if let Some(winner) = self.state.winner() {
            debug!(game = self.id.value(), %winner, "checkmate");
            self.result = Some(GameResult::Win(winner, WinReason::CheckMate));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use PieceKind::*;
    use Player::*;

    fn mv(from: (usize, usize), to: (usize, usize)) -> Move {
        Move::new(from.into(), to.into())
    }

    fn board_with(pieces: &[(PieceKind, Player, (usize, usize))]) -> Board {
        let mut board = Board::new(5, 5);
        for (kind, owner, at) in pieces {
            board.place(Piece::new(*kind, *owner, (*at).into())).unwrap();
        }
        board
    }

    #[test]
    fn test_game_records_checkmate() {
        let board = board_with(&[
            (King, A, (4, 4)),
            (Rook, B, (3, 0)),
            (Rook, B, (2, 1)),
            (King, B, (0, 0)),
        ]);
        let state = GameState::new(board).with_current_player(B);
        let mut game = Game::from_state(GameId::new(7), state);
        assert_eq!(game.result(), None);
        game.submit_move(mv((2, 1), (4, 1))).unwrap();
        assert_eq!(game.history(), &[mv((2, 1), (4, 1))]);
        assert_eq!(game.result(), Some(GameResult::Win(A, WinReason::CheckMate)));
        let err = game.submit_move(mv((0, 0), (0, 1))).unwrap_err();
        assert_eq!(err.downcast_ref::<MoveError>(), Some(&MoveError::GameOver));
    }
    #[test]
    fn test_rejected_move_not_recorded() {
        let board = board_with(&[(King, A, (4, 4)), (King, B, (0, 0))]);
        let mut game = Game::new(GameId::new(1), board);
        assert!(game.submit_move(mv((4, 4), (2, 4))).is_err());
        assert!(game.history().is_empty());
        assert_eq!(game.state().current_player(), A);
        game.submit_move(mv((4, 4), (3, 4))).unwrap();
        assert_eq!(game.state().current_player(), B);
    }
    #[test]
    fn test_resign() {
        let board = board_with(&[(King, A, (4, 4)), (King, B, (0, 0))]);
        let mut game = Game::new(GameId::new(2), board);
        let result = game.resign(A).unwrap();
        assert_eq!(result, GameResult::Win(B, WinReason::Resigned));
        assert!(game.resign(B).is_err());
        assert!(game.submit_move(mv((4, 4), (3, 4))).is_err());
    }
    #[cfg(feature = "random")]
    #[test]
    fn test_random_ids() {
        let ids: Vec<GameId> = (0..4).map(|_| GameId::random()).collect();
        assert!(ids.windows(2).any(|pair| pair[0] != pair[1]));
    }
}
