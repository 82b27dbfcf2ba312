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

//! Rules engine for Radikal Chess on a rectangular board
//!
//! A _game state_ pairs a board with the side to move and answers the
//! questions a turn loop needs: which pieces may act, where they may go,
//! whether the game is over and who is reported as winner. Supported:
//!
//! [x] Boards of any size
//! [x] Check detection, single and double threats
//! [x] Pinned piece exclusion
//! [x] Blocking and capturing a checking piece
//! [x] Pluggable piece geometry and move validation
//! [ ] Pawn promotion
//! [ ] Stalemate and draw rules
//!
//! Some of the key abstractions include:
//!
//! * A `Position` is a (row, col) cell coordinate. Rows grow downwards.
//!   `Offset` and `Direction` describe steps between cells, and
//!   `Position::between` lists the cells strictly between two aligned
//!   positions.
//!
//! * A `Piece` has a `PieceKind` (`King`, `Queen`, `Rook`, `Bishop`,
//!   `Knight` and `Pawn`), an owning `Player` (`A` or `B`) and its current
//!   position. Only the `Board` changes a piece's position, which keeps the
//!   piece and the cell holding it in agreement.
//!
//! * A `Board` is a fixed grid of `Cell`s. Lookups outside the grid fail
//!   with `BoardError::OutOfBounds`. Cloning a board copies every piece, so
//!   hypothetical positions are explored on clones.
//!
//! * `PieceRangeProvider` produces attack and movement ranges per piece
//!   kind and `MoveValidator` accepts or rejects single quiet or capturing
//!   moves. `StandardRanges` and `StandardValidator` implement the usual
//!   chess geometry.
//!
//! * `GameState` combines the above. In a normal position every piece of
//!   the side to move that is not pinned may act. When a king is attacked
//!   only the king (if it can step away), pieces that can block the attack
//!   line and pieces that can take the attacker may act. Non-king moves
//!   are further limited to moves that close in on, or attack, the
//!   opposing king.

mod grid;
mod material;
mod moves;
mod play;
mod position;
mod ranges;

pub use grid::*;
pub use material::*;
pub use moves::*;
pub use play::*;
pub use position::*;
pub use ranges::*;
