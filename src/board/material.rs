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
use std::ops::Not;
use strum_macros::Display;
use strum_macros::EnumIter;

use super::position::{Offset, Position};

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Player {
    A,
    B,
}

use Player::{A, B};

impl Player {
    /// Direction a pawn of this side advances in. Side `A` starts on the
    /// high rows and moves towards row 0.
    #[inline]
    pub const fn forward(&self) -> isize {
        match self {
            A => -1,
            B => 1,
        }
    }
}

impl Not for Player {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        match self {
            A => B,
            B => A,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}
use PieceKind::{King, Pawn};

impl PieceKind {
    pub fn is_king(&self) -> bool {
        matches!(*self, King)
    }
    pub fn is_pawn(&self) -> bool {
        matches!(*self, Pawn)
    }
}

/// Visual attribute carried for front ends; the rules never read it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash, Default)]
pub struct Image(String);

impl Image {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
    pub fn name(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    owner: Player,
    position: Position,
    image: Image,
}

impl Piece {
    #[inline]
    pub fn new(kind: PieceKind, owner: Player, position: Position) -> Self {
        Self {
            kind,
            owner,
            position,
            image: Image::default(),
        }
    }

    pub fn with_image(mut self, image: Image) -> Self {
        self.image = image;
        self
    }

    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }
    #[inline]
    pub fn owner(&self) -> Player {
        self.owner
    }
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }
    #[inline]
    pub fn image(&self) -> &Image {
        &self.image
    }
    #[inline]
    pub fn is_king(&self) -> bool {
        self.kind.is_king()
    }

    /// Only the board moves pieces, so the stored position and the cell
    /// holding the piece never disagree.
    #[inline]
    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// One step towards the opponent's side, for pawns.
    #[inline]
    pub(crate) fn forward(&self) -> Offset {
        Offset::new(self.owner.forward(), 0)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] at {}", self.kind, self.owner, self.position)
    }
}
