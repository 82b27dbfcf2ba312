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
use std::ops::{Add, Sub};
use strum_macros::EnumIter;

/// A cell coordinate. Rows grow downwards, columns grow to the right.
#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
pub struct Position {
    row: usize,
    col: usize,
}

impl Position {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
    #[inline]
    pub const fn row(&self) -> usize {
        self.row
    }
    #[inline]
    pub const fn col(&self) -> usize {
        self.col
    }

    pub fn distance_to(&self, other: Position) -> f64 {
        let dr = self.row as f64 - other.row as f64;
        let dc = self.col as f64 - other.col as f64;
        (dr * dr + dc * dc).sqrt()
    }

    /// Cells strictly between `self` and `to` on a shared rank, file or
    /// diagonal, ordered from `self` outwards. Empty for adjacent or
    /// non-aligned pairs.
    pub fn between(&self, to: Position) -> Vec<Position> {
        let mut result = Vec::new();
        if let Some(step) = (to - *self).to_unit() {
            let mut next = *self + step;
            while let Some(pos) = next {
                if pos == to {
                    break;
                }
                result.push(pos);
                next = pos + step;
            }
        }
        result
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub rows: isize,
    pub cols: isize,
}

impl Offset {
    pub const fn new(rows: isize, cols: isize) -> Self {
        Self { rows, cols }
    }

    pub fn to_unit(self) -> Option<Self> {
        let (rows, cols) = match (self.rows, self.cols) {
            (0, 0) => return None,
            (r, c) if r == 0 || c == 0 || r.abs() == c.abs() => (r.signum(), c.signum()),
            _ => return None,
        };
        Some(Self { rows, cols })
    }
}

impl Add<Offset> for Position {
    type Output = Option<Position>;
    fn add(self, rhs: Offset) -> Self::Output {
        let row = self.row.checked_add_signed(rhs.rows)?;
        let col = self.col.checked_add_signed(rhs.cols)?;
        Some(Position::new(row, col))
    }
}

impl Sub for Position {
    type Output = Offset;
    fn sub(self, rhs: Self) -> Self::Output {
        Offset::new(
            self.row as isize - rhs.row as isize,
            self.col as isize - rhs.col as isize,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Direction {
    UpLeft,
    Up,
    UpRight,
    Left,
    Right,
    DownLeft,
    Down,
    DownRight,
}

use Direction::*;

impl Direction {
    pub fn horizontals() -> impl Iterator<Item = Self> {
        [Up, Left, Right, Down].into_iter()
    }
    pub fn diagonals() -> impl Iterator<Item = Self> {
        [UpLeft, UpRight, DownLeft, DownRight].into_iter()
    }
}

impl From<Direction> for Offset {
    fn from(value: Direction) -> Self {
        match value {
            UpLeft => Self::new(-1, -1),
            Up => Self::new(-1, 0),
            UpRight => Self::new(-1, 1),
            Left => Self::new(0, -1),
            Right => Self::new(0, 1),
            DownLeft => Self::new(1, -1),
            Down => Self::new(1, 0),
            DownRight => Self::new(1, 1),
        }
    }
}

impl Add<Direction> for Position {
    type Output = Option<Position>;
    fn add(self, rhs: Direction) -> Self::Output {
        let offset: Offset = rhs.into();
        self + offset
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_between_diagonal() {
        assert_eq!(pos(0, 0).between(pos(3, 3)), vec![pos(1, 1), pos(2, 2)]);
    }
    #[test]
    fn test_between_horizontal() {
        assert_eq!(pos(0, 0).between(pos(0, 3)), vec![pos(0, 1), pos(0, 2)]);
    }
    #[test]
    fn test_between_adjacent_is_empty() {
        assert!(pos(0, 0).between(pos(1, 1)).is_empty());
        assert!(pos(2, 2).between(pos(2, 3)).is_empty());
    }
    #[test]
    fn test_between_walks_from_origin() {
        assert_eq!(pos(4, 4).between(pos(4, 0)), vec![pos(4, 3), pos(4, 2), pos(4, 1)]);
        assert_eq!(pos(3, 0).between(pos(0, 3)), vec![pos(2, 1), pos(1, 2)]);
    }
    #[test]
    fn test_between_not_aligned() {
        assert!(pos(0, 0).between(pos(1, 2)).is_empty());
        assert!(pos(2, 2).between(pos(2, 2)).is_empty());
    }
    #[test]
    fn test_distance() {
        assert_eq!(pos(0, 0).distance_to(pos(3, 4)), 5.0);
        assert_eq!(pos(1, 1).distance_to(pos(1, 1)), 0.0);
    }
    #[test]
    fn test_add_direction_below_zero() {
        assert_eq!(pos(0, 0) + Direction::Up, None);
        assert_eq!(pos(0, 0) + Direction::DownRight, Some(pos(1, 1)));
    }
}
