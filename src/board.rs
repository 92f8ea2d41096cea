// This file is part of the chess-rules library.
// Copyright (C) 2024 The chess-rules developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! The 8x8 grid of squares.

use std::{array, cmp::Ordering};

use crate::{
    coord::{Coord, InvalidCoordError},
    piece::PieceId,
    square::Square,
};

/// An 8x8 matrix of [`Square`]s, indexed by `(rank, file)`.
///
/// The board only knows which piece handle sits where. What those pieces
/// are is owned by the [`Game`](crate::Game).
///
/// # Examples
///
/// ```
/// use chess_rules::{Board, Coord};
///
/// let board = Board::new();
/// assert!(board.is_clear_diagonal(Coord::A1, Coord::H8));
/// assert!(!board.is_clear_diagonal(Coord::A1, Coord::H7));
/// assert!(board.square_at("i9").is_err());
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Board {
    squares: [[Square; 8]; 8],
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl Board {
    /// An empty board.
    pub fn new() -> Board {
        Board {
            squares: array::from_fn(|rank| {
                array::from_fn(|file| Square::empty(Coord::new(rank as i8, file as i8)))
            }),
        }
    }

    #[inline]
    pub fn square(&self, coord: Coord) -> &Square {
        &self.squares[coord.rank() as usize][coord.file() as usize]
    }

    #[inline]
    pub(crate) fn square_mut(&mut self, coord: Coord) -> &mut Square {
        &mut self.squares[coord.rank() as usize][coord.file() as usize]
    }

    /// Looks up a square by its algebraic identifier, e.g. `"e4"`.
    pub fn square_at(&self, identifier: &str) -> Result<&Square, InvalidCoordError> {
        identifier.parse().map(|coord| self.square(coord))
    }

    /// Looks up a square by rank and file indexes.
    pub fn square_at_index(&self, rank: i8, file: i8) -> Result<&Square, InvalidCoordError> {
        Coord::from_coords(rank, file)
            .map(|coord| self.square(coord))
            .ok_or(InvalidCoordError::new())
    }

    #[inline]
    pub fn occupant(&self, coord: Coord) -> Option<PieceId> {
        self.square(coord).occupant()
    }

    #[inline]
    pub fn is_occupied(&self, coord: Coord) -> bool {
        self.square(coord).is_occupied()
    }

    /// All squares, in ascending rank then file order.
    pub fn squares(&self) -> impl Iterator<Item = &Square> {
        self.squares.iter().flatten()
    }

    /// Checks that `origin` and `target` share a rank and that nothing stands
    /// strictly between them.
    pub fn is_clear_rank(&self, origin: Coord, target: Coord) -> bool {
        origin.rank() == target.rank() && self.is_clear_line(origin, target)
    }

    /// Checks that `origin` and `target` share a file and that nothing stands
    /// strictly between them.
    pub fn is_clear_file(&self, origin: Coord, target: Coord) -> bool {
        origin.file() == target.file() && self.is_clear_line(origin, target)
    }

    /// Checks that `origin` and `target` share a diagonal and that nothing
    /// stands strictly between them.
    pub fn is_clear_diagonal(&self, origin: Coord, target: Coord) -> bool {
        (target.rank() - origin.rank()).abs() == (target.file() - origin.file()).abs()
            && self.is_clear_line(origin, target)
    }

    // Callers guarantee alignment.
    fn is_clear_line(&self, origin: Coord, target: Coord) -> bool {
        let rank_step = step(origin.rank(), target.rank());
        let file_step = step(origin.file(), target.file());

        let mut current = origin;
        while let Some(next) = current.offset(rank_step, file_step) {
            if next == target {
                break;
            }
            if self.is_occupied(next) {
                return false;
            }
            current = next;
        }
        true
    }
}

fn step(from: i8, to: i8) -> i8 {
    match to.cmp(&from) {
        Ordering::Greater => 1,
        Ordering::Less => -1,
        Ordering::Equal => 0,
    }
}
