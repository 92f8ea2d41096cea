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

use crate::{coord::Coord, piece::PieceId};

/// A cell of the board: fixed coordinates and at most one occupant.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Square {
    coord: Coord,
    occupant: Option<PieceId>,
}

impl Square {
    pub(crate) const fn empty(coord: Coord) -> Square {
        Square {
            coord,
            occupant: None,
        }
    }

    #[inline]
    pub const fn coord(&self) -> Coord {
        self.coord
    }

    #[inline]
    pub const fn rank(&self) -> i8 {
        self.coord.rank()
    }

    #[inline]
    pub const fn file(&self) -> i8 {
        self.coord.file()
    }

    /// The algebraic identifier, e.g. `"e4"`.
    pub fn identifier(&self) -> String {
        self.coord.to_string()
    }

    #[inline]
    pub const fn occupant(&self) -> Option<PieceId> {
        self.occupant
    }

    #[inline]
    pub const fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    #[inline]
    pub(crate) fn set_occupant(&mut self, occupant: Option<PieceId>) {
        self.occupant = occupant;
    }

    /// Clears and returns the occupant.
    #[inline]
    pub(crate) fn take_occupant(&mut self) -> Option<PieceId> {
        self.occupant.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occupant() {
        let mut square = Square::empty(Coord::E4);
        assert!(!square.is_occupied());
        assert_eq!(square.identifier(), "e4");
        assert_eq!((square.rank(), square.file()), (3, 4));

        square.set_occupant(Some(PieceId(3)));
        assert_eq!(square.occupant(), Some(PieceId(3)));
        assert_eq!(square.take_occupant(), Some(PieceId(3)));
        assert!(!square.is_occupied());
    }
}
