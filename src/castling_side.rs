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

use std::ops;

use crate::{color::Color, coord::Coord};

/// `KingSide` (O-O) or `QueenSide` (O-O-O).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum CastlingSide {
    KingSide = 0,
    QueenSide = 1,
}

impl CastlingSide {
    #[inline]
    pub const fn is_queen_side(self) -> bool {
        matches!(self, CastlingSide::QueenSide)
    }

    #[inline]
    pub const fn is_king_side(self) -> bool {
        !self.is_queen_side()
    }

    #[inline]
    pub const fn from_king_side(king_side: bool) -> CastlingSide {
        if king_side {
            CastlingSide::KingSide
        } else {
            CastlingSide::QueenSide
        }
    }

    /// File of the rook before castling.
    pub const fn rook_from_file(self) -> i8 {
        match self {
            CastlingSide::KingSide => 7,
            CastlingSide::QueenSide => 0,
        }
    }

    pub const fn king_to_file(self) -> i8 {
        match self {
            CastlingSide::KingSide => 6,
            CastlingSide::QueenSide => 2,
        }
    }

    pub const fn rook_to_file(self) -> i8 {
        match self {
            CastlingSide::KingSide => 5,
            CastlingSide::QueenSide => 3,
        }
    }

    pub const fn rook_from(self, color: Color) -> Coord {
        Coord::new(color.backrank(), self.rook_from_file())
    }

    pub const fn king_to(self, color: Color) -> Coord {
        Coord::new(color.backrank(), self.king_to_file())
    }

    pub const fn rook_to(self, color: Color) -> Coord {
        Coord::new(color.backrank(), self.rook_to_file())
    }

    /// The side whose castling move takes the king of `color` to `target`.
    pub fn from_king_to(color: Color, target: Coord) -> Option<CastlingSide> {
        CastlingSide::ALL
            .into_iter()
            .find(|side| side.king_to(color) == target)
    }

    /// `KingSide` and `QueenSide`, in this order.
    pub const ALL: [CastlingSide; 2] = [CastlingSide::KingSide, CastlingSide::QueenSide];
}

/// Container with values for each [`CastlingSide`].
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug, Hash)]
pub struct ByCastlingSide<T> {
    pub king_side: T,
    pub queen_side: T,
}

impl<T> ByCastlingSide<T> {
    #[inline]
    pub fn new_with<F>(mut init: F) -> ByCastlingSide<T>
    where
        F: FnMut(CastlingSide) -> T,
    {
        ByCastlingSide {
            king_side: init(CastlingSide::KingSide),
            queen_side: init(CastlingSide::QueenSide),
        }
    }

    #[inline]
    pub const fn get(&self, side: CastlingSide) -> &T {
        match side {
            CastlingSide::KingSide => &self.king_side,
            CastlingSide::QueenSide => &self.queen_side,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, side: CastlingSide) -> &mut T {
        match side {
            CastlingSide::KingSide => &mut self.king_side,
            CastlingSide::QueenSide => &mut self.queen_side,
        }
    }

    #[inline]
    pub fn map<U, F>(self, mut f: F) -> ByCastlingSide<U>
    where
        F: FnMut(T) -> U,
    {
        ByCastlingSide {
            king_side: f(self.king_side),
            queen_side: f(self.queen_side),
        }
    }
}

impl<T> ops::Index<CastlingSide> for ByCastlingSide<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: CastlingSide) -> &T {
        self.get(index)
    }
}

impl<T> ops::IndexMut<CastlingSide> for ByCastlingSide<T> {
    #[inline]
    fn index_mut(&mut self, index: CastlingSide) -> &mut T {
        self.get_mut(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_castling_squares() {
        assert_eq!(CastlingSide::KingSide.king_to(Color::White), Coord::G1);
        assert_eq!(CastlingSide::KingSide.rook_to(Color::White), Coord::F1);
        assert_eq!(CastlingSide::QueenSide.king_to(Color::Black), Coord::C8);
        assert_eq!(CastlingSide::QueenSide.rook_to(Color::Black), Coord::D8);
        assert_eq!(CastlingSide::QueenSide.rook_from(Color::Black), Coord::A8);
        assert_eq!(CastlingSide::KingSide.rook_from(Color::White), Coord::H1);
    }

    #[test]
    fn test_from_king_to() {
        assert_eq!(
            CastlingSide::from_king_to(Color::White, Coord::G1),
            Some(CastlingSide::KingSide)
        );
        assert_eq!(
            CastlingSide::from_king_to(Color::Black, Coord::C8),
            Some(CastlingSide::QueenSide)
        );
        assert_eq!(CastlingSide::from_king_to(Color::White, Coord::G8), None);
        assert_eq!(CastlingSide::from_king_to(Color::White, Coord::E1), None);
    }
}
