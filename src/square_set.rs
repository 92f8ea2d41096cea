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

//! Ordered sets of squares.

use std::{
    fmt::{self, Write as _},
    iter::FromIterator,
    ops,
};

use crate::coord::Coord;

/// A set of coordinates, one bit per square.
///
/// Iteration yields coordinates in ascending order: rank first, then file
/// (`a1`, `b1`, ..., `h1`, `a2`, ...).
///
/// # Examples
///
/// ```
/// use chess_rules::{Coord, SquareSet};
///
/// let set: SquareSet = [Coord::E4, Coord::A1].into_iter().collect();
/// assert_eq!(set.len(), 2);
/// assert!(set.contains(Coord::E4));
/// assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![Coord::A1, Coord::E4]);
/// ```
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct SquareSet(u64);

impl SquareSet {
    pub const EMPTY: SquareSet = SquareSet(0);

    #[inline]
    pub const fn from_coord(coord: Coord) -> SquareSet {
        SquareSet(1 << coord.index())
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn contains(self, coord: Coord) -> bool {
        self.0 & (1 << coord.index()) != 0
    }

    #[inline]
    pub fn add(&mut self, coord: Coord) {
        self.0 |= 1 << coord.index();
    }

    #[inline]
    pub fn remove(&mut self, coord: Coord) {
        self.0 &= !(1 << coord.index());
    }

    #[inline]
    #[must_use]
    pub const fn with(self, coord: Coord) -> SquareSet {
        SquareSet(self.0 | (1 << coord.index()))
    }

    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn first(self) -> Option<Coord> {
        self.nth_bit(self.0.trailing_zeros())
    }

    fn nth_bit(self, bit: u32) -> Option<Coord> {
        if self.is_empty() {
            None
        } else {
            Coord::from_coords((bit >> 3) as i8, (bit & 7) as i8)
        }
    }

    pub fn iter(self) -> SquareSetIter {
        SquareSetIter(self.0)
    }
}

impl fmt::Debug for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                f.write_char(if self.contains(Coord::new(rank, file)) {
                    '1'
                } else {
                    '.'
                })?;
                f.write_char(if file < 7 { ' ' } else { '\n' })?;
            }
        }
        Ok(())
    }
}

impl ops::BitOr for SquareSet {
    type Output = SquareSet;

    #[inline]
    fn bitor(self, rhs: SquareSet) -> SquareSet {
        SquareSet(self.0 | rhs.0)
    }
}

impl ops::BitAnd for SquareSet {
    type Output = SquareSet;

    #[inline]
    fn bitand(self, rhs: SquareSet) -> SquareSet {
        SquareSet(self.0 & rhs.0)
    }
}

impl FromIterator<Coord> for SquareSet {
    fn from_iter<I>(iter: I) -> SquareSet
    where
        I: IntoIterator<Item = Coord>,
    {
        let mut result = SquareSet::EMPTY;
        for coord in iter {
            result.add(coord);
        }
        result
    }
}

impl Extend<Coord> for SquareSet {
    fn extend<I: IntoIterator<Item = Coord>>(&mut self, iter: I) {
        for coord in iter {
            self.add(coord);
        }
    }
}

impl IntoIterator for SquareSet {
    type Item = Coord;
    type IntoIter = SquareSetIter;

    #[inline]
    fn into_iter(self) -> SquareSetIter {
        self.iter()
    }
}

/// Iterator over the coordinates of a [`SquareSet`].
#[derive(Debug, Clone)]
pub struct SquareSetIter(u64);

impl Iterator for SquareSetIter {
    type Item = Coord;

    #[inline]
    fn next(&mut self) -> Option<Coord> {
        let coord = SquareSet(self.0).first();
        self.0 &= self.0.wrapping_sub(1);
        coord
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for SquareSetIter {}

impl DoubleEndedIterator for SquareSetIter {
    fn next_back(&mut self) -> Option<Coord> {
        let coord = SquareSet(self.0).nth_bit(63 ^ self.0.leading_zeros());
        if let Some(coord) = coord {
            self.0 &= !(1 << coord.index());
        }
        coord
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first() {
        assert_eq!(SquareSet::from_coord(Coord::A1).first(), Some(Coord::A1));
        assert_eq!(SquareSet::from_coord(Coord::D2).first(), Some(Coord::D2));
        assert_eq!(SquareSet::EMPTY.first(), None);
    }

    #[test]
    fn test_ordered_iteration() {
        let set = SquareSet::EMPTY
            .with(Coord::H8)
            .with(Coord::A2)
            .with(Coord::H1);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Coord::H1, Coord::A2, Coord::H8]
        );
        assert_eq!(set.iter().next_back(), Some(Coord::H8));
        assert_eq!(set.iter().len(), 3);
    }

    #[test]
    fn test_add_remove() {
        let mut set = SquareSet::default();
        set.add(Coord::E4);
        set.add(Coord::E4);
        assert_eq!(set.len(), 1);
        set.remove(Coord::E4);
        assert!(set.is_empty());
    }
}
