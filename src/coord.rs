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

use std::{error::Error, fmt, str::FromStr};

/// Error when a square identifier or index is outside the board.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvalidCoordError {
    _priv: (),
}

impl InvalidCoordError {
    pub(crate) const fn new() -> InvalidCoordError {
        InvalidCoordError { _priv: () }
    }
}

impl fmt::Display for InvalidCoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid square coordinate")
    }
}

impl Error for InvalidCoordError {}

/// The coordinates of a square, packed as `file | rank << 3`.
///
/// Ranks and files are both indexed from 0 to 7. Rank 0 is the rank white
/// starts on, file 0 is the a-file.
///
/// # Examples
///
/// ```
/// use chess_rules::Coord;
///
/// let e4: Coord = "e4".parse()?;
/// assert_eq!(e4, Coord::E4);
/// assert_eq!((e4.rank(), e4.file()), (3, 4));
/// assert_eq!(e4.to_string(), "e4");
/// # Ok::<_, chess_rules::InvalidCoordError>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Coord(u8);

impl Coord {
    /// Packs a rank and file that are known to be in range.
    ///
    /// # Panics
    ///
    /// Panics if either index is outside `0..8`.
    #[inline]
    pub const fn new(rank: i8, file: i8) -> Coord {
        assert!(0 <= rank && rank < 8 && 0 <= file && file < 8);
        Coord((file | (rank << 3)) as u8)
    }

    #[inline]
    pub const fn from_coords(rank: i8, file: i8) -> Option<Coord> {
        if 0 <= rank && rank < 8 && 0 <= file && file < 8 {
            Some(Coord::new(rank, file))
        } else {
            None
        }
    }

    /// Parses an algebraic identifier such as `e4`.
    pub fn from_ascii(s: &[u8]) -> Result<Coord, InvalidCoordError> {
        match *s {
            [file @ b'a'..=b'h', rank @ b'1'..=b'8'] => Ok(Coord::new(
                (rank - b'1') as i8,
                (file - b'a') as i8,
            )),
            _ => Err(InvalidCoordError::new()),
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn rank(self) -> i8 {
        (self.0 >> 3) as i8
    }

    #[inline]
    pub const fn file(self) -> i8 {
        (self.0 & 7) as i8
    }

    /// Moves by the given rank and file deltas, if the result stays on the
    /// board.
    #[inline]
    pub const fn offset(self, ranks: i8, files: i8) -> Option<Coord> {
        Coord::from_coords(self.rank() + ranks, self.file() + files)
    }

    pub fn file_char(self) -> char {
        char::from(b'a' + self.0 % 8)
    }

    pub fn rank_char(self) -> char {
        char::from(b'1' + self.0 / 8)
    }

    /// All 64 coordinates, in ascending rank then file order.
    pub fn all() -> impl DoubleEndedIterator<Item = Coord> + ExactSizeIterator {
        (0..64u8).map(Coord)
    }

    pub const A1: Coord = Coord::new(0, 0);
    pub const B1: Coord = Coord::new(0, 1);
    pub const C1: Coord = Coord::new(0, 2);
    pub const D1: Coord = Coord::new(0, 3);
    pub const E1: Coord = Coord::new(0, 4);
    pub const F1: Coord = Coord::new(0, 5);
    pub const G1: Coord = Coord::new(0, 6);
    pub const H1: Coord = Coord::new(0, 7);
    pub const A2: Coord = Coord::new(1, 0);
    pub const B2: Coord = Coord::new(1, 1);
    pub const C2: Coord = Coord::new(1, 2);
    pub const D2: Coord = Coord::new(1, 3);
    pub const E2: Coord = Coord::new(1, 4);
    pub const F2: Coord = Coord::new(1, 5);
    pub const G2: Coord = Coord::new(1, 6);
    pub const H2: Coord = Coord::new(1, 7);
    pub const A3: Coord = Coord::new(2, 0);
    pub const B3: Coord = Coord::new(2, 1);
    pub const C3: Coord = Coord::new(2, 2);
    pub const D3: Coord = Coord::new(2, 3);
    pub const E3: Coord = Coord::new(2, 4);
    pub const F3: Coord = Coord::new(2, 5);
    pub const G3: Coord = Coord::new(2, 6);
    pub const H3: Coord = Coord::new(2, 7);
    pub const A4: Coord = Coord::new(3, 0);
    pub const B4: Coord = Coord::new(3, 1);
    pub const C4: Coord = Coord::new(3, 2);
    pub const D4: Coord = Coord::new(3, 3);
    pub const E4: Coord = Coord::new(3, 4);
    pub const F4: Coord = Coord::new(3, 5);
    pub const G4: Coord = Coord::new(3, 6);
    pub const H4: Coord = Coord::new(3, 7);
    pub const A5: Coord = Coord::new(4, 0);
    pub const B5: Coord = Coord::new(4, 1);
    pub const C5: Coord = Coord::new(4, 2);
    pub const D5: Coord = Coord::new(4, 3);
    pub const E5: Coord = Coord::new(4, 4);
    pub const F5: Coord = Coord::new(4, 5);
    pub const G5: Coord = Coord::new(4, 6);
    pub const H5: Coord = Coord::new(4, 7);
    pub const A6: Coord = Coord::new(5, 0);
    pub const B6: Coord = Coord::new(5, 1);
    pub const C6: Coord = Coord::new(5, 2);
    pub const D6: Coord = Coord::new(5, 3);
    pub const E6: Coord = Coord::new(5, 4);
    pub const F6: Coord = Coord::new(5, 5);
    pub const G6: Coord = Coord::new(5, 6);
    pub const H6: Coord = Coord::new(5, 7);
    pub const A7: Coord = Coord::new(6, 0);
    pub const B7: Coord = Coord::new(6, 1);
    pub const C7: Coord = Coord::new(6, 2);
    pub const D7: Coord = Coord::new(6, 3);
    pub const E7: Coord = Coord::new(6, 4);
    pub const F7: Coord = Coord::new(6, 5);
    pub const G7: Coord = Coord::new(6, 6);
    pub const H7: Coord = Coord::new(6, 7);
    pub const A8: Coord = Coord::new(7, 0);
    pub const B8: Coord = Coord::new(7, 1);
    pub const C8: Coord = Coord::new(7, 2);
    pub const D8: Coord = Coord::new(7, 3);
    pub const E8: Coord = Coord::new(7, 4);
    pub const F8: Coord = Coord::new(7, 5);
    pub const G8: Coord = Coord::new(7, 6);
    pub const H8: Coord = Coord::new(7, 7);
}

impl FromStr for Coord {
    type Err = InvalidCoordError;

    fn from_str(s: &str) -> Result<Coord, InvalidCoordError> {
        Coord::from_ascii(s.as_bytes())
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            self.file_char().to_ascii_uppercase(),
            self.rank_char()
        )
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Coord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Coord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct CoordVisitor;

        impl serde::de::Visitor<'_> for CoordVisitor {
            type Value = Coord;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("square identifier")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(CoordVisitor)
    }
}
