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

use std::fmt;

use crate::{color::Color, coord::Coord, role::Role, square::Square};

/// Handle of a piece within a [`Game`](crate::Game).
///
/// Handles are only meaningful for the game that issued them. A game built
/// by [`Player::copy()`](crate::Player::copy) issues its own handles.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct PieceId(pub(crate) usize);

/// A piece in play or taken out of play.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Piece {
    color: Color,
    role: Role,
    moved: bool,
    position: Option<Coord>,
    double_step: bool,
}

impl Piece {
    pub(crate) const fn new(color: Color, role: Role, position: Option<Coord>) -> Piece {
        Piece {
            color,
            role,
            moved: false,
            position,
            double_step: false,
        }
    }

    #[inline]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub const fn role(&self) -> Role {
        self.role
    }

    #[inline]
    pub const fn has_moved(&self) -> bool {
        self.moved
    }

    /// The square this piece stands on, or `None` once captured or promoted.
    #[inline]
    pub const fn position(&self) -> Option<Coord> {
        self.position
    }

    #[inline]
    pub const fn is_on_board(&self) -> bool {
        self.position.is_some()
    }

    /// Whether this pawn's latest move was a two-rank advance. Always false
    /// for other roles.
    #[inline]
    pub const fn is_double_step(&self) -> bool {
        self.double_step
    }

    #[inline]
    pub const fn value(&self) -> u32 {
        self.role.value()
    }

    /// Gets the English letter, uppercase for white.
    pub fn char(&self) -> char {
        self.color.fold(self.role.upper_char(), self.role.char())
    }

    /// Checks the movement pattern of this piece towards `target`.
    ///
    /// Obstruction is not considered. Occupancy only matters for pawns,
    /// which capture diagonally and advance onto empty squares.
    pub fn can_move_to(&self, target: &Square) -> bool {
        self.fits_pattern(target.coord(), target.is_occupied())
    }

    /// Checks whether this piece attacks `target`, regardless of what
    /// stands there.
    pub fn can_target(&self, target: Coord) -> bool {
        match self.role {
            Role::Pawn => self.fits_pattern(target, true),
            _ => self.fits_pattern(target, false),
        }
    }

    fn fits_pattern(&self, target: Coord, occupied: bool) -> bool {
        let Some(origin) = self.position else {
            return false;
        };

        let ranks = target.rank() - origin.rank();
        let files = (target.file() - origin.file()).abs();

        match self.role {
            Role::Pawn => {
                let forward = self.color.forward();
                if occupied {
                    files == 1 && ranks == forward
                } else {
                    files == 0 && (ranks == forward || (ranks == 2 * forward && !self.moved))
                }
            }
            Role::Knight => matches!((ranks.abs(), files), (1, 2) | (2, 1)),
            Role::Bishop => is_diagonal(ranks, files),
            Role::Rook => is_straight(ranks, files),
            Role::Queen => is_straight(ranks, files) || is_diagonal(ranks, files),
            Role::King => ranks.abs() <= 1 && files <= 1,
        }
    }

    /// Clones color, role and per-piece state onto a new position.
    #[must_use]
    pub fn copy(&self, position: Option<Coord>) -> Piece {
        Piece {
            position,
            ..self.clone()
        }
    }

    pub(crate) fn set_position(&mut self, position: Option<Coord>) {
        self.position = position;
    }

    /// Records a completed relocation from `origin` to `target`.
    pub(crate) fn mark_moved(&mut self, origin: Coord, target: Coord) {
        self.moved = true;
        self.position = Some(target);
        self.double_step = self.role == Role::Pawn
            && origin.file() == target.file()
            && (target.rank() - origin.rank()).abs() == 2;
    }

    pub(crate) fn clear_double_step(&mut self) {
        self.double_step = false;
    }

    pub(crate) fn set_moved(&mut self, moved: bool) {
        self.moved = moved;
    }
}

fn is_diagonal(ranks: i8, files: i8) -> bool {
    ranks.abs() == files && files != 0
}

fn is_straight(ranks: i8, files: i8) -> bool {
    (ranks == 0) != (files == 0)
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.role)?;
        if let Some(position) = self.position {
            write!(f, " at {position}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(color: Color, role: Role, coord: Coord) -> Piece {
        Piece::new(color, role, Some(coord))
    }

    fn targets(piece: &Piece) -> Vec<Coord> {
        Coord::all()
            .filter(|&coord| piece.can_move_to(&Square::empty(coord)))
            .collect()
    }

    #[test]
    fn test_knight() {
        let knight = at(Color::White, Role::Knight, Coord::B1);
        assert_eq!(targets(&knight), vec![Coord::D2, Coord::A3, Coord::C3]);
    }

    #[test]
    fn test_bishop_and_rook() {
        let bishop = at(Color::Black, Role::Bishop, Coord::D4);
        assert_eq!(targets(&bishop).len(), 13);
        assert!(!bishop.can_target(Coord::D4));

        let rook = at(Color::White, Role::Rook, Coord::D4);
        assert_eq!(targets(&rook).len(), 14);
        assert!(!rook.can_target(Coord::D4));
        assert!(!rook.can_target(Coord::E5));
    }

    #[test]
    fn test_queen_and_king() {
        let queen = at(Color::White, Role::Queen, Coord::D4);
        assert_eq!(targets(&queen).len(), 27);

        let king = at(Color::Black, Role::King, Coord::A8);
        assert!(king.can_target(Coord::B7));
        assert!(king.can_target(Coord::A7));
        assert!(!king.can_target(Coord::C8));
    }

    #[test]
    fn test_pawn_advance() {
        let pawn = at(Color::White, Role::Pawn, Coord::E2);
        assert_eq!(targets(&pawn), vec![Coord::E3, Coord::E4]);

        let mut moved = pawn.copy(Some(Coord::E3));
        moved.mark_moved(Coord::E2, Coord::E3);
        assert!(!moved.is_double_step());
        assert_eq!(targets(&moved), vec![Coord::E4]);

        let black = at(Color::Black, Role::Pawn, Coord::D7);
        assert_eq!(targets(&black), vec![Coord::D5, Coord::D6]);
    }

    #[test]
    fn test_pawn_capture_needs_occupant() {
        let pawn = at(Color::White, Role::Pawn, Coord::E4);
        let mut d5 = Square::empty(Coord::D5);
        assert!(!pawn.can_move_to(&d5));
        d5.set_occupant(Some(PieceId(0)));
        assert!(pawn.can_move_to(&d5));

        let mut e5 = Square::empty(Coord::E5);
        e5.set_occupant(Some(PieceId(0)));
        assert!(!pawn.can_move_to(&e5));
    }

    #[test]
    fn test_pawn_targets_diagonals_only() {
        let pawn = at(Color::Black, Role::Pawn, Coord::E5);
        assert!(pawn.can_target(Coord::D4));
        assert!(pawn.can_target(Coord::F4));
        assert!(!pawn.can_target(Coord::E4));
        assert!(!pawn.can_target(Coord::D6));
    }

    #[test]
    fn test_off_board_piece_has_no_moves() {
        let taken = Piece::new(Color::White, Role::Queen, None);
        assert!(targets(&taken).is_empty());
        assert!(!taken.can_target(Coord::A1));
    }

    #[test]
    fn test_copy_keeps_state() {
        let mut pawn = at(Color::White, Role::Pawn, Coord::C2);
        pawn.mark_moved(Coord::C2, Coord::C4);
        let copy = pawn.copy(Some(Coord::C4));
        assert!(copy.has_moved());
        assert!(copy.is_double_step());
        assert_eq!(copy.position(), Some(Coord::C4));
        assert_eq!(copy.color(), Color::White);
    }
}
