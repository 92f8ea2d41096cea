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

use std::{error::Error, fmt};

use bitflags::bitflags;

use crate::{color::Color, coord::Coord, role::Role, square_set::SquareSet};

/// Most pieces a single side can field.
pub const MAX_PIECES: usize = 16;

/// A piece to be placed when a game is set up.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Placement {
    pub color: Color,
    pub role: Role,
    pub coord: Coord,
    /// Whether the piece counts as having moved already. Matters for
    /// castling and pawn double steps.
    pub moved: bool,
}

/// An explicit piece list, not yet validated.
///
/// # Examples
///
/// ```
/// use chess_rules::{Color, Coord, Game, Role, Setup};
///
/// let mut setup = Setup::empty();
/// setup
///     .place(Color::White, Role::King, Coord::G1)
///     .place(Color::White, Role::Rook, Coord::A1)
///     .place(Color::Black, Role::King, Coord::G8);
///
/// let game = Game::from_setup(&setup)?;
/// assert_eq!(game.pieces(Color::White).count(), 2);
/// # Ok::<_, chess_rules::SetupError>(())
/// ```
#[derive(Clone, Default, Eq, PartialEq, Debug, Hash)]
pub struct Setup {
    placements: Vec<Placement>,
}

impl Setup {
    pub fn empty() -> Setup {
        Setup::default()
    }

    /// The standard starting layout.
    ///
    /// For each color the king comes first, followed by the queen, the
    /// bishops, knights and rooks (kingside before queenside) and the pawns
    /// from the a-file to the h-file.
    pub fn standard() -> Setup {
        let mut setup = Setup::empty();
        for color in Color::ALL {
            let backrank = color.backrank();
            for (role, file) in [
                (Role::King, 4),
                (Role::Queen, 3),
                (Role::Bishop, 5),
                (Role::Bishop, 2),
                (Role::Knight, 6),
                (Role::Knight, 1),
                (Role::Rook, 7),
                (Role::Rook, 0),
            ] {
                setup.place(color, role, Coord::new(backrank, file));
            }
            for file in 0..8 {
                setup.place(color, Role::Pawn, Coord::new(color.pawn_rank(), file));
            }
        }
        setup
    }

    pub fn place(&mut self, color: Color, role: Role, coord: Coord) -> &mut Setup {
        self.placements.push(Placement {
            color,
            role,
            coord,
            moved: false,
        });
        self
    }

    /// Places a piece that counts as having moved already.
    pub fn place_moved(&mut self, color: Color, role: Role, coord: Coord) -> &mut Setup {
        self.placements.push(Placement {
            color,
            role,
            coord,
            moved: true,
        });
        self
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub(crate) fn validate(&self) -> Result<(), SetupError> {
        let mut kinds = SetupErrorKinds::empty();

        let mut occupied = SquareSet::EMPTY;
        for placement in &self.placements {
            if occupied.contains(placement.coord) {
                kinds |= SetupErrorKinds::OVERLAPPING_PIECES;
            }
            occupied.add(placement.coord);
        }

        for color in Color::ALL {
            let own = || self.placements.iter().filter(move |p| p.color == color);
            match own().filter(|p| p.role == Role::King).count() {
                0 => kinds |= SetupErrorKinds::MISSING_KING,
                1 => (),
                _ => kinds |= SetupErrorKinds::TOO_MANY_KINGS,
            }
            if own().count() > MAX_PIECES {
                kinds |= SetupErrorKinds::TOO_MANY_PIECES;
            }
        }

        if kinds.is_empty() {
            Ok(())
        } else {
            Err(SetupError { kinds })
        }
    }
}

bitflags! {
    /// Reasons for a [`Setup`] to be rejected.
    #[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
    pub struct SetupErrorKinds: u32 {
        /// A side has no king.
        const MISSING_KING = 1 << 0;
        /// A side has more than one king.
        const TOO_MANY_KINGS = 1 << 1;
        /// Two pieces were placed on the same square.
        const OVERLAPPING_PIECES = 1 << 2;
        /// A side has more than 16 pieces.
        const TOO_MANY_PIECES = 1 << 3;
    }
}

/// Error when a [`Setup`] is not a valid game.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SetupError {
    kinds: SetupErrorKinds,
}

impl SetupError {
    /// Every reason the setup was rejected.
    pub const fn kinds(&self) -> SetupErrorKinds {
        self.kinds
    }
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reasons = [
            (SetupErrorKinds::MISSING_KING, "missing king"),
            (SetupErrorKinds::TOO_MANY_KINGS, "too many kings"),
            (SetupErrorKinds::OVERLAPPING_PIECES, "overlapping pieces"),
            (SetupErrorKinds::TOO_MANY_PIECES, "too many pieces"),
        ];

        f.write_str("illegal setup: ")?;
        let mut first = true;
        for (kind, reason) in reasons {
            if self.kinds.contains(kind) {
                if !first {
                    f.write_str(", ")?;
                }
                f.write_str(reason)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl Error for SetupError {}
