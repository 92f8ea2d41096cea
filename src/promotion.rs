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

use crate::{color::Color, coord::Coord, role::Role};

/// Decides what a promoting pawn becomes.
///
/// [`Player::pawn_promotion()`](crate::Player::pawn_promotion) keeps asking
/// until it gets one of [`Role::PROMOTIONS`]. Answering `None`, `Pawn` or
/// `King` means the answer was not understood and the question is asked
/// again, so an implementation must eventually give a valid role.
///
/// # Examples
///
/// Read the answer from some external source:
///
/// ```
/// use chess_rules::{Color, Coord, PromotionChoice, Role};
///
/// let mut answers = vec!["queen", "castle"];
/// let mut chooser = |_color: Color, _at: Coord| answers.pop()?.parse::<Role>().ok();
///
/// assert_eq!(chooser.choose(Color::White, Coord::E8), None);
/// assert_eq!(chooser.choose(Color::White, Coord::E8), Some(Role::Queen));
/// ```
pub trait PromotionChoice {
    fn choose(&mut self, color: Color, at: Coord) -> Option<Role>;
}

/// Always the same answer.
impl PromotionChoice for Role {
    fn choose(&mut self, _color: Color, _at: Coord) -> Option<Role> {
        Some(*self)
    }
}

impl<F> PromotionChoice for F
where
    F: FnMut(Color, Coord) -> Option<Role>,
{
    fn choose(&mut self, color: Color, at: Coord) -> Option<Role> {
        self(color, at)
    }
}
