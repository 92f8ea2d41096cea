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

use arrayvec::ArrayVec;
use tracing::debug;

use crate::{
    board::Board,
    castling_side::{ByCastlingSide, CastlingSide},
    color::{ByColor, Color},
    coord::Coord,
    piece::{Piece, PieceId},
    player::Player,
    role::Role,
    setup::{Placement, Setup, SetupError, MAX_PIECES},
};

pub(crate) type Roster = ArrayVec<PieceId, MAX_PIECES>;

/// Everything one player owns besides the pieces themselves.
#[derive(Clone, Debug)]
pub(crate) struct Side {
    pub roster: Roster,
    pub king: PieceId,
    pub rooks: ByCastlingSide<Option<PieceId>>,
    pub double_step: bool,
}

/// A board, every piece that was ever on it, and both sides.
///
/// Squares refer to pieces and pieces to squares by index, so the whole game
/// is plain data. Play happens through a [`Player`] view:
///
/// ```
/// use chess_rules::{Color, Coord, Game};
///
/// let mut game = Game::new();
/// assert!(game.white().make_move(Coord::E2, Coord::E4));
/// assert!(game.black().make_move(Coord::E7, Coord::E5));
/// assert!(!game.player(Color::White).is_in_check());
/// ```
#[derive(Debug)]
pub struct Game {
    board: Board,
    pieces: Vec<Piece>,
    sides: ByColor<Side>,
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}

impl Clone for Game {
    fn clone(&self) -> Game {
        self.copy()
    }
}

impl Game {
    /// A game in the standard starting position.
    pub fn new() -> Game {
        Game::build(Setup::standard().placements())
    }

    /// Builds a game from an explicit piece list.
    ///
    /// # Errors
    ///
    /// Fails if a side does not have exactly one king, if two pieces share a
    /// square or if a side has more than 16 pieces.
    pub fn from_setup(setup: &Setup) -> Result<Game, SetupError> {
        setup.validate()?;
        Ok(Game::build(setup.placements()))
    }

    // Placements must have been validated.
    fn build(placements: &[Placement]) -> Game {
        let mut board = Board::new();
        let mut pieces = Vec::with_capacity(placements.len());
        let mut sides = ByColor::new_with(|_| Side {
            roster: Roster::new(),
            king: PieceId(0),
            rooks: ByCastlingSide::default(),
            double_step: false,
        });

        // Kings first, so each roster starts with its king.
        let (kings, others): (Vec<&Placement>, Vec<&Placement>) =
            placements.iter().partition(|p| p.role == Role::King);

        for placement in kings.into_iter().chain(others) {
            let id = PieceId(pieces.len());
            let mut piece = Piece::new(placement.color, placement.role, Some(placement.coord));
            piece.set_moved(placement.moved);
            pieces.push(piece);
            board.square_mut(placement.coord).set_occupant(Some(id));

            let side = &mut sides[placement.color];
            side.roster.push(id);
            if placement.role == Role::King {
                side.king = id;
            } else if placement.role == Role::Rook {
                if let Some(castling_side) = CastlingSide::ALL
                    .into_iter()
                    .find(|cs| cs.rook_from(placement.color) == placement.coord)
                {
                    side.rooks[castling_side] = Some(id);
                }
            }
        }

        Game {
            board,
            pieces,
            sides,
        }
    }

    /// Deep clone: a fresh board and fresh pieces for both sides.
    ///
    /// Only pieces still reachable from a roster (and each king) are cloned,
    /// so handles of the copy may differ from the handles of this game.
    pub fn copy(&self) -> Game {
        // First pass: clone the pieces and remember their new handles.
        let mut pieces = Vec::with_capacity(MAX_PIECES * 2);
        let mut remap = vec![None; self.pieces.len()];
        for side in self.sides.iter() {
            let own = std::iter::once(side.king).chain(side.roster.iter().copied());
            for id in own {
                if remap[id.0].is_none() {
                    remap[id.0] = Some(PieceId(pieces.len()));
                    let piece = self.piece(id);
                    pieces.push(piece.copy(piece.position()));
                }
            }
        }

        // Second pass: resolve every link within the new arena.
        let resolve = |id: PieceId| remap[id.0].unwrap_or(id);
        let mut board = Board::new();
        for (old, new) in remap.iter().enumerate() {
            if let Some(new) = *new {
                if let Some(position) = self.pieces[old].position() {
                    board.square_mut(position).set_occupant(Some(new));
                }
            }
        }
        let sides = self.sides.as_ref().map(|side| Side {
            roster: side.roster.iter().copied().map(resolve).collect(),
            king: resolve(side.king),
            rooks: side.rooks.map(|rook| rook.and_then(|id| remap[id.0])),
            double_step: side.double_step,
        });

        debug!(pieces = pieces.len(), "copied game");

        Game {
            board,
            pieces,
            sides,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Looks up a piece by handle.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by another game.
    #[inline]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.0]
    }

    /// The piece standing on `coord`, if any.
    pub fn piece_at(&self, coord: Coord) -> Option<&Piece> {
        self.board.occupant(coord).map(|id| self.piece(id))
    }

    /// The pieces `color` still has in play, king first.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.sides[color].roster.iter().map(move |&id| self.piece(id))
    }

    pub fn player(&mut self, color: Color) -> Player<'_> {
        Player::new(self, color)
    }

    pub fn white(&mut self) -> Player<'_> {
        self.player(Color::White)
    }

    pub fn black(&mut self) -> Player<'_> {
        self.player(Color::Black)
    }

    /// Checks that squares and pieces agree about who stands where and that
    /// both rosters only list pieces in play.
    pub fn is_consistent(&self) -> bool {
        let squares_agree = self.board.squares().all(|square| match square.occupant() {
            Some(id) => self
                .pieces
                .get(id.0)
                .is_some_and(|piece| piece.position() == Some(square.coord())),
            None => true,
        });

        let pieces_agree = self.pieces.iter().enumerate().all(|(i, piece)| {
            piece
                .position()
                .map_or(true, |coord| self.board.occupant(coord) == Some(PieceId(i)))
        });

        let rosters_agree = self.sides.iter().zip(Color::ALL).all(|(side, color)| {
            side.roster.iter().all(|&id| {
                let piece = self.piece(id);
                piece.color() == color && piece.is_on_board()
            }) && self.piece(side.king).role() == Role::King
        });

        squares_agree && pieces_agree && rosters_agree
    }

    pub(crate) fn side(&self, color: Color) -> &Side {
        &self.sides[color]
    }

    pub(crate) fn side_mut(&mut self, color: Color) -> &mut Side {
        &mut self.sides[color]
    }

    /// Takes a piece out of play and drops it from its owner's roster.
    pub(crate) fn capture(&mut self, id: PieceId) {
        let piece = &mut self.pieces[id.0];
        let color = piece.color();
        if let Some(position) = piece.position() {
            self.board.square_mut(position).set_occupant(None);
        }
        piece.set_position(None);
        self.sides[color].roster.retain(|other| *other != id);
    }

    /// Moves a piece, capturing whatever stands on `target`.
    pub(crate) fn relocate(&mut self, id: PieceId, target: Coord) {
        if let Some(occupant) = self.board.occupant(target) {
            if occupant != id {
                self.capture(occupant);
            }
        }

        let piece = &mut self.pieces[id.0];
        let Some(origin) = piece.position() else {
            return;
        };
        self.board.square_mut(origin).take_occupant();
        piece.mark_moved(origin, target);
        self.board.square_mut(target).set_occupant(Some(id));
    }

    pub(crate) fn clear_double_step(&mut self, id: PieceId) {
        self.pieces[id.0].clear_double_step();
    }

    /// Replaces a piece in play with a fresh piece of another role.
    pub(crate) fn replace(&mut self, id: PieceId, role: Role) -> Option<PieceId> {
        let old = self.piece(id);
        let color = old.color();
        let position = old.position()?;

        self.capture(id);
        let new = PieceId(self.pieces.len());
        self.pieces.push(Piece::new(color, role, Some(position)));
        self.board.square_mut(position).set_occupant(Some(new));
        self.sides[color].roster.push(new);
        Some(new)
    }
}

impl fmt::Display for Game {
    /// Draws the board with rank 8 on top. White pieces are uppercase.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const FILES: &str = "     a   b   c   d   e   f   g   h\n";
        const RULE: &str = "   +---+---+---+---+---+---+---+---+\n";

        f.write_str(FILES)?;
        f.write_str(RULE)?;
        for rank in (0..8).rev() {
            write!(f, " {} |", rank + 1)?;
            for file in 0..8 {
                let ch = self.piece_at(Coord::new(rank, file)).map_or(' ', Piece::char);
                write!(f, " {ch} |")?;
            }
            writeln!(f, " {}", rank + 1)?;
            f.write_str(RULE)?;
        }
        f.write_str(FILES)
    }
}

impl Side {
    pub(crate) fn castling_rook(&self, side: CastlingSide) -> Option<PieceId> {
        self.rooks[side]
    }
}
