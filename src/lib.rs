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

//! A rules engine for two player chess.
//!
//! A [`Game`] owns the board and every piece. Play happens through a
//! [`Player`], a view of one side of the game.
//!
//! # Examples
//!
//! Enumerate moves in the starting position:
//!
//! ```
//! use chess_rules::Game;
//!
//! let mut game = Game::new();
//! let moves = game.white().legal_moves();
//! assert_eq!(moves.count_moves(), 20);
//! ```
//!
//! Play moves, given as square identifiers:
//!
//! ```
//! use chess_rules::{Coord, Game};
//!
//! let mut game = Game::new();
//! assert!(game.white().make_move("e2".parse()?, "e4".parse()?));
//! assert!(game.black().make_move(Coord::E7, Coord::E5));
//!
//! // Illegal moves are refused and change nothing.
//! assert!(!game.white().make_move(Coord::E4, Coord::E5));
//! # Ok::<_, chess_rules::InvalidCoordError>(())
//! ```
//!
//! Detect checkmate:
//!
//! ```
//! use chess_rules::{Color, Coord, Game, Role, Setup};
//!
//! let mut setup = Setup::empty();
//! setup
//!     .place(Color::White, Role::King, Coord::G1)
//!     .place(Color::White, Role::Pawn, Coord::F2)
//!     .place(Color::White, Role::Pawn, Coord::G2)
//!     .place(Color::White, Role::Pawn, Coord::H2)
//!     .place(Color::Black, Role::King, Coord::G8)
//!     .place(Color::Black, Role::Rook, Coord::A8);
//! let mut game = Game::from_setup(&setup)?;
//!
//! assert!(!game.white().is_in_checkmate());
//! assert!(game.black().make_move(Coord::A8, Coord::A1));
//! assert!(game.white().is_in_check());
//! assert!(game.white().is_in_checkmate());
//! # Ok::<_, chess_rules::SetupError>(())
//! ```
//!
//! Try a move on a copy before committing to it:
//!
//! ```
//! use chess_rules::{Coord, Game};
//!
//! let mut game = Game::new();
//! let mut trial = game.white().copy();
//! assert!(trial.white().make_move(Coord::G1, Coord::F3));
//! assert!(game.board().is_occupied(Coord::G1));
//! ```
//!
//! # Feature flags
//!
//! * `std`: Enabled by default.
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   [`Coord`], [`Color`] and [`Role`].
//! * `nohash-hasher`: Implements
//!   [`nohash_hasher::IsEnabled`](https://docs.rs/nohash-hasher/0.2/nohash_hasher/trait.IsEnabled.html)
//!   for sensible types.

#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

mod castling_side;
mod color;
mod game;
mod movelist;
mod piece;
mod player;
mod promotion;
mod role;
mod setup;
mod square;

pub mod board;
pub mod coord;
pub mod square_set;

pub use board::Board;
pub use castling_side::{ByCastlingSide, CastlingSide};
pub use color::{ByColor, Color, ParseColorError};
pub use coord::{Coord, InvalidCoordError};
pub use game::Game;
pub use movelist::{Candidates, LegalMoves};
pub use piece::{Piece, PieceId};
pub use player::Player;
pub use promotion::PromotionChoice;
pub use role::{ParseRoleError, Role};
pub use setup::{Placement, Setup, SetupError, SetupErrorKinds, MAX_PIECES};
pub use square::Square;
pub use square_set::{SquareSet, SquareSetIter};

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Coord {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Color {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Role {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for PieceId {}
