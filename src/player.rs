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

use tracing::{debug, trace, warn};

use crate::{
    board::Board,
    castling_side::CastlingSide,
    color::Color,
    coord::Coord,
    game::{Game, Roster},
    movelist::{Candidates, LegalMoves},
    piece::{Piece, PieceId},
    promotion::PromotionChoice,
    role::Role,
};

/// One side of a [`Game`], seen from that side.
///
/// A player borrows the game mutably, so only one view exists at a time.
/// The opponent is the same game seen from the other color, see
/// [`Player::opponent()`].
///
/// # Examples
///
/// ```
/// use chess_rules::{Coord, Game};
///
/// let mut game = Game::new();
/// let mut white = game.white();
/// assert_eq!(white.legal_moves().count_moves(), 20);
///
/// let e2 = "e2".parse::<Coord>()?;
/// let e4 = "e4".parse::<Coord>()?;
/// assert!(white.make_move(e2, e4));
/// assert!(white.is_double_step());
/// assert!(!white.opponent().is_in_check());
/// # Ok::<_, chess_rules::InvalidCoordError>(())
/// ```
#[derive(Debug)]
pub struct Player<'g> {
    game: &'g mut Game,
    color: Color,
}

/// A move that passed its legality test and is ready to be applied.
#[derive(Copy, Clone, Debug)]
enum Move {
    Normal { piece: PieceId, to: Coord },
    EnPassant { piece: PieceId, to: Coord, captured: PieceId },
    Castle { king: PieceId, rook: PieceId, side: CastlingSide },
}

impl<'g> Player<'g> {
    pub(crate) fn new(game: &'g mut Game, color: Color) -> Player<'g> {
        Player { game, color }
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn is_white(&self) -> bool {
        self.color.is_white()
    }

    pub fn game(&self) -> &Game {
        self.game
    }

    pub fn board(&self) -> &Board {
        self.game.board()
    }

    /// The other side of the same game.
    pub fn opponent(&mut self) -> Player<'_> {
        Player::new(self.game, !self.color)
    }

    pub fn king(&self) -> &Piece {
        self.game.piece(self.game.side(self.color).king)
    }

    /// Pieces still in play, king first.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.game.pieces(self.color)
    }

    /// Sum of the values of all pieces in play, king included.
    pub fn material(&self) -> u32 {
        self.pieces().map(Piece::value).sum()
    }

    /// Whether the latest move attempt of this player was a two-rank pawn
    /// advance. This is what makes an en passant reply possible.
    pub fn is_double_step(&self) -> bool {
        self.game.side(self.color).double_step
    }

    /// Tries a normal move, an en passant capture and castling, in this
    /// order, and applies the first one that is legal.
    ///
    /// Returns `false` and leaves the board untouched if none is. Either way
    /// the double step flag is updated to reflect this attempt.
    ///
    /// Moving into check is not prevented, see
    /// [`Player::make_safe_move()`].
    pub fn make_move(&mut self, origin: Coord, target: Coord) -> bool {
        let double_step = self.game.piece_at(origin).is_some_and(|piece| {
            piece.role() == Role::Pawn
                && origin.file() == target.file()
                && (target.rank() - origin.rank()).abs() == 2
        });

        let m = plan_move(self.game, self.color, origin, target);
        if let Some(m) = m {
            self.apply(m);
        }
        self.game.side_mut(self.color).double_step = double_step;

        trace!(color = %self.color, %origin, %target, legal = m.is_some(), "move attempt");
        m.is_some()
    }

    /// Like [`Player::make_move()`], but rejects moves that leave this
    /// player in check.
    ///
    /// The move is first tried on a copy of the game. A rejected move leaves
    /// the game exactly as it was.
    pub fn make_safe_move(&mut self, origin: Coord, target: Coord) -> bool {
        let mut trial = self.copy();
        let mut player = trial.player(self.color);
        if !player.make_move(origin, target) || player.is_in_check() {
            trace!(color = %self.color, %origin, %target, "unsafe move rejected");
            return false;
        }
        self.make_move(origin, target)
    }

    fn apply(&mut self, m: Move) {
        match m {
            Move::Normal { piece, to } => self.game.relocate(piece, to),
            Move::EnPassant {
                piece,
                to,
                captured,
            } => {
                self.game.relocate(piece, to);
                self.game.capture(captured);
                self.game.clear_double_step(piece);
                self.game.side_mut(!self.color).double_step = false;
                debug!(color = %self.color, %to, "en passant");
            }
            Move::Castle { king, rook, side } => {
                self.game.relocate(rook, side.rook_to(self.color));
                self.game.relocate(king, side.king_to(self.color));
                debug!(color = %self.color, ?side, "castled");
            }
        }
    }

    /// A fully independent copy of the whole game.
    pub fn copy(&self) -> Game {
        self.game.copy()
    }

    /// Checks whether an opposing piece attacks the king. A king that is no
    /// longer on the board counts as being in check.
    pub fn is_in_check(&self) -> bool {
        is_in_check(self.game, self.color)
    }

    /// Checks whether every move in [`Player::legal_moves()`] leaves this
    /// player in check.
    ///
    /// Positions without any candidate move count as checkmate as well, so
    /// stalemate is reported as checkmate.
    pub fn is_in_checkmate(&self) -> bool {
        for (origin, target) in self.legal_moves().moves() {
            let mut trial = self.copy();
            let mut player = trial.player(self.color);
            player.make_move(origin, target);
            if !player.is_in_check() {
                return false;
            }
        }
        debug!(color = %self.color, "checkmate");
        true
    }

    /// Targets of every piece in play, in roster order.
    ///
    /// Includes normal moves and en passant captures, but not castling.
    /// Moves into check are included.
    pub fn legal_moves(&self) -> LegalMoves {
        let mut moves = LegalMoves::default();
        for &id in &self.game.side(self.color).roster {
            let Some(from) = self.game.piece(id).position() else {
                continue;
            };
            let targets = Coord::all()
                .filter(|&to| {
                    can_make_move(self.game, self.color, from, to)
                        || en_passant_capture(self.game, self.color, from, to).is_some()
                })
                .collect();
            moves.push(Candidates {
                piece: id,
                from,
                targets,
            });
        }
        moves
    }

    /// Promotes every pawn of this player standing on the last rank.
    ///
    /// The chooser is asked until it names a queen, rook, bishop or knight.
    /// Returns `true` if any pawn was promoted.
    pub fn pawn_promotion<C>(&mut self, chooser: &mut C) -> bool
    where
        C: PromotionChoice + ?Sized,
    {
        let last_rank = self.color.last_rank();
        let pawns: Roster = self
            .game
            .side(self.color)
            .roster
            .iter()
            .copied()
            .filter(|&id| {
                let piece = self.game.piece(id);
                piece.role() == Role::Pawn && piece.position().is_some_and(|c| c.rank() == last_rank)
            })
            .collect();

        let mut promoted = false;
        for id in pawns {
            let Some(at) = self.game.piece(id).position() else {
                continue;
            };
            let role = loop {
                match chooser.choose(self.color, at) {
                    Some(role) if role.is_promotion_choice() => break role,
                    other => warn!(color = %self.color, %at, ?other, "invalid promotion choice"),
                }
            };
            if self.game.replace(id, role).is_some() {
                debug!(color = %self.color, %at, %role, "promoted");
                promoted = true;
            }
        }
        promoted
    }

    /// Checks whether castling to `side` is possible right now.
    ///
    /// Requires the king and that side's home rook to be unmoved, every
    /// square between them to be empty, and the king not to be in check.
    pub fn can_castle(&self, side: CastlingSide) -> bool {
        castling_rook(self.game, self.color, side).is_some()
    }
}

fn plan_move(game: &Game, color: Color, origin: Coord, target: Coord) -> Option<Move> {
    if can_make_move(game, color, origin, target) {
        let piece = game.board().occupant(origin)?;
        return Some(Move::Normal { piece, to: target });
    }

    if let Some(captured) = en_passant_capture(game, color, origin, target) {
        let piece = game.board().occupant(origin)?;
        return Some(Move::EnPassant {
            piece,
            to: target,
            captured,
        });
    }

    let king = game.side(color).king;
    if game.piece(king).position() == Some(origin) {
        let side = CastlingSide::from_king_to(color, target)?;
        let rook = castling_rook(game, color, side)?;
        return Some(Move::Castle { king, rook, side });
    }

    None
}

/// Normal move test: own piece on `origin`, no own piece on `target`, the
/// movement pattern fits and the path is clear.
fn can_make_move(game: &Game, color: Color, origin: Coord, target: Coord) -> bool {
    let board = game.board();
    let Some(piece) = game.piece_at(origin) else {
        return false;
    };
    if piece.color() != color || game.piece_at(target).is_some_and(|p| p.color() == color) {
        return false;
    }
    if !piece.can_move_to(board.square(target)) {
        return false;
    }

    piece.role() == Role::Knight
        || board.is_clear_rank(origin, target)
        || board.is_clear_file(origin, target)
        || board.is_clear_diagonal(origin, target)
}

/// The pawn captured if moving from `origin` to `target` is an en passant
/// capture.
fn en_passant_capture(game: &Game, color: Color, origin: Coord, target: Coord) -> Option<PieceId> {
    let piece = game.piece_at(origin)?;
    if piece.color() != color || piece.role() != Role::Pawn {
        return None;
    }
    if game.board().is_occupied(target) || !game.side(!color).double_step {
        return None;
    }

    let forward = color.forward();
    if target.rank() - origin.rank() != forward || (target.file() - origin.file()).abs() != 1 {
        return None;
    }

    let passed = target.offset(-forward, 0)?;
    let captured = game.board().occupant(passed)?;
    let victim = game.piece(captured);
    (victim.color() != color && victim.role() == Role::Pawn).then_some(captured)
}

fn is_in_check(game: &Game, color: Color) -> bool {
    match game.piece(game.side(color).king).position() {
        Some(king) => is_attacked(game, !color, king),
        None => true,
    }
}

/// Checks whether any piece of `attacker` could capture on `target`.
fn is_attacked(game: &Game, attacker: Color, target: Coord) -> bool {
    game.side(attacker).roster.iter().any(|&id| {
        let piece = game.piece(id);
        piece.position().is_some_and(|from| {
            can_make_move(game, attacker, from, target) && piece.can_target(target)
        })
    })
}

/// The rook `color` would castle with on `side`, if castling is possible.
fn castling_rook(game: &Game, color: Color, side: CastlingSide) -> Option<PieceId> {
    let own = game.side(color);
    let king = game.piece(own.king);
    let king_at = king.position().filter(|_| !king.has_moved())?;

    let id = own.castling_rook(side)?;
    let rook = game.piece(id);
    let rook_at = rook
        .position()
        .filter(|_| !rook.has_moved() && rook.color() == color)?;

    (game.board().is_clear_rank(king_at, rook_at) && !is_in_check(game, color)).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::Setup;

    fn game(setup: &Setup) -> Game {
        Game::from_setup(setup).expect("valid setup")
    }

    fn role_at(game: &Game, coord: Coord) -> Option<(Color, Role)> {
        game.piece_at(coord).map(|p| (p.color(), p.role()))
    }

    #[test]
    fn test_opening_moves() {
        let mut game = Game::new();
        assert!(game.white().make_move(Coord::E2, Coord::E4));
        assert!(game.black().make_move(Coord::D7, Coord::D5));
        assert!(!game.white().make_move(Coord::E4, Coord::E3));
        assert!(!game.white().make_move(Coord::E4, Coord::E6));
        assert!(game.white().make_move(Coord::E4, Coord::E5));
        assert!(game.is_consistent());
    }

    #[test]
    fn test_capture() {
        let mut game = Game::new();
        assert!(game.white().make_move(Coord::E2, Coord::E4));
        assert!(game.black().make_move(Coord::D7, Coord::D5));
        assert!(game.white().make_move(Coord::E4, Coord::D5));

        assert_eq!(game.pieces(Color::Black).count(), 15);
        assert_eq!(game.pieces(Color::White).count(), 16);
        assert_eq!(role_at(&game, Coord::D5), Some((Color::White, Role::Pawn)));
        assert!(game.is_consistent());
    }

    #[test]
    fn test_rejected_moves() {
        let mut game = Game::new();
        let mut white = game.white();
        // Blocked by own pawn, own piece on target, not our piece.
        assert!(!white.make_move(Coord::A1, Coord::A3));
        assert!(!white.make_move(Coord::D1, Coord::D2));
        assert!(!white.make_move(Coord::E7, Coord::E5));
        // Pawn cannot step diagonally onto an empty square.
        assert!(!white.make_move(Coord::E2, Coord::F3));
        // Empty origin.
        assert!(!white.make_move(Coord::E4, Coord::E5));
        assert!(game.is_consistent());
        assert_eq!(game.to_string(), Game::new().to_string());
    }

    #[test]
    fn test_knight_jumps() {
        let mut game = Game::new();
        assert!(game.white().make_move(Coord::G1, Coord::F3));
        assert!(game.black().make_move(Coord::B8, Coord::C6));
        assert_eq!(role_at(&game, Coord::F3), Some((Color::White, Role::Knight)));
    }

    #[test]
    fn test_double_step_flag_follows_attempts() {
        let mut game = Game::new();
        let mut white = game.white();
        assert!(white.make_move(Coord::E2, Coord::E4));
        assert!(white.is_double_step());

        // A failed two-rank pawn attempt still sets the flag.
        assert!(!white.make_move(Coord::E4, Coord::E6));
        assert!(white.is_double_step());

        // Empty origin.
        assert!(!white.make_move(Coord::E3, Coord::E5));
        assert!(!white.is_double_step());

        assert!(white.make_move(Coord::D2, Coord::D3));
        assert!(!white.is_double_step());
    }

    #[test]
    fn test_en_passant() {
        let mut setup = Setup::empty();
        setup
            .place(Color::White, Role::King, Coord::E1)
            .place_moved(Color::White, Role::Pawn, Coord::E5)
            .place(Color::Black, Role::King, Coord::E8)
            .place(Color::Black, Role::Pawn, Coord::D7);
        let mut game = game(&setup);

        assert!(game.black().make_move(Coord::D7, Coord::D5));
        assert!(game.black().is_double_step());
        let pawn = game.board().occupant(Coord::D5).expect("pawn");
        assert!(game.piece(pawn).is_double_step());

        let targets = game.white().legal_moves().from(Coord::E5).expect("pawn");
        assert!(targets.contains(Coord::D6));

        assert!(game.white().make_move(Coord::E5, Coord::D6));
        assert_eq!(role_at(&game, Coord::D6), Some((Color::White, Role::Pawn)));
        assert_eq!(game.piece_at(Coord::D5), None);
        assert_eq!(game.piece(pawn).position(), None);
        assert_eq!(game.pieces(Color::Black).count(), 1);
        assert!(!game.white().is_double_step());
        assert!(!game.black().is_double_step());
        assert!(game.is_consistent());
    }

    #[test]
    fn test_en_passant_needs_double_step() {
        let mut setup = Setup::empty();
        setup
            .place(Color::White, Role::King, Coord::E1)
            .place_moved(Color::White, Role::Pawn, Coord::E5)
            .place(Color::Black, Role::King, Coord::E8)
            .place_moved(Color::Black, Role::Pawn, Coord::D6);
        let mut game = game(&setup);

        assert!(game.black().make_move(Coord::D6, Coord::D5));
        assert!(!game.black().is_double_step());
        assert!(!game.white().make_move(Coord::E5, Coord::D6));
        assert_eq!(role_at(&game, Coord::D5), Some((Color::Black, Role::Pawn)));
    }

    fn castling_setup() -> Setup {
        let mut setup = Setup::empty();
        setup
            .place(Color::White, Role::King, Coord::E1)
            .place(Color::White, Role::Rook, Coord::H1)
            .place(Color::White, Role::Rook, Coord::A1)
            .place(Color::Black, Role::King, Coord::E8);
        setup
    }

    #[test]
    fn test_castle_king_side() {
        let mut game = game(&castling_setup());
        let mut white = game.white();
        assert!(white.can_castle(CastlingSide::KingSide));
        assert!(white.can_castle(CastlingSide::QueenSide));
        assert!(white.make_move(Coord::E1, Coord::G1));

        assert_eq!(role_at(&game, Coord::G1), Some((Color::White, Role::King)));
        assert_eq!(role_at(&game, Coord::F1), Some((Color::White, Role::Rook)));
        assert_eq!(game.piece_at(Coord::H1), None);
        assert_eq!(game.piece_at(Coord::E1), None);
        assert!(game.is_consistent());
        assert!(!game.white().can_castle(CastlingSide::QueenSide));
    }

    #[test]
    fn test_castle_queen_side() {
        let mut game = game(&castling_setup());
        assert!(game.white().make_move(Coord::E1, Coord::C1));
        assert_eq!(role_at(&game, Coord::C1), Some((Color::White, Role::King)));
        assert_eq!(role_at(&game, Coord::D1), Some((Color::White, Role::Rook)));
        assert_eq!(game.piece_at(Coord::A1), None);
    }

    #[test]
    fn test_castle_blocked() {
        let mut setup = castling_setup();
        setup.place(Color::White, Role::Knight, Coord::B1);
        let mut game = game(&setup);
        let mut white = game.white();
        assert!(!white.can_castle(CastlingSide::QueenSide));
        assert!(!white.make_move(Coord::E1, Coord::C1));
        assert!(white.can_castle(CastlingSide::KingSide));
        assert_eq!(role_at(&game, Coord::E1), Some((Color::White, Role::King)));
        assert_eq!(role_at(&game, Coord::A1), Some((Color::White, Role::Rook)));
    }

    #[test]
    fn test_castle_in_check() {
        let mut setup = castling_setup();
        setup.place(Color::Black, Role::Rook, Coord::E5);
        let mut game = game(&setup);
        let white = game.white();
        assert!(white.is_in_check());
        assert!(!white.can_castle(CastlingSide::KingSide));
        assert!(!white.can_castle(CastlingSide::QueenSide));
    }

    #[test]
    fn test_castle_after_moving() {
        let mut setup = Setup::empty();
        setup
            .place(Color::White, Role::King, Coord::E1)
            .place_moved(Color::White, Role::Rook, Coord::H1)
            .place(Color::White, Role::Rook, Coord::A1)
            .place(Color::Black, Role::King, Coord::E8);
        let mut game = game(&setup);
        assert!(!game.white().can_castle(CastlingSide::KingSide));

        let mut white = game.white();
        assert!(white.make_move(Coord::E1, Coord::E2));
        assert!(white.make_move(Coord::E2, Coord::E1));
        assert!(!white.can_castle(CastlingSide::QueenSide));
        assert!(!white.make_move(Coord::E1, Coord::C1));
    }

    #[test]
    fn test_castle_without_home_rook() {
        let mut setup = Setup::empty();
        setup
            .place(Color::Black, Role::King, Coord::E8)
            .place(Color::Black, Role::Rook, Coord::H7)
            .place(Color::White, Role::King, Coord::E1)
            .place(Color::White, Role::Rook, Coord::H1);
        let mut game = game(&setup);
        assert!(!game.black().can_castle(CastlingSide::KingSide));

        // Capturing the home rook removes the right.
        assert!(game.white().can_castle(CastlingSide::KingSide));
        assert!(game.black().make_move(Coord::H7, Coord::H1));
        assert!(!game.white().can_castle(CastlingSide::KingSide));
    }

    #[test]
    fn test_check() {
        let mut setup = Setup::empty();
        setup
            .place(Color::White, Role::King, Coord::E1)
            .place(Color::White, Role::Pawn, Coord::D2)
            .place(Color::Black, Role::King, Coord::E8)
            .place(Color::Black, Role::Bishop, Coord::B4);
        let mut game = game(&setup);
        assert!(!game.white().is_in_check());

        assert!(game.white().make_move(Coord::D2, Coord::D4));
        assert!(game.white().is_in_check());
        assert!(!game.black().is_in_check());
    }

    #[test]
    fn test_pawn_checks_diagonally_only() {
        let mut setup = Setup::empty();
        setup
            .place(Color::White, Role::King, Coord::E1)
            .place(Color::Black, Role::King, Coord::E8)
            .place(Color::Black, Role::Pawn, Coord::E2);
        assert!(!game(&setup).white().is_in_check());

        let mut setup = Setup::empty();
        setup
            .place(Color::White, Role::King, Coord::E1)
            .place(Color::Black, Role::King, Coord::E8)
            .place(Color::Black, Role::Pawn, Coord::F2);
        assert!(game(&setup).white().is_in_check());
    }

    #[test]
    fn test_captured_king_is_in_check() {
        let mut setup = Setup::empty();
        setup
            .place(Color::White, Role::King, Coord::E1)
            .place(Color::Black, Role::King, Coord::E8)
            .place(Color::Black, Role::Queen, Coord::E2);
        let mut game = game(&setup);
        assert!(game.black().make_move(Coord::E2, Coord::E1));
        assert_eq!(game.white().king().position(), None);
        assert!(game.white().is_in_check());
    }

    #[test]
    fn test_make_safe_move() {
        let mut setup = Setup::empty();
        setup
            .place(Color::White, Role::King, Coord::E1)
            .place(Color::White, Role::Rook, Coord::E2)
            .place(Color::Black, Role::King, Coord::A8)
            .place(Color::Black, Role::Rook, Coord::E8);
        let mut game = game(&setup);
        let before = game.to_string();

        assert!(!game.white().make_safe_move(Coord::E2, Coord::D2));
        assert_eq!(game.to_string(), before);
        assert!(!game.white().make_safe_move(Coord::E2, Coord::F3));

        assert!(game.white().make_safe_move(Coord::E2, Coord::E5));
        assert_eq!(role_at(&game, Coord::E5), Some((Color::White, Role::Rook)));
        assert!(!game.white().is_in_check());
    }

    #[test]
    fn test_legal_moves_start() {
        let mut game = Game::new();
        let moves = game.white().legal_moves();
        assert_eq!(moves.len(), 16);
        assert_eq!(moves.count_moves(), 20);
        assert_eq!(moves.from(Coord::E1).map(|t| t.len()), Some(0));
        assert_eq!(
            moves.from(Coord::B1).map(|t| t.iter().collect::<Vec<_>>()),
            Some(vec![Coord::A3, Coord::C3])
        );
    }

    #[test]
    fn test_promotion() {
        let mut setup = Setup::empty();
        setup
            .place(Color::White, Role::King, Coord::A1)
            .place_moved(Color::White, Role::Pawn, Coord::B8)
            .place(Color::Black, Role::King, Coord::H8)
            .place_moved(Color::Black, Role::Pawn, Coord::C1);
        let mut game = game(&setup);

        assert!(game.white().pawn_promotion(&mut Role::Knight));
        assert_eq!(role_at(&game, Coord::B8), Some((Color::White, Role::Knight)));
        assert!(!game.piece_at(Coord::B8).expect("knight").has_moved());
        assert_eq!(game.pieces(Color::White).count(), 2);
        assert!(!game.white().pawn_promotion(&mut Role::Queen));

        let mut answers = vec![Some(Role::Queen), None, Some(Role::King), Some(Role::Pawn)];
        let mut asked = 0;
        let mut chooser = |color: Color, at: Coord| {
            assert_eq!((color, at), (Color::Black, Coord::C1));
            asked += 1;
            answers.pop().flatten()
        };
        assert!(game.black().pawn_promotion(&mut chooser));
        assert_eq!(asked, 4);
        assert_eq!(role_at(&game, Coord::C1), Some((Color::Black, Role::Queen)));
        assert!(game.is_consistent());
    }

    #[test]
    fn test_material_and_opponent() {
        let mut game = Game::new();
        let mut white = game.white();
        assert_eq!(white.material(), 239);
        assert!(white.is_white());
        let black = white.opponent();
        assert_eq!(black.color(), Color::Black);
        assert_eq!(black.king().position(), Some(Coord::E8));
        assert_eq!(black.pieces().count(), 16);
    }
}
