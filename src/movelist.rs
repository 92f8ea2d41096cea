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

use arrayvec::ArrayVec;

use crate::{coord::Coord, piece::PieceId, setup::MAX_PIECES, square_set::SquareSet};

/// The squares one piece can go to.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Candidates {
    pub piece: PieceId,
    pub from: Coord,
    pub targets: SquareSet,
}

/// Targets of every piece of one side, in roster order.
///
/// Pieces without any target are listed too. Stored inline, since a side
/// never has more than 16 pieces.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct LegalMoves {
    inner: ArrayVec<Candidates, MAX_PIECES>,
}

impl LegalMoves {
    pub(crate) fn push(&mut self, candidates: Candidates) {
        self.inner.push(candidates);
    }

    /// Number of pieces listed.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Total number of (piece, target) pairs.
    pub fn count_moves(&self) -> usize {
        self.inner.iter().map(|c| c.targets.len()).sum()
    }

    pub fn get(&self, piece: PieceId) -> Option<SquareSet> {
        self.inner
            .iter()
            .find(|c| c.piece == piece)
            .map(|c| c.targets)
    }

    /// Targets of the piece on `from`.
    pub fn from(&self, from: Coord) -> Option<SquareSet> {
        self.inner.iter().find(|c| c.from == from).map(|c| c.targets)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidates> {
        self.inner.iter()
    }

    /// Every (origin, target) pair, piece by piece.
    pub fn moves(&self) -> impl Iterator<Item = (Coord, Coord)> + '_ {
        self.inner
            .iter()
            .flat_map(|c| c.targets.into_iter().map(move |to| (c.from, to)))
    }
}

impl<'a> IntoIterator for &'a LegalMoves {
    type Item = &'a Candidates;
    type IntoIter = std::slice::Iter<'a, Candidates>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}
