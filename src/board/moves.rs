/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{anyhow, bail, Result};

use super::{Board, Color, Square, LONG_CASTLE, SHORT_CASTLE};

/// A growable list of [`Move`]s.
///
/// Malformed placements can hold any number of pieces, so there is no fixed upper bound.
pub type MoveList = Vec<Move>;

/// Represents a move made on a chess board.
///
/// A move is either a coordinate pair (`"e2e4"`) or one of the two castling tokens,
/// which carry no squares of their own. The castling squares depend on the side
/// making the move; see [`Move::origin`] and [`Move::destination`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Move {
    /// Whatever stands on `from` is moved onto `to`, overwriting anything there.
    Normal { from: Square, to: Square },

    /// King from its home square to the g-file, corner rook to the f-file.
    ShortCastle,

    /// King from its home square to the c-file, corner rook to the d-file.
    LongCastle,
}

impl Move {
    /// Creates a new coordinate [`Move`].
    #[inline(always)]
    pub const fn new(from: Square, to: Square) -> Self {
        Self::Normal { from, to }
    }

    /// Returns `true` if this is either castling token.
    #[inline(always)]
    pub const fn is_castle(&self) -> bool {
        matches!(self, Self::ShortCastle | Self::LongCastle)
    }

    /// The square this move starts from, when made by `color`.
    ///
    /// # Example
    /// ```
    /// # use rookery::{Color, Move, Square};
    /// assert_eq!(Move::new(Square::E2, Square::E4).origin(Color::Black), Square::E2);
    /// assert_eq!(Move::LongCastle.origin(Color::Black), Square::E8);
    /// ```
    #[inline(always)]
    pub const fn origin(&self, color: Color) -> Square {
        match *self {
            Self::Normal { from, .. } => from,
            Self::ShortCastle | Self::LongCastle => Square::E1.rank_relative_to(color),
        }
    }

    /// The square this move lands on, when made by `color`.
    ///
    /// For the castling tokens, this is where the king ends up.
    ///
    /// # Example
    /// ```
    /// # use rookery::{Color, Move, Square};
    /// assert_eq!(Move::ShortCastle.destination(Color::White), Square::G1);
    /// assert_eq!(Move::LongCastle.destination(Color::Black), Square::C8);
    /// ```
    #[inline(always)]
    pub const fn destination(&self, color: Color) -> Square {
        match *self {
            Self::Normal { to, .. } => to,
            Self::ShortCastle => Square::G1.rank_relative_to(color),
            Self::LongCastle => Square::C1.rank_relative_to(color),
        }
    }

    /// Where the corner rook starts and ends for a castling token made by `color`.
    #[inline(always)]
    pub const fn rook_squares(&self, color: Color) -> Option<(Square, Square)> {
        match self {
            Self::Normal { .. } => None,
            Self::ShortCastle => Some((
                Square::H1.rank_relative_to(color),
                Square::F1.rank_relative_to(color),
            )),
            Self::LongCastle => Some((
                Square::A1.rank_relative_to(color),
                Square::D1.rank_relative_to(color),
            )),
        }
    }

    /// Parses a move for `color` on `board`.
    ///
    /// On top of [`Move::from_str`], a king moving from its home square to the g- or
    /// c-file is read as the matching castling token.
    ///
    /// # Example
    /// ```
    /// # use rookery::*;
    /// let board = Board::from_placement("r3k2r/8/8/8/8/8/8/R3K2R");
    /// assert_eq!(Move::from_uci(&board, Color::White, "e1g1").unwrap(), Move::ShortCastle);
    /// assert_eq!(Move::from_uci(&board, Color::Black, "e8c8").unwrap(), Move::LongCastle);
    /// assert_eq!(Move::from_uci(&board, Color::White, "a1a8").unwrap(), Move::new(Square::A1, Square::A8));
    /// ```
    pub fn from_uci(board: &Board, color: Color, uci: &str) -> Result<Self> {
        let mv = Self::from_str(uci)?;

        let Self::Normal { from, to } = mv else {
            return Ok(mv);
        };

        let home = Square::E1.rank_relative_to(color);
        let is_own_king = board
            .piece_at(from)
            .is_some_and(|piece| piece.is_king() && piece.color() == color);

        if is_own_king && from == home {
            if to == Self::ShortCastle.destination(color) {
                return Ok(Self::ShortCastle);
            } else if to == Self::LongCastle.destination(color) {
                return Ok(Self::LongCastle);
            }
        }

        Ok(mv)
    }

    /// Formats this move as text: `"e2e4"`, `"O-O"` or `"O-O-O"`.
    #[inline(always)]
    pub fn to_uci(&self) -> String {
        self.to_string()
    }
}

impl FromStr for Move {
    type Err = anyhow::Error;

    /// Parses a coordinate move (`"e2e4"`) or a castling token (`"O-O"`, `"O-O-O"`, with `0` also accepted).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        match s {
            "O-O" | "0-0" => return Ok(Self::ShortCastle),
            "O-O-O" | "0-0-0" => return Ok(Self::LongCastle),
            _ => {}
        }

        if s.chars().count() != 4 {
            bail!("Move str must be 4 chars or a castling token ({SHORT_CASTLE:?}, {LONG_CASTLE:?}). Got {s:?}");
        }

        let from = s
            .get(0..2)
            .ok_or(anyhow!("Move str must contain a `from` square. Got {s:?}"))?;
        let to = s
            .get(2..4)
            .ok_or(anyhow!("Move str must contain a `to` square. Got {s:?}"))?;

        Ok(Self::new(Square::from_uci(from)?, Square::from_uci(to)?))
    }
}

impl fmt::Display for Move {
    /// A [`Move`] is displayed as its text form.
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal { from, to } => write!(f, "{from}{to}"),
            Self::ShortCastle => write!(f, "{SHORT_CASTLE}"),
            Self::LongCastle => write!(f, "{LONG_CASTLE}"),
        }
    }
}

impl fmt::Debug for Move {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal { .. } => write!(f, "{self} (Normal)"),
            Self::ShortCastle => write!(f, "{self} (Short Castle)"),
            Self::LongCastle => write!(f, "{self} (Long Castle)"),
        }
    }
}

impl<T: AsRef<str>> PartialEq<T> for Move {
    #[inline(always)]
    fn eq(&self, other: &T) -> bool {
        self.to_uci().eq(other.as_ref())
    }
}
