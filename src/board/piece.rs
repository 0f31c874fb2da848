/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut, Neg},
    str::FromStr,
};

use anyhow::{bail, Result};

/// Represents the color of a player or piece.
///
/// White moves first, and therefore [`Color`] defaults to [`Color::White`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    /// Number of color variants.
    pub const COUNT: usize = 2;

    /// Packed color tag of White pieces.
    pub const WHITE_CODE: u8 = 8;

    /// Packed color tag of Black pieces.
    pub const BLACK_CODE: u8 = 16;

    /// An array of both colors, starting with White.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::White, Self::Black]
    }

    /// Creates a new [`Color`] from a `bool`, where `true = White`.
    ///
    /// This mirrors the "is it White's turn?" flag used by front-ends.
    ///
    /// # Example
    /// ```
    /// # use rookery::Color;
    /// assert_eq!(Color::from_white_turn(true), Color::White);
    /// assert_eq!(Color::from_white_turn(false), Color::Black);
    /// ```
    #[inline(always)]
    pub const fn from_white_turn(white_turn: bool) -> Self {
        if white_turn {
            Self::White
        } else {
            Self::Black
        }
    }

    /// Returns the rank direction pawns of this [`Color`] advance in.
    ///
    /// # Example
    /// ```
    /// # use rookery::Color;
    /// assert_eq!(Color::White.forward(), 1);
    /// assert_eq!(Color::Black.forward(), -1);
    /// ```
    #[inline(always)]
    pub const fn forward(&self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    /// Returns this [`Color`]'s opponent.
    ///
    /// # Example
    /// ```
    /// # use rookery::Color;
    /// assert_eq!(Color::White.opponent(), Color::Black);
    /// assert_eq!(Color::Black.opponent(), Color::White);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Returns this [`Color`] as a `usize`, for indexing into lists.
    ///
    /// Will be `0` for White, `1` for Black.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Returns the packed color tag of this [`Color`].
    #[inline(always)]
    pub const fn code(&self) -> u8 {
        match self {
            Self::White => Self::WHITE_CODE,
            Self::Black => Self::BLACK_CODE,
        }
    }

    /// Creates a [`Color`] from a FEN side-to-move char.
    ///
    /// # Example
    /// ```
    /// # use rookery::Color;
    /// assert_eq!(Color::from_uci('b').unwrap(), Color::Black);
    /// assert!(Color::from_uci('x').is_err());
    /// ```
    #[inline(always)]
    pub fn from_uci(color: char) -> Result<Self> {
        match color {
            'w' | 'W' => Ok(Self::White),
            'b' | 'B' => Ok(Self::Black),
            _ => bail!("Color must be either 'w' or 'b' (case-insensitive). Found {color:?}"),
        }
    }

    /// Creates a [`Color`] from the ASCII case of a piece char: uppercase is White.
    #[inline(always)]
    pub const fn from_case(c: char) -> Self {
        if c.is_ascii_lowercase() {
            Self::Black
        } else {
            Self::White
        }
    }

    /// Converts this [`Color`] to its FEN side-to-move char.
    #[inline(always)]
    pub const fn to_uci(&self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }

    /// Human-readable name of this [`Color`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

impl Neg for Color {
    type Output = Self;
    /// Negating [`Color::White`] yields [`Color::Black`] and vice versa.
    #[inline(always)]
    fn neg(self) -> Self::Output {
        self.opponent()
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "w" | "white" => Ok(Self::White),
            "b" | "black" => Ok(Self::Black),
            _ => bail!("Invalid str for Color: expected \"w\", \"b\", \"white\" or \"black\". Got {s:?}"),
        }
    }
}

impl<T> Index<Color> for [T; Color::COUNT] {
    type Output = T;
    #[inline(always)]
    fn index(&self, index: Color) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Color> for [T; Color::COUNT] {
    #[inline(always)]
    fn index_mut(&mut self, index: Color) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name().fmt(f)
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

/// Represents the kind (or "role") that a chess piece can be.
///
/// These have no [`Color`] associated with them. See [`Piece`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    King,
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
}

impl PieceKind {
    /// Number of piece variants.
    pub const COUNT: usize = 6;

    /// An array of all 6 [`PieceKind`]s, in packed-code order.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        use PieceKind::*;
        [King, Pawn, Knight, Bishop, Rook, Queen]
    }

    /// Packed type value of this [`PieceKind`].
    ///
    /// Always `[1,6]`, so that it never collides with the empty square (`0`)
    /// or either color tag.
    ///
    /// # Example
    /// ```
    /// # use rookery::PieceKind;
    /// assert_eq!(PieceKind::King.code(), 1);
    /// assert_eq!(PieceKind::Queen.code(), 6);
    /// ```
    #[inline(always)]
    pub const fn code(&self) -> u8 {
        match self {
            Self::King => 1,
            Self::Pawn => 2,
            Self::Knight => 3,
            Self::Bishop => 4,
            Self::Rook => 5,
            Self::Queen => 6,
        }
    }

    /// Inverse of [`PieceKind::code`].
    #[inline(always)]
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            1 => Ok(Self::King),
            2 => Ok(Self::Pawn),
            3 => Ok(Self::Knight),
            4 => Ok(Self::Bishop),
            5 => Ok(Self::Rook),
            6 => Ok(Self::Queen),
            _ => bail!("Invalid code for PieceKind: Must be between [1,6]. Got {code}."),
        }
    }

    /// Creates a [`PieceKind`] from its letter, ignoring case.
    #[inline(always)]
    pub fn from_uci(kind: char) -> Result<Self> {
        match kind {
            'P' | 'p' => Ok(Self::Pawn),
            'N' | 'n' => Ok(Self::Knight),
            'B' | 'b' => Ok(Self::Bishop),
            'R' | 'r' => Ok(Self::Rook),
            'Q' | 'q' => Ok(Self::Queen),
            'K' | 'k' => Ok(Self::King),
            _ => bail!("Invalid char for PieceKind: Got {kind:?}."),
        }
    }

    /// Lowercase letter of this [`PieceKind`].
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }

    /// Returns `true` if this kind slides along ranks and files.
    #[inline(always)]
    pub const fn is_orthogonal_slider(&self) -> bool {
        matches!(self, Self::Rook | Self::Queen)
    }

    /// Returns `true` if this kind slides along diagonals.
    #[inline(always)]
    pub const fn is_diagonal_slider(&self) -> bool {
        matches!(self, Self::Bishop | Self::Queen)
    }
}

impl FromStr for PieceKind {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_uci(c),
            _ => bail!("Invalid str for PieceKind: Must be a str of len 1. Got {s:?}"),
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.char().fmt(f)
    }
}

impl fmt::Debug for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

/// A chess piece: a [`Color`] paired with a [`PieceKind`].
///
/// Outside of this crate, pieces are often exchanged as packed integer codes
/// (color tag plus type value, `0` for an empty square). Use [`Piece::code`] and
/// [`Piece::from_code`] at those boundaries.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
}

impl Piece {
    pub const WHITE_PAWN: Self = Self::new(Color::White, PieceKind::Pawn);
    pub const WHITE_KNIGHT: Self = Self::new(Color::White, PieceKind::Knight);
    pub const WHITE_BISHOP: Self = Self::new(Color::White, PieceKind::Bishop);
    pub const WHITE_ROOK: Self = Self::new(Color::White, PieceKind::Rook);
    pub const WHITE_QUEEN: Self = Self::new(Color::White, PieceKind::Queen);
    pub const WHITE_KING: Self = Self::new(Color::White, PieceKind::King);

    pub const BLACK_PAWN: Self = Self::new(Color::Black, PieceKind::Pawn);
    pub const BLACK_KNIGHT: Self = Self::new(Color::Black, PieceKind::Knight);
    pub const BLACK_BISHOP: Self = Self::new(Color::Black, PieceKind::Bishop);
    pub const BLACK_ROOK: Self = Self::new(Color::Black, PieceKind::Rook);
    pub const BLACK_QUEEN: Self = Self::new(Color::Black, PieceKind::Queen);
    pub const BLACK_KING: Self = Self::new(Color::Black, PieceKind::King);

    /// Packed code of an empty square.
    pub const EMPTY_CODE: u8 = 0;

    #[inline(always)]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline(always)]
    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    /// Packs this [`Piece`] into its integer code.
    ///
    /// # Example
    /// ```
    /// # use rookery::Piece;
    /// assert_eq!(Piece::WHITE_KING.code(), 9);
    /// assert_eq!(Piece::BLACK_QUEEN.code(), 22);
    /// ```
    #[inline(always)]
    pub const fn code(&self) -> u8 {
        self.color.code() | self.kind.code()
    }

    /// Packs an optional piece, yielding [`Piece::EMPTY_CODE`] for `None`.
    #[inline(always)]
    pub const fn code_of(piece: Option<Self>) -> u8 {
        match piece {
            Some(piece) => piece.code(),
            None => Self::EMPTY_CODE,
        }
    }

    /// Unpacks an integer code.
    ///
    /// `0` is an empty square and yields `Ok(None)`. Any other code must carry exactly
    /// one color tag and one type value.
    ///
    /// # Example
    /// ```
    /// # use rookery::Piece;
    /// assert_eq!(Piece::from_code(13).unwrap(), Some(Piece::WHITE_ROOK));
    /// assert_eq!(Piece::from_code(0).unwrap(), None);
    /// assert!(Piece::from_code(24 | 1).is_err());
    /// ```
    pub fn from_code(code: u8) -> Result<Option<Self>> {
        if code == Self::EMPTY_CODE {
            return Ok(None);
        }

        let color = match code & (Color::WHITE_CODE | Color::BLACK_CODE) {
            Color::WHITE_CODE => Color::White,
            Color::BLACK_CODE => Color::Black,
            _ => bail!("Invalid piece code {code}: must carry exactly one color tag"),
        };
        let kind = PieceKind::from_code(code & !(Color::WHITE_CODE | Color::BLACK_CODE))?;

        Ok(Some(Self::new(color, kind)))
    }

    /// Creates a [`Piece`] from a FEN letter: uppercase for White, lowercase for Black.
    #[inline(always)]
    pub fn from_uci(piece: char) -> Result<Self> {
        let kind = PieceKind::from_uci(piece)?;
        Ok(Self::new(Color::from_case(piece), kind))
    }

    /// FEN letter of this [`Piece`].
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self.color {
            Color::White => self.kind.char().to_ascii_uppercase(),
            Color::Black => self.kind.char(),
        }
    }

    #[inline(always)]
    pub fn name(&self) -> String {
        format!("{} {}", self.color.name(), self.kind.name())
    }
}

impl FromStr for Piece {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_uci(c),
            _ => bail!("Invalid str for Piece: Must be a str of len 1. Got {s:?}"),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.char().fmt(f)
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" ({})", self.name(), self.code())
    }
}
