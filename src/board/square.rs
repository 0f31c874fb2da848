/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use anyhow::{bail, Context, Result};

use super::Color;

/// Represents a single square on an `8x8` chess board.
///
/// Squares are labeled file letter first, rank digit second (`"e4"`), and are
/// internally encoded as `file + rank * 8`:
/// ```text
/// 8| 56 57 58 59 60 61 62 63
/// 7| 48 49 50 51 52 53 54 55
/// 6| 40 41 42 43 44 45 46 47
/// 5| 32 33 34 35 36 37 38 39
/// 4| 24 25 26 27 28 29 30 31
/// 3| 16 17 18 19 20 21 22 23
/// 2|  8  9 10 11 12 13 14 15
/// 1|  0  1  2  3  4  5  6  7
///  +------------------------
///    a  b  c  d  e  f  g  h
/// ```
///
/// A placement string lists the board top-down, so grid row `0` is rank 8 and
/// grid row `7` is rank 1. [`Square::from_grid`], [`Square::grid_row`] and
/// [`Square::grid_col`] are the only conversions between the two layouts.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Square(pub(crate) u8);

impl Square {
    pub const A1: Self = Self::new(File::A, Rank::ONE);
    pub const B1: Self = Self::new(File::B, Rank::ONE);
    pub const C1: Self = Self::new(File::C, Rank::ONE);
    pub const D1: Self = Self::new(File::D, Rank::ONE);
    pub const E1: Self = Self::new(File::E, Rank::ONE);
    pub const F1: Self = Self::new(File::F, Rank::ONE);
    pub const G1: Self = Self::new(File::G, Rank::ONE);
    pub const H1: Self = Self::new(File::H, Rank::ONE);

    pub const A2: Self = Self::new(File::A, Rank::TWO);
    pub const B2: Self = Self::new(File::B, Rank::TWO);
    pub const D2: Self = Self::new(File::D, Rank::TWO);
    pub const E2: Self = Self::new(File::E, Rank::TWO);
    pub const H2: Self = Self::new(File::H, Rank::TWO);

    pub const E3: Self = Self::new(File::E, Rank::THREE);
    pub const A4: Self = Self::new(File::A, Rank::FOUR);
    pub const D4: Self = Self::new(File::D, Rank::FOUR);
    pub const E4: Self = Self::new(File::E, Rank::FOUR);
    pub const D5: Self = Self::new(File::D, Rank::FIVE);
    pub const E5: Self = Self::new(File::E, Rank::FIVE);

    pub const A7: Self = Self::new(File::A, Rank::SEVEN);
    pub const E7: Self = Self::new(File::E, Rank::SEVEN);

    pub const A8: Self = Self::new(File::A, Rank::EIGHT);
    pub const B8: Self = Self::new(File::B, Rank::EIGHT);
    pub const C8: Self = Self::new(File::C, Rank::EIGHT);
    pub const D8: Self = Self::new(File::D, Rank::EIGHT);
    pub const E8: Self = Self::new(File::E, Rank::EIGHT);
    pub const F8: Self = Self::new(File::F, Rank::EIGHT);
    pub const G8: Self = Self::new(File::G, Rank::EIGHT);
    pub const H8: Self = Self::new(File::H, Rank::EIGHT);

    pub const MIN: u8 = 0;
    pub const MAX: u8 = 63;
    pub const COUNT: usize = 64;

    const FILE_MASK: u8 = 0b0000_0111;
    const RANK_MASK: u8 = 0b0011_1000;

    /// Returns an iterator over all squares, from `a1` to `h8`.
    ///
    /// # Example
    /// ```
    /// # use rookery::Square;
    /// let mut iter = Square::iter();
    /// assert_eq!(iter.len(), 64);
    /// assert_eq!(iter.next().unwrap(), Square::A1);
    /// assert_eq!(iter.last().unwrap(), Square::H8);
    /// ```
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    /// Creates a new [`Square`] from the provided [`File`] and [`Rank`].
    #[inline(always)]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self(file.0 | rank.0 << 3)
    }

    #[inline(always)]
    pub fn from_index(index: usize) -> Result<Self> {
        if index >= Self::COUNT {
            bail!(
                "Invalid index for Square: Must be between [{}, {}]. Got {index}",
                Self::MIN,
                Self::MAX
            );
        }
        Ok(Self(index as u8))
    }

    /// Creates the [`Square`] found at `row` and `col` of a top-down grid.
    ///
    /// Returns `None` if either coordinate is off the board.
    ///
    /// # Example
    /// ```
    /// # use rookery::Square;
    /// assert_eq!(Square::from_grid(0, 0), Some(Square::A8));
    /// assert_eq!(Square::from_grid(7, 4), Some(Square::E1));
    /// assert_eq!(Square::from_grid(8, 0), None);
    /// ```
    #[inline(always)]
    pub const fn from_grid(row: usize, col: usize) -> Option<Self> {
        if row > Rank::MAX as usize || col > File::MAX as usize {
            return None;
        }

        Some(Self::new(
            File::new_unchecked(col as u8),
            Rank::new_unchecked(Rank::MAX - row as u8),
        ))
    }

    /// Row of this [`Square`] in a top-down grid (`0` for rank 8).
    #[inline(always)]
    pub const fn grid_row(&self) -> usize {
        (Rank::MAX - self.rank().0) as usize
    }

    /// Column of this [`Square`] in a top-down grid (`0` for the a-file).
    #[inline(always)]
    pub const fn grid_col(&self) -> usize {
        self.file().0 as usize
    }

    /// Flips this square's rank if `color` is Black, so that White-relative
    /// constants (`E1`, `G1`, ...) can be reused for both sides.
    ///
    /// # Example
    /// ```
    /// # use rookery::{Color, Square};
    /// assert_eq!(Square::G1.rank_relative_to(Color::Black), Square::G8);
    /// assert_eq!(Square::G1.rank_relative_to(Color::White), Square::G1);
    /// ```
    #[inline(always)]
    pub const fn rank_relative_to(self, color: Color) -> Self {
        match color {
            Color::White => self,
            Color::Black => Self(self.0 ^ Self::RANK_MASK),
        }
    }

    #[inline(always)]
    pub const fn file(&self) -> File {
        File(self.0 & Self::FILE_MASK)
    }

    #[inline(always)]
    pub const fn rank(&self) -> Rank {
        Rank(self.0 >> 3)
    }

    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Parses a two-character label such as `"e4"`.
    #[inline(always)]
    pub fn from_uci(square: &str) -> Result<Self> {
        let mut chars = square.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            bail!("Invalid Square string: String must contain exactly 2 characters. Got {square:?}")
        };

        Ok(Self::new(File::from_char(file)?, Rank::from_char(rank)?))
    }

    #[inline(always)]
    pub fn to_uci(self) -> String {
        format!("{}{}", self.file(), self.rank())
    }

    /// Returns the square `file_delta` files and `rank_delta` ranks away, if it is on the board.
    ///
    /// # Example
    /// ```
    /// # use rookery::Square;
    /// assert_eq!(Square::E2.offset(0, 2), Some(Square::E4));
    /// assert_eq!(Square::A1.offset(-1, 0), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let Some(file) = self.file().offset(file_delta) else {
            return None;
        };

        let Some(rank) = self.rank().offset(rank_delta) else {
            return None;
        };

        Some(Self::new(file, rank))
    }

    /// Returns the square `n` ranks ahead of this one, from `color`'s point of view.
    #[inline(always)]
    pub const fn forward_by(&self, color: Color, n: i8) -> Option<Self> {
        self.offset(0, n * color.forward())
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}

impl TryFrom<&str> for Square {
    type Error = anyhow::Error;
    #[inline(always)]
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_uci(value)
    }
}

impl<T> Index<Square> for [T; Square::COUNT] {
    type Output = T;
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Square> for [T; Square::COUNT] {
    #[inline(always)]
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self, self.0)
    }
}

/// A horizontal row of the board, `1` through `8`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Rank(pub(crate) u8);

impl Rank {
    pub const ONE: Self = Self(0);
    pub const TWO: Self = Self(1);
    pub const THREE: Self = Self(2);
    pub const FOUR: Self = Self(3);
    pub const FIVE: Self = Self(4);
    pub const SIX: Self = Self(5);
    pub const SEVEN: Self = Self(6);
    pub const EIGHT: Self = Self(7);

    pub const MIN: u8 = 0;
    pub const MAX: u8 = 7;
    pub const COUNT: usize = 8;

    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    #[inline(always)]
    pub fn new(rank: u8) -> Result<Self> {
        if rank > Self::MAX {
            bail!(
                "Invalid int for Rank: Must be between [{}, {}]. Got {rank}",
                Self::MIN,
                Self::MAX
            );
        }

        Ok(Self::new_unchecked(rank))
    }

    #[inline(always)]
    pub const fn new_unchecked(rank: u8) -> Self {
        Self(rank)
    }

    /// The rank `color`'s pawns start on.
    #[inline(always)]
    pub const fn second(color: Color) -> Self {
        match color {
            Color::White => Self::TWO,
            Color::Black => Self::SEVEN,
        }
    }

    #[inline(always)]
    pub fn from_char(rank: char) -> Result<Self> {
        let rank_int = rank.to_digit(10).context(format!(
            "Invalid char for Rank: Must be between [1, 8]. Got {rank:?}"
        ))?;

        let rank = rank_int.checked_sub(1).context(format!(
            "Invalid char for Rank: Must be between [1, 8]. Got {rank:?}"
        ))?;

        Self::new(rank as u8)
    }

    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub const fn char(&self) -> char {
        (self.0 + b'1') as char
    }

    #[inline(always)]
    pub const fn offset(self, delta: i8) -> Option<Self> {
        match self.0.checked_add_signed(delta) {
            Some(bits) if bits <= Self::MAX => Some(Self::new_unchecked(bits)),
            _ => None,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.char().fmt(f)
    }
}

impl fmt::Debug for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.char(), self.0)
    }
}

/// A vertical column of the board, `a` through `h`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct File(pub(crate) u8);

impl File {
    pub const A: Self = Self(0);
    pub const B: Self = Self(1);
    pub const C: Self = Self(2);
    pub const D: Self = Self(3);
    pub const E: Self = Self(4);
    pub const F: Self = Self(5);
    pub const G: Self = Self(6);
    pub const H: Self = Self(7);

    pub const MIN: u8 = 0;
    pub const MAX: u8 = 7;
    pub const COUNT: usize = 8;

    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    #[inline(always)]
    pub fn new(file: u8) -> Result<Self> {
        if file > Self::MAX {
            bail!(
                "Invalid int for File: Must be between [{}, {}]. Got {file}",
                Self::MIN,
                Self::MAX
            );
        }
        Ok(Self::new_unchecked(file))
    }

    #[inline(always)]
    pub const fn new_unchecked(file: u8) -> Self {
        Self(file)
    }

    #[inline(always)]
    pub fn from_char(file: char) -> Result<Self> {
        if !file.is_ascii_lowercase() {
            bail!("Invalid char for File: Must be between ['a', 'h']. Got {file:?}");
        }

        Self::new(file as u8 - b'a')
            .with_context(|| format!("Invalid char for File: Must be between ['a', 'h']. Got {file:?}"))
    }

    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub const fn char(&self) -> char {
        (self.0 + b'a') as char
    }

    #[inline(always)]
    pub const fn offset(self, delta: i8) -> Option<Self> {
        match self.0.checked_add_signed(delta) {
            Some(bits) if bits <= Self::MAX => Some(Self::new_unchecked(bits)),
            _ => None,
        }
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.char().fmt(f)
    }
}

impl fmt::Debug for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.char(), self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squares() {
        // Test the four corners
        let a1 = Square::new(File(0), Rank(0));
        assert_eq!(a1.to_string(), "a1");

        let h1 = Square::new(File(7), Rank(0));
        assert_eq!(h1.to_string(), "h1");

        let a8 = Square::new(File(0), Rank(7));
        assert_eq!(a8.to_string(), "a8");

        let h8 = Square::new(File(7), Rank(7));
        assert_eq!(h8.to_string(), "h8");

        // And some arbitrary location near the middle
        let d4 = Square::new(File(3), Rank(3));
        assert_eq!(d4.to_string(), "d4")
    }

    #[test]
    fn test_parsing() {
        assert_eq!(Rank::ONE, Rank::from_char('1').unwrap());
        assert_eq!(Rank::EIGHT, Rank::from_char('8').unwrap());
        assert_eq!(File::A, File::from_char('a').unwrap());
        assert_eq!(File::H, File::from_char('h').unwrap());

        assert!(Rank::from_char('0').is_err());
        assert!(Rank::from_char('9').is_err());
        assert!(File::from_char('z').is_err());
        assert!(File::from_char('E').is_err());

        assert_eq!(Square::try_from("a1").unwrap(), Square::A1);
        assert_eq!(Square::try_from("h8").unwrap(), Square::H8);
        assert_eq!(Square::try_from("d4").unwrap(), Square::D4);

        // Rank-first labels are not accepted
        assert!(Square::try_from("4d").is_err());
        assert!(Square::try_from("a").is_err());
        assert!(Square::try_from("a10").is_err());
        assert!(Square::try_from("").is_err());
        assert!(Square::from_index(64).is_err());
    }

    #[test]
    fn test_grid_mapping_is_invertible() {
        for square in Square::iter() {
            let (row, col) = (square.grid_row(), square.grid_col());
            assert_eq!(Square::from_grid(row, col), Some(square));
        }

        for row in 0..8 {
            for col in 0..8 {
                let square = Square::from_grid(row, col).unwrap();
                assert_eq!((square.grid_row(), square.grid_col()), (row, col));
            }
        }

        assert_eq!(Square::from_grid(0, 8), None);
    }

    #[test]
    fn test_grid_mapping_matches_castling_squares() {
        // The castling destinations live on the last grid row for White and the first for Black
        assert_eq!((Square::G1.grid_row(), Square::G1.grid_col()), (7, 6));
        assert_eq!((Square::C1.grid_row(), Square::C1.grid_col()), (7, 2));
        assert_eq!((Square::G8.grid_row(), Square::G8.grid_col()), (0, 6));
        assert_eq!((Square::C8.grid_row(), Square::C8.grid_col()), (0, 2));
    }

    #[test]
    fn test_offsets() {
        assert_eq!(Square::E2.forward_by(Color::White, 2), Some(Square::E4));
        assert_eq!(Square::E7.forward_by(Color::Black, 1), Some(Square::E7.offset(0, -1).unwrap()));
        assert_eq!(Square::H8.offset(1, 0), None);
        assert_eq!(Square::A1.offset(0, -1), None);
        assert_eq!(Square::D4.offset(1, 1).unwrap().to_string(), "e5");
    }

    #[test]
    fn test_indexing() {
        let mut board = [0; 64];
        board[Square::D5] = u8::MAX;
        assert_eq!(board[35], u8::MAX);
    }
}
