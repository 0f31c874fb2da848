/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::Index};

use anyhow::{bail, Result};

use super::{Color, File, Piece, Rank, Square, FEN_STARTPOS};

/// Represents the 8x8 grid of an in-progress chess game.
///
/// Has no knowledge of whose turn it is or where the kings are cached. If you
/// need those, see [`Game`](crate::Game).
///
/// Internally a mailbox of one optional [`Piece`] per [`Square`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    mailbox: [Option<Piece>; Square::COUNT],
}

impl Board {
    /// Creates a new, empty [`Board`] containing no pieces.
    ///
    /// # Example
    /// ```
    /// # use rookery::Board;
    /// let board = Board::new();
    /// assert_eq!(board.to_placement(), "8/8/8/8/8/8/8/8");
    /// ```
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            mailbox: [None; Square::COUNT],
        }
    }

    /// Builds a [`Board`] from a FEN piece-placement field.
    ///
    /// Parsing never fails. Reading stops at the first space, so a full FEN
    /// string may be supplied. A `/` moves to the next grid row and resets the
    /// file, digits `1`-`8` skip that many squares and piece letters place a
    /// piece. Any other character is ignored, and pieces that would land off
    /// the board are dropped.
    ///
    /// Use [`check_placement`] to find out whether a placement is well-formed.
    ///
    /// # Example
    /// ```
    /// # use rookery::{Board, Piece, Square};
    /// let board = Board::from_placement("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
    /// assert_eq!(board.piece_at(Square::E1), Some(Piece::WHITE_KING));
    /// assert_eq!(board.piece_at(Square::E8), Some(Piece::BLACK_KING));
    ///
    /// // Garbage is skipped rather than rejected
    /// let board = Board::from_placement("4k3/8/8/8/8/8/8/4K3?!");
    /// assert_eq!(board.to_placement(), "4k3/8/8/8/8/8/8/4K3");
    /// ```
    pub fn from_placement(placement: &str) -> Self {
        let mut board = Self::new();
        let mut row = 0;
        let mut col = 0;

        for c in placement.chars() {
            match c {
                ' ' => break,

                '/' => {
                    row += 1;
                    col = 0;
                }

                '1'..='8' => col += c as usize - '0' as usize,

                _ => {
                    let Ok(piece) = Piece::from_uci(c) else {
                        continue;
                    };

                    if let Some(square) = Square::from_grid(row, col) {
                        board.place(piece, square);
                    }
                    col += 1;
                }
            }
        }

        board
    }

    /// Writes this [`Board`] as a FEN piece-placement field.
    ///
    /// # Example
    /// ```
    /// # use rookery::Board;
    /// let board = Board::default();
    /// assert_eq!(board.to_placement(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR");
    /// ```
    pub fn to_placement(&self) -> String {
        let mut placements: [String; Rank::COUNT] = Default::default();

        for rank in Rank::iter() {
            let mut empty_spaces = 0;
            for file in File::iter() {
                if let Some(piece) = self.piece_at(Square::new(file, rank)) {
                    if empty_spaces != 0 {
                        placements[rank.index()] += &empty_spaces.to_string();
                        empty_spaces = 0;
                    }
                    placements[rank.index()].push(piece.char());
                } else {
                    empty_spaces += 1;
                }
            }

            if empty_spaces != 0 {
                placements[rank.index()] += &empty_spaces.to_string();
            }
        }
        placements.reverse();

        placements.join("/")
    }

    /// Returns `true` if there is a piece at the given [`Square`].
    #[inline(always)]
    pub const fn has(&self, square: Square) -> bool {
        self.mailbox[square.index()].is_some()
    }

    /// Fetches the [`Piece`] at the provided [`Square`], if there is one.
    ///
    /// # Example
    /// ```
    /// # use rookery::{Board, Piece, Square};
    /// let board = Board::default();
    /// assert_eq!(board.piece_at(Square::D8), Some(Piece::BLACK_QUEEN));
    /// assert!(board.piece_at(Square::E4).is_none());
    /// ```
    #[inline(always)]
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        self.mailbox[square.index()]
    }

    #[inline(always)]
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.mailbox[square].map(|piece| piece.color())
    }

    /// Places the provided [`Piece`] at the supplied [`Square`], replacing anything already there.
    ///
    /// # Example
    /// ```
    /// # use rookery::{Board, Piece, Square};
    /// let mut board = Board::new();
    /// board.place(Piece::WHITE_KNIGHT, Square::C1);
    /// assert_eq!(board.to_placement(), "8/8/8/8/8/8/8/2N5");
    /// ```
    #[inline(always)]
    pub fn place(&mut self, piece: Piece, square: Square) {
        self.mailbox[square] = Some(piece);
    }

    /// Takes the [`Piece`] from a given [`Square`], if there is one present.
    #[inline(always)]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.mailbox[square].take()
    }

    /// Moves whatever occupies `from` onto `to`, overwriting `to`.
    ///
    /// Nothing is checked: an empty `from` simply empties `to`.
    #[inline(always)]
    pub fn relocate(&mut self, from: Square, to: Square) {
        self.mailbox[to] = self.mailbox[from].take();
    }

    /// Iterates over every occupied square, from `a1` to `h8`.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
    }

    /// Finds the first king of `color` on the board by scanning every square.
    ///
    /// # Example
    /// ```
    /// # use rookery::{Board, Color, Square};
    /// let board = Board::default();
    /// assert_eq!(board.find_king(Color::White), Some(Square::E1));
    /// assert_eq!(board.find_king(Color::Black), Some(Square::E8));
    /// ```
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.iter()
            .find(|(_, piece)| piece.is_king() && piece.color() == color)
            .map(|(square, _)| square)
    }

    /// Packs this [`Board`] into rows of integer piece codes.
    ///
    /// Row `0` is rank 8, so the rows read in the same order as a placement field.
    ///
    /// # Example
    /// ```
    /// # use rookery::{Board, Piece};
    /// let codes = Board::default().codes();
    /// assert_eq!(codes[0][4], Piece::BLACK_KING.code());
    /// assert_eq!(codes[7][4], Piece::WHITE_KING.code());
    /// assert_eq!(codes[4], [0; 8]);
    /// ```
    pub fn codes(&self) -> [[u8; File::COUNT]; Rank::COUNT] {
        let mut codes = [[Piece::EMPTY_CODE; File::COUNT]; Rank::COUNT];

        for square in Square::iter() {
            codes[square.grid_row()][square.grid_col()] = Piece::code_of(self.piece_at(square));
        }

        codes
    }

    /// Rebuilds a [`Board`] from rows of integer piece codes, as produced by [`Board::codes`].
    pub fn from_codes(codes: &[[u8; File::COUNT]; Rank::COUNT]) -> Result<Self> {
        let mut board = Self::new();

        for (row, cells) in codes.iter().enumerate() {
            for (col, &code) in cells.iter().enumerate() {
                if let (Some(square), Some(piece)) = (Square::from_grid(row, col), Piece::from_code(code)?) {
                    board.place(piece, square);
                }
            }
        }

        Ok(board)
    }
}

/// Validates a FEN piece-placement field without building a [`Board`].
///
/// [`Board::from_placement`] accepts anything. This reports the problems it
/// would silently paper over: unknown characters, ranks that do not cover
/// exactly eight files, a rank count other than eight, and anything other than
/// exactly one king per side.
///
/// # Example
/// ```
/// # use rookery::check_placement;
/// assert!(check_placement("4k3/8/8/8/8/8/8/4K3").is_ok());
/// assert!(check_placement("4k3/8/8/8/8/8/8/4K2").is_err());
/// assert!(check_placement("8/8/8/8/8/8/8/4K3").is_err());
/// ```
pub fn check_placement(placement: &str) -> Result<()> {
    let placement = placement.split(' ').next().unwrap_or_default();
    let ranks = placement.split('/').collect::<Vec<_>>();

    if ranks.len() != Rank::COUNT {
        bail!(
            "Placement must describe {} ranks. Got {} in {placement:?}",
            Rank::COUNT,
            ranks.len()
        );
    }

    let mut kings = [0; Color::COUNT];

    for (row, rank) in ranks.iter().enumerate() {
        let mut files = 0;

        for c in rank.chars() {
            if let Some(empty) = c.to_digit(10).filter(|n| (1..=8).contains(n)) {
                files += empty as usize;
            } else if let Ok(piece) = Piece::from_uci(c) {
                if piece.is_king() {
                    kings[piece.color()] += 1;
                }
                files += 1;
            } else {
                bail!("Invalid char {c:?} in rank {} of placement {placement:?}", 8 - row);
            }
        }

        if files != File::COUNT {
            bail!(
                "Rank {} of placement {placement:?} covers {files} files instead of {}",
                8 - row,
                File::COUNT
            );
        }
    }

    for color in Color::all() {
        if kings[color] != 1 {
            bail!(
                "Placement {placement:?} must have exactly one {color} king. Found {}",
                kings[color]
            );
        }
    }

    Ok(())
}

impl Default for Board {
    #[inline(always)]
    fn default() -> Self {
        Self::from_placement(FEN_STARTPOS)
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self.mailbox[index]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut board = String::with_capacity(198);

        for rank in Rank::iter().rev() {
            board += &format!("{rank}| ");

            for file in File::iter() {
                let occupant = self
                    .piece_at(Square::new(file, rank))
                    .map(|piece| piece.char())
                    .unwrap_or('.');

                board += &format!("{occupant} ");
            }

            board += "\n"
        }
        board += " +";
        for _ in File::iter() {
            board += "--";
        }
        board += "\n   ";
        for file in File::iter() {
            board += &format!("{file} ");
        }

        write!(f, "{board}")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_placement())
    }
}
