/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, path::PathBuf};

use anyhow::{anyhow, bail, Result};

use crate::{Color, File, Game, Move, Piece, Square};

/// Fill color of light squares, as RGB.
pub const LIGHT_SQUARE: [u8; 3] = [240, 217, 181];

/// Fill color of dark squares, as RGB.
pub const DARK_SQUARE: [u8; 3] = [181, 136, 99];

/// A pixel position on the drawing surface.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline(always)]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Layout settings of the on-screen board.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ViewConfig {
    /// Width and height of a single square, in pixels.
    pub square_size: u32,

    /// Top-left corner of the `a8` square.
    pub origin: Point,

    /// Directory holding the piece sprites.
    pub images_dir: PathBuf,
}

impl ViewConfig {
    /// Ensures every pixel of the board, from its origin to the far corner, fits in an `i32`.
    ///
    /// # Example
    /// ```
    /// # use rookery::*;
    /// assert!(ViewConfig::default().validate().is_ok());
    ///
    /// let config = ViewConfig { square_size: 1_000_000_000, ..Default::default() };
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.square_size == 0 {
            bail!("Square size must be positive");
        }

        let extent = i32::try_from(self.square_size)
            .ok()
            .and_then(|size| size.checked_mul(File::COUNT as i32))
            .ok_or(anyhow!("Square size {} does not fit on the drawing surface", self.square_size))?;

        for (axis, start) in [("x", self.origin.x), ("y", self.origin.y)] {
            if start.checked_add(extent).is_none() {
                bail!(
                    "Board spanning {extent} pixels from {axis} = {start} does not fit on the drawing surface"
                );
            }
        }

        Ok(())
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            square_size: 75,
            origin: Point::new(250, 100),
            images_dir: PathBuf::from("images"),
        }
    }
}

/// A drawable piece: where it stands, which image to draw and where to draw it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Sprite {
    pub square: Square,
    pub piece: Piece,
    pub path: PathBuf,
    pub position: Point,
}

/// Presentation adapter over a [`Game`].
///
/// Translates pixel positions into squares and drags into move queries. It never
/// edits the board directly: a dropped piece is only moved if the resulting move is
/// in the legal-move list, and then through [`Game::play_move`].
///
/// The board is drawn with rank 8 at the top, so grid row `0` is the top row of squares.
#[derive(Debug)]
pub struct BoardView<'a> {
    game: &'a mut Game,
    config: &'a ViewConfig,
}

impl<'a> BoardView<'a> {
    #[inline(always)]
    pub fn new(game: &'a mut Game, config: &'a ViewConfig) -> Self {
        Self { game, config }
    }

    #[inline(always)]
    pub fn game(&self) -> &Game {
        &*self.game
    }

    #[inline(always)]
    fn size(&self) -> i32 {
        i32::try_from(self.config.square_size)
            .unwrap_or(i32::MAX)
            .max(1)
    }

    /// Grid row and column under `point`, which may lie off the board.
    #[inline(always)]
    fn cell(&self, point: Point) -> (i32, i32) {
        let size = self.size();
        (
            point.y.saturating_sub(self.config.origin.y).div_euclid(size),
            point.x.saturating_sub(self.config.origin.x).div_euclid(size),
        )
    }

    /// The square under `point`, or `None` if `point` is off the board.
    ///
    /// # Example
    /// ```
    /// # use rookery::*;
    /// let mut game = Game::default();
    /// let config = ViewConfig::default();
    /// let view = BoardView::new(&mut game, &config);
    /// assert_eq!(view.square_at(Point::new(260, 110)), Some(Square::A8));
    /// assert_eq!(view.square_at(Point::new(249, 110)), None);
    /// ```
    pub fn square_at(&self, point: Point) -> Option<Square> {
        let (row, col) = self.cell(point);
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        Square::from_grid(row, col)
    }

    /// The square whose center is closest to `point`, wherever `point` is.
    pub fn closest_square(&self, point: Point) -> Square {
        let (row, col) = self.cell(point);
        let row = row.clamp(0, 7) as usize;
        let col = col.clamp(0, 7) as usize;

        // Both coordinates were clamped onto the board
        Square::from_grid(row, col).unwrap_or_default()
    }

    /// Top-left pixel of `square`.
    ///
    /// Saturates at the edge of the `i32` range for layouts that fail [`ViewConfig::validate`].
    pub fn square_origin(&self, square: Square) -> Point {
        let size = self.size();
        let offset = |cells: usize| (cells as i32).saturating_mul(size);

        Point::new(
            self.config.origin.x.saturating_add(offset(square.grid_col())),
            self.config.origin.y.saturating_add(offset(square.grid_row())),
        )
    }

    /// Center pixel of `square`.
    pub fn square_center(&self, square: Square) -> Point {
        let origin = self.square_origin(square);
        let half = self.size() / 2;
        Point::new(origin.x.saturating_add(half), origin.y.saturating_add(half))
    }

    /// Fill color of `square`.
    pub fn square_shade(&self, square: Square) -> [u8; 3] {
        if (square.grid_row() + square.grid_col()) % 2 == 0 {
            LIGHT_SQUARE
        } else {
            DARK_SQUARE
        }
    }

    /// Image file drawn for `piece`.
    ///
    /// # Example
    /// ```
    /// # use rookery::*;
    /// let mut game = Game::default();
    /// let config = ViewConfig::default();
    /// let view = BoardView::new(&mut game, &config);
    /// assert!(view.sprite_path(Piece::WHITE_PAWN).ends_with("Chess_plt60.png"));
    /// assert!(view.sprite_path(Piece::BLACK_KING).ends_with("Chess_kdt60.png"));
    /// ```
    pub fn sprite_path(&self, piece: Piece) -> PathBuf {
        let shade = match piece.color() {
            Color::White => 'l',
            Color::Black => 'd',
        };

        self.config
            .images_dir
            .join(format!("Chess_{}{shade}t60.png", piece.kind().char()))
    }

    /// Every piece on the board, ready to draw.
    pub fn sprites(&self) -> Vec<Sprite> {
        self.game
            .board()
            .iter()
            .map(|(square, piece)| Sprite {
                square,
                piece,
                path: self.sprite_path(piece),
                position: self.square_origin(square),
            })
            .collect()
    }

    /// Squares the piece on `square` may legally move to, for highlighting on pick-up.
    pub fn targets_from(&mut self, square: Square) -> Vec<Square> {
        let color = self.game.side_to_move();
        self.game
            .legal_moves_from(square)
            .into_iter()
            .map(|mv| mv.destination(color))
            .collect()
    }

    /// Handles a piece picked up at `from` and dropped at `to`.
    ///
    /// The drop snaps to the closest square. If the resulting move is legal it is played
    /// (passing the turn) and returned. Otherwise the game is left untouched.
    pub fn drop_piece(&mut self, from: Point, to: Point) -> Result<Move> {
        let origin = self
            .square_at(from)
            .ok_or(anyhow!("Nothing can be picked up at {from}: it is off the board"))?;
        let destination = self.closest_square(to);

        let color = self.game.side_to_move();
        let Some(mv) = self
            .game
            .legal_moves()
            .iter()
            .copied()
            .find(|mv| mv.origin(color) == origin && mv.destination(color) == destination)
        else {
            bail!("{origin}{destination} is not a legal move for {color}");
        };

        self.game.play_move(mv);
        Ok(mv)
    }
}
