/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::str::FromStr;

use clap::Parser;

use crate::{Color, Piece, Square};

/// A command to be sent to the engine.
#[derive(Debug, Clone, Parser)]
#[command(
    multicall = true,
    about,
    rename_all = "lower",
    override_usage("<ENGINE COMMAND>")
)]
pub enum EngineCommand {
    /// Print a visual representation of the current board state.
    #[command(alias = "d")]
    Display,

    /// Pick up the piece under one pixel position and drop it on another.
    ///
    /// The move is only played if it is legal.
    #[command(allow_negative_numbers = true)]
    Drag { x1: i32, y1: i32, x2: i32, y2: i32 },

    /// Quit the engine.
    #[command(alias = "quit")]
    Exit,

    /// Generate and print a FEN string for the current position.
    Fen,

    /// Flips the side-to-move.
    Flip,

    /// Overwrite the cached square of a king.
    King { color: Color, square: Square },

    /// Apply the provided move to the game, then pass the turn.
    ///
    /// No enforcement of legality, so you can move a White piece twice in a row, if you want.
    MakeMove { mv_string: String },

    /// Shows all legal moves in the current position, or for a specific piece.
    Moves {
        square: Option<Square>,

        /// If set, moves will be sorted in alphabetical order.
        ///
        /// By default, moves are printed in generation order.
        #[arg(short, long, default_value = "false")]
        sort: bool,
    },

    /// Display the current value of the specified option.
    Option { name: String },

    /// Performs a perft on the current position at the supplied depth, printing total node count.
    Perft { depth: usize },

    /// Place a piece on the provided square.
    Place { piece: Piece, square: Square },

    /// Set up a new position from a piece-placement field and an optional side to move.
    ///
    /// Malformed placements are still loaded, with a warning.
    #[command(alias = "pos")]
    Position {
        placement: String,

        #[arg(default_value = "w")]
        side: Color,
    },

    /// Set the option `name` to `value`.
    #[command(allow_negative_numbers = true)]
    SetOption { name: String, value: String },

    /// Performs a split perft on the current position at the supplied depth.
    #[command(alias = "sperft")]
    Splitperft { depth: usize },

    /// List the image and pixel position of every piece on the board.
    Sprites,

    /// Report whether the side to move has any legal moves left.
    Status,

    /// Remove the piece at the provided square.
    Take { square: Square },
}

impl FromStr for EngineCommand {
    type Err = clap::Error;
    /// Attempt to parse an [`EngineCommand`] from a string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse_from(s.split_ascii_whitespace())
    }
}
