/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// The [`Game`] type: position state, legality filtering and move application.
mod game;

/// Pseudo-legal move generation for every piece kind.
mod movegen;

/// The [`Move`] type and its text formats.
mod moves;

/// Node counting over the legal-move tree.
mod perft;

/// Colors, piece kinds and packed piece codes.
mod piece;

/// The [`Board`] grid and placement parsing.
mod position;

/// Squares, files and ranks.
mod square;

/// Misc constants.
mod utils;

pub use game::*;
pub use movegen::*;
pub use moves::*;
pub use perft::*;
pub use piece::*;
pub use position::*;
pub use square::*;
pub use utils::*;
