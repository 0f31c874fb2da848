/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// The rules engine: pieces, squares, the board, move generation and legality.
mod board;

/// Commands understood by the text front-end.
mod cli;

/// Code related to the engine's functionality, such as user input handling.
mod engine;

/// Presentation adapter: pixel layout, hit-testing and drag-and-drop.
mod view;

pub use board::*;
pub use cli::*;
pub use engine::*;
pub use view::*;
