/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// FEN string for the starting position of chess.
pub const FEN_STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Token for castling on the king's side of the board.
pub const SHORT_CASTLE: &str = "O-O";

/// Token for castling on the queen's side of the board.
pub const LONG_CASTLE: &str = "O-O-O";
