/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use rookery::{perft_generic, Game};

fn test_perft_fen_nodes(depth: usize, fen: &str, expected: u64) {
    let mut game = Game::from_fen(fen).unwrap();
    let res = perft_generic::<false, false>(&mut game, depth);
    assert_eq!(res, expected, "PERFT({depth}) failed on {fen}");
}

/// Counts from the standard starting position.
///
/// No castling, en passant or promotion is reachable this early, so the counts
/// match those of full chess rules.
#[cfg(test)]
mod startpos_perft {
    use super::*;

    const FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn test_startpos_perft_1() {
        test_perft_fen_nodes(1, FEN, 20);
    }

    #[test]
    fn test_startpos_perft_2() {
        test_perft_fen_nodes(2, FEN, 400);
    }

    #[test]
    fn test_startpos_perft_3() {
        test_perft_fen_nodes(3, FEN, 8902);
    }

    #[test]
    fn test_startpos_perft_4() {
        test_perft_fen_nodes(4, FEN, 197281);
    }

    #[test]
    fn test_startpos_black_perft_1() {
        test_perft_fen_nodes(1, "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b", 20);
    }
}

/// An endgame where neither king stands on its home square.
///
/// At depth 3, full chess rules allow two en passant captures that are not generated here.
#[cfg(test)]
mod endgame_perft {
    use super::*;

    const FEN: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

    #[test]
    fn test_endgame_perft_1() {
        test_perft_fen_nodes(1, FEN, 14);
    }

    #[test]
    fn test_endgame_perft_2() {
        test_perft_fen_nodes(2, FEN, 191);
    }

    #[test]
    fn test_endgame_perft_3() {
        test_perft_fen_nodes(3, FEN, 2812 - 2);
    }
}

#[cfg(test)]
mod terminal_perft {
    use super::*;

    #[test]
    fn test_checkmate_has_no_nodes() {
        test_perft_fen_nodes(1, "3r3k/8/8/8/8/8/3q4/3K4 w", 0);
        test_perft_fen_nodes(2, "3r3k/8/8/8/8/8/3q4/3K4 w", 0);
    }

    #[test]
    fn test_stalemate_has_no_nodes() {
        test_perft_fen_nodes(1, "k7/2Q5/1K6/8/8/8/8/8 b", 0);
    }

    #[test]
    fn test_depth_zero_is_one_node() {
        test_perft_fen_nodes(0, "k7/2Q5/1K6/8/8/8/8/8 b", 1);
    }
}
