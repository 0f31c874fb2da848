/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::Game;

/// Perform a perft at the specified depth, collecting only data about the number of possible positions (nodes).
///
/// This performs bulk counting, meaning that, at depth 1, it returns the number of available moves,
/// rather than making them, recursing again, and returning 1 for each terminal case.
///
/// The game is left exactly as it was found.
#[inline(always)]
pub fn perft(game: &mut Game, depth: usize) -> u64 {
    perft_generic::<true, false>(game, depth)
}

/// Perform a splitperft at the specified depth, printing the number of nodes reachable
/// after each move available at the root node.
#[inline(always)]
pub fn splitperft(game: &mut Game, depth: usize) -> u64 {
    perft_generic::<true, true>(game, depth)
}

/// Generic version of `perft` that allows you to specify whether to perform bulk counting and splitperft.
///
/// If `BULK` is set to `true`, this will perform bulk counting.
/// If `SPLIT` is set to `true`, this will perform a splitperft.
pub fn perft_generic<const BULK: bool, const SPLIT: bool>(game: &mut Game, depth: usize) -> u64 {
    // Bulk counting; no need to recurse again just to apply a singular move and return 1.
    if BULK && !SPLIT && depth == 1 {
        return game.legal_moves().len() as u64;
    }
    // Recursion limit; return 1, since we're fathoming this node.
    else if depth == 0 {
        return 1;
    }

    // The legal list is regenerated by every child, so it must be copied out first
    let moves = game.legal_moves().to_vec();
    let snapshot = game.snapshot();

    moves.into_iter().fold(0, |nodes, mv| {
        game.play_move(mv);
        let new_nodes = perft_generic::<BULK, false>(game, depth - 1);
        game.restore(snapshot);

        if SPLIT {
            println!("{mv}\t{new_nodes}");
        }

        nodes + new_nodes
    })
}
