/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{Board, Color, Move, MoveList, PieceKind, Rank, Square};

/// Deltas for the movement of the Queen.
const QUEEN_DELTAS: [(i8, i8); 8] = [
    /* Rook */
    (1, 0),
    (0, -1),
    (-1, 0),
    (0, 1),
    /* Bishop */
    (1, 1),
    (1, -1),
    (-1, -1),
    (-1, 1),
];

/// Deltas for the movement of the Rook.
const ROOK_DELTAS: [(i8, i8); 4] = [
    QUEEN_DELTAS[0],
    QUEEN_DELTAS[1],
    QUEEN_DELTAS[2],
    QUEEN_DELTAS[3],
];

/// Deltas for the movement of the Bishop.
const BISHOP_DELTAS: [(i8, i8); 4] = [
    QUEEN_DELTAS[4],
    QUEEN_DELTAS[5],
    QUEEN_DELTAS[6],
    QUEEN_DELTAS[7],
];

/// Deltas for the movement of the Knight.
const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (1, -2),
    (2, 1),
    (2, -1),
    (-1, 2),
    (-1, -2),
    (-2, 1),
    (-2, -1),
];

/// Deltas for the movement of the King. Same directions as the Queen, one step at a time.
const KING_DELTAS: [(i8, i8); 8] = QUEEN_DELTAS;

/// Squares that must be empty for each castling token, relative to White.
const SHORT_CASTLE_PATH: [Square; 2] = [Square::F1, Square::G1];
const LONG_CASTLE_PATH: [Square; 3] = [Square::B1, Square::C1, Square::D1];

/// Appends every pseudo-legal move of `color` on `board` to `moves`.
///
/// Pseudo-legal moves follow the movement rules of each piece but ignore whether
/// they leave the mover's own king capturable.
///
/// # Example
/// ```
/// # use rookery::*;
/// let mut moves = MoveList::new();
/// generate_pseudo_legal(&Board::default(), Color::White, &mut moves);
/// assert_eq!(moves.len(), 20);
/// ```
pub fn generate_pseudo_legal(board: &Board, color: Color, moves: &mut MoveList) {
    for (square, piece) in board.iter() {
        if piece.color() == color {
            generate_pseudo_legal_from(board, square, moves);
        }
    }
}

/// Appends every pseudo-legal move of the piece on `square` to `moves`.
///
/// Does nothing if `square` is empty.
pub fn generate_pseudo_legal_from(board: &Board, square: Square, moves: &mut MoveList) {
    let Some(piece) = board.piece_at(square) else {
        return;
    };
    let color = piece.color();

    match piece.kind() {
        PieceKind::Pawn => generate_pawn_moves(board, square, color, moves),

        PieceKind::Knight => generate_leaper_moves(board, square, color, &KNIGHT_DELTAS, moves),

        PieceKind::King => {
            generate_leaper_moves(board, square, color, &KING_DELTAS, moves);
            generate_castling_moves(board, square, color, moves);
        }

        kind => {
            if kind.is_orthogonal_slider() {
                generate_slider_moves(board, square, color, &ROOK_DELTAS, moves);
            }
            if kind.is_diagonal_slider() {
                generate_slider_moves(board, square, color, &BISHOP_DELTAS, moves);
            }
        }
    }
}

/// Returns `true` if `color` may land on `square`: it is empty or holds an opposing piece.
#[inline(always)]
fn is_open_to(board: &Board, square: Square, color: Color) -> bool {
    board.color_at(square) != Some(color)
}

/// Returns `true` if `square` holds a piece of the opposite color.
#[inline(always)]
fn is_enemy_of(board: &Board, square: Square, color: Color) -> bool {
    board.color_at(square) == Some(color.opponent())
}

/// Single and double pushes onto empty squares, and diagonal captures of enemy pieces.
///
/// No en passant and no promotion: a pawn on the last rank has no forward moves.
fn generate_pawn_moves(board: &Board, from: Square, color: Color, moves: &mut MoveList) {
    if let Some(single) = from.forward_by(color, 1).filter(|&to| !board.has(to)) {
        moves.push(Move::new(from, single));

        if from.rank() == Rank::second(color) {
            if let Some(double) = from.forward_by(color, 2).filter(|&to| !board.has(to)) {
                moves.push(Move::new(from, double));
            }
        }
    }

    for file_delta in [-1, 1] {
        if let Some(to) = from.offset(file_delta, color.forward()) {
            if is_enemy_of(board, to, color) {
                moves.push(Move::new(from, to));
            }
        }
    }
}

/// Single steps by each delta onto squares that are empty or hold an enemy piece.
///
/// The opposing king is a valid target here; the legality filter relies on it.
fn generate_leaper_moves(
    board: &Board,
    from: Square,
    color: Color,
    deltas: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(df, dr) in deltas {
        if let Some(to) = from.offset(df, dr) {
            if is_open_to(board, to, color) {
                moves.push(Move::new(from, to));
            }
        }
    }
}

/// Castling tokens for a king standing on its home square.
///
/// Only the squares between king and corner are checked. The corner itself,
/// earlier king or rook moves, and attacked squares are not considered.
fn generate_castling_moves(board: &Board, from: Square, color: Color, moves: &mut MoveList) {
    if from != Square::E1.rank_relative_to(color) {
        return;
    }

    let is_clear = |path: &[Square]| {
        path.iter()
            .all(|square| !board.has(square.rank_relative_to(color)))
    };

    if is_clear(&SHORT_CASTLE_PATH) {
        moves.push(Move::ShortCastle);
    }

    if is_clear(&LONG_CASTLE_PATH) {
        moves.push(Move::LongCastle);
    }
}

/// Casts a ray along each delta until the edge of the board or the first occupied square.
///
/// The blocking square is included only if it holds an enemy piece.
fn generate_slider_moves(
    board: &Board,
    from: Square,
    color: Color,
    deltas: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(df, dr) in deltas {
        let mut ray = from;

        while let Some(to) = ray.offset(df, dr) {
            match board.color_at(to) {
                None => moves.push(Move::new(from, to)),

                Some(blocker) => {
                    if blocker != color {
                        moves.push(Move::new(from, to));
                    }
                    break;
                }
            }

            ray = to;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moves_from(placement: &str, square: Square) -> MoveList {
        let mut moves = MoveList::new();
        generate_pseudo_legal_from(&Board::from_placement(placement), square, &mut moves);
        moves.sort();
        moves
    }

    fn destinations(placement: &str, square: Square) -> Vec<String> {
        let mut to = moves_from(placement, square)
            .into_iter()
            .map(|mv| mv.destination(Color::White).to_string())
            .collect::<Vec<_>>();
        to.sort();
        to
    }

    #[test]
    fn test_startpos_counts() {
        let board = Board::default();

        for color in Color::all() {
            let mut moves = MoveList::new();
            generate_pseudo_legal(&board, color, &mut moves);
            assert_eq!(moves.len(), 20, "{color} should have 20 moves");
        }
    }

    #[test]
    fn test_pawn_pushes() {
        assert_eq!(destinations("8/8/8/8/8/8/4P3/8", Square::E2), ["e3", "e4"]);
        assert_eq!(destinations("8/4p3/8/8/8/8/8/8", Square::E7), ["e5", "e6"]);

        // Only a single push off the starting rank
        assert_eq!(destinations("8/8/8/8/8/4P3/8/8", Square::E3), ["e4"]);

        // Blocked on the second square
        assert_eq!(destinations("8/8/8/8/4n3/8/4P3/8", Square::E2), ["e3"]);

        // Blocked on the first square stops the double push as well
        assert!(destinations("8/8/8/8/8/4n3/4P3/8", Square::E2).is_empty());

        // A pawn on the last rank is stuck
        assert!(destinations("4P3/8/8/8/8/8/8/8", Square::E8).is_empty());
    }

    #[test]
    fn test_pawn_captures() {
        // Enemy on one diagonal, friend on the other
        assert_eq!(
            destinations("8/8/8/8/8/3p1N2/4P3/8", Square::E2),
            ["d3", "e3", "e4"]
        );

        // Black captures downward
        assert_eq!(destinations("8/8/8/3p4/2P1P3/8/8/8", Square::D5), ["c4", "d4", "e4"]);

        // Edge files only look inward
        assert_eq!(destinations("8/8/8/8/8/1p6/P7/8", Square::A2), ["a3", "a4", "b3"]);
    }

    #[test]
    fn test_knight_moves() {
        assert_eq!(destinations("8/8/8/8/8/8/8/N7", Square::A1), ["b3", "c2"]);
        assert_eq!(moves_from("8/8/8/3N4/8/8/8/8", Square::D5).len(), 8);

        // Friendly pieces are excluded, enemy pieces are captured
        assert_eq!(destinations("8/8/8/8/8/1P6/2p5/N7", Square::A1), ["c2"]);
    }

    #[test]
    fn test_king_moves() {
        assert_eq!(destinations("8/8/8/8/8/8/8/7K", Square::H1), ["g1", "g2", "h2"]);
        assert_eq!(moves_from("8/8/8/3K4/8/8/8/8", Square::D5).len(), 8);

        // The enemy king is a capture target
        assert_eq!(destinations("8/8/8/8/8/8/6k1/7K", Square::H1), ["g1", "g2", "h2"]);
    }

    #[test]
    fn test_castling_gates() {
        // Both sides clear, with or without rooks
        let moves = moves_from("r3k2r/8/8/8/8/8/8/4K3", Square::E1);
        assert!(moves.contains(&Move::ShortCastle));
        assert!(moves.contains(&Move::LongCastle));

        let moves = moves_from("r3k2r/8/8/8/8/8/8/4K3", Square::E8);
        assert!(moves.contains(&Move::ShortCastle));
        assert!(moves.contains(&Move::LongCastle));

        // Anything between king and corner blocks that side
        let moves = moves_from("8/8/8/8/8/8/8/1N2K1B1", Square::E1);
        assert!(!moves.contains(&Move::ShortCastle));
        assert!(!moves.contains(&Move::LongCastle));

        // A piece on the corner itself does not
        let moves = moves_from("8/8/8/8/8/8/8/n3K2n", Square::E1);
        assert!(moves.contains(&Move::ShortCastle));
        assert!(moves.contains(&Move::LongCastle));

        // A king away from home never castles
        let moves = moves_from("8/8/8/8/8/8/8/5K2", Square::F1);
        assert!(!moves.iter().any(Move::is_castle));
    }

    #[test]
    fn test_slider_rays_stop_at_first_piece() {
        // Friendly blocker on d6 is excluded, enemy blocker on g4 is included
        assert_eq!(
            destinations("8/8/3P4/8/3R2p1/8/8/8", Square::D4),
            ["a4", "b4", "c4", "d1", "d2", "d3", "d5", "e4", "f4", "g4"]
        );

        assert_eq!(
            destinations("8/8/8/8/8/2p5/1B6/8", Square::B2),
            ["a1", "a3", "c1", "c3"]
        );

        assert_eq!(moves_from("8/8/8/8/3Q4/8/8/8", Square::D4).len(), 27);
    }

    #[test]
    fn test_queen_moves_as_rook_and_bishop_combined() {
        for (queen, rook, bishop) in [
            ("8/8/8/8/3Q4/8/8/8", "8/8/8/8/3R4/8/8/8", "8/8/8/8/3B4/8/8/8"),
            ("8/1p4P1/8/8/p2Q1P2/8/5n2/3N4", "8/1p4P1/8/8/p2R1P2/8/5n2/3N4", "8/1p4P1/8/8/p2B1P2/8/5n2/3N4"),
        ] {
            let mut combined = destinations(rook, Square::D4);
            combined.extend(destinations(bishop, Square::D4));
            combined.sort();

            assert_eq!(destinations(queen, Square::D4), combined, "{queen}");
        }

        assert!(PieceKind::Queen.is_orthogonal_slider() && PieceKind::Queen.is_diagonal_slider());
        assert!(!PieceKind::Knight.is_orthogonal_slider() && !PieceKind::Knight.is_diagonal_slider());
    }

    #[test]
    fn test_enclosed_rook_has_no_moves() {
        assert!(moves_from("8/8/8/3P4/2PRP3/3P4/8/8", Square::D4).is_empty());
        assert!(moves_from("8/8/8/8/8/8/P7/RN6", Square::A1).is_empty());
    }

    #[test]
    fn test_empty_square_has_no_moves() {
        assert!(moves_from("8/8/8/8/8/8/8/8", Square::D4).is_empty());
    }
}
