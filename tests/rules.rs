/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use rookery::*;

fn sorted(moves: impl IntoIterator<Item = Move>) -> Vec<String> {
    let mut moves = moves.into_iter().map(|mv| mv.to_string()).collect::<Vec<_>>();
    moves.sort();
    moves
}

fn pseudo_legal_from(game: &Game, square: Square) -> MoveList {
    let mut moves = MoveList::new();
    generate_pseudo_legal_from(game.board(), square, &mut moves);
    moves
}

#[test]
fn test_startpos_grid() {
    let game = Game::new(FEN_STARTPOS, Color::from_white_turn(true));
    let grid = game.grid();

    let back_rank = |color| {
        [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ]
        .map(|kind| Piece::new(color, kind).code())
    };

    assert_eq!(grid[0], back_rank(Color::Black));
    assert_eq!(grid[1], [Piece::BLACK_PAWN.code(); 8]);
    for row in &grid[2..6] {
        assert_eq!(*row, [Piece::EMPTY_CODE; 8]);
    }
    assert_eq!(grid[6], [Piece::WHITE_PAWN.code(); 8]);
    assert_eq!(grid[7], back_rank(Color::White));
}

#[test]
fn test_king_pawn_has_two_advances_and_no_captures() {
    let mut game = Game::default();
    assert_eq!(sorted(game.legal_moves_from(Square::E2)), ["e2e3", "e2e4"]);
}

#[test]
fn test_enemy_pawn_adds_one_capture() {
    // A Black pawn on d3, diagonally in front of e2's advance square
    let mut game = Game::default();
    game.place(Piece::BLACK_PAWN, Square::D4.offset(0, -1).unwrap());

    assert_eq!(
        sorted(game.legal_moves_from(Square::E2)),
        ["e2d3", "e2e3", "e2e4"]
    );
}

#[test]
fn test_pawn_double_push_needs_two_empty_squares() {
    let game = Game::new("8/8/8/8/8/8/PPPPPPPP/8", Color::White);

    for file in File::iter() {
        let square = Square::new(file, Rank::TWO);
        let doubles = pseudo_legal_from(&game, square)
            .into_iter()
            .filter(|mv| mv.destination(Color::White).rank() == Rank::FOUR)
            .count();
        assert_eq!(doubles, 1, "{square} should have one double push");
    }

    // Blocked on the intermediate square
    let game = Game::new("8/8/8/8/8/4p3/4P3/8", Color::White);
    assert!(pseudo_legal_from(&game, Square::E2).is_empty());

    // Not on the starting rank
    let game = Game::new("8/8/8/8/8/4P3/8/8", Color::White);
    assert_eq!(sorted(pseudo_legal_from(&game, Square::E3)), ["e3e4"]);
}

#[test]
fn test_enclosed_rook_has_no_moves() {
    let game = Game::new("8/8/8/3B4/2NRN3/3B4/8/8", Color::White);
    assert!(pseudo_legal_from(&game, Square::D4).is_empty());
}

#[test]
fn test_rays_end_at_first_piece() {
    let game = Game::new("3r4/8/8/8/Q2q2P1/8/8/8", Color::Black);
    let moves = pseudo_legal_from(&game, Square::D4);

    // Every direction the queen can move in
    let deltas = [(1, 0), (-1, 0), (0, 1), (0, -1), (1, 1), (1, -1), (-1, 1), (-1, -1)];

    for (df, dr) in deltas {
        let mut square = Square::D4;
        while let Some(next) = square.offset(df, dr) {
            let included = moves.contains(&Move::new(Square::D4, next));

            match game.board().color_at(next) {
                None => assert!(included, "{next} is empty and reachable"),
                Some(color) => {
                    assert_eq!(included, color == Color::White, "{next} blocks the ray");
                    break;
                }
            }
            square = next;
        }
    }

    assert!(moves.contains(&Move::new(Square::D4, Square::A4)));
    assert!(moves.contains(&Move::new(Square::D4, "g4".parse().unwrap())));
    assert!(!moves.contains(&Move::new(Square::D4, Square::D8)));
}

#[test]
fn test_castling_depends_only_on_empty_squares() {
    // No rooks at all, yet both tokens are offered
    let mut game = Game::new("4k3/8/8/8/8/8/8/4K3", Color::White);
    let moves = game.legal_moves().to_vec();
    assert!(moves.contains(&Move::ShortCastle));
    assert!(moves.contains(&Move::LongCastle));

    // Blocking only the queen's side
    let mut game = Game::new("4k3/8/8/8/8/8/8/1N2K3", Color::White);
    let moves = game.legal_moves().to_vec();
    assert!(moves.contains(&Move::ShortCastle));
    assert!(!moves.contains(&Move::LongCastle));

    // The same holds for Black
    let mut game = Game::new("r3kb1r/8/8/8/8/8/8/4K3", Color::Black);
    let moves = game.legal_moves().to_vec();
    assert!(!moves.contains(&Move::ShortCastle));
    assert!(moves.contains(&Move::LongCastle));
}

#[test]
fn test_castling_moves_king_and_rook() {
    let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();

    game.play_move_str("e1g1").unwrap();
    assert_eq!(game.board().to_placement(), "r3k2r/8/8/8/8/8/8/R4RK1");
    assert_eq!(game.king_square(Color::White), Some(Square::G1));

    game.play_move_str("O-O-O").unwrap();
    assert_eq!(game.board().to_placement(), "2kr3r/8/8/8/8/8/8/R4RK1");
    assert_eq!(game.king_square(Color::Black), Some(Square::C8));
}

#[test]
fn test_legal_moves_never_expose_the_king() {
    let mut game = Game::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w").unwrap();

    // Walk a few plies down the first legal line, checking every position on the way
    for _ in 0..6 {
        let mover = game.side_to_move();
        let moves = game.legal_moves().to_vec();

        for &mv in &moves {
            let mut probe = game.clone();
            probe.play_move(mv);

            let king = probe.king_square(mover).unwrap();
            let mut replies = MoveList::new();
            generate_pseudo_legal(probe.board(), probe.side_to_move(), &mut replies);

            assert!(
                replies
                    .iter()
                    .all(|reply| reply.destination(probe.side_to_move()) != king),
                "{mv} exposes the king in {}",
                game.to_fen()
            );
        }

        let Some(&first) = moves.first() else {
            break;
        };
        game.play_move(first);
    }
}

#[test]
fn test_empty_move_list_is_game_over() {
    // Checkmate: back-rank mate
    let mut mated = Game::new("6k1/5ppp/8/8/8/8/8/R5K1", Color::White);
    mated.play_move_str("a1a8").unwrap();
    assert!(mated.is_game_over());

    // Stalemate: not attacked, but nowhere to go
    let mut stalemated = Game::new("7k/5Q2/6K1/8/8/8/8/8", Color::Black);
    assert!(stalemated.is_game_over());

    // Both are reported the same way
    assert_eq!(mated.legal_moves(), stalemated.legal_moves());
}

#[test]
fn test_applier_trusts_its_caller() {
    let mut game = Game::default();

    // Moving a Black piece on White's turn, through the queen's own pawn
    game.apply_move_str("d8d2").unwrap();
    assert_eq!(
        game.board().to_placement(),
        "rnb1kbnr/pppppppp/8/8/8/8/PPPqPPPP/RNBQKBNR"
    );
    assert_eq!(game.side_to_move(), Color::White);
}

#[test]
fn test_permissive_placement() {
    // Unknown letters and digits outside 1-8 are ignored
    let game = Game::new("4k3/8/8/8/8/8/8/4K3 junk", Color::White);
    assert_eq!(game.board().to_placement(), "4k3/8/8/8/8/8/8/4K3");

    let game = Game::new("4k3/8/8/8/8/8/8/4KX3", Color::White);
    assert_eq!(game.board().to_placement(), "4k3/8/8/8/8/8/8/4K3");

    // Missing kings are tolerated
    let mut game = Game::new("8/8/8/8/8/8/8/R7", Color::White);
    assert_eq!(game.king_square(Color::White), None);
    assert_eq!(game.legal_moves().len(), 14);

    // The strict checker flags what the parser tolerates
    assert!(check_placement("4k3/8/8/8/8/8/8/4KX3").is_err());
    assert!(check_placement("8/8/8/8/8/8/8/R7").is_err());
}
