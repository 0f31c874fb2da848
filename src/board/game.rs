/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{Context, Result};

use super::{
    generate_pseudo_legal, perft, Board, Color, File, Move, MoveList, Piece, Rank, Square,
    FEN_STARTPOS,
};

/// Selects which list a generation pass writes into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum GenMode {
    /// Moves for the side to move, filtered for legality into the legal-move list.
    Candidates,

    /// Unfiltered replies used while probing a candidate. Never filtered further,
    /// which bounds the lookahead to a single ply.
    Responses,
}

/// Everything the legality filter rolls back after probing a candidate.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) struct Snapshot {
    board: Board,
    kings: [Option<Square>; Color::COUNT],
    side_to_move: Color,
}

/// A game of chess.
///
/// Holds the [`Board`], whose turn it is, a cache of where each king stands and
/// the last legal-move list that was computed.
///
/// The basic methods you're probably looking for are [`Game::new`],
/// [`Game::legal_moves`] and [`Game::apply_move`].
#[derive(Clone, PartialEq, Eq)]
pub struct Game {
    /// The 8x8 grid.
    board: Board,

    /// The player whose moves are generated.
    side_to_move: Color,

    /// Cached square of each color's king, consulted by the legality filter.
    ///
    /// Only kept current by castling, the legality filter, [`Game::play_move`] and
    /// [`Game::set_king_square`]. A plain [`Game::apply_move`] of a king does not update it.
    kings: [Option<Square>; Color::COUNT],

    /// Result of the last [`GenMode::Candidates`] pass.
    legal: MoveList,

    /// Scratch space for [`GenMode::Responses`] passes.
    responses: MoveList,
}

impl Game {
    /// Creates a new [`Game`] from a piece-placement field and a side to move.
    ///
    /// The placement is read by [`Board::from_placement`], so this never fails.
    /// The king cache is seeded from the first king of each color found on the board.
    ///
    /// # Example
    /// ```
    /// # use rookery::*;
    /// let game = Game::new("4k3/8/8/8/8/8/8/4K3", Color::from_white_turn(false));
    /// assert_eq!(game.side_to_move(), Color::Black);
    /// assert_eq!(game.king_square(Color::White), Some(Square::E1));
    /// ```
    pub fn new(placement: &str, side_to_move: Color) -> Self {
        let board = Board::from_placement(placement);
        let kings = Color::all().map(|color| board.find_king(color));

        Self {
            board,
            side_to_move,
            kings,
            legal: MoveList::with_capacity(64),
            responses: MoveList::with_capacity(64),
        }
    }

    /// Creates a new [`Game`] from a FEN string.
    ///
    /// Only the placement and side-to-move fields are read; the side defaults to
    /// White when absent. Castling rights, en passant and the move counters are ignored.
    ///
    /// # Example
    /// ```
    /// # use rookery::*;
    /// let game = Game::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 1").unwrap();
    /// assert_eq!(game.side_to_move(), Color::Black);
    ///
    /// assert!(Game::from_fen("4k3/8/8/8/8/8/8/4K3 x").is_err());
    /// ```
    pub fn from_fen(fen: &str) -> Result<Self> {
        let mut split = fen.trim().split(' ');
        let placement = split.next().unwrap_or_default();

        let side_to_move = split
            .next()
            .map(Color::from_str)
            .transpose()
            .with_context(|| format!("Invalid side to move in FEN {fen:?}"))?
            .unwrap_or_default();

        Ok(Self::new(placement, side_to_move))
    }

    /// Writes the placement and side-to-move fields of this [`Game`].
    ///
    /// # Example
    /// ```
    /// # use rookery::Game;
    /// let game = Game::default();
    /// assert_eq!(game.to_fen(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w");
    /// ```
    pub fn to_fen(&self) -> String {
        format!("{} {}", self.board.to_placement(), self.side_to_move.to_uci())
    }

    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Read-only snapshot of the grid as packed piece codes, rank 8 first.
    #[inline(always)]
    pub fn grid(&self) -> [[u8; File::COUNT]; Rank::COUNT] {
        self.board.codes()
    }

    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline(always)]
    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    #[inline(always)]
    pub fn toggle_side_to_move(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
    }

    /// Where the king of `color` is cached as standing.
    #[inline(always)]
    pub const fn king_square(&self, color: Color) -> Option<Square> {
        self.kings[color.index()]
    }

    /// Overwrites the cached king square of `color`.
    ///
    /// Needed after a king was moved through [`Game::apply_move`], which only
    /// updates the cache when castling.
    #[inline(always)]
    pub fn set_king_square(&mut self, color: Color, square: Square) {
        self.kings[color] = Some(square);
    }

    /// Generates and returns the legal moves for the side to move.
    ///
    /// Every pseudo-legal candidate is played on the live board, the opponent's
    /// pseudo-legal replies are generated, and the candidate is dropped if any reply
    /// lands on the mover's king. The board, both king squares and the side to move
    /// are restored after each probe.
    ///
    /// An empty list means the game is over. Checkmate and stalemate are not told apart.
    ///
    /// # Example
    /// ```
    /// # use rookery::*;
    /// let mut game = Game::default();
    /// assert_eq!(game.legal_moves().len(), 20);
    /// ```
    pub fn legal_moves(&mut self) -> &[Move] {
        self.generate(GenMode::Candidates);
        &self.legal
    }

    /// Legal moves of the side to move that start on `square`.
    ///
    /// # Example
    /// ```
    /// # use rookery::*;
    /// let mut game = Game::default();
    /// let moves = game.legal_moves_from(Square::E2);
    /// assert_eq!(moves, ["e2e3", "e2e4"]);
    /// ```
    pub fn legal_moves_from(&mut self, square: Square) -> MoveList {
        let color = self.side_to_move;
        self.legal_moves()
            .iter()
            .copied()
            .filter(|mv| mv.origin(color) == square)
            .collect()
    }

    /// Returns `true` if the side to move has no legal moves.
    #[inline(always)]
    pub fn is_game_over(&mut self) -> bool {
        self.legal_moves().is_empty()
    }

    /// Runs one generation pass for the side to move, writing into the list `mode` selects.
    pub(crate) fn generate(&mut self, mode: GenMode) {
        let list = match mode {
            GenMode::Candidates => &mut self.legal,
            GenMode::Responses => &mut self.responses,
        };

        list.clear();
        generate_pseudo_legal(&self.board, self.side_to_move, list);

        if mode == GenMode::Candidates {
            let mut candidates = std::mem::take(&mut self.legal);
            candidates.retain(|&mv| self.survives(mv));
            self.legal = candidates;
        }
    }

    /// Probes a single candidate: play it, generate every reply, look for a king capture, roll back.
    fn survives(&mut self, mv: Move) -> bool {
        let snapshot = self.snapshot();
        let mover = self.side_to_move;

        self.apply_move(mv);
        if let Move::Normal { to, .. } = mv {
            if self.board.piece_at(to).is_some_and(|piece| piece.is_king()) {
                self.set_king_square(mover, to);
            }
        }

        self.toggle_side_to_move();
        self.generate(GenMode::Responses);

        let responder = self.side_to_move;
        let is_safe = match self.kings[mover] {
            Some(king) => !self
                .responses
                .iter()
                .any(|reply| reply.destination(responder) == king),
            None => true,
        };

        self.restore(snapshot);
        self.responses.clear();

        is_safe
    }

    /// Applies `mv` to the board without any checks.
    ///
    /// The caller must make sure `mv` came from [`Game::legal_moves`]. A coordinate move
    /// moves whatever stands on its origin onto its destination, overwriting it. A castling
    /// token moves the king and the corner rook of the side to move onto their
    /// hard-coded destinations and updates that king's cached square.
    ///
    /// The side to move is left untouched. See [`Game::play_move`] for a version that
    /// also keeps the king cache current and passes the turn.
    ///
    /// # Example
    /// ```
    /// # use rookery::*;
    /// let mut game = Game::new("r3k2r/8/8/8/8/8/8/R3K2R", Color::White);
    /// game.apply_move(Move::ShortCastle);
    /// assert_eq!(game.board().to_placement(), "r3k2r/8/8/8/8/8/8/R4RK1");
    /// assert_eq!(game.king_square(Color::White), Some(Square::G1));
    /// ```
    pub fn apply_move(&mut self, mv: Move) {
        let color = self.side_to_move;

        match mv {
            Move::Normal { from, to } => self.board.relocate(from, to),

            Move::ShortCastle | Move::LongCastle => {
                let (king_from, king_to) = (mv.origin(color), mv.destination(color));
                self.board.relocate(king_from, king_to);

                if let Some((rook_from, rook_to)) = mv.rook_squares(color) {
                    self.board.relocate(rook_from, rook_to);
                }

                self.set_king_square(color, king_to);
            }
        }
    }

    /// Parses `mv` for the side to move and applies it. See [`Game::apply_move`].
    ///
    /// Only malformed text is an error; the move itself is not validated.
    pub fn apply_move_str(&mut self, mv: &str) -> Result<()> {
        let mv = Move::from_uci(&self.board, self.side_to_move, mv)?;
        self.apply_move(mv);
        Ok(())
    }

    /// Applies `mv`, updates the king cache if a king moved and passes the turn.
    ///
    /// # Example
    /// ```
    /// # use rookery::*;
    /// let mut game = Game::new("4k3/8/8/8/8/8/8/4K3", Color::White);
    /// game.play_move(Move::new(Square::E1, Square::D2));
    /// assert_eq!(game.king_square(Color::White), Some(Square::D2));
    /// assert_eq!(game.side_to_move(), Color::Black);
    /// ```
    pub fn play_move(&mut self, mv: Move) {
        let mover = self.side_to_move;
        self.apply_move(mv);

        if let Move::Normal { to, .. } = mv {
            if let Some(piece) = self.board.piece_at(to).filter(Piece::is_king) {
                self.set_king_square(piece.color(), to);
            }
        }

        self.side_to_move = mover.opponent();
    }

    /// Parses `mv` for the side to move and plays it. See [`Game::play_move`].
    pub fn play_move_str(&mut self, mv: &str) -> Result<()> {
        let mv = Move::from_uci(&self.board, self.side_to_move, mv)?;
        self.play_move(mv);
        Ok(())
    }

    /// Places `piece` on `square`, replacing anything there, and keeps the king cache current.
    pub fn place(&mut self, piece: Piece, square: Square) {
        self.take(square);
        self.board.place(piece, square);

        if piece.is_king() {
            self.set_king_square(piece.color(), square);
        }
    }

    /// Removes and returns the piece on `square`, if any, and keeps the king cache current.
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        let piece = self.board.take(square)?;

        let color = piece.color();
        if piece.is_king() && self.kings[color] == Some(square) {
            self.kings[color] = self.board.find_king(color);
        }

        Some(piece)
    }

    /// Counts the leaf nodes of the legal-move tree `depth` plies deep.
    ///
    /// See [`perft()`].
    #[inline(always)]
    pub fn perft(&mut self, depth: usize) -> u64 {
        perft(self, depth)
    }

    #[inline(always)]
    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board,
            kings: self.kings,
            side_to_move: self.side_to_move,
        }
    }

    #[inline(always)]
    pub(crate) fn restore(&mut self, snapshot: Snapshot) {
        self.board = snapshot.board;
        self.kings = snapshot.kings;
        self.side_to_move = snapshot.side_to_move;
    }
}

impl Default for Game {
    /// The standard starting position, White to move.
    #[inline(always)]
    fn default() -> Self {
        Self::new(FEN_STARTPOS, Color::White)
    }
}

impl FromStr for Game {
    type Err = anyhow::Error;
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let king_to_string =
            |color: Color| self.king_square(color).map(|square| square.to_string()).unwrap_or("-".into());

        for rank in Rank::iter().rev() {
            write!(f, "{rank}|")?;
            for file in File::iter() {
                let piece = self.board.piece_at(Square::new(file, rank));
                let piece_char = piece.map(|p| p.char()).unwrap_or('.');
                write!(f, " {piece_char}")?;
            }

            if rank == Rank::SEVEN {
                write!(f, "        FEN: {}", self.to_fen())?;
            } else if rank == Rank::SIX {
                write!(f, " White King: {}", king_to_string(Color::White))?;
            } else if rank == Rank::FIVE {
                write!(f, " Black King: {}", king_to_string(Color::Black))?;
            }
            writeln!(f)?;
        }
        write!(f, " +")?;
        for _ in File::iter() {
            write!(f, "--")?;
        }
        write!(f, "\n   ")?;
        for file in File::iter() {
            write!(f, "{file} ")?;
        }

        Ok(())
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("fen", &self.to_fen())
            .field("kings", &self.kings)
            .field("legal", &self.legal)
            .finish()
    }
}
