/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    io,
    path::PathBuf,
    sync::mpsc::{channel, Receiver, Sender},
    thread,
    time::Instant,
};

use anyhow::{bail, Context, Result};
use clap::Parser;

use crate::{
    check_placement, perft, splitperft, BoardView, Color, EngineCommand, Game, Point, ViewConfig,
};

/// The names of every option the engine exposes through `option`/`setoption`.
const OPTIONS: [&str; 4] = ["SquareSize", "OriginX", "OriginY", "ImagesDir"];

/// A text front-end over a [`Game`].
#[derive(Debug)]
pub struct Engine {
    /// The current state of the chess board, as known to the engine.
    game: Game,

    /// Layout used by the drag and sprite commands.
    view: ViewConfig,

    /// One half of a channel, responsible for sending commands to the engine to execute.
    sender: Sender<EngineCommand>,

    /// One half of a channel, responsible for receiving commands for the engine to execute.
    receiver: Receiver<EngineCommand>,
}

impl Engine {
    /// Constructs a new [`Engine`] instance to be executed with [`Engine::run`].
    pub fn new() -> Self {
        let (sender, receiver) = channel();

        Self {
            game: Game::default(),
            view: ViewConfig::default(),
            sender,
            receiver,
        }
    }

    /// Returns a string of the engine's name and current version.
    pub fn name(&self) -> String {
        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }

    /// Sends an [`EngineCommand`] to the engine to be executed.
    pub fn send_command(&self, command: EngineCommand) {
        // Safe unwrap: `send` can only fail if it's corresponding receiver doesn't exist,
        //  and our engine's `Receiver` lives exactly as long as the engine does.
        self.sender.send(command).unwrap();
    }

    /// Execute the main event loop for the engine.
    ///
    /// This function spawns a thread to handle input from `stdin` and waits on received commands.
    pub fn run(&mut self) -> Result<()> {
        // Spawn a separate thread for handling user input
        let sender = self.sender.clone();
        thread::spawn(|| {
            if let Err(err) = input_handler(sender) {
                eprintln!("Input handler thread stopping after fatal error: {err}");
            }
        });

        // Loop on user input
        while let Ok(cmd) = self.receiver.recv() {
            match self.execute(cmd) {
                Ok(true) => {}

                Ok(false) => break,

                // Keep running, even on error
                Err(e) => eprintln!("Error: {e}"),
            }
        }

        Ok(())
    }

    /// Executes a single command, returning `false` if the engine should stop.
    pub fn execute(&mut self, cmd: EngineCommand) -> Result<bool> {
        match cmd {
            EngineCommand::Display => println!("{}", self.game),

            EngineCommand::Drag { x1, y1, x2, y2 } => {
                let mut view = BoardView::new(&mut self.game, &self.view);
                let mv = view.drop_piece(Point::new(x1, y1), Point::new(x2, y2))?;
                println!("{mv}");
            }

            EngineCommand::Exit => return Ok(false),

            EngineCommand::Fen => println!("{}", self.game.to_fen()),

            EngineCommand::Flip => self.game.toggle_side_to_move(),

            EngineCommand::King { color, square } => self.game.set_king_square(color, square),

            EngineCommand::MakeMove { mv_string } => self.game.play_move_str(&mv_string)?,

            EngineCommand::Moves { square, sort } => {
                let mut moves = if let Some(square) = square {
                    self.game.legal_moves_from(square)
                } else {
                    self.game.legal_moves().to_vec()
                }
                .into_iter()
                .map(|mv| mv.to_string())
                .collect::<Vec<_>>();

                if sort {
                    moves.sort();
                }

                // If there are none, print "(none)"
                let moves_string = if moves.is_empty() {
                    String::from("(none)")
                } else {
                    moves.join(", ")
                };
                println!("{moves_string}");
            }

            EngineCommand::Option { name } => {
                if let Some(value) = self.get_option(&name) {
                    println!("{name} := {value}");
                } else {
                    println!("{} has no option {name:?}", self.name());
                }
            }

            EngineCommand::Perft { depth } => self.print_perft::<false>(depth),

            EngineCommand::Place { piece, square } => self.game.place(piece, square),

            EngineCommand::Position { placement, side } => self.position(&placement, side),

            EngineCommand::SetOption { name, value } => self.set_option(&name, &value)?,

            EngineCommand::Splitperft { depth } => self.print_perft::<true>(depth),

            EngineCommand::Sprites => {
                let view = BoardView::new(&mut self.game, &self.view);
                for sprite in view.sprites() {
                    println!(
                        "{}\t{}\t{}",
                        sprite.square,
                        sprite.path.display(),
                        sprite.position
                    );
                }
            }

            EngineCommand::Status => {
                let color = self.game.side_to_move();
                let count = self.game.legal_moves().len();

                if count == 0 {
                    println!("game over: {color} has no legal moves");
                } else {
                    println!("{color} to move, {count} legal moves");
                }
            }

            EngineCommand::Take { square } => {
                if self.game.take(square).is_none() {
                    bail!("There is no piece on {square} to take");
                }
            }
        }

        Ok(true)
    }

    /// Replaces the current game with a new one built from `placement`.
    ///
    /// The placement is loaded even if it is malformed; problems are printed as a warning.
    fn position(&mut self, placement: &str, side: Color) {
        if let Err(e) = check_placement(placement) {
            eprintln!("Warning: {e}");
        }

        self.game = Game::new(placement, side);
    }

    /// Runs a perft or splitperft on the current game and prints the node count and timing.
    fn print_perft<const SPLIT: bool>(&mut self, depth: usize) {
        let now = Instant::now();
        let nodes = if SPLIT {
            splitperft(&mut self.game, depth)
        } else {
            perft(&mut self.game, depth)
        };
        let elapsed = now.elapsed();

        let nps = (nodes as f32 / elapsed.as_secs_f32().max(f32::EPSILON)) as u64;

        if SPLIT {
            println!();
        }
        println!("{nodes} nodes in {}ms ({nps} nps)", elapsed.as_millis());
    }

    /// Handles the `setoption` command, setting option `name` to `value`.
    ///
    /// Will return an error if `name` isn't a valid option or `value` is not a valid value for that option.
    fn set_option(&mut self, name: &str, value: &str) -> Result<()> {
        let mut view = self.view.clone();

        match name {
            "SquareSize" => {
                view.square_size = value
                    .parse()
                    .context(format!("SquareSize must be a positive integer. Got {value:?}"))?
            }

            "OriginX" => {
                view.origin.x = value
                    .parse()
                    .context(format!("OriginX must be an integer. Got {value:?}"))?
            }

            "OriginY" => {
                view.origin.y = value
                    .parse()
                    .context(format!("OriginY must be an integer. Got {value:?}"))?
            }

            "ImagesDir" => view.images_dir = PathBuf::from(value),

            _ => bail!("{} has no option named {name:?}", self.name()),
        }

        view.validate().context(format!("Cannot set {name} to {value:?}"))?;
        self.view = view;

        eprintln!("Option {name} has been set to {value}");
        Ok(())
    }

    /// Returns the current value of the option `name`, if it exists on this engine.
    fn get_option(&self, name: &str) -> Option<String> {
        let name = OPTIONS.into_iter().find(|opt| *opt == name)?;
        let value = match name {
            "SquareSize" => self.view.square_size.to_string(),
            "OriginX" => self.view.origin.x.to_string(),
            "OriginY" => self.view.origin.y.to_string(),
            "ImagesDir" => self.view.images_dir.display().to_string(),
            _ => unreachable!(),
        };

        Some(value)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Loops endlessly to await input via `stdin`, sending all successfully-parsed commands through the supplied `sender`.
fn input_handler(sender: Sender<EngineCommand>) -> Result<()> {
    let mut buffer = String::with_capacity(2048);

    loop {
        // Clear the buffer, read input, and trim the trailing newline
        buffer.clear();
        let bytes = io::stdin()
            .read_line(&mut buffer)
            .context("Failed to read line when parsing commands")?;

        // For ctrl + d
        if 0 == bytes {
            // Send the Exit command and exit this function
            sender
                .send(EngineCommand::Exit)
                .context("Failed to send 'exit' command after receiving empty input")?;

            bail!("Engine received input of 0 bytes and is quitting");
        }

        // Trim any leading/trailing whitespace
        let buf = buffer.trim();

        // Ignore empty lines
        if buf.is_empty() {
            continue;
        }

        match EngineCommand::try_parse_from(buf.split_ascii_whitespace()) {
            Ok(cmd) => sender
                .send(cmd)
                .context("Failed to send command to engine")?,

            // If an invalid command was received, just print the error and continue running
            Err(err) => eprintln!("{err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Piece, Square};

    fn run(engine: &mut Engine, commands: &[&str]) -> Result<()> {
        for cmd in commands {
            engine.execute(cmd.parse()?)?;
        }
        Ok(())
    }

    #[test]
    fn test_position_and_moves() {
        let mut engine = Engine::new();
        run(&mut engine, &["position 4k3/8/8/8/8/8/8/4K2R b", "makemove e8e7"]).unwrap();

        assert_eq!(engine.game.to_fen(), "8/4k3/8/8/8/8/8/4K2R w");
        assert_eq!(engine.game.king_square(Color::Black), Some(Square::E7));

        run(&mut engine, &["makemove O-O"]).unwrap();
        assert_eq!(engine.game.to_fen(), "8/4k3/8/8/8/8/8/5RK1 b");
    }

    #[test]
    fn test_malformed_position_still_loads() {
        let mut engine = Engine::new();
        run(&mut engine, &["position 8/8/8/8/8/8/8/4K3"]).unwrap();
        assert_eq!(engine.game.king_square(Color::Black), None);
    }

    #[test]
    fn test_board_editing() {
        let mut engine = Engine::new();
        run(&mut engine, &["take d8", "place q d8", "flip"]).unwrap();
        assert_eq!(engine.game.board().piece_at(Square::D8), Some(Piece::BLACK_QUEEN));
        assert_eq!(engine.game.side_to_move(), Color::Black);

        assert!(run(&mut engine, &["take e4"]).is_err());

        run(&mut engine, &["king white e4"]).unwrap();
        assert_eq!(engine.game.king_square(Color::White), Some(Square::E4));
    }

    #[test]
    fn test_options() {
        let mut engine = Engine::new();
        assert_eq!(engine.get_option("SquareSize").as_deref(), Some("75"));
        assert_eq!(engine.get_option("OriginX").as_deref(), Some("250"));
        assert_eq!(engine.get_option("Threads"), None);

        run(&mut engine, &["setoption SquareSize 60", "setoption ImagesDir assets"]).unwrap();
        assert_eq!(engine.view.square_size, 60);
        assert_eq!(engine.get_option("ImagesDir").as_deref(), Some("assets"));

        assert!(run(&mut engine, &["setoption SquareSize 0"]).is_err());
        assert!(run(&mut engine, &["setoption SquareSize 1000000000"]).is_err());
        assert!(run(&mut engine, &["setoption OriginX 2147483500"]).is_err());
        assert_eq!(engine.view.square_size, 60);
        assert_eq!(engine.view.origin.x, 250);
        assert!(run(&mut engine, &["setoption OriginY down"]).is_err());
        assert!(run(&mut engine, &["setoption Threads 4"]).is_err());
    }

    #[test]
    fn test_large_layouts_stay_printable() {
        let mut engine = Engine::new();
        run(
            &mut engine,
            &["setoption OriginX 0", "setoption OriginY 0", "setoption SquareSize 268435455"],
        )
        .unwrap();

        // The far edge of the board lands just short of i32::MAX
        let view = BoardView::new(&mut engine.game, &engine.view);
        assert_eq!(view.square_origin(Square::H1), Point::new(7 * 268435455, 7 * 268435455));
        drop(view);

        run(&mut engine, &["sprites", "setoption OriginX -5"]).unwrap();
        assert!(run(&mut engine, &["setoption OriginX 8"]).is_err());
    }

    #[test]
    fn test_drag_uses_current_layout() {
        let mut engine = Engine::new();
        run(&mut engine, &["setoption SquareSize 10", "setoption OriginX 0", "setoption OriginY 0"]).unwrap();

        // g1 is grid row 7, column 6; f3 is row 5, column 5
        run(&mut engine, &["drag 65 75 55 55"]).unwrap();
        assert_eq!(engine.game.board().piece_at(Square::G1), None);
        assert_eq!(engine.game.side_to_move(), Color::Black);

        // Not a legal knight move
        assert!(run(&mut engine, &["drag 15 5 15 45"]).is_err());

        let err = run(&mut engine, &["drag -5 10 20 30"]).unwrap_err();
        assert!(err.to_string().contains("off the board"), "{err}");
    }

    #[test]
    fn test_exit_stops_the_loop() {
        let mut engine = Engine::new();
        assert!(!engine.execute(EngineCommand::Exit).unwrap());
        assert!(engine.execute(EngineCommand::Fen).unwrap());
    }
}
