// src/main.rs
use rust_chess_rules::config::{ConsoleConfig, DEFAULT_CONFIG_FILENAME};
use rust_chess_rules::input::{parse_user_input, Command, Cursor, UserInput};
use rust_chess_rules::{
    BoardView, ChessError, Game, GameState, GameStatus, MoveOutcome, SelectionEvent, SelectionState, Square,
};
use std::env;
use std::error::Error;
use std::fs;
use std::io::{self, Write};

// --- Console Session ---

/// Everything the console keeps between lines: the game, the pending
/// selection, the arrow-key cursor and display settings.
struct Session {
    game: Game,
    selection: SelectionState,
    cursor: Cursor,
    config: ConsoleConfig,
}

impl Session {
    fn new(config: ConsoleConfig) -> Self {
        Session {
            game: Game::with_options(config.rule_options()),
            selection: SelectionState::new(),
            cursor: Cursor::default(),
            config,
        }
    }

    fn view(&self) -> BoardView {
        BoardView {
            highlights: if self.config.show_hints { self.selection.destinations().clone() } else { Default::default() },
            selected: self.selection.selected(),
            cursor: Some(self.cursor.square()),
            unicode: self.config.unicode_pieces,
            coordinates: self.config.show_coordinates,
        }
    }

    fn reset(&mut self, game: Game) {
        self.game = game;
        self.selection.clear();
    }

    /// Select/confirm flow shared by typed squares and the cursor's `enter`.
    fn confirm(&mut self, square: Square) -> Result<(), ChessError> {
        match self.selection.confirm(&mut self.game, square)? {
            SelectionEvent::Selected { square, destinations } => {
                let piece = self.game.state().piece_at(square).map(|p| p.to_string()).unwrap_or_default();
                println!("Selected {} on {}: {} legal destination(s). Choose a target square.", piece, square, destinations);
            }
            SelectionEvent::Ignored => println!("No {} piece on {} to select.", self.game.side_to_move(), square),
            SelectionEvent::Moved { outcome, .. } => self.report(outcome),
        }
        Ok(())
    }

    fn play(&mut self, from: Square, to: Square) -> Result<(), ChessError> {
        self.selection.clear();
        let outcome = self.game.play(from, to)?;
        self.report(outcome);
        Ok(())
    }

    fn report(&self, outcome: MoveOutcome) {
        if outcome.is_accepted() {
            if let Some(record) = self.game.history().last() {
                println!("{} played {}.", record.mover, record.notation());
            }
        } else {
            println!("Error making move: {}", outcome);
        }
    }
}

// --- Main Game Loop ---

fn main() -> Result<(), Box<dyn Error>> {
    let config_path = env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_FILENAME.to_string());
    let config = match ConsoleConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: {}. Using default settings.", e);
            ConsoleConfig::default()
        }
    };
    let mut session = Session::new(config);

    println!("==============================");
    println!("|     Rust Chess (Rules)     |");
    println!("==============================");
    print_help();

    'game_loop: loop {
        let status = match session.game.status() {
            Ok(status) => status,
            Err(e) => {
                eprintln!("Error: {}", e);
                break 'game_loop;
            }
        };

        println!("------------------------------------------");
        print!("{}", session.game.render(&session.view()));

        if status.is_terminal() {
            println!("\n=== GAME OVER: {} ===", status);
            break 'game_loop;
        }
        if status != GameStatus::Ongoing {
            println!("{}", status);
        }

        print!("\n{}'s turn. Enter move (e.g. e2e4, O-O), a square, or command: ", session.game.side_to_move());
        io::stdout().flush()?;

        let mut input_line = String::new();
        match io::stdin().read_line(&mut input_line) {
            Ok(0) => {
                println!("\nEnd of input detected. Quitting game.");
                break 'game_loop;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {}. Try again or use 'quit'.", e);
                continue 'game_loop;
            }
        }

        let input_trimmed = input_line.trim();
        if input_trimmed.is_empty() { continue 'game_loop; }

        let result = match parse_user_input(input_trimmed) {
            Ok(UserInput::Move(from, to)) => session.play(from, to),
            Ok(UserInput::Square(square)) => session.confirm(square),
            Ok(UserInput::Castle(side)) => {
                let color = session.game.side_to_move();
                match session.game.state().king_square(color) {
                    Ok(from) => session.play(from, side.king_destination(color)),
                    Err(e) => Err(e),
                }
            }
            Ok(UserInput::Command(command)) => match command {
                Command::Help => { print_help(); Ok(()) }
                Command::ToggleHints => {
                    session.config.show_hints = !session.config.show_hints;
                    println!("Move hints {}.", if session.config.show_hints { "on" } else { "off" });
                    Ok(())
                }
                Command::Status => session.game.status().map(|status| println!("Status: {}", status)),
                Command::History => { println!("{}", session.game); Ok(()) }
                Command::Snapshot(target) => session.game.snapshot().map(|snapshot| {
                    match snapshot.to_json() {
                        Ok(json) => match target {
                            Some(filename) => match fs::write(&filename, json) {
                                Ok(()) => println!("Snapshot saved to '{}'.", filename),
                                Err(e) => eprintln!("Warning: Failed to write snapshot to '{}': {}", filename, e),
                            },
                            None => println!("{}", json),
                        },
                        Err(e) => eprintln!("Warning: Failed to serialize snapshot: {}", e),
                    }
                }),
                Command::Setup { placement, side } => {
                    match GameState::from_placement(&placement, side) {
                        Ok(state) => {
                            session.reset(Game::from_state(state.with_options(session.config.rule_options())));
                            println!("Position set up. {} to move.", side);
                        }
                        Err(e) => println!("Error: {}", e),
                    }
                    Ok(())
                }
                Command::NewGame => {
                    session.reset(Game::with_options(session.config.rule_options()));
                    println!("Starting a new game.");
                    Ok(())
                }
                Command::Cancel => { session.selection.clear(); Ok(()) }
                Command::Cursor(direction) => { session.cursor.step(direction); Ok(()) }
                Command::Confirm => {
                    let square = session.cursor.square();
                    session.confirm(square)
                }
                Command::Quit => {
                    println!("Exiting game.");
                    break 'game_loop;
                }
            },
            Err(e) => { println!("Error: {}", e); Ok(()) }
        };

        // Engine invariant broken: nothing sensible left to play
        if let Err(e) = result {
            eprintln!("Error: {}", e);
            break 'game_loop;
        }
    }

    println!("\nGame session finished.");
    Ok(())
}

/// Prints available commands.
fn print_help() {
    println!("\nAvailable Commands:");
    println!("  <move>           Enter a move as two squares (e.g., e2e4, e2 e4, e2-e4).");
    println!("                   Castling: O-O (kingside), O-O-O (queenside), or move the king two files.");
    println!("                   Pawns reaching the last rank always become queens.");
    println!("  <square>         Select one of your pieces (e.g., g1), then enter its target square.");
    println!("  up/down/left/right, w/a/s/d");
    println!("                   Move the cursor [ ]; 'enter' selects or moves at the cursor.");
    println!("  cancel           Drop the current selection.");
    println!("  hints            Toggle highlighting of legal destinations (>*).");
    println!("  status           Show check / checkmate / stalemate status.");
    println!("  history          Show captured pieces, castling rights and move history.");
    println!("  snapshot [file]  Print the position as JSON, or save it to a file.");
    println!("  setup <placement> <w|b>");
    println!("                   Start from a custom position, e.g. 'setup 4k3/8/8/8/8/8/8/R3K2R w'.");
    println!("  new              Start a new game.");
    println!("  help             Show this help message.");
    println!("  quit / exit      Exit the game.");
    println!();
}
