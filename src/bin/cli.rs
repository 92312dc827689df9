use std::io::{self, Write};

use anyhow::{Context, Result};
use chess_engine::{
    constants::{DEFAULT_DEPTH, STARTING_FEN},
    engine::{Engine, RootProgress, SearchResult},
    movegen::{legal_moves, perft, perft_divide},
    notation::{format_line, parse_coordinate_move},
    position::Position,
    types::{GameResult, Side},
};
use clap::{Parser, Subcommand};
use rand::Rng;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Fixed-depth minimax chess engine", long_about = None)]
struct Args {
    /// Position to start from
    #[arg(long, global = true, default_value = STARTING_FEN)]
    fen: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the legal moves
    Moves,

    /// Search for the best move
    Think {
        #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
        depth: u16,
    },

    /// Count leaf nodes of the legal move tree
    Perft {
        depth: u8,

        /// Show the count below each root move
        #[arg(long)]
        divide: bool,
    },

    /// Play against the engine in the terminal
    Play {
        #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
        depth: u16,
    },
}

fn format_with_commas(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let len = s.len();

    for (i, ch) in s.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }

    result
}

/// Flushes `out`, logging instead of failing. Returns false if the flush failed.
fn flush_or_warn(out: &mut impl Write) -> bool {
    match out.flush() {
        Ok(()) => true,
        Err(e) => {
            warn!("failed to flush output: {}", e);
            false
        }
    }
}

fn print_moves(position: &Position) {
    let mut moves: Vec<String> = legal_moves(position)
        .iter()
        .map(|mv| mv.describe())
        .collect();

    moves.sort();

    for (index, text) in moves.iter().enumerate() {
        print!("{:<10}", text);
        if (index + 1) % 8 == 0 {
            println!();
        }
    }
    println!("\n({} moves)", moves.len());
}

fn print_search_result(result: &SearchResult) {
    println!("└──────┴──────────────┴──────────┴────────────────────┘");

    let nodes_per_second = match result.time_ms {
        0 => 0,
        ms => ((result.nodes as f64 / ms as f64) * 1000.0) as u64,
    };

    println!("\n┌──────────────────── SEARCH STATISTICS ────────────────────┐");
    println!(
        "│ Time:   {:>9} ms  │  Depth: {:>4}  │  Eval: {:>8}   │",
        format_with_commas(result.time_ms),
        result.depth,
        result.evaluation
    );
    println!(
        "│ Nodes:  {:>12}  │  NPS:   {:>20}     │",
        format_with_commas(result.nodes as u64),
        format_with_commas(nodes_per_second)
    );
    println!("└───────────────────────────────────────────────────────────┘");
    println!("PV: {}", format_line(&result.principal_variation));
}

fn search_with_table(engine: &Engine, position: &Position) -> SearchResult {
    println!("\n┌──────┬──────────────┬──────────┬────────────────────┐");
    println!("│ MOVE │     MOVE     │  SCORE   │     BEST MOVE      │");
    println!("├──────┼──────────────┼──────────┼────────────────────┤");

    let result = engine.think_with_progress(
        position,
        Some(|progress: &RootProgress| {
            println!(
                "│ {:>4} │ {:^12} │ {:>8} │ {:^18} │",
                format!("{}/{}", progress.index + 1, progress.total),
                progress.mv.describe(),
                progress.evaluation,
                progress.best_move.describe()
            );
            flush_or_warn(&mut io::stdout());
        }),
    );

    print_search_result(&result);
    result
}

struct Cli {
    engine: Engine,
    history: Vec<Position>, // Positions before each move played, for undo
    position: Position,
    computer_side: Option<Side>,
    display_enabled: bool,
    flip: bool,
}

impl Cli {
    fn new(position: Position, depth: u16) -> Self {
        Self {
            engine: Engine::new(Some(depth), None),
            history: Vec::new(),
            position,
            computer_side: None,
            display_enabled: true,
            flip: false,
        }
    }

    fn show_help(&self) {
        println!("\n======================= INFORMATION ======================");
        println!("h or help - Displays help on the commands");
        println!("d or dd   - Displays board and toggles display setting");
        println!("moves     - Displays of list of possible moves");
        println!("fen       - Displays a FEN string for the current position");
        println!("f         - Flips the board");
        println!("q or quit - Quits the program");
        println!("================= CONTROLLING THE ENGINE =================");
        println!("go        - Starts the engine from the current position");
        println!("new       - Starts a new game");
        println!("p or play - The computer plays a move");
        println!("off       - Turns the computer player off");
        println!("undo      - Takes back the last move");
        println!("===================== CONFIGURATION ======================");
        println!("fen <FEN>  - Loads a FEN string");
        println!("sd <depth> - Sets the search depth");
        println!("================ ENTERING MOVES ==========================");
        println!("e2e4, e7e8q - Coordinate text, promotion letter optional");
    }

    fn display_board(&self) {
        if self.display_enabled {
            self.position.display_board(self.flip);
        }
    }

    fn new_game(&mut self) {
        self.position = Position::starting();
        self.history.clear();
        self.computer_side = None;
    }

    /// Announces a finished game and starts over. Returns true if it was over.
    fn print_result(&mut self) -> bool {
        let message = match self.position.game_result() {
            GameResult::InProgress => return false,
            GameResult::Checkmate(Side::White) => "{White mates}",
            GameResult::Checkmate(Side::Black) => "{Black mates}",
            GameResult::Stalemate => "{Stalemate}",
            GameResult::DrawByFiftyMoveRule => "{Draw by fifty move rule}",
            GameResult::DrawByInsufficientMaterial => "{Draw by insufficient material}",
        };

        self.display_board();
        println!("\nGAME OVER");
        println!("{}", message);

        self.new_game();
        true
    }

    fn play_move(&mut self, next: Position) {
        let previous = std::mem::replace(&mut self.position, next);
        self.history.push(previous);

        if !self.print_result() {
            self.display_board();
        }
    }

    fn run_main_loop(&mut self) -> Result<()> {
        self.display_board();

        loop {
            println!("\n-------------------------------");
            println!(
                "*   Move: {} | To move: {:?}   *",
                self.position.fullmove_number(),
                self.position.side()
            );
            println!("-------------------------------");

            // Computer's turn
            if self.computer_side == Some(self.position.side()) {
                println!("\nComputer is thinking...");

                let result = search_with_table(&self.engine, &self.position);

                match result.best_move {
                    Some(mv) => {
                        println!("\nComputer plays: \x1b[32m{}\x1b[0m", mv.describe());
                        self.play_move(self.position.make_move(mv));
                    }
                    None => {
                        println!("(No move found)");
                        self.computer_side = None;
                    }
                }

                continue;
            }

            print!("\nMove OR command > ");
            io::stdout().flush().context("failed to flush stdout")?;

            let mut input = String::new();
            if io::stdin()
                .read_line(&mut input)
                .context("failed to read from stdin")?
                == 0
            {
                return Ok(()); // EOF
            }

            let command = input.trim();

            // COMMANDS WITHOUT PARAMETERS
            match command {
                "" => continue,
                "d" => {
                    self.position.display_board(self.flip);
                    continue;
                }
                "dd" => {
                    self.display_enabled = !self.display_enabled;

                    if self.display_enabled {
                        println!("\nBoard display enabled");
                        self.display_board();
                    } else {
                        println!("\nBoard display disabled");
                    }
                    continue;
                }
                "f" => {
                    self.flip = !self.flip;
                    self.display_board();
                    continue;
                }
                "go" => {
                    self.handle_go_command()?;
                    continue;
                }
                "h" | "help" => {
                    self.show_help();
                    continue;
                }
                "fen" => {
                    println!("\n{}", self.position.to_fen());
                    continue;
                }
                "moves" => {
                    println!("\nLegal moves:");
                    print_moves(&self.position);
                    continue;
                }
                "new" => {
                    self.new_game();
                    self.display_board();
                    continue;
                }
                "p" | "play" => {
                    self.computer_side = Some(self.position.side());
                    continue;
                }
                "off" => {
                    self.computer_side = None;
                    continue;
                }
                "q" | "quit" => {
                    println!("\nProgram exiting");
                    return Ok(());
                }
                "undo" => {
                    match self.history.pop() {
                        Some(previous) => {
                            self.position = previous;
                            self.computer_side = None;
                            self.display_board();
                        }
                        None => println!("\nNo moves to undo"),
                    }
                    continue;
                }
                _ => {}
            }

            // COMMANDS WITH PARAMETERS
            if let Some(fen) = command.strip_prefix("fen ") {
                match Position::from_fen(fen) {
                    Ok(position) => {
                        self.position = position;
                        self.history.clear();
                        self.display_board();
                        println!("FEN loaded successfully");
                    }
                    Err(e) => println!("Error loading FEN: {}", e),
                }
                continue;
            }

            if let Some(depth) = command.strip_prefix("sd ") {
                match depth.trim().parse::<u16>() {
                    Ok(depth) => {
                        self.engine.search_settings.depth = depth;
                        println!("\nSearch depth set to {}", depth);
                    }
                    Err(_) => println!("\nINVALID DEPTH!"),
                }
                continue;
            }

            let data = match parse_coordinate_move(&command.to_lowercase()) {
                Ok(data) => data,
                Err(e) => {
                    println!("\nINVALID COMMAND! ({})", e);
                    continue;
                }
            };

            match self.position.find_move(data) {
                Some(mv) => self.play_move(self.position.make_move(mv)),
                None => println!("\nILLEGAL MOVE!"),
            }
        }
    }

    fn handle_go_command(&mut self) -> Result<()> {
        println!("\nChoose your side:");
        println!("1. White");
        println!("2. Black");
        println!("3. Random");
        print!("\nEnter choice (1-3) > ");
        io::stdout().flush().context("failed to flush stdout")?;

        let mut input = String::new();
        io::stdin()
            .read_line(&mut input)
            .context("failed to read from stdin")?;

        println!();

        let player_side = match input.trim() {
            "1" => Side::White,
            "2" => Side::Black,
            "3" => {
                let side = match rand::thread_rng().gen_bool(0.5) {
                    true => Side::White,
                    false => Side::Black,
                };
                println!("You are playing as {:?}", side);
                side
            }
            _ => {
                println!("Invalid choice. Defaulting to White.");
                Side::White
            }
        };

        self.computer_side = Some(player_side.opponent());
        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let position = Position::from_fen(&args.fen)
        .with_context(|| format!("could not load position '{}'", args.fen))?;

    match args.command.unwrap_or(Command::Play {
        depth: DEFAULT_DEPTH,
    }) {
        Command::Moves => {
            position.display_board(false);
            print_moves(&position);
        }
        Command::Think { depth } => {
            position.display_board(false);

            let engine = Engine::new(Some(depth), None);
            let result = search_with_table(&engine, &position);

            match result.best_move {
                Some(mv) => println!("\nBest move: {} ({})", mv, mv.describe()),
                None => println!("\nNo move: {:?}", position.game_result()),
            }
        }
        Command::Perft { depth, divide } => {
            if divide {
                let divided = perft_divide(&position, depth);

                for (mv, nodes) in &divided {
                    println!("{}: {}", mv, nodes);
                }

                let total: u64 = divided.iter().map(|(_, nodes)| nodes).sum();
                println!("\nMoves: {}", divided.len());
                println!("Nodes: {}", format_with_commas(total));
            } else {
                println!("Nodes: {}", format_with_commas(perft(&position, depth)));
            }
        }
        Command::Play { depth } => {
            println!("\n==============================");
            println!("|   Minimax Chess Engine     |");
            println!("==============================\n");
            println!("\n\"h or help\" displays a list of commands\n");

            let mut cli = Cli::new(position, depth);
            cli.run_main_loop()?;
        }
    }

    Ok(())
}
