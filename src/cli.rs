use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::analyzer::PositionAnalyzer;
use crate::display::{board_display, moves_table, print_error, print_section, print_success, value_bar};
use crate::error::{UrError, UrResult};
use crate::export;
use crate::notation;
use crate::position::GamePosition;
use crate::solver::{Progress, Solver};
use crate::strategy::{self, AnalysisStrategy, HeuristicStrategy, RandomStrategy, Strategy};
use crate::values::PositionValues;

#[derive(Parser)]
#[command(name = "ur", version = "1.0.0", about = "Royal Game of Ur solver — exact win probabilities and optimal play.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve the full game and write the value table
    Solve {
        /// Output file for the solved values
        #[arg(short, long, default_value = "ursolution.dat")]
        out: PathBuf,
        /// Worker threads (default: all cores)
        #[arg(short, long)]
        workers: Option<usize>,
    },
    /// Rank the legal moves of a position for a given roll
    Analyze {
        /// Position, e.g. "3/4 X--X/-O-- X--O---- XX/--"
        position: String,
        /// Dice roll (0-4)
        roll: usize,
        /// Solved values file
        #[arg(short, long, default_value = "ursolution.dat")]
        solution: PathBuf,
    },
    /// Show a position's board, id, and value
    Show {
        /// Position notation, or its id as 8 hex digits
        position: String,
        /// Solved values file (omit to skip the value)
        #[arg(short, long)]
        solution: Option<PathBuf>,
    },
    /// Write the solved table as bulk-import JSON files
    Export {
        /// Solved values file
        #[arg(short, long, default_value = "ursolution.dat")]
        solution: PathBuf,
        /// Output directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
        /// Number of files to spread the records across
        #[arg(short, long, default_value = "8")]
        files: usize,
    },
    /// Play strategies against each other
    Tournament {
        /// Solved values file; when given, optimal play faces the heuristic
        #[arg(short, long)]
        solution: Option<PathBuf>,
        /// Number of games
        #[arg(short, long, default_value = "1000")]
        games: usize,
        /// Random seed
        #[arg(long, default_value = "0")]
        seed: u64,
    },
}

pub fn run() {
    let cli = Cli::parse();
    dispatch(cli);
}

pub fn run_with_args(args: Vec<String>) {
    let cli = Cli::parse_from(args);
    dispatch(cli);
}

fn dispatch(cli: Cli) {
    let result = match cli.command {
        Commands::Solve { out, workers } => cmd_solve(out, workers),
        Commands::Analyze {
            position,
            roll,
            solution,
        } => cmd_analyze(&position, roll, solution),
        Commands::Show { position, solution } => cmd_show(&position, solution),
        Commands::Export {
            solution,
            dir,
            files,
        } => cmd_export(solution, dir, files),
        Commands::Tournament {
            solution,
            games,
            seed,
        } => cmd_tournament(solution, games, seed),
    };
    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}

fn cmd_solve(out: PathBuf, workers: Option<usize>) -> UrResult<()> {
    let solver = match workers {
        Some(n) => Solver::with_workers(n),
        None => Solver::new(),
    };

    let values = solver.solve(|progress| match progress {
        Progress::BuildingGraph { state } => {
            println!("{} {}", "Solving metastate".cyan().bold(), state);
        }
        Progress::Optimizing { iteration, delta } => {
            println!("{}", format!("  sweep {:>3}  max \u{0394} {:.3e}", iteration, delta).dimmed());
        }
    });

    values.save(&out)?;
    print_success(&format!(
        "Solved {} positions \u{2192} {}",
        values.len(),
        out.display()
    ));
    Ok(())
}

fn cmd_analyze(text: &str, roll: usize, solution: PathBuf) -> UrResult<()> {
    if roll > 4 {
        return Err(UrError::InvalidRoll(roll));
    }
    let position = notation::parse_game(text)?;
    let values = PositionValues::load(&solution)?;

    println!("{}", board_display(position));
    print_section(
        "Position",
        &format!("{}  value {}", text, value_bar(values.value_of(position) as f64, 20)),
    );

    let moves = values.analyze(position, roll);
    if moves.is_empty() {
        print_section(&format!("Roll {}", roll), "no legal move; the turn passes");
    } else {
        println!("\n{}", format!("Roll {}", roll).cyan().bold());
        println!("{}", moves_table(&moves));
    }
    Ok(())
}

fn parse_position_arg(text: &str) -> UrResult<GamePosition> {
    if let Ok(position) = notation::parse_game(text) {
        return Ok(position);
    }
    let id = u32::from_str_radix(text, 16)
        .map_err(|_| UrError::InvalidNotation(text.to_string()))? as i32;
    let position = GamePosition::from_id(id);
    if !position.is_valid() {
        return Err(UrError::InvalidPositionId(id));
    }
    Ok(position)
}

fn cmd_show(text: &str, solution: Option<PathBuf>) -> UrResult<()> {
    let position = parse_position_arg(text)?;

    println!("{}", board_display(position));
    print_section("Notation", &notation::format_game(position));
    print_section("Id", &format!("{:08X}", position.id() as u32));

    if let Some(path) = solution {
        let values = PositionValues::load(&path)?;
        print_section("Value", &value_bar(values.value_of(position) as f64, 20));
    }
    Ok(())
}

fn cmd_export(solution: PathBuf, dir: PathBuf, files: usize) -> UrResult<()> {
    let values = PositionValues::load(&solution)?;
    let count = export::export_files(&values, &dir, files)?;
    print_success(&format!(
        "Exported {} records across {} files under {}",
        count,
        files,
        dir.display()
    ));
    Ok(())
}

fn cmd_tournament(solution: Option<PathBuf>, games: usize, seed: u64) -> UrResult<()> {
    let values = match &solution {
        Some(path) => Some(PositionValues::load(path)?),
        None => None,
    };

    let pct = match &values {
        Some(values) => {
            let mut optimal = AnalysisStrategy::new(values);
            let mut heuristic = HeuristicStrategy;
            let players: &mut [&mut dyn Strategy; 2] = &mut [&mut optimal, &mut heuristic];
            println!("{}", "Optimal vs heuristic".cyan().bold());
            strategy::play_tournament(players, games, seed)
        }
        None => {
            let mut heuristic = HeuristicStrategy;
            let mut random = RandomStrategy::new(seed.wrapping_add(1));
            let players: &mut [&mut dyn Strategy; 2] = &mut [&mut heuristic, &mut random];
            println!("{}", "Heuristic vs random".cyan().bold());
            strategy::play_tournament(players, games, seed)
        }
    };

    println!(
        "  first player won {} of {} games ({})",
        format!("{:.1}%", pct).bold(),
        games,
        value_bar(pct / 100.0, 20),
    );
    Ok(())
}
