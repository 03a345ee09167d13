use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use slither_sat::driver::{self, Statistics};
use slither_sat::render::render;
use slither_sat::repository;

#[derive(Parser)]
#[command(author, version, about = "SAT-based Slitherlink solver", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a single puzzle out of a puzzle file.
    Solve {
        /// Path to a puzzle file (one puzzle per line, see the puzzle text format).
        puzzle_file: PathBuf,
        /// Which line of the file to solve (0-indexed).
        #[arg(short, long, default_value_t = 0)]
        line: usize,
        /// Print per-retry statistics as the search progresses.
        #[arg(short, long)]
        verbose: bool,
    },
    /// Solve every puzzle in a file and report aggregate statistics.
    Bench {
        /// Path to a puzzle file.
        puzzle_file: PathBuf,
    },
}

fn print_stats(stats: &Statistics) {
    println!(
        "  retry {:>4}  clauses={:<8} variables={:<6} time={:.3}s",
        stats.retried,
        stats.clauses,
        stats.variables,
        stats.acum_time.as_secs_f64()
    );
}

fn install_cancel_handler() -> Result<Arc<AtomicBool>> {
    let cancel = Arc::new(AtomicBool::new(false));
    let handler_flag = cancel.clone();
    ctrlc::set_handler(move || {
        log::warn!("cancellation requested (Ctrl-C)");
        handler_flag.store(true, Ordering::SeqCst);
    })
    .context("failed to install Ctrl-C handler")?;
    Ok(cancel)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Solve {
            puzzle_file,
            line,
            verbose,
        } => {
            let boards = repository::load_puzzles(&puzzle_file)
                .with_context(|| format!("loading puzzles from {}", puzzle_file.display()))?;
            let mut board = boards
                .into_iter()
                .nth(line)
                .with_context(|| format!("{} has no line {line}", puzzle_file.display()))?;

            let cancel = install_cancel_handler()?;

            let subscribers = if verbose {
                vec![Box::new(|_board: &_, stats: &Statistics| print_stats(stats)) as Box<dyn FnMut(&_, &_)>]
            } else {
                Vec::new()
            };

            driver::solve(&mut board, Some(cancel), subscribers)?;

            if board.solved {
                println!("{}", render(&board));
                println!("solved");
            } else {
                println!("no solution found");
            }
        }
        Command::Bench { puzzle_file } => {
            let boards = repository::load_puzzles(&puzzle_file)
                .with_context(|| format!("loading puzzles from {}", puzzle_file.display()))?;
            info!("loaded {} puzzles from {}", boards.len(), puzzle_file.display());

            let mut solved = 0usize;
            for (idx, mut board) in boards.into_iter().enumerate() {
                driver::solve(&mut board, None, Vec::new())?;
                println!("puzzle {idx}: solved={}", board.solved);
                if board.solved {
                    solved += 1;
                }
            }
            println!("solved {solved} puzzle(s)");
        }
    }

    Ok(())
}
