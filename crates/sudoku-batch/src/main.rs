//! Batch Sudoku solver.
//!
//! Reads every puzzle file in a directory, solves each one, prints the
//! result, and writes solved grids to `.sln.txt` siblings. A file that
//! fails to parse is reported and skipped; the batch keeps going.

mod source;

use clap::Parser;
use log::{error, info, warn};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use sudoku_core::Solver;

/// Solve every Sudoku puzzle file in a directory.
#[derive(Parser)]
#[command(name = "sudoku-batch", version, about)]
struct Cli {
    /// Directory containing puzzle .txt files (prompted for when omitted)
    dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let dir = match cli.dir {
        Some(dir) => dir,
        None => match prompt_for_directory() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("Error reading directory prompt: {}", e);
                return ExitCode::FAILURE;
            }
        },
    };

    match run(&dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("batch aborted: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Interactive fallback when no directory argument was given.
fn prompt_for_directory() -> io::Result<PathBuf> {
    print!("Please enter the directory with puzzle files: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(PathBuf::from(line.trim()))
}

fn run(dir: &Path) -> Result<(), source::SourceError> {
    let files = source::puzzle_files(dir)?;
    if files.is_empty() {
        println!("No puzzle files found in {}", dir.display());
        return Ok(());
    }
    info!("found {} puzzle file(s) in {}", files.len(), dir.display());

    let solver = Solver::new();
    for path in &files {
        // Parse failures are per-file: report and move on.
        let puzzle = match source::read_puzzle(path) {
            Ok(puzzle) => puzzle,
            Err(e) => {
                warn!("skipping puzzle: {}", e);
                println!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        match solver.solve(&puzzle) {
            Some(solution) => {
                println!("Solution for puzzle {}", solution.name());
                println!("{}", solution);
                println!();
                match source::write_solution(path, &solution) {
                    Ok(out) => info!("wrote solution to {}", out.display()),
                    Err(e) => {
                        warn!("failed to write solution: {}", e);
                        println!("Could not write solution for {}: {}", solution.name(), e);
                    }
                }
            }
            None => println!("Could not solve puzzle {}", puzzle.name()),
        }
    }

    Ok(())
}
