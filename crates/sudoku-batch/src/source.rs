//! Puzzle file reading and solution file placement.
//!
//! Text format: one line per grid row, one character per cell. `1`-`9`
//! is a given, `X` (or an explicit `0`) is an empty cell. Short lines
//! simply omit their trailing cells; rows and columns past the ninth
//! are ignored. Any other character is a per-file parse error; one
//! bad file never aborts the batch.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use sudoku_core::{Grid, Position, GRID_SIZE};

/// The empty-cell placeholder in puzzle files.
pub const EMPTY_CELL: char = 'X';

/// Suffix reserved for solution files, excluded from puzzle discovery.
pub const SOLUTION_SUFFIX: &str = ".sln.txt";

/// Errors raised while locating, parsing, or writing puzzle files.
#[derive(Debug)]
pub enum SourceError {
    /// The puzzle directory does not exist
    DirectoryNotFound(PathBuf),
    /// The given path exists but is not a directory
    NotADirectory(PathBuf),
    /// A character that is neither a digit nor the placeholder
    MalformedCell {
        path: PathBuf,
        line: usize,
        column: usize,
        found: char,
    },
    /// Underlying filesystem failure
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirectoryNotFound(path) => {
                write!(f, "Could not access directory: {}", path.display())
            }
            Self::NotADirectory(path) => {
                write!(f, "Not a directory: {}", path.display())
            }
            Self::MalformedCell {
                path,
                line,
                column,
                found,
            } => write!(
                f,
                "Malformed cell {:?} at line {}, column {} of {}",
                found,
                line,
                column,
                path.display()
            ),
            Self::Io { path, source } => {
                write!(f, "I/O error on {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Read one puzzle file into a [`Grid`] named after the file.
pub fn read_puzzle(path: &Path) -> Result<Grid, SourceError> {
    let text = fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut filled: Vec<(Position, u8)> = Vec::new();
    for (row, line) in text.lines().take(GRID_SIZE).enumerate() {
        for (col, ch) in line.chars().take(GRID_SIZE).enumerate() {
            match ch {
                EMPTY_CELL | '0' => {}
                '1'..='9' => {
                    filled.push((Position::new(row, col), ch as u8 - b'0'));
                }
                _ => {
                    return Err(SourceError::MalformedCell {
                        path: path.to_path_buf(),
                        line: row + 1,
                        column: col + 1,
                        found: ch,
                    })
                }
            }
        }
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(Grid::from_filled(&name, &filled))
}

/// List the puzzle files in a directory: `.txt` files that are not
/// solution files, sorted for a deterministic batch order.
pub fn puzzle_files(dir: &Path) -> Result<Vec<PathBuf>, SourceError> {
    if !dir.exists() {
        return Err(SourceError::DirectoryNotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(SourceError::NotADirectory(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|source| SourceError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| SourceError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let is_txt = path.extension().is_some_and(|ext| ext == "txt");
        let is_solution = path
            .file_name()
            .is_some_and(|n| n.to_string_lossy().ends_with(SOLUTION_SUFFIX));
        if is_txt && !is_solution {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Where the solution for a puzzle file goes: a `<base>.sln.txt`
/// sibling in the same directory.
pub fn solution_path(puzzle_path: &Path) -> PathBuf {
    puzzle_path.with_extension("sln.txt")
}

/// Write a solved grid next to its puzzle file, returning the path
/// written to.
pub fn write_solution(puzzle_path: &Path, solution: &Grid) -> Result<PathBuf, SourceError> {
    let path = solution_path(puzzle_path);
    fs::write(&path, format!("{}\n", solution)).map_err(|source| SourceError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
