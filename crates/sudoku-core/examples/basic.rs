//! Basic example of solving a puzzle with the core engine.

use sudoku_core::{Grid, Solver};

fn main() {
    // Wikipedia's example puzzle, 0 = empty
    let puzzle_string =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
    let puzzle = Grid::from_string("example", puzzle_string).expect("valid puzzle string");

    println!("Puzzle:");
    println!("{}", puzzle);
    println!("Empty cells: {}", puzzle.empty_positions().len());

    let solver = Solver::new();
    match solver.solve(&puzzle) {
        Some(solution) => {
            println!("\nSolution:");
            println!("{}", solution);
            println!("Verified: {}", solution.verify());
        }
        None => println!("\nNo solution exists."),
    }
}
