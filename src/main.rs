use std::error::Error;

use clap::{Parser, ValueEnum};
use rand::{rngs::StdRng, SeedableRng};

use tile_solver::{
    is_solvable, solve_fast, Path, PuzzleError, PuzzleState, SolverWorker, MAX_SIZE,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Strategy {
    /// IDA*, shortest solution
    Optimal,
    /// greedy best-first, quick but longer
    Fast,
}

#[derive(Parser, Debug)]
#[clap(author, version, about = "Solve sliding-tile puzzles", long_about = None)]
struct Args {
    /// Board as one hex digit per cell, row-major, 0 for the blank (e.g. 123456789abcdef0).
    /// A random board is generated when omitted
    board: Option<String>,

    /// Grid side of a generated board
    #[clap(short, long, default_value_t = 4)]
    size: usize,

    /// Seed for generating boards
    #[clap(long)]
    seed: Option<u64>,

    /// Generate by making this many random moves from the goal instead of a full shuffle
    #[clap(long)]
    scramble: Option<usize>,

    #[clap(long, value_enum, default_value_t = Strategy::Optimal)]
    strategy: Strategy,
}

fn starting_board(args: &Args) -> Result<PuzzleState, PuzzleError> {
    if let Some(hex) = &args.board {
        return PuzzleState::from_hex(hex);
    }

    if !(2..=MAX_SIZE).contains(&args.size) {
        return Err(PuzzleError::UnsupportedSize(args.size));
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match args.scramble {
        Some(moves) => Ok(PuzzleState::goal(args.size).walk(moves, &mut rng)),
        None => PuzzleState::shuffled(args.size, &mut rng),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let start = starting_board(&args)?;
    if !is_solvable(&start) {
        return Err(PuzzleError::Unsolvable.into());
    }

    println!("Start:");
    println!("{}", start);
    println!("----");

    // both cases list only the boards after `start`
    let moves: Path = match args.strategy {
        Strategy::Optimal => {
            let worker = SolverWorker::spawn()?;
            worker.solve(start.clone())?.into_iter().skip(1).collect()
        }
        Strategy::Fast => solve_fast(&start),
    };

    if moves.is_empty() && !start.is_goal() {
        println!("No solution found");
        return Ok(());
    }

    println!("Found a solution in {} moves:", moves.len());
    for (i, board) in moves.iter().enumerate() {
        println!("----");
        println!("Move {}:", i + 1);
        println!("{}", board);
    }

    if let Ok(hex) = start.to_hex() {
        println!("----");
        println!("Board code: {}", hex);
    }

    Ok(())
}
