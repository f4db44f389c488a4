//! Staircase puzzle CLI.
//!
//! Generates a uniquely solvable staircase puzzle from a seed, prints the
//! shape pair, the input sequence that clears it and the finished board, and
//! can dump the full shape catalog or re-verify a generated puzzle.

use clap::{Parser, Subcommand};

use staircase::{catalog, generate_puzzle, Puzzle};

/// Generates and verifies staircase puzzles.
#[derive(Parser)]
#[command(name = "staircase")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a puzzle and print its solution and board.
    Generate {
        /// Seed for deterministic generation; random if omitted.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List every shape in the catalog.
    Catalog,
    /// Regenerate a puzzle and re-run the exhaustive solver on it.
    Verify {
        #[arg(long)]
        seed: u64,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let outcome = match cli.command {
        Some(Command::Generate { seed }) => run_generate(seed),
        Some(Command::Catalog) => {
            run_catalog();
            Ok(())
        }
        Some(Command::Verify { seed }) => run_verify(seed),
        None => run_generate(None),
    };

    if let Err(error) = outcome {
        eprintln!("engine failure: {error}");
        std::process::exit(1);
    }
}

fn run_generate(seed: Option<u64>) -> Result<(), staircase::EngineError> {
    let seed = seed.unwrap_or_else(rand::random);
    let puzzle = generate_puzzle(seed)?;
    print_puzzle(seed, &puzzle);
    Ok(())
}

fn print_puzzle(seed: u64, puzzle: &Puzzle) {
    println!("seed: {seed}");
    println!("left component:  {}", puzzle.left_component());
    println!("right component: {}", puzzle.right_component());
    println!("solution: {:?}", puzzle.solution());
    println!("{puzzle}");
}

fn run_catalog() {
    let shapes = catalog();
    for shape in shapes {
        println!("{shape}");
    }
    println!("{} shapes", shapes.len());
}

fn run_verify(seed: u64) -> Result<(), staircase::EngineError> {
    let puzzle = generate_puzzle(seed)?;
    let solutions = puzzle.enumerate_solutions()?;

    let mut distinct: Vec<String> = solutions
        .iter()
        .map(|solution| solution.chars().filter(|&c| c != ' ').collect())
        .collect();
    distinct.sort();
    distinct.dedup();

    println!(
        "seed {seed}: {} sequences, {} distinct",
        solutions.len(),
        distinct.len()
    );
    println!("generated: {}", puzzle.stripped_solution());
    match distinct.as_slice() {
        [only] if *only == puzzle.stripped_solution() => println!("verified: unique"),
        _ => println!("verified: MISMATCH"),
    }
    Ok(())
}
