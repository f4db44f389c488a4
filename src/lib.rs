//! Staircase Puzzle Engine
//!
//! Generates and verifies a logic puzzle built from two complementary piece
//! shapes placed along a diagonal staircase on a bounded grid, and derives
//! the unique left/right input sequence that clears it.
//!
//! The engine is pure in-memory computation: [`generate_puzzle`] proposes
//! random staircases until the exhaustive solver certifies that exactly one
//! input sequence works, then hands back the finished [`Puzzle`] with its
//! shape pair, solution string and per-placement cell groups.

pub mod error;
pub mod generator;
pub mod grid;
pub mod puzzle;
pub mod shape;
mod solver;
pub mod worker;

pub use error::EngineError;
pub use generator::{generate_puzzle, generate_with, Tuning};
pub use puzzle::Puzzle;
pub use shape::{catalog, Shape};
