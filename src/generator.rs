//! Randomized puzzle generation and the validation loop.
//!
//! Generation is only a proposal mechanism: a depth-bounded random search
//! builds a candidate staircase, then the exhaustive solver acts as the
//! oracle of puzzle quality. A candidate is accepted only when the solver
//! proves the generated sequence is the single possible solution; everything
//! else is discarded and the loop restarts with a fresh base shape.

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;

use crate::error::{AttemptsExceeded, EngineError};
use crate::grid::{HIGHEST_DIAGONAL, LOWEST_DIAGONAL};
use crate::puzzle::{Puzzle, PuzzleState};
use crate::shape::catalog;
use crate::solver;

/// Tuned search constants.
///
/// The defaults are behaviorally significant: they shape the distribution of
/// accepted puzzles and how long the validation loop runs. Kept as
/// configuration rather than hard-coded so tests and benchmarks can tighten
/// them.
#[derive(Clone, Debug)]
pub struct Tuning {
    /// Local backtracking failures allowed per generation attempt.
    pub attempt_budget: u32,
    /// Probability of restarting the diagonal frontier at an eligible step.
    pub chunk_probability: f64,
    /// Inclusive lower bound on the drawn target depth.
    pub min_target_depth: u32,
    /// Exclusive upper bound on the drawn target depth.
    pub max_target_depth: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            attempt_budget: 64,
            chunk_probability: 1.0 / 64.0,
            min_target_depth: 16,
            max_target_depth: 20,
        }
    }
}

/// Budget of local failures for one generation attempt, spent on dead ends.
struct AttemptCounter {
    remaining: u32,
}

impl AttemptCounter {
    fn new(budget: u32) -> Self {
        Self { remaining: budget }
    }

    fn spend(&mut self) -> Result<(), AttemptsExceeded> {
        if self.remaining == 0 {
            return Err(AttemptsExceeded);
        }
        self.remaining -= 1;
        Ok(())
    }
}

/// Generates a validated unique-solution puzzle from a seed.
///
/// Deterministic: the same seed always yields the same puzzle. Blocks until
/// a candidate passes validation; the only error is the solver's
/// stalled-front invariant violation.
pub fn generate_puzzle(seed: u64) -> Result<Puzzle, EngineError> {
    generate_with(&mut StdRng::seed_from_u64(seed), &Tuning::default())
}

/// Generation loop over an explicit random source.
pub fn generate_with(rng: &mut StdRng, tuning: &Tuning) -> Result<Puzzle, EngineError> {
    let shapes = catalog();

    loop {
        let left = shapes[rng.random_range(0..shapes.len())];
        let right = match left.counterpart() {
            Some(right) => right,
            // unreachable for catalog members; skip rather than trust it
            None => continue,
        };

        let target_depth = rng.random_range(tuning.min_target_depth..tuning.max_target_depth);
        let mut counter = AttemptCounter::new(tuning.attempt_budget);
        let preset = PuzzleState::new(left, right);

        let mut candidate = match generate_step(preset, rng, tuning, target_depth, 0, 0, &mut counter)
        {
            Ok(Some(candidate)) => candidate,
            Ok(None) => {
                debug!("generation attempt failed: search space exhausted");
                continue;
            }
            Err(AttemptsExceeded) => {
                debug!("generation attempt failed: attempt budget spent");
                continue;
            }
        };

        // leave a clean target for the solver
        candidate.release_obligations();

        let solutions = solver::solve(candidate.solving_view())?;
        let distinct: FxHashSet<String> = solutions
            .iter()
            .map(|solution| solution.chars().filter(|&c| c != ' ').collect())
            .collect();
        let generated: String = candidate.inputs().chars().filter(|&c| c != ' ').collect();

        if distinct.len() == 1 && distinct.contains(&generated) {
            return Ok(Puzzle::from_state(candidate));
        }

        debug!(
            "generation attempt failed: {} distinct solutions",
            distinct.len()
        );
    }
}

/// One step of the depth-bounded random staircase search.
///
/// At depth zero the snapshot is accepted iff the current chunk spans more
/// than one placement and the staircase advanced past `target_y`; dead ends
/// spend the shared budget. Otherwise the step either restarts the frontier
/// (small probability, only when the acceptance condition already holds) or
/// recurses into every legal placement of both shapes in random order,
/// returning the first success.
fn generate_step(
    state: PuzzleState,
    rng: &mut StdRng,
    tuning: &Tuning,
    depth: u32,
    chunk_size: u32,
    target_y: i32,
    counter: &mut AttemptCounter,
) -> Result<Option<PuzzleState>, AttemptsExceeded> {
    let max_y = state.max_diagonal();
    let valid_chunk = chunk_size > 1 && max_y > target_y;

    if depth == 0 {
        if valid_chunk {
            return Ok(Some(state));
        }
        counter.spend()?;
        return Ok(None);
    }

    let new_chunk = valid_chunk && rng.random::<f64>() < tuning.chunk_probability;

    let mut queue: Vec<PuzzleState> = Vec::new();
    if new_chunk {
        queue.extend((LOWEST_DIAGONAL..HIGHEST_DIAGONAL).map(|y| state.restart_chunk(y)));
    }
    if queue.is_empty() {
        queue = state.branches(true);
        queue.extend(state.branches(false));
        queue.shuffle(rng);
    }
    if queue.is_empty() {
        counter.spend()?;
        return Ok(None);
    }

    let (next_chunk_size, next_target_y) = if new_chunk {
        (0, max_y + 1)
    } else {
        (chunk_size + 1, target_y)
    };

    for branch in queue {
        if let Some(accepted) = generate_step(
            branch,
            rng,
            tuning,
            depth - 1,
            next_chunk_size,
            next_target_y,
            counter,
        )? {
            return Ok(Some(accepted));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_counter_spends_down_to_failure() {
        let mut counter = AttemptCounter::new(2);
        assert!(counter.spend().is_ok());
        assert!(counter.spend().is_ok());
        assert_eq!(counter.spend(), Err(AttemptsExceeded));
    }

    #[test]
    fn test_generation_is_deterministic_per_seed() {
        let first = generate_puzzle(42).expect("generation succeeds");
        let second = generate_puzzle(42).expect("generation succeeds");
        assert!(first == second);
        assert_eq!(first.solution(), second.solution());
    }

    #[test]
    fn test_components_are_distinct() {
        let puzzle = generate_puzzle(5).expect("generation succeeds");
        assert_ne!(puzzle.left_component(), puzzle.right_component());
    }

    #[test]
    fn test_solution_starts_with_a_placement() {
        // the first action can never be a chunk restart
        let puzzle = generate_puzzle(9).expect("generation succeeds");
        let first = puzzle.solution().chars().next().expect("non-empty");
        assert!(first == 'L' || first == 'R');
    }

    #[test]
    fn test_cell_groups_align_with_solution() {
        let puzzle = generate_puzzle(17).expect("generation succeeds");
        let groups = puzzle.cell_groups();
        assert_eq!(groups.len(), puzzle.solution().len());

        for (input, group) in puzzle.solution().chars().zip(&groups) {
            match input {
                ' ' => assert!(group.is_empty()),
                _ => assert!(!group.is_empty()),
            }
        }
    }
}
