//! Exhaustive solution enumeration.
//!
//! Unlike the generator, the solver never short-circuits: it walks every
//! accepting path so that ambiguity can be detected. It runs over a
//! solving-mode snapshot of a finished grid, consuming the cells generation
//! filled. Infeasible branches simply contribute no sequences.

use crate::error::EngineError;
use crate::puzzle::{PuzzleState, MAX_FRONT_ADVANCES};

/// Enumerates every input sequence that clears the grid.
///
/// Iterative worklist search; enumeration order is unspecified but the
/// returned set of sequences is exhaustive. Errors only on the stalled-front
/// invariant violation, which signals a grid-transition defect rather than an
/// unsolvable puzzle.
pub fn solve(initial: PuzzleState) -> Result<Vec<String>, EngineError> {
    let mut worklist = vec![initial];
    let mut solutions = Vec::new();

    while let Some(state) = worklist.pop() {
        if state.is_cleared() {
            solutions.push(state.into_inputs());
            continue;
        }

        if state.count_must_occupy() == 0 {
            // nothing is obligated but cells remain: hop to the next
            // non-empty diagonal, exactly like a generation chunk restart
            match state.advance_front() {
                Some(branch) => worklist.push(branch),
                None => {
                    return Err(EngineError::StalledFront {
                        max_advances: MAX_FRONT_ADVANCES,
                    })
                }
            }
            continue;
        }

        worklist.extend(state.branches(true));
        worklist.extend(state.branches(false));
    }

    Ok(solutions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate_puzzle;

    #[test]
    fn test_solutions_agree_after_stripping_separators() {
        let puzzle = generate_puzzle(11).expect("generation succeeds");
        let solutions = puzzle.enumerate_solutions().expect("solver runs clean");
        assert!(!solutions.is_empty());

        let expected = puzzle.stripped_solution();
        for solution in &solutions {
            let stripped: String = solution.chars().filter(|&c| c != ' ').collect();
            assert_eq!(stripped, expected);
        }
    }

    #[test]
    fn test_solution_length_matches_target_depth() {
        // every recursion level appends exactly one character, so the full
        // sequence length equals the drawn target depth
        let puzzle = generate_puzzle(3).expect("generation succeeds");
        assert!((16..20).contains(&puzzle.solution().len()));

        let stripped = puzzle.stripped_solution();
        assert!(!stripped.is_empty());
        assert!(stripped.chars().all(|c| c == 'L' || c == 'R'));
    }
}
