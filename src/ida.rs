use std::collections::HashSet;

use log::{debug, info};

use crate::{
    board::{Path, PuzzleState},
    heuristics::enhanced_heuristic,
};

/// Work done by one [`solve_optimal_with_stats`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// threshold passes started
    pub iterations: usize,
    pub expanded: usize,
    pub generated: usize,
}

// result of exploring one subtree under the current threshold
enum Outcome {
    Found(Path),
    // smallest f-value that went over the threshold
    Pruned(u32),
    // every branch dead-ends on the active path
    Exhausted,
}

struct Search {
    threshold: u32,
    // path from the start to the state being explored; `visited` holds the same states
    path: Path,
    visited: HashSet<PuzzleState>,
    stats: SearchStats,
}

impl Search {
    fn explore(&mut self, state: &PuzzleState, g: u32) -> Outcome {
        let f = g + enhanced_heuristic(state);
        if f > self.threshold {
            return Outcome::Pruned(f);
        }

        if state.is_goal() {
            return Outcome::Found(self.path.clone());
        }

        self.stats.expanded += 1;

        let mut bound: Option<u32> = None;
        for neighbor in state.neighbors() {
            self.stats.generated += 1;
            if !self.visited.insert(neighbor.clone()) {
                continue;
            }

            self.path.push(neighbor.clone());
            let outcome = self.explore(&neighbor, g + 1);
            self.path.pop();
            self.visited.remove(&neighbor);

            match outcome {
                Outcome::Found(path) => return Outcome::Found(path),
                Outcome::Pruned(f) => bound = Some(bound.map_or(f, |b| b.min(f))),
                Outcome::Exhausted => {}
            }
        }

        bound.map_or(Outcome::Exhausted, Outcome::Pruned)
    }
}

/// Shortest path from `start` to the goal, both ends included.
///
/// Empty when the search space runs out without reaching the goal, which
/// only happens for boards [`is_solvable`](crate::is_solvable) rejects.
pub fn solve_optimal(start: &PuzzleState) -> Path {
    solve_optimal_with_stats(start).0
}

pub fn solve_optimal_with_stats(start: &PuzzleState) -> (Path, SearchStats) {
    let mut search = Search {
        threshold: enhanced_heuristic(start),
        path: vec![start.clone()],
        visited: HashSet::new(),
        stats: SearchStats::default(),
    };

    loop {
        search.stats.iterations += 1;
        search.visited.clear();
        search.visited.insert(start.clone());

        debug!(
            "IDA* pass {} with threshold {} ({} expanded so far)",
            search.stats.iterations, search.threshold, search.stats.expanded
        );

        match search.explore(start, 0) {
            Outcome::Found(path) => {
                info!(
                    "found a solution in {} moves after {} passes ({} expanded, {} generated)",
                    path.len() - 1,
                    search.stats.iterations,
                    search.stats.expanded,
                    search.stats.generated
                );
                return (path, search.stats);
            }
            // pruned values are all above the old threshold, so this strictly increases
            Outcome::Pruned(next) => search.threshold = next,
            Outcome::Exhausted => {
                info!(
                    "no solution after {} passes ({} expanded)",
                    search.stats.iterations, search.stats.expanded
                );
                return (Vec::new(), search.stats);
            }
        }
    }
}
