use std::collections::{HashMap, HashSet, VecDeque};

use itertools::Itertools;
use log::debug;

use crate::{
    board::{Path, PuzzleState},
    heuristics::manhattan_distance,
};

/// Greedy best-first search ordered by Manhattan distance alone.
///
/// Returns the moves to apply from `start`, excluding `start` itself: empty
/// when `start` is already solved, and also empty when the goal is
/// unreachable. The path ends at the goal but is usually not the shortest.
pub fn solve_fast(start: &PuzzleState) -> Path {
    let mut open: Vec<(PuzzleState, u32)> = vec![(start.clone(), manhattan_distance(start))];
    let mut came_from: HashMap<PuzzleState, PuzzleState> = HashMap::new();
    let mut closed: HashSet<PuzzleState> = HashSet::new();

    // NB: position_min_by_key picks the earliest entry on ties, so equal
    // priorities are served in insertion order
    while let Some(ix) = open.iter().position_min_by_key(|(_, priority)| *priority) {
        let (current, _) = open.remove(ix);

        if current.is_goal() {
            debug!(
                "greedy search reached the goal after expanding {} boards",
                closed.len()
            );
            return reconstruct_path(&came_from, current);
        }

        for neighbor in current.neighbors() {
            if closed.contains(&neighbor) || open.iter().any(|(state, _)| *state == neighbor) {
                continue;
            }

            let priority = manhattan_distance(&neighbor);
            came_from.insert(neighbor.clone(), current.clone());
            open.push((neighbor, priority));
        }

        closed.insert(current);
    }

    debug!("greedy search exhausted {} boards", closed.len());
    Vec::new()
}

// walks the backpointers from the goal, dropping the start board
fn reconstruct_path(came_from: &HashMap<PuzzleState, PuzzleState>, goal: PuzzleState) -> Path {
    let mut path = vec![goal];
    while let Some(previous) = path.last().and_then(|state| came_from.get(state)) {
        path.push(previous.clone());
    }

    path.pop();
    path.reverse();
    path
}

/// Hands out one greedy move at a time, the way a "hint" button consumes them.
#[derive(Debug, Default, Clone)]
pub struct StepSolver {
    plan: VecDeque<PuzzleState>,
    // board the remaining plan continues from
    handed_out: Option<PuzzleState>,
}

impl StepSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// The board to move to from `current`, or `None` when there is nothing left to do.
    ///
    /// The cached plan is reused only while `current` is the board this solver last handed
    /// out; any other board gets a fresh plan.
    pub fn next_move(&mut self, current: &PuzzleState) -> Option<PuzzleState> {
        if current.is_goal() {
            self.reset();
            return None;
        }

        let on_plan = !self.plan.is_empty()
            && self
                .handed_out
                .as_ref()
                .is_some_and(|last| last == current);
        if !on_plan {
            self.plan = solve_fast(current).into();
        }

        let next = self.plan.pop_front();
        self.handed_out = next.clone();
        next
    }

    pub fn remaining(&self) -> usize {
        self.plan.len()
    }

    pub fn reset(&mut self) {
        self.plan.clear();
        self.handed_out = None;
    }
}
