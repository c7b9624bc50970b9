use itertools::Itertools;

use crate::board::{PuzzleState, BLANK};

/// Number of tile pairs (blank ignored) that appear in the opposite order to the goal.
pub fn inversion_count(state: &PuzzleState) -> usize {
    state
        .tiles()
        .iter()
        .filter(|&&tile| tile != BLANK)
        .tuple_combinations()
        .filter(|(a, b)| a > b)
        .count()
}

/// Whether `state` can reach the goal at all.
///
/// Legal moves preserve this parity, so it only needs checking once per
/// externally supplied or generated board, never during a search.
pub fn is_solvable(state: &PuzzleState) -> bool {
    let size = state.size();
    let inversions = inversion_count(state);

    if size % 2 == 1 {
        inversions % 2 == 0
    } else {
        let blank_row_from_bottom = size - state.blank_index() / size;
        (inversions + blank_row_from_bottom) % 2 == 1
    }
}
