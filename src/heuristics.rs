use auto_enums::auto_enum;

use crate::board::{PuzzleState, BLANK};

#[derive(Debug, Clone, Copy)]
enum Line {
    Row(usize),
    Column(usize),
}

impl Line {
    // does `tile` sit on this line in the goal?
    fn is_home_of(self, tile: u8, size: usize) -> bool {
        let target = usize::from(tile) - 1;
        match self {
            Line::Row(row) => target / size == row,
            Line::Column(col) => target % size == col,
        }
    }
}

#[auto_enum(Iterator)]
fn cells(line: Line, size: usize) -> impl Iterator<Item = usize> {
    match line {
        Line::Row(row) => row * size..(row + 1) * size,
        Line::Column(col) => (col..size * size).step_by(size),
    }
}

/// Sum over all tiles of the grid distance to their goal cell.
pub fn manhattan_distance(state: &PuzzleState) -> u32 {
    let size = state.size();
    let distance: usize = state
        .tiles()
        .iter()
        .enumerate()
        .filter(|(_, &tile)| tile != BLANK)
        .map(|(ix, &tile)| {
            let target = usize::from(tile) - 1;
            (ix / size).abs_diff(target / size) + (ix % size).abs_diff(target % size)
        })
        .sum();

    distance as u32
}

// single pass along the line: every home tile smaller than the largest
// home tile already seen must leave the line and come back, costing 2
fn line_conflicts(state: &PuzzleState, line: Line) -> u32 {
    let size = state.size();
    let mut max_seen = BLANK;
    let mut conflicts = 0;

    for ix in cells(line, size) {
        let tile = state.tiles()[ix];
        if tile == BLANK || !line.is_home_of(tile, size) {
            continue;
        }

        if tile > max_seen {
            max_seen = tile;
        } else {
            conflicts += 2;
        }
    }

    conflicts
}

/// Extra moves forced by tiles that share their goal row (or column) but sit in reversed order.
pub fn linear_conflict(state: &PuzzleState) -> u32 {
    (0..state.size())
        .flat_map(|k| [Line::Row(k), Line::Column(k)])
        .map(|line| line_conflicts(state, line))
        .sum()
}

/// Manhattan distance plus linear conflict; admissible, used as `h` by IDA*.
pub fn enhanced_heuristic(state: &PuzzleState) -> u32 {
    manhattan_distance(state) + linear_conflict(state)
}
