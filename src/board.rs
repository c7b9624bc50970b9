use std::{
    fmt::{Display, Write},
    ops::Index,
};

use itertools::Itertools;
use rand::{seq::SliceRandom, Rng};
use smallvec::SmallVec;

use crate::{error::PuzzleError, solvability::is_solvable};

pub const BLANK: u8 = 0;

/// Largest supported grid side; every tile must fit in a `u8`.
pub const MAX_SIZE: usize = 16;

/// Largest board (in cells) the hex codec can carry, one digit per cell.
pub const MAX_HEX_CELLS: usize = 16;

/// An ordered sequence of boards, each one move away from the previous.
pub type Path = Vec<PuzzleState>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

// both solvers expand in this order, so ties break the same way everywhere
pub const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

impl Direction {
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// One configuration of an N×N board, stored row-major with `0` as the blank.
///
/// Values are immutable: every move produces a new state.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct PuzzleState {
    size: usize,
    tiles: Vec<u8>,
    blank: usize,
}

impl PuzzleState {
    /// Validates that `tiles` is a permutation of `0..size*size`.
    pub fn new(size: usize, tiles: Vec<u8>) -> Result<Self, PuzzleError> {
        if !(2..=MAX_SIZE).contains(&size) {
            return Err(PuzzleError::UnsupportedSize(size));
        }

        let cells = size * size;
        if tiles.len() != cells {
            return Err(PuzzleError::InvalidLength {
                expected: cells,
                found: tiles.len(),
            });
        }

        let mut seen = vec![false; cells];
        let mut blank = 0;
        for (ix, &tile) in tiles.iter().enumerate() {
            let slot = seen
                .get_mut(usize::from(tile))
                .ok_or(PuzzleError::TileOutOfRange {
                    tile,
                    max: cells - 1,
                })?;
            if *slot {
                return Err(PuzzleError::DuplicateTile(tile));
            }
            *slot = true;

            if tile == BLANK {
                blank = ix;
            }
        }

        // NB: n² distinct values below n² means the blank is present
        Ok(PuzzleState { size, tiles, blank })
    }

    /// Like [`PuzzleState::new`], inferring the side from a square tile count.
    pub fn from_tiles(tiles: Vec<u8>) -> Result<Self, PuzzleError> {
        let size = (2..=MAX_SIZE)
            .find(|n| n * n == tiles.len())
            .ok_or(PuzzleError::NotSquare(tiles.len()))?;
        Self::new(size, tiles)
    }

    /// The solved board: tiles ascending, blank last.
    ///
    /// Panics unless `size` is in `2..=MAX_SIZE`; validate untrusted sizes with [`PuzzleState::new`].
    pub fn goal(size: usize) -> Self {
        assert!(
            (2..=MAX_SIZE).contains(&size),
            "grid side {size} is not supported"
        );

        let cells = size * size;
        let tiles = (1..cells)
            .map(|tile| tile as u8)
            .chain(std::iter::once(BLANK))
            .collect();

        PuzzleState {
            size,
            tiles,
            blank: cells - 1,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    pub fn blank_index(&self) -> usize {
        self.blank
    }

    pub fn is_goal(&self) -> bool {
        let last = self.tiles.len() - 1;
        self.blank == last
            && self.tiles[..last]
                .iter()
                .zip(1..)
                .all(|(&tile, expected)| usize::from(tile) == expected)
    }

    /// Moves the blank one cell, or `None` when that would leave the grid.
    pub fn step(&self, direction: Direction) -> Option<Self> {
        let (d_row, d_col) = direction.delta();
        let row = (self.blank / self.size).checked_add_signed(d_row)?;
        let col = (self.blank % self.size).checked_add_signed(d_col)?;
        if row >= self.size || col >= self.size {
            return None;
        }

        let target = row * self.size + col;
        let mut tiles = self.tiles.clone();
        tiles.swap(self.blank, target);

        Some(PuzzleState {
            size: self.size,
            tiles,
            blank: target,
        })
    }

    /// Successor states in [`DIRECTIONS`] order: 2 for a corner blank, 3 on an edge, 4 inside.
    pub fn neighbors(&self) -> SmallVec<[PuzzleState; 4]> {
        DIRECTIONS
            .iter()
            .filter_map(|&direction| self.step(direction))
            .collect()
    }

    /// Pushes the tile at `index`, and every tile between it and the blank, one cell toward the blank.
    ///
    /// Counts as a single move for the player. Returns `None` when `index` is not in line with the blank.
    pub fn slide(&self, index: usize) -> Option<Self> {
        if index >= self.tiles.len() || index == self.blank {
            return None;
        }

        let (row, col) = (index / self.size, index % self.size);
        let (blank_row, blank_col) = (self.blank / self.size, self.blank % self.size);

        let (direction, count) = if row == blank_row {
            if col < blank_col {
                (Direction::Left, blank_col - col)
            } else {
                (Direction::Right, col - blank_col)
            }
        } else if col == blank_col {
            if row < blank_row {
                (Direction::Up, blank_row - row)
            } else {
                (Direction::Down, row - blank_row)
            }
        } else {
            return None;
        };

        (0..count).try_fold(self.clone(), |state, _| state.step(direction))
    }

    /// A uniformly shuffled board that is solvable and not already solved.
    pub fn shuffled<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self, PuzzleError> {
        if !(2..=MAX_SIZE).contains(&size) {
            return Err(PuzzleError::UnsupportedSize(size));
        }
        let mut tiles = Self::goal(size).tiles;

        loop {
            tiles.shuffle(rng);
            let Some(blank) = tiles.iter().position(|&tile| tile == BLANK) else {
                continue;
            };

            let candidate = PuzzleState {
                size,
                tiles: tiles.clone(),
                blank,
            };
            if is_solvable(&candidate) && !candidate.is_goal() {
                return Ok(candidate);
            }
        }
    }

    /// Applies `steps` random moves, never immediately undoing the previous one.
    pub fn walk<R: Rng + ?Sized>(&self, steps: usize, rng: &mut R) -> Self {
        let mut previous: Option<PuzzleState> = None;
        let mut current = self.clone();

        for _ in 0..steps {
            let candidates: SmallVec<[PuzzleState; 4]> = current
                .neighbors()
                .into_iter()
                .filter(|next| previous.as_ref() != Some(next))
                .collect();

            let Some(next) = candidates.choose(rng).cloned() else {
                break;
            };
            previous = Some(std::mem::replace(&mut current, next));
        }

        current
    }

    /// One lowercase hex digit per cell, row-major.
    pub fn to_hex(&self) -> Result<String, PuzzleError> {
        if self.tiles.len() > MAX_HEX_CELLS {
            return Err(PuzzleError::TooLargeForHex {
                cells: self.tiles.len(),
            });
        }

        Ok(self
            .tiles
            .iter()
            .filter_map(|&tile| char::from_digit(tile.into(), 16))
            .collect())
    }

    /// Decodes [`PuzzleState::to_hex`] output. Solvability is not checked.
    pub fn from_hex(hex: &str) -> Result<Self, PuzzleError> {
        let tiles = hex
            .trim()
            .chars()
            .map(|c| {
                c.to_digit(16)
                    .map(|digit| digit as u8)
                    .ok_or(PuzzleError::InvalidHexDigit(c))
            })
            .collect::<Result<Vec<u8>, _>>()?;

        if tiles.len() > MAX_HEX_CELLS {
            return Err(PuzzleError::TooLargeForHex { cells: tiles.len() });
        }

        Self::from_tiles(tiles)
    }
}

impl Display for PuzzleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = (self.tiles.len() - 1).to_string().len();

        let mut first = true;
        for line in self.tiles.chunks(self.size) {
            if !first {
                f.write_char('\n')?;
            } else {
                first = false;
            }

            let row = line
                .iter()
                .map(|&tile| {
                    if tile == BLANK {
                        format!("{:>width$}", ".")
                    } else {
                        format!("{tile:>width$}")
                    }
                })
                .join(" ");
            f.write_str(&row)?;
        }

        Ok(())
    }
}

impl Index<(usize, usize)> for PuzzleState {
    type Output = u8;
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.tiles[index.0 * self.size + index.1]
    }
}

/// Reads rows of whitespace-separated tiles; `0` or `.` marks the blank.
pub fn parse_board(b: &str) -> Result<PuzzleState, PuzzleError> {
    let rows: Vec<Vec<&str>> = b
        .trim()
        .lines()
        .map(|row| row.split_whitespace().collect::<Vec<_>>())
        .filter(|row| !row.is_empty())
        .collect();

    let size = rows.len();
    if let Some(row) = rows.iter().find(|row| row.len() != size) {
        return Err(PuzzleError::RaggedRow {
            expected: size,
            found: row.len(),
        });
    }

    let tiles = rows
        .iter()
        .flatten()
        .map(|cell| parse_cell(cell))
        .collect::<Result<Vec<u8>, _>>()?;

    PuzzleState::new(size, tiles)
}

fn parse_cell(cell: &str) -> Result<u8, PuzzleError> {
    if cell == "." {
        return Ok(BLANK);
    }

    cell.parse()
        .map_err(|_| PuzzleError::InvalidCell(cell.to_owned()))
}

#[cfg(test)]
mod test {
    use itertools::Itertools;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn board(size: usize, tiles: &[u8]) -> PuzzleState {
        PuzzleState::new(size, tiles.to_vec()).unwrap()
    }

    #[test]
    fn goal_has_blank_last() {
        let goal = PuzzleState::goal(4);
        assert_eq!(goal.blank_index(), 15);
        assert_eq!(goal[(0, 0)], 1);
        assert_eq!(goal[(3, 2)], 15);
        assert!(goal.is_goal());
        assert!(!board(3, &[1, 2, 3, 4, 0, 6, 7, 5, 8]).is_goal());
    }

    #[test]
    #[should_panic(expected = "grid side 17 is not supported")]
    fn goal_rejects_oversized_grid() {
        PuzzleState::goal(17);
    }

    #[test]
    fn rejects_malformed_tiles() {
        assert_eq!(
            PuzzleState::new(3, vec![1, 2, 3]),
            Err(PuzzleError::InvalidLength {
                expected: 9,
                found: 3
            })
        );
        assert_eq!(
            PuzzleState::new(2, vec![1, 1, 2, 0]),
            Err(PuzzleError::DuplicateTile(1))
        );
        assert_eq!(
            PuzzleState::new(2, vec![1, 2, 4, 0]),
            Err(PuzzleError::TileOutOfRange { tile: 4, max: 3 })
        );
        assert_eq!(
            PuzzleState::new(1, vec![0]),
            Err(PuzzleError::UnsupportedSize(1))
        );
        assert_eq!(
            PuzzleState::from_tiles(vec![1, 2, 0]),
            Err(PuzzleError::NotSquare(3))
        );
    }

    #[test]
    fn corner_blank_has_two_neighbors_in_direction_order() {
        let neighbors = PuzzleState::goal(3).neighbors();

        assert_eq!(neighbors.len(), 2);
        assert_eq!(neighbors[0], board(3, &[1, 2, 3, 4, 5, 0, 7, 8, 6]));
        assert_eq!(neighbors[1], board(3, &[1, 2, 3, 4, 5, 6, 7, 0, 8]));
    }

    #[test]
    fn neighbors_are_one_swap_away() {
        let mut rng = StdRng::seed_from_u64(7);
        for size in 2..=5 {
            for _ in 0..20 {
                let state = PuzzleState::shuffled(size, &mut rng).unwrap();
                let neighbors = state.neighbors();
                assert!((2..=4).contains(&neighbors.len()));

                for next in &neighbors {
                    let changed = state
                        .tiles()
                        .iter()
                        .zip_eq(next.tiles())
                        .filter(|(a, b)| a != b)
                        .count();
                    assert_eq!(changed, 2);
                    assert_eq!(next.tiles()[next.blank_index()], BLANK);
                    assert_eq!(state.tiles()[next.blank_index()], next.tiles()[state.blank_index()]);
                    assert!(PuzzleState::new(size, next.tiles().to_vec()).is_ok());
                }

                assert_eq!(neighbors.iter().unique().count(), neighbors.len());
            }
        }
    }

    #[test]
    fn step_and_opposite_cancel_out() {
        let start = board(3, &[1, 2, 3, 4, 0, 6, 7, 5, 8]);
        for direction in DIRECTIONS {
            let there = start.step(direction).unwrap();
            assert_eq!(there.step(direction.opposite()), Some(start.clone()));
        }
        assert_eq!(PuzzleState::goal(3).step(Direction::Right), None);
    }

    #[test]
    fn slide_moves_a_whole_row() {
        let goal = PuzzleState::goal(4);

        let slid = goal.slide(12).unwrap();
        assert_eq!(
            slid.tiles(),
            &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 0, 13, 14, 15]
        );

        let slid = goal.slide(3).unwrap();
        assert_eq!(slid[(0, 3)], 0);
        assert_eq!(slid[(3, 3)], 12);

        assert_eq!(goal.slide(0), None);
        assert_eq!(goal.slide(15), None);
    }

    #[test]
    fn hex_round_trip() {
        let goal = PuzzleState::goal(4);
        assert_eq!(goal.to_hex().unwrap(), "123456789abcdef0");
        assert_eq!(PuzzleState::from_hex("123456789ABCDEF0").unwrap(), goal);

        let scrambled = PuzzleState::from_hex("12345078").err();
        assert_eq!(scrambled, Some(PuzzleError::NotSquare(8)));
        assert_eq!(
            PuzzleState::from_hex("12345678g"),
            Err(PuzzleError::InvalidHexDigit('g'))
        );
        assert_eq!(
            PuzzleState::goal(5).to_hex(),
            Err(PuzzleError::TooLargeForHex { cells: 25 })
        );
    }

    #[test]
    fn parse_and_display() {
        let state = parse_board(
            "
 1  2  3
 4  .  6
 7  5  8
",
        )
        .unwrap();

        assert_eq!(state, board(3, &[1, 2, 3, 4, 0, 6, 7, 5, 8]));
        assert_eq!(state.to_string(), "1 2 3\n4 . 6\n7 5 8");
        assert_eq!(
            PuzzleState::goal(4).to_string().lines().next(),
            Some(" 1  2  3  4")
        );

        assert_eq!(
            parse_board("1 2\n3"),
            Err(PuzzleError::RaggedRow {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            parse_board("1 x\n3 0"),
            Err(PuzzleError::InvalidCell("x".to_owned()))
        );
    }

    #[test]
    fn shuffle_is_deterministic_and_solvable() {
        let first = PuzzleState::shuffled(4, &mut StdRng::seed_from_u64(42)).unwrap();
        let second = PuzzleState::shuffled(4, &mut StdRng::seed_from_u64(42)).unwrap();

        assert_eq!(first, second);
        assert!(is_solvable(&first));
        assert!(!first.is_goal());
        assert_eq!(
            PuzzleState::shuffled(17, &mut StdRng::seed_from_u64(0)),
            Err(PuzzleError::UnsupportedSize(17))
        );
    }

    #[test]
    fn walk_stays_solvable() {
        let mut rng = StdRng::seed_from_u64(3);
        let walked = PuzzleState::goal(4).walk(40, &mut rng);
        assert!(is_solvable(&walked));
    }
}
