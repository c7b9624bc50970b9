use thiserror::Error;

/// Reasons a board supplied from outside the engine is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("grid side {0} is not supported (expected 2 to 16)")]
    UnsupportedSize(usize),

    #[error("expected {expected} tiles, found {found}")]
    InvalidLength { expected: usize, found: usize },

    #[error("{0} cells do not form a square grid")]
    NotSquare(usize),

    #[error("tile {tile} is out of range (maximum is {max})")]
    TileOutOfRange { tile: u8, max: usize },

    #[error("tile {0} appears more than once")]
    DuplicateTile(u8),

    #[error("invalid hexadecimal digit {0:?}")]
    InvalidHexDigit(char),

    #[error("hex encoding holds at most 16 cells, board has {cells}")]
    TooLargeForHex { cells: usize },

    #[error("row has {found} cells, expected {expected}")]
    RaggedRow { expected: usize, found: usize },

    #[error("cannot parse cell {0:?}")]
    InvalidCell(String),

    #[error("board is not solvable")]
    Unsolvable,
}

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("failed to spawn solver thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("solver worker has shut down")]
    Disconnected,
}
