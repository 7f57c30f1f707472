use thiserror::Error;

/// Errors reported by skip list operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A max level of zero was requested, either for a new list or through
    /// `set_max_level`.
    #[error("skip list max level must be positive, got {0}")]
    InvalidMaxLevel(usize),

    /// A level-indexed node accessor was called past the node's height.
    #[error("level {level} is out of range for a node of height {height}")]
    LevelOutOfRange { level: usize, height: usize },

    #[error("cannot find key in skip list")]
    KeyNotFound,
}

pub type Result<T> = std::result::Result<T, Error>;
