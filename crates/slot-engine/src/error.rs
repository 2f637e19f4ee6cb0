//! Error types

/// Invalid machine configuration.
///
/// Raised only while building reels, rules, games and machines. A value that
/// failed with one of these never exists, so nothing downstream re-checks it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("At least one game must be provided")]
    NoGames,

    #[error("Game '{game}' has {reels} reels but the window has {cols} columns")]
    ReelCountMismatch {
        game: String,
        reels: usize,
        cols: usize,
    },

    #[error("Game '{game}' payline {payline} spans {len} columns but the window has {cols}")]
    PaylineTooLong {
        game: String,
        payline: usize,
        len: usize,
        cols: usize,
    },

    #[error(
        "Game '{game}' payline {payline} uses row {row} in column {column}, which only has {rows} rows"
    )]
    PaylineOutOfBounds {
        game: String,
        payline: usize,
        column: usize,
        row: usize,
        rows: usize,
    },

    #[error("Reel has {symbols} symbols but {counts} counts")]
    WeightCountMismatch { symbols: usize, counts: usize },

    #[error("Reel population is empty")]
    EmptyReel,

    #[error("Wildcard expansion yields {patterns} patterns, limit is {limit}")]
    ExpansionLimit { patterns: usize, limit: usize },

    #[error("No game at index {index} (machine has {count})")]
    UnknownGame { index: usize, count: usize },
}

/// Crate-level error
#[derive(Debug, thiserror::Error)]
pub enum SlotError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Insufficient balance: {balance:.2} < {cost:.2}")]
    InsufficientBalance { balance: f64, cost: f64 },

    #[error("Collaborator failed: {0}")]
    Collaborator(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SlotError {
    /// True for setup failures that retrying cannot fix
    pub fn is_config(&self) -> bool {
        matches!(self, SlotError::Config(_))
    }
}

impl From<serde_json::Error> for SlotError {
    fn from(e: serde_json::Error) -> Self {
        SlotError::Serialization(e.to_string())
    }
}

impl From<serde_yml::Error> for SlotError {
    fn from(e: serde_yml::Error) -> Self {
        SlotError::Serialization(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SlotError>;
