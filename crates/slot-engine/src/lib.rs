//! # slot-engine: Weighted-Reel Slot Machine Engine
//!
//! Builds slot machines from weighted reel strips, spins them, scores the
//! resulting grid against paylines and scatter rules, and computes exact
//! payout statistics straight from reel composition.
//!
//! ## Features
//!
//! - **Symbols**: plain, wildcard, negation and scatter pattern elements
//! - **Reel Strips**: weighted populations spun through a variable-height window
//! - **Pay Rules**: contiguous line matches, scatter counts, wildcard expansion
//! - **Statistics**: win probability, hit rate, RTP and volatility without simulation
//! - **Sessions**: per-player machine upgrades and paid plays over host services
//!
//! ## Architecture
//!
//! ```text
//! Machine
//!     │
//!     ├── Window (rows per column)
//!     ├── EngineConfig (precision, limits, seed)
//!     └── GameBase × N
//!           ├── ReelStrip × cols
//!           ├── Payline × N
//!           └── PayRule (Line | Scatter)
//!                 │
//!                 v
//!     pull_lever → Grid → evaluate → Reward
//! ```

pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod machine;
pub mod paytable;
pub mod presets;
pub mod reel;
pub mod render;
pub mod reward;
pub mod rng;
pub mod session;
pub mod stats;
pub mod symbols;

pub use config::*;
pub use error::{ConfigError, Result, SlotError};
pub use game::*;
pub use grid::*;
pub use machine::*;
pub use paytable::*;
pub use reel::*;
pub use render::*;
pub use reward::*;
pub use rng::*;
pub use session::*;
pub use stats::*;
pub use symbols::*;
