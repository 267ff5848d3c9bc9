// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Formic: a turn-based agent for ant-colony contests on a toroidal grid.
//!
//! An external engine streams per-turn observations over a line-oriented
//! text channel; the agent folds them into a world model, asks the decision
//! layer for movement orders, and acknowledges the turn.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Protocol framing (stdin/stdout)   │
//! ├─────────────────────────────────────┤
//! │      Decision layer (Bot seam)      │
//! ├─────────────────────────────────────┤
//! │  World model (grid, state, vision)  │
//! └─────────────────────────────────────┘
//! ```
//!
//! Everything is single-threaded and synchronous: one update→query→act
//! cycle per turn, driven by the engine.

pub mod bot;
pub mod error;
pub mod game;
pub mod protocol;
pub mod replay;

pub use error::{ParseError, UpdateError};

// Re-export key types at crate root for convenience
pub use bot::{Bot, Scout};
pub use game::{
    Cell, Direction, GameParams, Grid, Loc, ME, OwnerId, ReportLine, VisionCache, WorldState,
};
pub use protocol::{Order, run_bot};
