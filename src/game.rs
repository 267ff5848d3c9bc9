//! World model for the agent.
//!
//! Implements the state the engine streams at us each turn:
//! - Toroidal grid of cells (land, water, food, dead markers, units)
//! - Entity indices (units, deaths, food, hills) kept in sync with the grid
//! - Wraparound distance and direction geometry
//! - Cached field-of-view computation

mod grid;
mod invariants;
mod state;
mod vision;

pub use grid::{Cell, Direction, Grid, Loc, ME, OwnerId};
pub use invariants::{InvariantViolation, check_invariants};
pub use state::{GameParams, ReportLine, WorldState};
pub use vision::VisionCache;
