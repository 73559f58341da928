//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick rate only, integer positions
//! - Seeded RNG only (chaser spawn)
//! - No rendering, audio or platform dependencies; the tick reports through
//!   `GameState::events` and the caller does the rest

pub mod collision;
pub mod motion;
pub mod state;
pub mod tick;

pub use collision::squares_overlap;
pub use motion::{BehaviorProfile, Body, Bounds, Direction, MotionState, StepInput, StepOutcome};
pub use state::{Chaser, Crawler, GameEvent, GamePhase, GameState, Particle};
pub use tick::{TickInput, tick};
