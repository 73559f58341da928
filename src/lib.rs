//! Leaf Crawler - a garden caterpillar chase game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, pursuit, collisions, game state)
//! - `render`: Software framebuffer rendering
//! - `audio`: Procedural sound effects and music
//! - `settings`: Player preferences
//! - `highscores`: Local leaderboard

pub mod audio;
pub mod highscores;
pub mod render;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (one motion step per tick)
    pub const TICK_HZ: u32 = 50;

    /// Play-field dimensions in pixels
    pub const PLAY_WIDTH: i32 = 500;
    pub const PLAY_HEIGHT: i32 = 500;

    /// Side length of one body segment (and of the chaser)
    pub const SEGMENT_SIZE: i32 = 20;
    /// Distance the head travels in one commanded step
    pub const STEP_SIZE: i32 = 20;
    /// Number of body segments in a fresh crawler
    pub const BODY_SEGMENTS: usize = 3;

    /// Vertical launch velocity at the start of a jump (negative = up)
    pub const JUMP_LAUNCH_VELOCITY: i32 = -25;
    /// Gravity added to the jump velocity each tick
    pub const JUMP_GRAVITY: i32 = 5;

    /// Chaser defaults
    pub const CHASER_SIZE: i32 = 20;
    /// Pixels the chaser closes per tick, per axis
    pub const CHASER_STEP: i32 = 4;
    /// Minimum Chebyshev distance between a fresh chaser and the head
    pub const CHASER_MIN_SPAWN_DIST: i32 = 200;

    /// Score gained per survived second
    pub const SCORE_PER_SECOND: u64 = 2;
    /// Score spent by one dash
    pub const DASH_COST: u64 = 20;

    /// Duration of the death effect after a capture, in ticks
    pub const DEATH_EFFECT_TICKS: u32 = 100;
}

/// Whole seconds elapsed after the given number of ticks
#[inline]
pub fn ticks_to_secs(ticks: u64) -> u64 {
    ticks / consts::TICK_HZ as u64
}

/// Milliseconds since the Unix epoch; used for run seeds and score timestamps
pub fn unix_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
