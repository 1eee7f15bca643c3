//! Swip - a color-matching swipe arcade game
//!
//! Core modules:
//! - `sim`: Deterministic turn engine (gestures, wall colors, collisions, round state)
//! - `renderer`: Draw list and vertex generation for a host renderer
//! - `tuning`: Data-driven game balance

pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{DifficultyPreset, InputMode, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the native runner (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Number of walls around the play field
    pub const NUMBER_OF_WALLS: usize = 4;

    /// Finger velocity is measured per millisecond, game velocities per second
    pub const MILLIS_PER_SECOND: f32 = 1000.0;
}

/// Convert a point from screen space (top-left origin, y down) to world space
/// (bottom-left origin, y up)
#[inline]
pub fn screen_to_world(screen: Vec2, screen_height: f32) -> Vec2 {
    Vec2::new(screen.x, screen_height - screen.y)
}

/// Smaller of the two screen dimensions, which all entity sizes scale from
#[inline]
pub fn shortest_side(width: f32, height: f32) -> f32 {
    width.min(height)
}
