//! Deterministic turn engine
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick`
//! - Seeded RNG only
//! - Walls are always stored and tested in `WallSide` order
//! - No rendering or platform dependencies

pub mod collision;
pub mod events;
pub mod gesture;
pub mod palette;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{WallContact, WallProgress, ball_wall_contact, check_walls};
pub use events::{EndReason, EventQueue, GameEvent, RoundCallbacks};
pub use gesture::{FlingDirection, GestureTracker, TouchSample};
pub use palette::{ColorPool, GameColor, PALETTE, TurnColors};
pub use rect::Rect;
pub use state::{Ball, Fling, GamePhase, GameState, Wall, WallSide};
pub use tick::tick;
