//! Touch gesture tracking
//!
//! The host windowing layer reports raw touch events in screen coordinates
//! (top-left origin, y down, millisecond timestamps). The tracker keeps a short
//! history of the first finger and turns it into a drag velocity, a tap, or a
//! fling direction for the turn engine.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::MILLIS_PER_SECOND;
use crate::screen_to_world;
use crate::tuning::Tuning;

/// Cardinal direction of a swipe, in world terms (Up is toward the top wall)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlingDirection {
    Left,
    Up,
    Right,
    Down,
}

impl FlingDirection {
    /// Classify a fling velocity reported in screen coordinates
    pub fn from_velocity(vx: f32, vy: f32) -> Self {
        if vx.abs() > vy.abs() {
            if vx > 0.0 {
                FlingDirection::Right
            } else {
                FlingDirection::Left
            }
        } else if vy > 0.0 {
            FlingDirection::Down
        } else {
            FlingDirection::Up
        }
    }
}

/// One recorded finger position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchSample {
    pub pos: Vec2,
    pub time_ms: u64,
}

/// Tracks the first finger on the screen
#[derive(Debug, Clone)]
pub struct GestureTracker {
    /// Recent samples, oldest first
    history: VecDeque<TouchSample>,
    capacity: usize,
    /// Where and when the current (or last) press began
    down: Option<TouchSample>,
    /// Where and when the last press ended
    up: Option<TouchSample>,
    last_pos: Vec2,
    finger_down: bool,
    just_released: bool,
    pending_fling: Option<FlingDirection>,
    screen_height: f32,
    click_max_duration_ms: u64,
    click_max_distance: f32,
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new(&Tuning::default())
    }
}

impl GestureTracker {
    pub fn new(tuning: &Tuning) -> Self {
        let capacity = tuning.finger_history.max(1);
        Self {
            history: VecDeque::with_capacity(capacity),
            capacity,
            down: None,
            up: None,
            last_pos: Vec2::ZERO,
            finger_down: false,
            just_released: false,
            pending_fling: None,
            screen_height: 0.0,
            click_max_duration_ms: tuning.click_max_duration_ms,
            click_max_distance: tuning.click_max_distance,
        }
    }

    /// Update the screen size used to convert to world coordinates
    pub fn resize(&mut self, _width: f32, height: f32) {
        self.screen_height = height;
    }

    pub fn record_touch_down(&mut self, x: f32, y: f32, time_ms: u64) {
        let sample = TouchSample {
            pos: Vec2::new(x, y),
            time_ms,
        };
        self.history.clear();
        self.history.push_back(sample);
        self.down = Some(sample);
        self.up = None;
        self.last_pos = sample.pos;
        self.finger_down = true;
    }

    pub fn record_drag(&mut self, x: f32, y: f32, time_ms: u64) {
        if !self.finger_down {
            return;
        }
        self.push_sample(TouchSample {
            pos: Vec2::new(x, y),
            time_ms,
        });
    }

    pub fn record_touch_up(&mut self, x: f32, y: f32, time_ms: u64) {
        if !self.finger_down {
            return;
        }
        let sample = TouchSample {
            pos: Vec2::new(x, y),
            time_ms,
        };
        self.push_sample(sample);
        self.up = Some(sample);
        self.finger_down = false;
        self.just_released = true;
    }

    /// Record a fling reported by the host gesture recognizer (screen-space velocity)
    pub fn record_fling(&mut self, vx: f32, vy: f32) {
        self.pending_fling = Some(FlingDirection::from_velocity(vx, vy));
    }

    /// Take the pending fling, if any. Each fling is delivered once, and a
    /// gesture that qualifies as a tap is never delivered as a fling.
    pub fn consume_fling(&mut self) -> Option<FlingDirection> {
        let fling = self.pending_fling.take();
        if self.was_click_detected() {
            return None;
        }
        fling
    }

    /// Velocity of the finger in world units per second, from the oldest and
    /// newest retained samples
    pub fn calculate_drag_velocity(&self) -> Vec2 {
        let (Some(first), Some(last)) = (self.history.front(), self.history.back()) else {
            return Vec2::ZERO;
        };
        if self.history.len() < 2 || last.time_ms <= first.time_ms {
            return Vec2::ZERO;
        }

        let elapsed_ms = (last.time_ms - first.time_ms) as f32;
        let delta = last.pos - first.pos;
        Vec2::new(
            delta.x / elapsed_ms * MILLIS_PER_SECOND,
            -delta.y / elapsed_ms * MILLIS_PER_SECOND,
        )
    }

    /// True for the tick in which a short, nearly stationary press ended
    pub fn was_click_detected(&self) -> bool {
        if !self.just_released {
            return false;
        }
        let (Some(down), Some(up)) = (self.down, self.up) else {
            return false;
        };

        let held_ms = up.time_ms.saturating_sub(down.time_ms);
        let moved = (up.pos - down.pos).abs();
        held_ms <= self.click_max_duration_ms
            && moved.x < self.click_max_distance
            && moved.y < self.click_max_distance
    }

    /// Clear one-tick flags. Called at the end of every simulation tick, so a
    /// fling the tick did not consume is dropped rather than replayed later.
    pub fn end_frame(&mut self) {
        self.just_released = false;
        self.pending_fling = None;
    }

    pub fn is_finger_down(&self) -> bool {
        self.finger_down
    }

    pub fn was_just_released(&self) -> bool {
        self.just_released
    }

    /// Last finger position in screen coordinates
    pub fn last_position(&self) -> Vec2 {
        self.last_pos
    }

    /// Last finger position in world coordinates (bottom-left origin)
    pub fn last_world_position(&self) -> Vec2 {
        screen_to_world(self.last_pos, self.screen_height)
    }

    pub fn history(&self) -> impl Iterator<Item = &TouchSample> {
        self.history.iter()
    }

    fn push_sample(&mut self, sample: TouchSample) {
        while self.history.len() >= self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(sample);
        self.last_pos = sample.pos;
    }
}
