//! Game balance and timing parameters
//!
//! Every constant of the turn engine lives here so that a host can load it
//! from a JSON file instead of recompiling.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyPreset {
    /// Long turns for learning the controls
    #[default]
    Relaxed,
    /// Short turns, the intended arcade pace
    Arcade,
}

impl DifficultyPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyPreset::Relaxed => "Relaxed",
            DifficultyPreset::Arcade => "Arcade",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "relaxed" | "easy" => Some(DifficultyPreset::Relaxed),
            "arcade" | "normal" => Some(DifficultyPreset::Arcade),
            _ => None,
        }
    }

    /// Seconds a turn lasts at the start of a session
    pub fn initial_turn_length(&self) -> f32 {
        match self {
            DifficultyPreset::Relaxed => 10.0,
            DifficultyPreset::Arcade => 1.2,
        }
    }
}

/// How the player sends the ball toward a wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InputMode {
    /// Grab the ball, drag it, and release it with the finger's velocity
    #[default]
    DragRelease,
    /// Swipe anywhere; the ball snaps toward the wall in the swipe direction
    Fling,
}

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub difficulty: DifficultyPreset,
    pub input_mode: InputMode,

    // === Turn timing (seconds) ===
    /// Length of the first turn
    pub initial_turn_length: f32,
    /// Amount removed from the turn length at each decrement
    pub turn_length_decrement: f32,
    /// Successful turns between decrements
    pub turns_before_decrement: u32,
    /// Turn length never drops below this
    pub minimum_turn_length: f32,
    /// Countdown before the first turn of a round
    pub start_countdown: f32,

    // === Wall colors ===
    /// Successful turns between color unlocks
    pub turns_before_new_color: u32,
    /// Score that must be exceeded before two walls may share a color
    pub turns_before_same_wall_colors: u32,
    /// Probability that two walls share a color once allowed
    pub same_wall_color_chance: f32,

    // === Geometry (fraction of the shorter screen side) ===
    pub ball_size_ratio: f32,
    pub wall_size_ratio: f32,
    pub pause_button_ratio: f32,

    // === Ball motion (seconds) ===
    /// Time a new ball takes to grow to full size
    pub ball_scale_time: f32,
    /// Time a discrete fling takes to reach its target
    pub fling_time: f32,

    // === Gestures ===
    /// Touch samples kept for the drag velocity
    pub finger_history: usize,
    /// Longest press still counted as a tap
    pub click_max_duration_ms: u64,
    /// Largest movement on either axis still counted as a tap
    pub click_max_distance: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::from_preset(DifficultyPreset::default())
    }
}

impl Tuning {
    /// Create tuning values for a difficulty preset
    pub fn from_preset(preset: DifficultyPreset) -> Self {
        Self {
            difficulty: preset,
            input_mode: InputMode::DragRelease,

            initial_turn_length: preset.initial_turn_length(),
            turn_length_decrement: 0.05,
            turns_before_decrement: 10,
            minimum_turn_length: 0.3,
            start_countdown: 1.0,

            turns_before_new_color: 8,
            turns_before_same_wall_colors: 20,
            same_wall_color_chance: 0.2,

            ball_size_ratio: 0.075,
            wall_size_ratio: 0.15,
            pause_button_ratio: 0.15,

            ball_scale_time: 0.175,
            fling_time: 0.1,

            finger_history: 5,
            click_max_duration_ms: 300,
            click_max_distance: 10.0,
        }
    }

    /// Apply a preset, keeping everything the preset does not govern
    pub fn apply_preset(&mut self, preset: DifficultyPreset) {
        self.difficulty = preset;
        self.initial_turn_length = preset.initial_turn_length();
    }

    /// Parse tuning from JSON. Missing keys take their default values.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate();
        Ok(tuning)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load tuning from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    return tuning;
                }
                Err(e) => log::warn!("Invalid tuning file {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Could not read tuning file {}: {}", path.display(), e),
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Save tuning to a JSON file
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Tuning saved to {}", path.display());
        Ok(())
    }

    /// Repair values that would break the turn engine
    pub fn validate(&mut self) {
        let defaults = Self::from_preset(self.difficulty);

        if !(self.minimum_turn_length > 0.0) {
            log::warn!("minimum_turn_length must be positive, using {}", defaults.minimum_turn_length);
            self.minimum_turn_length = defaults.minimum_turn_length;
        }
        if self.initial_turn_length < self.minimum_turn_length {
            log::warn!("initial_turn_length below minimum, raising to {}", self.minimum_turn_length);
            self.initial_turn_length = self.minimum_turn_length;
        }
        if self.turn_length_decrement < 0.0 {
            log::warn!("turn_length_decrement must not be negative, using 0");
            self.turn_length_decrement = 0.0;
        }
        if self.turns_before_decrement == 0 {
            self.turns_before_decrement = defaults.turns_before_decrement;
        }
        if self.turns_before_new_color == 0 {
            self.turns_before_new_color = defaults.turns_before_new_color;
        }
        self.same_wall_color_chance = self.same_wall_color_chance.clamp(0.0, 1.0);
        if self.finger_history < 2 {
            log::warn!("finger_history must hold at least 2 samples");
            self.finger_history = 2;
        }
        if !(self.ball_scale_time > 0.0) {
            self.ball_scale_time = defaults.ball_scale_time;
        }
        if !(self.fling_time > 0.0) {
            self.fling_time = defaults.fling_time;
        }
    }
}
