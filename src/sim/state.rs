//! Game state and core simulation types
//!
//! Everything a round needs lives on [`GameState`]: the walls, the current
//! ball, the color pool, the turn timer and the RNG. A new session is a call
//! to [`GameState::prepare_new_game`], never a new process.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::WallProgress;
use super::events::{EventQueue, GameEvent};
use super::gesture::{FlingDirection, GestureTracker};
use super::palette::{ColorPool, GameColor, TurnColors};
use super::rect::Rect;
use crate::consts::NUMBER_OF_WALLS;
use crate::shortest_side;
use crate::tuning::Tuning;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Countdown before the first turn
    Starting,
    /// A turn is running
    Active,
    /// Timers are frozen
    Paused,
    /// Round lost, waiting for a new game
    Ended,
}

/// The four edges of the screen, in their fixed order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl WallSide {
    pub const ALL: [WallSide; NUMBER_OF_WALLS] =
        [WallSide::Top, WallSide::Bottom, WallSide::Left, WallSide::Right];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Side for a wall index. Panics on an index outside 0..4.
    pub fn from_index(index: usize) -> Self {
        match Self::ALL.get(index) {
            Some(side) => *side,
            None => panic!("invalid wall index {index}"),
        }
    }

    /// Wall a fling in this direction heads for
    pub fn for_fling(direction: FlingDirection) -> Self {
        match direction {
            FlingDirection::Up => WallSide::Top,
            FlingDirection::Down => WallSide::Bottom,
            FlingDirection::Left => WallSide::Left,
            FlingDirection::Right => WallSide::Right,
        }
    }
}

/// One edge of the play field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub side: WallSide,
    pub color: GameColor,
    pub bounds: Rect,
}

impl Wall {
    pub fn new(side: WallSide, color: GameColor, width: f32, height: f32, thickness: f32) -> Self {
        let mut wall = Self {
            side,
            color,
            bounds: Rect::default(),
        };
        wall.resize(width, height, thickness);
        wall
    }

    /// Recompute the bounds for a new screen size
    pub fn resize(&mut self, width: f32, height: f32, thickness: f32) {
        self.bounds = match self.side {
            WallSide::Top => Rect::new(0.0, height - thickness, width, thickness),
            WallSide::Bottom => Rect::new(0.0, 0.0, width, thickness),
            WallSide::Left => Rect::new(0.0, 0.0, thickness, height),
            WallSide::Right => Rect::new(width - thickness, 0.0, thickness, height),
        };
    }
}

/// A discrete fling in progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fling {
    pub target: Vec2,
    pub elapsed: f32,
    pub duration: f32,
}

/// The ball the player sends through a wall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Radius at full scale
    pub base_radius: f32,
    pub color: GameColor,
    /// Walls this ball may pass through, by side index
    pub passable: [bool; NUMBER_OF_WALLS],
    /// Pass-through and impact flags for the current turn
    pub progress: WallProgress,
    /// Pinned to the finger
    pub dragging: bool,
    pub fling: Option<Fling>,
    scale: f32,
    scale_time: f32,
    scale_duration: f32,
    growing: bool,
}

impl Ball {
    /// A ball at zero scale; call [`Ball::grow`] to make it appear
    pub fn new(
        color: GameColor,
        passable: [bool; NUMBER_OF_WALLS],
        pos: Vec2,
        base_radius: f32,
        scale_duration: f32,
    ) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            base_radius,
            color,
            passable,
            progress: WallProgress::default(),
            dragging: false,
            fling: None,
            scale: 0.0,
            scale_time: scale_duration,
            scale_duration,
            growing: false,
        }
    }

    /// Current radius (base radius times scale)
    #[inline]
    pub fn radius(&self) -> f32 {
        self.base_radius * self.scale
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn is_scaling(&self) -> bool {
        self.scale_time < self.scale_duration
    }

    pub fn can_pass_through(&self, side: WallSide) -> bool {
        self.passable[side.index()]
    }

    /// Check if a world-space point lies within the ball
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.pos.distance_squared(point) <= self.radius() * self.radius()
    }

    /// Start growing toward full size; reverses a shrink in progress
    pub fn grow(&mut self) {
        if !self.growing {
            self.reverse_scaling();
            self.growing = true;
        }
    }

    /// Start shrinking toward zero; reverses a grow in progress
    pub fn shrink(&mut self) {
        if self.growing {
            self.reverse_scaling();
            self.growing = false;
        }
    }

    fn reverse_scaling(&mut self) {
        self.scale_time = if self.is_scaling() {
            self.scale_duration - self.scale_time
        } else {
            0.0
        };
    }

    /// Advance the grow/shrink animation
    pub fn update_scale(&mut self, dt: f32) {
        self.scale_time += dt;
        self.scale = if self.is_scaling() {
            let t = (self.scale_time / self.scale_duration).clamp(0.0, 1.0);
            if self.growing { t } else { 1.0 - t }
        } else if self.growing {
            1.0
        } else {
            0.0
        };
    }

    /// Advance the ball by one tick: scale, fling timer, then motion unless held
    pub fn advance(&mut self, dt: f32) {
        self.update_scale(dt);

        if let Some(fling) = self.fling.as_mut() {
            fling.elapsed += dt;
            if fling.elapsed >= fling.duration {
                log::debug!("Fling completed");
                self.fling = None;
            }
        }

        if !self.dragging {
            self.pos += self.vel * dt;
        }
    }

    /// Grab the ball when a press lands on it, then keep it under the finger
    pub fn drag(&mut self, gestures: &GestureTracker) {
        if !gestures.is_finger_down() {
            return;
        }

        let finger = gestures.last_world_position();
        if self.dragging {
            self.pos = finger;
        } else if self.contains_point(finger) {
            self.dragging = true;
            self.vel = Vec2::ZERO;
        }
    }

    /// Let go once the finger lifts, inheriting the finger's velocity
    pub fn try_to_release(&mut self, gestures: &GestureTracker) {
        if self.dragging && !gestures.is_finger_down() {
            self.dragging = false;
            self.vel = gestures.calculate_drag_velocity();
        }
    }

    /// Send the ball toward the wall in `direction`. Ignored while a fling is
    /// already in progress.
    pub fn attempt_to_fling(
        &mut self,
        direction: FlingDirection,
        screen: Vec2,
        wall_size: f32,
        duration: f32,
    ) {
        if self.fling.is_some() {
            return;
        }

        let reach = self.base_radius;
        let target = match direction {
            FlingDirection::Left => Vec2::new(wall_size - reach, screen.y / 2.0),
            FlingDirection::Up => Vec2::new(screen.x / 2.0, screen.y - wall_size + reach),
            FlingDirection::Right => Vec2::new(screen.x - wall_size + reach, screen.y / 2.0),
            FlingDirection::Down => Vec2::new(screen.x / 2.0, wall_size - reach),
        };

        log::debug!("Fling started {:?}", direction);
        self.dragging = false;
        self.vel = (target - self.pos) / duration;
        self.fling = Some(Fling {
            target,
            elapsed: 0.0,
            duration,
        });
    }
}

/// Complete round state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Phase to return to on resume
    paused_from: Option<GamePhase>,
    /// Screen size in pixels (width, height)
    pub screen: Vec2,
    /// Walls in `WallSide` order
    pub walls: [Wall; NUMBER_OF_WALLS],
    pub ball: Option<Ball>,
    pub pause_button: Rect,
    pub pool: ColorPool,
    /// Seconds the current turn may last
    pub turn_length: f32,
    /// Seconds spent in the current turn
    pub turn_elapsed: f32,
    /// Seconds spent counting down to the first turn
    pub countdown_elapsed: f32,
    /// Successful turns this round
    pub score: u32,
    pub events: EventQueue,
}

impl GameState {
    /// Create a session for a screen of `width` x `height` pixels
    pub fn new(seed: u64, width: f32, height: f32, mut tuning: Tuning) -> Self {
        tuning.validate();
        let mut rng = Pcg32::seed_from_u64(seed);
        let pool = ColorPool::new();
        let opening = pool.assign_turn_colors(&mut rng, false, 0.0);
        let thickness = shortest_side(width, height) * tuning.wall_size_ratio;
        let walls = WallSide::ALL
            .map(|side| Wall::new(side, opening.colors[side.index()], width, height, thickness));

        let mut state = Self {
            seed,
            rng,
            turn_length: tuning.initial_turn_length,
            tuning,
            phase: GamePhase::Starting,
            paused_from: None,
            screen: Vec2::new(width, height),
            walls,
            ball: None,
            pause_button: Rect::default(),
            pool,
            turn_elapsed: 0.0,
            countdown_elapsed: 0.0,
            score: 0,
            events: EventQueue::new(),
        };
        state.layout_pause_button();
        state
    }

    /// Reset everything that belongs to a session and count down again
    pub fn prepare_new_game(&mut self) {
        self.pool.reset();
        self.turn_length = self.tuning.initial_turn_length;
        self.turn_elapsed = 0.0;
        self.countdown_elapsed = 0.0;
        self.score = 0;
        self.ball = None;
        self.paused_from = None;

        let opening = self.pool.assign_turn_colors(&mut self.rng, false, 0.0);
        self.paint_walls(&opening);
        self.phase = GamePhase::Starting;
        log::info!("New game prepared (turn length {:.2}s)", self.turn_length);
    }

    /// Adjust walls, ball and pause button to a new screen size
    pub fn resize(&mut self, width: f32, height: f32) {
        self.screen = Vec2::new(width, height);
        let thickness = self.wall_size();
        for wall in &mut self.walls {
            wall.resize(width, height, thickness);
        }
        let radius = self.ball_base_radius();
        if let Some(ball) = self.ball.as_mut() {
            ball.base_radius = radius;
        }
        self.layout_pause_button();
    }

    /// Freeze the round. Only a starting or active round can be paused.
    pub fn pause(&mut self) {
        if matches!(self.phase, GamePhase::Starting | GamePhase::Active) {
            self.paused_from = Some(self.phase);
            self.phase = GamePhase::Paused;
            self.events.push(GameEvent::RoundPaused);
            log::info!("Round paused at score {}", self.score);
        }
    }

    /// Continue a paused round where it left off
    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = self.paused_from.take().unwrap_or(GamePhase::Active);
            self.events.push(GameEvent::RoundResumed);
            log::info!("Round resumed");
        }
    }

    /// Thickness of every wall
    pub fn wall_size(&self) -> f32 {
        shortest_side(self.screen.x, self.screen.y) * self.tuning.wall_size_ratio
    }

    /// Radius of a fully grown ball
    pub fn ball_base_radius(&self) -> f32 {
        shortest_side(self.screen.x, self.screen.y) * self.tuning.ball_size_ratio
    }

    pub fn wall(&self, side: WallSide) -> &Wall {
        &self.walls[side.index()]
    }

    pub fn wall_colors(&self) -> [GameColor; NUMBER_OF_WALLS] {
        self.walls.map(|w| w.color)
    }

    /// Fraction of the current turn still left, 1.0 at the start
    pub fn turn_remaining_fraction(&self) -> f32 {
        if self.turn_length <= 0.0 {
            return 0.0;
        }
        (1.0 - self.turn_elapsed / self.turn_length).clamp(0.0, 1.0)
    }

    /// Seconds left before the first turn starts
    pub fn countdown_remaining(&self) -> f32 {
        (self.tuning.start_countdown - self.countdown_elapsed).max(0.0)
    }

    /// Paint new wall colors and spawn a ball for the next turn
    pub fn replace_walls_and_ball(&mut self) {
        let allow_pair = self.score > self.tuning.turns_before_same_wall_colors;
        let turn = self.pool.assign_turn_colors(
            &mut self.rng,
            allow_pair,
            self.tuning.same_wall_color_chance,
        );
        self.paint_walls(&turn);

        let mut passable = [false; NUMBER_OF_WALLS];
        let matching = match turn.paired_index {
            None => {
                let wall = self.rng.random_range(0..NUMBER_OF_WALLS);
                passable[wall] = true;
                wall
            }
            Some(first) => {
                passable[first] = true;
                for (i, slot) in passable.iter_mut().enumerate().skip(first + 1) {
                    *slot = turn.colors[i] == turn.colors[first];
                }
                first
            }
        };

        let mut ball = Ball::new(
            turn.colors[matching],
            passable,
            self.screen / 2.0,
            self.ball_base_radius(),
            self.tuning.ball_scale_time,
        );
        ball.grow();
        log::debug!(
            "Turn {}: walls {:?}, ball {:?} passable {:?}",
            self.score + 1,
            turn.colors,
            ball.color,
            passable
        );
        self.ball = Some(ball);
    }

    fn paint_walls(&mut self, turn: &TurnColors) {
        for (wall, color) in self.walls.iter_mut().zip(turn.colors) {
            wall.color = color;
        }
    }

    fn layout_pause_button(&mut self) {
        let size = shortest_side(self.screen.x, self.screen.y) * self.tuning.pause_button_ratio;
        self.pause_button = Rect::new(0.0, self.screen.y - size, size, size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(42, 480.0, 800.0, Tuning::default())
    }

    #[test]
    fn test_new_state_is_starting() {
        let s = state();
        assert_eq!(s.phase, GamePhase::Starting);
        assert!(s.ball.is_none());
        assert_eq!(s.pool.len(), 4);
        assert_eq!(s.turn_length, 10.0);
    }

    #[test]
    fn test_wall_geometry() {
        let s = state();
        let size = 480.0 * 0.15;
        assert_eq!(s.wall(WallSide::Top).bounds, Rect::new(0.0, 800.0 - size, 480.0, size));
        assert_eq!(s.wall(WallSide::Bottom).bounds, Rect::new(0.0, 0.0, 480.0, size));
        assert_eq!(s.wall(WallSide::Left).bounds, Rect::new(0.0, 0.0, size, 800.0));
        assert_eq!(s.wall(WallSide::Right).bounds, Rect::new(480.0 - size, 0.0, size, 800.0));
    }

    #[test]
    fn test_walls_in_side_order() {
        let s = state();
        for (i, wall) in s.walls.iter().enumerate() {
            assert_eq!(wall.side.index(), i);
            assert_eq!(WallSide::from_index(i), wall.side);
        }
    }

    #[test]
    #[should_panic(expected = "invalid wall index")]
    fn test_bad_wall_index_panics() {
        let _ = WallSide::from_index(4);
    }

    #[test]
    fn test_resize_moves_walls_and_button() {
        let mut s = state();
        s.resize(1000.0, 600.0);
        let size = 600.0 * 0.15;
        assert_eq!(s.wall(WallSide::Right).bounds.x, 1000.0 - size);
        assert_eq!(s.pause_button, Rect::new(0.0, 600.0 - size, size, size));
    }

    #[test]
    fn test_replace_walls_and_ball_matches_one_wall() {
        let mut s = state();
        for _ in 0..50 {
            s.replace_walls_and_ball();
            let ball = s.ball.as_ref().unwrap();
            let passable: Vec<_> = (0..4).filter(|&i| ball.passable[i]).collect();
            assert_eq!(passable.len(), 1);
            assert_eq!(s.walls[passable[0]].color, ball.color);
            for i in 0..4 {
                assert_eq!(ball.passable[i], s.walls[i].color == ball.color);
            }
            assert_eq!(ball.pos, Vec2::new(240.0, 400.0));
        }
    }

    #[test]
    fn test_paired_walls_both_passable() {
        let mut s = state();
        s.tuning.same_wall_color_chance = 1.0;
        s.score = 21;
        s.replace_walls_and_ball();
        let ball = s.ball.as_ref().unwrap();
        assert_eq!(ball.passable.iter().filter(|p| **p).count(), 2);
        for i in 0..4 {
            assert_eq!(ball.passable[i], s.walls[i].color == ball.color);
        }
    }

    #[test]
    fn test_ball_grows_over_scale_time() {
        let mut ball = Ball::new(GameColor::Red, [true, false, false, false], Vec2::ZERO, 36.0, 0.2);
        assert_eq!(ball.radius(), 0.0);
        ball.grow();
        ball.update_scale(0.1);
        assert!((ball.scale() - 0.5).abs() < 1e-5);
        ball.update_scale(0.2);
        assert_eq!(ball.scale(), 1.0);
        assert_eq!(ball.radius(), 36.0);
    }

    #[test]
    fn test_ball_shrink_reverses_growth() {
        let mut ball = Ball::new(GameColor::Red, [true, false, false, false], Vec2::ZERO, 10.0, 0.2);
        ball.grow();
        ball.update_scale(0.05);
        ball.shrink();
        ball.update_scale(0.0);
        assert!((ball.scale() - 0.25).abs() < 1e-5);
        ball.update_scale(1.0);
        assert_eq!(ball.scale(), 0.0);
    }

    #[test]
    fn test_pause_and_resume_restore_phase() {
        let mut s = state();
        s.pause();
        assert_eq!(s.phase, GamePhase::Paused);
        s.resume();
        assert_eq!(s.phase, GamePhase::Starting);
        let events = s.events.drain();
        assert_eq!(events, vec![GameEvent::RoundPaused, GameEvent::RoundResumed]);
    }

    #[test]
    fn test_pause_ignored_when_ended() {
        let mut s = state();
        s.phase = GamePhase::Ended;
        s.pause();
        assert_eq!(s.phase, GamePhase::Ended);
        assert!(s.events.is_empty());
    }

    #[test]
    fn test_fling_targets() {
        let mut ball = Ball::new(GameColor::Red, [true, false, false, false], Vec2::new(240.0, 400.0), 36.0, 0.175);
        ball.attempt_to_fling(FlingDirection::Up, Vec2::new(480.0, 800.0), 72.0, 0.1);
        let fling = ball.fling.unwrap();
        assert_eq!(fling.target, Vec2::new(240.0, 800.0 - 72.0 + 36.0));
        assert!((ball.vel.y - (764.0 - 400.0) / 0.1).abs() < 1e-2);

        // A second fling while flying is ignored
        ball.attempt_to_fling(FlingDirection::Left, Vec2::new(480.0, 800.0), 72.0, 0.1);
        assert_eq!(ball.fling.unwrap().target, fling.target);
    }
}
