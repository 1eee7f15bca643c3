//! Swip headless runner
//!
//! Plays rounds with a scripted finger so the turn engine can be watched
//! through the log. The fixed-timestep loop is the same one a windowed host
//! would run; a host only swaps the autoplayer for real touch input and hands
//! the vertex list to its GPU pipeline.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use swip::consts::{MAX_SUBSTEPS, SIM_DT};
use swip::renderer::{as_bytes, build_vertices, draw_list};
use swip::sim::{EndReason, GameEvent, GamePhase, GameState, GestureTracker, RoundCallbacks, WallSide, tick};
use swip::{InputMode, Tuning};

const SCREEN_WIDTH: f32 = 720.0;
const SCREEN_HEIGHT: f32 = 1280.0;
/// Host frame length in milliseconds (60 Hz)
const FRAME_MS: u64 = 16;
/// Give up on a session that runs longer than this many frames
const MAX_FRAMES_PER_SESSION: u32 = 60 * 60 * 10;

/// Headless Swip runner
#[derive(Debug, Parser)]
#[command(name = "swip")]
#[command(about = "Plays Swip rounds with a scripted finger")]
struct Options {
    /// Tuning JSON to load
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Write the effective tuning to this path
    #[arg(long = "write-tuning")]
    write_tuning: Option<PathBuf>,
    /// RNG seed; defaults to the current time
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = 3)]
    sessions: u32,
    /// Use discrete flings instead of drag and release
    #[arg(long)]
    fling: bool,
    /// Chance the autoplayer aims at a matching wall
    #[arg(long, default_value_t = 0.95)]
    accuracy: f32,
}

/// Round lifecycle observer that narrates into the log
#[derive(Debug, Default)]
struct SessionLog {
    rounds_started: u32,
    last_result: Option<(u32, EndReason)>,
}

impl RoundCallbacks for SessionLog {
    fn on_round_start(&mut self) {
        self.rounds_started += 1;
        log::info!("Round {} started", self.rounds_started);
    }

    fn on_round_pause(&mut self) {
        log::info!("Round paused");
    }

    fn on_round_end(&mut self, final_score: u32, reason: EndReason) {
        log::info!("Round over: {} ({:?})", final_score, reason);
        self.last_result = Some((final_score, reason));
    }
}

/// One scripted drag: the finger moves `step` per frame for `frames_left` frames
#[derive(Debug, Clone, Copy)]
struct Stroke {
    pos: Vec2,
    step: Vec2,
    frames_left: u32,
}

/// Scripted finger that aims the ball at a wall
struct Autoplayer {
    rng: Pcg32,
    accuracy: f32,
    clock_ms: u64,
    stroke: Option<Stroke>,
}

impl Autoplayer {
    fn new(seed: u64, accuracy: f32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed ^ 0x5eed),
            accuracy: accuracy.clamp(0.0, 1.0),
            clock_ms: 0,
            stroke: None,
        }
    }

    /// Feed this frame's touch input
    fn act(&mut self, state: &GameState, gestures: &mut GestureTracker) {
        self.clock_ms += FRAME_MS;

        if let Some(mut stroke) = self.stroke.take() {
            stroke.pos += stroke.step;
            if stroke.frames_left == 0 || state.phase != GamePhase::Active {
                gestures.record_touch_up(stroke.pos.x, stroke.pos.y, self.clock_ms);
            } else {
                gestures.record_drag(stroke.pos.x, stroke.pos.y, self.clock_ms);
                stroke.frames_left -= 1;
                self.stroke = Some(stroke);
            }
            return;
        }

        if state.phase != GamePhase::Active {
            return;
        }
        let Some(ball) = &state.ball else {
            return;
        };
        if ball.dragging || ball.fling.is_some() || ball.vel != Vec2::ZERO || ball.is_scaling() {
            return;
        }

        let side = self.pick_side(|s| ball.can_pass_through(s));
        let aim = (state.wall(side).bounds.center() - ball.pos).normalize_or_zero();
        // Screen space has y pointing down
        let aim_screen = Vec2::new(aim.x, -aim.y);
        let start = Vec2::new(ball.pos.x, state.screen.y - ball.pos.y);
        log::debug!("Autoplayer aims {:?}", side);

        gestures.record_touch_down(start.x, start.y, self.clock_ms);
        match state.tuning.input_mode {
            InputMode::DragRelease => {
                self.stroke = Some(Stroke {
                    pos: start,
                    step: aim_screen * 30.0,
                    frames_left: 3,
                });
            }
            InputMode::Fling => {
                let end = start + aim_screen * 40.0;
                gestures.record_touch_up(end.x, end.y, self.clock_ms + 50);
                gestures.record_fling(aim_screen.x * 2000.0, aim_screen.y * 2000.0);
            }
        }
    }

    fn pick_side(&mut self, passable: impl Fn(WallSide) -> bool) -> WallSide {
        let want_passable = self.rng.random::<f32>() < self.accuracy;
        let candidates: Vec<WallSide> = WallSide::ALL
            .into_iter()
            .filter(|s| passable(*s) == want_passable)
            .collect();
        if candidates.is_empty() {
            return WallSide::Top;
        }
        candidates[self.rng.random_range(0..candidates.len())]
    }
}

/// Fixed-timestep driver around the turn engine
struct Game {
    state: GameState,
    gestures: GestureTracker,
    accumulator: f32,
    callbacks: SessionLog,
    max_vertex_bytes: usize,
}

impl Game {
    fn new(seed: u64, tuning: Tuning) -> Self {
        let mut gestures = GestureTracker::new(&tuning);
        gestures.resize(SCREEN_WIDTH, SCREEN_HEIGHT);
        Self {
            state: GameState::new(seed, SCREEN_WIDTH, SCREEN_HEIGHT, tuning),
            gestures,
            accumulator: 0.0,
            callbacks: SessionLog::default(),
            max_vertex_bytes: 0,
        }
    }

    /// Run simulation ticks
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &mut self.gestures, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        for event in self.state.events.dispatch(&mut self.callbacks) {
            match event {
                GameEvent::ColorUnlocked { color } => log::info!("New color: {:?}", color),
                GameEvent::TurnLengthDecreased { turn_length } => {
                    log::info!("Turns now last {:.2}s", turn_length)
                }
                other => log::debug!("{:?}", other),
            }
        }
    }

    /// Build this frame's vertices as a host renderer would
    fn render(&mut self) {
        let vertices = build_vertices(&draw_list(&self.state));
        self.max_vertex_bytes = self.max_vertex_bytes.max(as_bytes(&vertices).len());
    }

    /// Play until the current round ends. Returns the final score, or `None`
    /// if the frame limit was hit first.
    fn play_session(&mut self, player: &mut Autoplayer) -> Option<(u32, EndReason)> {
        self.callbacks.last_result = None;
        for _ in 0..MAX_FRAMES_PER_SESSION {
            player.act(&self.state, &mut self.gestures);
            self.update(FRAME_MS as f32 / 1000.0);
            self.render();
            if let Some(result) = self.callbacks.last_result {
                return Some(result);
            }
        }
        None
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let options = Options::parse();
    let mut tuning = match &options.tuning {
        Some(path) => Tuning::load(path),
        None => Tuning::default(),
    };
    if options.fling {
        tuning.input_mode = InputMode::Fling;
    }

    if let Some(path) = &options.write_tuning {
        match tuning.save(path) {
            Ok(()) => log::info!("Tuning written to {}", path.display()),
            Err(e) => log::error!("Failed to write tuning to {}: {}", path.display(), e),
        }
    }

    let seed = options.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    });
    log::info!(
        "Swip starting (seed {}, {} mode, {})",
        seed,
        match tuning.input_mode {
            InputMode::DragRelease => "drag",
            InputMode::Fling => "fling",
        },
        tuning.difficulty.as_str()
    );

    let mut game = Game::new(seed, tuning);
    let mut player = Autoplayer::new(seed, options.accuracy);
    let mut best = 0;

    for session in 1..=options.sessions {
        match game.play_session(&mut player) {
            Some((score, _)) => best = best.max(score),
            None => log::warn!("Session {} hit the frame limit at score {}", session, game.state.score),
        }
        log::debug!("Largest vertex upload: {} bytes", game.max_vertex_bytes);
        game.state.prepare_new_game();
    }

    println!("Best score over {} sessions: {}", options.sessions, best);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web host drives the library directly
}
