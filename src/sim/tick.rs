//! Per-frame simulation tick
//!
//! Advances the round by one frame. The current phase selects the branch;
//! game over is a phase change plus a `RoundEnded` event.

use super::collision::check_walls;
use super::events::{EndReason, GameEvent};
use super::gesture::GestureTracker;
use super::state::{GamePhase, GameState};
use crate::tuning::InputMode;

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, gestures: &mut GestureTracker, dt: f32) {
    match state.phase {
        GamePhase::Starting => tick_starting(state, gestures, dt),
        GamePhase::Active => tick_active(state, gestures, dt),
        GamePhase::Paused => {}
        GamePhase::Ended => {
            // Let the last ball shrink away
            if let Some(ball) = state.ball.as_mut() {
                ball.update_scale(dt);
            }
        }
    }

    gestures.end_frame();
}

fn tick_starting(state: &mut GameState, gestures: &mut GestureTracker, dt: f32) {
    state.countdown_elapsed += dt;
    if state.countdown_elapsed >= state.tuning.start_countdown {
        start_round(state);
    } else if pause_button_tapped(state, gestures) {
        state.pause();
    }
}

fn tick_active(state: &mut GameState, gestures: &mut GestureTracker, dt: f32) {
    state.turn_elapsed += dt;

    if state.turn_elapsed >= state.turn_length {
        end_round(state, EndReason::Timeout);
        return;
    }

    let screen = state.screen;
    let wall_size = state.wall_size();
    let fling_time = state.tuning.fling_time;
    let input_mode = state.tuning.input_mode;

    let ball = state
        .ball
        .as_mut()
        .expect("an active turn always has a ball");

    match input_mode {
        InputMode::DragRelease => {
            ball.drag(gestures);
            ball.try_to_release(gestures);
        }
        InputMode::Fling => {
            if let Some(direction) = gestures.consume_fling() {
                ball.attempt_to_fling(direction, screen, wall_size, fling_time);
            }
        }
    }

    ball.advance(dt);
    check_walls(ball, &state.walls);

    if ball.progress.has_passed_through_wall() {
        turn_succeeded(state);
    } else if ball.progress.has_hit_invalid_wall() {
        end_round(state, EndReason::InvalidWall);
    } else if pause_button_tapped(state, gestures) {
        state.pause();
    }
}

/// Countdown finished: paint the walls and spawn the first ball
fn start_round(state: &mut GameState) {
    state.turn_elapsed = 0.0;
    state.replace_walls_and_ball();
    state.phase = GamePhase::Active;
    state.events.push(GameEvent::RoundStarted);
    log::info!("Round started (turn length {:.2}s)", state.turn_length);
}

/// Score a point and set up the next turn
fn turn_succeeded(state: &mut GameState) {
    state.score += 1;
    state.turn_elapsed = 0.0;
    state.events.push(GameEvent::TurnSucceeded { score: state.score });

    if state.score % state.tuning.turns_before_new_color == 0 {
        if let Some(color) = state.pool.add_color_to_active() {
            state.events.push(GameEvent::ColorUnlocked { color });
            log::info!("Score {}: unlocked {:?} ({} colors)", state.score, color, state.pool.len());
        }
    }

    state.replace_walls_and_ball();

    if state.score % state.tuning.turns_before_decrement == 0 {
        let shorter = (state.turn_length - state.tuning.turn_length_decrement)
            .max(state.tuning.minimum_turn_length);
        if shorter < state.turn_length {
            state.turn_length = shorter;
            state.events.push(GameEvent::TurnLengthDecreased {
                turn_length: shorter,
            });
            log::info!("Score {}: turn length now {:.2}s", state.score, shorter);
        }
    }
}

/// The round is lost
fn end_round(state: &mut GameState, reason: EndReason) {
    state.phase = GamePhase::Ended;
    if let Some(ball) = state.ball.as_mut() {
        ball.dragging = false;
        ball.shrink();
    }
    state.events.push(GameEvent::RoundEnded {
        final_score: state.score,
        reason,
    });
    log::info!("Round ended ({:?}) with score {}", reason, state.score);
}

fn pause_button_tapped(state: &GameState, gestures: &GestureTracker) -> bool {
    gestures.was_click_detected() && state.pause_button.contains_point(gestures.last_world_position())
}
