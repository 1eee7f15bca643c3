//! Render adapter
//!
//! Turns a `GameState` into draw commands keyed by entity kind, and draw
//! commands into flat triangle lists. The host owns the actual GPU or canvas
//! pipeline; nothing here touches a graphics API.

pub mod shapes;
pub mod vertex;

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;

use crate::sim::{GameColor, GamePhase, GameState, Rect, WallSide};
pub use vertex::{Vertex, as_bytes, colors};

/// Triangles used for a full circle
const CIRCLE_SEGMENTS: u32 = 48;
/// Triangles used for a full timer overlay
const OVERLAY_SEGMENTS: u32 = 100;

/// One thing to draw, in world coordinates (bottom-left origin)
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Wall {
        side: WallSide,
        color: GameColor,
        bounds: Rect,
    },
    Ball {
        center: Vec2,
        radius: f32,
        color: GameColor,
        /// Fraction of the turn already used, drawn as a dark overlay
        timer_fraction: f32,
    },
    Button {
        bounds: Rect,
    },
}

/// Draw commands for the current frame, back to front
pub fn draw_list(state: &GameState) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(6);

    if let Some(ball) = &state.ball {
        commands.push(DrawCommand::Ball {
            center: ball.pos,
            radius: ball.radius(),
            color: ball.color,
            timer_fraction: 1.0 - state.turn_remaining_fraction(),
        });
    }

    for wall in &state.walls {
        commands.push(DrawCommand::Wall {
            side: wall.side,
            color: wall.color,
            bounds: wall.bounds,
        });
    }

    if matches!(state.phase, GamePhase::Starting | GamePhase::Active) {
        commands.push(DrawCommand::Button {
            bounds: state.pause_button,
        });
    }

    commands
}

/// Triangulate draw commands into one vertex list
pub fn build_vertices(commands: &[DrawCommand]) -> Vec<Vertex> {
    let mut vertices = Vec::new();

    for command in commands {
        match command {
            DrawCommand::Wall { color, bounds, .. } => {
                vertices.extend(shapes::rect(bounds, color.rgba()));
            }
            DrawCommand::Ball {
                center,
                radius,
                color,
                timer_fraction,
            } => {
                if *radius <= 0.0 {
                    continue;
                }
                vertices.extend(shapes::circle(*center, *radius, color.rgba(), CIRCLE_SEGMENTS));
                // Overlay sweeps clockwise from twelve o'clock
                vertices.extend(shapes::sector(
                    *center,
                    *radius,
                    FRAC_PI_2,
                    -timer_fraction.clamp(0.0, 1.0) * TAU,
                    colors::BALL_TIMER,
                    OVERLAY_SEGMENTS,
                ));
            }
            DrawCommand::Button { bounds } => {
                vertices.extend(shapes::rect(bounds, colors::PAUSE_BUTTON));
            }
        }
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GestureTracker, tick};
    use crate::tuning::Tuning;

    fn count_kinds(commands: &[DrawCommand]) -> (usize, usize, usize) {
        commands.iter().fold((0, 0, 0), |(w, b, btn), c| match c {
            DrawCommand::Wall { .. } => (w + 1, b, btn),
            DrawCommand::Ball { .. } => (w, b + 1, btn),
            DrawCommand::Button { .. } => (w, b, btn + 1),
        })
    }

    #[test]
    fn test_starting_shows_walls_and_button() {
        let state = GameState::new(1, 480.0, 800.0, Tuning::default());
        let commands = draw_list(&state);
        assert_eq!(count_kinds(&commands), (4, 0, 1));
    }

    #[test]
    fn test_active_shows_ball_with_timer() {
        let mut state = GameState::new(1, 480.0, 800.0, Tuning::default());
        let mut gestures = GestureTracker::default();
        tick(&mut state, &mut gestures, 1.0);
        tick(&mut state, &mut gestures, 2.5);

        let commands = draw_list(&state);
        assert_eq!(count_kinds(&commands), (4, 1, 1));
        let Some(DrawCommand::Ball { timer_fraction, radius, .. }) = commands.first() else {
            panic!("ball should be drawn first");
        };
        assert!((timer_fraction - 0.25).abs() < 1e-5);
        assert!((radius - 36.0).abs() < 1e-3);

        let vertices = build_vertices(&commands);
        // 5 rects, a full circle, and a quarter overlay
        assert_eq!(vertices.len(), 5 * 6 + 48 * 3 + 25 * 3);
    }

    #[test]
    fn test_paused_hides_button() {
        let mut state = GameState::new(1, 480.0, 800.0, Tuning::default());
        state.pause();
        let (_, _, buttons) = count_kinds(&draw_list(&state));
        assert_eq!(buttons, 0);
    }

    #[test]
    fn test_walls_in_side_order() {
        let state = GameState::new(9, 480.0, 800.0, Tuning::default());
        let sides: Vec<_> = draw_list(&state)
            .into_iter()
            .filter_map(|c| match c {
                DrawCommand::Wall { side, .. } => Some(side),
                _ => None,
            })
            .collect();
        assert_eq!(sides, WallSide::ALL.to_vec());
    }
}
