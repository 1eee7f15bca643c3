//! Ball-wall contact detection
//!
//! Each tick the ball is tested against all four walls in side order. A wall
//! of another color ends the round on touch; the matching wall records how far
//! the ball has travelled into it. World space has a bottom-left origin, so the
//! Top wall's near edge is its `y` and the Bottom wall's near edge is its `top()`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Ball, Wall, WallSide};
use crate::consts::NUMBER_OF_WALLS;

/// Result of testing the ball against one wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WallContact {
    /// Leading edge of the ball is past the wall's near edge
    pub touching: bool,
    /// Ball center is past the near edge
    pub halfway: bool,
    /// Trailing edge of the ball is past the near edge
    pub through: bool,
}

/// Per-turn pass-through and impact flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WallProgress {
    pub halfway: [bool; NUMBER_OF_WALLS],
    pub passed: [bool; NUMBER_OF_WALLS],
    pub hit_invalid_wall: bool,
}

impl WallProgress {
    /// The ball made it fully into any passable wall
    pub fn has_passed_through_wall(&self) -> bool {
        self.passed.iter().any(|p| *p)
    }

    /// The ball's center crossed into any passable wall
    pub fn has_passed_halfway_through_wall(&self) -> bool {
        self.halfway.iter().any(|h| *h)
    }

    pub fn has_hit_invalid_wall(&self) -> bool {
        self.hit_invalid_wall
    }

    /// Fold one wall's contact into the flags.
    ///
    /// Touching an impassable wall only counts once nothing has been passed,
    /// so the tail of a ball leaving through its own wall cannot clip a
    /// neighbour and lose the turn. Flags never clear within a turn.
    pub fn record(&mut self, side: WallSide, passable: bool, contact: WallContact) {
        if !contact.touching {
            return;
        }

        let i = side.index();
        if passable {
            self.halfway[i] |= contact.halfway;
            self.passed[i] |= contact.through;
        } else if !self.has_passed_halfway_through_wall() && !self.has_passed_through_wall() {
            self.hit_invalid_wall = true;
        }
    }
}

/// Test a ball against a single wall
pub fn ball_wall_contact(pos: Vec2, radius: f32, wall: &Wall) -> WallContact {
    let b = &wall.bounds;
    match wall.side {
        WallSide::Top => WallContact {
            touching: pos.y + radius > b.y,
            halfway: pos.y > b.y,
            through: pos.y - radius > b.y,
        },
        WallSide::Bottom => WallContact {
            touching: pos.y - radius < b.top(),
            halfway: pos.y < b.top(),
            through: pos.y + radius < b.top(),
        },
        WallSide::Left => WallContact {
            touching: pos.x - radius < b.right(),
            halfway: pos.x < b.right(),
            through: pos.x + radius < b.right(),
        },
        WallSide::Right => WallContact {
            touching: pos.x + radius > b.x,
            halfway: pos.x > b.x,
            through: pos.x - radius > b.x,
        },
    }
}

/// Test the ball against every wall and update its progress flags
pub fn check_walls(ball: &mut Ball, walls: &[Wall; NUMBER_OF_WALLS]) {
    let radius = ball.radius();
    for (i, wall) in walls.iter().enumerate() {
        assert_eq!(wall.side.index(), i, "walls must be stored in side order");
        let contact = ball_wall_contact(ball.pos, radius, wall);
        let passable = ball.can_pass_through(wall.side);
        ball.progress.record(wall.side, passable, contact);
    }
}
