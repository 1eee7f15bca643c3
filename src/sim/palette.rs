//! Wall colors and the active color pool
//!
//! A session starts with one color per wall and unlocks further colors from
//! the master palette as the score grows. Each turn the pool is shuffled and
//! the first four colors are painted onto the walls.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::consts::NUMBER_OF_WALLS;

/// Colors a ball or wall can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameColor {
    Red,
    Blue,
    Green,
    Orange,
    Pink,
    Purple,
    Gray,
    Cyan,
    Salmon,
    Field,
}

/// Every color in the order it is unlocked
pub const PALETTE: [GameColor; 10] = [
    GameColor::Red,
    GameColor::Blue,
    GameColor::Green,
    GameColor::Orange,
    GameColor::Pink,
    GameColor::Purple,
    GameColor::Gray,
    GameColor::Cyan,
    GameColor::Salmon,
    GameColor::Field,
];

impl GameColor {
    /// Linear RGBA used by the render adapter
    pub fn rgba(&self) -> [f32; 4] {
        match self {
            GameColor::Red => [0.90, 0.22, 0.21, 1.0],
            GameColor::Blue => [0.13, 0.59, 0.95, 1.0],
            GameColor::Green => [0.30, 0.69, 0.31, 1.0],
            GameColor::Orange => [1.00, 0.60, 0.00, 1.0],
            GameColor::Pink => [0.91, 0.12, 0.39, 1.0],
            GameColor::Purple => [0.61, 0.15, 0.69, 1.0],
            GameColor::Gray => [0.62, 0.62, 0.62, 1.0],
            GameColor::Cyan => [0.00, 0.74, 0.83, 1.0],
            GameColor::Salmon => [0.98, 0.50, 0.45, 1.0],
            GameColor::Field => [0.55, 0.76, 0.29, 1.0],
        }
    }
}

/// Colors painted on the walls for one turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnColors {
    /// One color per wall, in `WallSide` order
    pub colors: [GameColor; NUMBER_OF_WALLS],
    /// Lower index of the two walls sharing a color, if a pair was made
    pub paired_index: Option<usize>,
}

/// Colors currently eligible for wall assignment, in unlock order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPool {
    /// Unlock order is kept here; shuffling happens on a scratch copy
    active: Vec<GameColor>,
}

impl Default for ColorPool {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorPool {
    /// A fresh pool with one color per wall
    pub fn new() -> Self {
        Self {
            active: PALETTE[..NUMBER_OF_WALLS].to_vec(),
        }
    }

    /// Back to the starting four colors
    pub fn reset(&mut self) {
        self.active.clear();
        self.active.extend_from_slice(&PALETTE[..NUMBER_OF_WALLS]);
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.active.len() >= PALETTE.len()
    }

    pub fn colors(&self) -> &[GameColor] {
        &self.active
    }

    /// Unlock the next palette color. Returns the color that was added, or
    /// `None` once the whole palette is active.
    pub fn add_color_to_active(&mut self) -> Option<GameColor> {
        if self.is_full() {
            return None;
        }
        let color = PALETTE[self.active.len()];
        self.active.push(color);
        Some(color)
    }

    /// Pick the wall colors for a turn.
    ///
    /// The pool is shuffled and its first four colors go to the walls. When
    /// `allow_same_color_pair` is set, `same_color_chance` decides whether one
    /// wall takes the color of another, distinct wall.
    pub fn assign_turn_colors<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        allow_same_color_pair: bool,
        same_color_chance: f32,
    ) -> TurnColors {
        assert!(
            self.active.len() >= NUMBER_OF_WALLS,
            "color pool must hold at least {} colors, has {}",
            NUMBER_OF_WALLS,
            self.active.len()
        );

        let mut shuffled = self.active.clone();
        shuffled.shuffle(rng);

        let mut colors = [shuffled[0]; NUMBER_OF_WALLS];
        colors.copy_from_slice(&shuffled[..NUMBER_OF_WALLS]);

        if allow_same_color_pair && rng.random::<f32>() < same_color_chance {
            let wall_to_change = rng.random_range(0..NUMBER_OF_WALLS);
            let offset = rng.random_range(1..NUMBER_OF_WALLS);
            let wall_to_copy = (wall_to_change + offset) % NUMBER_OF_WALLS;

            colors[wall_to_change] = colors[wall_to_copy];
            return TurnColors {
                colors,
                paired_index: Some(wall_to_change.min(wall_to_copy)),
            };
        }

        TurnColors {
            colors,
            paired_index: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashSet;

    fn distinct(colors: &[GameColor]) -> usize {
        colors.iter().collect::<HashSet<_>>().len()
    }

    #[test]
    fn test_new_pool_has_four_colors() {
        let pool = ColorPool::new();
        assert_eq!(pool.colors(), &PALETTE[..4]);
    }

    #[test]
    fn test_add_color_in_palette_order() {
        let mut pool = ColorPool::new();
        assert_eq!(pool.add_color_to_active(), Some(GameColor::Pink));
        assert_eq!(pool.add_color_to_active(), Some(GameColor::Purple));
        assert_eq!(pool.len(), 6);
    }

    #[test]
    fn test_add_color_stops_at_palette_size() {
        let mut pool = ColorPool::new();
        for _ in 0..20 {
            pool.add_color_to_active();
        }
        assert_eq!(pool.len(), PALETTE.len());
        assert!(pool.is_full());
        assert_eq!(pool.add_color_to_active(), None);
        assert_eq!(pool.len(), PALETTE.len());
    }

    #[test]
    fn test_reset_returns_to_four() {
        let mut pool = ColorPool::new();
        pool.add_color_to_active();
        pool.add_color_to_active();
        pool.reset();
        assert_eq!(pool, ColorPool::new());
    }

    #[test]
    fn test_no_pair_when_disallowed() {
        let pool = ColorPool::new();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..200 {
            let turn = pool.assign_turn_colors(&mut rng, false, 1.0);
            assert_eq!(turn.paired_index, None);
            assert_eq!(distinct(&turn.colors), 4);
        }
    }

    #[test]
    fn test_pair_always_made_with_certain_chance() {
        let mut pool = ColorPool::new();
        pool.add_color_to_active();
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..200 {
            let turn = pool.assign_turn_colors(&mut rng, true, 1.0);
            let first = turn.paired_index.expect("pair expected");
            assert!(first < 3);
            assert_eq!(distinct(&turn.colors), 3);
            let shared = turn.colors[first];
            let later = (first + 1..4).filter(|&i| turn.colors[i] == shared).count();
            assert_eq!(later, 1);
        }
    }

    #[test]
    fn test_colors_come_from_pool() {
        let mut pool = ColorPool::new();
        for _ in 0..3 {
            pool.add_color_to_active();
        }
        let mut rng = Pcg32::seed_from_u64(3);
        let turn = pool.assign_turn_colors(&mut rng, true, 0.5);
        assert!(turn.colors.iter().all(|c| pool.colors().contains(c)));
    }

    #[test]
    fn test_shuffle_keeps_unlock_order() {
        let pool = ColorPool::new();
        let mut rng = Pcg32::seed_from_u64(5);
        let _ = pool.assign_turn_colors(&mut rng, false, 0.0);
        assert_eq!(pool.colors(), &PALETTE[..4]);
    }

    #[test]
    #[should_panic(expected = "color pool must hold")]
    fn test_undersized_pool_panics() {
        let pool = ColorPool {
            active: vec![GameColor::Red],
        };
        let mut rng = Pcg32::seed_from_u64(1);
        let _ = pool.assign_turn_colors(&mut rng, false, 0.0);
    }

    proptest! {
        #[test]
        fn prop_assignment_paints_four_walls(seed in any::<u64>(), unlocks in 0usize..8, allow in any::<bool>()) {
            let mut pool = ColorPool::new();
            for _ in 0..unlocks {
                pool.add_color_to_active();
            }
            let mut rng = Pcg32::seed_from_u64(seed);
            let turn = pool.assign_turn_colors(&mut rng, allow, 0.2);
            match turn.paired_index {
                None => prop_assert_eq!(distinct(&turn.colors), 4),
                Some(i) => {
                    prop_assert!(allow);
                    prop_assert_eq!(distinct(&turn.colors), 3);
                    let partners = (0..4).filter(|&j| j != i && turn.colors[j] == turn.colors[i]).count();
                    prop_assert_eq!(partners, 1);
                }
            }
        }

        #[test]
        fn prop_pool_size_bounded(adds in 0usize..30) {
            let mut pool = ColorPool::new();
            let mut last = pool.len();
            for _ in 0..adds {
                pool.add_color_to_active();
                prop_assert!(pool.len() >= last);
                prop_assert!(pool.len() <= PALETTE.len());
                last = pool.len();
            }
        }
    }
}
