//! Round events delivered to the UI layer
//!
//! The turn engine never calls into UI code. It pushes events into a queue
//! which the host drains each frame, either directly or through a
//! [`RoundCallbacks`] implementation.

use serde::{Deserialize, Serialize};

use super::palette::GameColor;

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// The turn timer ran out
    Timeout,
    /// The ball touched a wall of another color
    InvalidWall,
}

/// Events produced by the turn engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Countdown finished, the first turn is live
    RoundStarted,
    /// The round was paused (pause button or host request)
    RoundPaused,
    /// The round continues after a pause
    RoundResumed,
    /// The ball went through its wall
    TurnSucceeded { score: u32 },
    /// A new color joined the active pool
    ColorUnlocked { color: GameColor },
    /// Turns got shorter
    TurnLengthDecreased { turn_length: f32 },
    /// The round is over
    RoundEnded { final_score: u32, reason: EndReason },
}

/// Observer for the round lifecycle
pub trait RoundCallbacks {
    fn on_round_start(&mut self) {}
    fn on_round_pause(&mut self) {}
    fn on_round_end(&mut self, _final_score: u32, _reason: EndReason) {}
}

/// Pending events, oldest first
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(8),
        }
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take every pending event
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Drain pending events into a callback implementation. Events without a
    /// callback are returned so the host can still react to them.
    pub fn dispatch<C: RoundCallbacks + ?Sized>(&mut self, callbacks: &mut C) -> Vec<GameEvent> {
        let mut unhandled = Vec::new();
        for event in self.drain() {
            match event {
                GameEvent::RoundStarted => callbacks.on_round_start(),
                GameEvent::RoundPaused => callbacks.on_round_pause(),
                GameEvent::RoundEnded {
                    final_score,
                    reason,
                } => callbacks.on_round_end(final_score, reason),
                other => unhandled.push(other),
            }
        }
        unhandled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        started: u32,
        paused: u32,
        ended: Option<(u32, EndReason)>,
    }

    impl RoundCallbacks for Recorder {
        fn on_round_start(&mut self) {
            self.started += 1;
        }
        fn on_round_pause(&mut self) {
            self.paused += 1;
        }
        fn on_round_end(&mut self, final_score: u32, reason: EndReason) {
            self.ended = Some((final_score, reason));
        }
    }

    #[test]
    fn test_push_and_drain() {
        let mut q = EventQueue::new();
        q.push(GameEvent::RoundStarted);
        q.push(GameEvent::TurnSucceeded { score: 1 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events[1], GameEvent::TurnSucceeded { score: 1 });
        assert!(q.is_empty());
    }

    #[test]
    fn test_dispatch_routes_lifecycle_events() {
        let mut q = EventQueue::new();
        q.push(GameEvent::RoundStarted);
        q.push(GameEvent::TurnSucceeded { score: 1 });
        q.push(GameEvent::RoundPaused);
        q.push(GameEvent::RoundEnded {
            final_score: 1,
            reason: EndReason::Timeout,
        });

        let mut recorder = Recorder::default();
        let rest = q.dispatch(&mut recorder);

        assert_eq!(recorder.started, 1);
        assert_eq!(recorder.paused, 1);
        assert_eq!(recorder.ended, Some((1, EndReason::Timeout)));
        assert_eq!(rest, vec![GameEvent::TurnSucceeded { score: 1 }]);
        assert!(q.is_empty());
    }
}
