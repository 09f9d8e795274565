// SPDX-License-Identifier: MPL-2.0
//! Tap and long-press recognition on the video surface.
//!
//! The surface only reports raw press and release events; [`PressTracker`]
//! decides what they mean. A press held past the threshold becomes a long
//! press as soon as a tick observes it, so the speed boost engages while the
//! button is still down.

use crate::config::LONG_PRESS_THRESHOLD_MS;
use std::time::{Duration, Instant};

/// A recognized gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Tap,
    LongPressStart,
    LongPressEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PressState {
    Idle,
    Pressed { since: Instant },
    LongPress,
}

#[derive(Debug, Clone, Copy)]
pub struct PressTracker {
    state: PressState,
    threshold: Duration,
}

impl Default for PressTracker {
    fn default() -> Self {
        Self::new(Duration::from_millis(LONG_PRESS_THRESHOLD_MS))
    }
}

impl PressTracker {
    #[must_use]
    pub fn new(threshold: Duration) -> Self {
        Self {
            state: PressState::Idle,
            threshold,
        }
    }

    /// Starts tracking a press. A press already in progress is restarted.
    pub fn press(&mut self, now: Instant) {
        if self.state != PressState::LongPress {
            self.state = PressState::Pressed { since: now };
        }
    }

    /// Promotes a held press to a long press once the threshold has elapsed.
    pub fn tick(&mut self, now: Instant) -> Option<Gesture> {
        match self.state {
            PressState::Pressed { since } if now.duration_since(since) >= self.threshold => {
                self.state = PressState::LongPress;
                Some(Gesture::LongPressStart)
            }
            _ => None,
        }
    }

    /// Ends the press. A release past the threshold that no tick observed
    /// still counts as a long press, never as a tap.
    pub fn release(&mut self, now: Instant) -> Option<Gesture> {
        let gesture = match self.state {
            PressState::Idle => None,
            PressState::LongPress => Some(Gesture::LongPressEnd),
            PressState::Pressed { since } if now.duration_since(since) >= self.threshold => {
                Some(Gesture::LongPressEnd)
            }
            PressState::Pressed { .. } => Some(Gesture::Tap),
        };
        self.state = PressState::Idle;
        gesture
    }

    /// Abandons the press, e.g. when the cursor leaves the surface.
    /// Returns `LongPressEnd` if a boost was engaged.
    pub fn cancel(&mut self) -> Option<Gesture> {
        let was_long = self.state == PressState::LongPress;
        self.state = PressState::Idle;
        was_long.then_some(Gesture::LongPressEnd)
    }

    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.state != PressState::Idle
    }
}
