// SPDX-License-Identifier: MPL-2.0
//! Playback rate type for video playback.

use crate::config::{DEFAULT_PLAYBACK_RATE, MAX_PLAYBACK_RATE, MIN_PLAYBACK_RATE, SPEED_BOOST_RATE};

/// Playback rate multiplier, guaranteed to be within `0.25..=4.0`.
///
/// # Example
///
/// ```
/// use vidgallery::video_player::PlaybackRate;
///
/// let rate = PlaybackRate::new(2.0);
/// assert_eq!(rate.value(), 2.0);
///
/// // Values outside range are clamped
/// assert_eq!(PlaybackRate::new(100.0).value(), 4.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackRate(f64);

impl PlaybackRate {
    /// Creates a new playback rate, clamping to valid range.
    #[must_use]
    pub fn new(rate: f64) -> Self {
        if rate.is_nan() {
            return Self::default();
        }
        Self(rate.clamp(MIN_PLAYBACK_RATE, MAX_PLAYBACK_RATE))
    }

    /// Rate engaged while the speed boost is held.
    #[must_use]
    pub fn boost() -> Self {
        Self(SPEED_BOOST_RATE)
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns true when playing at normal speed.
    #[must_use]
    pub fn is_normal(self) -> bool {
        (self.0 - DEFAULT_PLAYBACK_RATE).abs() < 0.001
    }
}

impl Default for PlaybackRate {
    fn default() -> Self {
        Self(DEFAULT_PLAYBACK_RATE)
    }
}
