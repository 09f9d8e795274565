// SPDX-License-Identifier: MPL-2.0
//! Auto-hide delay for the player overlay.

use crate::config::{
    DEFAULT_OVERLAY_TIMEOUT_SECS, MAX_OVERLAY_TIMEOUT_SECS, MIN_OVERLAY_TIMEOUT_SECS,
};
use std::time::Duration;

/// Overlay timeout in seconds, always within `1..=30`.
///
/// # Example
///
/// ```
/// use vidgallery::video_player::OverlayTimeout;
///
/// assert_eq!(OverlayTimeout::default().value(), 8);
/// assert_eq!(OverlayTimeout::new(100).value(), 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayTimeout(u32);

impl OverlayTimeout {
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value.clamp(MIN_OVERLAY_TIMEOUT_SECS, MAX_OVERLAY_TIMEOUT_SECS))
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_secs(u64::from(self.0))
    }
}

impl Default for OverlayTimeout {
    fn default() -> Self {
        Self(DEFAULT_OVERLAY_TIMEOUT_SECS)
    }
}
