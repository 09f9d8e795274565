// SPDX-License-Identifier: MPL-2.0
//! Skip step used by the rewind and fast-forward controls.

use crate::config::{DEFAULT_SKIP_STEP_SECS, MAX_SKIP_STEP_SECS, MIN_SKIP_STEP_SECS};

/// Skip distance in whole seconds, clamped to `1..=60`.
///
/// # Example
///
/// ```
/// use vidgallery::video_player::SkipStep;
///
/// assert_eq!(SkipStep::default().value(), 10);
/// assert_eq!(SkipStep::new(0).value(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkipStep(u32);

impl SkipStep {
    #[must_use]
    pub fn new(secs: u32) -> Self {
        Self(secs.clamp(MIN_SKIP_STEP_SECS, MAX_SKIP_STEP_SECS))
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Signed delta for a forward skip.
    #[must_use]
    pub fn forward(self) -> i64 {
        i64::from(self.0)
    }

    /// Signed delta for a backward skip.
    #[must_use]
    pub fn backward(self) -> i64 {
        -i64::from(self.0)
    }
}

impl Default for SkipStep {
    fn default() -> Self {
        Self(DEFAULT_SKIP_STEP_SECS)
    }
}
