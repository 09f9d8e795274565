// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Overlay**: Player overlay auto-hide timeout
//! - **Transport**: Skip step, speed boost, volume
//! - **Library**: Page size and scan depth
//! - **Gestures**: Long-press threshold

// ==========================================================================
// Overlay/Timeout Defaults
// ==========================================================================

/// Default auto-hide timeout for the player overlay (in seconds).
pub const DEFAULT_OVERLAY_TIMEOUT_SECS: u32 = 8;

/// Minimum overlay timeout (in seconds).
pub const MIN_OVERLAY_TIMEOUT_SECS: u32 = 1;

/// Maximum overlay timeout (in seconds).
pub const MAX_OVERLAY_TIMEOUT_SECS: u32 = 30;

// ==========================================================================
// Transport Defaults
// ==========================================================================

/// Default skip step for the rewind/fast-forward buttons (in seconds).
pub const DEFAULT_SKIP_STEP_SECS: u32 = 10;

/// Minimum skip step (in seconds).
pub const MIN_SKIP_STEP_SECS: u32 = 1;

/// Maximum skip step (in seconds).
pub const MAX_SKIP_STEP_SECS: u32 = 60;

/// Playback rate engaged while a long press is held.
pub const SPEED_BOOST_RATE: f64 = 2.0;

/// Default user-selected playback rate.
pub const DEFAULT_PLAYBACK_RATE: f64 = 1.0;

/// Minimum playback rate.
pub const MIN_PLAYBACK_RATE: f64 = 0.25;

/// Maximum playback rate.
pub const MAX_PLAYBACK_RATE: f64 = 4.0;

/// Default playback volume (0.0 to 1.0).
pub const DEFAULT_VOLUME: f32 = 1.0;

/// Minimum volume level.
pub const MIN_VOLUME: f32 = 0.0;

/// Maximum volume level.
pub const MAX_VOLUME: f32 = 1.0;

/// Volume adjustment step per key press (5%).
pub const VOLUME_STEP: f32 = 0.05;

// ==========================================================================
// Library Defaults
// ==========================================================================

/// Maximum number of video assets fetched per album query.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Hard upper bound for the configurable page size.
pub const MAX_PAGE_SIZE: usize = 1000;

/// How deep below each library root sub-folders become albums.
pub const DEFAULT_MAX_SCAN_DEPTH: usize = 3;

/// Thumbnails kept in memory.
pub const THUMBNAIL_CACHE_CAPACITY: usize = 256;

/// Width thumbnails are downscaled to, in pixels.
pub const THUMBNAIL_MAX_WIDTH: u32 = 160;

// ==========================================================================
// Gesture Defaults
// ==========================================================================

/// How long the video surface must be held before the speed boost engages.
pub const LONG_PRESS_THRESHOLD_MS: u64 = 500;

/// Tick interval for overlay and long-press deadlines.
pub const TICK_INTERVAL_MS: u64 = 100;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_OVERLAY_TIMEOUT_SECS > 0);
    assert!(MAX_OVERLAY_TIMEOUT_SECS >= MIN_OVERLAY_TIMEOUT_SECS);
    assert!(DEFAULT_OVERLAY_TIMEOUT_SECS >= MIN_OVERLAY_TIMEOUT_SECS);
    assert!(DEFAULT_OVERLAY_TIMEOUT_SECS <= MAX_OVERLAY_TIMEOUT_SECS);

    assert!(MIN_SKIP_STEP_SECS > 0);
    assert!(DEFAULT_SKIP_STEP_SECS >= MIN_SKIP_STEP_SECS);
    assert!(DEFAULT_SKIP_STEP_SECS <= MAX_SKIP_STEP_SECS);

    assert!(MIN_PLAYBACK_RATE > 0.0);
    assert!(DEFAULT_PLAYBACK_RATE >= MIN_PLAYBACK_RATE);
    assert!(DEFAULT_PLAYBACK_RATE <= MAX_PLAYBACK_RATE);
    assert!(SPEED_BOOST_RATE <= MAX_PLAYBACK_RATE);

    assert!(DEFAULT_VOLUME >= MIN_VOLUME);
    assert!(DEFAULT_VOLUME <= MAX_VOLUME);

    assert!(DEFAULT_PAGE_SIZE > 0);
    assert!(DEFAULT_PAGE_SIZE <= MAX_PAGE_SIZE);
    assert!(TICK_INTERVAL_MS < LONG_PRESS_THRESHOLD_MS);
};
