// SPDX-License-Identifier: MPL-2.0
//! User interface screens and shared styling.
//!
//! Screens follow the Elm-style "state down, messages up" pattern: each owns
//! a `State`, handles its own `Message`, and reports an `Effect` the app turns
//! into navigation or background work.
//!
//! # Screens
//!
//! - [`onboarding`] - First-run slides
//! - [`directories`] - Albums that contain videos
//! - [`videos`] - Videos of one album, with thumbnails
//! - [`preview`] - Muted looping player above the video list
//! - [`player`] - Full-screen playback with gesture controls
//!
//! # Shared Infrastructure
//!
//! - [`styles`] - Centralized styling (buttons, containers, sliders)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management

pub mod design_tokens;
pub mod directories;
pub mod onboarding;
pub mod player;
pub mod preview;
pub mod styles;
pub mod theming;
pub mod videos;
