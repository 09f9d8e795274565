// SPDX-License-Identifier: MPL-2.0
//! `vidgallery` is a lightweight video gallery built with the Iced GUI framework.
//!
//! It lists the folders of a video library, shows the videos of a folder with
//! thumbnails, and plays a video full screen with tap-to-show controls and a
//! hold-for-2x speed boost. Decoding is done by FFmpeg; the only durable state
//! is the onboarding flag kept in a small SQLite database.

pub mod app;
pub mod error;
pub mod i18n;
pub mod media;
pub mod ui;
pub mod video_player;

pub use app::config;

#[cfg(test)]
mod test_utils;
