// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::media::ThumbnailSlot;
use crate::ui::{directories, onboarding, player, videos};
use iced::{keyboard, window};
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// screen messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Onboarding(onboarding::Message),
    Directories(directories::Message),
    Videos(videos::Message),
    Player(player::Message),
    ThumbnailLoaded(PathBuf, ThumbnailSlot),
    /// Periodic tick for overlay auto-hide and long-press detection.
    Tick(Instant),
    /// A key press no widget captured.
    KeyPressed(keyboard::Key),
    WindowOpened(window::Id),
    DismissWarning,
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional data directory override (for the state database).
    /// Takes precedence over `VIDGALLERY_DATA_DIR`.
    pub data_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `VIDGALLERY_CONFIG_DIR`.
    pub config_dir: Option<String>,
    /// Library roots from repeated `--library` flags; replace the configured ones.
    pub library_roots: Vec<String>,
}
