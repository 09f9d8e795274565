// SPDX-License-Identifier: MPL-2.0
//! User settings stored in `settings.toml`.
//!
//! ```toml
//! [general]
//! language = "fr"
//! theme_mode = "dark"
//!
//! [library]
//! roots = ["/home/me/Videos"]
//! page_size = 50
//!
//! [player]
//! skip_step_secs = 15
//! loop_enabled = false
//! ```
//!
//! Every key is optional; absent keys take the values in [`defaults`].
//! Out-of-range numbers are accepted here and clamped by the types that
//! consume them.

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::Result;
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

/// Warning key returned when an existing file cannot be used.
pub const LOAD_ERROR_KEY: &str = "notification-config-load-error";

/// Order in which an album's videos are listed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    Alphabetical,
    #[default]
    NewestFirst,
    OldestFirst,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Locale identifier such as `en-US` or `fr`. Unset follows the system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub theme_mode: ThemeMode,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LibraryConfig {
    /// Folders scanned for albums. Empty means the platform videos folder.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub roots: Vec<PathBuf>,
    /// Most videos listed per album.
    pub page_size: usize,
    /// Folder levels below a root that still become albums.
    pub max_depth: usize,
    pub sort_order: SortOrder,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
            max_depth: DEFAULT_MAX_SCAN_DEPTH,
            sort_order: SortOrder::default(),
        }
    }
}

impl LibraryConfig {
    /// Page size clamped to `1..=MAX_PAGE_SIZE`.
    #[must_use]
    pub fn effective_page_size(&self) -> usize {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Seconds before the transport overlay hides itself.
    pub overlay_timeout_secs: u32,
    /// Seconds jumped by the skip buttons and arrow keys.
    pub skip_step_secs: u32,
    /// Starting volume, 0.0 to 1.0.
    pub volume: f32,
    /// Restart from the beginning at the end of the video.
    pub loop_enabled: bool,
    pub autoplay: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            overlay_timeout_secs: DEFAULT_OVERLAY_TIMEOUT_SECS,
            skip_step_secs: DEFAULT_SKIP_STEP_SECS,
            volume: DEFAULT_VOLUME,
            loop_enabled: true,
            autoplay: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub library: LibraryConfig,
    pub player: PlayerConfig,
}

fn config_path(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::config_dir(base_dir).map(|dir| dir.join(CONFIG_FILE))
}

/// Loads settings from the resolved config directory.
///
/// Never fails: a missing file gives the defaults silently, an unreadable or
/// malformed one gives the defaults plus [`LOAD_ERROR_KEY`].
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// [`load`] with an explicit config directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    let Some(path) = config_path(base_dir).filter(|path| path.exists()) else {
        return (Config::default(), None);
    };

    match load_from_path(&path) {
        Ok(config) => {
            tracing::debug!("loaded settings from {:?}", path);
            (config, None)
        }
        Err(err) => {
            tracing::warn!("ignoring {:?}: {}", path, err);
            (Config::default(), Some(LOAD_ERROR_KEY.to_string()))
        }
    }
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Writes settings to the resolved config directory.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    match config_path(base_dir) {
        Some(path) => save_to_path(config, &path),
        None => {
            tracing::warn!("no config directory available; settings not saved");
            Ok(())
        }
    }
}

/// Writes settings to `path`, creating parent folders as needed.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml::to_string_pretty(config)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn saved_settings_load_back_unchanged() {
        let config = Config {
            general: GeneralConfig {
                language: Some("fr".to_string()),
                theme_mode: ThemeMode::Light,
            },
            library: LibraryConfig {
                roots: vec![PathBuf::from("/media/videos")],
                page_size: 20,
                max_depth: 1,
                sort_order: SortOrder::Alphabetical,
            },
            player: PlayerConfig {
                overlay_timeout_secs: 5,
                skip_step_secs: 15,
                volume: 0.5,
                loop_enabled: false,
                autoplay: false,
            },
        };
        let temp_dir = tempdir().expect("create temp dir");
        let path = temp_dir.path().join("nested").join(CONFIG_FILE);

        save_to_path(&config, &path).expect("save config");

        assert_eq!(load_from_path(&path).expect("load config"), config);
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let temp_dir = tempdir().expect("create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, "this is not = [valid").expect("write file");

        assert!(matches!(load_from_path(&path), Err(Error::Config(_))));
    }

    #[test]
    fn malformed_file_falls_back_with_warning() {
        let temp_dir = tempdir().expect("create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[player\nbroken").expect("write file");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));

        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some(LOAD_ERROR_KEY));
    }

    #[test]
    fn missing_file_is_silent() {
        let temp_dir = tempdir().expect("create temp dir");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));

        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn absent_keys_take_defaults() {
        let config: Config = toml::from_str("[player]\nskip_step_secs = 5\n").expect("parse");

        assert_eq!(config.player.skip_step_secs, 5);
        assert_eq!(config.player.overlay_timeout_secs, DEFAULT_OVERLAY_TIMEOUT_SECS);
        assert_eq!(config.library.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.general.theme_mode, ThemeMode::System);
        assert!(config.player.loop_enabled);
    }

    #[test]
    fn unknown_theme_mode_is_rejected() {
        let result = toml::from_str::<Config>("[general]\ntheme_mode = \"sepia\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn sort_order_uses_kebab_case() {
        let config: Config =
            toml::from_str("[library]\nsort_order = \"oldest-first\"\n").expect("parse");
        assert_eq!(config.library.sort_order, SortOrder::OldestFirst);
    }

    #[test]
    fn page_size_is_clamped() {
        let mut library = LibraryConfig::default();
        assert_eq!(library.effective_page_size(), DEFAULT_PAGE_SIZE);

        library.page_size = 0;
        assert_eq!(library.effective_page_size(), 1);

        library.page_size = MAX_PAGE_SIZE * 10;
        assert_eq!(library.effective_page_size(), MAX_PAGE_SIZE);
    }
}
