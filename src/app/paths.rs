// SPDX-License-Identifier: MPL-2.0
//! Where VidGallery keeps its files.
//!
//! The data directory holds `state.db`, the config directory holds
//! `settings.toml`. Each is resolved from, in order: an explicit path passed
//! by the caller, the `--data-dir`/`--config-dir` flags, the
//! `VIDGALLERY_DATA_DIR`/`VIDGALLERY_CONFIG_DIR` variables, and finally a
//! `VidGallery` folder under the platform directory from `dirs`.

use std::path::PathBuf;
use std::sync::OnceLock;

const APP_NAME: &str = "VidGallery";

pub const ENV_DATA_DIR: &str = "VIDGALLERY_DATA_DIR";
pub const ENV_CONFIG_DIR: &str = "VIDGALLERY_CONFIG_DIR";

static CLI_DATA_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();
static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

#[derive(Debug, Clone, Copy)]
enum AppDir {
    Data,
    Config,
}

impl AppDir {
    fn cli_value(self) -> Option<PathBuf> {
        let cell = match self {
            AppDir::Data => &CLI_DATA_DIR,
            AppDir::Config => &CLI_CONFIG_DIR,
        };
        cell.get().cloned().flatten()
    }

    fn env_value(self) -> Option<PathBuf> {
        let var = match self {
            AppDir::Data => ENV_DATA_DIR,
            AppDir::Config => ENV_CONFIG_DIR,
        };
        std::env::var_os(var)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    }

    fn platform_default(self) -> Option<PathBuf> {
        let base = match self {
            AppDir::Data => dirs::data_dir(),
            AppDir::Config => dirs::config_dir(),
        };
        base.map(|base| base.join(APP_NAME))
    }

    fn resolve(self, explicit: Option<PathBuf>) -> Option<PathBuf> {
        explicit
            .or_else(|| self.cli_value())
            .or_else(|| self.env_value())
            .or_else(|| self.platform_default())
    }
}

/// Records the directory flags given on the command line.
///
/// Only the first call has an effect.
pub fn init_cli_overrides(data_dir: Option<String>, config_dir: Option<String>) {
    let data_set = CLI_DATA_DIR.set(data_dir.map(PathBuf::from)).is_ok();
    let config_set = CLI_CONFIG_DIR.set(config_dir.map(PathBuf::from)).is_ok();
    if !(data_set && config_set) {
        tracing::warn!("directory overrides were already set; ignoring");
    }
}

/// Directory holding `state.db`. `explicit` wins over every other source.
pub fn data_dir(explicit: Option<PathBuf>) -> Option<PathBuf> {
    AppDir::Data.resolve(explicit)
}

/// Directory holding `settings.toml`. `explicit` wins over every other source.
pub fn config_dir(explicit: Option<PathBuf>) -> Option<PathBuf> {
    AppDir::Config.resolve(explicit)
}

/// Library roots used when neither the config nor the CLI names any: the
/// platform videos folder, or the home directory when there is none.
pub fn default_library_roots() -> Vec<PathBuf> {
    dirs::video_dir()
        .or_else(dirs::home_dir)
        .into_iter()
        .collect()
}
