// SPDX-License-Identifier: MPL-2.0
//! Video playback engine for VidGallery.
//!
//! FFmpeg decodes on a blocking Tokio thread and the soundtrack plays through
//! cpal. Frames and status reach the UI through an iced subscription, and
//! [`PlaybackSession`] holds the transport state the player screen renders.

mod audio;
mod decoder;
mod overlay_timeout;
mod playback_speed;
mod skip_step;
mod state;
pub mod subscription;
mod volume;

pub use decoder::{AsyncDecoder, DecodedFrame, DecoderCommand, DecoderEvent};
pub(crate) use decoder::extract_rgba_data;
pub use overlay_timeout::OverlayTimeout;
pub use playback_speed::PlaybackRate;
pub use skip_step::SkipStep;
pub use state::{PlaybackSession, PlayerControl, SessionSettings};
pub use subscription::{video_playback, DecoderCommandSender, PlaybackMessage, VideoPlaybackId};
pub use volume::Volume;

use crate::config::PlayerConfig;

impl From<&PlayerConfig> for SessionSettings {
    fn from(config: &PlayerConfig) -> Self {
        Self {
            overlay_timeout: OverlayTimeout::new(config.overlay_timeout_secs),
            skip_step: SkipStep::new(config.skip_step_secs),
            volume: Volume::new(config.volume),
            loop_enabled: config.loop_enabled,
            autoplay: config.autoplay,
            muted: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_settings_follow_player_config() {
        let config = PlayerConfig {
            overlay_timeout_secs: 99,
            skip_step_secs: 5,
            volume: 0.25,
            loop_enabled: false,
            autoplay: true,
        };

        let settings = SessionSettings::from(&config);

        assert_eq!(settings.overlay_timeout.value(), 30);
        assert_eq!(settings.skip_step.value(), 5);
        assert_eq!(settings.volume, Volume::new(0.25));
        assert!(!settings.loop_enabled);
        assert!(settings.autoplay);
    }
}
