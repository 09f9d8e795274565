// SPDX-License-Identifier: MPL-2.0
//! Inline preview player shown above an album's video list.
//!
//! Plays the album's first video muted and on a loop with its own decoder
//! session. A tap reveals compact controls; the fullscreen button hands the
//! video to the full player.

use crate::error::VideoError;
use crate::i18n::fluent::I18n;
use crate::media::VideoAsset;
use crate::ui::design_tokens::{opacity, palette::WHITE, sizing, spacing, typography};
use crate::ui::player::{frame_image, secs_to_ms};
use crate::ui::styles;
use crate::video_player::{
    video_playback, DecoderCommandSender, PlaybackMessage, PlaybackSession, SessionSettings,
};
use iced::widget::{button, center, column, container, image, mouse_area, row, slider, text, Space, Stack};
use iced::{alignment, ContentFit, Element, Length, Subscription};
use std::time::Instant;

#[derive(Debug, Clone)]
pub enum Message {
    Playback(u64, PlaybackMessage),
    Tapped,
    TogglePlayPause,
    SkipBackward,
    SkipForward,
    SeekPreview(f64),
    SeekCommit,
    ToggleMute,
    Fullscreen,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Open the full player on this video.
    Fullscreen(VideoAsset),
}

#[derive(Debug)]
pub struct State {
    session: PlaybackSession<DecoderCommandSender>,
    session_id: u64,
    video: VideoAsset,
    frame: Option<image::Handle>,
    error: Option<VideoError>,
}

impl State {
    /// Starts muted, looping and playing whatever the user settings say.
    #[must_use]
    pub fn new(video: VideoAsset, session_id: u64, settings: SessionSettings) -> Self {
        tracing::debug!("previewing {}", video.path.display());
        Self {
            session: PlaybackSession::new(SessionSettings {
                muted: true,
                loop_enabled: true,
                autoplay: true,
                ..settings
            }),
            session_id,
            video,
            frame: None,
            error: None,
        }
    }

    #[must_use]
    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    #[must_use]
    pub fn video(&self) -> &VideoAsset {
        &self.video
    }

    #[must_use]
    pub fn session(&self) -> &PlaybackSession<DecoderCommandSender> {
        &self.session
    }

    #[must_use]
    pub fn needs_tick(&self) -> bool {
        self.session.has_pending_deadline()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        video_playback(self.video.path.clone(), self.session_id)
            .map(|(session_id, message)| Message::Playback(session_id, message))
    }

    pub fn tick(&mut self, now: Instant) {
        self.session.check_overlay_timeout(now);
    }

    /// Lets go of the decoder while the full player is up. A fresh
    /// `Started` re-attaches the session when the preview comes back.
    pub fn suspend(&mut self) {
        self.session.detach();
    }

    pub fn update(&mut self, message: Message, now: Instant) -> Effect {
        match message {
            Message::Playback(session_id, message) => {
                if session_id == self.session_id {
                    self.handle_playback(message);
                } else {
                    tracing::debug!("ignoring message from stale preview {}", session_id);
                }
                return Effect::None;
            }
            Message::Tapped => {}
            Message::TogglePlayPause => self.session.toggle_play_pause(),
            Message::SkipBackward => {
                self.session.skip_backward();
            }
            Message::SkipForward => {
                self.session.skip_forward();
            }
            Message::SeekPreview(secs) => self.session.preview_seek(secs_to_ms(secs)),
            Message::SeekCommit => self.session.commit_seek(),
            Message::ToggleMute => self.session.toggle_mute(),
            Message::Fullscreen => {
                self.session.pause();
                return Effect::Fullscreen(self.video.clone());
            }
        }
        // Any touch shows the controls and restarts their countdown.
        self.session.toggle_overlay(now);
        Effect::None
    }

    fn handle_playback(&mut self, message: PlaybackMessage) {
        match message {
            PlaybackMessage::Started(sender) => self.session.attach(sender),
            PlaybackMessage::Opened { duration_ms } => {
                self.session.on_status_update(0, duration_ms);
            }
            PlaybackMessage::FrameReady {
                rgba_data,
                width,
                height,
                position_ms,
            } => {
                self.frame = Some(frame_image(rgba_data, width, height));
                self.session
                    .on_status_update(position_ms, self.session.duration_ms());
            }
            PlaybackMessage::EndOfStream => self.session.on_end_of_stream(),
            PlaybackMessage::Error(error) => {
                tracing::warn!("preview failed for {}: {}", self.video.path.display(), error);
                self.error = Some(error);
            }
        }
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let surface: Element<'_, Message> = match (&self.error, &self.frame) {
            (Some(error), _) => center(text(i18n.tr(error.i18n_key()))).into(),
            (None, Some(frame)) => image(frame.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            (None, None) => center(text("")).into(),
        };

        let surface = mouse_area(
            container(surface)
                .width(Length::Fill)
                .height(Length::Fill)
                .style(styles::container::video_backdrop),
        )
        .on_press(Message::Tapped);

        let mut layers = Stack::new()
            .width(Length::Fill)
            .height(Length::Fixed(sizing::PREVIEW_HEIGHT))
            .push(surface);
        if self.session.overlay_visible() {
            layers = layers.push(self.controls(i18n));
        }
        layers.into()
    }

    fn controls<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let skip_secs = self.session.skip_step().value().to_string();
        let play_label = if self.session.is_playing() {
            i18n.tr("player-pause")
        } else {
            i18n.tr("player-play")
        };
        let mute_label = if self.session.is_muted() {
            i18n.tr("player-unmute")
        } else {
            i18n.tr("player-mute")
        };

        let transport = row![
            control(
                i18n.tr_with_args("player-skip-back", &[("seconds", &skip_secs)]),
                Message::SkipBackward,
            ),
            control(play_label, Message::TogglePlayPause),
            control(
                i18n.tr_with_args("player-skip-forward", &[("seconds", &skip_secs)]),
                Message::SkipForward,
            ),
        ]
        .spacing(spacing::MD)
        .align_y(alignment::Vertical::Center);

        let position_secs = self.session.displayed_position_ms() as f64 / 1000.0;
        let duration_secs = self.session.duration_ms() as f64 / 1000.0;
        let seek = slider(0.0..=duration_secs, position_secs, Message::SeekPreview)
            .on_release(Message::SeekCommit)
            .step(0.001)
            .style(styles::slider::on_video);

        let bottom = row![
            seek,
            control(mute_label, Message::ToggleMute),
            control(i18n.tr("player-fullscreen"), Message::Fullscreen),
        ]
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center);

        container(
            column![
                Space::new().height(Length::Fill),
                container(transport).center_x(Length::Fill),
                Space::new().height(Length::Fill),
                bottom,
            ]
            .padding(spacing::SM),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .style(styles::container::overlay_scrim)
        .into()
    }
}

fn control<'a>(label: String, message: Message) -> Element<'a, Message> {
    button(text(label).size(typography::BODY))
        .padding([spacing::XXS, spacing::SM])
        .style(styles::button::overlay(
            WHITE,
            opacity::OVERLAY_MEDIUM,
            opacity::OVERLAY_STRONG,
        ))
        .on_press(message)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Duration;

    fn clip() -> VideoAsset {
        VideoAsset::from_path(PathBuf::from("/videos/trips/a.mp4"), 30_000)
    }

    fn preview() -> State {
        State::new(clip(), 3, SessionSettings::default())
    }

    #[test]
    fn starts_muted_looping_and_playing() {
        let state = State::new(
            clip(),
            3,
            SessionSettings {
                autoplay: false,
                loop_enabled: false,
                ..SessionSettings::default()
            },
        );

        assert!(state.session().is_muted());
        assert!(state.session().is_playing());
        assert!(!state.session().overlay_visible());
    }

    #[test]
    fn end_of_stream_keeps_looping() {
        let mut state = preview();
        let now = Instant::now();
        state.update(Message::Playback(3, PlaybackMessage::Opened { duration_ms: 30_000 }), now);
        state.update(Message::Playback(3, PlaybackMessage::EndOfStream), now);

        assert!(state.session().is_playing());
        assert_eq!(state.session().position_ms(), 0);
    }

    #[test]
    fn tap_reveals_controls_until_timeout() {
        let mut state = preview();
        let start = Instant::now();

        state.update(Message::Tapped, start);
        assert!(state.session().overlay_visible());
        assert!(state.needs_tick());

        state.tick(start + Duration::from_secs(30));
        assert!(!state.session().overlay_visible());
    }

    #[test]
    fn mute_button_toggles_sound() {
        let mut state = preview();
        state.update(Message::ToggleMute, Instant::now());
        assert!(!state.session().is_muted());
        state.update(Message::ToggleMute, Instant::now());
        assert!(state.session().is_muted());
    }

    #[test]
    fn controls_drive_the_preview_session() {
        let mut state = preview();
        let now = Instant::now();
        state.update(Message::Playback(3, PlaybackMessage::Opened { duration_ms: 30_000 }), now);

        state.update(Message::SkipForward, now);
        assert_eq!(state.session().position_ms(), 10_000);
        state.update(Message::SkipBackward, now);
        assert_eq!(state.session().position_ms(), 0);

        state.update(Message::SeekPreview(12.0), now);
        state.update(Message::SeekCommit, now);
        assert_eq!(state.session().position_ms(), 12_000);

        state.update(Message::TogglePlayPause, now);
        assert!(!state.session().is_playing());
    }

    #[test]
    fn fullscreen_hands_over_the_video() {
        let mut state = preview();
        let effect = state.update(Message::Fullscreen, Instant::now());

        assert_eq!(effect, Effect::Fullscreen(clip()));
        assert!(!state.session().is_playing());
    }

    #[test]
    fn other_sessions_are_ignored() {
        let mut state = preview();
        let now = Instant::now();
        state.update(
            Message::Playback(
                4,
                PlaybackMessage::FrameReady {
                    rgba_data: Arc::new(vec![0; 4]),
                    width: 1,
                    height: 1,
                    position_ms: 5_000,
                },
            ),
            now,
        );

        assert_eq!(state.session().position_ms(), 0);
        assert!(state.frame.is_none());
    }
}
