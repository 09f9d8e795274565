// SPDX-License-Identifier: MPL-2.0
//! Full-screen video player screen.
//!
//! Owns one [`PlaybackSession`] for the lifetime of the screen. Raw surface
//! presses go through [`gesture::PressTracker`]; transport controls and the
//! decoder subscription feed the session directly.

mod controls;
pub mod gesture;

use crate::error::VideoError;
use crate::i18n::fluent::I18n;
use crate::media::VideoAsset;
use crate::ui::styles;
use crate::video_player::{
    video_playback, DecoderCommandSender, PlaybackMessage, PlaybackSession, SessionSettings,
};
use gesture::{Gesture, PressTracker};
use iced::widget::{center, container, image, mouse_area, text, Stack};
use iced::{ContentFit, Element, Length, Subscription};
use std::sync::Arc;
use std::time::Instant;

/// Messages handled by the player screen.
#[derive(Debug, Clone)]
pub enum Message {
    /// Decoder output tagged with the session it belongs to.
    Playback(u64, PlaybackMessage),
    SurfacePressed,
    SurfaceReleased,
    SurfaceExited,
    TogglePlayPause,
    SkipBackward,
    SkipForward,
    /// Seek bar dragged to a position in seconds.
    SeekPreview(f64),
    /// Seek bar released.
    SeekCommit,
    VolumeChanged(f32),
    VolumeUp,
    VolumeDown,
    Back,
}

/// What the app should do after a player update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Exit,
}

#[derive(Debug)]
pub struct State {
    session: PlaybackSession<DecoderCommandSender>,
    session_id: u64,
    video: VideoAsset,
    frame: Option<image::Handle>,
    error: Option<VideoError>,
    press: PressTracker,
}

impl State {
    #[must_use]
    pub fn new(video: VideoAsset, session_id: u64, settings: SessionSettings) -> Self {
        tracing::info!("opening player for {}", video.path.display());
        Self {
            session: PlaybackSession::new(settings),
            session_id,
            video,
            frame: None,
            error: None,
            press: PressTracker::default(),
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
    pub fn error(&self) -> Option<&VideoError> {
        self.error.as_ref()
    }

    /// True while the 100 ms tick must run: an overlay hide is scheduled or
    /// a press may turn into a long press.
    #[must_use]
    pub fn needs_tick(&self) -> bool {
        self.session.has_pending_deadline() || self.press.is_pressed()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        video_playback(self.video.path.clone(), self.session_id)
            .map(|(session_id, message)| Message::Playback(session_id, message))
    }

    pub fn tick(&mut self, now: Instant) {
        if let Some(gesture) = self.press.tick(now) {
            self.apply_gesture(gesture, now);
        }
        self.session.check_overlay_timeout(now);
    }

    pub fn update(&mut self, message: Message, now: Instant) -> Effect {
        match message {
            Message::Playback(session_id, message) => {
                if session_id == self.session_id {
                    self.handle_playback(message);
                } else {
                    tracing::debug!("ignoring message from stale session {}", session_id);
                }
            }
            Message::SurfacePressed => self.press.press(now),
            Message::SurfaceReleased => {
                if let Some(gesture) = self.press.release(now) {
                    self.apply_gesture(gesture, now);
                }
            }
            Message::SurfaceExited => {
                if let Some(gesture) = self.press.cancel() {
                    self.apply_gesture(gesture, now);
                }
            }
            Message::TogglePlayPause => {
                self.session.toggle_play_pause();
                self.keep_overlay(now);
            }
            Message::SkipBackward => {
                self.session.skip_backward();
                self.keep_overlay(now);
            }
            Message::SkipForward => {
                self.session.skip_forward();
                self.keep_overlay(now);
            }
            Message::SeekPreview(secs) => {
                self.session.preview_seek(secs_to_ms(secs));
                self.keep_overlay(now);
            }
            Message::SeekCommit => {
                self.session.commit_seek();
                self.keep_overlay(now);
            }
            Message::VolumeChanged(volume) => {
                self.session.set_volume(volume);
                self.keep_overlay(now);
            }
            Message::VolumeUp => self.session.volume_up(),
            Message::VolumeDown => self.session.volume_down(),
            Message::Back => return Effect::Exit,
        }
        Effect::None
    }

    /// Drops the player handle; the subscription going away stops the decoder.
    pub fn close(&mut self) {
        self.session.detach();
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
                tracing::warn!("playback failed for {}: {}", self.video.path.display(), error);
                self.error = Some(error);
            }
        }
    }

    fn apply_gesture(&mut self, gesture: Gesture, now: Instant) {
        match gesture {
            Gesture::Tap => self.session.toggle_overlay(now),
            Gesture::LongPressStart => self.session.on_long_press_start(),
            Gesture::LongPressEnd => self.session.on_long_press_end(),
        }
    }

    /// Interacting with the controls restarts the hide countdown.
    fn keep_overlay(&mut self, now: Instant) {
        if self.session.overlay_visible() {
            self.session.toggle_overlay(now);
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
        .on_press(Message::SurfacePressed)
        .on_release(Message::SurfaceReleased)
        .on_exit(Message::SurfaceExited);

        let mut layers = Stack::new()
            .width(Length::Fill)
            .height(Length::Fill)
            .push(surface);

        if self.session.is_2x_faster() {
            layers = layers.push(controls::speed_badge(i18n));
        }
        if self.session.overlay_visible() {
            layers = layers.push(controls::overlay(&self.session, i18n));
        }

        layers.into()
    }
}

/// Wraps decoder pixels for the image widget, copying only if still shared.
pub(crate) fn frame_image(rgba_data: Arc<Vec<u8>>, width: u32, height: u32) -> image::Handle {
    let pixels = Arc::try_unwrap(rgba_data).unwrap_or_else(|shared| (*shared).clone());
    image::Handle::from_rgba(width, height, pixels)
}

pub(crate) fn secs_to_ms(secs: f64) -> u64 {
    if secs.is_finite() && secs > 0.0 {
        (secs * 1000.0).round() as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn state() -> State {
        let video = VideoAsset::from_path("/videos/clip.mp4".into(), 60_000);
        State::new(video, 7, SessionSettings::default())
    }

    #[test]
    fn tap_shows_overlay_until_timeout() {
        let mut player = state();
        let start = Instant::now();

        player.update(Message::SurfacePressed, start);
        assert!(player.needs_tick());
        player.update(Message::SurfaceReleased, start + Duration::from_millis(100));
        assert!(player.session().overlay_visible());

        player.tick(start + Duration::from_millis(8_099));
        assert!(player.session().overlay_visible());
        player.tick(start + Duration::from_millis(8_100));
        assert!(!player.session().overlay_visible());
        assert!(!player.needs_tick());
    }

    #[test]
    fn long_press_boosts_until_release() {
        let mut player = state();
        let start = Instant::now();

        player.update(Message::SurfacePressed, start);
        player.tick(start + Duration::from_millis(600));
        assert!(player.session().is_2x_faster());

        player.update(Message::SurfaceReleased, start + Duration::from_millis(1_500));
        assert!(!player.session().is_2x_faster());
        assert!(!player.session().overlay_visible());
    }

    #[test]
    fn leaving_the_surface_ends_the_boost() {
        let mut player = state();
        let start = Instant::now();

        player.update(Message::SurfacePressed, start);
        player.tick(start + Duration::from_millis(700));
        player.update(Message::SurfaceExited, start + Duration::from_millis(800));
        assert!(!player.session().is_2x_faster());
    }

    #[test]
    fn stale_session_messages_are_ignored() {
        let mut player = state();
        let now = Instant::now();

        player.update(
            Message::Playback(6, PlaybackMessage::Opened { duration_ms: 5_000 }),
            now,
        );
        assert_eq!(player.session().duration_ms(), 1);

        player.update(
            Message::Playback(7, PlaybackMessage::Opened { duration_ms: 5_000 }),
            now,
        );
        assert_eq!(player.session().duration_ms(), 5_000);
    }

    #[test]
    fn frames_update_position_and_surface() {
        let mut player = state();
        let now = Instant::now();
        player.update(
            Message::Playback(7, PlaybackMessage::Opened { duration_ms: 10_000 }),
            now,
        );
        player.update(
            Message::Playback(
                7,
                PlaybackMessage::FrameReady {
                    rgba_data: Arc::new(vec![0; 16]),
                    width: 2,
                    height: 2,
                    position_ms: 2_500,
                },
            ),
            now,
        );

        assert_eq!(player.session().position_ms(), 2_500);
        assert_eq!(player.session().duration_ms(), 10_000);
        assert!(player.frame.is_some());
    }

    #[test]
    fn decoder_errors_are_kept_for_display() {
        let mut player = state();
        player.update(
            Message::Playback(7, PlaybackMessage::Error(VideoError::MissingVideoStream)),
            Instant::now(),
        );
        assert!(matches!(player.error(), Some(VideoError::MissingVideoStream)));
    }

    #[test]
    fn seek_bar_previews_then_commits() {
        let mut player = state();
        let now = Instant::now();
        player.update(
            Message::Playback(7, PlaybackMessage::Opened { duration_ms: 60_000 }),
            now,
        );

        player.update(Message::SeekPreview(12.5), now);
        assert_eq!(player.session().displayed_position_ms(), 12_500);
        assert_eq!(player.session().position_ms(), 0);

        player.update(Message::SeekCommit, now);
        assert_eq!(player.session().position_ms(), 12_500);
    }

    #[test]
    fn controls_extend_a_visible_overlay() {
        let mut player = state();
        let start = Instant::now();
        player.update(Message::SurfacePressed, start);
        player.update(Message::SurfaceReleased, start);

        player.update(Message::TogglePlayPause, start + Duration::from_secs(5));
        player.tick(start + Duration::from_secs(9));
        assert!(player.session().overlay_visible());
        player.tick(start + Duration::from_secs(13));
        assert!(!player.session().overlay_visible());
    }

    #[test]
    fn back_exits() {
        let mut player = state();
        assert_eq!(player.update(Message::Back, Instant::now()), Effect::Exit);
    }

    #[test]
    fn secs_to_ms_rejects_negative_and_nan() {
        assert_eq!(secs_to_ms(-1.0), 0);
        assert_eq!(secs_to_ms(f64::NAN), 0);
        assert_eq!(secs_to_ms(1.2345), 1_235);
    }
}
