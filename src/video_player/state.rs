// SPDX-License-Identifier: MPL-2.0
//! Transport state for one playback session.
//!
//! [`PlaybackSession`] turns user gestures and decoder status updates into a
//! renderable state and forwards commands to the player handle. The handle is
//! optional: until the decoder subscription reports `Started`, commands are
//! dropped while the local state still changes.
//!
//! Position state flows one way. Commands are optimistic and the decoder's
//! status updates are the only source that moves `position_ms`, except for an
//! explicit seek which mirrors its target immediately.

use super::{OverlayTimeout, PlaybackRate, SkipStep, Volume};
use std::time::Instant;

/// Transport commands understood by a player.
///
/// Every method is fire-and-forget.
pub trait PlayerControl {
    fn play(&self);
    fn pause(&self);
    fn set_rate(&self, rate: f64);
    fn set_volume(&self, volume: f32);
    fn set_muted(&self, muted: bool);
    fn seek_to(&self, position_ms: u64);
}

/// Session tunables taken from the `[player]` config section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSettings {
    pub overlay_timeout: OverlayTimeout,
    pub skip_step: SkipStep,
    pub volume: Volume,
    pub loop_enabled: bool,
    pub autoplay: bool,
    /// Start with audio silenced; the inline preview uses this.
    pub muted: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            overlay_timeout: OverlayTimeout::default(),
            skip_step: SkipStep::default(),
            volume: Volume::default(),
            loop_enabled: true,
            autoplay: true,
            muted: false,
        }
    }
}

/// State of one playback session plus its optional player handle.
#[derive(Debug)]
pub struct PlaybackSession<P> {
    handle: Option<P>,
    is_playing: bool,
    playback_rate: PlaybackRate,
    volume: Volume,
    muted: bool,
    overlay_visible: bool,
    overlay_deadline: Option<Instant>,
    overlay_timeout: OverlayTimeout,
    position_ms: u64,
    duration_ms: u64,
    is_2x_faster: bool,
    seek_preview_ms: Option<u64>,
    skip_step: SkipStep,
    loop_enabled: bool,
}

impl<P: PlayerControl> PlaybackSession<P> {
    /// Creates a detached session.
    ///
    /// Duration starts at 1 ms so ratios stay defined before the first
    /// status update.
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            handle: None,
            is_playing: settings.autoplay,
            playback_rate: PlaybackRate::default(),
            volume: settings.volume,
            muted: settings.muted,
            overlay_visible: false,
            overlay_deadline: None,
            overlay_timeout: settings.overlay_timeout,
            position_ms: 0,
            duration_ms: 1,
            is_2x_faster: false,
            seek_preview_ms: None,
            skip_step: settings.skip_step,
            loop_enabled: settings.loop_enabled,
        }
    }

    /// Installs the player handle and brings it in line with the local state.
    pub fn attach(&mut self, handle: P) {
        handle.set_volume(self.volume.value());
        handle.set_muted(self.muted);
        handle.set_rate(self.effective_rate());
        if self.is_playing {
            handle.play();
        } else {
            handle.pause();
        }
        self.handle = Some(handle);
    }

    /// Removes and returns the player handle.
    pub fn detach(&mut self) -> Option<P> {
        self.handle.take()
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.handle.is_some()
    }

    fn with_handle(&self, command: &str, f: impl FnOnce(&P)) {
        match &self.handle {
            Some(handle) => f(handle),
            None => tracing::debug!("player not attached, dropping {}", command),
        }
    }

    /// Inverts `is_playing` and sends the matching command.
    ///
    /// Playing from the very end restarts from the beginning, since the
    /// decoder has nothing left to show there.
    pub fn toggle_play_pause(&mut self) {
        if self.is_playing {
            self.with_handle("pause", P::pause);
        } else {
            if self.position_ms >= self.duration_ms && self.duration_ms > 1 {
                self.with_handle("seek_to", |h| h.seek_to(0));
                self.position_ms = 0;
            }
            self.with_handle("play", P::play);
        }
        self.is_playing = !self.is_playing;
    }

    /// Pauses if playing; a no-op otherwise.
    pub fn pause(&mut self) {
        if self.is_playing {
            self.toggle_play_pause();
        }
    }

    /// Shows the overlay and (re)starts its hide countdown from `now`.
    pub fn toggle_overlay(&mut self, now: Instant) {
        self.overlay_visible = true;
        self.overlay_deadline = Some(now + self.overlay_timeout.as_duration());
    }

    /// Hides the overlay once its deadline has passed. Returns true if it was hidden.
    pub fn check_overlay_timeout(&mut self, now: Instant) -> bool {
        match self.overlay_deadline {
            Some(deadline) if now >= deadline => {
                self.overlay_visible = false;
                self.overlay_deadline = None;
                true
            }
            _ => false,
        }
    }

    /// True while an overlay hide is scheduled.
    #[must_use]
    pub fn has_pending_deadline(&self) -> bool {
        self.overlay_deadline.is_some()
    }

    pub fn on_long_press_start(&mut self) {
        self.with_handle("set_rate", |h| h.set_rate(PlaybackRate::boost().value()));
        self.is_2x_faster = true;
    }

    /// Restores the user-selected rate after a long press.
    pub fn on_long_press_end(&mut self) {
        let rate = self.playback_rate.value();
        self.with_handle("set_rate", |h| h.set_rate(rate));
        self.is_2x_faster = false;
    }

    /// Sets the volume, clamped to `0.0..=1.0`.
    pub fn set_volume(&mut self, volume: f32) {
        let volume = Volume::new(volume);
        self.with_handle("set_volume", |h| h.set_volume(volume.value()));
        self.volume = volume;
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.with_handle("set_muted", |h| h.set_muted(muted));
        self.muted = muted;
    }

    pub fn toggle_mute(&mut self) {
        self.set_muted(!self.muted);
    }

    pub fn volume_up(&mut self) {
        self.set_volume(self.volume.increase().value());
    }

    pub fn volume_down(&mut self) {
        self.set_volume(self.volume.decrease().value());
    }

    /// Seeks to `position_ms` (clamped to the duration) and mirrors it.
    pub fn seek_to(&mut self, position_ms: u64) {
        let target = position_ms.min(self.duration_ms);
        self.with_handle("seek_to", |h| h.seek_to(target));
        self.position_ms = target;
    }

    /// Records a seek-bar drag position without commanding the player.
    pub fn preview_seek(&mut self, position_ms: u64) {
        self.seek_preview_ms = Some(position_ms.min(self.duration_ms));
    }

    /// Commits the drag preview, if any, as a real seek.
    pub fn commit_seek(&mut self) {
        if let Some(target) = self.seek_preview_ms.take() {
            self.seek_to(target);
        }
    }

    /// Commands a relative seek by `delta_secs`, clamped to `[0, duration]`.
    ///
    /// Local position is left alone; the next status update reports the
    /// result. Returns the commanded target.
    pub fn skip(&mut self, delta_secs: i64) -> u64 {
        let target = (self.position_ms as i64)
            .saturating_add(delta_secs.saturating_mul(1000))
            .clamp(0, self.duration_ms as i64) as u64;
        self.with_handle("seek_to", |h| h.seek_to(target));
        target
    }

    pub fn skip_forward(&mut self) -> u64 {
        self.skip(self.skip_step.forward())
    }

    pub fn skip_backward(&mut self) -> u64 {
        self.skip(self.skip_step.backward())
    }

    /// Applies a decoder status update. Last write wins.
    ///
    /// A zero duration is stored as 1 ms.
    pub fn on_status_update(&mut self, position_ms: u64, duration_ms: u64) {
        self.position_ms = position_ms;
        self.duration_ms = duration_ms.max(1);
    }

    /// Loops back to the start, or stops at the end when looping is off.
    pub fn on_end_of_stream(&mut self) {
        if self.loop_enabled {
            self.with_handle("seek_to", |h| h.seek_to(0));
            self.position_ms = 0;
            if self.is_playing {
                self.with_handle("play", P::play);
            }
        } else {
            self.is_playing = false;
            self.position_ms = self.duration_ms;
        }
    }

    fn effective_rate(&self) -> f64 {
        if self.is_2x_faster {
            PlaybackRate::boost().value()
        } else {
            self.playback_rate.value()
        }
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    #[must_use]
    pub fn playback_rate(&self) -> PlaybackRate {
        self.playback_rate
    }

    #[must_use]
    pub fn volume(&self) -> Volume {
        self.volume
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    #[must_use]
    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    #[must_use]
    pub fn position_ms(&self) -> u64 {
        self.position_ms
    }

    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Position the seek bar should show: the drag preview while dragging.
    #[must_use]
    pub fn displayed_position_ms(&self) -> u64 {
        self.seek_preview_ms.unwrap_or(self.position_ms)
    }

    #[must_use]
    pub fn is_2x_faster(&self) -> bool {
        self.is_2x_faster
    }

    #[must_use]
    pub fn skip_step(&self) -> SkipStep {
        self.skip_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    enum Sent {
        Play,
        Pause,
        Rate(f64),
        Volume(f32),
        Muted(bool),
        Seek(u64),
    }

    #[derive(Debug, Clone, Default)]
    struct RecordingPlayer {
        sent: Rc<RefCell<Vec<Sent>>>,
    }

    impl RecordingPlayer {
        fn take(&self) -> Vec<Sent> {
            std::mem::take(&mut *self.sent.borrow_mut())
        }
    }

    impl PlayerControl for RecordingPlayer {
        fn play(&self) {
            self.sent.borrow_mut().push(Sent::Play);
        }
        fn pause(&self) {
            self.sent.borrow_mut().push(Sent::Pause);
        }
        fn set_rate(&self, rate: f64) {
            self.sent.borrow_mut().push(Sent::Rate(rate));
        }
        fn set_volume(&self, volume: f32) {
            self.sent.borrow_mut().push(Sent::Volume(volume));
        }
        fn set_muted(&self, muted: bool) {
            self.sent.borrow_mut().push(Sent::Muted(muted));
        }
        fn seek_to(&self, position_ms: u64) {
            self.sent.borrow_mut().push(Sent::Seek(position_ms));
        }
    }

    fn attached() -> (PlaybackSession<RecordingPlayer>, RecordingPlayer) {
        let player = RecordingPlayer::default();
        let mut session = PlaybackSession::new(SessionSettings::default());
        session.attach(player.clone());
        player.take();
        (session, player)
    }

    #[test]
    fn new_session_matches_initial_transport_state() {
        let session: PlaybackSession<RecordingPlayer> =
            PlaybackSession::new(SessionSettings::default());
        assert!(session.is_playing());
        assert!(session.playback_rate().is_normal());
        assert_abs_diff_eq!(session.volume().value(), 1.0);
        assert!(!session.overlay_visible());
        assert_eq!(session.position_ms(), 0);
        assert_eq!(session.duration_ms(), 1);
        assert!(!session.is_2x_faster());
    }

    #[test]
    fn toggle_play_pause_always_inverts() {
        let (mut session, player) = attached();
        for _ in 0..5 {
            let before = session.is_playing();
            session.toggle_play_pause();
            assert_eq!(session.is_playing(), !before);
        }
        assert_eq!(
            player.take(),
            vec![Sent::Pause, Sent::Play, Sent::Pause, Sent::Play, Sent::Pause]
        );
    }

    #[test]
    fn detached_toggle_still_inverts_state() {
        let mut session: PlaybackSession<RecordingPlayer> =
            PlaybackSession::new(SessionSettings::default());
        session.toggle_play_pause();
        assert!(!session.is_playing());
        session.toggle_play_pause();
        assert!(session.is_playing());
    }

    #[test]
    fn long_press_boosts_then_restores_rate() {
        let (mut session, player) = attached();

        session.on_long_press_start();
        assert!(session.is_2x_faster());

        session.on_long_press_end();
        assert!(!session.is_2x_faster());
        assert!(session.playback_rate().is_normal());

        assert_eq!(player.take(), vec![Sent::Rate(2.0), Sent::Rate(1.0)]);
    }

    #[test]
    fn skip_clamps_to_bounds_without_moving_position() {
        let (mut session, player) = attached();
        session.on_status_update(5000, 10_000);

        assert_eq!(session.skip(-10), 0);
        assert_eq!(session.skip(10), 10_000);
        assert_eq!(session.skip(2), 7000);

        assert_eq!(
            player.take(),
            vec![Sent::Seek(0), Sent::Seek(10_000), Sent::Seek(7000)]
        );
        assert_eq!(session.position_ms(), 5000);
    }

    #[test]
    fn skip_step_follows_settings() {
        let player = RecordingPlayer::default();
        let mut session = PlaybackSession::new(SessionSettings {
            skip_step: SkipStep::new(15),
            ..SessionSettings::default()
        });
        session.attach(player.clone());
        session.on_status_update(20_000, 60_000);

        assert_eq!(session.skip_forward(), 35_000);
        assert_eq!(session.skip_backward(), 5000);
    }

    #[test]
    fn overlay_hides_after_timeout_from_latest_toggle() {
        let (mut session, _player) = attached();
        let start = Instant::now();

        session.toggle_overlay(start);
        assert!(session.overlay_visible());

        // A second tap reschedules the deadline.
        let second = start + Duration::from_millis(5000);
        session.toggle_overlay(second);

        assert!(!session.check_overlay_timeout(start + Duration::from_millis(8000)));
        assert!(session.overlay_visible());

        assert!(!session.check_overlay_timeout(second + Duration::from_millis(7999)));
        assert!(session.check_overlay_timeout(second + Duration::from_millis(8000)));
        assert!(!session.overlay_visible());
        assert!(!session.has_pending_deadline());
    }

    #[test]
    fn set_volume_clamps_and_forwards() {
        let (mut session, player) = attached();
        session.set_volume(1.7);
        assert_abs_diff_eq!(session.volume().value(), 1.0);
        session.set_volume(0.3);
        assert_abs_diff_eq!(session.volume().value(), 0.3);
        assert_eq!(player.take(), vec![Sent::Volume(1.0), Sent::Volume(0.3)]);
    }

    #[test]
    fn seek_preview_is_only_sent_on_commit() {
        let (mut session, player) = attached();
        session.on_status_update(1000, 60_000);

        session.preview_seek(30_000);
        session.preview_seek(42_000);
        assert!(player.take().is_empty());
        assert_eq!(session.displayed_position_ms(), 42_000);
        assert_eq!(session.position_ms(), 1000);

        session.commit_seek();
        assert_eq!(player.take(), vec![Sent::Seek(42_000)]);
        assert_eq!(session.position_ms(), 42_000);

        // Nothing pending, nothing sent.
        session.commit_seek();
        assert!(player.take().is_empty());
    }

    #[test]
    fn status_updates_are_last_write_wins() {
        let (mut session, _player) = attached();
        session.on_status_update(4000, 10_000);
        session.on_status_update(2000, 12_000);
        assert_eq!(session.position_ms(), 2000);
        assert_eq!(session.duration_ms(), 12_000);

        session.on_status_update(0, 0);
        assert_eq!(session.duration_ms(), 1);
    }

    #[test]
    fn end_of_stream_loops_by_default() {
        let (mut session, player) = attached();
        session.on_status_update(9_900, 10_000);

        session.on_end_of_stream();

        assert!(session.is_playing());
        assert_eq!(session.position_ms(), 0);
        assert_eq!(player.take(), vec![Sent::Seek(0), Sent::Play]);
    }

    #[test]
    fn end_of_stream_without_loop_stops() {
        let player = RecordingPlayer::default();
        let mut session = PlaybackSession::new(SessionSettings {
            loop_enabled: false,
            ..SessionSettings::default()
        });
        session.attach(player.clone());
        session.on_status_update(9_900, 10_000);

        session.on_end_of_stream();

        assert!(!session.is_playing());
        assert_eq!(session.position_ms(), 10_000);
    }

    #[test]
    fn attach_replays_local_state() {
        let player = RecordingPlayer::default();
        let mut session = PlaybackSession::new(SessionSettings::default());
        session.set_volume(0.5);
        session.toggle_play_pause();
        session.on_long_press_start();

        session.attach(player.clone());

        assert_eq!(
            player.take(),
            vec![
                Sent::Volume(0.5),
                Sent::Muted(false),
                Sent::Rate(2.0),
                Sent::Pause
            ]
        );
        assert!(session.is_attached());
        assert!(session.detach().is_some());
        assert!(!session.is_attached());
    }

    #[test]
    fn volume_keys_step_by_five_percent() {
        let (mut session, _player) = attached();
        session.volume_down();
        assert_abs_diff_eq!(session.volume().value(), 0.95, epsilon = 0.001);
        session.volume_up();
        session.volume_up();
        assert_abs_diff_eq!(session.volume().value(), 1.0);
    }

    #[test]
    fn play_after_the_end_restarts_from_zero() {
        let player = RecordingPlayer::default();
        let mut session = PlaybackSession::new(SessionSettings {
            loop_enabled: false,
            ..SessionSettings::default()
        });
        session.attach(player.clone());
        session.on_status_update(9_900, 10_000);
        session.on_end_of_stream();
        player.take();

        session.toggle_play_pause();

        assert!(session.is_playing());
        assert_eq!(session.position_ms(), 0);
        assert_eq!(player.take(), vec![Sent::Seek(0), Sent::Play]);
    }

    #[test]
    fn play_mid_video_does_not_seek() {
        let (mut session, player) = attached();
        session.toggle_play_pause();
        session.on_status_update(4000, 10_000);
        player.take();

        session.toggle_play_pause();

        assert_eq!(player.take(), vec![Sent::Play]);
        assert_eq!(session.position_ms(), 4000);
    }

    #[test]
    fn mute_is_forwarded_and_replayed_on_attach() {
        let player = RecordingPlayer::default();
        let mut session = PlaybackSession::new(SessionSettings {
            muted: true,
            ..SessionSettings::default()
        });
        assert!(session.is_muted());

        session.attach(player.clone());
        assert!(player.take().contains(&Sent::Muted(true)));

        session.toggle_mute();
        assert!(!session.is_muted());
        assert_eq!(player.take(), vec![Sent::Muted(false)]);
    }
}
