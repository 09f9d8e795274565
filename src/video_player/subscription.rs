// SPDX-License-Identifier: MPL-2.0
//! Iced subscription for video playback events.
//!
//! Connects the async decoder to the UI event loop. Every message is tagged
//! with the session id it belongs to so late messages from a closed player
//! can be told apart from the current one.

use super::state::PlayerControl;
use super::{AsyncDecoder, DecoderCommand, DecoderEvent};
use crate::error::VideoError;
use iced::futures::SinkExt;
use iced::stream;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Subscription ID for video playback.
/// Each playback session gets a unique ID so the stream is recreated per video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VideoPlaybackId(u64);

/// Handle for sending commands to the decoder from the UI.
#[derive(Clone)]
pub struct DecoderCommandSender {
    tx: mpsc::UnboundedSender<DecoderCommand>,
}

impl DecoderCommandSender {
    pub fn send(&self, command: DecoderCommand) -> Result<(), String> {
        self.tx
            .send(command)
            .map_err(|_| "Video decoder not running".to_string())
    }

    fn send_or_log(&self, command: DecoderCommand) {
        if let Err(err) = self.send(command) {
            tracing::debug!("dropping player command: {}", err);
        }
    }
}

impl PlayerControl for DecoderCommandSender {
    fn play(&self) {
        self.send_or_log(DecoderCommand::Play);
    }

    fn pause(&self) {
        self.send_or_log(DecoderCommand::Pause);
    }

    fn set_rate(&self, rate: f64) {
        self.send_or_log(DecoderCommand::SetRate(rate));
    }

    fn set_volume(&self, volume: f32) {
        self.send_or_log(DecoderCommand::SetVolume(volume));
    }

    fn set_muted(&self, muted: bool) {
        self.send_or_log(DecoderCommand::SetMuted(muted));
    }

    fn seek_to(&self, position_ms: u64) {
        self.send_or_log(DecoderCommand::Seek { position_ms });
    }
}

impl std::fmt::Debug for DecoderCommandSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecoderCommandSender")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

/// Messages emitted by the video playback subscription.
#[derive(Debug, Clone)]
pub enum PlaybackMessage {
    /// Subscription started; carries the player handle.
    Started(DecoderCommandSender),

    /// File opened and its duration is known.
    Opened { duration_ms: u64 },

    /// A new frame is ready for display.
    FrameReady {
        rgba_data: Arc<Vec<u8>>,
        width: u32,
        height: u32,
        position_ms: u64,
    },

    /// Playback reached the end.
    EndOfStream,

    /// The decoder failed.
    Error(VideoError),
}

/// Creates the playback subscription for one session.
///
/// Emits `(session_id, message)` pairs. Dropping the subscription drops the
/// command channel, which stops the decoder thread.
pub fn video_playback(
    video_path: PathBuf,
    session_id: u64,
) -> iced::Subscription<(u64, PlaybackMessage)> {
    iced::Subscription::run_with_id(
        VideoPlaybackId(session_id),
        stream::channel(100, move |mut output| async move {
            let mut decoder = match AsyncDecoder::new(&video_path) {
                Ok(decoder) => decoder,
                Err(e) => {
                    let _ = output
                        .send((
                            session_id,
                            PlaybackMessage::Error(VideoError::from_message(&e.to_string())),
                        ))
                        .await;
                    std::future::pending::<()>().await;
                    return;
                }
            };

            let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel();
            let _ = output
                .send((
                    session_id,
                    PlaybackMessage::Started(DecoderCommandSender { tx: cmd_tx }),
                ))
                .await;

            loop {
                tokio::select! {
                    cmd = cmd_rx.recv() => {
                        let Some(command) = cmd else { break };
                        if let Err(e) = decoder.send_command(command) {
                            let _ = output
                                .send((session_id, PlaybackMessage::Error(VideoError::from_message(&e.to_string()))))
                                .await;
                        }
                    }

                    event = decoder.recv_event() => {
                        let Some(event) = event else { break };
                        let _ = output.send((session_id, to_message(event))).await;
                    }
                }
            }

            let _ = decoder.send_command(DecoderCommand::Stop);
            // Keep subscription alive but idle
            std::future::pending::<()>().await;
        }),
    )
}

fn to_message(event: DecoderEvent) -> PlaybackMessage {
    match event {
        DecoderEvent::Opened { duration_ms } => PlaybackMessage::Opened { duration_ms },
        DecoderEvent::FrameReady(frame) => PlaybackMessage::FrameReady {
            rgba_data: frame.rgba_data,
            width: frame.width,
            height: frame.height,
            position_ms: frame.pts_ms,
        },
        DecoderEvent::EndOfStream => PlaybackMessage::EndOfStream,
        DecoderEvent::Error(msg) => PlaybackMessage::Error(VideoError::from_message(&msg)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video_player::DecodedFrame;

    #[test]
    fn subscription_id_is_consistent() {
        assert_eq!(VideoPlaybackId(42), VideoPlaybackId(42));
        assert_ne!(VideoPlaybackId(42), VideoPlaybackId(43));
    }

    #[test]
    fn player_control_maps_to_decoder_commands() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sender = DecoderCommandSender { tx };

        sender.play();
        sender.pause();
        sender.set_rate(2.0);
        sender.set_volume(0.4);
        sender.set_muted(true);
        sender.seek_to(1500);

        let received: Vec<DecoderCommand> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
        assert_eq!(
            received,
            vec![
                DecoderCommand::Play,
                DecoderCommand::Pause,
                DecoderCommand::SetRate(2.0),
                DecoderCommand::SetVolume(0.4),
                DecoderCommand::SetMuted(true),
                DecoderCommand::Seek { position_ms: 1500 },
            ]
        );
    }

    #[test]
    fn commands_to_a_closed_decoder_are_dropped() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let sender = DecoderCommandSender { tx };

        assert!(sender.send(DecoderCommand::Play).is_err());
        // Fire-and-forget path must not panic.
        sender.play();
    }

    #[test]
    fn frame_events_become_status_carrying_messages() {
        let frame = DecodedFrame {
            rgba_data: Arc::new(vec![0; 4]),
            width: 1,
            height: 1,
            pts_ms: 2500,
        };
        let message = to_message(DecoderEvent::FrameReady(frame));
        assert!(matches!(
            message,
            PlaybackMessage::FrameReady { position_ms: 2500, width: 1, height: 1, .. }
        ));
    }

    #[test]
    fn decoder_errors_are_categorized() {
        let message = to_message(DecoderEvent::Error("No such file or directory".into()));
        assert!(matches!(
            message,
            PlaybackMessage::Error(VideoError::Unreadable(_))
        ));
    }
}
