// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.

use super::Message;
use crate::config::TICK_INTERVAL_MS;
use crate::ui::{player, videos};
use iced::{event, keyboard, time, window, Subscription};
use std::time::Duration;

/// Routes window-open and uncaptured key-press events to the app.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, window_id| match event {
        event::Event::Window(window::Event::Opened { .. }) => {
            Some(Message::WindowOpened(window_id))
        }
        event::Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => match status {
            event::Status::Ignored => Some(Message::KeyPressed(key)),
            event::Status::Captured => None,
        },
        _ => None,
    })
}

/// Periodic tick for overlay auto-hide and long-press detection.
/// Only runs while a player or the preview has something pending.
pub fn create_tick_subscription(needs_tick: bool) -> Subscription<Message> {
    if needs_tick {
        time::every(Duration::from_millis(TICK_INTERVAL_MS)).map(Message::Tick)
    } else {
        Subscription::none()
    }
}

/// Decoder stream of the open player, if any.
pub fn create_video_subscription(player: Option<&player::State>) -> Subscription<Message> {
    player.map_or_else(Subscription::none, |player| {
        player.subscription().map(Message::Player)
    })
}

/// Decoder stream of the inline preview, while the video list is on screen.
pub fn create_preview_subscription(videos: Option<&videos::State>) -> Subscription<Message> {
    videos.map_or_else(Subscription::none, |videos| {
        videos.subscription().map(Message::Videos)
    })
}
