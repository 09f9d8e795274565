// SPDX-License-Identifier: MPL-2.0
//! Message handlers for the application.
//!
//! Each screen reports an `Effect`; the handlers here turn effects into
//! navigation, background tasks and window mode changes.

use super::config::Config;
use super::persisted_state::OnboardingStore;
use super::{Message, Route, Router};
use crate::media::{MediaLibrary, ThumbnailCache, VideoAsset};
use crate::ui::{directories, onboarding, player, videos};
use crate::video_player::SessionSettings;
use iced::keyboard::{key::Named, Key};
use iced::{window, Task};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Context for update operations containing mutable references to app state.
pub struct UpdateContext<'a> {
    pub config: &'a Config,
    pub router: &'a mut Router,
    pub store: Option<&'a OnboardingStore>,
    pub library: &'a Arc<dyn MediaLibrary>,
    pub thumbnails: &'a mut ThumbnailCache,
    pub onboarding: &'a mut onboarding::State,
    pub directories: &'a mut directories::State,
    pub videos: &'a mut Option<videos::State>,
    pub player: &'a mut Option<player::State>,
    pub next_session_id: &'a mut u64,
    pub fullscreen: &'a mut bool,
    pub window_id: &'a mut Option<window::Id>,
    pub warnings: &'a mut Vec<String>,
}

pub fn handle_onboarding_message(
    ctx: &mut UpdateContext<'_>,
    message: onboarding::Message,
) -> Task<Message> {
    match ctx.onboarding.update(message) {
        onboarding::Effect::None => Task::none(),
        onboarding::Effect::Finish => {
            match ctx.store {
                Some(store) => {
                    if let Err(err) = store.mark_onboarding_visited() {
                        tracing::warn!("could not save onboarding state: {}", err);
                        ctx.warnings
                            .push("notification-state-save-error".to_string());
                    }
                }
                None => tracing::warn!("no onboarding store, completion not saved"),
            }
            ctx.router.replace(Route::Directories);
            directories::load(Arc::clone(ctx.library)).map(Message::Directories)
        }
    }
}

pub fn handle_directories_message(
    ctx: &mut UpdateContext<'_>,
    message: directories::Message,
) -> Task<Message> {
    match ctx.directories.update(message) {
        directories::Effect::None => Task::none(),
        directories::Effect::Reload => {
            directories::load(Arc::clone(ctx.library)).map(Message::Directories)
        }
        directories::Effect::Open(album) => {
            let task = videos::load(
                Arc::clone(ctx.library),
                &album,
                ctx.config.library.effective_page_size(),
            )
            .map(Message::Videos);
            *ctx.videos = Some(videos::State::new(album.clone()));
            ctx.router.push(Route::Videos { album });
            task
        }
    }
}

pub fn handle_videos_message(
    ctx: &mut UpdateContext<'_>,
    message: videos::Message,
) -> Task<Message> {
    let Some(state) = ctx.videos.as_mut() else {
        tracing::debug!("video list closed, dropping {:?}", message);
        return Task::none();
    };

    match state.update(message) {
        videos::Effect::None => Task::none(),
        videos::Effect::Reload => videos::load(
            Arc::clone(ctx.library),
            state.album(),
            ctx.config.library.effective_page_size(),
        )
        .map(Message::Videos),
        videos::Effect::FetchThumbnails(paths) => {
            if state.preview_wanted().is_some() {
                *ctx.next_session_id += 1;
                state.start_preview(
                    *ctx.next_session_id,
                    SessionSettings::from(&ctx.config.player),
                );
            }
            fetch_thumbnails(ctx.thumbnails, &paths)
        }
        videos::Effect::Play(video) => open_player(ctx, video),
        videos::Effect::Back => {
            ctx.router.back();
            *ctx.videos = None;
            Task::none()
        }
    }
}

pub fn handle_player_message(
    ctx: &mut UpdateContext<'_>,
    message: player::Message,
) -> Task<Message> {
    let Some(state) = ctx.player.as_mut() else {
        return Task::none();
    };

    match state.update(message, Instant::now()) {
        player::Effect::None => Task::none(),
        player::Effect::Exit => close_player(ctx),
    }
}

/// Keyboard shortcuts. Only the player and the video list react to keys.
pub fn handle_key_press(ctx: &mut UpdateContext<'_>, key: &Key) -> Task<Message> {
    let route = ctx.router.current();
    let in_player = matches!(route, Route::Player { .. });
    let in_videos = matches!(route, Route::Videos { .. });

    if in_player {
        let message = match key {
            Key::Named(Named::Space) => player::Message::TogglePlayPause,
            Key::Named(Named::ArrowLeft) => player::Message::SkipBackward,
            Key::Named(Named::ArrowRight) => player::Message::SkipForward,
            Key::Named(Named::ArrowUp) => player::Message::VolumeUp,
            Key::Named(Named::ArrowDown) => player::Message::VolumeDown,
            Key::Named(Named::Escape) => player::Message::Back,
            _ => return Task::none(),
        };
        handle_player_message(ctx, message)
    } else if in_videos && matches!(key, Key::Named(Named::Escape)) {
        handle_videos_message(ctx, videos::Message::Back)
    } else {
        Task::none()
    }
}

fn fetch_thumbnails(thumbnails: &mut ThumbnailCache, paths: &[PathBuf]) -> Task<Message> {
    let missing = thumbnails.claim_missing(paths.iter().map(PathBuf::as_path));
    if missing.is_empty() {
        return Task::none();
    }
    tracing::debug!("extracting {} thumbnails", missing.len());
    Task::batch(missing.into_iter().map(|path| {
        videos::load_thumbnail(path).map(|(path, slot)| Message::ThumbnailLoaded(path, slot))
    }))
}

fn open_player(ctx: &mut UpdateContext<'_>, video: VideoAsset) -> Task<Message> {
    if let Some(videos) = ctx.videos.as_mut() {
        videos.suspend_preview();
    }
    *ctx.next_session_id += 1;
    let settings = SessionSettings::from(&ctx.config.player);
    *ctx.player = Some(player::State::new(
        video.clone(),
        *ctx.next_session_id,
        settings,
    ));
    ctx.router.push(Route::Player { video });
    update_fullscreen_mode(ctx.fullscreen, ctx.window_id.as_ref(), true)
}

fn close_player(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    if let Some(mut state) = ctx.player.take() {
        state.close();
    }
    if matches!(ctx.router.current(), Route::Player { .. }) {
        ctx.router.back();
    }
    update_fullscreen_mode(ctx.fullscreen, ctx.window_id.as_ref(), false)
}

/// Updates fullscreen mode to the desired state.
fn update_fullscreen_mode(
    fullscreen: &mut bool,
    window_id: Option<&window::Id>,
    desired: bool,
) -> Task<Message> {
    if *fullscreen == desired {
        return Task::none();
    }

    let Some(window_id) = window_id else {
        return Task::none();
    };

    *fullscreen = desired;
    let mode = if desired {
        window::Mode::Fullscreen
    } else {
        window::Mode::Windowed
    };
    window::set_mode(*window_id, mode)
}
