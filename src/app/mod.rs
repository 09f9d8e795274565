// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the screens.
//!
//! The `App` struct owns the navigation stack, the onboarding store, the media
//! library and the per-screen states, and translates screen effects into
//! navigation, background scans and window mode changes.

pub mod config;
mod message;
pub mod paths;
pub mod persisted_state;
mod screen;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use screen::{Route, Router};

use crate::i18n::fluent::I18n;
use crate::media::{FsLibrary, MediaLibrary, ThumbnailCache};
use crate::ui::theming::ThemeMode;
use crate::ui::{directories, onboarding, player, videos};
use persisted_state::OnboardingStore;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    config: config::Config,
    router: Router,
    store: Option<OnboardingStore>,
    library: Arc<dyn MediaLibrary>,
    thumbnails: ThumbnailCache,
    onboarding: onboarding::State,
    directories: directories::State,
    videos: Option<videos::State>,
    player: Option<player::State>,
    /// Id handed to the next player so its decoder messages can be told apart.
    next_session_id: u64,
    fullscreen: bool,
    window_id: Option<window::Id>,
    theme_mode: ThemeMode,
    /// i18n keys of warnings not yet dismissed, oldest first.
    warnings: Vec<String>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("route", &self.router.current().name())
            .field("stack_depth", &self.router.len())
            .field("warnings", &self.warnings)
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 650;
pub const WINDOW_DEFAULT_WIDTH: u32 = 900;
pub const MIN_WINDOW_HEIGHT: u32 = 480;
pub const MIN_WINDOW_WIDTH: u32 = 640;

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

/// Library roots by precedence: CLI flags, then config, then the platform video folder.
fn resolve_library_roots(cli_roots: &[String], config: &config::Config) -> Vec<PathBuf> {
    if !cli_roots.is_empty() {
        return cli_roots.iter().map(PathBuf::from).collect();
    }
    if !config.library.roots.is_empty() {
        return config.library.roots.clone();
    }
    paths::default_library_roots()
}

impl App {
    /// Loads configuration and the onboarding store, then picks the first screen.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let (store, store_warning) = OnboardingStore::open_or_fallback(None);

        let roots = resolve_library_roots(&flags.library_roots, &config);
        tracing::info!("library roots: {:?}", roots);
        let library = FsLibrary::new(roots)
            .with_max_depth(config.library.max_depth)
            .with_sort_order(config.library.sort_order);

        Self::with_parts(flags.lang, config, store, Arc::new(library), [config_warning, store_warning])
    }

    /// Assembles the app from already-opened parts. Split from `new` so tests
    /// can inject an in-memory store and a fake library.
    fn with_parts(
        lang: Option<String>,
        config: config::Config,
        store: Option<OnboardingStore>,
        library: Arc<dyn MediaLibrary>,
        warnings: [Option<String>; 2],
    ) -> (Self, Task<Message>) {
        let visited = store
            .as_ref()
            .is_some_and(OnboardingStore::is_onboarding_visited);
        let router = Router::initial(visited);

        let app = App {
            i18n: I18n::new(lang, &config),
            theme_mode: config.general.theme_mode,
            config,
            router,
            store,
            library,
            thumbnails: ThumbnailCache::default(),
            onboarding: onboarding::State::default(),
            directories: directories::State::default(),
            videos: None,
            player: None,
            next_session_id: 0,
            fullscreen: false,
            window_id: None,
            warnings: warnings.into_iter().flatten().collect(),
        };

        let task = if visited {
            directories::load(Arc::clone(&app.library)).map(Message::Directories)
        } else {
            Task::none()
        };

        (app, task)
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        match self.router.current() {
            Route::Videos { album } => format!("{} - {app_name}", album.title),
            Route::Player { video } => format!("{} - {app_name}", video.filename),
            Route::Onboarding | Route::Directories => app_name,
        }
    }

    fn theme(&self) -> Theme {
        self.theme_mode.to_theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        let event_sub = subscription::create_event_subscription();
        let in_videos = matches!(self.router.current(), Route::Videos { .. });
        let preview_host = self.videos.as_ref().filter(|_| in_videos);
        let tick_sub = subscription::create_tick_subscription(
            self.player.as_ref().is_some_and(player::State::needs_tick)
                || preview_host.is_some_and(videos::State::needs_tick),
        );
        let video_sub = subscription::create_video_subscription(self.player.as_ref());
        let preview_sub = subscription::create_preview_subscription(preview_host);

        Subscription::batch([event_sub, tick_sub, video_sub, preview_sub])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = update::UpdateContext {
            config: &self.config,
            router: &mut self.router,
            store: self.store.as_ref(),
            library: &self.library,
            thumbnails: &mut self.thumbnails,
            onboarding: &mut self.onboarding,
            directories: &mut self.directories,
            videos: &mut self.videos,
            player: &mut self.player,
            next_session_id: &mut self.next_session_id,
            fullscreen: &mut self.fullscreen,
            window_id: &mut self.window_id,
            warnings: &mut self.warnings,
        };

        match message {
            Message::Onboarding(message) => update::handle_onboarding_message(&mut ctx, message),
            Message::Directories(message) => {
                update::handle_directories_message(&mut ctx, message)
            }
            Message::Videos(message) => update::handle_videos_message(&mut ctx, message),
            Message::Player(message) => update::handle_player_message(&mut ctx, message),
            Message::ThumbnailLoaded(path, slot) => {
                ctx.thumbnails.insert(path, slot);
                Task::none()
            }
            Message::Tick(now) => {
                if let Some(player) = ctx.player.as_mut() {
                    player.tick(now);
                }
                if let Some(videos) = ctx.videos.as_mut() {
                    videos.tick(now);
                }
                Task::none()
            }
            Message::KeyPressed(key) => update::handle_key_press(&mut ctx, &key),
            Message::WindowOpened(id) => {
                *ctx.window_id = Some(id);
                Task::none()
            }
            Message::DismissWarning => {
                if !ctx.warnings.is_empty() {
                    ctx.warnings.remove(0);
                }
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            route: self.router.current(),
            onboarding: &self.onboarding,
            directories: &self.directories,
            videos: self.videos.as_ref(),
            player: self.player.as_ref(),
            thumbnails: &self.thumbnails,
            warning: self.warnings.first().map(String::as_str),
        })
    }
}
