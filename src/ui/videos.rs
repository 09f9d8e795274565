// SPDX-License-Identifier: MPL-2.0
//! Video list of one album, with thumbnails and an inline preview of the
//! first video.

use crate::config::THUMBNAIL_MAX_WIDTH;
use crate::i18n::fluent::I18n;
use crate::media::video::extract_thumbnail;
use crate::media::{
    list_video_assets, Album, AlbumId, MediaLibrary, ThumbnailCache, ThumbnailSlot, VideoAsset,
};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::{preview, styles};
use crate::video_player::SessionSettings;
use iced::widget::{button, center, column, container, image, row, scrollable, text, Column, Space};
use iced::{alignment, ContentFit, Element, Length, Subscription, Task};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone)]
pub enum Message {
    /// Listing finished for the album with this id.
    Loaded(AlbumId, Vec<VideoAsset>),
    Refresh,
    Selected(usize),
    Preview(preview::Message),
    Back,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Reload,
    /// Thumbnails to extract for freshly listed assets.
    FetchThumbnails(Vec<PathBuf>),
    Play(VideoAsset),
    Back,
}

#[derive(Debug)]
pub struct State {
    album: Album,
    videos: Vec<VideoAsset>,
    loading: bool,
    /// A reload started while a list is already shown.
    refreshing: bool,
    preview: Option<preview::State>,
}

impl State {
    #[must_use]
    pub fn new(album: Album) -> Self {
        Self {
            album,
            videos: Vec::new(),
            loading: true,
            refreshing: false,
            preview: None,
        }
    }

    #[must_use]
    pub fn album(&self) -> &Album {
        &self.album
    }

    #[must_use]
    pub fn videos(&self) -> &[VideoAsset] {
        &self.videos
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    #[must_use]
    pub fn preview(&self) -> Option<&preview::State> {
        self.preview.as_ref()
    }

    /// The video the preview should show when it is missing or stale.
    #[must_use]
    pub fn preview_wanted(&self) -> Option<&VideoAsset> {
        let first = self.videos.first()?;
        match &self.preview {
            Some(preview) if preview.video() == first => None,
            _ => Some(first),
        }
    }

    /// Starts previewing the first video under a fresh session id.
    pub fn start_preview(&mut self, session_id: u64, settings: SessionSettings) {
        self.preview = self
            .videos
            .first()
            .cloned()
            .map(|video| preview::State::new(video, session_id, settings));
    }

    /// Releases the preview decoder while the full player is open.
    pub fn suspend_preview(&mut self) {
        if let Some(preview) = self.preview.as_mut() {
            preview.suspend();
        }
    }

    #[must_use]
    pub fn needs_tick(&self) -> bool {
        self.preview.as_ref().is_some_and(preview::State::needs_tick)
    }

    pub fn tick(&mut self, now: Instant) {
        if let Some(preview) = self.preview.as_mut() {
            preview.tick(now);
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        self.preview.as_ref().map_or_else(Subscription::none, |preview| {
            preview.subscription().map(Message::Preview)
        })
    }

    pub fn update(&mut self, message: Message) -> Effect {
        match message {
            Message::Loaded(album_id, videos) => {
                if album_id != self.album.id {
                    tracing::debug!("ignoring videos listed for {}", album_id.as_str());
                    return Effect::None;
                }
                tracing::debug!("{} videos in {}", videos.len(), self.album.title);
                self.videos = videos;
                self.loading = false;
                self.refreshing = false;
                Effect::FetchThumbnails(self.videos.iter().map(|v| v.path.clone()).collect())
            }
            Message::Refresh => {
                if self.loading || self.refreshing {
                    return Effect::None;
                }
                self.refreshing = true;
                Effect::Reload
            }
            Message::Selected(index) => self
                .videos
                .get(index)
                .cloned()
                .map_or(Effect::None, Effect::Play),
            Message::Preview(message) => {
                let Some(preview) = self.preview.as_mut() else {
                    return Effect::None;
                };
                match preview.update(message, Instant::now()) {
                    preview::Effect::None => Effect::None,
                    preview::Effect::Fullscreen(video) => Effect::Play(video),
                }
            }
            Message::Back => Effect::Back,
        }
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n, thumbnails: &ThumbnailCache) -> Element<'a, Message> {
        let back = button(text(i18n.tr("back")).size(typography::BODY))
            .style(styles::button::link)
            .on_press(Message::Back);

        let refresh_label = if self.refreshing {
            i18n.tr("videos-refreshing")
        } else {
            i18n.tr("refresh")
        };
        let refresh = button(text(refresh_label).size(typography::BODY))
            .style(styles::button::primary)
            .on_press_maybe((!self.loading && !self.refreshing).then_some(Message::Refresh));

        let header = row![
            back,
            text(i18n.tr_with_args("videos-title", &[("album", &self.album.title)]))
                .size(typography::TITLE_MD),
            Space::new().width(Length::Fill),
            refresh,
        ]
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center);

        let body: Element<'_, Message> = if self.loading {
            center(text(i18n.tr("videos-loading")).size(typography::BODY_LG)).into()
        } else if self.videos.is_empty() {
            center(text(i18n.tr("videos-empty")).size(typography::BODY_LG)).into()
        } else {
            let rows = self
                .videos
                .iter()
                .enumerate()
                .fold(Column::new().spacing(spacing::XS), |list, (index, video)| {
                    list.push(video_row(index, video, thumbnails.peek(&video.path), i18n))
                });
            let list = match &self.preview {
                Some(preview) => column![preview.view(i18n).map(Message::Preview), rows]
                    .spacing(spacing::MD),
                None => column![rows],
            };
            scrollable(list).height(Length::Fill).into()
        };

        column![header, body]
            .spacing(spacing::MD)
            .padding(spacing::LG)
            .into()
    }
}

fn video_row<'a>(
    index: usize,
    video: &'a VideoAsset,
    thumbnail: Option<&ThumbnailSlot>,
    i18n: &I18n,
) -> Element<'a, Message> {
    let preview: Element<'a, Message> = match thumbnail {
        Some(ThumbnailSlot::Ready(thumbnail)) => image(thumbnail.handle.clone())
            .content_fit(ContentFit::Cover)
            .width(Length::Fixed(sizing::THUMBNAIL_WIDTH))
            .height(Length::Fixed(sizing::THUMBNAIL_HEIGHT))
            .into(),
        Some(ThumbnailSlot::Failed) | None => container(Space::new())
            .width(Length::Fixed(sizing::THUMBNAIL_WIDTH))
            .height(Length::Fixed(sizing::THUMBNAIL_HEIGHT))
            .style(styles::container::thumbnail_placeholder)
            .into(),
    };

    let duration = format_duration_label(video.duration_ms, i18n);

    button(
        row![
            preview,
            column![
                text(&video.filename).size(typography::BODY_LG),
                text(duration).size(typography::CAPTION),
            ]
            .spacing(spacing::XXS),
        ]
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center),
    )
    .width(Length::Fill)
    .padding(spacing::XS)
    .style(styles::button::list_item)
    .on_press(Message::Selected(index))
    .into()
}

/// `M.MM min | S sec`: fractional minutes with two decimals, whole seconds.
fn format_duration_label(duration_ms: u64, i18n: &I18n) -> String {
    let (minutes, seconds) = duration_parts(duration_ms);
    i18n.tr_with_args(
        "video-duration-label",
        &[("minutes", &minutes), ("seconds", &seconds)],
    )
}

fn duration_parts(duration_ms: u64) -> (String, String) {
    let secs = duration_ms as f64 / 1000.0;
    (format!("{:.2}", secs / 60.0), format!("{}", secs.round() as u64))
}

/// Lists the album's videos off the UI thread.
///
/// The result carries the album id so a late answer for another album is
/// recognized and dropped.
pub fn load(library: Arc<dyn MediaLibrary>, album: &Album, page_size: usize) -> Task<Message> {
    let album_id = album.id.clone();
    Task::perform(
        async move {
            let listed_id = album_id.clone();
            let videos = tokio::task::spawn_blocking(move || {
                list_video_assets(library.as_ref(), &listed_id, page_size)
            })
            .await
            .unwrap_or_else(|err| {
                tracing::warn!("video listing aborted: {}", err);
                Vec::new()
            });
            (album_id, videos)
        },
        |(album_id, videos)| Message::Loaded(album_id, videos),
    )
}

/// Extracts one thumbnail off the UI thread.
pub fn load_thumbnail(path: PathBuf) -> Task<(PathBuf, ThumbnailSlot)> {
    Task::perform(
        async move {
            let source = path.clone();
            let slot = tokio::task::spawn_blocking(move || {
                extract_thumbnail(&source, THUMBNAIL_MAX_WIDTH)
            })
            .await
            .map_err(|err| err.to_string())
            .and_then(|result| result.map_err(|err| err.to_string()));

            let slot = match slot {
                Ok(thumbnail) => ThumbnailSlot::Ready(thumbnail),
                Err(err) => {
                    tracing::debug!("no thumbnail for {}: {}", path.display(), err);
                    ThumbnailSlot::Failed
                }
            };
            (path, slot)
        },
        |loaded| loaded,
    )
}
