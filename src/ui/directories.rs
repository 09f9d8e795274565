// SPDX-License-Identifier: MPL-2.0
//! Album list: "Your Video Collections".

use crate::i18n::fluent::I18n;
use crate::media::{list_albums_with_videos, Album, MediaLibrary};
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles;
use iced::widget::{button, center, column, row, scrollable, text, Column, Space};
use iced::{alignment, Element, Length, Task};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum Message {
    Loaded(Vec<Album>),
    Refresh,
    Selected(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Start a new scan of the library.
    Reload,
    Open(Album),
}

#[derive(Debug, Clone)]
pub struct State {
    albums: Vec<Album>,
    loading: bool,
}

impl Default for State {
    fn default() -> Self {
        Self {
            albums: Vec::new(),
            loading: true,
        }
    }
}

impl State {
    #[must_use]
    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn update(&mut self, message: Message) -> Effect {
        match message {
            Message::Loaded(albums) => {
                tracing::debug!("{} albums with videos", albums.len());
                self.albums = albums;
                self.loading = false;
                Effect::None
            }
            Message::Refresh => {
                if self.loading {
                    return Effect::None;
                }
                self.loading = true;
                Effect::Reload
            }
            Message::Selected(index) => self
                .albums
                .get(index)
                .cloned()
                .map_or(Effect::None, Effect::Open),
        }
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let refresh = button(text(i18n.tr("refresh")).size(typography::BODY))
            .style(styles::button::primary)
            .on_press_maybe((!self.loading).then_some(Message::Refresh));

        let header = row![
            text(i18n.tr("directories-title")).size(typography::TITLE_LG),
            Space::new().width(Length::Fill),
            refresh,
        ]
        .align_y(alignment::Vertical::Center);

        let body: Element<'_, Message> = if self.loading && self.albums.is_empty() {
            center(text(i18n.tr("directories-loading")).size(typography::BODY_LG)).into()
        } else if self.albums.is_empty() {
            center(text(i18n.tr("directories-empty")).size(typography::BODY_LG)).into()
        } else {
            let rows = self
                .albums
                .iter()
                .enumerate()
                .fold(Column::new().spacing(spacing::XS), |list, (index, album)| {
                    list.push(album_row(index, album, i18n))
                });
            scrollable(rows).height(Length::Fill).into()
        };

        column![header, body]
            .spacing(spacing::MD)
            .padding(spacing::LG)
            .into()
    }
}

fn album_row<'a>(index: usize, album: &'a Album, i18n: &I18n) -> Element<'a, Message> {
    let count = i18n.tr_with_args(
        "album-video-count",
        &[("count", &album.asset_count.to_string())],
    );

    button(
        column![
            text(&album.title).size(typography::BODY_LG),
            text(count).size(typography::CAPTION),
        ]
        .spacing(spacing::XXS),
    )
    .width(Length::Fill)
    .padding(spacing::SM)
    .style(styles::button::list_item)
    .on_press(Message::Selected(index))
    .into()
}

/// Scans the library off the UI thread.
pub fn load(library: Arc<dyn MediaLibrary>) -> Task<Message> {
    Task::perform(
        async move {
            tokio::task::spawn_blocking(move || list_albums_with_videos(library.as_ref()))
                .await
                .unwrap_or_else(|err| {
                    tracing::warn!("album scan aborted: {}", err);
                    Vec::new()
                })
        },
        Message::Loaded,
    )
}
