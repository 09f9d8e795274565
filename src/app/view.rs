// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.

use super::{Message, Route};
use crate::i18n::fluent::I18n;
use crate::media::ThumbnailCache;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::{directories, onboarding, player, styles, videos};
use iced::widget::{button, container, row, text, Column, Space};
use iced::{alignment, Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub route: &'a Route,
    pub onboarding: &'a onboarding::State,
    pub directories: &'a directories::State,
    pub videos: Option<&'a videos::State>,
    pub player: Option<&'a player::State>,
    pub thumbnails: &'a ThumbnailCache,
    /// i18n key of the oldest pending warning.
    pub warning: Option<&'a str>,
}

/// Renders the screen on top of the navigation stack.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let current_view: Element<'_, Message> = match ctx.route {
        Route::Onboarding => ctx.onboarding.view(ctx.i18n).map(Message::Onboarding),
        Route::Directories => ctx.directories.view(ctx.i18n).map(Message::Directories),
        Route::Videos { .. } => match ctx.videos {
            Some(videos) => videos.view(ctx.i18n, ctx.thumbnails).map(Message::Videos),
            None => Space::new().into(),
        },
        // The player is immersive: no warning banner on top of the video.
        Route::Player { .. } => {
            return match ctx.player {
                Some(player) => player.view(ctx.i18n).map(Message::Player),
                None => Space::new().into(),
            };
        }
    };

    let mut column = Column::new();
    if let Some(key) = ctx.warning {
        column = column.push(warning_banner(ctx.i18n, key));
    }
    column = column.push(
        container(current_view)
            .width(Length::Fill)
            .height(Length::Fill),
    );

    container(column.width(Length::Fill).height(Length::Fill))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn warning_banner<'a>(i18n: &'a I18n, key: &str) -> Element<'a, Message> {
    let dismiss = button(text(i18n.tr("notification-dismiss")).size(typography::CAPTION))
        .style(styles::button::link)
        .on_press(Message::DismissWarning);

    container(
        row![
            text(i18n.tr(key)).size(typography::BODY),
            Space::new().width(Length::Fill),
            dismiss,
        ]
        .align_y(alignment::Vertical::Center),
    )
    .width(Length::Fill)
    .padding([spacing::XS, spacing::MD])
    .style(styles::container::warning_banner)
    .into()
}
