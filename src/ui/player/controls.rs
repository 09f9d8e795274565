// SPDX-License-Identifier: MPL-2.0
//! Transport overlay drawn on top of the video surface.

use super::Message;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{opacity, palette::WHITE, sizing, spacing, typography};
use crate::ui::styles;
use crate::video_player::{DecoderCommandSender, PlaybackSession};
use iced::widget::{button, column, container, row, slider, text, Space};
use iced::{alignment, Element, Length};

/// Slider step in seconds (1 ms precision).
const SEEK_STEP_SECS: f64 = 0.001;

pub(super) fn overlay<'a>(
    session: &PlaybackSession<DecoderCommandSender>,
    i18n: &'a I18n,
) -> Element<'a, Message> {
    let back = button(text(i18n.tr("back")).size(typography::BODY))
        .padding([spacing::XS, spacing::MD])
        .style(styles::button::overlay(
            WHITE,
            opacity::OVERLAY_MEDIUM,
            opacity::OVERLAY_STRONG,
        ))
        .on_press(Message::Back);

    let skip_secs = session.skip_step().value().to_string();
    let play_label = if session.is_playing() {
        i18n.tr("player-pause")
    } else {
        i18n.tr("player-play")
    };

    let transport = row![
        transport_button(
            i18n.tr_with_args("player-skip-back", &[("seconds", &skip_secs)]),
            Message::SkipBackward,
        ),
        transport_button(play_label, Message::TogglePlayPause),
        transport_button(
            i18n.tr_with_args("player-skip-forward", &[("seconds", &skip_secs)]),
            Message::SkipForward,
        ),
    ]
    .spacing(spacing::XL)
    .align_y(alignment::Vertical::Center);

    let content = column![
        row![back, Space::new().width(Length::Fill)],
        Space::new().height(Length::Fill),
        container(transport).center_x(Length::Fill),
        Space::new().height(Length::Fill),
        seek_bar(session, i18n),
        volume_row(session, i18n),
    ]
    .spacing(spacing::SM)
    .padding(spacing::LG);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(styles::container::overlay_scrim)
        .into()
}

fn transport_button<'a>(label: String, message: Message) -> Element<'a, Message> {
    button(
        container(text(label).size(typography::BODY_LG))
            .center_x(Length::Fill)
            .center_y(Length::Fill),
    )
    .width(Length::Fixed(sizing::TRANSPORT_BUTTON * 1.5))
    .height(Length::Fixed(sizing::TRANSPORT_BUTTON))
    .style(styles::button::overlay(
        WHITE,
        opacity::OVERLAY_MEDIUM,
        opacity::OVERLAY_STRONG,
    ))
    .on_press(message)
    .into()
}

fn seek_bar<'a>(
    session: &PlaybackSession<DecoderCommandSender>,
    i18n: &'a I18n,
) -> Element<'a, Message> {
    let position_secs = session.displayed_position_ms() as f64 / 1000.0;
    let duration_secs = session.duration_ms() as f64 / 1000.0;

    let bar = slider(0.0..=duration_secs, position_secs, Message::SeekPreview)
        .on_release(Message::SeekCommit)
        .step(SEEK_STEP_SECS)
        .style(styles::slider::on_video);

    let label = time_label(session.displayed_position_ms(), session.duration_ms(), i18n);

    row![bar, text(label).size(typography::CAPTION)]
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .into()
}

fn volume_row<'a>(
    session: &PlaybackSession<DecoderCommandSender>,
    i18n: &'a I18n,
) -> Element<'a, Message> {
    let volume = session.volume();
    row![
        text(i18n.tr("player-volume")).size(typography::CAPTION),
        slider(0.0..=1.0, volume.value(), Message::VolumeChanged)
            .step(0.01)
            .width(Length::Fixed(sizing::VOLUME_SLIDER_WIDTH))
            .style(styles::slider::on_video),
        text(format!("{}%", volume.percent())).size(typography::CAPTION),
    ]
    .spacing(spacing::XS)
    .align_y(alignment::Vertical::Center)
    .into()
}

/// "2x" pill shown in the top-right corner while the speed boost is held.
pub(super) fn speed_badge(i18n: &I18n) -> Element<'_, Message> {
    let badge = container(text(i18n.tr("player-2x")).size(typography::BADGE))
        .padding([spacing::XXS, spacing::XS])
        .style(styles::container::badge);

    container(badge)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Right)
        .align_y(alignment::Vertical::Top)
        .padding(spacing::LG)
        .into()
}

/// `Ns / Ms` in whole seconds.
fn time_label(position_ms: u64, duration_ms: u64, i18n: &I18n) -> String {
    i18n.tr_with_args(
        "player-time-label",
        &[
            ("position", &(position_ms / 1000).to_string()),
            ("duration", &(duration_ms / 1000).to_string()),
        ],
    )
}
