// SPDX-License-Identifier: MPL-2.0
//! Slider styles for the player's seek bar and volume control.

use crate::ui::design_tokens::{opacity, palette};
use iced::widget::slider;
use iced::{Background, Border, Color, Theme};

/// Seek and volume sliders drawn over the video: accent fill, light rail.
pub fn on_video(_theme: &Theme, status: slider::Status) -> slider::Style {
    let handle_radius = match status {
        slider::Status::Hovered | slider::Status::Dragged => 8.0,
        slider::Status::Active => 6.0,
    };

    slider::Style {
        rail: slider::Rail {
            backgrounds: (
                Background::Color(palette::ACCENT_500),
                Background::Color(Color {
                    a: opacity::OVERLAY_STRONG,
                    ..palette::WHITE
                }),
            ),
            width: 4.0,
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: 2.0.into(),
            },
        },
        handle: slider::Handle {
            shape: slider::HandleShape::Circle {
                radius: handle_radius,
            },
            background: Background::Color(palette::ACCENT_500),
            border_width: 0.0,
            border_color: Color::TRANSPARENT,
        },
    }
}
