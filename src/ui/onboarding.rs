// SPDX-License-Identifier: MPL-2.0
//! First-run onboarding slides.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, column, container, row, text, Space};
use iced::{alignment, Element, Length};

/// Title and body keys of each slide, in order.
const SLIDES: [(&str, &str); 3] = [
    ("onboarding-welcome-title", "onboarding-welcome-text"),
    ("onboarding-organized-title", "onboarding-organized-text"),
    ("onboarding-playback-title", "onboarding-playback-text"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The last slide was confirmed.
    Finish,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct State {
    slide: usize,
}

impl State {
    #[must_use]
    pub fn slide(&self) -> usize {
        self.slide
    }

    #[must_use]
    pub fn is_last_slide(&self) -> bool {
        self.slide + 1 >= SLIDES.len()
    }

    pub fn update(&mut self, message: Message) -> Effect {
        match message {
            Message::Next if self.is_last_slide() => Effect::Finish,
            Message::Next => {
                self.slide += 1;
                Effect::None
            }
        }
    }

    pub fn view<'a>(&self, i18n: &'a I18n) -> Element<'a, Message> {
        let (title_key, text_key) = SLIDES[self.slide.min(SLIDES.len() - 1)];

        let dots = SLIDES.iter().enumerate().fold(
            row![].spacing(spacing::XS),
            |dots, (index, _)| {
                let color = if index == self.slide {
                    palette::BRAND_500
                } else {
                    palette::GRAY_400
                };
                dots.push(text("●").size(typography::CAPTION).color(color))
            },
        );

        let action_key = if self.is_last_slide() {
            "onboarding-finish"
        } else {
            "onboarding-next"
        };
        let action = button(
            text(i18n.tr(action_key))
                .size(typography::BODY_LG)
                .align_x(alignment::Horizontal::Center),
        )
        .width(Length::Fill)
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .style(styles::button::primary)
        .on_press(Message::Next);

        let content = column![
            Space::new().height(Length::Fill),
            text(i18n.tr(title_key)).size(typography::TITLE_LG),
            text(i18n.tr(text_key)).size(typography::BODY_LG),
            Space::new().height(Length::Fill),
            dots,
            action,
        ]
        .spacing(spacing::LG)
        .align_x(alignment::Horizontal::Center)
        .max_width(sizing::CONTENT_MAX_WIDTH);

        container(content)
            .center_x(Length::Fill)
            .height(Length::Fill)
            .padding(spacing::XL)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_walks_through_slides_then_finishes() {
        let mut state = State::default();
        assert_eq!(state.update(Message::Next), Effect::None);
        assert_eq!(state.slide(), 1);
        assert_eq!(state.update(Message::Next), Effect::None);
        assert!(state.is_last_slide());
        assert_eq!(state.update(Message::Next), Effect::Finish);
        assert_eq!(state.slide(), 2);
    }
}
