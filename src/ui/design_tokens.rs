// SPDX-License-Identifier: MPL-2.0
//! Visual constants shared by every screen.
//!
//! Styles and layouts take colors, spacing and sizes from here rather than
//! hard-coding them, so the gallery, lists and player stay consistent.
//!
//! ```
//! use iced::Color;
//! use vidgallery::ui::design_tokens::{opacity, palette, spacing};
//!
//! let scrim = Color { a: opacity::OVERLAY_MEDIUM, ..palette::BLACK };
//! assert_eq!(spacing::MD, 16.0);
//! # let _ = scrim;
//! ```

use iced::Color;

pub mod palette {
    use super::Color;

    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_400: Color = Color::from_rgb(0.47, 0.47, 0.47);
    pub const GRAY_200: Color = Color::from_rgb(0.75, 0.75, 0.75);

    /// Onboarding background.
    pub const BRAND_500: Color = Color::from_rgb(0.369, 0.090, 0.922);

    pub const PRIMARY_400: Color = Color::from_rgb(0.2, 0.58, 1.0);
    pub const PRIMARY_500: Color = Color::from_rgb(0.0, 0.482, 1.0);
    pub const PRIMARY_600: Color = Color::from_rgb(0.0, 0.4, 0.85);

    /// Played portion of the seek bar.
    pub const ACCENT_500: Color = Color::from_rgb(0.898, 0.035, 0.078);

    pub const WARNING_500: Color = Color::from_rgb(0.945, 0.651, 0.125);
}

/// Alpha values for layers drawn over video.
pub mod opacity {
    pub const OVERLAY_MEDIUM: f32 = 0.4;
    pub const OVERLAY_STRONG: f32 = 0.7;
    pub const OVERLAY_PRESSED: f32 = 0.9;
}

/// 4px-based spacing scale.
pub mod spacing {
    pub const XXS: f32 = 4.0;
    pub const XS: f32 = 8.0;
    pub const SM: f32 = 12.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;
    pub const XL: f32 = 32.0;
}

pub mod sizing {
    pub const BUTTON_HEIGHT: f32 = 36.0;
    pub const THUMBNAIL_WIDTH: f32 = 120.0;
    pub const THUMBNAIL_HEIGHT: f32 = 68.0;
    /// Round transport buttons on the player overlay.
    pub const TRANSPORT_BUTTON: f32 = 56.0;
    pub const VOLUME_SLIDER_WIDTH: f32 = 140.0;
    /// Inline preview above the video list.
    pub const PREVIEW_HEIGHT: f32 = 220.0;
    /// Lists stop growing past this width on wide windows.
    pub const CONTENT_MAX_WIDTH: f32 = 720.0;
}

pub mod typography {
    pub const TITLE_LG: f32 = 28.0;
    pub const TITLE_MD: f32 = 20.0;
    pub const BODY_LG: f32 = 16.0;
    pub const BODY: f32 = 14.0;
    pub const CAPTION: f32 = 12.0;
    pub const BADGE: f32 = 10.0;
}

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
    /// Large enough to turn any button into a pill or circle.
    pub const FULL: f32 = 9999.0;
}

pub mod shadow {
    use super::palette;
    use iced::{Shadow, Vector};

    pub const NONE: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector::ZERO,
        blur_radius: 0.0,
    };

    pub const SM: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 2.0 },
        blur_radius: 4.0,
    };
}

const _: () = {
    assert!(spacing::XXS < spacing::XS);
    assert!(spacing::XS < spacing::SM);
    assert!(spacing::SM < spacing::MD);
    assert!(spacing::MD < spacing::LG);
    assert!(spacing::LG < spacing::XL);

    assert!(opacity::OVERLAY_MEDIUM < opacity::OVERLAY_STRONG);
    assert!(opacity::OVERLAY_STRONG < opacity::OVERLAY_PRESSED);
    assert!(opacity::OVERLAY_PRESSED <= 1.0);

    assert!(typography::BADGE < typography::CAPTION);
    assert!(typography::CAPTION < typography::BODY);
    assert!(typography::BODY < typography::BODY_LG);
    assert!(typography::BODY_LG < typography::TITLE_MD);
    assert!(typography::TITLE_MD < typography::TITLE_LG);

    // Thumbnails are landscape tiles.
    assert!(sizing::THUMBNAIL_WIDTH > sizing::THUMBNAIL_HEIGHT);
};
