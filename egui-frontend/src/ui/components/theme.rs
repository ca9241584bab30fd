//! # Theme Configuration
//!
//! Centralized colors for the MindTrace client. Drawing code should use these
//! constants instead of inline `Color32` values.
//!
//! ## Usage
//! ```rust,ignore
//! use crate::ui::components::theme::{colors, CURRENT_THEME};
//!
//! let border = CURRENT_THEME.interactive.hover_border;
//! let danger = colors::DANGER;
//! ```

use eframe::egui::Color32;
use shared::Gender;

/// Main theme configuration structure
#[derive(Debug, Clone)]
pub struct Theme {
    /// Buttons, toggles and the floating action button
    pub interactive: InteractiveColors,
    /// Background and card colors
    pub layout: LayoutColors,
    pub typography: TypographyColors,
    /// Error, success and removed-partner colors
    pub status: StatusColors,
    /// Avatar fill per gender
    pub avatar: AvatarColors,
}

#[derive(Debug, Clone)]
pub struct InteractiveColors {
    pub hover_border: Color32,
    pub hover_background: Color32,
    pub primary: Color32,
    pub primary_text: Color32,
    pub inactive_background: Color32,
    pub button_border: Color32,
}

#[derive(Debug, Clone)]
pub struct LayoutColors {
    pub background_top: Color32,
    pub background_bottom: Color32,
    pub header_background: Color32,
    pub card_background: Color32,
    pub card_shadow: Color32,
    pub card_border: Color32,
    pub overlay: Color32,
}

#[derive(Debug, Clone)]
pub struct TypographyColors {
    pub primary: Color32,
    pub secondary: Color32,
    pub heading: Color32,
    pub white: Color32,
}

#[derive(Debug, Clone)]
pub struct StatusColors {
    pub danger: Color32,
    pub success: Color32,
    /// Text and border of partners that have been removed
    pub removed: Color32,
    pub removed_background: Color32,
}

#[derive(Debug, Clone)]
pub struct AvatarColors {
    pub male: Color32,
    pub female: Color32,
    pub other: Color32,
}

/// The active theme: calm teal accents on a light background
pub const CURRENT_THEME: Theme = Theme {
    interactive: InteractiveColors {
        hover_border: Color32::from_rgb(38, 166, 154),
        hover_background: Color32::from_rgba_premultiplied(255, 255, 255, 20),
        primary: Color32::from_rgb(0, 121, 107),
        primary_text: Color32::WHITE,
        inactive_background: Color32::from_rgb(245, 247, 247),
        button_border: Color32::from_rgb(210, 220, 220),
    },
    layout: LayoutColors {
        background_top: Color32::from_rgb(224, 242, 241),
        background_bottom: Color32::from_rgb(243, 246, 250),
        header_background: Color32::from_rgb(0, 105, 92),
        card_background: Color32::WHITE,
        card_shadow: Color32::from_rgba_premultiplied(0, 0, 0, 20),
        card_border: Color32::from_rgb(220, 226, 226),
        overlay: Color32::from_rgba_premultiplied(0, 0, 0, 128),
    },
    typography: TypographyColors {
        primary: Color32::from_rgb(45, 55, 60),
        secondary: Color32::from_rgb(100, 110, 115),
        heading: Color32::from_rgb(0, 77, 64),
        white: Color32::WHITE,
    },
    status: StatusColors {
        danger: Color32::from_rgb(211, 47, 47),
        success: Color32::from_rgb(56, 142, 60),
        removed: Color32::from_rgb(150, 150, 150),
        removed_background: Color32::from_rgb(240, 240, 240),
    },
    avatar: AvatarColors {
        male: Color32::from_rgb(100, 149, 237),
        female: Color32::from_rgb(236, 112, 160),
        other: Color32::from_rgb(149, 117, 205),
    },
};

impl Theme {
    pub fn avatar_color(&self, gender: Gender) -> Color32 {
        match gender {
            Gender::Male => self.avatar.male,
            Gender::Female => self.avatar.female,
            Gender::Other | Gender::Unspecified => self.avatar.other,
        }
    }
}

/// Convenience constants for the most commonly used colors
pub mod colors {
    use super::CURRENT_THEME;
    use eframe::egui::Color32;

    pub const HOVER_BORDER: Color32 = CURRENT_THEME.interactive.hover_border;
    pub const PRIMARY: Color32 = CURRENT_THEME.interactive.primary;
    pub const PRIMARY_TEXT: Color32 = CURRENT_THEME.interactive.primary_text;
    pub const INACTIVE_BACKGROUND: Color32 = CURRENT_THEME.interactive.inactive_background;
    pub const BUTTON_BORDER: Color32 = CURRENT_THEME.interactive.button_border;

    pub const TEXT_PRIMARY: Color32 = CURRENT_THEME.typography.primary;
    pub const TEXT_SECONDARY: Color32 = CURRENT_THEME.typography.secondary;
    pub const TEXT_HEADING: Color32 = CURRENT_THEME.typography.heading;
    pub const TEXT_WHITE: Color32 = CURRENT_THEME.typography.white;

    pub const HEADER_BACKGROUND: Color32 = CURRENT_THEME.layout.header_background;
    pub const CARD_BACKGROUND: Color32 = CURRENT_THEME.layout.card_background;
    pub const CARD_SHADOW: Color32 = CURRENT_THEME.layout.card_shadow;
    pub const CARD_BORDER: Color32 = CURRENT_THEME.layout.card_border;
    pub const OVERLAY: Color32 = CURRENT_THEME.layout.overlay;

    pub const DANGER: Color32 = CURRENT_THEME.status.danger;
    pub const SUCCESS: Color32 = CURRENT_THEME.status.success;
    pub const REMOVED: Color32 = CURRENT_THEME.status.removed;
    pub const REMOVED_BACKGROUND: Color32 = CURRENT_THEME.status.removed_background;
}
