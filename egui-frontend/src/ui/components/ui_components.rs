//! # UI Components Module
//!
//! Small reusable widgets: avatars, badges and the centered loading/empty
//! placeholders.

use eframe::egui;
use shared::Gender;

use crate::ui::components::theme::{colors, CURRENT_THEME};

/// Round avatar. Shows `picture_url` once it has loaded through the image
/// loaders; until then, or when it cannot be loaded, draws initials on a color
/// chosen by gender.
pub fn draw_avatar(ui: &mut egui::Ui, initials: &str, gender: Gender, picture_url: Option<&str>, size: f32) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());

    if let Some(url) = picture_url.filter(|u| !u.trim().is_empty()) {
        let image = egui::Image::new(url.to_string())
            .fit_to_exact_size(rect.size())
            .rounding(size / 2.0);
        if let Ok(egui::load::TexturePoll::Ready { .. }) = image.load_for_size(ui.ctx(), rect.size()) {
            image.paint_at(ui, rect);
            return response;
        }
    }

    let painter = ui.painter();
    painter.circle_filled(rect.center(), size / 2.0, CURRENT_THEME.avatar_color(gender));
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        initials,
        egui::FontId::proportional(size * 0.4),
        colors::TEXT_WHITE,
    );
    response
}

/// Small rounded label such as "REMOVED" or a role name
pub fn draw_badge(ui: &mut egui::Ui, text: &str, fill: egui::Color32, text_color: egui::Color32) {
    egui::Frame::none()
        .fill(fill)
        .rounding(egui::Rounding::same(10.0))
        .inner_margin(egui::Margin::symmetric(8.0, 2.0))
        .show(ui, |ui| {
            ui.add(
                egui::Label::new(egui::RichText::new(text).size(12.0).strong().color(text_color)).selectable(false),
            );
        });
}

pub fn render_loading_placeholder(ui: &mut egui::Ui, text: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(80.0);
        ui.spinner();
        ui.label(egui::RichText::new(text).color(colors::TEXT_SECONDARY));
    });
}

/// Centered icon, heading and hint for empty lists
pub fn render_empty_placeholder(ui: &mut egui::Ui, icon: &str, heading: &str, hint: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.label(egui::RichText::new(icon).size(48.0));
        ui.add_space(8.0);
        ui.label(egui::RichText::new(heading).size(22.0).strong().color(colors::TEXT_HEADING));
        ui.label(egui::RichText::new(hint).color(colors::TEXT_SECONDARY));
    });
}
