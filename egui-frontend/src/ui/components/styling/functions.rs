//! # Styling Functions
//!
//! Drawing utilities and button builders used across the client.

use eframe::egui;

use super::super::theme::{colors, CURRENT_THEME};

/// Configure the global egui style for the MindTrace client
pub fn setup_mindtrace_style(ctx: &egui::Context) {
    ctx.set_style({
        let mut style = (*ctx.style()).clone();

        // panels stay transparent so the gradient shows through
        style.visuals.window_fill = egui::Color32::TRANSPARENT;
        style.visuals.panel_fill = egui::Color32::TRANSPARENT;
        style.visuals.button_frame = true;

        // egui 0.28 draws text edits with extreme_bg_color
        style.visuals.extreme_bg_color = CURRENT_THEME.interactive.inactive_background;
        style.visuals.override_text_color = Some(colors::TEXT_PRIMARY);

        style.text_styles.insert(
            egui::TextStyle::Heading,
            egui::FontId::new(26.0, egui::FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Body,
            egui::FontId::new(16.0, egui::FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Button,
            egui::FontId::new(16.0, egui::FontFamily::Proportional),
        );

        style.spacing.button_padding = egui::vec2(12.0, 8.0);
        style.spacing.item_spacing = egui::vec2(8.0, 8.0);
        style.visuals.widgets.inactive.rounding = egui::Rounding::same(8.0);
        style.visuals.widgets.active.rounding = egui::Rounding::same(8.0);
        style.visuals.widgets.hovered.rounding = egui::Rounding::same(8.0);
        style.visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.5, colors::HOVER_BORDER);
        style.visuals.widgets.hovered.weak_bg_fill = CURRENT_THEME.interactive.hover_background;

        style
    });
}

/// Vertical gradient from the theme's top to bottom background color
pub fn draw_background(ui: &mut egui::Ui, rect: egui::Rect) {
    let top = CURRENT_THEME.layout.background_top;
    let bottom = CURRENT_THEME.layout.background_bottom;

    let mut mesh = egui::Mesh::default();
    mesh.colored_vertex(rect.left_top(), top);
    mesh.colored_vertex(rect.right_top(), top);
    mesh.colored_vertex(rect.left_bottom(), bottom);
    mesh.colored_vertex(rect.right_bottom(), bottom);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(1, 2, 3);
    ui.painter().add(egui::Shape::mesh(mesh));
}

/// White card with a subtle offset shadow
pub fn draw_card_container(ui: &mut egui::Ui, rect: egui::Rect, rounding: f32) {
    let painter = ui.painter();

    let shadow_rect = egui::Rect::from_min_size(rect.min + egui::vec2(2.0, 2.0), rect.size());
    painter.rect_filled(shadow_rect, egui::Rounding::same(rounding), colors::CARD_SHADOW);
    painter.rect_filled(rect, egui::Rounding::same(rounding), colors::CARD_BACKGROUND);
}

/// Filled button in the primary color
pub fn primary_button(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.into()).color(colors::PRIMARY_TEXT).strong())
        .fill(colors::PRIMARY)
        .rounding(egui::Rounding::same(8.0))
        .min_size(egui::vec2(110.0, 36.0))
}

/// Outlined button for cancel and back actions
pub fn secondary_button(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.into()).color(colors::TEXT_PRIMARY))
        .fill(colors::CARD_BACKGROUND)
        .stroke(egui::Stroke::new(1.5, colors::BUTTON_BORDER))
        .rounding(egui::Rounding::same(8.0))
        .min_size(egui::vec2(110.0, 36.0))
}

/// Filled red button for destructive actions
pub fn danger_button(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.into()).color(colors::TEXT_WHITE).strong())
        .fill(colors::DANGER)
        .rounding(egui::Rounding::same(8.0))
        .min_size(egui::vec2(110.0, 36.0))
}

/// Inline error text under a form
pub fn error_label(ui: &mut egui::Ui, message: &str) {
    ui.label(egui::RichText::new(message).color(colors::DANGER).size(14.0));
}
