//! # Shared Modal Utilities
//!
//! Overlay, frame and button row used by every partner-screen dialog.

use eframe::egui;

use crate::ui::components::styling::{error_label, secondary_button};
use crate::ui::components::theme::colors;

pub const MODAL_WIDTH: f32 = 420.0;

/// Dim the screen and show a centered dialog with `title` above `add_contents`
pub fn show_modal(ctx: &egui::Context, id: &str, title: &str, accent: egui::Color32, add_contents: impl FnOnce(&mut egui::Ui)) {
    // backdrop also swallows clicks meant for the list underneath
    egui::Area::new(egui::Id::new(format!("{}_backdrop", id)))
        .order(egui::Order::Middle)
        .fixed_pos(egui::Pos2::ZERO)
        .show(ctx, |ui| {
            let screen_rect = ctx.screen_rect();
            ui.allocate_rect(screen_rect, egui::Sense::click());
            ui.painter()
                .rect_filled(screen_rect, egui::Rounding::ZERO, colors::OVERLAY);
        });

    egui::Area::new(egui::Id::new(id))
        .order(egui::Order::Foreground)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            egui::Frame::window(ui.style())
                .fill(colors::CARD_BACKGROUND)
                .stroke(egui::Stroke::new(2.0, accent))
                .rounding(egui::Rounding::same(14.0))
                .inner_margin(egui::Margin::same(20.0))
                .show(ui, |ui| {
                    ui.set_width(MODAL_WIDTH);
                    ui.vertical_centered(|ui| {
                        ui.label(egui::RichText::new(title).size(22.0).strong().color(accent));
                        ui.add_space(12.0);
                        add_contents(ui);
                    });
                });
        });
}

/// Inline error, or a spinner with `loading_text` while a request is in flight
pub fn status_line(ui: &mut egui::Ui, loading: bool, loading_text: &str, error: Option<&str>) {
    if loading {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(egui::RichText::new(loading_text).color(colors::TEXT_SECONDARY));
        });
    } else if let Some(error) = error {
        error_label(ui, error);
    }
}

/// Centered row with a cancel button and the dialog's primary button.
/// Returns `(primary_clicked, cancel_clicked)`.
pub fn button_row(ui: &mut egui::Ui, primary: egui::Button<'static>, primary_enabled: bool, cancel_label: &str) -> (bool, bool) {
    let mut primary_clicked = false;
    let mut cancel_clicked = false;
    ui.horizontal(|ui| {
        let spacing = ui.spacing().item_spacing.x;
        let offset = ((ui.available_width() - 2.0 * 110.0 - spacing) / 2.0).max(0.0);
        ui.add_space(offset);
        cancel_clicked = ui.add(secondary_button(cancel_label)).clicked();
        primary_clicked = ui.add_enabled(primary_enabled, primary).clicked();
    });
    (primary_clicked, cancel_clicked)
}
