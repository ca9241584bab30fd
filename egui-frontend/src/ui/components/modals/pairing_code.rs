//! # Pairing Code Dialog
//!
//! Shows the patient's pairing code, `<patient id>|<otp>`, for a caregiver to
//! scan or type into their add-patient dialog.

use eframe::egui;

use super::shared::{show_modal, status_line};
use crate::ui::components::styling::{primary_button, secondary_button};
use crate::ui::components::theme::colors;
use crate::ui::state::{ActiveModal, PartnerScreenState};

pub fn render(ctx: &egui::Context, state: &mut PartnerScreenState) {
    let ActiveModal::PairingCode { code, loading, error } = state.modal() else {
        return;
    };
    let (code, loading, error) = (code.clone(), *loading, error.clone());

    let mut close = false;
    show_modal(ctx, "pairing_code_modal", "My Pairing Code", colors::PRIMARY, |ui| {
        ui.label(
            egui::RichText::new("Show this code to your caregiver so they can add you as a patient.")
                .color(colors::TEXT_PRIMARY),
        );
        ui.add_space(12.0);

        if let Some(code) = &code {
            egui::Frame::none()
                .fill(colors::INACTIVE_BACKGROUND)
                .stroke(egui::Stroke::new(1.0, colors::CARD_BORDER))
                .rounding(egui::Rounding::same(8.0))
                .inner_margin(egui::Margin::same(12.0))
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(code).font(egui::FontId::monospace(20.0)).strong());
                });
            ui.add_space(6.0);
            if ui.add(secondary_button("Copy")).clicked() {
                ui.output_mut(|o| o.copied_text = code.clone());
            }
        }

        status_line(ui, loading, "Requesting code...", error.as_deref());
        ui.add_space(12.0);
        close = ui.add(primary_button("Done")).clicked();
    });

    if close {
        state.dismiss();
    }
}
