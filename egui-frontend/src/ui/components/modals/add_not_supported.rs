//! Explanation shown when a patient presses the add button.

use eframe::egui;

use super::shared::show_modal;
use crate::ui::components::styling::primary_button;
use crate::ui::components::theme::colors;
use crate::ui::state::{PartnerScreenState, CANNOT_ADD_CAREGIVER_MESSAGE};

pub fn render(ctx: &egui::Context, state: &mut PartnerScreenState) {
    let mut ok = false;
    show_modal(ctx, "add_not_supported_modal", "Add Caregiver", colors::PRIMARY, |ui| {
        ui.label(egui::RichText::new(CANNOT_ADD_CAREGIVER_MESSAGE).color(colors::TEXT_PRIMARY));
        ui.add_space(14.0);
        ok = ui.add(primary_button("OK")).clicked();
    });

    if ok {
        state.dismiss();
    }
}
