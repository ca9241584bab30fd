//! # OTP Dialog
//!
//! One-time password entry, shared by the patient removing a caregiver and
//! the caregiver adding a patient. The code is capped at six characters and a
//! failed attempt keeps it in the field for a retry.

use eframe::egui;

use super::shared::{button_row, show_modal, status_line};
use crate::ui::app_coordinator::FrameActions;
use crate::ui::components::styling::primary_button;
use crate::ui::components::theme::colors;
use crate::ui::state::{ActiveModal, PartnerScreenState, OTP_MAX_LEN};

pub fn render(ctx: &egui::Context, state: &mut PartnerScreenState, actions: &mut FrameActions) {
    let (prompt, loading_text, removal) = match state.modal() {
        ActiveModal::RemovalOtp { partner, .. } => (
            format!("Enter the one-time password sent to confirm removing {}.", partner.name),
            "Removing...",
            true,
        ),
        ActiveModal::AddOtp { .. } => (
            "Enter the one-time password sent to the patient.".to_string(),
            "Adding patient...",
            false,
        ),
        _ => return,
    };

    let mut submit = false;
    let mut cancel = false;
    let Some(form) = state.otp_form_mut() else {
        return;
    };

    show_modal(ctx, "otp_modal", "Enter OTP", colors::PRIMARY, |ui| {
        ui.label(egui::RichText::new(prompt).color(colors::TEXT_PRIMARY));
        ui.add_space(10.0);

        let response = ui.add_enabled(
            !form.loading,
            egui::TextEdit::singleline(&mut form.code)
                .char_limit(OTP_MAX_LEN)
                .hint_text("123456")
                .font(egui::FontId::monospace(22.0))
                .horizontal_align(egui::Align::Center)
                .desired_width(160.0),
        );
        if !form.loading && form.code.is_empty() {
            response.request_focus();
        }
        let entered = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        ui.add_space(6.0);
        status_line(ui, form.loading, loading_text, form.error.as_deref());
        ui.add_space(10.0);

        let (clicked, cancelled) = button_row(ui, primary_button("Submit"), form.can_submit(), "Cancel");
        submit = clicked || (entered && form.can_submit());
        cancel = cancelled;
    });

    if submit {
        let command = if removal {
            state.submit_removal_otp()
        } else {
            state.submit_add_otp()
        };
        actions.push(command);
    } else if cancel {
        state.dismiss();
    }
}
