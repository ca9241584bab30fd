//! Delete confirmation dialog. For patients the confirm button only sends the
//! removal OTP; the caregiver is removed from the OTP dialog.

use eframe::egui;

use super::shared::{button_row, show_modal, status_line};
use crate::ui::app_coordinator::FrameActions;
use crate::ui::components::styling::danger_button;
use crate::ui::components::theme::colors;
use crate::ui::state::{ActiveModal, PartnerScreenState};

pub fn render(ctx: &egui::Context, state: &mut PartnerScreenState, actions: &mut FrameActions) {
    let ActiveModal::ConfirmDelete { partner, loading, error } = state.modal() else {
        return;
    };
    let name = partner.name.clone();
    let loading = *loading;
    let error = error.clone();

    let role = state.role();
    let title = format!("Remove {}", role.partner_role().noun());
    let (message, confirm_label, loading_text) = if role.removal_requires_otp() {
        (
            format!("Are you sure you want to remove {}? A one-time password will be sent to confirm.", name),
            "Send OTP",
            "Sending OTP...",
        )
    } else {
        (format!("Are you sure you want to remove {}?", name), "Remove", "Removing...")
    };

    let mut confirm = false;
    let mut cancel = false;
    show_modal(ctx, "confirm_delete_modal", &title, colors::DANGER, |ui| {
        ui.label(egui::RichText::new(message).color(colors::TEXT_PRIMARY));
        ui.add_space(10.0);
        status_line(ui, loading, loading_text, error.as_deref());
        ui.add_space(10.0);
        (confirm, cancel) = button_row(ui, danger_button(confirm_label), !loading, "Cancel");
    });

    if confirm {
        actions.push(state.confirm_delete());
    } else if cancel {
        state.dismiss();
    }
}
