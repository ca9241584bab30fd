//! # Add Patient Dialog
//!
//! Caregivers find a patient either by typing the patient ID or by pasting the
//! pairing code (`<id>|<otp>`) shown on the patient's device. After a
//! successful lookup the patient's details are shown for confirmation.

use eframe::egui;
use shared::UserInfo;

use super::shared::{button_row, show_modal, status_line};
use crate::ui::app_coordinator::FrameActions;
use crate::ui::components::styling::{primary_button, secondary_button};
use crate::ui::components::theme::colors;
use crate::ui::components::ui_components::draw_avatar;
use crate::ui::state::PartnerScreenState;

#[derive(Default)]
struct Clicks {
    use_pairing_code: bool,
    id_edited: bool,
    look_up: bool,
    confirm: bool,
    back: bool,
    cancel: bool,
}

pub fn render(ctx: &egui::Context, state: &mut PartnerScreenState, actions: &mut FrameActions) {
    let mut clicks = Clicks::default();
    let Some(form) = state.add_form_mut() else {
        return;
    };

    show_modal(ctx, "add_partner_modal", "Add Patient", colors::PRIMARY, |ui| {
        match form.patient.clone() {
            None => {
                ui.label(egui::RichText::new("Pairing code").color(colors::TEXT_SECONDARY));
                ui.horizontal(|ui| {
                    let response = ui.add_enabled(
                        !form.loading,
                        egui::TextEdit::singleline(&mut form.pairing_code)
                            .hint_text("Paste the code from the patient's screen")
                            .desired_width(260.0),
                    );
                    let entered = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    let has_code = !form.pairing_code.trim().is_empty();
                    clicks.use_pairing_code =
                        ui.add_enabled(!form.loading && has_code, secondary_button("Use code")).clicked()
                            || (entered && has_code);
                });

                ui.add_space(6.0);
                ui.label(egui::RichText::new("or Patient ID").color(colors::TEXT_SECONDARY));
                let response = ui.add_enabled(
                    !form.loading,
                    egui::TextEdit::singleline(&mut form.patient_id)
                        .hint_text("Patient ID")
                        .desired_width(320.0),
                );
                clicks.id_edited = response.changed();
                let entered = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                ui.add_space(6.0);
                status_line(ui, form.loading, "Looking up patient...", form.error.as_deref());
                ui.add_space(10.0);

                let (look_up, cancel) = button_row(ui, primary_button("Look up"), form.can_look_up(), "Cancel");
                clicks.look_up = look_up || (entered && form.can_look_up());
                clicks.cancel = cancel;
            }
            Some(patient) => {
                render_patient_details(ui, &patient);
                if form.otp.is_some() {
                    ui.label(
                        egui::RichText::new("The pairing code included a one-time password.")
                            .size(13.0)
                            .color(colors::TEXT_SECONDARY),
                    );
                }

                ui.add_space(6.0);
                let loading_text = if form.otp.is_some() { "Adding patient..." } else { "Sending OTP..." };
                status_line(ui, form.loading, loading_text, form.error.as_deref());
                ui.add_space(10.0);

                let (confirm, back) = button_row(ui, primary_button("Add patient"), !form.loading, "Back");
                clicks.confirm = confirm;
                clicks.back = back;
            }
        }
    });

    if clicks.use_pairing_code {
        actions.push(state.apply_pairing_code());
    } else if clicks.look_up {
        actions.push(state.look_up_patient());
    } else if clicks.confirm {
        actions.push(state.confirm_add());
    } else if clicks.back {
        state.back_to_lookup();
    } else if clicks.cancel {
        state.dismiss();
    } else if clicks.id_edited {
        state.patient_id_edited();
    }
}

fn render_patient_details(ui: &mut egui::Ui, patient: &UserInfo) {
    draw_avatar(ui, &patient.initials(), patient.gender, patient.profile_picture.as_deref(), 64.0);
    ui.label(egui::RichText::new(&patient.name).size(20.0).strong().color(colors::TEXT_HEADING));

    egui::Grid::new("patient_details")
        .num_columns(2)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            ui.label(egui::RichText::new("ID").color(colors::TEXT_SECONDARY));
            ui.label(&patient.id);
            ui.end_row();

            ui.label(egui::RichText::new("Email").color(colors::TEXT_SECONDARY));
            ui.label(&patient.email);
            ui.end_row();

            ui.label(egui::RichText::new("Gender").color(colors::TEXT_SECONDARY));
            ui.label(patient.gender.display_name());
            ui.end_row();

            ui.label(egui::RichText::new("Date of birth").color(colors::TEXT_SECONDARY));
            ui.label(&patient.dob);
            ui.end_row();
        });
}
