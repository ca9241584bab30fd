//! # Home Module
//!
//! Screens outside the partner flow: sign-in, profile loading or failure, and
//! the home screen that leads to the partner list.

use eframe::egui;
use shared::{Role, UserInfo};

use crate::ui::app_coordinator::FrameActions;
use crate::ui::components::styling::{draw_card_container, error_label, primary_button, secondary_button};
use crate::ui::components::theme::colors;
use crate::ui::components::ui_components::{draw_avatar, draw_badge, render_loading_placeholder};

const CARD_WIDTH: f32 = 420.0;

/// Centered card of fixed width
fn centered_card(ui: &mut egui::Ui, height: f32, add_contents: impl FnOnce(&mut egui::Ui)) {
    ui.add_space(40.0);
    let available = ui.available_rect_before_wrap();
    let rect = egui::Rect::from_center_size(
        egui::pos2(available.center().x, available.min.y + height / 2.0),
        egui::vec2(CARD_WIDTH, height),
    );
    draw_card_container(ui, rect, 12.0);
    ui.allocate_ui_at_rect(rect.shrink(20.0), |ui| {
        ui.vertical_centered(add_contents);
    });
}

pub fn render_sign_in(ui: &mut egui::Ui, token_input: &mut String, actions: &mut FrameActions) {
    centered_card(ui, 230.0, |ui| {
        ui.label(egui::RichText::new("Sign in").size(24.0).strong().color(colors::TEXT_HEADING));
        ui.label(egui::RichText::new("Paste the ID token issued for your MindTrace account.").color(colors::TEXT_SECONDARY));
        ui.add_space(10.0);

        let response = ui.add(
            egui::TextEdit::singleline(token_input)
                .password(true)
                .hint_text("ID token")
                .desired_width(320.0),
        );
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        ui.add_space(10.0);
        let can_sign_in = !token_input.trim().is_empty();
        if ui.add_enabled(can_sign_in, primary_button("Sign in")).clicked() || (submitted && can_sign_in) {
            actions.sign_in = true;
        }
    });
}

pub fn render_session_loading(ui: &mut egui::Ui) {
    render_loading_placeholder(ui, "Loading your profile...");
}

pub fn render_session_failed(ui: &mut egui::Ui, message: &str, actions: &mut FrameActions) {
    centered_card(ui, 180.0, |ui| {
        ui.label(egui::RichText::new("⚠").size(36.0).color(colors::DANGER));
        error_label(ui, message);
        ui.add_space(10.0);
        ui.horizontal(|ui| {
            if ui.add(primary_button("Retry")).clicked() {
                actions.retry = true;
            }
            if ui.add(secondary_button("Sign out")).clicked() {
                actions.sign_out = true;
            }
        });
    });
}

pub fn render_home(ui: &mut egui::Ui, user: &UserInfo, actions: &mut FrameActions) {
    centered_card(ui, 300.0, |ui| {
        draw_avatar(ui, &user.initials(), user.gender, user.profile_picture.as_deref(), 72.0);
        ui.add_space(6.0);
        ui.label(egui::RichText::new(format!("Welcome, {}", user.name)).size(22.0).strong().color(colors::TEXT_HEADING));
        ui.label(egui::RichText::new(&user.email).color(colors::TEXT_SECONDARY));
        draw_badge(ui, user.role.noun(), colors::PRIMARY, colors::PRIMARY_TEXT);

        if let (Role::Patient, Some(contact)) = (user.role, user.primary_contact.as_ref()) {
            ui.label(
                egui::RichText::new(format!("Primary contact: {}", contact.name))
                    .size(13.0)
                    .color(colors::TEXT_SECONDARY),
            );
        }

        ui.add_space(16.0);
        let label = format!("My {}", user.role.partner_title());
        if ui.add(primary_button(label).min_size(egui::vec2(220.0, 44.0))).clicked() {
            actions.open_partners = true;
        }
    });
}
