//! # Header Module
//!
//! Top bar shown on every screen: back action on the partner screen, app or
//! screen title, backend status and the signed-in user with a sign-out button.

use eframe::egui;

use crate::ui::app_coordinator::FrameActions;
use crate::ui::app_state::{MindTraceApp, Screen, Session};
use crate::ui::components::styling::secondary_button;
use crate::ui::components::theme::colors;
use crate::ui::components::ui_components::draw_avatar;

pub const HEADER_HEIGHT: f32 = 64.0;

impl MindTraceApp {
    pub fn render_header(&self, ui: &mut egui::Ui, actions: &mut FrameActions) {
        let header_rect = egui::Rect::from_min_size(
            ui.max_rect().min,
            egui::vec2(ui.max_rect().width(), HEADER_HEIGHT),
        );
        ui.painter()
            .rect_filled(header_rect, egui::Rounding::ZERO, colors::HEADER_BACKGROUND);

        ui.allocate_ui_at_rect(header_rect.shrink2(egui::vec2(16.0, 0.0)), |ui| {
            ui.horizontal_centered(|ui| {
                let title = match &self.session {
                    Session::Ready {
                        screen: Screen::Partners(state),
                        ..
                    } => {
                        let back = egui::Button::new(egui::RichText::new("⬅").size(20.0).color(colors::TEXT_WHITE))
                            .fill(egui::Color32::TRANSPARENT)
                            .frame(false);
                        if ui.add(back).on_hover_text("Back").clicked() {
                            actions.go_home = true;
                        }
                        state.title()
                    }
                    _ => "MindTrace".to_string(),
                };

                ui.add(
                    egui::Label::new(egui::RichText::new(title).size(22.0).strong().color(colors::TEXT_WHITE))
                        .selectable(false),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Session::Ready { user, .. } = &self.session {
                        if ui.add(secondary_button("Sign out")).clicked() {
                            actions.sign_out = true;
                        }
                        ui.add_space(8.0);
                        ui.label(egui::RichText::new(&user.name).color(colors::TEXT_WHITE));
                        draw_avatar(ui, &user.initials(), user.gender, user.profile_picture.as_deref(), 36.0);
                        ui.add_space(12.0);
                    }
                    self.render_backend_status(ui);
                });
            });
        });
    }

    fn render_backend_status(&self, ui: &mut egui::Ui) {
        let (color, hover) = match &self.backend_status {
            None => (colors::REMOVED, "Checking backend...".to_string()),
            Some(Ok(status)) => (colors::SUCCESS, format!("Backend {}", status)),
            Some(Err(reason)) => (colors::DANGER, format!("Backend unreachable: {}", reason)),
        };

        let (rect, response) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
        ui.painter().circle_filled(rect.center(), 6.0, color);
        response.on_hover_text(hover);
    }
}
