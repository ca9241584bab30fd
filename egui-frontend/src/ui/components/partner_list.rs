//! # Partner List Module
//!
//! Body of the partner screen: the "show removed" switch, the error banner,
//! the list of partner cards or its empty state, and the floating add button.
//!
//! ## Interaction:
//! Widgets never call the backend. Clicks go through `PartnerScreenState`
//! and any `Command` it returns is pushed onto `FrameActions` for the app to
//! dispatch after the frame.

use chrono::{DateTime, Local};
use eframe::egui;
use shared::{format_friendly_date, PartnerInfo, Role};

use crate::ui::app_coordinator::FrameActions;
use crate::ui::components::styling::{draw_card_container, secondary_button};
use crate::ui::components::theme::colors;
use crate::ui::components::ui_components::{draw_avatar, draw_badge, render_empty_placeholder, render_loading_placeholder};
use crate::ui::state::{ListView, PartnerScreenState};

const CARD_HEIGHT: f32 = 84.0;
const FAB_SIZE: egui::Vec2 = egui::vec2(180.0, 48.0);

pub fn render_partner_screen(
    ui: &mut egui::Ui,
    state: &mut PartnerScreenState,
    now: &DateTime<Local>,
    actions: &mut FrameActions,
) {
    let screen_rect = ui.available_rect_before_wrap();

    ui.add_space(12.0);
    ui.horizontal(|ui| {
        ui.add_space(20.0);
        render_show_deleted_toggle(ui, state, actions);

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.add_space(20.0);
            if ui.add_enabled(!state.is_list_loading(), secondary_button("🔄 Refresh")).clicked() {
                actions.push(Some(state.refresh()));
            }
            if state.role() == Role::Patient && ui.add(secondary_button("My pairing code")).clicked() {
                actions.push(state.open_pairing_code());
            }
            if state.is_list_loading() {
                ui.spinner();
            }
        });
    });

    if let Some(error) = state.list_error().map(str::to_string) {
        render_error_banner(ui, &error, state, actions);
    }

    ui.add_space(8.0);
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .max_height(ui.available_height() - FAB_SIZE.y - 24.0)
        .show(ui, |ui| {
            render_list_body(ui, state, now);
        });

    render_add_button(ui, screen_rect, state);
}

fn render_show_deleted_toggle(ui: &mut egui::Ui, state: &mut PartnerScreenState, actions: &mut FrameActions) {
    let mut show_deleted = state.show_deleted();
    let response = ui.add_enabled(!state.is_list_loading(), egui::Checkbox::new(&mut show_deleted, ""));
    ui.label(egui::RichText::new(state.toggle_label()).color(colors::TEXT_PRIMARY));
    if response.changed() {
        actions.push(Some(state.toggle_show_deleted()));
    }
}

fn render_error_banner(ui: &mut egui::Ui, error: &str, state: &mut PartnerScreenState, actions: &mut FrameActions) {
    ui.add_space(6.0);
    egui::Frame::none()
        .fill(egui::Color32::from_rgb(253, 236, 234))
        .stroke(egui::Stroke::new(1.0, colors::DANGER))
        .rounding(egui::Rounding::same(8.0))
        .inner_margin(egui::Margin::same(10.0))
        .outer_margin(egui::Margin::symmetric(20.0, 0.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(error).color(colors::DANGER));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.add_enabled(!state.is_list_loading(), secondary_button("Retry")).clicked() {
                        actions.push(Some(state.refresh()));
                    }
                });
            });
        });
}

fn render_list_body(ui: &mut egui::Ui, state: &mut PartnerScreenState, now: &DateTime<Local>) {
    let title = state.role().partner_title();
    let mut delete_clicked: Option<String> = None;

    match state.list_view() {
        ListView::Loading => render_loading_placeholder(ui, &format!("Loading {}...", title.to_lowercase())),
        ListView::NoPartners => {
            let hint = if state.role().can_add_partner() {
                format!("Use \"ADD {}\" to link your first one.", state.role().partner_label())
            } else {
                "Ask your caregiver to add you as a patient.".to_string()
            };
            render_empty_placeholder(ui, "👥", &format!("No {} Yet", title), &hint);
        }
        ListView::NoActivePartners => render_empty_placeholder(
            ui,
            "🗂",
            &format!("No Active {}", title),
            "Switch on the toggle above to see removed ones.",
        ),
        ListView::Partners(partners) => {
            for partner in partners {
                if render_partner_card(ui, partner, now) {
                    delete_clicked = Some(partner.id.clone());
                }
                ui.add_space(10.0);
            }
        }
    }

    if let Some(id) = delete_clicked {
        state.request_delete(&id);
    }
}

/// One partner card. Returns true when its delete button was clicked.
fn render_partner_card(ui: &mut egui::Ui, partner: &PartnerInfo, now: &DateTime<Local>) -> bool {
    let removed = partner.is_removed();
    let width = ui.available_width() - 40.0;
    let (outer, _) = ui.allocate_exact_size(egui::vec2(ui.available_width(), CARD_HEIGHT), egui::Sense::hover());
    let rect = egui::Rect::from_min_size(outer.min + egui::vec2(20.0, 0.0), egui::vec2(width, CARD_HEIGHT));

    draw_card_container(ui, rect, 10.0);
    if removed {
        ui.painter()
            .rect_filled(rect, egui::Rounding::same(10.0), colors::REMOVED_BACKGROUND);
    }

    let mut delete_clicked = false;
    ui.allocate_ui_at_rect(rect.shrink(12.0), |ui| {
        ui.horizontal_centered(|ui| {
            draw_avatar(ui, &partner.initials(), partner.gender, partner.profile_picture.as_deref(), 56.0);
            ui.add_space(10.0);

            ui.vertical(|ui| {
                let name_color = if removed { colors::REMOVED } else { colors::TEXT_PRIMARY };
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(&partner.name).size(18.0).strong().color(name_color));
                    if removed {
                        draw_badge(ui, "REMOVED", colors::REMOVED, colors::TEXT_WHITE);
                    }
                });
                ui.label(
                    egui::RichText::new(partner.gender.display_name())
                        .size(13.0)
                        .color(colors::TEXT_SECONDARY),
                );
                let dates = match partner.removed_at.as_ref() {
                    Some(removed_at) => format!("Removed: {}", format_friendly_date(Some(removed_at), now)),
                    None => format!("Added: {}", format_friendly_date(partner.created_at.as_ref(), now)),
                };
                ui.label(egui::RichText::new(dates).size(13.0).color(colors::TEXT_SECONDARY));
            });

            if !removed {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let delete = egui::Button::new(egui::RichText::new("🗑").size(18.0).color(colors::DANGER))
                        .fill(egui::Color32::TRANSPARENT)
                        .stroke(egui::Stroke::new(1.0, colors::CARD_BORDER))
                        .rounding(egui::Rounding::same(6.0))
                        .min_size(egui::vec2(36.0, 36.0));
                    if ui.add(delete).on_hover_text("Remove").clicked() {
                        delete_clicked = true;
                    }
                });
            }
        });
    });

    delete_clicked
}

/// Floating "ADD PATIENT" / "ADD CAREGIVER" button in the bottom-right corner
fn render_add_button(ui: &mut egui::Ui, screen_rect: egui::Rect, state: &mut PartnerScreenState) {
    let rect = egui::Rect::from_min_size(
        screen_rect.right_bottom() - FAB_SIZE - egui::vec2(24.0, 24.0),
        FAB_SIZE,
    );
    let label = format!("+ ADD {}", state.role().partner_label());
    let fill = if state.is_list_loading() { colors::REMOVED } else { colors::PRIMARY };
    let button = egui::Button::new(egui::RichText::new(label).strong().color(colors::PRIMARY_TEXT))
        .fill(fill)
        .rounding(egui::Rounding::same(FAB_SIZE.y / 2.0));

    if ui.put(rect, button).clicked() {
        state.open_add_partner();
    }
}
