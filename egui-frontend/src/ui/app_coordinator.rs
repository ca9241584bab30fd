//! # App Coordinator Module
//!
//! The per-frame loop of the MindTrace client.
//!
//! ## Application Flow:
//! 1. Apply the global style
//! 2. Drain finished background work into the app state
//! 3. Handle global input (ESC closes the open dialog)
//! 4. Render header, then the current screen, then any open dialog
//! 5. Act on what the user clicked: dispatch commands, navigate, sign in or out
//!
//! Rendering only records clicks in `FrameActions`; state changes that need
//! the whole app (navigation, spawning requests) happen after rendering.

use eframe::egui;
use log::debug;

use crate::ui::app_state::{MindTraceApp, Screen, Session};
use crate::ui::components::home::{render_home, render_session_failed, render_session_loading, render_sign_in};
use crate::ui::components::modals::render_partner_modals;
use crate::ui::components::partner_list::render_partner_screen;
use crate::ui::components::{draw_background, setup_mindtrace_style};
use crate::ui::state::Command;

/// Everything the user asked for during one frame
#[derive(Debug, Default)]
pub struct FrameActions {
    pub commands: Vec<Command>,
    pub open_partners: bool,
    pub go_home: bool,
    pub sign_in: bool,
    pub sign_out: bool,
    pub retry: bool,
}

impl FrameActions {
    pub fn push(&mut self, command: Option<Command>) {
        self.commands.extend(command);
    }
}

impl eframe::App for MindTraceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        setup_mindtrace_style(ctx);
        self.process_events();

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            if let Some(state) = self.partner_state_mut() {
                state.dismiss();
            }
        }

        let mut actions = FrameActions::default();

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let full_rect = ui.max_rect();
                draw_background(ui, full_rect);

                self.render_header(ui, &mut actions);

                let token_input = &mut self.token_input;
                match &mut self.session {
                    Session::SignedOut => render_sign_in(ui, token_input, &mut actions),
                    Session::Loading => render_session_loading(ui),
                    Session::Failed(message) => render_session_failed(ui, message, &mut actions),
                    Session::Ready {
                        user,
                        screen: Screen::Home,
                    } => render_home(ui, user, &mut actions),
                    Session::Ready {
                        screen: Screen::Partners(state),
                        ..
                    } => {
                        let now = chrono::Local::now();
                        render_partner_screen(ui, state, &now, &mut actions);
                    }
                }
            });

        if let Some(state) = self.partner_state_mut() {
            render_partner_modals(ctx, state, &mut actions);
        }

        self.handle_actions(actions);
    }
}

impl MindTraceApp {
    fn handle_actions(&mut self, actions: FrameActions) {
        for command in actions.commands {
            debug!("Dispatching {:?}", command.effect);
            self.dispatch(Some(command));
        }

        if actions.sign_out {
            self.sign_out();
        } else if actions.sign_in {
            self.sign_in();
        } else if actions.retry {
            self.load_session();
        } else if actions.go_home {
            self.go_home();
        } else if actions.open_partners {
            self.open_partners();
        }
    }
}
