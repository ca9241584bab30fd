//! # Modals Module
//!
//! Dialogs of the partner screen. Exactly one is visible at a time, chosen by
//! the `ActiveModal` of the screen state.
//!
//! ## Module Organization:
//! - `delete_confirm` - "Remove this partner?"
//! - `otp` - one-time password entry for removing a caregiver or adding a patient
//! - `add_partner` - patient lookup by ID or pairing code
//! - `add_not_supported` - explanation shown to patients
//! - `pairing_code` - the patient's own pairing code
//! - `shared` - overlay, frame and button row

pub mod add_not_supported;
pub mod add_partner;
pub mod delete_confirm;
pub mod otp;
pub mod pairing_code;
pub mod shared;

use eframe::egui;

use crate::ui::app_coordinator::FrameActions;
use crate::ui::state::{ActiveModal, PartnerScreenState};

/// Render whichever dialog is open
pub fn render_partner_modals(ctx: &egui::Context, state: &mut PartnerScreenState, actions: &mut FrameActions) {
    match state.modal() {
        ActiveModal::None => {}
        ActiveModal::ConfirmDelete { .. } => delete_confirm::render(ctx, state, actions),
        ActiveModal::RemovalOtp { .. } | ActiveModal::AddOtp { .. } => otp::render(ctx, state, actions),
        ActiveModal::AddPartner(_) => add_partner::render(ctx, state, actions),
        ActiveModal::AddNotSupported => add_not_supported::render(ctx, state),
        ActiveModal::PairingCode { .. } => pairing_code::render(ctx, state),
    }
}
