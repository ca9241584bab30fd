//! # State Module
//!
//! UI state for the partner screen, kept free of egui and of the network so it
//! can be driven directly from tests.
//!
//! ## Module Organization:
//! - `modal_state` - the single open dialog and its form state
//! - `partner_state` - list, filter and the add/remove state machine

pub mod modal_state;
pub mod partner_state;

pub use modal_state::*;
pub use partner_state::*;
