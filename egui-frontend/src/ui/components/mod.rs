//! # UI Components Module
//!
//! Rendering code for the MindTrace client. Components read the app or screen
//! state and report clicks back; none of them talk to the backend.
//!
//! ## Module Organization:
//! - `theme` - color palette
//! - `styling` - global egui style, background and button builders
//! - `ui_components` - avatars, badges and placeholders
//! - `header` - top bar with back action, backend status and sign-out
//! - `home` - sign-in, profile loading and the home screen
//! - `partner_list` - the partner screen body
//! - `modals` - partner screen dialogs

pub mod header;
pub mod home;
pub mod modals;
pub mod partner_list;
pub mod styling;
pub mod theme;
pub mod ui_components;

pub use styling::{draw_background, setup_mindtrace_style};
pub use theme::*;
