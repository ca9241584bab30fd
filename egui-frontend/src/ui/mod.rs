//! # UI Module
//!
//! egui front end of the MindTrace client.
//!
//! ## Module Organization:
//! - `state` - egui-free screen state and the partner state machine
//! - `controller` - runs state machine effects against the backend
//! - `app_state` - `MindTraceApp`, session and background task plumbing
//! - `app_coordinator` - the `eframe::App` frame loop
//! - `components` - rendering

pub mod app_coordinator;
pub mod app_state;
pub mod components;
pub mod controller;
pub mod state;

pub use app_state::MindTraceApp;
