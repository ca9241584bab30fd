//! # Styling Module
//!
//! Global egui style and small drawing helpers shared by every screen.
//!
//! ## Key Functions:
//! - `setup_mindtrace_style()` - configure fonts, spacing and visuals once per frame
//! - `draw_background()` - vertical gradient behind all content
//! - `draw_card_container()` - white card with a soft shadow
//! - `primary_button()` / `secondary_button()` / `danger_button()` - styled buttons

pub mod functions;

pub use functions::*;
