//! Form rendering module
//!
//! - `field_renderer`: Field rendering utilities
//! - `content_form`: The content form and its submitted view

mod content_form;
mod field_renderer;

pub use content_form::{draw_content_form, draw_submitted};
