//! Form rendering module
//!
//! - `field_renderer`: input boxes and checkboxes
//! - `admission_form`: the admission form with its action panel

mod admission_form;
mod field_renderer;

pub use admission_form::draw as draw_admission_form;
