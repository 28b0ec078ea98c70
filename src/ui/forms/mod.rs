//! Form rendering module
//!
//! - `field_renderer`: one field box plus its error line
//! - `registration_form`: the scrolling registration form

mod field_renderer;
mod registration_form;

pub use registration_form::draw_registration;
