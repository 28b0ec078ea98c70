//! regform - declarative form validation
//!
//! A schema of fields and rules, a pure validator over it, and a stateful
//! engine that tracks values, touched flags and errors for one form
//! session. The registration form is built on top of it.

pub mod config;
pub mod form;
pub mod submission;
