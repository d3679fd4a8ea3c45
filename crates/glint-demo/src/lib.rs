#![forbid(unsafe_code)]

//! Terminal demo for the glint effects.
//!
//! The binary in `main.rs` wires these modules together; they live in a
//! library so the option parsing and drawing can be tested without a
//! terminal.

pub mod app;
pub mod cli;
pub mod logging;
pub mod session;
