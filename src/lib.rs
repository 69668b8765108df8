//! jp-courses installer library
//!
//! Core pieces behind the `jp-courses` CLI: argument scanning, purchase
//! verification, course download and extraction, progress reporting and the
//! local content server.

pub mod commands;
pub mod core;
pub mod error;
pub mod utils;
