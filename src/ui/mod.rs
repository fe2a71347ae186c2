//! ui
//!
//! Operator-facing rendering.
//!
//! # Modules
//!
//! - [`output`] - Verbosity and stderr diagnostics
//! - [`display`] - RPC result layout

pub mod display;
pub mod output;
