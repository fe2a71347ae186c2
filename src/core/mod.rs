//! core
//!
//! Core command-processing types and configuration for sbtc.
//!
//! # Modules
//!
//! - [`tokenize`] - Quote-aware splitting of input lines
//! - [`registry`] - Immutable command and alias table
//! - [`dispatch`] - Alias resolution, arity validation, handler invocation
//! - [`convert`] - Token to JSON parameter conversion
//! - [`config`] - Configuration schema and loading
//! - [`paths`] - Centralized path routing for datadir files
//!
//! # Design Principles
//!
//! - The registry is built once and never mutated afterwards
//! - Arity is a tagged variant checked uniformly by the dispatcher
//! - Nothing here touches the terminal or the network

pub mod config;
pub mod convert;
pub mod dispatch;
pub mod paths;
pub mod registry;
pub mod tokenize;
