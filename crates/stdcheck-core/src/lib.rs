//! Core types, canonical text rendering, and configuration for stdcheck.
//!
//! This crate provides the foundational data structures used across all stdcheck crates:
//! - [`types`]: Declarations, parameters, and the structured docstring model
//! - [`canonical`]: Whitespace/format normalization for type and literal text
//! - [`config`]: Run configuration loading from `.stdcheck.json`

pub mod canonical;
pub mod config;
pub mod types;
