//! Core infrastructure for argtail.
//!
//! This crate provides language-agnostic infrastructure:
//! - Error types and exit codes
//! - JSON output types for CLI responses
//! - Text utilities (spans, line:column conversion, layout helpers)
//! - Unified diff rendering

pub mod diff;
pub mod error;
pub mod output;
pub mod text;
