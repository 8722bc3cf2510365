//! argtail: guards Go programs against ignored trailing arguments.
//!
//! A Go program that parses its flags with `flag.Parse()` but never looks at
//! `flag.Args()` silently ignores any positional arguments it is given. This
//! crate drives the `argtail-go` engine over files and directories, inserts
//! the check, and writes the results back.

// Core infrastructure - re-exported from argtail-core
pub use argtail_core::diff;
pub use argtail_core::error;
pub use argtail_core::output;
pub use argtail_core::text;

// Driver
pub mod apply;
pub mod files;
pub mod report;
pub mod run;

// Error bridges - converts engine and driver errors to ArgtailError
// (must be after apply for the From impls to work)
mod error_bridges;
