//! Go support for argtail.
//!
//! This crate finds Go programs that parse their command-line flags but
//! never look at what is left over, and patches them to fail loudly on
//! unexpected trailing arguments:
//!
//! ```go
//! flag.Parse()
//! if flag.NArg() != 0 {
//!     log.Fatalf("Trailing args not expected: %q", flag.Args())
//! }
//! ```
//!
//! It includes:
//! - Pattern matching for qualified references such as `flag.Parse`
//! - Top-level function lookup
//! - Guard insertion and import augmentation layers
//! - The [`fix`] operation tying them together
//!
//! All work happens on the lossless tree from `argtail-go-cst`, so every
//! byte the rewrite does not touch prints back exactly as it was read.

pub mod error;
pub mod layers;
pub mod locate;
pub mod ops;
pub mod pattern;

pub use error::FixError;
pub use layers::{ensure_imports, insert_guard, Guard, GuardSite, ImportSet};
pub use locate::{find_function, LocateError};
pub use ops::fix::{fix, fix_with_options, FixOptions, FixOutcome, Rewrite, SkipReason};
pub use pattern::{contains_call, QualifiedName};
