//! Mutation layers for the fix operation.
//!
//! Each layer edits the tree in place and leaves every token it does not
//! touch as it was.

pub mod guard;
pub mod imports;

pub use guard::{insert_guard, Guard, GuardSite, GUARD_MESSAGE};
pub use imports::{ensure_imports, ImportSet};
