//! Operations for Go source files.

pub mod fix;
