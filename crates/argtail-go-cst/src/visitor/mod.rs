// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Visitor infrastructure for CST traversal.
//!
//! # Traversal Order
//!
//! - **Depth-first, pre-order** for `visit_*` methods
//! - **Post-order** for `leave_*` methods
//! - Children are visited in source order
//!
//! # Collectors
//!
//! - [`SelectorFinder`]: does a qualified selector `module.symbol` occur?
//! - [`ImportCollector`]: import specs with their bound names.

mod dispatch;
mod import;
mod selector;
mod traits;

pub use dispatch::{
    walk_basic_lit, walk_block, walk_call, walk_case_clause, walk_composite_lit, walk_decl,
    walk_expr, walk_field, walk_field_list, walk_for, walk_func_decl, walk_func_lit,
    walk_gen_decl, walk_ident, walk_if, walk_import_spec, walk_results, walk_select,
    walk_selector, walk_source_file, walk_spec, walk_statement, walk_stmt, walk_switch,
    walk_type_spec, walk_value_spec,
};
pub use import::{default_import_name, is_std_path, ImportCollector, ImportInfo};
pub use selector::SelectorFinder;
pub use traits::{VisitResult, Visitor};
