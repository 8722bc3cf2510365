//! Unified diff rendering for dry-run output.
//!
//! Line differences come from `difference::Changeset`; this module groups them
//! into hunks with surrounding context in the standard `diff -u` layout.

use difference::{Changeset, Difference};

/// Number of unchanged lines shown around each change.
pub const DEFAULT_CONTEXT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
enum LineOp {
    Same(String),
    Add(String),
    Rem(String),
}

impl LineOp {
    fn is_change(&self) -> bool {
        !matches!(self, LineOp::Same(_))
    }

    fn consumes_old(&self) -> bool {
        !matches!(self, LineOp::Add(_))
    }

    fn consumes_new(&self) -> bool {
        !matches!(self, LineOp::Rem(_))
    }
}

/// Render a unified diff of `old` against `new` for `path`.
///
/// Returns an empty string when the texts are identical. Line terminators
/// (`\n` or `\r\n`) are not part of the compared lines.
pub fn unified_diff(path: &str, old: &str, new: &str, context: usize) -> String {
    if old == new {
        return String::new();
    }

    let ops = line_ops(old, new);
    let hunks = hunk_ranges(&ops, context);

    let mut out = String::new();
    out.push_str(&format!("--- a/{}\n", path));
    out.push_str(&format!("+++ b/{}\n", path));

    // Positions (0-based) before each op.
    let mut old_pos = Vec::with_capacity(ops.len());
    let mut new_pos = Vec::with_capacity(ops.len());
    let (mut o, mut n) = (0usize, 0usize);
    for op in &ops {
        old_pos.push(o);
        new_pos.push(n);
        if op.consumes_old() {
            o += 1;
        }
        if op.consumes_new() {
            n += 1;
        }
    }

    for (start, end) in hunks {
        let slice = &ops[start..end];
        let old_count = slice.iter().filter(|op| op.consumes_old()).count();
        let new_count = slice.iter().filter(|op| op.consumes_new()).count();
        let old_start = if old_count == 0 {
            old_pos[start]
        } else {
            old_pos[start] + 1
        };
        let new_start = if new_count == 0 {
            new_pos[start]
        } else {
            new_pos[start] + 1
        };
        out.push_str(&format!(
            "@@ -{},{} +{},{} @@\n",
            old_start, old_count, new_start, new_count
        ));
        for op in slice {
            match op {
                LineOp::Same(line) => out.push_str(&format!(" {}\n", line)),
                LineOp::Add(line) => out.push_str(&format!("+{}\n", line)),
                LineOp::Rem(line) => out.push_str(&format!("-{}\n", line)),
            }
        }
    }

    out
}

fn line_ops(old: &str, new: &str) -> Vec<LineOp> {
    let old_lines: Vec<&str> = old.lines().collect();
    let new_lines: Vec<&str> = new.lines().collect();

    if old_lines.is_empty() {
        return new_lines
            .into_iter()
            .map(|l| LineOp::Add(l.to_string()))
            .collect();
    }
    if new_lines.is_empty() {
        return old_lines
            .into_iter()
            .map(|l| LineOp::Rem(l.to_string()))
            .collect();
    }

    let changeset = Changeset::new(&old_lines.join("\n"), &new_lines.join("\n"), "\n");
    let mut ops = Vec::new();
    for diff in changeset.diffs {
        match diff {
            Difference::Same(text) => {
                ops.extend(text.split('\n').map(|l| LineOp::Same(l.to_string())))
            }
            Difference::Add(text) => {
                ops.extend(text.split('\n').map(|l| LineOp::Add(l.to_string())))
            }
            Difference::Rem(text) => {
                ops.extend(text.split('\n').map(|l| LineOp::Rem(l.to_string())))
            }
        }
    }
    ops
}

/// Half-open op ranges, one per hunk, with overlapping context merged.
fn hunk_ranges(ops: &[LineOp], context: usize) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for (idx, op) in ops.iter().enumerate() {
        if !op.is_change() {
            continue;
        }
        let start = idx.saturating_sub(context);
        let end = (idx + context + 1).min(ops.len());
        match ranges.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => ranges.push((start, end)),
        }
    }
    ranges
}
