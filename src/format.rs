//! Render a directive back into file syntax.
//!
//! The rules are a closed table: a fixed key list selects `KEY=value`
//! assignment style, a `;` in the field pattern selects statement
//! termination, and everything else is `Key value`. New file types get new
//! table entries; the format is never inferred from the file being edited.

use crate::schema::Field;
use crate::value::FieldValue;

/// Keys rendered as shell-style assignments (`/etc/default/ufw`).
const ASSIGNMENT_KEYS: &[&str] = &[
    "IPV6",
    "DEFAULT_INPUT_POLICY",
    "DEFAULT_OUTPUT_POLICY",
    "DEFAULT_FORWARD_POLICY",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// `KEY=value`
    Assignment,
    /// `Key value`
    Spaced,
    /// `key value;`
    Terminated,
}

impl LineStyle {
    pub fn for_field(field: &Field) -> Self {
        if ASSIGNMENT_KEYS.contains(&field.key.as_str()) {
            LineStyle::Assignment
        } else if field.pattern.contains(';') {
            LineStyle::Terminated
        } else {
            LineStyle::Spaced
        }
    }
}

/// Pure function: render `value` for `field` as a full line.
///
/// Disabled values are prefixed with the comment token and a space.
pub fn format_line(field: &Field, value: &FieldValue) -> String {
    let key = &field.key;
    let v = &value.value;
    let line = match LineStyle::for_field(field) {
        LineStyle::Assignment => format!("{key}={v}"),
        LineStyle::Spaced => format!("{key} {v}"),
        LineStyle::Terminated => format!("{key} {v};"),
    };
    if value.enabled {
        line
    } else {
        format!("{} {line}", field.comment_token)
    }
}
