//! Apply requested directive values onto an existing file.
//!
//! Only lines whose directive actually changes are rewritten; every other
//! line, the line separator, and the trailing newline are reproduced exactly.
//! When nothing changes the file is not written at all.

use std::fmt;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::EditError;
use crate::format::format_line;
use crate::lines::Lines;
use crate::lock::TargetLock;
use crate::matcher::FieldMatcher;
use crate::parser::read_target;
use crate::schema::Schema;
use crate::value::ChangeSet;

/// What a patch did, by field key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchReport {
    /// Existing lines that were rewritten.
    pub updated: Vec<String>,
    /// Directives added as new final lines.
    pub appended: Vec<String>,
    /// Keys that are not fields of the schema.
    pub ignored: Vec<String>,
    /// Keys whose requested value spans more than one line.
    pub rejected: Vec<String>,
}

impl PatchReport {
    /// `true` when the file content is unchanged.
    pub fn is_noop(&self) -> bool {
        self.updated.is_empty() && self.appended.is_empty()
    }
}

impl fmt::Display for PatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_noop() {
            return write!(f, "No changes");
        }
        let mut parts = Vec::new();
        if !self.updated.is_empty() {
            parts.push(format!("updated {}", self.updated.join(", ")));
        }
        if !self.appended.is_empty() {
            parts.push(format!("added {}", self.appended.join(", ")));
        }
        write!(f, "{}", parts.join("; "))
    }
}

/// Result of patching file text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// New file text, or `None` when nothing changed.
    pub content: Option<String>,
    pub report: PatchReport,
}

/// Pure function: apply `changes` to `content` in change-set order.
///
/// For each known key the first matching line is located. A line that
/// already holds the requested value in the requested comment state is left
/// as is; otherwise it is replaced by the canonical rendering, keeping its
/// leading indentation. A missing directive is appended only when it is
/// requested enabled. Fields whose pattern does not compile are skipped.
pub fn patch_content(schema: &Schema, content: &str, changes: &ChangeSet) -> Patch {
    let mut lines = Lines::split(content);
    let mut report = PatchReport::default();

    for (key, wanted) in changes.iter() {
        let Some(field) = schema.field(key) else {
            tracing::debug!(schema = %schema.id, key, "ignoring unknown key");
            report.ignored.push(key.to_string());
            continue;
        };
        if wanted.value.contains(['\n', '\r']) {
            tracing::warn!(schema = %schema.id, key, "skipping value with a line break");
            report.rejected.push(key.to_string());
            continue;
        }
        let matcher = FieldMatcher::new(field);
        if !matcher.is_valid() {
            continue;
        }

        match matcher.find_first(&lines.lines) {
            Some(found) => {
                if found.value == wanted.value && found.enabled == wanted.enabled {
                    continue;
                }
                let original = &lines.lines[found.index];
                let indent = &original[..original.len() - original.trim_start().len()];
                let replacement = format!("{indent}{}", format_line(field, wanted));
                if replacement != *original {
                    tracing::debug!(key, line = found.index, %replacement, "rewriting line");
                    lines.lines[found.index] = replacement;
                    report.updated.push(key.to_string());
                }
            }
            None if wanted.enabled => {
                let line = format_line(field, wanted);
                tracing::debug!(key, %line, "appending directive");
                lines.push(line);
                report.appended.push(key.to_string());
            }
            None => {}
        }
    }

    let content = (!report.is_noop()).then(|| lines.join());
    Patch { content, report }
}

/// I/O wrapper: read `path`, patch it, and write it back in one operation if
/// anything changed. With `lock` set, the whole cycle runs under an
/// exclusive advisory lock on the file.
pub fn apply_to_file(
    schema: &Schema,
    path: &Path,
    changes: &ChangeSet,
    lock: bool,
) -> Result<PatchReport, EditError> {
    let _guard = if lock {
        Some(TargetLock::acquire(path)?)
    } else {
        None
    };

    let content = read_target(path)?;
    let Patch { content, report } = patch_content(schema, &content, changes);

    match content {
        None => {
            tracing::debug!(schema = %schema.id, path = %path.display(), "no changes to write");
        }
        Some(new_content) => {
            write_target(path, &new_content)?;
            tracing::info!(
                schema = %schema.id,
                path = %path.display(),
                updated = report.updated.len(),
                appended = report.appended.len(),
                "config file rewritten"
            );
        }
    }
    Ok(report)
}

/// Replace the file at `path` with `content` in one step.
///
/// The text goes to a temporary file in the same directory, which is then
/// renamed over the target. An existing target's permissions carry over.
pub(crate) fn write_target(path: &Path, content: &str) -> Result<(), EditError> {
    let write_err = |source| EditError::FileWrite {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    if let Ok(existing) = std::fs::metadata(path) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(write_err)?;
    }
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
