//! Results of editing actions, returned to the caller for display.

use std::fmt;
use std::path::PathBuf;

use crate::patch::PatchReport;
use crate::value::FieldValue;

/// One row of a schema listing.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaEntry {
    pub id: String,
    pub name: String,
    pub path: PathBuf,
    /// Whether the target file currently exists.
    pub present: bool,
}

/// Result of an [`EditAction`](crate::EditAction).
#[derive(Debug, Clone, PartialEq)]
pub enum EditResult {
    /// Known schemas with their effective target files.
    Schemas(Vec<SchemaEntry>),
    /// Current directive values of one schema, in field order.
    Values {
        id: String,
        entries: Vec<(String, FieldValue)>,
    },
    /// Outcome of writing changes.
    Patched { id: String, report: PatchReport },
    /// The external syntax check passed.
    SyntaxOk { id: String },
    /// A generated settings template.
    Template(String),
    /// Confirmation that a template was written to a file.
    TemplateWritten { path: PathBuf },
}

impl fmt::Display for EditResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditResult::Schemas(entries) => {
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}\t{}\t{}", entry.id, entry.name, entry.path.display())?;
                    if !entry.present {
                        write!(f, " (missing)")?;
                    }
                }
                Ok(())
            }
            EditResult::Values { entries, .. } => {
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    let marker = if value.enabled { "" } else { "# " };
                    write!(f, "{marker}{key} = {}", value.value)?;
                    match value.line_index {
                        Some(index) => write!(f, "  (line {})", index + 1)?,
                        None => write!(f, "  (not set, default)")?,
                    }
                }
                Ok(())
            }
            EditResult::Patched { id, report } => write!(f, "{id}: {report}"),
            EditResult::SyntaxOk { id } => write!(f, "{id}: syntax OK"),
            EditResult::Template(t) => write!(f, "{t}"),
            EditResult::TemplateWritten { path } => {
                write!(f, "Settings template written to {}", path.display())
            }
        }
    }
}
