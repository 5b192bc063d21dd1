//! Schema-driven editing of line-oriented system configuration files.
//!
//! Confedit reads and rewrites a small set of well-known service files
//! (`sshd_config`, `/etc/default/ufw`, `nginx.conf`) through declarative
//! schemas. Each schema lists the directives it manages; each directive has a
//! regular expression that finds it in the file, whether it is active or
//! commented out.
//!
//! ```ignore
//! let editor = Editor::builder().build()?;
//! let current = editor.parse("ssh")?;
//! let changes = ChangeSet::new().with("Port", FieldValue::enabled("2222"));
//! editor.apply("ssh", &changes)?;
//! ```
//!
//! # Reading
//!
//! [`Editor::parse`] reads the target file and reports, for every field, the
//! first matching line: its value, whether it is active, and its zero-based
//! line number. A field with no matching line reports its schema default as
//! disabled, with no line number. Parsing never fails on content; only a
//! missing or unreadable file is an error.
//!
//! # Writing
//!
//! [`Editor::apply`] patches the file minimally:
//!
//! - A directive found in the file is rewritten in place, keeping its
//!   indentation. A disabled value is written behind the schema's comment
//!   token.
//! - A directive already in the requested state is not touched, so applying
//!   the result of `parse` to the same file writes nothing.
//! - A missing directive that should be active is appended as a new final
//!   line. A missing directive that should be disabled is skipped.
//! - Keys that are not fields of the schema are ignored.
//! - Values containing a line break are skipped and reported as rejected.
//!
//! Every other line, each line's separator (`\n` or `\r\n`) and the
//! presence of a trailing newline are reproduced exactly. Files are written
//! only when at least one line differs, by renaming a temporary file over
//! the target. [`Editor::write_raw`] replaces the whole text the same way.
//!
//! # Line formats
//!
//! | Schema | Style | Example |
//! |--------|-------|---------|
//! | `ssh` | key, space, value | `Port 2222` |
//! | `ufw` | key, `=`, value | `DEFAULT_INPUT_POLICY=DROP` |
//! | `nginx` | key, space, value, `;` | `gzip on;` |
//!
//! # Concurrency
//!
//! The schema registry is immutable and shared. Editors hold no per-file
//! state. Each `apply` is one read-modify-write cycle under an exclusive
//! advisory lock on the target file (`lock_writes`, on by default), so
//! concurrent writers to the same file never lose each other's changes.
//!
//! # Settings
//!
//! Where the target files live, which syntax check to run per schema and
//! whether writes are locked come from [`EditorSettings`], resolved through
//! layers:
//!
//! ```text
//! Compiled defaults     #[config(default = ...)]
//!        ↑ overridden by
//! Settings files        confedit.toml on the search paths, later paths win
//!        ↑ overridden by
//! Environment vars      CONFEDIT__KEY
//!        ↑ overridden by
//! Overrides             EditorBuilder::target_path() and friends
//! ```
//!
//! Strict mode is on by default: an unknown key in a settings file fails
//! with its file path and line number. Schema ids used in `paths` and
//! `syntax_check` must name registered schemas.
//!
//! # Syntax checks
//!
//! A schema may be given a command line whose `{path}` placeholder is
//! replaced by the target file, e.g. `nginx -t -c {path}`. The command runs
//! without a shell; a non-zero exit fails with its stderr.
//!
//! # Clap adapter
//!
//! The `cli` module (behind the `clap` feature) provides [`EditArgs`], which
//! converts into an [`EditAction`] for [`Editor::handle`]. The `confedit`
//! binary is built on it.

pub mod error;
pub mod schema;
pub mod types;

mod builder;
#[cfg(feature = "clap")]
mod cli;
mod editor;
mod env;
mod file;
mod format;
mod lines;
mod lock;
mod matcher;
pub(crate) mod merge;
mod ops;
mod overrides;
mod parser;
mod patch;
mod resolve;
mod settings;
mod syntax;
mod validate;
mod value;

#[cfg(test)]
mod fixtures;

pub use builder::EditorBuilder;
#[cfg(feature = "clap")]
pub use cli::{EditArgs, EditSubcommand};
pub use editor::Editor;
pub use error::EditError;
pub use ops::{EditResult, SchemaEntry};
pub use parser::parse_content;
pub use patch::{Patch, PatchReport, patch_content};
pub use schema::{Field, FieldKind, Schema, get_schema, list_schemas};
pub use settings::EditorSettings;
pub use types::{EditAction, SearchMode, SearchPath};
pub use value::{ChangeSet, FieldValue, ParsedConfig};

/// Parse the system file of schema `id`.
pub fn parse_config(id: &str) -> Result<ParsedConfig, EditError> {
    Editor::default().parse(id)
}

/// Apply `changes` to the system file of schema `id`.
pub fn apply_changes(id: &str, changes: &ChangeSet) -> Result<PatchReport, EditError> {
    Editor::default().apply(id, changes)
}

/// Syntax check with no command configured; only checks that `id` is known.
/// Use an [`Editor`] built with [`EditorBuilder::syntax_check`] to run a
/// real check.
pub fn validate_syntax(id: &str) -> Result<(), EditError> {
    Editor::default().validate_syntax(id)
}
