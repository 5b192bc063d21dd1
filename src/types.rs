//! Shared types: where settings files are looked up and which editing
//! actions exist.
//!
//! # Settings discovery
//!
//! Settings files (`confedit.toml` by default) are searched in a list of
//! [`SearchPath`]s given in **priority-ascending** order: the last entry
//! wins. The default list is `[Path("/etc/confedit"), Platform]`, so a
//! user-level file overrides the system-wide one.
//!
//! [`SearchMode`] decides what happens when more than one file is found:
//! merge them key by key, or use only the highest-priority one.

use std::path::PathBuf;

/// Where to search for settings files.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPath {
    /// Platform config directory (XDG on Linux, ~/Library/Application Support on macOS).
    Platform,
    /// A subdirectory under the user's home directory, e.g. `Home(".confedit")`.
    Home(&'static str),
    /// Current working directory.
    Cwd,
    /// An explicit directory.
    Path(PathBuf),
}

/// How multiple settings files are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchMode {
    /// Deep-merge every file found; later paths override earlier ones.
    #[default]
    Merge,
    /// Use only the highest-priority file found.
    FirstMatch,
}

/// An editing operation, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq)]
pub enum EditAction {
    /// List known schemas and their target files.
    Schemas,
    /// Show the current value of every directive of a schema.
    Show { id: String },
    /// Set directives to values, enabling them.
    Set {
        id: String,
        assignments: Vec<(String, String)>,
    },
    /// Uncomment directives, keeping their current values.
    Enable { id: String, keys: Vec<String> },
    /// Comment directives out, keeping their current values.
    Disable { id: String, keys: Vec<String> },
    /// Run the schema's external syntax check.
    Check { id: String },
    /// Generate a commented settings template.
    Gen { output: Option<PathBuf> },
}
