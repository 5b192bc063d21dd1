//! Clap adapter for the editor.
//!
//! Compiled only when the `clap` Cargo feature is enabled (on by default).
//! [`EditArgs`] can be flattened into any clap `#[derive(Parser)]` struct to
//! get `schemas|show|set|enable|disable|check|gen` subcommands.
//!
//! The only bridge to the core is [`EditArgs::into_action()`], which
//! converts clap-parsed arguments into an [`EditAction`](crate::EditAction).
//! From there, all logic flows through the clap-free
//! [`Editor::handle()`](crate::Editor::handle) API.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::types::EditAction;

/// Clap-derived args for the editing subcommands.
///
/// ```ignore
/// #[derive(Parser)]
/// struct Cli {
///     #[command(flatten)]
///     edit: EditArgs,
/// }
/// ```
#[derive(Debug, Args)]
pub struct EditArgs {
    #[command(subcommand)]
    pub action: Option<EditSubcommand>,
}

/// Available editing subcommands.
#[derive(Debug, Subcommand)]
pub enum EditSubcommand {
    /// List known schemas and their target files.
    Schemas,
    /// Show the current value of every directive of a schema.
    Show {
        /// Schema id (e.g. "ssh").
        id: String,
    },
    /// Set directives, uncommenting them or appending them if missing.
    Set {
        /// Schema id (e.g. "ssh").
        id: String,
        /// One or more KEY=VALUE assignments (e.g. "Port=2222").
        #[arg(required = true, value_parser = parse_assignment)]
        assignments: Vec<(String, String)>,
    },
    /// Uncomment directives, keeping their current values.
    Enable {
        id: String,
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Comment directives out, keeping their current values.
    Disable {
        id: String,
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Run the configured syntax check for a schema's target file.
    Check { id: String },
    /// Generate a commented sample settings file.
    Gen {
        /// Write to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}

impl EditArgs {
    /// Convert clap-parsed args into a framework-agnostic `EditAction`.
    ///
    /// No subcommand maps to `EditAction::Schemas`.
    pub fn into_action(self) -> EditAction {
        match self.action {
            None | Some(EditSubcommand::Schemas) => EditAction::Schemas,
            Some(EditSubcommand::Show { id }) => EditAction::Show { id },
            Some(EditSubcommand::Set { id, assignments }) => EditAction::Set { id, assignments },
            Some(EditSubcommand::Enable { id, keys }) => EditAction::Enable { id, keys },
            Some(EditSubcommand::Disable { id, keys }) => EditAction::Disable { id, keys },
            Some(EditSubcommand::Check { id }) => EditAction::Check { id },
            Some(EditSubcommand::Gen { output }) => EditAction::Gen { output },
        }
    }
}
