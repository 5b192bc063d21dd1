use std::collections::HashMap;
use std::path::PathBuf;

use crate::builder::EditorBuilder;
use crate::error::EditError;
use crate::lock::TargetLock;
use crate::ops::{EditResult, SchemaEntry};
use crate::parser;
use crate::patch::{self, PatchReport};
use crate::schema::{self, Schema};
use crate::settings::{self, EditorSettings};
use crate::syntax;
use crate::types::EditAction;
use crate::validate;
use crate::value::{ChangeSet, FieldValue, ParsedConfig};

/// Reads and patches the target files of the registered schemas.
///
/// An editor holds no per-file state; it only knows where each schema's file
/// lives and how writes are guarded and checked. Concurrent calls on
/// different files are independent. Calls on the same file are serialized
/// by an advisory lock unless `lock_writes` is off.
#[derive(Debug, Clone)]
pub struct Editor {
    paths: HashMap<String, PathBuf>,
    syntax_checks: HashMap<String, String>,
    lock_writes: bool,
}

impl Default for Editor {
    /// System target paths, no syntax checks, locked writes.
    fn default() -> Self {
        Self {
            paths: HashMap::new(),
            syntax_checks: HashMap::new(),
            lock_writes: true,
        }
    }
}

impl Editor {
    pub fn builder() -> EditorBuilder {
        EditorBuilder::new()
    }

    pub fn from_settings(settings: EditorSettings) -> Result<Self, EditError> {
        validate::validate_schema_ids(&settings)?;
        Ok(Self {
            paths: settings.paths.unwrap_or_default(),
            syntax_checks: settings.syntax_check.unwrap_or_default(),
            lock_writes: settings.lock_writes,
        })
    }

    pub fn schema(&self, id: &str) -> Result<&'static Schema, EditError> {
        schema::get_schema(id).ok_or_else(|| EditError::UnknownSchema(id.into()))
    }

    /// The file a schema is read from and written to.
    pub fn target_path(&self, schema: &Schema) -> PathBuf {
        self.paths
            .get(&schema.id)
            .cloned()
            .unwrap_or_else(|| PathBuf::from(&schema.file_path))
    }

    /// Schemas whose target file currently exists.
    pub fn available_schemas(&self) -> Vec<&'static Schema> {
        schema::list_schemas()
            .iter()
            .filter(|s| self.target_path(s).is_file())
            .collect()
    }

    /// Current value of every directive of schema `id`.
    pub fn parse(&self, id: &str) -> Result<ParsedConfig, EditError> {
        let schema = self.schema(id)?;
        parser::parse_file(schema, &self.target_path(schema))
    }

    /// Write `changes` into the target file of schema `id`.
    ///
    /// Unknown keys are skipped. The file is rewritten once, and only if at
    /// least one line differs.
    pub fn apply(&self, id: &str, changes: &ChangeSet) -> Result<PatchReport, EditError> {
        let schema = self.schema(id)?;
        patch::apply_to_file(schema, &self.target_path(schema), changes, self.lock_writes)
    }

    /// Run the configured external syntax check for schema `id`. Passes when
    /// no check is configured.
    pub fn validate_syntax(&self, id: &str) -> Result<(), EditError> {
        let schema = self.schema(id)?;
        match self.syntax_checks.get(id) {
            Some(command) => syntax::run_check(id, command, &self.target_path(schema)),
            None => Ok(()),
        }
    }

    /// Whole target file text.
    pub fn read_raw(&self, id: &str) -> Result<String, EditError> {
        let schema = self.schema(id)?;
        parser::read_target(&self.target_path(schema))
    }

    /// Replace the whole target file text of schema `id`.
    ///
    /// The target must exist. The new text is written to a temporary file
    /// beside it and renamed into place, under the same lock as
    /// [`apply`](Self::apply). Nothing about the content is checked.
    pub fn write_raw(&self, id: &str, content: &str) -> Result<(), EditError> {
        let schema = self.schema(id)?;
        let path = self.target_path(schema);
        let _guard = if self.lock_writes {
            Some(TargetLock::acquire(&path)?)
        } else {
            None
        };
        patch::write_target(&path, content)?;
        tracing::info!(schema = %schema.id, path = %path.display(), "config file replaced");
        Ok(())
    }

    /// Handle an [`EditAction`] and print the result to stdout.
    pub fn handle_and_print(&self, action: &EditAction) -> Result<(), EditError> {
        let result = self.handle(action)?;
        println!("{result}");
        Ok(())
    }

    /// Handle an [`EditAction`].
    ///
    /// Unlike [`apply`](Self::apply), actions address directives by name on
    /// behalf of a user, so unknown keys and ill-typed values are rejected
    /// before anything is written.
    pub fn handle(&self, action: &EditAction) -> Result<EditResult, EditError> {
        match action {
            EditAction::Schemas => Ok(EditResult::Schemas(
                schema::list_schemas()
                    .iter()
                    .map(|s| {
                        let path = self.target_path(s);
                        SchemaEntry {
                            id: s.id.clone(),
                            name: s.name.clone(),
                            present: path.is_file(),
                            path,
                        }
                    })
                    .collect(),
            )),
            EditAction::Show { id } => {
                let parsed = self.parse(id)?;
                Ok(EditResult::Values {
                    id: id.clone(),
                    entries: parsed
                        .to_changes()
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.clone()))
                        .collect(),
                })
            }
            EditAction::Set { id, assignments } => {
                let schema = self.schema(id)?;
                let mut changes = ChangeSet::new();
                for (key, value) in assignments {
                    let field = schema
                        .field(key)
                        .ok_or_else(|| EditError::KeyNotFound(key.clone()))?;
                    field
                        .check_value(value)
                        .map_err(|reason| EditError::InvalidValue {
                            key: key.clone(),
                            reason,
                        })?;
                    changes.insert(key.clone(), FieldValue::enabled(value.clone()));
                }
                self.patched(id, &changes)
            }
            EditAction::Enable { id, keys } => self.toggle(id, keys, true),
            EditAction::Disable { id, keys } => self.toggle(id, keys, false),
            EditAction::Check { id } => {
                self.validate_syntax(id)?;
                Ok(EditResult::SyntaxOk { id: id.clone() })
            }
            EditAction::Gen { output } => {
                let template = settings::generate_template();
                match output {
                    Some(path) => {
                        std::fs::write(path, &template).map_err(|e| EditError::FileWrite {
                            path: path.clone(),
                            source: e,
                        })?;
                        Ok(EditResult::TemplateWritten { path: path.clone() })
                    }
                    None => Ok(EditResult::Template(template)),
                }
            }
        }
    }

    fn toggle(&self, id: &str, keys: &[String], enabled: bool) -> Result<EditResult, EditError> {
        let parsed = self.parse(id)?;
        let mut changes = ChangeSet::new();
        for key in keys {
            let current = parsed
                .get(key)
                .ok_or_else(|| EditError::KeyNotFound(key.clone()))?;
            changes.insert(
                key.clone(),
                FieldValue {
                    enabled,
                    ..current.clone()
                },
            );
        }
        self.patched(id, &changes)
    }

    fn patched(&self, id: &str, changes: &ChangeSet) -> Result<EditResult, EditError> {
        let report = self.apply(id, changes)?;
        Ok(EditResult::Patched {
            id: id.into(),
            report,
        })
    }
}
