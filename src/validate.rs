//! Settings validation.
//!
//! Strict mode uses `serde_ignored` to deserialize a settings file into the
//! all-optional settings layer and capture any key the layer doesn't consume.
//! Each unknown key is reported with its file path and best-effort line
//! number. Separately, schema ids used as map keys (`paths`,
//! `syntax_check`) must name registered schemas.

use std::path::Path;

use confique::Config;

use crate::error::EditError;
use crate::schema::get_schema;
use crate::settings::EditorSettings;

type SettingsLayer = <EditorSettings as Config>::Layer;

/// Validate that a TOML settings file contains no unknown keys.
pub fn validate_unknown_keys(content: &str, path: &Path) -> Result<(), EditError> {
    let mut unknown_keys: Vec<String> = Vec::new();

    let deserializer = toml::Deserializer::new(content);
    let _layer: SettingsLayer = serde_ignored::deserialize(deserializer, |ignored_path| {
        unknown_keys.push(ignored_path.to_string());
    })
    .map_err(|e| EditError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    if unknown_keys.is_empty() {
        return Ok(());
    }

    let errors: Vec<EditError> = unknown_keys
        .into_iter()
        .map(|key| {
            let line = find_key_line(content, &key);
            EditError::UnknownKey {
                key,
                path: path.to_path_buf(),
                line,
            }
        })
        .collect();

    Err(EditError::UnknownKeys(errors))
}

/// Every schema id named in the settings must exist in the registry.
pub fn validate_schema_ids(settings: &EditorSettings) -> Result<(), EditError> {
    let path_ids = settings.paths.iter().flat_map(|m| m.keys());
    let check_ids = settings.syntax_check.iter().flat_map(|m| m.keys());
    match path_ids.chain(check_ids).find(|id| get_schema(id).is_none()) {
        Some(id) => Err(EditError::UnknownSchema(id.clone())),
        None => Ok(()),
    }
}

/// Find the 1-indexed line number of a key in settings TOML.
///
/// Tracks `[section]` headers and matches a dotted key's leaf only inside
/// its section. Returns 0 when the key cannot be located.
fn find_key_line(content: &str, dotted_key: &str) -> usize {
    let (section, leaf) = match dotted_key.rsplit_once('.') {
        Some((section, leaf)) => (section, leaf),
        None => ("", dotted_key),
    };

    let mut current_section = String::new();
    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if let Some(header) = trimmed.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
            current_section = header.trim().to_string();
            continue;
        }
        if current_section == section
            && let Some(after_key) = trimmed.strip_prefix(leaf)
            && after_key.trim_start().starts_with('=')
        {
            return i + 1;
        }
    }
    0
}
