//! Settings resolution: merge all layers and produce [`EditorSettings`].
//!
//! Operates on pre-loaded data (`SettingsInput`) with no I/O, so the full
//! pipeline is testable with synthetic inputs. Steps:
//!
//! 1. Validate each file (if strict mode)
//! 2. Parse and merge settings files (later overrides earlier)
//! 3. Merge env vars on top
//! 4. Merge programmatic overrides on top (highest priority)
//! 5. Deserialize into the settings layer; confique fills defaults
//! 6. Check that every schema id named in the result exists

use std::path::PathBuf;

use confique::Config;
use toml::{Table, Value};

use crate::env;
use crate::error::EditError;
use crate::merge::merge_layer;
use crate::overrides;
use crate::settings::EditorSettings;
use crate::validate;

/// All pre-loaded data needed to resolve settings. No I/O happens here.
#[derive(Debug, Default)]
pub struct SettingsInput {
    /// File contents in precedence order: first = lowest priority, last = highest.
    pub files: Vec<(PathBuf, String)>,
    /// Raw environment variable pairs (`std::env::vars().collect()` or synthetic data).
    pub env_vars: Vec<(String, String)>,
    /// Env var prefix (e.g. `"CONFEDIT"`). `None` means env disabled.
    pub env_prefix: Option<String>,
    /// Overrides as `(dotted_key, value)` pairs.
    pub overrides: Vec<(String, Value)>,
    /// Whether to reject unknown keys in settings files.
    pub strict: bool,
}

pub fn resolve(input: SettingsInput) -> Result<EditorSettings, EditError> {
    let mut merged = Table::new();
    for (path, content) in &input.files {
        if input.strict {
            validate::validate_unknown_keys(content, path)?;
        }
        let table: Table = toml::from_str(content).map_err(|e| EditError::ParseError {
            path: path.clone(),
            source: e,
        })?;
        merge_layer(&mut merged, table);
    }

    if let Some(prefix) = &input.env_prefix {
        merge_layer(&mut merged, env::env_to_table(prefix, input.env_vars));
    }

    if !input.overrides.is_empty() {
        merge_layer(&mut merged, overrides::overrides_to_table(&input.overrides));
    }

    let layer: <EditorSettings as Config>::Layer = Value::Table(merged)
        .try_into()
        .map_err(|e: toml::de::Error| EditError::InvalidValue {
            key: "<merged>".into(),
            reason: e.to_string(),
        })?;

    let settings = EditorSettings::builder().preloaded(layer).load()?;
    validate::validate_schema_ids(&settings)?;
    Ok(settings)
}
