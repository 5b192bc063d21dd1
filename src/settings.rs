//! Editor settings: which files the schemas point at and how they are
//! written and checked.

use std::collections::HashMap;
use std::path::PathBuf;

use confique::Config;
use serde::{Deserialize, Serialize};

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EditorSettings {
    /// Hold an exclusive advisory lock on a target file while changes are
    /// applied to it.
    #[config(default = true)]
    pub lock_writes: bool,

    /// Target file per schema id, replacing the system location.
    /// Example: { ssh = "/srv/chroot/etc/ssh/sshd_config" }
    pub paths: Option<HashMap<String, PathBuf>>,

    /// Syntax check command line per schema id. `{path}` is replaced by the
    /// target file. Example: { nginx = "nginx -t -c {path}" }
    pub syntax_check: Option<HashMap<String, String>>,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            lock_writes: true,
            paths: None,
            syntax_check: None,
        }
    }
}

/// Generate a commented TOML template from the settings doc comments.
pub fn generate_template() -> String {
    confique::toml::template::<EditorSettings>(confique::toml::FormatOptions::default())
}
