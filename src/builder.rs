use std::path::PathBuf;

use crate::editor::Editor;
use crate::error::EditError;
use crate::file;
use crate::resolve::{self, SettingsInput};
use crate::settings::EditorSettings;
use crate::types::{SearchMode, SearchPath};

const DEFAULT_APP_NAME: &str = "confedit";

/// Builder for an [`Editor`] whose settings come from layered sources.
///
/// Controls two orthogonal axes (see [`types`](crate::types) for the full picture):
///
/// - **Discovery**: [`search_paths()`](Self::search_paths): where to look for settings files.
/// - **Resolution**: [`search_mode()`](Self::search_mode): merge all or pick one.
///
/// Programmatic settings ([`target_path()`](Self::target_path),
/// [`syntax_check()`](Self::syntax_check), [`lock_writes()`](Self::lock_writes))
/// sit on top of files and environment variables.
#[derive(Debug, Clone)]
pub struct EditorBuilder {
    app_name: String,
    file_name: Option<String>,
    search_paths: Option<Vec<SearchPath>>,
    search_mode: SearchMode,
    env_prefix: Option<String>,
    env_enabled: bool,
    strict: bool,
    overrides: Vec<(String, toml::Value)>,
}

impl Default for EditorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorBuilder {
    pub fn new() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            file_name: None,
            search_paths: None,
            search_mode: SearchMode::default(),
            env_prefix: None,
            env_enabled: true,
            strict: true,
            overrides: Vec::new(),
        }
    }

    /// Set the application name. This derives:
    /// - `file_name` → `"{app_name}.toml"`
    /// - the platform config directory searched by [`SearchPath::Platform`]
    /// - `env_prefix` → `"{APP_NAME}"` (uppercased)
    pub fn app_name(mut self, name: &str) -> Self {
        self.app_name = name.to_string();
        self
    }

    /// Override the settings file name (default: `"{app_name}.toml"`).
    pub fn file_name(mut self, name: &str) -> Self {
        self.file_name = Some(name.to_string());
        self
    }

    /// Replace the default search paths entirely.
    ///
    /// Paths are listed in **priority-ascending** order: the last entry has the
    /// highest priority.
    pub fn search_paths(mut self, paths: Vec<SearchPath>) -> Self {
        self.search_paths = Some(paths);
        self
    }

    /// Append a search path without replacing the defaults.
    pub fn add_search_path(mut self, path: SearchPath) -> Self {
        self.search_paths
            .get_or_insert_with(default_search_paths)
            .push(path);
        self
    }

    /// Set the search mode (default: [`SearchMode::Merge`]).
    pub fn search_mode(mut self, mode: SearchMode) -> Self {
        self.search_mode = mode;
        self
    }

    /// Override the environment variable prefix (default: uppercased `app_name`).
    pub fn env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Disable environment variable loading entirely.
    pub fn no_env(mut self) -> Self {
        self.env_enabled = false;
        self
    }

    /// Enable or disable strict mode (default: `true`).
    /// In strict mode, unknown keys in settings files produce errors.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Override one settings key by dotted name. `None` values are ignored,
    /// which suits optional clap args.
    pub fn override_value<V: Into<toml::Value>>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(v) = value {
            self.overrides.push((key.to_string(), v.into()));
        }
        self
    }

    /// Point schema `id` at a different target file.
    pub fn target_path(self, id: &str, path: impl Into<PathBuf>) -> Self {
        let path = path.into().to_string_lossy().into_owned();
        self.override_value(&format!("paths.{id}"), Some(path))
    }

    /// Register the syntax check command line for schema `id`.
    pub fn syntax_check(self, id: &str, command: &str) -> Self {
        self.override_value(&format!("syntax_check.{id}"), Some(command))
    }

    pub fn lock_writes(self, lock: bool) -> Self {
        self.override_value("lock_writes", Some(lock))
    }

    fn effective_file_name(&self) -> String {
        match &self.file_name {
            Some(name) => name.clone(),
            None => format!("{}.toml", self.app_name),
        }
    }

    fn effective_search_paths(&self) -> Vec<SearchPath> {
        self.search_paths.clone().unwrap_or_else(default_search_paths)
    }

    /// Resolve the effective env prefix (None if env disabled).
    fn effective_env_prefix(&self) -> Option<String> {
        if !self.env_enabled {
            return None;
        }
        Some(
            self.env_prefix
                .clone()
                .unwrap_or_else(|| self.app_name.to_uppercase()),
        )
    }

    fn build_input(&self) -> Result<SettingsInput, EditError> {
        let files = file::load_settings_files(
            &self.effective_search_paths(),
            &self.effective_file_name(),
            &self.app_name,
            self.search_mode,
        )?;

        Ok(SettingsInput {
            files,
            env_vars: std::env::vars().collect(),
            env_prefix: self.effective_env_prefix(),
            overrides: self.overrides.clone(),
            strict: self.strict,
        })
    }

    /// Load and resolve the settings through all layers.
    pub fn settings(&self) -> Result<EditorSettings, EditError> {
        resolve::resolve(self.build_input()?)
    }

    pub fn build(self) -> Result<Editor, EditError> {
        let settings = self.settings()?;
        tracing::debug!(?settings, "editor settings resolved");
        Editor::from_settings(settings)
    }
}

fn default_search_paths() -> Vec<SearchPath> {
    vec![SearchPath::Path(PathBuf::from("/etc/confedit")), SearchPath::Platform]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::SSHD_CONFIG;
    use std::fs;
    use tempfile::TempDir;

    fn isolated(dir: &TempDir) -> EditorBuilder {
        EditorBuilder::new()
            .search_paths(vec![SearchPath::Path(dir.path().to_path_buf())])
            .no_env()
    }

    #[test]
    fn defaults_derive_from_app_name() {
        let builder = EditorBuilder::new();
        assert_eq!(builder.effective_file_name(), "confedit.toml");
        assert_eq!(builder.effective_env_prefix(), Some("CONFEDIT".to_string()));

        let builder = builder.app_name("hostcfg");
        assert_eq!(builder.effective_file_name(), "hostcfg.toml");
        assert_eq!(builder.effective_env_prefix(), Some("HOSTCFG".to_string()));
    }

    #[test]
    fn explicit_file_name_and_prefix_win() {
        let builder = EditorBuilder::new()
            .file_name("custom.toml")
            .env_prefix("CUSTOM");
        assert_eq!(builder.effective_file_name(), "custom.toml");
        assert_eq!(builder.effective_env_prefix(), Some("CUSTOM".to_string()));
    }

    #[test]
    fn no_env_disables_prefix() {
        assert_eq!(EditorBuilder::new().no_env().effective_env_prefix(), None);
    }

    #[test]
    fn add_search_path_appends_to_defaults() {
        let builder = EditorBuilder::new().add_search_path(SearchPath::Cwd);
        assert_eq!(
            builder.effective_search_paths(),
            vec![
                SearchPath::Path("/etc/confedit".into()),
                SearchPath::Platform,
                SearchPath::Cwd
            ]
        );
    }

    #[test]
    fn search_paths_replace() {
        let builder = EditorBuilder::new()
            .search_paths(vec![SearchPath::Cwd])
            .add_search_path(SearchPath::Platform);
        assert_eq!(
            builder.effective_search_paths(),
            vec![SearchPath::Cwd, SearchPath::Platform]
        );
    }

    #[test]
    fn override_none_skipped() {
        let builder = EditorBuilder::new().override_value::<bool>("lock_writes", None);
        assert!(builder.overrides.is_empty());
    }

    #[test]
    fn settings_from_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("confedit.toml"),
            "lock_writes = false\n[paths]\nufw = \"/srv/ufw\"\n",
        )
        .unwrap();

        let settings = isolated(&dir).settings().unwrap();
        assert!(!settings.lock_writes);
        assert_eq!(
            settings.paths.unwrap().get("ufw"),
            Some(&PathBuf::from("/srv/ufw"))
        );
    }

    #[test]
    fn programmatic_settings_override_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("confedit.toml"),
            "lock_writes = false\n[paths]\nssh = \"/from/file\"\n",
        )
        .unwrap();

        let settings = isolated(&dir)
            .target_path("ssh", "/from/code")
            .syntax_check("nginx", "nginx -t -c {path}")
            .lock_writes(true)
            .settings()
            .unwrap();
        assert!(settings.lock_writes);
        assert_eq!(
            settings.paths.unwrap().get("ssh"),
            Some(&PathBuf::from("/from/code"))
        );
        assert_eq!(
            settings.syntax_check.unwrap().get("nginx").map(String::as_str),
            Some("nginx -t -c {path}")
        );
    }

    #[test]
    fn strict_rejects_unknown_key() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("confedit.toml"), "lock = false\n").unwrap();

        assert!(matches!(
            isolated(&dir).settings(),
            Err(EditError::UnknownKeys(_))
        ));
        assert!(isolated(&dir).strict(false).settings().is_ok());
    }

    #[test]
    fn first_match_uses_highest_priority_file_only() {
        let (low, high) = (TempDir::new().unwrap(), TempDir::new().unwrap());
        fs::write(
            low.path().join("confedit.toml"),
            "[paths]\nufw = \"/low/ufw\"\n",
        )
        .unwrap();
        fs::write(high.path().join("confedit.toml"), "lock_writes = false\n").unwrap();

        let settings = EditorBuilder::new()
            .search_paths(vec![
                SearchPath::Path(low.path().to_path_buf()),
                SearchPath::Path(high.path().to_path_buf()),
            ])
            .search_mode(SearchMode::FirstMatch)
            .no_env()
            .settings()
            .unwrap();
        assert!(!settings.lock_writes);
        assert!(settings.paths.is_none());
    }

    #[test]
    fn unknown_schema_in_settings_fails_build() {
        let dir = TempDir::new().unwrap();
        let result = isolated(&dir).target_path("fstab", "/etc/fstab").build();
        assert!(matches!(result, Err(EditError::UnknownSchema(id)) if id == "fstab"));
    }

    #[test]
    fn built_editor_edits_configured_target() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("sshd_config");
        fs::write(&target, SSHD_CONFIG).unwrap();

        let editor = isolated(&dir).target_path("ssh", &target).build().unwrap();
        let parsed = editor.parse("ssh").unwrap();
        assert_eq!(parsed.get("X11Forwarding").unwrap().value, "yes");
    }
}
