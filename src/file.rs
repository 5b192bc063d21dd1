//! Settings file discovery and loading.
//!
//! Each [`SearchPath`] resolves to one directory, checked for
//! `{dir}/{file_name}`:
//!
//! - [`SearchMode::Merge`] returns every file found in priority order; the
//!   resolve pipeline merges them so later files override earlier ones.
//! - [`SearchMode::FirstMatch`] searches from the highest-priority end and
//!   returns the first file found as the sole result.
//!
//! Missing files and unresolvable directories are skipped. Only real I/O
//! errors (permissions, etc.) are propagated.

use std::path::PathBuf;

use crate::error::EditError;
use crate::types::{SearchMode, SearchPath};

/// Resolve a [`SearchPath`] to a concrete directory.
///
/// `app_name` names the platform config directory (e.g. `~/.config/{app_name}/`
/// on Linux). Returns `None` if the directory cannot be determined.
pub fn resolve_search_path(sp: &SearchPath, app_name: &str) -> Option<PathBuf> {
    match sp {
        SearchPath::Platform => {
            let proj = directories::ProjectDirs::from("", "", app_name)?;
            Some(proj.config_dir().to_path_buf())
        }
        SearchPath::Home(subdir) => {
            let user = directories::UserDirs::new()?;
            Some(user.home_dir().join(subdir))
        }
        SearchPath::Cwd => std::env::current_dir().ok(),
        SearchPath::Path(p) => Some(p.clone()),
    }
}

/// Load settings files from the search paths, respecting [`SearchMode`].
pub fn load_settings_files(
    search_paths: &[SearchPath],
    file_name: &str,
    app_name: &str,
    mode: SearchMode,
) -> Result<Vec<(PathBuf, String)>, EditError> {
    let candidates: Vec<PathBuf> = search_paths
        .iter()
        .filter_map(|sp| resolve_search_path(sp, app_name))
        .map(|dir| dir.join(file_name))
        .collect();

    let mut found = Vec::new();
    let ordered: Box<dyn Iterator<Item = PathBuf>> = match mode {
        SearchMode::Merge => Box::new(candidates.into_iter()),
        SearchMode::FirstMatch => Box::new(candidates.into_iter().rev()),
    };
    for path in ordered {
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                tracing::debug!(path = %path.display(), "loaded settings file");
                found.push((path, content));
                if mode == SearchMode::FirstMatch {
                    break;
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => return Err(EditError::SettingsIo { path, source: e }),
        }
    }
    Ok(found)
}
