//! External syntax validation hook.
//!
//! A schema may be associated with a command line (e.g. `sshd -t -f {path}`
//! or `nginx -t -c {path}`) through settings. The command is split on
//! whitespace, `{path}` is substituted with the target path, and a non-zero
//! exit is reported with the command's stderr. Schemas without a command
//! always pass.

use std::path::Path;
use std::process::Command;

use crate::error::EditError;

const PATH_PLACEHOLDER: &str = "{path}";

pub fn run_check(id: &str, command_line: &str, path: &Path) -> Result<(), EditError> {
    let target = path.to_string_lossy();
    let mut words = command_line
        .split_whitespace()
        .map(|w| w.replace(PATH_PLACEHOLDER, &target));
    let Some(program) = words.next() else {
        return Ok(());
    };
    let args: Vec<String> = words.collect();

    tracing::debug!(id, %program, ?args, "running syntax check");
    let output = Command::new(&program)
        .args(&args)
        .output()
        .map_err(|e| EditError::SyntaxCheck {
            id: id.into(),
            reason: format!("failed to run '{program}': {e}"),
        })?;

    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let reason = match stderr.trim() {
        "" => format!("'{program}' exited with {}", output.status),
        msg => msg.to_string(),
    };
    tracing::warn!(id, %reason, "syntax check failed");
    Err(EditError::SyntaxCheck {
        id: id.into(),
        reason,
    })
}
