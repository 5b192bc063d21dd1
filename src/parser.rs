//! Read the current effective value of every directive in a schema.
//!
//! Parsing decodes the file lossily, so a stray non-UTF-8 byte (say a
//! Latin-1 comment) does not hide the directives around it. Anything that
//! writes the file back or returns its text needs valid UTF-8 and fails with
//! [`EditError::FileRead`] otherwise, since a lossy round trip would change
//! bytes outside the edited lines.

use std::collections::HashMap;
use std::path::Path;

use crate::error::EditError;
use crate::lines::Lines;
use crate::matcher::FieldMatcher;
use crate::schema::Schema;
use crate::value::{FieldValue, ParsedConfig};

/// Pure function: snapshot every field of `schema` from file text.
///
/// Each field is resolved independently from the first line its pattern
/// matches. Fields that never match (including fields whose pattern does not
/// compile) get their default, disabled, with no line index. The result
/// always has exactly one entry per schema field.
pub fn parse_content(schema: &Schema, content: &str) -> ParsedConfig {
    let lines = Lines::split(content);
    let mut values = HashMap::with_capacity(schema.fields.len());

    for field in &schema.fields {
        let value = match FieldMatcher::new(field).find_first(&lines.lines) {
            Some(found) => FieldValue {
                value: found.value,
                enabled: found.enabled,
                line_index: Some(found.index),
            },
            None => FieldValue {
                value: field.default.clone(),
                enabled: false,
                line_index: None,
            },
        };
        values.insert(field.key.clone(), value);
    }

    ParsedConfig {
        schema: schema.clone(),
        values,
    }
}

/// I/O wrapper: read `path` and parse it against `schema`.
pub fn parse_file(schema: &Schema, path: &Path) -> Result<ParsedConfig, EditError> {
    let bytes = std::fs::read(path).map_err(|e| EditError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let parsed = parse_content(schema, &String::from_utf8_lossy(&bytes));
    tracing::debug!(
        schema = %schema.id,
        path = %path.display(),
        found = parsed.values.values().filter(|v| !v.is_absent()).count(),
        "parsed config"
    );
    Ok(parsed)
}

/// Whole file text; fails on invalid UTF-8.
pub(crate) fn read_target(path: &Path) -> Result<String, EditError> {
    std::fs::read_to_string(path).map_err(|e| EditError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{NGINX_CONF, SSHD_CONFIG, UFW_DEFAULTS};
    use crate::schema::get_schema;
    use std::fs;
    use tempfile::TempDir;

    fn ssh() -> &'static Schema {
        get_schema("ssh").unwrap()
    }

    #[test]
    fn present_and_enabled() {
        let parsed = parse_content(ssh(), "# header\nPort 22\n");
        assert_eq!(
            parsed.get("Port").unwrap(),
            &FieldValue {
                value: "22".into(),
                enabled: true,
                line_index: Some(1),
            }
        );
    }

    #[test]
    fn present_but_commented() {
        let parsed = parse_content(ssh(), "Include /etc/ssh/sshd_config.d/*.conf\n#Port 22\n");
        assert_eq!(
            parsed.get("Port").unwrap(),
            &FieldValue {
                value: "22".into(),
                enabled: false,
                line_index: Some(1),
            }
        );
    }

    #[test]
    fn absent_uses_default() {
        let parsed = parse_content(ssh(), "Port 22\n");
        assert_eq!(
            parsed.get("PermitRootLogin").unwrap(),
            &FieldValue {
                value: "prohibit-password".into(),
                enabled: false,
                line_index: None,
            }
        );
    }

    #[test]
    fn one_value_per_field_even_for_empty_file() {
        for schema in crate::schema::list_schemas() {
            let parsed = parse_content(schema, "");
            assert_eq!(parsed.values.len(), schema.fields.len());
            assert!(parsed.values.values().all(FieldValue::is_absent));
        }
    }

    #[test]
    fn duplicate_directive_first_occurrence_wins() {
        let parsed = parse_content(ssh(), "X11Forwarding yes\nX11Forwarding no\n");
        let x11 = parsed.get("X11Forwarding").unwrap();
        assert_eq!(x11.value, "yes");
        assert_eq!(x11.line_index, Some(0));
    }

    #[test]
    fn malformed_pattern_degrades_only_that_field() {
        let mut schema = ssh().clone();
        schema.fields[0].pattern = r"^Port\s+(\d+".into();
        let parsed = parse_content(&schema, "Port 2222\nX11Forwarding yes\n");

        let port = parsed.get("Port").unwrap();
        assert_eq!(port.value, "22");
        assert!(port.is_absent());
        assert_eq!(parsed.get("X11Forwarding").unwrap().value, "yes");
    }

    #[test]
    fn stock_sshd_config() {
        let parsed = parse_content(ssh(), SSHD_CONFIG);
        let port = parsed.get("Port").unwrap();
        assert_eq!((port.value.as_str(), port.enabled), ("22", false));
        let root = parsed.get("PermitRootLogin").unwrap();
        assert_eq!((root.value.as_str(), root.enabled), ("prohibit-password", false));
        let x11 = parsed.get("X11Forwarding").unwrap();
        assert_eq!((x11.value.as_str(), x11.enabled), ("yes", true));
    }

    #[test]
    fn quoted_ufw_policy_is_unquoted() {
        let parsed = parse_content(get_schema("ufw").unwrap(), UFW_DEFAULTS);
        let input = parsed.get("DEFAULT_INPUT_POLICY").unwrap();
        assert_eq!(input.value, "DROP");
        assert!(input.enabled);
        assert_eq!(parsed.get("IPV6").unwrap().value, "yes");
    }

    #[test]
    fn nginx_block_directives() {
        let parsed = parse_content(get_schema("nginx").unwrap(), NGINX_CONF);
        assert_eq!(parsed.get("worker_processes").unwrap().value, "auto");
        assert_eq!(parsed.get("worker_connections").unwrap().value, "768");
        assert!(parsed.get("keepalive_timeout").unwrap().is_absent());
        let gzip = parsed.get("gzip").unwrap();
        assert_eq!((gzip.value.as_str(), gzip.enabled), ("on", true));
    }

    #[test]
    fn crlf_file_parses_like_lf() {
        let parsed = parse_content(ssh(), "#Port 22\r\nPasswordAuthentication no\r\n");
        let auth = parsed.get("PasswordAuthentication").unwrap();
        assert_eq!(auth.value, "no");
        assert_eq!(auth.line_index, Some(1));
    }

    #[test]
    fn parse_file_reads_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sshd_config");
        fs::write(&path, "Port 2200\n").unwrap();
        let parsed = parse_file(ssh(), &path).unwrap();
        assert_eq!(parsed.get("Port").unwrap().value, "2200");
    }

    #[test]
    fn parse_file_missing_is_read_error() {
        let dir = TempDir::new().unwrap();
        let result = parse_file(ssh(), &dir.path().join("nope"));
        assert!(matches!(result, Err(EditError::FileRead { .. })));
    }

    #[test]
    fn latin1_comment_does_not_block_parsing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sshd_config");
        let mut bytes = b"# Gr\xfc\xdfe aus M\xfcnchen\n".to_vec();
        bytes.extend_from_slice(b"Port 2222\nX11Forwarding no\n");
        fs::write(&path, bytes).unwrap();

        let parsed = parse_file(get_schema("ssh").unwrap(), &path).unwrap();
        let port = parsed.get("Port").unwrap();
        assert_eq!((port.value.as_str(), port.line_index), ("2222", Some(1)));
        assert_eq!(parsed.get("X11Forwarding").unwrap().value, "no");

        assert!(matches!(read_target(&path), Err(EditError::FileRead { .. })));
    }
}
