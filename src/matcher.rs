//! Field matching: one compiled capture-group pattern per directive.
//!
//! Patterns are static, so compiled regexes are cached process-wide keyed by
//! their source text. A pattern that fails to compile is cached as `None` and
//! the field simply never matches.

use std::sync::LazyLock;

use dashmap::DashMap;
use regex::Regex;

use crate::schema::Field;

static COMPILED: LazyLock<DashMap<String, Option<Regex>>> = LazyLock::new(DashMap::new);

/// A directive found on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch {
    /// Index of the matching line.
    pub index: usize,
    /// Capture group 1.
    pub value: String,
    /// `false` when the line starts with the field's comment token.
    pub enabled: bool,
}

/// Compiled matcher for a single field.
pub struct FieldMatcher<'a> {
    field: &'a Field,
    regex: Option<Regex>,
}

impl<'a> FieldMatcher<'a> {
    pub fn new(field: &'a Field) -> Self {
        Self {
            field,
            regex: compile(&field.pattern),
        }
    }

    /// Whether the field's pattern compiled. An invalid matcher finds nothing.
    pub fn is_valid(&self) -> bool {
        self.regex.is_some()
    }

    /// Match a single line, returning the captured value when it is non-empty.
    pub fn capture<'l>(&self, line: &'l str) -> Option<&'l str> {
        let caps = self.regex.as_ref()?.captures(line)?;
        caps.get(1).map(|m| m.as_str()).filter(|v| !v.is_empty())
    }

    /// Scan lines in order and return the first match. Later duplicates of the
    /// same directive are never looked at.
    pub fn find_first<S: AsRef<str>>(&self, lines: &[S]) -> Option<LineMatch> {
        lines.iter().enumerate().find_map(|(index, line)| {
            let line = line.as_ref();
            self.capture(line).map(|value| LineMatch {
                index,
                value: value.to_string(),
                enabled: !is_commented(line, &self.field.comment_token),
            })
        })
    }
}

/// A line is commented out when, ignoring surrounding whitespace, it starts
/// with the comment token.
pub fn is_commented(line: &str, comment_token: &str) -> bool {
    !comment_token.is_empty() && line.trim().starts_with(comment_token)
}

fn compile(pattern: &str) -> Option<Regex> {
    if let Some(cached) = COMPILED.get(pattern) {
        return cached.value().clone();
    }
    let compiled = match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(
                pattern,
                error = %e,
                "field pattern does not compile; treating field as absent"
            );
            None
        }
    };
    COMPILED.insert(pattern.to_string(), compiled.clone());
    compiled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::get_schema;

    fn field(schema: &str, key: &str) -> &'static Field {
        get_schema(schema).unwrap().field(key).unwrap()
    }

    #[test]
    fn captures_active_directive() {
        let m = FieldMatcher::new(field("ssh", "Port"));
        assert_eq!(m.capture("Port 22"), Some("22"));
    }

    #[test]
    fn captures_commented_directive() {
        let m = FieldMatcher::new(field("ssh", "Port"));
        assert_eq!(m.capture("#Port 22"), Some("22"));
        assert_eq!(m.capture("# Port 2222"), Some("2222"));
    }

    #[test]
    fn ignores_other_directives() {
        let m = FieldMatcher::new(field("ssh", "Port"));
        assert_eq!(m.capture("ListenAddress 0.0.0.0"), None);
        assert_eq!(m.capture("GatewayPorts no"), None);
    }

    #[test]
    fn quoted_value_is_unquoted_in_capture() {
        let m = FieldMatcher::new(field("ufw", "DEFAULT_INPUT_POLICY"));
        assert_eq!(m.capture("DEFAULT_INPUT_POLICY=\"DROP\""), Some("DROP"));
    }

    #[test]
    fn hyphenated_select_value_is_captured_whole() {
        let m = FieldMatcher::new(field("ssh", "PermitRootLogin"));
        assert_eq!(
            m.capture("#PermitRootLogin prohibit-password"),
            Some("prohibit-password")
        );
    }

    #[test]
    fn indented_nginx_directive() {
        let m = FieldMatcher::new(field("nginx", "worker_connections"));
        assert_eq!(m.capture("    worker_connections 768;"), Some("768"));
        assert_eq!(m.capture("    # worker_connections 768;"), Some("768"));
    }

    #[test]
    fn first_match_wins() {
        let lines = ["#Port 22", "Port 2222", "Port 3333"];
        let m = FieldMatcher::new(field("ssh", "Port"));
        let found = m.find_first(&lines).unwrap();
        assert_eq!(
            found,
            LineMatch {
                index: 0,
                value: "22".into(),
                enabled: false,
            }
        );
    }

    #[test]
    fn empty_capture_does_not_count() {
        let mut f = field("ssh", "Port").clone();
        f.pattern = r"^Port\s*(\d*)".into();
        let m = FieldMatcher::new(&f);
        let lines = ["Port", "Port 22"];
        assert_eq!(m.find_first(&lines).unwrap().index, 1);
    }

    #[test]
    fn malformed_pattern_never_matches() {
        let mut f = field("ssh", "Port").clone();
        f.pattern = r"^Port\s+((\d+)".into();
        let m = FieldMatcher::new(&f);
        assert!(!m.is_valid());
        assert!(m.find_first(&["Port 22"]).is_none());
    }

    #[test]
    fn comment_detection_trims_whitespace() {
        assert!(is_commented("   # gzip on;", "#"));
        assert!(!is_commented("gzip on; # trailing", "#"));
        assert!(!is_commented("gzip on;", ""));
    }
}
