//! The schema registry: known config file types and their directives.
//!
//! The registry is a process-wide table built once on first access and never
//! mutated afterwards, so any number of threads can read it without locking.
//! The directive set below is what editor front-ends build their forms from;
//! adding a file type means adding a [`Schema`] here and, if its lines are not
//! `Key value` shaped, an entry in [`format`](crate::format).

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// How a field's value is presented and checked by editors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Toggle,
    Text,
    Number,
    Select,
}

/// One directive within a config file type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Directive name as written in the file; unique within its schema.
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// Allowed values, only meaningful for [`FieldKind::Select`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    pub default: String,
    pub description: String,
    /// Regex with exactly one capture group holding the value. Must match the
    /// directive whether or not it is commented out.
    pub pattern: String,
    #[serde(rename = "comment")]
    pub comment_token: String,
}

impl Field {
    /// Check a candidate value against the field's kind.
    ///
    /// Returns a human-readable reason on rejection.
    pub fn check_value(&self, value: &str) -> Result<(), String> {
        if value.contains(['\n', '\r']) {
            return Err("value must be a single line".into());
        }
        match self.kind {
            FieldKind::Number => value
                .parse::<u64>()
                .map(|_| ())
                .map_err(|_| format!("expected a number, got '{value}'")),
            FieldKind::Select | FieldKind::Toggle if !self.options.is_empty() => {
                if self.options.iter().any(|o| o == value) {
                    Ok(())
                } else {
                    Err(format!(
                        "expected one of {}, got '{value}'",
                        self.options.join(", ")
                    ))
                }
            }
            _ if value.trim().is_empty() => Err("value must not be empty".into()),
            _ => Ok(()),
        }
    }
}

/// Declarative description of one config file type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub id: String,
    pub name: String,
    pub description: String,
    /// System location of the target file. Editors may redirect it through
    /// settings; the schema itself never changes.
    pub file_path: String,
    pub fields: Vec<Field>,
}

impl Schema {
    pub fn field(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.key == key)
    }
}

fn select(
    key: &str,
    label: &str,
    options: &[&str],
    default: &str,
    description: &str,
    pattern: &str,
) -> Field {
    Field {
        key: key.into(),
        label: label.into(),
        kind: FieldKind::Select,
        options: options.iter().map(|o| o.to_string()).collect(),
        default: default.into(),
        description: description.into(),
        pattern: pattern.into(),
        comment_token: "#".into(),
    }
}

fn scalar(
    kind: FieldKind,
    key: &str,
    label: &str,
    default: &str,
    description: &str,
    pattern: &str,
) -> Field {
    Field {
        key: key.into(),
        label: label.into(),
        kind,
        options: Vec::new(),
        default: default.into(),
        description: description.into(),
        pattern: pattern.into(),
        comment_token: "#".into(),
    }
}

const YES_NO: &[&str] = &["yes", "no"];
const POLICIES: &[&str] = &["ACCEPT", "DROP", "REJECT"];

fn ssh_schema() -> Schema {
    Schema {
        id: "ssh".into(),
        name: "SSH Server".into(),
        description: "OpenSSH server configuration".into(),
        file_path: "/etc/ssh/sshd_config".into(),
        fields: vec![
            scalar(
                FieldKind::Number,
                "Port",
                "SSH Port",
                "22",
                "Port for SSH connections",
                r"^#?\s*Port\s+(\d+)",
            ),
            select(
                "PermitRootLogin",
                "Permit Root Login",
                &["yes", "no", "prohibit-password", "forced-commands-only"],
                "prohibit-password",
                "Allow root user to login via SSH",
                r"^#?\s*PermitRootLogin\s+([\w-]+)",
            ),
            select(
                "PasswordAuthentication",
                "Password Authentication",
                YES_NO,
                "yes",
                "Allow password-based authentication",
                r"^#?\s*PasswordAuthentication\s+(\w+)",
            ),
            select(
                "PubkeyAuthentication",
                "Public Key Authentication",
                YES_NO,
                "yes",
                "Allow public key authentication",
                r"^#?\s*PubkeyAuthentication\s+(\w+)",
            ),
            select(
                "X11Forwarding",
                "X11 Forwarding",
                YES_NO,
                "no",
                "Allow X11 forwarding",
                r"^#?\s*X11Forwarding\s+(\w+)",
            ),
        ],
    }
}

fn ufw_schema() -> Schema {
    Schema {
        id: "ufw".into(),
        name: "UFW Firewall".into(),
        description: "Uncomplicated Firewall configuration".into(),
        file_path: "/etc/default/ufw".into(),
        fields: vec![
            select(
                "IPV6",
                "Enable IPv6",
                YES_NO,
                "yes",
                "Enable IPv6 support in firewall",
                r"^#?\s*IPV6\s*=\s*(\w+)",
            ),
            select(
                "DEFAULT_INPUT_POLICY",
                "Default Input Policy",
                POLICIES,
                "DROP",
                "Default policy for incoming connections",
                r#"^#?\s*DEFAULT_INPUT_POLICY\s*=\s*"?(\w+)"?"#,
            ),
            select(
                "DEFAULT_OUTPUT_POLICY",
                "Default Output Policy",
                POLICIES,
                "ACCEPT",
                "Default policy for outgoing connections",
                r#"^#?\s*DEFAULT_OUTPUT_POLICY\s*=\s*"?(\w+)"?"#,
            ),
            select(
                "DEFAULT_FORWARD_POLICY",
                "Default Forward Policy",
                POLICIES,
                "DROP",
                "Default policy for forwarded packets",
                r#"^#?\s*DEFAULT_FORWARD_POLICY\s*=\s*"?(\w+)"?"#,
            ),
        ],
    }
}

fn nginx_schema() -> Schema {
    Schema {
        id: "nginx".into(),
        name: "Nginx".into(),
        description: "Nginx web server configuration (simplified)".into(),
        file_path: "/etc/nginx/nginx.conf".into(),
        fields: vec![
            scalar(
                FieldKind::Text,
                "worker_processes",
                "Worker Processes",
                "auto",
                "Number of worker processes (auto, or a number)",
                r"^\s*#?\s*worker_processes\s+([^;]+);",
            ),
            scalar(
                FieldKind::Number,
                "worker_connections",
                "Worker Connections",
                "1024",
                "Maximum simultaneous connections per worker",
                r"^\s*#?\s*worker_connections\s+(\d+);",
            ),
            scalar(
                FieldKind::Number,
                "keepalive_timeout",
                "Keepalive Timeout",
                "65",
                "Timeout for keepalive connections (seconds)",
                r"^\s*#?\s*keepalive_timeout\s+(\d+);",
            ),
            select(
                "gzip",
                "Enable Gzip Compression",
                &["on", "off"],
                "on",
                "Enable gzip compression",
                r"^\s*#?\s*gzip\s+(on|off);",
            ),
        ],
    }
}

static REGISTRY: LazyLock<Vec<Schema>> =
    LazyLock::new(|| vec![ssh_schema(), ufw_schema(), nginx_schema()]);

/// Look up a schema by id.
pub fn get_schema(id: &str) -> Option<&'static Schema> {
    REGISTRY.iter().find(|s| s.id == id)
}

/// All known schemas, in registration order.
pub fn list_schemas() -> &'static [Schema] {
    &REGISTRY
}
