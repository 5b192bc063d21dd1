use toml::{Table, Value};

/// Build a settings layer from environment variables matching `{PREFIX}__*`.
///
/// `__` separates nesting levels and segments are lowercased, so
/// `CONFEDIT__PATHS__SSH=/srv/sshd_config` sets `paths.ssh`. Values are
/// booleans when they spell `true`/`false` (any case) and strings otherwise;
/// every settings leaf is one or the other.
///
/// Takes an iterator so tests can pass synthetic data instead of `std::env::vars()`.
pub fn env_to_table(prefix: &str, vars: impl IntoIterator<Item = (String, String)>) -> Table {
    let needle = format!("{prefix}__");
    let mut table = Table::new();

    for (key, value) in vars {
        let Some(rest) = key.strip_prefix(&needle) else {
            continue;
        };
        let segments: Vec<String> = rest.split("__").map(str::to_lowercase).collect();
        if segments.iter().any(String::is_empty) {
            continue;
        }
        insert_at(&mut table, &segments, env_value(value));
    }

    table
}

fn insert_at(table: &mut Table, segments: &[String], value: Value) {
    let Some((leaf, parents)) = segments.split_last() else {
        return;
    };
    let mut current = table;
    for segment in parents {
        let entry = current
            .entry(segment.clone())
            .or_insert_with(|| Value::Table(Table::new()));
        if !entry.is_table() {
            *entry = Value::Table(Table::new());
        }
        let Value::Table(next) = entry else {
            return;
        };
        current = next;
    }
    current.insert(leaf.clone(), value);
}

fn env_value(raw: String) -> Value {
    if raw.eq_ignore_ascii_case("true") {
        Value::Boolean(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Value::Boolean(false)
    } else {
        Value::String(raw)
    }
}
