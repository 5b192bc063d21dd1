//! Programmatic overrides: the highest-priority settings layer.
//!
//! Each `("paths.ssh", Value)` pair is expanded into the nested table
//! structure needed to merge with the other layers.

use toml::{Table, Value};

/// Convert dotted-key overrides into a nested `toml::Table`.
///
/// If multiple entries target the same key, the last one wins. A scalar in
/// the way of a nested key is replaced by a table.
pub fn overrides_to_table(entries: &[(String, Value)]) -> Table {
    let mut table = Table::new();
    for (dotted_key, value) in entries {
        set_dotted(&mut table, dotted_key, value.clone());
    }
    table
}

fn set_dotted(table: &mut Table, dotted_key: &str, value: Value) {
    let (parents, leaf) = match dotted_key.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, dotted_key),
    };

    let mut current = table;
    for segment in parents.into_iter().flat_map(|p| p.split('.')) {
        let entry = current
            .entry(segment)
            .or_insert_with(|| Value::Table(Table::new()));
        if !entry.is_table() {
            *entry = Value::Table(Table::new());
        }
        let Value::Table(next) = entry else {
            return;
        };
        current = next;
    }
    current.insert(leaf.to_string(), value);
}
