use toml::{Table, Value};

/// Lay `overlay` over `base` in place.
///
/// Tables present on both sides are merged key by key, so a settings file
/// that only redirects `paths.ssh` keeps `paths.nginx` from a lower layer.
/// Any other overlay value replaces the base value.
pub fn merge_layer(base: &mut Table, overlay: Table) {
    for (key, overlay_val) in overlay {
        match overlay_val {
            Value::Table(overlay_tbl) => {
                if let Some(Value::Table(base_tbl)) = base.get_mut(&key) {
                    merge_layer(base_tbl, overlay_tbl);
                } else {
                    base.insert(key, Value::Table(overlay_tbl));
                }
            }
            other => {
                base.insert(key, other);
            }
        }
    }
}
