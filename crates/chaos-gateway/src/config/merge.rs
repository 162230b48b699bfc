//! Recursive overlay of one YAML document onto another.

use serde_yaml::Value;

/// Overlay `file` onto `defaults`.
///
/// Keys present in `file` win. When both sides hold a mapping under the same
/// key the two mappings are merged the same way; any other file value
/// replaces the default wholesale. A non-mapping `file` is returned as-is.
pub fn merge_values(file: Value, defaults: Value) -> Value {
    let (file, mut result) = match (file, defaults) {
        (Value::Mapping(f), Value::Mapping(d)) => (f, d),
        (file, _) => return file,
    };

    for (key, value) in file {
        let merged = match (result.remove(&key), value) {
            (Some(d @ Value::Mapping(_)), v @ Value::Mapping(_)) => merge_values(v, d),
            (_, v) => v,
        };
        result.insert(key, merged);
    }
    Value::Mapping(result)
}
