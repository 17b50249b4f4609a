//! Tree operations used by the extenders
//!
//! Overrides are applied to the serialized configuration and the result is
//! deserialized again, so the field types of `Configuration` do the
//! validation.

use serde_json::{Map, Value};

/// Recursively merge `overlay` into `base`
///
/// Objects merge key by key; any other overlay value replaces the base value.
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Set the value addressed by underscore-separated `segments`
///
/// Each level matches object keys case-insensitively, trying the longest run
/// of segments first so `MAX_SOCKETS` finds `max_sockets` before `max`.
/// Returns the dotted path that was written, or `None` when no key matches.
pub fn set_by_segments(tree: &mut Value, segments: &[&str], raw: &str) -> Option<String> {
    set_with(tree, segments, &|current| coerce(current, raw))
}

/// Like `set_by_segments`, but always writes `raw` as a JSON string
///
/// Used when the parsed form of `raw` does not fit the field, as with
/// `ENCRYPTION_KEY=1234567890` on a field that is still `null`.
pub fn set_text_by_segments(tree: &mut Value, segments: &[&str], raw: &str) -> Option<String> {
    set_with(tree, segments, &|_| Value::String(raw.to_string()))
}

fn set_with(
    tree: &mut Value,
    segments: &[&str],
    make: &dyn Fn(&Value) -> Value,
) -> Option<String> {
    let map = tree.as_object_mut()?;
    for take in (1..=segments.len()).rev() {
        let candidate = segments[..take].join("_");
        let Some(key) = find_key(map, &candidate) else {
            continue;
        };
        let rest = &segments[take..];
        let slot = map.get_mut(&key)?;
        if rest.is_empty() {
            *slot = make(slot);
            return Some(key);
        }
        if let Some(sub_path) = set_with(slot, rest, make) {
            return Some(format!("{}.{}", key, sub_path));
        }
    }
    None
}

fn find_key(map: &Map<String, Value>, candidate: &str) -> Option<String> {
    map.keys().find(|k| k.eq_ignore_ascii_case(candidate)).cloned()
}

/// Interpret `raw` in light of the value it replaces
///
/// String fields take the raw text verbatim so passwords such as `12345`
/// stay strings. Everything else is parsed as JSON, falling back to a string.
fn coerce(current: &Value, raw: &str) -> Value {
    if current.is_string() {
        return Value::String(raw.to_string());
    }
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deep_merge_objects_and_replace_leaves() {
        let mut base = json!({"api": {"port": 3001, "host": "127.0.0.1"}, "path": ""});
        deep_merge(&mut base, json!({"api": {"port": 8080}, "ignoreProxies": ["10.0.0.1"]}));

        assert_eq!(
            base,
            json!({
                "api": {"port": 8080, "host": "127.0.0.1"},
                "path": "",
                "ignoreProxies": ["10.0.0.1"]
            })
        );
    }

    #[test]
    fn test_set_prefers_longest_key() {
        let mut tree = json!({"api": {"max": 1, "max_sockets": 1024}});
        let path = set_by_segments(&mut tree, &["API", "MAX", "SOCKETS"], "2048");

        assert_eq!(path.as_deref(), Some("api.max_sockets"));
        assert_eq!(tree["api"]["max_sockets"], json!(2048));
        assert_eq!(tree["api"]["max"], json!(1));
    }

    #[test]
    fn test_set_camel_case_key() {
        let mut tree = json!({"fileStorage": "fs"});
        assert!(set_by_segments(&mut tree, &["FILESTORAGE"], "gridfs").is_some());
        assert_eq!(tree["fileStorage"], json!("gridfs"));
    }

    #[test]
    fn test_string_fields_stay_strings() {
        let mut tree = json!({"mongodb": {"password": "x", "replSetServers": null}});
        set_by_segments(&mut tree, &["MONGODB", "PASSWORD"], "12345");
        set_by_segments(&mut tree, &["MONGODB", "REPLSETSERVERS"], r#"["a:1","b:2"]"#);

        assert_eq!(tree["mongodb"]["password"], json!("12345"));
        assert_eq!(tree["mongodb"]["replSetServers"], json!(["a:1", "b:2"]));
    }

    #[test]
    fn test_null_field_parses_unless_set_as_text() {
        let mut tree = json!({"encryption": {"key": null}});
        set_by_segments(&mut tree, &["ENCRYPTION", "KEY"], "1234");
        assert_eq!(tree["encryption"]["key"], json!(1234));

        let path = set_text_by_segments(&mut tree, &["ENCRYPTION", "KEY"], "1234");
        assert_eq!(path.as_deref(), Some("encryption.key"));
        assert_eq!(tree["encryption"]["key"], json!("1234"));
    }

    #[test]
    fn test_unknown_path_is_none() {
        let mut tree = json!({"api": {"port": 3001}});
        assert!(set_by_segments(&mut tree, &["API", "NOPE"], "1").is_none());
        assert!(set_by_segments(&mut tree, &["API", "PORT", "DEEPER"], "1").is_none());
        assert_eq!(tree, json!({"api": {"port": 3001}}));
    }
}
