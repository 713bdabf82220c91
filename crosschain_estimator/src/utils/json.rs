use serde_json::Value;

/// Walks `path` through nested objects. Nulls count as missing.
pub fn value_at_path<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = value;
    for key in path {
        current = current.as_object()?.get(*key)?;
    }
    if current.is_null() { None } else { Some(current) }
}

/// First non-null value among `paths`, in order.
pub fn first_at_paths<'a>(value: &'a Value, paths: &[&[&str]]) -> Option<&'a Value> {
    paths.iter().find_map(|path| value_at_path(value, path))
}

/// First non-empty string among `paths`, in order.
pub fn first_str_at_paths<'a>(value: &'a Value, paths: &[&[&str]]) -> Option<&'a str> {
    paths
        .iter()
        .filter_map(|path| value_at_path(value, path))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_at_path() {
        let json = serde_json::json!({
            "crossChain": { "gasData": { "gasPrice": "1" } },
            "trade": null,
            "list": [1, 2]
        });

        assert_eq!(
            value_at_path(&json, &["crossChain", "gasData", "gasPrice"]),
            Some(&serde_json::json!("1"))
        );
        assert_eq!(value_at_path(&json, &["trade"]), None);
        assert_eq!(value_at_path(&json, &["trade", "gasData"]), None);
        assert_eq!(value_at_path(&json, &["list", "0"]), None);
        assert_eq!(value_at_path(&json, &[]), Some(&json));
    }

    #[test]
    fn test_first_str_at_paths() {
        let json = serde_json::json!({
            "from": { "address": "  " },
            "fromToken": { "address": "0xabc" }
        });

        assert_eq!(
            first_str_at_paths(&json, &[&["from", "address"], &["fromToken", "address"]]),
            Some("0xabc")
        );
        assert_eq!(first_str_at_paths(&json, &[&["to", "address"]]), None);
        assert!(first_at_paths(&json, &[&["missing"], &["from"]]).is_some());
    }
}
