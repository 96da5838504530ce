//! Dotted-path lookup into parsed JSON responses.

use serde_json::Value;

use crate::error::ExtractionFailure;

/// Walks `path` (e.g. `"data.url"`) through `value`.
///
/// Each segment must name a field of an object. An empty path returns
/// `value` unchanged. The resolved value must be truthy: `null`, `false`
/// and `""` are reported as [`ExtractionFailure::EmptyResult`].
pub fn extract<'a>(value: &'a Value, path: &str) -> Result<&'a Value, ExtractionFailure> {
    if path.is_empty() {
        return Ok(value);
    }

    let mut current = value;
    for field in path.split('.') {
        let Value::Object(map) = current else {
            return Err(ExtractionFailure::NotIndexable {
                field: field.to_string(),
            });
        };
        current = map
            .get(field)
            .ok_or_else(|| ExtractionFailure::MissingField {
                field: field.to_string(),
            })?;
    }

    match current {
        Value::Null | Value::Bool(false) => Err(ExtractionFailure::EmptyResult),
        Value::String(s) if s.is_empty() => Err(ExtractionFailure::EmptyResult),
        _ => Ok(current),
    }
}

/// Like [`extract`], but requires the resolved value to be a non-empty string.
pub fn extract_url(value: &Value, path: &str) -> Result<String, ExtractionFailure> {
    match extract(value, path)? {
        Value::String(s) if !s.is_empty() => Ok(s.clone()),
        _ => Err(ExtractionFailure::EmptyResult),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_url() {
        let v = json!({"data": {"url": "https://x/y.png"}});
        assert_eq!(extract_url(&v, "data.url").unwrap(), "https://x/y.png");
    }

    #[test]
    fn single_segment() {
        let v = json!({"url": "https://x/y.png"});
        assert_eq!(extract_url(&v, "url").unwrap(), "https://x/y.png");
    }

    #[test]
    fn missing_field() {
        let v = json!({"data": {"url": "https://x/y.png"}});
        assert_eq!(
            extract_url(&v, "data.missing"),
            Err(ExtractionFailure::MissingField {
                field: "missing".into()
            })
        );
    }

    #[test]
    fn missing_first_segment() {
        let v = json!({"result": {}});
        assert_eq!(
            extract(&v, "data.url"),
            Err(ExtractionFailure::MissingField {
                field: "data".into()
            })
        );
    }

    #[test]
    fn string_intermediate_not_indexable() {
        let v = json!({"data": "str"});
        assert_eq!(
            extract_url(&v, "data.url"),
            Err(ExtractionFailure::NotIndexable { field: "url".into() })
        );
    }

    #[test]
    fn array_intermediate_not_indexable() {
        let v = json!({"data": [{"url": "https://x/y.png"}]});
        assert!(matches!(
            extract(&v, "data.url"),
            Err(ExtractionFailure::NotIndexable { .. })
        ));
    }

    #[test]
    fn null_intermediate_not_indexable() {
        let v = json!({"data": null});
        assert!(matches!(
            extract(&v, "data.url"),
            Err(ExtractionFailure::NotIndexable { .. })
        ));
    }

    #[test]
    fn top_level_primitive_not_indexable() {
        let v = json!("https://x/y.png");
        assert!(matches!(
            extract(&v, "url"),
            Err(ExtractionFailure::NotIndexable { .. })
        ));
    }

    #[test]
    fn empty_string_is_empty_result() {
        let v = json!({"data": {"url": ""}});
        assert_eq!(
            extract_url(&v, "data.url"),
            Err(ExtractionFailure::EmptyResult)
        );
    }

    #[test]
    fn null_and_false_are_empty_results() {
        let v = json!({"a": null, "b": false});
        assert_eq!(extract(&v, "a"), Err(ExtractionFailure::EmptyResult));
        assert_eq!(extract(&v, "b"), Err(ExtractionFailure::EmptyResult));
    }

    #[test]
    fn non_string_url_is_empty_result() {
        let v = json!({"data": {"url": 42, "obj": {"k": 1}}});
        assert_eq!(extract(&v, "data.url").unwrap(), &json!(42));
        assert_eq!(
            extract_url(&v, "data.url"),
            Err(ExtractionFailure::EmptyResult)
        );
        assert_eq!(
            extract_url(&v, "data.obj"),
            Err(ExtractionFailure::EmptyResult)
        );
    }

    #[test]
    fn empty_path_returns_value_unchanged() {
        let v = json!({"data": 1});
        assert_eq!(extract(&v, "").unwrap(), &v);
    }

    #[test]
    fn empty_segment_is_missing_field() {
        let v = json!({"data": {"url": "u"}});
        assert_eq!(
            extract(&v, "data..url"),
            Err(ExtractionFailure::MissingField { field: "".into() })
        );
    }
}
