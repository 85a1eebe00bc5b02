//! Recovery of structured JSON from free-form LLM answers.
//!
//! Models asked for JSON often wrap it in prose or Markdown fences. Candidates
//! are tried in order: the whole text, a ```` ```json ```` fence, any
//! ```` ``` ```` fence, then the outermost bracketed span.

use serde_json::Value;

/// Top-level JSON shape expected from an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Object,
    List,
}

/// Returns the first candidate in `content` that parses as a JSON object or
/// array. Bare scalars (`5`, `"none"`) are not answers.
#[must_use]
pub fn extract_json(content: &str, shape: Shape) -> Option<Value> {
    let trimmed = content.trim();
    if let Some(value) = parse_structured(trimmed) {
        return Some(value);
    }

    let (first, second) = match shape {
        Shape::Object => (('{', '}'), ('[', ']')),
        Shape::List => (('[', ']'), ('{', '}')),
    };

    [
        fenced(trimmed, "```json"),
        fenced(trimmed, "```"),
        span(trimmed, first.0, first.1),
        span(trimmed, second.0, second.1),
    ]
    .into_iter()
    .flatten()
    .find_map(parse_structured)
}

fn parse_structured(candidate: &str) -> Option<Value> {
    serde_json::from_str::<Value>(candidate)
        .ok()
        .filter(|value| value.is_object() || value.is_array())
}

/// Text between the first `marker` and the next closing fence.
fn fenced<'a>(content: &'a str, marker: &str) -> Option<&'a str> {
    let start = content.find(marker)? + marker.len();
    let rest = &content[start..];
    let end = rest.find("```").unwrap_or(rest.len());
    let body = rest[..end].trim();
    (!body.is_empty()).then_some(body)
}

fn span(content: &str, open: char, close: char) -> Option<&str> {
    let start = content.find(open)?;
    let end = content.rfind(close)?;
    (end > start).then(|| &content[start..=end])
}

/// Flattens an answer into a list of records.
///
/// Arrays are returned as-is, an object wrapping a `products`/`updates`/
/// `results`/`items` array is unwrapped, and any other object becomes a
/// one-element list. Scalars yield nothing.
#[must_use]
pub fn into_records(value: Value) -> Vec<Value> {
    const WRAPPER_KEYS: [&str; 4] = ["products", "updates", "results", "items"];

    match value {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            let wrapped = WRAPPER_KEYS
                .iter()
                .find(|key| map.get(**key).is_some_and(Value::is_array))
                .copied();
            match wrapped.and_then(|key| map.remove(key)) {
                Some(Value::Array(items)) => items,
                _ => vec![Value::Object(map)],
            }
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn plain_json_is_parsed_directly() {
        let value = extract_json(r#"  {"a": 1}  "#, Shape::Object).unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn json_fence_is_preferred() {
        let content = "Here you go:\n```json\n[{\"id\": 1}]\n```\nEnjoy!";
        assert_eq!(
            extract_json(content, Shape::List).unwrap(),
            json!([{"id": 1}])
        );
    }

    #[test]
    fn bare_fence_is_accepted() {
        let content = "```\n{\"product1\": {}}\n```";
        assert_eq!(
            extract_json(content, Shape::Object).unwrap(),
            json!({"product1": {}})
        );
    }

    #[test]
    fn outer_span_is_used_when_unfenced() {
        let content = "The comparison is {\"comparisonMetrics\": []} as requested.";
        assert_eq!(
            extract_json(content, Shape::Object).unwrap(),
            json!({"comparisonMetrics": []})
        );
    }

    #[test]
    fn list_shape_prefers_brackets() {
        let content = "Results: [{\"id\": \"a\"}, {\"id\": \"b\"}] (sources: {web})";
        assert_eq!(
            extract_json(content, Shape::List).unwrap(),
            json!([{"id": "a"}, {"id": "b"}])
        );
    }

    #[test]
    fn prose_only_yields_none() {
        assert!(extract_json("Sorry, I could not find any products.", Shape::List).is_none());
        assert!(extract_json("", Shape::Object).is_none());
    }

    #[test]
    fn scalar_answers_are_not_extracted() {
        assert!(extract_json("5", Shape::List).is_none());
        assert!(extract_json("\"no products\"", Shape::List).is_none());
        assert!(extract_json("null", Shape::Object).is_none());
    }

    #[test]
    fn scalar_fence_falls_through_to_span() {
        let content = "```\n42\n```\nActually: [{\"id\": 1}]";
        assert_eq!(
            extract_json(content, Shape::List).unwrap(),
            json!([{"id": 1}])
        );
    }

    #[test]
    fn records_unwrap_known_wrappers() {
        let records = into_records(json!({"products": [{"id": 1}, {"id": 2}]}));
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn single_object_becomes_one_record() {
        let records = into_records(json!({"id": 1, "name": "X"}));
        assert_eq!(records, vec![json!({"id": 1, "name": "X"})]);
    }

    #[test]
    fn scalars_yield_no_records() {
        assert!(into_records(json!("nothing")).is_empty());
    }
}
