use serde_json::Value;

/// How a search response with no entries is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyBundlePolicy {
    /// An empty bundle is a valid outcome and yields no rows.
    #[default]
    Accept,
    /// An empty bundle fails the call with `EmptyResult`.
    Reject,
}

/// Locates the ordered entry sequence in a search response payload.
///
/// Search responses carry their results under the top-level `entry` key.
/// The `resourceType` marker is not required; some servers omit it on
/// otherwise well-formed payloads.
pub fn entries(body: &Value) -> Option<&Vec<Value>> {
    body.get("entry")?.as_array()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_finds_entry_array() {
        let body = json!({"resourceType": "Bundle", "entry": [{"resource": {}}]});
        assert_eq!(entries(&body).map(Vec::len), Some(1));
    }

    #[test]
    fn test_missing_entry_key() {
        let body = json!({"resourceType": "Bundle", "total": 0});
        assert!(entries(&body).is_none());
    }

    #[test]
    fn test_entry_must_be_an_array() {
        let body = json!({"entry": "oops"});
        assert!(entries(&body).is_none());
    }

    #[test]
    fn test_entry_without_bundle_marker() {
        let body = json!({"entry": []});
        assert_eq!(entries(&body).map(Vec::len), Some(0));
    }
}
