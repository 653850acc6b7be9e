//! Create-post payload composition.

use serde_json::{Map, Value};

use crate::domain::entities::{Directives, FILE_IDS_KEY, FileId, PostPayload, TEXT_KEY};

/// Builds destination payloads from cleaned bodies, uploads and directives.
#[derive(Debug, Clone, Default)]
pub struct PostComposer {
    defaults: Map<String, Value>,
}

impl PostComposer {
    /// Creates a composer with no extra defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a default field applied to every post unless a directive overrides it.
    #[must_use]
    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }

    /// Composes a payload.
    ///
    /// `fileIds` is only present when `file_ids` is non-empty. Directive
    /// keys are applied last and win over every computed field.
    #[must_use]
    pub fn compose(&self, text: &str, file_ids: &[FileId], directives: Directives) -> PostPayload {
        let mut fields = Map::new();
        fields.insert(TEXT_KEY.to_string(), Value::String(text.to_string()));
        fields.extend(self.defaults.clone());

        if !file_ids.is_empty() {
            let ids = file_ids
                .iter()
                .map(|id| Value::String(id.as_str().to_string()))
                .collect();
            fields.insert(FILE_IDS_KEY.to_string(), Value::Array(ids));
        }

        fields.extend(directives.into_inner());

        PostPayload::from_map(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn directives(value: Value) -> Directives {
        let Value::Object(map) = value else {
            unreachable!()
        };
        Directives::new(map)
    }

    #[test]
    fn test_no_attachments_omits_file_ids() {
        let payload = PostComposer::new().compose("hi", &[], Directives::default());

        assert_eq!(serde_json::to_value(&payload).unwrap(), json!({"text": "hi"}));
        assert!(!payload.contains_key(FILE_IDS_KEY));
    }

    #[test]
    fn test_file_ids_keep_order() {
        let ids = [FileId::new("b"), FileId::new("a")];
        let payload = PostComposer::new().compose("hi", &ids, Directives::default());

        assert_eq!(payload.file_ids(), Some(vec!["b", "a"]));
    }

    #[test]
    fn test_directives_override_defaults() {
        let composer = PostComposer::new().with_default("visibility", "public");
        let payload = composer.compose(
            "hi",
            &[FileId::new("x")],
            directives(json!({"visibility": "home", "cw": "careful"})),
        );

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"text": "hi", "visibility": "home", "cw": "careful", "fileIds": ["x"]})
        );
    }

    #[test]
    fn test_directive_can_override_computed_fields() {
        let payload = PostComposer::new().compose(
            "hi",
            &[FileId::new("x")],
            directives(json!({"text": "replaced", "fileIds": []})),
        );

        assert_eq!(payload.text(), Some("replaced"));
        assert_eq!(payload.file_ids(), Some(vec![]));
    }

    #[test]
    fn test_configured_default_applied() {
        let composer = PostComposer::new().with_default("visibility", "followers");
        let payload = composer.compose("hi", &[], Directives::default());

        assert_eq!(payload.get("visibility"), Some(&json!("followers")));
    }
}
