//! Submission records produced by the form-collection system

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// One saved form submission.
///
/// Element data (what the submitter typed) and metadata (what the form
/// system recorded about the request) are kept in separate maps; they only
/// meet inside the payload assembler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Submission id (`sid`)
    pub id: u64,

    /// Submission UUID, when the form system assigns one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    /// Element id to submitted value
    #[serde(default)]
    pub data: Map<String, JsonValue>,

    /// System-recorded attributes such as `webform_id` or `remote_addr`
    #[serde(default)]
    pub metadata: Map<String, JsonValue>,
}

/// Errors raised while reading a submission export
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Submission export must be a JSON object")]
    NotAnObject,

    #[error("Submission export has no usable id (expected `sid` or `id`)")]
    MissingId,

    #[error("Submission element data must be a JSON object, got {0}")]
    InvalidData(String),

    #[error("Invalid submission: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl Submission {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// Add an element value
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Add a metadata value
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Id of the form this submission belongs to
    pub fn webform_id(&self) -> Option<&str> {
        self.metadata.get("webform_id").and_then(JsonValue::as_str)
    }

    /// Read a submission from a JSON export.
    ///
    /// Two shapes are accepted. The explicit shape carries `id`, `data` and
    /// `metadata` keys. The form system's flat array export carries `sid`,
    /// a nested `data` object, and every other attribute at the top level;
    /// in that shape all non-`data` keys become metadata.
    pub fn from_export(value: JsonValue) -> Result<Self, SubmissionError> {
        let JsonValue::Object(mut object) = value else {
            return Err(SubmissionError::NotAnObject);
        };

        if object.contains_key("metadata") {
            return Ok(serde_json::from_value(JsonValue::Object(object))?);
        }

        let data = match object.remove("data") {
            None | Some(JsonValue::Null) => Map::new(),
            Some(JsonValue::Object(data)) => data,
            Some(other) => return Err(SubmissionError::InvalidData(type_name(&other).to_string())),
        };

        let id = object
            .get("sid")
            .or_else(|| object.get("id"))
            .and_then(parse_id)
            .ok_or(SubmissionError::MissingId)?;

        let uuid = object.get("uuid").and_then(JsonValue::as_str).map(str::to_string);

        Ok(Self {
            id,
            uuid,
            data,
            metadata: object,
        })
    }
}

fn parse_id(value: &JsonValue) -> Option<u64> {
    match value {
        JsonValue::Number(n) => n.as_u64(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_export_splits_data_and_metadata() {
        let export = json!({
            "sid": "42",
            "uuid": "9a6f",
            "webform_id": "rfi",
            "remote_addr": "1.2.3.4",
            "data": {"email": "a@b.com", "name": "Jo"}
        });

        let submission = Submission::from_export(export).unwrap();

        assert_eq!(submission.id, 42);
        assert_eq!(submission.uuid.as_deref(), Some("9a6f"));
        assert_eq!(submission.webform_id(), Some("rfi"));
        assert_eq!(submission.data.len(), 2);
        assert!(!submission.metadata.contains_key("data"));
        assert_eq!(submission.metadata["remote_addr"], json!("1.2.3.4"));
    }

    #[test]
    fn test_explicit_export() {
        let export = json!({
            "id": 7,
            "data": {"email": "a@b.com"},
            "metadata": {"webform_id": "rfi"}
        });

        let submission = Submission::from_export(export).unwrap();
        let expected = Submission::new(7)
            .with_data("email", "a@b.com")
            .with_metadata("webform_id", "rfi");
        assert_eq!(submission, expected);
    }

    #[test]
    fn test_export_errors() {
        assert!(matches!(
            Submission::from_export(json!([1, 2])),
            Err(SubmissionError::NotAnObject)
        ));
        assert!(matches!(
            Submission::from_export(json!({"data": {}})),
            Err(SubmissionError::MissingId)
        ));
        assert!(matches!(
            Submission::from_export(json!({"sid": 1, "data": "oops"})),
            Err(SubmissionError::InvalidData(_))
        ));
    }

    #[test]
    fn test_missing_data_is_empty() {
        let submission = Submission::from_export(json!({"sid": 3})).unwrap();
        assert!(submission.data.is_empty());
        assert_eq!(submission.metadata["sid"], json!(3));
    }
}
