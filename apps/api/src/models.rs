use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Candidate record as returned by the applicant-tracking API.
/// Numeric-ish attributes (salary, phone, owner) arrive as either strings
/// or numbers depending on how the record was entered, so they are kept
/// as raw JSON values and stringified at the translation boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub contact_number: Option<Value>,
    #[serde(default)]
    pub gender_id: Option<Value>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub current_organization: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub owner: Option<Value>,
    /// Either an object carrying `file_link` or absent.
    #[serde(default)]
    pub resume: Option<Value>,
    #[serde(default)]
    pub xing: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub current_salary: Option<Value>,
    #[serde(default)]
    pub salary_expectation: Option<Value>,
    #[serde(default)]
    pub skill: Option<String>,
    #[serde(default)]
    pub custom_fields: Vec<CandidateCustomField>,
}

impl Candidate {
    /// Resume file link, when the tracking system attached one.
    pub fn resume_link(&self) -> Option<&str> {
        self.resume
            .as_ref()
            .and_then(|r| r.get("file_link"))
            .and_then(|v| v.as_str())
    }
}

/// One custom-field value attached to a candidate record.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateCustomField {
    pub field_id: i64,
    pub field_name: String,
    #[serde(default)]
    pub value: Option<Value>,
}

/// Custom-field metadata as returned by `GET /custom-fields/candidates`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub field_id: i64,
    pub field_name: String,
    pub field_type: String,
    #[serde(default)]
    pub dropdown_options: Vec<DropdownOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropdownOption {
    pub value: String,
}

/// Sparse custom-field entry for a candidate update. Fields without a
/// value or without a resolvable id are omitted upstream entirely, which
/// leaves them untouched server-side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomFieldEntry {
    pub field_id: i64,
    pub value: String,
}

/// Full update payload for `POST /candidates/{slug}`. Top-level attributes
/// are sent as-is (nulls included); only `custom_fields` is sparse.
#[derive(Debug, Serialize)]
pub struct CandidateUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub contact_number: Option<i64>,
    pub position: Option<String>,
    pub gender_id: i64,
    pub city: Option<String>,
    pub current_organization: Option<String>,
    pub slug: Option<String>,
    pub owner: Option<String>,
    pub resume: Option<String>,
    pub xing: Option<String>,
    pub linkedin: Option<String>,
    pub current_salary: Option<String>,
    pub salary_expectation: Option<String>,
    pub available_from: Option<String>,
    pub locality: Option<String>,
    pub notice_period: Option<String>,
    pub custom_fields: Vec<CustomFieldEntry>,
}

/// Stringifies a loose JSON scalar the way the form page expects it.
pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resume_link_from_object() {
        let candidate: Candidate = serde_json::from_value(json!({
            "id": 7,
            "resume": {"file_link": "https://files.example/cv.pdf"}
        }))
        .unwrap();
        assert_eq!(candidate.resume_link(), Some("https://files.example/cv.pdf"));
    }

    #[test]
    fn test_resume_link_absent() {
        let candidate: Candidate = serde_json::from_value(json!({"id": 7})).unwrap();
        assert_eq!(candidate.resume_link(), None);
    }

    #[test]
    fn test_value_to_string_number() {
        assert_eq!(value_to_string(&json!(55000)), Some("55000".to_string()));
        assert_eq!(value_to_string(&json!("55000")), Some("55000".to_string()));
        assert_eq!(value_to_string(&Value::Null), None);
    }
}
