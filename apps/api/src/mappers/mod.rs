//! Branch-specific payload builders. A submission is routed down the
//! medical or the sales path; each branch reshapes the same form input into
//! a flat spreadsheet record and a nested document-rendering payload.
//! Everything in here is pure: no network, same input same output.

pub mod medical;
pub mod sales;

use serde_json::{Map, Value};

use crate::config::{
    MED_ANONYMOUS_TEMPLATE_ID, MED_TABLE_ID, MED_TRANSPARENT_TEMPLATE_ID,
    SALES_ANONYMOUS_TEMPLATE_ID, SALES_TABLE_ID, SALES_TRANSPARENT_TEMPLATE_ID,
};
use crate::form::FormData;

/// The sole branch discriminator in the system: an industry value
/// containing the substring "Med" (case-sensitive, e.g. "Medizin") routes
/// medical; everything else, including an absent value, routes sales.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Sales,
    Medical,
}

impl Branch {
    pub fn from_form(form: &FormData) -> Self {
        if form.get("branche").unwrap_or("").contains("Med") {
            Branch::Medical
        } else {
            Branch::Sales
        }
    }

    pub fn table_id(self) -> &'static str {
        match self {
            Branch::Sales => SALES_TABLE_ID,
            Branch::Medical => MED_TABLE_ID,
        }
    }

    pub fn transparent_template_id(self) -> &'static str {
        match self {
            Branch::Sales => SALES_TRANSPARENT_TEMPLATE_ID,
            Branch::Medical => MED_TRANSPARENT_TEMPLATE_ID,
        }
    }

    pub fn anonymous_template_id(self) -> &'static str {
        match self {
            Branch::Sales => SALES_ANONYMOUS_TEMPLATE_ID,
            Branch::Medical => MED_ANONYMOUS_TEMPLATE_ID,
        }
    }

    /// Flat field map for the branch's spreadsheet table.
    pub fn spreadsheet_fields(self, form: &FormData) -> Map<String, Value> {
        match self {
            Branch::Sales => sales::spreadsheet_fields(form),
            Branch::Medical => medical::spreadsheet_fields(form),
        }
    }

    /// Render payload for the branch's document templates, nested under a
    /// single `kandidat` key.
    pub fn document_payload(self, form: &FormData) -> Value {
        match self {
            Branch::Sales => sales::document_payload(form),
            Branch::Medical => medical::document_payload(form),
        }
    }
}

/// Form value as JSON, null when absent.
pub(crate) fn text(form: &FormData, key: &str) -> Value {
    form.get(key)
        .map(|v| Value::String(v.to_string()))
        .unwrap_or(Value::Null)
}

/// Form value with a human-readable placeholder for absent or empty input.
/// Document payloads are rendered straight into a PDF, so they never carry
/// null or empty strings.
pub(crate) fn text_or(form: &FormData, key: &str, fallback: &str) -> Value {
    match form.get(key) {
        Some(v) if !v.is_empty() => Value::String(v.to_string()),
        _ => Value::String(fallback.to_string()),
    }
}

/// Work location: the explicit employer location when present, otherwise
/// the candidate's home city. First non-empty wins.
pub(crate) fn arbeitsort(form: &FormData) -> Option<String> {
    [form.get("arbeitgeber_standort"), form.get("wohnort")]
        .into_iter()
        .flatten()
        .find(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
pub(crate) fn test_form(pairs: &[(&str, &str)]) -> FormData {
    FormData::new(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}
