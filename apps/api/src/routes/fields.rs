use std::collections::HashMap;

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::errors::ClientError;
use crate::models::FieldDefinition;
use crate::state::AppState;

/// GET /api/custom-fields
/// The cached `field_id → field_name` map as JSON. An empty object means
/// the catalog is unavailable, not that no fields exist.
pub async fn handle_custom_fields(State(state): State<AppState>) -> Json<HashMap<i64, String>> {
    Json(state.catalog.field_map(&state.recruit).await)
}

/// GET /debug/cf-meta
/// Preformatted dump of the custom-field metadata. Upstream failures are
/// surfaced in the response body with their status and text instead of
/// becoming an error of this service.
pub async fn handle_cf_meta(State(state): State<AppState>) -> Response {
    match state.recruit.list_custom_fields().await {
        Ok(fields) => Html(format_field_metadata(&fields)).into_response(),
        Err(ClientError::Api { status, body }) => Json(json!({
            "error": true,
            "message": format!("Failed to fetch metadata: {status} {body}")
        }))
        .into_response(),
        Err(e) => Json(json!({
            "error": true,
            "message": format!("Failed to fetch metadata: {e}")
        }))
        .into_response(),
    }
}

fn format_field_metadata(fields: &[FieldDefinition]) -> String {
    let lines: Vec<String> = fields
        .iter()
        .map(|f| {
            let mut line = format!("{:>4} | {:<40} | {:>10}", f.field_id, f.field_name, f.field_type);
            if f.field_type == "dropdown" {
                let options: Vec<&str> = f.dropdown_options.iter().map(|o| o.value.as_str()).collect();
                line.push_str(&format!(" → {options:?}"));
            }
            line
        })
        .collect();
    format!("<pre>{}</pre>", lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DropdownOption;

    #[test]
    fn test_format_includes_dropdown_options() {
        let fields = vec![
            FieldDefinition {
                field_id: 10,
                field_name: "Branche".to_string(),
                field_type: "dropdown".to_string(),
                dropdown_options: vec![
                    DropdownOption {
                        value: "Sales".to_string(),
                    },
                    DropdownOption {
                        value: "Medizin".to_string(),
                    },
                ],
            },
            FieldDefinition {
                field_id: 11,
                field_name: "Sonstiges".to_string(),
                field_type: "text".to_string(),
                dropdown_options: vec![],
            },
        ];
        let html = format_field_metadata(&fields);
        assert!(html.starts_with("<pre>"));
        assert!(html.contains("Branche"));
        assert!(html.contains("[\"Sales\", \"Medizin\"]"));
        assert!(!html.contains("Sonstiges ["));
    }
}
