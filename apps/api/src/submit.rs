//! Submission Coordinator — the single synchronous sequence behind
//! `POST /api/submit`. No rollback on partial failure: a crash after the
//! spreadsheet sync leaves the tracking system stale, which is accepted.

use axum::{extract::State, Form, Json};
use serde_json::{json, Value};
use tracing::info;

use crate::errors::AppError;
use crate::form::FormData;
use crate::mappers::Branch;
use crate::models::{CandidateUpdate, CustomFieldEntry};
use crate::state::AppState;
use crate::translate::custom_field_payload;

/// Gender code sent upstream when the submitted value does not parse.
const FALLBACK_GENDER_ID: i64 = 3;

/// POST /api/submit
pub async fn handle_submit(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Json<Value>, AppError> {
    let mut form = FormData::new(pairs);

    let slug = match form.get("kandidat_slug") {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => {
            return Err(AppError::Validation(
                "Keine Kandidaten-ID übergeben".to_string(),
            ))
        }
    };

    let branch = Branch::from_form(&form);
    info!("Submission for candidate {slug} via {branch:?} branch");

    // Both render jobs share the branch payload; the templates decide what
    // each report reveals. The two polls run concurrently.
    let document_payload = branch.document_payload(&form);
    let transparent_id = state
        .pdf
        .submit(branch.transparent_template_id(), &document_payload)
        .await?;
    let anonymous_id = state
        .pdf
        .submit(branch.anonymous_template_id(), &document_payload)
        .await?;
    let (transparent_url, anonymous_url) = tokio::join!(
        state.pdf.await_completion(&transparent_id),
        state.pdf.await_completion(&anonymous_id),
    );

    // Spreadsheet sync happens before the document URLs are attached; the
    // spreadsheet record never carries them.
    let fields = branch.spreadsheet_fields(&form);
    state
        .airtable
        .upsert_by_email(branch.table_id(), form.get("email"), &fields)
        .await;

    if let Some(url) = &transparent_url {
        form.set("auswertung", url.clone());
    }
    if let Some(url) = &anonymous_url {
        form.set("anonym_auswertung", url.clone());
    }

    let name_to_id = state.catalog.name_to_id(&state.recruit).await;
    let custom_fields = custom_field_payload(&form, &name_to_id);
    let payload = build_candidate_update(&form, custom_fields);

    state.recruit.update_candidate(&slug, &payload).await?;

    Ok(Json(json!({
        "status": "success",
        "message": "Kandidat erfolgreich gespeichert.",
    })))
}

fn build_candidate_update(form: &FormData, custom_fields: Vec<CustomFieldEntry>) -> CandidateUpdate {
    let owned = |key: &str| form.get(key).map(str::to_string);

    CandidateUpdate {
        first_name: owned("vorname"),
        last_name: owned("nachname"),
        email: owned("email"),
        contact_number: coerce_phone(form.get("phone")),
        position: owned("aktuelle_position"),
        gender_id: coerce_gender(form.get("geschlecht")),
        city: owned("wohnort"),
        current_organization: owned("arbeitgeber_name"),
        slug: owned("slug"),
        owner: owned("consultant"),
        resume: form
            .get("cv_link")
            .filter(|v| !v.is_empty())
            .map(str::to_string),
        xing: owned("xing_link"),
        linkedin: owned("linkedin_link"),
        current_salary: owned("current_salary"),
        salary_expectation: owned("expected_salary"),
        available_from: owned("verfuegbar_ab"),
        locality: owned("erreichbare_stadtname"),
        notice_period: owned("kuendigungsfrist"),
        custom_fields,
    }
}

/// Phone numbers go upstream as integers, but only when the submitted
/// value is purely numeric; anything else becomes null.
fn coerce_phone(raw: Option<&str>) -> Option<i64> {
    raw.filter(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()))
        .and_then(|s| s.parse().ok())
}

/// Gender codes that fail to parse fall back to a fixed code instead of
/// failing the request.
fn coerce_gender(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse().ok())
        .unwrap_or(FALLBACK_GENDER_ID)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airtable::AirtableClient;
    use crate::catalog::FieldCatalog;
    use crate::pdfmonkey::PdfMonkeyClient;
    use crate::recruitcrm::RecruitCrmClient;
    use wiremock::matchers::{method, path, path_regex, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_coerce_phone_numeric_only() {
        assert_eq!(coerce_phone(Some("03012345")), Some(3012345));
        assert_eq!(coerce_phone(Some("+49 30 12345")), None);
        assert_eq!(coerce_phone(Some("")), None);
        assert_eq!(coerce_phone(None), None);
    }

    #[test]
    fn test_coerce_gender_fallback() {
        assert_eq!(coerce_gender(Some("2")), 2);
        assert_eq!(coerce_gender(Some("divers")), FALLBACK_GENDER_ID);
        assert_eq!(coerce_gender(None), FALLBACK_GENDER_ID);
    }

    #[test]
    fn test_candidate_update_keeps_resume_only_when_present() {
        let form = FormData::new(vec![
            ("vorname".to_string(), "Max".to_string()),
            ("cv_link".to_string(), "".to_string()),
        ]);
        let update = build_candidate_update(&form, vec![]);
        assert_eq!(update.first_name.as_deref(), Some("Max"));
        assert_eq!(update.resume, None);
    }

    fn state_for(server: &MockServer) -> AppState {
        AppState {
            recruit: RecruitCrmClient::new("k".to_string()).with_base_url(server.uri()),
            airtable: AirtableClient::new("k".to_string()).with_base_url(server.uri()),
            pdf: PdfMonkeyClient::new("k".to_string()).with_base_url(server.uri()),
            catalog: FieldCatalog::default(),
        }
    }

    #[tokio::test]
    async fn test_submit_rejects_missing_candidate_id() {
        let server = MockServer::start().await;
        let result = handle_submit(State(state_for(&server)), Form(vec![])).await;
        match result {
            Err(AppError::Validation(msg)) => assert!(msg.contains("Kandidaten-ID")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_submit_runs_full_sales_sequence() {
        let server = MockServer::start().await;

        // document jobs: submit twice, both immediately successful
        Mock::given(method("POST"))
            .and(path("/documents"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "document": {"id": "doc-1"}
            })))
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path_regex("^/document_cards/.*$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "document_card": {
                    "status": "success",
                    "public_share_link": "https://share.example/doc-1"
                }
            })))
            .mount(&server)
            .await;

        // spreadsheet: no match, create
        Mock::given(method("GET"))
            .and(path(format!("/{}", crate::config::SALES_TABLE_ID)))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "records": []
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(format!("/{}", crate::config::SALES_TABLE_ID)))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": "recNew"
            })))
            .expect(1)
            .mount(&server)
            .await;

        // catalog scan + candidate update
        Mock::given(method("GET"))
            .and(path("/candidates"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{
                    "id": 1,
                    "custom_fields": [
                        {"field_id": 10, "field_name": "Branche", "value": "IT"},
                        {"field_id": 11, "field_name": "Anonyme Auswertung", "value": null}
                    ]
                }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/candidates"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": []
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/candidates/slug-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 1
            })))
            .expect(1)
            .mount(&server)
            .await;

        let form = vec![
            ("kandidat_slug".to_string(), "slug-1".to_string()),
            ("branche".to_string(), "Vertrieb".to_string()),
            ("email".to_string(), "max@example.de".to_string()),
            ("vorname".to_string(), "Max".to_string()),
            ("geschlecht".to_string(), "1".to_string()),
            ("phone".to_string(), "03012345".to_string()),
        ];
        let response = handle_submit(State(state_for(&server)), Form(form))
            .await
            .expect("submit should succeed");
        assert_eq!(response.0["status"], "success");
    }

    #[tokio::test]
    async fn test_submit_mirrors_tracking_api_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/documents"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "document": {"id": "doc-1"}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path_regex("^/document_cards/.*$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "document_card": {"status": "failure"}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/{}", crate::config::SALES_TABLE_ID)))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "records": []
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(format!("/{}", crate::config::SALES_TABLE_ID)))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/candidates"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": []
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/candidates/slug-1"))
            .respond_with(ResponseTemplate::new(422).set_body_string("invalid payload"))
            .mount(&server)
            .await;

        let form = vec![
            ("kandidat_slug".to_string(), "slug-1".to_string()),
            ("email".to_string(), "max@example.de".to_string()),
        ];
        let result = handle_submit(State(state_for(&server)), Form(form)).await;
        match result {
            Err(AppError::Upstream { status, body }) => {
                assert_eq!(status, 422);
                assert_eq!(body, "invalid payload");
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }
}
