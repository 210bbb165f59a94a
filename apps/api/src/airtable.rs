//! Airtable client — spreadsheet sync keyed by candidate email.
//!
//! The contract here is deliberately soft: a failed sync is logged and
//! reported as `None`, never raised. The submission flow continues without
//! the spreadsheet record rather than failing the whole request.

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

use crate::config::{AIRTABLE_BASE_ID, AIRTABLE_BASE_URL, MED_TABLE_ID};
use crate::errors::ClientError;

#[derive(Debug, Deserialize)]
struct RecordList {
    #[serde(default)]
    records: Vec<RecordStub>,
}

#[derive(Debug, Deserialize)]
struct RecordStub {
    id: String,
}

#[derive(Clone)]
pub struct AirtableClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl AirtableClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(20))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            base_url: format!("{AIRTABLE_BASE_URL}/{AIRTABLE_BASE_ID}"),
        }
    }

    /// Points the client at a different base URL. Used by tests to target a
    /// mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Case-insensitive email lookup. Matches are returned in upstream
    /// response order; callers take the first one.
    async fn search_by_email(
        &self,
        table_id: &str,
        email: &str,
    ) -> Result<Vec<RecordStub>, ClientError> {
        let formula = format!("LOWER({{email}}) = '{}'", email.to_lowercase());
        let response = self
            .client
            .get(format!("{}/{table_id}", self.base_url))
            .bearer_auth(&self.api_key)
            .query(&[("filterByFormula", formula)])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        let list: RecordList = response.json().await?;
        Ok(list.records)
    }

    /// Updates the first record matching `email`, or creates a new one.
    /// A failed search aborts the whole operation — no blind create.
    /// Returns the body of whichever mutating call ran, `None` on any
    /// failure.
    pub async fn upsert_by_email(
        &self,
        table_id: &str,
        email: Option<&str>,
        fields: &Map<String, Value>,
    ) -> Option<Value> {
        let email = match email {
            Some(e) if !e.is_empty() => e,
            _ => {
                warn!("Email is required for a spreadsheet upsert");
                return None;
            }
        };

        let records = match self.search_by_email(table_id, email).await {
            Ok(records) => records,
            Err(e) => {
                warn!("Spreadsheet search failed: {e}");
                return None;
            }
        };

        let payload = json!({ "fields": fields });

        let result = if let Some(record) = records.first() {
            self.client
                .patch(format!("{}/{table_id}/{}", self.base_url, record.id))
                .bearer_auth(&self.api_key)
                .json(&payload)
                .send()
                .await
        } else {
            self.client
                .post(format!("{}/{table_id}", self.base_url))
                .bearer_auth(&self.api_key)
                .json(&payload)
                .send()
                .await
        };

        let response = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("Spreadsheet write failed: {e}");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Spreadsheet write returned {status}: {body}");
            return None;
        }

        info!("Spreadsheet record synced for {email}");
        response.json().await.ok()
    }

    /// Pushes the tracking system's skill string into the medical table.
    /// Silent no-op when email or skills is empty or no record matches.
    pub async fn update_skills(&self, email: &str, skills: &str) {
        if email.is_empty() || skills.is_empty() {
            debug!("Skipping skills update: missing email or skills");
            return;
        }

        let records = match self.search_by_email(MED_TABLE_ID, email).await {
            Ok(records) => records,
            Err(e) => {
                warn!("Skills lookup failed: {e}");
                return;
            }
        };
        let Some(record) = records.first() else {
            debug!("No spreadsheet record found for {email}");
            return;
        };

        let result = self
            .client
            .patch(format!("{}/{MED_TABLE_ID}/{}", self.base_url, record.id))
            .bearer_auth(&self.api_key)
            .json(&json!({"fields": {"skills": skills}}))
            .send()
            .await;

        match result {
            Ok(r) if r.status().is_success() => debug!("Skills updated for {email}"),
            Ok(r) => warn!("Skills update returned {}", r.status()),
            Err(e) => warn!("Skills update failed: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: String) -> AirtableClient {
        AirtableClient::new("test-key".to_string()).with_base_url(base_url)
    }

    fn sample_fields() -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("email".to_string(), json!("Max@Example.de"));
        fields.insert("vorname".to_string(), json!("Max"));
        fields
    }

    #[tokio::test]
    async fn test_upsert_creates_when_no_match() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tbl1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"records": []})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/tbl1"))
            .and(body_partial_json(json!({"fields": {"vorname": "Max"}})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "recNew"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let result = client
            .upsert_by_email("tbl1", Some("Max@Example.de"), &sample_fields())
            .await;
        assert_eq!(result.unwrap()["id"], json!("recNew"));
    }

    #[tokio::test]
    async fn test_upsert_patches_first_match() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tbl1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "records": [{"id": "recA"}, {"id": "recB"}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/tbl1/recA"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "recA"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let result = client
            .upsert_by_email("tbl1", Some("max@example.de"), &sample_fields())
            .await;
        assert_eq!(result.unwrap()["id"], json!("recA"));
    }

    #[tokio::test]
    async fn test_upsert_aborts_when_search_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tbl1"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;
        // no POST/PATCH mock mounted: a blind create would 404 loudly

        let client = test_client(server.uri());
        let result = client
            .upsert_by_email("tbl1", Some("max@example.de"), &sample_fields())
            .await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_upsert_requires_email() {
        let server = MockServer::start().await;
        let client = test_client(server.uri());
        assert!(client
            .upsert_by_email("tbl1", None, &sample_fields())
            .await
            .is_none());
        assert!(client
            .upsert_by_email("tbl1", Some(""), &sample_fields())
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_update_skills_noop_on_empty_input() {
        // no mocks mounted: any request would fail the test server-side
        let server = MockServer::start().await;
        let client = test_client(server.uri());
        client.update_skills("", "Rust, SQL").await;
        client.update_skills("max@example.de", "").await;
    }
}
