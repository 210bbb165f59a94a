/// RecruitCRM client — the single point of entry for all applicant-tracking
/// API calls. No other module talks to RecruitCRM directly.
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::RECRUITCRM_BASE_URL;
use crate::errors::ClientError;
use crate::models::{Candidate, FieldDefinition};

const PAGE_SIZE: usize = 100;
/// Hard cap on the number of candidate records a catalog scan may touch.
pub const SCAN_LIMIT: usize = 1_000;

#[derive(Debug, Deserialize)]
struct CandidateListPage {
    #[serde(default)]
    data: Vec<Candidate>,
}

#[derive(Clone)]
pub struct RecruitCrmClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl RecruitCrmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(20))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            base_url: RECRUITCRM_BASE_URL.to_string(),
        }
    }

    /// Points the client at a different base URL. Used by tests to target a
    /// mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .get(format!("{}{path}", self.base_url))
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
    }

    /// Fetches one candidate by id. Any non-2xx answer yields `None` so the
    /// caller can fall back to a list scan.
    pub async fn get_candidate(&self, id: i64) -> Result<Option<Candidate>, ClientError> {
        let response = self.get(&format!("/candidates/{id}")).send().await?;
        if !response.status().is_success() {
            debug!(
                "Direct candidate fetch for {id} returned {}",
                response.status()
            );
            return Ok(None);
        }
        Ok(Some(response.json().await?))
    }

    /// One page of the candidate list. Non-200 answers are reported as
    /// `ClientError::Api`; the scan helpers treat them as end-of-input.
    pub async fn fetch_candidates_page(&self, page: usize) -> Result<Vec<Candidate>, ClientError> {
        let response = self
            .get("/candidates")
            .query(&[("page", page), ("per_page", PAGE_SIZE)])
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
        let page: CandidateListPage = response.json().await?;
        Ok(page.data)
    }

    /// Pages through the candidate list, accumulating at most `limit`
    /// records. Stops on the first failed or empty page and returns what it
    /// has — a partial scan is usable, an empty one means the list could not
    /// be read at all.
    pub async fn scan_candidates(&self, limit: usize) -> Vec<Candidate> {
        let mut collected = Vec::new();
        let mut page = 1;
        while collected.len() < limit {
            let chunk = match self.fetch_candidates_page(page).await {
                Ok(chunk) => chunk,
                Err(e) => {
                    warn!("Candidate scan stopped at page {page}: {e}");
                    break;
                }
            };
            if chunk.is_empty() {
                break;
            }
            let remaining = limit - collected.len();
            collected.extend(chunk.into_iter().take(remaining));
            page += 1;
        }
        collected
    }

    /// Scans the candidate list for a record with the given id. Fallback
    /// path for records the direct endpoint refuses to serve.
    pub async fn find_candidate_in_list(&self, id: i64) -> Option<Candidate> {
        self.scan_candidates(SCAN_LIMIT)
            .await
            .into_iter()
            .find(|c| c.id == id)
    }

    /// Uncached passthrough to the custom-field metadata endpoint.
    pub async fn list_custom_fields(&self) -> Result<Vec<FieldDefinition>, ClientError> {
        let response = self.get("/custom-fields/candidates").send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }

    /// Pushes a full candidate payload to the update-by-id endpoint.
    /// Success only on HTTP 200; anything else is surfaced verbatim.
    pub async fn update_candidate(
        &self,
        slug: &str,
        payload: &crate::models::CandidateUpdate,
    ) -> Result<Value, ClientError> {
        let response = self
            .client
            .post(format!("{}/candidates/{slug}", self.base_url))
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(payload)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if status.as_u16() != 200 {
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        debug!("Candidate {slug} updated");
        Ok(serde_json::from_str(&body).unwrap_or(Value::Null))
    }
}
