//! PDFMonkey client — submits render jobs and polls them to completion.
//!
//! A job walks `submitted → pending → {success, failure, timeout}`. The
//! poll loop is a fixed-interval, bounded wait: no backoff, no jitter.
//! Total wall-clock time is bounded by the wait budget plus one in-flight
//! request.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::PDFMONKEY_BASE_URL;
use crate::errors::ClientError;

pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(60);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct DocumentResponse {
    document: DocumentBody,
}

#[derive(Debug, Deserialize)]
struct DocumentBody {
    id: String,
}

#[derive(Debug, Deserialize)]
struct DocumentCardResponse {
    document_card: DocumentCard,
}

#[derive(Debug, Deserialize)]
struct DocumentCard {
    status: String,
    #[serde(default)]
    public_share_link: Option<String>,
}

/// One observation of a render job.
#[derive(Debug, Clone, PartialEq)]
pub enum PollStatus {
    Success(String),
    Failure,
    /// Anything that is neither terminal state, including statuses this
    /// client does not know about.
    Pending,
}

#[derive(Clone)]
pub struct PdfMonkeyClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl PdfMonkeyClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            base_url: PDFMONKEY_BASE_URL.to_string(),
        }
    }

    /// Points the client at a different base URL. Used by tests to target a
    /// mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Submits a render job for the given template and returns the job id.
    /// The payload shape is chosen by the caller; this is purely transport.
    pub async fn submit(&self, template_id: &str, payload: &Value) -> Result<String, ClientError> {
        let response = self
            .client
            .post(format!("{}/documents", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&json!({
                "document": {
                    "document_template_id": template_id,
                    "payload": payload,
                    "status": "pending"
                }
            }))
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
        let parsed: DocumentResponse = response.json().await?;
        debug!("Submitted document job {}", parsed.document.id);
        Ok(parsed.document.id)
    }

    async fn fetch_status(&self, document_id: &str) -> Result<PollStatus, ClientError> {
        let response = self
            .client
            .get(format!("{}/document_cards/{document_id}", self.base_url))
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
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
        let parsed: DocumentCardResponse = response.json().await?;
        Ok(match parsed.document_card.status.as_str() {
            "success" => match parsed.document_card.public_share_link {
                Some(link) => PollStatus::Success(link),
                None => PollStatus::Failure,
            },
            "failure" => PollStatus::Failure,
            _ => PollStatus::Pending,
        })
    }

    /// Polls the job until it succeeds, fails, or the wait budget runs out.
    /// Returns the public share link on success, `None` otherwise.
    pub async fn await_completion(&self, document_id: &str) -> Option<String> {
        poll_until_ready(
            || self.fetch_status(document_id),
            DEFAULT_MAX_WAIT,
            DEFAULT_POLL_INTERVAL,
        )
        .await
    }
}

/// Fixed-interval poll loop over an async status fetch. Transient fetch
/// errors keep polling while budget remains; `failure` and an exhausted
/// budget both yield `None`.
pub async fn poll_until_ready<F, Fut>(
    mut fetch: F,
    max_wait: Duration,
    interval: Duration,
) -> Option<String>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<PollStatus, ClientError>>,
{
    let mut waited = Duration::ZERO;
    while waited < max_wait {
        match fetch().await {
            Ok(PollStatus::Success(url)) => return Some(url),
            Ok(PollStatus::Failure) => {
                warn!("Document generation failed");
                return None;
            }
            Ok(PollStatus::Pending) => {}
            Err(e) => warn!("Document status check failed: {e}"),
        }
        tokio::time::sleep(interval).await;
        waited += interval;
    }
    warn!("Timed out waiting for document");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test(start_paused = true)]
    async fn test_poll_returns_link_once_successful() {
        let calls = AtomicUsize::new(0);
        let start = tokio::time::Instant::now();
        let result = poll_until_ready(
            || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    Ok(match n {
                        0 | 1 => PollStatus::Pending,
                        _ => PollStatus::Success("https://share.example/doc".to_string()),
                    })
                }
            },
            Duration::from_secs(60),
            Duration::from_secs(5),
        )
        .await;
        assert_eq!(result, Some("https://share.example/doc".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // two pending ticks elapse two intervals, well inside the budget
        assert_eq!(start.elapsed(), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_budget_bounds_tick_count() {
        let calls = AtomicUsize::new(0);
        let result = poll_until_ready(
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(PollStatus::Pending) }
            },
            Duration::from_secs(10),
            Duration::from_secs(5),
        )
        .await;
        assert_eq!(result, None);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_stops_on_failure() {
        let result = poll_until_ready(
            || async { Ok(PollStatus::Failure) },
            Duration::from_secs(60),
            Duration::from_secs(5),
        )
        .await;
        assert_eq!(result, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_survives_transient_errors() {
        let calls = AtomicUsize::new(0);
        let result = poll_until_ready(
            || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        Err(ClientError::Api {
                            status: 502,
                            body: "bad gateway".to_string(),
                        })
                    } else {
                        Ok(PollStatus::Success("https://share.example/doc".to_string()))
                    }
                }
            },
            Duration::from_secs(60),
            Duration::from_secs(5),
        )
        .await;
        assert_eq!(result, Some("https://share.example/doc".to_string()));
    }

    #[tokio::test]
    async fn test_submit_posts_document_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/documents"))
            .and(body_partial_json(json!({
                "document": {
                    "document_template_id": "tmpl-1",
                    "status": "pending"
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "document": {"id": "doc-42"}
            })))
            .mount(&server)
            .await;

        let client = PdfMonkeyClient::new("test-key".to_string()).with_base_url(server.uri());
        let id = client
            .submit("tmpl-1", &json!({"kandidat": {"vorname": "Max"}}))
            .await
            .unwrap();
        assert_eq!(id, "doc-42");
    }
}
