//! Field Catalog — process-wide cache of the applicant-tracking system's
//! custom-field definitions, keyed `field_id → field_name`.
//!
//! Built lazily by paging through the candidate list (first-seen name wins
//! per id) and kept for a fixed TTL. A rebuild race between two requests is
//! accepted: both recompute nominally equal maps and the last write wins.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::models::CandidateCustomField;
use crate::recruitcrm::{RecruitCrmClient, SCAN_LIMIT};

/// How long a built catalog stays valid.
pub const CATALOG_TTL: Duration = Duration::from_secs(30 * 60);

struct CacheSlot {
    map: HashMap<i64, String>,
    built_at: Instant,
}

#[derive(Clone)]
pub struct FieldCatalog {
    inner: Arc<RwLock<Option<CacheSlot>>>,
    ttl: Duration,
}

impl Default for FieldCatalog {
    fn default() -> Self {
        Self::with_ttl(CATALOG_TTL)
    }
}

impl FieldCatalog {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(None)),
            ttl,
        }
    }

    /// Returns the cached `field_id → field_name` map, rebuilding it when
    /// the cache is missing or expired. An empty map means the candidate
    /// list could not be read at all — callers must treat that as "catalog
    /// unavailable", not "no fields exist".
    pub async fn field_map(&self, recruit: &RecruitCrmClient) -> HashMap<i64, String> {
        if let Some(slot) = self.inner.read().await.as_ref() {
            if slot.built_at.elapsed() < self.ttl {
                return slot.map.clone();
            }
        }

        // Rebuild without holding the lock across the scan. Two concurrent
        // rebuilds race harmlessly: entries are nominally equal.
        let candidates = recruit.scan_candidates(SCAN_LIMIT).await;
        let map = collect_field_map(candidates.iter().flat_map(|c| &c.custom_fields));
        if map.is_empty() {
            warn!("Field catalog rebuild produced no entries; catalog unavailable");
        } else {
            info!("Field catalog rebuilt with {} entries", map.len());
        }

        *self.inner.write().await = Some(CacheSlot {
            map: map.clone(),
            built_at: Instant::now(),
        });
        map
    }

    /// Inverse mapping `field_name → field_id`, derived on every call from
    /// the shared cache.
    pub async fn name_to_id(&self, recruit: &RecruitCrmClient) -> HashMap<String, i64> {
        invert_field_map(&self.field_map(recruit).await)
    }
}

/// Accumulates `field_id → field_name`, first occurrence wins: a later
/// record reporting a different name for an already-seen id does not
/// overwrite it.
pub fn collect_field_map<'a>(
    fields: impl IntoIterator<Item = &'a CandidateCustomField>,
) -> HashMap<i64, String> {
    let mut map = HashMap::new();
    for field in fields {
        map.entry(field.field_id)
            .or_insert_with(|| field.field_name.clone());
    }
    map
}

/// Inverts the catalog. Two ids sharing a display name is a data-entry
/// mistake upstream; the result is defined last-wins and flagged here
/// instead of failing the build.
pub fn invert_field_map(map: &HashMap<i64, String>) -> HashMap<String, i64> {
    let mut inverse = HashMap::with_capacity(map.len());
    for (&id, name) in map {
        if let Some(previous) = inverse.insert(name.clone(), id) {
            warn!(
                "Custom field name '{name}' maps to multiple ids ({previous}, {id}); keeping {id}"
            );
        }
    }
    inverse
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn field(id: i64, name: &str) -> CandidateCustomField {
        CandidateCustomField {
            field_id: id,
            field_name: name.to_string(),
            value: None,
        }
    }

    #[test]
    fn test_first_seen_name_wins() {
        let fields = [field(10, "Branche"), field(11, "Wohnort"), field(10, "Industry")];
        let map = collect_field_map(&fields);
        assert_eq!(map[&10], "Branche");
        assert_eq!(map[&11], "Wohnort");
    }

    #[test]
    fn test_invert_duplicate_names_collapse() {
        let mut map = HashMap::new();
        map.insert(10, "Branche".to_string());
        map.insert(11, "Branche".to_string());
        let inverse = invert_field_map(&map);
        assert_eq!(inverse.len(), 1);
        assert!(inverse["Branche"] == 10 || inverse["Branche"] == 11);
    }

    #[tokio::test]
    async fn test_field_map_is_cached_within_ttl() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/candidates"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{
                    "id": 1,
                    "custom_fields": [{"field_id": 10, "field_name": "Branche", "value": "IT"}]
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/candidates"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = RecruitCrmClient::new("test-key".to_string()).with_base_url(server.uri());
        let catalog = FieldCatalog::with_ttl(Duration::from_secs(3600));

        let first = catalog.field_map(&client).await;
        let second = catalog.field_map(&client).await;
        assert_eq!(first, second);
        assert_eq!(first[&10], "Branche");
    }
}
