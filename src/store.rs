use crate::models::{DwellEvent, RatingEvent, ScanEvent};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use std::{collections::HashMap, env, path::Path, sync::Arc, time::Duration};
use thiserror::Error;
use tracing::warn;

pub const SCANS_COLLECTION: &str = "analytics_scans";
pub const RATINGS_COLLECTION: &str = "ratings";
pub const FEEDBACK_COLLECTION: &str = "feedback";
pub const DWELL_COLLECTION: &str = "analytics_dwell";

const PAINTING_FIELD: &str = "paintingName";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("store responded with {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("fixture error: {0}")]
    Fixture(String),
    #[error("store configuration error: {0}")]
    Config(String),
}

/// Read-only view of the four event collections. The dashboard never writes.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn scan_events(&self) -> Result<Vec<ScanEvent>, StoreError>;
    async fn rating_events(&self) -> Result<Vec<RatingEvent>, StoreError>;
    async fn rating_events_for(&self, painting: &str) -> Result<Vec<RatingEvent>, StoreError>;
    async fn dwell_events(&self) -> Result<Vec<DwellEvent>, StoreError>;
    async fn dwell_events_for(&self, painting: &str) -> Result<Vec<DwellEvent>, StoreError>;
    async fn feedback_count(&self) -> Result<u64, StoreError>;
}

/// Picks the store from the environment: `EVENTS_FIXTURE_PATH` wins (local
/// dev and tests), otherwise `FIRESTORE_PROJECT_ID` selects the remote store.
pub async fn resolve_store() -> Result<Arc<dyn EventStore>, StoreError> {
    if let Ok(path) = env::var("EVENTS_FIXTURE_PATH") {
        let store = MemoryStore::from_fixture(Path::new(&path)).await?;
        return Ok(Arc::new(store));
    }

    let project_id = env::var("FIRESTORE_PROJECT_ID").map_err(|_| {
        StoreError::Config("set EVENTS_FIXTURE_PATH or FIRESTORE_PROJECT_ID".to_string())
    })?;
    let database = env::var("FIRESTORE_DATABASE").unwrap_or_else(|_| "(default)".to_string());
    let base_url = env::var("FIRESTORE_BASE_URL")
        .unwrap_or_else(|_| "https://firestore.googleapis.com".to_string());
    let timeout_secs = env::var("STORE_TIMEOUT_SECS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(10);

    let store = FirestoreStore::new(
        &base_url,
        &project_id,
        &database,
        Duration::from_secs(timeout_secs),
    )?;
    Ok(Arc::new(store))
}

/// Firestore REST client. Each read is one `documents:runQuery` call with an
/// optional equality filter on the painting name; the request timeout makes
/// a hung read fail like any other read error.
pub struct FirestoreStore {
    client: Client,
    query_url: String,
}

impl FirestoreStore {
    pub fn new(
        base_url: &str,
        project_id: &str,
        database: &str,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;
        let query_url = format!(
            "{}/v1/projects/{}/databases/{}/documents:runQuery",
            base_url.trim_end_matches('/'),
            project_id,
            database
        );
        Ok(Self { client, query_url })
    }

    async fn run_query(
        &self,
        collection: &str,
        painting: Option<&str>,
    ) -> Result<Vec<Fields>, StoreError> {
        let mut query = json!({ "from": [{ "collectionId": collection }] });
        if let Some(name) = painting {
            query["where"] = json!({
                "fieldFilter": {
                    "field": { "fieldPath": PAINTING_FIELD },
                    "op": "EQUAL",
                    "value": { "stringValue": name }
                }
            });
        }

        let response = self
            .client
            .post(&self.query_url)
            .json(&json!({ "structuredQuery": query }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status { status, body });
        }

        let rows: Vec<QueryRow> = response.json().await?;
        Ok(document_fields(rows))
    }
}

#[async_trait]
impl EventStore for FirestoreStore {
    async fn scan_events(&self) -> Result<Vec<ScanEvent>, StoreError> {
        let fields = self.run_query(SCANS_COLLECTION, None).await?;
        Ok(scans_from_fields(fields))
    }

    async fn rating_events(&self) -> Result<Vec<RatingEvent>, StoreError> {
        let fields = self.run_query(RATINGS_COLLECTION, None).await?;
        Ok(ratings_from_fields(fields))
    }

    async fn rating_events_for(&self, painting: &str) -> Result<Vec<RatingEvent>, StoreError> {
        let fields = self.run_query(RATINGS_COLLECTION, Some(painting)).await?;
        Ok(ratings_from_fields(fields))
    }

    async fn dwell_events(&self) -> Result<Vec<DwellEvent>, StoreError> {
        let fields = self.run_query(DWELL_COLLECTION, None).await?;
        Ok(dwell_from_fields(fields))
    }

    async fn dwell_events_for(&self, painting: &str) -> Result<Vec<DwellEvent>, StoreError> {
        let fields = self.run_query(DWELL_COLLECTION, Some(painting)).await?;
        Ok(dwell_from_fields(fields))
    }

    async fn feedback_count(&self) -> Result<u64, StoreError> {
        let fields = self.run_query(FEEDBACK_COLLECTION, None).await?;
        Ok(fields.len() as u64)
    }
}

/// In-memory store, loadable from a JSON fixture file. Filtering happens in
/// code; the contract matches the remote store exactly.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemoryStore {
    #[serde(default)]
    pub scans: Vec<ScanEvent>,
    #[serde(default)]
    pub ratings: Vec<RatingEvent>,
    #[serde(default)]
    pub dwell: Vec<DwellEvent>,
    #[serde(default)]
    pub feedback: Vec<Value>,
}

impl MemoryStore {
    pub async fn from_fixture(path: &Path) -> Result<Self, StoreError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|err| StoreError::Fixture(format!("read {}: {err}", path.display())))?;
        serde_json::from_slice(&bytes)
            .map_err(|err| StoreError::Fixture(format!("parse {}: {err}", path.display())))
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn scan_events(&self) -> Result<Vec<ScanEvent>, StoreError> {
        Ok(self.scans.clone())
    }

    async fn rating_events(&self) -> Result<Vec<RatingEvent>, StoreError> {
        Ok(self.ratings.clone())
    }

    async fn rating_events_for(&self, painting: &str) -> Result<Vec<RatingEvent>, StoreError> {
        Ok(self
            .ratings
            .iter()
            .filter(|event| event.painting_name == painting)
            .cloned()
            .collect())
    }

    async fn dwell_events(&self) -> Result<Vec<DwellEvent>, StoreError> {
        Ok(self.dwell.clone())
    }

    async fn dwell_events_for(&self, painting: &str) -> Result<Vec<DwellEvent>, StoreError> {
        Ok(self
            .dwell
            .iter()
            .filter(|event| event.painting_name == painting)
            .cloned()
            .collect())
    }

    async fn feedback_count(&self) -> Result<u64, StoreError> {
        Ok(self.feedback.len() as u64)
    }
}

// Firestore runQuery responses are a row stream; rows without a `document`
// key (read-time markers) carry no data.

#[derive(Debug, Deserialize)]
struct QueryRow {
    document: Option<FirestoreDocument>,
}

#[derive(Debug, Deserialize)]
struct FirestoreDocument {
    #[serde(default)]
    fields: HashMap<String, FieldValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldValue {
    string_value: Option<String>,
    // Firestore encodes 64-bit integers as JSON strings.
    integer_value: Option<String>,
    double_value: Option<f64>,
}

type Fields = HashMap<String, FieldValue>;

impl FieldValue {
    fn as_str(&self) -> Option<&str> {
        self.string_value.as_deref()
    }

    fn as_f64(&self) -> f64 {
        self.double_value
            .or_else(|| {
                self.integer_value
                    .as_deref()
                    .and_then(|raw| raw.parse::<f64>().ok())
            })
            .unwrap_or(0.0)
    }
}

fn document_fields(rows: Vec<QueryRow>) -> Vec<Fields> {
    rows.into_iter()
        .filter_map(|row| row.document)
        .map(|doc| doc.fields)
        .collect()
}

fn painting_name(fields: &Fields, collection: &str) -> Option<String> {
    match fields.get(PAINTING_FIELD).and_then(FieldValue::as_str) {
        Some(name) => Some(name.to_string()),
        None => {
            warn!("skipping {collection} record without {PAINTING_FIELD}");
            None
        }
    }
}

fn numeric_field(fields: &Fields, field: &str) -> f64 {
    fields.get(field).map(FieldValue::as_f64).unwrap_or(0.0)
}

fn scans_from_fields(fields: Vec<Fields>) -> Vec<ScanEvent> {
    fields
        .iter()
        .filter_map(|doc| painting_name(doc, SCANS_COLLECTION))
        .map(|painting_name| ScanEvent { painting_name })
        .collect()
}

fn ratings_from_fields(fields: Vec<Fields>) -> Vec<RatingEvent> {
    fields
        .iter()
        .filter_map(|doc| {
            let painting_name = painting_name(doc, RATINGS_COLLECTION)?;
            Some(RatingEvent {
                painting_name,
                rating: numeric_field(doc, "rating"),
            })
        })
        .collect()
}

fn dwell_from_fields(fields: Vec<Fields>) -> Vec<DwellEvent> {
    fields
        .iter()
        .filter_map(|doc| {
            let painting_name = painting_name(doc, DWELL_COLLECTION)?;
            Some(DwellEvent {
                painting_name,
                dwell_time_seconds: numeric_field(doc, "dwellTimeSeconds"),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(value: Value) -> Vec<QueryRow> {
        serde_json::from_value(value).expect("rows should deserialize")
    }

    #[test]
    fn decodes_scan_rows_and_skips_nameless_records() {
        let rows = rows(json!([
            { "document": { "name": "d/1", "fields": {
                "paintingName": { "stringValue": "Starry Night" }
            } } },
            { "document": { "name": "d/2", "fields": {} } },
            { "readTime": "2026-08-01T00:00:00Z" }
        ]));

        let scans = scans_from_fields(document_fields(rows));
        assert_eq!(scans.len(), 1);
        assert_eq!(scans[0].painting_name, "Starry Night");
    }

    #[test]
    fn decodes_integer_and_double_rating_values() {
        let rows = rows(json!([
            { "document": { "name": "d/1", "fields": {
                "paintingName": { "stringValue": "A" },
                "rating": { "integerValue": "4" }
            } } },
            { "document": { "name": "d/2", "fields": {
                "paintingName": { "stringValue": "A" },
                "rating": { "doubleValue": 2.5 }
            } } },
            { "document": { "name": "d/3", "fields": {
                "paintingName": { "stringValue": "A" }
            } } }
        ]));

        let ratings = ratings_from_fields(document_fields(rows));
        assert_eq!(ratings.len(), 3);
        assert_eq!(ratings[0].rating, 4.0);
        assert_eq!(ratings[1].rating, 2.5);
        // Missing rating fields count as zero, same as the upstream apps.
        assert_eq!(ratings[2].rating, 0.0);
    }

    #[test]
    fn decodes_dwell_rows() {
        let rows = rows(json!([
            { "document": { "name": "d/1", "fields": {
                "paintingName": { "stringValue": "B" },
                "dwellTimeSeconds": { "doubleValue": 42.5 }
            } } }
        ]));

        let dwell = dwell_from_fields(document_fields(rows));
        assert_eq!(dwell.len(), 1);
        assert_eq!(dwell[0].painting_name, "B");
        assert_eq!(dwell[0].dwell_time_seconds, 42.5);
    }

    #[tokio::test]
    async fn memory_store_filters_by_painting() {
        let store = MemoryStore {
            scans: vec![],
            ratings: vec![
                RatingEvent {
                    painting_name: "A".to_string(),
                    rating: 4.0,
                },
                RatingEvent {
                    painting_name: "B".to_string(),
                    rating: 1.0,
                },
            ],
            dwell: vec![DwellEvent {
                painting_name: "A".to_string(),
                dwell_time_seconds: 12.0,
            }],
            feedback: vec![json!({}), json!({})],
        };

        let ratings = store.rating_events_for("A").await.unwrap();
        assert_eq!(ratings.len(), 1);
        assert_eq!(ratings[0].rating, 4.0);

        let dwell = store.dwell_events_for("B").await.unwrap();
        assert!(dwell.is_empty());

        assert_eq!(store.feedback_count().await.unwrap(), 2);
    }

    #[test]
    fn fixture_parses_with_missing_sections() {
        let fixture: MemoryStore = serde_json::from_value(json!({
            "scans": [{ "paintingName": "A" }]
        }))
        .unwrap();
        assert_eq!(fixture.scans.len(), 1);
        assert!(fixture.ratings.is_empty());
        assert!(fixture.feedback.is_empty());
    }
}
