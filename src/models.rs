use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One scan interaction with a painting. Duplicates are expected; every scan
/// is its own event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanEvent {
    #[serde(rename = "paintingName")]
    pub painting_name: String,
}

/// A visitor rating for a painting. Expected range 0-5, not validated here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingEvent {
    #[serde(rename = "paintingName")]
    pub painting_name: String,
    #[serde(default)]
    pub rating: f64,
}

/// Seconds a visitor spent with a painting, per interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DwellEvent {
    #[serde(rename = "paintingName")]
    pub painting_name: String,
    #[serde(rename = "dwellTimeSeconds", default)]
    pub dwell_time_seconds: f64,
}

/// Per-painting aggregate, recomputed from raw events on every load.
/// `avg_rating`/`avg_dwell` are `None` when no matching events exist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaintingStats {
    pub scan_count: u64,
    pub rating_count: u64,
    pub avg_rating: Option<f64>,
    pub dwell_count: u64,
    pub avg_dwell: Option<f64>,
}

/// A painting with its aggregate; ranked order after sorting.
#[derive(Debug, Clone, Serialize)]
pub struct RankedPainting {
    pub name: String,
    #[serde(flatten)]
    pub stats: PaintingStats,
}

/// Collection-wide summary, independent of the per-painting breakdown.
/// `avg_dwell_seconds` is 0.0 (not absent) when there are no dwell events;
/// the per-painting case uses an absent sentinel instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallStats {
    pub total_scans: u64,
    pub total_ratings: u64,
    pub total_feedback: u64,
    pub avg_dwell_seconds: f64,
}

/// One table row, averages already rendered as display strings
/// ("3.0", or "No ratings" / "N/A" when there is nothing to show).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub name: String,
    pub scan_count: u64,
    pub rating_count: u64,
    pub avg_rating: String,
    pub avg_dwell: String,
}

/// Parallel arrays in ranked order, one slot per painting. Averages keep
/// their raw zero-or-real values here; placeholders are a table concern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub scan_counts: Vec<u64>,
    pub avg_ratings: Vec<f64>,
    pub avg_dwell: Vec<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub generated_at: DateTime<Utc>,
    pub overall: OverallStats,
    pub table: Vec<TableRow>,
    pub charts: ChartData,
}
