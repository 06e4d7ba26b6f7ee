use crate::models::{
    ChartData, DashboardResponse, OverallStats, PaintingStats, RankedPainting, TableRow,
};
use crate::store::{EventStore, StoreError};
use chrono::Utc;
use futures::future::try_join_all;
use std::collections::HashMap;
use tracing::info;

/// Runs one full dashboard load: overall stats and the per-painting
/// aggregation in parallel, then ranking and view projection. If either read
/// sequence fails the whole load fails; no partial dashboard is produced.
pub async fn build_dashboard(store: &dyn EventStore) -> Result<DashboardResponse, StoreError> {
    let (overall, paintings) = tokio::try_join!(overall_stats(store), aggregate_paintings(store))?;
    let ranked = rank_paintings(paintings);

    info!(
        paintings = ranked.len(),
        total_scans = overall.total_scans,
        "dashboard data loaded"
    );

    Ok(DashboardResponse {
        generated_at: Utc::now(),
        overall,
        table: table_rows(&ranked),
        charts: chart_data(&ranked),
    })
}

/// Collection-wide totals, computed straight from the raw collections.
/// Sizes count every record; scans are never deduplicated.
pub async fn overall_stats(store: &dyn EventStore) -> Result<OverallStats, StoreError> {
    let (scans, ratings, dwell, total_feedback) = tokio::try_join!(
        store.scan_events(),
        store.rating_events(),
        store.dwell_events(),
        store.feedback_count(),
    )?;

    // Unlike the per-painting averages, an empty dwell collection yields a
    // plain 0.0 here. Long-standing display behavior, kept as is.
    let avg_dwell_seconds = if dwell.is_empty() {
        0.0
    } else {
        let total: f64 = dwell.iter().map(|event| event.dwell_time_seconds).sum();
        round1(total / dwell.len() as f64)
    };

    Ok(OverallStats {
        total_scans: scans.len() as u64,
        total_ratings: ratings.len() as u64,
        total_feedback,
        avg_dwell_seconds,
    })
}

/// Groups scan events by painting, then fans out one filtered rating read and
/// one filtered dwell read per distinct painting, all in flight at once. The
/// painting set comes from the scan collection alone; ratings or dwell events
/// for unscanned paintings never create an aggregate. Results come back in
/// discovery order (first appearance in the scan stream).
pub async fn aggregate_paintings(
    store: &dyn EventStore,
) -> Result<Vec<RankedPainting>, StoreError> {
    let scans = store.scan_events().await?;

    let mut order: Vec<String> = Vec::new();
    let mut scan_counts: HashMap<String, u64> = HashMap::new();
    for scan in &scans {
        let count = scan_counts.entry(scan.painting_name.clone()).or_insert(0);
        if *count == 0 {
            order.push(scan.painting_name.clone());
        }
        *count += 1;
    }

    // Each painting's reads land in their own result slot; the merge below is
    // the only writer of the aggregate list.
    let reads = order.iter().map(|name| async move {
        tokio::try_join!(store.rating_events_for(name), store.dwell_events_for(name))
    });
    let results = try_join_all(reads).await?;

    let paintings = order
        .into_iter()
        .zip(results)
        .map(|(name, (ratings, dwell))| {
            let stats = PaintingStats {
                scan_count: scan_counts[&name],
                rating_count: ratings.len() as u64,
                avg_rating: mean(ratings.iter().map(|event| event.rating)),
                dwell_count: dwell.len() as u64,
                avg_dwell: mean(dwell.iter().map(|event| event.dwell_time_seconds)),
            };
            RankedPainting { name, stats }
        })
        .collect();

    Ok(paintings)
}

/// Sorts by scan count, most scanned first. The sort is stable, so paintings
/// with equal counts keep their discovery order.
pub fn rank_paintings(mut paintings: Vec<RankedPainting>) -> Vec<RankedPainting> {
    paintings.sort_by(|a, b| b.stats.scan_count.cmp(&a.stats.scan_count));
    paintings
}

pub fn table_rows(ranked: &[RankedPainting]) -> Vec<TableRow> {
    ranked
        .iter()
        .map(|painting| TableRow {
            name: painting.name.clone(),
            scan_count: painting.stats.scan_count,
            rating_count: painting.stats.rating_count,
            avg_rating: display_average(painting.stats.avg_rating, "No ratings"),
            avg_dwell: display_average(painting.stats.avg_dwell, "N/A"),
        })
        .collect()
}

pub fn chart_data(ranked: &[RankedPainting]) -> ChartData {
    let mut charts = ChartData::default();
    for painting in ranked {
        charts.labels.push(painting.name.clone());
        charts.scan_counts.push(painting.stats.scan_count);
        charts
            .avg_ratings
            .push(painting.stats.avg_rating.unwrap_or(0.0));
        charts
            .avg_dwell
            .push(painting.stats.avg_dwell.unwrap_or(0.0));
    }
    charts
}

fn mean<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    let mut total = 0.0;
    let mut count = 0u64;
    for value in values {
        total += value;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(round1(total / count as f64))
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// The original dashboard compared `value > 0`, so a true 0.0 average renders
// the same placeholder as missing data. Kept rather than fixed.
fn display_average(avg: Option<f64>, placeholder: &str) -> String {
    match avg {
        Some(value) if value > 0.0 => format!("{value:.1}"),
        _ => placeholder.to_string(),
    }
}
