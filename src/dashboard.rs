use chrono::{DateTime, Utc};
use im::Vector;
use log::debug;
use serde::Serialize;

use crate::aggregation::{
    compliance_by_chapter, distribution_order, monthly_by_chapter, monthly_by_status,
    progress_order, severity_matrix,
};
use crate::color::{self, Rgb};
use crate::config::AuditmapConfig;
use crate::core::{
    ChapterMonthlyData, ChapterStats, MetricsSnapshot, MonthlyCount, Observation, Severity,
    SeverityMatrixRow,
};
use crate::filter::{self, FilterCriteria};
use crate::metrics::{summarize, SnapshotDelta};

/// One bar of the compliance progress view: chapter stats plus the
/// band color and its hover variant.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ProgressEntry {
    pub stats: ChapterStats,
    pub color: Rgb,
    pub hover_color: Rgb,
}

/// One cell of the colored heatmap view.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct HeatmapCell {
    pub severity: Severity,
    pub count: usize,
    pub fill: Rgb,
    pub text: Rgb,
}

/// One row of the colored heatmap view, cells in severity order.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct HeatmapRow {
    pub chapter: String,
    pub cells: Vec<HeatmapCell>,
}

impl HeatmapRow {
    fn from_matrix_row(row: &SeverityMatrixRow, full_scale: usize) -> Self {
        let cells = Severity::ALL
            .into_iter()
            .map(|severity| {
                let count = row.count_for(severity);
                HeatmapCell {
                    severity,
                    count,
                    fill: color::count_color_scaled(count, full_scale),
                    text: color::text_color_scaled(count, full_scale),
                }
            })
            .collect();

        Self {
            chapter: row.chapter.clone(),
            cells,
        }
    }
}

/// Everything the presentation layer needs for one dashboard render.
/// Orderings and colors are final; consumers must not re-sort rows or
/// recompute rates.
#[derive(Clone, Debug, Serialize)]
pub struct DashboardReport {
    pub generated_at: DateTime<Utc>,
    pub criteria: FilterCriteria,
    pub record_count: usize,
    pub metrics: MetricsSnapshot,
    pub delta: SnapshotDelta,
    /// Chapter stats ordered for the distribution view (total desc).
    pub distribution: Vector<ChapterStats>,
    /// Chapter bars ordered for the progress view (rate asc).
    pub progress: Vector<ProgressEntry>,
    pub severity_matrix: Vector<SeverityMatrixRow>,
    pub heatmap: Vector<HeatmapRow>,
    pub monthly_status: Vector<MonthlyCount>,
    pub monthly_chapter: Vector<ChapterMonthlyData>,
}

/// Filter `records` by `criteria` and fan the survivors out to every
/// aggregator. Pure aside from the timestamp; empty input produces an
/// empty report, not an error.
pub fn build_report(
    records: &[Observation],
    criteria: &FilterCriteria,
    previous: &MetricsSnapshot,
    config: &AuditmapConfig,
) -> DashboardReport {
    let filtered = filter::filter(records, criteria);
    debug!(
        "aggregating {} of {} observations",
        filtered.len(),
        records.len()
    );

    let (metrics, delta) = summarize(filtered.iter().copied(), previous);

    let stats = compliance_by_chapter(filtered.iter().copied());
    let distribution = distribution_order(stats.clone());
    let progress = progress_order(stats)
        .into_iter()
        .map(|stats| {
            let color = color::rate_color_banded(
                stats.compliance_rate,
                config.bands.warning_floor,
                config.bands.success_floor,
            );
            ProgressEntry {
                stats,
                color,
                hover_color: color::lighten(color, 10),
            }
        })
        .collect();

    let matrix = severity_matrix(filtered.iter().copied());
    let heatmap = matrix
        .iter()
        .map(|row| HeatmapRow::from_matrix_row(row, config.heatmap.full_intensity_count))
        .collect();

    DashboardReport {
        generated_at: Utc::now(),
        criteria: criteria.clone(),
        record_count: filtered.len(),
        metrics,
        delta,
        distribution: distribution.into_iter().collect(),
        progress,
        severity_matrix: matrix.into_iter().collect(),
        heatmap,
        monthly_status: monthly_by_status(filtered.iter().copied())
            .into_iter()
            .collect(),
        monthly_chapter: monthly_by_chapter(filtered.iter().copied())
            .into_iter()
            .collect(),
    }
}
