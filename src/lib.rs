// Export modules for library usage
pub mod aggregation;
pub mod cli;
pub mod color;
pub mod commands;
pub mod config;
pub mod core;
pub mod dashboard;
pub mod errors;
pub mod filter;
pub mod io;
pub mod metrics;

// Re-export commonly used types
pub use crate::core::{
    ChapterMonthlyData, ChapterStats, MetricsSnapshot, MonthKey, MonthlyCount, Observation,
    Severity, SeverityMatrixRow, Status,
};

pub use crate::errors::AuditError;

pub use crate::filter::{filter, matches, parse_date, FilterCriteria};

pub use crate::aggregation::{
    compliance_by_chapter, distribution_order, monthly_by_chapter, monthly_by_status,
    progress_order, severity_matrix,
};

pub use crate::metrics::{
    is_favorable, percent_change, summarize, take_snapshot, MetricChange, MetricKind,
    MetricsTracker, SnapshotDelta,
};

pub use crate::color::{count_color, lighten, rate_color, status_color, text_color_for, Rgb};

pub use crate::dashboard::{build_report, DashboardReport, HeatmapRow, ProgressEntry};

pub use crate::io::{create_writer, JsonFileSource, ObservationSource, OutputFormat, OutputWriter};

pub use crate::config::AuditmapConfig;
