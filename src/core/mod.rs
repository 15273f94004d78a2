pub mod metrics;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::errors::AuditError;

/// How serious a single audit finding is.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// All severities, in heatmap column order.
    pub const ALL: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::High];
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        static DISPLAY_STRINGS: &[(Severity, &str)] = &[
            (Severity::Low, "Low"),
            (Severity::Medium, "Medium"),
            (Severity::High, "High"),
        ];

        let display_str = DISPLAY_STRINGS
            .iter()
            .find(|(s, _)| s == self)
            .map(|(_, s)| *s)
            .unwrap_or("Unknown");

        write!(f, "{display_str}")
    }
}

impl FromStr for Severity {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Severity::Low),
            "Medium" => Ok(Severity::Medium),
            "High" => Ok(Severity::High),
            other => Err(AuditError::validation(format!(
                "unrecognized severity '{other}' (expected Low, Medium or High)"
            ))),
        }
    }
}

/// Whether an observation has been addressed by the auditee.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Status {
    Open,
    Complied,
}

impl Status {
    /// Both statuses, in the order trend rows are emitted.
    pub const ALL: [Status; 2] = [Status::Open, Status::Complied];
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        static DISPLAY_STRINGS: &[(Status, &str)] =
            &[(Status::Open, "Open"), (Status::Complied, "Complied")];

        let display_str = DISPLAY_STRINGS
            .iter()
            .find(|(s, _)| s == self)
            .map(|(_, s)| *s)
            .unwrap_or("Unknown");

        write!(f, "{display_str}")
    }
}

impl FromStr for Status {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Open" => Ok(Status::Open),
            "Complied" => Ok(Status::Complied),
            other => Err(AuditError::validation(format!(
                "unrecognized status '{other}' (expected Open or Complied)"
            ))),
        }
    }
}

/// A single audit finding. Immutable once loaded; the aggregation
/// functions borrow records, they never take ownership.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    pub id: u64,
    pub date: NaiveDate,
    pub chapter: String,
    pub severity: Severity,
    pub status: Status,
    #[serde(default)]
    pub description: String,
}

impl Observation {
    pub fn new(
        id: u64,
        date: NaiveDate,
        chapter: impl Into<String>,
        severity: Severity,
        status: Status,
    ) -> Self {
        Self {
            id,
            date,
            chapter: chapter.into(),
            severity,
            status,
            description: String::new(),
        }
    }
}

/// A calendar month used as a grouping key. Orders by the underlying
/// year and month, never by the display label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Display label, e.g. "Jan 2024". Formatting happens here, at the
    /// presentation boundary; grouping and sorting use the raw fields.
    pub fn label(&self) -> String {
        static MONTH_NAMES: &[(u32, &str)] = &[
            (1, "Jan"),
            (2, "Feb"),
            (3, "Mar"),
            (4, "Apr"),
            (5, "May"),
            (6, "Jun"),
            (7, "Jul"),
            (8, "Aug"),
            (9, "Sep"),
            (10, "Oct"),
            (11, "Nov"),
            (12, "Dec"),
        ];

        let name = MONTH_NAMES
            .iter()
            .find(|(m, _)| *m == self.month)
            .map(|(_, n)| *n)
            .unwrap_or("Unknown");

        format!("{} {}", name, self.year)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

/// Per-chapter open/complied tallies with the derived compliance rate.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChapterStats {
    pub chapter: String,
    pub total: usize,
    pub open: usize,
    pub complied: usize,
    pub compliance_rate: f64,
}

/// One heatmap row: counts per severity for a single chapter.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeverityMatrixRow {
    pub chapter: String,
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl SeverityMatrixRow {
    pub fn new(chapter: impl Into<String>) -> Self {
        Self {
            chapter: chapter.into(),
            low: 0,
            medium: 0,
            high: 0,
        }
    }

    pub fn bump(&mut self, severity: Severity) {
        match severity {
            Severity::Low => self.low += 1,
            Severity::Medium => self.medium += 1,
            Severity::High => self.high += 1,
        }
    }

    pub fn count_for(&self, severity: Severity) -> usize {
        match severity {
            Severity::Low => self.low,
            Severity::Medium => self.medium,
            Severity::High => self.high,
        }
    }

    pub fn row_total(&self) -> usize {
        self.low + self.medium + self.high
    }
}

/// Observation count for one (month, status) pair.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct MonthlyCount {
    pub month: MonthKey,
    pub status: Status,
    pub count: usize,
}

/// Observation count for one (month, chapter) pair. Pairs with a zero
/// count are never emitted.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ChapterMonthlyData {
    pub month: MonthKey,
    pub chapter: String,
    pub count: usize,
}

/// Headline totals captured at one point in time. Deltas are computed
/// against the snapshot from the previous recalculation.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct MetricsSnapshot {
    pub total: usize,
    pub open: usize,
    pub complied: usize,
    pub compliance_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_round_trips_through_from_str() {
        for severity in Severity::ALL {
            assert_eq!(severity.to_string().parse::<Severity>().unwrap(), severity);
        }
    }

    #[test]
    fn unknown_severity_is_a_validation_error() {
        let err = "Catastrophic".parse::<Severity>().unwrap_err();
        assert!(matches!(err, AuditError::Validation { .. }));
    }

    #[test]
    fn unknown_status_is_a_validation_error() {
        let err = "Closed".parse::<Status>().unwrap_err();
        assert!(matches!(err, AuditError::Validation { .. }));
    }

    #[test]
    fn month_key_orders_by_year_then_month() {
        let jan_2024 = MonthKey::new(2024, 1);
        let feb_2023 = MonthKey::new(2023, 2);
        let dec_2023 = MonthKey::new(2023, 12);

        // "Feb 2023" sorts lexically after "Dec 2023" and before
        // "Jan 2024"; the key must order chronologically regardless.
        assert!(feb_2023 < dec_2023);
        assert!(dec_2023 < jan_2024);
    }

    #[test]
    fn month_key_label_is_short_month_and_year() {
        assert_eq!(MonthKey::new(2024, 1).label(), "Jan 2024");
        assert_eq!(MonthKey::new(2023, 12).label(), "Dec 2023");
    }

    #[test]
    fn month_key_from_date_truncates_to_month() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap();
        assert_eq!(MonthKey::from_date(date), MonthKey::new(2024, 3));
    }

    #[test]
    fn severity_matrix_row_bump_hits_one_cell() {
        let mut row = SeverityMatrixRow::new("IT Controls");
        row.bump(Severity::High);
        row.bump(Severity::High);
        row.bump(Severity::Low);

        assert_eq!(row.count_for(Severity::Low), 1);
        assert_eq!(row.count_for(Severity::Medium), 0);
        assert_eq!(row.count_for(Severity::High), 2);
        assert_eq!(row.row_total(), 3);
    }

    #[test]
    fn default_snapshot_is_all_zeros() {
        let snapshot = MetricsSnapshot::default();
        assert_eq!(snapshot.total, 0);
        assert_eq!(snapshot.open, 0);
        assert_eq!(snapshot.complied, 0);
        assert_eq!(snapshot.compliance_rate, 0.0);
    }
}
