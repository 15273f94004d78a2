use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::metrics::{compliance_rate, count_by_status};
use crate::core::{MetricsSnapshot, Observation};

/// The four headline metrics shown on the dashboard.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Total,
    Open,
    Complied,
    ComplianceRate,
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        static DISPLAY_STRINGS: &[(MetricKind, &str)] = &[
            (MetricKind::Total, "Total"),
            (MetricKind::Open, "Open"),
            (MetricKind::Complied, "Complied"),
            (MetricKind::ComplianceRate, "Compliance Rate"),
        ];

        let display_str = DISPLAY_STRINGS
            .iter()
            .find(|(k, _)| k == self)
            .map(|(_, s)| *s)
            .unwrap_or("Unknown");

        write!(f, "{display_str}")
    }
}

/// Single-step change of one metric against the previous snapshot.
/// `favorable` is a display hint driving delta color-coding, not a
/// correctness judgement.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct MetricChange {
    pub metric: MetricKind,
    pub percent_change: f64,
    pub favorable: bool,
}

/// The change view produced alongside each new snapshot.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SnapshotDelta {
    pub previous: MetricsSnapshot,
    pub changes: Vec<MetricChange>,
}

impl SnapshotDelta {
    pub fn change_for(&self, metric: MetricKind) -> Option<&MetricChange> {
        self.changes.iter().find(|c| c.metric == metric)
    }
}

/// Percentage change from `previous` to `current`. A metric appearing
/// out of nowhere reads as +100%; staying at zero reads as no change.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return if current > 0.0 { 100.0 } else { 0.0 };
    }

    (current - previous) / previous * 100.0
}

/// Whether a change in this metric reads as an improvement. Fewer open
/// observations is good; more of everything else is good by convention.
pub fn is_favorable(metric: MetricKind, change: f64) -> bool {
    match metric {
        MetricKind::Open => change <= 0.0,
        MetricKind::Total | MetricKind::Complied | MetricKind::ComplianceRate => change >= 0.0,
    }
}

/// Capture the headline metrics for a record collection.
pub fn take_snapshot<'a, I>(records: I) -> MetricsSnapshot
where
    I: IntoIterator<Item = &'a Observation>,
{
    let (open, complied) = count_by_status(records);
    let total = open + complied;

    MetricsSnapshot {
        total,
        open,
        complied,
        compliance_rate: compliance_rate(complied, total),
    }
}

/// Compute the new snapshot and its change view against `previous`.
///
/// The previous snapshot is explicit state threaded by the caller, so
/// successive calls report single-step deltas: feed each call's
/// returned snapshot into the next one. Hosts that prefer a retained
/// cell can use [`MetricsTracker`].
pub fn summarize<'a, I>(records: I, previous: &MetricsSnapshot) -> (MetricsSnapshot, SnapshotDelta)
where
    I: IntoIterator<Item = &'a Observation>,
{
    let snapshot = take_snapshot(records);

    let pairs = [
        (MetricKind::Total, snapshot.total as f64, previous.total as f64),
        (MetricKind::Open, snapshot.open as f64, previous.open as f64),
        (
            MetricKind::Complied,
            snapshot.complied as f64,
            previous.complied as f64,
        ),
        (
            MetricKind::ComplianceRate,
            snapshot.compliance_rate,
            previous.compliance_rate,
        ),
    ];

    let changes = pairs
        .into_iter()
        .map(|(metric, current, prev)| {
            let change = percent_change(current, prev);
            MetricChange {
                metric,
                percent_change: change,
                favorable: is_favorable(metric, change),
            }
        })
        .collect();

    let delta = SnapshotDelta {
        previous: previous.clone(),
        changes,
    };

    (snapshot, delta)
}

/// Retained-cell wrapper around [`summarize`]. Each `update` replaces
/// the stored snapshot with the freshly computed one, so sequential
/// calls always report the delta from the immediately preceding call,
/// never from the first load. The cell is updated whole; callers that
/// share a tracker across threads serialize access themselves.
#[derive(Clone, Debug, Default)]
pub struct MetricsTracker {
    previous: MetricsSnapshot,
}

impl MetricsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a snapshot persisted by the host.
    pub fn from_snapshot(previous: MetricsSnapshot) -> Self {
        Self { previous }
    }

    pub fn previous(&self) -> &MetricsSnapshot {
        &self.previous
    }

    pub fn update<'a, I>(&mut self, records: I) -> (MetricsSnapshot, SnapshotDelta)
    where
        I: IntoIterator<Item = &'a Observation>,
    {
        let (snapshot, delta) = summarize(records, &self.previous);
        self.previous = snapshot.clone();
        (snapshot, delta)
    }
}
