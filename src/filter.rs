use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::{Observation, Status};
use crate::errors::AuditError;

/// Number of calendar months covered by the default reporting window.
pub const DEFAULT_WINDOW_MONTHS: u32 = 6;

/// Predicates applied to a record collection before aggregation.
///
/// All fields are optional in effect: an empty criteria value is the
/// identity filter. The date range is inclusive on both ends and both
/// bounds travel together. An empty chapter list means "all chapters".
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterCriteria {
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    #[serde(default)]
    pub chapters: Vec<String>,
    #[serde(default)]
    pub only_open: bool,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Criteria covering the `months` calendar months up to `today`,
    /// with all chapters and both statuses included. Saturates at the
    /// calendar's lower bound.
    pub fn window(today: NaiveDate, months: u32) -> Self {
        let start = today
            .checked_sub_months(Months::new(months))
            .unwrap_or(today);

        Self {
            date_range: Some((start, today)),
            chapters: Vec::new(),
            only_open: false,
        }
    }

    /// The first-load (and reset) criteria: six calendar months back
    /// from today, all chapters, open and complied alike.
    pub fn default_window(today: NaiveDate) -> Self {
        Self::window(today, DEFAULT_WINDOW_MONTHS)
    }

    pub fn with_date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.date_range = Some((start, end));
        self
    }

    pub fn with_chapters(mut self, chapters: Vec<String>) -> Self {
        self.chapters = chapters;
        self
    }

    pub fn with_only_open(mut self, only_open: bool) -> Self {
        self.only_open = only_open;
        self
    }

    /// True when no predicate is set and filtering would be a no-op.
    pub fn is_identity(&self) -> bool {
        self.date_range.is_none() && self.chapters.is_empty() && !self.only_open
    }
}

/// Parse a `YYYY-MM-DD` criteria date. Unparsable input is a validation
/// error, never an empty result set.
pub fn parse_date(value: &str) -> Result<NaiveDate, AuditError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| AuditError::validation(format!("malformed date '{value}': {e}")))
}

/// The single filtering predicate. Local filtering and source-side
/// filtering both go through here, which is what keeps them equivalent.
pub fn matches(record: &Observation, criteria: &FilterCriteria) -> bool {
    if let Some((start, end)) = criteria.date_range {
        if record.date < start || record.date > end {
            return false;
        }
    }

    if !criteria.chapters.is_empty() && !criteria.chapters.iter().any(|c| *c == record.chapter) {
        return false;
    }

    if criteria.only_open && record.status != Status::Open {
        return false;
    }

    true
}

/// Apply criteria to a record collection, borrowing the survivors.
/// The input is never mutated.
pub fn filter<'a>(records: &'a [Observation], criteria: &FilterCriteria) -> Vec<&'a Observation> {
    records
        .iter()
        .filter(|record| matches(record, criteria))
        .collect()
}

/// Owned variant used where the caller cannot hold a borrow, e.g. a
/// source answering a filtered fetch.
pub fn filter_owned(records: &[Observation], criteria: &FilterCriteria) -> Vec<Observation> {
    records
        .iter()
        .filter(|record| matches(record, criteria))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Severity;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fixture() -> Vec<Observation> {
        vec![
            Observation::new(1, date(2024, 1, 15), "A", Severity::Low, Status::Open),
            Observation::new(2, date(2024, 1, 20), "A", Severity::High, Status::Complied),
            Observation::new(3, date(2024, 2, 10), "B", Severity::Medium, Status::Open),
            Observation::new(4, date(2024, 3, 5), "C", Severity::Low, Status::Complied),
        ]
    }

    #[test]
    fn empty_criteria_is_the_identity_filter() {
        let records = fixture();
        let criteria = FilterCriteria::new();

        assert!(criteria.is_identity());
        assert_eq!(filter(&records, &criteria).len(), records.len());
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let records = fixture();
        let criteria =
            FilterCriteria::new().with_date_range(date(2024, 1, 15), date(2024, 2, 10));

        let ids: Vec<u64> = filter(&records, &criteria).iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn chapter_set_restricts_membership() {
        let records = fixture();
        let criteria = FilterCriteria::new().with_chapters(vec!["B".into(), "C".into()]);

        let ids: Vec<u64> = filter(&records, &criteria).iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![3, 4]);
    }

    #[test]
    fn empty_chapter_set_means_all_chapters() {
        let records = fixture();
        let criteria = FilterCriteria::new().with_chapters(Vec::new());

        assert_eq!(filter(&records, &criteria).len(), records.len());
    }

    #[test]
    fn only_open_drops_complied_records() {
        let records = fixture();
        let criteria = FilterCriteria::new().with_only_open(true);

        let ids: Vec<u64> = filter(&records, &criteria).iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn predicates_compose_like_sequential_filters() {
        let records = fixture();
        let date_only = FilterCriteria::new().with_date_range(date(2024, 1, 1), date(2024, 2, 28));
        let combined = date_only.clone().with_chapters(vec!["A".into()]);

        let sequential: Vec<u64> = {
            let first = filter_owned(&records, &date_only);
            let chapter_only = FilterCriteria::new().with_chapters(vec!["A".into()]);
            filter(&first, &chapter_only).iter().map(|o| o.id).collect()
        };
        let unioned: Vec<u64> = filter(&records, &combined).iter().map(|o| o.id).collect();

        assert_eq!(sequential, unioned);
    }

    #[test]
    fn malformed_date_is_a_validation_error() {
        let err = parse_date("2024-13-01").unwrap_err();
        assert!(matches!(err, AuditError::Validation { .. }));

        let err = parse_date("not-a-date").unwrap_err();
        assert!(err.to_string().contains("not-a-date"));
    }

    #[test]
    fn default_window_spans_six_months_to_today() {
        let today = date(2024, 7, 15);
        let criteria = FilterCriteria::default_window(today);

        assert_eq!(criteria.date_range, Some((date(2024, 1, 15), today)));
        assert!(criteria.chapters.is_empty());
        assert!(!criteria.only_open);
    }

    #[test]
    fn filter_and_filter_owned_agree() {
        let records = fixture();
        let criteria = FilterCriteria::new()
            .with_date_range(date(2024, 1, 1), date(2024, 2, 28))
            .with_only_open(true);

        let borrowed: Vec<Observation> = filter(&records, &criteria)
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(borrowed, filter_owned(&records, &criteria));
    }
}
