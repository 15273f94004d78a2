use std::collections::BTreeSet;

use crate::core::{Observation, Status};

/// Percentage of a group that has complied. Zero for an empty group.
pub fn compliance_rate(complied: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }

    complied as f64 / total as f64 * 100.0
}

/// Count records per status in one pass, returning (open, complied).
pub fn count_by_status<'a, I>(records: I) -> (usize, usize)
where
    I: IntoIterator<Item = &'a Observation>,
{
    records
        .into_iter()
        .fold((0, 0), |(open, complied), obs| match obs.status {
            Status::Open => (open + 1, complied),
            Status::Complied => (open, complied + 1),
        })
}

/// Distinct chapter labels observed in the input, sorted ascending.
/// Chapters are discovered from records only; there is no whitelist.
pub fn distinct_chapters<'a, I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Observation>,
{
    records
        .into_iter()
        .map(|obs| obs.chapter.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Severity;
    use chrono::NaiveDate;

    fn obs(id: u64, chapter: &str, status: Status) -> Observation {
        Observation::new(
            id,
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            chapter,
            Severity::Low,
            status,
        )
    }

    #[test]
    fn compliance_rate_of_empty_group_is_zero() {
        assert_eq!(compliance_rate(0, 0), 0.0);
    }

    #[test]
    fn compliance_rate_is_complied_over_total() {
        assert_eq!(compliance_rate(1, 2), 50.0);
        assert_eq!(compliance_rate(3, 4), 75.0);
        assert_eq!(compliance_rate(0, 5), 0.0);
    }

    #[test]
    fn count_by_status_splits_open_and_complied() {
        let records = vec![
            obs(1, "A", Status::Open),
            obs(2, "A", Status::Complied),
            obs(3, "B", Status::Open),
        ];

        assert_eq!(count_by_status(&records), (2, 1));
    }

    #[test]
    fn distinct_chapters_are_sorted_and_deduplicated() {
        let records = vec![
            obs(1, "Procurement", Status::Open),
            obs(2, "Finance", Status::Open),
            obs(3, "Procurement", Status::Complied),
        ];

        assert_eq!(distinct_chapters(&records), vec!["Finance", "Procurement"]);
    }
}
