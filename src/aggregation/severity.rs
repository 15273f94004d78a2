use std::collections::BTreeMap;

use crate::core::{Observation, SeverityMatrixRow};

/// Group records into a chapter × severity count matrix. One row per
/// distinct chapter, rows in chapter order, cells zero-filled where a
/// severity was not observed. Each record lands in exactly one cell,
/// so row totals reconcile with chapter totals.
///
/// Severity values are validated at the decode boundary; by the time
/// records reach this function the axis is closed.
pub fn severity_matrix<'a, I>(records: I) -> Vec<SeverityMatrixRow>
where
    I: IntoIterator<Item = &'a Observation>,
{
    let rows: BTreeMap<&str, SeverityMatrixRow> =
        records
            .into_iter()
            .fold(BTreeMap::new(), |mut acc, obs| {
                acc.entry(obs.chapter.as_str())
                    .or_insert_with(|| SeverityMatrixRow::new(obs.chapter.as_str()))
                    .bump(obs.severity);
                acc
            });

    rows.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Severity, Status};
    use chrono::NaiveDate;

    fn obs(id: u64, chapter: &str, severity: Severity) -> Observation {
        Observation::new(
            id,
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            chapter,
            severity,
            Status::Open,
        )
    }

    #[test]
    fn empty_input_yields_empty_matrix() {
        assert!(severity_matrix(&[]).is_empty());
    }

    #[test]
    fn rows_are_sorted_by_chapter_with_zero_filled_cells() {
        let records = vec![
            obs(1, "Treasury", Severity::High),
            obs(2, "Compliance", Severity::Low),
            obs(3, "Treasury", Severity::High),
        ];

        let matrix = severity_matrix(&records);
        assert_eq!(matrix.len(), 2);

        assert_eq!(matrix[0].chapter, "Compliance");
        assert_eq!((matrix[0].low, matrix[0].medium, matrix[0].high), (1, 0, 0));

        assert_eq!(matrix[1].chapter, "Treasury");
        assert_eq!((matrix[1].low, matrix[1].medium, matrix[1].high), (0, 0, 2));
    }

    #[test]
    fn row_totals_match_per_chapter_record_counts() {
        let records = vec![
            obs(1, "A", Severity::Low),
            obs(2, "A", Severity::Medium),
            obs(3, "A", Severity::High),
            obs(4, "B", Severity::Medium),
        ];

        let matrix = severity_matrix(&records);
        for row in &matrix {
            let expected = records.iter().filter(|o| o.chapter == row.chapter).count();
            assert_eq!(row.row_total(), expected);
        }
    }
}
