use std::collections::BTreeMap;

use crate::core::{ChapterMonthlyData, MonthKey, MonthlyCount, Observation, Status};

/// Group records by calendar month and status. Every month with at
/// least one observation emits a row for each status, zero-count rows
/// included, so a line chart can draw a continuous zero-valued segment.
/// Rows come back chronologically by the underlying year-month.
pub fn monthly_by_status<'a, I>(records: I) -> Vec<MonthlyCount>
where
    I: IntoIterator<Item = &'a Observation>,
{
    let by_month: BTreeMap<MonthKey, (usize, usize)> =
        records
            .into_iter()
            .fold(BTreeMap::new(), |mut acc, obs| {
                let (open, complied) = acc.entry(MonthKey::from_date(obs.date)).or_default();
                match obs.status {
                    Status::Open => *open += 1,
                    Status::Complied => *complied += 1,
                }
                acc
            });

    by_month
        .into_iter()
        .flat_map(|(month, (open, complied))| {
            Status::ALL.into_iter().map(move |status| MonthlyCount {
                month,
                status,
                count: match status {
                    Status::Open => open,
                    Status::Complied => complied,
                },
            })
        })
        .collect()
}

/// Group records by calendar month and chapter. Sparse: only pairs
/// that actually occurred are emitted, a missing row means zero.
/// Rows are ordered by month, then chapter.
pub fn monthly_by_chapter<'a, I>(records: I) -> Vec<ChapterMonthlyData>
where
    I: IntoIterator<Item = &'a Observation>,
{
    let by_pair: BTreeMap<(MonthKey, &str), usize> =
        records
            .into_iter()
            .fold(BTreeMap::new(), |mut acc, obs| {
                *acc.entry((MonthKey::from_date(obs.date), obs.chapter.as_str()))
                    .or_default() += 1;
                acc
            });

    by_pair
        .into_iter()
        .map(|((month, chapter), count)| ChapterMonthlyData {
            month,
            chapter: chapter.to_string(),
            count,
        })
        .collect()
}
