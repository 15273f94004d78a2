use std::collections::BTreeMap;

use crate::core::metrics::compliance_rate;
use crate::core::{ChapterStats, Observation, Status};

/// Group records by chapter, tallying open/complied counts and the
/// derived compliance rate. Chapters are discovered from the input;
/// a chapter with no records is never present. Results come back in
/// chapter order; callers re-sort per presentation need.
pub fn compliance_by_chapter<'a, I>(records: I) -> Vec<ChapterStats>
where
    I: IntoIterator<Item = &'a Observation>,
{
    let tallies: BTreeMap<&str, (usize, usize)> =
        records
            .into_iter()
            .fold(BTreeMap::new(), |mut acc, obs| {
                let (open, complied) = acc.entry(obs.chapter.as_str()).or_default();
                match obs.status {
                    Status::Open => *open += 1,
                    Status::Complied => *complied += 1,
                }
                acc
            });

    tallies
        .into_iter()
        .map(|(chapter, (open, complied))| {
            let total = open + complied;
            ChapterStats {
                chapter: chapter.to_string(),
                total,
                open,
                complied,
                compliance_rate: compliance_rate(complied, total),
            }
        })
        .collect()
}

/// Distribution view ordering: busiest chapters first, ties broken by
/// chapter label ascending.
pub fn distribution_order(mut stats: Vec<ChapterStats>) -> Vec<ChapterStats> {
    stats.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.chapter.cmp(&b.chapter)));
    stats
}

/// Progress view ordering: lowest compliance rate first, ties broken by
/// chapter label ascending.
pub fn progress_order(mut stats: Vec<ChapterStats>) -> Vec<ChapterStats> {
    stats.sort_by(|a, b| {
        a.compliance_rate
            .total_cmp(&b.compliance_rate)
            .then_with(|| a.chapter.cmp(&b.chapter))
    });
    stats
}
