//! Partition of review results into per-verse debate inputs

use crate::review::ReviewResult;
use crate::task::TaskKey;
use std::collections::BTreeMap;

/// Reviews of one verse, ready to debate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewGroup {
    pub key: TaskKey,
    pub reviews: Vec<ReviewResult>,
}

impl ReviewGroup {
    /// The review that carries the verse metadata for the debate.
    pub fn lead(&self) -> &ReviewResult {
        &self.reviews[0]
    }
}

/// A verse excluded from debate because its review count was wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedGroup {
    pub key: TaskKey,
    pub found: usize,
    pub expected: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupingReport {
    pub groups: Vec<ReviewGroup>,
    pub skipped: Vec<SkippedGroup>,
}

/// Group results by `(chapter, verse)` in ascending order.
///
/// Only groups holding exactly `expected` reviews are debated; every other
/// group is reported in `skipped`. Input order is kept within a group.
pub fn group_reviews(results: &[ReviewResult], expected: usize) -> GroupingReport {
    let mut by_key: BTreeMap<TaskKey, Vec<ReviewResult>> = BTreeMap::new();
    for result in results {
        by_key.entry(result.key()).or_default().push(result.clone());
    }

    let mut report = GroupingReport::default();
    for (key, reviews) in by_key {
        if reviews.len() == expected {
            report.groups.push(ReviewGroup { key, reviews });
        } else {
            report.skipped.push(SkippedGroup {
                key,
                found: reviews.len(),
                expected,
            });
        }
    }
    report
}
