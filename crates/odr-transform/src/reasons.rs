//! Encounter counts per reason description.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use odr_model::Encounter;

/// Number of encounters recorded with one reason description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasonCount {
    pub description: String,
    /// Reason code of the first encounter seen with this description.
    pub code: Option<u64>,
    pub count: usize,
}

/// Count encounters by reason description, most frequent first.
///
/// Encounters without a description are not counted. Ties are ordered by
/// description.
pub fn count_reasons(encounters: &[Encounter]) -> Vec<ReasonCount> {
    let mut tally: BTreeMap<&str, (Option<u64>, usize)> = BTreeMap::new();
    for encounter in encounters {
        let Some(description) = encounter.reason_description.as_deref() else {
            continue;
        };
        let entry = tally.entry(description).or_insert((encounter.reason_code, 0));
        entry.1 += 1;
    }
    let mut counts: Vec<ReasonCount> = tally
        .into_iter()
        .map(|(description, (code, count))| ReasonCount {
            description: description.to_string(),
            code,
            count,
        })
        .collect();
    // BTreeMap order is by description; the stable sort keeps it for ties.
    counts.sort_by_key(|reason| Reverse(reason.count));
    counts
}
