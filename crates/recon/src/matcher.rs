use std::collections::BTreeMap;

use crate::config::MatcherConfig;
use crate::model::{CommonPair, ExactMatchOutput, MatchRecord, Roster};

/// Index a roster by normalized name. First occurrence wins; intra-source
/// duplicates are out of scope.
fn name_index(roster: &Roster) -> BTreeMap<&str, usize> {
    let mut index = BTreeMap::new();
    for (i, entity) in roster.entities.iter().enumerate() {
        index.entry(entity.full_name.as_str()).or_insert(i);
    }
    index
}

/// Reconcile two rosters by exact normalized-name equality.
///
/// No fuzziness, no date involvement. Membership is a map lookup built once
/// per roster, and every row lands in exactly one bucket per direction.
pub fn match_exact(roster_a: &Roster, roster_b: &Roster) -> ExactMatchOutput {
    let index_a = name_index(roster_a);
    let index_b = name_index(roster_b);

    let mut common = Vec::new();
    let mut missing_from_a = Vec::new();
    let mut missing_from_b = Vec::new();

    for (b_idx, entity) in roster_b.entities.iter().enumerate() {
        match index_a.get(entity.full_name.as_str()) {
            Some(&a_idx) => common.push(CommonPair { a_idx, b_idx }),
            None => missing_from_a.push(b_idx),
        }
    }

    for (a_idx, entity) in roster_a.entities.iter().enumerate() {
        if !index_b.contains_key(entity.full_name.as_str()) {
            missing_from_b.push(a_idx);
        }
    }

    ExactMatchOutput {
        common,
        missing_from_a,
        missing_from_b,
    }
}

/// Fuzzy-match the `missing_from_a` pool (B rows unmatched by name) against
/// the full A roster.
///
/// For each candidate the single best-scoring A name is selected (ties keep
/// the earliest A row). A best score below `config.score_cutoff` is
/// discarded. An above-cutoff pair is confirmed only if birth date and
/// role-start are exactly equal on both sides (two nulls count as equal);
/// name-similar but date-mismatched rows stay in the unmatched pool so two
/// different people with similar names are never conflated.
///
/// Degenerate pools produce no matches rather than an error. One
/// directional pass suffices: the scorer is symmetric, and a confirmed
/// match removes both participants from their respective pools.
pub fn match_fuzzy(
    candidates: &[usize],
    roster_b: &Roster,
    roster_a: &Roster,
    config: &MatcherConfig,
) -> Vec<MatchRecord> {
    let mut matches = Vec::new();

    for &b_idx in candidates {
        let candidate = &roster_b.entities[b_idx];

        let mut best: Option<(usize, f64)> = None;
        for (a_idx, entity) in roster_a.entities.iter().enumerate() {
            let score = config.scorer.score(&entity.full_name, &candidate.full_name);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((a_idx, score));
            }
        }

        let Some((a_idx, score)) = best else {
            continue;
        };
        if score < config.score_cutoff {
            continue;
        }

        let matched = &roster_a.entities[a_idx];
        if matched.birth_date == candidate.birth_date
            && matched.role_start == candidate.role_start
        {
            matches.push(MatchRecord {
                a_idx,
                b_idx,
                name_a: matched.raw_name.clone(),
                name_b: candidate.raw_name.clone(),
                score,
            });
        }
    }

    matches
}
