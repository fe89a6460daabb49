use std::collections::HashSet;

use chrono::NaiveDate;

use crate::model::{
    DateDiscrepancy, ExactMatchOutput, FieldComparison, MatchRecord, ReconSummary, ResultTable,
    Roster,
};

/// Null dates serialize as empty cells.
fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Rows from a missing pool, with fuzzy-confirmed rows removed.
fn residual(pool: &[usize], confirmed: &HashSet<usize>) -> Vec<usize> {
    pool.iter().copied().filter(|i| !confirmed.contains(i)).collect()
}

fn entity_rows(roster: &Roster, indices: &[usize]) -> Vec<Vec<String>> {
    indices
        .iter()
        .map(|&i| {
            let e = &roster.entities[i];
            vec![
                e.full_name.clone(),
                format_date(e.birth_date),
                format_date(e.role_start),
            ]
        })
        .collect()
}

/// Discrepancy rows are keyed by name, B-side value first (it mirrors the
/// original report layout: `_va` column before `_wd`).
fn discrepancy_rows(discrepancies: &[DateDiscrepancy]) -> Vec<Vec<String>> {
    discrepancies
        .iter()
        .map(|d| {
            vec![
                d.full_name.clone(),
                format_date(d.value_b),
                format_date(d.value_a),
            ]
        })
        .collect()
}

fn push_table(tables: &mut Vec<ResultTable>, name: String, headers: &[&str], rows: Vec<Vec<String>>) {
    // Empty tables are not persisted.
    if rows.is_empty() {
        return;
    }
    tables.push(ResultTable {
        name,
        headers: headers.iter().map(|h| h.to_string()).collect(),
        rows,
    });
}

/// Merge matcher and comparator output into the five named result tables.
/// Table names derive from the input file names; empty tables are omitted.
pub fn assemble(
    roster_a: &Roster,
    roster_b: &Roster,
    exact: &ExactMatchOutput,
    matches: &[MatchRecord],
    comparison: &FieldComparison,
) -> Vec<ResultTable> {
    let confirmed_a: HashSet<usize> = matches.iter().map(|m| m.a_idx).collect();
    let confirmed_b: HashSet<usize> = matches.iter().map(|m| m.b_idx).collect();

    let mut tables = Vec::new();

    let fuzzy_rows: Vec<Vec<String>> = matches
        .iter()
        .map(|m| {
            let a = &roster_a.entities[m.a_idx];
            let b = &roster_b.entities[m.b_idx];
            vec![
                a.full_name.clone(),
                format_date(a.birth_date),
                format_date(a.role_start),
                b.full_name.clone(),
                format_date(b.birth_date),
                format_date(b.role_start),
                m.score.to_string(),
            ]
        })
        .collect();
    push_table(
        &mut tables,
        format!("fuzzymatch_{}", roster_a.source),
        &[
            "fullname_wd",
            "birthdate_wd",
            "cardinal_start_wd",
            "fullname_va",
            "birthdate_va",
            "cardinal_start_va",
            "score",
        ],
        fuzzy_rows,
    );

    push_table(
        &mut tables,
        format!("missing_{}", roster_a.source),
        &["fullname", "birthdate", "cardinal_start"],
        entity_rows(roster_b, &residual(&exact.missing_from_a, &confirmed_b)),
    );
    push_table(
        &mut tables,
        format!("missing_{}", roster_b.source),
        &["fullname", "birthdate", "cardinal_start"],
        entity_rows(roster_a, &residual(&exact.missing_from_b, &confirmed_a)),
    );

    push_table(
        &mut tables,
        format!("different_birthdate_{}", roster_a.source),
        &["fullname", "birthdate_va", "birthdate_wd"],
        discrepancy_rows(&comparison.birth_date),
    );
    push_table(
        &mut tables,
        format!("different_cardinal_start_{}", roster_a.source),
        &["fullname", "cardinal_start_va", "cardinal_start_wd"],
        discrepancy_rows(&comparison.role_start),
    );

    tables
}

/// Run statistics, reported on stderr and in the JSON output.
pub fn compute_summary(
    roster_a: &Roster,
    roster_b: &Roster,
    exact: &ExactMatchOutput,
    matches: &[MatchRecord],
    comparison: &FieldComparison,
) -> ReconSummary {
    let confirmed_a: HashSet<usize> = matches.iter().map(|m| m.a_idx).collect();
    let confirmed_b: HashSet<usize> = matches.iter().map(|m| m.b_idx).collect();

    ReconSummary {
        entities_a: roster_a.len(),
        entities_b: roster_b.len(),
        exact_matched: exact.common.len(),
        fuzzy_matched: matches.len(),
        missing_from_a: residual(&exact.missing_from_a, &confirmed_b).len(),
        missing_from_b: residual(&exact.missing_from_b, &confirmed_a).len(),
        birth_date_conflicts: comparison.birth_date.len(),
        role_start_conflicts: comparison.role_start.len(),
    }
}
