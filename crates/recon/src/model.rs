use chrono::NaiveDate;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single schema-normalized person record from one roster.
///
/// `full_name` is the join key: trimmed, case-folded, single space between
/// name parts. `raw_name` keeps the original casing for match traceability.
/// Dates that failed to parse are `None`, never an error.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub row: usize,
    pub full_name: String,
    pub raw_name: String,
    pub birth_date: Option<NaiveDate>,
    pub role_start: Option<NaiveDate>,
}

/// An ordered collection of entities from one source file.
///
/// `source` is the input file name; output table names derive from it.
#[derive(Debug, Clone)]
pub struct Roster {
    pub source: String,
    pub entities: Vec<Entity>,
}

impl Roster {
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Pre-loaded rosters for one reconciliation run.
pub struct ReconInput {
    pub roster_a: Roster,
    pub roster_b: Roster,
}

// ---------------------------------------------------------------------------
// Exact reconciliation
// ---------------------------------------------------------------------------

/// A B-side row whose normalized name also exists in A.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommonPair {
    pub a_idx: usize,
    pub b_idx: usize,
}

/// Exhaustive per-direction classification: every A row is in exactly one
/// of {common (via some pair), missing_from_b}, every B row in exactly one
/// of {common, missing_from_a}.
#[derive(Debug)]
pub struct ExactMatchOutput {
    pub common: Vec<CommonPair>,
    /// B rows with no exact name in A.
    pub missing_from_a: Vec<usize>,
    /// A rows with no exact name in B.
    pub missing_from_b: Vec<usize>,
}

// ---------------------------------------------------------------------------
// Fuzzy matching
// ---------------------------------------------------------------------------

/// A confirmed fuzzy match: name similarity above cutoff AND both auxiliary
/// dates exactly equal. Score alone never constitutes a match.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRecord {
    pub a_idx: usize,
    pub b_idx: usize,
    pub name_a: String,
    pub name_b: String,
    /// Token-sort similarity in [0, 100].
    pub score: f64,
}

// ---------------------------------------------------------------------------
// Field comparison
// ---------------------------------------------------------------------------

/// One matched pair disagreeing on one date field.
#[derive(Debug, Clone, PartialEq)]
pub struct DateDiscrepancy {
    pub full_name: String,
    pub value_a: Option<NaiveDate>,
    pub value_b: Option<NaiveDate>,
}

#[derive(Debug, Default)]
pub struct FieldComparison {
    pub birth_date: Vec<DateDiscrepancy>,
    pub role_start: Vec<DateDiscrepancy>,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

/// A named result table ready for CSV serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultTable {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconSummary {
    pub entities_a: usize,
    pub entities_b: usize,
    pub exact_matched: usize,
    pub fuzzy_matched: usize,
    pub missing_from_a: usize,
    pub missing_from_b: usize,
    pub birth_date_conflicts: usize,
    pub role_start_conflicts: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub config_name: String,
    pub source_a: String,
    pub source_b: String,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconResult {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    /// Confirmed fuzzy matches, original-cased names included, so JSON
    /// consumers can trace a match back to the raw rows.
    pub matches: Vec<MatchRecord>,
    /// Non-empty tables only; empty tables are never assembled.
    pub tables: Vec<ResultTable>,
}
