use crate::compare::compare_fields;
use crate::config::ReconConfig;
use crate::error::ReconError;
use crate::matcher::{match_exact, match_fuzzy};
use crate::model::{CommonPair, ReconInput, ReconMeta, ReconResult};
use crate::report::{assemble, compute_summary};

/// Run one reconciliation: exact pass, fuzzy pass over the unmatched pool,
/// field comparison over all confirmed pairs, table assembly.
///
/// Pure function of its inputs apart from the `run_at` timestamp in meta;
/// the result tables are deterministic.
pub fn run(config: &ReconConfig, input: &ReconInput) -> Result<ReconResult, ReconError> {
    let roster_a = &input.roster_a;
    let roster_b = &input.roster_b;

    let exact = match_exact(roster_a, roster_b);
    let matches = match_fuzzy(&exact.missing_from_a, roster_b, roster_a, &config.matcher);

    // Confirmed pairs = exact-name matches + fuzzy-confirmed matches.
    let mut pairs = exact.common.clone();
    pairs.extend(matches.iter().map(|m| CommonPair {
        a_idx: m.a_idx,
        b_idx: m.b_idx,
    }));
    let comparison = compare_fields(&pairs, roster_a, roster_b);

    let summary = compute_summary(roster_a, roster_b, &exact, &matches, &comparison);
    let tables = assemble(roster_a, roster_b, &exact, &matches, &comparison);

    Ok(ReconResult {
        meta: ReconMeta {
            config_name: config.name.clone(),
            source_a: roster_a.source.clone(),
            source_b: roster_b.source.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        matches,
        tables,
    })
}
