use serde::Deserialize;

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ReconConfig {
    #[serde(default = "default_name")]
    pub name: String,
    pub source_a: ColumnMapping,
    pub source_b: ColumnMapping,
    #[serde(default)]
    pub matcher: MatcherConfig,
}

fn default_name() -> String {
    "roster recon".into()
}

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

/// Maps a source's CSV columns onto the canonical entity shape.
///
/// The full name comes either from a single label column (`full_name`) or
/// from `given_name` + `surname` joined with one space; exactly one of the
/// two forms must be configured.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnMapping {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    pub birth_date: String,
    pub role_start: String,
}

impl ColumnMapping {
    fn validate(&self, which: &str) -> Result<(), ReconError> {
        match (&self.full_name, &self.given_name, &self.surname) {
            (Some(_), None, None) => Ok(()),
            (None, Some(_), Some(_)) => Ok(()),
            _ => Err(ReconError::ConfigValidation(format!(
                "{which}: set either 'full_name' or both 'given_name' and 'surname'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Matcher tuning
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scorer {
    /// Token-order-insensitive ratio ("john paul" ~ "paul john").
    TokenSort,
    /// Plain normalized edit distance, order-sensitive.
    Levenshtein,
}

impl Default for Scorer {
    fn default() -> Self {
        Self::TokenSort
    }
}

/// Fuzzy matcher tuning.
///
/// `score_cutoff` is the minimum similarity (0-100 scale) a best-scoring
/// candidate must reach before date confirmation is even attempted. The
/// default of 66 is a false-positive/false-negative trade-off inherited
/// from production runs, not a derived constant.
#[derive(Debug, Clone, Deserialize)]
pub struct MatcherConfig {
    #[serde(default = "default_score_cutoff")]
    pub score_cutoff: f64,
    #[serde(default)]
    pub scorer: Scorer,
}

fn default_score_cutoff() -> f64 {
    66.0
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            score_cutoff: default_score_cutoff(),
            scorer: Scorer::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        self.source_a.validate("source_a")?;
        self.source_b.validate("source_b")?;

        if !(0.0..=100.0).contains(&self.matcher.score_cutoff) {
            return Err(ReconError::ConfigValidation(format!(
                "matcher.score_cutoff must be in [0, 100], got {}",
                self.matcher.score_cutoff
            )));
        }

        Ok(())
    }
}

impl Default for ReconConfig {
    /// Built-in mapping for the cardinal rosters this tool was written for:
    /// a Wikidata export (single label column) against the Vatican press
    /// office list (Italian headers, split name).
    fn default() -> Self {
        Self {
            name: "cardinal rosters".into(),
            source_a: ColumnMapping {
                full_name: Some("cardinalLabel".into()),
                given_name: None,
                surname: None,
                birth_date: "birthDate".into(),
                role_start: "cardinalStartTime".into(),
            },
            source_b: ColumnMapping {
                full_name: None,
                given_name: Some("Nome".into()),
                surname: Some("Cognome".into()),
                birth_date: "Data di nascita".into(),
                role_start: "Creato il".into(),
            },
            matcher: MatcherConfig::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
