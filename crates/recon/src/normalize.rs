use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::config::ColumnMapping;
use crate::error::ReconError;
use crate::model::{Entity, Roster};

/// Canonical name form: trimmed, case-folded, single space between parts.
/// Idempotent; keys compared across sources always go through here.
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace()
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Original-cased display form, whitespace collapsed.
fn display_name(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parse common date spellings; anything unparseable becomes `None` so a
/// single bad cell never aborts the run. Ambiguous slash/dot forms parse
/// day-first (the split-name source uses Italian conventions).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.date());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }

    None
}

/// Load one roster CSV into canonical entities, applying the column mapping.
///
/// A mapped column absent from the header is fatal: downstream
/// normalization cannot proceed without the expected shape.
pub fn load_roster(
    source: &str,
    csv_data: &str,
    mapping: &ColumnMapping,
) -> Result<Roster, ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ReconError::Io(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let idx = |name: &str| -> Result<usize, ReconError> {
        headers.iter().position(|h| h == name).ok_or_else(|| {
            ReconError::MissingColumn {
                source: source.into(),
                column: name.into(),
            }
        })
    };

    enum NameColumns {
        Single(usize),
        Split { given: usize, surname: usize },
    }

    let name_columns = match (&mapping.full_name, &mapping.given_name, &mapping.surname) {
        (Some(full), _, _) => NameColumns::Single(idx(full)?),
        (None, Some(given), Some(surname)) => NameColumns::Split {
            given: idx(given)?,
            surname: idx(surname)?,
        },
        _ => {
            return Err(ReconError::ConfigValidation(format!(
                "source '{source}': no name columns configured"
            )))
        }
    };
    let birth_idx = idx(&mapping.birth_date)?;
    let start_idx = idx(&mapping.role_start)?;

    let mut entities = Vec::new();

    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| ReconError::Io(e.to_string()))?;

        let raw = match name_columns {
            NameColumns::Single(i) => record.get(i).unwrap_or("").to_string(),
            NameColumns::Split { given, surname } => format!(
                "{} {}",
                record.get(given).unwrap_or("").trim(),
                record.get(surname).unwrap_or("").trim()
            ),
        };

        entities.push(Entity {
            row,
            full_name: normalize_name(&raw),
            raw_name: display_name(&raw),
            birth_date: parse_date(record.get(birth_idx).unwrap_or("")),
            role_start: parse_date(record.get(start_idx).unwrap_or("")),
        });
    }

    Ok(Roster {
        source: source.to_string(),
        entities,
    })
}
