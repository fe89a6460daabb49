// rosterdiff CLI - reconcile two roster CSVs and report discrepancies

mod exit_codes;
mod output;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use exit_codes::{EXIT_INVALID_CONFIG, EXIT_RUNTIME, EXIT_SUCCESS};
use rosterdiff_recon::{load_roster, ReconConfig, ReconInput};

#[derive(Parser)]
#[command(name = "rosterdiff")]
#[command(about = "Reconcile two roster CSVs: missing entries, fuzzy name matches, date conflicts")]
#[command(version)]
#[command(after_help = "\
Examples:
  rosterdiff wikidata.csv vatican.csv
  rosterdiff wikidata.csv vatican.csv --output-dir reports
  rosterdiff wikidata.csv vatican.csv --config mapping.toml --json")]
struct Cli {
    /// Source A roster (single name-label column, e.g. a Wikidata export)
    source_a: PathBuf,

    /// Source B roster (split given-name/surname columns)
    source_b: PathBuf,

    /// Directory for result tables (created only if there is output)
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Column-mapping / matcher TOML; the built-in cardinal-roster mapping
    /// is used if omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the JSON result summary to stdout
    #[arg(long)]
    json: bool,
}

#[derive(Debug)]
struct CliError {
    code: u8,
    message: String,
}

fn cli_err(code: u8, message: impl Into<String>) -> CliError {
    CliError { code, message: message.into() }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("error: {}", e.message);
            ExitCode::from(e.code)
        }
    }
}

/// The file name component, used to derive output table names.
fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn load_config(path: Option<&Path>) -> Result<ReconConfig, CliError> {
    match path {
        None => Ok(ReconConfig::default()),
        Some(path) => {
            let config_str = std::fs::read_to_string(path).map_err(|e| {
                cli_err(EXIT_RUNTIME, format!("cannot read {}: {e}", path.display()))
            })?;
            ReconConfig::from_toml(&config_str)
                .map_err(|e| cli_err(EXIT_INVALID_CONFIG, e.to_string()))
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_deref())?;

    let read = |path: &Path| -> Result<String, CliError> {
        std::fs::read_to_string(path)
            .map_err(|e| cli_err(EXIT_RUNTIME, format!("cannot read {}: {e}", path.display())))
    };
    let data_a = read(&cli.source_a)?;
    let data_b = read(&cli.source_b)?;

    let input = ReconInput {
        roster_a: load_roster(&source_name(&cli.source_a), &data_a, &config.source_a)
            .map_err(|e| cli_err(EXIT_RUNTIME, e.to_string()))?,
        roster_b: load_roster(&source_name(&cli.source_b), &data_b, &config.source_b)
            .map_err(|e| cli_err(EXIT_RUNTIME, e.to_string()))?,
    };

    let result = rosterdiff_recon::run(&config, &input)
        .map_err(|e| cli_err(EXIT_RUNTIME, e.to_string()))?;

    let written = output::write_tables(&result.tables, &cli.output_dir)
        .map_err(|e| cli_err(EXIT_RUNTIME, format!("cannot write output: {e}")))?;
    for path in &written {
        eprintln!("wrote {}", path.display());
    }

    if cli.json {
        let json_str = serde_json::to_string_pretty(&result)
            .map_err(|e| cli_err(EXIT_RUNTIME, format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    }

    // Human summary to stderr
    let s = &result.summary;
    eprintln!(
        "recon '{}': {} vs {} entities — {} exact, {} fuzzy, {} missing from A, {} missing from B, {} date conflicts",
        result.meta.config_name,
        s.entities_a,
        s.entities_b,
        s.exact_matched,
        s.fuzzy_matched,
        s.missing_from_a,
        s.missing_from_b,
        s.birth_date_conflicts + s.role_start_conflicts,
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_name_uses_file_component() {
        assert_eq!(source_name(Path::new("data/wikidata.csv")), "wikidata.csv");
        assert_eq!(source_name(Path::new("vatican.csv")), "vatican.csv");
    }

    #[test]
    fn default_config_when_no_file_given() {
        let config = load_config(None).unwrap();
        assert_eq!(config.matcher.score_cutoff, 66.0);
    }

    #[test]
    fn bad_config_file_maps_to_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mapping.toml");
        std::fs::write(&path, "source_a = 12").unwrap();
        let err = load_config(Some(path.as_path())).err().unwrap();
        assert_eq!(err.code, EXIT_INVALID_CONFIG);
    }

    #[test]
    fn json_output_exposes_match_records() {
        let config = ReconConfig::default();
        let wikidata = "\
cardinalLabel,birthDate,cardinalStartTime
Sodano Angelo,1927-11-23,1991-06-28
";
        let vatican = "\
Cognome,Nome,Data di nascita,Creato il
Sodano,Angelo,23/11/1927,28/06/1991
";
        let input = ReconInput {
            roster_a: load_roster("wikidata.csv", wikidata, &config.source_a).unwrap(),
            roster_b: load_roster("vatican.csv", vatican, &config.source_b).unwrap(),
        };
        let result = rosterdiff_recon::run(&config, &input).unwrap();

        let json = serde_json::to_string_pretty(&result).unwrap();
        assert!(json.contains("\"name_a\": \"Sodano Angelo\""));
        assert!(json.contains("\"name_b\": \"Angelo Sodano\""));
    }

    #[test]
    fn cli_errors_are_debug_printable() {
        // Test assertions unwrap Result<_, CliError>, which needs Debug.
        let err = cli_err(EXIT_RUNTIME, "cannot read input.csv");
        let formatted = format!("{err:?}");
        assert!(formatted.contains("cannot read input.csv"));
        assert!(formatted.contains("4"));
    }

    #[test]
    fn missing_config_file_maps_to_runtime() {
        let err = load_config(Some(Path::new("/nonexistent/mapping.toml")))
            .err()
            .unwrap();
        assert_eq!(err.code, EXIT_RUNTIME);
    }
}
