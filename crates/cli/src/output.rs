//! CSV serialization of result tables.

use std::path::{Path, PathBuf};

use rosterdiff_recon::ResultTable;

/// Write each table to `<output_dir>/<table name>`.
///
/// The directory is created lazily, so a run producing no tables leaves no
/// empty artifact directory behind. Returns the paths written.
pub fn write_tables(tables: &[ResultTable], output_dir: &Path) -> csv::Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(tables.len());

    for t in tables {
        std::fs::create_dir_all(output_dir)?;
        let path = output_dir.join(&t.name);
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(&t.headers)?;
        for row in &t.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        written.push(path);
    }

    Ok(written)
}
