use std::fs;
use std::path::{Path, PathBuf};

use crate::error::OutputError;
use crate::extract::ReportRecord;

/// Write one mined report as pretty-printed JSON, keyed by its slug.
/// Returns the path written.
pub fn write_report(
    out_dir: &Path,
    slug: &str,
    report: &ReportRecord,
) -> Result<PathBuf, OutputError> {
    fs::create_dir_all(out_dir).map_err(OutputError::CreateDir)?;

    let path = out_dir.join(format!("{slug}.json"));
    let json = serde_json::to_string_pretty(report)?;
    fs::write(&path, json).map_err(OutputError::WriteReport)?;

    Ok(path)
}
