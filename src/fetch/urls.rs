use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use url::Url;

use crate::error::FetchError;

/// Published report pages follow a dated-slug convention:
/// `/reports/YYYY-MM-project`.
static REPORT_PATH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/reports/\d{4}-\d{2}-").expect("static regex"));

/// Read candidate URLs from a text file, one per line, skipping blank
/// lines and `#` comments.
pub fn load_urls(path: &Path) -> Result<Vec<String>, FetchError> {
    let content = std::fs::read_to_string(path).map_err(|e| FetchError::ReadUrlFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// True for absolute URLs matching the dated report-slug convention.
pub fn is_report_url(raw: &str) -> bool {
    match Url::parse(raw) {
        Ok(url) => REPORT_PATH_RE.is_match(url.path()),
        Err(_) => false,
    }
}

/// Slug identifying one report: the final path segment, trailing slash
/// trimmed. Keys the output JSON file.
pub fn slug_for(raw: &str) -> String {
    raw.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(raw)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_urls_skips_blanks_and_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.txt");
        std::fs::write(
            &path,
            "# seed list\nhttps://code4rena.com/reports/2022-01-dev\n\n  https://code4rena.com/reports/2021-04-vader  \n",
        )
        .unwrap();

        let urls = load_urls(&path).unwrap();
        assert_eq!(urls.len(), 2);
        assert_eq!(urls[1], "https://code4rena.com/reports/2021-04-vader");
    }

    #[test]
    fn test_report_url_convention() {
        assert!(is_report_url("https://code4rena.com/reports/2022-01-dev"));
        assert!(!is_report_url("https://code4rena.com/reports/latest"));
        assert!(!is_report_url("not a url"));
    }

    #[test]
    fn test_slug_for_trims_trailing_slash() {
        assert_eq!(
            slug_for("https://code4rena.com/reports/2022-01-dev/"),
            "2022-01-dev"
        );
        assert_eq!(
            slug_for("https://code4rena.com/reports/2021-04-vader"),
            "2021-04-vader"
        );
    }
}
