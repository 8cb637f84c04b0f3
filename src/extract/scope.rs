use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;

use super::numeric::normalize_number;
use super::record::ScopeRecord;
use super::section;
use super::Rejection;

/// Reports that never mention Solidity in scope are outside the mining
/// domain and rejected wholesale.
static SOLIDITY_RE: Lazy<Regex> = Lazy::new(|| re(r"(?i)\bsolidity\b"));

static CONTRACTS_RE: Lazy<Regex> = Lazy::new(|| re(r"(?i)([\d,~]+)\s+(?:smart\s+)?contracts?"));

static LINES_RE: Lazy<Regex> = Lazy::new(|| {
    re(r"(?i)([\d,~]+)\s+(?:source\s+lines|lines\s+of\s+solidity\s+code|lines\s+of\s+solidity|lines\s+of\s+code\s+written\s+in\s+solidity)")
});

fn re(src: &str) -> Regex {
    Regex::new(src).expect("static regex")
}

/// Interpret the `<h1 id="scope">` section into a [`ScopeRecord`].
///
/// Both numeric extractions are first-match-wins on purpose: later
/// occurrences in the prose are usually sub-component totals and would
/// overstate the review scope.
pub fn interpret(doc: &Html) -> Result<ScopeRecord, Rejection> {
    let range = section::locate(doc, "scope").ok_or(Rejection::ScopeAnchorMissing)?;

    let text = range
        .iter()
        .map(|el| section::flat_text(*el))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if !SOLIDITY_RE.is_match(&text) {
        return Err(Rejection::EcosystemMarkerMissing);
    }

    let repository = range
        .iter()
        .flat_map(|el| section::code_host_links(*el))
        .find(|href| section::is_contest_repo(href));

    let contracts = CONTRACTS_RE
        .captures(&text)
        .map(|c| normalize_number(&c[1]))
        .unwrap_or(0);

    let lines_solidity = LINES_RE
        .captures(&text)
        .map(|c| normalize_number(&c[1]))
        .unwrap_or(0);

    Ok(ScopeRecord {
        repository,
        contracts,
        lines_solidity,
    })
}
