mod aggregate;
mod issues;
mod numeric;
mod record;
mod scope;
mod section;

pub use record::{IssueRecord, ReportRecord, ScopeRecord, Severity};

use scraper::Html;
use thiserror::Error;

/// Expected per-document outcome, not a failure: the batch loop logs the
/// reason and moves on. No partial record is ever emitted for a rejected
/// document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("no <h1 id=\"scope\"> section")]
    ScopeAnchorMissing,

    #[error("scope section does not mention Solidity")]
    EcosystemMarkerMissing,
}

/// Run the full extractor over one report page.
///
/// Pure and synchronous: one HTML string in, one [`ReportRecord`] (or a
/// [`Rejection`]) out. Safe to call from concurrent tasks.
pub fn extract_report(html: &str) -> Result<ReportRecord, Rejection> {
    let doc = Html::parse_document(html);

    let scope = scope::interpret(&doc)?;
    let report_title = section::headings(&doc)
        .first()
        .map(|h| section::flat_text(*h));
    let issues = issues::walk_severity_sections(&doc);

    Ok(ReportRecord {
        report_title,
        scope,
        issues,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_REPORT: &str = "\
        <h1 id='title'>Acme Protocol contest</h1>\
        <h1 id='scope'>Scope</h1>\
        <p>The code4rena review covered 12 smart contracts and ~2,400 lines of Solidity code at \
        <a href='https://github.com/code-423n4/2021-09-acme'>the contest repo</a>.</p>\
        <h1 id='high-risk-findings-1'>High Risk Findings (1)</h1>\
        <h2>[H-01] Reentrancy</h2>\
        <p>Withdraw is callable re-entrantly. \
        <a href='https://github.com/code-423n4/2021-09-acme/blob/main/Vault.sol#L42'>Vault.sol#L42</a></p>\
        <h1 id='non-critical-findings'>Non-Critical Findings</h1>\
        <h2>[1] Missing event</h2><p>Emit on state change.</p>";

    #[test]
    fn test_full_report_pipeline() {
        let report = extract_report(FULL_REPORT).unwrap();

        assert_eq!(report.report_title.as_deref(), Some("Acme Protocol contest"));
        assert_eq!(report.scope.contracts, 12);
        assert_eq!(report.scope.lines_solidity, 2400);
        assert_eq!(
            report.scope.repository.as_deref(),
            Some("https://github.com/code-423n4/2021-09-acme")
        );

        assert_eq!(report.issues.len(), 2);
        assert_eq!(report.issues[0].issue_id, "H-01");
        assert_eq!(report.issues[0].severity, Severity::High);
        assert_eq!(report.issues[1].issue_id, "L-01");
        assert_eq!(report.issues[1].severity, Severity::Low);
    }

    #[test]
    fn test_no_severity_sections_is_not_a_rejection() {
        let html = "<h1 id='scope'>Scope</h1><p>A Solidity review, 3 contracts.</p>";
        let report = extract_report(html).unwrap();
        assert!(report.issues.is_empty());
        assert_eq!(report.scope.contracts, 3);
    }

    #[test]
    fn test_rejection_without_scope() {
        let html = "<h1 id='intro'>Intro</h1><h2>[H-01] X</h2>";
        assert_eq!(extract_report(html), Err(Rejection::ScopeAnchorMissing));
    }

    #[test]
    fn test_rejection_without_marker_even_with_numbers() {
        let html = "<h1 id='scope'>Scope</h1><p>12 contracts, 5,000 source lines of Vyper.</p>";
        assert_eq!(extract_report(html), Err(Rejection::EcosystemMarkerMissing));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let first = extract_report(FULL_REPORT).unwrap();
        let second = extract_report(FULL_REPORT).unwrap();
        assert_eq!(first, second);
    }
}
