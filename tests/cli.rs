use assert_cmd::Command;
use predicates::prelude::*;

const REPORT_HTML: &str = "\
    <h1 id='title'>Demo contest</h1>\
    <h1 id='scope'>Scope</h1>\
    <p>8 smart contracts, 1,500 lines of Solidity code. \
    <a href='https://github.com/code-423n4/2022-05-demo'>repo</a></p>\
    <h1 id='high-risk-findings-3'>High Risk Findings</h1>\
    <h2>[H-01] Oracle manipulation</h2><p>Spot price is trusted.</p>";

#[test]
fn extract_writes_structured_json_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let page = dir.path().join("report.html");
    std::fs::write(&page, REPORT_HTML).unwrap();

    Command::cargo_bin("c4mine")
        .unwrap()
        .arg("extract")
        .arg(&page)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"issue_id\": \"H-01\""))
        .stdout(predicate::str::contains("\"contracts\": 8"))
        .stdout(predicate::str::contains("\"lines_solidity\": 1500"));
}

#[test]
fn extract_fails_on_rejected_document() {
    let dir = tempfile::tempdir().unwrap();
    let page = dir.path().join("report.html");
    std::fs::write(&page, "<h1 id='intro'>No scope here</h1>").unwrap();

    Command::cargo_bin("c4mine")
        .unwrap()
        .arg("extract")
        .arg(&page)
        .assert()
        .failure()
        .stderr(predicate::str::contains("rejected"));
}

#[test]
fn run_batch_survives_unreachable_documents() {
    let dir = tempfile::tempdir().unwrap();
    let urls = dir.path().join("urls.txt");
    // Port 9 is discard; connections are refused immediately and every
    // document fails without touching the network.
    std::fs::write(
        &urls,
        "http://127.0.0.1:9/reports/2022-01-a\nhttp://127.0.0.1:9/reports/2022-02-b\n",
    )
    .unwrap();

    let config = dir.path().join("c4mine.yaml");
    std::fs::write(
        &config,
        "concurrency: 2\ntimeout_sec: 2\nretry:\n  max_attempts: 1\n  backoff_base_ms: 10\n",
    )
    .unwrap();

    Command::cargo_bin("c4mine")
        .unwrap()
        .arg("run")
        .arg(&urls)
        .arg("--config")
        .arg(&config)
        .arg("--out-dir")
        .arg(dir.path().join("out"))
        .assert()
        .success()
        .stderr(predicate::str::contains("0 written, 0 rejected, 2 failed"));
}

#[test]
fn run_dry_run_lists_only_dated_report_urls() {
    let dir = tempfile::tempdir().unwrap();
    let urls = dir.path().join("urls.txt");
    std::fs::write(
        &urls,
        "# seed\nhttps://code4rena.com/reports/2022-05-demo\nhttps://code4rena.com/reports/latest\n",
    )
    .unwrap();

    Command::cargo_bin("c4mine")
        .unwrap()
        .arg("run")
        .arg(&urls)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("2022-05-demo"))
        .stdout(predicate::str::contains("latest").not());
}
