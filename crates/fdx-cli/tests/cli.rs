use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `fdx` isolated from any user configuration.
fn fdx(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("fdx").expect("bin");
    cmd.env("HOME", home).env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).expect("write fixture");
    path.display().to_string()
}

const INVOICE: &str = "INVOICE\nFrom: Acme Supplies\nDate: 03/04/2023\nDescription: Copper fittings\nTotal: $1,234.56\n";

#[test]
fn extract_prints_json_record() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "acme.txt", INVOICE);

    fdx(dir.path())
        .args(["extract", &input, "--reference", "job-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""amount": "1234.56""#))
        .stdout(predicate::str::contains(r#""vendor": "acme supplies""#))
        .stdout(predicate::str::contains(r#""date": "03/04/2023""#))
        .stdout(predicate::str::contains(r#""category": "invoice""#))
        .stdout(predicate::str::contains(r#""externalReferenceId": "job-1""#));
}

#[test]
fn extract_text_format_with_confidence() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "acme.txt", INVOICE);

    fdx(dir.path())
        .args(["extract", &input, "-r", "job-1", "-f", "text", "--show-confidence"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Amount: $1234.56"))
        .stdout(predicate::str::contains("Extraction confidence: 100.0%"))
        .stdout(predicate::str::contains("Reference number: AI-"));
}

#[test]
fn extract_without_amount_fails() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "note.txt", "Vendor: Acme. Invoice dated 01/02/2024");

    fdx(dir.path())
        .args(["extract", &input, "-r", "job-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No financial amount found"));
}

#[test]
fn extract_image_needs_recognizer() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "receipt.png", "");

    fdx(dir.path())
        .args(["extract", &input, "-r", "job-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no text recognizer available"));
}

#[test]
fn saved_documents_feed_ledger_total() {
    let dir = TempDir::new().unwrap();
    let ledger = dir.path().join("ledger.json").display().to_string();
    let approved = write(dir.path(), "approved.txt", "Receipt $40.50");
    let draft = write(dir.path(), "draft.txt", "Quote $900.00");
    let blank = write(dir.path(), "blank.txt", "Thank you for your business");

    for (input, extra) in [(&approved, None), (&draft, Some("--draft"))] {
        let mut cmd = fdx(dir.path());
        cmd.args(["extract", input, "-r", "job-7", "--save", "--ledger", &ledger]);
        if let Some(flag) = extra {
            cmd.arg(flag);
        }
        cmd.assert().success();
    }

    fdx(dir.path())
        .args(["extract", &blank, "-r", "job-7", "--save", "--ledger", &ledger])
        .assert()
        .failure();

    fdx(dir.path())
        .args(["ledger", "total", "job-7", "--ledger", &ledger])
        .assert()
        .success()
        .stdout("40.50\n");

    fdx(dir.path())
        .args(["ledger", "show", "job-7", "--ledger", &ledger])
        .assert()
        .success()
        .stdout(predicate::str::contains("no financial data could be extracted"))
        .stdout(predicate::str::contains(r#""status": "draft""#));

    fdx(dir.path())
        .args(["ledger", "list", "--ledger", &ledger])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 documents (1 drafts)"));
}

#[test]
fn batch_writes_outputs_and_summary() {
    let dir = TempDir::new().unwrap();
    let docs = dir.path().join("docs");
    fs::create_dir_all(&docs).unwrap();
    write(&docs, "a.txt", "Receipt $10.00");
    write(&docs, "b.txt", "Invoice\nFrom: Ridge Roofing\n$5.50");
    write(&docs, "c.txt", "no money here");
    let out = dir.path().join("out");
    let pattern = format!("{}/*.txt", docs.display());

    fdx(dir.path())
        .args(["batch", &pattern, "-r", "job-3", "--summary", "--continue-on-error"])
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 files"))
        .stdout(predicate::str::contains("Total extracted: $15.50"));

    assert!(out.join("a.json").exists());
    assert!(out.join("b.json").exists());
    assert!(!out.join("c.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.starts_with("filename,status,category,amount"));
    assert!(summary.contains("b.txt,success,invoice,5.50,ridge roofing"));
    assert!(summary.contains("c.txt,error"));
}

#[test]
fn batch_stops_on_first_error() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.txt", "no money here");
    let pattern = format!("{}/*.txt", dir.path().display());

    fdx(dir.path())
        .args(["batch", &pattern, "-r", "job-3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));
}

#[test]
fn measure_reports_area() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "site.json", "[[[0,0],[2,0],[2,2],[0,2]]]");

    fdx(dir.path())
        .args(["measure", &input])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""area": 4.0"#));
}

#[test]
fn address_expands_street_type() {
    let dir = TempDir::new().unwrap();

    fdx(dir.path())
        .args(["address", "12a Smith St, Paddington 4064, QLD", "--expand"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""street_number": "12a""#))
        .stdout(predicate::str::contains(r#""street_type": "Street""#))
        .stdout(predicate::str::contains(r#""postcode": "4064""#));
}

#[test]
fn config_init_set_get() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("fdx.json").display().to_string();

    fdx(dir.path())
        .args(["-c", &config, "config", "init"])
        .assert()
        .success();

    fdx(dir.path())
        .args(["-c", &config, "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    fdx(dir.path())
        .args(["-c", &config, "config", "set", "source.min_text_length", "5"])
        .assert()
        .success();

    fdx(dir.path())
        .args(["-c", &config, "config", "get", "source.min_text_length"])
        .assert()
        .success()
        .stdout("5\n");

    fdx(dir.path())
        .args(["-c", &config, "config", "set", "extraction.nope", "1"])
        .assert()
        .failure();
}

#[test]
fn configured_labels_drive_extraction() {
    let dir = TempDir::new().unwrap();
    let config = write(
        dir.path(),
        "fdx.json",
        r#"{"extraction": {"vendor_labels": ["payee:"]}}"#,
    );
    let input = write(dir.path(), "bill.txt", "From: ignored\nPayee: Water Board\n$88.10");

    fdx(dir.path())
        .args(["-c", &config, "extract", &input, "-r", "job-4"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""vendor": "water board""#));
}
