mod common;
use common::{init, obs, run_ok, setup, temp_out};
use predicates::str::contains;
use std::fs;

/// Two segments with events in between.
fn populate(home: &str, db: &str) {
    run_ok(home, db, &["toggle"]);
    run_ok(home, db, &["event", "scratch"]);
    run_ok(home, db, &["event", "sniff"]);
    run_ok(home, db, &["toggle"]);
    run_ok(home, db, &["toggle"]);
    run_ok(home, db, &["event", "sit"]);
    run_ok(home, db, &["toggle"]);
}

#[test]
fn test_export_csv_has_one_row_per_event() {
    let (home, db) = setup("export_csv_rows");
    init(&home, &db);
    populate(&home, &db);

    let out = temp_out("export_csv_rows", "csv");
    obs(&home)
        .args(["--db", &db, "export", "--format", "csv", "--file", &out])
        .assert()
        .success()
        .stdout(contains("5 rows"));

    let content = fs::read_to_string(&out).expect("read exported csv");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "time,type");
    assert_eq!(lines.len(), 6);

    let kinds: Vec<&str> = lines[1..]
        .iter()
        .map(|l| l.split(',').nth(1).expect("type column"))
        .collect();
    assert_eq!(kinds, vec!["END_SET", "Sit", "END_SET", "Sniff", "Scratch"]);
}

#[test]
fn test_export_json_matches_stored_shape() {
    let (home, db) = setup("export_json");
    init(&home, &db);
    run_ok(&home, &db, &["event", "door"]);

    let out = temp_out("export_json", "json");
    run_ok(&home, &db, &["export", "--format", "json", "--file", &out]);

    let content = fs::read_to_string(&out).expect("read exported json");
    let v: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(v, serde_json::json!([{"time": 0, "type": "Door"}]));
}

#[test]
fn test_export_xlsx_writes_workbook() {
    let (home, db) = setup("export_xlsx");
    init(&home, &db);
    populate(&home, &db);

    let out = temp_out("export_xlsx", "xlsx");
    run_ok(&home, &db, &["export", "--format", "xlsx", "--file", &out]);

    let bytes = fs::read(&out).expect("read xlsx");
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn test_export_empty_log_writes_header() {
    let (home, db) = setup("export_empty");
    init(&home, &db);

    let out = temp_out("export_empty", "csv");
    obs(&home)
        .args(["--db", &db, "export", "--file", &out])
        .assert()
        .success()
        .stdout(contains("No events logged"));

    assert_eq!(fs::read_to_string(&out).unwrap(), "time,type\n");
}

#[test]
fn test_export_requires_absolute_path() {
    let (home, db) = setup("export_relative");
    init(&home, &db);

    obs(&home)
        .args(["--db", &db, "export", "--file", "events.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_export_existing_file_needs_confirmation() {
    let (home, db) = setup("export_overwrite");
    init(&home, &db);
    run_ok(&home, &db, &["event", "sit"]);

    let out = temp_out("export_overwrite", "csv");
    fs::write(&out, "keep me").unwrap();

    obs(&home)
        .args(["--db", &db, "export", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("export cancelled"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "keep me");

    obs(&home)
        .args(["--db", &db, "export", "--file", &out, "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().contains("0,Sit"));
}

#[test]
fn test_export_is_journaled() {
    let (home, db) = setup("export_journal");
    init(&home, &db);
    run_ok(&home, &db, &["event", "sit"]);

    let out = temp_out("export_journal", "csv");
    run_ok(&home, &db, &["export", "--file", &out]);

    obs(&home)
        .args(["--db", &db, "journal", "--print"])
        .assert()
        .success()
        .stdout(contains("export"))
        .stdout(contains("1 events to"));
}
