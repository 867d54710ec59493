#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Binary under test with HOME pointed at a per-test directory, so no real
/// config file leaks into the run.
pub fn obs(home: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("obslogger");
    cmd.env("HOME", home).env("APPDATA", home).env_remove("RUST_LOG");
    cmd
}

/// Fresh HOME directory and store path for one test.
pub fn setup(name: &str) -> (String, String) {
    let mut home: PathBuf = env::temp_dir();
    home.push(format!("obslogger_home_{}", name));
    fs::remove_dir_all(&home).ok();
    fs::create_dir_all(&home).expect("create test home");

    let db = home.join("session.sqlite");
    (
        home.to_string_lossy().to_string(),
        db.to_string_lossy().to_string(),
    )
}

/// Create a temporary output file path and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("obslogger_{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Init the store at `db`.
pub fn init(home: &str, db: &str) {
    obs(home)
        .args(["--db", db, "--test", "init"])
        .assert()
        .success();
}

/// Run one subcommand against `db` and require success.
pub fn run_ok(home: &str, db: &str, args: &[&str]) -> String {
    let out = obs(home)
        .arg("--db")
        .arg(db)
        .args(args)
        .assert()
        .success();
    String::from_utf8_lossy(&out.get_output().stdout).to_string()
}

/// Write a config file into the test HOME.
pub fn write_config(home: &str, yaml: &str) {
    let dir = PathBuf::from(home).join(".obslogger");
    fs::create_dir_all(&dir).expect("create config dir");
    fs::write(dir.join("obslogger.conf"), yaml).expect("write config");
}
