//! End-to-end tests for the one-shot commands.

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command isolated in its own home and data directory.
fn expensetrack(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("expensetrack");
    cmd.env("HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("EXPENSETRACK_USER")
        .env_remove("EXPENSETRACK_PASSWORD")
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(home.join("data"));
    cmd
}

fn register(home: &Path, username: &str, password: &str) {
    expensetrack(home)
        .env("EXPENSETRACK_PASSWORD", password)
        .args(["register", username])
        .assert()
        .success();
}

fn add(home: &Path, category: &str, amount: &str) {
    expensetrack(home)
        .env("EXPENSETRACK_PASSWORD", "pw1")
        .args(["--user", "amy", "add", "--date", "2025-01-15"])
        .args(["--category", category, "--description", "test", "--amount", amount])
        .assert()
        .success()
        .stdout(predicate::str::contains("Expense added:"));
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    expensetrack(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("register"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("plot"));
}

#[test]
fn test_register_and_duplicate() {
    let home = TempDir::new().unwrap();
    expensetrack(home.path())
        .env("EXPENSETRACK_PASSWORD", "pw1")
        .args(["register", "amy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("User registered successfully: amy"));

    expensetrack(home.path())
        .env("EXPENSETRACK_PASSWORD", "other")
        .args(["register", "amy"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Username already exists"));
}

#[test]
fn test_add_requires_login() {
    let home = TempDir::new().unwrap();
    register(home.path(), "amy", "pw1");
    expensetrack(home.path())
        .args(["add", "--category", "Food", "--amount", "10"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Please log in first!"));

    expensetrack(home.path())
        .env("EXPENSETRACK_PASSWORD", "pw1")
        .args(["--user", "amy", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses recorded yet."));
}

#[test]
fn test_wrong_password_is_rejected() {
    let home = TempDir::new().unwrap();
    register(home.path(), "amy", "pw1");
    expensetrack(home.path())
        .env("EXPENSETRACK_PASSWORD", "nope")
        .args(["--user", "amy", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid username or password!"));
}

#[test]
fn test_add_list_and_plot() {
    let home = TempDir::new().unwrap();
    register(home.path(), "amy", "pw1");
    add(home.path(), "Food", "10");
    add(home.path(), "Food", "5");
    add(home.path(), "Transport", "20");

    expensetrack(home.path())
        .env("EXPENSETRACK_PASSWORD", "pw1")
        .args(["--user", "amy", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-01-15"))
        .stdout(predicate::str::contains("Transport"))
        .stdout(predicate::str::contains("35.00"));

    expensetrack(home.path())
        .env("EXPENSETRACK_PASSWORD", "pw1")
        .args(["--user", "amy", "plot"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Expense Distribution"))
        .stdout(predicate::str::contains("42.9%"))
        .stdout(predicate::str::contains("57.1%"));
}

#[test]
fn test_plot_without_expenses_shows_placeholder() {
    let home = TempDir::new().unwrap();
    register(home.path(), "amy", "pw1");
    expensetrack(home.path())
        .env("EXPENSETRACK_PASSWORD", "pw1")
        .args(["--user", "amy", "plot"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses recorded yet."));
}

#[test]
fn test_bad_amount_is_rejected() {
    let home = TempDir::new().unwrap();
    register(home.path(), "amy", "pw1");
    expensetrack(home.path())
        .env("EXPENSETRACK_PASSWORD", "pw1")
        .args(["--user", "amy", "add", "--category", "Food", "--amount", "lots"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid amount"));

    expensetrack(home.path())
        .env("EXPENSETRACK_PASSWORD", "pw1")
        .args(["--user", "amy", "add", "--category", "Food", "--amount", "-3"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid amount"));
}

#[test]
fn test_export_writes_csv() {
    let home = TempDir::new().unwrap();
    register(home.path(), "amy", "pw1");
    add(home.path(), "Food", "12.5");
    let out = home.path().join("out").join("expenses.csv");

    expensetrack(home.path())
        .env("EXPENSETRACK_PASSWORD", "pw1")
        .args(["--user", "amy", "export", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 expenses"));

    let csv = std::fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with("date,category,description,amount"));
    assert!(csv.contains("2025-01-15,Food,test,12.50"));
}

#[test]
fn test_status_reports_counts() {
    let home = TempDir::new().unwrap();
    expensetrack(home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Database not found"));

    register(home.path(), "amy", "pw1");
    add(home.path(), "Food", "1");
    expensetrack(home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Expenses:   1"))
        .stdout(predicate::str::contains("Users:      1"));
}

#[test]
fn test_unreadable_settings_are_reported() {
    let home = TempDir::new().unwrap();
    let config = home.path().join(".config").join("expensetrack");
    std::fs::create_dir_all(&config).unwrap();
    std::fs::write(config.join("settings.json"), "not json").unwrap();

    expensetrack(home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Database not found"))
        .stderr(predicate::str::contains("unreadable settings file"));
}
