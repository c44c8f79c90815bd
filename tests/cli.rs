use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn expenses(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("expenses").unwrap();
    cmd.arg("--data-file")
        .arg(temp_dir.path().join("expenses.json"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_add_list_summary() {
    let temp_dir = TempDir::new().unwrap();

    expenses(&temp_dir)
        .args(["add", "50", "Food", "Lunch", "--date", "2024-01-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Expense added successfully!"))
        .stdout(predicate::str::contains("Amount: ₹50.00"));

    expenses(&temp_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Lunch"))
        .stdout(predicate::str::contains("Date: 2024-01-15"));

    expenses(&temp_dir)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Expenses: ₹50.00"))
        .stdout(predicate::str::contains("Food: ₹50.00 (100.0%)"));

    expenses(&temp_dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE"));
}

#[test]
fn test_add_rejects_non_positive_amount() {
    let temp_dir = TempDir::new().unwrap();

    expenses(&temp_dir)
        .args(["add", "-5", "Food", "Lunch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount must be positive"));

    assert!(!temp_dir.path().join("expenses.json").exists());
}

#[test]
fn test_list_filters_by_category() {
    let temp_dir = TempDir::new().unwrap();

    expenses(&temp_dir)
        .args(["add", "5", "Food", "Tea"])
        .assert()
        .success();
    expenses(&temp_dir)
        .args(["add", "20", "Travel", "Bus"])
        .assert()
        .success();

    expenses(&temp_dir)
        .args(["list", "--category", "food"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tea"))
        .stdout(predicate::str::contains("Bus").not());
}

#[test]
fn test_delete_unknown_id_fails() {
    let temp_dir = TempDir::new().unwrap();

    expenses(&temp_dir)
        .args(["delete", "nope1234"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Expense not found: nope1234"));
}

#[test]
fn test_interactive_exit() {
    let temp_dir = TempDir::new().unwrap();

    expenses(&temp_dir)
        .write_stdin("5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Personal Expense Tracker"))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn test_export_empty_store() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("out.csv");

    expenses(&temp_dir)
        .arg("export")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses to save"));

    assert!(!out.exists());
}

#[test]
fn test_import_then_export() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("in.csv");
    std::fs::write(
        &input,
        "id,amount,category,description,date\nt1,12.5,Food,Tea,2024-02-01\nt2,abc,Food,Bad,2024-02-02\n",
    )
    .unwrap();

    expenses(&temp_dir)
        .arg("import")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipping invalid amount: abc"))
        .stdout(predicate::str::contains("Added 1 expenses successfully!"));

    let out = temp_dir.path().join("out.csv");
    expenses(&temp_dir)
        .arg("export")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved 1 expenses to"));

    let contents = std::fs::read_to_string(&out).unwrap();
    assert!(contents.starts_with("id,amount,category,description,date,created_at\n"));
    assert!(contents.contains("t1,12.5,Food,Tea,2024-02-01,"));
}

#[test]
fn test_import_missing_columns() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("in.csv");
    std::fs::write(&input, "amount,description\n5,Tea\n").unwrap();

    expenses(&temp_dir)
        .arg("import")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("missing required columns"));
}

#[test]
fn test_malformed_settings_fall_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("expense-tracker.json"), "{ not json").unwrap();

    expenses(&temp_dir)
        .args(["add", "12", "Food", "Lunch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Amount: ₹12.00"))
        .stderr(predicate::str::contains("using default settings"));
}

#[test]
fn test_odd_created_at_does_not_lose_records() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("expenses.json"),
        r#"[{"id":"old1","amount":3.0,"category":"Food","description":"Tea","date":"2024-01-15","created_at":""}]"#,
    )
    .unwrap();

    expenses(&temp_dir)
        .args(["add", "5", "Food", "Cake"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Warning").not());

    expenses(&temp_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("ID: old1"))
        .stdout(predicate::str::contains("Cake"));
}
