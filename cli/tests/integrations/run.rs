use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn ruleform() -> Command {
    Command::cargo_bin("ruleform").unwrap()
}

#[test]
fn test_cli_eval_arithmetic_raw() {
    ruleform()
        .arg("eval")
        .arg("[a] + [b] * 2")
        .arg("a=1")
        .arg("b=3")
        .arg("--raw")
        .assert()
        .success()
        .stdout("7\n");
}

#[test]
fn test_cli_eval_condition_table() {
    ruleform()
        .arg("eval")
        .arg("[age] > 18 and [state] = 'TX'")
        .arg("age=30")
        .arg("state=TX")
        .assert()
        .success()
        .stdout(predicate::str::contains("Result"))
        .stdout(predicate::str::contains("true"));
}

#[test]
fn test_cli_eval_with_data_file() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("record.json");
    fs::write(&data, r#"{"first name": "Ada", "age": 36}"#).unwrap();

    ruleform()
        .arg("eval")
        .arg("[first name] = 'Ada' and [age] < 40")
        .arg("--data")
        .arg(&data)
        .arg("--raw")
        .assert()
        .success()
        .stdout("true\n");
}

#[test]
fn test_cli_eval_field_overrides_data_file() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().join("record.json");
    fs::write(&data, r#"{"age": 36}"#).unwrap();

    ruleform()
        .arg("eval")
        .arg("[age] > 50")
        .arg("age=60")
        .arg("--data")
        .arg(&data)
        .arg("--raw")
        .assert()
        .success()
        .stdout("true\n");
}

#[test]
fn test_cli_eval_invalid_rule() {
    ruleform()
        .arg("eval")
        .arg("([a] = 1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("is not valid"));
}

#[test]
fn test_cli_eval_failure_names_rule() {
    ruleform()
        .arg("eval")
        .arg("[a] + 1")
        .arg("a=abc")
        .assert()
        .failure()
        .stderr(predicate::str::contains("with rule name '[a] + 1'"));
}

#[test]
fn test_cli_eval_malformed_field() {
    ruleform()
        .arg("eval")
        .arg("[a] = 1")
        .arg("a")
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected name=value"));
}

#[test]
fn test_cli_eval_missing_data_file() {
    let temp_dir = TempDir::new().unwrap();

    ruleform()
        .arg("eval")
        .arg("[a] = 1")
        .arg("--data")
        .arg(temp_dir.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read data file"));
}

#[test]
fn test_cli_vars_lists_each_field_once() {
    let output = ruleform()
        .arg("vars")
        .arg("[first name] = [last name] or [age] > [first name]")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();

    assert!(stdout.contains("first name"));
    assert!(stdout.contains("last name"));
    assert!(stdout.contains("age"));
    assert_eq!(stdout.matches("first name").count(), 1);
}

#[test]
fn test_cli_vars_without_fields() {
    ruleform()
        .arg("vars")
        .arg("1 + 2")
        .assert()
        .success()
        .stdout(predicate::str::contains("No fields referenced"));
}

#[test]
fn test_cli_check_prints_prefix() {
    ruleform()
        .arg("check")
        .arg("[a] + 2 * 3 > 5")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rule is valid"))
        .stdout(predicate::str::contains("> + [a] * 2 3 5"));
}

#[test]
fn test_cli_check_rejects_missing_operand() {
    ruleform()
        .arg("check")
        .arg("* [a]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not valid"));
}

#[test]
fn test_cli_actions() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("actions.json");
    fs::write(
        &file,
        r#"[
  {"input": "extension", "action": "show", "rule": "[phone] > 0"},
  {"input": "extension", "action": "require", "rule": "[country] = 'US'"},
  {"input": "notes", "action": "hide", "rule": "[phone] = 0"}
]"#,
    )
    .unwrap();

    ruleform()
        .arg("actions")
        .arg(&file)
        .arg("phone=5")
        .arg("country=US")
        .assert()
        .success()
        .stdout(predicate::str::contains("extension"))
        .stdout(predicate::str::contains("show, require"))
        .stdout(predicate::str::contains("notes"));
}

#[test]
fn test_cli_actions_duplicate_registration() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("actions.json");
    fs::write(
        &file,
        r#"[
  {"input": "extension", "action": "show", "rule": "[phone] > 0"},
  {"input": "extension", "action": "show", "rule": "[phone] > 1"}
]"#,
    )
    .unwrap();

    ruleform()
        .arg("actions")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already registered"));
}

#[test]
fn test_cli_actions_invalid_file() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("actions.json");
    fs::write(&file, r#"{"input": "extension"}"#).unwrap();

    ruleform()
        .arg("actions")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid actions file"));
}

#[test]
fn test_cli_help() {
    ruleform()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("eval"))
        .stdout(predicate::str::contains("vars"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("actions"));
}
