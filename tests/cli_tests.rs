use serde_json::Value;
use std::process::Command;

mod common;
use common::temp_files;

const TABLE: &str = r"
routes:
  - method: GET
    path: /pets/:id([0-9]+)
    handler: get_pet
  - method: GET
    path: /docs/
    handler: docs
";

fn cli() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_brrtrouter-radix"));
    cmd.env_remove("RUST_LOG").env_remove("BRRTR_LOG_LEVEL");
    cmd
}

#[test]
fn test_cli_match_prints_json() {
    let table = temp_files::create_temp_yaml(TABLE);
    let output = cli()
        .arg("match")
        .arg("--table")
        .arg(table.path())
        .arg("/pets/7")
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["outcome"], "matched");
    assert_eq!(report["handler"], "get_pet");
    assert_eq!(report["params"]["id"], "7");
}

#[test]
fn test_cli_match_redirect() {
    let table = temp_files::create_temp_yaml(TABLE);
    let output = cli()
        .args(["match", "--method", "get", "--table"])
        .arg(table.path())
        .arg("/docs")
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["method"], "GET");
    assert_eq!(report["outcome"], "redirect");
    assert_eq!(report["location"], "/docs/");
}

#[test]
fn test_cli_match_not_found() {
    let table = temp_files::create_temp_yaml(TABLE);
    let output = cli()
        .args(["match", "-m", "POST", "-t"])
        .arg(table.path())
        .arg("/docs")
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["outcome"], "not_found");
    assert_eq!(report["status"], 404);
}

#[test]
fn test_cli_check_fails_on_conflict() {
    let table = temp_files::create_temp_yaml(
        r"
routes:
  - method: GET
    path: /a/:id
    handler: a
  - method: GET
    path: /a/:id
    handler: b
",
    );
    let output = cli()
        .arg("check")
        .arg("--table")
        .arg(table.path())
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("already registered"), "{stderr}");
}

#[test]
fn test_cli_clean() {
    let output = cli()
        .args(["clean", "/a/../b//c/."])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "/b/c/\n");
}
