//! CLI integration tests for bootvenv.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command to run bootvenv.
#[allow(deprecated)]
fn bootvenv() -> Command {
    let mut cmd = Command::cargo_bin("bootvenv").unwrap();
    cmd.env_remove("BOOTVENV_CONFIG");
    cmd
}

#[test]
fn test_help() {
    bootvenv()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Provision 32-bit and 64-bit Python environments",
        ))
        .stdout(predicate::str::contains("setup"))
        .stdout(predicate::str::contains("env"))
        .stdout(predicate::str::contains("extensions"))
        .stdout(predicate::str::contains("info"))
        .stdout(predicate::str::contains("shellenv"));
}

#[test]
fn test_version() {
    bootvenv()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_setup_help() {
    bootvenv()
        .args(["setup", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--skip-extensions"));
}

#[test]
fn test_env_rejects_unknown_bitness() {
    bootvenv()
        .args(["env", "arm64"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_invalid_subcommand() {
    bootvenv()
        .arg("invalid-subcommand")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_completions_bash() {
    bootvenv()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_bootvenv()"));
}

#[test]
fn test_completions_powershell() {
    bootvenv()
        .args(["completions", "powershell"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Register-ArgumentCompleter"));
}

#[test]
fn test_info_on_empty_project() {
    let temp = TempDir::new().unwrap();

    bootvenv()
        .args(["--root", temp.path().to_str().unwrap(), "info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[x32]"))
        .stdout(predicate::str::contains("[x64]"))
        .stdout(predicate::str::contains(".venv32"))
        .stdout(predicate::str::contains("PYTHON32_PATH"))
        .stdout(predicate::str::contains("(list not found)"));
}

#[test]
fn test_info_json_uses_config() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("bootvenv.toml"),
        "[x64]\npath = \"env64\"\nexport_var = \"PYTHON64_PATH\"\n",
    )
    .unwrap();
    fs::write(temp.path().join("_extensions.txt"), "# editor\next.a\n").unwrap();

    let output = bootvenv()
        .args(["--root", temp.path().to_str().unwrap(), "info", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let x64 = &json["environments"][1];
    assert_eq!(x64["name"], "x64");
    assert!(x64["path"].as_str().unwrap().ends_with("env64"));
    assert_eq!(x64["export_var"], "PYTHON64_PATH");
    assert_eq!(json["extensions"], serde_json::json!(["ext.a"]));
}

#[test]
fn test_info_from_nested_directory_uses_config_directory() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("bootvenv.toml"), "[x32]\npath = \"py32\"\n").unwrap();
    let nested = temp.path().join("spm-002");
    fs::create_dir(&nested).unwrap();

    let output = bootvenv()
        .current_dir(&nested)
        .args(["info", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let project = temp.path().canonicalize().unwrap();
    assert_eq!(json["root"], project.to_str().unwrap());
    let x32 = &json["environments"][0];
    assert_eq!(x32["path"], project.join("py32").to_str().unwrap());
    assert_eq!(
        x32["requirements_file"],
        project.join("spm-002").join("_requirements_x32.txt").to_str().unwrap()
    );
}

#[test]
fn test_info_from_directory_without_config_uses_defaults() {
    let temp = TempDir::new().unwrap();

    let output = bootvenv()
        .current_dir(temp.path())
        .args(["info", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json["environments"][0]["path"]
        .as_str()
        .unwrap()
        .ends_with(".venv32"));
}

#[test]
fn test_invalid_config_fails() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("bootvenv.toml"), "unknown_key = 1\n").unwrap();

    bootvenv()
        .args(["--root", temp.path().to_str().unwrap(), "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_explicit_config_missing_fails() {
    let temp = TempDir::new().unwrap();

    bootvenv()
        .args([
            "--root",
            temp.path().to_str().unwrap(),
            "--config",
            temp.path().join("nope.toml").to_str().unwrap(),
            "info",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn test_extensions_missing_list_warns() {
    let temp = TempDir::new().unwrap();

    bootvenv()
        .args(["--root", temp.path().to_str().unwrap(), "extensions"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Warning: extension list"))
        .stdout(predicate::str::contains("Processed 0 extension(s)."));
}

#[test]
fn test_extensions_missing_installer_warns() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("bootvenv.toml"),
        "extension_installer = \"bootvenv-no-such-installer\"\n",
    )
    .unwrap();
    fs::write(temp.path().join("_extensions.txt"), "ext.a\n").unwrap();

    bootvenv()
        .args(["--root", temp.path().to_str().unwrap(), "extensions"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "'bootvenv-no-such-installer' not found on PATH",
        ));
}

#[test]
fn test_setup_fails_without_launcher() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("bootvenv.toml"),
        "launcher = \"missing/py\"\n",
    )
    .unwrap();

    bootvenv()
        .args(["--root", temp.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("interpreter launcher"));

    assert!(!temp.path().join(".venv").exists());
}

#[test]
fn test_setup_fails_on_venv_without_activation_script() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join(".venv32")).unwrap();

    bootvenv()
        .args(["--root", temp.path().to_str().unwrap(), "setup"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Activation script missing"));
}

#[test]
fn test_shellenv_requires_environments() {
    let temp = TempDir::new().unwrap();

    bootvenv()
        .args(["--root", temp.path().to_str().unwrap(), "shellenv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Activation script missing"));
}
