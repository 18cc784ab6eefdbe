//! Binary-level tests driving `timefs` through scripts on stdin

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// A `timefs` command isolated from the user's configuration
fn timefs(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("timefs").unwrap();
    cmd.env("TIMEFS_CONFIG", dir.path().join("config.toml"))
        .env_remove("RUST_LOG")
        .arg("--color")
        .arg("never");
    cmd
}

#[test]
fn test_script_from_stdin() {
    let dir = TempDir::new().unwrap();
    timefs(&dir)
        .args(["run", "-"])
        .write_stdin(
            "CREATE a\nINSERT a hello\nSNAPSHOT a v1\nINSERT a world\nREAD a\nROLLBACK a\nREAD a\nHISTORY a\nEXIT\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("File 'a' created."))
        .stdout(predicate::str::contains("helloworld"))
        .stdout(predicate::str::contains("Rollback successful for 'a'."))
        .stdout(predicate::str::contains("Message: Initial version"))
        .stdout(predicate::str::contains("Message: v1"))
        .stdout(predicate::str::contains("Exiting system."));
}

#[test]
fn test_errors_do_not_stop_the_script() {
    let dir = TempDir::new().unwrap();
    timefs(&dir)
        .args(["run", "-"])
        .write_stdin("READ ghost\nCREATE a\nCREATE a\nSNAPSHOT a again\nROLLBACK a\nROLLBACK a x\nFROB\nREAD a\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: File not found."))
        .stdout(predicate::str::contains("Error: File 'a' already exists."))
        .stdout(predicate::str::contains("A snapshot already exists"))
        .stdout(predicate::str::contains(
            "Rollback failed. Invalid version or already at root.",
        ))
        .stdout(predicate::str::contains("Invalid version ID for ROLLBACK."))
        .stdout(predicate::str::contains("Unknown command or incorrect arguments."));
}

#[test]
fn test_rankings_from_script_file() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("script.tfs");
    fs::write(
        &script,
        "CREATE a\nCREATE b\nINSERT b x\nRECENT_FILES 1\nBIGGEST_TREES nope\n",
    )
    .unwrap();

    timefs(&dir)
        .arg("run")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("--- Top 1 Recently Modified Files ---"))
        .stdout(predicate::str::contains("b (Modified:"))
        .stdout(predicate::str::contains("Invalid number. Showing all by default."))
        .stdout(predicate::str::contains("--- Top All Files by Version Count ---"))
        .stdout(predicate::str::contains("b (2 versions)"));
}

#[test]
fn test_quiet_hides_confirmations() {
    let dir = TempDir::new().unwrap();
    timefs(&dir)
        .args(["--quiet", "run", "-"])
        .write_stdin("CREATE a\nINSERT a text\nREAD a\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("created").not())
        .stdout(predicate::str::contains("text"));
}

#[test]
fn test_json_output() {
    let dir = TempDir::new().unwrap();
    timefs(&dir)
        .args(["--json", "run", "-"])
        .write_stdin("CREATE a\nREAD missing\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"command\":\"create\""))
        .stdout(predicate::str::contains("\"ok\":false"));
}

#[test]
fn test_missing_script_fails() {
    let dir = TempDir::new().unwrap();
    timefs(&dir)
        .args(["run", "does-not-exist.tfs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open script"));
}

#[test]
fn test_shell_without_tty_reads_stdin() {
    let dir = TempDir::new().unwrap();
    timefs(&dir)
        .write_stdin("CREATE a\nQUIT\nCREATE b\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("File 'a' created."))
        .stdout(predicate::str::contains("File 'b' created.").not());
}

#[test]
fn test_config_set_and_get() {
    let dir = TempDir::new().unwrap();
    timefs(&dir)
        .args(["config", "engine.version_buckets", "32"])
        .assert()
        .success();

    timefs(&dir)
        .args(["config", "engine.version_buckets"])
        .assert()
        .success()
        .stdout(predicate::str::contains("32"));

    timefs(&dir)
        .args(["config", "engine.version_buckets", "0"])
        .assert()
        .failure();
}

#[test]
fn test_invalid_config_file_is_reported() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "[engine]\nregistry_buckets = 0\n").unwrap();

    timefs(&dir)
        .args(["run", "-"])
        .write_stdin("CREATE a\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("registry_buckets"));
}
