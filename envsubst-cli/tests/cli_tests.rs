//! End-to-end tests for the `envsubst` binary.

#![allow(clippy::panic_in_result_fn)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn envsubst() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("envsubst"));
    cmd.arg("--no-config")
        .env_remove("ENVSUBST_STRICT")
        .env_remove("ENVSUBST_TEST_UNSET");
    cmd
}

#[test]
fn expands_environment_variables() {
    envsubst()
        .env("ENVSUBST_TEST_NAME", "world")
        .write_stdin("hello ${ENVSUBST_TEST_NAME}!\nbye $ENVSUBST_TEST_NAME\n")
        .assert()
        .success()
        .stdout("hello world!\nbye world\n");
}

#[test]
fn passes_plain_text_through() {
    envsubst()
        .write_stdin("no substitutions here\n\nsecond line\n")
        .assert()
        .success()
        .stdout("no substitutions here\n\nsecond line\n");
}

#[test]
fn appends_newline_to_final_line() {
    envsubst()
        .env("ENVSUBST_TEST_NAME", "x")
        .write_stdin("last=${ENVSUBST_TEST_NAME}")
        .assert()
        .success()
        .stdout("last=x\n");
}

#[test]
fn applies_operators() {
    envsubst()
        .env("ENVSUBST_TEST_FILE", "bash.string.txt")
        .write_stdin("${ENVSUBST_TEST_FILE%%.*} ${ENVSUBST_TEST_FILE##*.} ${ENVSUBST_TEST_FILE^^}\n")
        .assert()
        .success()
        .stdout("bash txt BASH.STRING.TXT\n");
}

#[test]
fn escapes_double_dollar() {
    envsubst()
        .write_stdin("price: $$ each, $$$$\n")
        .assert()
        .success()
        .stdout("price: $ each, $$\n");
}

#[test]
fn lenient_mode_treats_unset_as_empty() {
    envsubst()
        .write_stdin("[${ENVSUBST_TEST_UNSET}] [${ENVSUBST_TEST_UNSET-fallback}]\n")
        .assert()
        .success()
        .stdout("[] []\n");
}

#[test]
fn strict_mode_treats_unset_as_unset() {
    envsubst()
        .arg("--strict")
        .write_stdin("[${ENVSUBST_TEST_UNSET}] [${ENVSUBST_TEST_UNSET-fallback}]\n")
        .assert()
        .success()
        .stdout("[] [fallback]\n");
}

#[test]
fn strict_mode_from_environment() {
    envsubst()
        .env("ENVSUBST_STRICT", "true")
        .write_stdin("${ENVSUBST_TEST_UNSET-fallback}\n")
        .assert()
        .success()
        .stdout("fallback\n");
}

#[test]
fn malformed_input_fails() {
    envsubst()
        .write_stdin("fine\n${ENVSUBST_TEST_NAME\nnever printed\n")
        .assert()
        .failure()
        .code(1)
        .stdout("fine\n")
        .stderr(predicate::str::contains("missing closing brace"));
}

#[test]
fn required_variable_fails() {
    envsubst()
        .write_stdin("${ENVSUBST_TEST_UNSET:?is required}\n")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("ENVSUBST_TEST_UNSET: is required"));
}

#[test]
fn strict_setting_from_config_file() -> anyhow::Result<()> {
    let mut config = tempfile::NamedTempFile::new()?;
    writeln!(config, "strict = true")?;

    Command::new(assert_cmd::cargo::cargo_bin!("envsubst"))
        .env_remove("ENVSUBST_STRICT")
        .env_remove("ENVSUBST_TEST_UNSET")
        .arg("--config")
        .arg(config.path())
        .write_stdin("${ENVSUBST_TEST_UNSET-fallback}\n")
        .assert()
        .success()
        .stdout("fallback\n");

    Ok(())
}

#[test]
fn missing_explicit_config_is_fatal() {
    Command::new(assert_cmd::cargo::cargo_bin!("envsubst"))
        .arg("--config")
        .arg("/nonexistent/path/to/envsubst.toml")
        .write_stdin("text\n")
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("failed to read config file"));
}

#[test]
fn malformed_explicit_config_is_fatal() -> anyhow::Result<()> {
    let mut config = tempfile::NamedTempFile::new()?;
    writeln!(config, "strict = [")?;

    Command::new(assert_cmd::cargo::cargo_bin!("envsubst"))
        .arg("--config")
        .arg(config.path())
        .write_stdin("text\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config file"));

    Ok(())
}

#[test]
fn help_and_version() {
    envsubst()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--strict"));

    envsubst()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn rejects_unknown_arguments() {
    envsubst().arg("--bogus").assert().failure().code(1);
}
