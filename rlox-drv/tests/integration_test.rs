//! End-to-end CLI coverage: input source to stdout output and exit
//! code, plus the usage/file-not-found exit codes.

use assert_cmd::Command;
use predicates::prelude::*;

fn rlox() -> Command {
    Command::cargo_bin("rlox").expect("binary `rlox` built by this workspace")
}

fn run_script(source: &str) -> assert_cmd::assert::Assert {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("script.rlox");
    std::fs::write(&path, source).expect("write script");
    rlox().arg(&path).assert()
}

#[test]
fn arithmetic_precedence_prints_seven() {
    run_script("1 + 2 * 3").success().stdout(predicate::str::contains("7"));
}

#[test]
fn parenthesized_grouping_overrides_precedence() {
    run_script("(1 + 2) * 3").success().stdout(predicate::str::contains("9"));
}

#[test]
fn not_nil_prints_true() {
    run_script("!nil").success().stdout(predicate::str::contains("true"));
}

#[test]
fn string_concatenation_then_equality() {
    run_script("\"he\" + \"llo\" == \"hello\"")
        .success()
        .stdout(predicate::str::contains("true"));
}

#[test]
fn negating_a_bool_is_a_runtime_error() {
    run_script("-true").code(70).stdout(predicate::str::is_empty());
}

#[test]
fn adding_number_and_string_is_a_runtime_error() {
    run_script("1 + \"a\"").code(70);
}

#[test]
fn trailing_operator_is_a_compile_error() {
    run_script("1 +").code(65);
}

#[test]
fn less_equal_comparison() {
    run_script("1 <= 2").success().stdout(predicate::str::contains("true"));
}

#[test]
fn missing_file_exits_74() {
    rlox().arg("/nonexistent/path/to/script.rlox").assert().code(74);
}

#[test]
fn more_than_one_positional_argument_is_a_usage_error() {
    rlox().arg("a.rlox").arg("b.rlox").assert().code(64);
}
