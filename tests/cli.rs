use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;

#[test]
fn calc_prints_value() {
    let mut cmd = cargo_bin_cmd!("combinate");
    cmd.arg("calc").arg("1+2-(3+1-((4)))");
    cmd.assert().success().stdout("3\n");
}

#[test]
fn calc_prints_tree_as_json() {
    let mut cmd = cargo_bin_cmd!("combinate");
    cmd.arg("calc").arg("1+2-(3+1-((4)))").arg("--format").arg("json");
    cmd.assert()
        .success()
        .stdout("[1,\"+\",2,\"-\",[3,\"+\",1,\"-\",[[4]]]]\n");
}

#[test]
fn calc_reports_parse_errors() {
    let mut cmd = cargo_bin_cmd!("combinate");
    cmd.arg("calc").arg("(1+2");
    cmd.assert().failure().stderr(predicate::str::contains(
        "Parse error: input did not match at position 4: expected operator or ')'",
    ));
}

#[test]
fn calc_reads_config_file() {
    let mut config = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(config, "[calc]\nallow_whitespace = true").unwrap();

    let mut cmd = cargo_bin_cmd!("combinate");
    cmd.arg("calc").arg(" 1 + ( 2 - 5 ) ").arg("--config").arg(config.path());
    cmd.assert().success().stdout("-2\n");

    let mut cmd = cargo_bin_cmd!("combinate");
    cmd.arg("calc").arg(" 1 + ( 2 - 5 ) ");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Parse error"));
}

#[test]
fn match_prints_parse_result() {
    let mut cmd = cargo_bin_cmd!("combinate");
    cmd.arg("match").arg("[0-9]+").arg("ab42").arg("--position").arg("2");
    cmd.assert()
        .success()
        .stdout("{\"matched\":true,\"value\":\"42\",\"next\":4}\n");

    let mut cmd = cargo_bin_cmd!("combinate");
    cmd.arg("match").arg("x").arg("abc");
    cmd.assert()
        .success()
        .stdout("{\"matched\":false,\"value\":null,\"next\":0}\n");
}

#[test]
fn match_ignore_case() {
    let mut cmd = cargo_bin_cmd!("combinate");
    cmd.arg("match").arg("hello").arg("HELLO world").arg("-i");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"value\":\"HELLO\""));
}

#[test]
fn match_rejects_bad_pattern_and_position() {
    let mut cmd = cargo_bin_cmd!("combinate");
    cmd.arg("match").arg("(unclosed").arg("abc");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Grammar error: invalid pattern"));

    let mut cmd = cargo_bin_cmd!("combinate");
    cmd.arg("match").arg("a").arg("abc").arg("--position").arg("9");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("outside the input"));
}
