//! End-to-end tests for the `singlish` binary. These avoid the `build`
//! and `run` subcommands so no Go toolchain is needed.

use std::fs;

use assert_cmd::Command;

fn singlish() -> Command {
    let mut cmd = Command::cargo_bin("singlish").unwrap();
    cmd.env_remove("SINGLISH_KEYWORDS");
    cmd
}

#[test]
fn transpile_prints_the_generated_path() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("hello.singlish");
    fs::write(&input, "kampung main\ngong(\"Hello\")\n").unwrap();

    let assert = singlish().arg("transpile").arg(&input).assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let path = stdout.trim().to_string();

    let generated = fs::read_to_string(&path).unwrap();
    assert!(generated.contains("package main"));
    assert!(generated.contains("fmt.Println(\"Hello\")"));
    fs::remove_file(&path).ok();
}

#[test]
fn transpile_respects_the_dictionary_flag() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("hello.singlish");
    fs::write(&input, "kampung main\nblast(\"Hello\")\n").unwrap();
    let dictionary = dir.path().join("keywords.txt");
    fs::write(&dictionary, "kampung: package\nblast: fmt.Println\n").unwrap();

    let assert = singlish()
        .arg("--dictionary")
        .arg(&dictionary)
        .arg("transpile")
        .arg(&input)
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let path = stdout.trim().to_string();

    let generated = fs::read_to_string(&path).unwrap();
    assert!(generated.contains("fmt.Println(\"Hello\")"));
    fs::remove_file(&path).ok();
}

#[test]
fn fmt_rewrites_the_file_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("raw.singlish");
    fs::write(&input, "package main\nif true { return }\n").unwrap();

    singlish().arg("fmt").arg(&input).assert().success();

    let formatted = fs::read_to_string(&input).unwrap();
    assert_eq!(formatted, "kampung main\n\nnasi can {\n\tbalek\n}\n");
}

#[test]
fn syntax_errors_print_context_and_fail() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.singlish");
    fs::write(&input, "kampung main\ngong(\"hi\n").unwrap();

    let assert = singlish().arg("transpile").arg(&input).assert().failure();
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("Error on line 2: unterminated string literal"));
    assert!(stderr.contains("^"));
}

#[test]
fn missing_file_prints_usage_and_fails() {
    let assert = singlish().arg("transpile").assert().failure().code(1);
    let output = assert.get_output();
    let stdout = String::from_utf8(output.stdout.clone()).unwrap();
    let stderr = String::from_utf8(output.stderr.clone()).unwrap();
    assert!(stdout.contains("Usage"));
    assert!(stderr.contains("missing input file"));
}

#[test]
fn bare_help_is_case_insensitive() {
    singlish().arg("HELP").assert().success();
    singlish().arg("--help").assert().success();
}

#[test]
fn subcommands_accept_bare_help_as_their_argument() {
    for subcommand in ["transpile", "build", "run", "fmt"] {
        let assert = singlish()
            .arg(subcommand)
            .arg("Help")
            .assert()
            .success();
        let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
        assert!(stdout.contains("Usage"), "{subcommand}: {stdout}");
    }
}
