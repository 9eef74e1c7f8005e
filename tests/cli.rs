//! CLI tests for the `qql` binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn qql() -> Command {
    Command::new(env!("CARGO_BIN_EXE_qql"))
}

fn write_source(dir: &TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write source");
    path.to_str().expect("utf8 path").to_string()
}

#[test]
fn no_arguments_prints_banner() {
    qql()
        .assert()
        .success()
        .stdout(predicate::str::starts_with("QQL - Version 1.0.0"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn help_flags() {
    for flag in ["-h", "--help"] {
        qql()
            .arg(flag)
            .assert()
            .success()
            .stdout(predicate::str::contains("-v | --version"));
    }
}

#[test]
fn version_flags() {
    for flag in ["-v", "--version"] {
        qql()
            .arg(flag)
            .assert()
            .success()
            .stdout("QQL - Version 1.0.0\n");
    }
}

#[test]
fn unknown_flag_is_command_error() {
    qql()
        .arg("--bogus")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("[ErrCmd]: Unknown command --bogus"));
}

#[test]
fn missing_file_is_command_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("missing.qql");
    qql()
        .arg(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn directory_is_command_error() {
    let dir = TempDir::new().expect("temp dir");
    qql()
        .arg(dir.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Not a file"));
}

#[test]
fn non_utf8_file_is_unreadable() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("binary.qql");
    fs::write(&path, [0xFF, 0xFE, 0x00, 0x80]).expect("write source");
    qql()
        .arg(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("File cannot be read"));
}

#[test]
fn empty_file_prints_nothing() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_source(&dir, "empty.qql", "");
    qql().arg(path).assert().success().stdout("");
}

#[test]
fn prints_tokens() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_source(&dir, "query.qql", "if id = 1 then:\n    get db.t->*\n");
    qql()
        .arg(path)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "1:1 Keyword(If) if\n1:4 Identifier id\n1:7 Operator =\n1:9 IntLiteral 1\n",
        ))
        .stdout(predicate::str::contains("2:13 Operator ->\n"))
        .stdout(predicate::str::ends_with("3:1 EndOfInput\n"));
}

#[test]
fn trailing_arguments_are_ignored() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_source(&dir, "q.qql", "quit");
    qql()
        .arg(path)
        .arg("extra")
        .assert()
        .success()
        .stdout("1:1 Keyword(Quit) quit\n1:5 EndOfInput\n");
}

#[test]
fn syntax_error_exits_nonzero() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_source(&dir, "bad.qql", "delete db.t (\n  id @ 1\n)\n");
    qql()
        .arg(&path)
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains(format!(
            "file '{path}', at line 2:\n@ 1\n)\n"
        )))
        .stderr(predicate::str::contains(
            "[ErrSyntax]: unknown character '@' at line 2",
        ));
}

#[test]
fn lex_file_reports_command_and_syntax_errors() {
    let dir = TempDir::new().expect("temp dir");
    let options = qql::LexOptions::default();

    let missing = dir.path().join("nope.qql");
    let err = qql::lex_file(missing.to_str().expect("utf8"), &options).expect_err("missing");
    assert!(matches!(
        err,
        qql::Error::Command(qql::CommandError::FileNotFound(_))
    ));

    let bad = write_source(&dir, "bad.qql", "x = \"open");
    let err = qql::lex_file(&bad, &options).expect_err("bad");
    assert!(matches!(err, qql::Error::Lex(_)));

    let good = write_source(&dir, "good.qql", "count(id)");
    let tokens = qql::lex_file(&good, &options).expect("good");
    assert_eq!(tokens.len(), 5);
}
