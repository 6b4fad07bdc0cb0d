use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn leafdb() -> Command {
    Command::cargo_bin("leafdb").unwrap()
}

fn db_path(dir: &tempfile::TempDir) -> std::path::PathBuf {
    dir.path().join("test.db")
}

/// S1 — basic insert/select.
#[test]
fn insert_then_select_round_trips() {
    let dir = tempdir().unwrap();
    let assert = leafdb()
        .arg(db_path(&dir))
        .write_stdin("insert 1 cstack foo@bar.com\nselect\n.exit\n")
        .assert();

    assert
        .success()
        .stdout(predicate::str::contains("Executed."))
        .stdout(predicate::str::contains("(1, cstack, foo@bar.com)"));
}

/// S2 — table full: the 13th insert succeeds, the 14th reports table full.
#[test]
fn fourteenth_insert_reports_table_full() {
    let dir = tempdir().unwrap();
    let mut input = String::new();
    for id in 1..=14 {
        input.push_str(&format!("insert {id} user{id} person{id}@example.com\n"));
    }
    input.push_str(".exit\n");

    let assert = leafdb().arg(db_path(&dir)).write_stdin(input).assert();

    let output = assert.get_output().stdout.clone();
    let text = String::from_utf8(output).unwrap();
    let executed_count = text.matches("Executed.").count();
    let full_count = text.matches("Error: Table full.").count();

    assert_eq!(executed_count, 13);
    assert_eq!(full_count, 1);
}

/// S3 — a username over 32 bytes is rejected and the table stays empty.
#[test]
fn oversized_username_is_rejected() {
    let dir = tempdir().unwrap();
    let long_username = "a".repeat(33);
    let input = format!("insert 1 {long_username} foo@bar.com\nselect\n.exit\n");

    let assert = leafdb().arg(db_path(&dir)).write_stdin(input).assert();

    assert
        .success()
        .stdout(predicate::str::contains("String is too long."))
        .stdout(predicate::str::contains("(1,").not());
}

/// S4 — a negative id is rejected.
#[test]
fn negative_id_is_rejected() {
    let dir = tempdir().unwrap();
    let assert = leafdb()
        .arg(db_path(&dir))
        .write_stdin("insert -1 a a@b.c\n.exit\n")
        .assert();

    assert
        .success()
        .stdout(predicate::str::contains("ID must be positive."));
}

/// S5 — persistence across process restarts on the same file.
#[test]
fn rows_survive_a_restart() {
    let dir = tempdir().unwrap();
    let path = db_path(&dir);

    leafdb()
        .arg(&path)
        .write_stdin("insert 1 user1 p1@x\n.exit\n")
        .assert()
        .success();

    leafdb()
        .arg(&path)
        .write_stdin("select\n.exit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("(1, user1, p1@x)"));
}

/// S6 — an unrecognized meta-command is reported and the REPL keeps going.
#[test]
fn unknown_metacommand_is_reported_and_repl_continues() {
    let dir = tempdir().unwrap();
    let assert = leafdb()
        .arg(db_path(&dir))
        .write_stdin(".foo\nselect\n.exit\n")
        .assert();

    assert
        .success()
        .stdout(predicate::str::contains("Unrecognized command '.foo'."))
        .stdout(predicate::str::contains("Executed."));
}

/// S7 — `.btree` lists cells in insertion order, not sorted by key.
///
/// Compares the full transcript rather than a substring: the exact interleaving of `db > `
/// prompts with command output is itself part of what this scenario pins down.
#[test]
fn btree_dump_lists_cells_in_insertion_order() {
    let dir = tempdir().unwrap();
    let assert = leafdb()
        .arg(db_path(&dir))
        .write_stdin(
            "insert 3 three three@x\ninsert 1 one one@x\ninsert 2 two two@x\n.btree\n.exit\n",
        )
        .assert();

    let assert = assert.success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let expected = "db > Executed.\n\
                    db > Executed.\n\
                    db > Executed.\n\
                    db > Tree:\n\
                    leaf (size 3)\n\
                    \x20 - 0 : 3\n\
                    \x20 - 1 : 1\n\
                    \x20 - 2 : 2\n\
                    db > ";
    assert_eq!(stdout, expected);
}

/// `.constants` prints the fixed layout constants from the storage stack.
#[test]
fn constants_command_prints_layout() {
    let dir = tempdir().unwrap();
    let assert = leafdb()
        .arg(db_path(&dir))
        .write_stdin(".constants\n.exit\n")
        .assert();

    let assert = assert.success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let expected = "db > ROW_SIZE: 291\n\
                    COMMON_NODE_HEADER_SIZE: 6\n\
                    LEAF_NODE_HEADER_SIZE: 10\n\
                    LEAF_NODE_CELL_SIZE: 295\n\
                    LEAF_NODE_SPACE_FOR_CELLS: 4086\n\
                    LEAF_NODE_MAX_CELLS: 13\n\
                    db > ";
    assert_eq!(stdout, expected);
}

/// Missing the database filename argument is a usage error, not a panic.
#[test]
fn missing_filename_argument_exits_nonzero() {
    leafdb()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Must supply a database filename."));
}

/// An incomplete insert statement is a syntax error, not a crash.
#[test]
fn incomplete_insert_is_a_syntax_error() {
    let dir = tempdir().unwrap();
    let assert = leafdb()
        .arg(db_path(&dir))
        .write_stdin("insert 1 cstack\n.exit\n")
        .assert();

    assert
        .success()
        .stdout(predicate::str::contains("Syntax error. Could not parse statement."));
}
