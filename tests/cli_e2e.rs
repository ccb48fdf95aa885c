use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Env {
    home: TempDir,
    data_file: PathBuf,
}

impl Env {
    fn new() -> Self {
        let home = TempDir::new().unwrap();
        let data_file = home.path().join("library").join("book_data.json");
        Self { home, data_file }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("bookdiary").unwrap();
        cmd.env("BOOKDIARY_HOME", self.home.path())
            .env_remove("BOOKDIARY_DATA_FILE")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .current_dir(self.home.path())
            .arg("--data-file")
            .arg(&self.data_file);
        cmd
    }

    /// Runs the command and returns the id printed on the last stdout line.
    fn add(&self, args: &[&str]) -> String {
        let output = self.cmd().args(args).output().unwrap();
        assert!(output.status.success(), "{:?}", output);
        let stdout = String::from_utf8(output.stdout).unwrap();
        stdout.lines().last().unwrap().trim().to_string()
    }
}

fn data(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn book_and_diary_lifecycle() {
    let env = Env::new();

    let book_id = env.add(&["book", "add", "Dune", "Herbert", "1965", "--genre", "SF"]);
    assert!(env.data_file.exists());
    assert_eq!(data(&env.data_file)["books"][&book_id]["publishedYear"], 1965);

    env.add(&["diary", "add", &book_id[..8], "Great start", "--date", "2024-05-01"]);
    env.add(&["diary", "add", &book_id, "Sandworms", "--date", "2024-06-01"]);

    env.cmd()
        .args(["diary", "list", &book_id])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("2024-06-01")
                .and(predicate::str::contains("Great start")),
        );

    let listing = env.cmd().args(["diary", "list", &book_id]).output().unwrap();
    let listing = String::from_utf8(listing.stdout).unwrap();
    assert!(listing.find("2024-06-01").unwrap() < listing.find("2024-05-01").unwrap());

    env.cmd()
        .args(["diary", "list", &book_id, "--search", "SANDWORM"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sandworms").and(predicate::str::contains("Great start").not()));

    env.cmd()
        .args(["book", "rm", &book_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 diary entries removed"));

    let stored = data(&env.data_file);
    assert_eq!(stored["books"], serde_json::json!({}));
    assert_eq!(stored["diaries"], serde_json::json!({}));
}

#[test]
fn search_books_is_case_insensitive() {
    let env = Env::new();
    env.add(&["book", "add", "The Hobbit", "J.R.R. Tolkien", "1937"]);
    env.add(&["book", "add", "1984", "Orwell", "1949"]);

    env.cmd()
        .args(["book", "list", "--search", "tolkien"])
        .assert()
        .success()
        .stdout(predicate::str::contains("The Hobbit").and(predicate::str::contains("Orwell").not()));

    env.cmd()
        .args(["book", "list", "--search", "  "])
        .assert()
        .success()
        .stdout(predicate::str::contains("The Hobbit").and(predicate::str::contains("Orwell")));
}

#[test]
fn edit_replaces_fields() {
    let env = Env::new();
    let id = env.add(&["book", "add", "Dune", "Herbert", "1965"]);

    env.cmd()
        .args(["book", "edit", &id, "--memo", "Reread in 2024", "--year", "1966"])
        .assert()
        .success();

    let stored = data(&env.data_file);
    assert_eq!(stored["books"][&id]["memo"], "Reread in 2024");
    assert_eq!(stored["books"][&id]["publishedYear"], 1966);
    assert_eq!(stored["books"][&id]["title"], "Dune");
}

#[test]
fn invalid_input_fails_without_writing() {
    let env = Env::new();
    let id = env.add(&["book", "add", "Dune", "Herbert", "1965"]);
    let before = std::fs::read_to_string(&env.data_file).unwrap();

    env.cmd()
        .args(["diary", "add", &id, "note", "--date", "2024/05/01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));

    env.cmd()
        .args(["book", "add", "  ", "Someone", "2000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Title is required"));

    env.cmd()
        .args(["book", "add", "Emma", "Austen", "eighteen"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid year"));

    env.cmd()
        .args(["diary", "add", "no-such-book", "note"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No book matches"));

    assert_eq!(std::fs::read_to_string(&env.data_file).unwrap(), before);
}

#[test]
fn empty_library_lists_nothing() {
    let env = Env::new();
    env.cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("No books found."));
}

#[test]
fn config_sets_default_data_file() {
    let env = Env::new();
    let configured = env.home.path().join("configured.json");

    Command::cargo_bin("bookdiary")
        .unwrap()
        .env("BOOKDIARY_HOME", env.home.path())
        .env("NO_COLOR", "1")
        .args(["config", "data-file", configured.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("data-file set to"));

    Command::cargo_bin("bookdiary")
        .unwrap()
        .env("BOOKDIARY_HOME", env.home.path())
        .env_remove("BOOKDIARY_DATA_FILE")
        .env("NO_COLOR", "1")
        .args(["book", "add", "Dune", "Herbert", "1965"])
        .assert()
        .success();

    assert!(configured.exists());
}
