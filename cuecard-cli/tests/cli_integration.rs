//! End-to-end tests running the `cuecard` binary against temporary directories

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A temporary home directory and prompts directory
struct TestEnv {
    home: TempDir,
    prompts: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            home: TempDir::new().unwrap(),
            prompts: TempDir::new().unwrap(),
        }
    }

    fn prompts_dir(&self) -> &Path {
        self.prompts.path()
    }

    fn write(&self, name: &str, contents: &str) {
        fs::write(self.prompts_dir().join(name), contents).unwrap();
    }

    /// `cuecard` isolated from the real home directory and environment
    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("cuecard").unwrap();
        cmd.env("HOME", self.home.path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("CUECARD_PROMPTS_DIR")
            .env_remove("CUECARD_EDITOR");
        cmd
    }

    /// `cuecard --prompts-dir <prompts>`
    fn cuecard(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.arg("--prompts-dir").arg(self.prompts_dir());
        cmd
    }
}

fn sample_library(env: &TestEnv) {
    env.write(
        "review.md",
        "---\ntitle: Code Review\ndescription: Review a diff\ngroup: Dev\nalias: cr\nfavorite: true\ninput: required\n---\nReview:\n${INPUT}",
    );
    env.write(
        "standup.md",
        "---\ntitle: Standup\ndescription: Daily notes\ngroup: Team\ntags:\n- daily\n---\nNotes for ${DATE}",
    );
    env.write("scratch.md", "---\ntitle: scratch\n---\nAnything");
    env.write("README.md", "Not a prompt");
}

#[test]
fn help_lists_commands() {
    let env = TestEnv::new();
    env.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn missing_configuration_points_at_init() {
    let env = TestEnv::new();
    env.cmd()
        .arg("list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cuecard init"));
}

#[test]
fn list_shows_sections() {
    let env = TestEnv::new();
    sample_library(&env);

    env.cuecard()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Prompts: 3"))
        .stdout(predicate::str::contains("Favorites"))
        .stdout(predicate::str::contains("Dev"))
        .stdout(predicate::str::contains("Ungrouped"))
        .stdout(predicate::str::contains("Not a prompt").not());
}

#[test]
fn list_json_is_grouped() {
    let env = TestEnv::new();
    sample_library(&env);

    let output = env
        .cuecard()
        .args(["--format", "json", "list", "daily"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let view: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(view["favorites"].as_array().unwrap().len(), 0);
    assert_eq!(view["groups"][0]["name"], "Team");
    assert_eq!(view["groups"][0]["prompts"][0]["title"], "Standup");
    assert_eq!(view["ungrouped"].as_array().unwrap().len(), 0);
}

#[test]
fn render_substitutes_input() {
    let env = TestEnv::new();
    sample_library(&env);

    env.cuecard()
        .args(["render", "cr", "--input", "diff --git a b"])
        .assert()
        .success()
        .stdout("Review:\ndiff --git a b\n");
}

#[test]
fn render_requires_input() {
    let env = TestEnv::new();
    sample_library(&env);

    env.cuecard()
        .args(["render", "cr"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("requires input"));
}

#[test]
fn new_reads_stdin_then_show() {
    let env = TestEnv::new();

    env.cuecard()
        .args(["new", "--title", "Email Reply", "--group", "Writing"])
        .write_stdin("Reply politely to ${INPUT}\n")
        .assert()
        .success();
    assert!(env.prompts_dir().join("email-reply.md").exists());

    env.cuecard()
        .args(["show", "email-reply"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Email Reply"))
        .stdout(predicate::str::contains("Reply politely to ${INPUT}"));
}

#[test]
fn favorite_duplicate_delete() {
    let env = TestEnv::new();
    sample_library(&env);

    env.cuecard()
        .args(["favorite", "Standup"])
        .assert()
        .success();
    let standup = fs::read_to_string(env.prompts_dir().join("standup.md")).unwrap();
    assert!(standup.contains("favorite: true"));

    env.cuecard()
        .args(["duplicate", "standup"])
        .assert()
        .success();
    let copy = fs::read_to_string(env.prompts_dir().join("standup-copy.md")).unwrap();
    assert!(copy.contains("title: Standup (Copy)"));
    assert!(!copy.contains("favorite"));

    env.cuecard()
        .args(["delete", "standup-copy.md"])
        .assert()
        .success();
    assert!(!env.prompts_dir().join("standup-copy.md").exists());

    env.cuecard()
        .args(["delete", "nothing-here"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("prompt not found"));
}

#[test]
fn validate_exit_codes() {
    let env = TestEnv::new();
    env.write(
        "good.md",
        "---\ntitle: Good\ndescription: ok\n---\nBody",
    );
    env.cuecard().arg("validate").assert().code(0);

    env.write("nodesc.md", "---\ntitle: No Description\n---\nBody");
    env.cuecard()
        .arg("validate")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("missing description"));

    env.write("broken.md", "---\ntitle: Broken\nBody");
    env.cuecard()
        .arg("validate")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("broken.md"));
}

#[test]
fn init_then_list_uses_config() {
    let env = TestEnv::new();
    let prompts = env.home.path().join("my-prompts");

    env.cmd()
        .args(["init", "--sample", "--prompts-dir"])
        .arg(&prompts)
        .assert()
        .success();
    assert!(env
        .home
        .path()
        .join(".config")
        .join("cuecard")
        .join("config.yaml")
        .exists());

    env.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello World"));

    env.cmd()
        .args(["init", "--prompts-dir"])
        .arg(&prompts)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn import_directory_reports_counts() {
    let env = TestEnv::new();
    let source = TempDir::new().unwrap();
    fs::write(
        source.path().join("one.md"),
        "---\ntitle: One\nfavorite: true\n---\n1",
    )
    .unwrap();
    fs::write(source.path().join("plain.md"), "no metadata").unwrap();

    env.cuecard()
        .arg("import")
        .arg(source.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 prompts, skipped 1"));

    let one = fs::read_to_string(env.prompts_dir().join("one.md")).unwrap();
    assert!(!one.contains("favorite"));
}
