//! End-to-end CLI tests.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn write_template(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(format!("{name}.j2")), content).unwrap();
}

fn promptkit(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("promptkit").unwrap();
    // Keep the host environment out of source selection.
    cmd.current_dir(temp.path())
        .env_remove("SUPABASE_URL")
        .env_remove("SUPABASE_KEY")
        .env_remove("TEMPLATE_PATH")
        .env_remove("USE_CACHE")
        .env_remove("FORCED_SOURCE");
    cmd
}

#[test]
fn render_outputs_the_rendered_template() {
    let temp = TempDir::new().unwrap();
    write_template(
        temp.path(),
        "greeting",
        "---\ndescription: Greets a user\n---\nHello, {{ user }}!\n",
    );

    promptkit(&temp)
        .args(["render", "greeting", "--var", "user=Ada"])
        .arg("--template-path")
        .arg(temp.path())
        .assert()
        .success()
        .stdout("Hello, Ada!\n");
}

#[test]
fn info_prints_metadata_and_variables() {
    let temp = TempDir::new().unwrap();
    write_template(
        temp.path(),
        "greeting",
        "---\ndescription: Greets a user\nauthor: Ada\n---\nHello, {{ user }} and {{ other }}!\n",
    );

    promptkit(&temp)
        .args(["info", "greeting"])
        .arg("--template-path")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("name: greeting"))
        .stdout(predicate::str::contains("description: Greets a user"))
        .stdout(predicate::str::contains("author: Ada"))
        .stdout(predicate::str::contains("variables: other, user"));
}

#[test]
fn unknown_template_fails_with_error() {
    let temp = TempDir::new().unwrap();

    promptkit(&temp)
        .args(["render", "absent"])
        .arg("--template-path")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent"));
}

#[test]
fn missing_variable_fails_with_error() {
    let temp = TempDir::new().unwrap();
    write_template(temp.path(), "strict", "Hello, {{ user }}!");

    promptkit(&temp)
        .args(["render", "strict"])
        .arg("--template-path")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Undefined variable"));
}

#[test]
fn invalid_var_pair_is_rejected() {
    let temp = TempDir::new().unwrap();
    write_template(temp.path(), "x", "body");

    promptkit(&temp)
        .args(["render", "x", "--var", "not-a-pair"])
        .arg("--template-path")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("KEY=VALUE"));
}

#[test]
fn template_path_env_var_is_honored() {
    let temp = TempDir::new().unwrap();
    write_template(temp.path(), "x", "from env path");

    promptkit(&temp)
        .env("TEMPLATE_PATH", temp.path())
        .args(["render", "x"])
        .assert()
        .success()
        .stdout("from env path\n");
}
