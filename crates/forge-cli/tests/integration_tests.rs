//! End-to-end tests for the `forge` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `forge` invocation isolated from the user's config and event log.
fn forge(home: &Path) -> Command {
    let config = home.join("forge.toml");
    if !config.exists() {
        fs::write(&config, "").unwrap();
    }
    let mut cmd = Command::cargo_bin("forge").unwrap();
    cmd.current_dir(home)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .env("FORGE_TRACKING__PATH", home.join("events.jsonl"))
        .args(["--config", config.to_str().unwrap()]);
    cmd
}

#[test]
fn help_lists_subcommands() {
    let temp = TempDir::new().unwrap();
    forge(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("deploy"))
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn version_flag() {
    let temp = TempDir::new().unwrap();
    forge(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn deploy_records_one_event_and_confirms() {
    let temp = TempDir::new().unwrap();
    forge(temp.path())
        .arg("deploy")
        .write_stdin("my-app\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "my-app's successful deployment has been recorded!",
        ));

    let log = fs::read_to_string(temp.path().join("events.jsonl")).unwrap();
    let lines: Vec<_> = log.lines().collect();
    assert_eq!(lines.len(), 1);

    let event: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(
        event["payload"],
        serde_json::json!({
            "event_name": "deployment",
            "event_action": "succeeded",
            "branch": "main",
            "repo": "my-app"
        })
    );
    assert_eq!(event["recipients"], serde_json::json!([]));
}

#[test]
fn deploy_without_an_answer_fails_and_records_nothing() {
    let temp = TempDir::new().unwrap();
    forge(temp.path())
        .arg("deploy")
        .write_stdin("")
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::contains("recorded").not());

    assert!(!temp.path().join("events.jsonl").exists());
}

#[test]
fn deploy_fails_when_the_event_log_is_unwritable() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("blocker"), "").unwrap();
    forge(temp.path())
        .env("FORGE_TRACKING__PATH", temp.path().join("blocker/events.jsonl"))
        .arg("deploy")
        .write_stdin("my-app\n")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("recorded").not());
}

#[test]
fn init_writes_a_service_project() {
    let temp = TempDir::new().unwrap();
    forge(temp.path())
        .args([
            "init",
            "--kind",
            "service",
            "--from",
            "golang",
            "--name",
            "test",
            "--version",
            "1.2.3",
            "--description",
            "test desc",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("test"));

    let dir = temp.path().join("test");
    for file in [".dockerignore", ".gitignore", "Dockerfile", "go.mod", "go.sum", "main.go", "ops.yml"] {
        assert!(dir.join(file).is_file(), "missing {file}");
    }
    let ops = fs::read_to_string(dir.join("ops.yml")).unwrap();
    assert!(ops.contains(r#"name: "test:1.2.3""#), "{ops}");
    assert!(ops.contains(r#"description: "test desc""#), "{ops}");
}

#[test]
fn init_accepts_fuzzy_targets_and_custom_destination() {
    let temp = TempDir::new().unwrap();
    forge(temp.path())
        .args(["init", "--from", "Node.js", "--name", "deploy", "--to", "tools/deploy"])
        .assert()
        .success();

    let dir = temp.path().join("tools/deploy");
    assert!(dir.join("index.js").is_file());
    assert!(dir.join("package.json").is_file());
}

#[cfg(unix)]
#[test]
fn init_marks_shell_entrypoints_executable() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    forge(temp.path())
        .args(["init", "--from", "bash", "--name", "job"])
        .assert()
        .success();

    let mode = fs::metadata(temp.path().join("job/main.sh")).unwrap().permissions().mode();
    assert_ne!(mode & 0o111, 0);
}

#[test]
fn init_refuses_an_existing_directory_without_force() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("taken")).unwrap();

    forge(temp.path())
        .args(["init", "--name", "taken"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--force"));

    forge(temp.path())
        .args(["init", "--name", "taken", "--force"])
        .assert()
        .success();
    assert!(temp.path().join("taken/ops.yml").is_file());
}

#[test]
fn freshly_initialised_projects_validate() {
    let temp = TempDir::new().unwrap();
    forge(temp.path())
        .args(["init", "--kind", "service", "--from", "python", "--name", "api"])
        .assert()
        .success();

    forge(temp.path())
        .args(["validate", "api"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));
}

#[test]
fn default_command_project_validates() {
    let temp = TempDir::new().unwrap();
    forge(temp.path())
        .args(["init", "--name", "tool"])
        .assert()
        .success();

    forge(temp.path())
        .args(["validate", "tool"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));
}

#[test]
fn descriptions_with_yaml_and_json_syntax_survive_init() {
    let description = r#"deploy: the "app" # now"#;
    let temp = TempDir::new().unwrap();
    forge(temp.path())
        .args(["init", "--name", "tool", "--description", description])
        .assert()
        .success();

    forge(temp.path())
        .args(["validate", "tool", "--output-format", "json"])
        .assert()
        .success();

    let package = fs::read_to_string(temp.path().join("tool/package.json")).unwrap();
    let package: serde_json::Value = serde_json::from_str(&package).unwrap();
    assert_eq!(package["description"], description);
}

#[test]
fn validate_lists_every_problem() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("ops.yml"),
        "services:\n  - name: api:1.0.0\n    domain: https://bad\n    env:\n      - \"=nokey\"\n",
    )
    .unwrap();

    forge(temp.path())
        .arg("validate")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("problem(s)"))
        .stderr(predicate::str::contains("https://bad"))
        .stderr(predicate::str::contains("=nokey"));
}

#[test]
fn validate_json_output() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("ops.yml"),
        "ops:\n  - name: legacy\n    description: old\n    run: ./run.sh\n    public: true\n",
    )
    .unwrap();

    let out = forge(temp.path())
        .args(["--output-format", "json", "validate", "ops.yml"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(report["valid"], true);
    assert_eq!(report["items"]["command"][0], "legacy:0.1.0");
    assert_eq!(report["warnings"].as_array().unwrap().len(), 2);
}

#[test]
fn list_json_has_all_builtins() {
    let temp = TempDir::new().unwrap();
    let out = forge(temp.path())
        .args(["list", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let templates: Vec<serde_json::Value> = serde_json::from_slice(&out).unwrap();
    assert_eq!(templates.len(), 8);
    assert!(templates.iter().any(|t| t["id"] == "service/golang"));
}

#[test]
fn list_prefers_local_templates() {
    let temp = TempDir::new().unwrap();
    let local = temp.path().join("templates/command/bash");
    fs::create_dir_all(&local).unwrap();
    fs::write(local.join("ops.yml"), "commands: []\n").unwrap();
    fs::write(local.join("main.sh"), "echo {{pkg}}\n").unwrap();
    fs::write(
        temp.path().join("forge.toml"),
        format!("[templates]\nlocal_path = {:?}\n", temp.path().join("templates")),
    )
    .unwrap();

    forge(temp.path())
        .args(["list", "--format", "csv", "--kind", "command"])
        .assert()
        .success()
        .stdout(predicate::str::contains("command/bash,command,bash,2,true"));
}

#[test]
fn config_get_reads_environment_overrides() {
    let temp = TempDir::new().unwrap();
    forge(temp.path())
        .env("FORGE_SERVICE__PORT", "9090")
        .args(["config", "get", "service.port"])
        .assert()
        .success()
        .stdout(predicate::str::diff("9090\n"));
}

#[test]
fn config_init_creates_the_named_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested/forge.toml");

    Command::cargo_bin("forge")
        .unwrap()
        .env("NO_COLOR", "1")
        .args(["--config", path.to_str().unwrap(), "config", "init"])
        .assert()
        .success();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("port = 8080"), "{written}");
}

#[test]
fn config_init_keeps_an_existing_file_without_force() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("forge.toml");
    fs::write(&config, "# mine\n").unwrap();

    forge(temp.path()).args(["config", "init"]).assert().success();
    assert_eq!(fs::read_to_string(&config).unwrap(), "# mine\n");

    forge(temp.path())
        .args(["config", "init", "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&config).unwrap().contains("[service]"));
}

#[test]
fn serve_fails_when_the_port_is_taken() {
    let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = taken.local_addr().unwrap().port();
    let temp = TempDir::new().unwrap();

    forge(temp.path())
        .env("FORGE_SERVICE__HOST", "127.0.0.1")
        .args(["serve", "--port", &port.to_string()])
        .assert()
        .failure()
        .code(4)
        .stdout(predicate::str::diff("starting the server\n"));
}

#[test]
fn shell_completions() {
    let temp = TempDir::new().unwrap();
    forge(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("complete"));
}
