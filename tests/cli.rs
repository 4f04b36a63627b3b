//! End-to-end tests for the `haul` binary.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn haul() -> Command {
    let mut cmd = cargo_bin_cmd!("haul");
    cmd.env_remove("HAUL_LOG");
    cmd
}

mod global {
    use super::*;

    #[test]
    fn prints_version() {
        for flag in ["version", "-v", "--version"] {
            haul()
                .arg(flag)
                .assert()
                .success()
                .stdout(predicate::str::contains(format!("v{}", env!("CARGO_PKG_VERSION"))));
        }
    }

    #[test]
    fn version_flag_wins_over_command() {
        haul()
            .args(["bundle", "--version"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("v"));
    }

    #[test]
    fn global_help_lists_commands() {
        haul()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("init"))
            .stdout(predicate::str::contains("start"))
            .stdout(predicate::str::contains("bundle"));
    }

    #[test]
    fn help_for_named_command() {
        haul()
            .args(["help", "bundle"])
            .assert()
            .success()
            .stdout(predicate::str::contains("haul bundle"))
            .stdout(predicate::str::contains("--bundle-output"));
    }

    #[test]
    fn trailing_help_flag_shows_command_help() {
        haul()
            .args(["start", "--port", "3000", "-h"])
            .assert()
            .success()
            .stdout(predicate::str::contains("haul start"))
            .stdout(predicate::str::contains("--port"));
    }

    #[test]
    fn retired_command_is_informational() {
        haul()
            .arg("run-ios")
            .assert()
            .success()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("not implemented"));
    }
}

mod dispatch {
    use super::*;

    #[test]
    fn no_arguments_runs_start_with_defaults() {
        haul()
            .assert()
            .success()
            .stdout(predicate::str::contains("http://localhost:8081"))
            .stdout(predicate::str::contains("minify: false"));
    }

    #[test]
    fn unknown_first_token_falls_back_to_start() {
        haul()
            .args(["--dev", "false", "--port", "9000"])
            .assert()
            .success()
            .stdout(predicate::str::contains("http://localhost:9000"))
            .stdout(predicate::str::contains("minify: true"));
    }

    #[test]
    fn bundle_derives_output_from_platform() {
        haul()
            .args(["bundle", "--platform", "ios"])
            .assert()
            .success()
            .stdout(predicate::str::contains("index.ios.bundle"));
    }

    #[test]
    fn camel_case_flags_are_accepted() {
        haul()
            .args(["bundle", "--platform", "android", "--bundleOutput", "out/app.bundle"])
            .assert()
            .success()
            .stdout(predicate::str::contains("out/app.bundle"))
            .stdout(predicate::str::contains("assets:    out"));
    }
}

mod failures {
    use super::*;

    #[test]
    fn missing_required_option() {
        haul()
            .arg("bundle")
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("--platform"))
            .stderr(predicate::str::contains("haul bundle"));
    }

    #[test]
    fn invalid_choice() {
        haul()
            .args(["bundle", "--platform", "windows"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("windows"))
            .stderr(predicate::str::contains("ios, android"));
    }

    #[test]
    fn malformed_value_is_an_execution_failure() {
        haul()
            .args(["start", "--port", "eighty"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Command 'haul start' failed"));
    }

    #[test]
    fn undeclared_flags_are_ignored() {
        haul()
            .args(["start", "--reset-cache", "--bogus", "1", "--no-dev"])
            .assert()
            .success()
            .stdout(predicate::str::contains("dev: false"))
            .stdout(predicate::str::contains("minify: true"))
            .stderr(predicate::str::contains("Usage").not());
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_argument_is_reported() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        haul()
            .arg("start")
            .arg(OsString::from_vec(vec![b'-', b'-', 0xff]))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Command 'haul' failed"))
            .stderr(predicate::str::contains("argument 2 is not valid UTF-8"));
    }
}

mod init {
    use super::*;

    #[test]
    fn writes_config_once() {
        let dir = TempDir::new().unwrap();

        haul()
            .current_dir(dir.path())
            .arg("init")
            .assert()
            .success()
            .stdout(predicate::str::contains("haul.config.json"));
        assert!(dir.path().join("haul.config.json").exists());

        haul()
            .current_dir(dir.path())
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("--force"));

        haul()
            .current_dir(dir.path())
            .args(["init", "--force", "true", "--entry", "app.js"])
            .assert()
            .success();
        let written = std::fs::read_to_string(dir.path().join("haul.config.json")).unwrap();
        assert!(written.contains("app.js"));
    }
}
