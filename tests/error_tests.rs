//! Error scenario integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn publisher_bin(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("podcast-publisher").unwrap();
    for var in [
        "DEBUG", "FILE", "USER", "HOST", "KEY", "RE_EPISODE", "IMAGE", "REPO_LOCATION", "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("CONFIG", config_dir.path().join("config.toml"));
    cmd
}

#[test]
fn mp3_missing_file() {
    let dir = TempDir::new().unwrap();

    publisher_bin(&dir)
        .args(["mp3", "--file", "/nonexistent/ump_podcast1.mp3"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn mp3_file_name_without_episode() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("interview.mp3");
    std::fs::write(&file, b"audio").unwrap();

    publisher_bin(&dir)
        .args(["mp3", "--file"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid file name"));
}

#[test]
fn mp3_pattern_without_group() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("ump_podcast3.mp3");
    std::fs::write(&file, b"audio").unwrap();

    publisher_bin(&dir)
        .args(["mp3", "--re-episode", r"ump_podcast\d+"])
        .arg("--file")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("mp3.re_episode"));
}

#[test]
fn malformed_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[deploy\nhost = ").unwrap();

    publisher_bin(&dir)
        .args(["git"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("configuration error"));
}

#[test]
fn deploy_missing_key() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("ump_podcast3.mp3");
    std::fs::write(&file, b"audio").unwrap();

    publisher_bin(&dir)
        .args(["deploy", "--key"])
        .arg(dir.path().join("id_rsa"))
        .arg("--file")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unable to read private key"));
}

#[test]
fn deploy_unparsable_key() {
    let dir = TempDir::new().unwrap();
    let key = dir.path().join("id_rsa");
    std::fs::write(&key, "-----BEGIN NONSENSE-----\n").unwrap();

    publisher_bin(&dir)
        .args(["deploy", "--file", "ump_podcast3.mp3", "--key"])
        .arg(&key)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unable to parse private key"));
}

#[test]
fn git_outside_repository() {
    let dir = TempDir::new().unwrap();

    publisher_bin(&dir)
        .args(["git", "--repo-location"])
        .arg(dir.path().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("error pulling changes"));
}
