//! End-to-end subcommand tests against local fixtures

use std::path::Path;
use std::process::{Command, Output};

use id3::{Tag, TagLike};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn publisher_bin(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_podcast-publisher"));
    for var in [
        "DEBUG", "FILE", "TITLE", "ARTIST", "ALBUM", "IMAGE", "RE_EPISODE", "PAGE_URL",
        "POSTS_LOCATION", "EDITOR", "REPO_LOCATION", "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("CONFIG", dir.join("config.toml"));
    cmd
}

async fn run(mut cmd: Command) -> Output {
    tokio::task::spawn_blocking(move || cmd.output().expect("Failed to execute command"))
        .await
        .unwrap()
}

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .unwrap();
    assert!(status.success(), "git {:?} failed", args);
}

#[tokio::test(flavor = "multi_thread")]
async fn prep_creates_post_for_next_episode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<a href=\"/media/ump_podcast571.mp3\">571</a>\n<a href=\"/media/ump_podcast570.mp3\">570</a>\n",
        ))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let posts = dir.path().join("content").join("posts");
    let mut cmd = publisher_bin(dir.path());
    cmd.args(["prep", "--editor", "", "--page-url"])
        .arg(format!("{}/", server.uri()))
        .arg("--posts-location")
        .arg(&posts);

    let output = run(cmd).await;

    assert!(
        output.status.success(),
        "prep failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let post = std::fs::read_to_string(posts.join("podcast-572.md")).unwrap();
    assert!(post.contains("UWP - Выпуск 572"));
    assert!(post.contains("ump_podcast572.mp3"));
}

#[tokio::test(flavor = "multi_thread")]
async fn prep_fails_on_bad_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut cmd = publisher_bin(dir.path());
    cmd.args(["prep", "--editor", "", "--page-url"])
        .arg(server.uri())
        .arg("--posts-location")
        .arg(dir.path());

    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid status code 500"));
}

#[tokio::test]
async fn mp3_tags_file_from_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[mp3]\ntitle = \"Radio-T\"\nartist = \"Umputun, Bobuk\"\n",
    )
    .unwrap();
    let file = dir.path().join("ump_podcast42.mp3");
    std::fs::write(&file, [0xFFu8, 0xFB, 0x90, 0x64, 0, 0, 0, 0]).unwrap();

    let mut cmd = publisher_bin(dir.path());
    cmd.args(["mp3", "--album", "Weekly"]).arg("--file").arg(&file);
    let output = run(cmd).await;

    assert!(
        output.status.success(),
        "mp3 failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let tag = Tag::read_from_path(&file).unwrap();
    assert_eq!(tag.title(), Some("Radio-T 42"));
    assert_eq!(tag.artist(), Some("Umputun, Bobuk"));
    assert_eq!(tag.album(), Some("Weekly"));
    assert_eq!(tag.genre(), Some("Podcast"));
    assert_eq!(tag.pictures().count(), 1);
}

#[tokio::test]
async fn git_commits_and_pushes_changes() {
    if !git_available() {
        eprintln!("Skipping test: git not installed");
        return;
    }

    let dir = TempDir::new().unwrap();
    let remote = dir.path().join("remote.git");
    let work = dir.path().join("work");
    git(dir.path(), &["init", "--quiet", "--bare", remote.to_str().unwrap()]);
    git(dir.path(), &["clone", "--quiet", remote.to_str().unwrap(), work.to_str().unwrap()]);
    git(&work, &["config", "user.email", "publisher@example.com"]);
    git(&work, &["config", "user.name", "Publisher"]);
    std::fs::write(work.join("README.md"), "site\n").unwrap();
    git(&work, &["add", "."]);
    git(&work, &["commit", "--quiet", "-m", "init"]);
    git(&work, &["push", "--quiet", "-u", "origin", "HEAD"]);

    std::fs::write(work.join("podcast-5.md"), "+++\n").unwrap();

    let mut cmd = publisher_bin(dir.path());
    cmd.args(["git", "--repo-location"]).arg(&work);
    let output = run(cmd).await;

    assert!(
        output.status.success(),
        "git failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("podcast-5.md"));

    let log = Command::new("git")
        .args(["log", "-1", "--format=%s"])
        .current_dir(&work)
        .output()
        .unwrap();
    assert!(String::from_utf8_lossy(&log.stdout).starts_with("auto-update "));
}

#[cfg(unix)]
#[tokio::test]
async fn git_push_failure_still_lists_pending_changes() {
    use std::os::unix::fs::PermissionsExt;

    if !git_available() {
        eprintln!("Skipping test: git not installed");
        return;
    }

    let dir = TempDir::new().unwrap();
    let remote = dir.path().join("remote.git");
    let work = dir.path().join("work");
    git(dir.path(), &["init", "--quiet", "--bare", remote.to_str().unwrap()]);
    git(dir.path(), &["clone", "--quiet", remote.to_str().unwrap(), work.to_str().unwrap()]);
    git(&work, &["config", "user.email", "publisher@example.com"]);
    git(&work, &["config", "user.name", "Publisher"]);
    std::fs::write(work.join("README.md"), "site\n").unwrap();
    git(&work, &["add", "."]);
    git(&work, &["commit", "--quiet", "-m", "init"]);
    git(&work, &["push", "--quiet", "-u", "origin", "HEAD"]);

    let hook = remote.join("hooks").join("pre-receive");
    std::fs::write(&hook, "#!/bin/sh\nexit 1\n").unwrap();
    std::fs::set_permissions(&hook, std::fs::Permissions::from_mode(0o755)).unwrap();

    std::fs::write(work.join("podcast-6.md"), "+++\n").unwrap();

    let mut cmd = publisher_bin(dir.path());
    cmd.args(["git", "--repo-location"]).arg(&work);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("podcast-6.md"), "Expected pending change, got: {}", stderr);
    assert!(stderr.contains("error pushing changes"));
}
