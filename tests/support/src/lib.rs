//! test-support: helpers for CLI integration tests.
//!
//! Add as a dev-dependency in your top-level `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test_support = { path = "tests/support" }
//! ```
//!
//! Then in tests:
//! ```rust,no_run
//! use test_support::{init_tracing, init_fixture_repo};
//!
//! init_tracing();
//! let repo = init_fixture_repo();
//! assert!(repo.path().join(".git").exists());
//! ```

use once_cell::sync::Lazy;
use tracing_subscriber::{fmt, EnvFilter};

use std::path::Path;
use std::process::Command;

/// Author/committer dates of the fixture commits, oldest first.
pub const FIXTURE_DATES: [&str; 5] = [
  "2023-01-30T10:00:00+00:00",
  "2023-02-01T09:00:00+00:00",
  "2023-02-02T09:00:00+00:00",
  "2023-02-03T09:00:00+00:00",
  "2023-02-04T09:00:00+00:00",
];

/// Initialize `tracing` once, honoring `RUST_LOG` and writing via the test writer.
///
/// Safe to call from multiple tests; only the first call configures the global subscriber.
pub fn init_tracing() {
  static INIT: Lazy<()> = Lazy::new(|| {
    let filter = EnvFilter::try_from_default_env()
      .or_else(|_| EnvFilter::try_new("warn,test=info"))
      .unwrap();
    // with_test_writer() causes logs to appear alongside failing tests only (cargo/nextest)
    let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
  });
  Lazy::force(&INIT);
}

/// Run a binary target with `assert_cmd`, returning the ready-to-run `Command`.
pub fn cmd_bin(bin: &str) -> assert_cmd::Command {
  init_tracing();
  assert_cmd::Command::cargo_bin(bin).expect("binary target not found")
}

pub fn run(repo: &Path, args: &[&str]) {
  let status = Command::new("git").args(args).current_dir(repo).status().unwrap();
  assert!(status.success(), "git {:?} failed", args);
}

/// Commit everything in the work tree with a subject, optional body and fixed dates.
pub fn commit(repo: &Path, file: &str, subject: &str, body: Option<&str>, date: &str) {
  std::fs::write(repo.join(file), format!("{subject}\n")).unwrap();
  run(repo, &["add", "."]);

  let mut cmd = Command::new("git");
  cmd.args(["commit", "-q", "-m", subject]);
  if let Some(b) = body {
    cmd.args(["-m", b]);
  }
  let status = cmd
    .current_dir(repo)
    .env("TZ", "UTC")
    .env("GIT_AUTHOR_DATE", date)
    .env("GIT_COMMITTER_DATE", date)
    .status()
    .unwrap();
  assert!(status.success(), "git commit {:?} failed", subject);
}

/// Build a throwaway repository shaped like a release history:
///
/// ```text
/// v2.1.30  chore: initial release            (origin/release/2/1/30-BEMA-600-JAN2023)
///          BEMA-701: UI fix
///          Merged in qa/2.1.33 (pull request #12)   QA Train 2.1.33, BEMA-702, BEMA-703
///          🚅 FEB2023 v2.1.33 Beta 1 UAT Train      BEMA-701
/// main     chore: tidy                        (origin/release/2/1/33-BEMA-701-FEB2023-UIFixes)
/// ```
pub fn init_fixture_repo() -> tempfile::TempDir {
  let dir = tempfile::TempDir::new().unwrap();
  let repo = dir.path();

  run(repo, &["init", "-q", "-b", "main"]);
  run(repo, &["config", "user.name", "Fixture Bot"]);
  run(repo, &["config", "user.email", "fixture@example.com"]);
  run(repo, &["config", "commit.gpgsign", "false"]);

  commit(repo, "CHANGELOG", "chore: initial release", None, FIXTURE_DATES[0]);
  run(repo, &["tag", "v2.1.30"]);
  run(repo, &["update-ref", "refs/remotes/origin/release/2/1/30-BEMA-600-JAN2023", "HEAD"]);

  commit(repo, "ui.txt", "BEMA-701: UI fix", None, FIXTURE_DATES[1]);
  commit(
    repo,
    "qa.txt",
    "Merged in qa/2.1.33 (pull request #12)",
    Some("QA Train 2.1.33\nBEMA-702: Login\nBEMA-703 - Cart"),
    FIXTURE_DATES[2],
  );
  commit(
    repo,
    "release.txt",
    "🚅 FEB2023 v2.1.33 Beta 1 UAT Train",
    Some("BEMA-701: UI fix"),
    FIXTURE_DATES[3],
  );
  commit(repo, "tidy.txt", "chore: tidy", None, FIXTURE_DATES[4]);
  run(repo, &["update-ref", "refs/remotes/origin/release/2/1/33-BEMA-701-FEB2023-UIFixes", "HEAD"]);

  dir
}
