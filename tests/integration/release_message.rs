use predicates::prelude::*;

fn release_args<'a>(repo: &'a str, from: &'a str) -> Vec<&'a str> {
  vec![
    "--repo", repo,
    "release-message",
    "--release-name", "FEB2023",
    "--desc", "UI fixes",
    "--ver", "2.1.33",
    "--from", from,
    "--to", "main",
  ]
}

#[test]
fn renders_trains_and_tickets_from_history() {
  let repo = test_support::init_fixture_repo();
  let repo_path = repo.path().to_str().unwrap();

  let out = test_support::cmd_bin("git-release-message")
    .args(release_args(repo_path, "v2.1.30"))
    .output()
    .unwrap();
  assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

  let text = String::from_utf8(out.stdout).unwrap();
  insta::assert_snapshot!(text, @r"
  🚅 FEB2023 v2.1.33 Beta 1 UAT Train
  UI fixes

  Trains (2)
  - 🚅 FEB2023 v2.1.33 Beta 1 UAT Train
  - QA Train 2.1.33

  Tickets (3)
  - BEMA-701, BEMA-702, BEMA-703

  > 🚅 FEB2023 v2.1.33 Beta 1 UAT Train
  - - BEMA-701: UI fix

  > QA Train 2.1.33
  - - BEMA-702: Login
  - - BEMA-703: Cart

  - BEMA-701: UI fix
  ");
}

#[test]
fn pr_and_approvers_are_appended() {
  let repo = test_support::init_fixture_repo();
  let repo_path = repo.path().to_str().unwrap();

  let mut args = release_args(repo_path, "v2.1.30");
  args.extend(["--pr", "3558", "--approved-by", "alice", "--approved-by", "bob"]);
  test_support::cmd_bin("git-release-message")
    .args(args)
    .assert()
    .success()
    .stdout(predicate::str::contains(
      "- BEMA-701: UI fix\nMerged in staging (pull request #3558)\n\nApproved-by: alice\nbob",
    ));
}

#[test]
fn empty_range_reports_no_changes() {
  let repo = test_support::init_fixture_repo();
  let repo_path = repo.path().to_str().unwrap();

  test_support::cmd_bin("git-release-message")
    .args(release_args(repo_path, "main"))
    .assert()
    .success()
    .stdout(predicate::str::contains("No changes since last release"))
    .stdout(predicate::str::contains("Jira Tickets").not());
}

#[test]
fn json_output_carries_history() {
  let repo = test_support::init_fixture_repo();
  let repo_path = repo.path().to_str().unwrap();

  let mut args = release_args(repo_path, "v2.1.30");
  args.extend(["--format", "json"]);
  let out = test_support::cmd_bin("git-release-message").args(args).output().unwrap();
  assert!(out.status.success());

  let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
  assert!(v["announcement"].as_str().unwrap().starts_with("🚅 FEB2023 v2.1.33 Beta 1 UAT Train"));
  assert_eq!(v["unique_tickets"], serde_json::json!(["BEMA-701", "BEMA-702", "BEMA-703"]));
  let history = v["input"]["jira_tickets"].as_array().unwrap();
  assert_eq!(history.len(), 3);
  assert_eq!(history[0]["kind"], "train");
  assert_eq!(history[1]["train"], "QA Train 2.1.33");
  assert_eq!(history[2]["kind"], "ticket");
}

#[test]
fn writes_to_out_file() {
  let repo = test_support::init_fixture_repo();
  let repo_path = repo.path().to_str().unwrap();
  let out_dir = tempfile::TempDir::new().unwrap();
  let target = out_dir.path().join("notes/release.txt");

  let mut args = release_args(repo_path, "v2.1.30");
  args.extend(["--out", target.to_str().unwrap()]);
  test_support::cmd_bin("git-release-message")
    .args(args)
    .assert()
    .success()
    .stdout(predicate::str::is_empty());

  let written = std::fs::read_to_string(&target).unwrap();
  assert!(written.contains("Tickets (3)"));
}

#[test]
fn unknown_ref_fails_with_range_error() {
  let repo = test_support::init_fixture_repo();
  let repo_path = repo.path().to_str().unwrap();

  test_support::cmd_bin("git-release-message")
    .args(release_args(repo_path, "no-such-release"))
    .assert()
    .failure()
    .stderr(predicate::str::contains("cannot resolve history range no-such-release...main"));
}

#[test]
fn commits_only_on_from_side_are_included() {
  let repo = test_support::init_fixture_repo();
  let repo_path = repo.path().to_str().unwrap();

  // A hotfix branch cut from the previous release that never reached main.
  test_support::run(repo.path(), &["checkout", "-q", "-b", "hotfix", "v2.1.30"]);
  test_support::commit(repo.path(), "hotfix.txt", "BEMA-900: hotfix on master", None, "2023-02-05T09:00:00+00:00");
  test_support::run(repo.path(), &["checkout", "-q", "main"]);

  let out = test_support::cmd_bin("git-release-message")
    .args(release_args(repo_path, "hotfix"))
    .output()
    .unwrap();
  assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

  let text = String::from_utf8(out.stdout).unwrap();
  assert!(text.contains("Tickets (4)\n- BEMA-900, BEMA-701, BEMA-702, BEMA-703\n"), "got:\n{text}");
  assert!(text.contains("- BEMA-900: hotfix on master"));
}
