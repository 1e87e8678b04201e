use predicates::prelude::*;

#[test]
fn lists_release_branches_newest_first() {
  let repo = test_support::init_fixture_repo();
  let repo_path = repo.path().to_str().unwrap();

  test_support::cmd_bin("git-release-message")
    .args(["--repo", repo_path, "release-branches", "--no-fetch"])
    .assert()
    .success()
    .stdout(predicate::str::starts_with(
      "Most recent release: release/2/1/33-BEMA-701-FEB2023-UIFixes (2.1.33)\n\
       Second most recent release: release/2/1/30-BEMA-600-JAN2023 (2.1.30)\n\n\
       Release branches (2)\n",
    ));
}

#[test]
fn json_listing_has_latest_selection() {
  let repo = test_support::init_fixture_repo();
  let repo_path = repo.path().to_str().unwrap();

  let out = test_support::cmd_bin("git-release-message")
    .args(["--repo", repo_path, "--format", "json", "release-branches", "--no-fetch", "--limit", "1"])
    .output()
    .unwrap();
  assert!(out.status.success());
  let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
  assert_eq!(v["releases"].as_array().unwrap().len(), 1);
  assert_eq!(v["latest"]["most_recent"]["release_number"]["patch"], "33");
  assert!(v["latest"]["second_most_recent"].is_null());
}

#[test]
fn failed_fetch_falls_back_to_local_refs() {
  let repo = test_support::init_fixture_repo();
  let repo_path = repo.path().to_str().unwrap();

  // The fixture has remote-tracking refs but no configured `origin`, so the fetch fails.
  test_support::cmd_bin("git-release-message")
    .env_remove("RUST_LOG")
    .args(["--repo", repo_path, "release-branches"])
    .assert()
    .success()
    .stdout(predicate::str::starts_with(
      "Most recent release: release/2/1/33-BEMA-701-FEB2023-UIFixes (2.1.33)\n",
    ))
    .stderr(predicate::str::contains("fetch failed"));
}
