use crate::error::{VcsError, VcsResult};
use crate::model::Commit;
use crate::util::run_git;

const FIELD_SEP: char = '\u{0}';
const RECORD_SEP: char = '\u{1e}';

/// The VCS range query the aggregator depends on.
#[allow(async_fn_in_trait)]
pub trait CommitSource {
  /// Every commit reachable from exactly one of `from` and `to` (symmetric difference), newest first.
  async fn commits_between(&self, from: &str, to: &str) -> VcsResult<Vec<Commit>>;
}

/// `CommitSource` backed by the `git` binary in a working copy.
#[derive(Debug, Clone)]
pub struct GitCli {
  pub repo: String,
}

impl GitCli {
  pub fn new(repo: impl Into<String>) -> Self {
    Self { repo: repo.into() }
  }
}

impl CommitSource for GitCli {
  async fn commits_between(&self, from: &str, to: &str) -> VcsResult<Vec<Commit>> {
    let args: Vec<String> = vec![
      "-c".into(), "log.showSignature=false".into(),
      "log".into(),
      "--no-color".into(),
      "--format=%H%x00%cI%x00%s%x00%B%x00%an%x00%ae%x1e".into(),
      format!("{}...{}", from, to),
      "--".into(),
    ];
    match run_git(&self.repo, &args).await {
      Ok(out) => Ok(parse_log(&out)),
      Err(e) if e.is_unknown_revision() => Err(VcsError::InvalidRange {
        from: from.to_string(),
        to: to.to_string(),
        detail: match e {
          VcsError::GitFailed { stderr, .. } => stderr,
          other => other.to_string(),
        },
      }),
      Err(e) => Err(e),
    }
  }
}

/// Parse `git log` output produced with NUL-separated fields and RS-terminated records.
pub fn parse_log(out: &str) -> Vec<Commit> {
  out
    .split(RECORD_SEP)
    .map(|r| r.trim_start_matches(['\n', '\r']))
    .filter(|r| !r.is_empty())
    .map(|r| {
      let parts: Vec<&str> = r.split(FIELD_SEP).collect();
      let get = |i: usize| -> String { parts.get(i).unwrap_or(&"").to_string() };
      Commit {
        hash: get(0),
        date: get(1),
        message: get(2),
        body: get(3).trim_end().to_string(),
        author_name: get(4),
        author_email: get(5).trim_end().to_string(),
      }
    })
    .collect()
}

pub async fn rev_parse(repo: &str, reference: &str) -> VcsResult<String> {
  let args: Vec<String> = vec!["rev-parse".into(), "--verify".into(), format!("{}^{{commit}}", reference)];
  let out = run_git(repo, &args).await?;
  Ok(out.trim().to_string())
}

/// Committer date of `sha` in strict ISO-8601.
pub async fn commit_date(repo: &str, sha: &str) -> VcsResult<String> {
  let args: Vec<String> = vec!["show".into(), "--no-patch".into(), "--format=%cI".into(), sha.into()];
  let out = run_git(repo, &args).await?;
  Ok(out.trim().to_string())
}

pub async fn fetch(repo: &str, remote: &str) -> VcsResult<()> {
  run_git(repo, &["fetch".into(), "--quiet".into(), "--prune".into(), remote.into()]).await?;
  Ok(())
}

/// Remote-tracking branch names (`origin/...`), most recently committed first.
pub async fn remote_branches(repo: &str) -> VcsResult<Vec<String>> {
  let args: Vec<String> = vec![
    "for-each-ref".into(),
    "--sort=-committerdate".into(),
    "--format=%(refname:short)".into(),
    "refs/remotes".into(),
  ];
  let out = run_git(repo, &args).await?;
  Ok(out.lines().map(|l| l.trim()).filter(|s| !s.is_empty()).map(|s| s.to_string()).collect())
}
