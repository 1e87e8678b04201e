// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Discover release branches and pick the latest releases, behind an explicit cache object
// role: release-branch discovery
// inputs: remote-tracking branch names (most recent first)
// outputs: ReleaseBranch list; LatestReleases selection
// side_effects: GitBranches runs git for-each-ref
// invariants:
// - only origin/release/* branches (not ending in '/') are considered
// - fallback branches are never selected as most recent / second most recent
// - the cache is owned by the caller; invalidate() forces the next get() to reload
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::Serialize;
use tracing::debug;

use crate::error::VcsResult;
use crate::gitio::{self, GitCli};
use crate::model::{ReleaseBranch, ReleaseNumber};

pub const DEFAULT_LIMIT: usize = 100;

#[allow(async_fn_in_trait)]
pub trait BranchSource {
  /// Remote-tracking branch names, most recently committed first.
  async fn branch_names(&self) -> VcsResult<Vec<String>>;
}

/// Remote-tracking branches as currently known to the local repository.
pub struct GitBranches<'a> {
  pub git: &'a GitCli,
}

impl BranchSource for GitBranches<'_> {
  async fn branch_names(&self) -> VcsResult<Vec<String>> {
    gitio::remote_branches(&self.git.repo).await
  }
}

/// Keep release branches only, strip the `origin/` prefix, cap at `limit`.
pub fn release_branch_names(names: &[String], limit: usize) -> Vec<String> {
  names
    .iter()
    .map(|l| l.trim())
    .filter(|l| !l.is_empty())
    .filter(|l| l.to_lowercase().contains("origin/release") && !l.ends_with('/'))
    .take(limit)
    .map(|l| l.strip_prefix("origin/").unwrap_or(l).to_string())
    .collect()
}

/// Parse `release/<major>/<minor>/<patch>-<rest>` into its version parts.
pub fn parse_release_branch(branch_name: &str) -> Option<ReleaseBranch> {
  let folders: Vec<&str> = branch_name.split('/').collect();
  if folders.len() < 4 {
    return None;
  }
  let leaf = folders[folders.len() - 1];
  let patch = leaf.split('-').next().unwrap_or("");
  if patch.is_empty() {
    return None;
  }
  Some(ReleaseBranch {
    branch_name: branch_name.to_string(),
    release_number: ReleaseNumber {
      major: folders[1].to_string(),
      minor: folders[2].to_string(),
      patch: patch.to_string(),
    },
    fallback: branch_name.to_lowercase().contains("fallback"),
  })
}

#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct LatestReleases {
  pub most_recent: Option<ReleaseBranch>,
  pub second_most_recent: Option<ReleaseBranch>,
  pub other: Vec<ReleaseBranch>,
}

pub fn latest_releases(releases: &[ReleaseBranch]) -> LatestReleases {
  let mut regular = releases.iter().filter(|r| !r.fallback);
  let most_recent = regular.next().cloned();
  let second_most_recent = regular.next().cloned();
  // Both slots must be filled before anything counts as "other".
  let other = if second_most_recent.is_some() { regular.cloned().collect() } else { Vec::new() };
  LatestReleases { most_recent, second_most_recent, other }
}

/// Release branches resolved once per caller, with explicit refresh/invalidate.
#[derive(Debug, Default)]
pub struct ReleaseBranchCache {
  limit: usize,
  branches: Option<Vec<ReleaseBranch>>,
}

impl ReleaseBranchCache {
  pub fn new(limit: usize) -> Self {
    Self { limit, branches: None }
  }

  /// Drop the cached listing, e.g. after a fetch moved the remote refs.
  pub fn invalidate(&mut self) {
    self.branches = None;
  }

  /// Cached branches, loading from `source` on first use.
  pub async fn get<S: BranchSource>(&mut self, source: &S) -> VcsResult<&[ReleaseBranch]> {
    if self.branches.is_none() {
      self.refresh(source).await?;
    }
    Ok(self.branches.as_deref().unwrap_or(&[]))
  }

  /// Reload from `source` regardless of cache state.
  pub async fn refresh<S: BranchSource>(&mut self, source: &S) -> VcsResult<&[ReleaseBranch]> {
    let names = source.branch_names().await?;
    let parsed: Vec<ReleaseBranch> =
      release_branch_names(&names, self.limit).iter().filter_map(|n| parse_release_branch(n)).collect();
    debug!(total = names.len(), releases = parsed.len(), "loaded release branches");
    self.branches = Some(parsed);
    Ok(self.branches.as_deref().unwrap_or(&[]))
  }
}
