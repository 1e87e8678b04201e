// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Orchestrate each subcommand: aggregate history, render announcements, list release branches
// role: processing/orchestrator
// inputs: EffectiveConfig (task, repo, format, out)
// outputs: Announcement text or JSON written to stdout or --out
// side_effects: Runs git; may fetch origin (release-branches, failures only warn); writes --out file
// invariants:
// - text output is exactly the rendered announcement; JSON wraps it with the data it was rendered from
// - VCS failures surface with the command context attached, never swallowed
// errors: anyhow with context; InvalidRange keeps its message in the chain
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Context, Result};
use tracing::{info, info_span, warn, Instrument};

use crate::aggregate::get_trains_and_tickets;
use crate::branches::{latest_releases, GitBranches, LatestReleases, ReleaseBranchCache};
use crate::cli::{EffectiveConfig, OutputFormat, Task};
use crate::gitio::{self, GitCli};
use crate::model::ReleaseBranch;
use crate::params::{build_fallback_input, build_release_input, FallbackParams, ReleaseParams};
use crate::render::{render_fallback_announcement, render_release_build_announcement, unique_ticket_keys};
use crate::util::{format_fallback_date, write_output};

pub async fn run(cfg: &EffectiveConfig) -> Result<()> {
  let git = GitCli::new(cfg.repo.clone());
  let payload = match &cfg.task {
    Task::ReleaseMessage { .. } => release_message(cfg, &git).instrument(info_span!("release-message")).await?,
    Task::FallbackMessage { .. } => fallback_message(cfg, &git).instrument(info_span!("fallback-message")).await?,
    Task::ReleaseBranches { .. } => release_branches(cfg, &git).instrument(info_span!("release-branches")).await?,
  };
  write_output(&cfg.out, &payload)
}

fn to_json(v: &serde_json::Value) -> Result<String> {
  Ok(serde_json::to_string_pretty(v)?)
}

pub async fn release_message(cfg: &EffectiveConfig, git: &GitCli) -> Result<String> {
  let Task::ReleaseMessage { release_name, description, version, beta_build, from, to, pull_request, approved_by } =
    &cfg.task
  else {
    anyhow::bail!("release_message called for {:?}", cfg.task);
  };

  let history = get_trains_and_tickets(git, from, to)
    .await
    .with_context(|| format!("collecting tickets between {} and {}", from, to))?;

  let params = ReleaseParams {
    release_name,
    description,
    version,
    beta_build: *beta_build,
    pull_request: pull_request.as_deref(),
    approved_by,
  };
  let input = build_release_input(&params, history);
  let text = render_release_build_announcement(&input);
  info!(records = input.jira_tickets.len(), "rendered release announcement");

  match cfg.format {
    OutputFormat::Text => Ok(text),
    OutputFormat::Json => to_json(&serde_json::json!({
      "announcement": text,
      "unique_tickets": unique_ticket_keys(&input.jira_tickets),
      "input": input,
    })),
  }
}

pub async fn fallback_message(cfg: &EffectiveConfig, git: &GitCli) -> Result<String> {
  let Task::FallbackMessage {
    from,
    to,
    live_version,
    fallback_version,
    live_release_name,
    fallback_release_name,
    date,
  } = &cfg.task
  else {
    anyhow::bail!("fallback_message called for {:?}", cfg.task);
  };

  let sha = gitio::rev_parse(&git.repo, to).await.with_context(|| format!("resolving fallback target {}", to))?;
  let date = match date {
    Some(d) => d.clone(),
    None => format_fallback_date(&gitio::commit_date(&git.repo, &sha).await?),
  };

  // Everything that differs between the fallback target and the live release gets rolled back.
  let history = get_trains_and_tickets(git, to, from)
    .await
    .with_context(|| format!("collecting tickets between {} and {}", to, from))?;

  let params = FallbackParams {
    live_version,
    live_release_name,
    fallback_version,
    fallback_release_name,
    sha: &sha,
    date: &date,
  };
  let input = build_fallback_input(&params, &history);
  let text = render_fallback_announcement(&input);
  info!(tickets = input.fallback_version.jira_tickets.len(), "rendered fallback announcement");

  match cfg.format {
    OutputFormat::Text => Ok(text),
    OutputFormat::Json => to_json(&serde_json::json!({ "announcement": text, "input": input })),
  }
}

fn describe(branch: &ReleaseBranch) -> String {
  let n = &branch.release_number;
  let mut s = format!("{} ({}.{}.{})", branch.branch_name, n.major, n.minor, n.patch);
  if branch.fallback {
    s.push_str(" [fallback]");
  }
  s
}

pub fn render_branch_listing(releases: &[ReleaseBranch], latest: &LatestReleases) -> String {
  let mut lines = Vec::new();
  let slot = |b: &Option<ReleaseBranch>| b.as_ref().map(describe).unwrap_or_else(|| "none".to_string());
  lines.push(format!("Most recent release: {}", slot(&latest.most_recent)));
  lines.push(format!("Second most recent release: {}", slot(&latest.second_most_recent)));
  lines.push(String::new());
  lines.push(format!("Release branches ({})", releases.len()));
  lines.extend(releases.iter().map(|b| format!("- {}", describe(b))));
  lines.join("\n")
}

pub async fn release_branches(cfg: &EffectiveConfig, git: &GitCli) -> Result<String> {
  let Task::ReleaseBranches { limit, fetch } = &cfg.task else {
    anyhow::bail!("release_branches called for {:?}", cfg.task);
  };

  let mut cache = ReleaseBranchCache::new(*limit);
  let source = GitBranches { git };
  cache.get(&source).await.context("listing release branches")?;
  if *fetch {
    match gitio::fetch(&git.repo, "origin").await {
      Ok(()) => cache.invalidate(),
      // Offline or no remote: the local remote-tracking refs are still a usable listing.
      Err(e) => warn!(error = %e, "fetch failed; listing local remote-tracking branches"),
    }
  }
  let releases = cache.get(&source).await.context("listing release branches")?.to_vec();
  let latest = latest_releases(&releases);

  match cfg.format {
    OutputFormat::Text => Ok(render_branch_listing(&releases, &latest)),
    OutputFormat::Json => to_json(&serde_json::json!({ "releases": releases, "latest": latest })),
  }
}
