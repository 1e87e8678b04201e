use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::branches::DEFAULT_LIMIT;
use crate::util;

static RE_VERSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)+$").unwrap());

#[derive(Parser, Debug)]
#[command(
    name = "git-release-message",
    version,
    about = "Generate release and fallback announcements from git history",
    long_about = None
)]
pub struct Cli {
  /// Path to a Git repository (default: current dir)
  #[arg(long, global = true, env = "RELEASE_MESSAGE_REPO", default_value = ".")]
  pub repo: PathBuf,

  /// Output format
  #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  pub format: OutputFormat,

  /// Output file (default stdout "-")
  #[arg(long, global = true, default_value = "-")]
  pub out: String,

  /// Verbose diagnostics on stderr (RUST_LOG overrides)
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  #[command(subcommand)]
  pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
  /// Generate the release announcement for the changes between two refs
  ReleaseMessage {
    /// Release name, e.g. FEB2023
    #[arg(long)]
    release_name: String,

    /// Short primary release description (e.g. Feature X, Bug Y)
    #[arg(long)]
    desc: String,

    /// New version number, e.g. 2.1.33
    #[arg(long)]
    ver: String,

    /// Beta build / RC number for this release (usually 1)
    #[arg(long, default_value_t = 1)]
    beta_build: u32,

    /// Existing release branch/sha without the new changes, e.g. origin/master
    #[arg(long)]
    from: String,

    /// Latest branch/sha with the new changes, e.g. origin/develop
    #[arg(long)]
    to: String,

    /// Pull request number the release was merged in
    #[arg(long)]
    pr: Option<String>,

    /// Approver name (repeatable)
    #[arg(long = "approved-by")]
    approved_by: Vec<String>,
  },

  /// Generate the fallback (rollback) announcement
  FallbackMessage {
    /// Live release branch/sha being rolled back
    #[arg(long)]
    from: String,

    /// Fallback target branch/sha
    #[arg(long)]
    to: String,

    /// Live version number, e.g. 2.1.34
    #[arg(long)]
    ver: String,

    /// Fallback target version number, e.g. 2.1.30
    #[arg(long)]
    fallback_ver: String,

    /// Live release name, e.g. FEB2023
    #[arg(long)]
    release_name: String,

    /// Fallback target release name, e.g. JAN2023
    #[arg(long)]
    release_to: String,

    /// Date label for the header (default: committer date of --to, DD/MM)
    #[arg(long)]
    date: Option<String>,
  },

  /// List release branches and the latest releases
  ReleaseBranches {
    /// Maximum number of release branches to consider
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    limit: usize,

    /// Skip `git fetch origin` before listing
    #[arg(long)]
    no_fetch: bool,
  },
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
  Text,
  Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum Task {
  ReleaseMessage {
    release_name: String,
    description: String,
    version: String,
    beta_build: u32,
    from: String,
    to: String,
    pull_request: Option<String>,
    approved_by: Vec<String>,
  },
  FallbackMessage {
    from: String,
    to: String,
    live_version: String,
    fallback_version: String,
    live_release_name: String,
    fallback_release_name: String,
    date: Option<String>,
  },
  ReleaseBranches {
    limit: usize,
    fetch: bool,
  },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EffectiveConfig {
  pub repo: String, // absolute path for stability
  pub format: OutputFormat,
  pub out: String,
  pub verbose: bool,
  pub task: Task,
}

fn require_ref(flag: &str, value: &str) -> Result<String> {
  let v = value.trim();
  if v.is_empty() {
    bail!("--{} must name a branch, tag or sha", flag);
  }
  Ok(v.to_string())
}

fn require_version(flag: &str, value: &str) -> Result<String> {
  let v = value.trim().trim_start_matches('v');
  if !RE_VERSION.is_match(v) {
    bail!("--{} must be a dotted version like 2.1.33 (got {:?})", flag, value);
  }
  Ok(v.to_string())
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  let command = match cli.command {
    Some(c) => c,
    None => bail!("Provide a subcommand: release-message | fallback-message | release-branches"),
  };

  let task = match command {
    Command::ReleaseMessage { release_name, desc, ver, beta_build, from, to, pr, approved_by } => {
      if beta_build == 0 {
        bail!("--beta-build starts at 1");
      }
      Task::ReleaseMessage {
        release_name: release_name.trim().to_string(),
        description: desc.trim().to_string(),
        version: require_version("ver", &ver)?,
        beta_build,
        from: require_ref("from", &from)?,
        to: require_ref("to", &to)?,
        pull_request: pr.map(|p| p.trim().trim_start_matches('#').to_string()).filter(|p| !p.is_empty()),
        approved_by: approved_by.into_iter().map(|a| a.trim().to_string()).filter(|a| !a.is_empty()).collect(),
      }
    }
    Command::FallbackMessage { from, to, ver, fallback_ver, release_name, release_to, date } => Task::FallbackMessage {
      from: require_ref("from", &from)?,
      to: require_ref("to", &to)?,
      live_version: require_version("ver", &ver)?,
      fallback_version: require_version("fallback-ver", &fallback_ver)?,
      live_release_name: release_name.trim().to_string(),
      fallback_release_name: release_to.trim().to_string(),
      date: date.map(|d| d.trim().to_string()).filter(|d| !d.is_empty()),
    },
    Command::ReleaseBranches { limit, no_fetch } => {
      if limit == 0 {
        bail!("--limit must be at least 1");
      }
      Task::ReleaseBranches { limit, fetch: !no_fetch }
    }
  };

  Ok(EffectiveConfig {
    repo: util::canonicalize_lossy(&cli.repo),
    format: cli.format,
    out: cli.out,
    verbose: cli.verbose,
    task,
  })
}
