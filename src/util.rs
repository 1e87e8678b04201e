// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Utilities for paths, git subprocesses, date labels, output writing and man page rendering
// role: utilities/helpers
// inputs: Various primitives; DateTime strings; paths; clap CommandFactory
// outputs: Canonicalized paths, git stdout, formatted dates, man page text
// side_effects: run_git invokes subprocesses; write_output writes files or stdout
// invariants:
// - run_git surfaces the git args and stderr on failure
// - format_fallback_date never panics; unparseable input is returned unchanged
// errors: run_git returns VcsError; IO errors bubble with context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::CommandFactory;
use tokio::process::Command;

use crate::error::{VcsError, VcsResult};

pub fn canonicalize_lossy<P: AsRef<Path>>(p: P) -> String {
  let p = p.as_ref();
  let pb: PathBuf = match std::fs::canonicalize(p) {
    Ok(x) => x,
    Err(_) => match std::env::current_dir() {
      Ok(cwd) => cwd.join(p),
      Err(_) => PathBuf::from(p),
    },
  };
  pb.to_string_lossy().to_string()
}

pub async fn run_git(repo: &str, args: &[String]) -> VcsResult<String> {
  tracing::trace!(repo, ?args, "git");
  let out = Command::new("git")
    .args(args)
    .current_dir(repo)
    .output()
    .await
    .map_err(|source| VcsError::GitSpawn { args: args.to_vec(), source })?;

  if out.status.success() {
    Ok(String::from_utf8_lossy(&out.stdout).to_string())
  } else {
    Err(VcsError::GitFailed {
      args: args.to_vec(),
      stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
    })
  }
}

/// Generates a short 12-character SHA from a full one.
pub fn short_sha(full: &str) -> String {
  full.chars().take(12).collect()
}

/// Formats an RFC3339 / ISO-8601 commit date as `DD/MM` for announcement headers.
pub fn format_fallback_date(iso: &str) -> String {
  match chrono::DateTime::parse_from_rfc3339(iso.trim()) {
    Ok(dt) => dt.format("%d/%m").to_string(),
    Err(_) => iso.trim().to_string(),
  }
}

/// Write `text` to stdout when `out` is "-", otherwise to the file at `out` (parents created).
pub fn write_output(out: &str, text: &str) -> Result<()> {
  if out == "-" {
    println!("{}", text);
    return Ok(());
  }
  let path = Path::new(out);
  if let Some(parent) = path.parent() {
    if !parent.as_os_str().is_empty() {
      std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
  }
  std::fs::write(path, format!("{}\n", text)).with_context(|| format!("writing {}", path.display()))?;
  Ok(())
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
/// Returns the troff content as a UTF-8 string.
pub fn render_man_page<T: CommandFactory>() -> anyhow::Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
