use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod aggregate;
mod branches;
mod classify;
mod cli;
mod commands;
mod error;
mod gitio;
mod model;
mod params;
mod patterns;
mod render;
mod util;

use crate::cli::{normalize, Cli};

fn init_tracing(verbose: bool) {
  let default = if verbose { "git_release_message=debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .try_init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  // Phase 1: normalize CLI
  let cfg = normalize(cli)?;
  tracing::debug!(config = ?cfg, "effective config");

  // Phase 2: run the selected command
  commands::run(&cfg).await
}
