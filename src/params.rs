use crate::aggregate::tickets_only;
use crate::model::{
  FallbackAnnouncementInput, FallbackVersion, HistoryRecord, LiveVersion, ReleaseAnnouncementInput,
};

pub struct ReleaseParams<'a> {
  pub release_name: &'a str,
  pub description: &'a str,
  pub version: &'a str,
  pub beta_build: u32,
  pub pull_request: Option<&'a str>,
  pub approved_by: &'a [String],
}

pub fn build_release_input(p: &ReleaseParams, history: Vec<HistoryRecord>) -> ReleaseAnnouncementInput {
  ReleaseAnnouncementInput {
    release_name: p.release_name.to_string(),
    version: p.version.to_string(),
    beta_version: p.beta_build,
    release_description: p.description.to_string(),
    jira_tickets: history,
    pull_request_number: p.pull_request.map(str::to_string),
    approved_by: if p.approved_by.is_empty() { None } else { Some(p.approved_by.to_vec()) },
  }
}

pub struct FallbackParams<'a> {
  pub live_version: &'a str,
  pub live_release_name: &'a str,
  pub fallback_version: &'a str,
  pub fallback_release_name: &'a str,
  pub sha: &'a str,
  pub date: &'a str,
}

/// The rolled-back tickets are every ticket in the history, trains expanded.
pub fn build_fallback_input(p: &FallbackParams, history: &[HistoryRecord]) -> FallbackAnnouncementInput {
  FallbackAnnouncementInput {
    live_version: LiveVersion {
      version: p.live_version.to_string(),
      release_name: p.live_release_name.to_string(),
    },
    fallback_version: FallbackVersion {
      version: p.fallback_version.to_string(),
      release_name: p.fallback_release_name.to_string(),
      sha: p.sha.to_string(),
      date: p.date.to_string(),
      jira_tickets: tickets_only(history),
    },
  }
}
