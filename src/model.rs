// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define the data model (commits, ticket/train records, announcement inputs, release branches)
// role: model/types
// outputs: Serializable structs and the HistoryRecord sum type consumed by classify/aggregate/render
// invariants:
// - TicketRecord.ticket always matches [A-Z]+-[0-9]{2,} and is never empty
// - TicketRecord keeps the key's original case; upper-casing happens only when counting unique keys
// - HistoryRecord is either a standalone ticket or a train; never both
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::{Deserialize, Serialize};

/// One history entry as returned by the VCS collaborator.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Commit {
  pub hash: String,
  pub date: String,
  pub message: String,
  pub body: String,
  pub author_name: String,
  pub author_email: String,
}

/// A ticket reference extracted from free text.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TicketRecord {
  pub ticket: String,
  pub message: String,
}

impl TicketRecord {
  pub fn new(ticket: impl Into<String>, message: impl Into<String>) -> Self {
    Self { ticket: ticket.into(), message: message.into() }
  }
}

/// A QA-train or release-train commit and the tickets listed in its body.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TrainRecord {
  pub train: String,
  pub tickets: Vec<TicketRecord>,
}

impl TrainRecord {
  /// First line of the train label (labels are single-line in practice, but bodies are not trusted).
  pub fn headline(&self) -> &str {
    self.train.lines().next().unwrap_or("")
  }
}

/// One element of the aggregated history.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HistoryRecord {
  Ticket(TicketRecord),
  Train(TrainRecord),
}

impl From<TicketRecord> for HistoryRecord {
  fn from(t: TicketRecord) -> Self {
    HistoryRecord::Ticket(t)
  }
}

impl From<TrainRecord> for HistoryRecord {
  fn from(t: TrainRecord) -> Self {
    HistoryRecord::Train(t)
  }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ReleaseAnnouncementInput {
  pub release_name: String,
  pub version: String,
  pub beta_version: u32,
  pub release_description: String,
  pub jira_tickets: Vec<HistoryRecord>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub pull_request_number: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub approved_by: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LiveVersion {
  pub version: String,
  pub release_name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FallbackVersion {
  pub version: String,
  pub release_name: String,
  pub sha: String,
  pub date: String,
  pub jira_tickets: Vec<TicketRecord>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FallbackAnnouncementInput {
  pub live_version: LiveVersion,
  pub fallback_version: FallbackVersion,
}

/// Version parts encoded in a release branch name (`release/<major>/<minor>/<patch>-...`).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ReleaseNumber {
  pub major: String,
  pub minor: String,
  pub patch: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ReleaseBranch {
  pub branch_name: String,
  pub release_number: ReleaseNumber,
  pub fallback: bool,
}
