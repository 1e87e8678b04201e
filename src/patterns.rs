// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Fixed text patterns for ticket extraction and commit-kind detection
// role: parsing/patterns
// inputs: commit subject and body text
// outputs: TicketRecord lists, CommitKind, QA train labels
// invariants:
// - extraction is global (every match, document order) and never emits an empty ticket key
// - release-train marker wins over QA-train markers
// - no matches is a valid result, never an error
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::model::TicketRecord;

pub const RELEASE_TRAIN_GLYPH: &str = "🚅";
pub const QA_TRAIN_GLYPH: &str = "🚂";

// Key, then any run of separators (space, colon, dash, brackets), then the rest of the line.
static RE_TICKET: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"([A-Z]+-[0-9]{2,})[ \t:\-\[\]()]*([^\r\n]*)").unwrap());

static RE_QA_TRAIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)QA Train [0-9.\-]+").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommitKind {
  Ticket,
  QaTrain,
  ReleaseTrain,
}

/// Extract every ticket reference in `text`, in document order, without deduplication.
pub fn find_ticket_references(text: &str) -> Vec<TicketRecord> {
  RE_TICKET
    .captures_iter(text)
    .filter_map(|caps| {
      let ticket = caps.get(1).map(|m| m.as_str()).filter(|t| !t.is_empty())?;
      let message = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
      Some(TicketRecord::new(ticket, message))
    })
    .collect()
}

/// All `QA Train <version>` labels in `text` (case-insensitive), in order.
pub fn qa_train_labels(text: &str) -> Vec<String> {
  RE_QA_TRAIN.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

pub fn is_release_train(message: &str, body: &str) -> bool {
  // The glyph has no case, but mirror the case-insensitive contract anyway.
  format!("{message}{body}").to_lowercase().contains(RELEASE_TRAIN_GLYPH)
}

/// The subject must mention a pull request and the body must mention a QA train.
pub fn is_qa_train(message: &str, body: &str) -> bool {
  let body_lc = body.to_lowercase();
  message.to_lowercase().contains("pull request")
    && (body_lc.contains("qa train") || body_lc.contains(QA_TRAIN_GLYPH))
}

pub fn classify_commit_kind(message: &str, body: &str) -> CommitKind {
  if is_release_train(message, body) {
    CommitKind::ReleaseTrain
  } else if is_qa_train(message, body) {
    CommitKind::QaTrain
  } else {
    CommitKind::Ticket
  }
}
