// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Classify a single commit as ticket / QA train / release train and extract its payload
// role: classification
// inputs: Commit (message + body)
// outputs: Classification (tickets list or one TrainRecord)
// invariants: pure; exactly one category per commit; malformed bodies yield empty payloads
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use crate::model::{Commit, HistoryRecord, TrainRecord, TicketRecord};
use crate::patterns::{classify_commit_kind, find_ticket_references, qa_train_labels, CommitKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
  Tickets(Vec<TicketRecord>),
  QaTrain(TrainRecord),
  ReleaseTrain(TrainRecord),
}

impl Classification {
  pub fn kind(&self) -> CommitKind {
    match self {
      Classification::Tickets(_) => CommitKind::Ticket,
      Classification::QaTrain(_) => CommitKind::QaTrain,
      Classification::ReleaseTrain(_) => CommitKind::ReleaseTrain,
    }
  }

  /// Number of ticket references carried by this classification.
  pub fn ticket_count(&self) -> usize {
    match self {
      Classification::Tickets(t) => t.len(),
      Classification::QaTrain(t) | Classification::ReleaseTrain(t) => t.tickets.len(),
    }
  }

  /// Flatten one level: tickets contribute individually, a train contributes one record.
  pub fn into_records(self) -> Vec<HistoryRecord> {
    match self {
      Classification::Tickets(tickets) => tickets.into_iter().map(HistoryRecord::Ticket).collect(),
      Classification::QaTrain(train) | Classification::ReleaseTrain(train) => vec![HistoryRecord::Train(train)],
    }
  }
}

pub fn classify_commit(commit: &Commit) -> Classification {
  let body = commit.body.as_str();
  match classify_commit_kind(&commit.message, body) {
    CommitKind::Ticket => Classification::Tickets(find_ticket_references(body)),
    CommitKind::QaTrain => Classification::QaTrain(TrainRecord {
      train: qa_train_labels(body).join(", "),
      tickets: find_ticket_references(body),
    }),
    CommitKind::ReleaseTrain => Classification::ReleaseTrain(TrainRecord {
      train: body.lines().next().unwrap_or("").to_string(),
      tickets: find_ticket_references(body),
    }),
  }
}
