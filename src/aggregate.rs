// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Walk a history range, classify every commit and flatten into ticket/train records
// role: aggregation
// inputs: CommitSource, from/to refs
// outputs: Vec<HistoryRecord> in commit order
// invariants:
// - relative commit order is preserved; no deduplication at this stage
// - a ticket commit contributes 0..n records, a train commit exactly one
// errors: VCS failures propagate unchanged (no retry, no swallowing)
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use tracing::{debug, info, warn};

use crate::classify::classify_commit;
use crate::error::VcsResult;
use crate::gitio::CommitSource;
use crate::model::{HistoryRecord, TicketRecord};
use crate::util::short_sha;

pub async fn get_trains_and_tickets<S: CommitSource>(source: &S, from: &str, to: &str) -> VcsResult<Vec<HistoryRecord>> {
  let commits = source.commits_between(from, to).await?;

  let mut records: Vec<HistoryRecord> = Vec::new();
  for commit in &commits {
    let classification = classify_commit(commit);
    debug!(
      sha = %short_sha(&commit.hash),
      kind = ?classification.kind(),
      tickets = classification.ticket_count(),
      "classified commit"
    );
    records.extend(classification.into_records());
  }

  info!(commits = commits.len(), records = records.len(), from, to, "aggregated history");
  if records.is_empty() {
    warn!(from, to, "no tickets or trains found in range");
  }
  Ok(records)
}

/// Every ticket in the history, trains expanded in place; order kept, no deduplication.
pub fn tickets_only(history: &[HistoryRecord]) -> Vec<TicketRecord> {
  history
    .iter()
    .flat_map(|rec| match rec {
      HistoryRecord::Ticket(t) => vec![t.clone()],
      HistoryRecord::Train(train) => train.tickets.clone(),
    })
    .collect()
}
