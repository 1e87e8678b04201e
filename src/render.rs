// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Render release-build and fallback announcements from aggregated history
// role: rendering/text
// inputs: ReleaseAnnouncementInput, FallbackAnnouncementInput
// outputs: Multi-line announcement text (chat-ops parses it; layout is a contract)
// invariants:
// - "(N)" counts equal the lengths of the lists they head
// - ticket keys are upper-cased before set membership; first occurrence fixes display order
// - output is a pure function of the input (no clock, no randomness)
// - optional blocks (merge line, approvals) leave no placeholder lines when absent
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::HashSet;

use crate::model::{FallbackAnnouncementInput, HistoryRecord, ReleaseAnnouncementInput, TrainRecord};
use crate::patterns::RELEASE_TRAIN_GLYPH;

pub const FALLBACK_GLYPH: &str = "☎️";
pub const NO_CHANGES: &str = "No changes since last release";

/// Unique ticket keys across trains and standalone tickets, upper-cased, first-seen order.
pub fn unique_ticket_keys(records: &[HistoryRecord]) -> Vec<String> {
  let mut seen: HashSet<String> = HashSet::new();
  let mut keys: Vec<String> = Vec::new();
  let mut push = |key: &str| {
    let normalized = key.to_uppercase();
    if seen.insert(normalized.clone()) {
      keys.push(normalized);
    }
  };

  for rec in records {
    match rec {
      HistoryRecord::Train(train) => train.tickets.iter().for_each(|t| push(&t.ticket)),
      HistoryRecord::Ticket(t) => push(&t.ticket),
    }
  }
  keys
}

fn trains(records: &[HistoryRecord]) -> Vec<&TrainRecord> {
  records
    .iter()
    .filter_map(|rec| match rec {
      HistoryRecord::Train(t) => Some(t),
      HistoryRecord::Ticket(_) => None,
    })
    .collect()
}

fn summary_block(records: &[HistoryRecord]) -> Vec<String> {
  let trains = trains(records);
  let tickets = unique_ticket_keys(records);
  let mut lines = Vec::new();

  if trains.is_empty() {
    if tickets.is_empty() {
      lines.push(NO_CHANGES.to_string());
    } else {
      lines.push(format!("Jira Tickets ({})", tickets.len()));
      lines.push(format!("- {}", tickets.join(", ")));
    }
    return lines;
  }

  lines.push(format!("Trains ({})", trains.len()));
  lines.extend(trains.iter().map(|t| format!("- {}", t.headline())));
  lines.push(String::new());
  lines.push(format!("Tickets ({})", tickets.len()));
  if !tickets.is_empty() {
    lines.push(format!("- {}", tickets.join(", ")));
  }
  lines
}

fn detail_block(records: &[HistoryRecord]) -> Vec<String> {
  let mut lines: Vec<String> = Vec::new();

  for rec in records {
    match rec {
      HistoryRecord::Ticket(t) => lines.push(format!("- {}: {}", t.ticket, t.message)),
      HistoryRecord::Train(train) => {
        // A train is always its own paragraph, even right under the summary.
        if !matches!(lines.last(), Some(l) if l.is_empty()) {
          lines.push(String::new());
        }
        lines.push(format!("> {}", train.train));
        lines.extend(train.tickets.iter().map(|t| format!("- - {}: {}", t.ticket, t.message)));
        lines.push(String::new());
      }
    }
  }

  while lines.last().is_some_and(|l| l.is_empty()) {
    lines.pop();
  }
  lines
}

pub fn render_release_build_announcement(input: &ReleaseAnnouncementInput) -> String {
  let mut blocks: Vec<Vec<String>> = Vec::new();

  blocks.push(vec![
    format!(
      "{} {} v{} Beta {} UAT Train",
      RELEASE_TRAIN_GLYPH, input.release_name, input.version, input.beta_version
    ),
    input.release_description.clone(),
  ]);

  // Summary, detail and merge line form one block with no separating blank line.
  let mut body = summary_block(&input.jira_tickets);
  body.extend(detail_block(&input.jira_tickets));
  if let Some(pr) = input.pull_request_number.as_deref().filter(|pr| !pr.trim().is_empty()) {
    body.push(format!("Merged in staging (pull request #{})", pr.trim()));
  }
  blocks.push(body);

  let approvers: Vec<&str> =
    input.approved_by.iter().flatten().map(|name| name.trim()).filter(|name| !name.is_empty()).collect();
  if !approvers.is_empty() {
    blocks.push(vec![format!("Approved-by: {}", approvers.join("\n"))]);
  }

  blocks.iter().map(|b| b.join("\n")).collect::<Vec<_>>().join("\n\n")
}

pub fn render_fallback_announcement(input: &FallbackAnnouncementInput) -> String {
  let live = &input.live_version;
  let fb = &input.fallback_version;

  let mut lines = vec![
    format!("{} Fallback Release Build v{} to v{} ({})", FALLBACK_GLYPH, live.version, fb.version, fb.date),
    String::new(),
    format!("Fallback release for {}", live.release_name),
    format!("Rollback to release {}", fb.release_name),
    format!("Commit SHA of {} - {}", fb.release_name, fb.sha),
    String::new(),
    format!("v{} Jira Tickets that would be rolled back:", fb.version),
  ];
  lines.extend(fb.jira_tickets.iter().map(|t| format!("- {}: {}", t.ticket, t.message)));
  lines.join("\n")
}
