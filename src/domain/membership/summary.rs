//! Outcome types of a recalculation run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{JobRunId, MembershipId, MembershipStatusId, Timestamp};

/// Instruction to move one membership to its natural status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub membership_id: MembershipId,
    pub from: MembershipStatusId,
    pub to: MembershipStatusId,
}

/// A membership whose status change could not be persisted.
///
/// The membership keeps its previous status until the next run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFailure {
    pub membership_id: MembershipId,
    pub attempted_status_id: MembershipStatusId,
    /// `ErrorCode` of the underlying failure, as displayed.
    pub code: String,
    pub message: String,
}

/// Result of one recalculation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecalculationSummary {
    pub run_id: JobRunId,
    pub as_of: NaiveDate,
    pub started_at: Timestamp,
    pub finished_at: Timestamp,

    /// Candidates produced by the selector.
    pub examined: usize,

    /// Candidates already at their natural status.
    pub unchanged: usize,

    /// Candidates for which no status qualified; left as they were.
    pub unqualified: usize,

    /// Candidates skipped because an administrator override is in force.
    pub overridden: usize,

    /// Memberships whose new status was persisted, in processing order.
    pub updated_ids: Vec<MembershipId>,

    pub failures: Vec<RecordFailure>,
}

impl RecalculationSummary {
    pub fn new(run_id: JobRunId, as_of: NaiveDate) -> Self {
        let now = Timestamp::now();
        Self {
            run_id,
            as_of,
            started_at: now,
            finished_at: now,
            examined: 0,
            unchanged: 0,
            unqualified: 0,
            overridden: 0,
            updated_ids: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn updated(&self) -> usize {
        self.updated_ids.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// One-line outcome suitable for a scheduler's job log.
    pub fn message(&self) -> String {
        let mut message = format!(
            "Processed {} membership records. Updated {} records.",
            self.examined,
            self.updated()
        );
        if self.has_failures() {
            message.push_str(&format!(" Failed to update {} records.", self.failures.len()));
        }
        message
    }

    /// Wall-clock time the run took.
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at.duration_since(&self.started_at)
    }

    pub(crate) fn finish(&mut self) {
        self.finished_at = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> RecalculationSummary {
        RecalculationSummary::new(JobRunId::new(), NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
    }

    #[test]
    fn new_summary_is_empty() {
        let s = summary();
        assert_eq!(s.examined, 0);
        assert_eq!(s.updated(), 0);
        assert!(!s.has_failures());
    }

    #[test]
    fn message_reports_counts() {
        let mut s = summary();
        s.examined = 4;
        s.updated_ids = vec![MembershipId::from_raw(1), MembershipId::from_raw(3)];
        assert_eq!(s.message(), "Processed 4 membership records. Updated 2 records.");
    }

    #[test]
    fn message_mentions_failures() {
        let mut s = summary();
        s.examined = 2;
        s.failures.push(RecordFailure {
            membership_id: MembershipId::from_raw(2),
            attempted_status_id: MembershipStatusId::from_raw(1),
            code: "DATABASE_ERROR".to_string(),
            message: "deadlock".to_string(),
        });
        assert!(s.message().ends_with("Failed to update 1 records."));
    }

    #[test]
    fn finish_never_moves_backwards() {
        let mut s = summary();
        s.finish();
        assert!(s.finished_at >= s.started_at);
    }
}
