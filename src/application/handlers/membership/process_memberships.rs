//! ProcessMembershipsHandler - Command handler for the status recalculation job.
//!
//! One invocation is one sequential pass:
//!
//! 1. Load the status catalog and resolve the request into a plan
//! 2. Select candidates
//! 3. Decide each candidate's natural status
//! 4. Persist each change, recording failures without stopping
//!
//! An invalid request fails before anything is written. After that, only a
//! failure to read the stores aborts the run.

use std::sync::Arc;

use tracing::Instrument;

use crate::domain::foundation::JobRunId;
use crate::domain::membership::{
    MembershipJobError, RecalculationDefaults, RecalculationPlan, RecalculationRequest,
    RecalculationSummary, RecordFailure,
};
use crate::ports::{
    Clock, MembershipRepository, MembershipTypeReader, StatusCalculator, StatusCatalog,
};

use super::recalculate_status::{recalculate, Recalculation};
use super::select_memberships::MembershipSelector;

/// Command to run one recalculation pass.
#[derive(Debug, Clone, Default)]
pub struct ProcessMembershipsCommand {
    pub request: RecalculationRequest,
}

impl ProcessMembershipsCommand {
    pub fn new(request: RecalculationRequest) -> Self {
        Self { request }
    }
}

/// Handler for the membership status recalculation job.
///
/// Invocations against the same store must not overlap; callers serialize
/// them (typically a scheduler lock).
pub struct ProcessMembershipsHandler {
    repository: Arc<dyn MembershipRepository>,
    catalog: Arc<dyn StatusCatalog>,
    calculator: Arc<dyn StatusCalculator>,
    clock: Arc<dyn Clock>,
    selector: MembershipSelector,
    defaults: RecalculationDefaults,
}

impl ProcessMembershipsHandler {
    pub fn new(
        repository: Arc<dyn MembershipRepository>,
        catalog: Arc<dyn StatusCatalog>,
        types: Arc<dyn MembershipTypeReader>,
        calculator: Arc<dyn StatusCalculator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            selector: MembershipSelector::new(repository.clone(), types),
            repository,
            catalog,
            calculator,
            clock,
            defaults: RecalculationDefaults::default(),
        }
    }

    /// Replace the values used for request fields left unset.
    pub fn with_defaults(mut self, defaults: RecalculationDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub async fn handle(
        &self,
        cmd: ProcessMembershipsCommand,
    ) -> Result<RecalculationSummary, MembershipJobError> {
        let run_id = JobRunId::new();
        let as_of = self.clock.today();
        let span = tracing::info_span!("process_memberships", run_id = %run_id, as_of = %as_of);

        self.run(cmd.request, run_id, as_of).instrument(span).await
    }

    async fn run(
        &self,
        request: RecalculationRequest,
        run_id: JobRunId,
        as_of: chrono::NaiveDate,
    ) -> Result<RecalculationSummary, MembershipJobError> {
        // 1. Resolve the request against the catalog
        let catalog = self.catalog.list().await?;
        let plan = RecalculationPlan::resolve(&request, &self.defaults, &catalog, as_of)
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected recalculation request");
                e
            })?;

        for name in &plan.unresolved_default_names {
            tracing::warn!(status = %name, "Default excluded status not found in catalog");
        }
        if plan.deceased_status_id.is_none() {
            tracing::warn!("Status catalog has no Deceased status");
        }
        tracing::info!(
            exclude_test_memberships = plan.exclude_test_memberships,
            only_active_membership_types = plan.only_active_membership_types,
            excluded_status_ids = ?plan.excluded_status_ids,
            "Starting membership status recalculation"
        );

        // 2. Select candidates
        let candidates = self.selector.select(&plan).await?;

        let mut summary = RecalculationSummary::new(run_id, as_of);
        summary.examined = candidates.len();

        // 3-4. Decide and persist, one membership at a time
        for membership in &candidates {
            match recalculate(membership, self.calculator.as_ref(), &plan) {
                Recalculation::Unchanged => summary.unchanged += 1,
                Recalculation::Unqualified => summary.unqualified += 1,
                Recalculation::Overridden => summary.overridden += 1,
                Recalculation::Change(change) => {
                    match self
                        .repository
                        .update_status(&change.membership_id, change.to)
                        .await
                    {
                        Ok(()) => {
                            tracing::debug!(
                                membership_id = %change.membership_id,
                                from = %change.from,
                                to = %change.to,
                                "Membership status updated"
                            );
                            summary.updated_ids.push(change.membership_id);
                        }
                        Err(e) => {
                            tracing::warn!(
                                membership_id = %change.membership_id,
                                to = %change.to,
                                error = %e,
                                "Failed to update membership status"
                            );
                            summary.failures.push(RecordFailure {
                                membership_id: change.membership_id,
                                attempted_status_id: change.to,
                                code: e.code.to_string(),
                                message: e.message,
                            });
                        }
                    }
                }
            }
        }

        summary.finish();
        tracing::info!(
            examined = summary.examined,
            updated = summary.updated(),
            unchanged = summary.unchanged,
            unqualified = summary.unqualified,
            overridden = summary.overridden,
            failed = summary.failures.len(),
            elapsed_ms = summary.elapsed().num_milliseconds(),
            "{}",
            summary.message()
        );

        Ok(summary)
    }
}
