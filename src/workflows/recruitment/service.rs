use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::info;

use super::domain::{
    CandidateStage, OpeningConfig, ScreeningSubmission, ScreeningVerdict, StageDecision, StageId,
    StageStatus,
};
use super::repository::{StageRepository, StageRepositoryError};
use super::screening;
use super::stages::{self, StageTransitionError};
use crate::audit::{ActorId, AuditStoreError, CandidateEventStore, EventLog, EventPublisher};
use crate::authz::{RecruitRole, RoleHierarchy};

fn pipeline_roles() -> HashSet<RecruitRole> {
    HashSet::from([RecruitRole::Recruiter, RecruitRole::HiringManager])
}

/// Service composing the stage state machine, screening engine, hierarchy
/// check, stage repository, and candidate event log. Every applied stage
/// transition is paired 1:1 with a recorded and published candidate event.
pub struct CandidateService<R, S, P> {
    stages: Arc<R>,
    events: EventLog<S, P>,
    hierarchy: RoleHierarchy,
}

impl<R, S, P> CandidateService<R, S, P>
where
    R: StageRepository + 'static,
    S: CandidateEventStore + 'static,
    P: EventPublisher + 'static,
{
    pub fn new(
        stages: Arc<R>,
        event_store: Arc<S>,
        publisher: Arc<P>,
        hierarchy: RoleHierarchy,
    ) -> Self {
        Self {
            stages,
            events: EventLog::new(event_store, publisher),
            hierarchy,
        }
    }

    /// Authorize, validate, and apply one stage transition, then record the
    /// paired candidate event. The event insert shares the caller's
    /// transaction; the bus notification afterwards is best-effort.
    #[allow(clippy::too_many_arguments)]
    pub fn apply_stage_transition(
        &self,
        stage_id: &StageId,
        target: StageStatus,
        decision: Option<StageDecision>,
        actor: ActorId,
        held_roles: &HashSet<RecruitRole>,
        now: DateTime<Utc>,
    ) -> Result<CandidateStage, CandidateServiceError> {
        if !self.hierarchy.satisfies(held_roles, &pipeline_roles()) {
            return Err(CandidateServiceError::Unauthorized {
                action: "stage.transition",
            });
        }

        let mut stage = self
            .stages
            .fetch(stage_id)?
            .ok_or(StageRepositoryError::NotFound)?;

        let transition = stages::validate_stage_transition(&stage, target, decision.as_ref())?;
        stages::apply_stage_transition(&mut stage, transition, decision, now);
        self.stages.update(stage.clone())?;

        let meta = json!({
            "stage": stage.stage_name,
            "assignee": stage.assignee,
            "decision_reason": stage.decision.as_ref().map(|d| d.reason.clone()),
        });
        self.events.record_event(
            &stage.candidate_id.0,
            transition.action.label(),
            Some(transition.from.label()),
            transition.to.label(),
            Some(actor),
            meta,
            now,
        )?;
        info!(
            candidate = %stage.candidate_id.0,
            stage = %stage.stage_name,
            status = stage.status.label(),
            "stage transitioned"
        );
        Ok(stage)
    }

    /// Run the pure screening decision and log a candidate event when the
    /// verdict stops the pipeline.
    pub fn screen(
        &self,
        submission: &ScreeningSubmission,
        opening: Option<&OpeningConfig>,
        now: DateTime<Utc>,
    ) -> Result<ScreeningVerdict, CandidateServiceError> {
        let verdict = screening::evaluate(submission, opening);
        if verdict == ScreeningVerdict::Red {
            self.events.record_event(
                &submission.candidate_id.0,
                "screening.stopped",
                None,
                verdict.label(),
                None,
                json!({
                    "willing_to_relocate": submission.willing_to_relocate,
                    "expected_salary_annual": submission.expected_salary_annual,
                }),
                now,
            )?;
        }
        Ok(verdict)
    }

    /// Event history for one candidate, read-only.
    pub fn events_for(
        &self,
        candidate_id: &str,
    ) -> Result<Vec<crate::audit::CandidateEvent>, CandidateServiceError> {
        Ok(self.events.events_for(candidate_id)?)
    }
}

/// Error raised by the candidate service.
#[derive(Debug, thiserror::Error)]
pub enum CandidateServiceError {
    #[error("actor is not permitted to perform {action}")]
    Unauthorized { action: &'static str },
    #[error(transparent)]
    Transition(#[from] StageTransitionError),
    #[error(transparent)]
    Repository(#[from] StageRepositoryError),
    #[error(transparent)]
    Events(#[from] AuditStoreError),
}
