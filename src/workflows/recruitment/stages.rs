use chrono::{DateTime, Utc};

use super::domain::{CandidateStage, StageDecision, StageStatus};

/// Action verb emitted for a successful stage transition; becomes the
/// `action` of the paired candidate event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageAction {
    Activated,
    Completed,
    Skipped,
    Rejected,
    Selected,
}

impl StageAction {
    pub const fn label(self) -> &'static str {
        match self {
            StageAction::Activated => "stage.activated",
            StageAction::Completed => "stage.completed",
            StageAction::Skipped => "stage.skipped",
            StageAction::Rejected => "stage.rejected",
            StageAction::Selected => "stage.selected",
        }
    }
}

/// The fields a successful validation hands back for event construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTransition {
    pub from: StageStatus,
    pub to: StageStatus,
    pub action: StageAction,
}

/// Rejection raised for an illegal stage change or a terminal change missing
/// its decision payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StageTransitionError {
    #[error("no stage transition from '{}' to '{}'", from.label(), to.label())]
    NotAllowed { from: StageStatus, to: StageStatus },
    #[error("a decision with a reason is required to mark a stage '{}'", to.label())]
    DecisionRequired { to: StageStatus },
}

impl StageStatus {
    /// Static adjacency table for the candidate pipeline. Terminal statuses
    /// have no outgoing edges; history is appended, never rewritten.
    pub const fn allowed_targets(self) -> &'static [StageStatus] {
        match self {
            StageStatus::Pending => &[StageStatus::Active, StageStatus::Skipped],
            StageStatus::Active => &[
                StageStatus::Completed,
                StageStatus::Skipped,
                StageStatus::Rejected,
                StageStatus::Selected,
            ],
            StageStatus::Completed => &[],
            StageStatus::Skipped => &[],
            StageStatus::Rejected => &[],
            StageStatus::Selected => &[],
        }
    }
}

const fn action_for(target: StageStatus) -> StageAction {
    match target {
        StageStatus::Active => StageAction::Activated,
        StageStatus::Completed => StageAction::Completed,
        StageStatus::Skipped => StageAction::Skipped,
        StageStatus::Rejected => StageAction::Rejected,
        // Pending is never a target; the table has no edge back to it.
        StageStatus::Selected | StageStatus::Pending => StageAction::Selected,
    }
}

/// Validate a proposed stage change. Terminal targets must carry a decision.
/// On success returns the `(from, to, action)` triple the caller needs to
/// build the paired candidate event; the stage itself is not mutated.
pub fn validate_stage_transition(
    stage: &CandidateStage,
    target: StageStatus,
    decision: Option<&StageDecision>,
) -> Result<StageTransition, StageTransitionError> {
    let from = stage.status;

    if !from.allowed_targets().contains(&target) {
        return Err(StageTransitionError::NotAllowed { from, to: target });
    }

    if target.is_terminal() && decision.is_none() {
        return Err(StageTransitionError::DecisionRequired { to: target });
    }

    Ok(StageTransition {
        from,
        to: target,
        action: action_for(target),
    })
}

/// Apply an already-validated stage change: stamp `started_at` on activation
/// and `ended_at` plus the decision on any finishing status.
pub fn apply_stage_transition(
    stage: &mut CandidateStage,
    transition: StageTransition,
    decision: Option<StageDecision>,
    now: DateTime<Utc>,
) {
    match transition.to {
        StageStatus::Active => stage.started_at = Some(now),
        StageStatus::Completed | StageStatus::Skipped => stage.ended_at = Some(now),
        StageStatus::Rejected | StageStatus::Selected => {
            stage.ended_at = Some(now);
            stage.decision = decision;
        }
        StageStatus::Pending => {}
    }
    stage.status = transition.to;
}
