use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for candidates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub String);

/// Identifier wrapper for pipeline stage records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StageId(pub String);

/// Status of a single pipeline stage. `Rejected` and `Selected` are terminal
/// and require a recorded decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageStatus {
    Pending,
    Active,
    Completed,
    Skipped,
    Rejected,
    Selected,
}

impl StageStatus {
    pub const fn label(self) -> &'static str {
        match self {
            StageStatus::Pending => "pending",
            StageStatus::Active => "active",
            StageStatus::Completed => "completed",
            StageStatus::Skipped => "skipped",
            StageStatus::Rejected => "rejected",
            StageStatus::Selected => "selected",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, StageStatus::Rejected | StageStatus::Selected)
    }
}

/// Verdict attached to a terminal stage transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionVerdict {
    Selected,
    Rejected,
}

/// Decision payload required when a stage reaches a terminal status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDecision {
    pub verdict: DecisionVerdict,
    pub reason: String,
}

/// One step in a candidate's recruitment pipeline. Stage history is appended,
/// never deleted; at most one active stage per candidate is enforced by the
/// persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateStage {
    pub id: StageId,
    pub candidate_id: CandidateId,
    pub stage_name: String,
    pub status: StageStatus,
    pub assignee: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub due_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub decision: Option<StageDecision>,
    pub notes: Option<String>,
}

/// Applicant-provided screening answers. Free-text fields are carried opaque;
/// only the structured knobs feed the decision engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningSubmission {
    pub candidate_id: CandidateId,
    pub willing_to_relocate: Option<bool>,
    pub expected_salary_annual: Option<u32>,
    pub cover_note: Option<String>,
}

/// Per-opening screening policy knobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningConfig {
    pub requires_relocation: bool,
    pub salary_band_max_annual: Option<u32>,
}

/// Tri-state screening verdict: green advances, amber forces human review,
/// red stops the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreeningVerdict {
    Green,
    Amber,
    Red,
}

impl ScreeningVerdict {
    pub const fn label(self) -> &'static str {
        match self {
            ScreeningVerdict::Green => "green",
            ScreeningVerdict::Amber => "amber",
            ScreeningVerdict::Red => "red",
        }
    }
}
