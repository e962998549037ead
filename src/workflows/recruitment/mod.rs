//! Candidate pipeline: stage state machine, screening decision engine, and
//! the service facade pairing each stage transition with a candidate event.

pub mod domain;
pub mod repository;
pub mod screening;
pub mod service;
pub mod stages;

#[cfg(test)]
mod tests;

pub use domain::{
    CandidateId, CandidateStage, DecisionVerdict, OpeningConfig, ScreeningSubmission,
    ScreeningVerdict, StageDecision, StageId, StageStatus,
};
pub use repository::{StageRepository, StageRepositoryError};
pub use screening::evaluate;
pub use service::{CandidateService, CandidateServiceError};
pub use stages::{
    apply_stage_transition, validate_stage_transition, StageAction, StageTransition,
    StageTransitionError,
};
