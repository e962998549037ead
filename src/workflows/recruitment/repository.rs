use super::domain::{CandidateStage, StageId};

/// Storage abstraction for pipeline stages. The persistence layer owns the
/// at-most-one-active-stage invariant per candidate.
pub trait StageRepository: Send + Sync {
    fn insert(&self, stage: CandidateStage) -> Result<CandidateStage, StageRepositoryError>;
    fn update(&self, stage: CandidateStage) -> Result<(), StageRepositoryError>;
    fn fetch(&self, id: &StageId) -> Result<Option<CandidateStage>, StageRepositoryError>;
}

/// Error enumeration for stage persistence failures.
#[derive(Debug, thiserror::Error)]
pub enum StageRepositoryError {
    #[error("stage already exists")]
    Conflict,
    #[error("stage not found")]
    NotFound,
    #[error("stage store unavailable: {0}")]
    Unavailable(String),
}
