use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use crate::audit::{EventPublisher, EventSummary, InMemoryCandidateEventStore, PublishError};
use crate::authz::{RecruitRole, RoleHierarchy};
use crate::workflows::recruitment::domain::{
    CandidateId, CandidateStage, OpeningConfig, ScreeningSubmission, StageId, StageStatus,
};
use crate::workflows::recruitment::repository::{StageRepository, StageRepositoryError};
use crate::workflows::recruitment::service::CandidateService;

pub(super) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 1, 14, 0, 0).single().expect("valid timestamp")
}

pub(super) fn stage_in(status: StageStatus) -> CandidateStage {
    CandidateStage {
        id: StageId("stg-100".to_string()),
        candidate_id: CandidateId("cand-42".to_string()),
        stage_name: "phone_screen".to_string(),
        status,
        assignee: Some("recruiter-2".to_string()),
        started_at: None,
        due_at: None,
        ended_at: None,
        decision: None,
        notes: None,
    }
}

pub(super) fn submission() -> ScreeningSubmission {
    ScreeningSubmission {
        candidate_id: CandidateId("cand-42".to_string()),
        willing_to_relocate: Some(true),
        expected_salary_annual: Some(78_000),
        cover_note: Some("Available from August.".to_string()),
    }
}

pub(super) fn opening() -> OpeningConfig {
    OpeningConfig {
        requires_relocation: true,
        salary_band_max_annual: Some(95_000),
    }
}

pub(super) fn recruiter_roles() -> HashSet<RecruitRole> {
    HashSet::from([RecruitRole::Recruiter])
}

pub(super) fn interviewer_roles() -> HashSet<RecruitRole> {
    HashSet::from([RecruitRole::Interviewer])
}

#[derive(Default)]
pub(super) struct MemoryStageRepository {
    pub(super) records: Mutex<HashMap<StageId, CandidateStage>>,
}

impl MemoryStageRepository {
    pub(super) fn seed(&self, stage: CandidateStage) {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .insert(stage.id.clone(), stage);
    }
}

impl StageRepository for MemoryStageRepository {
    fn insert(&self, stage: CandidateStage) -> Result<CandidateStage, StageRepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&stage.id) {
            return Err(StageRepositoryError::Conflict);
        }
        guard.insert(stage.id.clone(), stage.clone());
        Ok(stage)
    }

    fn update(&self, stage: CandidateStage) -> Result<(), StageRepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(stage.id.clone(), stage);
        Ok(())
    }

    fn fetch(&self, id: &StageId) -> Result<Option<CandidateStage>, StageRepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default)]
pub(super) struct MemoryBus {
    pub(super) published: Mutex<Vec<EventSummary>>,
}

impl EventPublisher for MemoryBus {
    fn publish(&self, summary: EventSummary) -> Result<(), PublishError> {
        self.published.lock().expect("bus mutex poisoned").push(summary);
        Ok(())
    }
}

pub(super) fn build_service() -> (
    CandidateService<MemoryStageRepository, InMemoryCandidateEventStore, MemoryBus>,
    Arc<MemoryStageRepository>,
    Arc<MemoryBus>,
) {
    let repository = Arc::new(MemoryStageRepository::default());
    let events = Arc::new(InMemoryCandidateEventStore::default());
    let bus = Arc::new(MemoryBus::default());
    let service = CandidateService::new(
        repository.clone(),
        events,
        bus.clone(),
        RoleHierarchy::default(),
    );
    (service, repository, bus)
}
