//! Candidate pipeline scenarios driven through the public service facade:
//! stage progression with its paired event trail, and screening verdicts.

mod common {
    use std::collections::{HashMap, HashSet};
    use std::sync::{Arc, Mutex};

    use chrono::{DateTime, TimeZone, Utc};

    use staffdesk::audit::{
        EventPublisher, EventSummary, InMemoryCandidateEventStore, PublishError,
    };
    use staffdesk::authz::{RecruitRole, RoleHierarchy};
    use staffdesk::workflows::recruitment::{
        CandidateId, CandidateService, CandidateStage, StageId, StageRepository,
        StageRepositoryError, StageStatus,
    };

    pub fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 15, 10, 0, 0)
        .single()
        .expect("valid timestamp")
    }

    pub fn recruiter() -> HashSet<RecruitRole> {
        HashSet::from([RecruitRole::Recruiter])
    }

    pub fn stage(id: &str, candidate: &str, name: &str, status: StageStatus) -> CandidateStage {
        CandidateStage {
            id: StageId(id.to_string()),
            candidate_id: CandidateId(candidate.to_string()),
            stage_name: name.to_string(),
            status,
            assignee: Some("recruiter-5".to_string()),
            started_at: None,
            due_at: None,
            ended_at: None,
            decision: None,
            notes: None,
        }
    }

    #[derive(Default)]
    pub struct MemoryStageRepository {
        records: Mutex<HashMap<StageId, CandidateStage>>,
    }

    impl MemoryStageRepository {
        pub fn seed(&self, stage: CandidateStage) {
            self.records.lock().expect("lock").insert(stage.id.clone(), stage);
        }
    }

    impl StageRepository for MemoryStageRepository {
        fn insert(&self, stage: CandidateStage) -> Result<CandidateStage, StageRepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            if guard.contains_key(&stage.id) {
                return Err(StageRepositoryError::Conflict);
            }
            guard.insert(stage.id.clone(), stage.clone());
            Ok(stage)
        }

        fn update(&self, stage: CandidateStage) -> Result<(), StageRepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            guard.insert(stage.id.clone(), stage);
            Ok(())
        }

        fn fetch(&self, id: &StageId) -> Result<Option<CandidateStage>, StageRepositoryError> {
            let guard = self.records.lock().expect("lock");
            Ok(guard.get(id).cloned())
        }
    }

    #[derive(Default)]
    pub struct MemoryBus {
        pub published: Mutex<Vec<EventSummary>>,
    }

    impl EventPublisher for MemoryBus {
        fn publish(&self, summary: EventSummary) -> Result<(), PublishError> {
            self.published.lock().expect("lock").push(summary);
            Ok(())
        }
    }

    pub struct FlakyBus;

    impl EventPublisher for FlakyBus {
        fn publish(&self, _summary: EventSummary) -> Result<(), PublishError> {
            Err(PublishError::Transport("webhook endpoint gone".to_string()))
        }
    }

    pub fn build() -> (
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

    pub fn build_with_flaky_bus() -> (
        CandidateService<MemoryStageRepository, InMemoryCandidateEventStore, FlakyBus>,
        Arc<MemoryStageRepository>,
    ) {
        let repository = Arc::new(MemoryStageRepository::default());
        let events = Arc::new(InMemoryCandidateEventStore::default());
        let service = CandidateService::new(
            repository.clone(),
            events,
            Arc::new(FlakyBus),
            RoleHierarchy::default(),
        );
        (service, repository)
    }
}

use chrono::Duration;

use staffdesk::audit::ActorId;
use staffdesk::workflows::recruitment::{
    CandidateId, DecisionVerdict, OpeningConfig, ScreeningSubmission, ScreeningVerdict,
    StageDecision, StageId, StageStatus,
};

fn actor() -> ActorId {
    ActorId("recruiter-5".to_string())
}

#[test]
fn pipeline_progression_leaves_one_event_per_transition() {
    let (service, repository, bus) = common::build();
    repository.seed(common::stage("stg-1", "cand-7", "phone_screen", StageStatus::Pending));
    let t0 = common::start();

    service
        .apply_stage_transition(
            &StageId("stg-1".to_string()),
            StageStatus::Active,
            None,
            actor(),
            &common::recruiter(),
            t0,
        )
        .expect("activates");
    service
        .apply_stage_transition(
            &StageId("stg-1".to_string()),
            StageStatus::Completed,
            None,
            actor(),
            &common::recruiter(),
            t0 + Duration::days(1),
        )
        .expect("completes");

    let events = service.events_for("cand-7").expect("events");
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].action, "stage.activated");
    assert_eq!(events[1].action, "stage.completed");
    assert_eq!(bus.published.lock().expect("lock").len(), 2);
}

#[test]
fn selection_requires_and_records_a_decision() {
    let (service, repository, _) = common::build();
    repository.seed(common::stage("stg-2", "cand-8", "final_interview", StageStatus::Active));
    let now = common::start();
    let id = StageId("stg-2".to_string());

    // Without a decision the transition is refused and no event exists.
    assert!(service
        .apply_stage_transition(&id, StageStatus::Selected, None, actor(), &common::recruiter(), now)
        .is_err());
    assert!(service.events_for("cand-8").expect("events").is_empty());

    let selected = service
        .apply_stage_transition(
            &id,
            StageStatus::Selected,
            Some(StageDecision {
                verdict: DecisionVerdict::Selected,
                reason: "strongest systems design round".to_string(),
            }),
            actor(),
            &common::recruiter(),
            now,
        )
        .expect("selects");

    assert_eq!(selected.status, StageStatus::Selected);
    assert_eq!(selected.ended_at, Some(now));
    let events = service.events_for("cand-8").expect("events");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].to_status, "selected");
}

#[test]
fn a_dead_event_bus_does_not_block_the_pipeline() {
    let (service, repository) = common::build_with_flaky_bus();
    repository.seed(common::stage("stg-3", "cand-9", "phone_screen", StageStatus::Pending));

    let updated = service
        .apply_stage_transition(
            &StageId("stg-3".to_string()),
            StageStatus::Active,
            None,
            actor(),
            &common::recruiter(),
            common::start(),
        )
        .expect("transition survives publish failure");

    assert_eq!(updated.status, StageStatus::Active);
    // The durable event write still happened.
    assert_eq!(service.events_for("cand-9").expect("events").len(), 1);
}

#[test]
fn screening_verdicts_follow_the_opening_policy() {
    let (service, _, _) = common::build();
    let now = common::start();
    let submission = ScreeningSubmission {
        candidate_id: CandidateId("cand-10".to_string()),
        willing_to_relocate: Some(false),
        expected_salary_annual: Some(70_000),
        cover_note: None,
    };

    // No policy configured: conservative amber, nothing logged.
    assert_eq!(
        service.screen(&submission, None, now).expect("screens"),
        ScreeningVerdict::Amber
    );
    assert!(service.events_for("cand-10").expect("events").is_empty());

    // Relocation required but declined: red, logged.
    let opening = OpeningConfig {
        requires_relocation: true,
        salary_band_max_annual: None,
    };
    assert_eq!(
        service.screen(&submission, Some(&opening), now).expect("screens"),
        ScreeningVerdict::Red
    );
    assert_eq!(service.events_for("cand-10").expect("events").len(), 1);
}
