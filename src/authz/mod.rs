//! Role satisfaction predicates for the two platform domains.
//!
//! The service-desk side uses a flat role set with a superadmin bypass. The
//! recruitment side maps each role to a fixed closure of the requirements it
//! satisfies; the closure table is configuration, not computed transitively at
//! runtime.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Operational roles held by service-desk accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceDeskRole {
    Superadmin,
    Manager,
    Technician,
    Requester,
}

impl ServiceDeskRole {
    pub const fn label(self) -> &'static str {
        match self {
            ServiceDeskRole::Superadmin => "superadmin",
            ServiceDeskRole::Manager => "manager",
            ServiceDeskRole::Technician => "technician",
            ServiceDeskRole::Requester => "requester",
        }
    }
}

/// Recruitment-platform roles ordered by reach; closures come from
/// [`RoleHierarchy`], not from this enum's ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecruitRole {
    HrExec,
    Recruiter,
    HiringManager,
    Interviewer,
    Coordinator,
}

impl RecruitRole {
    pub const fn label(self) -> &'static str {
        match self {
            RecruitRole::HrExec => "hr_exec",
            RecruitRole::Recruiter => "recruiter",
            RecruitRole::HiringManager => "hiring_manager",
            RecruitRole::Interviewer => "interviewer",
            RecruitRole::Coordinator => "coordinator",
        }
    }
}

/// Flat satisfaction check: superadmin passes anything, otherwise the held and
/// required sets must intersect.
pub fn satisfies(held: &HashSet<ServiceDeskRole>, required: &HashSet<ServiceDeskRole>) -> bool {
    if held.contains(&ServiceDeskRole::Superadmin) {
        return true;
    }
    held.iter().any(|role| required.contains(role))
}

/// Closure table mapping each recruitment role to the set of requirement roles
/// it is considered to satisfy (always including itself).
#[derive(Debug, Clone)]
pub struct RoleHierarchy {
    closures: HashMap<RecruitRole, HashSet<RecruitRole>>,
}

impl Default for RoleHierarchy {
    fn default() -> Self {
        let mut closures = HashMap::new();
        closures.insert(
            RecruitRole::HrExec,
            HashSet::from([
                RecruitRole::HrExec,
                RecruitRole::Recruiter,
                RecruitRole::HiringManager,
                RecruitRole::Interviewer,
                RecruitRole::Coordinator,
            ]),
        );
        closures.insert(
            RecruitRole::Recruiter,
            HashSet::from([
                RecruitRole::Recruiter,
                RecruitRole::Interviewer,
                RecruitRole::Coordinator,
            ]),
        );
        closures.insert(
            RecruitRole::HiringManager,
            HashSet::from([RecruitRole::HiringManager, RecruitRole::Interviewer]),
        );
        closures.insert(
            RecruitRole::Interviewer,
            HashSet::from([RecruitRole::Interviewer]),
        );
        closures.insert(
            RecruitRole::Coordinator,
            HashSet::from([RecruitRole::Coordinator]),
        );
        Self { closures }
    }
}

impl RoleHierarchy {
    pub fn new(closures: HashMap<RecruitRole, HashSet<RecruitRole>>) -> Self {
        Self { closures }
    }

    /// Every requirement role a holder of `role` satisfies. Unknown roles
    /// satisfy only themselves.
    pub fn closure(&self, role: RecruitRole) -> HashSet<RecruitRole> {
        self.closures
            .get(&role)
            .cloned()
            .unwrap_or_else(|| HashSet::from([role]))
    }

    /// Hierarchical satisfaction: expand held roles through their closures,
    /// then intersect with the requirement set.
    pub fn satisfies(&self, held: &HashSet<RecruitRole>, required: &HashSet<RecruitRole>) -> bool {
        held.iter()
            .flat_map(|role| self.closure(*role))
            .any(|role| required.contains(&role))
    }
}
