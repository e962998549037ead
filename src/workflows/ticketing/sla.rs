use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::domain::SlaPolicy;

/// Due timestamps derived from a ticket's creation time and its SLA policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaDueTimes {
    pub first_response_due: DateTime<Utc>,
    pub resolution_due: DateTime<Utc>,
}

/// Compute both due times by straight wall-clock addition of the policy's
/// minute budgets. There is no business-hours calendar.
///
/// An inactive policy is still computed; gating on `policy.active` is the
/// caller's responsibility.
pub fn compute_due(created_at: DateTime<Utc>, policy: &SlaPolicy) -> SlaDueTimes {
    SlaDueTimes {
        first_response_due: created_at + Duration::minutes(policy.first_response_minutes),
        resolution_due: created_at + Duration::minutes(policy.resolution_minutes),
    }
}
