use chrono::{DateTime, Duration, Utc};

use super::domain::{Ticket, TicketStatus};

/// Grace windows during which a resolved or closed ticket may be reopened,
/// measured from `resolved_at` and `closed_at` respectively. Values come from
/// configuration, never from per-call literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReopenWindows {
    pub after_resolve: Duration,
    pub after_close: Duration,
}

impl Default for ReopenWindows {
    fn default() -> Self {
        Self {
            after_resolve: Duration::days(3),
            after_close: Duration::days(14),
        }
    }
}

/// Rejection raised for an illegal or time-expired status change. Carries the
/// current and attempted status for diagnostics; the ticket is never mutated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidTransition {
    #[error("no transition from '{}' to '{}'", from.label(), to.label())]
    NotAllowed { from: TicketStatus, to: TicketStatus },
    #[error("reopen window for '{}' ticket expired at {deadline}", from.label())]
    ReopenWindowExpired {
        from: TicketStatus,
        deadline: DateTime<Utc>,
    },
    #[error("'{}' ticket is missing its {field} timestamp", from.label())]
    MissingTimestamp {
        from: TicketStatus,
        field: &'static str,
    },
}

impl TicketStatus {
    /// Static adjacency table for the ticket lifecycle. Reopen edges exist
    /// only from `Resolved` and `Closed` and are further gated by the grace
    /// window in [`validate_transition`].
    pub const fn allowed_targets(self) -> &'static [TicketStatus] {
        match self {
            TicketStatus::Open => &[
                TicketStatus::InProgress,
                TicketStatus::OnHold,
                TicketStatus::Closed,
            ],
            TicketStatus::InProgress => &[
                TicketStatus::OnHold,
                TicketStatus::Resolved,
                TicketStatus::Open,
            ],
            TicketStatus::OnHold => &[TicketStatus::InProgress, TicketStatus::Open],
            TicketStatus::Resolved => &[TicketStatus::Closed, TicketStatus::Reopened],
            TicketStatus::Closed => &[TicketStatus::Reopened],
            TicketStatus::Reopened => &[TicketStatus::InProgress, TicketStatus::Resolved],
        }
    }
}

/// Validate a proposed status change against the adjacency table and, for
/// reopens, the configured grace window. Validation never mutates the ticket;
/// applying the change is the caller's step.
pub fn validate_transition(
    ticket: &Ticket,
    target: TicketStatus,
    now: DateTime<Utc>,
    windows: &ReopenWindows,
) -> Result<(), InvalidTransition> {
    let from = ticket.status;

    if !from.allowed_targets().contains(&target) {
        return Err(InvalidTransition::NotAllowed { from, to: target });
    }

    if target == TicketStatus::Reopened {
        let (boundary, window, field) = match from {
            TicketStatus::Resolved => (ticket.resolved_at, windows.after_resolve, "resolved_at"),
            TicketStatus::Closed => (ticket.closed_at, windows.after_close, "closed_at"),
            // Unreachable through the adjacency table.
            _ => return Err(InvalidTransition::NotAllowed { from, to: target }),
        };
        let boundary = boundary.ok_or(InvalidTransition::MissingTimestamp { from, field })?;
        let deadline = boundary + window;
        if now > deadline {
            return Err(InvalidTransition::ReopenWindowExpired { from, deadline });
        }
    }

    Ok(())
}

/// Apply an already-validated status change, stamping the timestamp that marks
/// entry into the new state. Reopening clears `resolved_at`/`closed_at` so a
/// later resolution stamps them afresh.
pub fn apply_transition(ticket: &mut Ticket, target: TicketStatus, now: DateTime<Utc>) {
    match target {
        TicketStatus::Resolved => ticket.resolved_at = Some(now),
        TicketStatus::Closed => ticket.closed_at = Some(now),
        TicketStatus::Reopened => {
            ticket.reopened_at = Some(now);
            ticket.resolved_at = None;
            ticket.closed_at = None;
        }
        _ => {}
    }
    ticket.status = target;
}
