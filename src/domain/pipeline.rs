//! Lead Pipeline
//!
//! Fixed contact sequence `todo -> c1 -> c2 -> c3 -> c4` plus two terminal
//! outcomes. Outcomes are reachable from any stage of the sequence; the only
//! way back out of an outcome is to `c4`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::date::CalendarDate;
use super::entity::DomainError;
use super::lead::Lead;

/// Pipeline stage of a lead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    Todo,
    C1,
    C2,
    C3,
    C4,
    Interested,
    NotInterested,
}

/// Contact sequence in order
pub const SEQUENCE: [LeadStatus; 5] = [
    LeadStatus::Todo,
    LeadStatus::C1,
    LeadStatus::C2,
    LeadStatus::C3,
    LeadStatus::C4,
];

/// Board column order: the sequence followed by both outcomes
pub const ALL_STATUSES: [LeadStatus; 7] = [
    LeadStatus::Todo,
    LeadStatus::C1,
    LeadStatus::C2,
    LeadStatus::C3,
    LeadStatus::C4,
    LeadStatus::Interested,
    LeadStatus::NotInterested,
];

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::Todo => "todo",
            LeadStatus::C1 => "c1",
            LeadStatus::C2 => "c2",
            LeadStatus::C3 => "c3",
            LeadStatus::C4 => "c4",
            LeadStatus::Interested => "interested",
            LeadStatus::NotInterested => "not_interested",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LeadStatus::Todo => "No contact",
            LeadStatus::C1 => "C1",
            LeadStatus::C2 => "C2",
            LeadStatus::C3 => "C3",
            LeadStatus::C4 => "C4",
            LeadStatus::Interested => "Interested",
            LeadStatus::NotInterested => "Not interested",
        }
    }

    /// Column title on the daily board
    pub fn column_title(&self) -> &'static str {
        match self {
            LeadStatus::Todo => "No contact",
            LeadStatus::C1 => "C1 - First contact",
            LeadStatus::C2 => "C2 - Second contact",
            LeadStatus::C3 => "C3 - Third contact",
            LeadStatus::C4 => "C4 - Fourth contact",
            LeadStatus::Interested => "Showed interest",
            LeadStatus::NotInterested => "Not interested",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, LeadStatus::Interested | LeadStatus::NotInterested)
    }

    /// One of `c1..c4`
    pub fn is_contacting(&self) -> bool {
        matches!(
            self,
            LeadStatus::C1 | LeadStatus::C2 | LeadStatus::C3 | LeadStatus::C4
        )
    }

    /// Next stage in the sequence; `None` at `c4` and for outcomes
    pub fn next(&self) -> Option<LeadStatus> {
        let idx = SEQUENCE.iter().position(|s| s == self)?;
        SEQUENCE.get(idx + 1).copied()
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_STATUSES
            .iter()
            .find(|status| status.as_str() == s)
            .copied()
            .ok_or_else(|| DomainError::UnknownVariant {
                kind: "lead status",
                value: s.to_string(),
            })
    }
}

/// Terminal outcome of a lead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Interested,
    NotInterested,
}

impl From<Outcome> for LeadStatus {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Interested => LeadStatus::Interested,
            Outcome::NotInterested => LeadStatus::NotInterested,
        }
    }
}

impl FromStr for Outcome {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "interested" => Ok(Outcome::Interested),
            "not_interested" => Ok(Outcome::NotInterested),
            _ => Err(DomainError::UnknownVariant {
                kind: "outcome",
                value: s.to_string(),
            }),
        }
    }
}

/// Stage after `advance`, or `None` when advancing is disabled
pub fn advance(from: LeadStatus) -> Option<LeadStatus> {
    from.next()
}

/// Stage after `resolve`, or `None` when the lead is already resolved
pub fn resolve(from: LeadStatus, outcome: Outcome) -> Option<LeadStatus> {
    (!from.is_terminal()).then(|| outcome.into())
}

/// `c4` for a resolved lead, `None` otherwise
pub fn revert_to_c4(from: LeadStatus) -> Option<LeadStatus> {
    from.is_terminal().then_some(LeadStatus::C4)
}

fn sequence_index(status: LeadStatus) -> Option<usize> {
    SEQUENCE.iter().position(|s| *s == status)
}

/// Whether a generic move from `from` to `to` is a legal pipeline step.
///
/// Legal moves: staying put, one step forward, any step back within the
/// sequence, resolving an open lead, and returning a resolved lead to `c4`.
/// Skipping ahead is never allowed.
pub fn transition_allowed(from: LeadStatus, to: LeadStatus) -> bool {
    let steps_back = matches!(
        (sequence_index(from), sequence_index(to)),
        (Some(current), Some(target)) if target < current
    );
    from == to
        || advance(from) == Some(to)
        || steps_back
        || (to.is_terminal() && !from.is_terminal())
        || revert_to_c4(from) == Some(to)
}

/// Cohort carry-forward: is `lead` on the board of `day`?
///
/// A lead shows on its cohort day, and on every later day of the same
/// Sunday-anchored week while it is still unresolved.
pub fn appears_on(lead: &Lead, day: CalendarDate) -> bool {
    if lead.date == day {
        return true;
    }
    lead.date < day
        && lead.date >= crate::calendar::bucket_for(day)
        && !lead.status.is_terminal()
}
