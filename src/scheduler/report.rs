//! Generation report.
//!
//! A run either places every session (`Complete`), leaves some sessions
//! unplaced with a reason (`Partial`), or, if the final audit finds a
//! hard-constraint violation, is flagged `Unsound`. Only the last is an
//! error, and only when the caller asks for it via
//! [`GenerationReport::ensure_sound`].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Request;
use crate::constraints::Conflict;
use crate::error::TimetableError;
use crate::models::Assignment;

/// Why a request was not placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnplacedReason {
    /// A lab session and no room of type "lab" exists.
    NoLabRoom,
    /// No suitable room seats the section.
    NoRoomLargeEnough,
    /// The teacher is unavailable in every slot that could hold the session.
    TeacherUnavailable,
    /// No day has enough back-to-back periods within the limits.
    NoContiguousBlock,
    /// The search proved no placement fits the already committed ones.
    SearchExhausted,
    /// The attempt budget ran out first.
    BudgetExceeded,
}

impl UnplacedReason {
    /// Whether the reason was found before search started.
    pub fn is_static(&self) -> bool {
        !matches!(self, Self::SearchExhausted | Self::BudgetExceeded)
    }
}

impl fmt::Display for UnplacedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoLabRoom => "no lab room available",
            Self::NoRoomLargeEnough => "no room large enough",
            Self::TeacherUnavailable => "teacher unavailable in every feasible slot",
            Self::NoContiguousBlock => "no contiguous block of periods",
            Self::SearchExhausted => "no placement compatible with committed classes",
            Self::BudgetExceeded => "attempt budget exceeded",
        })
    }
}

/// A session that could not be placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnplacedRequest {
    /// Course of the session.
    pub course_id: String,
    /// Section of the session.
    pub section_id: String,
    /// Teacher of the session.
    pub teacher_id: String,
    /// 1-based session number within the assignment.
    pub session_index: u32,
    /// Periods (hours) the session covers.
    pub periods: u32,
    /// Why it was not placed.
    pub reason: UnplacedReason,
}

impl UnplacedRequest {
    /// Creates an entry for a request.
    pub fn new(request: &Request, reason: UnplacedReason) -> Self {
        Self {
            course_id: request.course_id.clone(),
            section_id: request.section_id.clone(),
            teacher_id: request.teacher_id.clone(),
            session_index: request.session_index,
            periods: request.periods,
            reason,
        }
    }

    /// Whether this session belongs to `assignment`.
    pub fn belongs_to(&self, assignment: &Assignment) -> bool {
        assignment.matches(&self.course_id, &self.section_id, &self.teacher_id)
    }
}

/// Search counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Candidate evaluations.
    pub attempts: u64,
    /// Undone placements.
    pub backtracks: u64,
    /// Sub-searches started after the root ran out of candidates.
    pub restarts: u64,
}

/// Overall result category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Every session placed, no conflicts.
    Complete,
    /// Some sessions unplaced, no conflicts.
    Partial,
    /// The audit found conflicts.
    Unsound,
}

/// What happened during a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Seed used for ordering (`None` = built-in order).
    pub seed: Option<u64>,
    /// Total requests after expansion.
    pub requests: usize,
    /// Requests placed.
    pub placed_sessions: usize,
    /// Candidate evaluations.
    pub attempts: u64,
    /// Undone placements.
    pub backtracks: u64,
    /// Sub-search restarts.
    pub restarts: u64,
    /// Whether the attempt budget ran out.
    pub budget_exhausted: bool,
    /// Sessions not placed, with reasons.
    pub unplaced: Vec<UnplacedRequest>,
    /// Hard-constraint violations found by the final audit.
    pub conflicts: Vec<Conflict>,
}

impl GenerationReport {
    /// Search counters.
    pub fn stats(&self) -> SearchStats {
        SearchStats {
            attempts: self.attempts,
            backtracks: self.backtracks,
            restarts: self.restarts,
        }
    }

    /// Whether nothing was left unplaced and the audit is clean.
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty() && self.is_sound()
    }

    /// Whether the audit found no conflicts.
    pub fn is_sound(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Result category.
    pub fn outcome(&self) -> Outcome {
        if !self.is_sound() {
            Outcome::Unsound
        } else if !self.unplaced.is_empty() {
            Outcome::Partial
        } else {
            Outcome::Complete
        }
    }

    /// Hours of `assignment` left unplaced.
    pub fn unplaced_hours_for(&self, assignment: &Assignment) -> u32 {
        self.unplaced
            .iter()
            .filter(|u| u.belongs_to(assignment))
            .map(|u| u.periods)
            .sum()
    }

    /// Number of unplaced sessions per reason.
    pub fn unplaced_by_reason(&self, reason: UnplacedReason) -> usize {
        self.unplaced.iter().filter(|u| u.reason == reason).count()
    }

    /// Turns audit conflicts into an error.
    pub fn ensure_sound(&self) -> Result<(), TimetableError> {
        if self.is_sound() {
            Ok(())
        } else {
            Err(TimetableError::ConflictDetected(self.conflicts.clone()))
        }
    }
}
