//! Hard scheduling constraints.
//!
//! Two ways to check the same rules:
//!
//! - [`ConstraintValidator::can_place`] answers "may this class be added to
//!   the partial schedule?" incrementally, from the slot bucket and load
//!   counters of a [`PartialSchedule`].
//! - [`ConstraintValidator::validate_full`] rescans a finished schedule from
//!   scratch, independently of any index, and lists every violation.
//!
//! The rules:
//!
//! | Rule | Violation |
//! |------|-----------|
//! | One class per teacher/room/section and slot | [`ConflictKind::DoubleBooking`] |
//! | Room seats ≥ section size | [`ConflictKind::CapacityExceeded`] |
//! | Lab courses in lab rooms | [`ConflictKind::RoomTypeMismatch`] |
//! | Teacher available at the slot | [`ConflictKind::UnavailableSlot`] |
//! | Daily/weekly/consecutive limits | [`ConflictKind::OverLimit`] |
//! | Slot is a configured teaching period | [`ConflictKind::InvalidSlot`] |
//!
//! # Reference
//! Schaerf (1999), "A Survey of Automated Timetabling", Sec. 2.1 (hard constraints)

mod occupancy;
mod validator;

pub use occupancy::PartialSchedule;
pub use validator::{Catalog, ConstraintValidator};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::EntityKind;

/// Which load limit was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitKind {
    /// Teacher sessions per day.
    TeacherDaily,
    /// Teacher sessions per week.
    TeacherWeekly,
    /// Section classes per day.
    SectionDaily,
    /// Teacher back-to-back periods.
    TeacherConsecutive,
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TeacherDaily => "teacher daily limit",
            Self::TeacherWeekly => "teacher weekly limit",
            Self::SectionDaily => "section daily limit",
            Self::TeacherConsecutive => "teacher consecutive limit",
        })
    }
}

/// Category of a hard-constraint violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConflictKind {
    /// Two classes share a teacher, room, or section in one slot.
    DoubleBooking {
        /// The shared entity.
        entity: EntityKind,
    },
    /// The room has fewer seats than the section has students.
    CapacityExceeded,
    /// A lab course sits in a non-lab room.
    RoomTypeMismatch,
    /// The teacher declared the slot unavailable.
    UnavailableSlot,
    /// A load limit is exceeded.
    OverLimit {
        /// The limit.
        limit: LimitKind,
    },
    /// The slot is not a configured teaching period.
    InvalidSlot,
    /// A class names an entity that does not exist.
    UnknownReference {
        /// Kind of the missing entity.
        entity: EntityKind,
    },
    /// An assignment's placed and unplaced hours do not add up.
    SessionCountMismatch,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DoubleBooking { entity } => write!(f, "{entity} double booking"),
            Self::CapacityExceeded => f.write_str("capacity exceeded"),
            Self::RoomTypeMismatch => f.write_str("room type mismatch"),
            Self::UnavailableSlot => f.write_str("unavailable slot"),
            Self::OverLimit { limit } => write!(f, "{limit} exceeded"),
            Self::InvalidSlot => f.write_str("invalid slot"),
            Self::UnknownReference { entity } => write!(f, "unknown {entity}"),
            Self::SessionCountMismatch => f.write_str("session count mismatch"),
        }
    }
}

/// A detected hard-constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    /// Violated rule.
    pub kind: ConflictKind,
    /// Positions of the involved classes in the audited schedule.
    pub classes: Vec<usize>,
    /// Human-readable description.
    pub message: String,
}

impl Conflict {
    /// Creates a conflict.
    pub fn new(kind: ConflictKind, classes: Vec<usize>, message: impl Into<String>) -> Self {
        Self {
            kind,
            classes,
            message: message.into(),
        }
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}
