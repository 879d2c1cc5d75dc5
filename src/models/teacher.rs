//! Teacher model.
//!
//! Teachers carry the qualifications they hold, the weekly slots they cannot
//! teach in, and optional personal load limits. When a limit is absent the
//! institution default from the configuration applies.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Course, SlotKey, SlotLookup};

/// A teaching faculty member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Home department.
    pub department: String,
    /// Course ids or course names this teacher may teach.
    #[serde(default)]
    pub specializations: BTreeSet<String>,
    /// Slots where the teacher cannot be scheduled.
    #[serde(default)]
    pub unavailable_slots: BTreeSet<SlotKey>,
    /// Daily session limit (`None` = configuration default).
    #[serde(default)]
    pub max_lectures_per_day: Option<u32>,
    /// Weekly session limit (`None` = configuration default).
    #[serde(default)]
    pub max_lectures_per_week: Option<u32>,
}

impl Teacher {
    /// Creates a teacher with no restrictions.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            department: String::new(),
            specializations: BTreeSet::new(),
            unavailable_slots: BTreeSet::new(),
            max_lectures_per_day: None,
            max_lectures_per_week: None,
        }
    }

    /// Sets the teacher name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Adds a specialization (course id or name).
    pub fn with_specialization(mut self, course: impl Into<String>) -> Self {
        self.specializations.insert(course.into());
        self
    }

    /// Marks a slot as unavailable.
    pub fn with_unavailable(mut self, day: impl Into<String>, period: u32) -> Self {
        self.unavailable_slots.insert(SlotKey::new(day, period));
        self
    }

    /// Sets the daily session limit.
    pub fn with_max_per_day(mut self, max: u32) -> Self {
        self.max_lectures_per_day = Some(max);
        self
    }

    /// Sets the weekly session limit.
    pub fn with_max_per_week(mut self, max: u32) -> Self {
        self.max_lectures_per_week = Some(max);
        self
    }

    /// Whether the teacher can be scheduled at `(day, period)`.
    pub fn is_available(&self, day: &str, period: u32) -> bool {
        let key: &dyn SlotLookup = &(day, period);
        !self.unavailable_slots.contains(key)
    }

    /// Whether the teacher is qualified for a course.
    ///
    /// A teacher without declared specializations is treated as qualified
    /// for everything.
    pub fn can_teach(&self, course: &Course) -> bool {
        self.specializations.is_empty()
            || self.specializations.contains(&course.id)
            || self.specializations.contains(&course.name)
    }

    /// Effective daily limit given the institution default.
    #[inline]
    pub fn daily_limit(&self, default: u32) -> u32 {
        self.max_lectures_per_day.unwrap_or(default)
    }

    /// Effective weekly limit given the institution default.
    #[inline]
    pub fn weekly_limit(&self, default: u32) -> u32 {
        self.max_lectures_per_week.unwrap_or(default)
    }
}
