//! Teaching assignment model.
//!
//! An assignment declares that one teacher teaches one course to one
//! section. The engine turns each assignment into `hours_per_week`
//! scheduled classes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A (course, section, teacher) binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Assignment {
    /// Course taught.
    pub course_id: String,
    /// Section taught.
    pub section_id: String,
    /// Teacher teaching it.
    pub teacher_id: String,
}

impl Assignment {
    /// Creates an assignment.
    pub fn new(
        course_id: impl Into<String>,
        section_id: impl Into<String>,
        teacher_id: impl Into<String>,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            section_id: section_id.into(),
            teacher_id: teacher_id.into(),
        }
    }

    /// Whether a class or request with these ids belongs to this assignment.
    pub fn matches(&self, course_id: &str, section_id: &str, teacher_id: &str) -> bool {
        self.course_id == course_id && self.section_id == section_id && self.teacher_id == teacher_id
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} by {}",
            self.course_id, self.section_id, self.teacher_id
        )
    }
}
