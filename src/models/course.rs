//! Course model.
//!
//! A course is a subject taught for a fixed number of hours per week.
//! Lab courses are taught in lab rooms, in blocks of back-to-back periods.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A course (subject).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Owning department.
    pub department: String,
    /// Weekly teaching hours (one period = one hour).
    pub hours_per_week: u32,
    /// Theory or lab.
    #[serde(default)]
    pub course_type: CourseType,
}

/// Course classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseType {
    /// Lecture course; any room with enough seats.
    #[default]
    Theory,
    /// Practical course; requires a room of type `"lab"`.
    Lab,
}

impl CourseType {
    /// Lowercase name as used in input records.
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseType::Theory => "theory",
            CourseType::Lab => "lab",
        }
    }
}

impl fmt::Display for CourseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Course {
    /// Creates a theory course with one weekly hour.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            department: String::new(),
            hours_per_week: 1,
            course_type: CourseType::Theory,
        }
    }

    /// Creates a theory course.
    pub fn theory(id: impl Into<String>, hours_per_week: u32) -> Self {
        Self::new(id).with_hours(hours_per_week)
    }

    /// Creates a lab course.
    pub fn lab(id: impl Into<String>, hours_per_week: u32) -> Self {
        Self::new(id)
            .with_hours(hours_per_week)
            .with_type(CourseType::Lab)
    }

    /// Sets the course name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Sets the weekly hours.
    pub fn with_hours(mut self, hours_per_week: u32) -> Self {
        self.hours_per_week = hours_per_week;
        self
    }

    /// Sets the course type.
    pub fn with_type(mut self, course_type: CourseType) -> Self {
        self.course_type = course_type;
        self
    }

    /// Whether the course must be held in a lab.
    #[inline]
    pub fn is_lab(&self) -> bool {
        self.course_type == CourseType::Lab
    }
}
