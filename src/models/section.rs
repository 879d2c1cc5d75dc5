//! Student section model.

use serde::{Deserialize, Serialize};

/// A group of students that attends classes together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Unique section identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Owning department (drives room-type preferences).
    pub department: String,
    /// Semester number.
    pub semester: u32,
    /// Number of enrolled students.
    pub student_count: u32,
}

impl Section {
    /// Creates a section.
    pub fn new(id: impl Into<String>, student_count: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            department: String::new(),
            semester: 1,
            student_count,
        }
    }

    /// Sets the section name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Sets the semester.
    pub fn with_semester(mut self, semester: u32) -> Self {
        self.semester = semester;
        self
    }
}
