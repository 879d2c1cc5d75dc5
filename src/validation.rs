//! Input validation for timetable problems.
//!
//! Checks structural integrity of the loaded records before search.
//! Detects:
//! - Duplicate IDs (per entity kind)
//! - Assignments naming unknown courses, teachers, or sections
//! - Courses with zero weekly hours, rooms with zero seats, empty sections
//! - Duplicate assignments
//! - Unqualified teachers (only when specializations are enforced)
//!
//! All errors are collected; nothing short-circuits.

use crate::error::EntityKind;
use crate::models::{Assignment, Course, Room, Section, Teacher};
use std::collections::{HashMap, HashSet};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Id of the offending record.
    pub subject: String,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities of the same kind share an ID.
    DuplicateId,
    /// An assignment references a course that doesn't exist.
    UnknownCourse,
    /// An assignment references a teacher that doesn't exist.
    UnknownTeacher,
    /// An assignment references a section that doesn't exist.
    UnknownSection,
    /// A course requires zero hours per week.
    ZeroHours,
    /// A room has no seats.
    ZeroCapacity,
    /// A section has no students.
    EmptySection,
    /// The same (course, section, teacher) triple appears twice.
    DuplicateAssignment,
    /// The teacher lacks the course specialization.
    UnqualifiedTeacher,
}

impl ValidationErrorKind {
    /// The entity kind a dangling reference points to, if this is a
    /// reference error.
    pub fn missing_entity(&self) -> Option<EntityKind> {
        match self {
            Self::UnknownCourse => Some(EntityKind::Course),
            Self::UnknownTeacher => Some(EntityKind::Teacher),
            Self::UnknownSection => Some(EntityKind::Section),
            _ => None,
        }
    }
}

impl ValidationError {
    fn new(
        kind: ValidationErrorKind,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            subject: subject.into(),
            message: message.into(),
        }
    }
}

fn check_unique<'a>(
    kind: &str,
    ids: impl Iterator<Item = &'a str>,
    errors: &mut Vec<ValidationError>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                id,
                format!("Duplicate {kind} ID: {id}"),
            ));
        }
    }
    seen
}

/// Validates the input records of a timetable problem.
///
/// Checks:
/// 1. No duplicate course, teacher, room, or section IDs
/// 2. Every course has at least one weekly hour
/// 3. Every room has at least one seat and every section one student
/// 4. Every assignment references existing course, teacher, and section
/// 5. No assignment appears twice
/// 6. If `enforce_specializations`, every assigned teacher can teach the course
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    courses: &[Course],
    teachers: &[Teacher],
    rooms: &[Room],
    sections: &[Section],
    assignments: &[Assignment],
    enforce_specializations: bool,
) -> ValidationResult {
    let mut errors = Vec::new();

    check_unique("course", courses.iter().map(|c| c.id.as_str()), &mut errors);
    check_unique("teacher", teachers.iter().map(|t| t.id.as_str()), &mut errors);
    check_unique("room", rooms.iter().map(|r| r.id.as_str()), &mut errors);
    check_unique("section", sections.iter().map(|s| s.id.as_str()), &mut errors);

    for c in courses.iter().filter(|c| c.hours_per_week == 0) {
        errors.push(ValidationError::new(
            ValidationErrorKind::ZeroHours,
            &c.id,
            format!("Course '{}' requires zero hours per week", c.id),
        ));
    }
    for r in rooms.iter().filter(|r| r.capacity == 0) {
        errors.push(ValidationError::new(
            ValidationErrorKind::ZeroCapacity,
            &r.id,
            format!("Room '{}' has zero capacity", r.id),
        ));
    }
    for s in sections.iter().filter(|s| s.student_count == 0) {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptySection,
            &s.id,
            format!("Section '{}' has no students", s.id),
        ));
    }

    let course_map: HashMap<&str, &Course> = courses.iter().map(|c| (c.id.as_str(), c)).collect();
    let teacher_map: HashMap<&str, &Teacher> =
        teachers.iter().map(|t| (t.id.as_str(), t)).collect();
    let section_ids: HashSet<&str> = sections.iter().map(|s| s.id.as_str()).collect();

    let mut seen_assignments = HashSet::new();
    for a in assignments {
        let course = course_map.get(a.course_id.as_str());
        let teacher = teacher_map.get(a.teacher_id.as_str());

        if course.is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownCourse,
                &a.course_id,
                format!("Assignment {a} references unknown course '{}'", a.course_id),
            ));
        }
        if teacher.is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownTeacher,
                &a.teacher_id,
                format!("Assignment {a} references unknown teacher '{}'", a.teacher_id),
            ));
        }
        if !section_ids.contains(a.section_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownSection,
                &a.section_id,
                format!("Assignment {a} references unknown section '{}'", a.section_id),
            ));
        }
        if !seen_assignments.insert(a) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateAssignment,
                &a.course_id,
                format!("Duplicate assignment {a}"),
            ));
        }

        if enforce_specializations {
            if let (Some(course), Some(teacher)) = (course, teacher) {
                if !teacher.can_teach(course) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::UnqualifiedTeacher,
                        &teacher.id,
                        format!(
                            "Teacher '{}' is not qualified for course '{}'",
                            teacher.id, course.id
                        ),
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
