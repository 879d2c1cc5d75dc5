//! Error types for timetable generation.
//!
//! Generation fails fast with [`TimetableError`] for problems that make a
//! run meaningless (bad configuration, dangling references, malformed
//! input). Requests that merely cannot be placed are not errors: they are
//! reported in [`GenerationReport::unplaced`](crate::scheduler::GenerationReport).

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConfigError;
use crate::constraints::Conflict;
use crate::validation::ValidationError;

/// Kind of input entity, used in reference errors and conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A course.
    Course,
    /// A teacher.
    Teacher,
    /// A room.
    Room,
    /// A student section.
    Section,
}

impl EntityKind {
    /// Lower-case entity name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Course => "course",
            Self::Teacher => "teacher",
            Self::Room => "room",
            Self::Section => "section",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timetable generation error.
#[derive(Debug, Error)]
pub enum TimetableError {
    /// The configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An assignment names an entity that does not exist.
    #[error("unknown {entity} '{id}'")]
    Reference {
        /// Kind of the missing entity.
        entity: EntityKind,
        /// The dangling id.
        id: String,
    },

    /// Input records are malformed.
    #[error("invalid input: {}", summarize(.0))]
    InvalidInput(Vec<ValidationError>),

    /// A produced or supplied schedule violates hard constraints.
    #[error("{} hard-constraint conflict(s), first: {}", .0.len(), first_conflict(.0))]
    ConflictDetected(Vec<Conflict>),
}

impl From<Vec<ValidationError>> for TimetableError {
    /// A dangling reference takes precedence over other integrity errors.
    fn from(errors: Vec<ValidationError>) -> Self {
        let reference = errors
            .iter()
            .find_map(|e| e.kind.missing_entity().map(|entity| (entity, &e.subject)));
        match reference {
            Some((entity, id)) => Self::Reference {
                entity,
                id: id.clone(),
            },
            None => Self::InvalidInput(errors),
        }
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

fn first_conflict(conflicts: &[Conflict]) -> &str {
    conflicts.first().map_or("none", |c| c.message.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_message() {
        let err = TimetableError::Reference {
            entity: EntityKind::Teacher,
            id: "T9".into(),
        };
        assert_eq!(err.to_string(), "unknown teacher 'T9'");
    }

    #[test]
    fn test_config_error_converts() {
        let err: TimetableError = ConfigError::Invalid("no working days configured".into()).into();
        assert!(matches!(err, TimetableError::Config(_)));
        assert!(err.to_string().contains("no working days"));
    }

    #[test]
    fn test_validation_errors_convert() {
        use crate::models::{Assignment, Course, Section};
        use crate::validation::validate_input;

        let courses = vec![Course::theory("C1", 0)];
        let sections = vec![Section::new("S1", 30)];
        let errors = validate_input(&courses, &[], &[], &sections, &[], false).unwrap_err();
        assert!(matches!(
            TimetableError::from(errors),
            TimetableError::InvalidInput(_)
        ));

        let assignments = vec![Assignment::new("C1", "S1", "T1")];
        let errors =
            validate_input(&courses, &[], &[], &sections, &assignments, false).unwrap_err();
        match TimetableError::from(errors) {
            TimetableError::Reference { entity, id } => {
                assert_eq!(entity, EntityKind::Teacher);
                assert_eq!(id, "T1");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
