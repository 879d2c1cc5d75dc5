//! Course timetabling engine.
//!
//! Assigns every weekly teaching hour of every (course, section, teacher)
//! assignment to a day, a period and a room, subject to hard constraints:
//! no double booking, room capacity and type, teacher availability, and
//! daily/weekly/consecutive load limits. Sessions that cannot be placed are
//! reported with a reason instead of failing the run.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Course`, `Teacher`, `Room`, `Section`,
//!   `Assignment`, `TimeSlot`, `Schedule`
//! - **`config`**: Week grid, limits and ordering, loadable from TOML or JSON
//! - **`validation`**: Input integrity checks (duplicate IDs, dangling refs)
//! - **`constraints`**: Incremental placement checks and full-schedule audit
//! - **`dispatching`**: Priority rules that order requests before search
//! - **`scheduler`**: Candidate generation, backtracking search, reports, KPIs
//!
//! # Example
//!
//! ```
//! use u_timetable::{Assignment, Course, Room, Section, Teacher};
//! use u_timetable::{TimetableConfig, TimetableGenerator, TimetableProblem};
//!
//! let problem = TimetableProblem::new()
//!     .with_course(Course::theory("MA101", 2))
//!     .with_course(Course::lab("CS102", 2))
//!     .with_teacher(Teacher::new("T1"))
//!     .with_room(Room::classroom("R1", 40))
//!     .with_room(Room::lab("L1", 40))
//!     .with_section(Section::new("S1", 35))
//!     .with_assignment(Assignment::new("MA101", "S1", "T1"))
//!     .with_assignment(Assignment::new("CS102", "S1", "T1"));
//!
//! let (schedule, report) = TimetableGenerator::new(TimetableConfig::default())
//!     .generate(&problem)
//!     .unwrap();
//!
//! assert_eq!(schedule.len(), 4);
//! assert!(report.is_complete());
//! ```
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Burke & Petrovic (2002), "Recent Research Directions in Automated Timetabling"

pub mod config;
pub mod constraints;
pub mod dispatching;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use config::{ConfigError, TimetableConfig};
pub use constraints::{Conflict, ConflictKind, ConstraintValidator};
pub use error::{EntityKind, TimetableError};
pub use models::{Assignment, Course, Room, Schedule, ScheduledClass, Section, Teacher, TimeSlot};
pub use scheduler::{
    generate, GenerationReport, Outcome, TimetableGenerator, TimetableKpi, TimetableProblem,
    UnplacedReason, UnplacedRequest,
};
