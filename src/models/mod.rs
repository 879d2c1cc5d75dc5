//! Timetabling domain models.
//!
//! Immutable input records (courses, teachers, rooms, sections, teaching
//! assignments) and the produced schedule. The engine treats every input
//! record as read-only for the duration of a generation run.
//!
//! # Domain Mappings
//!
//! | u-timetable | University | School | Training Center |
//! |-------------|-----------|--------|-----------------|
//! | Course | Course | Subject | Module |
//! | Section | Batch/Section | Class | Cohort |
//! | Teacher | Faculty | Teacher | Trainer |
//! | Room | Lecture Hall/Lab | Classroom | Training Room |

mod assignment;
mod course;
mod room;
mod schedule;
mod section;
mod teacher;
mod time_slot;

pub use assignment::Assignment;
pub use course::{Course, CourseType};
pub use room::{Room, CLASSROOM_ROOM_TYPE, LAB_ROOM_TYPE};
pub use schedule::{Schedule, ScheduledClass};
pub use section::Section;
pub use teacher::Teacher;
pub use time_slot::{SlotKey, SlotLookup, TimeSlot};
