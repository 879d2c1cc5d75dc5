//! Schedule (solution) model.
//!
//! A schedule is the ordered list of committed placements. Order is commit
//! order, so two runs with the same seed export byte-identical schedules.
//!
//! # Reference
//! Schaerf (1999), "A Survey of Automated Timetabling", Sec. 2 (class-teacher model)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Assignment, TimeSlot};

/// One class session placed at a slot in a room.
///
/// This is the atomic unit the constraint validator checks. A lab block of
/// several periods is stored as one `ScheduledClass` per period, all sharing
/// the same `session_index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledClass {
    /// Course taught.
    pub course_id: String,
    /// Section attending.
    pub section_id: String,
    /// Teacher teaching.
    pub teacher_id: String,
    /// Room used.
    pub room_id: String,
    /// When.
    pub slot: TimeSlot,
    /// 1-based session number within the assignment.
    pub session_index: u32,
}

impl ScheduledClass {
    /// Creates a scheduled class for an assignment.
    pub fn new(
        assignment: &Assignment,
        room_id: impl Into<String>,
        slot: TimeSlot,
        session_index: u32,
    ) -> Self {
        Self {
            course_id: assignment.course_id.clone(),
            section_id: assignment.section_id.clone(),
            teacher_id: assignment.teacher_id.clone(),
            room_id: room_id.into(),
            slot,
            session_index,
        }
    }

    /// The assignment this class realizes.
    pub fn assignment(&self) -> Assignment {
        Assignment::new(&self.course_id, &self.section_id, &self.teacher_id)
    }

    /// Whether this class realizes `assignment`.
    #[inline]
    pub fn belongs_to(&self, assignment: &Assignment) -> bool {
        assignment.matches(&self.course_id, &self.section_id, &self.teacher_id)
    }
}

/// A complete or partial timetable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Placements in commit order.
    pub classes: Vec<ScheduledClass>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a schedule from classes in commit order.
    pub fn from_classes(classes: Vec<ScheduledClass>) -> Self {
        Self { classes }
    }

    /// Appends a class.
    pub fn add_class(&mut self, class: ScheduledClass) {
        self.classes.push(class);
    }

    /// Number of scheduled classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Iterates classes in commit order.
    pub fn iter(&self) -> std::slice::Iter<'_, ScheduledClass> {
        self.classes.iter()
    }

    /// Returns all classes taught by a teacher.
    pub fn classes_for_teacher(&self, teacher_id: &str) -> Vec<&ScheduledClass> {
        self.classes
            .iter()
            .filter(|c| c.teacher_id == teacher_id)
            .collect()
    }

    /// Returns all classes held in a room.
    pub fn classes_for_room(&self, room_id: &str) -> Vec<&ScheduledClass> {
        self.classes.iter().filter(|c| c.room_id == room_id).collect()
    }

    /// Returns all classes attended by a section.
    pub fn classes_for_section(&self, section_id: &str) -> Vec<&ScheduledClass> {
        self.classes
            .iter()
            .filter(|c| c.section_id == section_id)
            .collect()
    }

    /// Returns all classes realizing an assignment.
    pub fn classes_for_assignment(&self, assignment: &Assignment) -> Vec<&ScheduledClass> {
        self.classes
            .iter()
            .filter(|c| c.belongs_to(assignment))
            .collect()
    }

    /// Number of classes per day for a teacher, keyed by day name.
    pub fn teacher_day_loads(&self, teacher_id: &str) -> BTreeMap<String, u32> {
        let mut loads = BTreeMap::new();
        for c in self.classes.iter().filter(|c| c.teacher_id == teacher_id) {
            *loads.entry(c.slot.day.clone()).or_insert(0) += 1;
        }
        loads
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a ScheduledClass;
    type IntoIter = std::slice::Iter<'a, ScheduledClass>;

    fn into_iter(self) -> Self::IntoIter {
        self.classes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schedule() -> Schedule {
        let a1 = Assignment::new("CS101", "S1", "T1");
        let a2 = Assignment::new("MA101", "S1", "T2");
        let mut s = Schedule::new();
        s.add_class(ScheduledClass::new(
            &a1,
            "R1",
            TimeSlot::new("Monday", 1, "09:00", "10:00"),
            1,
        ));
        s.add_class(ScheduledClass::new(
            &a1,
            "R1",
            TimeSlot::new("Tuesday", 1, "09:00", "10:00"),
            2,
        ));
        s.add_class(ScheduledClass::new(
            &a2,
            "R2",
            TimeSlot::new("Monday", 2, "10:00", "11:00"),
            1,
        ));
        s
    }

    #[test]
    fn test_queries() {
        let s = sample_schedule();
        assert_eq!(s.len(), 3);
        assert_eq!(s.classes_for_teacher("T1").len(), 2);
        assert_eq!(s.classes_for_room("R2").len(), 1);
        assert_eq!(s.classes_for_section("S1").len(), 3);
        assert_eq!(
            s.classes_for_assignment(&Assignment::new("CS101", "S1", "T1"))
                .len(),
            2
        );
    }

    #[test]
    fn test_teacher_day_loads() {
        let s = sample_schedule();
        let loads = s.teacher_day_loads("T1");
        assert_eq!(loads["Monday"], 1);
        assert_eq!(loads["Tuesday"], 1);
        assert!(s.teacher_day_loads("T9").is_empty());
    }

    #[test]
    fn test_class_assignment_roundtrip() {
        let s = sample_schedule();
        let a = s.classes[2].assignment();
        assert_eq!(a, Assignment::new("MA101", "S1", "T2"));
        assert!(s.classes[2].belongs_to(&a));
    }

    #[test]
    fn test_serde_preserves_all_attributes() {
        let s = sample_schedule();
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"start_time\":\"09:00\""));
        let back: Schedule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_empty_schedule() {
        let s = Schedule::new();
        assert!(s.is_empty());
        assert_eq!(s.iter().count(), 0);
    }
}
