//! Indexed working schedule.
//!
//! Classes are addressed by their grid position `(day, period)` as produced
//! by [`SlotGrid::position`](crate::config::SlotGrid::position). Besides the
//! slot buckets the index keeps per-teacher and per-section load counters so
//! that limit checks are O(1).

use std::collections::HashMap;

use crate::models::{Schedule, ScheduledClass};

/// A schedule under construction with LIFO push/pop.
#[derive(Debug, Clone, Default)]
pub struct PartialSchedule {
    classes: Vec<ScheduledClass>,
    positions: Vec<(usize, usize)>,
    by_slot: HashMap<(usize, usize), Vec<usize>>,
    teacher_day: HashMap<String, Vec<u32>>,
    teacher_week: HashMap<String, u32>,
    section_day: HashMap<String, Vec<u32>>,
}

fn bump(counts: &mut HashMap<String, Vec<u32>>, id: &str, day: usize) {
    let days = counts.entry(id.to_string()).or_default();
    if days.len() <= day {
        days.resize(day + 1, 0);
    }
    days[day] += 1;
}

fn drop_one(counts: &mut HashMap<String, Vec<u32>>, id: &str, day: usize) {
    if let Some(n) = counts.get_mut(id).and_then(|days| days.get_mut(day)) {
        *n = n.saturating_sub(1);
    }
}

impl PartialSchedule {
    /// Creates an empty partial schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether nothing is committed.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Committed classes in commit order.
    pub fn classes(&self) -> &[ScheduledClass] {
        &self.classes
    }

    /// Commits a class at a grid position.
    pub fn push(&mut self, class: ScheduledClass, pos: (usize, usize)) {
        let idx = self.classes.len();
        self.by_slot.entry(pos).or_default().push(idx);
        bump(&mut self.teacher_day, &class.teacher_id, pos.0);
        bump(&mut self.section_day, &class.section_id, pos.0);
        *self
            .teacher_week
            .entry(class.teacher_id.clone())
            .or_insert(0) += 1;
        self.classes.push(class);
        self.positions.push(pos);
    }

    /// Removes the most recently committed class.
    pub fn pop(&mut self) -> Option<ScheduledClass> {
        let class = self.classes.pop()?;
        let pos = self.positions.pop()?;
        if let Some(bucket) = self.by_slot.get_mut(&pos) {
            bucket.pop();
        }
        drop_one(&mut self.teacher_day, &class.teacher_id, pos.0);
        drop_one(&mut self.section_day, &class.section_id, pos.0);
        if let Some(n) = self.teacher_week.get_mut(&class.teacher_id) {
            *n = n.saturating_sub(1);
        }
        Some(class)
    }

    /// Pops until `len` classes remain.
    pub fn truncate(&mut self, len: usize) {
        while self.classes.len() > len {
            self.pop();
        }
    }

    /// Classes committed at a grid position.
    pub fn at(&self, pos: (usize, usize)) -> impl Iterator<Item = &ScheduledClass> + '_ {
        self.by_slot
            .get(&pos)
            .into_iter()
            .flatten()
            .map(move |&i| &self.classes[i])
    }

    /// Whether the teacher has a class at a grid position.
    pub fn teacher_busy(&self, teacher_id: &str, pos: (usize, usize)) -> bool {
        self.at(pos).any(|c| c.teacher_id == teacher_id)
    }

    /// Teacher sessions on a day.
    pub fn teacher_day_load(&self, teacher_id: &str, day: usize) -> u32 {
        self.teacher_day
            .get(teacher_id)
            .and_then(|days| days.get(day))
            .copied()
            .unwrap_or(0)
    }

    /// Teacher sessions in the week.
    pub fn teacher_week_load(&self, teacher_id: &str) -> u32 {
        self.teacher_week.get(teacher_id).copied().unwrap_or(0)
    }

    /// Section classes on a day.
    pub fn section_day_load(&self, section_id: &str, day: usize) -> u32 {
        self.section_day
            .get(section_id)
            .and_then(|days| days.get(day))
            .copied()
            .unwrap_or(0)
    }

    /// Converts into a schedule, keeping commit order.
    pub fn into_schedule(self) -> Schedule {
        Schedule::from_classes(self.classes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignment, TimeSlot};

    fn class(teacher: &str, section: &str, day: &str, period: u32) -> ScheduledClass {
        ScheduledClass::new(
            &Assignment::new("C1", section, teacher),
            "R1",
            TimeSlot::new(day, period, "", ""),
            1,
        )
    }

    #[test]
    fn test_push_updates_counters() {
        let mut p = PartialSchedule::new();
        p.push(class("T1", "S1", "Monday", 1), (0, 0));
        p.push(class("T1", "S2", "Monday", 2), (0, 1));
        p.push(class("T1", "S1", "Tuesday", 1), (1, 0));

        assert_eq!(p.len(), 3);
        assert_eq!(p.teacher_day_load("T1", 0), 2);
        assert_eq!(p.teacher_day_load("T1", 1), 1);
        assert_eq!(p.teacher_day_load("T1", 4), 0);
        assert_eq!(p.teacher_week_load("T1"), 3);
        assert_eq!(p.section_day_load("S1", 0), 1);
        assert!(p.teacher_busy("T1", (0, 1)));
        assert!(!p.teacher_busy("T2", (0, 1)));
        assert_eq!(p.at((0, 0)).count(), 1);
    }

    #[test]
    fn test_pop_restores_counters() {
        let mut p = PartialSchedule::new();
        p.push(class("T1", "S1", "Monday", 1), (0, 0));
        p.push(class("T2", "S1", "Monday", 1), (0, 0));

        let popped = p.pop().unwrap();
        assert_eq!(popped.teacher_id, "T2");
        assert_eq!(p.at((0, 0)).count(), 1);
        assert_eq!(p.teacher_week_load("T2"), 0);
        assert_eq!(p.section_day_load("S1", 0), 1);

        p.truncate(0);
        assert!(p.is_empty());
        assert!(p.pop().is_none());
        assert_eq!(p.teacher_week_load("T1"), 0);
        assert_eq!(p.at((0, 0)).count(), 0);
    }

    #[test]
    fn test_into_schedule_keeps_order() {
        let mut p = PartialSchedule::new();
        p.push(class("T1", "S1", "Tuesday", 1), (1, 0));
        p.push(class("T1", "S1", "Monday", 1), (0, 0));

        let s = p.into_schedule();
        assert_eq!(s.classes[0].slot.day, "Tuesday");
        assert_eq!(s.classes[1].slot.day, "Monday");
    }
}
