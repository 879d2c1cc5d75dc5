//! Constraint validator.
//!
//! # Algorithm
//! `can_place` inspects only the candidate's slot bucket, the teacher's
//! neighbouring periods on the same day (for the consecutive rule), and the
//! O(1) load counters of the [`PartialSchedule`].
//!
//! `validate_full` groups classes by slot and by (entity, day) in ordered
//! maps, so the returned conflicts are deterministic for a given input.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::{Conflict, ConflictKind, LimitKind, PartialSchedule};
use crate::config::{SlotGrid, TimetableConfig};
use crate::error::EntityKind;
use crate::models::{Course, Room, ScheduledClass, Section, Teacher};

/// Id lookup tables over the input records.
#[derive(Debug, Clone, Default)]
pub struct Catalog<'a> {
    courses: HashMap<&'a str, &'a Course>,
    teachers: HashMap<&'a str, &'a Teacher>,
    rooms: HashMap<&'a str, &'a Room>,
    sections: HashMap<&'a str, &'a Section>,
}

impl<'a> Catalog<'a> {
    /// Indexes the records by id. Later duplicates shadow earlier ones.
    pub fn new(
        courses: &'a [Course],
        teachers: &'a [Teacher],
        rooms: &'a [Room],
        sections: &'a [Section],
    ) -> Self {
        Self {
            courses: courses.iter().map(|c| (c.id.as_str(), c)).collect(),
            teachers: teachers.iter().map(|t| (t.id.as_str(), t)).collect(),
            rooms: rooms.iter().map(|r| (r.id.as_str(), r)).collect(),
            sections: sections.iter().map(|s| (s.id.as_str(), s)).collect(),
        }
    }

    /// Looks up a course.
    pub fn course(&self, id: &str) -> Option<&'a Course> {
        self.courses.get(id).copied()
    }

    /// Looks up a teacher.
    pub fn teacher(&self, id: &str) -> Option<&'a Teacher> {
        self.teachers.get(id).copied()
    }

    /// Looks up a room.
    pub fn room(&self, id: &str) -> Option<&'a Room> {
        self.rooms.get(id).copied()
    }

    /// Looks up a section.
    pub fn section(&self, id: &str) -> Option<&'a Section> {
        self.sections.get(id).copied()
    }
}

#[derive(Debug, Clone, Copy)]
struct Limits {
    teacher_daily: u32,
    teacher_weekly: u32,
    section_daily: u32,
    consecutive: Option<u32>,
}

/// Checks classes against every hard rule.
#[derive(Debug, Clone)]
pub struct ConstraintValidator<'a> {
    catalog: Catalog<'a>,
    grid: &'a SlotGrid,
    limits: Limits,
}

struct Resolved<'a> {
    course: &'a Course,
    teacher: &'a Teacher,
    room: &'a Room,
    section: &'a Section,
}

impl<'a> ConstraintValidator<'a> {
    /// Creates a validator for a grid and the limits of a configuration.
    pub fn new(catalog: Catalog<'a>, grid: &'a SlotGrid, config: &TimetableConfig) -> Self {
        Self {
            catalog,
            grid,
            limits: Limits {
                teacher_daily: config.max_lectures_per_day,
                teacher_weekly: config.max_lectures_per_week,
                section_daily: config.max_classes_per_day,
                consecutive: config.max_consecutive_classes,
            },
        }
    }

    /// The record lookups.
    pub fn catalog(&self) -> &Catalog<'a> {
        &self.catalog
    }

    /// The slot grid.
    pub fn grid(&self) -> &'a SlotGrid {
        self.grid
    }

    /// Whether `candidate` may be added to `partial` without violating any
    /// hard rule.
    pub fn can_place(&self, candidate: &ScheduledClass, partial: &PartialSchedule) -> bool {
        self.check(candidate, partial).is_ok()
    }

    /// Returns the first rule `candidate` would violate in `partial`.
    pub fn check(
        &self,
        candidate: &ScheduledClass,
        partial: &PartialSchedule,
    ) -> Result<(), ConflictKind> {
        let pos = self
            .grid
            .position(&candidate.slot.day, candidate.slot.period)
            .ok_or(ConflictKind::InvalidSlot)?;
        self.check_at(candidate, pos, partial)
    }

    /// Like [`check`](Self::check) with the grid position already known.
    pub(crate) fn check_at(
        &self,
        candidate: &ScheduledClass,
        pos: (usize, usize),
        partial: &PartialSchedule,
    ) -> Result<(), ConflictKind> {
        let r = self.resolve(candidate)?;
        self.check_static(candidate, &r)?;

        for other in partial.at(pos) {
            if other.teacher_id == candidate.teacher_id {
                return Err(ConflictKind::DoubleBooking {
                    entity: EntityKind::Teacher,
                });
            }
            if other.room_id == candidate.room_id {
                return Err(ConflictKind::DoubleBooking {
                    entity: EntityKind::Room,
                });
            }
            if other.section_id == candidate.section_id {
                return Err(ConflictKind::DoubleBooking {
                    entity: EntityKind::Section,
                });
            }
        }

        let (day, period) = pos;
        let teacher_id = candidate.teacher_id.as_str();
        if partial.teacher_day_load(teacher_id, day) >= r.teacher.daily_limit(self.limits.teacher_daily)
        {
            return Err(ConflictKind::OverLimit {
                limit: LimitKind::TeacherDaily,
            });
        }
        if partial.teacher_week_load(teacher_id) >= r.teacher.weekly_limit(self.limits.teacher_weekly)
        {
            return Err(ConflictKind::OverLimit {
                limit: LimitKind::TeacherWeekly,
            });
        }
        if partial.section_day_load(&candidate.section_id, day) >= self.limits.section_daily {
            return Err(ConflictKind::OverLimit {
                limit: LimitKind::SectionDaily,
            });
        }

        if let Some(max) = self.limits.consecutive {
            let mut run = 1;
            let mut p = period;
            while p > 0
                && self.grid.is_back_to_back(p - 1)
                && partial.teacher_busy(teacher_id, (day, p - 1))
            {
                run += 1;
                p -= 1;
            }
            let mut p = period;
            while self.grid.is_back_to_back(p) && partial.teacher_busy(teacher_id, (day, p + 1)) {
                run += 1;
                p += 1;
            }
            if run > max {
                return Err(ConflictKind::OverLimit {
                    limit: LimitKind::TeacherConsecutive,
                });
            }
        }

        Ok(())
    }

    fn resolve(&self, class: &ScheduledClass) -> Result<Resolved<'a>, ConflictKind> {
        let missing = |entity| ConflictKind::UnknownReference { entity };
        Ok(Resolved {
            course: self
                .catalog
                .course(&class.course_id)
                .ok_or(missing(EntityKind::Course))?,
            teacher: self
                .catalog
                .teacher(&class.teacher_id)
                .ok_or(missing(EntityKind::Teacher))?,
            room: self
                .catalog
                .room(&class.room_id)
                .ok_or(missing(EntityKind::Room))?,
            section: self
                .catalog
                .section(&class.section_id)
                .ok_or(missing(EntityKind::Section))?,
        })
    }

    /// Rules that depend on the class alone, first failure only.
    fn check_static(&self, class: &ScheduledClass, r: &Resolved<'_>) -> Result<(), ConflictKind> {
        match self.static_violations(class, r).first() {
            Some(&kind) => Err(kind),
            None => Ok(()),
        }
    }

    /// Every class-local rule the class breaks, in rule order.
    fn static_violations(&self, class: &ScheduledClass, r: &Resolved<'_>) -> Vec<ConflictKind> {
        let mut kinds = Vec::new();
        if !r.room.fits(r.section.student_count) {
            kinds.push(ConflictKind::CapacityExceeded);
        }
        if r.course.is_lab() && !r.room.is_lab() {
            kinds.push(ConflictKind::RoomTypeMismatch);
        }
        if !r.teacher.is_available(&class.slot.day, class.slot.period) {
            kinds.push(ConflictKind::UnavailableSlot);
        }
        kinds
    }

    /// Rescans a complete schedule and returns every hard-rule violation.
    ///
    /// Independent of [`PartialSchedule`]; used as the final audit.
    pub fn validate_full(&self, classes: &[ScheduledClass]) -> Vec<Conflict> {
        let mut conflicts = Vec::new();
        let mut by_slot: BTreeMap<(usize, usize), Vec<usize>> = BTreeMap::new();

        for (i, class) in classes.iter().enumerate() {
            let mut complete = true;
            for (entity, known) in [
                (EntityKind::Course, self.catalog.course(&class.course_id).is_some()),
                (EntityKind::Teacher, self.catalog.teacher(&class.teacher_id).is_some()),
                (EntityKind::Room, self.catalog.room(&class.room_id).is_some()),
                (EntityKind::Section, self.catalog.section(&class.section_id).is_some()),
            ] {
                if !known {
                    complete = false;
                    conflicts.push(Conflict::new(
                        ConflictKind::UnknownReference { entity },
                        vec![i],
                        format!("class #{i} ({}) references an unknown {entity}", class.slot),
                    ));
                }
            }

            match self.grid.position(&class.slot.day, class.slot.period) {
                Some(pos) => by_slot.entry(pos).or_default().push(i),
                None => conflicts.push(Conflict::new(
                    ConflictKind::InvalidSlot,
                    vec![i],
                    format!("class #{i} sits on non-teaching slot {}", class.slot.key()),
                )),
            }

            if complete {
                if let Ok(r) = self.resolve(class) {
                    for kind in self.static_violations(class, &r) {
                        conflicts.push(Conflict::new(
                            kind,
                            vec![i],
                            static_message(kind, i, class, &r),
                        ));
                    }
                }
            }
        }

        for (&pos, idxs) in &by_slot {
            let slot = self.grid.time_slot(pos.0, pos.1).key();
            for (a, &i) in idxs.iter().enumerate() {
                for &j in &idxs[a + 1..] {
                    let (x, y) = (&classes[i], &classes[j]);
                    for (entity, id, shared) in [
                        (EntityKind::Teacher, &x.teacher_id, x.teacher_id == y.teacher_id),
                        (EntityKind::Room, &x.room_id, x.room_id == y.room_id),
                        (EntityKind::Section, &x.section_id, x.section_id == y.section_id),
                    ] {
                        if shared {
                            conflicts.push(Conflict::new(
                                ConflictKind::DoubleBooking { entity },
                                vec![i, j],
                                format!("{entity} '{id}' double-booked at {slot}"),
                            ));
                        }
                    }
                }
            }
        }

        self.audit_loads(classes, &by_slot, &mut conflicts);
        conflicts
    }

    fn audit_loads(
        &self,
        classes: &[ScheduledClass],
        by_slot: &BTreeMap<(usize, usize), Vec<usize>>,
        conflicts: &mut Vec<Conflict>,
    ) {
        let mut teacher_day: BTreeMap<(&str, usize), Vec<usize>> = BTreeMap::new();
        let mut teacher_week: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        let mut section_day: BTreeMap<(&str, usize), Vec<usize>> = BTreeMap::new();
        let mut teacher_periods: BTreeMap<(&str, usize), BTreeSet<usize>> = BTreeMap::new();

        for (&(day, period), idxs) in by_slot {
            for &i in idxs {
                let c = &classes[i];
                teacher_day
                    .entry((c.teacher_id.as_str(), day))
                    .or_default()
                    .push(i);
                teacher_week.entry(c.teacher_id.as_str()).or_default().push(i);
                section_day
                    .entry((c.section_id.as_str(), day))
                    .or_default()
                    .push(i);
                teacher_periods
                    .entry((c.teacher_id.as_str(), day))
                    .or_default()
                    .insert(period);
            }
        }

        for (&(teacher_id, day), idxs) in &teacher_day {
            let Some(teacher) = self.catalog.teacher(teacher_id) else {
                continue;
            };
            let max = teacher.daily_limit(self.limits.teacher_daily);
            if idxs.len() as u32 > max {
                conflicts.push(Conflict::new(
                    ConflictKind::OverLimit {
                        limit: LimitKind::TeacherDaily,
                    },
                    idxs.clone(),
                    format!(
                        "teacher '{teacher_id}' has {} sessions on {} (max {max})",
                        idxs.len(),
                        self.grid.days()[day]
                    ),
                ));
            }
        }

        for (&teacher_id, idxs) in &teacher_week {
            let Some(teacher) = self.catalog.teacher(teacher_id) else {
                continue;
            };
            let max = teacher.weekly_limit(self.limits.teacher_weekly);
            if idxs.len() as u32 > max {
                conflicts.push(Conflict::new(
                    ConflictKind::OverLimit {
                        limit: LimitKind::TeacherWeekly,
                    },
                    idxs.clone(),
                    format!(
                        "teacher '{teacher_id}' has {} sessions this week (max {max})",
                        idxs.len()
                    ),
                ));
            }
        }

        for (&(section_id, day), idxs) in &section_day {
            if idxs.len() as u32 > self.limits.section_daily {
                conflicts.push(Conflict::new(
                    ConflictKind::OverLimit {
                        limit: LimitKind::SectionDaily,
                    },
                    idxs.clone(),
                    format!(
                        "section '{section_id}' has {} classes on {} (max {})",
                        idxs.len(),
                        self.grid.days()[day],
                        self.limits.section_daily
                    ),
                ));
            }
        }

        let Some(max) = self.limits.consecutive else {
            return;
        };
        for (&(teacher_id, day), periods) in &teacher_periods {
            let mut run: Vec<usize> = Vec::new();
            let flush = |run: &mut Vec<usize>, conflicts: &mut Vec<Conflict>| {
                if run.len() as u32 > max {
                    let involved = run
                        .iter()
                        .flat_map(|&p| by_slot[&(day, p)].iter().copied())
                        .filter(|&i| classes[i].teacher_id == teacher_id)
                        .collect();
                    conflicts.push(Conflict::new(
                        ConflictKind::OverLimit {
                            limit: LimitKind::TeacherConsecutive,
                        },
                        involved,
                        format!(
                            "teacher '{teacher_id}' teaches {} back-to-back periods on {} (max {max})",
                            run.len(),
                            self.grid.days()[day]
                        ),
                    ));
                }
                run.clear();
            };
            for &p in periods {
                if let Some(&last) = run.last() {
                    if !(last + 1 == p && self.grid.is_back_to_back(last)) {
                        flush(&mut run, conflicts);
                    }
                }
                run.push(p);
            }
            flush(&mut run, conflicts);
        }
    }
}

fn static_message(kind: ConflictKind, i: usize, class: &ScheduledClass, r: &Resolved<'_>) -> String {
    match kind {
        ConflictKind::CapacityExceeded => format!(
            "room '{}' seats {} but section '{}' has {} students",
            r.room.id, r.room.capacity, r.section.id, r.section.student_count
        ),
        ConflictKind::RoomTypeMismatch => format!(
            "lab course '{}' placed in {} room '{}'",
            r.course.id, r.room.room_type, r.room.id
        ),
        ConflictKind::UnavailableSlot => format!(
            "teacher '{}' is unavailable at {}",
            r.teacher.id,
            class.slot.key()
        ),
        other => format!("class #{i}: {other}"),
    }
}
