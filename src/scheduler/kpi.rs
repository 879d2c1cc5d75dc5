//! Timetable quality metrics (KPIs).
//!
//! Computes quality indicators from a generated schedule and its grid.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Room Utilization | Classes in room / schedulable slots per week |
//! | Avg Room Utilization | Mean over rooms hosting at least one class |
//! | Teacher Load | Sessions per teacher per week |
//! | Idle Gaps | Free teaching periods between a day's first and last class |
//!
//! Lunch and break periods are not teaching periods and never count as gaps.
//!
//! # Reference
//! Burke, Mareček, Parkes & Rudová (2010), "A Supernodal Formulation of
//! Vertex Colouring with Applications in Course Timetabling" (compactness)

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::config::SlotGrid;
use crate::models::Schedule;

/// Timetable quality indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimetableKpi {
    /// Number of scheduled classes.
    pub total_classes: usize,
    /// Per-room utilization (0.0..1.0).
    pub room_utilization: BTreeMap<String, f64>,
    /// Average utilization over used rooms (0.0..1.0).
    pub avg_room_utilization: f64,
    /// Sessions per teacher per week.
    pub teacher_load: BTreeMap<String, u32>,
    /// Idle periods per teacher per week.
    pub teacher_idle_gaps: BTreeMap<String, u32>,
    /// Idle periods per section per week.
    pub section_idle_gaps: BTreeMap<String, u32>,
}

impl TimetableKpi {
    /// Computes KPIs for a schedule.
    ///
    /// Classes on slots outside the grid are counted in totals and loads
    /// but ignored for gaps.
    pub fn calculate(schedule: &Schedule, grid: &SlotGrid) -> Self {
        let slots = grid.slot_count().max(1) as f64;

        let mut room_classes: BTreeMap<String, u32> = BTreeMap::new();
        let mut teacher_load: BTreeMap<String, u32> = BTreeMap::new();
        let mut teacher_days: BTreeMap<(&str, usize), BTreeSet<usize>> = BTreeMap::new();
        let mut section_days: BTreeMap<(&str, usize), BTreeSet<usize>> = BTreeMap::new();

        for class in schedule {
            *room_classes.entry(class.room_id.clone()).or_insert(0) += 1;
            *teacher_load.entry(class.teacher_id.clone()).or_insert(0) += 1;
            if let Some((day, period)) = grid.position(&class.slot.day, class.slot.period) {
                teacher_days
                    .entry((class.teacher_id.as_str(), day))
                    .or_default()
                    .insert(period);
                section_days
                    .entry((class.section_id.as_str(), day))
                    .or_default()
                    .insert(period);
            }
        }

        let room_utilization: BTreeMap<String, f64> = room_classes
            .into_iter()
            .map(|(room, n)| (room, n as f64 / slots))
            .collect();
        let avg_room_utilization = if room_utilization.is_empty() {
            0.0
        } else {
            room_utilization.values().sum::<f64>() / room_utilization.len() as f64
        };

        Self {
            total_classes: schedule.len(),
            room_utilization,
            avg_room_utilization,
            teacher_load,
            teacher_idle_gaps: idle_gaps(&teacher_days),
            section_idle_gaps: idle_gaps(&section_days),
        }
    }

    /// Total idle periods across all teachers.
    pub fn total_teacher_gaps(&self) -> u32 {
        self.teacher_idle_gaps.values().sum()
    }

    /// Whether the schedule meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_teacher_gaps: u32, min_utilization: f64) -> bool {
        self.total_teacher_gaps() <= max_teacher_gaps
            && self.avg_room_utilization >= min_utilization
    }
}

fn idle_gaps(days: &BTreeMap<(&str, usize), BTreeSet<usize>>) -> BTreeMap<String, u32> {
    let mut gaps: BTreeMap<String, u32> = BTreeMap::new();
    for (&(id, _), periods) in days {
        let span = match (periods.first(), periods.last()) {
            (Some(first), Some(last)) => last - first + 1,
            _ => 0,
        };
        *gaps.entry(id.to_string()).or_insert(0) += (span - periods.len()) as u32;
    }
    gaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimetableConfig;
    use crate::models::{Assignment, ScheduledClass, TimeSlot};

    fn class(teacher: &str, section: &str, room: &str, day: &str, period: u32) -> ScheduledClass {
        ScheduledClass::new(
            &Assignment::new("C1", section, teacher),
            room,
            TimeSlot::new(day, period, "", ""),
            1,
        )
    }

    #[test]
    fn test_kpi_basic() {
        let grid = TimetableConfig::default().grid().unwrap();
        let schedule = Schedule::from_classes(vec![
            class("T1", "S1", "R1", "Monday", 1),
            class("T1", "S1", "R1", "Monday", 3),
            class("T1", "S2", "R2", "Tuesday", 1),
            class("T2", "S2", "R2", "Monday", 4),
            class("T2", "S2", "R2", "Monday", 5),
        ]);

        let kpi = TimetableKpi::calculate(&schedule, &grid);
        assert_eq!(kpi.total_classes, 5);
        assert_eq!(kpi.teacher_load["T1"], 3);
        assert!((kpi.room_utilization["R1"] - 2.0 / 30.0).abs() < 1e-10);
        assert!((kpi.room_utilization["R2"] - 3.0 / 30.0).abs() < 1e-10);
        assert!((kpi.avg_room_utilization - 2.5 / 30.0).abs() < 1e-10);

        // T1 idles in period 2; lunch between 4 and 5 is not a gap
        assert_eq!(kpi.teacher_idle_gaps["T1"], 1);
        assert_eq!(kpi.teacher_idle_gaps["T2"], 0);
        assert_eq!(kpi.section_idle_gaps["S1"], 1);
        assert_eq!(kpi.total_teacher_gaps(), 1);
        assert!(kpi.meets_thresholds(1, 0.05));
        assert!(!kpi.meets_thresholds(0, 0.05));
    }

    #[test]
    fn test_kpi_empty() {
        let grid = TimetableConfig::default().grid().unwrap();
        let kpi = TimetableKpi::calculate(&Schedule::new(), &grid);
        assert_eq!(kpi.total_classes, 0);
        assert_eq!(kpi.avg_room_utilization, 0.0);
        assert!(kpi.teacher_idle_gaps.is_empty());
    }
}
