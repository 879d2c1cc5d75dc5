//! Placement requests.
//!
//! A request is one session the search has to place: a single period for a
//! theory course, a back-to-back block of periods for a lab.

use serde::{Deserialize, Serialize};

use crate::constraints::Catalog;
use crate::models::Assignment;

/// One session of an assignment awaiting placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Position in expansion order.
    pub id: usize,
    /// Index of the originating assignment.
    pub assignment: usize,
    /// Course taught.
    pub course_id: String,
    /// Section attending.
    pub section_id: String,
    /// Teacher teaching.
    pub teacher_id: String,
    /// 1-based session number within the assignment.
    pub session_index: u32,
    /// Number of back-to-back periods.
    pub periods: u32,
    /// Whether the course is a lab.
    pub is_lab: bool,
    /// Weekly hours of the course.
    pub hours_per_week: u32,
}

impl Request {
    /// Lexicographic identity used by the `ById` tie-breaker.
    pub fn sort_key(&self) -> (&str, &str, &str, u32) {
        (
            self.course_id.as_str(),
            self.section_id.as_str(),
            self.teacher_id.as_str(),
            self.session_index,
        )
    }
}

/// Expands assignments into requests.
///
/// Theory courses yield `hours_per_week` one-period requests. Lab courses
/// yield `ceil(hours_per_week / lab_duration)` blocks of `lab_duration`
/// periods; the last block covers the remainder. Assignments whose course
/// is unknown yield nothing.
pub fn expand_requests(
    assignments: &[Assignment],
    catalog: &Catalog<'_>,
    lab_duration: u32,
) -> Vec<Request> {
    let lab_duration = lab_duration.max(1);
    let mut requests = Vec::new();

    for (idx, a) in assignments.iter().enumerate() {
        let Some(course) = catalog.course(&a.course_id) else {
            continue;
        };
        let hours = course.hours_per_week;
        let blocks: Vec<u32> = if course.is_lab() {
            let mut remaining = hours;
            let mut blocks = Vec::new();
            while remaining > 0 {
                let len = remaining.min(lab_duration);
                blocks.push(len);
                remaining -= len;
            }
            blocks
        } else {
            vec![1; hours as usize]
        };

        for (i, periods) in blocks.into_iter().enumerate() {
            requests.push(Request {
                id: requests.len(),
                assignment: idx,
                course_id: a.course_id.clone(),
                section_id: a.section_id.clone(),
                teacher_id: a.teacher_id.clone(),
                session_index: i as u32 + 1,
                periods,
                is_lab: course.is_lab(),
                hours_per_week: hours,
            });
        }
    }

    requests
}
