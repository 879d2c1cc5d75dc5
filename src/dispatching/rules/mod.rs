//! Built-in priority rules.
//!
//! # Categories
//!
//! - **Structural**: LAB_FIRST, LONGEST_COURSE
//! - **Scarcity**: FEWEST_CANDIDATES, BUSIEST_TEACHER
//!
//! # Score Convention
//! All rules return lower scores for higher priority requests.
//!
//! # References
//! - Brélaz (1979), "New Methods to Color the Vertices of a Graph"
//! - Carter, Laporte & Lee (1996), "Examination Timetabling: Algorithmic
//!   Strategies and Applications" (largest-degree and saturation orderings)

use super::{PriorityContext, PriorityRule, RuleScore};
use crate::scheduler::Request;

/// Labs before theory.
///
/// Lab blocks need a lab room and several back-to-back periods on one day;
/// placing them first leaves single periods to fill the gaps.
#[derive(Debug, Clone, Copy)]
pub struct LabFirst;

impl PriorityRule for LabFirst {
    fn name(&self) -> &'static str {
        "LAB_FIRST"
    }

    fn evaluate(&self, request: &Request, _context: &PriorityContext) -> RuleScore {
        if request.is_lab {
            0.0
        } else {
            1.0
        }
    }

    fn description(&self) -> &'static str {
        "Lab Sessions First"
    }
}

/// Fewest static candidates first (most-constrained-first).
///
/// Requests missing from `context.candidate_counts` score as unconstrained.
///
/// # Reference
/// Brélaz (1979), DSATUR: color the most saturated vertex first.
#[derive(Debug, Clone, Copy)]
pub struct FewestCandidates;

impl PriorityRule for FewestCandidates {
    fn name(&self) -> &'static str {
        "FEWEST_CANDIDATES"
    }

    fn evaluate(&self, request: &Request, context: &PriorityContext) -> RuleScore {
        context
            .candidate_counts
            .get(&request.id)
            .map(|&n| n as f64)
            .unwrap_or(f64::MAX)
    }

    fn description(&self) -> &'static str {
        "Fewest Candidates"
    }
}

/// Busiest teacher first.
///
/// Score = −(periods requested from the teacher / periods the teacher can
/// take). Teachers close to saturation go first.
#[derive(Debug, Clone, Copy)]
pub struct BusiestTeacher;

impl PriorityRule for BusiestTeacher {
    fn name(&self) -> &'static str {
        "BUSIEST_TEACHER"
    }

    fn evaluate(&self, request: &Request, context: &PriorityContext) -> RuleScore {
        let demand = context
            .teacher_demand
            .get(&request.teacher_id)
            .copied()
            .unwrap_or(0) as f64;
        let capacity = context
            .teacher_capacity
            .get(&request.teacher_id)
            .copied()
            .unwrap_or(0) as f64;
        if capacity <= 0.0 {
            return if demand > 0.0 { f64::MIN } else { 0.0 };
        }
        -(demand / capacity)
    }

    fn description(&self) -> &'static str {
        "Busiest Teacher"
    }
}

/// Courses with more weekly hours first.
///
/// Spreading a long course over the week gets harder as the week fills.
#[derive(Debug, Clone, Copy)]
pub struct LongestCourse;

impl PriorityRule for LongestCourse {
    fn name(&self) -> &'static str {
        "LONGEST_COURSE"
    }

    fn evaluate(&self, request: &Request, _context: &PriorityContext) -> RuleScore {
        -(request.hours_per_week as f64)
    }

    fn description(&self) -> &'static str {
        "Longest Course"
    }
}
