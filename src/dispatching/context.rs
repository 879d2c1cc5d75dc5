//! Context for priority rule evaluation.

use std::collections::HashMap;

/// Static problem facts passed to priority rules.
///
/// Computed once, after candidate generation and before ordering.
#[derive(Debug, Clone, Default)]
pub struct PriorityContext {
    /// Number of static candidates per request (request id → count).
    pub candidate_counts: HashMap<usize, usize>,
    /// Periods requested per teacher (teacher_id → periods).
    pub teacher_demand: HashMap<String, u32>,
    /// Schedulable periods per teacher (teacher_id → periods).
    pub teacher_capacity: HashMap<String, u32>,
}

impl PriorityContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the candidate count of a request.
    pub fn with_candidates(mut self, request_id: usize, count: usize) -> Self {
        self.candidate_counts.insert(request_id, count);
        self
    }

    /// Sets the periods requested from a teacher.
    pub fn with_teacher_demand(mut self, teacher_id: impl Into<String>, periods: u32) -> Self {
        self.teacher_demand.insert(teacher_id.into(), periods);
        self
    }

    /// Sets the periods a teacher can take.
    pub fn with_teacher_capacity(mut self, teacher_id: impl Into<String>, periods: u32) -> Self {
        self.teacher_capacity.insert(teacher_id.into(), periods);
        self
    }
}
