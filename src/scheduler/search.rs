//! Backtracking search over prioritized requests.
//!
//! # Algorithm
//!
//! 1. Requests are visited in priority order. For the current request,
//!    candidates are tried in order; a lab block is pushed period by period
//!    and rolled back if any period is rejected.
//! 2. An accepted candidate becomes a choice point on an explicit stack.
//!    When a request has no candidate left, the newest choice point is
//!    popped (a backtrack) and resumes at its next candidate.
//! 3. The deepest partial assignment reached is kept as a snapshot. When
//!    the root choice point runs dry, the request at that depth cannot be
//!    placed next to the snapshot: the snapshot is restored and frozen, the
//!    request is reported unplaced, and a new sub-search starts right after
//!    it (a restart).
//! 4. Every candidate evaluation counts against the attempt budget. When
//!    the budget runs out the snapshot is restored and the remaining
//!    requests are reported unplaced.
//!
//! # Reference
//! Bitner & Reingold (1975), "Backtrack Programming Techniques"

use tracing::{debug, info, warn};

use super::{CandidateSet, Request, SearchStats, UnplacedReason};
use crate::constraints::{ConstraintValidator, PartialSchedule};
use crate::models::{Room, ScheduledClass};

/// A request queued for search, with its static candidates.
#[derive(Debug, Clone)]
pub struct Pending<'r> {
    /// The request.
    pub request: &'r Request,
    /// Its candidates, in trial order.
    pub candidates: CandidateSet,
}

/// Result of a search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Committed classes.
    pub placed: PartialSchedule,
    /// Queue positions left unplaced, in position order.
    pub unplaced: Vec<(usize, UnplacedReason)>,
    /// Counters.
    pub stats: SearchStats,
    /// Whether the attempt budget ran out.
    pub budget_exhausted: bool,
}

#[derive(Debug, Clone, Copy)]
struct ChoicePoint {
    pos: usize,
    next: usize,
    pushed: usize,
}

/// Explicit-stack backtracking search.
#[derive(Debug)]
pub struct BacktrackingSearch<'v, 'a> {
    validator: &'v ConstraintValidator<'a>,
    rooms: &'v [Room],
    max_attempts: u64,
}

impl<'v, 'a> BacktrackingSearch<'v, 'a> {
    /// Creates a search.
    pub fn new(validator: &'v ConstraintValidator<'a>, rooms: &'v [Room], max_attempts: u64) -> Self {
        Self {
            validator,
            rooms,
            max_attempts,
        }
    }

    /// Places the queue in order.
    pub fn run(&self, queue: &[Pending<'_>]) -> SearchOutcome {
        let n = queue.len();
        let mut stats = SearchStats::default();
        let mut unplaced = Vec::new();
        let mut partial = PartialSchedule::new();
        let mut stack: Vec<ChoicePoint> = Vec::new();

        let mut root = 0;
        let mut pos = 0;
        let mut next = 0;
        let mut best = partial.clone();
        let mut best_depth = 0;

        while pos < n {
            let pending = &queue[pos];
            let mut accepted = None;

            while next < pending.candidates.len() {
                if stats.attempts >= self.max_attempts {
                    warn!(
                        event = "budget_exhausted",
                        attempts = stats.attempts,
                        placed = root + best_depth - unplaced.len(),
                        remaining = n - (root + best_depth),
                    );
                    for p in root + best_depth..n {
                        unplaced.push((p, UnplacedReason::BudgetExceeded));
                    }
                    return SearchOutcome {
                        placed: best,
                        unplaced,
                        stats,
                        budget_exhausted: true,
                    };
                }
                stats.attempts += 1;
                let idx = next;
                next += 1;
                if let Some(pushed) = self.try_place(pending, idx, &mut partial) {
                    accepted = Some(ChoicePoint { pos, next, pushed });
                    break;
                }
            }

            if let Some(choice) = accepted {
                stack.push(choice);
                pos += 1;
                next = 0;
                if pos - root > best_depth {
                    best_depth = pos - root;
                    best = partial.clone();
                }
                continue;
            }

            match stack.pop() {
                Some(choice) => {
                    stats.backtracks += 1;
                    partial.truncate(partial.len() - choice.pushed);
                    pos = choice.pos;
                    next = choice.next;
                }
                None => {
                    let failed = root + best_depth;
                    let request = queue[failed].request;
                    debug!(
                        event = "request_unplaced",
                        course = %request.course_id,
                        section = %request.section_id,
                        session = request.session_index,
                        reason = %UnplacedReason::SearchExhausted,
                    );
                    unplaced.push((failed, UnplacedReason::SearchExhausted));

                    partial = best.clone();
                    root = failed + 1;
                    pos = root;
                    next = 0;
                    best_depth = 0;
                    if root < n {
                        stats.restarts += 1;
                        info!(
                            event = "search_restart",
                            root = root,
                            frozen_classes = partial.len(),
                            attempts = stats.attempts,
                        );
                    }
                }
            }
        }

        SearchOutcome {
            placed: partial,
            unplaced,
            stats,
            budget_exhausted: false,
        }
    }

    /// Pushes candidate `idx` of `pending` period by period. Returns the
    /// number of classes pushed, or `None` after rolling back.
    fn try_place(
        &self,
        pending: &Pending<'_>,
        idx: usize,
        partial: &mut PartialSchedule,
    ) -> Option<usize> {
        let ((day, start), room) = pending.candidates.get(idx)?;
        let request = pending.request;
        let grid = self.validator.grid();
        let before = partial.len();
        if start + request.periods as usize > grid.period_count() {
            return None;
        }

        for period in start..start + request.periods as usize {
            let class = ScheduledClass {
                course_id: request.course_id.clone(),
                section_id: request.section_id.clone(),
                teacher_id: request.teacher_id.clone(),
                room_id: self.rooms[room].id.clone(),
                slot: grid.time_slot(day, period),
                session_index: request.session_index,
            };
            if self
                .validator
                .check_at(&class, (day, period), partial)
                .is_err()
            {
                partial.truncate(before);
                return None;
            }
            partial.push(class, (day, period));
        }

        Some(partial.len() - before)
    }
}
