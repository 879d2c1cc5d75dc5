//! Timetable generation and KPI evaluation.
//!
//! # Pipeline
//!
//! 1. [`expand_requests`] turns assignments into one request per theory hour
//!    and one block request per lab session.
//! 2. [`build_candidates`] lists the static `(start, room)` placements of
//!    each request, or the reason there are none.
//! 3. Requests are ordered by the configured priority rules and placed by
//!    [`BacktrackingSearch`].
//! 4. [`generate`] audits the result and returns it with a
//!    [`GenerationReport`].
//!
//! # KPI
//!
//! [`TimetableKpi`] computes room utilization, teacher load and idle gaps
//! of a finished schedule.
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Bitner & Reingold (1975), "Backtrack Programming Techniques"

mod candidates;
mod generator;
mod kpi;
mod report;
mod request;
mod search;

pub use candidates::{build_candidates, CandidateSet};
pub use generator::{
    default_max_attempts, generate, TimetableGenerator, TimetableProblem, ATTEMPTS_PER_REQUEST,
    DEFAULT_SEED, MIN_ATTEMPTS,
};
pub use kpi::TimetableKpi;
pub use report::{GenerationReport, Outcome, SearchStats, UnplacedReason, UnplacedRequest};
pub use request::{expand_requests, Request};
pub use search::{BacktrackingSearch, Pending, SearchOutcome};
