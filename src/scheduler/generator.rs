//! Timetable generation entry points.
//!
//! # Algorithm
//!
//! 1. Validate the configuration into a [`SlotGrid`] and the input records.
//! 2. Expand assignments into requests.
//! 3. With a non-default seed, permute the requests with a seeded ChaCha8
//!    stream.
//! 4. Compute static candidates per request; requests without any are
//!    reported unplaced with a reason. With a non-default seed, each
//!    request's start list is shuffled by the same stream.
//! 5. Stable-sort requests with the configured rule engine.
//! 6. Run the backtracking search.
//! 7. Audit the result: full constraint rescan plus per-assignment hour
//!    accounting.
//!
//! The RNG is created once per run and threaded explicitly, so runs never
//! interfere and the same seed reproduces the same schedule.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, error, info};

use super::candidates::build_candidates;
use super::request::expand_requests;
use super::search::{BacktrackingSearch, Pending};
use super::{CandidateSet, GenerationReport, Request, UnplacedReason, UnplacedRequest};
use crate::config::{SlotGrid, TimetableConfig};
use crate::constraints::{Catalog, Conflict, ConflictKind, ConstraintValidator};
use crate::dispatching::PriorityContext;
use crate::error::{EntityKind, TimetableError};
use crate::models::{Assignment, Course, Room, Schedule, Section, Teacher};
use crate::validation::validate_input;

/// Seed that selects the built-in (unpermuted) order.
pub const DEFAULT_SEED: u64 = 0;

/// Minimum attempt budget.
pub const MIN_ATTEMPTS: u64 = 10_000;

/// Attempt budget per request.
pub const ATTEMPTS_PER_REQUEST: u64 = 1_000;

/// Default attempt budget for a number of requests.
pub fn default_max_attempts(requests: usize) -> u64 {
    MIN_ATTEMPTS.max(ATTEMPTS_PER_REQUEST.saturating_mul(requests as u64))
}

/// Input container for generation.
#[derive(Debug, Clone, Default)]
pub struct TimetableProblem {
    /// Courses offered.
    pub courses: Vec<Course>,
    /// Teaching staff.
    pub teachers: Vec<Teacher>,
    /// Available rooms.
    pub rooms: Vec<Room>,
    /// Student sections.
    pub sections: Vec<Section>,
    /// Who teaches what to whom.
    pub assignments: Vec<Assignment>,
}

impl TimetableProblem {
    /// Creates an empty problem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a course.
    pub fn with_course(mut self, course: Course) -> Self {
        self.courses.push(course);
        self
    }

    /// Adds a teacher.
    pub fn with_teacher(mut self, teacher: Teacher) -> Self {
        self.teachers.push(teacher);
        self
    }

    /// Adds a room.
    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    /// Adds a section.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Adds an assignment.
    pub fn with_assignment(mut self, assignment: Assignment) -> Self {
        self.assignments.push(assignment);
        self
    }

    /// Weekly hours required by all assignments with a known course.
    pub fn total_hours(&self) -> u32 {
        self.assignments
            .iter()
            .filter_map(|a| self.courses.iter().find(|c| c.id == a.course_id))
            .map(|c| c.hours_per_week)
            .sum()
    }
}

/// Backtracking timetable generator.
///
/// # Example
///
/// ```
/// use u_timetable::config::TimetableConfig;
/// use u_timetable::models::{Assignment, Course, Room, Section, Teacher};
/// use u_timetable::scheduler::{TimetableGenerator, TimetableProblem};
///
/// let problem = TimetableProblem::new()
///     .with_course(Course::theory("CS101", 3))
///     .with_teacher(Teacher::new("T1"))
///     .with_room(Room::classroom("R1", 60))
///     .with_section(Section::new("S1", 50))
///     .with_assignment(Assignment::new("CS101", "S1", "T1"));
///
/// let (schedule, report) = TimetableGenerator::new(TimetableConfig::default())
///     .with_seed(42)
///     .generate(&problem)
///     .unwrap();
///
/// assert_eq!(schedule.len(), 3);
/// assert!(report.is_complete());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimetableGenerator {
    config: TimetableConfig,
    seed: Option<u64>,
    max_attempts: Option<u64>,
}

impl TimetableGenerator {
    /// Creates a generator.
    pub fn new(config: TimetableConfig) -> Self {
        Self {
            config,
            seed: None,
            max_attempts: None,
        }
    }

    /// Sets the ordering seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the attempt budget.
    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// The configuration.
    pub fn config(&self) -> &TimetableConfig {
        &self.config
    }

    /// Generates a timetable for a problem.
    pub fn generate(
        &self,
        problem: &TimetableProblem,
    ) -> Result<(Schedule, GenerationReport), TimetableError> {
        generate(
            &problem.courses,
            &problem.teachers,
            &problem.rooms,
            &problem.sections,
            &problem.assignments,
            &self.config,
            self.seed,
            self.max_attempts,
        )
    }
}

/// Generates a timetable.
///
/// `seed`: `None` or [`DEFAULT_SEED`] keeps the built-in order; any other
/// value permutes request and candidate order reproducibly.
/// `max_attempts`: candidate evaluations allowed; defaults to
/// [`default_max_attempts`] of the request count.
///
/// # Errors
/// Fails on an invalid configuration, dangling references, or malformed
/// records. Unplaceable sessions are not errors; see
/// [`GenerationReport::unplaced`].
#[allow(clippy::too_many_arguments)]
pub fn generate(
    courses: &[Course],
    teachers: &[Teacher],
    rooms: &[Room],
    sections: &[Section],
    assignments: &[Assignment],
    config: &TimetableConfig,
    seed: Option<u64>,
    max_attempts: Option<u64>,
) -> Result<(Schedule, GenerationReport), TimetableError> {
    let grid = config.grid()?;
    validate_input(
        courses,
        teachers,
        rooms,
        sections,
        assignments,
        config.enforce_specializations,
    )?;

    let catalog = Catalog::new(courses, teachers, rooms, sections);
    let mut requests = expand_requests(assignments, &catalog, config.lab_duration_hours);
    let max_attempts = max_attempts.unwrap_or_else(|| default_max_attempts(requests.len()));

    info!(
        event = "generation_start",
        assignments = assignments.len(),
        requests = requests.len(),
        slots = grid.slot_count(),
        rooms = rooms.len(),
        seed = ?seed,
        max_attempts = max_attempts,
    );

    let mut rng = seed
        .filter(|&s| s != DEFAULT_SEED)
        .map(ChaCha8Rng::seed_from_u64);
    if let Some(rng) = rng.as_mut() {
        requests.shuffle(rng);
    }

    let mut unplaced = Vec::new();
    let mut feasible: Vec<Request> = Vec::new();
    let mut candidate_sets: Vec<CandidateSet> = Vec::new();
    for request in &requests {
        let teacher = catalog
            .teacher(&request.teacher_id)
            .ok_or_else(|| missing(EntityKind::Teacher, &request.teacher_id))?;
        let section = catalog
            .section(&request.section_id)
            .ok_or_else(|| missing(EntityKind::Section, &request.section_id))?;

        match build_candidates(request, teacher, section, rooms, &grid, config) {
            Ok(mut set) => {
                if let Some(rng) = rng.as_mut() {
                    set.starts.shuffle(rng);
                }
                feasible.push(request.clone());
                candidate_sets.push(set);
            }
            Err(reason) => {
                log_unplaced(request, reason);
                unplaced.push(UnplacedRequest::new(request, reason));
            }
        }
    }

    let context = priority_context(&feasible, &candidate_sets, &catalog, &grid, config);
    let order = config.ordering.engine().sort_indices(&feasible, &context);
    let queue: Vec<Pending<'_>> = order
        .iter()
        .map(|&i| Pending {
            request: &feasible[i],
            candidates: candidate_sets[i].clone(),
        })
        .collect();

    let validator = ConstraintValidator::new(catalog, &grid, config);
    let outcome = BacktrackingSearch::new(&validator, rooms, max_attempts).run(&queue);

    for &(pos, reason) in &outcome.unplaced {
        let request = queue[pos].request;
        if reason == UnplacedReason::BudgetExceeded {
            log_unplaced(request, reason);
        }
        unplaced.push(UnplacedRequest::new(request, reason));
    }

    let schedule = outcome.placed.into_schedule();
    let mut conflicts = validator.validate_full(&schedule.classes);
    conflicts.extend(audit_hours(&schedule, &unplaced, assignments, &validator));
    for c in &conflicts {
        error!(
            event = "audit_conflict",
            kind = %c.kind,
            classes = ?c.classes,
            message = %c.message,
        );
    }

    let report = GenerationReport {
        seed,
        requests: requests.len(),
        placed_sessions: queue.len() - outcome.unplaced.len(),
        attempts: outcome.stats.attempts,
        backtracks: outcome.stats.backtracks,
        restarts: outcome.stats.restarts,
        budget_exhausted: outcome.budget_exhausted,
        unplaced,
        conflicts,
    };

    info!(
        event = "generation_end",
        outcome = ?report.outcome(),
        classes = schedule.len(),
        placed = report.placed_sessions,
        unplaced = report.unplaced.len(),
        attempts = report.attempts,
        backtracks = report.backtracks,
        restarts = report.restarts,
    );

    Ok((schedule, report))
}

fn missing(entity: EntityKind, id: &str) -> TimetableError {
    TimetableError::Reference {
        entity,
        id: id.to_string(),
    }
}

fn log_unplaced(request: &Request, reason: UnplacedReason) {
    debug!(
        event = "request_unplaced",
        course = %request.course_id,
        section = %request.section_id,
        session = request.session_index,
        reason = %reason,
    );
}

fn priority_context(
    requests: &[Request],
    candidates: &[CandidateSet],
    catalog: &Catalog<'_>,
    grid: &SlotGrid,
    config: &TimetableConfig,
) -> PriorityContext {
    let mut context = PriorityContext::new();
    for (request, set) in requests.iter().zip(candidates) {
        context.candidate_counts.insert(request.id, set.len());
        *context
            .teacher_demand
            .entry(request.teacher_id.clone())
            .or_insert(0) += request.periods;
    }

    let teacher_ids: Vec<String> = context.teacher_demand.keys().cloned().collect();
    for id in teacher_ids {
        let Some(teacher) = catalog.teacher(&id) else {
            continue;
        };
        let free = grid
            .days()
            .iter()
            .flat_map(|day| grid.periods().iter().map(move |p| (day, p.index)))
            .filter(|(day, period)| teacher.is_available(day, *period))
            .count() as u32;
        let capacity = free.min(teacher.weekly_limit(config.max_lectures_per_week));
        context.teacher_capacity.insert(id, capacity);
    }
    context
}

/// Per-assignment hour accounting: placed classes plus unplaced periods
/// must equal the course's weekly hours.
fn audit_hours(
    schedule: &Schedule,
    unplaced: &[UnplacedRequest],
    assignments: &[Assignment],
    validator: &ConstraintValidator<'_>,
) -> Vec<Conflict> {
    let mut placed: HashMap<&Assignment, Vec<usize>> = HashMap::new();
    for (i, class) in schedule.iter().enumerate() {
        if let Some(a) = assignments.iter().find(|a| class.belongs_to(a)) {
            placed.entry(a).or_default().push(i);
        }
    }

    let mut conflicts = Vec::new();
    for a in assignments {
        let Some(course) = validator.catalog().course(&a.course_id) else {
            continue;
        };
        let classes = placed.remove(a).unwrap_or_default();
        let missing: u32 = unplaced
            .iter()
            .filter(|u| u.belongs_to(a))
            .map(|u| u.periods)
            .sum();
        let accounted = classes.len() as u32 + missing;
        if accounted != course.hours_per_week {
            conflicts.push(Conflict::new(
                ConflictKind::SessionCountMismatch,
                classes,
                format!(
                    "assignment {a} has {accounted} hours accounted for, course requires {}",
                    course.hours_per_week
                ),
            ));
        }
    }
    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PeriodDef;
    use crate::constraints::LimitKind;
    use crate::scheduler::Outcome;

    fn scenario_a() -> TimetableProblem {
        TimetableProblem::new()
            .with_course(Course::theory("CS101", 3))
            .with_teacher(Teacher::new("T1").with_max_per_day(6))
            .with_room(Room::classroom("R1", 60))
            .with_section(Section::new("S1", 50))
            .with_assignment(Assignment::new("CS101", "S1", "T1"))
    }

    fn one_slot_config() -> TimetableConfig {
        TimetableConfig::default()
            .with_days(["Monday"])
            .with_periods(vec![PeriodDef::new(1, "09:00", "10:00")])
            .with_lunch(None)
    }

    fn campus() -> TimetableProblem {
        let mut p = TimetableProblem::new()
            .with_course(Course::theory("MA101", 4))
            .with_course(Course::theory("CS101", 3))
            .with_course(Course::lab("CS102", 4))
            .with_course(Course::theory("PH101", 3))
            .with_course(Course::lab("PH102", 2))
            .with_teacher(Teacher::new("T1").with_unavailable("Monday", 1))
            .with_teacher(Teacher::new("T2").with_max_per_week(8))
            .with_teacher(Teacher::new("T3").with_max_per_day(3))
            .with_room(Room::classroom("R1", 60))
            .with_room(Room::classroom("R2", 40))
            .with_room(Room::lab("L1", 60));
        for s in ["S1", "S2", "S3"] {
            p = p
                .with_section(Section::new(s, 40))
                .with_assignment(Assignment::new("MA101", s, "T1"))
                .with_assignment(Assignment::new("PH101", s, "T3"));
        }
        p.with_assignment(Assignment::new("CS101", "S1", "T2"))
            .with_assignment(Assignment::new("CS102", "S1", "T2"))
            .with_assignment(Assignment::new("PH102", "S2", "T3"))
    }

    fn assert_accounted(problem: &TimetableProblem, schedule: &Schedule, report: &GenerationReport) {
        for a in &problem.assignments {
            let course = problem.courses.iter().find(|c| c.id == a.course_id).unwrap();
            let placed = schedule.classes_for_assignment(a).len() as u32;
            assert_eq!(placed + report.unplaced_hours_for(a), course.hours_per_week, "{a}");
        }
    }

    #[test]
    fn test_scenario_a_single_course() {
        let problem = scenario_a();
        let (schedule, report) = TimetableGenerator::new(TimetableConfig::default())
            .generate(&problem)
            .unwrap();

        assert_eq!(schedule.len(), 3);
        assert!(report.conflicts.is_empty());
        assert!(report.is_complete());
        assert_eq!(report.requests, 3);
        assert_eq!(report.placed_sessions, 3);

        let mut keys: Vec<_> = schedule.iter().map(|c| c.slot.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 3);
        let sessions: Vec<u32> = schedule.iter().map(|c| c.session_index).collect();
        assert_eq!(sessions, vec![1, 2, 3]);
    }

    #[test]
    fn test_scenario_b_unavailable_only_slot() {
        let problem = TimetableProblem::new()
            .with_course(Course::theory("CS101", 1))
            .with_teacher(Teacher::new("T1").with_unavailable("Monday", 1))
            .with_room(Room::classroom("R1", 60))
            .with_section(Section::new("S1", 50))
            .with_assignment(Assignment::new("CS101", "S1", "T1"));

        let (schedule, report) = TimetableGenerator::new(one_slot_config())
            .generate(&problem)
            .unwrap();

        assert!(schedule.is_empty());
        assert_eq!(report.unplaced.len(), 1);
        assert_eq!(report.unplaced[0].reason, UnplacedReason::TeacherUnavailable);
        assert!(report.conflicts.is_empty());
        assert_eq!(report.outcome(), Outcome::Partial);
    }

    #[test]
    fn test_scenario_c_lab_without_lab_room() {
        let problem = TimetableProblem::new()
            .with_course(Course::lab("CS102", 2))
            .with_teacher(Teacher::new("T1"))
            .with_room(Room::classroom("R1", 60))
            .with_room(Room::classroom("R2", 90))
            .with_section(Section::new("S1", 50))
            .with_assignment(Assignment::new("CS102", "S1", "T1"));

        let (schedule, report) = TimetableGenerator::new(TimetableConfig::default())
            .generate(&problem)
            .unwrap();

        assert!(schedule.is_empty());
        assert_eq!(report.unplaced.len(), 1);
        assert_eq!(report.unplaced[0].reason, UnplacedReason::NoLabRoom);
        assert_eq!(report.unplaced[0].periods, 2);
        assert!(report.conflicts.is_empty());
    }

    #[test]
    fn test_scenario_d_weekly_cap() {
        let config = TimetableConfig::default()
            .with_days(["Monday"])
            .with_periods(vec![
                PeriodDef::new(1, "09:00", "10:00"),
                PeriodDef::new(2, "10:00", "11:00"),
                PeriodDef::new(3, "11:00", "12:00"),
                PeriodDef::new(4, "12:00", "13:00"),
            ])
            .with_max_consecutive(None);
        let problem = TimetableProblem::new()
            .with_course(Course::theory("A", 2))
            .with_course(Course::theory("B", 2))
            .with_teacher(Teacher::new("T1").with_max_per_week(3))
            .with_room(Room::classroom("R1", 60))
            .with_section(Section::new("S1", 30))
            .with_section(Section::new("S2", 30))
            .with_assignment(Assignment::new("A", "S1", "T1"))
            .with_assignment(Assignment::new("B", "S2", "T1"));

        let (schedule, report) = TimetableGenerator::new(config).generate(&problem).unwrap();

        assert_eq!(schedule.len(), 3);
        assert_eq!(report.unplaced.len(), 1);
        assert_eq!(report.unplaced[0].reason, UnplacedReason::SearchExhausted);
        assert!(report.conflicts.is_empty());
        assert!(!report.budget_exhausted);
        assert!(report.attempts <= default_max_attempts(4));
        assert_accounted(&problem, &schedule, &report);
    }

    #[test]
    fn test_campus_is_sound_and_accounted() {
        let problem = campus();
        for seed in [None, Some(1), Some(42), Some(2024)] {
            let mut generator = TimetableGenerator::new(TimetableConfig::default());
            if let Some(s) = seed {
                generator = generator.with_seed(s);
            }
            let (schedule, report) = generator.generate(&problem).unwrap();

            assert!(report.is_sound(), "seed {seed:?}: {:?}", report.conflicts);
            assert_accounted(&problem, &schedule, &report);
            assert!(schedule.iter().all(|c| !(c.teacher_id == "T1"
                && c.slot.day == "Monday"
                && c.slot.period == 1)));
            for c in schedule.iter().filter(|c| c.course_id.ends_with("102")) {
                assert_eq!(c.room_id, "L1");
            }
            assert!(schedule.classes_for_teacher("T2").len() <= 8);
        }
    }

    #[test]
    fn test_lab_sessions_are_back_to_back() {
        let problem = campus();
        let (schedule, report) = TimetableGenerator::new(TimetableConfig::default())
            .with_seed(7)
            .generate(&problem)
            .unwrap();
        assert!(report.is_complete(), "{:?}", report.unplaced);

        let grid = TimetableConfig::default().grid().unwrap();
        let lab = Assignment::new("CS102", "S1", "T2");
        for session in 1..=2 {
            let block: Vec<_> = schedule
                .classes_for_assignment(&lab)
                .into_iter()
                .filter(|c| c.session_index == session)
                .collect();
            assert_eq!(block.len(), 2);
            assert_eq!(block[0].slot.day, block[1].slot.day);
            let p0 = grid.period_position(block[0].slot.period).unwrap();
            let p1 = grid.period_position(block[1].slot.period).unwrap();
            assert_eq!(p1, p0 + 1);
            assert!(grid.is_back_to_back(p0));
        }
    }

    #[test]
    fn test_determinism() {
        let problem = campus();
        let generator = TimetableGenerator::new(TimetableConfig::default()).with_seed(42);

        let (s1, r1) = generator.generate(&problem).unwrap();
        let (s2, r2) = generator.generate(&problem).unwrap();

        assert_eq!(s1, s2);
        assert_eq!(r1, r2);
        assert_eq!(
            serde_json::to_string(&s1).unwrap(),
            serde_json::to_string(&s2).unwrap()
        );
    }

    #[test]
    fn test_default_seed_matches_unseeded() {
        let problem = campus();
        let config = TimetableConfig::default();
        let (unseeded, _) = TimetableGenerator::new(config.clone())
            .generate(&problem)
            .unwrap();
        let (zero, report) = TimetableGenerator::new(config)
            .with_seed(DEFAULT_SEED)
            .generate(&problem)
            .unwrap();
        assert_eq!(unseeded, zero);
        assert_eq!(report.seed, Some(DEFAULT_SEED));
    }

    #[test]
    fn test_validate_full_idempotent_on_output() {
        let problem = campus();
        let config = TimetableConfig::default();
        let (schedule, report) = TimetableGenerator::new(config.clone())
            .with_seed(3)
            .generate(&problem)
            .unwrap();
        assert!(report.unplaced.is_empty());

        let grid = config.grid().unwrap();
        let catalog = Catalog::new(
            &problem.courses,
            &problem.teachers,
            &problem.rooms,
            &problem.sections,
        );
        let validator = ConstraintValidator::new(catalog, &grid, &config);
        assert!(validator.validate_full(&schedule.classes).is_empty());
        assert!(validator.validate_full(&schedule.classes).is_empty());
    }

    #[test]
    fn test_section_and_consecutive_limits_hold() {
        let problem = campus();
        let config = TimetableConfig::default()
            .with_section_daily_limit(3)
            .with_max_consecutive(Some(2));
        let (schedule, report) = TimetableGenerator::new(config.clone())
            .generate(&problem)
            .unwrap();
        assert!(report.is_sound());
        assert_accounted(&problem, &schedule, &report);

        for s in ["S1", "S2", "S3"] {
            let mut per_day: HashMap<&str, usize> = HashMap::new();
            for c in schedule.classes_for_section(s) {
                *per_day.entry(c.slot.day.as_str()).or_default() += 1;
            }
            assert!(per_day.values().all(|&n| n <= 3));
        }
        assert!(!report
            .conflicts
            .iter()
            .any(|c| c.kind == ConflictKind::OverLimit { limit: LimitKind::TeacherConsecutive }));
    }

    #[test]
    fn test_budget_exceeded_is_not_an_error() {
        let problem = campus();
        let (schedule, report) = TimetableGenerator::new(TimetableConfig::default())
            .with_max_attempts(5)
            .generate(&problem)
            .unwrap();

        assert!(report.budget_exhausted);
        assert_eq!(report.attempts, 5);
        assert!(report.unplaced_by_reason(UnplacedReason::BudgetExceeded) > 0);
        assert!(report.is_sound());
        assert_accounted(&problem, &schedule, &report);
    }

    #[test]
    fn test_reference_error() {
        let problem = scenario_a().with_assignment(Assignment::new("CS101", "S1", "T9"));
        let err = TimetableGenerator::new(TimetableConfig::default())
            .generate(&problem)
            .unwrap_err();
        assert!(matches!(
            err,
            TimetableError::Reference { entity: EntityKind::Teacher, ref id } if id == "T9"
        ));
    }

    #[test]
    fn test_invalid_config_error() {
        let err = TimetableGenerator::new(TimetableConfig::default().with_lab_duration(0))
            .generate(&scenario_a())
            .unwrap_err();
        assert!(matches!(err, TimetableError::Config(_)));
    }

    #[test]
    fn test_free_function_matches_builder() {
        let problem = scenario_a();
        let config = TimetableConfig::default();
        let (s1, r1) = generate(
            &problem.courses,
            &problem.teachers,
            &problem.rooms,
            &problem.sections,
            &problem.assignments,
            &config,
            Some(5),
            None,
        )
        .unwrap();
        let (s2, r2) = TimetableGenerator::new(config)
            .with_seed(5)
            .generate(&problem)
            .unwrap();
        assert_eq!(s1, s2);
        assert_eq!(r1, r2);
        assert_eq!(problem.total_hours(), 3);
    }

    #[test]
    fn test_default_budget() {
        assert_eq!(default_max_attempts(0), 10_000);
        assert_eq!(default_max_attempts(25), 25_000);
    }
}
