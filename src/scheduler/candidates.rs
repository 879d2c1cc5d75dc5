//! Static candidate generation.
//!
//! Candidates depend only on the input records, never on the partial
//! schedule, so they are computed once per request before search.
//!
//! # Ordering
//! Rooms: preferred type for the section's department first, then the
//! smallest spare capacity, then room id. Starts: day-major, then period.
//! Candidate `i` is `(starts[i / rooms.len()], rooms[i % rooms.len()])`,
//! so rooms vary fastest.

use std::cmp::Reverse;

use super::{Request, UnplacedReason};
use crate::config::{SlotGrid, TimetableConfig};
use crate::models::{Room, Section, Teacher};

/// Static placements of one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    /// Grid positions `(day, period)` where the block may start.
    pub starts: Vec<(usize, usize)>,
    /// Indices of suitable rooms.
    pub rooms: Vec<usize>,
}

impl CandidateSet {
    /// Number of `(start, room)` pairs.
    pub fn len(&self) -> usize {
        self.starts.len() * self.rooms.len()
    }

    /// Whether no pair exists.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `i`-th `(start, room)` pair.
    pub fn get(&self, i: usize) -> Option<((usize, usize), usize)> {
        if i >= self.len() {
            return None;
        }
        let n = self.rooms.len();
        Some((self.starts[i / n], self.rooms[i % n]))
    }
}

/// Computes candidates for a request, or the reason none exist.
pub fn build_candidates(
    request: &Request,
    teacher: &Teacher,
    section: &Section,
    rooms: &[Room],
    grid: &SlotGrid,
    config: &TimetableConfig,
) -> Result<CandidateSet, UnplacedReason> {
    let room_ids = suitable_rooms(request, section, rooms, config)?;
    let starts = feasible_starts(request, teacher, grid, config)?;
    Ok(CandidateSet {
        starts,
        rooms: room_ids,
    })
}

fn suitable_rooms(
    request: &Request,
    section: &Section,
    rooms: &[Room],
    config: &TimetableConfig,
) -> Result<Vec<usize>, UnplacedReason> {
    let typed: Vec<usize> = rooms
        .iter()
        .enumerate()
        .filter(|(_, r)| !request.is_lab || r.is_lab())
        .map(|(i, _)| i)
        .collect();
    if request.is_lab && typed.is_empty() {
        return Err(UnplacedReason::NoLabRoom);
    }

    let mut fitting: Vec<usize> = typed
        .into_iter()
        .filter(|&i| rooms[i].fits(section.student_count))
        .collect();
    if fitting.is_empty() {
        return Err(UnplacedReason::NoRoomLargeEnough);
    }

    let preferred = config.room_preferences.get(&section.department);
    fitting.sort_by_key(|&i| {
        let r = &rooms[i];
        (
            Reverse(preferred.is_some_and(|t| *t == r.room_type)),
            r.capacity - section.student_count,
            r.id.as_str(),
        )
    });
    Ok(fitting)
}

fn feasible_starts(
    request: &Request,
    teacher: &Teacher,
    grid: &SlotGrid,
    config: &TimetableConfig,
) -> Result<Vec<(usize, usize)>, UnplacedReason> {
    let len = request.periods as usize;
    let block_allowed = request.periods <= teacher.daily_limit(config.max_lectures_per_day)
        && request.periods <= config.max_classes_per_day
        && config
            .max_consecutive_classes
            .is_none_or(|max| request.periods <= max);
    if !block_allowed {
        return Err(UnplacedReason::NoContiguousBlock);
    }

    let mut any_block = false;
    let mut starts = Vec::new();
    for (d, day) in grid.days().iter().enumerate() {
        for p in 0..grid.period_count() {
            if !grid.block_fits(p, len) {
                continue;
            }
            any_block = true;
            let available = grid.periods()[p..p + len]
                .iter()
                .all(|gp| teacher.is_available(day, gp.index));
            if available {
                starts.push((d, p));
            }
        }
    }

    match (starts.is_empty(), any_block) {
        (false, _) => Ok(starts),
        (true, true) => Err(UnplacedReason::TeacherUnavailable),
        (true, false) => Err(UnplacedReason::NoContiguousBlock),
    }
}
