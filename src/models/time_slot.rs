//! Weekly time slot model.
//!
//! A time slot is one teaching period on one working day. Slots are derived
//! entirely from [`TimetableConfig`](crate::config::TimetableConfig); the
//! `(day, period)` pair is the slot's identity and the clock times are
//! carried along for display and export.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

/// Identity of a weekly slot: `(day, period)`.
///
/// Used for teacher unavailability and for every occupancy lookup.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    /// Working day name (e.g., "Monday").
    pub day: String,
    /// Configured period index.
    pub period: u32,
}

impl SlotKey {
    /// Creates a slot key.
    pub fn new(day: impl Into<String>, period: u32) -> Self {
        Self {
            day: day.into(),
            period,
        }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} period {}", self.day, self.period)
    }
}

/// Borrowed slot identity.
///
/// Lets ordered collections of [`SlotKey`] be queried with a `(&str, u32)`
/// pair without allocating a key.
pub trait SlotLookup {
    /// Working day name.
    fn day(&self) -> &str;
    /// Configured period index.
    fn period(&self) -> u32;
}

impl SlotLookup for SlotKey {
    fn day(&self) -> &str {
        &self.day
    }

    fn period(&self) -> u32 {
        self.period
    }
}

impl SlotLookup for (&str, u32) {
    fn day(&self) -> &str {
        self.0
    }

    fn period(&self) -> u32 {
        self.1
    }
}

impl<'a> Borrow<dyn SlotLookup + 'a> for SlotKey {
    fn borrow(&self) -> &(dyn SlotLookup + 'a) {
        self
    }
}

// Must agree with the derived `Ord` of `SlotKey`: day, then period.
impl Ord for dyn SlotLookup + '_ {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.day(), self.period()).cmp(&(other.day(), other.period()))
    }
}

impl PartialOrd for dyn SlotLookup + '_ {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for dyn SlotLookup + '_ {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for dyn SlotLookup + '_ {}

/// A concrete slot with its clock times.
///
/// Two slots denote the same place in the week iff their [`SlotKey`]s match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Working day name.
    pub day: String,
    /// Configured period index.
    pub period: u32,
    /// Start time (`HH:MM`).
    pub start_time: String,
    /// End time (`HH:MM`).
    pub end_time: String,
}

impl TimeSlot {
    /// Creates a time slot.
    pub fn new(
        day: impl Into<String>,
        period: u32,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            day: day.into(),
            period,
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }

    /// The `(day, period)` identity of this slot.
    pub fn key(&self) -> SlotKey {
        SlotKey::new(self.day.clone(), self.period)
    }

    /// Whether this slot is the one identified by `key`.
    #[inline]
    pub fn matches(&self, key: &SlotKey) -> bool {
        self.day == key.day && self.period == key.period
    }

    /// Whether two slots occupy the same `(day, period)`.
    #[inline]
    pub fn same_slot(&self, other: &Self) -> bool {
        self.day == other.day && self.period == other.period
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} period {} ({}-{})",
            self.day, self.period, self.start_time, self.end_time
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_identity_ignores_times() {
        let a = TimeSlot::new("Monday", 1, "09:00", "10:00");
        let b = TimeSlot::new("Monday", 1, "", "");
        let c = TimeSlot::new("Tuesday", 1, "09:00", "10:00");

        assert!(a.same_slot(&b));
        assert!(!a.same_slot(&c));
        assert_eq!(a.key(), SlotKey::new("Monday", 1));
        assert!(c.matches(&SlotKey::new("Tuesday", 1)));
    }

    #[test]
    fn test_display() {
        let s = TimeSlot::new("Friday", 6, "15:00", "16:00");
        assert_eq!(s.to_string(), "Friday period 6 (15:00-16:00)");
        assert_eq!(s.key().to_string(), "Friday period 6");
    }

    #[test]
    fn test_slot_key_ordering() {
        let mut keys = vec![
            SlotKey::new("Monday", 3),
            SlotKey::new("Monday", 1),
            SlotKey::new("Friday", 2),
        ];
        keys.sort();
        assert_eq!(keys[0], SlotKey::new("Friday", 2));
        assert_eq!(keys[1], SlotKey::new("Monday", 1));
    }

    #[test]
    fn test_borrowed_lookup() {
        let keys: std::collections::BTreeSet<SlotKey> = [
            SlotKey::new("Friday", 2),
            SlotKey::new("Monday", 1),
            SlotKey::new("Monday", 3),
        ]
        .into_iter()
        .collect();

        let hit: &dyn SlotLookup = &("Monday", 3);
        let miss: &dyn SlotLookup = &("Monday", 2);
        assert!(keys.contains(hit));
        assert!(!keys.contains(miss));
        assert!(!keys.contains(&("Mon", 3u32) as &dyn SlotLookup));
    }
}
