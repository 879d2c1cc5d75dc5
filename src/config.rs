//! Institution rules for timetable generation.
//!
//! Load configuration from TOML or JSON to control the weekly grid, load
//! limits, and request ordering without code changes. Every loader
//! validates before returning, so a [`TimetableConfig`] obtained from a
//! loader always yields a [`SlotGrid`].
//!
//! # Examples
//!
//! ```
//! use u_timetable::config::TimetableConfig;
//!
//! let config = TimetableConfig::from_toml_str(r#"
//!     days = ["Monday", "Wednesday"]
//!     max_consecutive_classes = 2
//!
//!     [[periods]]
//!     index = 1
//!     start_time = "09:00"
//!     end_time = "10:00"
//!
//!     [[periods]]
//!     index = 2
//!     start_time = "10:00"
//!     end_time = "11:00"
//! "#).unwrap();
//!
//! assert_eq!(config.slots().count(), 4);
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dispatching::OrderingConfig;
use crate::models::TimeSlot;

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// One period of the daily timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodDef {
    /// Period index as shown to users.
    pub index: u32,
    /// Start time (`HH:MM`).
    pub start_time: String,
    /// End time (`HH:MM`).
    pub end_time: String,
    /// Breaks are part of the day but never schedulable.
    #[serde(default)]
    pub is_break: bool,
}

impl PeriodDef {
    /// Creates a teaching period.
    pub fn new(index: u32, start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            index,
            start_time: start_time.into(),
            end_time: end_time.into(),
            is_break: false,
        }
    }

    /// Creates a break period.
    pub fn break_period(
        index: u32,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            is_break: true,
            ..Self::new(index, start_time, end_time)
        }
    }
}

/// Daily lunch window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LunchWindow {
    /// Start time (`HH:MM`).
    pub start_time: String,
    /// End time (`HH:MM`).
    pub end_time: String,
}

impl LunchWindow {
    /// Creates a lunch window.
    pub fn new(start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }
}

/// Institution timetable configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimetableConfig {
    /// Working days in display order.
    pub days: Vec<String>,
    /// Periods of a day in time order (breaks included).
    pub periods: Vec<PeriodDef>,
    /// Shift start (`HH:MM`).
    pub shift_start: String,
    /// Shift end (`HH:MM`).
    pub shift_end: String,
    /// Lunch window; no teaching period may overlap it.
    ///
    /// Written as `lunch = false` when absent; `false` and `null` both read
    /// back as no lunch.
    #[serde(with = "lunch_field")]
    pub lunch: Option<LunchWindow>,
    /// Default teacher daily limit.
    pub max_lectures_per_day: u32,
    /// Default teacher weekly limit.
    pub max_lectures_per_week: u32,
    /// Section daily limit.
    pub max_classes_per_day: u32,
    /// Teacher back-to-back limit (`None` = unlimited).
    ///
    /// Written as `0` when unlimited; `0` and `null` both read back as
    /// unlimited.
    #[serde(with = "unlimited_field")]
    pub max_consecutive_classes: Option<u32>,
    /// Periods per lab session.
    pub lab_duration_hours: u32,
    /// Department → preferred room type.
    pub room_preferences: BTreeMap<String, String>,
    /// Reject assignments whose teacher lacks the course specialization.
    pub enforce_specializations: bool,
    /// Request ordering.
    pub ordering: OrderingConfig,
}

/// TOML has no null, so an absent lunch window is stored as `false`.
mod lunch_field {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::LunchWindow;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Stored {
        Window(LunchWindow),
        Flag(bool),
    }

    pub fn serialize<S: Serializer>(
        lunch: &Option<LunchWindow>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match lunch {
            Some(window) => window.serialize(serializer),
            None => serializer.serialize_bool(false),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<LunchWindow>, D::Error> {
        match Option::<Stored>::deserialize(deserializer)? {
            Some(Stored::Window(window)) => Ok(Some(window)),
            Some(Stored::Flag(false)) | None => Ok(None),
            Some(Stored::Flag(true)) => Err(D::Error::custom(
                "lunch = true needs start_time and end_time",
            )),
        }
    }
}

/// An unlimited count is stored as `0`.
mod unlimited_field {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(limit: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(limit.unwrap_or(0))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
        Ok(Option::<u32>::deserialize(deserializer)?.filter(|&n| n != 0))
    }
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self {
            days: ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]
                .iter()
                .map(|d| d.to_string())
                .collect(),
            periods: vec![
                PeriodDef::new(1, "09:00", "10:00"),
                PeriodDef::new(2, "10:00", "11:00"),
                PeriodDef::new(3, "11:00", "12:00"),
                PeriodDef::new(4, "12:00", "13:00"),
                PeriodDef::new(5, "14:00", "15:00"),
                PeriodDef::new(6, "15:00", "16:00"),
            ],
            shift_start: "09:00".to_string(),
            shift_end: "16:00".to_string(),
            lunch: Some(LunchWindow::new("13:00", "14:00")),
            max_lectures_per_day: 6,
            max_lectures_per_week: 24,
            max_classes_per_day: 6,
            max_consecutive_classes: Some(3),
            lab_duration_hours: 2,
            room_preferences: BTreeMap::new(),
            enforce_specializations: false,
            ordering: OrderingConfig::default(),
        }
    }
}

impl TimetableConfig {
    /// Creates the default configuration (five days, six periods).
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, choosing the format by extension
    /// (`.json` → JSON, anything else → TOML).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Parses and validates configuration from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Replaces the working days.
    pub fn with_days<I, S>(mut self, days: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.days = days.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the period list.
    pub fn with_periods(mut self, periods: Vec<PeriodDef>) -> Self {
        self.periods = periods;
        self
    }

    /// Sets the shift hours.
    pub fn with_shift(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.shift_start = start.into();
        self.shift_end = end.into();
        self
    }

    /// Sets or clears the lunch window.
    pub fn with_lunch(mut self, lunch: Option<LunchWindow>) -> Self {
        self.lunch = lunch;
        self
    }

    /// Sets the default teacher limits.
    pub fn with_teacher_limits(mut self, per_day: u32, per_week: u32) -> Self {
        self.max_lectures_per_day = per_day;
        self.max_lectures_per_week = per_week;
        self
    }

    /// Sets the section daily limit.
    pub fn with_section_daily_limit(mut self, max: u32) -> Self {
        self.max_classes_per_day = max;
        self
    }

    /// Sets the teacher back-to-back limit.
    pub fn with_max_consecutive(mut self, max: Option<u32>) -> Self {
        self.max_consecutive_classes = max;
        self
    }

    /// Sets the lab session length in periods.
    pub fn with_lab_duration(mut self, hours: u32) -> Self {
        self.lab_duration_hours = hours;
        self
    }

    /// Adds a room-type preference for a department.
    pub fn with_room_preference(
        mut self,
        department: impl Into<String>,
        room_type: impl Into<String>,
    ) -> Self {
        self.room_preferences
            .insert(department.into(), room_type.into());
        self
    }

    /// Sets the request ordering.
    pub fn with_ordering(mut self, ordering: OrderingConfig) -> Self {
        self.ordering = ordering;
        self
    }

    /// Enables or disables specialization enforcement.
    pub fn with_enforced_specializations(mut self, enforce: bool) -> Self {
        self.enforce_specializations = enforce;
        self
    }

    /// All schedulable slots, day-major, in configured order.
    pub fn slots(&self) -> impl Iterator<Item = TimeSlot> + '_ {
        self.days.iter().flat_map(move |day| {
            self.periods
                .iter()
                .filter(|p| !p.is_break)
                .map(move |p| TimeSlot::new(day.clone(), p.index, &p.start_time, &p.end_time))
        })
    }

    /// Whether `period` cannot hold classes.
    ///
    /// Unknown periods are reported as breaks.
    pub fn is_break(&self, period: u32) -> bool {
        self.periods
            .iter()
            .find(|p| p.index == period)
            .is_none_or(|p| p.is_break)
    }

    /// Checks the configuration for structural errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.days.is_empty() {
            return Err(invalid("no working days configured"));
        }
        let mut seen_days = HashSet::new();
        for day in &self.days {
            if day.trim().is_empty() {
                return Err(invalid("empty day name"));
            }
            if !seen_days.insert(day.as_str()) {
                return Err(invalid(format!("duplicate day '{day}'")));
            }
        }

        if self.periods.iter().all(|p| p.is_break) {
            return Err(invalid("no teaching periods configured"));
        }

        let shift_start = parse_clock(&self.shift_start)?;
        let shift_end = parse_clock(&self.shift_end)?;
        if shift_start >= shift_end {
            return Err(invalid(format!(
                "shift start {} is not before shift end {}",
                self.shift_start, self.shift_end
            )));
        }

        let lunch = match &self.lunch {
            Some(l) => {
                let start = parse_clock(&l.start_time)?;
                let end = parse_clock(&l.end_time)?;
                if start >= end || start < shift_start || end > shift_end {
                    return Err(invalid(format!(
                        "lunch window {}-{} does not fall within shift hours {}-{}",
                        l.start_time, l.end_time, self.shift_start, self.shift_end
                    )));
                }
                Some((start, end))
            }
            None => None,
        };

        let mut seen_periods = HashSet::new();
        let mut previous_end = shift_start;
        for p in &self.periods {
            if !seen_periods.insert(p.index) {
                return Err(invalid(format!("duplicate period index {}", p.index)));
            }
            let start = parse_clock(&p.start_time)?;
            let end = parse_clock(&p.end_time)?;
            if start >= end {
                return Err(invalid(format!(
                    "period {} starts at {} but ends at {}",
                    p.index, p.start_time, p.end_time
                )));
            }
            if start < shift_start || end > shift_end {
                return Err(invalid(format!(
                    "period {} ({}-{}) lies outside shift hours",
                    p.index, p.start_time, p.end_time
                )));
            }
            if start < previous_end {
                return Err(invalid(format!(
                    "period {} overlaps the previous period",
                    p.index
                )));
            }
            if let Some((lunch_start, lunch_end)) = lunch {
                if !p.is_break && start < lunch_end && lunch_start < end {
                    return Err(invalid(format!(
                        "teaching period {} overlaps the lunch window",
                        p.index
                    )));
                }
            }
            previous_end = end;
        }

        if self.lab_duration_hours == 0 {
            return Err(invalid("lab_duration_hours must be at least 1"));
        }
        if self.max_lectures_per_day == 0
            || self.max_lectures_per_week == 0
            || self.max_classes_per_day == 0
        {
            return Err(invalid("load limits must be at least 1"));
        }
        if self.max_consecutive_classes == Some(0) {
            return Err(invalid("max_consecutive_classes must be at least 1"));
        }

        self.ordering.validate().map_err(ConfigError::Invalid)
    }

    /// Validates and builds the slot grid used by the engine.
    pub fn grid(&self) -> Result<SlotGrid, ConfigError> {
        self.validate()?;

        let mut periods = Vec::new();
        for p in self.periods.iter().filter(|p| !p.is_break) {
            periods.push(GridPeriod {
                index: p.index,
                start_time: p.start_time.clone(),
                end_time: p.end_time.clone(),
                start_minute: parse_clock(&p.start_time)?,
                end_minute: parse_clock(&p.end_time)?,
            });
        }
        let back_to_back = periods
            .windows(2)
            .map(|w| w[0].end_minute == w[1].start_minute)
            .collect();

        Ok(SlotGrid {
            days: self.days.clone(),
            periods,
            back_to_back,
        })
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}

/// Parses `HH:MM` into minutes after midnight.
pub(crate) fn parse_clock(s: &str) -> Result<u32, ConfigError> {
    let time = NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|e| invalid(format!("invalid time '{s}': {e}")))?;
    Ok(time.num_seconds_from_midnight() / 60)
}

/// A teaching period inside a [`SlotGrid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridPeriod {
    /// Configured period index.
    pub index: u32,
    /// Start time (`HH:MM`).
    pub start_time: String,
    /// End time (`HH:MM`).
    pub end_time: String,
    /// Start, minutes after midnight.
    pub start_minute: u32,
    /// End, minutes after midnight.
    pub end_minute: u32,
}

/// Validated weekly grid of schedulable slots.
///
/// Days and teaching periods are addressed by position (`0..day_count`,
/// `0..period_count`), which is what the occupancy index and the search use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotGrid {
    days: Vec<String>,
    periods: Vec<GridPeriod>,
    back_to_back: Vec<bool>,
}

impl SlotGrid {
    /// Working days in order.
    pub fn days(&self) -> &[String] {
        &self.days
    }

    /// Teaching periods in order.
    pub fn periods(&self) -> &[GridPeriod] {
        &self.periods
    }

    /// Number of working days.
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Number of teaching periods per day.
    pub fn period_count(&self) -> usize {
        self.periods.len()
    }

    /// Number of schedulable slots per week.
    pub fn slot_count(&self) -> usize {
        self.days.len() * self.periods.len()
    }

    /// Position of a day by name.
    pub fn day_position(&self, day: &str) -> Option<usize> {
        self.days.iter().position(|d| d == day)
    }

    /// Position of a teaching period by index.
    pub fn period_position(&self, period: u32) -> Option<usize> {
        self.periods.iter().position(|p| p.index == period)
    }

    /// Grid position of a slot, if it is schedulable.
    pub fn position(&self, day: &str, period: u32) -> Option<(usize, usize)> {
        Some((self.day_position(day)?, self.period_position(period)?))
    }

    /// Builds the slot at a grid position.
    ///
    /// # Panics
    /// Panics if the position is outside the grid.
    pub fn time_slot(&self, day: usize, period: usize) -> TimeSlot {
        let p = &self.periods[period];
        TimeSlot::new(
            self.days[day].clone(),
            p.index,
            p.start_time.clone(),
            p.end_time.clone(),
        )
    }

    /// Whether teaching period `pos` ends exactly when `pos + 1` starts.
    pub fn is_back_to_back(&self, pos: usize) -> bool {
        self.back_to_back.get(pos).copied().unwrap_or(false)
    }

    /// Whether `len` periods starting at `start` form one back-to-back block.
    pub fn block_fits(&self, start: usize, len: usize) -> bool {
        if len == 0 || start + len > self.periods.len() {
            return false;
        }
        (start..start + len - 1).all(|p| self.is_back_to_back(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TimetableConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.slots().count(), 30);

        let first = config.slots().next().unwrap();
        assert_eq!(first, TimeSlot::new("Monday", 1, "09:00", "10:00"));
    }

    #[test]
    fn test_is_break() {
        let config = TimetableConfig::default().with_periods(vec![
            PeriodDef::new(1, "09:00", "10:00"),
            PeriodDef::break_period(2, "10:00", "10:15"),
            PeriodDef::new(3, "10:15", "11:15"),
        ]);
        assert!(!config.is_break(1));
        assert!(config.is_break(2));
        assert!(config.is_break(99));
        assert_eq!(config.slots().filter(|s| s.day == "Monday").count(), 2);
    }

    #[test]
    fn test_rejects_empty_days() {
        let config = TimetableConfig::default().with_days(Vec::<String>::new());
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_empty_periods() {
        let config = TimetableConfig::default().with_periods(Vec::new());
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let only_breaks = TimetableConfig::default()
            .with_periods(vec![PeriodDef::break_period(1, "09:00", "10:00")]);
        assert!(only_breaks.validate().is_err());
    }

    #[test]
    fn test_rejects_lunch_outside_shift() {
        let config =
            TimetableConfig::default().with_lunch(Some(LunchWindow::new("16:30", "17:00")));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("lunch"));
    }

    #[test]
    fn test_rejects_period_overlapping_lunch() {
        let config = TimetableConfig::default().with_periods(vec![
            PeriodDef::new(1, "12:00", "13:30"),
            PeriodDef::new(2, "14:00", "15:00"),
        ]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_times() {
        let config = TimetableConfig::default()
            .with_periods(vec![PeriodDef::new(1, "9 o'clock", "10:00")]);
        assert!(config.validate().is_err());

        let reversed =
            TimetableConfig::default().with_periods(vec![PeriodDef::new(1, "10:00", "09:00")]);
        assert!(reversed.validate().is_err());

        let overlapping = TimetableConfig::default().with_periods(vec![
            PeriodDef::new(1, "09:00", "10:00"),
            PeriodDef::new(2, "09:30", "10:30"),
        ]);
        assert!(overlapping.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_limits() {
        assert!(TimetableConfig::default()
            .with_lab_duration(0)
            .validate()
            .is_err());
        assert!(TimetableConfig::default()
            .with_teacher_limits(0, 10)
            .validate()
            .is_err());
        assert!(TimetableConfig::default()
            .with_max_consecutive(Some(0))
            .validate()
            .is_err());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = TimetableConfig::from_toml_str(
            r#"
            max_lectures_per_day = 4
            lab_duration_hours = 3

            [room_preferences]
            PHY = "lab"
            "#,
        )
        .unwrap();
        assert_eq!(config.max_lectures_per_day, 4);
        assert_eq!(config.lab_duration_hours, 3);
        assert_eq!(config.days.len(), 5);
        assert_eq!(config.room_preferences["PHY"], "lab");
    }

    #[test]
    fn test_from_toml_rejects_invalid() {
        let err = TimetableConfig::from_toml_str("days = []").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = TimetableConfig::from_toml_str("days = 5").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_from_json() {
        let config = TimetableConfig::from_json_str(
            r#"{
                "days": ["Monday"],
                "periods": [{"index": 1, "start_time": "09:00", "end_time": "10:00"}],
                "lunch": null
            }"#,
        )
        .unwrap();
        assert_eq!(config.slots().count(), 1);
        assert!(config.lunch.is_none());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = TimetableConfig::default().with_room_preference("CSE", "lab");
        let text = toml::to_string(&config).unwrap();
        let back = TimetableConfig::from_toml_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_disabled_lunch_and_consecutive_roundtrip() {
        let config = TimetableConfig::default()
            .with_lunch(None)
            .with_max_consecutive(None)
            .with_periods(vec![
                PeriodDef::new(1, "12:00", "13:00"),
                PeriodDef::new(2, "13:00", "14:00"),
            ]);
        config.validate().unwrap();

        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("lunch = false"));
        assert!(text.contains("max_consecutive_classes = 0"));
        let back = TimetableConfig::from_toml_str(&text).unwrap();
        assert_eq!(back, config);

        let json = serde_json::to_string(&config).unwrap();
        let back = TimetableConfig::from_json_str(&json).unwrap();
        assert_eq!(back, config);
        assert!(back.lunch.is_none());
        assert_eq!(back.max_consecutive_classes, None);
    }

    #[test]
    fn test_lunch_and_consecutive_sentinels() {
        let config = TimetableConfig::from_toml_str("lunch = false\nmax_consecutive_classes = 0")
            .unwrap();
        assert!(config.lunch.is_none());
        assert_eq!(config.max_consecutive_classes, None);

        let config = TimetableConfig::from_json_str(r#"{"max_consecutive_classes": null}"#).unwrap();
        assert_eq!(config.max_consecutive_classes, None);
        assert!(config.lunch.is_some());

        let config = TimetableConfig::from_toml_str(
            "max_consecutive_classes = 2\n[lunch]\nstart_time = \"13:00\"\nend_time = \"14:00\"",
        )
        .unwrap();
        assert_eq!(config.max_consecutive_classes, Some(2));
        assert_eq!(config.lunch, Some(LunchWindow::new("13:00", "14:00")));

        let err = TimetableConfig::from_toml_str("lunch = true").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_grid_back_to_back() {
        let grid = TimetableConfig::default().grid().unwrap();
        assert_eq!(grid.day_count(), 5);
        assert_eq!(grid.period_count(), 6);
        assert_eq!(grid.slot_count(), 30);

        // 12:00-13:00 and 14:00-15:00 are split by lunch
        assert!(grid.is_back_to_back(0));
        assert!(!grid.is_back_to_back(3));
        assert!(grid.block_fits(0, 2));
        assert!(grid.block_fits(2, 2));
        assert!(!grid.block_fits(3, 2));
        assert!(!grid.block_fits(5, 2));
        assert!(grid.block_fits(5, 1));
    }

    #[test]
    fn test_grid_positions() {
        let grid = TimetableConfig::default().grid().unwrap();
        assert_eq!(grid.position("Tuesday", 5), Some((1, 4)));
        assert_eq!(grid.position("Sunday", 1), None);
        assert_eq!(grid.position("Monday", 9), None);
        assert_eq!(
            grid.time_slot(4, 5),
            TimeSlot::new("Friday", 6, "15:00", "16:00")
        );
    }
}
