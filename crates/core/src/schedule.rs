//! # Weekly Schedules
//!
//! Staff schedules arrive from the backend as loosely shaped JSON keyed by
//! weekday name. [`WeeklySchedule::normalize`] turns any such value into a
//! complete seven-day schedule:
//!
//! - every weekday defaults to `{enabled: false, shifts: []}`
//! - a day's config is taken only if `shifts` is a non-empty array in which
//!   every shift has a non-empty `start` and `end`
//! - a day is enabled only if it says `enabled: true`
//!
//! Normalizing an already normalized schedule yields the same schedule.

use std::collections::BTreeMap;

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lowercase weekday names, Monday first, as used for schedule keys.
pub const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

pub fn weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAYS[weekday.num_days_from_monday() as usize]
}

/// Converts `HH:MM` to minutes since midnight.
///
/// `24:00` is accepted so a shift can run to the end of the day. A seconds
/// component is tolerated only when it is `00`, so no precision is lost.
pub fn parse_minutes(value: &str) -> Option<u32> {
    let mut parts = value.trim().split(':');
    let hours: u32 = parts.next()?.parse().ok()?;
    let minutes: u32 = parts.next()?.parse().ok()?;
    if let Some(seconds) = parts.next() {
        if seconds != "00" {
            return None;
        }
    }
    if parts.next().is_some() || minutes >= 60 || hours > 24 || (hours == 24 && minutes > 0) {
        return None;
    }
    Some(hours * 60 + minutes)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub start: String,
    pub end: String,
}

impl Shift {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// True if `[start, end]` lies inside this shift, boundaries included.
    /// A shift whose own times do not parse contains nothing.
    pub fn contains(&self, start_minutes: u32, end_minutes: u32) -> bool {
        match (parse_minutes(&self.start), parse_minutes(&self.end)) {
            (Some(shift_start), Some(shift_end)) => {
                start_minutes >= shift_start && end_minutes <= shift_end
            }
            _ => false,
        }
    }

    fn from_raw(raw: &Value) -> Option<Self> {
        let start = raw.get("start")?.as_str()?.trim();
        let end = raw.get("end")?.as_str()?.trim();
        if start.is_empty() || end.is_empty() {
            return None;
        }
        Some(Self::new(start, end))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub enabled: bool,
    pub shifts: Vec<Shift>,
}

impl DaySchedule {
    pub fn is_working(&self) -> bool {
        self.enabled && !self.shifts.is_empty()
    }

    fn from_raw(raw: &Value) -> Option<Self> {
        let shifts = raw
            .get("shifts")?
            .as_array()?
            .iter()
            .map(Shift::from_raw)
            .collect::<Option<Vec<_>>>()?;
        if shifts.is_empty() {
            return None;
        }
        let enabled = raw.get("enabled").and_then(Value::as_bool) == Some(true);
        Some(Self { enabled, shifts })
    }
}

/// A normalized weekly schedule holding all seven days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "BTreeMap<String, DaySchedule>")]
pub struct WeeklySchedule {
    days: BTreeMap<String, DaySchedule>,
}

impl Default for WeeklySchedule {
    fn default() -> Self {
        Self {
            days: WEEKDAYS
                .iter()
                .map(|day| (day.to_string(), DaySchedule::default()))
                .collect(),
        }
    }
}

impl WeeklySchedule {
    pub fn normalize(raw: &Value) -> Self {
        let mut schedule = Self::default();
        let Some(entries) = raw.as_object() else {
            return schedule;
        };

        for (key, config) in entries {
            let name = key.trim().to_ascii_lowercase();
            let Some(day) = schedule.days.get_mut(&name) else {
                continue;
            };
            if let Some(parsed) = DaySchedule::from_raw(config) {
                *day = parsed;
            }
        }

        schedule
    }

    pub fn day(&self, weekday: Weekday) -> &DaySchedule {
        // Every weekday key is inserted by `default()` and never removed.
        &self.days[weekday_name(weekday)]
    }

    pub fn days(&self) -> impl Iterator<Item = (&str, &DaySchedule)> {
        WEEKDAYS.iter().map(|name| (*name, &self.days[*name]))
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(&self.days).unwrap_or(Value::Null)
    }
}

impl From<Value> for WeeklySchedule {
    fn from(raw: Value) -> Self {
        Self::normalize(&raw)
    }
}

impl From<WeeklySchedule> for BTreeMap<String, DaySchedule> {
    fn from(schedule: WeeklySchedule) -> Self {
        schedule.days
    }
}
