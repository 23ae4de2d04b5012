//! # Time Block Validation
//!
//! Client-side checks for a proposed staff time block, run before anything is
//! sent to the backend. The backend validates again; these checks exist to
//! give immediate feedback.
//!
//! The checks run in a fixed order and the first failure wins:
//!
//! 1. the date must be `YYYY-MM-DD`
//! 2. the staff member must work that weekday
//! 3. start and end must be `HH:MM`
//! 4. end must be after start
//! 5. one shift must contain the whole block (boundaries inclusive, shifts are
//!    never merged)
//! 6. both instants must exist in the salon timezone
//! 7. the block must start after `now`
//!
//! The weekday comes from the calendar date itself, never from an instant, so
//! the caller's local timezone cannot shift it.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::{
    errors::BlockValidationError,
    models::time_block::{TimeBlock, TimeBlockRequest},
    schedule::{parse_minutes, WeeklySchedule},
};

/// The raw form fields for a time block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlockDraft {
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub start: String,
    /// `HH:MM`
    pub end: String,
    pub reason: String,
}

impl TimeBlockDraft {
    pub fn new(
        date: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            start: start.into(),
            end: end.into(),
            reason: reason.into(),
        }
    }

    /// Prefills a draft from an existing block, in the salon timezone.
    pub fn from_block(block: &TimeBlock, tz: Tz) -> Option<Self> {
        let starts_at = block.starts_at_utc()?.with_timezone(&tz);
        let ends_at = block.ends_at_utc()?.with_timezone(&tz);
        Some(Self {
            date: starts_at.format("%Y-%m-%d").to_string(),
            start: starts_at.format("%H:%M").to_string(),
            end: ends_at.format("%H:%M").to_string(),
            reason: block.reason.clone(),
        })
    }
}

/// A block that passed every check, resolved to UTC instants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBlock {
    pub reason: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

impl ValidatedBlock {
    pub fn to_request(&self) -> TimeBlockRequest {
        TimeBlockRequest {
            reason: self.reason.clone(),
            starts_at: self.starts_at,
            ends_at: self.ends_at,
        }
    }
}

pub fn validate_block(
    schedule: &WeeklySchedule,
    draft: &TimeBlockDraft,
    tz: Tz,
    now: DateTime<Utc>,
) -> Result<ValidatedBlock, BlockValidationError> {
    let date = NaiveDate::parse_from_str(draft.date.trim(), "%Y-%m-%d")
        .map_err(|_| BlockValidationError::InvalidDate)?;

    let day = schedule.day(date.weekday());
    if !day.is_working() {
        return Err(BlockValidationError::NotScheduled);
    }

    let start_minutes = parse_minutes(&draft.start).ok_or(BlockValidationError::InvalidTime)?;
    let end_minutes = parse_minutes(&draft.end).ok_or(BlockValidationError::InvalidTime)?;

    if end_minutes <= start_minutes {
        return Err(BlockValidationError::EndNotAfterStart);
    }

    if !day
        .shifts
        .iter()
        .any(|shift| shift.contains(start_minutes, end_minutes))
    {
        return Err(BlockValidationError::OutsideWorkingHours);
    }

    let starts_at = resolve_local(date, start_minutes, tz)?;
    let ends_at = resolve_local(date, end_minutes, tz)?;

    if starts_at <= now {
        return Err(BlockValidationError::InPast);
    }
    if ends_at <= starts_at {
        return Err(BlockValidationError::EndNotAfterStart);
    }

    Ok(ValidatedBlock {
        reason: draft.reason.trim().to_string(),
        starts_at,
        ends_at,
    })
}

/// Resolves a wall-clock time on `date` in `tz`. Times skipped by a DST gap
/// are rejected; times repeated by a DST fold take the earlier instant.
fn resolve_local(
    date: NaiveDate,
    minutes: u32,
    tz: Tz,
) -> Result<DateTime<Utc>, BlockValidationError> {
    let midnight: NaiveDateTime = date
        .and_hms_opt(0, 0, 0)
        .ok_or(BlockValidationError::InvalidDateTime)?;
    let local = midnight + Duration::minutes(i64::from(minutes));
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or(BlockValidationError::InvalidDateTime)
}

/// Result of partitioning a block list around "now".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepOutcome {
    pub kept: Vec<TimeBlock>,
    pub expired: Vec<TimeBlock>,
}

/// Splits off blocks whose end is strictly before `now`.
///
/// Blocks with an unparseable end are kept.
pub fn sweep_expired(blocks: Vec<TimeBlock>, now: DateTime<Utc>) -> SweepOutcome {
    let (expired, kept): (Vec<_>, Vec<_>) = blocks
        .into_iter()
        .partition(|block| block.ends_at_utc().is_some_and(|end| end < now));
    SweepOutcome { kept, expired }
}
