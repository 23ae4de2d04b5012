//! # Time Block Management
//!
//! Lists a staff member's blocks and creates, edits or deletes them after
//! validating against the staff schedule.
//!
//! Loading the list also sweeps out expired blocks. The sweep is best-effort
//! garbage collection: a failed delete is logged and the block is still left
//! out of the returned list. It is retried the next time the list loads.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use salonbook_core::{
    errors::BookingResult,
    models::time_block::TimeBlock,
    schedule::WeeklySchedule,
    time_block::{sweep_expired, validate_block, SweepOutcome, TimeBlockDraft},
};
use tracing::{debug, info, warn};

use crate::api::SalonApi;

pub struct TimeBlockManager<'a> {
    api: &'a dyn SalonApi,
    staff_id: i64,
    tz: Tz,
}

impl<'a> TimeBlockManager<'a> {
    pub fn new(api: &'a dyn SalonApi, staff_id: i64, tz: Tz) -> Self {
        Self { api, staff_id, tz }
    }

    pub fn staff_id(&self) -> i64 {
        self.staff_id
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Fetches the blocks still relevant at `now`.
    pub async fn load(&self, now: DateTime<Utc>) -> BookingResult<Vec<TimeBlock>> {
        let blocks = self.api.list_time_blocks(self.staff_id).await?;
        let SweepOutcome { kept, expired } = sweep_expired(blocks, now);

        for block in &expired {
            match self.api.delete_time_block(block.id).await {
                Ok(()) => debug!(block_id = block.id, "Deleted expired time block"),
                Err(e) => warn!(block_id = block.id, "Failed to delete expired time block: {}", e),
            }
        }

        Ok(kept)
    }

    pub async fn create(
        &self,
        schedule: &WeeklySchedule,
        draft: &TimeBlockDraft,
        now: DateTime<Utc>,
    ) -> BookingResult<TimeBlock> {
        let validated = validate_block(schedule, draft, self.tz, now)?;
        let block = self
            .api
            .create_time_block(self.staff_id, &validated.to_request())
            .await?;
        info!(block_id = block.id, staff_id = self.staff_id, "Created time block");
        Ok(block)
    }

    pub async fn update(
        &self,
        block_id: i64,
        schedule: &WeeklySchedule,
        draft: &TimeBlockDraft,
        now: DateTime<Utc>,
    ) -> BookingResult<TimeBlock> {
        let validated = validate_block(schedule, draft, self.tz, now)?;
        let block = self
            .api
            .update_time_block(block_id, &validated.to_request())
            .await?;
        info!(block_id = block.id, staff_id = self.staff_id, "Updated time block");
        Ok(block)
    }

    /// Deletes a block once `confirm` agrees. Returns whether it was deleted.
    pub async fn delete<F>(&self, block_id: i64, confirm: F) -> BookingResult<bool>
    where
        F: FnOnce() -> bool,
    {
        if !confirm() {
            debug!(block_id, "Time block deletion declined");
            return Ok(false);
        }
        self.api.delete_time_block(block_id).await?;
        info!(block_id, "Deleted time block");
        Ok(true)
    }
}

/// Create/edit form state for a single time block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeBlockForm {
    pub draft: TimeBlockDraft,
    /// Block being edited; `None` means the form creates a new block.
    pub editing: Option<i64>,
    pub error: Option<String>,
}

impl TimeBlockForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads an existing block into the form for editing.
    pub fn edit(block: &TimeBlock, tz: Tz) -> Option<Self> {
        Some(Self {
            draft: TimeBlockDraft::from_block(block, tz)?,
            editing: Some(block.id),
            error: None,
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Submits the form. On failure the input stays in place and `error`
    /// holds the message to show.
    pub async fn submit(
        &mut self,
        manager: &TimeBlockManager<'_>,
        schedule: &WeeklySchedule,
        now: DateTime<Utc>,
    ) -> Option<TimeBlock> {
        let result = match self.editing {
            Some(block_id) => manager.update(block_id, schedule, &self.draft, now).await,
            None => manager.create(schedule, &self.draft, now).await,
        };

        match result {
            Ok(block) => {
                self.clear();
                Some(block)
            }
            Err(e) => {
                self.error = Some(e.user_message());
                None
            }
        }
    }
}
