mod common;

use chrono::{DateTime, TimeZone, Utc};
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use salonbook_client::{
    mock::MockSalonBackend,
    workflows::time_blocks::{TimeBlockForm, TimeBlockManager},
};
use salonbook_core::{
    errors::{BlockValidationError, BookingError},
    models::time_block::{TimeBlock, TimeBlockRequest},
    schedule::WeeklySchedule,
    time_block::TimeBlockDraft,
};
use serde_json::json;

use common::time_block;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2029, 12, 1, 12, 0, 0).unwrap()
}

fn schedule() -> WeeklySchedule {
    WeeklySchedule::normalize(&json!({
        "monday": { "enabled": true, "shifts": [{ "start": "09:00", "end": "17:00" }] }
    }))
}

fn created(request: &TimeBlockRequest, id: i64) -> TimeBlock {
    TimeBlock {
        id,
        starts_at: request.starts_at.to_rfc3339(),
        ends_at: request.ends_at.to_rfc3339(),
        reason: request.reason.clone(),
    }
}

#[test_log::test(tokio::test)]
async fn test_load_sweeps_expired_blocks() {
    let mut api = MockSalonBackend::new();
    api.expect_list_time_blocks().with(eq(20)).returning(|_| {
        Ok(vec![
            time_block(1, "2029-11-01T09:00:00Z", "2029-11-01T10:00:00Z"),
            time_block(2, "2030-01-07T09:00:00Z", "2030-01-07T10:00:00Z"),
            time_block(3, "2029-11-30T09:00:00Z", "sometime"),
            time_block(4, "2029-11-20T09:00:00Z", "2029-11-20T10:00:00Z"),
        ])
    });
    api.expect_delete_time_block()
        .with(eq(1))
        .times(1)
        .returning(|_| Ok(()));
    // Failure on one delete must not surface.
    api.expect_delete_time_block()
        .with(eq(4))
        .times(1)
        .returning(|_| {
            Err(BookingError::Http {
                status: 404,
                message: "Time block not found".to_string(),
            })
        });
    let manager = TimeBlockManager::new(&api, 20, chrono_tz::UTC);

    let blocks = manager.load(now()).await.expect("Load should succeed");

    let ids: Vec<i64> = blocks.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![2, 3]);
}

#[tokio::test]
async fn test_load_propagates_list_failure() {
    let mut api = MockSalonBackend::new();
    api.expect_list_time_blocks().returning(|_| {
        Err(BookingError::Http {
            status: 403,
            message: "Forbidden".to_string(),
        })
    });
    api.expect_delete_time_block().never();
    let manager = TimeBlockManager::new(&api, 20, chrono_tz::UTC);

    let err = manager.load(now()).await.unwrap_err();

    assert_eq!(err.status(), Some(403));
}

#[tokio::test]
async fn test_create_validates_before_sending() {
    let mut api = MockSalonBackend::new();
    api.expect_create_time_block().never();
    let manager = TimeBlockManager::new(&api, 20, chrono_tz::UTC);
    let draft = TimeBlockDraft::new("2030-01-07", "08:00", "08:30", "Early errand");

    let err = manager.create(&schedule(), &draft, now()).await.unwrap_err();

    assert!(matches!(
        err,
        BookingError::Validation(BlockValidationError::OutsideWorkingHours)
    ));
}

#[tokio::test]
async fn test_create_sends_validated_block() {
    let mut api = MockSalonBackend::new();
    api.expect_create_time_block()
        .withf(|staff_id: &i64, request: &TimeBlockRequest| {
            *staff_id == 20
                && request.reason == "Dentist"
                && request.starts_at == Utc.with_ymd_and_hms(2030, 1, 7, 10, 0, 0).unwrap()
                && request.ends_at == Utc.with_ymd_and_hms(2030, 1, 7, 11, 0, 0).unwrap()
        })
        .times(1)
        .returning(|_, request| Ok(created(request, 50)));
    let manager = TimeBlockManager::new(&api, 20, chrono_tz::UTC);
    let draft = TimeBlockDraft::new("2030-01-07", "10:00", "11:00", "Dentist");

    let block = manager.create(&schedule(), &draft, now()).await.expect("Create failed");

    assert_eq!(block.id, 50);
}

#[tokio::test]
async fn test_form_keeps_input_when_backend_rejects() {
    let mut api = MockSalonBackend::new();
    api.expect_create_time_block().times(1).returning(|_, _| {
        Err(BookingError::Http {
            status: 422,
            message: "Block overlaps an existing appointment".to_string(),
        })
    });
    let manager = TimeBlockManager::new(&api, 20, chrono_tz::UTC);
    let draft = TimeBlockDraft::new("2030-01-07", "10:00", "11:00", "Dentist");
    let mut form = TimeBlockForm {
        draft: draft.clone(),
        ..TimeBlockForm::new()
    };

    let result = form.submit(&manager, &schedule(), now()).await;

    assert_eq!(result, None);
    assert_eq!(form.draft, draft);
    assert_eq!(form.error.as_deref(), Some("Block overlaps an existing appointment"));
}

#[tokio::test]
async fn test_form_keeps_input_on_validation_error() {
    let api = MockSalonBackend::new();
    let manager = TimeBlockManager::new(&api, 20, chrono_tz::UTC);
    let draft = TimeBlockDraft::new("2030-01-06", "10:00", "11:00", "Sunday errand");
    let mut form = TimeBlockForm {
        draft: draft.clone(),
        ..TimeBlockForm::new()
    };

    assert_eq!(form.submit(&manager, &schedule(), now()).await, None);
    assert_eq!(form.draft, draft);
    assert_eq!(
        form.error.as_deref(),
        Some("Staff is not scheduled to work this day")
    );
}

#[tokio::test]
async fn test_editing_form_updates_and_clears() {
    let mut api = MockSalonBackend::new();
    api.expect_update_time_block()
        .withf(|block_id: &i64, _: &TimeBlockRequest| *block_id == 8)
        .times(1)
        .returning(|id, request| Ok(created(request, id)));
    api.expect_create_time_block().never();
    let manager = TimeBlockManager::new(&api, 20, chrono_tz::UTC);
    let existing = time_block(8, "2030-01-07T13:00:00Z", "2030-01-07T14:00:00Z");

    let mut form = TimeBlockForm::edit(&existing, chrono_tz::UTC).expect("Block should load");
    assert_eq!(form.draft.start, "13:00");
    form.draft.end = "15:00".to_string();

    let block = form
        .submit(&manager, &schedule(), now())
        .await
        .expect("Update should succeed");

    assert_eq!(block.id, 8);
    assert_eq!(block.ends_at, "2030-01-07T15:00:00+00:00");
    assert_eq!(form, TimeBlockForm::new());
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let mut api = MockSalonBackend::new();
    api.expect_delete_time_block()
        .with(eq(8))
        .times(1)
        .returning(|_| Ok(()));
    let manager = TimeBlockManager::new(&api, 20, chrono_tz::UTC);

    assert_eq!(manager.delete(8, || false).await.unwrap(), false);
    assert_eq!(manager.delete(8, || true).await.unwrap(), true);
}
