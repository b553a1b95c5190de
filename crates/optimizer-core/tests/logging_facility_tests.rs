#![allow(clippy::unwrap_used, clippy::expect_used)]

use optimizer_core::errors::{ExError, OptimizerError};
use optimizer_core::logging_facility::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START, TARGET};
use optimizer_core::logging_facility::test_capture::init_test_capture;
use optimizer_core::{log_op_end, log_op_error, log_op_start};
use std::time::Instant;

#[test]
fn test_start_event_carries_op_and_optimizer_id() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, 5_i64);

    let events = capture.events_for_op(op_name);
    let start = events
        .iter()
        .find(|e| e.event.as_deref() == Some(EVENT_START))
        .expect("Should have start event");

    assert_eq!(start.target, TARGET);
    assert_eq!(start.field("optimizer_id"), Some("5"));
}

#[test]
fn test_unsaved_optimizer_has_no_id_field() {
    let capture = init_test_capture();
    let op_name = "test_log_op_unsaved_unique_2";

    log_op_start!(op_name, None::<i64>, store_id = 4_i64);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].field("optimizer_id"), None);
    assert_eq!(events[0].field("store_id"), Some("4"));
}

#[test]
fn test_end_event_records_duration_and_extra_fields() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_3";
    let started = Instant::now();

    log_op_end!(op_name, 9_i64, started, container_count = 2_u64);

    let events = capture.events_for_op(op_name);
    let end = events
        .iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END))
        .expect("Should have end event");

    assert!(end.field("duration_ms").is_some());
    assert_eq!(end.field("container_count"), Some("2"));
    assert_eq!(end.field("optimizer_id"), Some("9"));
}

#[test]
fn test_error_event_includes_kind_code_and_message() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_4";
    let started = Instant::now();

    let err = ExError::from(OptimizerError::NotFound { optimizer_id: 11 });
    log_op_error!(op_name, 11_i64, started, &err);

    let error_events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();

    assert_eq!(error_events.len(), 1, "Should have exactly one error event");
    assert_eq!(error_events[0].field("err_code"), Some("ERR_NOT_FOUND"));
    assert_eq!(error_events[0].field("err_kind"), Some("NotFound"));
    assert!(error_events[0]
        .field("err_message")
        .is_some_and(|m| m.contains("Optimizer not found: 11")));
}

#[test]
fn test_corrupt_config_is_logged_as_corrupt_data() {
    let capture = init_test_capture();
    let op_name = "test_corrupt_config_unique_5";

    let err = ExError::from(OptimizerError::CorruptConfig {
        optimizer_id: 3,
        reason: "trailing characters".to_string(),
    });
    log_op_error!(op_name, 3_i64, Instant::now(), &err);

    let errors = capture.count_events(|e| {
        e.op.as_deref() == Some(op_name)
            && e.field("err_code") == Some("ERR_CORRUPT_DATA")
            && e.field("optimizer_id") == Some("3")
    });
    assert_eq!(errors, 1);
}

#[test]
fn test_assert_event_exists_passes_for_logged_event() {
    let capture = init_test_capture();
    let op_name = "test_capture_assert_unique_6";

    log_op_start!(op_name, 1_i64);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_assert_event_exists_fails_for_missing_event() {
    let capture = init_test_capture();

    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_START);
}

#[test]
fn test_operations_logged_independently() {
    let capture = init_test_capture();
    let load_op = "test_multi_ops_load_unique_7";
    let save_op = "test_multi_ops_save_unique_7";
    let started = Instant::now();

    log_op_start!(load_op, 1_i64);
    log_op_end!(load_op, 1_i64, started);
    log_op_start!(save_op, 2_i64);
    log_op_end!(save_op, 2_i64, started);

    assert_eq!(capture.events_for_op(load_op).len(), 2);
    assert_eq!(capture.events_for_op(save_op).len(), 2);
}
