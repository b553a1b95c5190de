//! Boundary events for optimizer operations
//!
//! Each persistence call emits one `start` event and then exactly one of
//! `end` or `end_error`. All three go to the [`TARGET`] target and carry the
//! operation name and the optimizer id, so one filter directive
//! (`optimizer=info`) selects them and one id follows an optimizer through
//! the log. The id may be an `Option`; `None` (an unsaved optimizer) is
//! simply not recorded.
//!
//! [`TARGET`]: crate::logging_facility::schema::TARGET

/// Record that an operation on an optimizer has begun
///
/// ```
/// # use optimizer_core::log_op_start;
/// log_op_start!("optimizer_load", 12_i64);
/// log_op_start!("optimizer_save", None::<i64>, store_id = 3_i64);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr, $optimizer_id:expr $(, $($field:tt)+)?) => {
        tracing::info!(
            target: $crate::logging_facility::schema::TARGET,
            op = $op,
            event = $crate::logging_facility::schema::EVENT_START,
            optimizer_id = $optimizer_id,
            $($($field)+)?
        )
    };
}

/// Record a successful finish, with the time elapsed since `$started`
///
/// ```
/// # use optimizer_core::log_op_end;
/// let started = std::time::Instant::now();
/// log_op_end!("optimizer_save", 12_i64, started, container_count = 2_u64);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, $optimizer_id:expr, $started:expr $(, $($field:tt)+)?) => {
        tracing::info!(
            target: $crate::logging_facility::schema::TARGET,
            op = $op,
            event = $crate::logging_facility::schema::EVENT_END,
            optimizer_id = $optimizer_id,
            duration_ms = $started.elapsed().as_millis() as u64,
            $($($field)+)?
        )
    };
}

/// Record a failed finish with the error's kind, stable code and message
///
/// `$err` is a `&ExError`.
///
/// ```
/// # use optimizer_core::log_op_error;
/// # use optimizer_core::errors::{ExError, OptimizerError};
/// let started = std::time::Instant::now();
/// let err = ExError::from(OptimizerError::NotFound { optimizer_id: 1 });
/// log_op_error!("optimizer_load", 1_i64, started, &err);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $optimizer_id:expr, $started:expr, $err:expr $(, $($field:tt)+)?) => {{
        let err: &$crate::errors::ExError = $err;
        tracing::error!(
            target: $crate::logging_facility::schema::TARGET,
            op = $op,
            event = $crate::logging_facility::schema::EVENT_END_ERROR,
            optimizer_id = $optimizer_id,
            duration_ms = $started.elapsed().as_millis() as u64,
            err_kind = ?err.kind(),
            err_code = err.code(),
            err_message = %err,
            $($($field)+)?
        );
    }};
}
