//! Structured log helpers.
//!
//! Every line carries a `component` field; record-scoped lines also carry
//! `record_id`, so a single record's history can be filtered out of the
//! JSON stream.

/// Log with a `component` field.
#[macro_export]
macro_rules! log_event {
    ($level:ident, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a record-scoped event with standard fields.
#[macro_export]
macro_rules! log_record_event {
    ($level:ident, $component:expr, $msg:expr, $record_id:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = $component,
            record_id = %$record_id,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a donor-scoped event with standard fields.
#[macro_export]
macro_rules! log_donor_event {
    ($level:ident, $component:expr, $msg:expr, $donor_id:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = $component,
            donor_id = %$donor_id,
            $($($field)*,)?
            $msg
        )
    };
}
