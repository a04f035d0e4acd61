//! Wire formats for `time` values in API payloads.
//!
//! Timestamps are RFC 3339 (`time::serde::rfc3339`); calendar dates are
//! plain `YYYY-MM-DD`.

time::serde::format_description!(pub date, Date, "[year]-[month]-[day]");
