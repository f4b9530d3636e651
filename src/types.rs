use chrono::{DateTime, Local, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub id: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub booked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i32,
    pub slot_id: i32,
    pub name: String,
    pub email: String,
    pub topic: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Requester details for a reservation. Field validation happens at the HTTP
/// layer, before any store access.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub name: String,
    pub email: String,
    pub topic: String,
}

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Inclusive window covering one local calendar day (00:00:00 up to
/// 23:59:59.999), unbounded when no day is given. Both storage backends apply
/// the same window unconditionally instead of branching on the filter.
pub fn day_window(day: Option<NaiveDate>) -> (DateTime<Utc>, DateTime<Utc>) {
    match day {
        Some(day) => {
            let begin = day.and_hms_opt(0, 0, 0).unwrap();
            let end = day.and_hms_milli_opt(23, 59, 59, 999).unwrap();
            (local_to_utc(begin), local_to_utc(end))
        }
        None => (DateTime::<Utc>::MIN_UTC, DateTime::<Utc>::MAX_UTC),
    }
}

fn local_to_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    match naive.and_local_timezone(Local) {
        LocalResult::Single(datetime) | LocalResult::Ambiguous(datetime, _) => {
            datetime.with_timezone(&Utc)
        }
        // A DST gap can swallow local midnight; fall back to the UTC reading.
        LocalResult::None => Utc.from_utc_datetime(&naive),
    }
}
