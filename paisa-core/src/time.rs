//! Civil-calendar helpers.
//!
//! Expenses are timestamped and filtered in one fixed timezone ([`TZ`]),
//! not UTC. Storage keeps UTC instants; every calendar boundary here is
//! computed in [`TZ`] first and then converted, so a record created late
//! on the last UTC day of a month can still belong to the next civil
//! month.

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

/// The tracker's civil timezone.
pub const TZ: Tz = chrono_tz::Asia::Kolkata;

/// UTC instant of civil midnight at the start of `date`.
pub fn day_start_utc(date: NaiveDate) -> Result<DateTime<Utc>> {
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .with_context(|| format!("invalid civil date {date}"))?;
    let local = TZ
        .from_local_datetime(&midnight)
        .single()
        .with_context(|| format!("ambiguous local time at {midnight}"))?;
    Ok(local.with_timezone(&Utc))
}

/// Exclusive UTC end bound for `date`: civil midnight of the next day.
pub fn day_end_utc(date: NaiveDate) -> Result<DateTime<Utc>> {
    let next = date
        .succ_opt()
        .with_context(|| format!("no day after {date}"))?;
    day_start_utc(next)
}

/// UTC bounds of the civil month `[first of month, first of next month)`.
pub fn month_bounds_utc(year: i32, month: u32) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .with_context(|| format!("invalid month {year}-{month:02}"))?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .with_context(|| format!("invalid month after {year}-{month:02}"))?;
    Ok((day_start_utc(first)?, day_start_utc(next)?))
}

/// UTC bounds of the civil year `[Jan 1 00:00, Jan 1 00:00 of year+1)`.
pub fn year_bounds_utc(year: i32) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1)
        .with_context(|| format!("invalid year {year}"))?;
    let next = NaiveDate::from_ymd_opt(year + 1, 1, 1)
        .with_context(|| format!("invalid year {}", year + 1))?;
    Ok((day_start_utc(first)?, day_start_utc(next)?))
}

/// Civil (year, month) an instant falls in.
pub fn civil_year_month(at: DateTime<Utc>) -> (i32, u32) {
    let local = at.with_timezone(&TZ);
    (local.year(), local.month())
}

/// Civil year an instant falls in.
pub fn civil_year(at: DateTime<Utc>) -> i32 {
    civil_year_month(at).0
}
