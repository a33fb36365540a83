//! Expense record types shared by the extraction engine, the storage
//! layer, and the aggregation queries.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel category assigned when no keyword matches.
pub const MISCELLANEOUS: &str = "miscellaneous";

/// A stored expense row.
///
/// `created_at` is a UTC instant; every civil interpretation of it
/// (month buckets, date-range filters) goes through [`crate::time::TZ`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: i64,
    pub user_id: String,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub original_prompt: String,
    pub created_at: DateTime<Utc>,
}

/// What the pipeline pulls out of one free-text prompt.
///
/// A zero amount never reaches this type; the pipeline rejects the
/// prompt instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Extraction {
    pub amount: f64,
    pub category: String,
    pub description: String,
}

/// Filters for expense queries. Dates are civil dates in
/// [`crate::time::TZ`], not UTC days.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExpenseFilter {
    pub category: Option<String>,
    /// Calendar month 1-12; applied only together with `year`.
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: Option<usize>,
}

impl ExpenseFilter {
    /// Rows returned when no limit is requested.
    pub const DEFAULT_LIMIT: usize = 50;
    /// Hard cap on rows per query.
    pub const MAX_LIMIT: usize = 100;

    /// Requested limit clamped to the allowed range.
    pub fn effective_limit(&self) -> usize {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT).min(Self::MAX_LIMIT)
    }
}
