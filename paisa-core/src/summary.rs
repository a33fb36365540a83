//! Aggregation queries over a user's stored expenses.
//!
//! Both queries are read-only folds over an already-fetched in-memory
//! list; they never touch storage themselves.

use std::collections::{HashMap, HashSet};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::expense::Expense;
use crate::time;

/// Per-category rollup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorySummary {
    pub category: String,
    pub total: f64,
    pub count: usize,
}

/// Per-month rollup for one calendar year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlySummary {
    pub month: u32,
    pub year: i32,
    pub total_amount: f64,
    pub expense_count: usize,
    pub unique_categories: usize,
}

/// Group by category: summed amount and record count, ordered by total
/// descending. Equal totals keep first-appearance order (the sort is
/// stable and groups are created in input order).
pub fn by_category(expenses: &[Expense]) -> Vec<CategorySummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut summaries: Vec<CategorySummary> = Vec::new();

    for expense in expenses {
        match index.get(expense.category.as_str()) {
            Some(&i) => {
                summaries[i].total += expense.amount;
                summaries[i].count += 1;
            }
            None => {
                index.insert(expense.category.as_str(), summaries.len());
                summaries.push(CategorySummary {
                    category: expense.category.clone(),
                    total: expense.amount,
                    count: 1,
                });
            }
        }
    }

    summaries.sort_by(|a, b| b.total.total_cmp(&a.total));
    summaries
}

/// Per-month rollup of the civil year `year`: summed amount, record
/// count, and distinct-category count, ascending by month.
///
/// Only records whose `created_at` falls inside the year's civil
/// bounds contribute, and months without records are omitted rather
/// than zero-filled.
pub fn monthly(expenses: &[Expense], year: i32) -> Result<Vec<MonthlySummary>> {
    let (start, end) = time::year_bounds_utc(year)?;

    let mut buckets: HashMap<u32, (f64, usize, HashSet<&str>)> = HashMap::new();
    for expense in expenses {
        if expense.created_at < start || expense.created_at >= end {
            continue;
        }
        let (_, month) = time::civil_year_month(expense.created_at);
        let bucket = buckets.entry(month).or_default();
        bucket.0 += expense.amount;
        bucket.1 += 1;
        bucket.2.insert(expense.category.as_str());
    }

    let mut months: Vec<MonthlySummary> = buckets
        .into_iter()
        .map(|(month, (total_amount, expense_count, categories))| MonthlySummary {
            month,
            year,
            total_amount,
            expense_count,
            unique_categories: categories.len(),
        })
        .collect();
    months.sort_by_key(|m| m.month);
    Ok(months)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn expense(id: i64, amount: f64, category: &str, created_at: DateTime<Utc>) -> Expense {
        Expense {
            id,
            user_id: "local".to_string(),
            amount,
            category: category.to_string(),
            description: format!("{category} #{id}"),
            original_prompt: String::new(),
            created_at,
        }
    }

    fn march(day: u32) -> DateTime<Utc> {
        // Noon UTC is always the same civil day in IST.
        Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_by_category_orders_by_total_descending() {
        let expenses = vec![
            expense(1, 120.0, "food", march(1)),
            expense(2, 4000.0, "room_expense", march(2)),
            expense(3, 300.0, "food", march(3)),
            expense(4, 80.0, "travel", march(4)),
        ];

        let summaries = by_category(&expenses);
        let order: Vec<&str> = summaries.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(order, ["room_expense", "food", "travel"]);
        assert_eq!(summaries[1].total, 420.0);
        assert_eq!(summaries[1].count, 2);
    }

    #[test]
    fn test_by_category_ties_keep_insertion_order() {
        let expenses = vec![
            expense(1, 100.0, "fun", march(1)),
            expense(2, 100.0, "gym", march(2)),
        ];
        let order: Vec<String> = by_category(&expenses)
            .into_iter()
            .map(|s| s.category)
            .collect();
        assert_eq!(order, ["fun", "gym"]);
    }

    #[test]
    fn test_by_category_total_reconciles_with_inputs() {
        let expenses = vec![
            expense(1, 12.5, "food", march(1)),
            expense(2, 7.25, "food", march(2)),
            expense(3, 80.0, "travel", march(3)),
            expense(4, 0.75, "food", march(4)),
        ];

        let summaries = by_category(&expenses);
        for summary in &summaries {
            let direct: f64 = expenses
                .iter()
                .filter(|e| e.category == summary.category)
                .map(|e| e.amount)
                .sum();
            assert_eq!(summary.total, direct);
        }
        assert_eq!(by_category(&[]), Vec::new());
    }

    #[test]
    fn test_monthly_omits_empty_months() {
        let expenses = vec![
            expense(1, 200.0, "food", march(5)),
            expense(2, 500.0, "travel", march(20)),
        ];

        let months = monthly(&expenses, 2026).unwrap();
        assert_eq!(months.len(), 1);
        assert_eq!(months[0].month, 3);
        assert_eq!(months[0].year, 2026);
        assert_eq!(months[0].total_amount, 700.0);
        assert_eq!(months[0].expense_count, 2);
        assert_eq!(months[0].unique_categories, 2);
    }

    #[test]
    fn test_monthly_counts_distinct_categories_once() {
        let expenses = vec![
            expense(1, 10.0, "food", march(1)),
            expense(2, 20.0, "food", march(2)),
            expense(3, 30.0, "food", march(3)),
        ];
        let months = monthly(&expenses, 2026).unwrap();
        assert_eq!(months[0].expense_count, 3);
        assert_eq!(months[0].unique_categories, 1);
    }

    #[test]
    fn test_monthly_is_ascending_by_month() {
        let expenses = vec![
            expense(1, 5.0, "food", Utc.with_ymd_and_hms(2026, 11, 2, 12, 0, 0).unwrap()),
            expense(2, 5.0, "food", Utc.with_ymd_and_hms(2026, 1, 2, 12, 0, 0).unwrap()),
            expense(3, 5.0, "food", Utc.with_ymd_and_hms(2026, 6, 2, 12, 0, 0).unwrap()),
        ];
        let order: Vec<u32> = monthly(&expenses, 2026).unwrap().iter().map(|m| m.month).collect();
        assert_eq!(order, [1, 6, 11]);
    }

    #[test]
    fn test_monthly_uses_civil_year_bounds_not_utc() {
        // 20:00 UTC on Dec 31 2025 is already Jan 1 2026 in IST, and
        // 19:00 UTC on Dec 31 2026 belongs to 2027.
        let expenses = vec![
            expense(1, 100.0, "fun", Utc.with_ymd_and_hms(2025, 12, 31, 20, 0, 0).unwrap()),
            expense(2, 200.0, "fun", Utc.with_ymd_and_hms(2026, 12, 31, 19, 0, 0).unwrap()),
        ];

        let months = monthly(&expenses, 2026).unwrap();
        assert_eq!(months.len(), 1);
        assert_eq!(months[0].month, 1);
        assert_eq!(months[0].total_amount, 100.0);

        let next_year = monthly(&expenses, 2027).unwrap();
        assert_eq!(next_year.len(), 1);
        assert_eq!(next_year[0].month, 1);
        assert_eq!(next_year[0].total_amount, 200.0);
    }
}
