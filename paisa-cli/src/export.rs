//! CSV export of stored expenses.

use std::io::Write;

use anyhow::{Context, Result};
use paisa_core::expense::Expense;
use paisa_core::time;

/// Write `expenses` as CSV, one row per expense. The date column is
/// the civil date the expense was recorded on.
pub fn write_csv<W: Write>(writer: W, expenses: &[Expense]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([
        "id",
        "date",
        "amount",
        "category",
        "description",
        "original_prompt",
    ])?;

    for expense in expenses {
        let local = expense.created_at.with_timezone(&time::TZ);
        wtr.write_record([
            expense.id.to_string(),
            local.format("%Y-%m-%d").to_string(),
            format!("{:.2}", expense.amount),
            expense.category.clone(),
            expense.description.clone(),
            expense.original_prompt.clone(),
        ])?;
    }

    wtr.flush().context("flush csv output")?;
    Ok(())
}
