use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use paisa_core::expense::ExpenseFilter;
use paisa_core::{Pipeline, summary, time};
use paisa_store::{NewExpense, Store};

mod config;
mod export;

#[derive(Parser, Debug)]
#[command(name = "paisa", version, about = "Free-text personal expense tracker")]
struct Cli {
    /// Record and query expenses as this user instead of the configured one
    #[arg(long, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the default config to ~/.paisa/config.toml
    Init,

    /// Record an expense from a free-text prompt
    Add {
        /// e.g. "200 rupees lunch at cafe"
        #[arg(required = true)]
        prompt: Vec<String>,
    },

    /// List stored expenses, newest first
    List {
        #[arg(long)]
        category: Option<String>,

        /// Calendar month 1-12 (goes together with --year)
        #[arg(long)]
        month: Option<u32>,

        #[arg(long)]
        year: Option<i32>,

        /// Start date YYYY-MM-DD (civil, inclusive)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// End date YYYY-MM-DD (civil, inclusive)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Max rows (default 50, capped at 100)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Per-category totals, largest first
    Categories,

    /// Per-month totals for one year (default: the current year)
    Monthly {
        #[arg(long)]
        year: Option<i32>,
    },

    /// Delete one expense by id
    Delete { id: i64 },

    /// Export all expenses as CSV
    Export {
        /// Output path (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let Cli { user, command } = Cli::parse();

    if matches!(command, Command::Init) {
        return config::init_config();
    }

    let cfg = config::load_config()?;
    let user_id = user.unwrap_or_else(|| cfg.user_id.clone());
    let store =
        Store::open(&cfg.resolve_db_path()?).context("open expense database")?;

    // One clock read per invocation; everything downstream takes the
    // timestamp as an explicit input.
    let now = Utc::now();

    match command {
        // Handled before the store is opened.
        Command::Init => {}

        Command::Add { prompt } => add(&store, &user_id, &prompt.join(" "), now)?,

        Command::List {
            category,
            month,
            year,
            from,
            to,
            limit,
        } => {
            if month.is_some() != year.is_some() {
                bail!("--month and --year go together");
            }
            let filter = ExpenseFilter {
                category,
                month,
                year,
                start_date: from,
                end_date: to,
                limit,
            };
            list(&store, &user_id, &filter)?;
        }

        Command::Categories => categories(&store, &user_id)?,

        Command::Monthly { year } => {
            monthly(&store, &user_id, year.unwrap_or_else(|| time::civil_year(now)))?
        }

        Command::Delete { id } => {
            if store.delete_expense(id, &user_id)? {
                println!("Deleted expense #{id}");
            } else {
                bail!("Expense not found");
            }
        }

        Command::Export { out } => {
            let expenses = store.all_expenses(&user_id)?;
            match out {
                Some(path) => {
                    let file = std::fs::File::create(&path)
                        .with_context(|| format!("create {}", path.display()))?;
                    export::write_csv(file, &expenses)?;
                    println!("Wrote {} expenses to {}", expenses.len(), path.display());
                }
                None => export::write_csv(std::io::stdout().lock(), &expenses)?,
            }
        }
    }

    Ok(())
}

fn add(store: &Store, user_id: &str, prompt: &str, now: DateTime<Utc>) -> Result<()> {
    let pipeline = Pipeline::new(store)?;
    if let Err(err) = pipeline.warm_catalog() {
        eprintln!("warning: category catalog unavailable: {err:#}");
    }

    let extraction = pipeline.extract(prompt)?;

    let id = store.insert_expense(&NewExpense {
        user_id: user_id.to_string(),
        amount: extraction.amount,
        category: extraction.category.clone(),
        description: extraction.description.clone(),
        original_prompt: prompt.to_string(),
        created_at: now,
    })?;

    println!(
        "Recorded #{id}: {:.2} | {} | {}",
        extraction.amount, extraction.category, extraction.description
    );
    Ok(())
}

fn list(store: &Store, user_id: &str, filter: &ExpenseFilter) -> Result<()> {
    let expenses = store.query_expenses(user_id, filter)?;
    if expenses.is_empty() {
        println!("No expenses found.");
        return Ok(());
    }

    for expense in &expenses {
        let local = expense.created_at.with_timezone(&time::TZ);
        println!(
            "#{:<5} {}  {:>10.2}  {:<14} {}",
            expense.id,
            local.format("%Y-%m-%d"),
            expense.amount,
            expense.category,
            expense.description
        );
    }
    Ok(())
}

fn categories(store: &Store, user_id: &str) -> Result<()> {
    let expenses = store.all_expenses(user_id)?;
    let totals = summary::by_category(&expenses);
    if totals.is_empty() {
        println!("No expenses recorded yet.");
        return Ok(());
    }

    for entry in &totals {
        println!(
            "{:<16} {:>10.2}  ({} expense{})",
            entry.category,
            entry.total,
            entry.count,
            if entry.count == 1 { "" } else { "s" }
        );
    }
    Ok(())
}

fn monthly(store: &Store, user_id: &str, year: i32) -> Result<()> {
    let expenses = store.all_expenses(user_id)?;
    let months = summary::monthly(&expenses, year)?;
    if months.is_empty() {
        println!("No expenses recorded in {year}.");
        return Ok(());
    }

    for month in &months {
        println!(
            "{}-{:02}  total {:>10.2}  expenses {:>3}  categories {}",
            month.year, month.month, month.total_amount, month.expense_count, month.unique_categories
        );
    }
    Ok(())
}
