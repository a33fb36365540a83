//! SQLite-backed storage implementing the category-source and expense
//! query/insert/delete contracts.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, params, params_from_iter};

use paisa_core::catalog::{CategoryDef, CategorySource, default_categories};
use paisa_core::expense::{Expense, ExpenseFilter};
use paisa_core::time;

use crate::schema;

/// An expense ready to insert. `created_at` is injected by the caller
/// so the store never reads a clock of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub user_id: String,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub original_prompt: String,
    pub created_at: DateTime<Utc>,
}

pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (creating if needed) the database at `path`, run pending
    /// migrations, and seed the default categories.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("open database {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("set database pragmas")?;
        Self::init(conn)
    }

    /// In-memory database with the same schema and seed, for tests and
    /// throwaway runs.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory database")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        let store = Self { conn };
        store.migrate().context("database migration failed")?;
        store.seed_default_categories()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    /// Upsert the fixed default categories by name.
    ///
    /// Idempotent: re-running refreshes keyword sets in place without
    /// duplicating rows or disturbing ids.
    pub fn seed_default_categories(&self) -> Result<()> {
        for def in default_categories() {
            let keywords =
                serde_json::to_string(&def.keywords).context("encode category keywords")?;
            self.conn.execute(
                "INSERT INTO categories (name, keywords) VALUES (?1, ?2)
                 ON CONFLICT(name) DO UPDATE SET keywords = excluded.keywords",
                params![def.name, keywords],
            )?;
        }
        Ok(())
    }

    /// All categories in id (insertion) order, which is the catalog's
    /// iteration and tie-break order.
    pub fn load_all_categories(&self) -> Result<Vec<CategoryDef>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, keywords FROM categories ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut out = Vec::new();
        for row in rows {
            let (name, keywords) = row?;
            let keywords: Vec<String> = serde_json::from_str(&keywords)
                .with_context(|| format!("bad keyword list for category {name}"))?;
            out.push(CategoryDef { name, keywords });
        }
        Ok(out)
    }

    pub fn insert_expense(&self, expense: &NewExpense) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO expenses (user_id, amount, category, description, original_prompt, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                expense.user_id,
                expense.amount,
                expense.category,
                expense.description,
                expense.original_prompt,
                expense.created_at.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// The user's expenses, newest first, capped by the filter's limit.
    ///
    /// A month+year filter wins over a start/end date range when both
    /// are given; all date boundaries are civil days in the tracker's
    /// timezone, not UTC days.
    pub fn query_expenses(&self, user_id: &str, filter: &ExpenseFilter) -> Result<Vec<Expense>> {
        let mut sql = String::from(
            "SELECT id, user_id, amount, category, description, original_prompt, created_at
             FROM expenses WHERE user_id = ?1",
        );
        let mut args: Vec<String> = vec![user_id.to_string()];

        if let Some(category) = &filter.category {
            args.push(category.clone());
            sql.push_str(&format!(" AND category = ?{}", args.len()));
        }

        if let (Some(month), Some(year)) = (filter.month, filter.year) {
            let (start, end) = time::month_bounds_utc(year, month)?;
            args.push(start.to_rfc3339());
            sql.push_str(&format!(" AND created_at >= ?{}", args.len()));
            args.push(end.to_rfc3339());
            sql.push_str(&format!(" AND created_at < ?{}", args.len()));
        } else {
            if let Some(start_date) = filter.start_date {
                args.push(time::day_start_utc(start_date)?.to_rfc3339());
                sql.push_str(&format!(" AND created_at >= ?{}", args.len()));
            }
            if let Some(end_date) = filter.end_date {
                args.push(time::day_end_utc(end_date)?.to_rfc3339());
                sql.push_str(&format!(" AND created_at < ?{}", args.len()));
            }
        }

        sql.push_str(" ORDER BY created_at DESC");
        sql.push_str(&format!(" LIMIT {}", filter.effective_limit()));

        self.fetch_expenses(&sql, &args)
    }

    /// Every expense of the user in insertion order, uncapped. This is
    /// the aggregation engine's input.
    pub fn all_expenses(&self, user_id: &str) -> Result<Vec<Expense>> {
        self.fetch_expenses(
            "SELECT id, user_id, amount, category, description, original_prompt, created_at
             FROM expenses WHERE user_id = ?1 ORDER BY id",
            &[user_id.to_string()],
        )
    }

    /// Delete one of the user's expenses. Returns false when the row is
    /// missing or owned by someone else; callers cannot tell which.
    pub fn delete_expense(&self, id: i64, user_id: &str) -> Result<bool> {
        let deleted = self.conn.execute(
            "DELETE FROM expenses WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        Ok(deleted > 0)
    }

    fn fetch_expenses(&self, sql: &str, args: &[String]) -> Result<Vec<Expense>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params_from_iter(args.iter()), |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, String>(6)?,
            ))
        })?;

        let mut out = Vec::new();
        for row in rows {
            let (id, user_id, amount, category, description, original_prompt, created_at) = row?;
            let created_at = DateTime::parse_from_rfc3339(&created_at)
                .with_context(|| format!("bad created_at on expense {id}"))?
                .with_timezone(&Utc);
            out.push(Expense {
                id,
                user_id,
                amount,
                category,
                description,
                original_prompt,
                created_at,
            });
        }
        Ok(out)
    }
}

impl CategorySource for Store {
    fn load_all(&self) -> Result<Vec<CategoryDef>> {
        self.load_all_categories()
    }
}
