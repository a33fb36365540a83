pub(crate) const CURRENT_VERSION: i32 = 1;

pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS categories (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    name     TEXT NOT NULL UNIQUE,
    keywords TEXT NOT NULL DEFAULT '[]'
);

CREATE TABLE IF NOT EXISTS expenses (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id         TEXT NOT NULL,
    amount          REAL NOT NULL,
    category        TEXT NOT NULL,
    description     TEXT NOT NULL,
    original_prompt TEXT NOT NULL DEFAULT '',
    created_at      TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_expenses_user_created ON expenses(user_id, created_at);
CREATE INDEX IF NOT EXISTS idx_expenses_user_category ON expenses(user_id, category);
"#;

/// (from_version, sql) pairs applied in order to older databases.
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[];
