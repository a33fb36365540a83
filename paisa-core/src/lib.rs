//! paisa-core: expense extraction engine and aggregation queries

pub mod amount;
pub mod catalog;
pub mod classify;
pub mod describe;
pub mod expense;
pub mod pipeline;
pub mod summary;
pub mod time;

pub use amount::AmountRules;
pub use catalog::{Catalog, CatalogCache, CategoryDef, CategorySource, default_categories};
pub use classify::classify;
pub use describe::Describer;
pub use expense::{Expense, ExpenseFilter, Extraction, MISCELLANEOUS};
pub use pipeline::Pipeline;
pub use summary::{CategorySummary, MonthlySummary, by_category, monthly};
