//! paisa-store: SQLite persistence for categories and expenses

mod schema;
mod store;

pub use store::{NewExpense, Store};
