//! `SeaORM` entity definitions.

pub mod budget_items;
pub mod budgets;
pub mod users;
