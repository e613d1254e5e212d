//! Repository implementations for data access.
//!
//! Repositories hide the `SeaORM` details from the rest of the
//! application. The budget repository implements the domain crate's
//! `BudgetStore` trait so the service never sees the database.

pub mod budget;
pub mod user;

pub use budget::BudgetRepository;
pub use user::UserRepository;
