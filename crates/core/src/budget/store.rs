//! Persistence collaborator interface for the budget domain.

use async_trait::async_trait;
use uuid::Uuid;

use super::error::StoreError;
use super::types::{Budget, BudgetItem, NewBudget, NewBudgetItem};

/// Repository interface consumed by [`crate::budget::BudgetService`].
///
/// Implementations run each call within the ambient transaction of the
/// current request. List methods return rows in creation order. Budget
/// name uniqueness per owner is additionally backed by a storage-level
/// unique constraint; the service's check-then-insert path is not atomic
/// on its own.
#[async_trait]
pub trait BudgetStore: Send + Sync {
    /// Finds a budget by ID.
    async fn find_budget(&self, id: Uuid) -> Result<Option<Budget>, StoreError>;

    /// Lists an owner's budgets in creation order.
    async fn find_budgets_by_owner(&self, owner_id: Uuid) -> Result<Vec<Budget>, StoreError>;

    /// Finds the budget with the given owner and exact name.
    async fn find_budget_by_owner_and_name(
        &self,
        owner_id: Uuid,
        name: &str,
    ) -> Result<Option<Budget>, StoreError>;

    /// Finds a budget item by ID.
    async fn find_item(&self, id: Uuid) -> Result<Option<BudgetItem>, StoreError>;

    /// Lists a budget's items in insertion order.
    async fn find_items_by_budget(&self, budget_id: Uuid) -> Result<Vec<BudgetItem>, StoreError>;

    /// Inserts a budget, assigning its ID.
    async fn insert_budget(&self, budget: NewBudget) -> Result<Budget, StoreError>;

    /// Inserts a budget item, assigning its ID.
    async fn insert_item(&self, item: NewBudgetItem) -> Result<BudgetItem, StoreError>;

    /// Persists all attributes of an existing budget.
    async fn update_budget(&self, budget: &Budget) -> Result<(), StoreError>;

    /// Persists all attributes of an existing budget item.
    async fn update_item(&self, item: &BudgetItem) -> Result<(), StoreError>;

    /// Deletes a budget and, by cascade, all of its items.
    async fn delete_budget(&self, id: Uuid) -> Result<(), StoreError>;

    /// Deletes a budget item.
    async fn delete_item(&self, id: Uuid) -> Result<(), StoreError>;
}
