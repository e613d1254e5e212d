//! Budget domain service.
//!
//! Every business rule lives here: request-shaped validation pipelines,
//! ownership gating, and partial-update merging. Handlers only translate
//! between HTTP and these operations.

use uuid::Uuid;

use super::error::BudgetError;
use super::store::BudgetStore;
use super::transform::{BudgetView, to_view};
use super::types::{Budget, BudgetChanges, ItemCategory, ItemChanges, NewBudget, NewBudgetItem};
use super::validate::{parse_amount, parse_month_duration};

/// Budget service for business logic.
///
/// Generic over the persistence collaborator so the rules can be tested
/// against an in-memory store.
#[derive(Debug, Clone)]
pub struct BudgetService<S> {
    store: S,
}

impl<S: BudgetStore> BudgetService<S> {
    /// Creates a service backed by the given store.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates a budget for `owner_id` and returns the new ID.
    ///
    /// Checks run in a fixed order and only the first violation is
    /// reported: empty name, duplicate name, duration, income.
    ///
    /// # Errors
    ///
    /// Returns the matching `BudgetError` for the first failed check, or
    /// `BudgetError::Store` on persistence failure.
    pub async fn create_budget(
        &self,
        owner_id: Uuid,
        name: &str,
        month_duration_raw: &str,
        gross_income_raw: &str,
    ) -> Result<Uuid, BudgetError> {
        if name.is_empty() {
            return Err(BudgetError::EmptyField(
                "Budget name must not be empty.".to_string(),
            ));
        }

        if self
            .store
            .find_budget_by_owner_and_name(owner_id, name)
            .await?
            .is_some()
        {
            return Err(BudgetError::DuplicateName);
        }

        let month_duration = parse_month_duration(month_duration_raw)?;
        let gross_income = parse_amount("Gross income", gross_income_raw)?;

        let budget = self
            .store
            .insert_budget(NewBudget {
                owner_id,
                name: name.to_string(),
                month_duration,
                gross_income,
            })
            .await?;

        Ok(budget.id)
    }

    /// Creates an item under a budget the caller owns; returns the new ID.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotFound` when the budget is missing or not
    /// owned by `owner_id`, or the matching validation error.
    pub async fn create_budget_item(
        &self,
        name: &str,
        category_raw: &str,
        total_raw: &str,
        budget_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Uuid, BudgetError> {
        let budget = self
            .owned_budget(budget_id, owner_id)
            .await?
            .ok_or_else(|| BudgetError::NotFound("Invalid budget.".to_string()))?;

        if name.is_empty() {
            return Err(BudgetError::EmptyField(
                "Budget item name must not be empty.".to_string(),
            ));
        }

        let category = ItemCategory::parse(category_raw)?;
        let total = parse_amount("Total", total_raw)?;

        let item = self
            .store
            .insert_item(NewBudgetItem {
                budget_id: budget.id,
                name: name.to_string(),
                category,
                total,
            })
            .await?;

        Ok(item.id)
    }

    /// Returns the caller's budget in response shape, or `None` when no
    /// matching owned budget exists. Read misses are not errors.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::Store` on persistence failure.
    pub async fn get_budget(
        &self,
        budget_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<BudgetView>, BudgetError> {
        let Some(budget) = self.owned_budget(budget_id, owner_id).await? else {
            return Ok(None);
        };

        let items = self.store.find_items_by_budget(budget.id).await?;
        Ok(Some(to_view(&budget, &items)))
    }

    /// Lists all of the caller's budgets in creation order.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::Store` on persistence failure.
    pub async fn get_user_budgets(&self, owner_id: Uuid) -> Result<Vec<BudgetView>, BudgetError> {
        let budgets = self.store.find_budgets_by_owner(owner_id).await?;

        let mut views = Vec::with_capacity(budgets.len());
        for budget in &budgets {
            let items = self.store.find_items_by_budget(budget.id).await?;
            views.push(to_view(budget, &items));
        }

        Ok(views)
    }

    /// Applies a partial update to a budget the caller owns.
    ///
    /// Each present attribute is re-validated with the creation rules; the
    /// uniqueness check excludes the budget's own current name. Absent
    /// attributes are left untouched. All changes are applied in a single
    /// update.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotFound` when the budget is missing or not
    /// owned, or the matching validation error for the first bad attribute.
    pub async fn edit_budget(
        &self,
        budget_id: Uuid,
        owner_id: Uuid,
        changes: BudgetChanges,
    ) -> Result<Uuid, BudgetError> {
        let mut budget = self
            .owned_budget(budget_id, owner_id)
            .await?
            .ok_or_else(|| BudgetError::NotFound("Invalid budget.".to_string()))?;

        if let Some(name) = changes.name {
            if name.is_empty() {
                return Err(BudgetError::EmptyField(
                    "New name must not be empty.".to_string(),
                ));
            }
            if let Some(existing) = self
                .store
                .find_budget_by_owner_and_name(owner_id, &name)
                .await?
                && existing.id != budget.id
            {
                return Err(BudgetError::DuplicateName);
            }
            budget.name = name;
        }

        if let Some(raw) = changes.gross_income {
            budget.gross_income = parse_amount("gross_income", &raw)?;
        }

        if let Some(raw) = changes.month_duration {
            budget.month_duration = parse_month_duration(&raw)?;
        }

        self.store.update_budget(&budget).await?;
        Ok(budget.id)
    }

    /// Applies a partial update to an item under the given budget.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotFound` when the item does not belong to
    /// `budget_id`, or the matching validation error.
    pub async fn edit_budget_item(
        &self,
        item_id: Uuid,
        budget_id: Uuid,
        changes: ItemChanges,
    ) -> Result<Uuid, BudgetError> {
        let mut item = self
            .item_in_budget(item_id, budget_id)
            .await?
            .ok_or_else(|| BudgetError::NotFound("Invalid budget item.".to_string()))?;

        if let Some(name) = changes.name {
            if name.is_empty() {
                return Err(BudgetError::EmptyField(
                    "New name must not be empty.".to_string(),
                ));
            }
            item.name = name;
        }

        if let Some(raw) = changes.category {
            item.category = ItemCategory::parse(&raw)?;
        }

        if let Some(raw) = changes.total {
            item.total = parse_amount("Total", &raw)?;
        }

        self.store.update_item(&item).await?;
        Ok(item.id)
    }

    /// Deletes a budget the caller owns, cascading to its items. Returns
    /// the deleted budget's name for confirmation messaging.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotFound` when the budget is missing or not
    /// owned.
    pub async fn delete_budget(
        &self,
        budget_id: Uuid,
        owner_id: Uuid,
    ) -> Result<String, BudgetError> {
        let budget = self
            .owned_budget(budget_id, owner_id)
            .await?
            .ok_or_else(|| BudgetError::NotFound("Invalid budget.".to_string()))?;

        self.store.delete_budget(budget.id).await?;
        Ok(budget.name)
    }

    /// Deletes an item under the given budget. Returns a human-readable
    /// descriptor of the deleted item for confirmation messaging.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotFound` when the item does not belong to
    /// `budget_id`.
    pub async fn delete_budget_item(
        &self,
        item_id: Uuid,
        budget_id: Uuid,
    ) -> Result<String, BudgetError> {
        let item = self
            .item_in_budget(item_id, budget_id)
            .await?
            .ok_or_else(|| BudgetError::NotFound("Invalid budget item.".to_string()))?;

        self.store.delete_item(item.id).await?;
        Ok(format!(
            "Category: '{}' and with Name: '{}'",
            item.category, item.name
        ))
    }

    /// Looks up a budget and keeps it only when `owner_id` matches.
    async fn owned_budget(
        &self,
        budget_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Budget>, BudgetError> {
        let budget = self.store.find_budget(budget_id).await?;
        Ok(budget.filter(|b| b.owner_id == owner_id))
    }

    /// Looks up an item and keeps it only when it belongs to `budget_id`.
    async fn item_in_budget(
        &self,
        item_id: Uuid,
        budget_id: Uuid,
    ) -> Result<Option<super::types::BudgetItem>, BudgetError> {
        let item = self.store.find_item(item_id).await?;
        Ok(item.filter(|i| i.budget_id == budget_id))
    }
}
