//! Budget repository backing the domain service.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{budget_items, budgets};
use pennywise_core::budget::{
    Budget, BudgetItem, BudgetStore, ItemCategory, NewBudget, NewBudgetItem, StoreError,
};

/// `BudgetStore` implementation on top of `SeaORM`.
///
/// Rows carry `created_at` timestamps; list queries order by them so the
/// service sees creation order. Cascade deletion of a budget's items is
/// the schema's job (`ON DELETE CASCADE`).
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: DatabaseConnection,
}

impl BudgetRepository {
    /// Creates a new budget repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn budget_from_model(model: budgets::Model) -> Budget {
    Budget {
        id: model.id,
        owner_id: model.user_id,
        name: model.name,
        month_duration: model.month_duration,
        gross_income: model.gross_income,
    }
}

fn item_from_model(model: budget_items::Model) -> Result<BudgetItem, StoreError> {
    // the schema CHECK constraint keeps this infallible in practice
    let category = ItemCategory::parse(&model.category).map_err(StoreError::new)?;

    Ok(BudgetItem {
        id: model.id,
        budget_id: model.budget_id,
        name: model.name,
        category,
        total: model.total,
    })
}

#[async_trait]
impl BudgetStore for BudgetRepository {
    async fn find_budget(&self, id: Uuid) -> Result<Option<Budget>, StoreError> {
        let model = budgets::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(StoreError::new)?;

        Ok(model.map(budget_from_model))
    }

    async fn find_budgets_by_owner(&self, owner_id: Uuid) -> Result<Vec<Budget>, StoreError> {
        let models = budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(owner_id))
            .order_by_asc(budgets::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(StoreError::new)?;

        Ok(models.into_iter().map(budget_from_model).collect())
    }

    async fn find_budget_by_owner_and_name(
        &self,
        owner_id: Uuid,
        name: &str,
    ) -> Result<Option<Budget>, StoreError> {
        let model = budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(owner_id))
            .filter(budgets::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(StoreError::new)?;

        Ok(model.map(budget_from_model))
    }

    async fn find_item(&self, id: Uuid) -> Result<Option<BudgetItem>, StoreError> {
        let model = budget_items::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(StoreError::new)?;

        model.map(item_from_model).transpose()
    }

    async fn find_items_by_budget(
        &self,
        budget_id: Uuid,
    ) -> Result<Vec<BudgetItem>, StoreError> {
        let models = budget_items::Entity::find()
            .filter(budget_items::Column::BudgetId.eq(budget_id))
            .order_by_asc(budget_items::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(StoreError::new)?;

        models.into_iter().map(item_from_model).collect()
    }

    async fn insert_budget(&self, budget: NewBudget) -> Result<Budget, StoreError> {
        let now = Utc::now().into();
        let model = budgets::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(budget.owner_id),
            name: Set(budget.name),
            month_duration: Set(budget.month_duration),
            gross_income: Set(budget.gross_income),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = model.insert(&self.db).await.map_err(StoreError::new)?;
        Ok(budget_from_model(inserted))
    }

    async fn insert_item(&self, item: NewBudgetItem) -> Result<BudgetItem, StoreError> {
        let now = Utc::now().into();
        let model = budget_items::ActiveModel {
            id: Set(Uuid::new_v4()),
            budget_id: Set(item.budget_id),
            name: Set(item.name),
            category: Set(item.category.as_str().to_string()),
            total: Set(item.total),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = model.insert(&self.db).await.map_err(StoreError::new)?;
        item_from_model(inserted)
    }

    async fn update_budget(&self, budget: &Budget) -> Result<(), StoreError> {
        let update = budgets::ActiveModel {
            id: Set(budget.id),
            name: Set(budget.name.clone()),
            month_duration: Set(budget.month_duration),
            gross_income: Set(budget.gross_income),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };

        update.update(&self.db).await.map_err(StoreError::new)?;
        Ok(())
    }

    async fn update_item(&self, item: &BudgetItem) -> Result<(), StoreError> {
        let update = budget_items::ActiveModel {
            id: Set(item.id),
            name: Set(item.name.clone()),
            category: Set(item.category.as_str().to_string()),
            total: Set(item.total),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };

        update.update(&self.db).await.map_err(StoreError::new)?;
        Ok(())
    }

    async fn delete_budget(&self, id: Uuid) -> Result<(), StoreError> {
        budgets::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(StoreError::new)?;
        Ok(())
    }

    async fn delete_item(&self, id: Uuid) -> Result<(), StoreError> {
        budget_items::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(StoreError::new)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item_model(category: &str) -> budget_items::Model {
        let now = Utc::now().into();
        budget_items::Model {
            id: Uuid::new_v4(),
            budget_id: Uuid::new_v4(),
            name: "Rent".to_string(),
            category: category.to_string(),
            total: dec!(1200),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_budget_from_model() {
        let now = Utc::now().into();
        let model = budgets::Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "household".to_string(),
            month_duration: 12,
            gross_income: dec!(42000),
            created_at: now,
            updated_at: now,
        };

        let budget = budget_from_model(model.clone());
        assert_eq!(budget.id, model.id);
        assert_eq!(budget.owner_id, model.user_id);
        assert_eq!(budget.month_duration, 12);
        assert_eq!(budget.gross_income, dec!(42000));
    }

    #[test]
    fn test_item_from_model_maps_category() {
        let item = item_from_model(item_model("bills")).unwrap();
        assert_eq!(item.category, ItemCategory::Bills);
    }

    #[test]
    fn test_item_from_model_rejects_unknown_category() {
        assert!(item_from_model(item_model("food")).is_err());
    }
}
