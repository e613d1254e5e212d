//! Budget service tests against an in-memory store.

use std::sync::Mutex;

use async_trait::async_trait;
use rust_decimal_macros::dec;
use uuid::Uuid;

use super::error::{BudgetError, StoreError};
use super::service::BudgetService;
use super::store::BudgetStore;
use super::types::{
    Budget, BudgetChanges, BudgetItem, ItemCategory, ItemChanges, NewBudget, NewBudgetItem,
};

/// Vec-backed store; push order doubles as creation order.
#[derive(Debug, Default)]
struct MemoryStore {
    budgets: Mutex<Vec<Budget>>,
    items: Mutex<Vec<BudgetItem>>,
}

#[async_trait]
impl BudgetStore for MemoryStore {
    async fn find_budget(&self, id: Uuid) -> Result<Option<Budget>, StoreError> {
        let budgets = self.budgets.lock().unwrap();
        Ok(budgets.iter().find(|b| b.id == id).cloned())
    }

    async fn find_budgets_by_owner(&self, owner_id: Uuid) -> Result<Vec<Budget>, StoreError> {
        let budgets = self.budgets.lock().unwrap();
        Ok(budgets
            .iter()
            .filter(|b| b.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn find_budget_by_owner_and_name(
        &self,
        owner_id: Uuid,
        name: &str,
    ) -> Result<Option<Budget>, StoreError> {
        let budgets = self.budgets.lock().unwrap();
        Ok(budgets
            .iter()
            .find(|b| b.owner_id == owner_id && b.name == name)
            .cloned())
    }

    async fn find_item(&self, id: Uuid) -> Result<Option<BudgetItem>, StoreError> {
        let items = self.items.lock().unwrap();
        Ok(items.iter().find(|i| i.id == id).cloned())
    }

    async fn find_items_by_budget(
        &self,
        budget_id: Uuid,
    ) -> Result<Vec<BudgetItem>, StoreError> {
        let items = self.items.lock().unwrap();
        Ok(items
            .iter()
            .filter(|i| i.budget_id == budget_id)
            .cloned()
            .collect())
    }

    async fn insert_budget(&self, budget: NewBudget) -> Result<Budget, StoreError> {
        let budget = Budget {
            id: Uuid::new_v4(),
            owner_id: budget.owner_id,
            name: budget.name,
            month_duration: budget.month_duration,
            gross_income: budget.gross_income,
        };
        self.budgets.lock().unwrap().push(budget.clone());
        Ok(budget)
    }

    async fn insert_item(&self, item: NewBudgetItem) -> Result<BudgetItem, StoreError> {
        let item = BudgetItem {
            id: Uuid::new_v4(),
            budget_id: item.budget_id,
            name: item.name,
            category: item.category,
            total: item.total,
        };
        self.items.lock().unwrap().push(item.clone());
        Ok(item)
    }

    async fn update_budget(&self, budget: &Budget) -> Result<(), StoreError> {
        let mut budgets = self.budgets.lock().unwrap();
        if let Some(slot) = budgets.iter_mut().find(|b| b.id == budget.id) {
            *slot = budget.clone();
        }
        Ok(())
    }

    async fn update_item(&self, item: &BudgetItem) -> Result<(), StoreError> {
        let mut items = self.items.lock().unwrap();
        if let Some(slot) = items.iter_mut().find(|i| i.id == item.id) {
            *slot = item.clone();
        }
        Ok(())
    }

    async fn delete_budget(&self, id: Uuid) -> Result<(), StoreError> {
        self.budgets.lock().unwrap().retain(|b| b.id != id);
        // cascade
        self.items.lock().unwrap().retain(|i| i.budget_id != id);
        Ok(())
    }

    async fn delete_item(&self, id: Uuid) -> Result<(), StoreError> {
        self.items.lock().unwrap().retain(|i| i.id != id);
        Ok(())
    }
}

/// Store whose every call fails, for exercising the infrastructure path.
struct BrokenStore;

macro_rules! broken {
    () => {
        Err(StoreError::new("connection refused"))
    };
}

#[async_trait]
impl BudgetStore for BrokenStore {
    async fn find_budget(&self, _id: Uuid) -> Result<Option<Budget>, StoreError> {
        broken!()
    }
    async fn find_budgets_by_owner(&self, _owner_id: Uuid) -> Result<Vec<Budget>, StoreError> {
        broken!()
    }
    async fn find_budget_by_owner_and_name(
        &self,
        _owner_id: Uuid,
        _name: &str,
    ) -> Result<Option<Budget>, StoreError> {
        broken!()
    }
    async fn find_item(&self, _id: Uuid) -> Result<Option<BudgetItem>, StoreError> {
        broken!()
    }
    async fn find_items_by_budget(
        &self,
        _budget_id: Uuid,
    ) -> Result<Vec<BudgetItem>, StoreError> {
        broken!()
    }
    async fn insert_budget(&self, _budget: NewBudget) -> Result<Budget, StoreError> {
        broken!()
    }
    async fn insert_item(&self, _item: NewBudgetItem) -> Result<BudgetItem, StoreError> {
        broken!()
    }
    async fn update_budget(&self, _budget: &Budget) -> Result<(), StoreError> {
        broken!()
    }
    async fn update_item(&self, _item: &BudgetItem) -> Result<(), StoreError> {
        broken!()
    }
    async fn delete_budget(&self, _id: Uuid) -> Result<(), StoreError> {
        broken!()
    }
    async fn delete_item(&self, _id: Uuid) -> Result<(), StoreError> {
        broken!()
    }
}

fn service() -> BudgetService<MemoryStore> {
    BudgetService::new(MemoryStore::default())
}

fn assert_message(err: &BudgetError, expected: &str) {
    assert_eq!(err.to_string(), expected);
}

// ============================================================================
// create_budget
// ============================================================================

#[tokio::test]
async fn test_create_and_get_round_trip() {
    let service = service();
    let owner = Uuid::new_v4();

    let budget_id = service
        .create_budget(owner, "Test", "1", "1000")
        .await
        .unwrap();

    let view = service.get_budget(budget_id, owner).await.unwrap().unwrap();
    assert_eq!(view.id, budget_id);
    assert_eq!(view.name, "Test");
    assert_eq!(view.month_duration, 1);
    assert_eq!(view.gross_income, "$1,000.00");
    assert!(view.items.is_empty());
}

#[tokio::test]
async fn test_create_empty_name() {
    let service = service();

    let err = service
        .create_budget(Uuid::new_v4(), "", "1", "1000")
        .await
        .unwrap_err();
    assert_message(&err, "Budget name must not be empty.");
}

#[tokio::test]
async fn test_create_duplicate_name_same_owner() {
    let service = service();
    let owner = Uuid::new_v4();

    service
        .create_budget(owner, "household", "1", "3500")
        .await
        .unwrap();

    let err = service
        .create_budget(owner, "household", "12", "42000")
        .await
        .unwrap_err();
    assert!(matches!(err, BudgetError::DuplicateName));
    assert_message(&err, "You already have a budget with that name.");
}

#[tokio::test]
async fn test_create_same_name_different_owner() {
    let service = service();

    service
        .create_budget(Uuid::new_v4(), "household", "1", "3500")
        .await
        .unwrap();
    service
        .create_budget(Uuid::new_v4(), "household", "1", "3500")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_invalid_duration_messages() {
    let service = service();
    let owner = Uuid::new_v4();

    let err = service
        .create_budget(owner, "a", "3", "1000")
        .await
        .unwrap_err();
    assert_message(&err, "Month duration must be 1 (month) or 12 (year).");

    let err = service
        .create_budget(owner, "a", "1.5", "1000")
        .await
        .unwrap_err();
    assert_message(&err, "Month duration must be a whole number (1 or 12).");
}

#[tokio::test]
async fn test_create_invalid_income_messages() {
    let service = service();
    let owner = Uuid::new_v4();

    let err = service
        .create_budget(owner, "a", "1", "-23")
        .await
        .unwrap_err();
    assert_message(&err, "Gross income must be a non negative number.");

    let err = service
        .create_budget(owner, "a", "1", "one hundred")
        .await
        .unwrap_err();
    assert_message(&err, "Gross income must be a valid number.");
}

#[tokio::test]
async fn test_create_zero_income_allowed() {
    let service = service();
    let owner = Uuid::new_v4();

    let budget_id = service.create_budget(owner, "a", "12", "0").await.unwrap();
    let view = service.get_budget(budget_id, owner).await.unwrap().unwrap();
    assert_eq!(view.gross_income, "$0.00");
}

#[tokio::test]
async fn test_create_check_precedence() {
    let service = service();
    let owner = Uuid::new_v4();
    service
        .create_budget(owner, "taken", "1", "1000")
        .await
        .unwrap();

    // empty name wins over everything else
    let err = service
        .create_budget(owner, "", "nope", "nope")
        .await
        .unwrap_err();
    assert_message(&err, "Budget name must not be empty.");

    // duplicate name wins over bad numbers
    let err = service
        .create_budget(owner, "taken", "nope", "nope")
        .await
        .unwrap_err();
    assert!(matches!(err, BudgetError::DuplicateName));

    // duration is checked before income
    let err = service
        .create_budget(owner, "fresh", "nope", "nope")
        .await
        .unwrap_err();
    assert_message(&err, "Month duration must be a whole number (1 or 12).");
}

// ============================================================================
// create_budget_item
// ============================================================================

#[tokio::test]
async fn test_create_item_invalid_budget() {
    let service = service();

    let err = service
        .create_budget_item("Rent", "bills", "1200", Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap_err();
    assert_message(&err, "Invalid budget.");
}

#[tokio::test]
async fn test_create_item_wrong_owner() {
    let service = service();
    let owner = Uuid::new_v4();
    let budget_id = service
        .create_budget(owner, "Test", "1", "1000")
        .await
        .unwrap();

    let err = service
        .create_budget_item("Rent", "bills", "1200", budget_id, Uuid::new_v4())
        .await
        .unwrap_err();
    assert_message(&err, "Invalid budget.");
}

#[tokio::test]
async fn test_create_item_validation_messages() {
    let service = service();
    let owner = Uuid::new_v4();
    let budget_id = service
        .create_budget(owner, "Test", "1", "1000")
        .await
        .unwrap();

    let err = service
        .create_budget_item("", "savings", "1234", budget_id, owner)
        .await
        .unwrap_err();
    assert_message(&err, "Budget item name must not be empty.");

    let err = service
        .create_budget_item("test", "test", "1234", budget_id, owner)
        .await
        .unwrap_err();
    assert_message(&err, "Category: 'test' is not valid");

    let err = service
        .create_budget_item("test", "savings", "-1234", budget_id, owner)
        .await
        .unwrap_err();
    assert_message(&err, "Total must be a non negative number.");

    let err = service
        .create_budget_item("test", "savings", "1 hundred", budget_id, owner)
        .await
        .unwrap_err();
    assert_message(&err, "Total must be a valid number.");
}

#[tokio::test]
async fn test_create_item_appears_in_budget() {
    let service = service();
    let owner = Uuid::new_v4();
    let budget_id = service
        .create_budget(owner, "Test", "1", "1000")
        .await
        .unwrap();

    let item_id = service
        .create_budget_item("Rent", "bills", "1200", budget_id, owner)
        .await
        .unwrap();

    let view = service.get_budget(budget_id, owner).await.unwrap().unwrap();
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].id, item_id);
    assert_eq!(view.items[0].name, "Rent");
    assert_eq!(view.items[0].category, ItemCategory::Bills);
    assert_eq!(view.items[0].total, "$1,200.00");
}

// ============================================================================
// get_budget / get_user_budgets
// ============================================================================

#[tokio::test]
async fn test_get_budget_miss_is_none_not_error() {
    let service = service();
    let owner = Uuid::new_v4();
    let budget_id = service
        .create_budget(owner, "Test", "1", "1000")
        .await
        .unwrap();

    // unknown id
    assert!(
        service
            .get_budget(Uuid::new_v4(), owner)
            .await
            .unwrap()
            .is_none()
    );
    // someone else's budget
    assert!(
        service
            .get_budget(budget_id, Uuid::new_v4())
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_get_user_budgets_creation_order() {
    let service = service();
    let owner = Uuid::new_v4();

    service
        .create_budget(owner, "first", "1", "3500")
        .await
        .unwrap();
    let second_id = service
        .create_budget(owner, "second", "12", "123456")
        .await
        .unwrap();
    service
        .create_budget_item("401k", "deductions", "250", second_id, owner)
        .await
        .unwrap();
    // another user's budget must not leak in
    service
        .create_budget(Uuid::new_v4(), "other", "12", "246810")
        .await
        .unwrap();

    let budgets = service.get_user_budgets(owner).await.unwrap();
    assert_eq!(budgets.len(), 2);
    assert_eq!(budgets[0].name, "first");
    assert_eq!(budgets[0].gross_income, "$3,500.00");
    assert_eq!(budgets[1].name, "second");
    assert_eq!(budgets[1].gross_income, "$123,456.00");
    assert_eq!(budgets[1].items.len(), 1);
    assert_eq!(budgets[1].items[0].total, "$250.00");
}

#[tokio::test]
async fn test_get_user_budgets_empty() {
    let service = service();
    assert!(
        service
            .get_user_budgets(Uuid::new_v4())
            .await
            .unwrap()
            .is_empty()
    );
}

// ============================================================================
// edit_budget
// ============================================================================

#[tokio::test]
async fn test_edit_budget_not_owned() {
    let service = service();
    let owner = Uuid::new_v4();
    let budget_id = service
        .create_budget(owner, "Test", "1", "1000")
        .await
        .unwrap();

    let changes = BudgetChanges {
        name: Some("renamed".to_string()),
        ..BudgetChanges::default()
    };

    let err = service
        .edit_budget(Uuid::new_v4(), owner, changes.clone())
        .await
        .unwrap_err();
    assert_message(&err, "Invalid budget.");

    let err = service
        .edit_budget(budget_id, Uuid::new_v4(), changes)
        .await
        .unwrap_err();
    assert_message(&err, "Invalid budget.");
}

#[tokio::test]
async fn test_edit_budget_partial_update() {
    let service = service();
    let owner = Uuid::new_v4();
    let budget_id = service
        .create_budget(owner, "Test", "1", "3500")
        .await
        .unwrap();

    let changes = BudgetChanges {
        name: Some("renamed".to_string()),
        ..BudgetChanges::default()
    };
    let returned = service
        .edit_budget(budget_id, owner, changes.clone())
        .await
        .unwrap();
    assert_eq!(returned, budget_id);

    let view = service.get_budget(budget_id, owner).await.unwrap().unwrap();
    assert_eq!(view.name, "renamed");
    // unspecified attributes untouched
    assert_eq!(view.month_duration, 1);
    assert_eq!(view.gross_income, "$3,500.00");

    // repeating the same change is a no-op
    service.edit_budget(budget_id, owner, changes).await.unwrap();
    let again = service.get_budget(budget_id, owner).await.unwrap().unwrap();
    assert_eq!(again, view);
}

#[tokio::test]
async fn test_edit_budget_all_attributes() {
    let service = service();
    let owner = Uuid::new_v4();
    let budget_id = service
        .create_budget(owner, "Test", "1", "3500")
        .await
        .unwrap();

    service
        .edit_budget(
            budget_id,
            owner,
            BudgetChanges {
                name: Some("updated".to_string()),
                gross_income: Some("22222".to_string()),
                month_duration: Some("12".to_string()),
            },
        )
        .await
        .unwrap();

    let view = service.get_budget(budget_id, owner).await.unwrap().unwrap();
    assert_eq!(view.name, "updated");
    assert_eq!(view.month_duration, 12);
    assert_eq!(view.gross_income, "$22,222.00");
}

#[tokio::test]
async fn test_edit_budget_validation_messages() {
    let service = service();
    let owner = Uuid::new_v4();
    let budget_id = service
        .create_budget(owner, "Test", "1", "3500")
        .await
        .unwrap();
    service
        .create_budget(owner, "taken", "1", "100")
        .await
        .unwrap();

    let err = service
        .edit_budget(
            budget_id,
            owner,
            BudgetChanges {
                name: Some(String::new()),
                ..BudgetChanges::default()
            },
        )
        .await
        .unwrap_err();
    assert_message(&err, "New name must not be empty.");

    let err = service
        .edit_budget(
            budget_id,
            owner,
            BudgetChanges {
                name: Some("taken".to_string()),
                ..BudgetChanges::default()
            },
        )
        .await
        .unwrap_err();
    assert_message(&err, "You already have a budget with that name.");

    let err = service
        .edit_budget(
            budget_id,
            owner,
            BudgetChanges {
                gross_income: Some("-123".to_string()),
                ..BudgetChanges::default()
            },
        )
        .await
        .unwrap_err();
    assert_message(&err, "gross_income must be a non negative number.");

    let err = service
        .edit_budget(
            budget_id,
            owner,
            BudgetChanges {
                gross_income: Some(String::new()),
                ..BudgetChanges::default()
            },
        )
        .await
        .unwrap_err();
    assert_message(&err, "gross_income must be a valid number.");

    let err = service
        .edit_budget(
            budget_id,
            owner,
            BudgetChanges {
                month_duration: Some("2".to_string()),
                ..BudgetChanges::default()
            },
        )
        .await
        .unwrap_err();
    assert_message(&err, "Month duration must be 1 (month) or 12 (year).");

    let err = service
        .edit_budget(
            budget_id,
            owner,
            BudgetChanges {
                month_duration: Some(String::new()),
                ..BudgetChanges::default()
            },
        )
        .await
        .unwrap_err();
    assert_message(&err, "Month duration must be a whole number (1 or 12).");
}

#[tokio::test]
async fn test_edit_budget_rename_to_own_name_allowed() {
    let service = service();
    let owner = Uuid::new_v4();
    let budget_id = service
        .create_budget(owner, "Test", "1", "3500")
        .await
        .unwrap();

    service
        .edit_budget(
            budget_id,
            owner,
            BudgetChanges {
                name: Some("Test".to_string()),
                ..BudgetChanges::default()
            },
        )
        .await
        .unwrap();
}

// ============================================================================
// edit_budget_item
// ============================================================================

#[tokio::test]
async fn test_edit_item_not_found() {
    let service = service();
    let owner = Uuid::new_v4();
    let budget_id = service
        .create_budget(owner, "Test", "1", "3500")
        .await
        .unwrap();
    let item_id = service
        .create_budget_item("Rent", "bills", "1200", budget_id, owner)
        .await
        .unwrap();

    let changes = ItemChanges {
        name: Some("foo".to_string()),
        ..ItemChanges::default()
    };

    // unknown item
    let err = service
        .edit_budget_item(Uuid::new_v4(), budget_id, changes.clone())
        .await
        .unwrap_err();
    assert_message(&err, "Invalid budget item.");

    // item exists but under a different budget
    let err = service
        .edit_budget_item(item_id, Uuid::new_v4(), changes)
        .await
        .unwrap_err();
    assert_message(&err, "Invalid budget item.");
}

#[tokio::test]
async fn test_edit_item_validation_messages() {
    let service = service();
    let owner = Uuid::new_v4();
    let budget_id = service
        .create_budget(owner, "Test", "1", "3500")
        .await
        .unwrap();
    let item_id = service
        .create_budget_item("Rent", "bills", "1200", budget_id, owner)
        .await
        .unwrap();

    let err = service
        .edit_budget_item(
            item_id,
            budget_id,
            ItemChanges {
                name: Some(String::new()),
                ..ItemChanges::default()
            },
        )
        .await
        .unwrap_err();
    assert_message(&err, "New name must not be empty.");

    let err = service
        .edit_budget_item(
            item_id,
            budget_id,
            ItemChanges {
                category: Some("invalid_category".to_string()),
                ..ItemChanges::default()
            },
        )
        .await
        .unwrap_err();
    assert_message(&err, "Category: 'invalid_category' is not valid");

    let err = service
        .edit_budget_item(
            item_id,
            budget_id,
            ItemChanges {
                total: Some("-123".to_string()),
                ..ItemChanges::default()
            },
        )
        .await
        .unwrap_err();
    assert_message(&err, "Total must be a non negative number.");

    let err = service
        .edit_budget_item(
            item_id,
            budget_id,
            ItemChanges {
                total: Some(String::new()),
                ..ItemChanges::default()
            },
        )
        .await
        .unwrap_err();
    assert_message(&err, "Total must be a valid number.");
}

#[tokio::test]
async fn test_edit_item_partial_and_full_update() {
    let service = service();
    let owner = Uuid::new_v4();
    let budget_id = service
        .create_budget(owner, "Test", "1", "3500")
        .await
        .unwrap();
    let item_id = service
        .create_budget_item("Rent", "bills", "1200", budget_id, owner)
        .await
        .unwrap();

    // one attribute: the others stay
    service
        .edit_budget_item(
            item_id,
            budget_id,
            ItemChanges {
                name: Some("Lease".to_string()),
                ..ItemChanges::default()
            },
        )
        .await
        .unwrap();

    let view = service.get_budget(budget_id, owner).await.unwrap().unwrap();
    assert_eq!(view.items[0].name, "Lease");
    assert_eq!(view.items[0].category, ItemCategory::Bills);
    assert_eq!(view.items[0].total, "$1,200.00");

    // all attributes
    service
        .edit_budget_item(
            item_id,
            budget_id,
            ItemChanges {
                name: Some("Emergency fund".to_string()),
                category: Some("savings".to_string()),
                total: Some("123".to_string()),
            },
        )
        .await
        .unwrap();

    let view = service.get_budget(budget_id, owner).await.unwrap().unwrap();
    assert_eq!(view.items[0].name, "Emergency fund");
    assert_eq!(view.items[0].category, ItemCategory::Savings);
    assert_eq!(view.items[0].total, "$123.00");
}

// ============================================================================
// delete_budget / delete_budget_item
// ============================================================================

#[tokio::test]
async fn test_delete_budget_not_owned() {
    let service = service();
    let owner = Uuid::new_v4();
    let budget_id = service
        .create_budget(owner, "Test", "1", "3500")
        .await
        .unwrap();

    let err = service
        .delete_budget(Uuid::new_v4(), owner)
        .await
        .unwrap_err();
    assert_message(&err, "Invalid budget.");

    let err = service
        .delete_budget(budget_id, Uuid::new_v4())
        .await
        .unwrap_err();
    assert_message(&err, "Invalid budget.");
}

#[tokio::test]
async fn test_delete_budget_cascades_items() {
    let service = service();
    let owner = Uuid::new_v4();
    let budget_id = service
        .create_budget(owner, "Test", "1", "3500")
        .await
        .unwrap();
    let item_id = service
        .create_budget_item("Rent", "bills", "1200", budget_id, owner)
        .await
        .unwrap();

    let name = service.delete_budget(budget_id, owner).await.unwrap();
    assert_eq!(name, "Test");

    assert!(service.get_budget(budget_id, owner).await.unwrap().is_none());

    // the cascade removed the item too
    let err = service
        .delete_budget_item(item_id, budget_id)
        .await
        .unwrap_err();
    assert_message(&err, "Invalid budget item.");
}

#[tokio::test]
async fn test_delete_item() {
    let service = service();
    let owner = Uuid::new_v4();
    let budget_id = service
        .create_budget(owner, "Test", "1", "3500")
        .await
        .unwrap();
    let item_id = service
        .create_budget_item("Rent", "bills", "1200", budget_id, owner)
        .await
        .unwrap();

    // wrong budget
    let err = service
        .delete_budget_item(item_id, Uuid::new_v4())
        .await
        .unwrap_err();
    assert_message(&err, "Invalid budget item.");

    let descriptor = service.delete_budget_item(item_id, budget_id).await.unwrap();
    assert_eq!(descriptor, "Category: 'bills' and with Name: 'Rent'");

    // already gone
    let err = service
        .delete_budget_item(item_id, budget_id)
        .await
        .unwrap_err();
    assert_message(&err, "Invalid budget item.");
}

// ============================================================================
// infrastructure failures
// ============================================================================

#[tokio::test]
async fn test_store_failure_is_classified_as_store_error() {
    let service = BudgetService::new(BrokenStore);
    let owner = Uuid::new_v4();

    let err = service
        .create_budget(owner, "Test", "1", "1000")
        .await
        .unwrap_err();
    assert!(matches!(err, BudgetError::Store(_)));

    let err = service.get_user_budgets(owner).await.unwrap_err();
    assert!(matches!(err, BudgetError::Store(_)));
}

// ============================================================================
// end to end
// ============================================================================

#[tokio::test]
async fn test_end_to_end_scenario() {
    let service = service();
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();

    let budget_id = service
        .create_budget(owner, "Test", "1", "1000")
        .await
        .unwrap();

    service
        .create_budget_item("Rent", "bills", "1200", budget_id, owner)
        .await
        .unwrap();

    let view = service.get_budget(budget_id, owner).await.unwrap().unwrap();
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].name, "Rent");
    assert_eq!(view.items[0].category, ItemCategory::Bills);
    assert_eq!(view.items[0].total, "$1,200.00");

    // the same call from another user is rejected
    let err = service
        .create_budget_item("Rent", "bills", "1200", budget_id, stranger)
        .await
        .unwrap_err();
    assert_message(&err, "Invalid budget.");

    let amount = dec!(1200);
    assert_eq!(super::format::format_usd(amount), "$1,200.00");
}
