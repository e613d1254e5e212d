//! Budget data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::BudgetError;

/// Budget item category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    /// Paycheck deductions (taxes, 401k, insurance).
    Deductions,
    /// Recurring bills.
    Bills,
    /// Money set aside.
    Savings,
}

impl ItemCategory {
    /// All valid categories, in the order the API lists them.
    pub const ALL: [Self; 3] = [Self::Deductions, Self::Bills, Self::Savings];

    /// Returns the lowercase wire name of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deductions => "deductions",
            Self::Bills => "bills",
            Self::Savings => "savings",
        }
    }

    /// Parses a raw category value.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::InvalidValue` with the user-facing message when
    /// the value is not one of the fixed categories.
    pub fn parse(raw: &str) -> Result<Self, BudgetError> {
        match raw {
            "deductions" => Ok(Self::Deductions),
            "bills" => Ok(Self::Bills),
            "savings" => Ok(Self::Savings),
            _ => Err(BudgetError::InvalidValue(format!(
                "Category: '{raw}' is not valid"
            ))),
        }
    }
}

impl std::fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A budget record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Budget ID.
    pub id: Uuid,
    /// User the budget belongs to. Immutable.
    pub owner_id: Uuid,
    /// Budget name, unique per owner.
    pub name: String,
    /// Duration in months: 1 (monthly) or 12 (yearly).
    pub month_duration: i32,
    /// Gross income over the duration.
    pub gross_income: Decimal,
}

/// A budget item record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetItem {
    /// Budget item ID.
    pub id: Uuid,
    /// Parent budget ID. Immutable.
    pub budget_id: Uuid,
    /// Item name.
    pub name: String,
    /// Item category.
    pub category: ItemCategory,
    /// Item amount.
    pub total: Decimal,
}

/// Input for inserting a budget. The store assigns the ID.
#[derive(Debug, Clone)]
pub struct NewBudget {
    /// User the budget belongs to.
    pub owner_id: Uuid,
    /// Budget name.
    pub name: String,
    /// Duration in months.
    pub month_duration: i32,
    /// Gross income over the duration.
    pub gross_income: Decimal,
}

/// Input for inserting a budget item. The store assigns the ID.
#[derive(Debug, Clone)]
pub struct NewBudgetItem {
    /// Parent budget ID.
    pub budget_id: Uuid,
    /// Item name.
    pub name: String,
    /// Item category.
    pub category: ItemCategory,
    /// Item amount.
    pub total: Decimal,
}

/// Partial update for a budget: only present attributes are changed.
///
/// Values are raw request strings; the service re-runs the per-field
/// validation before applying them.
#[derive(Debug, Clone, Default)]
pub struct BudgetChanges {
    /// New name.
    pub name: Option<String>,
    /// New gross income, unparsed.
    pub gross_income: Option<String>,
    /// New month duration, unparsed.
    pub month_duration: Option<String>,
}

impl BudgetChanges {
    /// True when no attribute is present - nothing valid to update.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.gross_income.is_none() && self.month_duration.is_none()
    }
}

/// Partial update for a budget item.
#[derive(Debug, Clone, Default)]
pub struct ItemChanges {
    /// New name.
    pub name: Option<String>,
    /// New category, unparsed.
    pub category: Option<String>,
    /// New total, unparsed.
    pub total: Option<String>,
}

impl ItemChanges {
    /// True when no attribute is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.category.is_none() && self.total.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_valid() {
        assert_eq!(ItemCategory::parse("bills").unwrap(), ItemCategory::Bills);
        assert_eq!(
            ItemCategory::parse("deductions").unwrap(),
            ItemCategory::Deductions
        );
        assert_eq!(
            ItemCategory::parse("savings").unwrap(),
            ItemCategory::Savings
        );
    }

    #[test]
    fn test_category_parse_invalid() {
        let err = ItemCategory::parse("food").unwrap_err();
        assert_eq!(err.to_string(), "Category: 'food' is not valid");
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&ItemCategory::Deductions).unwrap();
        assert_eq!(json, "\"deductions\"");
    }

    #[test]
    fn test_changes_is_empty() {
        assert!(BudgetChanges::default().is_empty());
        assert!(ItemChanges::default().is_empty());

        let changes = BudgetChanges {
            name: Some("groceries".to_string()),
            ..BudgetChanges::default()
        };
        assert!(!changes.is_empty());
    }
}
