//! Response-shaped views of persisted budgets.

use serde::Serialize;
use uuid::Uuid;

use super::format::format_usd;
use super::types::{Budget, BudgetItem, ItemCategory};

/// A budget as the API presents it: raw fields for calculation plus
/// display-formatted money strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetView {
    /// Budget ID.
    pub id: Uuid,
    /// Budget name.
    pub name: String,
    /// Duration in months.
    pub month_duration: i32,
    /// Gross income, display-formatted.
    pub gross_income: String,
    /// Items in insertion order.
    pub items: Vec<BudgetItemView>,
}

/// A budget item as the API presents it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetItemView {
    /// Budget item ID.
    pub id: Uuid,
    /// Item name.
    pub name: String,
    /// Item category.
    pub category: ItemCategory,
    /// Item amount, display-formatted.
    pub total: String,
}

/// Maps a budget and its items into the response shape. Item ordering is
/// preserved. Deterministic, no I/O.
#[must_use]
pub fn to_view(budget: &Budget, items: &[BudgetItem]) -> BudgetView {
    BudgetView {
        id: budget.id,
        name: budget.name.clone(),
        month_duration: budget.month_duration,
        gross_income: format_usd(budget.gross_income),
        items: items
            .iter()
            .map(|item| BudgetItemView {
                id: item.id,
                name: item.name.clone(),
                category: item.category,
                total: format_usd(item.total),
            })
            .collect(),
    }
}
