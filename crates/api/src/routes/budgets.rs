//! Budget management routes.
//!
//! Every handler follows the same contract: required-key presence checks
//! first (422 with a field-specific message), then the domain call, then
//! the three-tier outcome mapping - validation failures are 422 with the
//! domain's message verbatim, storage failures are 503 with a generic
//! message, and authentication is settled by the middleware before the
//! handler runs (401).

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, extractors::raw_scalar, middleware::AuthUser};
use pennywise_core::budget::{
    BudgetChanges, BudgetError, BudgetService, ItemCategory, ItemChanges,
};
use pennywise_db::BudgetRepository;

/// Creates the protected budget routes (auth middleware is applied by the
/// caller).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/budgets", get(get_budgets))
        .route("/api/budget", post(get_budget))
        .route("/api/budget/create", post(create_budget))
        .route("/api/budget/edit", post(edit_budget))
        .route("/api/budget/delete", post(delete_budget))
        .route("/api/budget/item/create", post(create_budget_item))
        .route("/api/budget/item/edit", post(edit_budget_item))
        .route("/api/budget/item/delete", post(delete_budget_item))
}

/// Creates the public budget routes.
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/api/budget/item/categories", get(get_item_categories))
}

/// Editable budget attributes, in validation order.
const BUDGET_ATTRIBUTES: &str = "name, gross_income, month_duration";
/// Editable budget item attributes, in validation order.
const BUDGET_ITEM_ATTRIBUTES: &str = "name, category, total";

// ============================================================================
// Request Types
// ============================================================================

/// Request body for fetching a single budget.
#[derive(Debug, Deserialize)]
pub struct GetBudgetRequest {
    /// Budget ID.
    #[serde(default)]
    pub budget_id: Option<Uuid>,
}

/// Request body for creating a budget.
///
/// Every field is optional so the handler can report missing keys with
/// the message the API contract requires; raw scalars accept strings or
/// numbers.
#[derive(Debug, Deserialize)]
pub struct CreateBudgetRequest {
    /// Budget name.
    #[serde(default, deserialize_with = "raw_scalar::option")]
    pub name: Option<String>,
    /// Gross income over the duration.
    #[serde(default, deserialize_with = "raw_scalar::option")]
    pub gross_income: Option<String>,
    /// Month duration: 1 or 12.
    #[serde(default, deserialize_with = "raw_scalar::option")]
    pub month_duration: Option<String>,
}

/// Request body for creating a budget item.
#[derive(Debug, Deserialize)]
pub struct CreateBudgetItemRequest {
    /// Item name.
    #[serde(default, deserialize_with = "raw_scalar::option")]
    pub name: Option<String>,
    /// Item category.
    #[serde(default, deserialize_with = "raw_scalar::option")]
    pub category: Option<String>,
    /// Item amount.
    #[serde(default, deserialize_with = "raw_scalar::option")]
    pub total: Option<String>,
    /// Parent budget ID.
    #[serde(default)]
    pub budget_id: Option<Uuid>,
}

/// Request body for partially updating a budget.
#[derive(Debug, Deserialize)]
pub struct EditBudgetRequest {
    /// Budget ID.
    #[serde(default)]
    pub budget_id: Option<Uuid>,
    /// New name.
    #[serde(default, deserialize_with = "raw_scalar::option")]
    pub name: Option<String>,
    /// New gross income.
    #[serde(default, deserialize_with = "raw_scalar::option")]
    pub gross_income: Option<String>,
    /// New month duration.
    #[serde(default, deserialize_with = "raw_scalar::option")]
    pub month_duration: Option<String>,
}

/// Request body for partially updating a budget item.
#[derive(Debug, Deserialize)]
pub struct EditBudgetItemRequest {
    /// Budget item ID.
    #[serde(default)]
    pub item_id: Option<Uuid>,
    /// Parent budget ID.
    #[serde(default)]
    pub budget_id: Option<Uuid>,
    /// New name.
    #[serde(default, deserialize_with = "raw_scalar::option")]
    pub name: Option<String>,
    /// New category.
    #[serde(default, deserialize_with = "raw_scalar::option")]
    pub category: Option<String>,
    /// New total.
    #[serde(default, deserialize_with = "raw_scalar::option")]
    pub total: Option<String>,
}

/// Request body for deleting a budget.
#[derive(Debug, Deserialize)]
pub struct DeleteBudgetRequest {
    /// Budget ID.
    #[serde(default)]
    pub budget_id: Option<Uuid>,
}

/// Request body for deleting a budget item.
#[derive(Debug, Deserialize)]
pub struct DeleteBudgetItemRequest {
    /// Budget item ID.
    #[serde(default)]
    pub item_id: Option<Uuid>,
    /// Parent budget ID.
    #[serde(default)]
    pub budget_id: Option<Uuid>,
}

// ============================================================================
// Helper Functions
// ============================================================================

fn budget_service(state: &AppState) -> BudgetService<BudgetRepository> {
    BudgetService::new(BudgetRepository::new((*state.db).clone()))
}

fn unprocessable(message: &str) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "message": message })),
    )
        .into_response()
}

fn missing_attributes(valid: &str) -> Response {
    unprocessable(&format!(
        "Missing attribute(s) to update. Valid attributes are: {valid}"
    ))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /api/budget - Fetch one of the caller's budgets.
///
/// A miss (unknown id or someone else's budget) is `{"budget": {}}`, not
/// an error.
async fn get_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<GetBudgetRequest>,
) -> Response {
    let Some(budget_id) = payload.budget_id else {
        return unprocessable("No budget_id provided");
    };

    match budget_service(&state)
        .get_budget(budget_id, auth.user_id())
        .await
    {
        Ok(Some(budget)) => (StatusCode::OK, Json(json!({ "budget": budget }))).into_response(),
        Ok(None) => (StatusCode::OK, Json(json!({ "budget": {} }))).into_response(),
        Err(e) => budget_error_response(&e, "retrieve budget"),
    }
}

/// GET /api/budgets - List all of the caller's budgets in creation order.
async fn get_budgets(State(state): State<AppState>, auth: AuthUser) -> Response {
    match budget_service(&state).get_user_budgets(auth.user_id()).await {
        Ok(budgets) => (StatusCode::OK, Json(json!({ "budgets": budgets }))).into_response(),
        Err(e) => budget_error_response(&e, "retrieve budgets"),
    }
}

/// POST /api/budget/create - Create a new budget.
async fn create_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateBudgetRequest>,
) -> Response {
    let (Some(name), Some(gross_income), Some(month_duration)) =
        (payload.name, payload.gross_income, payload.month_duration)
    else {
        return missing_attributes(BUDGET_ATTRIBUTES);
    };

    let service = budget_service(&state);
    let user_id = auth.user_id();

    match service
        .create_budget(user_id, &name, &month_duration, &gross_income)
        .await
    {
        Ok(budget_id) => {
            info!(user_id = %user_id, budget_id = %budget_id, "Budget created");
            match service.get_budget(budget_id, user_id).await {
                Ok(budget) => (
                    StatusCode::OK,
                    Json(json!({ "budget": budget.map_or_else(|| json!({}), |b| json!(b)) })),
                )
                    .into_response(),
                Err(e) => budget_error_response(&e, "create budget"),
            }
        }
        Err(e) => budget_error_response(&e, "create budget"),
    }
}

/// POST /api/budget/item/create - Create an item under one of the
/// caller's budgets.
async fn create_budget_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateBudgetItemRequest>,
) -> Response {
    let (Some(name), Some(category), Some(total), Some(budget_id)) = (
        payload.name,
        payload.category,
        payload.total,
        payload.budget_id,
    ) else {
        return missing_attributes("name, category, total, budget_id");
    };

    let service = budget_service(&state);
    let user_id = auth.user_id();

    match service
        .create_budget_item(&name, &category, &total, budget_id, user_id)
        .await
    {
        Ok(item_id) => {
            info!(user_id = %user_id, budget_id = %budget_id, item_id = %item_id, "Budget item created");
            match service.get_budget(budget_id, user_id).await {
                Ok(budget) => (
                    StatusCode::OK,
                    Json(json!({
                        "budget": budget.map_or_else(|| json!({}), |b| json!(b)),
                        "budget_item_id": item_id
                    })),
                )
                    .into_response(),
                Err(e) => budget_error_response(&e, "create budget item"),
            }
        }
        Err(e) => budget_error_response(&e, "create budget item"),
    }
}

/// POST /api/budget/edit - Partially update a budget.
async fn edit_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<EditBudgetRequest>,
) -> Response {
    let Some(budget_id) = payload.budget_id else {
        return unprocessable("Missing budget_id");
    };

    let changes = BudgetChanges {
        name: payload.name,
        gross_income: payload.gross_income,
        month_duration: payload.month_duration,
    };
    if changes.is_empty() {
        return missing_attributes(BUDGET_ATTRIBUTES);
    }

    let service = budget_service(&state);
    let user_id = auth.user_id();

    match service.edit_budget(budget_id, user_id, changes).await {
        Ok(budget_id) => {
            info!(user_id = %user_id, budget_id = %budget_id, "Budget updated");
            match service.get_budget(budget_id, user_id).await {
                Ok(budget) => (
                    StatusCode::OK,
                    Json(json!({
                        "budget_id": budget_id,
                        "budget": budget.map_or_else(|| json!({}), |b| json!(b))
                    })),
                )
                    .into_response(),
                Err(e) => budget_error_response(&e, "update budget"),
            }
        }
        Err(e) => budget_error_response(&e, "update budget"),
    }
}

/// POST /api/budget/item/edit - Partially update a budget item.
async fn edit_budget_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<EditBudgetItemRequest>,
) -> Response {
    let (Some(item_id), Some(budget_id)) = (payload.item_id, payload.budget_id) else {
        return unprocessable("Missing budget_id and/or item_id");
    };

    let changes = ItemChanges {
        name: payload.name,
        category: payload.category,
        total: payload.total,
    };
    if changes.is_empty() {
        return missing_attributes(BUDGET_ITEM_ATTRIBUTES);
    }

    let service = budget_service(&state);
    let user_id = auth.user_id();

    match service.edit_budget_item(item_id, budget_id, changes).await {
        Ok(item_id) => {
            info!(user_id = %user_id, budget_id = %budget_id, item_id = %item_id, "Budget item updated");
            match service.get_budget(budget_id, user_id).await {
                Ok(budget) => (
                    StatusCode::OK,
                    Json(json!({
                        "budget_item_id": item_id,
                        "budget": budget.map_or_else(|| json!({}), |b| json!(b))
                    })),
                )
                    .into_response(),
                Err(e) => budget_error_response(&e, "update budget item"),
            }
        }
        Err(e) => budget_error_response(&e, "update budget item"),
    }
}

/// POST /api/budget/delete - Delete a budget and all of its items.
async fn delete_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<DeleteBudgetRequest>,
) -> Response {
    let Some(budget_id) = payload.budget_id else {
        return unprocessable("Missing budget_id");
    };

    let user_id = auth.user_id();

    match budget_service(&state).delete_budget(budget_id, user_id).await {
        Ok(name) => {
            info!(user_id = %user_id, budget_id = %budget_id, "Budget deleted");
            (
                StatusCode::OK,
                Json(json!({
                    "message": format!("Budget '{name}' and its contents has been deleted")
                })),
            )
                .into_response()
        }
        Err(e) => budget_error_response(&e, "delete budget"),
    }
}

/// POST /api/budget/item/delete - Delete a budget item.
async fn delete_budget_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<DeleteBudgetItemRequest>,
) -> Response {
    let (Some(item_id), Some(budget_id)) = (payload.item_id, payload.budget_id) else {
        return unprocessable("Missing item_id and/or budget_id");
    };

    let user_id = auth.user_id();

    match budget_service(&state)
        .delete_budget_item(item_id, budget_id)
        .await
    {
        Ok(descriptor) => {
            info!(user_id = %user_id, budget_id = %budget_id, item_id = %item_id, "Budget item deleted");
            (
                StatusCode::OK,
                Json(json!({
                    "message": format!(
                        "Budget item in {descriptor} and its contents has been deleted."
                    )
                })),
            )
                .into_response()
        }
        Err(e) => budget_error_response(&e, "delete budget item"),
    }
}

/// GET /api/budget/item/categories - List the fixed item categories.
async fn get_item_categories() -> Response {
    (
        StatusCode::OK,
        Json(json!({ "categories": ItemCategory::ALL })),
    )
        .into_response()
}

// ============================================================================
// Error Mapping
// ============================================================================

/// Maps a domain error to the response contract.
///
/// Validation failures carry user-facing text and map to 422 verbatim.
/// Storage failures are logged and replaced with a generic
/// "Unable to {action}." 503 so internal detail never leaks.
fn budget_error_response(err: &BudgetError, action: &str) -> Response {
    match err {
        BudgetError::Store(e) => {
            error!(error = %e, action = %action, "Budget storage failure");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "message": format!("Unable to {action}.") })),
            )
                .into_response()
        }
        BudgetError::EmptyField(_)
        | BudgetError::DuplicateName
        | BudgetError::NotANumber(_)
        | BudgetError::InvalidValue(_)
        | BudgetError::NegativeValue(_)
        | BudgetError::NotFound(_) => unprocessable(&err.to_string()),
    }
}
