//! Authentication routes for register and login.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use serde_json::json;
use tracing::{error, info};

use crate::AppState;
use pennywise_core::auth::{hash_password, verify_password};
use pennywise_db::UserRepository;
use pennywise_shared::auth::{LoginRequest, LoginResponse, RegisterRequest};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
}

fn missing_credentials() -> axum::response::Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "message": "Username and/or password must be provided." })),
    )
        .into_response()
}

fn auth_unavailable(action: &str) -> axum::response::Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({ "message": format!("Unable to {action} user.") })),
    )
        .into_response()
}

/// POST /api/auth/register - Register a new user.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    let (Some(username), Some(password)) = (payload.username, payload.password) else {
        return missing_credentials();
    };

    if username.is_empty() || password.is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "message": "Username and/or password must not be empty." })),
        )
            .into_response();
    }

    let user_repo = UserRepository::new((*state.db).clone());

    match user_repo.username_exists(&username).await {
        Ok(true) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "message": "Username already taken." })),
            )
                .into_response();
        }
        Ok(false) => {}
        Err(e) => {
            error!(error = %e, "Database error checking username");
            return auth_unavailable("register");
        }
    }

    let password_hash = match hash_password(&password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "Failed to hash password");
            return auth_unavailable("register");
        }
    };

    match user_repo.create(&username, &password_hash).await {
        Ok(user) => {
            info!(user_id = %user.id, username = %user.username, "New user registered");
            (
                StatusCode::OK,
                Json(json!({ "message": "User successfully registered." })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create user");
            auth_unavailable("register")
        }
    }
}

/// POST /api/auth/login - Authenticate a user and return a session token.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let (Some(username), Some(password)) = (payload.username, payload.password) else {
        return missing_credentials();
    };

    let user_repo = UserRepository::new((*state.db).clone());

    let user = match user_repo.find_by_username(&username).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            info!(username = %username, "Login attempt for non-existent user");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Database error during login");
            return auth_unavailable("authenticate");
        }
    };

    match verify_password(&password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(user_id = %user.id, "Failed login attempt - invalid password");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return auth_unavailable("authenticate");
        }
    }

    let access_token = match state.jwt_service.generate_access_token(user.id) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate session token");
            return auth_unavailable("authenticate");
        }
    };

    info!(user_id = %user.id, "User logged in successfully");

    (
        StatusCode::OK,
        Json(LoginResponse {
            message: "Successfully authenticated.".to_string(),
            access_token,
            expires_in: state.jwt_service.access_token_expires_in(),
        }),
    )
        .into_response()
}

fn invalid_credentials() -> axum::response::Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Invalid username or password." })),
    )
        .into_response()
}
