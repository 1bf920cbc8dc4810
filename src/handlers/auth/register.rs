use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::database::models::User;
use crate::database::repository::UserRepository;
use crate::error::ApiError;
use crate::handlers::db_error;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /api/auth/register - create a user account.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult {
    let (username, email, password) = match (
        payload.username.filter(|s| !s.is_empty()),
        payload.email.filter(|s| !s.is_empty()),
        payload.password.filter(|s| !s.is_empty()),
    ) {
        (Some(u), Some(e), Some(p)) => (u, e, p),
        _ => {
            return Err(ApiError::bad_request(
                "Username, email y contraseña son requeridos",
            ))
        }
    };

    let repo = UserRepository::new(&state.db);

    // Username uniqueness is checked before email; a request violating both
    // reports only the username conflict
    if repo
        .find_by_username(&username)
        .await
        .map_err(db_error("Error al registrar usuario"))?
        .is_some()
    {
        return Err(ApiError::conflict("El username ya está registrado"));
    }
    if repo
        .find_by_email(&email)
        .await
        .map_err(db_error("Error al registrar usuario"))?
        .is_some()
    {
        return Err(ApiError::conflict("El email ya está registrado"));
    }

    let mut user = User::new(username, email, password);
    repo.save(&mut user)
        .await
        .map_err(db_error("Error al registrar usuario"))?;

    tracing::info!(username = %user.username, "usuario registrado");

    Ok(ApiResponse::created(
        "Usuario registrado exitosamente",
        json!({ "user": user.to_response() }),
    ))
}
