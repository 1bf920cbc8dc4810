use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::auth::{self, Claims, PasswordVerifier, PlaintextVerifier};
use crate::database::repository::UserRepository;
use crate::error::ApiError;
use crate::handlers::db_error;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /api/auth/login - authenticate and issue a session token.
///
/// Unknown email and wrong password are indistinguishable to the client.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult {
    let (email, password) = match (
        payload.email.filter(|s| !s.is_empty()),
        payload.password.filter(|s| !s.is_empty()),
    ) {
        (Some(e), Some(p)) => (e, p),
        _ => return Err(ApiError::bad_request("Email y contraseña son requeridos")),
    };

    let user = UserRepository::new(&state.db)
        .find_by_email(&email)
        .await
        .map_err(db_error("Error al iniciar sesión"))?
        .ok_or_else(|| ApiError::unauthorized("Credenciales inválidas"))?;

    if !PlaintextVerifier.verify(&password, &user.password) {
        tracing::warn!(email = %email, "intento de login con credenciales inválidas");
        return Err(ApiError::unauthorized("Credenciales inválidas"));
    }

    let claims = Claims::new(
        user.id.map(|id| id.to_hex()).unwrap_or_default(),
        user.username.clone(),
        user.email.clone(),
    );
    let token = auth::issue_token(&claims).map_err(|e| {
        tracing::error!("Error al emitir token: {}", e);
        ApiError::internal_server_error("Error al iniciar sesión")
    })?;

    tracing::info!(username = %user.username, "login exitoso");

    Ok(ApiResponse::success(
        "Login exitoso",
        json!({ "user": user.to_response(), "token": token }),
    ))
}
