use axum::Extension;
use serde_json::json;

use crate::auth::{self, Claims};
use crate::error::ApiError;
use crate::middleware::auth::CurrentUser;
use crate::middleware::response::{ApiResponse, ApiResult};

/// GET /api/auth/verify - the auth gate has already admitted the request;
/// echo the resolved user back.
pub async fn verify(Extension(CurrentUser(user)): Extension<CurrentUser>) -> ApiResult {
    Ok(ApiResponse::success(
        "Token válido",
        json!({ "user": user.to_response() }),
    ))
}

/// POST /api/auth/refresh - issue a fresh token for the authenticated user.
pub async fn refresh(Extension(CurrentUser(user)): Extension<CurrentUser>) -> ApiResult {
    let claims = Claims::new(
        user.id.map(|id| id.to_hex()).unwrap_or_default(),
        user.username.clone(),
        user.email.clone(),
    );
    let token = auth::issue_token(&claims).map_err(|e| {
        tracing::error!("Error al renovar token: {}", e);
        ApiError::internal_server_error("Error al renovar token")
    })?;

    Ok(ApiResponse::success(
        "Token renovado exitosamente",
        json!({ "token": token }),
    ))
}

/// POST /api/auth/logout - stateless tokens cannot be revoked server-side;
/// the client discards its copy. Nothing changes here.
pub async fn logout() -> ApiResult {
    Ok(ApiResponse::ack("Sesión cerrada exitosamente"))
}
