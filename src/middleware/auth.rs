use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth;
use crate::database::models::User;
use crate::database::repository::UserRepository;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user attached to the request once the gate admits it.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// Auth gate layered onto protected routers at registration time.
///
/// Two outcomes per request: rejected with 401, or admitted with the resolved
/// user in the request extensions. The resolution step against the store is
/// what finally rejects tokens whose user no longer exists - there is no
/// revocation list.
pub async fn require_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers)
        .ok_or_else(|| ApiError::unauthorized("Token de autenticación requerido"))?;

    let claims = auth::verify_token(&token)
        .map_err(|_| ApiError::unauthorized("Token inválido o expirado"))?;

    let user = UserRepository::new(&state.db)
        .find_by_email(&claims.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Usuario no encontrado"))?;

    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}

/// Pull the token out of `Authorization: Bearer <token>`.
fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("authorization")?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn missing_header_yields_none() {
        assert!(extract_bearer_token(&HeaderMap::new()).is_none());
    }

    #[test]
    fn non_bearer_scheme_is_rejected() {
        let headers = headers_with("Basic dXNlcjpwYXNz");
        assert!(extract_bearer_token(&headers).is_none());
    }

    #[test]
    fn empty_bearer_token_is_rejected() {
        let headers = headers_with("Bearer ");
        assert!(extract_bearer_token(&headers).is_none());
    }

    #[test]
    fn bearer_token_is_extracted() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(extract_bearer_token(&headers).as_deref(), Some("abc.def.ghi"));
    }
}
