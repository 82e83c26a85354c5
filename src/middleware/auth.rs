use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{AuthError, UserId};
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user context extracted from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: UserId,
}

/// JWT authentication middleware that validates tokens and extracts user context.
/// Runs before any protected handler, so a bad token never reaches the database.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_from_headers(&headers)?;
    let claims = state.jwt.verify(token)?;

    request.extensions_mut().insert(AuthUser {
        user_id: claims.user_id,
    });

    Ok(next.run(request).await)
}

/// Extract JWT token from an `Authorization: Bearer <token>` header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(AuthError::Missing)?;

    let auth_str = auth_header.to_str().map_err(|_| AuthError::Malformed)?;
    if auth_str.trim().is_empty() {
        return Err(AuthError::Missing);
    }

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(AuthError::Malformed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(v) = value {
            headers.insert("authorization", HeaderValue::from_str(v).unwrap());
        }
        headers
    }

    #[test]
    fn bearer_token_is_extracted() {
        let h = headers(Some("Bearer abc.def.ghi"));
        assert_eq!(extract_jwt_from_headers(&h).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn absent_header_is_missing() {
        assert!(matches!(extract_jwt_from_headers(&headers(None)), Err(AuthError::Missing)));
        assert!(matches!(extract_jwt_from_headers(&headers(Some(""))), Err(AuthError::Missing)));
    }

    #[test]
    fn wrong_scheme_is_malformed() {
        assert!(matches!(
            extract_jwt_from_headers(&headers(Some("Basic dXNlcjpwYXNz"))),
            Err(AuthError::Malformed)
        ));
        assert!(matches!(
            extract_jwt_from_headers(&headers(Some("Bearer    "))),
            Err(AuthError::Malformed)
        ));
    }
}
