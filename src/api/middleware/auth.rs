//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::application::services::token_service::UNAUTHENTICATED;
use crate::{error::AppError, state::AppState};

/// Authenticates requests using Bearer tokens from Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <id>|<secret>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract token from `Authorization` header
/// 2. Resolve it to its owner through the token service
/// 3. Store the resulting [`AuthUser`](crate::application::services::AuthUser)
///    in request extensions for handlers
/// 4. Continue to next middleware/handler
///
/// # Errors
///
/// Returns `401 Unauthorized` with `{"message": "Unauthenticated.", "status": 401}` if:
/// - Authorization header is missing or not a Bearer credential
/// - Token is unknown or was revoked by logout
///
/// Adds `WWW-Authenticate: Bearer` header to 401 responses per RFC 6750.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::auth;
///
/// let protected = Router::new()
///     .route("/employees", get(employee_list_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            tracing::debug!(path = %parts.uri.path(), "Missing bearer token");
            AppError::unauthenticated(UNAUTHENTICATED)
        })?;

    let auth = st.token_service.validate(&token).await.inspect_err(|e| {
        tracing::debug!(error = %e, path = %parts.uri.path(), "Bearer token rejected");
    })?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(auth);

    Ok(next.run(req).await)
}
