//! Header-based admin extractor for read-only admin endpoints.
//!
//! Mutating admin actions carry `admin_password` in their JSON body and
//! check it in the handler; GET requests have no body, so they use this
//! extractor instead.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the shared admin secret.
pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

/// Requires a valid `X-Admin-Password` header. Rejects with 401 otherwise.
///
/// ```ignore
/// async fn admin_only(_admin: RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin;

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let provided = parts
            .headers
            .get(ADMIN_PASSWORD_HEADER)
            .and_then(|v| v.to_str().ok());
        state.admin.verify(provided)?;
        Ok(RequireAdmin)
    }
}
