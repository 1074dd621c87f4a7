//! Role checks layered on top of [`AuthUser`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use conplan_core::error::CoreError;
use conplan_core::roles::is_staff;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Extractor that admits only staff and admin callers.
///
/// Handlers taking `RequireStaff(user)` never see a non-staff request;
/// everyone else gets a 403 with the fixed access-control message.
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !is_staff(&user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Only staff have access to this function".into(),
            )));
        }
        Ok(RequireStaff(user))
    }
}
