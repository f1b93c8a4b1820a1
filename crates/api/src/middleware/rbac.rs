//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role is not
//! in the admitted set with 403, so authorization is enforced by the
//! handler signature.
//!
//! ```ignore
//! async fn create_bill(RequireCashier(user): RequireCashier) -> AppResult<Json<()>> {
//!     Ok(Json(()))
//! }
//! ```

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use workshop_core::error::CoreError;
use workshop_core::roles::Role;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Reject `user` unless its role is one of `allowed`.
fn require_role(user: AuthUser, allowed: &[Role]) -> Result<AuthUser, AppError> {
    if allowed.contains(&user.role) {
        Ok(user)
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "Access denied for your role".into(),
        )))
    }
}

macro_rules! role_extractor {
    ($(#[$meta:meta])* $name:ident => [$($role:expr),+ $(,)?]) => {
        $(#[$meta])*
        pub struct $name(pub AuthUser);

        impl FromRequestParts<AppState> for $name {
            type Rejection = AppError;

            async fn from_request_parts(
                parts: &mut Parts,
                state: &AppState,
            ) -> Result<Self, Self::Rejection> {
                let user = AuthUser::from_request_parts(parts, state).await?;
                require_role(user, &[$($role),+]).map($name)
            }
        }
    };
}

role_extractor!(
    /// Service advisors open job cards.
    RequireAdvisor => [Role::Advisor]
);
role_extractor!(RequireTechnician => [Role::Technician]);
role_extractor!(RequireCashier => [Role::Cashier]);
role_extractor!(RequireManager => [Role::Manager]);
role_extractor!(
    /// Job card listing is shared by managers and advisors.
    RequireManagerOrAdvisor => [Role::Manager, Role::Advisor]
);
role_extractor!(RequireManagerOrCashier => [Role::Manager, Role::Cashier]);
role_extractor!(
    /// Status updates; the handler further restricts technicians to their
    /// own assignments.
    RequireTechnicianOrManager => [Role::Technician, Role::Manager]
);
