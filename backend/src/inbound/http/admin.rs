//! Administrator overview handlers.
//!
//! ```text
//! GET /api/v1/admin/stats
//! GET /api/v1/admin/users
//! ```
//!
//! The role check happens in the core; non-administrators receive `403`.

use actix_web::{get, web};

use crate::domain::{AdminStats, Error, UserProfile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Marketplace totals for the admin dashboard.
#[utoipa::path(
    get,
    path = "/api/v1/admin/stats",
    responses(
        (status = 200, description = "Marketplace statistics", body = AdminStats),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Administrator role required", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminStats",
    security(("SessionCookie" = []))
)]
#[get("/admin/stats")]
pub async fn admin_stats(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<AdminStats>> {
    let actor = session.require_user_id()?;
    let stats = state.admin.stats(&actor).await?;
    Ok(web::Json(stats))
}

/// Every profile, private ones included.
#[utoipa::path(
    get,
    path = "/api/v1/admin/users",
    responses(
        (status = 200, description = "All profiles", body = [UserProfile]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Administrator role required", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminListUsers",
    security(("SessionCookie" = []))
)]
#[get("/admin/users")]
pub async fn admin_list_users(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<UserProfile>>> {
    let actor = session.require_user_id()?;
    let users = state.admin.list_all_users(&actor).await?;
    Ok(web::Json(users))
}
