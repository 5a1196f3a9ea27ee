//! Directory handlers: listing, lookup, and editing one's own profile.
//!
//! ```text
//! GET /api/v1/users?search=design&skill=python&availability=Weekends&limit=10
//! GET /api/v1/users/me
//! PUT /api/v1/users/me
//! GET /api/v1/users/{id}
//! GET /api/v1/users/{id}/feedback
//! ```
//!
//! `/users/me` must be registered before `/users/{id}`.

use actix_web::{get, put, web};
use pagination::{Cursor, PageLimit, PageRequest, PaginationError, paginate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::ProfileUpdate;
use crate::domain::{
    AvailabilitySlot, DirectoryQuery, DisplayName, Error, Feedback, ProfileDetails, UserProfile,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_field_error, parse_availability, parse_skills, parse_user_id,
};

const CURSOR: FieldName = FieldName::new("cursor");
const LIMIT: FieldName = FieldName::new("limit");
const AVAILABILITY: FieldName = FieldName::new("availability");
const USER_ID: FieldName = FieldName::new("id");

/// Query parameters for `GET /api/v1/users`.
#[derive(Debug, Default, Deserialize)]
pub struct ListUsersQuery {
    /// Case-insensitive match on name, offered skills or wanted skills.
    pub search: Option<String>,
    /// Case-insensitive substring of an offered skill.
    pub skill: Option<String>,
    /// Exact availability label, e.g. `Weekends`.
    pub availability: Option<String>,
    /// Opaque token from a previous page's `nextCursor`.
    pub cursor: Option<String>,
    /// Page size between 1 and 100; defaults to 20.
    pub limit: Option<usize>,
}

/// One page of directory results.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPage {
    pub items: Vec<UserProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// Replacement values for the owner-editable profile fields.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateBody {
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub skills_offered: Vec<String>,
    #[serde(default)]
    pub skills_wanted: Vec<String>,
    #[serde(default)]
    pub availability: Vec<String>,
    pub is_public: bool,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
}

impl TryFrom<ProfileUpdateBody> for ProfileUpdate {
    type Error = Error;

    fn try_from(body: ProfileUpdateBody) -> Result<Self, Self::Error> {
        Ok(Self {
            name: DisplayName::new(body.name)
                .map_err(|err| invalid_field_error(FieldName::new("name"), err))?,
            avatar: body.avatar,
            skills_offered: parse_skills(body.skills_offered, FieldName::new("skillsOffered"))?,
            skills_wanted: parse_skills(body.skills_wanted, FieldName::new("skillsWanted"))?,
            availability: parse_availability(body.availability, AVAILABILITY)?,
            is_public: body.is_public,
            details: ProfileDetails {
                location: body.location,
                bio: body.bio,
                phone: body.phone,
                website: body.website,
                experience: body.experience,
            },
        })
    }
}

fn map_pagination_error(err: PaginationError) -> Error {
    let field = match err {
        PaginationError::LimitOutOfRange { .. } => LIMIT,
        PaginationError::MalformedCursor => CURSOR,
    };
    invalid_field_error(field, err)
}

fn page_request(query: &ListUsersQuery) -> Result<PageRequest, Error> {
    let cursor = query
        .cursor
        .as_deref()
        .map(Cursor::decode)
        .transpose()
        .map_err(map_pagination_error)?;
    let limit = match query.limit {
        Some(limit) => PageLimit::new(limit).map_err(map_pagination_error)?,
        None => PageLimit::default(),
    };
    Ok(PageRequest::new(cursor, limit))
}

fn directory_query(query: ListUsersQuery) -> Result<DirectoryQuery, Error> {
    let availability = query
        .availability
        .as_deref()
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(|label| {
            label
                .parse::<AvailabilitySlot>()
                .map_err(|err| invalid_field_error(AVAILABILITY, err))
        })
        .transpose()?;
    Ok(DirectoryQuery::new(query.search, query.skill, availability))
}

/// List public profiles, filtered and paginated. No session needed.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(
        ("search" = Option<String>, Query, description = "Matches name, offered or wanted skills"),
        ("skill" = Option<String>, Query, description = "Substring of an offered skill"),
        ("availability" = Option<String>, Query, description = "Exact availability label"),
        ("cursor" = Option<String>, Query, description = "Token from a previous page"),
        ("limit" = Option<usize>, Query, description = "Page size, default 20, max 100")
    ),
    responses(
        (status = 200, description = "Matching public profiles", body = UserPage),
        (status = 400, description = "Invalid filter or cursor", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers",
    security((), ("SessionCookie" = []))
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    query: web::Query<ListUsersQuery>,
) -> ApiResult<web::Json<UserPage>> {
    let query = query.into_inner();
    let page_request = page_request(&query)?;
    let directory_query = directory_query(query)?;
    let profiles = state.directory.list(&directory_query).await?;
    let page = paginate(profiles, &page_request, |profile| profile.id.to_string());
    Ok(web::Json(UserPage {
        items: page.items,
        next_cursor: page.next_cursor,
    }))
}

/// The signed-in member's own profile.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Own profile", body = UserProfile),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Profile no longer exists", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentUser",
    security(("SessionCookie" = []))
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserProfile>> {
    let user_id = session.require_user_id()?;
    let profile = state.directory.get_by_id(&user_id).await?;
    Ok(web::Json(profile))
}

/// Replace the signed-in member's editable profile fields.
#[utoipa::path(
    put,
    path = "/api/v1/users/me",
    request_body = ProfileUpdateBody,
    responses(
        (status = 200, description = "Updated profile", body = UserProfile),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Profile no longer exists", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateCurrentUser",
    security(("SessionCookie" = []))
)]
#[put("/users/me")]
pub async fn update_current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileUpdateBody>,
) -> ApiResult<web::Json<UserProfile>> {
    let user_id = session.require_user_id()?;
    let update = ProfileUpdate::try_from(payload.into_inner())?;
    let profile = state.directory.update_profile(&user_id, update).await?;
    Ok(web::Json(profile))
}

/// Look a member up by id; private profiles are included. No session needed.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Profile", body = UserProfile),
        (status = 400, description = "Malformed id", body = Error),
        (status = 404, description = "No such user", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser",
    security((), ("SessionCookie" = []))
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserProfile>> {
    let id = parse_user_id(&path.into_inner(), USER_ID)?;
    let profile = state.directory.get_by_id(&id).await?;
    Ok(web::Json(profile))
}

/// Feedback a member has received, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/feedback",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Feedback received", body = [Feedback]),
        (status = 400, description = "Malformed id", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUserFeedback",
    security(("SessionCookie" = []))
)]
#[get("/users/{id}/feedback")]
pub async fn list_user_feedback(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Feedback>>> {
    session.require_user_id()?;
    let id = parse_user_id(&path.into_inner(), USER_ID)?;
    let feedback = state.feedback.list_for_user(&id).await?;
    Ok(web::Json(feedback))
}

#[cfg(test)]
mod tests;
