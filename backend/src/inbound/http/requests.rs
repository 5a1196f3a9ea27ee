//! Swap request handlers.
//!
//! ```text
//! GET  /api/v1/requests
//! POST /api/v1/requests {"toUserId":"…","offeredSkill":"Guitar","wantedSkill":"Spanish"}
//! POST /api/v1/requests/{id}/status {"status":"accepted"}
//! POST /api/v1/requests/{id}/feedback {"rating":5,"comment":"Great teacher"}
//! ```
//!
//! The signed-in member is always the acting user. Every successful create
//! or transition is announced through the swap event publisher; a failed
//! announcement is logged and the ledger change stands.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::ports::{CreateSwapRequest, SubmitFeedback, SwapEvent};
use crate::domain::{Error, Feedback, FeedbackScore, SwapRequest, SwapStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_field_error, parse_request_id, parse_user_id,
};

const REQUEST_ID: FieldName = FieldName::new("id");
const STATUS: FieldName = FieldName::new("status");
const RATING: FieldName = FieldName::new("rating");

/// Request body for `POST /api/v1/requests`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestBody {
    pub to_user_id: String,
    pub offered_skill: String,
    pub wanted_skill: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Request body for `POST /api/v1/requests/{id}/status`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct TransitionBody {
    /// One of `accepted`, `rejected` or `completed`.
    pub status: String,
}

/// Request body for `POST /api/v1/requests/{id}/feedback`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct FeedbackBody {
    #[schema(minimum = 1, maximum = 5)]
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
}

fn parse_status(raw: &str) -> Result<SwapStatus, Error> {
    let wanted = raw.trim();
    [
        SwapStatus::Pending,
        SwapStatus::Accepted,
        SwapStatus::Rejected,
        SwapStatus::Completed,
    ]
    .into_iter()
    .find(|status| status.as_str() == wanted)
    .ok_or_else(|| invalid_field_error(STATUS, format!("unknown status {wanted:?}")))
}

async fn announce(state: &HttpState, request: &SwapRequest) {
    let event = SwapEvent::from(request);
    if let Err(error) = state.events.publish(&event).await {
        warn!(
            %error,
            request_id = %event.request_id,
            status = %event.status,
            "swap event was not published"
        );
    }
}

/// Requests the signed-in member sent or received, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/requests",
    responses(
        (status = 200, description = "Requests involving the member", body = [SwapRequest]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["requests"],
    operation_id = "listRequests",
    security(("SessionCookie" = []))
)]
#[get("/requests")]
pub async fn list_requests(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<SwapRequest>>> {
    let user_id = session.require_user_id()?;
    let requests = state.ledger.list_for_user(&user_id).await?;
    Ok(web::Json(requests))
}

/// Open a pending swap request from the signed-in member.
#[utoipa::path(
    post,
    path = "/api/v1/requests",
    request_body = CreateRequestBody,
    responses(
        (status = 201, description = "Request opened", body = SwapRequest),
        (status = 400, description = "Invalid request or skill mismatch", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Unknown participant", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["requests"],
    operation_id = "createRequest",
    security(("SessionCookie" = []))
)]
#[post("/requests")]
pub async fn create_request(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateRequestBody>,
) -> ApiResult<HttpResponse> {
    let from_user_id = session.require_user_id()?;
    let body = payload.into_inner();
    let to_user_id = parse_user_id(&body.to_user_id, FieldName::new("toUserId"))?;
    let created = state
        .ledger
        .create(CreateSwapRequest {
            from_user_id,
            to_user_id,
            offered_skill: body.offered_skill,
            wanted_skill: body.wanted_skill,
            message: body.message,
        })
        .await?;
    announce(&state, &created).await;
    Ok(HttpResponse::Created().json(created))
}

/// Move a request along its lifecycle.
#[utoipa::path(
    post,
    path = "/api/v1/requests/{id}/status",
    params(("id" = String, Path, description = "Request id")),
    request_body = TransitionBody,
    responses(
        (status = 200, description = "Request updated", body = SwapRequest),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not permitted for this member", body = Error),
        (status = 404, description = "No such request", body = Error),
        (status = 409, description = "Invalid transition or lost race", body = Error)
    ),
    tags = ["requests"],
    operation_id = "transitionRequest",
    security(("SessionCookie" = []))
)]
#[post("/requests/{id}/status")]
pub async fn transition_request(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<TransitionBody>,
) -> ApiResult<web::Json<SwapRequest>> {
    let actor = session.require_user_id()?;
    let id = parse_request_id(&path.into_inner(), REQUEST_ID)?;
    let next = parse_status(&payload.status)?;
    let updated = state.ledger.transition(&id, next, &actor).await?;
    announce(&state, &updated).await;
    Ok(web::Json(updated))
}

/// Rate the other participant of a completed request.
#[utoipa::path(
    post,
    path = "/api/v1/requests/{id}/feedback",
    params(("id" = String, Path, description = "Request id")),
    request_body = FeedbackBody,
    responses(
        (status = 201, description = "Feedback recorded", body = Feedback),
        (status = 400, description = "Invalid rating or comment", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not a participant", body = Error),
        (status = 404, description = "No such request", body = Error),
        (status = 409, description = "Not completed or already rated", body = Error)
    ),
    tags = ["requests"],
    operation_id = "submitFeedback",
    security(("SessionCookie" = []))
)]
#[post("/requests/{id}/feedback")]
pub async fn submit_feedback(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<FeedbackBody>,
) -> ApiResult<HttpResponse> {
    let author = session.require_user_id()?;
    let request_id = parse_request_id(&path.into_inner(), REQUEST_ID)?;
    let body = payload.into_inner();
    let score = FeedbackScore::new(body.rating).map_err(|err| invalid_field_error(RATING, err))?;
    let feedback = state
        .feedback
        .submit(SubmitFeedback {
            author,
            request_id,
            score,
            comment: body.comment,
        })
        .await?;
    Ok(HttpResponse::Created().json(feedback))
}

#[cfg(test)]
#[path = "requests_tests.rs"]
mod tests;
