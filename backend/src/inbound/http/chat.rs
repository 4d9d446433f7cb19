//! Chat API handler.
//!
//! ```text
//! POST /api/v1/chat {"message":"How do I adopt a pet?"}
//! ```
//!
//! One free-text field in, one free-text reply out. No session or history
//! state is kept between calls.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request payload for `POST /api/v1/chat`. A missing message is treated
/// the same as an empty one.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: Option<String>,
}

/// Response payload carrying the canned or interpolated reply.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
}

/// Ask the rule-based FAQ responder.
#[utoipa::path(
    post,
    path = "/api/v1/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Reply", body = ChatResponse),
        (status = 500, description = "Internal server error", body = crate::domain::Error)
    ),
    tags = ["chat"],
    operation_id = "chat",
    security([])
)]
#[post("/chat")]
pub async fn chat(
    state: web::Data<HttpState>,
    payload: web::Json<ChatRequest>,
) -> ApiResult<web::Json<ChatResponse>> {
    let message = payload.into_inner().message.unwrap_or_default();
    let reply = state.chat.reply(&message).await?;
    Ok(web::Json(ChatResponse { reply }))
}
