//! Notification function endpoint.
//!
//! ```text
//! OPTIONS /functions/notify-new-lead
//! POST    /functions/notify-new-lead
//! ```
//!
//! Mirrors the wire contract of a standalone dispatcher function: a
//! `{ "leadId": ... }` request, a `{ "success": true, "message": ... }`
//! success envelope, a `{ "error": ... }` failure envelope, and permissive
//! cross-origin handling on every response. The envelope is deliberately
//! independent of the rest of the API's error body.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, HttpResponseBuilder, post, route, web};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::domain::{ErrorCode, LeadId};
use crate::inbound::http::state::HttpState;

/// Alias so utoipa's actix argument inference does not treat the raw byte
/// body as a schema-bearing request body; the endpoint documents no schema.
type RawBody = web::Bytes;

const CORS_HEADERS: [(&str, &str); 2] = [
    ("Access-Control-Allow-Origin", "*"),
    (
        "Access-Control-Allow-Headers",
        "authorization, x-client-info, apikey, content-type",
    ),
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NotifyRequestBody {
    lead_id: Option<String>,
}

fn with_cors(status: StatusCode) -> HttpResponseBuilder {
    let mut builder = HttpResponse::build(status);
    for (name, value) in CORS_HEADERS {
        builder.insert_header((name, value));
    }
    builder
}

fn failure(status: StatusCode, message: &str) -> HttpResponse {
    with_cors(status).json(json!({ "error": message }))
}

/// Answer cross-origin preflight requests permissively.
#[route("/notify-new-lead", method = "OPTIONS")]
pub async fn notify_preflight() -> HttpResponse {
    with_cors(StatusCode::OK).body("ok")
}

/// Dispatch a staff notification for a freshly created lead.
#[utoipa::path(
    post,
    path = "/functions/notify-new-lead",
    tags = ["notifications"],
    responses(
        (status = 200, description = "Notification handled; message reports sent or skipped"),
        (status = 400, description = "Missing or malformed leadId"),
        (status = 404, description = "Lead not found"),
        (status = 500, description = "Email delivery failed")
    )
)]
#[post("/notify-new-lead")]
pub async fn notify_new_lead(state: web::Data<HttpState>, body: RawBody) -> HttpResponse {
    let Ok(payload) = serde_json::from_slice::<NotifyRequestBody>(&body) else {
        return failure(StatusCode::BAD_REQUEST, "Invalid request body");
    };
    let Some(raw_id) = payload.lead_id.filter(|id| !id.trim().is_empty()) else {
        return failure(StatusCode::BAD_REQUEST, "Missing leadId");
    };
    let Ok(lead_id) = raw_id.parse::<LeadId>() else {
        return failure(StatusCode::BAD_REQUEST, "Invalid leadId");
    };

    match state.notifier.notify_new_lead(lead_id).await {
        Ok(outcome) => with_cors(StatusCode::OK).json(json!({
            "success": true,
            "message": outcome.message(),
        })),
        Err(error) => {
            warn!(lead_id = %lead_id, error = %error, "notification dispatch failed");
            let status = match error.code() {
                ErrorCode::NotFound => StatusCode::NOT_FOUND,
                ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            failure(status, error.message())
        }
    }
}
