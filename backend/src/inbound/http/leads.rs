//! Staff-facing lead handlers.
//!
//! ```text
//! GET    /api/v1/leads
//! PATCH  /api/v1/leads/{id}
//! DELETE /api/v1/leads/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::LeadStoreError;
use crate::domain::{Error, Lead, LeadId, LeadPatch, LeadStatus, StatusFilter};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// One lead as served to staff clients.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub name: String,
    pub mobile: String,
    pub email: Option<String>,
    pub location: Option<String>,
    pub service_type: Option<String>,
    pub message: Option<String>,
    pub status: String,
    pub admin_notes: Option<String>,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "date-time")]
    pub updated_at: String,
}

impl LeadBody {
    /// Serialise a domain lead for the wire.
    pub fn from_lead(lead: &Lead) -> Self {
        Self {
            id: lead.id.to_string(),
            name: lead.name.clone(),
            mobile: lead.mobile.clone(),
            email: lead.email.clone(),
            location: lead.location.clone(),
            service_type: lead.service_type.map(|kind| kind.as_str().to_owned()),
            message: lead.message.clone(),
            status: lead.status.as_str().to_owned(),
            admin_notes: lead.admin_notes.clone(),
            created_at: lead.created_at.to_rfc3339(),
            updated_at: lead.updated_at.to_rfc3339(),
        }
    }
}

/// Query parameters accepted by the lead listing.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListLeadsQuery {
    /// Exact status label, or `all` (the default).
    pub status: Option<String>,
    /// Case-insensitive substring matched against name or mobile.
    pub search: Option<String>,
}

/// Partial update payload for a lead.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeadBody {
    /// New status label, when changing it.
    pub status: Option<String>,
    /// New staff notes; a blank value clears them.
    pub admin_notes: Option<String>,
}

fn parse_status_filter(raw: Option<&str>) -> Result<StatusFilter, Error> {
    let Some(raw) = raw else {
        return Ok(StatusFilter::All);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "all" {
        return Ok(StatusFilter::All);
    }
    trimmed
        .parse::<LeadStatus>()
        .map(StatusFilter::Only)
        .map_err(|_| {
            Error::invalid_request("status must be all, New, In Progress, or Closed").with_details(
                json!({
                    "field": "status",
                    "value": trimmed,
                    "code": "unknown_status",
                }),
            )
        })
}

fn parse_lead_id(raw: &str) -> Result<LeadId, Error> {
    raw.parse::<LeadId>().map_err(|_| {
        Error::invalid_request("id must be a UUID").with_details(json!({
            "field": "id",
            "value": raw,
            "code": "invalid_uuid",
        }))
    })
}

fn map_store_error(error: &LeadStoreError) -> Error {
    match error {
        LeadStoreError::NotFound { .. } => Error::not_found("Lead not found"),
        LeadStoreError::Connection { .. } => Error::service_unavailable("Lead store unavailable"),
        LeadStoreError::Query { message } => Error::internal(message.clone()),
    }
}

/// List leads, newest first, optionally filtered.
#[utoipa::path(
    get,
    path = "/api/v1/leads",
    tags = ["leads"],
    params(ListLeadsQuery),
    responses(
        (status = 200, description = "Matching leads", body = [LeadBody]),
        (status = 400, description = "Unknown status label", body = Error),
        (status = 503, description = "Lead store unavailable", body = Error)
    )
)]
#[get("/leads")]
pub async fn list_leads(
    state: web::Data<HttpState>,
    query: web::Query<ListLeadsQuery>,
) -> ApiResult<HttpResponse> {
    let filter = crate::domain::LeadFilter {
        status: parse_status_filter(query.status.as_deref())?,
        search: query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_owned),
    };
    let leads = state.leads.list(&filter).await.map_err(|err| {
        error!(error = %err, "lead listing failed");
        map_store_error(&err)
    })?;
    let bodies: Vec<LeadBody> = leads.iter().map(LeadBody::from_lead).collect();
    Ok(HttpResponse::Ok().json(bodies))
}

/// Update a lead's status and staff notes.
#[utoipa::path(
    patch,
    path = "/api/v1/leads/{id}",
    tags = ["leads"],
    params(("id" = uuid::Uuid, Path, description = "Lead identifier")),
    request_body = UpdateLeadBody,
    responses(
        (status = 200, description = "Updated lead", body = LeadBody),
        (status = 400, description = "Empty patch or malformed fields", body = Error),
        (status = 404, description = "Lead not found", body = Error),
        (status = 503, description = "Lead store unavailable", body = Error)
    )
)]
#[patch("/leads/{id}")]
pub async fn update_lead(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateLeadBody>,
) -> ApiResult<HttpResponse> {
    let id = parse_lead_id(&path.into_inner())?;
    let payload = payload.into_inner();
    let status = payload
        .status
        .as_deref()
        .map(|raw| {
            raw.parse::<LeadStatus>().map_err(|_| {
                Error::invalid_request("status must be New, In Progress, or Closed").with_details(
                    json!({
                        "field": "status",
                        "value": raw,
                        "code": "unknown_status",
                    }),
                )
            })
        })
        .transpose()?;

    let patch = LeadPatch {
        status,
        admin_notes: payload.admin_notes,
    };
    if patch.is_empty() {
        return Err(Error::invalid_request(
            "patch must supply status or adminNotes",
        ));
    }

    let updated = state.leads.update(&id, &patch).await.map_err(|err| {
        error!(lead_id = %id, error = %err, "lead update failed");
        map_store_error(&err)
    })?;
    Ok(HttpResponse::Ok().json(LeadBody::from_lead(&updated)))
}

/// Delete a lead. Deleting an already-removed lead still succeeds.
#[utoipa::path(
    delete,
    path = "/api/v1/leads/{id}",
    tags = ["leads"],
    params(("id" = uuid::Uuid, Path, description = "Lead identifier")),
    responses(
        (status = 204, description = "Lead removed (or already absent)"),
        (status = 400, description = "Malformed identifier", body = Error),
        (status = 503, description = "Lead store unavailable", body = Error)
    )
)]
#[delete("/leads/{id}")]
pub async fn delete_lead(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_lead_id(&path.into_inner())?;
    state.leads.delete(&id).await.map_err(|err| {
        error!(lead_id = %id, error = %err, "lead deletion failed");
        map_store_error(&err)
    })?;
    Ok(HttpResponse::NoContent().finish())
}
