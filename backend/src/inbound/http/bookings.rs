//! Public booking submission handler.
//!
//! ```text
//! POST /api/v1/bookings
//! ```
//!
//! Accepts the full booking form. Scheduling preferences and attachment
//! references are validated here but do not become part of the stored lead;
//! attachment storage is an external collaborator contract and only the
//! reference shape is checked.
//!
//! Only `name` and `mobile` are required server-side. The same endpoint
//! backs both the booking form and the minimal contact form, so the richer
//! fields the booking form marks as required are enforced by the client;
//! the server validates their shape whenever they are present.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::IntakeSubmission;
use crate::domain::{Error, ServiceType};
use crate::inbound::http::ApiResult;
use crate::inbound::http::leads::LeadBody;
use crate::inbound::http::state::HttpState;

const MAX_ATTACHMENTS: usize = 5;

/// Preferred visiting slot offered by the booking form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
    Flexible,
}

/// Reference to a file uploaded alongside the booking.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentBody {
    /// Client-side file name.
    pub file_name: String,
    /// Declared media type; only images and videos are accepted.
    pub content_type: String,
}

/// Request payload for a booking submission.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequestBody {
    pub name: String,
    pub mobile: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub pincode: Option<String>,
    pub service_type: Option<String>,
    pub description: Option<String>,
    #[schema(format = "date")]
    pub preferred_date: Option<String>,
    pub preferred_time_slot: Option<TimeSlot>,
    #[serde(default)]
    pub attachments: Vec<AttachmentBody>,
}

fn parse_service_type(raw: Option<&str>) -> Result<Option<ServiceType>, Error> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<ServiceType>()
        .map(Some)
        .map_err(|_| {
            Error::invalid_request("serviceType is not a recognised service").with_details(json!({
                "field": "serviceType",
                "value": trimmed,
                "code": "unknown_service_type",
            }))
        })
}

fn validate_preferred_date(raw: Option<&str>) -> Result<(), Error> {
    let Some(raw) = raw else {
        return Ok(());
    };
    chrono::NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| {
            Error::invalid_request("preferredDate must be a YYYY-MM-DD date").with_details(json!({
                "field": "preferredDate",
                "value": raw,
                "code": "invalid_date",
            }))
        })
}

fn validate_attachments(attachments: &[AttachmentBody]) -> Result<(), Error> {
    if attachments.len() > MAX_ATTACHMENTS {
        return Err(
            Error::invalid_request("at most 5 attachments are accepted").with_details(json!({
                "field": "attachments",
                "count": attachments.len(),
                "code": "too_many_attachments",
            })),
        );
    }
    for (index, attachment) in attachments.iter().enumerate() {
        let media = attachment.content_type.as_str();
        if !(media.starts_with("image/") || media.starts_with("video/")) {
            return Err(Error::invalid_request(
                "attachments must be images or videos",
            )
            .with_details(json!({
                "field": "attachments",
                "index": index,
                "value": media,
                "code": "unsupported_media_type",
            })));
        }
    }
    Ok(())
}

/// Submit a booking, creating a new lead.
#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tags = ["bookings"],
    request_body = BookingRequestBody,
    responses(
        (status = 201, description = "Lead created", body = LeadBody),
        (status = 400, description = "Missing or malformed fields", body = Error),
        (status = 503, description = "Lead store unavailable", body = Error)
    )
)]
#[post("/bookings")]
pub async fn submit_booking(
    state: web::Data<HttpState>,
    payload: web::Json<BookingRequestBody>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let service_type = parse_service_type(payload.service_type.as_deref())?;
    validate_preferred_date(payload.preferred_date.as_deref())?;
    validate_attachments(&payload.attachments)?;

    let submission = IntakeSubmission {
        name: payload.name,
        mobile: payload.mobile,
        email: payload.email,
        address: payload.address,
        city: payload.city,
        service_type,
        description: payload.description,
    };
    let lead = state.intake.submit(submission).await?;
    Ok(HttpResponse::Created().json(LeadBody::from_lead(&lead)))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn attachment(content_type: &str) -> AttachmentBody {
        AttachmentBody {
            file_name: "site.jpg".to_owned(),
            content_type: content_type.to_owned(),
        }
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some("  "), None)]
    #[case(Some("repair"), Some(ServiceType::Repair))]
    #[case(Some(" dvr-nvr "), Some(ServiceType::DvrNvr))]
    fn service_type_parsing_accepts_known_labels(
        #[case] raw: Option<&str>,
        #[case] expected: Option<ServiceType>,
    ) {
        assert_eq!(parse_service_type(raw).expect("valid"), expected);
    }

    #[test]
    fn unknown_service_labels_are_rejected_with_details() {
        let error = parse_service_type(Some("cctv")).expect_err("must fail");
        assert_eq!(error.details().expect("details")["value"], "cctv");
    }

    #[rstest]
    #[case("2026-09-01", true)]
    #[case("01/09/2026", false)]
    #[case("not a date", false)]
    fn preferred_date_must_be_iso(#[case] raw: &str, #[case] ok: bool) {
        assert_eq!(validate_preferred_date(Some(raw)).is_ok(), ok);
    }

    #[test]
    fn more_than_five_attachments_are_rejected() {
        let attachments = vec![attachment("image/jpeg"); 6];
        let error = validate_attachments(&attachments).expect_err("must fail");
        assert_eq!(error.details().expect("details")["count"], 6);
    }

    #[rstest]
    #[case("image/png", true)]
    #[case("video/mp4", true)]
    #[case("application/pdf", false)]
    fn attachments_must_be_images_or_videos(#[case] media: &str, #[case] ok: bool) {
        assert_eq!(validate_attachments(&[attachment(media)]).is_ok(), ok);
    }
}
