//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the specification for the REST surface: bookings,
//! lead management, the notification function, and health probes. Swagger
//! UI serves it in debug builds.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::bookings::{AttachmentBody, BookingRequestBody, TimeSlot};
use crate::inbound::http::leads::{LeadBody, UpdateLeadBody};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lead portal API",
        description = "Lead intake, staff management, and notification dispatch."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::bookings::submit_booking,
        crate::inbound::http::leads::list_leads,
        crate::inbound::http::leads::update_lead,
        crate::inbound::http::leads::delete_lead,
        crate::inbound::http::notify::notify_new_lead,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        BookingRequestBody,
        AttachmentBody,
        TimeSlot,
        LeadBody,
        UpdateLeadBody,
        Error,
        ErrorCode
    )),
    tags(
        (name = "bookings", description = "Public booking submissions"),
        (name = "leads", description = "Staff-facing lead management"),
        (name = "notifications", description = "Lead notification dispatch"),
        (name = "health", description = "Health probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_schema_exposes_code_and_message() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn lead_schema_exposes_the_row_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let lead_schema = schemas.get("LeadBody").expect("LeadBody schema");

        for field in ["id", "name", "mobile", "status", "createdAt", "updatedAt"] {
            assert_object_schema_has_field(lead_schema, field);
        }
    }

    #[test]
    fn every_endpoint_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/bookings",
            "/api/v1/leads",
            "/api/v1/leads/{id}",
            "/functions/notify-new-lead",
            "/health/ready",
            "/health/live",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "missing documented path {path}"
            );
        }
    }
}
