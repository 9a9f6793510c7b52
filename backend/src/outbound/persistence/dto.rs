//! Wire representations for the hosted lead store's row API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Lead, LeadId, LeadPatch, LeadStatus, NewLead, ServiceType};

/// One lead row as returned by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct LeadRow {
    pub id: Uuid,
    pub name: String,
    pub mobile: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    pub status: String,
    #[serde(default)]
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LeadRow {
    /// Convert into the domain record, rejecting unknown enum labels.
    pub fn into_domain(self) -> Result<Lead, String> {
        let status = self
            .status
            .parse::<LeadStatus>()
            .map_err(|err| err.to_string())?;
        let service_type = self
            .service_type
            .as_deref()
            .map(str::parse::<ServiceType>)
            .transpose()
            .map_err(|err| err.to_string())?;
        Ok(Lead {
            id: LeadId::new(self.id),
            name: self.name,
            mobile: self.mobile,
            email: self.email,
            location: self.location,
            service_type,
            message: self.message,
            status,
            admin_notes: self.admin_notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Insert payload; the status column is always written as `New`.
#[derive(Debug, Serialize)]
pub struct CreateLeadRow<'a> {
    pub name: &'a str,
    pub mobile: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'a str>,
    pub status: &'static str,
}

impl<'a> CreateLeadRow<'a> {
    /// Build the insert payload from validated input.
    pub fn from_input(input: &'a NewLead) -> Self {
        Self {
            name: input.name(),
            mobile: input.mobile(),
            email: input.email(),
            location: input.location(),
            service_type: input.service_type().map(ServiceType::as_str),
            message: input.message(),
            status: LeadStatus::New.as_str(),
        }
    }
}

/// Patch payload; only the supplied columns are written, plus a fresh
/// `updated_at`.
#[derive(Debug, Serialize)]
pub struct LeadPatchRow<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    /// Absent: column untouched. `Some(None)`: column cleared to null.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<Option<&'a str>>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> LeadPatchRow<'a> {
    /// Build the patch payload, stamping the mutation time. Blank notes
    /// clear the column.
    pub fn from_patch(patch: &'a LeadPatch, updated_at: DateTime<Utc>) -> Self {
        let admin_notes = patch.admin_notes.as_deref().map(|notes| {
            if notes.trim().is_empty() {
                None
            } else {
                Some(notes)
            }
        });
        Self {
            status: patch.status.map(LeadStatus::as_str),
            admin_notes,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn row() -> LeadRow {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).single().expect("timestamp");
        LeadRow {
            id: Uuid::new_v4(),
            name: "Asha Rao".to_owned(),
            mobile: "9000000000".to_owned(),
            email: None,
            location: Some("12 Park St, Pune".to_owned()),
            service_type: Some("repair".to_owned()),
            message: None,
            status: "New".to_owned(),
            admin_notes: None,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn row_decodes_into_the_domain_record() {
        let lead = row().into_domain().expect("valid row");
        assert_eq!(lead.status, LeadStatus::New);
        assert_eq!(lead.service_type, Some(ServiceType::Repair));
        assert_eq!(lead.location.as_deref(), Some("12 Park St, Pune"));
    }

    #[test]
    fn unknown_status_labels_are_rejected() {
        let mut bad = row();
        bad.status = "Archived".to_owned();
        let error = bad.into_domain().expect_err("decode must fail");
        assert!(error.contains("Archived"));
    }

    #[test]
    fn insert_payload_always_carries_status_new() {
        let input = NewLead::new("Asha Rao", "9000000000").expect("valid input");
        let payload = serde_json::to_value(CreateLeadRow::from_input(&input)).expect("serialise");
        assert_eq!(payload["status"], "New");
        assert!(payload.get("email").is_none(), "absent fields are omitted");
    }

    #[test]
    fn patch_payload_serialises_only_supplied_columns() {
        let patch = LeadPatch {
            status: Some(LeadStatus::Closed),
            admin_notes: None,
        };
        let at = Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).single().expect("timestamp");
        let payload = serde_json::to_value(LeadPatchRow::from_patch(&patch, at)).expect("serialise");
        assert_eq!(payload["status"], "Closed");
        assert!(payload.get("admin_notes").is_none());
        assert!(payload.get("updated_at").is_some());
    }

    #[test]
    fn blank_notes_clear_the_column() {
        let patch = LeadPatch {
            status: None,
            admin_notes: Some("  ".to_owned()),
        };
        let at = Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).single().expect("timestamp");
        let payload = serde_json::to_value(LeadPatchRow::from_patch(&patch, at)).expect("serialise");
        assert_eq!(payload["admin_notes"], serde_json::Value::Null);
        assert!(payload.get("status").is_none());
    }
}
