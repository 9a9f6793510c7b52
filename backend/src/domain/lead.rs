//! Lead aggregate and supporting value types.
//!
//! A lead is one inbound customer enquiry captured from the public booking
//! or contact form. Invariants enforced here:
//!
//! - `name` and `mobile` are never empty once trimmed; validation happens
//!   before anything reaches a store adapter.
//! - Status transitions are unconstrained; any status may follow any other.
//! - `created_at` is immutable and `updated_at` never precedes it (store
//!   adapters enforce the timestamp ordering on mutation).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique, immutable identifier of a lead record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadId(Uuid);

impl LeadId {
    /// Wrap an existing identifier.
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Borrow the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for LeadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for LeadId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Lifecycle label on a lead. Transitions are unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadStatus {
    /// Freshly created, not yet looked at by staff.
    New,
    /// Staff are working the enquiry.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Enquiry resolved or abandoned.
    Closed,
}

impl LeadStatus {
    /// Wire representation of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::InProgress => "In Progress",
            Self::Closed => "Closed",
        }
    }
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when parsing an unknown status label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown lead status: {value}")]
pub struct LeadStatusParseError {
    /// The rejected input.
    pub value: String,
}

impl std::str::FromStr for LeadStatus {
    type Err = LeadStatusParseError;

    /// Matches the exact wire labels; the comparison is case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "New" => Ok(Self::New),
            "In Progress" => Ok(Self::InProgress),
            "Closed" => Ok(Self::Closed),
            other => Err(LeadStatusParseError {
                value: other.to_owned(),
            }),
        }
    }
}

/// Fixed enumeration of services a lead can ask about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceType {
    /// New camera installation.
    Installation,
    /// Repair of an existing setup.
    Repair,
    /// Scheduled maintenance visit.
    Maintenance,
    /// Annual maintenance contract.
    Amc,
    /// DVR/NVR configuration or replacement.
    DvrNvr,
    /// Upgrade of an existing system.
    Upgrade,
    /// Anything else.
    Other,
}

impl ServiceType {
    /// Wire representation of the service type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Installation => "installation",
            Self::Repair => "repair",
            Self::Maintenance => "maintenance",
            Self::Amc => "amc",
            Self::DvrNvr => "dvr-nvr",
            Self::Upgrade => "upgrade",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when parsing an unknown service type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown service type: {value}")]
pub struct ServiceTypeParseError {
    /// The rejected input.
    pub value: String,
}

impl std::str::FromStr for ServiceType {
    type Err = ServiceTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "installation" => Ok(Self::Installation),
            "repair" => Ok(Self::Repair),
            "maintenance" => Ok(Self::Maintenance),
            "amc" => Ok(Self::Amc),
            "dvr-nvr" => Ok(Self::DvrNvr),
            "upgrade" => Ok(Self::Upgrade),
            "other" => Ok(Self::Other),
            other => Err(ServiceTypeParseError {
                value: other.to_owned(),
            }),
        }
    }
}

/// One inbound customer enquiry as stored by the lead store.
#[derive(Debug, Clone, PartialEq)]
pub struct Lead {
    /// Unique identifier assigned at creation.
    pub id: LeadId,
    /// Contact name; never empty once stored.
    pub name: String,
    /// Contact mobile number; never empty once stored.
    pub mobile: String,
    /// Optional contact email.
    pub email: Option<String>,
    /// Optional free-text location (usually "address, city").
    pub location: Option<String>,
    /// Optional requested service.
    pub service_type: Option<ServiceType>,
    /// Optional free-text message from the customer.
    pub message: Option<String>,
    /// Lifecycle label; defaults to [`LeadStatus::New`] at creation.
    pub status: LeadStatus,
    /// Internal staff notes; only the management workflow writes these.
    pub admin_notes: Option<String>,
    /// Creation timestamp; immutable.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation; never precedes `created_at`.
    pub updated_at: DateTime<Utc>,
}

/// Validation failures raised while building a [`NewLead`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LeadValidationError {
    /// Name was missing or blank after trimming.
    #[error("name must not be empty")]
    MissingName,
    /// Mobile was missing or blank after trimming.
    #[error("mobile must not be empty")]
    MissingMobile,
}

/// Validated input for creating a lead.
///
/// Construction trims `name` and `mobile` and rejects blank values, so a
/// `NewLead` always satisfies the store invariants. Optional fields are
/// normalised: blank strings become absent.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLead {
    name: String,
    mobile: String,
    email: Option<String>,
    location: Option<String>,
    service_type: Option<ServiceType>,
    message: Option<String>,
}

impl NewLead {
    /// Build a creation input from the two required fields.
    pub fn new(name: &str, mobile: &str) -> Result<Self, LeadValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LeadValidationError::MissingName);
        }
        let mobile = mobile.trim();
        if mobile.is_empty() {
            return Err(LeadValidationError::MissingMobile);
        }
        Ok(Self {
            name: name.to_owned(),
            mobile: mobile.to_owned(),
            email: None,
            location: None,
            service_type: None,
            message: None,
        })
    }

    /// Attach an optional email; blank values are dropped.
    pub fn with_email(mut self, email: Option<&str>) -> Self {
        self.email = email.and_then(non_blank);
        self
    }

    /// Attach an optional location; blank values are dropped.
    pub fn with_location(mut self, location: Option<&str>) -> Self {
        self.location = location.and_then(non_blank);
        self
    }

    /// Attach an optional service type.
    pub fn with_service_type(mut self, service_type: Option<ServiceType>) -> Self {
        self.service_type = service_type;
        self
    }

    /// Attach an optional message; blank values are dropped.
    pub fn with_message(mut self, message: Option<&str>) -> Self {
        self.message = message.and_then(non_blank);
        self
    }

    /// Trimmed contact name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Trimmed contact mobile.
    pub fn mobile(&self) -> &str {
        &self.mobile
    }

    /// Optional contact email.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Optional location.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Optional requested service.
    pub fn service_type(&self) -> Option<ServiceType> {
        self.service_type
    }

    /// Optional customer message.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Partial update applied by the management workflow.
///
/// Only `status` and `admin_notes` are ever mutable; absent fields are left
/// untouched by store adapters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadPatch {
    /// New status, when supplied.
    pub status: Option<LeadStatus>,
    /// New staff notes, when supplied. A blank value clears the notes.
    pub admin_notes: Option<String>,
}

impl LeadPatch {
    /// True when the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.admin_notes.is_none()
    }
}

/// Status constraint applied when listing leads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// Sentinel meaning "no status filtering".
    #[default]
    All,
    /// Exact, case-sensitive status match.
    Only(LeadStatus),
}

/// Filter parameters accepted by the lead store's list operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadFilter {
    /// Status constraint; defaults to the "all" sentinel.
    pub status: StatusFilter,
    /// Case-insensitive substring matched against name OR mobile.
    pub search: Option<String>,
}

impl LeadFilter {
    /// Decide whether a lead satisfies this filter.
    pub fn matches(&self, lead: &Lead) -> bool {
        if let StatusFilter::Only(status) = self.status {
            if lead.status != status {
                return false;
            }
        }
        match &self.search {
            None => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                lead.name.to_lowercase().contains(&needle)
                    || lead.mobile.to_lowercase().contains(&needle)
            }
        }
    }

    /// Stable cache key for this filter.
    ///
    /// The search term is lowercased so that filters differing only in case
    /// share one cache entry, matching the case-insensitive match rule.
    pub fn cache_key(&self) -> String {
        let status = match self.status {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.as_str(),
        };
        let search = self
            .search
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_default();
        format!("status={status}&search={search}")
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn sample_lead(name: &str, mobile: &str, status: LeadStatus) -> Lead {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).single().expect("timestamp");
        Lead {
            id: LeadId::random(),
            name: name.to_owned(),
            mobile: mobile.to_owned(),
            email: None,
            location: None,
            service_type: None,
            message: None,
            status,
            admin_notes: None,
            created_at: at,
            updated_at: at,
        }
    }

    #[rstest]
    #[case("", "9000000000", LeadValidationError::MissingName)]
    #[case("   ", "9000000000", LeadValidationError::MissingName)]
    #[case("Asha Rao", "", LeadValidationError::MissingMobile)]
    #[case("Asha Rao", "  \t", LeadValidationError::MissingMobile)]
    fn new_lead_rejects_blank_required_fields(
        #[case] name: &str,
        #[case] mobile: &str,
        #[case] expected: LeadValidationError,
    ) {
        let error = NewLead::new(name, mobile).expect_err("validation must fail");
        assert_eq!(error, expected);
    }

    #[test]
    fn new_lead_trims_required_and_drops_blank_optionals() {
        let input = NewLead::new("  Asha Rao ", " 9000000000 ")
            .expect("valid input")
            .with_email(Some("  "))
            .with_message(Some("Camera offline"));

        assert_eq!(input.name(), "Asha Rao");
        assert_eq!(input.mobile(), "9000000000");
        assert_eq!(input.email(), None);
        assert_eq!(input.message(), Some("Camera offline"));
    }

    #[test]
    fn search_matches_name_case_insensitively() {
        let filter = LeadFilter {
            status: StatusFilter::All,
            search: Some("raj".to_owned()),
        };
        assert!(filter.matches(&sample_lead("Rajesh Kumar", "9000000001", LeadStatus::New)));
        assert!(!filter.matches(&sample_lead("Asha Rao", "9000000002", LeadStatus::New)));
    }

    #[test]
    fn search_applies_the_same_substring_rule_to_mobile() {
        // The rule is a plain substring match, so a synthetic mobile value
        // containing letters must match too.
        let filter = LeadFilter {
            status: StatusFilter::All,
            search: Some("raj".to_owned()),
        };
        assert!(filter.matches(&sample_lead("Asha Rao", "98RAJ76", LeadStatus::New)));
        assert!(!filter.matches(&sample_lead("Asha Rao", "9000000000", LeadStatus::New)));
    }

    #[test]
    fn status_filter_requires_exact_variant() {
        let filter = LeadFilter {
            status: StatusFilter::Only(LeadStatus::Closed),
            search: None,
        };
        assert!(filter.matches(&sample_lead("A", "1", LeadStatus::Closed)));
        assert!(!filter.matches(&sample_lead("B", "2", LeadStatus::InProgress)));
    }

    #[test]
    fn status_parsing_is_case_sensitive() {
        assert_eq!("Closed".parse::<LeadStatus>(), Ok(LeadStatus::Closed));
        assert!("closed".parse::<LeadStatus>().is_err());
        assert!("CLOSED".parse::<LeadStatus>().is_err());
    }

    #[test]
    fn service_type_round_trips_wire_labels() {
        for label in ["installation", "repair", "maintenance", "amc", "dvr-nvr", "upgrade", "other"]
        {
            let parsed = label.parse::<ServiceType>().expect("known label");
            assert_eq!(parsed.as_str(), label);
        }
        assert!("cctv".parse::<ServiceType>().is_err());
    }

    #[test]
    fn cache_key_lowercases_search_and_encodes_status() {
        let filter = LeadFilter {
            status: StatusFilter::Only(LeadStatus::InProgress),
            search: Some("Raj".to_owned()),
        };
        assert_eq!(filter.cache_key(), "status=In Progress&search=raj");
        assert_eq!(LeadFilter::default().cache_key(), "status=all&search=");
    }
}
