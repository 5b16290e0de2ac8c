use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Free-form key/value sub-document as the wizard steps store it.
pub type SectionData = BTreeMap<String, Value>;

/// Lifecycle of a locally-held draft: `Draft -> InProgress -> Submitted`,
/// with `InProgress` re-entered on every incremental save and `Submitted`
/// terminal for the draft instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Draft,
    InProgress,
    Submitted,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Draft => "draft",
            ApplicationStatus::InProgress => "in_progress",
            ApplicationStatus::Submitted => "submitted",
        }
    }
}

/// Presentation-facing indicator for the most recent save operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SaveStatus {
    #[default]
    Idle,
    Saving,
    Saved,
    Error,
}

/// File metadata kept per document slot while the upload itself lives
/// elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
}

pub const MIN_STEP: u8 = 1;
pub const MAX_STEP: u8 = 4;

/// The working, not-yet-submitted application record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationDraft {
    pub personal_details: SectionData,
    pub license_details: SectionData,
    pub documents: BTreeMap<String, DocumentMetadata>,
    pub status: ApplicationStatus,
    pub last_saved: Option<DateTime<Utc>>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub current_step: u8,
}

impl ApplicationDraft {
    pub fn empty() -> Self {
        Self {
            current_step: MIN_STEP,
            ..Self::default()
        }
    }
}

/// Storage shape of the status metadata record, camelCase to match the
/// values the original portal wrote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRecord {
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub last_saved: Option<DateTime<Utc>>,
    #[serde(default = "StatusRecord::default_step")]
    pub current_step: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl StatusRecord {
    fn default_step() -> u8 {
        MIN_STEP
    }
}

impl Default for StatusRecord {
    fn default() -> Self {
        Self {
            status: ApplicationStatus::Draft,
            last_saved: None,
            current_step: MIN_STEP,
            submitted_at: None,
        }
    }
}

/// The backend-shaped structure posted to the submit-complete endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub application_type_id: String,
    pub vehicle_categories: Vec<String>,
    pub clutch_types: Vec<String>,
    pub additional_requirements: String,
    pub personal_info: PersonalInfo,
    pub license_details: LicenseDetailRecord,
    pub documents: Vec<DocumentRecord>,
    pub emergency_contacts: Vec<EmergencyContactRecord>,
    pub employment_info: Vec<EmploymentRecord>,
    pub family_info: Vec<FamilyMemberRecord>,
}

/// Normalized applicant identity block nested inside the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub family_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub address: String,
    pub contact_num: String,
    pub nationality: String,
    pub birthdate: String,
    pub birthplace: String,
    pub height: f64,
    pub weight: f64,
    pub eye_color: String,
    pub civil_status: String,
    pub educational_attainment: String,
    pub blood_type: String,
    pub sex: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tin: Option<String>,
    pub is_organ_donor: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LicenseDetailRecord {
    pub existing_license_number: Option<String>,
    pub license_expiry_date: Option<String>,
    pub license_restrictions: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub document_type: String,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyContactRecord {
    pub ec_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ec_address: Option<String>,
    pub ec_contact_no: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmploymentRecord {
    pub employer_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employer_tel_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employer_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyMemberRecord {
    pub relation_type: String,
    pub family_name: String,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub is_deceased: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_record_round_trips_camel_case() {
        let record = StatusRecord {
            status: ApplicationStatus::InProgress,
            last_saved: Some("2026-08-26T10:00:00Z".parse().expect("valid timestamp")),
            current_step: 2,
            submitted_at: None,
        };
        let json = serde_json::to_value(&record).expect("serializes");
        assert_eq!(json["status"], "in_progress");
        assert!(json.get("lastSaved").is_some());
        assert_eq!(json["currentStep"], 2);
        assert!(json.get("submittedAt").is_none());
    }

    #[test]
    fn status_record_tolerates_sparse_json() {
        let record: StatusRecord = serde_json::from_str("{}").expect("defaults apply");
        assert_eq!(record.status, ApplicationStatus::Draft);
        assert_eq!(record.current_step, MIN_STEP);
        assert!(record.last_saved.is_none());
    }
}
