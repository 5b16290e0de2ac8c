//! Mapper/Validator: reshapes the three draft sub-documents into a
//! [`SubmissionPayload`] and runs the pre-flight completeness check before
//! any network call is made.

use serde_json::Value;
use tracing::{debug, warn};

use super::domain::{
    ApplicationDraft, DocumentRecord, EmergencyContactRecord, EmploymentRecord,
    FamilyMemberRecord, LicenseDetailRecord, PersonalInfo, SectionData, SubmissionPayload,
};
use super::mapping::{self, application_types};
use super::normalizer;

const DEFAULT_CLUTCH_TYPE: &str = "Manual";
const DEFAULT_NATIONALITY: &str = "Filipino";

/// How a required field is checked during pre-flight validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    PositiveNumber,
}

/// One entry of the declarative required-field schema, consumed by both the
/// blocking validator and any UI-facing hint text.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

const REQUIRED_PERSONAL_FIELDS: &[FieldRule] = &[
    FieldRule { key: "family_name", label: "Family Name", kind: FieldKind::Text },
    FieldRule { key: "first_name", label: "First Name", kind: FieldKind::Text },
    FieldRule { key: "sex", label: "Sex", kind: FieldKind::Text },
    FieldRule { key: "birthdate", label: "Birthdate", kind: FieldKind::Text },
    FieldRule { key: "civil_status", label: "Civil Status", kind: FieldKind::Text },
    FieldRule { key: "height", label: "Height", kind: FieldKind::PositiveNumber },
    FieldRule { key: "weight", label: "Weight", kind: FieldKind::PositiveNumber },
    FieldRule { key: "contact_num", label: "Contact Number", kind: FieldKind::Text },
    FieldRule { key: "nationality", label: "Nationality", kind: FieldKind::Text },
    FieldRule {
        key: "educational_attainment",
        label: "Educational Attainment",
        kind: FieldKind::Text,
    },
    FieldRule { key: "birthplace", label: "Birthplace", kind: FieldKind::Text },
    FieldRule { key: "region", label: "Region", kind: FieldKind::Text },
    FieldRule { key: "province", label: "Province", kind: FieldKind::Text },
    FieldRule { key: "municipality", label: "Municipality", kind: FieldKind::Text },
    FieldRule { key: "zip_code", label: "ZIP Code", kind: FieldKind::Text },
    FieldRule { key: "barangay", label: "Barangay", kind: FieldKind::Text },
    FieldRule { key: "street_address", label: "Street Address", kind: FieldKind::Text },
    FieldRule { key: "house_address", label: "House Address", kind: FieldKind::Text },
];

/// The single source of truth for which personal-info fields block
/// submission when missing.
pub fn required_personal_fields() -> &'static [FieldRule] {
    REQUIRED_PERSONAL_FIELDS
}

/// Pre-flight validation errors; raised before any network call.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
    #[error("at least one vehicle category must be selected")]
    NoVehicleCategory,
}

/// Build the backend-shaped payload from a draft, or report what blocks it.
pub fn build_submission_payload(
    draft: &ApplicationDraft,
) -> Result<SubmissionPayload, ValidationError> {
    let personal = &draft.personal_details;
    let license = &draft.license_details;

    let missing = missing_required_fields(personal);
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    let frontend_categories = string_list(license, "vehicleCategories");
    if frontend_categories.is_empty() {
        return Err(ValidationError::NoVehicleCategory);
    }

    let vehicle_categories: Vec<String> = frontend_categories
        .iter()
        .map(|category| mapping::backend_vehicle_category(category))
        .collect();

    let stored_clutches = string_list(license, "clutchTypes");
    let clutch_types = if stored_clutches.len() == vehicle_categories.len() {
        stored_clutches
    } else {
        if !stored_clutches.is_empty() {
            debug!(
                stored = stored_clutches.len(),
                categories = vehicle_categories.len(),
                "clutch list length mismatch, defaulting all to Manual"
            );
        }
        vec![DEFAULT_CLUTCH_TYPE.to_string(); vehicle_categories.len()]
    };

    if draft.documents.is_empty() {
        warn!("submitting application without supporting documents");
    }

    let documents = draft
        .documents
        .iter()
        .map(|(field, metadata)| DocumentRecord {
            document_type: field.clone(),
            file_name: metadata.file_name.clone(),
            content_type: metadata.content_type.clone(),
            size_bytes: metadata.size_bytes,
        })
        .collect();

    Ok(SubmissionPayload {
        application_type_id: application_type_id(license).to_string(),
        vehicle_categories,
        clutch_types,
        additional_requirements: text(license, "additionalRequirements")
            .unwrap_or_default()
            .to_string(),
        personal_info: personal_info(personal, license),
        license_details: license_detail_record(license),
        documents,
        emergency_contacts: emergency_contacts(personal),
        employment_info: employment_info(personal),
        family_info: family_info(personal),
    })
}

/// Labels of required personal fields that are empty, null, or non-positive.
pub fn missing_required_fields(personal: &SectionData) -> Vec<String> {
    REQUIRED_PERSONAL_FIELDS
        .iter()
        .filter(|rule| match rule.kind {
            FieldKind::Text => text(personal, rule.key).is_none(),
            FieldKind::PositiveNumber => {
                !number(personal, rule.key).is_some_and(|value| value > 0.0)
            }
        })
        .map(|rule| rule.label.to_string())
        .collect()
}

/// Checkbox flags are checked in a fixed order; the first set flag wins.
fn application_type_id(license: &SectionData) -> &'static str {
    if flag(license, "newApplication") {
        application_types::NEW
    } else if flag(license, "renewalOfExpiring") || flag(license, "renewalOfExpired") {
        application_types::RENEWAL
    } else if flag(license, "duplicateLicense") {
        application_types::DUPLICATE
    } else {
        application_types::NEW
    }
}

fn personal_info(personal: &SectionData, license: &SectionData) -> PersonalInfo {
    let address = normalizer::compose_address(
        [
            "house_address",
            "street_address",
            "barangay",
            "municipality",
            "province",
            "region",
            "zip_code",
        ]
        .into_iter()
        .map(|key| text(personal, key).unwrap_or_default()),
    );

    // Blood type lives in the license step's medical block.
    let blood_token = text(license, "bloodType").or_else(|| text(license, "blood_type"));

    PersonalInfo {
        family_name: owned(personal, "family_name"),
        first_name: owned(personal, "first_name"),
        middle_name: owned(personal, "middle_name"),
        address,
        contact_num: normalizer::normalize_contact_number(
            text(personal, "contact_num").unwrap_or_default(),
        ),
        nationality: text(personal, "nationality")
            .unwrap_or(DEFAULT_NATIONALITY)
            .to_string(),
        birthdate: owned(personal, "birthdate"),
        birthplace: owned(personal, "birthplace"),
        height: number(personal, "height").unwrap_or_default(),
        weight: number(personal, "weight").unwrap_or_default(),
        eye_color: owned(personal, "eye_color"),
        civil_status: owned(personal, "civil_status"),
        educational_attainment: normalizer::normalize_educational_attainment(
            text(personal, "educational_attainment").unwrap_or_default(),
        ),
        blood_type: normalizer::normalize_blood_type(blood_token),
        sex: owned(personal, "sex"),
        tin: text(personal, "tin").map(str::to_string),
        is_organ_donor: flag(license, "organDonor") || flag(personal, "is_organ_donor"),
    }
}

fn license_detail_record(license: &SectionData) -> LicenseDetailRecord {
    LicenseDetailRecord {
        existing_license_number: text(license, "driverLicenseNumber").map(str::to_string),
        license_expiry_date: text(license, "licenseExpiryDate").map(str::to_string),
        license_restrictions: text(license, "licenseRestrictions").map(str::to_string),
    }
}

/// An entry is included only when its `name` field is present.
fn emergency_contacts(personal: &SectionData) -> Vec<EmergencyContactRecord> {
    entries(personal, "emergency_contacts")
        .filter_map(|entry| {
            let name = entry_text(entry, "name")?;
            Some(EmergencyContactRecord {
                ec_name: name.to_string(),
                ec_address: entry_text(entry, "address").map(str::to_string),
                ec_contact_no: normalizer::normalize_contact_number(
                    entry_text(entry, "contact_no").unwrap_or_default(),
                ),
            })
        })
        .collect()
}

fn employment_info(personal: &SectionData) -> Vec<EmploymentRecord> {
    entries(personal, "employment")
        .filter_map(|entry| {
            let name = entry_text(entry, "name")?;
            Some(EmploymentRecord {
                employer_name: name.to_string(),
                employer_tel_no: entry_text(entry, "tel_no")
                    .map(normalizer::normalize_contact_number),
                employer_address: entry_text(entry, "address").map(str::to_string),
            })
        })
        .collect()
}

/// Family entries additionally drop members flagged deceased.
fn family_info(personal: &SectionData) -> Vec<FamilyMemberRecord> {
    entries(personal, "family")
        .filter_map(|entry| {
            let name = entry_text(entry, "name")?;
            if entry
                .get("deceased")
                .and_then(Value::as_bool)
                .unwrap_or(false)
            {
                return None;
            }
            Some(FamilyMemberRecord {
                relation_type: entry_text(entry, "relation").unwrap_or_default().to_string(),
                family_name: name.to_string(),
                first_name: entry_text(entry, "first_name").unwrap_or_default().to_string(),
                middle_name: entry_text(entry, "middle_name").map(str::to_string),
                is_deceased: false,
            })
        })
        .collect()
}

fn entries<'a>(section: &'a SectionData, key: &str) -> impl Iterator<Item = &'a Value> {
    section
        .get(key)
        .and_then(Value::as_array)
        .map(|list| list.iter())
        .unwrap_or_default()
}

fn entry_text<'a>(entry: &'a Value, key: &str) -> Option<&'a str> {
    entry
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Non-empty trimmed string value, or `None`.
fn text<'a>(section: &'a SectionData, key: &str) -> Option<&'a str> {
    section
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn owned(section: &SectionData, key: &str) -> String {
    text(section, key).unwrap_or_default().to_string()
}

/// Numeric value, accepting both JSON numbers and numeric strings.
fn number(section: &SectionData, key: &str) -> Option<f64> {
    match section.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn flag(section: &SectionData, key: &str) -> bool {
    section
        .get(key)
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

fn string_list(section: &SectionData, key: &str) -> Vec<String> {
    section
        .get(key)
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
