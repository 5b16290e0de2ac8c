use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use clap::Args;
use license_portal::config::AppConfig;
use license_portal::error::AppError;
use license_portal::workflows::licensing::{
    build_submission_payload, catalog, missing_required_fields, ApplicationDraft, ClientError,
    DocumentMetadata, DraftSession, Envelope, MemorySessionStore, SectionData, SubmissionClient,
    SubmissionPayload, ValidationError,
};
use serde_json::json;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Simulate a backend that rejects the submission
    #[arg(long)]
    pub(crate) reject: bool,
    /// Stop after filling and validating the draft, without submitting
    #[arg(long)]
    pub(crate) skip_submission: bool,
}

#[derive(Args, Debug)]
pub(crate) struct PayloadArgs {
    /// JSON file holding the personal-details section
    #[arg(long)]
    pub(crate) personal: PathBuf,
    /// JSON file holding the license-details section
    #[arg(long)]
    pub(crate) license: PathBuf,
    /// Optional JSON file mapping document slots to file metadata
    #[arg(long)]
    pub(crate) documents: Option<PathBuf>,
}

/// Offline stand-in for the portal backend so the demo runs without a
/// network.
struct ScriptedClient {
    reject: bool,
}

#[async_trait]
impl SubmissionClient for ScriptedClient {
    async fn submit(&self, _payload: &SubmissionPayload) -> Result<Envelope, ClientError> {
        if self.reject {
            Ok(Envelope::rejected("Applicant must be at least 15 years old"))
        } else {
            Ok(Envelope::accepted(
                "Application submitted successfully",
                json!({
                    "application_id": "APP-2026-000123",
                    "application_status_id": "ASID_PEN"
                }),
            ))
        }
    }
}

pub(crate) async fn run_demo(args: DemoArgs, config: &AppConfig) -> Result<(), AppError> {
    println!("License application portal demo");
    println!(
        "Auto-save debounce window: {}ms | API target: {}",
        config.autosave.debounce_ms, config.api.base_url
    );

    let store = Arc::new(MemorySessionStore::default());
    let client = Arc::new(ScriptedClient {
        reject: args.reject,
    });
    let mut session = DraftSession::new(store, client);

    let missing = missing_required_fields(&session.draft().personal_details);
    println!("\nEmpty draft is missing {} required fields, e.g.:", missing.len());
    for label in missing.iter().take(5) {
        println!("  - {label}");
    }

    println!("\nStep 1: personal details");
    if !session.save_personal_details(demo_personal_details()?, 1) {
        println!("  save failed: {}", session.last_error().unwrap_or("unknown"));
        return Ok(());
    }

    println!("Step 2: license details");
    if !session.save_license_details(demo_license_details()?, 2) {
        println!("  save failed: {}", session.last_error().unwrap_or("unknown"));
        return Ok(());
    }

    println!("Step 3: documents");
    if !session.save_documents(demo_documents(), 3) {
        println!("  save failed: {}", session.last_error().unwrap_or("unknown"));
        return Ok(());
    }

    let draft = session.draft();
    println!(
        "Draft status: {} | step {} | last saved: {}",
        draft.status.label(),
        draft.current_step,
        session
            .last_saved_label(Utc::now())
            .unwrap_or_else(|| "never".to_string())
    );
    println!(
        "All sections present: {}",
        session.is_application_complete()
    );

    let payload = build_submission_payload(session.draft())?;
    println!(
        "\nMapped payload: {} ({}) covering {}",
        payload.application_type_id,
        catalog::application_type_display_name(&payload.application_type_id),
        payload
            .vehicle_categories
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("{}", serde_json::to_string_pretty(&payload)?);

    if args.skip_submission {
        return Ok(());
    }

    println!("\nStep 4: submit");
    if session.submit_application().await {
        let draft = session.draft();
        println!(
            "Accepted: status {} at {}",
            draft.status.label(),
            draft
                .submitted_at
                .map(|at| at.to_rfc3339())
                .unwrap_or_default()
        );
    } else {
        println!(
            "Rejected: {}",
            session.last_error().unwrap_or("no message returned")
        );
        println!(
            "Draft stays editable at status {}",
            session.draft().status.label()
        );
    }

    Ok(())
}

pub(crate) fn run_payload(args: PayloadArgs) -> Result<(), AppError> {
    let personal_details: SectionData = serde_json::from_str(&fs::read_to_string(&args.personal)?)?;
    let license_details: SectionData = serde_json::from_str(&fs::read_to_string(&args.license)?)?;
    let documents: BTreeMap<String, DocumentMetadata> = match &args.documents {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => BTreeMap::new(),
    };

    let draft = ApplicationDraft {
        personal_details,
        license_details,
        documents,
        ..ApplicationDraft::empty()
    };

    match build_submission_payload(&draft) {
        Ok(payload) => println!("{}", serde_json::to_string_pretty(&payload)?),
        Err(ValidationError::MissingFields(labels)) => {
            println!("Draft is not submittable; missing required fields:");
            for label in labels {
                println!("  - {label}");
            }
        }
        Err(ValidationError::NoVehicleCategory) => {
            println!("Draft is not submittable; select at least one vehicle category");
        }
    }

    Ok(())
}

pub(crate) fn run_catalog() -> Result<(), AppError> {
    println!("Application types");
    for type_id in ["ATID_A", "ATID_B", "ATID_D"] {
        println!(
            "  {type_id}: {}",
            catalog::application_type_display_name(type_id)
        );
    }

    println!("\nApplication statuses");
    for status_id in ["ASID_PEN", "ASID_SFA", "ASID_APR", "ASID_REJ", "ASID_RSB"] {
        println!(
            "  {status_id}: {} (editable: {})",
            catalog::application_status_display_name(status_id),
            catalog::can_edit_application(status_id)
        );
    }

    println!("\nVehicle categories");
    for category in ["A", "A1", "B", "B1", "B2", "C", "D", "BE", "CE"] {
        println!(
            "  {category}: {}",
            catalog::vehicle_category_display_name(category)
        );
    }

    println!("\nBlood types: {}", catalog::BLOOD_TYPE_OPTIONS.join(", "));
    println!(
        "Civil statuses: {}",
        catalog::CIVIL_STATUS_OPTIONS.join(", ")
    );
    println!(
        "Educational attainment: {}",
        catalog::EDUCATIONAL_ATTAINMENT_OPTIONS.join(", ")
    );
    println!("Clutch types: {}", catalog::CLUTCH_TYPE_OPTIONS.join(", "));
    println!(
        "Family relations: {}",
        catalog::FAMILY_RELATION_OPTIONS.join(", ")
    );

    Ok(())
}

fn demo_personal_details() -> Result<SectionData, AppError> {
    let section = serde_json::from_value(json!({
        "family_name": "Dela Cruz",
        "first_name": "Juan",
        "middle_name": "Santos",
        "sex": "Male",
        "birthdate": "1995-06-12",
        "birthplace": "Manila",
        "civil_status": "Single",
        "height": 170.5,
        "weight": 65,
        "contact_num": "09171234567",
        "nationality": "Filipino",
        "educational_attainment": "College",
        "region": "NCR",
        "province": "Metro Manila",
        "municipality": "Quezon City",
        "zip_code": "1100",
        "barangay": "Batasan Hills",
        "street_address": "Mabini St",
        "house_address": "12",
        "emergency_contacts": [
            { "name": "Maria Dela Cruz", "address": "Quezon City", "contact_no": "09181234567" }
        ]
    }))?;
    Ok(section)
}

fn demo_license_details() -> Result<SectionData, AppError> {
    let section = serde_json::from_value(json!({
        "newApplication": true,
        "vehicleCategories": ["A", "B"],
        "clutchTypes": ["Manual", "Automatic"],
        "bloodType": "Opos",
        "organDonor": true
    }))?;
    Ok(section)
}

fn demo_documents() -> BTreeMap<String, DocumentMetadata> {
    let mut documents = BTreeMap::new();
    documents.insert(
        "birth_certificate".to_string(),
        DocumentMetadata {
            file_name: "psa-birth-cert.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            size_bytes: 120_334,
        },
    );
    documents.insert(
        "medical_certificate".to_string(),
        DocumentMetadata {
            file_name: "medcert.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            size_bytes: 88_102,
        },
    );
    documents
}
