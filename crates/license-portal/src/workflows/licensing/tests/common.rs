use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::workflows::licensing::client::{ClientError, Envelope, SubmissionClient};
use crate::workflows::licensing::domain::{
    ApplicationDraft, DocumentMetadata, SectionData, MIN_STEP,
};
use crate::workflows::licensing::store::{SessionStore, StoreError};
use crate::workflows::licensing::SubmissionPayload;

pub(super) fn section(value: Value) -> SectionData {
    serde_json::from_value(value).expect("fixture is a JSON object")
}

pub(super) fn personal_details() -> SectionData {
    section(json!({
        "family_name": "Dela Cruz",
        "first_name": "Juan",
        "middle_name": "Santos",
        "sex": "Male",
        "birthdate": "1995-06-12",
        "birthplace": "Manila",
        "civil_status": "Single",
        "height": 170.5,
        "weight": "65",
        "contact_num": "09171234567",
        "nationality": "Filipino",
        "educational_attainment": "Post Graduate",
        "eye_color": "Brown",
        "tin": "123456789",
        "region": "NCR",
        "province": "Metro Manila",
        "municipality": "Quezon City",
        "zip_code": "1100",
        "barangay": "Batasan Hills",
        "street_address": "Mabini St",
        "house_address": "12",
        "emergency_contacts": [
            { "name": "Maria Dela Cruz", "address": "Quezon City", "contact_no": "09181234567" },
            { "address": "left blank on purpose" }
        ],
        "employment": [
            { "name": "Acme Logistics", "tel_no": "09190001111", "address": "Pasig" },
            { "tel_no": "no employer name" }
        ],
        "family": [
            { "relation": "Mother", "name": "Reyes", "first_name": "Luz" },
            { "relation": "Father", "name": "Dela Cruz", "first_name": "Pedro", "deceased": true },
            { "relation": "Spouse" }
        ]
    }))
}

pub(super) fn license_details() -> SectionData {
    section(json!({
        "newApplication": true,
        "renewalOfExpiring": false,
        "renewalOfExpired": false,
        "duplicateLicense": false,
        "vehicleCategories": ["A", "B"],
        "clutchTypes": ["Manual", "Automatic"],
        "bloodType": "Apos",
        "organDonor": true,
        "additionalRequirements": "Wearing corrective lenses"
    }))
}

pub(super) fn documents() -> BTreeMap<String, DocumentMetadata> {
    let mut map = BTreeMap::new();
    map.insert(
        "birth_certificate".to_string(),
        DocumentMetadata {
            file_name: "psa-birth-cert.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            size_bytes: 120_334,
        },
    );
    map.insert(
        "medical_certificate".to_string(),
        DocumentMetadata {
            file_name: "medcert.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            size_bytes: 88_102,
        },
    );
    map
}

pub(super) fn filled_draft() -> ApplicationDraft {
    ApplicationDraft {
        personal_details: personal_details(),
        license_details: license_details(),
        documents: documents(),
        current_step: MIN_STEP,
        ..ApplicationDraft::empty()
    }
}

pub(super) fn accepted_envelope() -> Envelope {
    Envelope::accepted(
        "Application submitted successfully",
        json!({ "application_id": "APP-2026-000123", "application_status_id": "ASID_PEN" }),
    )
}

/// Client double that records calls and replays queued responses; once the
/// queue runs dry it accepts everything.
#[derive(Default)]
pub(super) struct RecordingClient {
    responses: Mutex<VecDeque<Result<Envelope, ClientError>>>,
    calls: AtomicUsize,
}

impl RecordingClient {
    pub(super) fn accepting() -> Self {
        Self::default()
    }

    pub(super) fn with_response(response: Result<Envelope, ClientError>) -> Self {
        let client = Self::default();
        client
            .responses
            .lock()
            .expect("responses mutex poisoned")
            .push_back(response);
        client
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SubmissionClient for RecordingClient {
    async fn submit(&self, _payload: &SubmissionPayload) -> Result<Envelope, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut queue = self.responses.lock().expect("responses mutex poisoned");
        queue.pop_front().unwrap_or_else(|| Ok(accepted_envelope()))
    }
}

/// Store double whose writes always fail, for exercising the degrade path.
#[derive(Default)]
pub(super) struct ReadOnlyStore;

impl SessionStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::WriteRejected {
            key: key.to_string(),
            reason: "store is read-only".to_string(),
        })
    }

    fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Ok(())
    }
}
