//! End-to-end flow against a fake portal backend: fill the wizard sections,
//! submit over real HTTP, and verify the draft's terminal transition.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use license_portal::workflows::licensing::{
    ApplicationStatus, DocumentMetadata, DraftSession, HttpSubmissionClient, MemorySessionStore,
    SectionData,
};

#[derive(Clone)]
struct BackendBehavior {
    accept: bool,
    captured: Arc<std::sync::Mutex<Vec<Value>>>,
}

async fn submit_complete(
    State(behavior): State<BackendBehavior>,
    Json(body): Json<Value>,
) -> Json<Value> {
    behavior
        .captured
        .lock()
        .expect("capture mutex poisoned")
        .push(body);

    if behavior.accept {
        Json(json!({
            "success": true,
            "message": "Application submitted successfully",
            "data": { "application_id": "APP-2026-000777", "application_status_id": "ASID_PEN" }
        }))
    } else {
        Json(json!({
            "success": false,
            "message": "Applicant must be at least 15 years old"
        }))
    }
}

async fn spawn_backend(accept: bool) -> (SocketAddr, Arc<std::sync::Mutex<Vec<Value>>>) {
    let captured = Arc::new(std::sync::Mutex::new(Vec::new()));
    let behavior = BackendBehavior {
        accept,
        captured: captured.clone(),
    };
    let app = Router::new()
        .route("/api/v1/applications/submit-complete", post(submit_complete))
        .with_state(behavior);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("ephemeral port binds");
    let addr = listener.local_addr().expect("addr available");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server runs");
    });

    (addr, captured)
}

fn personal_details() -> SectionData {
    serde_json::from_value(json!({
        "family_name": "Dela Cruz",
        "first_name": "Juan",
        "sex": "Male",
        "birthdate": "1995-06-12",
        "birthplace": "Manila",
        "civil_status": "Single",
        "height": 170,
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
        "house_address": "12"
    }))
    .expect("fixture is an object")
}

fn license_details() -> SectionData {
    serde_json::from_value(json!({
        "newApplication": true,
        "vehicleCategories": ["A", "B"],
        "clutchTypes": ["Manual", "Automatic"],
        "bloodType": "Opos"
    }))
    .expect("fixture is an object")
}

fn documents() -> BTreeMap<String, DocumentMetadata> {
    let mut map = BTreeMap::new();
    map.insert(
        "birth_certificate".to_string(),
        DocumentMetadata {
            file_name: "psa.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            size_bytes: 1024,
        },
    );
    map
}

#[tokio::test]
async fn accepted_submission_transitions_the_draft() {
    let (addr, captured) = spawn_backend(true).await;
    let client = HttpSubmissionClient::from_parts(format!("http://{addr}/api/v1"), None)
        .expect("client builds");

    let store = Arc::new(MemorySessionStore::default());
    let mut session = DraftSession::new(store, Arc::new(client));
    assert!(session.save_personal_details(personal_details(), 1));
    assert!(session.save_license_details(license_details(), 2));
    assert!(session.save_documents(documents(), 3));

    assert!(session.submit_application().await);
    assert_eq!(session.draft().status, ApplicationStatus::Submitted);

    let bodies = captured.lock().expect("capture mutex poisoned");
    assert_eq!(bodies.len(), 1);
    let body = &bodies[0];
    assert_eq!(body["application_type_id"], "ATID_A");
    assert_eq!(body["vehicle_categories"], json!(["VCID_L4", "VCID_L6"]));
    assert_eq!(body["personal_info"]["contact_num"], "+639171234567");
    assert_eq!(body["personal_info"]["blood_type"], "O+");
}

#[tokio::test]
async fn server_side_rejection_keeps_the_draft_in_progress() {
    let (addr, _captured) = spawn_backend(false).await;
    let client = HttpSubmissionClient::from_parts(format!("http://{addr}/api/v1"), None)
        .expect("client builds");

    let mut session = DraftSession::new(Arc::new(MemorySessionStore::default()), Arc::new(client));
    assert!(session.save_personal_details(personal_details(), 1));
    assert!(session.save_license_details(license_details(), 2));
    assert!(session.save_documents(documents(), 3));

    assert!(!session.submit_application().await);
    assert_eq!(session.draft().status, ApplicationStatus::InProgress);
    assert_eq!(
        session.last_error(),
        Some("Applicant must be at least 15 years old")
    );
}

#[tokio::test]
async fn unreachable_backend_is_a_generic_failure() {
    // Nothing listens on this port.
    let client =
        HttpSubmissionClient::from_parts("http://127.0.0.1:1/api/v1", None).expect("client builds");

    let mut session = DraftSession::new(Arc::new(MemorySessionStore::default()), Arc::new(client));
    assert!(session.save_personal_details(personal_details(), 1));
    assert!(session.save_license_details(license_details(), 2));
    assert!(session.save_documents(documents(), 3));

    assert!(!session.submit_application().await);
    assert_eq!(session.draft().status, ApplicationStatus::InProgress);
    assert!(session.last_error().is_some());
}
