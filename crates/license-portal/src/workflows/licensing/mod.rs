//! Driver's-license application intake: draft session state, payload
//! mapping/validation, and the submission boundary.
//!
//! The wizard's step components write into a [`session::DraftSession`] on
//! every (debounced) field change; on the final step the session maps the
//! stored sub-documents into a [`domain::SubmissionPayload`] and posts it
//! through a [`client::SubmissionClient`].

pub mod autosave;
pub mod catalog;
pub mod client;
pub mod domain;
pub(crate) mod mapping;
pub(crate) mod normalizer;
pub mod payload;
pub mod session;
pub mod store;

#[cfg(test)]
mod tests;

pub use autosave::Debouncer;
pub use client::{ClientError, Envelope, HttpSubmissionClient, SubmissionClient};
pub use domain::{
    ApplicationDraft, ApplicationStatus, DocumentMetadata, DocumentRecord,
    EmergencyContactRecord, EmploymentRecord, FamilyMemberRecord, LicenseDetailRecord,
    PersonalInfo, SaveStatus, SectionData, StatusRecord, SubmissionPayload, MAX_STEP, MIN_STEP,
};
pub use payload::{
    build_submission_payload, missing_required_fields, required_personal_fields, FieldKind,
    FieldRule, ValidationError,
};
pub use session::{DraftSection, DraftSession};
pub use store::{MemorySessionStore, SessionStore, StoreError};
