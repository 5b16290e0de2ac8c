//! Session-state manager for the multi-step application wizard: hydrates the
//! draft from session storage, merge-writes per-step edits, and drives the
//! submit flow through the mapper/validator and submission client.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{error, info, warn};

use super::client::SubmissionClient;
use super::domain::{
    ApplicationDraft, ApplicationStatus, DocumentMetadata, SaveStatus, SectionData, StatusRecord,
    MAX_STEP, MIN_STEP,
};
use super::payload::build_submission_payload;
use super::store::{keys, SessionStore};

/// The three sub-documents the wizard steps write into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftSection {
    PersonalDetails,
    LicenseDetails,
    Documents,
}

impl DraftSection {
    pub const fn storage_key(self) -> &'static str {
        match self {
            DraftSection::PersonalDetails => keys::PERSONAL_DETAILS,
            DraftSection::LicenseDetails => keys::LICENSE_DETAILS,
            DraftSection::Documents => keys::DOCUMENTS,
        }
    }
}

/// Stateful facade the step components talk to.
///
/// Storage failures are caught here, logged, and degraded to defaults; they
/// never propagate and crash step rendering. Save operations report success
/// through a boolean, mirroring the contract the presentation layer expects.
pub struct DraftSession<S, C> {
    store: Arc<S>,
    client: Arc<C>,
    draft: ApplicationDraft,
    save_status: SaveStatus,
    last_error: Option<String>,
    submitting: bool,
}

impl<S, C> DraftSession<S, C>
where
    S: SessionStore,
    C: SubmissionClient,
{
    /// Create a session and hydrate it from the store.
    pub fn new(store: Arc<S>, client: Arc<C>) -> Self {
        let mut session = Self {
            store,
            client,
            draft: ApplicationDraft::empty(),
            save_status: SaveStatus::Idle,
            last_error: None,
            submitting: false,
        };
        session.load();
        session
    }

    /// Re-read every draft key, degrading per-key to empty defaults on read
    /// or parse errors.
    pub fn load(&mut self) {
        let personal: SectionData = self.read_json(keys::PERSONAL_DETAILS);
        let license: SectionData = self.read_json(keys::LICENSE_DETAILS);
        let documents: BTreeMap<String, DocumentMetadata> = self.read_json(keys::DOCUMENTS);
        let status: StatusRecord = self.read_json(keys::APPLICATION_STATUS);

        self.draft = ApplicationDraft {
            personal_details: personal,
            license_details: license,
            documents,
            status: status.status,
            last_saved: status.last_saved,
            submitted_at: status.submitted_at,
            current_step: status.current_step.clamp(MIN_STEP, MAX_STEP),
        };
    }

    pub fn draft(&self) -> &ApplicationDraft {
        &self.draft
    }

    pub fn save_status(&self) -> SaveStatus {
        self.save_status
    }

    /// Blocking or surfaced message from the most recent failed operation.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn save_personal_details(&mut self, data: SectionData, step: u8) -> bool {
        self.save_section(DraftSection::PersonalDetails, data, step)
    }

    pub fn save_license_details(&mut self, data: SectionData, step: u8) -> bool {
        self.save_section(DraftSection::LicenseDetails, data, step)
    }

    pub fn save_documents(&mut self, data: BTreeMap<String, DocumentMetadata>, step: u8) -> bool {
        if !self.can_mutate(step) {
            return false;
        }

        let mut merged = self.draft.documents.clone();
        merged.extend(data);

        self.save_status = SaveStatus::Saving;
        if !self.write_json(keys::DOCUMENTS, &merged) {
            self.save_status = SaveStatus::Error;
            return false;
        }

        let record = self.progress_record(step);
        if !self.write_status_record(&record) {
            self.save_status = SaveStatus::Error;
            return false;
        }

        self.draft.documents = merged;
        self.apply_status_record(record);
        self.save_status = SaveStatus::Saved;
        true
    }

    /// Merge-write one key/value sub-document, stamp `lastSaved`, and move
    /// the draft into `InProgress`.
    fn save_section(&mut self, section: DraftSection, data: SectionData, step: u8) -> bool {
        if !self.can_mutate(step) {
            return false;
        }

        let current = match section {
            DraftSection::PersonalDetails => &self.draft.personal_details,
            _ => &self.draft.license_details,
        };
        let mut merged = current.clone();
        merged.extend(data);

        self.save_status = SaveStatus::Saving;
        if !self.write_json(section.storage_key(), &merged) {
            self.save_status = SaveStatus::Error;
            return false;
        }

        let record = self.progress_record(step);
        if !self.write_status_record(&record) {
            self.save_status = SaveStatus::Error;
            return false;
        }

        match section {
            DraftSection::PersonalDetails => self.draft.personal_details = merged,
            _ => self.draft.license_details = merged,
        }
        self.apply_status_record(record);
        self.save_status = SaveStatus::Saved;
        true
    }

    /// Persist the step pointer only, independent of content. Idempotent.
    pub fn update_current_step(&mut self, step: u8) -> bool {
        if !self.can_mutate(step) {
            return false;
        }

        let record = StatusRecord {
            status: self.draft.status,
            last_saved: self.draft.last_saved,
            current_step: step,
            submitted_at: self.draft.submitted_at,
        };
        if !self.write_status_record(&record) {
            return false;
        }

        self.draft.current_step = step;
        true
    }

    /// Erase all draft keys, leaving the unrelated user-session key alone,
    /// and reset the in-memory state to empty defaults.
    pub fn clear_session(&mut self) -> bool {
        for key in keys::DRAFT_KEYS {
            if let Err(err) = self.store.remove(key) {
                warn!(%key, error = %err, "failed to clear session key");
                return false;
            }
        }

        self.draft = ApplicationDraft::empty();
        self.save_status = SaveStatus::Idle;
        self.last_error = None;
        true
    }

    /// Map the draft into the backend payload, run pre-flight validation,
    /// and post it. Returns `true` only on a remote acknowledgment.
    pub async fn submit_application(&mut self) -> bool {
        if self.submitting {
            warn!("submission already in flight, ignoring duplicate request");
            return false;
        }
        if self.draft.status == ApplicationStatus::Submitted {
            warn!("draft already submitted, start a new application to resubmit");
            return false;
        }

        let payload = match build_submission_payload(&self.draft) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, "submission blocked by pre-flight validation");
                self.last_error = Some(err.to_string());
                return false;
            }
        };

        self.submitting = true;
        self.save_status = SaveStatus::Saving;
        let result = self.client.submit(&payload).await;
        self.submitting = false;

        match result {
            Ok(envelope) if envelope.success => {
                let now = Utc::now();
                let record = StatusRecord {
                    status: ApplicationStatus::Submitted,
                    last_saved: Some(now),
                    current_step: MAX_STEP,
                    submitted_at: Some(now),
                };
                // The backend accepted; a local bookkeeping failure must not
                // turn that into a reported rejection.
                if !self.write_status_record(&record) {
                    warn!("submitted remotely but failed to persist local status");
                }
                self.apply_status_record(record);
                self.save_status = SaveStatus::Saved;
                self.last_error = None;
                info!("application submitted");
                true
            }
            Ok(envelope) => {
                let message = envelope
                    .message
                    .unwrap_or_else(|| "submission rejected by the backend".to_string());
                warn!(%message, "backend declined the application");
                self.last_error = Some(message);
                self.save_status = SaveStatus::Error;
                false
            }
            Err(err) => {
                error!(error = %err, "submission failed");
                self.last_error = Some(err.to_string());
                self.save_status = SaveStatus::Error;
                false
            }
        }
    }

    /// Human string for the last save, pure in `now` for testability.
    pub fn last_saved_label(&self, now: DateTime<Utc>) -> Option<String> {
        let last_saved = self.draft.last_saved?;
        let minutes = (now - last_saved).num_minutes();

        if minutes < 1 {
            return Some("Just now".to_string());
        }
        if minutes < 60 {
            return Some(format!("{minutes} minutes ago"));
        }

        let hours = minutes / 60;
        if hours < 24 {
            return Some(format!("{hours} hours ago"));
        }

        Some(last_saved.format("%-m/%-d/%Y").to_string())
    }

    /// Shallow completeness check: all three sub-documents non-empty.
    pub fn is_application_complete(&self) -> bool {
        !self.draft.personal_details.is_empty()
            && !self.draft.license_details.is_empty()
            && !self.draft.documents.is_empty()
    }

    fn can_mutate(&mut self, step: u8) -> bool {
        if self.draft.status == ApplicationStatus::Submitted {
            warn!("draft already submitted, ignoring mutation");
            return false;
        }
        if !(MIN_STEP..=MAX_STEP).contains(&step) {
            warn!(step, "refusing mutation for step outside the wizard range");
            return false;
        }
        true
    }

    fn progress_record(&self, step: u8) -> StatusRecord {
        StatusRecord {
            status: ApplicationStatus::InProgress,
            last_saved: Some(Utc::now()),
            current_step: step,
            submitted_at: self.draft.submitted_at,
        }
    }

    fn apply_status_record(&mut self, record: StatusRecord) {
        self.draft.status = record.status;
        self.draft.last_saved = record.last_saved;
        self.draft.current_step = record.current_step;
        self.draft.submitted_at = record.submitted_at;
    }

    fn write_status_record(&mut self, record: &StatusRecord) -> bool {
        self.write_json(keys::APPLICATION_STATUS, record)
    }

    fn write_json<T: Serialize>(&mut self, key: &str, value: &T) -> bool {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(%key, error = %err, "failed to serialize session value");
                self.last_error = Some(err.to_string());
                return false;
            }
        };

        match self.store.set(key, &raw) {
            Ok(()) => true,
            Err(err) => {
                warn!(%key, error = %err, "session storage write failed");
                self.last_error = Some(err.to_string());
                false
            }
        }
    }

    fn read_json<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.store.get(key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(err) => {
                    warn!(%key, error = %err, "discarding corrupt session value");
                    T::default()
                }
            },
            Ok(None) => T::default(),
            Err(err) => {
                warn!(%key, error = %err, "session storage read failed");
                T::default()
            }
        }
    }
}
