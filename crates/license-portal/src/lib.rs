//! Client-side session state and submission pipeline for the driver's-license
//! application portal.
//!
//! The portal's multi-step wizard keeps a partially-filled draft in
//! session-scoped storage, reshapes it into the backend's payload on the final
//! step, and posts it to the submit-complete endpoint. This crate owns that
//! whole concern: the [`workflows::licensing::store::SessionStore`] abstraction
//! over draft persistence, the mapper/validator that produces a
//! [`workflows::licensing::domain::SubmissionPayload`], and the
//! [`workflows::licensing::client::SubmissionClient`] that carries it over
//! the wire.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
