use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::domain::SubmissionPayload;
use crate::config::ApiConfig;

/// The `{success, message, data}` wrapper convention used by the portal
/// backend's responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Envelope {
    pub fn accepted(message: impl Into<String>, data: Value) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Transport-level failures; declared backend rejections come back as an
/// `Envelope` with `success = false` instead.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("transport failure talking to the portal API: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("portal API returned an undecodable response body")]
    Decode {
        #[source]
        source: reqwest::Error,
    },
    #[error("portal API returned unexpected status {status} with no envelope")]
    UnexpectedStatus { status: reqwest::StatusCode },
}

/// Outbound boundary for the submit-complete call, kept as a trait so tests
/// and the CLI demo can substitute in-memory doubles.
#[async_trait]
pub trait SubmissionClient: Send + Sync {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<Envelope, ClientError>;
}

/// HTTP implementation posting to `{base_url}/applications/submit-complete`.
pub struct HttpSubmissionClient {
    http: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpSubmissionClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bearer_token: config.bearer_token.clone(),
        })
    }

    pub fn from_parts(
        base_url: impl Into<String>,
        bearer_token: Option<String>,
    ) -> Result<Self, ClientError> {
        let base: String = base_url.into();
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base.trim_end_matches('/').to_string(),
            bearer_token,
        })
    }

    fn submit_url(&self) -> String {
        format!("{}/applications/submit-complete", self.base_url)
    }
}

#[async_trait]
impl SubmissionClient for HttpSubmissionClient {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<Envelope, ClientError> {
        let mut request = self.http.post(self.submit_url()).json(payload);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        // Declared rejections arrive as an envelope body regardless of the
        // HTTP status, so decode first and fall back on the status only
        // when there is no envelope to report.
        match response.json::<Envelope>().await {
            Ok(envelope) => Ok(envelope),
            Err(source) if status.is_success() => Err(ClientError::Decode { source }),
            Err(_) => Err(ClientError::UnexpectedStatus { status }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_tolerates_missing_optional_fields() {
        let envelope: Envelope =
            serde_json::from_str(r#"{"success": true}"#).expect("decodes sparse envelope");
        assert!(envelope.success);
        assert!(envelope.message.is_none());
        assert!(envelope.data.is_none());
    }

    #[test]
    fn submit_url_normalizes_trailing_slash() {
        let client = HttpSubmissionClient::from_parts("http://localhost:8080/api/v1/", None)
            .expect("client builds");
        assert_eq!(
            client.submit_url(),
            "http://localhost:8080/api/v1/applications/submit-complete"
        );
    }
}
