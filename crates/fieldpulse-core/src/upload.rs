//! Snapshot upload to a Firebase-style realtime database over its REST
//! interface.
//!
//! Records are appended with `POST {base}/sensorData/{identity}.json`,
//! which returns `{"name": "<push-id>"}`. The whole node for an identity
//! can be dropped with a single DELETE.

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::snapshot::SampleSnapshot;

/// Root node all identities live under.
const RECORD_ROOT: &str = "sensorData";

/// Errors from talking to the remote store.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("transport error")]
    Transport(#[from] reqwest::Error),
    #[error("remote store returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("remote store response did not contain a record id")]
    MalformedResponse,
}

/// Destination for assembled snapshots.
pub trait RecordSink: Send + Sync {
    /// Append a snapshot under `identity`. Returns the server-assigned
    /// record id.
    fn append(&self, identity: &str, snapshot: &SampleSnapshot) -> Result<String, SinkError>;

    /// Delete every record stored under `identity`.
    fn delete_all(&self, identity: &str) -> Result<(), SinkError>;
}

#[derive(Deserialize)]
struct PushResponse {
    name: Option<String>,
}

/// Realtime-database REST sink.
pub struct RtdbSink {
    client: reqwest::blocking::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl RtdbSink {
    pub fn new(base_url: impl Into<String>, auth_token: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::blocking::Client::new(),
            base_url,
            auth_token,
        }
    }

    fn node_url(&self, identity: &str) -> String {
        let mut url = format!("{}/{RECORD_ROOT}/{identity}.json", self.base_url);
        if let Some(token) = &self.auth_token {
            url.push_str("?auth=");
            url.push_str(token);
        }
        url
    }

    fn check_status(response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response, SinkError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SinkError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

impl RecordSink for RtdbSink {
    fn append(&self, identity: &str, snapshot: &SampleSnapshot) -> Result<String, SinkError> {
        let url = self.node_url(identity);
        let response = self.client.post(&url).json(snapshot).send()?;
        let response = Self::check_status(response)?;
        let parsed: PushResponse = response.json()?;
        let record_id = parsed.name.ok_or(SinkError::MalformedResponse)?;
        debug!("appended record {record_id} under {identity}");
        Ok(record_id)
    }

    fn delete_all(&self, identity: &str) -> Result<(), SinkError> {
        let url = self.node_url(identity);
        let response = self.client.delete(&url).send()?;
        Self::check_status(response)?;
        debug!("deleted all records under {identity}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_url_without_token() {
        let sink = RtdbSink::new("https://db.example.com", None);
        assert_eq!(
            sink.node_url("uid-1"),
            "https://db.example.com/sensorData/uid-1.json"
        );
    }

    #[test]
    fn node_url_with_token() {
        let sink = RtdbSink::new("https://db.example.com", Some("secret".into()));
        assert_eq!(
            sink.node_url("uid-1"),
            "https://db.example.com/sensorData/uid-1.json?auth=secret"
        );
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let sink = RtdbSink::new("https://db.example.com/", None);
        assert_eq!(
            sink.node_url("u"),
            "https://db.example.com/sensorData/u.json"
        );
    }
}
