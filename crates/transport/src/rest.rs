use std::time::Duration;

use async_trait::async_trait;
use logwire_core::model::{LogQuery, LogRecord};
use logwire_core::{ClientError, Result};
use reqwest::StatusCode;
use serde::Serialize;

use crate::client::LogClient;
use crate::convert::to_wire_i32;

/// JSON/HTTP transport. Stateless apart from the pooled reqwest client;
/// there is nothing to close.
pub struct RestClient {
    endpoint: String,
    http: reqwest::Client,
}

/// Request envelope for POST /api/logs. The response side is a bare
/// array, asymmetric by wire contract.
#[derive(Serialize)]
struct SendLogBody<'a> {
    log: &'a LogRecord,
}

impl RestClient {
    /// Builds a client for `endpoint`, e.g. `http://localhost:8080`.
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Like `new`, with a client-wide request deadline. Requests that
    /// exceed it fail with `DeadlineExceeded`.
    pub fn with_timeout(endpoint: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Network(format!("building HTTP client: {e}")))?;
        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            http,
        })
    }
}

#[async_trait]
impl LogClient for RestClient {
    async fn send_log(&self, record: &LogRecord) -> Result<()> {
        let url = format!("{}/api/logs", self.endpoint);
        let response = self
            .http
            .post(&url)
            .json(&SendLogBody { log: record })
            .send()
            .await
            .map_err(|e| map_send_error("SendLog", &e))?;

        if response.status() != StatusCode::OK {
            return Err(ClientError::UnexpectedStatus(response.status().to_string()));
        }
        tracing::debug!(id = %record.id, "log sent via rest");
        Ok(())
    }

    async fn get_logs(&self, query: &LogQuery) -> Result<Vec<LogRecord>> {
        let limit = to_wire_i32(query.limit)?;
        let offset = to_wire_i32(query.offset)?;

        // All four parameters are always present; an empty service or
        // level filters for the empty string rather than disappearing.
        let url = format!("{}/api/logs", self.endpoint);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("service", query.service.clone()),
                ("level", query.level.clone()),
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
            ])
            .send()
            .await
            .map_err(|e| map_send_error("GetLogs", &e))?;

        let logs: Vec<LogRecord> = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(format!("GetLogs response body: {e}")))?;
        tracing::debug!(count = logs.len(), "logs fetched via rest");
        Ok(logs)
    }
}

fn map_send_error(op: &str, e: &reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::DeadlineExceeded(format!("{op}: {e}"))
    } else {
        ClientError::Network(format!("{op} via REST failed: {e}"))
    }
}
