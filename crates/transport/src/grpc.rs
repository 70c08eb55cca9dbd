use std::time::Duration;

use async_trait::async_trait;
use logwire_core::model::{LogQuery, LogRecord};
use logwire_core::{ClientError, Result};
use tonic::transport::Channel;
use tonic::{Code, Request, Status};

use crate::client::LogClient;
use crate::convert::to_wire_i32;
use crate::pb;
use crate::pb::log_service_client::LogServiceClient;
use crate::time::{decode_timestamp, encode_timestamp};

/// Binary RPC transport. Holds one lazily-connected channel for the
/// client's lifetime. The channel is clone-based internally, so calls
/// borrow `&self`; a `close` racing an in-flight call is not additionally
/// locked here and relies on the channel's own guarantees.
pub struct GrpcClient {
    client: LogServiceClient<Channel>,
    timeout: Option<Duration>,
}

impl GrpcClient {
    /// Builds a client for `endpoint` (`host:port` or a full URI). The
    /// connection is established lazily on the first call.
    pub fn connect(endpoint: &str) -> Result<Self> {
        let channel = Channel::from_shared(normalize_endpoint(endpoint))
            .map_err(|e| ClientError::Network(format!("invalid gRPC endpoint {endpoint}: {e}")))?
            .connect_lazy();
        Ok(Self {
            client: LogServiceClient::new(channel),
            timeout: None,
        })
    }

    /// Applies a per-request deadline to every subsequent call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Releases the underlying channel. Dropping the client does the
    /// same; this makes the hand-back explicit at call sites.
    pub fn close(self) {}

    fn request<T>(&self, message: T) -> Request<T> {
        let mut request = Request::new(message);
        if let Some(timeout) = self.timeout {
            request.set_timeout(timeout);
        }
        request
    }
}

#[async_trait]
impl LogClient for GrpcClient {
    async fn send_log(&self, record: &LogRecord) -> Result<()> {
        let timestamp = encode_timestamp(&record.timestamp)?;
        let request = self.request(pb::SendLogRequest {
            log: Some(pb::Log {
                id: record.id.clone(),
                trace_id: record.trace_id.clone(),
                timestamp: Some(timestamp),
                level: record.level.clone(),
                service: record.service.clone(),
                message: record.message.clone(),
                metadata: record.metadata.clone(),
            }),
        });

        let mut client = self.client.clone();
        client
            .send_log(request)
            .await
            .map_err(|status| map_status("SendLog", &status))?;
        tracing::debug!(id = %record.id, "log sent via grpc");
        Ok(())
    }

    async fn get_logs(&self, query: &LogQuery) -> Result<Vec<LogRecord>> {
        // service/level are always populated: an empty string asks the
        // server to match the empty string, it does not drop the filter.
        let request = self.request(pb::GetLogsRequest {
            service: Some(query.service.clone()),
            level: Some(query.level.clone()),
            limit: to_wire_i32(query.limit)?,
            offset: to_wire_i32(query.offset)?,
            start_time: None,
            end_time: None,
        });

        let mut client = self.client.clone();
        let response = client
            .get_logs(request)
            .await
            .map_err(|status| map_status("GetLogs", &status))?;

        let wire_logs = response.into_inner().logs;
        tracing::debug!(count = wire_logs.len(), "logs fetched via grpc");
        wire_logs.into_iter().map(record_from_wire).collect()
    }
}

fn record_from_wire(log: pb::Log) -> Result<LogRecord> {
    // An unset wire timestamp decodes to "" rather than failing the call.
    let timestamp = decode_timestamp(log.timestamp.as_ref())?;
    Ok(LogRecord {
        id: log.id,
        trace_id: log.trace_id,
        timestamp,
        level: log.level,
        service: log.service,
        message: log.message,
        metadata: log.metadata,
    })
}

fn map_status(op: &str, status: &Status) -> ClientError {
    match status.code() {
        Code::Cancelled => ClientError::Cancelled(format!("{op}: {}", status.message())),
        Code::DeadlineExceeded => {
            ClientError::DeadlineExceeded(format!("{op}: {}", status.message()))
        }
        _ => ClientError::Network(format!("{op} via gRPC failed: {status}")),
    }
}

fn normalize_endpoint(endpoint: &str) -> String {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_string()
    } else {
        format!("http://{endpoint}")
    }
}
