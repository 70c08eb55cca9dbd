use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One structured log entry as understood by this client. The timestamp
/// stays RFC 3339 text in memory; transports convert it to their wire
/// form on the way out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    pub id: String,
    pub trace_id: String,
    pub timestamp: String,
    pub level: String,
    pub service: String,
    pub message: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// Per-call query constraints for `get_logs`. An empty `service` or
/// `level` is sent to the server as-is and matches the empty string,
/// it does not mean "unfiltered".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogQuery {
    pub service: String,
    pub level: String,
    pub limit: i64,
    pub offset: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_json_uses_camel_case() {
        let record = LogRecord {
            id: "1".to_string(),
            trace_id: "t-1".to_string(),
            timestamp: "2024-01-01T00:00:00Z".to_string(),
            level: "INFO".to_string(),
            service: "api".to_string(),
            message: "hello".to_string(),
            metadata: HashMap::from([("env".to_string(), "dev".to_string())]),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["traceId"], "t-1");
        assert_eq!(json["timestamp"], "2024-01-01T00:00:00Z");
        assert_eq!(json["metadata"]["env"], "dev");
    }

    #[test]
    fn record_decodes_without_metadata() {
        let record: LogRecord = serde_json::from_str(
            r#"{"id":"1","traceId":"t","timestamp":"2024-01-01T00:00:00Z",
                "level":"INFO","service":"api","message":"hi"}"#,
        )
        .unwrap();
        assert!(record.metadata.is_empty());
    }
}
