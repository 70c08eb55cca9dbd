use async_trait::async_trait;
use logwire_core::Result;
use logwire_core::model::{LogQuery, LogRecord};

/// Common operation surface both transports implement. Callers hold a
/// `Box<dyn LogClient>` (or a generic) and never depend on a concrete
/// transport. Both calls are bounded by the caller: dropping the returned
/// future aborts the in-flight request, and per-client timeouts surface
/// as `DeadlineExceeded`/`Cancelled` rather than hanging.
#[async_trait]
pub trait LogClient {
    /// Transmits one record. Either the remote accepts it in full or the
    /// call fails as a whole; there is no partial-success state.
    async fn send_log(&self, record: &LogRecord) -> Result<()>;

    /// Retrieves records matching `query`. Ordering is whatever the
    /// server returned; an empty result set is success.
    async fn get_logs(&self, query: &LogQuery) -> Result<Vec<LogRecord>>;
}
