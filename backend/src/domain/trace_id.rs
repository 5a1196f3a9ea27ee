//! Correlation id for one HTTP request.
//!
//! The [`Trace`](crate::Trace) middleware mints a [`TraceId`] per request and
//! runs the handler inside [`TraceId::scope`]. Anything on that task, such as
//! building an error payload, reads it back with [`TraceId::current`]. The
//! same value is echoed in the [`TRACE_ID_HEADER`] response header.
//!
//! The id lives in a Tokio task-local, so `tokio::spawn`ed work starts
//! without one unless it is wrapped in `TraceId::scope` again.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

/// Response header echoing the request's trace id.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static CURRENT: TraceId;
}

/// Random UUID tagging every log line and error body of one request.
///
/// ```
/// use skillswap::domain::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let id = TraceId::generate();
/// let seen = TraceId::scope(id, async { TraceId::current() }).await;
/// assert_eq!(seen, Some(id));
/// assert_eq!(TraceId::current(), None);
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The id of the request being served on this task, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` as the current id.
    pub fn scope<Fut: Future>(trace_id: Self, fut: Fut) -> impl Future<Output = Fut::Output> {
        CURRENT.scope(trace_id, fut)
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(raw).map(Self)
    }
}
