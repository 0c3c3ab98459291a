//! Fetch worker message types.
//!
//! Requests flow from the controller to the worker as [`WorkerMessage`]s and
//! come back as [`WorkerResponse`]s. Every catalog request carries a
//! [`FetchTicket`] describing the state it was issued for; the controller uses
//! it to recognize and drop stale answers. Messages also carry the issuing
//! span's trace context so worker spans join the controller's trace.

use crate::domain::{Genre, Movie};

/// Distributed tracing context for cross-task span propagation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across tasks.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span IDs of the current tracing span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the current
    /// span context is invalid.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Whether a catalog batch replaces the movie list or extends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// First page for a (query, genre) pair; the answer replaces `movies`.
    Replace,
    /// Subsequent page; the answer is appended to `movies`.
    Append,
}

/// Snapshot of the catalog state a request was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    /// Monotonic request number, unique per controller.
    pub id: u64,
    /// Effective search text at issue time.
    pub query: String,
    pub genre: Genre,
    pub page: u32,
    pub mode: FetchMode,
    /// Batch size asked of the provider.
    pub limit: usize,
}

/// Macro to generate builder methods for `WorkerMessage` variants.
///
/// Generates constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    fetch_movies(FetchMovies { ticket: FetchTicket }),
    fetch_recommendations(FetchRecommendations { request: u64, movie_id: String, title: String, count: usize }),
}

/// Requests sent from the controller to the fetch worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerMessage {
    /// Fetch one catalog batch.
    FetchMovies {
        ticket: FetchTicket,

        trace_context: Option<TraceContext>,
    },

    /// Fetch movies similar to the selected one.
    FetchRecommendations {
        /// Detail-pane opening this request belongs to.
        request: u64,
        /// Id of the movie the recommendations are for.
        movie_id: String,
        title: String,
        count: usize,

        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Trace context captured when the message was built.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::FetchMovies { trace_context, .. }
            | Self::FetchRecommendations { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Responses sent from the fetch worker back to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerResponse {
    /// A catalog batch arrived (possibly empty).
    MoviesFetched {
        ticket: FetchTicket,
        movies: Vec<Movie>,
    },

    /// A catalog batch could not be fetched.
    FetchFailed {
        ticket: FetchTicket,
        /// Diagnostic detail, logged but never shown to the user.
        message: String,
    },

    /// Recommendations for `movie_id`, echoing the request number they
    /// answer. Failures arrive as an empty list.
    RecommendationsFetched {
        request: u64,
        movie_id: String,
        movies: Vec<Movie>,
    },
}
