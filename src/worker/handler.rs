//! Fetch worker: runs provider calls on behalf of the controller.
//!
//! The worker owns the provider and turns each [`WorkerMessage`] into exactly
//! one [`WorkerResponse`]. Provider errors never escape: a failed catalog
//! batch becomes [`WorkerResponse::FetchFailed`] and failed recommendations
//! become an empty list.

use crate::provider::{MovieProvider, MovieQuery};
use crate::worker::{WorkerMessage, WorkerResponse};
use tracing::Instrument;

/// Stateless executor of worker messages.
#[derive(Debug)]
pub struct MovieWorker<P> {
    provider: P,
}

impl<P: MovieProvider> MovieWorker<P> {
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Reconstructs the issuing span's context so worker spans link to it.
    ///
    /// The returned guard must be held while the worker span is created.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }

    /// Processes a message and returns its response.
    pub async fn handle_message(&self, message: WorkerMessage) -> WorkerResponse {
        let span = {
            let _context_guard = Self::attach_parent_trace_context(&message);
            tracing::debug_span!("worker_handle_message", message_type = ?message)
        };

        match message {
            WorkerMessage::FetchMovies { ticket, .. } => {
                let query = MovieQuery::new(&ticket.query, ticket.genre, ticket.limit);
                async move {
                    match self.provider.fetch_movies(&query).await {
                        Ok(movies) => {
                            tracing::debug!(ticket = ticket.id, count = movies.len(), "batch fetched");
                            WorkerResponse::MoviesFetched { ticket, movies }
                        }
                        Err(e) => {
                            tracing::debug!(ticket = ticket.id, error = %e, "batch failed");
                            WorkerResponse::FetchFailed {
                                ticket,
                                message: e.to_string(),
                            }
                        }
                    }
                }
                .instrument(span)
                .await
            }
            WorkerMessage::FetchRecommendations {
                request,
                movie_id,
                title,
                count,
                ..
            } => {
                async move {
                    let movies = self
                        .provider
                        .recommend(&title, count)
                        .await
                        .unwrap_or_else(|e| {
                            tracing::debug!(movie_id = %movie_id, error = %e, "recommendations unavailable");
                            Vec::new()
                        });
                    WorkerResponse::RecommendationsFetched {
                        request,
                        movie_id,
                        movies,
                    }
                }
                .instrument(span)
                .await
            }
        }
    }
}
