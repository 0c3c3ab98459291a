//! Background fetch worker.
//!
//! Provider calls run as spawned tasks so the controller's event loop keeps
//! handling input while a batch is in flight.
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::MovieWorker;
pub use messages::{FetchMode, FetchTicket, TraceContext, WorkerMessage, WorkerResponse};
