//! Adapters between single-shot callbacks and pull streams.
//!
//! - [`create_source`] turns one value into a one-shot reader.
//! - [`create_sink`] turns a `done` completion callback into a sink.
//! - [`create_send`] turns a named-action dispatch function into transform
//!   stages whose replies answer the downstream pull.
//!
//! Each adapter instance owns its own state and is used for exactly one
//! pipeline.

mod send;
mod sink;
mod source;

pub use send::{create_send, Dispatch, Reply, SendAdapter, SendThrough};
pub use sink::{create_sink, DoneSink};
pub use source::{create_source, Once};
