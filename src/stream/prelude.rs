//! Common imports for building pull-stream pipelines.
//!
//! ```rust
//! use pullhooks::stream::prelude::*;
//! ```

pub use crate::stream::{
    collect, drain, empty, fail, from_fn, into_stream, map, pull, values, BoxSource, Callback,
    End, Flow, Pipeline, Sink, Source, SourceExt, Step, Through,
};
