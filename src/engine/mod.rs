// src/engine/mod.rs

//! Event accumulation, debouncing, and the ingestion/scheduling loop.
//!
//! Layered the same way throughout:
//! - [`queue`]: the two alternating buffers (listening / executing).
//! - [`core`]: the pure debounce state machine over the queue; no IO, the
//!   clock is always passed in.
//! - [`runtime`]: the async shell that multiplexes change events, source
//!   errors, and scheduler ticks, and runs dispatch synchronously.

pub mod core;
pub mod queue;
pub mod runtime;

pub use self::core::CoreEngine;
pub use queue::{Batch, BufferLabel, EventQueue, WatchName};
pub use runtime::{Runtime, TICK_INTERVAL};
