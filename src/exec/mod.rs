// src/exec/mod.rs

//! Template resolution and command dispatch.
//!
//! - [`template`] expands `{{Name}}` placeholders in pipeline tokens.
//! - [`dispatcher`] decides how many times each pipeline runs for a drained
//!   batch and invokes it.
//! - [`spawn`] provides the `SpawnBackend` trait and the concrete
//!   `ProcessSpawner` used in production, which tests replace with a fake.
//!
//! Commands are fire-and-forget: spawned with inherited stdio, never awaited,
//! never inspected.

pub mod dispatcher;
pub mod spawn;
pub mod template;

pub use dispatcher::Dispatcher;
pub use spawn::{ProcessSpawner, SpawnBackend};
