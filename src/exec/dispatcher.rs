// src/exec/dispatcher.rs

//! Per-watch pipeline dispatch over a frozen event batch.

use std::path::Path;

use tracing::{info, warn};

use crate::config::WatchSpec;
use crate::engine::Batch;
use crate::exec::spawn::SpawnBackend;
use crate::exec::template;

/// Runs a watch's command pipelines against the batch drained from the
/// executing buffer.
#[derive(Debug)]
pub struct Dispatcher<S: SpawnBackend> {
    spawner: S,
}

impl<S: SpawnBackend> Dispatcher<S> {
    pub fn new(spawner: S) -> Self {
        Self { spawner }
    }

    /// Execute every pipeline of `spec`, in configured order.
    ///
    /// A pipeline whose raw tokens reference `{{EventName}}` is
    /// path-sensitive: it runs once per distinct changed path in the batch.
    /// Any other pipeline runs exactly once, with the first-iterated path
    /// bound (and unused) as the event name.
    pub fn dispatch_watch(&mut self, name: &str, spec: &WatchSpec, batch: &Batch) {
        for pipeline in &spec.pipelines {
            let path_sensitive = pipeline.iter().any(|t| template::references_event_name(t));

            if path_sensitive {
                for path in batch.keys() {
                    self.invoke(name, spec, pipeline, path);
                }
            } else if let Some(path) = batch.keys().next() {
                self.invoke(name, spec, pipeline, path);
            }
        }
    }

    /// Resolve one pipeline against one triggering path and spawn it.
    ///
    /// Spawn failures are logged and otherwise ignored; a failing command
    /// never aborts the remaining pipelines or watches.
    fn invoke(&mut self, name: &str, spec: &WatchSpec, pipeline: &[String], path: &Path) {
        let event_path = path.to_string_lossy();

        let mut tokens = pipeline
            .iter()
            .map(|token| template::resolve(spec, token, &event_path));
        let Some(program) = tokens.next() else {
            return;
        };
        let args: Vec<String> = tokens.collect();

        info!(watch = %name, program = %program, ?args, "running pipeline command");
        if let Err(err) = self.spawner.spawn(&program, &args) {
            warn!(
                watch = %name,
                program = %program,
                error = %err,
                "failed to spawn command"
            );
        }
    }
}
