// src/engine/runtime.rs

use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::config::WatchRegistry;
use crate::engine::core::CoreEngine;
use crate::errors::Result;
use crate::exec::{Dispatcher, SpawnBackend};
use crate::watch::{ChangeEvent, WatchTree};

/// Interval between scheduler ticks; the only point where dispatch runs.
pub const TICK_INTERVAL: Duration = Duration::from_millis(150);

/// The ingestion/scheduling loop: an IO shell around [`CoreEngine`].
///
/// One long-lived task multiplexes three sources in priority order — a
/// pending change event, a pending source error, and (only when neither is
/// immediately available) the periodic tick. Ingestion and error handling
/// never block; dispatch runs synchronously on this same task, so at most one
/// dispatch is ever in flight and the buffers and watch tree have a single
/// writer.
pub struct Runtime<S: SpawnBackend> {
    registry: WatchRegistry,
    engine: CoreEngine,
    tree: WatchTree,
    dispatcher: Dispatcher<S>,
    changes_rx: mpsc::UnboundedReceiver<ChangeEvent>,
    errors_rx: mpsc::UnboundedReceiver<notify::Error>,
    shutdown_rx: mpsc::Receiver<()>,
}

impl<S: SpawnBackend> std::fmt::Debug for Runtime<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

impl<S: SpawnBackend> Runtime<S> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        registry: WatchRegistry,
        engine: CoreEngine,
        tree: WatchTree,
        dispatcher: Dispatcher<S>,
        changes_rx: mpsc::UnboundedReceiver<ChangeEvent>,
        errors_rx: mpsc::UnboundedReceiver<notify::Error>,
        shutdown_rx: mpsc::Receiver<()>,
    ) -> Self {
        Self {
            registry,
            engine,
            tree,
            dispatcher,
            changes_rx,
            errors_rx,
            shutdown_rx,
        }
    }

    /// Main loop. Runs until shutdown is requested; in-flight spawned
    /// commands are neither tracked nor killed.
    pub async fn run(mut self) -> Result<()> {
        info!("watchrun runtime started");

        let mut tick = tokio::time::interval(TICK_INTERVAL);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;

                Some(event) = self.changes_rx.recv() => {
                    self.ingest(event, Instant::now());
                }

                Some(err) = self.errors_rx.recv() => {
                    error!(error = %err, "notification source error");
                }

                Some(()) = self.shutdown_rx.recv() => {
                    info!("shutdown requested, stopping runtime");
                    break;
                }

                _ = tick.tick() => {
                    self.on_tick(Instant::now())?;
                }
            }
        }

        info!("watchrun runtime exiting");
        Ok(())
    }

    /// Append one classified change to the listening buffer of every active
    /// watch whose source directory covers the path. Restarts the quiet
    /// timer even when no watch matches.
    pub fn ingest(&mut self, event: ChangeEvent, now: Instant) {
        debug!(path = ?event.path, kind = %event.kind, "change event");

        self.engine.observe_event(now);
        for (name, spec) in self.registry.active() {
            if event.path.starts_with(&spec.source_dir) {
                self.engine.record(name, &event.path, event.kind);
            }
        }
    }

    /// One scheduler tick: run a full dispatch cycle if the quiet period has
    /// elapsed. The listening buffer keeps accepting events for the whole
    /// cycle; each watch's frozen batch is executed, reconciled against the
    /// watch tree, and cleared before the next watch is taken.
    pub fn on_tick(&mut self, now: Instant) -> Result<()> {
        if !self.engine.should_dispatch(now) {
            return Ok(());
        }

        self.engine.begin_dispatch();
        debug!("quiet period elapsed; dispatching accumulated events");

        while let Some((name, batch)) = self.engine.next_batch() {
            match self.registry.spec(&name) {
                Some(spec) => {
                    self.dispatcher.dispatch_watch(&name, spec, &batch);
                    self.tree.reconcile(&name, spec, &batch)?;
                }
                None => {
                    warn!(watch = %name, "batch for unknown watch; dropping");
                }
            }
        }

        self.engine.finish_dispatch();
        Ok(())
    }

    /// Read access to the engine, for inspection in tests.
    pub fn engine(&self) -> &CoreEngine {
        &self.engine
    }

    /// Read access to the watch tree, for inspection in tests.
    pub fn tree(&self) -> &WatchTree {
        &self.tree
    }
}
