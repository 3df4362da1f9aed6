// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod watch;

use std::path::PathBuf;

use tokio::sync::mpsc;

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::{ActiveSelection, WatchRegistry};
use crate::engine::{CoreEngine, Runtime};
use crate::errors::{Result, WatchrunError};
use crate::exec::{Dispatcher, ProcessSpawner};
use crate::watch::WatchTree;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and active-watch selection
/// - the notification source and watch tree (initial tree walk)
/// - debounce engine / dispatcher / runtime
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;

    let selection = ActiveSelection::parse(&args.watch);
    let registry = WatchRegistry::from_config(cfg, &selection)?;

    if args.dry_run {
        print_dry_run(&registry);
        return Ok(());
    }

    // Source directories must exist before the engine starts; anything that
    // vanishes later is handled by reconciliation.
    for (name, spec) in registry.active() {
        if !spec.source_dir.is_dir() {
            return Err(WatchrunError::ConfigError(format!(
                "watch '{}': source directory {:?} is not a directory",
                name, spec.source_dir
            )));
        }
    }

    let (source, channels) = watch::spawn_source()?;

    let mut tree = WatchTree::new(Box::new(source));
    for (name, spec) in registry.active() {
        tree.initialize(name, spec);
    }

    let engine = CoreEngine::new(registry.quiet_period());
    let dispatcher = Dispatcher::new(ProcessSpawner);

    // Ctrl-C → graceful loop exit. In-flight commands keep running.
    let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("failed to listen for Ctrl+C: {e}");
            return;
        }
        let _ = shutdown_tx.send(()).await;
    });

    let runtime = Runtime::new(
        registry,
        engine,
        tree,
        dispatcher,
        channels.changes,
        channels.errors,
        shutdown_rx,
    );
    runtime.run().await
}

/// Simple dry-run output: print the active watches and their pipelines.
fn print_dry_run(registry: &WatchRegistry) {
    println!("watchrun dry-run");
    println!("  quiet period: {:?}", registry.quiet_period());
    println!();

    for (name, spec) in registry.active() {
        println!("  - {name}");
        println!("      sourceDir: {}", spec.source_dir.display());
        if !spec.exclude.is_empty() {
            println!("      exclude: {:?}", spec.exclude);
        }
        for pipeline in &spec.pipelines {
            println!("      pipeline: {}", pipeline.join(" "));
        }
        if !spec.parameters.is_empty() {
            println!("      parameters: {:?}", spec.parameters);
        }
    }
}
