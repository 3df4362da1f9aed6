// src/exec/spawn.rs

use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::errors::Result;

/// Trait abstracting the process-spawn primitive.
///
/// Production code uses [`ProcessSpawner`]; tests can provide their own
/// implementation that records invocations instead of running real
/// processes.
pub trait SpawnBackend: Send {
    /// Spawn `program` with `args`, inheriting standard output/error.
    ///
    /// Must return without waiting for the child; callers never consume the
    /// exit status.
    fn spawn(&mut self, program: &str, args: &[String]) -> Result<()>;
}

/// Real spawn backend used in production.
#[derive(Debug, Default)]
pub struct ProcessSpawner;

impl SpawnBackend for ProcessSpawner {
    fn spawn(&mut self, program: &str, args: &[String]) -> Result<()> {
        let mut child = Command::new(program)
            .args(args)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()?;

        // Nobody consumes the status; reap the child in the background so
        // finished processes don't linger as zombies.
        tokio::spawn(async move {
            let _ = child.wait().await;
        });

        debug!(program = %program, "spawned command");
        Ok(())
    }
}
