use std::sync::{Arc, Mutex};

use watchrun::errors::{Result, WatchrunError};
use watchrun::exec::SpawnBackend;

/// A fake spawn backend that records each invocation's full argv instead of
/// running a process.
///
/// Invocations are recorded even when the spawner is configured to fail, so
/// tests can assert that a failing command did not halt later pipelines.
pub struct FakeSpawner {
    invocations: Arc<Mutex<Vec<Vec<String>>>>,
    fail_program: Option<String>,
}

impl FakeSpawner {
    pub fn new(invocations: Arc<Mutex<Vec<Vec<String>>>>) -> Self {
        Self {
            invocations,
            fail_program: None,
        }
    }

    /// Fail any spawn whose program equals `program`.
    pub fn failing_for(invocations: Arc<Mutex<Vec<Vec<String>>>>, program: &str) -> Self {
        Self {
            invocations,
            fail_program: Some(program.to_string()),
        }
    }
}

impl SpawnBackend for FakeSpawner {
    fn spawn(&mut self, program: &str, args: &[String]) -> Result<()> {
        let mut argv = vec![program.to_string()];
        argv.extend(args.iter().cloned());
        self.invocations.lock().unwrap().push(argv);

        if self.fail_program.as_deref() == Some(program) {
            return Err(WatchrunError::IoError(std::io::Error::other(
                "fake spawn failure",
            )));
        }
        Ok(())
    }
}
