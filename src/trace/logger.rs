use std::{
    fmt::Display,
    fs::{File, OpenOptions},
    io::{self, Write},
    sync::Mutex,
};

use tracing::warn;

use crate::trace::audit::AuditEvent;

/// JSONL audit trail of CLI commands.
///
/// Recording never fails the command being audited: an unopenable file
/// disables the trail and write errors are logged and dropped.
pub struct AuditLogger {
    sink: Option<Mutex<File>>,
}

impl AuditLogger {
    pub fn new(path: &str) -> Self {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Self {
                sink: Some(Mutex::new(file)),
            },
            Err(e) => {
                warn!(path, error = %e, "audit trail disabled");
                Self::disabled()
            }
        }
    }

    pub fn disabled() -> Self {
        Self { sink: None }
    }

    pub fn from_path(path: Option<&str>) -> Self {
        path.map(Self::new).unwrap_or_else(Self::disabled)
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub fn log(&self, event: &AuditEvent) {
        let Some(sink) = &self.sink else {
            return;
        };

        if let Err(e) = append(sink, event) {
            warn!(command = %event.command, error = %e, "audit event dropped");
        }
    }

    /// Pass `result` through, recording a `failed` event for `command` on error.
    ///
    /// Lets each command step bail out with `?` and still leave one record.
    pub fn check<T, E: Display>(&self, command: &str, result: Result<T, E>) -> Result<T, E> {
        if let Err(ref e) = result {
            self.log(&AuditEvent::now(command).failed(e));
        }
        result
    }
}

fn append(sink: &Mutex<File>, event: &AuditEvent) -> io::Result<()> {
    let line = serde_json::to_string(event)?;
    let mut file = sink
        .lock()
        .map_err(|_| io::Error::other("audit sink lock poisoned"))?;
    writeln!(file, "{}", line)
}
