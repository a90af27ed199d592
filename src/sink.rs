//! Destinations for finished records.
//!
//! Every record reaches a sink as one complete buffer, so a sink only has to
//! make a single write atomic with respect to other writers.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Receiver of complete, newline-terminated records
pub trait Sink: Send + Sync {
    /// Write one record in full
    fn write_record(&self, record: &[u8]) -> io::Result<()>;
}

/// Process standard output
#[derive(Clone, Copy, Debug, Default)]
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn write_record(&self, record: &[u8]) -> io::Result<()> {
        // The lock is held for the whole record so lines never interleave.
        let mut stdout = io::stdout().lock();
        stdout.write_all(record)?;
        stdout.flush()
    }
}

/// In-memory sink; clones share the same buffer
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8
    pub fn contents(&self) -> String {
        match self.buffer.lock() {
            Ok(buffer) => String::from_utf8_lossy(&buffer).into_owned(),
            Err(poisoned) => String::from_utf8_lossy(&poisoned.into_inner()).into_owned(),
        }
    }

    /// Written records, without their line terminators
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn clear(&self) {
        match self.buffer.lock() {
            Ok(mut buffer) => buffer.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

impl Sink for MemorySink {
    fn write_record(&self, record: &[u8]) -> io::Result<()> {
        let mut buffer = self
            .buffer
            .lock()
            .map_err(|_| io::Error::other("memory sink poisoned"))?;
        buffer.extend_from_slice(record);
        Ok(())
    }
}
