//! logfmt encoding and the key-value view of a logger.
//!
//! A record is a single line of space-separated `key=value` pairs. Keys lose
//! any character that would break the pair syntax; values that contain such
//! characters are quoted and escaped instead.

use std::fmt::{self, Display, Write as _};
use std::sync::Arc;

use crate::clock::{self, Clock};
use crate::logger::Level;
use crate::sink::Sink;
use crate::{Error, Result, kv};

/// One caller-supplied pair, rendered through `Display`
pub type KeyValue<'a> = (&'a str, &'a dyn Display);

fn is_special(c: char) -> bool {
    c <= ' ' || c == '=' || c == '"' || c == char::REPLACEMENT_CHARACTER
}

/// Streaming logfmt encoder over an in-memory line.
///
/// Pairs are appended with [`encode_keyval`](Encoder::encode_keyval) and the
/// record is closed with [`end_record`](Encoder::end_record).
#[derive(Debug, Default)]
pub struct Encoder {
    buf: String,
    needs_sep: bool,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one pair.
    ///
    /// Fails with [`Error::InvalidKey`] when the key is empty once special
    /// characters are stripped; nothing is written in that case.
    pub fn encode_keyval(&mut self, key: &str, value: &dyn Display) -> Result<()> {
        let cleaned: String = key.chars().filter(|c| !is_special(*c)).collect();
        if cleaned.is_empty() {
            return Err(Error::InvalidKey(key.to_string()));
        }

        if self.needs_sep {
            self.buf.push(' ');
        }
        self.buf.push_str(&cleaned);
        self.buf.push('=');
        write_value(&mut self.buf, &value.to_string());
        self.needs_sep = true;
        Ok(())
    }

    /// Append pairs in order, stopping at the first invalid key.
    pub fn encode_keyvals(&mut self, pairs: &[KeyValue<'_>]) -> Result<()> {
        for (key, value) in pairs {
            self.encode_keyval(key, *value)?;
        }
        Ok(())
    }

    /// Terminate the current record with a line break.
    pub fn end_record(&mut self) {
        self.buf.push('\n');
        self.needs_sep = false;
    }

    /// Encoded bytes so far
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

fn write_value(buf: &mut String, value: &str) {
    if value == "null" || value.contains(is_special) {
        write_quoted(buf, value);
    } else {
        buf.push_str(value);
    }
}

fn write_quoted(buf: &mut String, value: &str) {
    buf.push('"');
    for c in value.chars() {
        match c {
            '\\' => buf.push_str("\\\\"),
            '"' => buf.push_str("\\\""),
            '\n' => buf.push_str("\\n"),
            '\r' => buf.push_str("\\r"),
            '\t' => buf.push_str("\\t"),
            c if c < ' ' => {
                let _ = write!(buf, "\\u{:04x}", c as u32);
            }
            c => buf.push(c),
        }
    }
    buf.push('"');
}

/// Key-value view of a [`Logger`](crate::Logger), sharing its context
#[derive(Clone)]
pub struct LogFmt {
    context: String,
    time_format: Arc<str>,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn Sink>,
}

impl LogFmt {
    pub(crate) fn new(
        context: String,
        time_format: Arc<str>,
        clock: Arc<dyn Clock>,
        sink: Arc<dyn Sink>,
    ) -> Self {
        Self {
            context,
            time_format,
            clock,
            sink,
        }
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    /// Write a `level=info` record followed by `pairs` in order.
    pub fn infof(&self, pairs: &[KeyValue<'_>]) {
        self.log(Level::Info, pairs);
    }

    /// Write a `level=error` record followed by `pairs` in order.
    pub fn errorf(&self, pairs: &[KeyValue<'_>]) {
        self.log(Level::Error, pairs);
    }

    /// Write a record at any level; errors are discarded.
    pub fn log(&self, level: Level, pairs: &[KeyValue<'_>]) {
        let record = self.render(level, pairs);
        let _ = self.sink.write_record(record.as_bytes());
    }

    /// Build the full record line.
    ///
    /// An invalid caller key truncates the caller pairs; the record is still
    /// terminated.
    pub fn render(&self, level: Level, pairs: &[KeyValue<'_>]) -> String {
        let time = clock::timestamp(self.clock.as_ref(), &self.time_format);

        let mut encoder = Encoder::new();
        let _ = encoder.encode_keyvals(kv!(
            "time" => time,
            "level" => level.as_key(),
            "context" => self.context,
        ));
        let _ = encoder.encode_keyvals(pairs);
        encoder.end_record();
        encoder.into_string()
    }
}

impl fmt::Debug for LogFmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogFmt")
            .field("context", &self.context)
            .field("time_format", &self.time_format)
            .finish_non_exhaustive()
    }
}
