use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::LogError;
use crate::record::EventRecord;
use crate::storage::writer::RotatingWriter;

/// Terminal channel used when even the errors stream is unavailable.
/// Defaults to stderr; tests substitute a capturing closure.
pub type FallbackWrite = Box<dyn Fn(&str) + Send + Sync>;

/// Last-resort handler for failures inside the logging core.
///
/// A reported failure becomes a `bot_error` record on the errors stream.
/// If that append fails too, one line goes to the fallback channel and the
/// call returns. Never propagates anything to the caller.
pub struct FailureSink {
    errors: Arc<RotatingWriter>,
    fallback: FallbackWrite,
}

impl FailureSink {
    pub fn new(errors: Arc<RotatingWriter>) -> Self {
        FailureSink::with_fallback(errors, Box::new(|line| eprintln!("{}", line)))
    }

    pub fn with_fallback(errors: Arc<RotatingWriter>, fallback: FallbackWrite) -> Self {
        FailureSink { errors, fallback }
    }

    /// Record a failure that occurred during `context`.
    pub fn report(&self, context: &str, error: &LogError) {
        let mut additional = Map::new();
        additional.insert("context".to_string(), Value::from(context));
        let record = EventRecord::error(error.to_string(), None, Some(additional));
        match record.to_line() {
            Ok(line) => {
                if self.errors.append(&line).is_err() {
                    self.write_fallback(context, error);
                }
            }
            Err(_) => self.write_fallback(context, error),
        }
    }

    fn write_fallback(&self, context: &str, error: &LogError) {
        (self.fallback)(&format!("logging failure during {}: {}", context, error));
    }
}
