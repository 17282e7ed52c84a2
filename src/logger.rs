use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::Result;
use crate::record::{truncate_text, EventKind, EventRecord, InboundMessage};
use crate::sink::{FailureSink, FallbackWrite};
use crate::storage::config::LogConfig;
use crate::storage::paths;
use crate::storage::stats::{self, ArtifactStats};
use crate::storage::writer::RotatingWriter;
use crate::stream::{route, Stream};

/// The logging core: three rotating stream writers plus the failure sink.
///
/// Constructed explicitly via [`ActivityLogger::open`] rather than living as
/// process-global state, so tests (and embedders) can run several independent
/// instances over separate directories.
///
/// Every `log_*` entry point either persists exactly one record or reports
/// the failure through the sink and returns; nothing here panics or
/// propagates an error to the routing layer.
pub struct ActivityLogger {
    dir: PathBuf,
    user_actions: Arc<RotatingWriter>,
    system_events: Arc<RotatingWriter>,
    errors: Arc<RotatingWriter>,
    sink: FailureSink,
}

impl ActivityLogger {
    /// Create the log directory if absent and bind the three stream writers.
    /// Artifacts themselves appear on first write.
    pub fn open(config: LogConfig) -> Result<Self> {
        Self::open_with_fallback(config, Box::new(|line| eprintln!("{}", line)))
    }

    /// Like [`ActivityLogger::open`] with a custom terminal fallback channel,
    /// so tests can observe last-resort failure reports.
    pub fn open_with_fallback(config: LogConfig, fallback: FallbackWrite) -> Result<Self> {
        paths::create_log_dir(&config.dir)?;
        let user_actions = Arc::new(RotatingWriter::new(
            &config.dir,
            Stream::UserActions,
            config.stream(Stream::UserActions),
        ));
        let system_events = Arc::new(RotatingWriter::new(
            &config.dir,
            Stream::SystemEvents,
            config.stream(Stream::SystemEvents),
        ));
        let errors = Arc::new(RotatingWriter::new(
            &config.dir,
            Stream::Errors,
            config.stream(Stream::Errors),
        ));
        let sink = FailureSink::with_fallback(errors.clone(), fallback);
        Ok(ActivityLogger {
            dir: config.dir,
            user_actions,
            system_events,
            errors,
            sink,
        })
    }

    /// Flush all streams and release the core. Artifacts stay on disk.
    pub fn close(self) {
        for stream in Stream::ALL {
            if let Err(e) = self.writer(stream).flush() {
                self.sink.report("close", &e);
            }
        }
    }

    /// Record a command invocation, e.g. `/start`.
    pub fn log_command(&self, message: &InboundMessage, command_name: &str) {
        self.submit(EventRecord::user_action(
            EventKind::Command,
            command_name,
            message,
            None,
        ));
    }

    /// Record a free-text message. The text is cut to 100 code points; the
    /// full text is never persisted.
    pub fn log_text_message(&self, message: &InboundMessage) {
        self.submit(EventRecord::user_action(
            EventKind::TextMessage,
            truncate_text(&message.text),
            message,
            None,
        ));
    }

    /// Record a command the routing layer did not recognize.
    pub fn log_unknown_command(&self, message: &InboundMessage) {
        self.submit(EventRecord::user_action(
            EventKind::UnknownCommand,
            message.text.clone(),
            message,
            None,
        ));
    }

    /// Record a lifecycle or other system event.
    pub fn log_system_event(
        &self,
        kind: EventKind,
        description: &str,
        additional_data: Option<Map<String, Value>>,
    ) {
        self.submit(EventRecord::system_event(kind, description, additional_data));
    }

    pub fn log_bot_started(&self) {
        self.log_system_event(EventKind::BotStarted, "Bot started", None);
    }

    pub fn log_bot_stopped(&self) {
        self.log_system_event(EventKind::BotStopped, "Bot stopped", None);
    }

    /// Record an error, optionally tied to a user and with structured context.
    pub fn log_error(
        &self,
        message: &str,
        user_id: Option<i64>,
        additional_data: Option<Map<String, Value>>,
    ) {
        self.submit(EventRecord::error(message, user_id, additional_data));
    }

    /// Size and last-modified time of every artifact in the log directory.
    /// Returns an empty map when the directory cannot be read; the caller
    /// shows "unavailable" instead of an error.
    pub fn stats(&self) -> BTreeMap<String, ArtifactStats> {
        match stats::collect(&self.dir) {
            Ok(map) => map,
            Err(e) => {
                self.sink.report("stats", &e);
                BTreeMap::new()
            }
        }
    }

    fn submit(&self, record: EventRecord) {
        let stream = route(record.kind);
        let line = match record.to_line() {
            Ok(line) => line,
            Err(e) => {
                self.sink.report("serialize", &e);
                return;
            }
        };
        if let Err(e) = self.writer(stream).append(&line) {
            self.sink
                .report(&format!("append to {}", stream.file_name()), &e);
        }
    }

    fn writer(&self, stream: Stream) -> &RotatingWriter {
        match stream {
            Stream::UserActions => &self.user_actions,
            Stream::SystemEvents => &self.system_events,
            Stream::Errors => &self.errors,
        }
    }
}
