use crate::record::EventKind;

/// One of the three logical log channels, each bound to one active artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    UserActions,
    SystemEvents,
    Errors,
}

impl Stream {
    pub const ALL: [Stream; 3] = [Stream::UserActions, Stream::SystemEvents, Stream::Errors];

    /// Base name of the stream's active artifact inside the log directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Stream::UserActions => "user_actions.log",
            Stream::SystemEvents => "system_events.log",
            Stream::Errors => "bot_errors.log",
        }
    }
}

/// Assign a record kind to its stream. Pure; every kind maps to exactly one
/// stream, so an error record can never land in a user or system artifact.
pub fn route(kind: EventKind) -> Stream {
    match kind {
        EventKind::BotError => Stream::Errors,
        EventKind::BotStarted | EventKind::BotStopped => Stream::SystemEvents,
        EventKind::Command | EventKind::TextMessage | EventKind::UnknownCommand => {
            Stream::UserActions
        }
    }
}
