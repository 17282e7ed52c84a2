//! Structured-event logging core for a chat-bot front end.
//!
//! Inbound chat events become immutable JSON-line records, routed to one of
//! three size-capped rotating log files (user actions, system events,
//! errors). Failures never cross the public boundary: they degrade through
//! the errors stream down to a console fallback.

pub mod error;
pub mod format;
pub mod logger;
pub mod record;
pub mod sink;
pub mod storage;
pub mod stream;

pub use error::{LogError, Result};
pub use logger::ActivityLogger;
pub use record::{ChatInfo, EventKind, EventRecord, InboundMessage, UserInfo};
pub use sink::{FailureSink, FallbackWrite};
pub use storage::config::{LogConfig, StreamConfig};
pub use storage::stats::ArtifactStats;
pub use stream::{route, Stream};
