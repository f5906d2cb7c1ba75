//! Session controller for the vibeconnect chat widget.
//!
//! This crate owns everything about a chat session that is not the browser:
//! the connection-lifecycle state machine, the capped message log, the
//! interest/mutuality rules, and the save-flow trigger. It talks to the
//! outside world only through the [`Presenter`] and [`FrameSink`] ports, so
//! the whole behavior is unit-testable without a DOM or a socket.

pub mod controller;
pub mod message_log;
pub mod ports;

pub use controller::{ConnectionState, SessionConfig, SessionController};
pub use message_log::{LogEntry, MessageLog};
pub use ports::{FrameSink, InterestControl, Presenter};
