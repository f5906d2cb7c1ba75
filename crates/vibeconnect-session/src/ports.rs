//! Ports through which the controller reaches the host environment.

use crate::message_log::LogEntry;
use vibeconnect_protocol::OutboundFrame;

/// Desired state of the "Interested" control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterestControl {
    /// Disabled, labelled "Interested (unlock after 5 messages)".
    Locked,
    /// Enabled, labelled "Interested".
    Unlocked,
    /// Disabled again after the local click, labelled "Interested ✓".
    Confirmed,
}

/// Presentation port: everything the controller needs from the UI host.
///
/// A browser implementation maps these onto DOM mutations; tests record the
/// calls instead. Implementations are expected to tolerate missing surface
/// (guest pages have no interest control, no save form).
pub trait Presenter {
    /// Update the connection status label.
    fn set_status(&mut self, text: &str);

    /// Update the partner-info label.
    fn set_partner_label(&mut self, text: &str);

    /// Append one entry to the visible message log.
    fn show_log_entry(&mut self, entry: &LogEntry);

    /// Drop the oldest visible log entry (cap eviction).
    fn remove_oldest_entry(&mut self);

    /// Clear the visible message log.
    fn clear_log(&mut self);

    /// Clear the chat input after a successful send.
    fn clear_input(&mut self);

    /// Move the "Interested" control into the given state.
    fn set_interest_control(&mut self, state: InterestControl);

    /// Submit the hidden save form with the partner's identity.
    fn submit_connection(&mut self, user_id: &str, nickname: &str);
}

/// Outbound transport port.
pub trait FrameSink {
    fn send(&mut self, frame: OutboundFrame);
}
