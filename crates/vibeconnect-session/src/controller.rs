//! The session controller: one live connection's worth of widget state.

use crate::message_log::{LogEntry, MessageLog};
use crate::ports::{FrameSink, InterestControl, Presenter};
use vibeconnect_protocol::{InboundFrame, OutboundFrame};

/// Visible log keeps the 5 most recent entries.
pub const LOG_CAP: usize = 5;

/// Messages exchanged before the "Interested" control unlocks.
pub const INTEREST_THRESHOLD: u32 = 5;

pub const STATUS_CONNECTED: &str = "Connected ✅";
pub const STATUS_DISCONNECTED: &str = "Disconnected ❌ (refresh page)";
pub const FINDING_MATCH: &str = "Finding match...";
pub const MUTUAL_INTEREST_NOTICE: &str = "✅ Mutual Interested! Saving connection...";
pub const PARTNER_INTEREST_NOTICE: &str = "Partner clicked Interested.";

const UNKNOWN_NICKNAME: &str = "Unknown";

/// Connection lifecycle. `Disconnected` is terminal; the widget offers no
/// reconnect beyond a full page reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Connected,
    Disconnected,
}

/// Host-provided configuration, read once at startup.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionConfig {
    /// Guest (unauthenticated) mode: the interest/save feature is disabled.
    pub guest: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PartnerIdentity {
    nickname: String,
    user_id: String,
}

/// Per-session state machine behind the chat widget.
///
/// All entry points run to completion on the host's single event thread:
/// socket frames arrive through [`handle_frame`](Self::handle_frame), user
/// input through [`send_chat`](Self::send_chat), [`skip`](Self::skip) and
/// [`express_interest`](Self::express_interest).
pub struct SessionController<P: Presenter, S: FrameSink> {
    config: SessionConfig,
    state: ConnectionState,
    partner: Option<PartnerIdentity>,
    log: MessageLog,
    message_count: u32,
    self_interested: bool,
    partner_interested: bool,
    connection_saved: bool,
    presenter: P,
    sink: S,
}

impl<P: Presenter, S: FrameSink> SessionController<P, S> {
    pub fn new(config: SessionConfig, presenter: P, sink: S) -> Self {
        Self {
            config,
            state: ConnectionState::Connecting,
            partner: None,
            log: MessageLog::new(LOG_CAP),
            message_count: 0,
            self_interested: false,
            partner_interested: false,
            connection_saved: false,
            presenter,
            sink,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn message_count(&self) -> u32 {
        self.message_count
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The socket opened successfully.
    pub fn handle_open(&mut self) {
        log::info!("chat socket connected");
        self.state = ConnectionState::Connected;
        self.presenter.set_status(STATUS_CONNECTED);
        self.presenter.set_partner_label(FINDING_MATCH);
    }

    /// The socket closed or errored. Terminal; no retry.
    pub fn handle_close(&mut self) {
        log::info!("chat socket closed");
        self.state = ConnectionState::Disconnected;
        self.presenter.set_status(STATUS_DISCONNECTED);
        self.presenter.set_partner_label("");
    }

    /// Dispatch one inbound wire frame.
    pub fn handle_frame(&mut self, raw: &str) {
        log::debug!("inbound frame: {:?}", raw);
        match InboundFrame::decode(raw) {
            InboundFrame::Sys { text } => self.push_entry(LogEntry::system(text)),
            InboundFrame::Match { nickname, user_id } => self.on_match(nickname, user_id),
            InboundFrame::Msg { sender, text } => self.on_chat_message(sender, text),
            InboundFrame::PartnerInterest => self.on_partner_interest(),
            InboundFrame::Unknown { tag } => {
                log::debug!("ignoring frame with unknown tag: {:?}", tag);
            }
        }
    }

    /// Send button (or Enter). Whitespace-only input is ignored and the
    /// input is left untouched.
    pub fn send_chat(&mut self, input: &str) {
        let text = input.trim();
        if text.is_empty() {
            log::debug!("ignoring empty chat input");
            return;
        }

        self.send(OutboundFrame::Chat {
            text: text.to_string(),
        });
        self.presenter.clear_input();
    }

    /// Skip button: drop the current match and re-queue.
    pub fn skip(&mut self) {
        self.reset_session();
        self.presenter.set_partner_label(FINDING_MATCH);
        self.send(OutboundFrame::Next);
    }

    /// Interested button. Ignored for guests, before the message threshold,
    /// and on repeat clicks.
    pub fn express_interest(&mut self) {
        if self.config.guest || self.self_interested {
            return;
        }
        if self.message_count < INTEREST_THRESHOLD {
            log::debug!(
                "interest click before threshold ({}/{})",
                self.message_count,
                INTEREST_THRESHOLD
            );
            return;
        }

        self.self_interested = true;
        self.presenter
            .set_interest_control(InterestControl::Confirmed);
        self.send(OutboundFrame::Interest);
        self.maybe_save_connection();
    }

    fn on_match(&mut self, nickname: String, user_id: String) {
        self.reset_session();

        let nickname = if nickname.is_empty() {
            UNKNOWN_NICKNAME.to_string()
        } else {
            nickname
        };

        self.presenter
            .set_partner_label(&format!("Matched with: {}", nickname));
        self.push_entry(LogEntry::system(format!(
            "You are chatting with {}.",
            nickname
        )));
        self.partner = Some(PartnerIdentity { nickname, user_id });
    }

    fn on_chat_message(&mut self, sender: String, text: String) {
        let sender = if sender.is_empty() {
            UNKNOWN_NICKNAME.to_string()
        } else {
            sender
        };
        self.push_entry(LogEntry::chat(sender, text));

        self.message_count += 1;
        if !self.config.guest && self.message_count == INTEREST_THRESHOLD {
            self.presenter
                .set_interest_control(InterestControl::Unlocked);
        }
    }

    fn on_partner_interest(&mut self) {
        self.partner_interested = true;
        self.push_entry(LogEntry::system(PARTNER_INTEREST_NOTICE));
        self.maybe_save_connection();
    }

    /// Runs the save flow once mutuality is reached. The latch guarantees a
    /// single submission per match no matter which side clicked first, and
    /// no matter how often the server repeats `PINTEREST`.
    fn maybe_save_connection(&mut self) {
        if self.config.guest || self.connection_saved {
            return;
        }
        if !(self.self_interested && self.partner_interested) {
            return;
        }

        self.connection_saved = true;
        self.push_entry(LogEntry::system(MUTUAL_INTEREST_NOTICE));

        match &self.partner {
            Some(partner) if !partner.user_id.is_empty() && !partner.nickname.is_empty() => {
                log::info!("mutual interest, submitting connection save");
                let (user_id, nickname) = (partner.user_id.clone(), partner.nickname.clone());
                self.presenter.submit_connection(&user_id, &nickname);
            }
            _ => log::warn!("mutual interest without a known partner, skipping save"),
        }
    }

    /// Clear everything tied to the current match: counters, flags, partner
    /// identity, and the visible log. The interest control relocks.
    fn reset_session(&mut self) {
        self.partner = None;
        self.message_count = 0;
        self.self_interested = false;
        self.partner_interested = false;
        self.connection_saved = false;

        self.log.clear();
        self.presenter.clear_log();

        if !self.config.guest {
            self.presenter.set_interest_control(InterestControl::Locked);
        }
    }

    fn push_entry(&mut self, entry: LogEntry) {
        self.presenter.show_log_entry(&entry);
        for _ in 0..self.log.push(entry) {
            self.presenter.remove_oldest_entry();
        }
    }

    /// Outbound frames only make sense on a live socket; anything else is
    /// dropped rather than handed to a closed transport.
    fn send(&mut self, frame: OutboundFrame) {
        if self.state != ConnectionState::Connected {
            log::warn!(
                "dropping outbound frame while {:?}: {:?}",
                self.state,
                frame
            );
            return;
        }
        self.sink.send(frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct NullPresenter;

    impl Presenter for NullPresenter {
        fn set_status(&mut self, _text: &str) {}
        fn set_partner_label(&mut self, _text: &str) {}
        fn show_log_entry(&mut self, _entry: &LogEntry) {}
        fn remove_oldest_entry(&mut self) {}
        fn clear_log(&mut self) {}
        fn clear_input(&mut self) {}
        fn set_interest_control(&mut self, _state: InterestControl) {}
        fn submit_connection(&mut self, _user_id: &str, _nickname: &str) {}
    }

    #[derive(Default, Clone)]
    struct SharedSink(Rc<RefCell<Vec<String>>>);

    impl FrameSink for SharedSink {
        fn send(&mut self, frame: OutboundFrame) {
            self.0.borrow_mut().push(frame.encode());
        }
    }

    fn connected_controller() -> SessionController<NullPresenter, SharedSink> {
        let mut controller = SessionController::new(
            SessionConfig::default(),
            NullPresenter,
            SharedSink::default(),
        );
        controller.handle_open();
        controller
    }

    #[test]
    fn open_and_close_walk_the_lifecycle() {
        let mut controller = SessionController::new(
            SessionConfig::default(),
            NullPresenter,
            SharedSink::default(),
        );
        assert_eq!(controller.state(), ConnectionState::Connecting);
        controller.handle_open();
        assert_eq!(controller.state(), ConnectionState::Connected);
        controller.handle_close();
        assert_eq!(controller.state(), ConnectionState::Disconnected);
    }

    #[test]
    fn frames_are_not_sent_before_open() {
        let mut controller = SessionController::new(
            SessionConfig::default(),
            NullPresenter,
            SharedSink::default(),
        );
        controller.send_chat("hello");
        assert!(controller.sink().0.borrow().is_empty());
    }

    #[test]
    fn frames_are_not_sent_after_close() {
        let mut controller = connected_controller();
        controller.handle_close();
        controller.skip();
        assert!(controller.sink().0.borrow().is_empty());
    }

    #[test]
    fn chat_send_trims_and_encodes() {
        let mut controller = connected_controller();
        controller.send_chat("  hello there  ");
        assert_eq!(
            controller.sink().0.borrow().as_slice(),
            ["MSG|hello there"]
        );
    }

    #[test]
    fn whitespace_send_is_dropped() {
        let mut controller = connected_controller();
        controller.send_chat("   \t ");
        assert!(controller.sink().0.borrow().is_empty());
    }

    #[test]
    fn message_count_tracks_inbound_chat_only() {
        let mut controller = connected_controller();
        controller.handle_frame("MSG|Bob|hi");
        controller.handle_frame("SYS|notice");
        controller.handle_frame("MSG|Bob|again");
        assert_eq!(controller.message_count(), 2);
    }

    #[test]
    fn unknown_frames_are_ignored() {
        let mut controller = connected_controller();
        controller.handle_frame("PING|whatever");
        controller.handle_frame("");
        assert_eq!(controller.message_count(), 0);
        assert!(controller.log().is_empty());
    }

    #[test]
    fn match_resets_counters_and_log() {
        let mut controller = connected_controller();
        for _ in 0..3 {
            controller.handle_frame("MSG|Bob|hi");
        }
        controller.handle_frame("MATCH|Alice|42");
        assert_eq!(controller.message_count(), 0);
        // Log holds only the fresh "You are chatting with" notice.
        assert_eq!(controller.log().len(), 1);
    }
}
