use vibeconnect_protocol::OutboundFrame;
use vibeconnect_session::{
    FrameSink, InterestControl, LogEntry, Presenter, SessionConfig, SessionController,
};

/// Presenter that records every call, mirroring the visible log the way a
/// DOM container would (append / drop-first / clear).
#[derive(Default)]
pub struct RecordingPresenter {
    pub status: String,
    pub partner_label: String,
    pub visible: Vec<(String, String)>,
    pub input_cleared: u32,
    pub interest_states: Vec<InterestControl>,
    pub submissions: Vec<(String, String)>,
}

impl Presenter for RecordingPresenter {
    fn set_status(&mut self, text: &str) {
        self.status = text.to_string();
    }

    fn set_partner_label(&mut self, text: &str) {
        self.partner_label = text.to_string();
    }

    fn show_log_entry(&mut self, entry: &LogEntry) {
        self.visible.push((entry.sender.clone(), entry.text.clone()));
    }

    fn remove_oldest_entry(&mut self) {
        if !self.visible.is_empty() {
            self.visible.remove(0);
        }
    }

    fn clear_log(&mut self) {
        self.visible.clear();
    }

    fn clear_input(&mut self) {
        self.input_cleared += 1;
    }

    fn set_interest_control(&mut self, state: InterestControl) {
        self.interest_states.push(state);
    }

    fn submit_connection(&mut self, user_id: &str, nickname: &str) {
        self.submissions.push((user_id.to_string(), nickname.to_string()));
    }
}

/// Sink that records encoded outbound frames.
#[derive(Default)]
pub struct RecordingSink {
    pub frames: Vec<String>,
}

impl FrameSink for RecordingSink {
    fn send(&mut self, frame: OutboundFrame) {
        self.frames.push(frame.encode());
    }
}

pub type TestController = SessionController<RecordingPresenter, RecordingSink>;

/// A controller in `Connected` state with the given guest flag.
pub fn connected(guest: bool) -> TestController {
    let mut controller = SessionController::new(
        SessionConfig { guest },
        RecordingPresenter::default(),
        RecordingSink::default(),
    );
    controller.handle_open();
    controller
}

/// Drive `count` inbound partner messages through the controller.
pub fn receive_messages(controller: &mut TestController, count: u32) {
    for i in 0..count {
        controller.handle_frame(&format!("MSG|Bob|message {}", i));
    }
}
