//! DOM-backed implementation of the session controller's presentation port.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element, HtmlButtonElement, HtmlFormElement, HtmlInputElement};

use vibeconnect_session::{InterestControl, LogEntry, Presenter};

use crate::dom;
use crate::utils::escape_html;

const INTEREST_LABEL_LOCKED: &str = "Interested (unlock after 5 messages)";
const INTEREST_LABEL_UNLOCKED: &str = "Interested";
const INTEREST_LABEL_CONFIRMED: &str = "Interested ✓";

/// Hidden form used to persist a mutual connection on the host page.
struct SaveForm {
    form: HtmlFormElement,
    user_id: HtmlInputElement,
    nickname: HtmlInputElement,
}

/// Binds the presentation port to the widget's DOM surface.
///
/// Required controls: `messages`, `status`, `partnerInfo`, `msgInput`.
/// Optional: `interestedBtn` (absent on guest pages) and the
/// `saveForm`/`saveUserId`/`saveNick` triple. Failures after construction
/// are logged and swallowed so a broken element cannot wedge the frame loop.
pub struct DomPresenter {
    document: Document,
    messages: Element,
    status: Element,
    partner_info: Element,
    input: HtmlInputElement,
    interested_btn: Option<HtmlButtonElement>,
    save_form: Option<SaveForm>,
}

impl DomPresenter {
    pub fn new(document: &Document, guest: bool) -> Result<Self, JsValue> {
        let messages = dom::get_element_by_id(document, "messages")?;
        let status = dom::get_element_by_id(document, "status")?;
        let partner_info = dom::get_element_by_id(document, "partnerInfo")?;
        let input = dom::get_input_by_id(document, "msgInput")?;

        let interested_btn = if guest {
            None
        } else {
            dom::try_get_button_by_id(document, "interestedBtn")
        };

        let save_form = match (
            dom::try_get_form_by_id(document, "saveForm"),
            dom::try_get_input_by_id(document, "saveUserId"),
            dom::try_get_input_by_id(document, "saveNick"),
        ) {
            (Some(form), Some(user_id), Some(nickname)) => Some(SaveForm {
                form,
                user_id,
                nickname,
            }),
            _ => None,
        };

        Ok(Self {
            document: document.clone(),
            messages,
            status,
            partner_info,
            input,
            interested_btn,
            save_form,
        })
    }

    fn append_entry(&self, entry: &LogEntry) -> Result<(), JsValue> {
        let div = self.document.create_element("div")?;
        div.set_class_name("msg");
        div.set_inner_html(&format!(
            "<b>{}:</b> {}",
            escape_html(&entry.sender),
            escape_html(&entry.text)
        ));
        self.messages.append_child(&div)?;
        dom::scroll_to_bottom(&self.messages);
        Ok(())
    }
}

impl Presenter for DomPresenter {
    fn set_status(&mut self, text: &str) {
        self.status.set_text_content(Some(text));
    }

    fn set_partner_label(&mut self, text: &str) {
        self.partner_info.set_text_content(Some(text));
    }

    fn show_log_entry(&mut self, entry: &LogEntry) {
        if let Err(e) = self.append_entry(entry) {
            log::error!("Failed to render log entry: {:?}", e);
        }
    }

    fn remove_oldest_entry(&mut self) {
        if let Some(first) = self.messages.first_element_child() {
            first.remove();
        }
    }

    fn clear_log(&mut self) {
        dom::clear_element(&self.messages);
    }

    fn clear_input(&mut self) {
        self.input.set_value("");
    }

    fn set_interest_control(&mut self, state: InterestControl) {
        let Some(btn) = &self.interested_btn else {
            return;
        };
        let (disabled, label) = match state {
            InterestControl::Locked => (true, INTEREST_LABEL_LOCKED),
            InterestControl::Unlocked => (false, INTEREST_LABEL_UNLOCKED),
            InterestControl::Confirmed => (true, INTEREST_LABEL_CONFIRMED),
        };
        btn.set_disabled(disabled);
        btn.set_text_content(Some(label));
    }

    fn submit_connection(&mut self, user_id: &str, nickname: &str) {
        let Some(save) = &self.save_form else {
            log::warn!("No save form on this page, connection not persisted");
            return;
        };
        save.user_id.set_value(user_id);
        save.nickname.set_value(nickname);
        if let Err(e) = save.form.submit() {
            log::error!("Failed to submit save form: {:?}", e);
        }
    }
}
