//! Wire frame codec for the vibeconnect chat protocol.
//!
//! Frames are UTF-8 text, fields separated by `|`, first field is the type
//! tag. Free-text bodies may themselves contain `|`, so decoding rejoins
//! every field after the fixed positional ones instead of taking a single
//! split segment.

/// Field separator used by every frame.
pub const DELIMITER: char = '|';

/// A frame received from the matching server.
///
/// Decoding is total: anything that does not carry a recognized tag becomes
/// [`InboundFrame::Unknown`] and is left to the caller to ignore. Missing
/// positional fields decode as empty strings; display fallbacks (such as an
/// "Unknown" nickname) are the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundFrame {
    /// `SYS|<text>` — server notice for the message log.
    Sys { text: String },
    /// `MATCH|<nickname>|<userId>` — a new partner was assigned.
    Match { nickname: String, user_id: String },
    /// `MSG|<nickname>|<text...>` — chat message from the partner.
    Msg { sender: String, text: String },
    /// `PINTEREST` — the partner clicked Interested.
    PartnerInterest,
    /// Any frame whose tag is not recognized.
    Unknown { tag: String },
}

impl InboundFrame {
    /// Decode one wire frame.
    pub fn decode(raw: &str) -> Self {
        let parts: Vec<&str> = raw.split(DELIMITER).collect();
        let tag = parts[0].trim();

        match tag {
            "SYS" => InboundFrame::Sys {
                text: rejoin(&parts, 1),
            },
            "MATCH" => InboundFrame::Match {
                nickname: field(&parts, 1),
                user_id: field(&parts, 2),
            },
            "MSG" => InboundFrame::Msg {
                sender: field(&parts, 1),
                text: rejoin(&parts, 2),
            },
            "PINTEREST" => InboundFrame::PartnerInterest,
            _ => InboundFrame::Unknown {
                tag: tag.to_string(),
            },
        }
    }
}

/// A frame sent to the matching server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundFrame {
    /// `MSG|<text>` — send a chat message to the current partner.
    Chat { text: String },
    /// `NEXT|` — leave the current match and re-queue.
    Next,
    /// `INTEREST|` — signal interest in persisting the connection.
    Interest,
}

impl OutboundFrame {
    /// Encode to the wire representation.
    pub fn encode(&self) -> String {
        match self {
            OutboundFrame::Chat { text } => format!("MSG|{}", text),
            OutboundFrame::Next => "NEXT|".to_string(),
            OutboundFrame::Interest => "INTEREST|".to_string(),
        }
    }
}

fn field(parts: &[&str], index: usize) -> String {
    parts.get(index).copied().unwrap_or_default().to_string()
}

/// Rejoin all fields from `from` onward, preserving interior delimiters.
fn rejoin(parts: &[&str], from: usize) -> String {
    if parts.len() <= from {
        return String::new();
    }
    parts[from..].join("|")
}
