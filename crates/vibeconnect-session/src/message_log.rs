//! Capped view of the most recent chat and system messages.

use std::collections::VecDeque;

/// Sender name used for server notices and local status lines.
pub const SYSTEM_SENDER: &str = "System";

/// One line of the visible message log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub sender: String,
    pub text: String,
}

impl LogEntry {
    pub fn chat(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self {
            sender: SYSTEM_SENDER.to_string(),
            text: text.into(),
        }
    }

    pub fn is_system(&self) -> bool {
        self.sender == SYSTEM_SENDER
    }
}

/// FIFO log holding at most `cap` entries.
#[derive(Debug, Clone)]
pub struct MessageLog {
    entries: VecDeque<LogEntry>,
    cap: usize,
}

impl MessageLog {
    pub fn new(cap: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(cap),
            cap,
        }
    }

    /// Append an entry, returning how many old entries were evicted.
    pub fn push(&mut self, entry: LogEntry) -> usize {
        self.entries.push_back(entry);
        let mut evicted = 0;
        while self.entries.len() > self.cap {
            self.entries.pop_front();
            evicted += 1;
        }
        evicted
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_under_cap_evicts_nothing() {
        let mut log = MessageLog::new(5);
        for i in 0..5 {
            assert_eq!(log.push(LogEntry::chat("a", format!("m{}", i))), 0);
        }
        assert_eq!(log.len(), 5);
    }

    #[test]
    fn push_over_cap_evicts_oldest_first() {
        let mut log = MessageLog::new(5);
        for i in 0..7 {
            log.push(LogEntry::chat("a", format!("m{}", i)));
        }
        assert_eq!(log.len(), 5);
        let texts: Vec<&str> = log.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["m2", "m3", "m4", "m5", "m6"]);
    }

    #[test]
    fn eviction_count_is_reported() {
        let mut log = MessageLog::new(2);
        log.push(LogEntry::system("one"));
        log.push(LogEntry::system("two"));
        assert_eq!(log.push(LogEntry::system("three")), 1);
    }

    #[test]
    fn system_entries_carry_the_system_sender() {
        let entry = LogEntry::system("notice");
        assert!(entry.is_system());
        assert_eq!(entry.sender, "System");
    }
}
