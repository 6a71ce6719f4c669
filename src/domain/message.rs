use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Broker-assigned message identifier.
///
/// Opaque to the adapter; only used for traceability in logs and error messages.
pub struct MessageId(String);

impl MessageId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for MessageId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for MessageId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for MessageId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
/// Delivery priority assigned by the broker.
pub enum MessagePriority {
    Low,
    #[default]
    Normal,
    High,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Recipient credential: what kind of address it is and the address itself.
pub struct Identity {
    pub credential_type: String,
    pub credential_value: String,
}

impl Identity {
    pub fn new(credential_type: impl Into<String>, credential_value: impl Into<String>) -> Self {
        Self {
            credential_type: credential_type.into(),
            credential_value: credential_value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Broker-neutral notification message.
pub struct Message {
    pub id: MessageId,
    pub title: String,
    pub content: String,
    pub priority: MessagePriority,
    pub identity: Identity,
}

impl Message {
    pub fn new(id: impl Into<MessageId>, identity: Identity) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            content: String::new(),
            priority: MessagePriority::default(),
            identity,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_priority(mut self, priority: MessagePriority) -> Self {
        self.priority = priority;
        self
    }

    /// Text to deliver: `content` when it is non-blank, otherwise `title`.
    ///
    /// Returns `None` when both are blank.
    pub fn text(&self) -> Option<&str> {
        if !self.content.trim().is_empty() {
            Some(self.content.as_str())
        } else if !self.title.trim().is_empty() {
            Some(self.title.as_str())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> Message {
        Message::new(1_u64, Identity::new("phone", "+79251234567"))
    }

    #[test]
    fn content_wins_over_title() {
        let msg = message().with_title("title").with_content("content");
        assert_eq!(msg.text(), Some("content"));
    }

    #[test]
    fn blank_content_falls_back_to_title() {
        let msg = message().with_title("title").with_content(" \t\n");
        assert_eq!(msg.text(), Some("title"));
    }

    #[test]
    fn text_is_preserved_as_provided() {
        let msg = message().with_content(" hi ");
        assert_eq!(msg.text(), Some(" hi "));
    }

    #[test]
    fn blank_title_and_content_yield_none() {
        assert_eq!(message().text(), None);
        assert_eq!(message().with_title("  ").with_content("").text(), None);
    }

    #[test]
    fn message_id_conversions() {
        assert_eq!(MessageId::from(42_u64).as_str(), "42");
        assert_eq!(MessageId::from("abc").to_string(), "abc");
        assert_eq!(message().priority, MessagePriority::Normal);
    }
}
