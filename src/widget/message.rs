use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::classifier::Department;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "msg-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Agent,
}

/// One transcript entry. Fields are private so a message cannot change after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    content: String,
    author_name: String,
    timestamp: DateTime<Local>,
    author: Author,
    department: Option<Department>,
}

impl Message {
    pub fn new_user(id: MessageId, content: String, author_name: String, timestamp: DateTime<Local>) -> Self {
        Self {
            id,
            content,
            author_name,
            timestamp,
            author: Author::User,
            department: None,
        }
    }

    pub fn new_agent(
        id: MessageId,
        content: String,
        agent_name: String,
        department: Option<Department>,
        timestamp: DateTime<Local>,
    ) -> Self {
        Self {
            id,
            content,
            author_name: agent_name,
            timestamp,
            author: Author::Agent,
            department,
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn author_name(&self) -> &str {
        &self.author_name
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn author(&self) -> Author {
        self.author
    }

    pub fn is_own(&self) -> bool {
        self.author == Author::User
    }

    pub fn department(&self) -> Option<Department> {
        self.department
    }
}

/// Append-only, insertion-ordered list of messages for one session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_keeps_insertion_order() {
        let now = Local::now();
        let mut transcript = Transcript::new();
        transcript.push(Message::new_user(MessageId(1), "hello".into(), "Guest".into(), now));
        transcript.push(Message::new_agent(
            MessageId(2),
            "Hi!".into(),
            "Support Team".into(),
            None,
            now,
        ));

        let ids: Vec<_> = transcript.iter().map(|m| m.id()).collect();
        assert_eq!(ids, vec![MessageId(1), MessageId(2)]);
        assert!(!transcript.last().unwrap().is_own());
        assert_eq!(MessageId(7).to_string(), "msg-7");
    }
}
