//! The simulated conversation: message log, greeting, and canned replies.
//!
//! There is no model behind the personas. Every conversation opens with a
//! templated greeting, and each user message earns exactly one reply drawn
//! uniformly from a fixed pool. Scheduling of the delayed reply lives in
//! [`crate::session`]; this module owns the log itself.

use crate::roster::Character;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How long a persona "types" before its reply lands.
pub const REPLY_DELAY_MS: i64 = 1000;

/// The canned replies, picked uniformly at random per user message.
pub const REPLY_POOL: [&str; 5] = [
    "That's an interesting thought! Tell me more.",
    "I understand you. How does it make you feel?",
    "Hmm, have you looked at it from the other side?",
    "That reminds me of a story...",
    "I always enjoy our conversations!",
];

/// The greeting that opens every conversation.
pub fn greeting_for(character: &Character) -> String {
    format!("Hi, I'm {}. {}", character.name, character.personality)
}

/// Pick a reply with the thread-local rng.
pub fn pick_reply() -> &'static str {
    pick_reply_with_rng(&mut rand::thread_rng())
}

/// Pick a reply with a caller-supplied rng, so sessions and tests can seed it.
pub fn pick_reply_with_rng<R: Rng>(rng: &mut R) -> &'static str {
    REPLY_POOL[rng.gen_range(0..REPLY_POOL.len())]
}

// ============================================================================
// Messages
// ============================================================================

/// Identifier for a message, monotonic within one conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    User,
    Character,
}

impl Sender {
    pub fn name(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Character => "character",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One chat bubble.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Conversation Log
// ============================================================================

/// The message log for one conversation. Ids come from an internal counter,
/// never from the log length, so ordering by id is always chronological.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    messages: Vec<Message>,
    next_id: u64,
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            next_id: 1,
        }
    }

    /// A fresh conversation opened by `character`'s greeting. Replaces any
    /// prior log wholesale; there is no resume.
    pub fn start(character: &Character, now: DateTime<Utc>) -> Self {
        let mut conversation = Self::new();
        conversation.push(Sender::Character, greeting_for(character), now);
        conversation
    }

    pub fn push_user(&mut self, text: impl Into<String>, at: DateTime<Utc>) -> MessageId {
        self.push(Sender::User, text.into(), at)
    }

    pub fn push_character(&mut self, text: impl Into<String>, at: DateTime<Utc>) -> MessageId {
        self.push(Sender::Character, text.into(), at)
    }

    fn push(&mut self, sender: Sender, text: String, at: DateTime<Utc>) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        self.messages.push(Message {
            id,
            sender,
            text,
            timestamp: at,
        });
        id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Character;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn luna() -> Character {
        Character::builtin(1, "Luna", "Philosopher", "Wise and mysterious")
    }

    #[test]
    fn test_greeting_contains_name_and_personality() {
        let greeting = greeting_for(&luna());
        assert_eq!(greeting, "Hi, I'm Luna. Wise and mysterious");
    }

    #[test]
    fn test_start_opens_with_single_greeting() {
        let conversation = Conversation::start(&luna(), DateTime::UNIX_EPOCH);
        assert_eq!(conversation.len(), 1);
        let first = &conversation.messages()[0];
        assert_eq!(first.id, MessageId(1));
        assert_eq!(first.sender, Sender::Character);
        assert!(first.text.contains("Luna"));
        assert!(first.text.contains("Wise and mysterious"));
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut conversation = Conversation::start(&luna(), DateTime::UNIX_EPOCH);
        conversation.push_user("hello", DateTime::UNIX_EPOCH);
        conversation.push_character("hi", DateTime::UNIX_EPOCH);
        conversation.push_user("again", DateTime::UNIX_EPOCH);
        let ids: Vec<u64> = conversation.messages().iter().map(|m| m.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_pick_reply_stays_in_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let reply = pick_reply_with_rng(&mut rng);
            assert!(REPLY_POOL.contains(&reply));
        }
    }

    #[test]
    fn test_pick_reply_reaches_every_variant() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(pick_reply_with_rng(&mut rng));
        }
        assert_eq!(seen.len(), REPLY_POOL.len());
    }
}
