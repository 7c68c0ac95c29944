//! Headless chat interface for programmatic use.
//!
//! A simplified driver around [`ChatSession`] for:
//! - Automated QA over the canned-reply flow
//! - Script-driven sessions from other programs
//! - Exercising the engine without a terminal
//!
//! It owns a [`ManualClock`], so [`HeadlessChat::send`] can wait out the
//! reply delay instantly and hand back the persona's reply.
//!
//! # Example
//!
//! ```
//! use persona_core::headless::HeadlessChat;
//!
//! # fn main() -> Result<(), persona_core::ChatError> {
//! let mut chat = HeadlessChat::with_seed(7);
//! chat.select("Luna")?;
//! let reply = chat.send("Do the stars mean anything?")?;
//! println!("Luna: {reply}");
//! # Ok(())
//! # }
//! ```

use crate::clock::ManualClock;
use crate::session::{ChatError, ChatSession, SessionConfig, StateSnapshot};
use std::sync::Arc;

/// An exchange recorded by [`HeadlessChat::send`].
#[derive(Debug, Clone)]
pub struct TranscriptEntry {
    /// What the user sent.
    pub user_input: String,
    /// The persona's reply.
    pub reply: String,
    /// Exchange number, starting at 1.
    pub turn: usize,
}

/// A chat session that can be driven programmatically.
///
/// Wraps [`ChatSession`] with a manual clock and a transcript of every
/// completed exchange.
pub struct HeadlessChat {
    session: ChatSession,
    clock: Arc<ManualClock>,
    transcript: Vec<TranscriptEntry>,
}

impl HeadlessChat {
    /// A driver over the standard catalog with an entropy-seeded rng.
    pub fn new() -> Self {
        Self::with_config(SessionConfig::new())
    }

    /// A fully reproducible driver: fixed rng seed, clock at the epoch.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_config(SessionConfig::new().with_rng_seed(seed))
    }

    pub fn with_config(config: SessionConfig) -> Self {
        let clock = Arc::new(ManualClock::default());
        let session = ChatSession::with_clock(config, clock.clone());
        Self {
            session,
            clock,
            transcript: Vec::new(),
        }
    }

    /// Open a chat by character id or case-insensitive name.
    pub fn select(&mut self, key: &str) -> Result<(), ChatError> {
        let id = self
            .session
            .roster()
            .resolve(key)
            .map(|c| c.id)
            .ok_or_else(|| ChatError::UnknownName(key.to_string()))?;
        self.session.select_character(id)
    }

    /// Send a message, wait out the reply delay, and return the reply text.
    /// The exchange is recorded in the transcript.
    pub fn send(&mut self, input: &str) -> Result<String, ChatError> {
        self.session.send_message(input)?;
        self.clock.advance(self.session.reply_delay());
        self.session.poll_replies();
        let reply = self
            .session
            .messages()
            .last()
            .map(|m| m.text.clone())
            .unwrap_or_default();

        self.transcript.push(TranscriptEntry {
            user_input: input.to_string(),
            reply: reply.clone(),
            turn: self.transcript.len() + 1,
        });
        Ok(reply)
    }

    /// Send without waiting, for scripting overlapping sends. Not recorded
    /// in the transcript; pair with [`HeadlessChat::advance_millis`].
    pub fn post(&mut self, input: &str) -> Result<(), ChatError> {
        self.session.send_message(input)
    }

    /// Move the clock forward and deliver whatever comes due. Returns how
    /// many replies landed.
    pub fn advance_millis(&mut self, millis: i64) -> usize {
        self.clock.advance_millis(millis);
        self.session.poll_replies()
    }

    /// Unlock premium for this session.
    pub fn unlock_premium(&mut self) {
        self.session.set_premium(true);
    }

    // ========================================================================
    // State Queries
    // ========================================================================

    pub fn view_name(&self) -> &'static str {
        self.session.view().name()
    }

    pub fn message_count(&self) -> usize {
        self.session.messages().len()
    }

    /// The last completed exchange's reply, if any.
    pub fn last_reply(&self) -> Option<&str> {
        self.transcript.last().map(|e| e.reply.as_str())
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn state(&self) -> StateSnapshot {
        self.session.snapshot()
    }

    /// The snapshot as pretty JSON, for dumping to logs or a terminal.
    pub fn state_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.session.snapshot())
    }

    /// The underlying session for advanced use.
    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut ChatSession {
        &mut self.session
    }
}

impl Default for HeadlessChat {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::REPLY_POOL;

    #[test]
    fn test_select_and_send() {
        let mut chat = HeadlessChat::with_seed(1);
        chat.select("Luna").unwrap();
        let reply = chat.send("hello").unwrap();
        assert!(REPLY_POOL.contains(&reply.as_str()));
        assert_eq!(chat.message_count(), 3);
        assert_eq!(chat.transcript().len(), 1);
        assert_eq!(chat.transcript()[0].turn, 1);
        assert_eq!(chat.last_reply(), Some(reply.as_str()));
    }

    #[test]
    fn test_select_by_id_string() {
        let mut chat = HeadlessChat::with_seed(1);
        chat.select("2").unwrap();
        assert_eq!(chat.view_name(), "chat");
    }

    #[test]
    fn test_select_unknown_name() {
        let mut chat = HeadlessChat::new();
        let err = chat.select("nobody").unwrap_err();
        assert_eq!(err, ChatError::UnknownName("nobody".to_string()));
    }

    #[test]
    fn test_post_and_advance_for_overlap() {
        let mut chat = HeadlessChat::with_seed(3);
        chat.select("Max").unwrap();
        chat.post("one").unwrap();
        assert_eq!(chat.advance_millis(300), 0);
        chat.post("two").unwrap();
        assert_eq!(chat.advance_millis(700), 1);
        assert_eq!(chat.advance_millis(300), 1);
        // greeting + two sends + two replies
        assert_eq!(chat.message_count(), 5);
    }

    #[test]
    fn test_premium_select_requires_unlock() {
        let mut chat = HeadlessChat::with_seed(5);
        chat.select("Hana").unwrap();
        assert_eq!(chat.view_name(), "premium");
        chat.unlock_premium();
        chat.select("Hana").unwrap();
        assert_eq!(chat.view_name(), "chat");
    }
}
