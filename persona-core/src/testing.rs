//! Testing utilities for the chat engine.
//!
//! This module provides tools for integration testing:
//! - `TestHarness` for scripted session scenarios on a manual clock
//! - Assertion helpers for verifying session state
//!
//! The engine has no external collaborator to mock: with a seeded rng and a
//! [`ManualClock`], every run is fully deterministic.

use crate::clock::ManualClock;
use crate::conversation::{Message, Sender, REPLY_POOL};
use crate::intent::Intent;
use crate::roster::Roster;
use crate::session::{ChatError, ChatSession, SessionConfig};
use std::sync::Arc;

/// Test harness for running chat scenarios.
pub struct TestHarness {
    /// The session under test.
    pub session: ChatSession,
    /// The clock the session reads. Advance it to make replies come due.
    pub clock: Arc<ManualClock>,
}

impl TestHarness {
    /// A harness over the standard catalog, rng seeded to 0, clock at the
    /// epoch.
    pub fn new() -> Self {
        Self::with_config(SessionConfig::new().with_rng_seed(0))
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_config(SessionConfig::new().with_rng_seed(seed))
    }

    pub fn with_config(config: SessionConfig) -> Self {
        let clock = Arc::new(ManualClock::default());
        let session = ChatSession::with_clock(config, clock.clone());
        Self { session, clock }
    }

    /// Swap in a fixture roster.
    pub fn with_roster(mut self, roster: Roster) -> Self {
        self.session = self.session.with_roster(roster);
        self
    }

    pub fn dispatch(&mut self, intent: Intent) -> Result<(), ChatError> {
        self.session.dispatch(intent)
    }

    /// Open a chat by id or name.
    pub fn select(&mut self, key: &str) -> Result<(), ChatError> {
        let id = self
            .session
            .roster()
            .resolve(key)
            .map(|c| c.id)
            .ok_or_else(|| ChatError::UnknownName(key.to_string()))?;
        self.session.select_character(id)
    }

    pub fn send(&mut self, text: &str) -> Result<(), ChatError> {
        self.session.send_message(text)
    }

    /// Advance just past the reply delay and deliver. Returns how many
    /// replies landed.
    pub fn wait_for_reply(&mut self) -> usize {
        self.clock.advance(self.session.reply_delay());
        self.session.poll_replies()
    }

    pub fn advance_millis(&mut self, millis: i64) -> usize {
        self.clock.advance_millis(millis);
        self.session.poll_replies()
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

    pub fn last_message(&self) -> Option<&Message> {
        self.session.messages().last()
    }

    pub fn last_text(&self) -> Option<&str> {
        self.last_message().map(|m| m.text.as_str())
    }

    pub fn pending_count(&self) -> usize {
        self.session.pending_reply_count()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert the session is on the named view.
#[track_caller]
pub fn assert_view(harness: &TestHarness, expected: &str) {
    let actual = harness.view_name();
    assert_eq!(actual, expected, "Expected view '{expected}', got '{actual}'");
}

/// Assert the message log holds exactly `expected` messages.
#[track_caller]
pub fn assert_message_count(harness: &TestHarness, expected: usize) {
    let actual = harness.message_count();
    assert_eq!(
        actual, expected,
        "Expected {expected} messages, got {actual}"
    );
}

/// Assert the newest message came from `sender`.
#[track_caller]
pub fn assert_last_sender(harness: &TestHarness, sender: Sender) {
    match harness.last_message() {
        Some(message) => assert_eq!(
            message.sender, sender,
            "Expected last message from {sender}, got {}",
            message.sender
        ),
        None => panic!("Expected a last message from {sender}, log is empty"),
    }
}

/// Assert the newest message is one of the canned replies.
#[track_caller]
pub fn assert_canned_reply(harness: &TestHarness) {
    match harness.last_text() {
        Some(text) => assert!(
            REPLY_POOL.contains(&text),
            "Expected a canned reply, got {text:?}"
        ),
        None => panic!("Expected a canned reply, log is empty"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_basic_exchange() {
        let mut harness = TestHarness::new();
        harness.select("Luna").unwrap();
        assert_view(&harness, "chat");
        assert_message_count(&harness, 1);

        harness.send("hello").unwrap();
        assert_last_sender(&harness, Sender::User);

        assert_eq!(harness.wait_for_reply(), 1);
        assert_message_count(&harness, 3);
        assert_last_sender(&harness, Sender::Character);
        assert_canned_reply(&harness);
    }

    #[test]
    fn test_harness_partial_advance() {
        let mut harness = TestHarness::new();
        harness.select("Neo").unwrap();
        harness.send("ping").unwrap();
        assert_eq!(harness.advance_millis(500), 0);
        assert_eq!(harness.pending_count(), 1);
        assert_eq!(harness.advance_millis(500), 1);
        assert_eq!(harness.pending_count(), 0);
    }

    #[test]
    fn test_harness_dispatch_passthrough() {
        let mut harness = TestHarness::new();
        harness.dispatch(Intent::SetPremium(true)).unwrap();
        assert!(harness.session.is_premium());
    }
}
