//! The chat session: a single owning state container.
//!
//! All state (roster, active view, conversation, flags, pending replies)
//! lives here and changes only through [`ChatSession::dispatch`] or the
//! equivalent inherent methods. Front ends read via accessors or the
//! serializable [`StateSnapshot`].
//!
//! The one deferred effect is the persona reply: sending a message queues a
//! reply due after the configured delay, and the host delivers due replies
//! by calling [`ChatSession::poll_replies`] on its tick.

use crate::clock::{Clock, SystemClock};
use crate::conversation::{pick_reply_with_rng, Conversation, Message, REPLY_DELAY_MS};
use crate::intent::Intent;
use crate::roster::{
    CategoryFilter, Character, CharacterDraft, CharacterId, CharacterPatch, Roster, RosterError,
};
use crate::router::{gate_chat, ActiveView, ChatGate, NavTarget};
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Errors a dispatch can return. Every error leaves the session unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("roster error: {0}")]
    Roster(#[from] RosterError),

    #[error("message text cannot be empty")]
    EmptyMessage,

    #[error("no active conversation to send to")]
    NoActiveConversation,

    #[error("no character with id {0}")]
    UnknownCharacter(CharacterId),

    #[error("no character named {0:?}")]
    UnknownName(String),
}

/// Configuration for a new session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Start with premium already unlocked.
    pub premium: bool,
    /// Initial gallery filter.
    pub category: CategoryFilter,
    /// How long a persona "types" before replying.
    pub reply_delay_ms: i64,
    /// Seed for the reply rng. `None` seeds from entropy.
    pub rng_seed: Option<u64>,
}

impl SessionConfig {
    pub fn new() -> Self {
        Self {
            premium: false,
            category: CategoryFilter::All,
            reply_delay_ms: REPLY_DELAY_MS,
            rng_seed: None,
        }
    }

    pub fn with_premium(mut self) -> Self {
        self.premium = true;
        self
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn with_reply_delay_ms(mut self, millis: i64) -> Self {
        self.reply_delay_ms = millis;
        self
    }

    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A reply waiting for its due time. It carries only the time: a reply that
/// fires after the user switched chats lands in whatever log is current,
/// and switching never cancels it.
#[derive(Debug, Clone, Copy)]
struct PendingReply {
    due_at: DateTime<Utc>,
}

// ============================================================================
// Session
// ============================================================================

/// The owning state container for one app session.
pub struct ChatSession {
    session_id: Uuid,
    roster: Roster,
    view: ActiveView,
    conversation: Conversation,
    is_premium: bool,
    category: CategoryFilter,
    // FIFO; the delay is constant per session, so due times are
    // nondecreasing and draining from the front is enough.
    pending: VecDeque<PendingReply>,
    reply_delay: Duration,
    clock: Arc<dyn Clock>,
    rng: StdRng,
}

impl ChatSession {
    /// A session on the real clock with the standard catalog.
    pub fn new() -> Self {
        Self::with_config(SessionConfig::new())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// A session on a caller-supplied clock. Tests pass a
    /// [`crate::clock::ManualClock`] here.
    pub fn with_clock(config: SessionConfig, clock: Arc<dyn Clock>) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            session_id: Uuid::new_v4(),
            roster: Roster::new(),
            view: ActiveView::Home,
            conversation: Conversation::new(),
            is_premium: config.premium,
            category: config.category,
            pending: VecDeque::new(),
            reply_delay: Duration::milliseconds(config.reply_delay_ms),
            clock,
            rng,
        }
    }

    /// Replace the roster, e.g. with a small fixture catalog.
    pub fn with_roster(mut self, roster: Roster) -> Self {
        self.roster = roster;
        self
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Apply one intent. On `Err` the session is exactly as it was.
    pub fn dispatch(&mut self, intent: Intent) -> Result<(), ChatError> {
        match intent {
            Intent::SelectCharacter(id) => self.select_character(id),
            Intent::SendMessage(text) => self.send_message(&text),
            Intent::CreateCharacter(draft) => self.create_character(draft).map(|_| ()),
            Intent::UpdateCharacter(id, patch) => self.update_character(id, patch).map(|_| ()),
            Intent::DeleteCharacter(id) => {
                self.delete_character(id);
                Ok(())
            }
            Intent::Navigate(target) => {
                self.navigate(target);
                Ok(())
            }
            Intent::SetCategoryFilter(filter) => {
                self.set_category_filter(filter);
                Ok(())
            }
            Intent::SetPremium(on) => {
                self.set_premium(on);
                Ok(())
            }
        }
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Open a chat with `id`. Premium characters on a locked session route
    /// to the upsell panel instead (that is not an error). Entering a chat
    /// always restarts the conversation with a fresh greeting, even for the
    /// character already on screen.
    pub fn select_character(&mut self, id: CharacterId) -> Result<(), ChatError> {
        let character = self
            .roster
            .get(id)
            .ok_or(ChatError::UnknownCharacter(id))?;
        match gate_chat(character, self.is_premium) {
            ChatGate::PremiumRequired => {
                self.view = ActiveView::Premium;
                Ok(())
            }
            ChatGate::Enter => {
                self.conversation = Conversation::start(character, self.clock.now());
                self.view = ActiveView::Chat { character: id };
                Ok(())
            }
        }
    }

    /// Append a user message to the active chat and queue one reply due
    /// after the delay. The text is stored as typed; only the emptiness
    /// check trims.
    pub fn send_message(&mut self, text: &str) -> Result<(), ChatError> {
        if text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if !self.view.is_chat() {
            return Err(ChatError::NoActiveConversation);
        }
        let now = self.clock.now();
        self.conversation.push_user(text, now);
        self.pending.push_back(PendingReply {
            due_at: now + self.reply_delay,
        });
        Ok(())
    }

    /// Deliver every reply that has come due. Returns how many landed.
    /// Hosts call this on their tick; tests call it after advancing a
    /// manual clock.
    pub fn poll_replies(&mut self) -> usize {
        let now = self.clock.now();
        let mut delivered = 0;
        while let Some(next) = self.pending.front() {
            if next.due_at > now {
                break;
            }
            self.pending.pop_front();
            let reply = pick_reply_with_rng(&mut self.rng);
            self.conversation.push_character(reply, now);
            delivered += 1;
        }
        delivered
    }

    /// Jump to a non-chat panel. Never fails, never cancels pending
    /// replies, never clears the conversation.
    pub fn navigate(&mut self, target: NavTarget) {
        self.view = target.view();
    }

    pub fn create_character(&mut self, draft: CharacterDraft) -> Result<Character, ChatError> {
        Ok(self.roster.create(draft)?)
    }

    pub fn update_character(
        &mut self,
        id: CharacterId,
        patch: CharacterPatch,
    ) -> Result<Character, ChatError> {
        Ok(self.roster.update(id, patch)?)
    }

    /// Silent no-op for built-in or unknown ids; returns whether anything
    /// was removed. Deleting the character currently on screen leaves the
    /// chat open; its log is already written.
    pub fn delete_character(&mut self, id: CharacterId) -> bool {
        self.roster.delete(id)
    }

    pub fn set_category_filter(&mut self, filter: CategoryFilter) {
        self.category = filter;
    }

    pub fn set_premium(&mut self, on: bool) {
        self.is_premium = on;
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn view(&self) -> ActiveView {
        self.view
    }

    /// The character of the active chat, if any.
    pub fn selected_character(&self) -> Option<&Character> {
        self.view
            .chat_character()
            .and_then(|id| self.roster.get(id))
    }

    pub fn messages(&self) -> &[Message] {
        self.conversation.messages()
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn is_premium(&self) -> bool {
        self.is_premium
    }

    pub fn category_filter(&self) -> CategoryFilter {
        self.category
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The gallery as currently filtered.
    pub fn visible_characters(&self) -> Vec<&Character> {
        self.roster.list(self.category)
    }

    pub fn pending_reply_count(&self) -> usize {
        self.pending.len()
    }

    pub fn reply_delay(&self) -> Duration {
        self.reply_delay
    }

    /// Full serializable projection for rendering and assertions.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            session: SessionSnapshot {
                session_id: self.session_id,
                view: self.view,
                selected_character: self.view.chat_character(),
                messages: self.conversation.messages().to_vec(),
                is_premium: self.is_premium,
                category: self.category,
                pending_replies: self.pending.len(),
            },
            roster: self.roster.iter().cloned().collect(),
            visible: self
                .visible_characters()
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// Owned, serializable view of the whole session.
#[derive(Debug, Clone, Serialize)]
pub struct StateSnapshot {
    pub session: SessionSnapshot,
    /// Every character, built-ins first.
    pub roster: Vec<Character>,
    /// The roster as currently filtered for the gallery.
    pub visible: Vec<Character>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub view: ActiveView,
    pub selected_character: Option<CharacterId>,
    pub messages: Vec<Message>,
    pub is_premium: bool,
    pub category: CategoryFilter,
    pub pending_replies: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::conversation::{Sender, REPLY_POOL};
    use crate::roster::Category;

    fn fixture_roster() -> Roster {
        Roster::with_builtins(vec![
            Character::builtin(1, "Luna", "Philosopher", "Wise and mysterious"),
            Character::builtin(2, "Hana", "Magical girl", "Bubbly")
                .with_category(Category::Anime)
                .with_premium(),
        ])
    }

    fn test_session() -> (ChatSession, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        let session = ChatSession::with_clock(
            SessionConfig::new().with_rng_seed(42),
            clock.clone(),
        )
        .with_roster(fixture_roster());
        (session, clock)
    }

    #[test]
    fn test_initial_state() {
        let (session, _clock) = test_session();
        assert_eq!(session.view(), ActiveView::Home);
        assert!(session.messages().is_empty());
        assert!(!session.is_premium());
        assert_eq!(session.category_filter(), CategoryFilter::All);
        assert_eq!(session.pending_reply_count(), 0);
    }

    #[test]
    fn test_select_opens_chat_with_greeting() {
        let (mut session, _clock) = test_session();
        session.select_character(CharacterId::new(1)).unwrap();
        assert_eq!(
            session.view(),
            ActiveView::Chat {
                character: CharacterId::new(1)
            }
        );
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].sender, Sender::Character);
        assert!(session.messages()[0].text.contains("Luna"));
    }

    #[test]
    fn test_select_unknown_changes_nothing() {
        let (mut session, _clock) = test_session();
        let err = session.select_character(CharacterId::new(77)).unwrap_err();
        assert_eq!(err, ChatError::UnknownCharacter(CharacterId::new(77)));
        assert_eq!(session.view(), ActiveView::Home);
        assert!(session.messages().is_empty());
    }

    #[test]
    fn test_premium_character_routes_to_upsell() {
        let (mut session, _clock) = test_session();
        session.select_character(CharacterId::new(2)).unwrap();
        assert_eq!(session.view(), ActiveView::Premium);
        assert!(session.selected_character().is_none());
        assert!(session.messages().is_empty());

        // unlock, retry, chat opens
        session.set_premium(true);
        session.select_character(CharacterId::new(2)).unwrap();
        assert!(session.view().is_chat());
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn test_send_appends_user_then_delayed_reply() {
        let (mut session, clock) = test_session();
        session.select_character(CharacterId::new(1)).unwrap();
        session.send_message("hello there").unwrap();
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[1].sender, Sender::User);
        assert_eq!(session.messages()[1].text, "hello there");

        // not due yet
        clock.advance_millis(999);
        assert_eq!(session.poll_replies(), 0);
        assert_eq!(session.messages().len(), 2);

        clock.advance_millis(1);
        assert_eq!(session.poll_replies(), 1);
        assert_eq!(session.messages().len(), 3);
        let reply = &session.messages()[2];
        assert_eq!(reply.sender, Sender::Character);
        assert!(REPLY_POOL.contains(&reply.text.as_str()));
    }

    #[test]
    fn test_blank_send_is_rejected_without_mutation() {
        let (mut session, _clock) = test_session();
        session.select_character(CharacterId::new(1)).unwrap();
        assert_eq!(session.send_message(""), Err(ChatError::EmptyMessage));
        assert_eq!(session.send_message("   "), Err(ChatError::EmptyMessage));
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.pending_reply_count(), 0);
    }

    #[test]
    fn test_send_outside_chat_is_rejected() {
        let (mut session, _clock) = test_session();
        assert_eq!(
            session.send_message("hello"),
            Err(ChatError::NoActiveConversation)
        );
    }

    #[test]
    fn test_reselect_restarts_conversation() {
        let (mut session, clock) = test_session();
        session.select_character(CharacterId::new(1)).unwrap();
        session.send_message("one").unwrap();
        clock.advance_millis(1000);
        session.poll_replies();
        assert_eq!(session.messages().len(), 3);

        session.select_character(CharacterId::new(1)).unwrap();
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].id.0, 1);
    }

    #[test]
    fn test_overlapping_sends_deliver_both_replies() {
        let (mut session, clock) = test_session();
        session.select_character(CharacterId::new(1)).unwrap();
        session.send_message("first").unwrap();
        clock.advance_millis(300);
        session.send_message("second").unwrap();
        assert_eq!(session.pending_reply_count(), 2);

        clock.advance_millis(700); // first due exactly now
        assert_eq!(session.poll_replies(), 1);
        clock.advance_millis(300);
        assert_eq!(session.poll_replies(), 1);
        assert_eq!(session.messages().len(), 5);
        assert_eq!(session.pending_reply_count(), 0);
    }

    #[test]
    fn test_pending_reply_bleeds_into_next_conversation() {
        let (mut session, clock) = test_session();
        session.select_character(CharacterId::new(1)).unwrap();
        session.send_message("are you there?").unwrap();

        // switch chats before the reply lands
        session.set_premium(true);
        session.select_character(CharacterId::new(2)).unwrap();
        assert_eq!(session.messages().len(), 1);

        clock.advance_millis(1000);
        assert_eq!(session.poll_replies(), 1);
        // the old chat's reply landed in the new log
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[1].sender, Sender::Character);
    }

    #[test]
    fn test_navigate_keeps_pending_and_log() {
        let (mut session, clock) = test_session();
        session.select_character(CharacterId::new(1)).unwrap();
        session.send_message("hold on").unwrap();
        session.navigate(NavTarget::Home);
        assert_eq!(session.view(), ActiveView::Home);
        assert_eq!(session.pending_reply_count(), 1);

        clock.advance_millis(1000);
        assert_eq!(session.poll_replies(), 1);
        assert_eq!(session.messages().len(), 3);
    }

    #[test]
    fn test_dispatch_routes_intents() {
        let (mut session, _clock) = test_session();
        session
            .dispatch(Intent::SetCategoryFilter(CategoryFilter::Anime))
            .unwrap();
        assert_eq!(session.category_filter(), CategoryFilter::Anime);

        session
            .dispatch(Intent::CreateCharacter(CharacterDraft::new("Rin")))
            .unwrap();
        assert_eq!(session.roster().custom_count(), 1);

        let err = session
            .dispatch(Intent::SendMessage("hi".to_string()))
            .unwrap_err();
        assert_eq!(err, ChatError::NoActiveConversation);
    }

    #[test]
    fn test_seeded_sessions_replay_identically() {
        let run = || {
            let clock = Arc::new(ManualClock::default());
            let mut session = ChatSession::with_clock(
                SessionConfig::new().with_rng_seed(7),
                clock.clone(),
            )
            .with_roster(fixture_roster());
            session.select_character(CharacterId::new(1)).unwrap();
            for text in ["a", "b", "c"] {
                session.send_message(text).unwrap();
                clock.advance_millis(1000);
                session.poll_replies();
            }
            session
                .messages()
                .iter()
                .map(|m| m.text.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_snapshot_round_trips_to_json() {
        let (mut session, _clock) = test_session();
        session.select_character(CharacterId::new(1)).unwrap();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.session.view.name(), "chat");
        assert_eq!(snapshot.roster.len(), 2);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"Luna\""));
    }
}
