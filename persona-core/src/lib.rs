//! Character-chat engine with simulated persona replies.
//!
//! This crate provides:
//! - A roster of built-in and user-created chat personas with CRUD
//! - A single owning session driven by dispatched intents
//! - A simulated conversation engine (templated greeting, delayed canned
//!   replies)
//! - View routing with a premium gate
//! - Deterministic test support: injectable clock, seedable rng
//!
//! # Quick Start
//!
//! ```
//! use persona_core::headless::HeadlessChat;
//!
//! fn main() -> Result<(), persona_core::ChatError> {
//!     let mut chat = HeadlessChat::with_seed(42);
//!     chat.select("Luna")?;
//!
//!     let reply = chat.send("What do the stars say tonight?")?;
//!     println!("Luna: {reply}");
//!     Ok(())
//! }
//! ```

pub mod clock;
pub mod conversation;
pub mod headless;
pub mod intent;
pub mod roster;
pub mod router;
pub mod session;
pub mod testing;

// Primary public API
pub use clock::{Clock, ManualClock, SystemClock};
pub use conversation::{Conversation, Message, MessageId, Sender, REPLY_DELAY_MS, REPLY_POOL};
pub use headless::HeadlessChat;
pub use intent::Intent;
pub use roster::{
    Category, CategoryFilter, Character, CharacterDraft, CharacterId, CharacterPatch, ColorToken,
    GradientToken, Roster, RosterError,
};
pub use router::{ActiveView, NavTarget};
pub use session::{ChatError, ChatSession, SessionConfig, StateSnapshot};
pub use testing::TestHarness;
