//! The intents a host can dispatch into a session.

use crate::roster::{CategoryFilter, CharacterDraft, CharacterId, CharacterPatch};
use crate::router::NavTarget;

/// Everything a front end can ask the engine to do. Dispatching one of
/// these is the only way session state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Open a chat with a character (premium-gated).
    SelectCharacter(CharacterId),
    /// Append a user message to the active chat and schedule a reply.
    SendMessage(String),
    CreateCharacter(CharacterDraft),
    UpdateCharacter(CharacterId, CharacterPatch),
    DeleteCharacter(CharacterId),
    /// Jump to a non-chat panel.
    Navigate(NavTarget),
    SetCategoryFilter(CategoryFilter),
    /// Flip the session-local premium flag.
    SetPremium(bool),
}

impl Intent {
    /// Short label for status lines and transcripts.
    pub fn name(&self) -> &'static str {
        match self {
            Intent::SelectCharacter(_) => "select character",
            Intent::SendMessage(_) => "send message",
            Intent::CreateCharacter(_) => "create character",
            Intent::UpdateCharacter(_, _) => "update character",
            Intent::DeleteCharacter(_) => "delete character",
            Intent::Navigate(_) => "navigate",
            Intent::SetCategoryFilter(_) => "set category filter",
            Intent::SetPremium(_) => "set premium",
        }
    }
}
