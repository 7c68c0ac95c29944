//! View routing: which panel is on screen and which transitions are legal.
//!
//! The character gallery's create/edit dialog is an overlay on the home and
//! characters panels, not a view of its own.

use crate::roster::{Character, CharacterId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The panel currently on screen. `Chat` carries the character it belongs
/// to, so "a chat with nobody selected" cannot be represented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActiveView {
    #[default]
    Home,
    Chat {
        character: CharacterId,
    },
    Characters,
    Profile,
    Videos,
    Premium,
}

impl ActiveView {
    pub fn name(&self) -> &'static str {
        match self {
            ActiveView::Home => "home",
            ActiveView::Chat { .. } => "chat",
            ActiveView::Characters => "characters",
            ActiveView::Profile => "profile",
            ActiveView::Videos => "videos",
            ActiveView::Premium => "premium",
        }
    }

    /// The character this view is chatting with, if it is a chat.
    pub fn chat_character(&self) -> Option<CharacterId> {
        match self {
            ActiveView::Chat { character } => Some(*character),
            _ => None,
        }
    }

    pub fn is_chat(&self) -> bool {
        matches!(self, ActiveView::Chat { .. })
    }
}

impl fmt::Display for ActiveView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Panels reachable unconditionally. Chat is deliberately absent; it is
/// only entered through the guarded character select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavTarget {
    Home,
    Characters,
    Profile,
    Videos,
    Premium,
}

impl NavTarget {
    pub fn view(&self) -> ActiveView {
        match self {
            NavTarget::Home => ActiveView::Home,
            NavTarget::Characters => ActiveView::Characters,
            NavTarget::Profile => ActiveView::Profile,
            NavTarget::Videos => ActiveView::Videos,
            NavTarget::Premium => ActiveView::Premium,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NavTarget::Home => "home",
            NavTarget::Characters => "characters",
            NavTarget::Profile => "profile",
            NavTarget::Videos => "videos",
            NavTarget::Premium => "premium",
        }
    }

    pub fn from_name(name: &str) -> Option<NavTarget> {
        match name.to_lowercase().as_str() {
            "home" => Some(NavTarget::Home),
            "characters" => Some(NavTarget::Characters),
            "profile" => Some(NavTarget::Profile),
            "videos" => Some(NavTarget::Videos),
            "premium" => Some(NavTarget::Premium),
            _ => None,
        }
    }

    pub fn all() -> [NavTarget; 5] {
        [
            NavTarget::Home,
            NavTarget::Characters,
            NavTarget::Profile,
            NavTarget::Videos,
            NavTarget::Premium,
        ]
    }
}

impl fmt::Display for NavTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Outcome of asking to open a chat with a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatGate {
    Enter,
    PremiumRequired,
}

/// Premium characters need an unlocked session; everyone else walks in.
pub fn gate_chat(character: &Character, premium_unlocked: bool) -> ChatGate {
    if character.premium && !premium_unlocked {
        ChatGate::PremiumRequired
    } else {
        ChatGate::Enter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_lets_free_characters_in() {
        let luna = Character::builtin(1, "Luna", "Philosopher", "Wise");
        assert_eq!(gate_chat(&luna, false), ChatGate::Enter);
        assert_eq!(gate_chat(&luna, true), ChatGate::Enter);
    }

    #[test]
    fn test_gate_blocks_premium_until_unlocked() {
        let hana = Character::builtin(7, "Hana", "Magical girl", "Bubbly").with_premium();
        assert_eq!(gate_chat(&hana, false), ChatGate::PremiumRequired);
        assert_eq!(gate_chat(&hana, true), ChatGate::Enter);
    }

    #[test]
    fn test_nav_targets_cover_every_non_chat_view() {
        for target in NavTarget::all() {
            let view = target.view();
            assert!(!view.is_chat());
            assert_eq!(view.name(), target.name());
            assert_eq!(NavTarget::from_name(target.name()), Some(target));
        }
        assert_eq!(NavTarget::from_name("chat"), None);
    }

    #[test]
    fn test_chat_view_carries_its_character() {
        let view = ActiveView::Chat {
            character: CharacterId::new(3),
        };
        assert_eq!(view.chat_character(), Some(CharacterId::new(3)));
        assert_eq!(ActiveView::Home.chat_character(), None);
    }
}
