//! Character roster: the built-in persona catalog plus user-created entries.
//!
//! Built-ins are fixed for the life of the process; user-created characters
//! support create/update/delete. Listing merges both sources, built-ins first.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Custom character ids are allocated from here upward so they can never
/// collide with catalog ids.
pub const FIRST_CUSTOM_ID: u32 = 1000;

// ============================================================================
// ID Type
// ============================================================================

/// Unique identifier for characters, stable for the session lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CharacterId(pub u32);

impl CharacterId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Whether this id lies in the user-created range.
    pub fn is_custom(&self) -> bool {
        self.0 >= FIRST_CUSTOM_ID
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Categories and Filters
// ============================================================================

/// Which catalog shelf a character belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Default,
    Anime,
    Scenario,
    Custom,
}

impl Category {
    pub fn name(&self) -> &'static str {
        match self {
            Category::Default => "Default",
            Category::Anime => "Anime",
            Category::Scenario => "Scenario",
            Category::Custom => "Custom",
        }
    }

    pub fn all() -> [Category; 4] {
        [
            Category::Default,
            Category::Anime,
            Category::Scenario,
            Category::Custom,
        ]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Gallery filter. User-created characters are always visible, so `Custom`
/// is not a filter value; selecting a shelf narrows built-ins only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Default,
    Anime,
    Scenario,
}

impl CategoryFilter {
    pub fn name(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Default => "Default",
            CategoryFilter::Anime => "Anime",
            CategoryFilter::Scenario => "Scenario",
        }
    }

    pub fn all() -> [CategoryFilter; 4] {
        [
            CategoryFilter::All,
            CategoryFilter::Default,
            CategoryFilter::Anime,
            CategoryFilter::Scenario,
        ]
    }

    /// The next filter in display order, wrapping. Used by tab cycling.
    pub fn next(&self) -> CategoryFilter {
        match self {
            CategoryFilter::All => CategoryFilter::Default,
            CategoryFilter::Default => CategoryFilter::Anime,
            CategoryFilter::Anime => CategoryFilter::Scenario,
            CategoryFilter::Scenario => CategoryFilter::All,
        }
    }

    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Default => category == Category::Default,
            CategoryFilter::Anime => category == Category::Anime,
            CategoryFilter::Scenario => category == Category::Scenario,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Presentation Tokens
// ============================================================================

/// Accent color token for a character's avatar and chat bubbles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorToken {
    #[default]
    Purple,
    Blue,
    Cyan,
    Teal,
    Green,
    Gold,
    Orange,
    Red,
    Pink,
}

impl ColorToken {
    pub fn name(&self) -> &'static str {
        match self {
            ColorToken::Purple => "purple",
            ColorToken::Blue => "blue",
            ColorToken::Cyan => "cyan",
            ColorToken::Teal => "teal",
            ColorToken::Green => "green",
            ColorToken::Gold => "gold",
            ColorToken::Orange => "orange",
            ColorToken::Red => "red",
            ColorToken::Pink => "pink",
        }
    }

    pub fn all() -> [ColorToken; 9] {
        [
            ColorToken::Purple,
            ColorToken::Blue,
            ColorToken::Cyan,
            ColorToken::Teal,
            ColorToken::Green,
            ColorToken::Gold,
            ColorToken::Orange,
            ColorToken::Red,
            ColorToken::Pink,
        ]
    }
}

/// Two-stop gradient token for character cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradientToken {
    #[default]
    PurpleToBlue,
    OrangeToRed,
    PinkToPurple,
    CyanToBlue,
    GreenToTeal,
    RedToGold,
}

impl GradientToken {
    pub fn name(&self) -> &'static str {
        match self {
            GradientToken::PurpleToBlue => "purple-blue",
            GradientToken::OrangeToRed => "orange-red",
            GradientToken::PinkToPurple => "pink-purple",
            GradientToken::CyanToBlue => "cyan-blue",
            GradientToken::GreenToTeal => "green-teal",
            GradientToken::RedToGold => "red-gold",
        }
    }

    /// The gradient's color stops, for renderers that fake gradients with
    /// two accents.
    pub fn endpoints(&self) -> (ColorToken, ColorToken) {
        match self {
            GradientToken::PurpleToBlue => (ColorToken::Purple, ColorToken::Blue),
            GradientToken::OrangeToRed => (ColorToken::Orange, ColorToken::Red),
            GradientToken::PinkToPurple => (ColorToken::Pink, ColorToken::Purple),
            GradientToken::CyanToBlue => (ColorToken::Cyan, ColorToken::Blue),
            GradientToken::GreenToTeal => (ColorToken::Green, ColorToken::Teal),
            GradientToken::RedToGold => (ColorToken::Red, ColorToken::Gold),
        }
    }

    pub fn all() -> [GradientToken; 6] {
        [
            GradientToken::PurpleToBlue,
            GradientToken::OrangeToRed,
            GradientToken::PinkToPurple,
            GradientToken::CyanToBlue,
            GradientToken::GreenToTeal,
            GradientToken::RedToGold,
        ]
    }
}

// ============================================================================
// Character
// ============================================================================

/// A chat persona: either a catalog built-in or a user-created entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    /// Short role line shown under the name, e.g. "Philosopher".
    pub role: String,
    /// Free-text persona description; also spliced into the greeting.
    pub personality: String,
    /// Avatar glyph (an emoji).
    pub avatar: String,
    pub color: ColorToken,
    pub gradient: GradientToken,
    pub category: Category,
    /// Premium characters require an unlocked session to chat with.
    pub premium: bool,
    /// True only for user-created characters; built-ins are immutable.
    pub customizable: bool,
}

impl Character {
    /// A catalog entry. Presentation defaults are overridden with the
    /// `with_*` builders below.
    pub fn builtin(id: u32, name: &str, role: &str, personality: &str) -> Self {
        Self {
            id: CharacterId::new(id),
            name: name.to_string(),
            role: role.to_string(),
            personality: personality.to_string(),
            avatar: "💬".to_string(),
            color: ColorToken::default(),
            gradient: GradientToken::default(),
            category: Category::Default,
            premium: false,
            customizable: false,
        }
    }

    /// A user-created entry built from a draft. Always customizable and
    /// categorized `Custom`.
    pub fn custom(id: CharacterId, draft: CharacterDraft) -> Self {
        Self {
            id,
            name: draft.name,
            role: draft.role,
            personality: draft.personality,
            avatar: draft.avatar,
            color: draft.color,
            gradient: draft.gradient,
            category: Category::Custom,
            premium: false,
            customizable: true,
        }
    }

    pub fn with_avatar(mut self, avatar: &str) -> Self {
        self.avatar = avatar.to_string();
        self
    }

    pub fn with_colors(mut self, color: ColorToken, gradient: GradientToken) -> Self {
        self.color = color;
        self.gradient = gradient;
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_premium(mut self) -> Self {
        self.premium = true;
        self
    }
}

/// Fields the user supplies when creating a character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterDraft {
    pub name: String,
    pub role: String,
    pub personality: String,
    pub avatar: String,
    pub color: ColorToken,
    pub gradient: GradientToken,
}

impl CharacterDraft {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            avatar: "💬".to_string(),
            ..Self::default()
        }
    }

    pub fn with_role(mut self, role: &str) -> Self {
        self.role = role.to_string();
        self
    }

    pub fn with_personality(mut self, personality: &str) -> Self {
        self.personality = personality.to_string();
        self
    }

    pub fn with_avatar(mut self, avatar: &str) -> Self {
        self.avatar = avatar.to_string();
        self
    }

    pub fn with_colors(mut self, color: ColorToken, gradient: GradientToken) -> Self {
        self.color = color;
        self.gradient = gradient;
        self
    }
}

/// Partial edit of a user-created character. `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterPatch {
    pub name: Option<String>,
    pub role: Option<String>,
    pub personality: Option<String>,
    pub avatar: Option<String>,
    pub color: Option<ColorToken>,
    pub gradient: Option<GradientToken>,
}

impl CharacterPatch {
    pub fn rename(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }

    pub fn apply_to(&self, character: &mut Character) {
        if let Some(name) = &self.name {
            character.name = name.clone();
        }
        if let Some(role) = &self.role {
            character.role = role.clone();
        }
        if let Some(personality) = &self.personality {
            character.personality = personality.clone();
        }
        if let Some(avatar) = &self.avatar {
            character.avatar = avatar.clone();
        }
        if let Some(color) = self.color {
            character.color = color;
        }
        if let Some(gradient) = self.gradient {
            character.gradient = gradient;
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Errors from roster operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("character name cannot be empty")]
    EmptyName,

    #[error("no user-created character with id {0}")]
    NotFound(CharacterId),
}

// ============================================================================
// Roster Store
// ============================================================================

/// The merged character store: fixed built-ins plus a mutable user-created
/// set. Ids are unique across both; custom ids are never reused, even after
/// a delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    builtins: Vec<Character>,
    custom: Vec<Character>,
    next_custom_id: u32,
}

impl Roster {
    /// A roster seeded with the standard catalog.
    pub fn new() -> Self {
        Self::with_builtins(BUILTIN_CHARACTERS.clone())
    }

    /// A roster with a caller-supplied catalog. Tests use this to keep
    /// fixtures small.
    pub fn with_builtins(builtins: Vec<Character>) -> Self {
        Self {
            builtins,
            custom: Vec::new(),
            next_custom_id: FIRST_CUSTOM_ID,
        }
    }

    /// All characters visible under `filter`: built-ins matching the filter,
    /// then every user-created character (those are never filtered out).
    /// Insertion order is preserved within each source.
    pub fn list(&self, filter: CategoryFilter) -> Vec<&Character> {
        self.builtins
            .iter()
            .filter(|c| filter.matches(c.category))
            .chain(self.custom.iter())
            .collect()
    }

    /// Every character, unfiltered, built-ins first.
    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.builtins.iter().chain(self.custom.iter())
    }

    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: CharacterId) -> bool {
        self.get(id).is_some()
    }

    /// Find a character by case-insensitive name, built-ins first.
    pub fn find_by_name(&self, name: &str) -> Option<&Character> {
        let name_lower = name.to_lowercase();
        self.iter().find(|c| c.name.to_lowercase() == name_lower)
    }

    /// Resolve a character by decimal id or case-insensitive name.
    pub fn resolve(&self, key: &str) -> Option<&Character> {
        let key = key.trim();
        if let Ok(raw) = key.parse::<u32>() {
            return self.get(CharacterId::new(raw));
        }
        self.find_by_name(key)
    }

    /// Create a user-created character from a draft. The new entry gets a
    /// fresh id, `category = Custom`, and `customizable = true`.
    pub fn create(&mut self, draft: CharacterDraft) -> Result<Character, RosterError> {
        if draft.name.trim().is_empty() {
            return Err(RosterError::EmptyName);
        }
        let id = CharacterId::new(self.next_custom_id);
        self.next_custom_id += 1;
        let character = Character::custom(id, draft);
        self.custom.push(character.clone());
        Ok(character)
    }

    /// Patch a user-created character in place. Built-in and unknown ids are
    /// rejected; a patch renaming to an empty string is rejected too.
    pub fn update(
        &mut self,
        id: CharacterId,
        patch: CharacterPatch,
    ) -> Result<Character, RosterError> {
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(RosterError::EmptyName);
            }
        }
        let character = self
            .custom
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(RosterError::NotFound(id))?;
        patch.apply_to(character);
        Ok(character.clone())
    }

    /// Remove a user-created character. Silently a no-op for built-in or
    /// unknown ids; returns whether anything was removed.
    pub fn delete(&mut self, id: CharacterId) -> bool {
        let before = self.custom.len();
        self.custom.retain(|c| c.id != id);
        self.custom.len() != before
    }

    pub fn builtin_count(&self) -> usize {
        self.builtins.len()
    }

    pub fn custom_count(&self) -> usize {
        self.custom.len()
    }

    pub fn len(&self) -> usize {
        self.builtins.len() + self.custom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Built-in Catalog
// ============================================================================

lazy_static::lazy_static! {
    /// The standard persona catalog: the four classic companions plus the
    /// anime and scenario shelves. Two entries are premium-locked.
    pub static ref BUILTIN_CHARACTERS: Vec<Character> = vec![
        // Default shelf
        Character::builtin(1, "Luna", "Philosopher",
            "Wise and mysterious, loves talking about the meaning of life and the stars")
            .with_avatar("🌙")
            .with_colors(ColorToken::Purple, GradientToken::PurpleToBlue),
        Character::builtin(2, "Max", "Adventurer",
            "Energetic and brave, always ready for new discoveries")
            .with_avatar("🗺️")
            .with_colors(ColorToken::Orange, GradientToken::OrangeToRed),
        Character::builtin(3, "Sakura", "Artist",
            "A creative soul who sees beauty in every detail")
            .with_avatar("🌸")
            .with_colors(ColorToken::Pink, GradientToken::PinkToPurple),
        Character::builtin(4, "Neo", "Tech guru",
            "Fascinated by technology and the future of humanity")
            .with_avatar("🤖")
            .with_colors(ColorToken::Blue, GradientToken::CyanToBlue),

        // Anime shelf
        Character::builtin(5, "Yuki", "Shrine maiden",
            "Gentle and dutiful, tends an old mountain shrine and its fox spirits")
            .with_avatar("⛩️")
            .with_colors(ColorToken::Red, GradientToken::RedToGold)
            .with_category(Category::Anime),
        Character::builtin(6, "Kenji", "Wandering samurai",
            "Stoic swordsman drifting between villages in search of a worthy cause")
            .with_avatar("⚔️")
            .with_colors(ColorToken::Teal, GradientToken::GreenToTeal)
            .with_category(Category::Anime),
        Character::builtin(7, "Hana", "Magical girl",
            "Bubbly transfer student hiding a wand and a world-saving side job")
            .with_avatar("🌟")
            .with_colors(ColorToken::Pink, GradientToken::PinkToPurple)
            .with_category(Category::Anime)
            .with_premium(),

        // Scenario shelf
        Character::builtin(8, "Captain Vega", "Starship captain",
            "Commands the survey ship Meridian on the far rim of known space")
            .with_avatar("🚀")
            .with_colors(ColorToken::Cyan, GradientToken::CyanToBlue)
            .with_category(Category::Scenario)
            .with_premium(),
        Character::builtin(9, "Professor Ash", "Detective",
            "Sharp-eyed investigator who treats every conversation as a puzzle")
            .with_avatar("🔍")
            .with_colors(ColorToken::Gold, GradientToken::RedToGold)
            .with_category(Category::Scenario),
        Character::builtin(10, "Mira", "Dragon tamer",
            "Raised among dragons and happier around them than people")
            .with_avatar("🐉")
            .with_colors(ColorToken::Green, GradientToken::GreenToTeal)
            .with_category(Category::Scenario),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_roster() -> Roster {
        Roster::with_builtins(vec![
            Character::builtin(1, "Luna", "Philosopher", "Wise and mysterious"),
            Character::builtin(2, "Yuki", "Shrine maiden", "Gentle and dutiful")
                .with_category(Category::Anime)
                .with_premium(),
        ])
    }

    #[test]
    fn test_catalog_ids_unique() {
        let mut ids: Vec<u32> = BUILTIN_CHARACTERS.iter().map(|c| c.id.0).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), BUILTIN_CHARACTERS.len());
        assert!(ids.iter().all(|&id| id < FIRST_CUSTOM_ID));
    }

    #[test]
    fn test_catalog_has_premium_entries() {
        assert!(BUILTIN_CHARACTERS.iter().any(|c| c.premium));
        assert!(BUILTIN_CHARACTERS.iter().all(|c| !c.customizable));
    }

    #[test]
    fn test_create_assigns_fresh_ids() {
        let mut roster = small_roster();
        let a = roster.create(CharacterDraft::new("Rin")).unwrap();
        let b = roster.create(CharacterDraft::new("Rin")).unwrap();
        assert_eq!(a.id, CharacterId::new(FIRST_CUSTOM_ID));
        assert_eq!(b.id, CharacterId::new(FIRST_CUSTOM_ID + 1));
        assert!(a.customizable);
        assert_eq!(a.category, Category::Custom);
        assert!(!a.premium);
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let mut roster = small_roster();
        assert_eq!(
            roster.create(CharacterDraft::new("   ")),
            Err(RosterError::EmptyName)
        );
        assert_eq!(roster.custom_count(), 0);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut roster = small_roster();
        let a = roster.create(CharacterDraft::new("Rin")).unwrap();
        assert!(roster.delete(a.id));
        let b = roster.create(CharacterDraft::new("Ren")).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_update_patches_only_given_fields() {
        let mut roster = small_roster();
        let created = roster
            .create(
                CharacterDraft::new("Rin")
                    .with_role("Poet")
                    .with_personality("Quiet"),
            )
            .unwrap();
        let updated = roster
            .update(created.id, CharacterPatch::rename("Ren"))
            .unwrap();
        assert_eq!(updated.name, "Ren");
        assert_eq!(updated.role, "Poet");
        assert_eq!(updated.personality, "Quiet");
    }

    #[test]
    fn test_update_rejects_builtin_and_unknown() {
        let mut roster = small_roster();
        let builtin_id = CharacterId::new(1);
        assert_eq!(
            roster.update(builtin_id, CharacterPatch::rename("Loona")),
            Err(RosterError::NotFound(builtin_id))
        );
        let ghost = CharacterId::new(4242);
        assert_eq!(
            roster.update(ghost, CharacterPatch::rename("Ghost")),
            Err(RosterError::NotFound(ghost))
        );
        // originals untouched
        assert_eq!(roster.get(builtin_id).unwrap().name, "Luna");
    }

    #[test]
    fn test_delete_is_silent_for_builtins() {
        let mut roster = small_roster();
        assert!(!roster.delete(CharacterId::new(1)));
        assert!(!roster.delete(CharacterId::new(999)));
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_list_filters_builtins_only() {
        let mut roster = small_roster();
        roster.create(CharacterDraft::new("Rin")).unwrap();

        let anime = roster.list(CategoryFilter::Anime);
        assert_eq!(anime.len(), 2);
        assert_eq!(anime[0].name, "Yuki");
        assert_eq!(anime[1].name, "Rin"); // custom always shown

        let default = roster.list(CategoryFilter::Default);
        assert_eq!(default.len(), 2);
        assert_eq!(default[0].name, "Luna");
        assert_eq!(default[1].name, "Rin");
    }

    #[test]
    fn test_list_order_builtins_first() {
        let mut roster = small_roster();
        roster.create(CharacterDraft::new("Rin")).unwrap();
        roster.create(CharacterDraft::new("Ren")).unwrap();
        let names: Vec<&str> = roster
            .list(CategoryFilter::All)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Luna", "Yuki", "Rin", "Ren"]);
    }

    #[test]
    fn test_find_by_name_case_insensitive() {
        let roster = small_roster();
        assert!(roster.find_by_name("luna").is_some());
        assert!(roster.find_by_name("LUNA").is_some());
        assert!(roster.find_by_name("nobody").is_none());
    }

    #[test]
    fn test_resolve_by_id_or_name() {
        let roster = small_roster();
        assert_eq!(roster.resolve("1").map(|c| c.name.as_str()), Some("Luna"));
        assert_eq!(
            roster.resolve(" yuki ").map(|c| c.name.as_str()),
            Some("Yuki")
        );
        assert!(roster.resolve("99").is_none());
    }
}
