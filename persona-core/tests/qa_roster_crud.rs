//! QA tests for roster CRUD and gallery filtering.
//!
//! These tests run against the standard catalog through dispatched intents,
//! the same path a front end takes.
//!
//! Run with: `cargo test -p persona-core --test qa_roster_crud`

use persona_core::testing::TestHarness;
use persona_core::{
    Category, CategoryFilter, CharacterDraft, CharacterId, CharacterPatch, ChatError, Intent,
    RosterError,
};

// =============================================================================
// CATALOG SANITY
// =============================================================================

#[test]
fn test_standard_catalog_shape() {
    let harness = TestHarness::new();
    let roster = harness.session.roster();

    assert_eq!(roster.builtin_count(), 10);
    assert_eq!(roster.custom_count(), 0);

    let count = |category: Category| roster.iter().filter(|c| c.category == category).count();
    assert_eq!(count(Category::Default), 4);
    assert_eq!(count(Category::Anime), 3);
    assert_eq!(count(Category::Scenario), 3);
    assert_eq!(count(Category::Custom), 0);

    assert_eq!(roster.iter().filter(|c| c.premium).count(), 2);
    assert!(roster.iter().all(|c| !c.customizable));

    // the four classic companions are present
    for name in ["Luna", "Max", "Sakura", "Neo"] {
        assert!(roster.find_by_name(name).is_some(), "missing {name}");
    }
}

// =============================================================================
// CREATE / UPDATE / DELETE THROUGH DISPATCH
// =============================================================================

#[test]
fn test_created_character_appears_once_in_gallery() {
    let mut harness = TestHarness::new();
    let before = harness.session.visible_characters().len();

    harness
        .dispatch(Intent::CreateCharacter(
            CharacterDraft::new("Rin").with_role("Poet"),
        ))
        .unwrap();

    let visible = harness.session.visible_characters();
    assert_eq!(visible.len(), before + 1);

    let rins: Vec<_> = visible.iter().filter(|c| c.name == "Rin").collect();
    assert_eq!(rins.len(), 1);
    let rin = rins[0];
    assert!(rin.customizable);
    assert_eq!(rin.category, Category::Custom);
    assert!(!rin.premium);
    assert!(rin.id.is_custom());
}

#[test]
fn test_create_rejects_empty_name() {
    let mut harness = TestHarness::new();
    let err = harness
        .dispatch(Intent::CreateCharacter(CharacterDraft::new("  ")))
        .unwrap_err();
    assert_eq!(err, ChatError::Roster(RosterError::EmptyName));
    assert_eq!(harness.session.roster().custom_count(), 0);
}

#[test]
fn test_update_edits_only_user_characters() {
    let mut harness = TestHarness::new();
    harness
        .dispatch(Intent::CreateCharacter(CharacterDraft::new("Rin")))
        .unwrap();
    let rin = harness
        .session
        .roster()
        .find_by_name("Rin")
        .map(|c| c.id)
        .unwrap();

    harness
        .dispatch(Intent::UpdateCharacter(rin, CharacterPatch::rename("Ren")))
        .unwrap();
    assert_eq!(harness.session.roster().get(rin).unwrap().name, "Ren");

    // built-ins are immutable
    let luna = harness
        .session
        .roster()
        .find_by_name("Luna")
        .map(|c| c.id)
        .unwrap();
    let err = harness
        .dispatch(Intent::UpdateCharacter(
            luna,
            CharacterPatch::rename("Loona"),
        ))
        .unwrap_err();
    assert_eq!(err, ChatError::Roster(RosterError::NotFound(luna)));
    assert_eq!(harness.session.roster().get(luna).unwrap().name, "Luna");
}

#[test]
fn test_delete_is_silent_and_scoped() {
    let mut harness = TestHarness::new();
    let total = harness.session.roster().len();

    // deleting a built-in or a ghost succeeds as a no-op
    harness
        .dispatch(Intent::DeleteCharacter(CharacterId::new(1)))
        .unwrap();
    harness
        .dispatch(Intent::DeleteCharacter(CharacterId::new(4242)))
        .unwrap();
    assert_eq!(harness.session.roster().len(), total);

    harness
        .dispatch(Intent::CreateCharacter(CharacterDraft::new("Rin")))
        .unwrap();
    let rin = harness
        .session
        .roster()
        .find_by_name("Rin")
        .map(|c| c.id)
        .unwrap();
    harness.dispatch(Intent::DeleteCharacter(rin)).unwrap();
    assert_eq!(harness.session.roster().len(), total);
    assert!(harness.session.roster().get(rin).is_none());
}

#[test]
fn test_deleting_selected_character_keeps_chat_open() {
    let mut harness = TestHarness::new();
    harness
        .dispatch(Intent::CreateCharacter(CharacterDraft::new("Rin")))
        .unwrap();
    let rin = harness
        .session
        .roster()
        .find_by_name("Rin")
        .map(|c| c.id)
        .unwrap();
    harness.select("Rin").unwrap();
    harness.send("hello?").unwrap();

    harness.dispatch(Intent::DeleteCharacter(rin)).unwrap();
    assert!(harness.session.view().is_chat());
    // the roster lookup is gone but the log keeps reading fine
    assert!(harness.session.selected_character().is_none());
    assert_eq!(harness.message_count(), 2);
    assert_eq!(harness.wait_for_reply(), 1);
}

// =============================================================================
// GALLERY FILTERING
// =============================================================================

#[test]
fn test_filter_narrows_builtins_but_never_customs() {
    let mut harness = TestHarness::new();
    harness
        .dispatch(Intent::CreateCharacter(CharacterDraft::new("Rin")))
        .unwrap();

    harness
        .dispatch(Intent::SetCategoryFilter(CategoryFilter::Anime))
        .unwrap();
    let visible = harness.session.visible_characters();
    assert_eq!(visible.len(), 4); // 3 anime built-ins + Rin
    assert!(visible
        .iter()
        .all(|c| c.category == Category::Anime || c.customizable));
    assert!(visible.iter().any(|c| c.name == "Rin"));

    harness
        .dispatch(Intent::SetCategoryFilter(CategoryFilter::All))
        .unwrap();
    assert_eq!(harness.session.visible_characters().len(), 11);
}

#[test]
fn test_gallery_orders_builtins_before_customs() {
    let mut harness = TestHarness::new();
    harness
        .dispatch(Intent::CreateCharacter(CharacterDraft::new("Zed")))
        .unwrap();
    harness
        .dispatch(Intent::CreateCharacter(CharacterDraft::new("Abe")))
        .unwrap();

    let names: Vec<&str> = harness
        .session
        .visible_characters()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names[0], "Luna"); // catalog order, not alphabetical
    let zed = names.iter().position(|n| *n == "Zed").unwrap();
    let abe = names.iter().position(|n| *n == "Abe").unwrap();
    assert!(zed > 9 && abe > zed); // customs trail in insertion order
}
