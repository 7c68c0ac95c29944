//! TUI widgets for the chat app

pub mod card;
pub mod gallery;
pub mod input;
pub mod message_log;
pub mod status_bar;

pub use card::CharacterCardWidget;
pub use gallery::GalleryWidget;
pub use input::InputWidget;
pub use message_log::MessageLogWidget;
pub use status_bar::{HotkeyBarWidget, StatusBarWidget};
