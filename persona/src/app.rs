//! Main application state and logic

use std::collections::VecDeque;

use persona_core::{
    ActiveView, Character, ChatSession, Intent, NavTarget,
};

use crate::form::CharacterForm;
use crate::ui::theme::ChatTheme;
use crate::ui::Overlay;

/// Input mode for vim-style modal input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Insert,
}

/// Main application state
pub struct App {
    /// The chat session (roster, conversation, routing)
    pub session: ChatSession,

    /// UI theme
    pub theme: ChatTheme,

    /// Current input mode
    pub input_mode: InputMode,

    /// Current input buffer
    input_buffer: String,

    /// Cursor position in input (character index, not byte index)
    cursor_position: usize,

    /// Input history (newest first)
    pub input_history: VecDeque<String>,

    /// Current position when browsing history
    pub history_index: Option<usize>,

    /// Saved partial input while browsing history
    saved_input: Option<String>,

    /// Highlighted row in the character gallery
    pub gallery_index: usize,

    /// Scroll offset in the message log
    pub chat_scroll: usize,

    /// Whether the message log follows new messages
    pub scroll_locked_to_bottom: bool,

    /// Animation frame counter for the typing indicator
    pub animation_frame: u8,

    /// Active overlay, if any
    overlay: Option<Overlay>,

    /// Status message
    status_message: Option<String>,

    /// Whether the app should quit
    pub should_quit: bool,
}

impl App {
    /// Create a new app around a chat session
    pub fn new(session: ChatSession) -> Self {
        let mut app = Self {
            session,
            theme: ChatTheme::default(),
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            cursor_position: 0,
            input_history: VecDeque::new(),
            history_index: None,
            saved_input: None,
            gallery_index: 0,
            chat_scroll: 0,
            scroll_locked_to_bottom: true,
            animation_frame: 0,
            overlay: None,
            status_message: None,
            should_quit: false,
        };
        app.set_status("j/k browse, Enter chat, c create, ? help");
        app
    }

    /// Dispatch an intent, routing any error to the status line.
    ///
    /// Returns true when the intent was accepted.
    pub fn dispatch(&mut self, intent: Intent) -> bool {
        match self.session.dispatch(intent) {
            Ok(()) => true,
            Err(e) => {
                self.set_status(format!("{e}"));
                false
            }
        }
    }

    /// Advance timers and deliver any due replies
    pub fn tick(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
        let delivered = self.session.poll_replies();
        if delivered > 0 && self.scroll_locked_to_bottom {
            self.scroll_to_bottom();
        }
    }

    // ==================== Gallery ====================

    /// Characters visible under the current category filter
    pub fn gallery(&self) -> Vec<&Character> {
        self.session.visible_characters()
    }

    pub fn gallery_len(&self) -> usize {
        self.gallery().len()
    }

    /// The character under the gallery cursor
    pub fn selected_character(&self) -> Option<&Character> {
        let index = self.gallery_index;
        self.gallery().into_iter().nth(index)
    }

    pub fn move_selection_up(&mut self) {
        self.gallery_index = self.gallery_index.saturating_sub(1);
    }

    pub fn move_selection_down(&mut self) {
        let len = self.gallery_len();
        if len > 0 && self.gallery_index + 1 < len {
            self.gallery_index += 1;
        }
    }

    /// Keep the gallery cursor on a real row after the list shrinks
    pub fn clamp_gallery_index(&mut self) {
        let len = self.gallery_len();
        if len == 0 {
            self.gallery_index = 0;
        } else if self.gallery_index >= len {
            self.gallery_index = len - 1;
        }
    }

    /// Advance the category filter to its next setting
    pub fn cycle_filter(&mut self) {
        let next = self.session.category_filter().next();
        if self.dispatch(Intent::SetCategoryFilter(next)) {
            self.clamp_gallery_index();
            self.set_status(format!("Filter: {}", next.name()));
        }
    }

    // ==================== Chat ====================

    /// Open a chat with the character under the gallery cursor.
    ///
    /// Premium characters route to the premium page instead when the
    /// session is not unlocked.
    pub fn open_chat_with_selected(&mut self) {
        let Some(character) = self.selected_character() else {
            self.set_status("No character selected");
            return;
        };
        let id = character.id;
        let name = character.name.clone();

        if !self.dispatch(Intent::SelectCharacter(id)) {
            return;
        }

        match self.session.view() {
            ActiveView::Chat { .. } => {
                self.input_mode = InputMode::Insert;
                self.scroll_to_bottom();
                self.set_status(format!("Chatting with {name}"));
            }
            ActiveView::Premium => {
                self.set_status(format!("{name} is premium. Press Enter to unlock."));
            }
            _ => {}
        }
    }

    /// Send the input buffer as a chat message
    pub fn send_current_input(&mut self) {
        let Some(text) = self.submit_input() else {
            return;
        };
        if self.dispatch(Intent::SendMessage(text)) {
            self.scroll_to_bottom();
        }
    }

    /// Leave the chat and return to the home gallery
    pub fn leave_chat(&mut self) {
        self.input_mode = InputMode::Normal;
        self.dispatch(Intent::Navigate(NavTarget::Home));
    }

    // ==================== Navigation ====================

    pub fn navigate(&mut self, target: NavTarget) {
        self.input_mode = InputMode::Normal;
        if self.dispatch(Intent::Navigate(target)) {
            self.clamp_gallery_index();
            self.clear_status();
        }
    }

    /// Flip the premium flag for this session
    pub fn toggle_premium(&mut self) {
        let unlocked = self.session.is_premium();
        if self.dispatch(Intent::SetPremium(!unlocked)) {
            if unlocked {
                self.set_status("Premium disabled");
            } else {
                self.set_status("Premium unlocked! Every character is available");
            }
        }
    }

    // ==================== Character forms ====================

    pub fn open_create_form(&mut self) {
        self.overlay = Some(Overlay::Form(CharacterForm::create()));
    }

    pub fn open_edit_form(&mut self) {
        let Some(character) = self.selected_character() else {
            self.set_status("No character selected");
            return;
        };
        if !character.customizable {
            self.set_status(format!("{} is built in and cannot be edited", character.name));
            return;
        }
        self.overlay = Some(Overlay::Form(CharacterForm::edit(character)));
    }

    /// Apply the open form as a create or an update
    pub fn submit_form(&mut self) {
        let Some(Overlay::Form(form)) = self.overlay.take() else {
            return;
        };

        match form.target() {
            None => {
                let draft = form.into_draft();
                let name = draft.name.clone();
                if self.dispatch(Intent::CreateCharacter(draft)) {
                    self.clamp_gallery_index();
                    self.set_status(format!("Created {name}"));
                }
            }
            Some(id) => {
                let patch = form.into_patch();
                if self.dispatch(Intent::UpdateCharacter(id, patch)) {
                    self.set_status("Character updated");
                }
            }
        }
    }

    /// Delete the character under the gallery cursor
    pub fn delete_selected(&mut self) {
        let Some(character) = self.selected_character() else {
            self.set_status("No character selected");
            return;
        };
        if !character.customizable {
            self.set_status(format!("{} is built in and cannot be deleted", character.name));
            return;
        }
        let id = character.id;
        let name = character.name.clone();
        if self.dispatch(Intent::DeleteCharacter(id)) {
            self.clamp_gallery_index();
            self.set_status(format!("Deleted {name}"));
        }
    }

    // ==================== Overlays ====================

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        if matches!(self.overlay, Some(Overlay::Help)) {
            self.overlay = None;
        } else {
            self.overlay = Some(Overlay::Help);
        }
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn is_help_overlay(&self) -> bool {
        matches!(self.overlay, Some(Overlay::Help))
    }

    pub fn form_mut(&mut self) -> Option<&mut CharacterForm> {
        match self.overlay.as_mut() {
            Some(Overlay::Form(form)) => Some(form),
            _ => None,
        }
    }

    /// Close any open overlay
    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    // ==================== Message log scrolling ====================

    /// Scroll the log to the bottom and lock it there
    pub fn scroll_to_bottom(&mut self) {
        // Set to max value - the widget caps it to the actual max_scroll
        self.chat_scroll = usize::MAX / 2;
        self.scroll_locked_to_bottom = true;
    }

    /// Estimate max scroll based on message content
    /// Uses a conservative estimate assuming ~50 char effective width
    fn estimate_max_scroll(&self) -> usize {
        const ESTIMATED_WIDTH: usize = 50;
        const ESTIMATED_VISIBLE_HEIGHT: usize = 20;

        let estimated_lines: usize = self
            .session
            .conversation()
            .messages()
            .iter()
            .map(|message| {
                message
                    .text
                    .lines()
                    .map(|line| (line.len() / ESTIMATED_WIDTH).max(1))
                    .sum::<usize>()
                    + 1 // blank line between messages
            })
            .sum();

        estimated_lines.saturating_sub(ESTIMATED_VISIBLE_HEIGHT)
    }

    /// Scroll the log up (unlocks from bottom)
    pub fn scroll_up(&mut self, lines: usize) {
        // A huge "bottom" value snaps back to the estimated max first
        let max_scroll = self.estimate_max_scroll();
        if self.chat_scroll > max_scroll {
            self.chat_scroll = max_scroll;
        }
        self.chat_scroll = self.chat_scroll.saturating_sub(lines);
        self.scroll_locked_to_bottom = false;
    }

    /// Scroll the log down
    pub fn scroll_down(&mut self, lines: usize) {
        self.chat_scroll = self.chat_scroll.saturating_add(lines);
        // Cap to a reasonable max to prevent overflow issues
        let max_scroll = self.estimate_max_scroll();
        self.chat_scroll = self.chat_scroll.min(max_scroll + 100);
        // Re-locking to bottom takes an explicit G
    }

    pub fn scroll_to_top(&mut self) {
        self.chat_scroll = 0;
        self.scroll_locked_to_bottom = false;
    }

    // ==================== Input buffer ====================

    /// Take the input buffer for sending, recording it in history
    pub fn submit_input(&mut self) -> Option<String> {
        if self.input_buffer.is_empty() {
            return None;
        }

        let input = std::mem::take(&mut self.input_buffer);
        self.cursor_position = 0;

        self.input_history.push_front(input.clone());
        if self.input_history.len() > 100 {
            self.input_history.pop_back();
        }
        self.history_index = None;
        self.saved_input = None;

        Some(input)
    }

    /// Handle a typed character (unicode-safe)
    pub fn type_char(&mut self, c: char) {
        // Convert cursor position (character index) to byte index
        let byte_pos = self
            .input_buffer
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.input_buffer.len());
        self.input_buffer.insert(byte_pos, c);
        self.cursor_position += 1;
    }

    /// Handle backspace (unicode-safe)
    pub fn backspace(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            if let Some((byte_pos, ch)) = self.input_buffer.char_indices().nth(self.cursor_position)
            {
                self.input_buffer
                    .replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
            }
        }
    }

    /// Handle delete (unicode-safe)
    pub fn delete(&mut self) {
        let char_count = self.input_buffer.chars().count();
        if self.cursor_position < char_count {
            if let Some((byte_pos, ch)) = self.input_buffer.char_indices().nth(self.cursor_position)
            {
                self.input_buffer
                    .replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
            }
        }
    }

    /// Move cursor left
    pub fn cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    /// Move cursor right
    pub fn cursor_right(&mut self) {
        let char_count = self.input_buffer.chars().count();
        self.cursor_position = (self.cursor_position + 1).min(char_count);
    }

    /// Move cursor to start
    pub fn cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    /// Move cursor to end (unicode-safe)
    pub fn cursor_end(&mut self) {
        self.cursor_position = self.input_buffer.chars().count();
    }

    /// Navigate to previous input in history
    pub fn history_prev(&mut self) {
        if self.input_history.is_empty() {
            return;
        }

        // Save current input when just starting to browse history
        if self.history_index.is_none() && !self.input_buffer.is_empty() {
            self.saved_input = Some(self.input_buffer.clone());
        }

        let new_index = match self.history_index {
            None => Some(0),
            Some(i) if i + 1 < self.input_history.len() => Some(i + 1),
            Some(i) => Some(i), // Already at oldest
        };

        if let Some(idx) = new_index {
            if let Some(entry) = self.input_history.get(idx) {
                self.input_buffer = entry.clone();
                self.cursor_position = self.input_buffer.chars().count();
                self.history_index = new_index;
            }
        }
    }

    /// Navigate to next input in history
    pub fn history_next(&mut self) {
        match self.history_index {
            None => {
                // Already at "new input", nothing to do
            }
            Some(0) => {
                // Return to saved input or empty
                self.input_buffer = self.saved_input.take().unwrap_or_default();
                self.cursor_position = self.input_buffer.chars().count();
                self.history_index = None;
            }
            Some(i) => {
                if let Some(entry) = self.input_history.get(i - 1) {
                    self.input_buffer = entry.clone();
                    self.cursor_position = self.input_buffer.chars().count();
                    self.history_index = Some(i - 1);
                }
            }
        }
    }

    // ==================== Getters / setters ====================

    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}
