//! Event handling for the chat TUI

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use persona_core::{ActiveView, NavTarget};

use crate::app::{App, InputMode};
use crate::form::FormResult;

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    NeedsRedraw,
    Quit,
}

/// Handle a terminal event
pub fn handle_event(app: &mut App, event: Event) -> EventResult {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    // Ctrl-C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return EventResult::Quit;
    }

    // An open overlay consumes every key
    if app.has_overlay() {
        return handle_overlay_key(app, key);
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Insert => handle_insert_mode(app, key),
    }
}

fn handle_overlay_key(app: &mut App, key: KeyEvent) -> EventResult {
    if app.is_help_overlay() {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?') => {
                app.close_overlay();
            }
            _ => {}
        }
        return EventResult::NeedsRedraw;
    }

    let result = match app.form_mut() {
        Some(form) => form.handle_key(key),
        None => return EventResult::Continue,
    };

    match result {
        FormResult::Editing => {}
        FormResult::Cancelled => app.close_overlay(),
        FormResult::Submitted => app.submit_form(),
    }
    EventResult::NeedsRedraw
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('q') => return EventResult::Quit,
        KeyCode::Char('?') => app.toggle_help(),
        // View hotkeys work everywhere in normal mode
        KeyCode::Char('H') => app.navigate(NavTarget::Home),
        KeyCode::Char('C') => app.navigate(NavTarget::Characters),
        KeyCode::Char('P') => app.navigate(NavTarget::Profile),
        KeyCode::Char('V') => app.navigate(NavTarget::Videos),
        KeyCode::Char('M') => app.navigate(NavTarget::Premium),
        _ => return handle_view_keys(app, key),
    }
    EventResult::NeedsRedraw
}

fn handle_view_keys(app: &mut App, key: KeyEvent) -> EventResult {
    match app.session.view() {
        ActiveView::Home | ActiveView::Characters => handle_gallery_keys(app, key),
        ActiveView::Chat { .. } => handle_chat_keys(app, key),
        ActiveView::Premium => handle_premium_keys(app, key),
        ActiveView::Profile | ActiveView::Videos => handle_page_keys(app, key),
    }
}

fn handle_gallery_keys(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_selection_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_selection_up(),
        KeyCode::Enter => app.open_chat_with_selected(),
        KeyCode::Char('c') => app.open_create_form(),
        KeyCode::Char('e') => app.open_edit_form(),
        KeyCode::Char('d') => app.delete_selected(),
        KeyCode::Tab => app.cycle_filter(),
        KeyCode::Esc => app.navigate(NavTarget::Home),
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

fn handle_chat_keys(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('i') | KeyCode::Char('a') => {
            app.input_mode = InputMode::Insert;
        }
        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(1),
        KeyCode::PageDown => app.scroll_down(10),
        KeyCode::PageUp => app.scroll_up(10),
        KeyCode::Char('G') => app.scroll_to_bottom(),
        KeyCode::Char('g') => app.scroll_to_top(),
        KeyCode::Char('b') | KeyCode::Esc => app.leave_chat(),
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

fn handle_premium_keys(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_premium(),
        KeyCode::Esc => app.navigate(NavTarget::Home),
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

fn handle_page_keys(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc => app.navigate(NavTarget::Home),
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

fn handle_insert_mode(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => app.send_current_input(),
        KeyCode::Char(c) => app.type_char(c),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Delete => app.delete(),
        KeyCode::Left => app.cursor_left(),
        KeyCode::Right => app.cursor_right(),
        KeyCode::Home => app.cursor_home(),
        KeyCode::End => app.cursor_end(),
        KeyCode::Up => app.history_prev(),
        KeyCode::Down => app.history_next(),
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> EventResult {
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            if app.session.view().is_chat() {
                app.scroll_up(3);
            } else {
                app.move_selection_up();
            }
            EventResult::NeedsRedraw
        }
        MouseEventKind::ScrollDown => {
            if app.session.view().is_chat() {
                app.scroll_down(3);
            } else {
                app.move_selection_down();
            }
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}
