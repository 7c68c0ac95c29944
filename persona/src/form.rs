//! Character create/edit form overlay.
//!
//! A small field-based form for making a new character or editing an
//! existing custom one.

use crossterm::event::{KeyCode, KeyEvent};
use persona_core::{
    Character, CharacterDraft, CharacterId, CharacterPatch, ColorToken, GradientToken,
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::ui::layout::centered_rect_fixed;
use crate::ui::theme::ChatTheme;

/// Avatar choices offered by the form.
pub const AVATAR_CHOICES: [&str; 8] = ["💬", "✨", "🦊", "🤖", "🌙", "🎭", "🐉", "📚"];

/// Fields on the character form, in travel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Role,
    Personality,
    Avatar,
    Color,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Role => "Role",
            FormField::Personality => "Personality",
            FormField::Avatar => "Avatar",
            FormField::Color => "Color",
        }
    }

    pub fn next(&self) -> FormField {
        match self {
            FormField::Name => FormField::Role,
            FormField::Role => FormField::Personality,
            FormField::Personality => FormField::Avatar,
            FormField::Avatar => FormField::Color,
            FormField::Color => FormField::Name,
        }
    }

    pub fn prev(&self) -> FormField {
        match self {
            FormField::Name => FormField::Color,
            FormField::Role => FormField::Name,
            FormField::Personality => FormField::Role,
            FormField::Avatar => FormField::Personality,
            FormField::Color => FormField::Avatar,
        }
    }
}

/// Result of feeding a key to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormResult {
    Editing,
    Cancelled,
    Submitted,
}

/// Character form state.
pub struct CharacterForm {
    /// Character being edited, or None when creating a new one
    target: Option<CharacterId>,
    pub field: FormField,
    pub name: String,
    pub role: String,
    pub personality: String,
    pub avatar_index: usize,
    pub color_index: usize,
    cursor_position: usize,
    pub error: Option<String>,
}

impl CharacterForm {
    /// Start a blank form for a new character.
    pub fn create() -> Self {
        Self {
            target: None,
            field: FormField::Name,
            name: String::new(),
            role: String::new(),
            personality: String::new(),
            avatar_index: 0,
            color_index: 0,
            cursor_position: 0,
            error: None,
        }
    }

    /// Start a form pre-filled from an existing character.
    pub fn edit(character: &Character) -> Self {
        let avatar_index = AVATAR_CHOICES
            .iter()
            .position(|a| *a == character.avatar)
            .unwrap_or(0);
        let color_index = ColorToken::all()
            .iter()
            .position(|c| *c == character.color)
            .unwrap_or(0);
        Self {
            target: Some(character.id),
            field: FormField::Name,
            name: character.name.clone(),
            role: character.role.clone(),
            personality: character.personality.clone(),
            avatar_index,
            color_index,
            cursor_position: character.name.len(),
            error: None,
        }
    }

    /// Id of the character being edited, or None for a create form.
    pub fn target(&self) -> Option<CharacterId> {
        self.target
    }

    pub fn title(&self) -> &'static str {
        if self.target.is_some() {
            " Edit Character "
        } else {
            " New Character "
        }
    }

    fn avatar(&self) -> &'static str {
        AVATAR_CHOICES[self.avatar_index % AVATAR_CHOICES.len()]
    }

    fn color(&self) -> ColorToken {
        let all = ColorToken::all();
        all[self.color_index % all.len()]
    }

    /// Gradient paired with the current color choice.
    fn gradient(&self) -> GradientToken {
        let all = GradientToken::all();
        all[self.color_index % all.len()]
    }

    /// Build a draft for Intent::CreateCharacter.
    pub fn into_draft(self) -> CharacterDraft {
        let avatar = self.avatar();
        let color = self.color();
        let gradient = self.gradient();
        CharacterDraft::new(&self.name)
            .with_role(&self.role)
            .with_personality(&self.personality)
            .with_avatar(avatar)
            .with_colors(color, gradient)
    }

    /// Build a patch for Intent::UpdateCharacter.
    pub fn into_patch(self) -> CharacterPatch {
        let avatar = self.avatar().to_string();
        let color = self.color();
        let gradient = self.gradient();
        CharacterPatch {
            name: Some(self.name),
            role: Some(self.role),
            personality: Some(self.personality),
            avatar: Some(avatar),
            color: Some(color),
            gradient: Some(gradient),
        }
    }

    // ==================== Key handling ====================

    /// Feed one key to the form.
    pub fn handle_key(&mut self, key: KeyEvent) -> FormResult {
        match key.code {
            KeyCode::Esc => return FormResult::Cancelled,
            KeyCode::Enter => {
                if self.name.trim().is_empty() {
                    self.error = Some("Name is required".to_string());
                    self.focus(FormField::Name);
                    return FormResult::Editing;
                }
                return FormResult::Submitted;
            }
            KeyCode::Tab | KeyCode::Down => {
                let next = self.field.next();
                self.focus(next);
            }
            KeyCode::BackTab | KeyCode::Up => {
                let prev = self.field.prev();
                self.focus(prev);
            }
            _ => self.handle_field_key(key),
        }
        FormResult::Editing
    }

    fn focus(&mut self, field: FormField) {
        self.field = field;
        self.cursor_position = self.focused_text().map(str::len).unwrap_or(0);
    }

    /// The focused text field contents, or None on a picker field.
    fn focused_text(&self) -> Option<&str> {
        match self.field {
            FormField::Name => Some(&self.name),
            FormField::Role => Some(&self.role),
            FormField::Personality => Some(&self.personality),
            FormField::Avatar | FormField::Color => None,
        }
    }

    fn handle_field_key(&mut self, key: KeyEvent) {
        match self.field {
            FormField::Name | FormField::Role | FormField::Personality => {
                self.handle_text_key(key);
            }
            FormField::Avatar => match key.code {
                KeyCode::Left | KeyCode::Char('h') => {
                    let len = AVATAR_CHOICES.len();
                    self.avatar_index = (self.avatar_index + len - 1) % len;
                }
                KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
                    self.avatar_index = (self.avatar_index + 1) % AVATAR_CHOICES.len();
                }
                _ => {}
            },
            FormField::Color => match key.code {
                KeyCode::Left | KeyCode::Char('h') => {
                    let len = ColorToken::all().len();
                    self.color_index = (self.color_index + len - 1) % len;
                }
                KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
                    self.color_index = (self.color_index + 1) % ColorToken::all().len();
                }
                _ => {}
            },
        }
    }

    fn handle_text_key(&mut self, key: KeyEvent) {
        let limit = match self.field {
            FormField::Name => 30,
            _ => 80,
        };
        let (text, cursor) = match self.field {
            FormField::Name => (&mut self.name, &mut self.cursor_position),
            FormField::Role => (&mut self.role, &mut self.cursor_position),
            FormField::Personality => (&mut self.personality, &mut self.cursor_position),
            FormField::Avatar | FormField::Color => return,
        };

        match key.code {
            KeyCode::Char(c) => {
                if text.len() < limit {
                    text.insert((*cursor).min(text.len()), c);
                    *cursor += c.len_utf8();
                    self.error = None;
                }
            }
            KeyCode::Backspace => {
                if *cursor > 0 && !text.is_empty() {
                    let remove_at = prev_char_boundary(text, *cursor);
                    text.remove(remove_at);
                    *cursor = remove_at;
                }
            }
            KeyCode::Delete => {
                if *cursor < text.len() {
                    text.remove(*cursor);
                }
            }
            KeyCode::Left => {
                if *cursor > 0 {
                    *cursor = prev_char_boundary(text, *cursor);
                }
            }
            KeyCode::Right => {
                if *cursor < text.len() {
                    *cursor = next_char_boundary(text, *cursor);
                }
            }
            KeyCode::Home => *cursor = 0,
            KeyCode::End => *cursor = text.len(),
            _ => {}
        }
    }

    // ==================== Rendering ====================

    /// Render the form as a centered popup.
    pub fn render(&self, frame: &mut Frame, theme: &ChatTheme, area: Rect) {
        let popup_area = centered_rect_fixed(52, 16, area);
        frame.render_widget(Clear, popup_area);

        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(""));
        lines.push(self.text_field_line(FormField::Name, &self.name, theme));
        lines.push(Line::from(""));
        lines.push(self.text_field_line(FormField::Role, &self.role, theme));
        lines.push(Line::from(""));
        lines.push(self.text_field_line(FormField::Personality, &self.personality, theme));
        lines.push(Line::from(""));
        lines.push(self.picker_line(FormField::Avatar, self.avatar(), theme));
        lines.push(Line::from(""));
        lines.push(self.picker_line(FormField::Color, self.color().name(), theme));
        lines.push(Line::from(""));

        if let Some(error) = &self.error {
            lines.push(Line::from(Span::styled(
                format!("  {error}"),
                Style::default().fg(theme.error),
            )));
        } else {
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            "  Tab next field · ←/→ pick · Enter save · Esc cancel",
            Style::default().add_modifier(Modifier::DIM),
        )));

        let block = Block::default()
            .title(self.title())
            .borders(Borders::ALL)
            .border_style(theme.border_style(true));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, popup_area);
    }

    fn text_field_line<'a>(&self, field: FormField, value: &'a str, theme: &ChatTheme) -> Line<'a> {
        let focused = self.field == field;
        let marker = if focused { "▸ " } else { "  " };
        let label_style = if focused {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let shown = if value.is_empty() && !focused {
            Span::styled("(empty)", Style::default().add_modifier(Modifier::DIM))
        } else if focused {
            Span::styled(format!("{value}▌"), Style::default().fg(theme.accent))
        } else {
            Span::raw(value)
        };
        Line::from(vec![
            Span::styled(format!("{marker}{:<12}", field.label()), label_style),
            shown,
        ])
    }

    fn picker_line(&self, field: FormField, value: &str, theme: &ChatTheme) -> Line<'static> {
        let focused = self.field == field;
        let marker = if focused { "▸ " } else { "  " };
        let label_style = if focused {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let shown = if focused {
            format!("← {value} →")
        } else {
            value.to_string()
        };
        Line::from(vec![
            Span::styled(format!("{marker}{:<12}", field.label()), label_style),
            Span::raw(shown),
        ])
    }
}

/// Byte index of the character boundary before `at`.
fn prev_char_boundary(text: &str, at: usize) -> usize {
    text[..at]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte index of the character boundary after `at`.
fn next_char_boundary(text: &str, at: usize) -> usize {
    text[at..]
        .chars()
        .next()
        .map(|c| at + c.len_utf8())
        .unwrap_or(text.len())
}
