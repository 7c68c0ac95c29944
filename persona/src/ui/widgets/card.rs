//! Character card widget for sidebar display

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use persona_core::Character;

use crate::ui::theme::ChatTheme;

/// Compact character card for the gallery sidebar
pub struct CharacterCardWidget<'a> {
    character: Option<&'a Character>,
    premium_unlocked: bool,
    theme: &'a ChatTheme,
}

impl<'a> CharacterCardWidget<'a> {
    pub fn new(character: Option<&'a Character>, theme: &'a ChatTheme) -> Self {
        Self {
            character,
            premium_unlocked: false,
            theme,
        }
    }

    pub fn premium_unlocked(mut self, unlocked: bool) -> Self {
        self.premium_unlocked = unlocked;
        self
    }
}

impl Widget for CharacterCardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(character) = self.character else {
            let block = Block::default()
                .title(" Card ")
                .borders(Borders::ALL)
                .border_style(self.theme.border_style(false));
            let inner = block.inner(area);
            block.render(area, buf);
            Paragraph::new(Line::from(Span::styled(
                "Nothing selected",
                self.theme.system_style(),
            )))
            .render(inner, buf);
            return;
        };

        let (start, end) = self.theme.gradient_accents(character.gradient);

        let block = Block::default()
            .title(format!(" {} {} ", character.avatar, character.name))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(start));

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Role
                Constraint::Length(1), // Category line
                Constraint::Length(1), // blank
                Constraint::Min(0),    // Personality
            ])
            .split(inner);

        let role_line = Line::from(Span::styled(
            character.role.clone(),
            Style::default().fg(end).add_modifier(Modifier::ITALIC),
        ));
        Paragraph::new(role_line).render(chunks[0], buf);

        let mut badges = vec![Span::styled(
            character.category.name().to_string(),
            Style::default().add_modifier(Modifier::DIM),
        )];
        if character.premium {
            let badge = if self.premium_unlocked {
                " · ★ unlocked"
            } else {
                " · ★ premium"
            };
            badges.push(Span::styled(badge.to_string(), self.theme.premium_style()));
        }
        if character.customizable {
            badges.push(Span::styled(
                " · editable".to_string(),
                self.theme.system_style(),
            ));
        }
        Paragraph::new(Line::from(badges)).render(chunks[1], buf);

        if chunks[3].height > 0 {
            Paragraph::new(character.personality.clone())
                .wrap(Wrap { trim: false })
                .render(chunks[3], buf);
        }
    }
}
