//! Character gallery widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use persona_core::{Category, CategoryFilter, Character};

use crate::ui::theme::ChatTheme;

/// Scrollable list of characters with the cursor row highlighted
pub struct GalleryWidget<'a> {
    characters: &'a [&'a Character],
    selected: usize,
    filter: CategoryFilter,
    premium_unlocked: bool,
    /// Insert a section header whenever the category changes
    grouped: bool,
    theme: &'a ChatTheme,
    focused: bool,
}

impl<'a> GalleryWidget<'a> {
    pub fn new(characters: &'a [&'a Character], theme: &'a ChatTheme) -> Self {
        Self {
            characters,
            selected: 0,
            filter: CategoryFilter::All,
            premium_unlocked: false,
            grouped: false,
            theme,
            focused: true,
        }
    }

    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    pub fn filter(mut self, filter: CategoryFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn premium_unlocked(mut self, unlocked: bool) -> Self {
        self.premium_unlocked = unlocked;
        self
    }

    pub fn grouped(mut self, grouped: bool) -> Self {
        self.grouped = grouped;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Filter tab row with the active filter highlighted
    fn tabs_line(&self) -> Line<'static> {
        let mut spans: Vec<Span> = vec![Span::raw(" ")];
        for (i, option) in CategoryFilter::all().iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" | "));
            }
            let style = if *option == self.filter {
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::DIM)
            };
            spans.push(Span::styled(option.name(), style));
        }
        spans.push(Span::styled(
            "  (Tab)",
            Style::default().add_modifier(Modifier::DIM),
        ));
        Line::from(spans)
    }
}

impl Widget for GalleryWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Characters ")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.focused));

        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines: Vec<Line> = vec![self.tabs_line(), Line::from("")];

        if self.characters.is_empty() {
            lines.push(Line::from(Span::styled(
                "  No characters match this filter",
                self.theme.system_style(),
            )));
            Paragraph::new(lines).render(inner, buf);
            return;
        }

        // The line the cursor row lands on, for the scroll window below
        let mut cursor_line = 0;
        let mut last_category: Option<Category> = None;

        for (row, character) in self.characters.iter().enumerate() {
            if self.grouped && last_category != Some(character.category) {
                last_category = Some(character.category);
                lines.push(Line::from(Span::styled(
                    format!(" {}", character.category.name()),
                    Style::default().add_modifier(Modifier::UNDERLINED | Modifier::DIM),
                )));
            }

            let is_cursor = row == self.selected;
            if is_cursor {
                cursor_line = lines.len();
            }
            let marker = if is_cursor { "▸ " } else { "  " };
            let accent = self.theme.color_for(character.color);

            let name_style = if is_cursor {
                Style::default().fg(accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(accent)
            };

            let mut spans = vec![
                Span::styled(marker.to_string(), name_style),
                Span::raw(format!("{} ", character.avatar)),
                Span::styled(format!("{:<14}", character.name), name_style),
                Span::styled(
                    format!(" {}", character.role),
                    Style::default().add_modifier(Modifier::DIM),
                ),
            ];

            if character.premium {
                let badge = if self.premium_unlocked { " ★" } else { " ★ locked" };
                spans.push(Span::styled(badge.to_string(), self.theme.premium_style()));
            }
            if character.customizable {
                spans.push(Span::styled(
                    " (custom)".to_string(),
                    self.theme.system_style(),
                ));
            }

            lines.push(Line::from(spans));
        }

        // Keep the cursor line inside the visible window
        let visible_rows = inner.height as usize;
        let first_line = if cursor_line >= visible_rows {
            cursor_line + 1 - visible_rows
        } else {
            0
        };
        let window: Vec<Line> = lines
            .into_iter()
            .skip(first_line)
            .take(visible_rows)
            .collect();

        Paragraph::new(window).render(inner, buf);
    }
}
