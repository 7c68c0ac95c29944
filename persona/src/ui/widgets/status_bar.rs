//! Status and hotkey bar widgets

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use persona_core::ActiveView;

use crate::app::InputMode;
use crate::ui::theme::ChatTheme;

/// One-line session summary with the transient status message
pub struct StatusBarWidget<'a> {
    view: &'a ActiveView,
    input_mode: InputMode,
    premium: bool,
    message_count: usize,
    pending: usize,
    message: Option<&'a str>,
    theme: &'a ChatTheme,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(view: &'a ActiveView, input_mode: InputMode, theme: &'a ChatTheme) -> Self {
        Self {
            view,
            input_mode,
            premium: false,
            message_count: 0,
            pending: 0,
            message: None,
            theme,
        }
    }

    pub fn premium(mut self, premium: bool) -> Self {
        self.premium = premium;
        self
    }

    pub fn message_count(mut self, count: usize) -> Self {
        self.message_count = count;
        self
    }

    pub fn pending(mut self, pending: usize) -> Self {
        self.pending = pending;
        self
    }

    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mode_span = match self.input_mode {
            InputMode::Normal => Span::styled(
                "NORMAL",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            InputMode::Insert => Span::styled(
                "INSERT",
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
        };

        let premium_span = if self.premium {
            Span::styled("★ premium", self.theme.premium_style())
        } else {
            Span::styled("free", self.theme.system_style())
        };

        let mut spans = vec![
            Span::styled(
                format!(" {} ", self.view.name()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("| "),
            mode_span,
            Span::raw(" | "),
            premium_span,
        ];

        if self.view.is_chat() {
            spans.push(Span::raw(" | "));
            spans.push(Span::raw(format!("{} messages", self.message_count)));
            if self.pending > 0 {
                spans.push(Span::styled(
                    format!(" ({} typing)", self.pending),
                    self.theme.system_style(),
                ));
            }
        }

        if let Some(message) = self.message {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                message,
                Style::default().fg(self.theme.accent),
            ));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false));

        Paragraph::new(Line::from(spans))
            .block(block)
            .render(area, buf);
    }
}

/// One-line hotkey reference for the current view and mode
pub struct HotkeyBarWidget<'a> {
    view: &'a ActiveView,
    input_mode: InputMode,
    theme: &'a ChatTheme,
}

impl<'a> HotkeyBarWidget<'a> {
    pub fn new(view: &'a ActiveView, input_mode: InputMode, theme: &'a ChatTheme) -> Self {
        Self {
            view,
            input_mode,
            theme,
        }
    }

    fn hints(&self) -> &'static str {
        match (self.view, self.input_mode) {
            (ActiveView::Chat { .. }, InputMode::Insert) => {
                " Enter send · ↑/↓ history · Esc normal mode"
            }
            (ActiveView::Chat { .. }, InputMode::Normal) => {
                " i type · j/k scroll · G bottom · g top · Esc home · ? help · q quit"
            }
            (ActiveView::Home, _) | (ActiveView::Characters, _) => {
                " j/k move · Enter chat · c new · e edit · d delete · Tab filter · ? help · q quit"
            }
            (ActiveView::Premium, _) => " Enter toggle premium · Esc home · q quit",
            (ActiveView::Profile, _) | (ActiveView::Videos, _) => {
                " H home · C characters · P profile · V videos · M premium · q quit"
            }
        }
    }
}

impl Widget for HotkeyBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(Span::styled(self.hints(), self.theme.system_style()));
        Paragraph::new(line).render(area, buf);
    }
}
