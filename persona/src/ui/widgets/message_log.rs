//! Message log widget for the chat view

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::scrollbar,
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
        StatefulWidget, Widget, Wrap,
    },
};

use persona_core::{Message, Sender};

use crate::ui::theme::ChatTheme;

/// Widget for displaying the conversation log
pub struct MessageLogWidget<'a> {
    messages: &'a [Message],
    character_name: &'a str,
    scroll: usize,
    theme: &'a ChatTheme,
    focused: bool,
    /// Animation frame while a reply is pending, None otherwise
    typing_frame: Option<u8>,
}

impl<'a> MessageLogWidget<'a> {
    pub fn new(messages: &'a [Message], character_name: &'a str, theme: &'a ChatTheme) -> Self {
        Self {
            messages,
            character_name,
            scroll: 0,
            theme,
            focused: false,
            typing_frame: None,
        }
    }

    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn typing(mut self, frame: Option<u8>) -> Self {
        self.typing_frame = frame;
        self
    }
}

impl Widget for MessageLogWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.focused {
            format!(" {} [j/k scroll] ", self.character_name)
        } else {
            format!(" {} ", self.character_name)
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.focused));

        let inner = block.inner(area);
        block.render(area, buf);

        // Build lines from messages
        let mut lines: Vec<Line> = Vec::new();

        for message in self.messages {
            let style = self.theme.sender_style(message.sender);

            let prefix = match message.sender {
                Sender::User => "> ".to_string(),
                Sender::Character => format!("{}: ", self.character_name),
            };

            let stamp = message.timestamp.format("%H:%M");
            lines.push(Line::from(vec![
                Span::styled(format!("[{stamp}] "), self.theme.system_style()),
                Span::styled(format!("{}{}", prefix, message.text), style),
            ]));

            // Blank line between messages
            lines.push(Line::from(""));
        }

        // Typing indicator while a reply is pending
        if let Some(frame) = self.typing_frame {
            let dots = match (frame / 2) % 4 {
                0 => "",
                1 => ".",
                2 => "..",
                _ => "...",
            };
            lines.push(Line::from(Span::styled(
                format!("{} is typing{}", self.character_name, dots),
                self.theme.system_style().add_modifier(Modifier::ITALIC),
            )));
        }

        // Calculate scroll position
        let visible_height = inner.height as usize;
        let total_lines = lines.len();
        let max_scroll = total_lines.saturating_sub(visible_height);
        let scroll = self.scroll.min(max_scroll);

        let paragraph = Paragraph::new(lines)
            .scroll((scroll as u16, 0))
            .wrap(Wrap { trim: false });

        paragraph.render(inner, buf);

        // Render scrollbar if content exceeds visible area
        if total_lines > visible_height {
            let scrollbar_area = Rect {
                x: inner.x + inner.width.saturating_sub(1),
                y: inner.y,
                width: 1,
                height: inner.height,
            };

            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .symbols(scrollbar::VERTICAL)
                .thumb_style(Style::default().fg(Color::DarkGray))
                .track_style(Style::default().fg(Color::Black))
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));

            let mut scrollbar_state = ScrollbarState::new(max_scroll).position(scroll);

            scrollbar.render(scrollbar_area, buf, &mut scrollbar_state);

            // Scroll position hint at top when scrolled down
            if scroll > 0 {
                let hint = format!(" ↑{scroll} ");
                let hint_style = Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::DIM);
                for (i, ch) in hint.chars().enumerate() {
                    let x = inner.x + (i as u16);
                    if x < inner.x + inner.width.saturating_sub(2) {
                        buf[(x, inner.y)].set_char(ch).set_style(hint_style);
                    }
                }
            }

            // Hint at bottom when more content below
            if scroll < max_scroll {
                let remaining = max_scroll - scroll;
                let hint = format!(" ↓{remaining} more ");
                let hint_y = inner.y + inner.height.saturating_sub(1);
                let hint_style = Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::DIM);
                for (i, ch) in hint.chars().enumerate() {
                    let x = inner.x + (i as u16);
                    if x < inner.x + inner.width.saturating_sub(2) {
                        buf[(x, hint_y)].set_char(ch).set_style(hint_style);
                    }
                }
            }
        }
    }
}
