//! Color theme and styling for the chat TUI

use persona_core::{ColorToken, GradientToken, Sender};
use ratatui::style::{Color, Modifier, Style};

/// Chat UI color theme
#[derive(Debug, Clone)]
pub struct ChatTheme {
    // Base colors
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,
    pub accent: Color,

    // Text colors
    pub user_text: Color,
    pub character_text: Color,
    pub system_text: Color,

    // Badges
    pub premium: Color,
    pub error: Color,
}

impl Default for ChatTheme {
    fn default() -> Self {
        Self {
            background: Color::Reset,
            foreground: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Magenta,
            accent: Color::Magenta,

            user_text: Color::Cyan,
            character_text: Color::White,
            system_text: Color::DarkGray,

            premium: Color::Yellow,
            error: Color::Red,
        }
    }
}

impl ChatTheme {
    /// Get style for user messages
    pub fn user_style(&self) -> Style {
        Style::default().fg(self.user_text)
    }

    /// Get style for character messages
    pub fn character_style(&self) -> Style {
        Style::default().fg(self.character_text)
    }

    /// Get style for system hints
    pub fn system_style(&self) -> Style {
        Style::default()
            .fg(self.system_text)
            .add_modifier(Modifier::DIM)
    }

    /// Get style for a message sender
    pub fn sender_style(&self, sender: Sender) -> Style {
        match sender {
            Sender::User => self.user_style(),
            Sender::Character => self.character_style(),
        }
    }

    /// Get style for the premium badge
    pub fn premium_style(&self) -> Style {
        Style::default()
            .fg(self.premium)
            .add_modifier(Modifier::BOLD)
    }

    /// Get border style
    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }

    /// Get title style
    pub fn title_style(&self, focused: bool) -> Style {
        let style = Style::default().fg(if focused {
            self.border_focused
        } else {
            self.foreground
        });

        if focused {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    /// Terminal color for a character color token
    pub fn color_for(&self, token: ColorToken) -> Color {
        match token {
            ColorToken::Purple => Color::Magenta,
            ColorToken::Blue => Color::Blue,
            ColorToken::Cyan => Color::Cyan,
            ColorToken::Teal => Color::LightCyan,
            ColorToken::Green => Color::Green,
            ColorToken::Gold => Color::Yellow,
            ColorToken::Orange => Color::LightRed,
            ColorToken::Red => Color::Red,
            ColorToken::Pink => Color::LightMagenta,
        }
    }

    /// Accent pair approximating a card gradient
    pub fn gradient_accents(&self, gradient: GradientToken) -> (Color, Color) {
        let (start, end) = gradient.endpoints();
        (self.color_for(start), self.color_for(end))
    }
}
