//! Layout calculations for the chat TUI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout for gallery-style views (70/30 split)
pub struct AppLayout {
    pub title_area: Rect,
    pub gallery_area: Rect,
    pub sidebar_area: Rect,
    pub status_bar: Rect,
    pub hotkey_bar: Rect,
}

impl AppLayout {
    pub fn calculate(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title bar
                Constraint::Min(5),    // Main content
                Constraint::Length(3), // Status bar
                Constraint::Length(1), // Hotkey bar
            ])
            .split(area);

        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(vertical[1]);

        Self {
            title_area: vertical[0],
            gallery_area: horizontal[0],
            sidebar_area: horizontal[1],
            status_bar: vertical[2],
            hotkey_bar: vertical[3],
        }
    }
}

/// Layout for the chat view
pub struct ChatLayout {
    pub title_area: Rect,
    pub log_area: Rect,
    pub status_bar: Rect,
    pub hotkey_bar: Rect,
    pub input_area: Rect,
}

impl ChatLayout {
    pub fn calculate(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title bar
                Constraint::Min(5),    // Message log
                Constraint::Length(3), // Status bar
                Constraint::Length(1), // Hotkey bar
                Constraint::Length(3), // Input
            ])
            .split(area);

        Self {
            title_area: vertical[0],
            log_area: vertical[1],
            status_bar: vertical[2],
            hotkey_bar: vertical[3],
            input_area: vertical[4],
        }
    }
}

/// Layout for full-page views (profile, videos, premium)
pub struct PageLayout {
    pub title_area: Rect,
    pub body_area: Rect,
    pub status_bar: Rect,
    pub hotkey_bar: Rect,
}

impl PageLayout {
    pub fn calculate(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            title_area: vertical[0],
            body_area: vertical[1],
            status_bar: vertical[2],
            hotkey_bar: vertical[3],
        }
    }
}

/// A centered rect of fixed size, clamped to the containing area
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width,
        height,
    }
}
