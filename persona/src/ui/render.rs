//! Render orchestration for the chat TUI

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use persona_core::ActiveView;

use crate::app::{App, InputMode};
use crate::form::CharacterForm;
use crate::ui::layout::{centered_rect_fixed, AppLayout, ChatLayout, PageLayout};
use crate::ui::widgets::{
    CharacterCardWidget, GalleryWidget, HotkeyBarWidget, InputWidget, MessageLogWidget,
    StatusBarWidget,
};

/// Overlay types
pub enum Overlay {
    Help,
    Form(CharacterForm),
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    match app.session.view() {
        ActiveView::Home | ActiveView::Characters => render_gallery_view(frame, app, area),
        ActiveView::Chat { .. } => render_chat_view(frame, app, area),
        ActiveView::Profile => render_profile_view(frame, app, area),
        ActiveView::Videos => render_videos_view(frame, app, area),
        ActiveView::Premium => render_premium_view(frame, app, area),
    }

    // Render overlay if present
    if let Some(overlay) = app.overlay() {
        render_overlay(frame, app, overlay, area);
    }
}

/// Render the home/characters gallery (70/30 split)
fn render_gallery_view(frame: &mut Frame, app: &App, area: Rect) {
    let layout = AppLayout::calculate(area);

    render_title_bar(frame, app, layout.title_area);

    let characters = app.gallery();
    let gallery_widget = GalleryWidget::new(&characters, &app.theme)
        .selected(app.gallery_index)
        .filter(app.session.category_filter())
        .premium_unlocked(app.session.is_premium())
        .grouped(matches!(app.session.view(), ActiveView::Characters))
        .focused(true);
    frame.render_widget(gallery_widget, layout.gallery_area);

    let card_widget = CharacterCardWidget::new(app.selected_character(), &app.theme)
        .premium_unlocked(app.session.is_premium());
    frame.render_widget(card_widget, layout.sidebar_area);

    render_status_bar(frame, app, layout.status_bar);
    render_hotkey_bar(frame, app, layout.hotkey_bar);
}

/// Render the chat view
fn render_chat_view(frame: &mut Frame, app: &App, area: Rect) {
    let layout = ChatLayout::calculate(area);

    render_title_bar(frame, app, layout.title_area);

    let name = app
        .session
        .selected_character()
        .map(|c| c.name.as_str())
        .unwrap_or("(deleted)");

    let typing = if app.session.pending_reply_count() > 0 {
        Some(app.animation_frame)
    } else {
        None
    };

    let log_widget = MessageLogWidget::new(app.session.messages(), name, &app.theme)
        .scroll(app.chat_scroll)
        .focused(matches!(app.input_mode, InputMode::Normal))
        .typing(typing);
    frame.render_widget(log_widget, layout.log_area);

    render_status_bar(frame, app, layout.status_bar);
    render_hotkey_bar(frame, app, layout.hotkey_bar);

    let is_active = matches!(app.input_mode, InputMode::Insert);
    let input_widget = InputWidget::new(app.input_buffer(), &app.theme)
        .cursor_position(app.cursor_position())
        .active(is_active)
        .placeholder("Say something...");
    frame.render_widget(input_widget, layout.input_area);
}

/// Render the profile page
fn render_profile_view(frame: &mut Frame, app: &App, area: Rect) {
    let layout = PageLayout::calculate(area);

    render_title_bar(frame, app, layout.title_area);

    let session = &app.session;
    let roster = session.roster();
    let premium_line = if session.is_premium() {
        Span::styled("★ premium unlocked", app.theme.premium_style())
    } else {
        Span::styled("free plan", app.theme.system_style())
    };

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("  Session     "),
            Span::styled(
                session.session_id().to_string(),
                Style::default().add_modifier(Modifier::DIM),
            ),
        ]),
        Line::from(vec![Span::raw("  Plan        "), premium_line]),
        Line::from(format!(
            "  Characters  {} built in, {} created by you",
            roster.builtin_count(),
            roster.custom_count()
        )),
        Line::from(format!(
            "  Messages    {} in the open conversation",
            session.messages().len()
        )),
        Line::from(format!(
            "  Filter      {}",
            session.category_filter().name()
        )),
    ];

    let block = Block::default()
        .title(" Profile ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(false));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        layout.body_area,
    );

    render_status_bar(frame, app, layout.status_bar);
    render_hotkey_bar(frame, app, layout.hotkey_bar);
}

/// Render the videos placeholder page
fn render_videos_view(frame: &mut Frame, app: &App, area: Rect) {
    let layout = PageLayout::calculate(area);

    render_title_bar(frame, app, layout.title_area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  🎬 Video gallery",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  Nothing to watch yet. Check back later.",
            app.theme.system_style(),
        )),
    ];

    let block = Block::default()
        .title(" Videos ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(false));
    frame.render_widget(Paragraph::new(lines).block(block), layout.body_area);

    render_status_bar(frame, app, layout.status_bar);
    render_hotkey_bar(frame, app, layout.hotkey_bar);
}

/// Render the premium page
fn render_premium_view(frame: &mut Frame, app: &App, area: Rect) {
    let layout = PageLayout::calculate(area);

    render_title_bar(frame, app, layout.title_area);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  ★ Persona Premium",
            app.theme.premium_style(),
        )),
        Line::from(""),
    ];

    if app.session.is_premium() {
        lines.push(Line::from("  Premium is active on this session."));
        lines.push(Line::from(Span::styled(
            "  Press Enter to switch back to the free plan.",
            app.theme.system_style(),
        )));
    } else {
        lines.push(Line::from("  Unlock every premium character:"));
        lines.push(Line::from(""));
        for character in app.session.roster().iter().filter(|c| c.premium) {
            lines.push(Line::from(format!(
                "    {} {} — {}",
                character.avatar, character.name, character.role
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Press Enter to unlock.",
            Style::default().add_modifier(Modifier::BOLD),
        )));
    }

    let block = Block::default()
        .title(" Premium ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.premium));
    frame.render_widget(Paragraph::new(lines).block(block), layout.body_area);

    render_status_bar(frame, app, layout.status_bar);
    render_hotkey_bar(frame, app, layout.hotkey_bar);
}

/// Render the title bar
fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let view = app.session.view();
    let title = format!(" persona | {} ", view.name());

    let line = Line::from(Span::styled(
        title,
        Style::default()
            .fg(app.theme.foreground)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let view = app.session.view();
    let status_widget = StatusBarWidget::new(&view, app.input_mode, &app.theme)
        .premium(app.session.is_premium())
        .message_count(app.session.messages().len())
        .pending(app.session.pending_reply_count())
        .message(app.status_message());

    frame.render_widget(status_widget, area);
}

/// Render the hotkey bar
fn render_hotkey_bar(frame: &mut Frame, app: &App, area: Rect) {
    let view = app.session.view();
    let hotkey_widget = HotkeyBarWidget::new(&view, app.input_mode, &app.theme);
    frame.render_widget(hotkey_widget, area);
}

/// Render overlay
fn render_overlay(frame: &mut Frame, app: &App, overlay: &Overlay, area: Rect) {
    match overlay {
        Overlay::Help => render_help_overlay(frame, app, area),
        Overlay::Form(form) => form.render(frame, &app.theme, area),
    }
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_fixed(52, 22, area);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(Span::styled(
            " Persona - Help ",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Views:",
            Style::default().add_modifier(Modifier::UNDERLINED),
        )),
        Line::from("  H/C/P/V/M      Home, Characters, Profile,"),
        Line::from("                 Videos, Premium"),
        Line::from("  Esc            Back to home"),
        Line::from(""),
        Line::from(Span::styled(
            "Gallery:",
            Style::default().add_modifier(Modifier::UNDERLINED),
        )),
        Line::from("  j/k or ↑/↓     Move selection"),
        Line::from("  Enter          Chat with selection"),
        Line::from("  c / e / d      Create / edit / delete"),
        Line::from("  Tab            Cycle category filter"),
        Line::from(""),
        Line::from(Span::styled(
            "Chat:",
            Style::default().add_modifier(Modifier::UNDERLINED),
        )),
        Line::from("  i              Type a message (INSERT)"),
        Line::from("  Enter          Send (in INSERT mode)"),
        Line::from("  j/k, g/G       Scroll the log"),
        Line::from("  Esc            Leave INSERT, then home"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc or q to close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, popup_area);
}
