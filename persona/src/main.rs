//! Persona: a character chat app for your terminal.
//!
//! Browse a gallery of chat personas, create your own, and trade messages
//! in a vim-flavored TUI.
//!
//! # Headless Mode
//!
//! Run with `--headless` for a line-oriented interface suited to scripts
//! and automated checks:
//!
//! ```bash
//! persona --headless --seed 42
//! ```

mod app;
mod events;
mod form;
mod headless;
mod ui;

use std::io::{self, stdout};
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use persona_core::ChatSession;

use crate::app::App;
use crate::events::{handle_event, EventResult};
use crate::ui::render::render;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    let config = headless::parse_config_from_args(&args);

    if args.iter().any(|a| a == "--headless") {
        return headless::run_headless(config);
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let session = ChatSession::with_config(config);
    let result = run_app(&mut terminal, App::new(session));

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

/// Main application loop
fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> io::Result<()> {
    loop {
        terminal.draw(|frame| render(frame, &app))?;

        // Poll for events with a timeout so pending replies keep flowing
        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;
            match handle_event(&mut app, ev) {
                EventResult::Quit => return Ok(()),
                EventResult::NeedsRedraw | EventResult::Continue => {}
            }
        } else {
            app.tick();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn print_help() {
    println!("persona - character chat for your terminal");
    println!();
    println!("USAGE:");
    println!("    persona [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show this help");
    println!("    --headless       Run the line-oriented interface");
    println!("    --premium        Start with premium unlocked");
    println!("    --seed <N>       Seed the reply picker for repeatable runs");
    println!("    --delay <MS>     Reply delay in milliseconds (default 1000)");
    println!();
    println!("KEYS (TUI):");
    println!("    j/k              Move through the character gallery");
    println!("    Enter            Chat with the selected character");
    println!("    i                Type a message, Enter sends it");
    println!("    c / e / d        Create / edit / delete a character");
    println!("    Tab              Cycle the category filter");
    println!("    H/C/P/V/M        Jump to home, characters, profile,");
    println!("                     videos, premium");
    println!("    ?                Help overlay");
    println!("    q                Quit");
}
