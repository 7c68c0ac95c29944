//! Headless mode for the chat app.
//!
//! This module provides a simple text-based interface for driving a chat
//! session without a TUI. It's designed for scripted runs and automated
//! checks.

use persona_core::{
    CategoryFilter, CharacterDraft, HeadlessChat, Intent, NavTarget, SessionConfig,
};
use std::io::{self, BufRead, Write};

/// Run the app in headless mode.
///
/// This provides a simple line-oriented protocol:
/// - Lines starting with `#` are commands (select, roster, state, quit)
/// - All other lines are sent as chat messages
pub fn run_headless(config: SessionConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut chat = HeadlessChat::with_config(config);

    // Print initial session info
    println!("=== Persona Headless Mode ===");
    println!("View: {}", chat.view_name());
    print_roster(&chat);
    println!();
    println!("Commands:");
    println!("  #select <name|id>  - Choose who to chat with");
    println!("  #roster            - List characters");
    println!("  #create <name>     - Create a character");
    println!("  #delete <name|id>  - Delete a created character");
    println!("  #filter <category> - all, default, anime, scenario");
    println!("  #nav <view>        - home, characters, profile, videos, premium");
    println!("  #premium on|off    - Toggle the premium flag");
    println!("  #status            - Show current session status");
    println!("  #state             - Dump the session state as JSON");
    println!("  #help              - Show this help");
    println!("  #quit              - Exit");
    println!();
    println!("Enter your messages (one per line):");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error reading input: {e}");
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        // Handle commands
        if let Some(command) = line.strip_prefix('#') {
            if handle_command(&mut chat, command) {
                break;
            }
            stdout.flush().ok();
            continue;
        }

        // Wait out the reply delay in real time, then deliver
        print!("[TYPING]");
        stdout.flush().ok();
        let delay_ms = chat.session().reply_delay().num_milliseconds().max(0) as u64;
        std::thread::sleep(std::time::Duration::from_millis(delay_ms));
        print!("\r        \r");
        stdout.flush().ok();

        match chat.send(line) {
            Ok(reply) => {
                let name = chat
                    .session()
                    .selected_character()
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| "?".to_string());
                println!("[{name}] {reply}");
            }
            Err(e) => println!("[ERROR] {e}"),
        }
        stdout.flush().ok();
    }

    Ok(())
}

/// Handle a `#` command. Returns true when the session should end.
fn handle_command(chat: &mut HeadlessChat, command: &str) -> bool {
    let parts: Vec<&str> = command.split_whitespace().collect();
    match parts.first().copied() {
        Some("quit") | Some("exit") => {
            println!("Goodbye!");
            return true;
        }
        Some("select") => {
            if parts.len() > 1 {
                let key = parts[1..].join(" ");
                match chat.select(&key) {
                    Ok(()) => match chat.view_name() {
                        "premium" => println!("[PREMIUM] That character needs premium. Try #premium on."),
                        _ => {
                            let greeting = chat
                                .session()
                                .messages()
                                .last()
                                .map(|m| m.text.clone())
                                .unwrap_or_default();
                            println!("[SELECTED] {greeting}");
                        }
                    },
                    Err(e) => println!("[ERROR] {e}"),
                }
            } else {
                println!("[ERROR] Usage: #select <name|id>");
            }
        }
        Some("roster") => print_roster(chat),
        Some("create") => {
            if parts.len() > 1 {
                let name = parts[1];
                let role = parts[2..].join(" ");
                let draft = CharacterDraft::new(name).with_role(&role);
                match chat.session_mut().dispatch(Intent::CreateCharacter(draft)) {
                    Ok(()) => {
                        let id = chat
                            .session()
                            .roster()
                            .resolve(name)
                            .map(|c| c.id.to_string())
                            .unwrap_or_default();
                        println!("[CREATED] {name} ({id})");
                    }
                    Err(e) => println!("[ERROR] {e}"),
                }
            } else {
                println!("[ERROR] Usage: #create <name> [role...]");
            }
        }
        Some("delete") => {
            if parts.len() > 1 {
                let key = parts[1..].join(" ");
                match chat.session().roster().resolve(&key) {
                    Some(character) if character.customizable => {
                        let id = character.id;
                        let name = character.name.clone();
                        match chat.session_mut().dispatch(Intent::DeleteCharacter(id)) {
                            Ok(()) => println!("[DELETED] {name}"),
                            Err(e) => println!("[ERROR] {e}"),
                        }
                    }
                    Some(character) => {
                        println!("[ERROR] {} is built in and cannot be deleted", character.name)
                    }
                    None => println!("[ERROR] No character matches '{key}'"),
                }
            } else {
                println!("[ERROR] Usage: #delete <name|id>");
            }
        }
        Some("filter") => {
            let filter = parts.get(1).and_then(|s| parse_filter(s));
            match filter {
                Some(filter) => {
                    if chat
                        .session_mut()
                        .dispatch(Intent::SetCategoryFilter(filter))
                        .is_ok()
                    {
                        println!("[FILTER] {}", filter.name());
                        print_roster(chat);
                    }
                }
                None => println!("[ERROR] Usage: #filter <all|default|anime|scenario>"),
            }
        }
        Some("nav") => {
            let target = parts.get(1).and_then(|s| NavTarget::from_name(s));
            match target {
                Some(target) => {
                    if chat.session_mut().dispatch(Intent::Navigate(target)).is_ok() {
                        println!("[VIEW] {}", chat.view_name());
                    }
                }
                None => println!("[ERROR] Usage: #nav <home|characters|profile|videos|premium>"),
            }
        }
        Some("premium") => match parts.get(1).copied() {
            Some("on") => {
                chat.unlock_premium();
                println!("[PREMIUM] unlocked");
            }
            Some("off") => {
                chat.session_mut().dispatch(Intent::SetPremium(false)).ok();
                println!("[PREMIUM] off");
            }
            _ => println!("[ERROR] Usage: #premium on|off"),
        },
        Some("status") => {
            let session = chat.session();
            println!("[STATUS]");
            println!("  View: {}", chat.view_name());
            if let Some(character) = session.selected_character() {
                println!("  Chatting with: {} {}", character.avatar, character.name);
            }
            println!("  Premium: {}", session.is_premium());
            println!("  Filter: {}", session.category_filter().name());
            println!("  Messages: {}", session.messages().len());
            println!("  Pending replies: {}", session.pending_reply_count());
        }
        Some("state") => match chat.state_json() {
            Ok(json) => println!("{json}"),
            Err(e) => println!("[ERROR] State dump failed: {e}"),
        },
        Some("help") => {
            println!("[HELP]");
            println!("  #select <name|id>  - Choose who to chat with");
            println!("  #roster            - List characters");
            println!("  #create <name>     - Create a character");
            println!("  #delete <name|id>  - Delete a created character");
            println!("  #filter <category> - all, default, anime, scenario");
            println!("  #nav <view>        - home, characters, profile, videos, premium");
            println!("  #premium on|off    - Toggle the premium flag");
            println!("  #status            - Show current session status");
            println!("  #state             - Dump the session state as JSON");
            println!("  #quit              - Exit");
            println!("  (anything else is sent as a chat message)");
        }
        _ => {
            println!("[ERROR] Unknown command. Type #help for help.");
        }
    }
    false
}

fn print_roster(chat: &HeadlessChat) {
    let session = chat.session();
    println!("Characters ({}):", session.category_filter().name());
    for character in session.visible_characters() {
        let premium = if character.premium { " [premium]" } else { "" };
        let custom = if character.customizable { " [custom]" } else { "" };
        println!(
            "  {:>4}  {} {} — {}{}{}",
            character.id, character.avatar, character.name, character.role, premium, custom
        );
    }
}

fn parse_filter(s: &str) -> Option<CategoryFilter> {
    match s.to_lowercase().as_str() {
        "all" => Some(CategoryFilter::All),
        "default" => Some(CategoryFilter::Default),
        "anime" => Some(CategoryFilter::Anime),
        "scenario" => Some(CategoryFilter::Scenario),
        _ => None,
    }
}

/// Parse session configuration from command line arguments.
pub fn parse_config_from_args(args: &[String]) -> SessionConfig {
    let mut config = SessionConfig::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--premium" => {
                config = config.with_premium();
            }
            "--seed" => {
                if let Some(seed) = args.get(i + 1).and_then(|s| s.parse().ok()) {
                    config = config.with_rng_seed(seed);
                    i += 1;
                }
            }
            "--delay" => {
                if let Some(millis) = args.get(i + 1).and_then(|s| s.parse().ok()) {
                    config = config.with_reply_delay_ms(millis);
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }

    config
}
