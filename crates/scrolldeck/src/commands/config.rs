use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::{Config, VALID_KEYS};

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();

    println!("{} {}", "Config file:".bold(), path.display());
    if !path.exists() {
        println!("{}", "(not created yet, showing defaults)".dimmed());
    }
    println!();

    println!("{}", "defaults".bold());
    println!("  theme: {}", config.theme());
    println!("  windowed: {}", config.windowed());
    println!();

    let nav = config.controller_options();
    println!("{}", "navigation".bold());
    println!("  show_progress: {}", nav.show_progress);
    println!("  show_dots: {}", nav.show_dots);
    println!("  show_number: {}", nav.show_number);
    println!("  show_keyboard_hint: {}", nav.show_keyboard_hint);
    println!("  show_fullscreen_button: {}", nav.show_fullscreen_button);
    println!(
        "  back_link: {}",
        nav.back_link.as_deref().unwrap_or("(none)")
    );
    println!("  dot_limit: {}", nav.dot_limit);
    println!("  scroll_debounce_ms: {}", nav.scroll_debounce_ms);
    println!("  settle_delay_ms: {}", nav.settle_delay_ms);
    println!("  completion_timeout_ms: {}", nav.completion_timeout_ms);
    println!("  swipe_threshold: {}", nav.swipe_threshold);
    println!("  settle_mode: {}", nav.settle_mode);
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    if let Err(err) = config.set(key, value) {
        eprintln!("{} {err}", "error:".red().bold());
        eprintln!("{} {}", "Valid keys:".dimmed(), VALID_KEYS.join(", "));
        anyhow::bail!("Configuration not changed");
    }
    let path = config.save()?;
    println!("{} {key} = {value} ({})", "Saved".green(), path.display());
    Ok(())
}
