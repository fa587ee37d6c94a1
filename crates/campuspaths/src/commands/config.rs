use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = if path.exists() {
        Config::load_from(&path)?
    } else {
        println!("{}", "No config file yet, showing defaults.".dimmed());
        Config::default()
    };

    println!("{} {}", "Config file:".bold(), path.display());
    println!();
    for (key, value) in effective(&config) {
        println!("  {} {value}", format!("{key:<28}").cyan());
    }
    Ok(())
}

/// Every key with the value in effect, defaults included.
fn effective(config: &Config) -> Vec<(&'static str, String)> {
    vec![
        ("server.base_url", config.base_url().to_string()),
        ("assets.campus_map", config.campus_map().to_string()),
        ("assets.start_marker", config.start_marker().to_string()),
        (
            "assets.destination_marker",
            config.destination_marker().to_string(),
        ),
    ]
}

fn set(key: &str, value: &str) -> Result<()> {
    let path = Config::path()?;
    let mut config = if path.exists() {
        Config::load_from(&path)?
    } else {
        Config::default()
    };
    config.set(key, value)?;
    let written = config.save()?;
    println!("{} {key} = {value}", "Set".green());
    tracing::debug!("wrote {}", written.display());
    Ok(())
}
