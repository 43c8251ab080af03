//! Config command implementation.
//!
//! Manages CLI configuration.

use anyhow::Result;
use mentaculous_ops::{Config, CONFIG_KEYS};

/// Show current configuration.
pub fn show(config: &Config) -> Result<()> {
    println!("Mentaculous Configuration");
    println!("{:-<40}", "");

    for key in CONFIG_KEYS {
        println!(
            "{:<22} {}",
            format!("{}:", key),
            config.get(key).unwrap_or_else(|| "(not set)".to_string())
        );
    }

    println!(
        "{:<22} {}",
        "backup:",
        if config.has_backup() {
            "configured"
        } else {
            "not configured"
        }
    );

    if let Some(config_path) = Config::config_file_path() {
        println!("\nConfig file: {}", config_path.display());
    }

    Ok(())
}

/// Set a configuration value in the config file.
///
/// Starts from the file alone so environment overrides are not saved.
pub fn set(key: &str, value: &str) -> Result<()> {
    if !CONFIG_KEYS.contains(&key) {
        anyhow::bail!(
            "Unknown config key: {}. Valid keys: {}",
            key,
            CONFIG_KEYS.join(", ")
        );
    }
    let mut config = Config::load_file()?;
    config.set(key, value)?;

    if key == "supabase_key" {
        println!("✅ Set supabase_key");
        println!("⚠️  Keys are not written to the config file. Use SUPABASE_ANON_KEY instead.");
    } else {
        println!("Set {} to: {}", key, value);
    }

    config.save()?;
    Ok(())
}

/// Get a configuration value.
pub fn get(config: &Config, key: &str) -> Result<()> {
    if !CONFIG_KEYS.contains(&key) {
        anyhow::bail!("Unknown config key: {}", key);
    }
    let value = config
        .get(key)
        .unwrap_or_else(|| "(not set)".to_string());
    println!("{}", value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn reset() -> Result<()> {
    let config = Config::default();
    config.save()?;
    println!("Configuration reset to defaults");
    Ok(())
}
