//! Init command - write an example wikibias.toml

use anyhow::{Context, Result};
use console::style;
use std::path::Path;
use wikibias::config::{Settings, EXAMPLE_CONFIG, PROJECT_CONFIG_FILE};

/// Run the init command
pub fn run(dir: &Path) -> Result<()> {
    let config_path = dir.join(PROJECT_CONFIG_FILE);

    if config_path.exists() {
        println!(
            "{} Already initialized: {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
    } else {
        std::fs::write(&config_path, EXAMPLE_CONFIG)
            .with_context(|| format!("Failed to create {}", config_path.display()))?;
        println!(
            "{} Created {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
    }

    if let Some(user_path) = Settings::user_config_path() {
        println!(
            "  {} user-wide settings can live in {}",
            style("i").dim(),
            style(user_path.display()).dim()
        );
    }

    println!("\nNext steps:");
    println!("  {} Analyze one topic", style("wikibias topic \"climate change\"").cyan());
    println!("  {} Analyze the configured topics", style("wikibias run").cyan());

    Ok(())
}
