//! Catalog command - list the reference catalog.

use std::path::PathBuf;

use colored::Colorize;

use super::load_catalog;

pub fn run(json_output: bool, catalog: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load_catalog(catalog.as_deref())?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(catalog.as_ref())?);
        return Ok(());
    }

    println!(
        "{} {} tests",
        "Reference catalog:".cyan().bold(),
        catalog.len().to_string().white().bold()
    );
    println!();

    for (key, entry) in &catalog.entries {
        let range = entry
            .range
            .map(|r| format!("{} - {}", r.low, r.high))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<14} {:<18} {:<8} {}",
            catalog.display_name(key).white().bold(),
            range,
            entry.unit.as_deref().unwrap_or("-"),
            entry.aliases.join(", ").dimmed()
        );
    }

    if !catalog.unit_synonyms.is_empty() {
        println!();
        println!("{}", "Unit synonyms:".cyan().bold());
        for (raw, canonical) in &catalog.unit_synonyms {
            println!("  {} -> {}", raw, canonical);
        }
    }

    Ok(())
}
