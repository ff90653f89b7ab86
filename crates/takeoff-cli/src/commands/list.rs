//! List command

use std::path::Path;

use colored::Colorize;
use takeoff_core::scan;

use super::open_project;
use crate::error::Result;

/// Run the list command
pub fn run_list(root: &Path, config: Option<&Path>) -> Result<()> {
    let (store, config) = open_project(root, config)?;
    let modules = scan(&store, &config)?;

    if modules.is_empty() {
        println!("{}", "No take-off modules found.".dimmed());
        return Ok(());
    }

    println!("{}", "Take-off Modules".bold());
    println!();
    for module in &modules {
        let state = match &module.descriptor {
            None => "no descriptor".dimmed(),
            Some(_) if module.registered => "registered".green(),
            Some(d) if !d.has_provider() => "no provider".yellow(),
            Some(_) => "pending".yellow(),
        };
        println!(
            "  {:<32} {:<12} {}",
            module.package.cyan(),
            module.constraint,
            state
        );
    }
    println!();

    let pending = modules
        .iter()
        .filter(|m| m.descriptor.is_some() && !m.registered)
        .count();
    println!(
        "{} {} modules, {} pending. Use {} to install them.",
        "Total:".dimmed(),
        modules.len(),
        pending,
        "takeoff install".cyan()
    );
    Ok(())
}
