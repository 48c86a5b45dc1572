use anyhow::Result;
use clap::Args;
use colored::Colorize;
use lintmux_engine::{builtin_registry, AnalysisDescriptor, Registry};

use crate::exit;

#[derive(Args)]
pub struct CatalogArgs {
    /// Emit the catalog as JSON.
    #[arg(long)]
    json: bool,

    /// Disable colored output.
    #[arg(long)]
    no_color: bool,
}

impl CatalogArgs {
    pub fn execute(&self) -> Result<i32> {
        if self.no_color {
            colored::control::set_override(false);
        }
        let registry = builtin_registry();

        if self.json {
            println!("{}", catalog_json(&registry)?);
        } else {
            print_catalog(&registry);
        }
        Ok(exit::SUCCESS)
    }
}

fn print_catalog(registry: &Registry) {
    println!("{}", "Enabled by default:".bold());
    for entry in registry.all().iter().filter(|e| e.enabled_by_default()) {
        print_entry(entry);
    }

    println!();
    println!("{}", "Disabled by default:".bold());
    for entry in registry.all().iter().filter(|e| !e.enabled_by_default()) {
        print_entry(entry);
    }

    println!();
    println!("{}", "Presets:".bold());
    for name in registry.preset_names() {
        if let Some(members) = registry.preset(name) {
            println!("  {}: {}", name.green(), members.join(", "));
        }
    }
}

fn print_entry(entry: &AnalysisDescriptor) {
    let mut tags = vec![if entry.is_slow() { "slow" } else { "fast" }];
    if entry.needs_source_index() {
        tags.push("indexed");
    }

    let aliases = if entry.aliases().is_empty() {
        String::new()
    } else {
        format!(" ({})", entry.aliases().join(", "))
    };
    let group = match entry.group() {
        Some(group) => format!(" [group: {group}]"),
        None => String::new(),
    };

    println!(
        "  {}{aliases}: {} [{}]{group}",
        entry.name().green(),
        entry.description(),
        tags.join(", ")
    );
}

fn catalog_json(registry: &Registry) -> Result<String> {
    let entries: Vec<serde_json::Value> = registry
        .all()
        .iter()
        .map(|entry| {
            serde_json::json!({
                "name": entry.name(),
                "description": entry.description(),
                "aliases": entry.aliases(),
                "group": entry.group(),
                "default": entry.enabled_by_default(),
                "slow": entry.is_slow(),
                "needs_source_index": entry.needs_source_index(),
            })
        })
        .collect();

    let presets: serde_json::Value = registry
        .preset_names()
        .into_iter()
        .map(|name| (name.to_string(), serde_json::json!(registry.preset(name))))
        .collect::<serde_json::Map<String, serde_json::Value>>()
        .into();

    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "analyses": entries,
        "presets": presets,
    }))?)
}
