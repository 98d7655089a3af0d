//! Human-readable output for the `list` subcommand.

use tabled::{settings::Style, Table, Tabled};

use crate::model::Plugin;

#[derive(Tabled)]
struct PluginRow {
    #[tabled(rename = "Plugin")]
    name: String,
    #[tabled(rename = "Repository")]
    repo: String,
    #[tabled(rename = "Tracking")]
    tracking: String,
    #[tabled(rename = "Recorded Versions")]
    versions: String,
}

pub fn print_plugin_table(plugins: &[Plugin]) {
    if plugins.is_empty() {
        println!("No plugins found.");
        return;
    }

    let rows: Vec<PluginRow> = plugins
        .iter()
        .map(|p| PluginRow {
            name: p.name.clone(),
            repo: p.slug(),
            tracking: if p.tracks_commits {
                "commit".to_string()
            } else {
                "release".to_string()
            },
            versions: p
                .versions
                .iter()
                .filter(|v| !v.is_empty())
                .cloned()
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
    println!();
    println!("{} plugins", plugins.len());
}
