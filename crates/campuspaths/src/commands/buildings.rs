use anyhow::Result;
use colored::Colorize;

use crate::client::Client;
use crate::model::BuildingCatalog;

/// Print every building the service knows, sorted by short name.
pub fn run(client: &Client) -> Result<()> {
    let catalog = client.list_buildings().into_result()?;
    if catalog.is_empty() {
        tracing::warn!("{} has no buildings", client.base_url());
        return Ok(());
    }
    for line in listing(&catalog) {
        println!("{line}");
    }
    tracing::info!("{} building(s) from {}", catalog.len(), client.base_url());
    Ok(())
}

fn listing(catalog: &BuildingCatalog) -> Vec<String> {
    let width = catalog.iter().map(|(short, _)| short.len()).max().unwrap_or(0);
    catalog
        .iter()
        .map(|(short, long)| format!("{}  {long}", format!("{short:<width$}").bold()))
        .collect()
}
