use anyhow::Result;
use colored::Colorize;

use crate::client::{Client, FetchError};
use crate::model::{BuildingCatalog, PathResult};

/// Ask the service for the shortest path and print it leg by leg.
pub fn run(client: &Client, start: &str, end: &str) -> Result<()> {
    let path = match client.find_path(start, end).into_result() {
        Ok(path) => path,
        Err(e @ FetchError::Http(_)) => {
            // The service rejects unknown names; say which one when the catalog can tell.
            if let Ok(catalog) = client.list_buildings().into_result() {
                let unknown = unknown_buildings(&catalog, &[start, end]);
                if !unknown.is_empty() {
                    anyhow::bail!("Unknown building(s): {}", unknown.join(", "));
                }
            }
            anyhow::bail!("Could not find a path from {start} to {end}: {e}");
        }
        Err(e) => anyhow::bail!("Could not find a path from {start} to {end}: {e}"),
    };
    for line in describe(&path) {
        println!("{line}");
    }
    Ok(())
}

fn unknown_buildings<'a>(catalog: &BuildingCatalog, names: &[&'a str]) -> Vec<&'a str> {
    names
        .iter()
        .copied()
        .filter(|name| !catalog.contains(name))
        .collect()
}

fn describe(path: &PathResult) -> Vec<String> {
    let mut out = vec![format!(
        "{} ({:.0}, {:.0})",
        "start".green(),
        path.start.x,
        path.start.y
    )];
    out.extend(path.path.iter().map(|leg| {
        format!(
            "  -> ({:.0}, {:.0})  {}",
            leg.end.x,
            leg.end.y,
            format!("{:.3}", leg.cost).dimmed()
        )
    }));
    out.push(format!(
        "{} {:.3} over {} segment(s)",
        "total".bold(),
        path.total_cost(),
        path.path.len()
    ));
    out
}
