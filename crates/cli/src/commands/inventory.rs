//! `muster inventory` — Seed the ledger from config and print the roster.

use std::path::Path;

pub async fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config =
        super::load_config(config_path).map_err(|e| format!("Failed to load config: {e}"))?;
    let agent = super::build_agent(&config);

    let mut assets = agent.assets();
    assets.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));

    println!("Muster Inventory");
    println!("================");
    println!("  Agent:   {}", agent.name());
    println!("  Status:  {}", agent.status());
    println!("  Assets:  {}", assets.len());
    println!();

    for asset in &assets {
        println!("  {asset}");
    }

    Ok(())
}
