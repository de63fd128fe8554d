//! `muster repl` — Interactive request loop.
//!
//! One JSON request per line on stdin; one JSON response per line on
//! stdout. Bus events go to stderr so piped output stays parseable.

use std::path::Path;
use std::sync::Arc;

use muster_core::AssetEvent;
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config =
        super::load_config(config_path).map_err(|e| format!("Failed to load config: {e}"))?;
    let agent = Arc::new(super::build_agent(&config));

    println!();
    println!("  Muster — Interactive Request Mode");
    println!();
    println!("  Agent:   {}", agent.name());
    println!("  Status:  {}", agent.status());
    println!("  Assets:  {} seeded", agent.assets().len());
    println!();
    println!("  Enter one JSON request per line, e.g.");
    println!("    {{\"message_type\": \"find_asset_id\", \"name\": \"Drone\"}}");
    println!("  Type 'exit' or Ctrl+D to quit.");
    println!();

    // Mirror mutations to stderr as they land on the bus
    let mut events = agent.event_bus().subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            eprintln!("  [event] {}", describe(&event));
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    prompt()?;
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            prompt()?;
            continue;
        }
        if line == "exit" || line == "quit" {
            break;
        }

        match serde_json::from_str::<serde_json::Value>(line) {
            Ok(request) => {
                let response = agent.process_request(&request).into_value();
                println!("{response}");
            }
            Err(e) => {
                eprintln!("  [Error] Not valid JSON: {e}");
            }
        }

        prompt()?;
    }

    println!();
    println!("  Goodbye!");

    Ok(())
}

fn prompt() -> std::io::Result<()> {
    use std::io::Write;
    print!("  > ");
    std::io::stdout().flush()
}

fn describe(event: &AssetEvent) -> String {
    match event {
        AssetEvent::AssetAdded {
            asset_id,
            name,
            quantity,
            ..
        } => format!("added {name} ({asset_id}), {quantity} units"),
        AssetEvent::AssetUpdated {
            asset_id, field, ..
        } => format!("updated {field} on {asset_id}"),
        AssetEvent::AssetRemoved { asset_id, name, .. } => {
            format!("removed {name} ({asset_id})")
        }
        AssetEvent::UnitsAllocated {
            asset_id,
            team_id,
            quantity,
            remaining,
            ..
        } => format!("allocated {quantity} x {asset_id} to {team_id}, {remaining} remaining"),
        AssetEvent::UnitsReturned {
            asset_id,
            team_id,
            quantity,
            ..
        } => format!("returned {quantity} x {asset_id} from {team_id}"),
    }
}
