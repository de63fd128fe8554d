//! `muster request` — Dispatch a single JSON request and print the response.

use std::path::Path;

pub async fn run(
    config_path: Option<&Path>,
    json: &str,
    pretty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config =
        super::load_config(config_path).map_err(|e| format!("Failed to load config: {e}"))?;
    let agent = super::build_agent(&config);

    let request: serde_json::Value =
        serde_json::from_str(json).map_err(|e| format!("Request is not valid JSON: {e}"))?;

    let response = agent.process_request(&request).into_value();

    if pretty {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{response}");
    }

    Ok(())
}
