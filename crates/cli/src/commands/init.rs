//! `muster init` — First-time setup.

use std::path::Path;

use muster_config::AppConfig;

pub async fn run(config_override: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = match config_override {
        Some(path) => path.to_path_buf(),
        None => AppConfig::config_dir().join("config.toml"),
    };

    println!("Muster — First-Time Setup");
    println!("=========================\n");

    if let Some(dir) = config_path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            std::fs::create_dir_all(dir)?;
            println!("✅ Created config directory: {}", dir.display());
        }
    }

    if config_path.exists() {
        println!("⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run init.\n");
    } else {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        println!("✅ Created config.toml at: {}", config_path.display());
        println!("\n📝 Next steps:");
        println!("   1. Edit {} to adjust the seed roster", config_path.display());
        println!("   2. Run: muster inventory");
        println!("   3. Dispatch requests: muster request '{{\"message_type\": \"get_all_assets\"}}'\n");
    }

    Ok(())
}
