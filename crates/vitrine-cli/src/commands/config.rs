use anyhow::Result;

use vitrine_core::AppConfig;

/// Write a default configuration file and print where it landed
pub fn init() -> Result<()> {
    let path = AppConfig::config_path();
    if path.exists() {
        println!("Configuration already exists at {}", path.display());
        return Ok(());
    }
    AppConfig::default().save()?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

/// Print the configuration file path
pub fn path() -> Result<()> {
    println!("{}", AppConfig::config_path().display());
    Ok(())
}
