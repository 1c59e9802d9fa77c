//! Command handlers for `ssil`.

pub mod run;

use anyhow::Result;

/// `ssil config-hash <yaml>...`
pub fn config_hash(paths: &[String]) -> Result<()> {
    let loaded = ssil_config::load_layered_yaml(paths)?;
    println!("config_hash={}", loaded.config_hash);
    println!("{}", loaded.canonical_json);
    Ok(())
}
