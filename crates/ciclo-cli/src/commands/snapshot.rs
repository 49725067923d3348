use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::Path;

/// Merge the YAML layers and save them as a versioned envelope.
pub fn run(config_paths: &[String], out: &Path, saved_at: DateTime<Utc>) -> Result<()> {
    let path_refs: Vec<&str> = config_paths.iter().map(|s| s.as_str()).collect();
    let loaded = ciclo_config::load_layered_yaml(&path_refs)?;

    // Refuse to persist something that would not load back.
    loaded.calendar_file()?;

    let envelope = ciclo_config::wrap_envelope(loaded.config_json, saved_at);
    let json = serde_json::to_string_pretty(&envelope).context("serialize envelope failed")?;

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create dir failed: {}", parent.display()))?;
    }
    std::fs::write(out, json).with_context(|| format!("write envelope failed: {}", out.display()))?;

    tracing::info!(path = %out.display(), config_hash = %loaded.config_hash, "snapshot saved");
    println!("envelope={}", out.display());
    println!("version={}", envelope.version);
    println!("config_hash={}", loaded.config_hash);
    Ok(())
}
