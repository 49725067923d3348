//! Versioned persistence envelope: `{ version, savedAt, data }`.
//!
//! `data` is the calendar record exactly as it would appear in a config
//! file. Only [`ENVELOPE_VERSION`] is accepted on read.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{canonicalize_json, sha256_hex, LoadedConfig};

pub const ENVELOPE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub data: T,
}

/// Wrap `data` at the current envelope version.
pub fn wrap_envelope<T>(data: T, saved_at: DateTime<Utc>) -> Envelope<T> {
    Envelope {
        version: ENVELOPE_VERSION,
        saved_at,
        data,
    }
}

/// Parse envelope JSON. The version is checked before `data` is decoded,
/// so a future layout fails with a version error rather than a shape error.
pub fn parse_envelope(raw: &str) -> Result<Envelope<Value>> {
    let v: Value = serde_json::from_str(raw).context("invalid envelope json")?;
    let version = v
        .get("version")
        .and_then(Value::as_u64)
        .context("ENVELOPE_INVALID: missing numeric `version`")?;
    if version != u64::from(ENVELOPE_VERSION) {
        bail!(
            "ENVELOPE_VERSION_UNSUPPORTED: got version {}, supported {}",
            version,
            ENVELOPE_VERSION
        );
    }
    serde_json::from_value(v).context("ENVELOPE_INVALID: bad envelope fields")
}

/// Read an envelope file into the same shape a layered YAML load produces.
/// The hash covers `data` only, so re-saving does not change it.
pub fn load_envelope(path: &str) -> Result<(LoadedConfig, DateTime<Utc>)> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read envelope path: {path}"))?;
    let env = parse_envelope(&raw)?;
    let canonical_json = canonicalize_json(&env.data)?;
    let config_hash = sha256_hex(canonical_json.as_bytes());
    tracing::info!(path, %config_hash, saved_at = %env.saved_at, "envelope loaded");
    Ok((
        LoadedConfig {
            config_hash,
            canonical_json,
            config_json: env.data,
        },
        env.saved_at,
    ))
}
