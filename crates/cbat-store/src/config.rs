//! Application configuration and the admin credential.
//!
//! The admin secret is externally supplied: the config carries a salt and
//! the SHA-256 of salt+password, never the password itself, and the file
//! values can reference environment variables with `${VAR}` syntax.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Top-level cbat configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CbatConfig {
    /// Where the JSON record store lives.
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
    /// Admin credential gating the CSV export.
    #[serde(default)]
    pub admin: AdminCredential,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("./cbat-data/records.json")
}

impl Default for CbatConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            admin: AdminCredential::default(),
        }
    }
}

/// Salted hash of the admin password.
///
/// Note: Custom Debug impl masks the hash to prevent accidental exposure
/// in logs.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AdminCredential {
    #[serde(default)]
    pub salt: String,
    /// Lowercase hex of `SHA-256(salt || password)`.
    #[serde(default)]
    pub password_sha256: String,
}

impl std::fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredential")
            .field("salt", &self.salt)
            .field("password_sha256", &"***")
            .finish()
    }
}

impl AdminCredential {
    /// Whether a credential has been set at all. An unconfigured
    /// credential verifies nothing; callers should refuse the operation
    /// instead of comparing against empty strings.
    pub fn is_configured(&self) -> bool {
        !self.salt.is_empty() && !self.password_sha256.is_empty()
    }

    /// Compute the salted hash hex for a password. Used to generate
    /// config values.
    pub fn derive_hex(salt: &str, password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(password.as_bytes());
        let digest = hasher.finalize();
        digest.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Verify a password attempt. The comparison runs over every byte of
    /// both hex digests regardless of where they first differ.
    pub fn verify(&self, password: &str) -> bool {
        if !self.is_configured() {
            return false;
        }
        let candidate = Self::derive_hex(&self.salt, password);
        constant_time_eq(
            candidate.as_bytes(),
            self.password_sha256.to_lowercase().as_bytes(),
        )
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!("{}{}{}", &result[..start], value, &result[start + end + 1..]);
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `cbat.toml` in the current directory
/// 2. `~/.config/cbat/config.toml`
///
/// Environment variable overrides: `CBAT_DATA_PATH`, `CBAT_ADMIN_SALT`,
/// `CBAT_ADMIN_HASH`.
pub fn load_config() -> Result<CbatConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<CbatConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("cbat.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<CbatConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => CbatConfig::default(),
    };

    // Apply env var overrides
    if let Ok(data_path) = std::env::var("CBAT_DATA_PATH") {
        config.data_path = PathBuf::from(data_path);
    }
    if let Ok(salt) = std::env::var("CBAT_ADMIN_SALT") {
        config.admin.salt = salt;
    }
    if let Ok(hash) = std::env::var("CBAT_ADMIN_HASH") {
        config.admin.password_sha256 = hash;
    }

    // Resolve env vars referenced from the file
    config.admin.salt = resolve_env_vars(&config.admin.salt);
    config.admin.password_sha256 = resolve_env_vars(&config.admin.password_sha256);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("cbat"))
}
