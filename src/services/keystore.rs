//! API key store
//!
//! Keeps provider API keys in a dotenv-style file and in memory

use crate::models::{ApiKeyBundle, ModelId};
use crate::utils::error::{AppError, AppResult};
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

/// File-backed API key store
///
/// Reads are served from memory. Writes rewrite the file and update memory;
/// they are refused outright in production.
#[derive(Debug)]
pub struct KeyStore {
    path: PathBuf,
    production: bool,
    keys: RwLock<ApiKeyBundle>,
    write_lock: Mutex<()>,
}

impl KeyStore {
    /// Open the store, overlaying keys found in the file onto `defaults`
    pub fn open(path: impl Into<PathBuf>, production: bool, defaults: ApiKeyBundle) -> AppResult<Self> {
        let path = path.into();
        let mut keys = defaults;

        if path.exists() {
            let entries = dotenvy::from_path_iter(&path)
                .map_err(|e| AppError::Internal(format!("Failed to read key file {:?}: {}", path, e)))?;

            for entry in entries {
                match entry {
                    Ok((name, value)) => {
                        if let Some(model) = ModelId::ALL.into_iter().find(|m| m.key_var() == name) {
                            if !value.is_empty() {
                                keys.set(model, value);
                            }
                        }
                    }
                    Err(e) => warn!("Skipping unreadable line in key file {:?}: {}", path, e),
                }
            }
        }

        info!(
            "Key store opened at {:?} ({} providers configured)",
            path,
            keys.entries().count()
        );

        Ok(Self {
            path,
            production,
            keys: RwLock::new(keys),
            write_lock: Mutex::new(()),
        })
    }

    /// Key for `model`, if one is configured
    pub async fn api_key(&self, model: ModelId) -> Option<String> {
        self.keys.read().await.get(model).filter(|k| !k.is_empty()).map(str::to_owned)
    }

    /// Models that currently have a key
    pub async fn configured(&self) -> Vec<ModelId> {
        self.keys.read().await.entries().map(|(model, _)| model).collect()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist every key present in `bundle`, leaving the others untouched
    pub async fn store_keys(&self, bundle: &ApiKeyBundle) -> AppResult<()> {
        if self.production {
            warn!("Refusing to write API keys to disk in production");
            return Err(AppError::Forbidden(
                "Storing keys to disk is not allowed in production.".to_string(),
            ));
        }

        if bundle.is_empty() {
            debug!("No API keys supplied, key file left untouched");
            return Ok(());
        }

        for (model, key) in bundle.entries() {
            validate_storable(model, key)?;
        }

        let _guard = self.write_lock.lock().await;

        let existing = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };

        let updated = apply_updates(&existing, bundle);
        tokio::fs::write(&self.path, updated).await?;

        let mut keys = self.keys.write().await;
        for (model, key) in bundle.entries() {
            debug!("Stored API key for {}", model);
            keys.set(model, key);
        }

        info!("Updated {} API keys in {:?}", bundle.entries().count(), self.path);
        Ok(())
    }
}

/// Reject values the file format cannot hold
fn validate_storable(model: ModelId, key: &str) -> AppResult<()> {
    if key.contains(['\n', '\r']) {
        return Err(AppError::Validation(format!("{} key must be a single line", model.key_var())));
    }
    if key.contains('\'') {
        return Err(AppError::Validation(format!("{} key cannot contain quotes", model.key_var())));
    }
    Ok(())
}

/// Variable name assigned on a dotenv line, ignoring comments and `export`
fn assigned_name(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') {
        return None;
    }
    let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
    let (name, _) = trimmed.split_once('=')?;
    Some(name.trim())
}

/// Rewrite file content with the keys in `bundle`
///
/// The first assignment of a key is replaced in place and any later
/// assignments of the same key are dropped; new keys are appended.
fn apply_updates(content: &str, bundle: &ApiKeyBundle) -> String {
    let mut lines: Vec<String> = content.lines().map(str::to_owned).collect();

    for (model, key) in bundle.entries() {
        let assignment = format!("{}='{}'", model.key_var(), key);
        let mut replaced = false;
        lines.retain_mut(|line| {
            if assigned_name(line) != Some(model.key_var()) {
                return true;
            }
            if replaced {
                return false;
            }
            *line = assignment.clone();
            replaced = true;
            true
        });
        if !replaced {
            lines.push(assignment);
        }
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}
