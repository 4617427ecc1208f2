//! Reads `ops.yml` from disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use forge_core::{
    application::{ApplicationError, ports::ManifestSource},
    domain::{MANIFEST_FILE, RawManifest},
    error::{ForgeError, ForgeResult},
};

/// A directory means the manifest inside it.
pub fn resolve_manifest_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(MANIFEST_FILE)
    } else {
        path.to_path_buf()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct YamlManifestSource;

impl YamlManifestSource {
    pub fn new() -> Self {
        Self
    }
}

impl ManifestSource for YamlManifestSource {
    #[instrument(skip(self), fields(path = %path.display()))]
    fn load(&self, path: &Path) -> ForgeResult<RawManifest> {
        let file = resolve_manifest_path(path);
        let unreadable = |reason: String| -> ForgeError {
            ApplicationError::ManifestUnreadable {
                path: file.clone(),
                reason,
            }
            .into()
        };

        let raw = fs::read_to_string(&file).map_err(|e| unreadable(e.to_string()))?;
        if raw.trim().is_empty() {
            debug!("Empty manifest");
            return Ok(RawManifest::default());
        }
        serde_yaml::from_str(&raw).map_err(|e| unreadable(e.to_string()))
    }
}
