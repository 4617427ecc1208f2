//! Filesystem-based template loader.
//!
//! Reads user templates from a local directory so they can shadow the
//! built-ins.
//!
//! # Directory layout expected
//!
//! ```text
//! templates/
//! ├── command/
//! │   └── node/
//! │       ├── template.toml   ← optional metadata
//! │       ├── ops.yml         ← required
//! │       ├── index.js
//! │       └── package.json
//! └── service/
//!     └── golang/
//!         ├── ops.yml
//!         └── main.go
//! ```
//!
//! The first two levels must be a known kind and target; anything else is
//! skipped with a warning.
//!
//! # `template.toml` format
//!
//! ```toml
//! description = "Our house Node.js command"
//! executable  = ["bin/run.sh"]   # *.sh files are executable by default
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use forge_core::domain::{
    DomainError, FileSpec, RelativePath, Template, TemplateId, TemplateKind, TemplateOrigin,
    TemplateSource, TemplateTarget,
};

const METADATA_FILE: &str = "template.toml";

/// Why a template directory could not be read.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("templates directory not found: {0}")]
    MissingRoot(PathBuf),

    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("failed to parse '{path}': {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<LoadError> for DomainError {
    fn from(e: LoadError) -> Self {
        match e {
            LoadError::Domain(d) => d,
            other => DomainError::InvalidTemplate(other.to_string()),
        }
    }
}

/// Optional per-template `template.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct TemplateMetadata {
    pub description: Option<String>,
    #[serde(default)]
    pub executable: Vec<String>,
}

/// Loads [`Template`]s from `<root>/<kind>/<target>/`.
pub struct FilesystemTemplateLoader {
    templates_dir: PathBuf,
}

impl FilesystemTemplateLoader {
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    /// Load every valid template found under the root.
    ///
    /// A missing root is an error. Individual template directories that fail
    /// to load are skipped with a `WARN` log.
    #[instrument(skip(self), fields(dir = %self.templates_dir.display()))]
    pub fn load_all(&self) -> Result<Vec<Template>, DomainError> {
        if !self.templates_dir.is_dir() {
            return Err(LoadError::MissingRoot(self.templates_dir.clone()).into());
        }

        let mut templates = Vec::new();
        for kind in TemplateKind::ALL {
            for target in TemplateTarget::ALL {
                let dir = self
                    .templates_dir
                    .join(kind.as_str())
                    .join(target.as_str());
                if !dir.is_dir() {
                    continue;
                }

                match load_template_from_dir(&dir, TemplateId::new(kind, target)) {
                    Ok(template) => {
                        debug!(template = %template.id, files = template.file_count(), "loaded template");
                        templates.push(template);
                    }
                    Err(e) => {
                        warn!(dir = %dir.display(), error = %e, "skipping template directory due to load error");
                    }
                }
            }
        }

        self.warn_unknown_entries();
        debug!(count = templates.len(), "finished loading templates");
        Ok(templates)
    }

    /// Surface typos like `services/` or `nodejs/`.
    fn warn_unknown_entries(&self) {
        for entry in WalkDir::new(&self.templates_dir)
            .min_depth(1)
            .max_depth(2)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_dir())
        {
            let Ok(rel) = entry.path().strip_prefix(&self.templates_dir) else {
                continue;
            };
            let mut parts = rel.iter().map(|p| p.to_string_lossy());
            let known = match (parts.next(), parts.next()) {
                (Some(kind), None) => TemplateKind::from_str(&kind).is_ok(),
                (Some(kind), Some(target)) => {
                    TemplateKind::from_str(&kind).is_err()
                        || TemplateTarget::from_str(&target).is_ok()
                }
                _ => true,
            };
            if !known {
                warn!(path = %entry.path().display(), "not a <kind>/<target> template directory");
            }
        }
    }
}

/// Load one template directory.
#[instrument(skip_all, fields(dir = %dir.display(), template = %id))]
pub fn load_template_from_dir(dir: &Path, id: TemplateId) -> Result<Template, LoadError> {
    let metadata = read_metadata(dir)?;
    let mut template = Template::new(
        id,
        metadata
            .description
            .clone()
            .unwrap_or_else(|| format!("local {id} template")),
        TemplateOrigin::Local,
    );

    let mut entries: Vec<_> = WalkDir::new(dir)
        .min_depth(1)
        .into_iter()
        .collect::<Result<_, _>>()?;
    entries.sort_by(|a, b| a.path().cmp(b.path()));

    for entry in entries {
        if !entry.file_type().is_file() {
            continue;
        }
        let abs_path = entry.path();
        let rel = abs_path
            .strip_prefix(dir)
            .map_err(|_| DomainError::InvalidTemplate(format!("failed to relativise '{}'", abs_path.display())))?;
        if rel == Path::new(METADATA_FILE) {
            continue;
        }

        let content = fs::read_to_string(abs_path).map_err(|source| LoadError::Io {
            path: abs_path.to_path_buf(),
            source,
        })?;
        let rel_str = normalize_path(&rel.to_string_lossy());
        let executable =
            rel.extension().is_some_and(|e| e == "sh") || metadata.executable.contains(&rel_str);

        let spec = FileSpec::new(RelativePath::try_new(rel)?, TemplateSource::Owned(content));
        template = template.with_file(if executable { spec.executable() } else { spec });
    }

    template.validate()?;
    Ok(template)
}

fn read_metadata(dir: &Path) -> Result<TemplateMetadata, LoadError> {
    let path = dir.join(METADATA_FILE);
    if !path.is_file() {
        return Ok(TemplateMetadata::default());
    }
    let raw = fs::read_to_string(&path).map_err(|source| LoadError::Io {
        path: path.clone(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| LoadError::Metadata { path, source })
}

/// Forward slashes everywhere so `executable` entries match on every platform.
fn normalize_path(p: &str) -> String {
    p.replace('\\', "/")
}
