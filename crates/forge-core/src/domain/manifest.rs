//! The `ops.yml` manifest: raw shape, normalization and validation rules.
//!
//! Parsing the YAML text is an adapter concern; this module only works on the
//! deserialized [`RawManifest`]. Normalization never fails: it folds the
//! deprecated `ops` list into `commands`, splits `name:version` shorthands and
//! records warnings. Validation collects *every* rule violation instead of
//! stopping at the first one, so a user can fix a manifest in one pass.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{entities::template::DEFAULT_VERSION, error::DomainError};

// ── Raw (as written) ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawManifest {
    #[serde(default, deserialize_with = "scalar_string")]
    pub version: Option<String>,
    #[serde(default)]
    pub ops: Vec<RawItem>,
    #[serde(default)]
    pub commands: Vec<RawItem>,
    #[serde(default)]
    pub services: Vec<RawItem>,
    #[serde(default)]
    pub pipelines: Vec<RawItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawItem {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub version: Option<String>,
    pub description: Option<String>,
    pub run: Option<String>,
    pub public: Option<bool>,
    pub domain: Option<String>,
    #[serde(default)]
    pub env: Vec<String>,
    pub jobs: Option<Vec<RawJob>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawJob {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Accept `version: 1`, `version: 1.2` and `version: "1.2.3"` alike.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

// ── Normalized ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Command,
    Pipeline,
    Service,
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Command => "command",
            Self::Pipeline => "pipeline",
            Self::Service => "service",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestItem {
    pub item_type: ItemType,
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
    pub run: Option<String>,
    pub is_public: Option<bool>,
    pub cname: Option<String>,
    pub env: Vec<String>,
    pub jobs: Option<Vec<RawJob>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code")]
pub enum ManifestWarning {
    OpsFieldDeprecated,
    VersionFieldMissing {
        item_type: ItemType,
        name: String,
        version: String,
    },
}

impl fmt::Display for ManifestWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpsFieldDeprecated => f.write_str(
                "The manifest `ops` field is deprecated, use the `commands` field",
            ),
            Self::VersionFieldMissing {
                item_type,
                name,
                version,
            } => write!(
                f,
                "A {item_type} ({name}) is missing a version field, defaulting to {version}"
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Manifest {
    pub version: Option<String>,
    pub commands: Vec<ManifestItem>,
    pub pipelines: Vec<ManifestItem>,
    pub services: Vec<ManifestItem>,
    pub warnings: Vec<ManifestWarning>,
}

impl Manifest {
    /// Normalize a raw manifest, keeping only `select`ed names when given.
    pub fn normalize(raw: RawManifest, select: Option<&BTreeSet<String>>) -> Self {
        let mut warnings = Vec::new();
        if !raw.ops.is_empty() {
            warnings.push(ManifestWarning::OpsFieldDeprecated);
        }

        let picked = |item: &ManifestItem| select.is_none_or(|s| s.contains(&item.name));

        let commands = raw
            .ops
            .into_iter()
            .chain(raw.commands)
            .map(|i| format_item(i, ItemType::Command, &mut warnings))
            .filter(picked)
            .collect();
        let pipelines = raw
            .pipelines
            .into_iter()
            .map(|i| format_item(i, ItemType::Pipeline, &mut warnings))
            .filter(picked)
            .collect();
        let services = raw
            .services
            .into_iter()
            .map(|i| format_item(i, ItemType::Service, &mut warnings))
            .filter(picked)
            .collect();

        Self {
            version: raw.version,
            commands,
            pipelines,
            services,
            warnings,
        }
    }

    pub fn items(&self) -> impl Iterator<Item = &ManifestItem> {
        self.commands
            .iter()
            .chain(&self.pipelines)
            .chain(&self.services)
    }

    pub fn is_empty(&self) -> bool {
        self.items().next().is_none()
    }

    /// Every rule violation, in item order.
    pub fn validate(&self) -> Vec<DomainError> {
        let mut errors = Vec::new();

        for item in &self.commands {
            validate_common(item, &mut errors);
            if item.run.is_none() {
                errors.push(no_run(item));
            }
            if item.is_public.is_none() {
                errors.push(DomainError::NoPublic);
            }
        }

        for item in &self.pipelines {
            validate_common(item, &mut errors);
            match &item.jobs {
                Some(jobs) if !jobs.is_empty() => {
                    if jobs.iter().any(|j| is_blank(&j.name)) {
                        errors.push(DomainError::PipelineJobNameInvalid);
                    }
                    if jobs.iter().any(|j| is_blank(&j.description)) {
                        errors.push(DomainError::PipelineJobDescInvalid);
                    }
                }
                _ => errors.push(DomainError::PipelineJobsInvalid),
            }
        }

        for item in &self.services {
            validate_common(item, &mut errors);
            if is_blank(&item.run) {
                errors.push(no_run(item));
            }
            if let Some(cname) = item.cname.as_deref().filter(|c| !c.is_empty()) {
                if !is_valid_domain(cname) {
                    errors.push(DomainError::ServiceDomainInvalid {
                        domain: cname.into(),
                    });
                }
            }
        }

        for item in self.items() {
            errors.extend(item.env.iter().filter_map(|e| validate_env(e)));
        }

        errors
    }
}

fn format_item(raw: RawItem, item_type: ItemType, warnings: &mut Vec<ManifestWarning>) -> ManifestItem {
    let mut name = raw.name.unwrap_or_default();
    let mut version = raw.version;

    // A `name:version` shorthand counts as a version; the 0.1.0 default and
    // its warning only apply to commands with neither.
    if version.is_none() {
        if let Some((n, v)) = name.split_once(':') {
            let (n, v) = (n.to_string(), v.split(':').next().unwrap_or_default().to_string());
            name = n;
            version = Some(v).filter(|v| !v.is_empty());
        }
        if version.is_none() && item_type == ItemType::Command {
            version = Some(DEFAULT_VERSION.to_string());
            warnings.push(ManifestWarning::VersionFieldMissing {
                item_type,
                name: name.clone(),
                version: DEFAULT_VERSION.to_string(),
            });
        }
    }

    ManifestItem {
        item_type,
        name,
        version,
        description: raw.description,
        run: raw.run,
        is_public: raw.public,
        cname: raw.domain,
        env: raw.env,
        jobs: raw.jobs,
    }
}

fn validate_common(item: &ManifestItem, errors: &mut Vec<DomainError>) {
    if !is_valid_name(&item.name) {
        errors.push(DomainError::NameInvalid);
    }
    if !item.version.as_deref().is_some_and(is_valid_version) {
        errors.push(DomainError::VersionInvalid);
    }
    if item.description.is_none() {
        errors.push(DomainError::DescriptionInvalid);
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// `[a-zA-Z0-9_-]+`
fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| is_word_char(c) || c == '-')
}

/// A word character followed by up to 127 word characters, dots or dashes.
fn is_valid_version(version: &str) -> bool {
    let mut chars = version.chars();
    chars.next().is_some_and(is_word_char)
        && version.chars().count() <= 128
        && chars.all(|c| is_word_char(c) || c == '.' || c == '-')
}

/// A bare host name: optional `*.` prefix, dot-separated labels that do not
/// start or end with `-`, optional trailing dot. No scheme, port or path.
fn is_valid_domain(domain: &str) -> bool {
    let host = domain.strip_prefix("*.").unwrap_or(domain);
    let host = host.strip_suffix('.').unwrap_or(host);
    !host.is_empty()
        && host.split('.').all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| is_word_char(c) || c == '-')
        })
}

fn validate_env(entry: &str) -> Option<DomainError> {
    let (key, value) = entry.split_once('=')?;
    let value = value.split('=').next().unwrap_or_default();
    (key.trim().is_empty() || value.trim().is_empty()).then(|| DomainError::EnvVarInvalid {
        entry: entry.into(),
    })
}

fn no_run(item: &ManifestItem) -> DomainError {
    DomainError::NoRun {
        name: item.name.clone(),
        item_type: item.item_type.to_string(),
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

/// Group names by type, for display.
pub fn summarize(manifest: &Manifest) -> BTreeMap<String, Vec<String>> {
    let mut out: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for item in manifest.items() {
        let label = match &item.version {
            Some(v) => format!("{}:{}", item.name, v),
            None => item.name.clone(),
        };
        out.entry(item.item_type.to_string()).or_default().push(label);
    }
    out
}
