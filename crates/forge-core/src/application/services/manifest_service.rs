//! Manifest Service - `validate` for `ops.yml`.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};

use crate::{
    application::{ApplicationError, ports::ManifestSource},
    domain::{DomainError, DomainValidator as validator, Manifest},
    error::ForgeResult,
};

/// A normalized manifest together with whatever is wrong with it.
#[derive(Debug, Clone)]
pub struct ManifestReport {
    pub path: PathBuf,
    pub manifest: Manifest,
    pub errors: Vec<DomainError>,
}

impl ManifestReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Turn collected violations into a single error.
    pub fn ensure_valid(self) -> ForgeResult<Manifest> {
        if self.errors.is_empty() {
            Ok(self.manifest)
        } else {
            Err(ApplicationError::ManifestInvalid {
                path: self.path,
                errors: self.errors,
            }
            .into())
        }
    }
}

pub struct ManifestService {
    source: Box<dyn ManifestSource>,
}

impl ManifestService {
    pub fn new(source: Box<dyn ManifestSource>) -> Self {
        Self { source }
    }

    /// Load, normalize and validate. Rule violations land in the report,
    /// only load failures are errors.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn check(&self, path: &Path, select: Option<&BTreeSet<String>>) -> ForgeResult<ManifestReport> {
        let raw = self.source.load(path)?;
        let manifest = Manifest::normalize(raw, select);
        for warning in &manifest.warnings {
            warn!(%warning, "Manifest warning");
        }

        let errors = validator::validate_manifest(&manifest).err().unwrap_or_default();
        debug!(items = manifest.items().count(), errors = errors.len(), "Manifest checked");

        Ok(ManifestReport {
            path: path.to_path_buf(),
            manifest,
            errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ManifestWarning, RawManifest, manifest::RawItem};
    use crate::error::ForgeError;

    struct Fixed(RawManifest);

    impl ManifestSource for Fixed {
        fn load(&self, _: &Path) -> ForgeResult<RawManifest> {
            Ok(self.0.clone())
        }
    }

    struct Missing;

    impl ManifestSource for Missing {
        fn load(&self, path: &Path) -> ForgeResult<RawManifest> {
            Err(ApplicationError::ManifestUnreadable {
                path: path.to_path_buf(),
                reason: "no such file".into(),
            }
            .into())
        }
    }

    fn command(name: &str) -> RawItem {
        RawItem {
            name: Some(name.into()),
            description: Some("does things".into()),
            run: Some("./main.sh".into()),
            public: Some(false),
            ..RawItem::default()
        }
    }

    #[test]
    fn valid_manifest_passes_with_warnings() {
        let raw = RawManifest {
            ops: vec![command("legacy")],
            ..RawManifest::default()
        };
        let report = ManifestService::new(Box::new(Fixed(raw)))
            .check(Path::new("ops.yml"), None)
            .unwrap();

        assert!(report.is_valid());
        assert!(report.manifest.warnings.contains(&ManifestWarning::OpsFieldDeprecated));
        assert_eq!(report.ensure_valid().unwrap().commands[0].version.as_deref(), Some("0.1.0"));
    }

    #[test]
    fn violations_become_one_error() {
        let mut bad = command("bad name");
        bad.public = None;
        let raw = RawManifest {
            commands: vec![bad],
            ..RawManifest::default()
        };
        let report = ManifestService::new(Box::new(Fixed(raw)))
            .check(Path::new("ops.yml"), None)
            .unwrap();

        assert_eq!(report.errors, [DomainError::NameInvalid, DomainError::NoPublic]);
        match report.ensure_valid() {
            Err(ForgeError::Application(ApplicationError::ManifestInvalid { errors, .. })) => {
                assert_eq!(errors.len(), 2)
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn selection_filters_items() {
        let raw = RawManifest {
            commands: vec![command("a"), command("b")],
            ..RawManifest::default()
        };
        let select = BTreeSet::from(["b".to_string()]);
        let report = ManifestService::new(Box::new(Fixed(raw)))
            .check(Path::new("ops.yml"), Some(&select))
            .unwrap();
        assert_eq!(report.manifest.commands.len(), 1);
        assert_eq!(report.manifest.commands[0].name, "b");
    }

    #[test]
    fn unreadable_manifest_is_an_error() {
        assert!(matches!(
            ManifestService::new(Box::new(Missing)).check(Path::new("nope"), None),
            Err(ForgeError::Application(ApplicationError::ManifestUnreadable { .. }))
        ));
    }
}
