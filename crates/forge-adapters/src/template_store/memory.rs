//! In-memory template store with built-in templates.

use std::{
    collections::BTreeMap,
    path::Path,
    sync::{Arc, RwLock, RwLockReadGuard},
};

use forge_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{DomainValidator as validator, Template, TemplateId, TemplateKind},
    error::ForgeResult,
};
use tracing::{debug, info};

use crate::{builtin_templates, template_loader::FilesystemTemplateLoader};

/// Thread-safe in-memory template store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<BTreeMap<TemplateId, Template>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with built-in templates loaded.
    pub fn with_builtin() -> ForgeResult<Self> {
        let store = Self::new();
        store.load_builtin()?;
        Ok(store)
    }

    pub fn load_builtin(&self) -> ForgeResult<()> {
        for template in builtin_templates::all_templates() {
            self.insert(template)?;
        }
        Ok(())
    }

    /// Overlay templates found under `root`; they replace built-ins with the same id.
    pub fn load_local(&self, root: &Path) -> ForgeResult<usize> {
        let templates = FilesystemTemplateLoader::new(root).load_all()?;
        let count = templates.len();
        for template in templates {
            debug!(template = %template.id, "Local template overrides built-in");
            self.insert(template)?;
        }
        info!(root = %root.display(), count, "Local templates loaded");
        Ok(count)
    }

    pub fn len(&self) -> usize {
        self.read().map(|inner| inner.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> ForgeResult<RwLockReadGuard<'_, BTreeMap<TemplateId, Template>>> {
        Ok(self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?)
    }
}

impl TemplateStore for InMemoryStore {
    fn get(&self, id: &TemplateId) -> ForgeResult<Template> {
        self.read()?.get(id).cloned().ok_or_else(|| {
            ApplicationError::TemplateResolution {
                reason: format!("Template not found: {id}"),
            }
            .into()
        })
    }

    fn list(&self) -> ForgeResult<Vec<Template>> {
        Ok(self.read()?.values().cloned().collect())
    }

    fn find_by_kind(&self, kind: TemplateKind) -> ForgeResult<Vec<Template>> {
        Ok(self
            .read()?
            .values()
            .filter(|t| t.id.kind == kind)
            .cloned()
            .collect())
    }

    fn insert(&self, template: Template) -> ForgeResult<()> {
        validator::validate_template(&template)?;

        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.insert(template.id, template);
        Ok(())
    }
}
