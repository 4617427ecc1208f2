//! Template Service - template listing and lookup.
//!
//! Separated from ScaffoldService for single responsibility.

use serde::Serialize;

use crate::{
    application::ports::TemplateStore,
    domain::{Template, TemplateKind, TemplateOrigin},
    error::ForgeResult,
};

/// Information about a template for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateInfo {
    pub id: String,
    pub kind: String,
    pub target: String,
    pub description: String,
    pub files: usize,
    pub local: bool,
}

impl From<&Template> for TemplateInfo {
    fn from(t: &Template) -> Self {
        Self {
            id: t.id.to_string(),
            kind: t.id.kind.to_string(),
            target: t.id.target.to_string(),
            description: t.description.clone(),
            files: t.file_count(),
            local: t.origin == TemplateOrigin::Local,
        }
    }
}

/// Service for template operations.
pub struct TemplateService {
    store: Box<dyn TemplateStore>,
}

impl TemplateService {
    pub fn new(store: Box<dyn TemplateStore>) -> Self {
        Self { store }
    }

    /// Every template, or only those of `kind`.
    pub fn list(&self, kind: Option<TemplateKind>) -> ForgeResult<Vec<TemplateInfo>> {
        let templates = match kind {
            Some(kind) => self.store.find_by_kind(kind)?,
            None => self.store.list()?,
        };
        Ok(templates.iter().map(TemplateInfo::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FileSpec, RelativePath, TemplateId, TemplateSource, TemplateTarget};

    struct Fixed(Vec<Template>);

    impl TemplateStore for Fixed {
        fn get(&self, id: &TemplateId) -> ForgeResult<Template> {
            Ok(self.0.iter().find(|t| &t.id == id).cloned().unwrap_or_else(|| self.0[0].clone()))
        }

        fn list(&self) -> ForgeResult<Vec<Template>> {
            Ok(self.0.clone())
        }

        fn find_by_kind(&self, kind: TemplateKind) -> ForgeResult<Vec<Template>> {
            Ok(self.0.iter().filter(|t| t.id.kind == kind).cloned().collect())
        }

        fn insert(&self, _: Template) -> ForgeResult<()> {
            Ok(())
        }
    }

    fn template(kind: TemplateKind, origin: TemplateOrigin) -> Template {
        Template::new(TemplateId::new(kind, TemplateTarget::Python), "py", origin).with_file(
            FileSpec::new(
                RelativePath::try_new("ops.yml").unwrap(),
                TemplateSource::Static("commands: []"),
            ),
        )
    }

    #[test]
    fn list_describes_each_template() {
        let service = TemplateService::new(Box::new(Fixed(vec![
            template(TemplateKind::Command, TemplateOrigin::Builtin),
            template(TemplateKind::Service, TemplateOrigin::Local),
        ])));

        let all = service.list(None).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, "command/python");
        assert_eq!(all[0].files, 1);
        assert!(!all[0].local);

        let services = service.list(Some(TemplateKind::Service)).unwrap();
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].target, "python");
        assert!(services[0].local);
    }
}
