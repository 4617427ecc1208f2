//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the `init` workflow:
//! 1. Parse the kind and fuzzy-match the target
//! 2. Fetch and render the template with the project's variables
//! 3. Write to filesystem, rolling back on failure

use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateRenderer, TemplateStore},
    },
    domain::{
        DomainValidator as validator, ProjectStructure, RenderContext, TemplateId, TemplateKind,
        resolve_target,
    },
    error::ForgeResult,
};

/// Everything `init` needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitRequest {
    pub kind: String,
    pub from: String,
    pub name: String,
    pub version: Option<String>,
    pub description: String,
    pub output: PathBuf,
    pub force: bool,
}

impl InitRequest {
    /// A request writing into `./<name>`.
    pub fn new(kind: impl Into<String>, from: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind: kind.into(),
            from: from.into(),
            output: PathBuf::from(&name),
            name,
            version: None,
            description: String::new(),
            force: false,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

/// Outcome of a successful `init`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Initialized {
    pub template: TemplateId,
    pub dir: PathBuf,
    pub files: Vec<PathBuf>,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    store: Box<dyn TemplateStore>,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
}

impl ScaffoldService {
    pub fn new(
        store: Box<dyn TemplateStore>,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            store,
            renderer,
            filesystem,
        }
    }

    /// Render a template into `request.output`.
    #[instrument(
        skip_all,
        fields(
            kind = %request.kind,
            from = %request.from,
            project = %request.name,
            output_path = %request.output.display()
        )
    )]
    pub fn init(&self, request: &InitRequest) -> ForgeResult<Initialized> {
        let id = Self::resolve(&request.kind, &request.from)?;
        info!(template = %id, "Template resolved");

        let template = self.store.get(&id)?;
        validator::validate_template(&template)?;

        let context = RenderContext::new(
            &request.name,
            request.version.as_deref(),
            &request.description,
        );
        let structure = self.renderer.render(&template, &context, &request.output)?;
        validator::validate_project_structure(&structure)?;

        self.write_structure(&structure, request.force)?;

        info!(files = structure.file_count(), "Scaffold completed successfully");
        Ok(Initialized {
            template: id,
            dir: structure.root().to_path_buf(),
            files: structure.files().map(|f| f.path.clone()).collect(),
        })
    }

    /// Turn user input into a template id without touching the store.
    pub fn resolve(kind: &str, from: &str) -> ForgeResult<TemplateId> {
        let kind = TemplateKind::from_str(kind)?;
        let target = resolve_target(from)?;
        Ok(TemplateId::new(kind, target))
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Write project structure to filesystem with rollback on failure.
    fn write_structure(&self, structure: &ProjectStructure, force: bool) -> ForgeResult<()> {
        let root = structure.root();
        let existed = self.filesystem.exists(root);
        if existed && !force {
            return Err(ApplicationError::ProjectExists {
                path: root.to_path_buf(),
            }
            .into());
        }

        let mut written = Vec::new();
        match self.write_all(structure, existed, &mut written) {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!(error = %e, "Write failed, attempting rollback");
                if existed {
                    self.rollback_files(&written);
                } else {
                    self.rollback_dir(root);
                }
                Err(e)
            }
        }
    }

    fn write_all(
        &self,
        structure: &ProjectStructure,
        existed: bool,
        written: &mut Vec<Written>,
    ) -> ForgeResult<()> {
        let root = structure.root();
        self.filesystem.create_dir_all(root)?;

        for file in structure.files() {
            let path = root.join(&file.path);
            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }

            // Only a forced run into an existing directory can replace user files.
            let previous = if existed && self.filesystem.exists(&path) {
                Some(self.filesystem.read_to_string(&path)?)
            } else {
                None
            };
            self.filesystem.write_file(&path, &file.content)?;
            written.push(Written {
                path: path.clone(),
                previous,
            });

            if file.permissions.executable_flag() {
                self.filesystem.set_permissions(&path, true)?;
            }
        }

        Ok(())
    }

    /// Best-effort: the directory did not exist before, so drop all of it.
    fn rollback_dir(&self, root: &Path) {
        if let Err(e) = self.filesystem.remove_dir_all(root) {
            warn!(error = %e, path = %root.display(), "Rollback failed");
        } else {
            info!("Rollback successful");
        }
    }

    /// Best-effort: the directory was already there, so put replaced files
    /// back and drop the ones that are new.
    fn rollback_files(&self, written: &[Written]) {
        for file in written.iter().rev() {
            let undo = match &file.previous {
                Some(content) => self.filesystem.write_file(&file.path, content),
                None => self.filesystem.remove_file(&file.path),
            };
            if let Err(e) = undo {
                warn!(error = %e, path = %file.path.display(), "Rollback failed");
            }
        }
    }
}

/// A file `init` wrote, with what it replaced.
struct Written {
    path: PathBuf,
    previous: Option<String>,
}
