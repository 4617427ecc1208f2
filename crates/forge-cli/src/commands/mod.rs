//! One module per subcommand. Handlers translate arguments, wire adapters
//! into core services and report results; no business logic lives here.

pub mod completions;
pub mod config;
pub mod deploy;
pub mod init;
pub mod list;
pub mod serve;
pub mod validate;

use forge_adapters::InMemoryStore;
use tracing::debug;

use crate::{config::AppConfig, error::CliResult};

/// Built-in templates, overlaid with `templates.local_path` when configured.
pub(crate) fn template_store(config: &AppConfig) -> CliResult<InMemoryStore> {
    let store = InMemoryStore::with_builtin()?;
    if let Some(root) = &config.templates.local_path {
        let count = store.load_local(root)?;
        debug!(count, root = %root.display(), "Local templates applied");
    }
    Ok(store)
}
