//! `forge init`: render a template into a new project directory.

use tracing::{info, instrument};

use forge_adapters::{LocalFilesystem, SimpleRenderer};
use forge_core::application::{InitRequest, ScaffoldService};

use crate::{
    cli::InitArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(kind = %args.kind, from = %args.from, project = %args.name))]
pub fn execute(args: InitArgs, config: &AppConfig, output: OutputManager) -> CliResult<()> {
    let request = build_request(args)?;

    let service = ScaffoldService::new(
        Box::new(super::template_store(config)?),
        Box::new(SimpleRenderer::new()),
        Box::new(LocalFilesystem::new()),
    );

    let spinner = output.spinner(&format!("Creating '{}'...", request.name));
    let result = service.init(&request);
    spinner.finish_and_clear();
    let done = result?;

    info!(template = %done.template, dir = %done.dir.display(), "Project created");
    output.success(&format!(
        "Created {} project '{}' ({} files)",
        done.template,
        request.name,
        done.files.len()
    ))?;
    output.result(&done.dir.display().to_string())?;

    output.note("")?;
    output.note("Next steps:")?;
    output.note(&format!("  cd {}", done.dir.display()))?;
    output.note("  forge validate")?;
    Ok(())
}

fn build_request(args: InitArgs) -> CliResult<InitRequest> {
    if args.name.trim().is_empty() {
        return Err(CliError::InvalidInput {
            message: "--name cannot be empty".into(),
        });
    }

    let mut request = InitRequest::new(args.kind, args.from, args.name)
        .with_description(args.description)
        .with_force(args.force);
    if let Some(version) = args.version {
        request = request.with_version(version);
    }
    if let Some(to) = args.to {
        request = request.with_output(to);
    }
    Ok(request)
}
