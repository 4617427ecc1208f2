//! `forge validate`: check an `ops.yml` manifest and list every problem.

use std::collections::BTreeSet;

use serde_json::json;
use tracing::instrument;

use forge_adapters::{YamlManifestSource, resolve_manifest_path};
use forge_core::{
    application::{ManifestReport, ManifestService},
    domain::manifest::summarize,
    error::ForgeError,
};

use crate::{
    cli::{OutputFormat, ValidateArgs},
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(path = %args.path.display()))]
pub fn execute(args: ValidateArgs, output: OutputManager) -> CliResult<()> {
    let path = resolve_manifest_path(&args.path);
    let select: BTreeSet<String> = args.select.into_iter().collect();

    let report = ManifestService::new(Box::new(YamlManifestSource::new()))
        .check(&path, (!select.is_empty()).then_some(&select))?;

    if output.format() == OutputFormat::Json {
        output.result(&to_json(&report)?)?;
    } else {
        print_report(&report, &output)?;
    }

    report.ensure_valid()?;
    Ok(())
}

fn print_report(report: &ManifestReport, output: &OutputManager) -> CliResult<()> {
    for warning in &report.manifest.warnings {
        output.warning(&warning.to_string())?;
    }
    if report.manifest.is_empty() {
        output.warning("No commands, pipelines or services found")?;
    }
    for error in &report.errors {
        output.error(&error.to_string())?;
    }

    if report.is_valid() {
        output.success(&format!("{} is valid", report.path.display()))?;
        for (item_type, names) in summarize(&report.manifest) {
            output.note(&format!("  {item_type}: {}", names.join(", ")))?;
        }
    }
    Ok(())
}

fn to_json(report: &ManifestReport) -> CliResult<String> {
    let value = json!({
        "path": report.path,
        "valid": report.is_valid(),
        "warnings": report.manifest.warnings.iter().map(ToString::to_string).collect::<Vec<_>>(),
        "errors": report.errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
        "items": summarize(&report.manifest),
    });
    serde_json::to_string_pretty(&value).map_err(|e| {
        ForgeError::Internal {
            message: format!("cannot serialize report: {e}"),
        }
        .into()
    })
}
