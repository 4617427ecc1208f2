//! `forge list`

use forge_core::{
    application::{TemplateInfo, TemplateService},
    domain::TemplateKind,
    error::ForgeError,
};

use crate::{
    cli::{KindFilter, ListArgs, ListFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, config: &AppConfig, output: OutputManager) -> CliResult<()> {
    let service = TemplateService::new(Box::new(super::template_store(config)?));
    let templates = service.list(args.kind.map(to_kind))?;

    match args.format {
        ListFormat::Table => {
            output.header("Available Templates:")?;
            for row in table_rows(&templates) {
                output.result(&row)?;
            }
        }
        ListFormat::List => {
            for t in &templates {
                output.result(&t.id)?;
            }
        }
        ListFormat::Json => {
            let json = serde_json::to_string_pretty(&templates).map_err(|e| ForgeError::Internal {
                message: format!("cannot serialize templates: {e}"),
            })?;
            output.result(&json)?;
        }
        ListFormat::Csv => {
            for row in csv_rows(&templates) {
                output.result(&row)?;
            }
        }
    }

    Ok(())
}

fn to_kind(filter: KindFilter) -> TemplateKind {
    match filter {
        KindFilter::Command => TemplateKind::Command,
        KindFilter::Service => TemplateKind::Service,
    }
}

fn table_rows(templates: &[TemplateInfo]) -> Vec<String> {
    templates
        .iter()
        .map(|t| {
            let origin = if t.local { " (local)" } else { "" };
            format!("  {:<16} {:>2} files  {}{origin}", t.id, t.files, t.description)
        })
        .collect()
}

fn csv_rows(templates: &[TemplateInfo]) -> Vec<String> {
    std::iter::once("id,kind,target,files,local".to_string())
        .chain(templates.iter().map(|t| {
            format!("{},{},{},{},{}", t.id, t.kind, t.target, t.files, t.local)
        }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use forge_adapters::InMemoryStore;

    fn builtins(kind: Option<KindFilter>) -> Vec<TemplateInfo> {
        TemplateService::new(Box::new(InMemoryStore::with_builtin().unwrap()))
            .list(kind.map(to_kind))
            .unwrap()
    }

    #[test]
    fn csv_has_header_and_one_row_per_template() {
        let rows = csv_rows(&builtins(None));
        assert_eq!(rows[0], "id,kind,target,files,local");
        assert_eq!(rows.len(), 9);
        assert!(rows.contains(&"command/bash,command,bash,4,false".to_string()));
    }

    #[test]
    fn kind_filter_narrows_the_listing() {
        let services = builtins(Some(KindFilter::Service));
        assert_eq!(services.len(), 4);
        assert!(services.iter().all(|t| t.kind == "service"));
    }

    #[test]
    fn table_rows_mention_id_and_files() {
        let rows = table_rows(&builtins(Some(KindFilter::Command)));
        assert!(rows.iter().any(|r| r.contains("command/node") && r.contains("files")));
    }
}
