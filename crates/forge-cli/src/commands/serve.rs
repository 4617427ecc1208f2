//! `forge serve`: the hello service.

use std::future::Future;

use tracing::{info, instrument};

use forge_adapters::{HelloServer, shutdown_signal};
use forge_core::{
    application::ports::Printer,
    domain::{ServiceEndpoint, hello::STARTUP_MESSAGE},
};

use crate::{
    cli::ServeArgs,
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all, fields(port = ?args.port))]
pub fn execute(args: ServeArgs, config: &AppConfig, output: OutputManager) -> CliResult<()> {
    let endpoint = config.endpoint(args.port);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .with_cli_context(|| "Failed to start the async runtime")?;

    runtime.block_on(serve(&endpoint, &output, shutdown_signal()))
}

/// Announce, bind, then serve until `shutdown` resolves.
async fn serve<F>(endpoint: &ServiceEndpoint, printer: &dyn Printer, shutdown: F) -> CliResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    printer.print(STARTUP_MESSAGE)?;

    let server = HelloServer::bind(endpoint).await?;
    info!(address = %server.local_addr()?, "Listening");
    server.run(shutdown).await?;
    Ok(())
}
