//! Argument surface of the `forge` binary. Parsing only; the handlers live in
//! [`crate::commands`].

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name    = "forge",
    bin_name = "forge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f680} Deployment tracking, a hello service and project templates",
    long_about = "Forge records deployments, runs a minimal hello-world HTTP service \
                  and scaffolds command or service projects from templates.",
    after_help = "EXAMPLES:\n\
        \x20 echo my-app | forge deploy\n\
        \x20 forge serve --port 3000\n\
        \x20 forge init --kind service --from golang --name api\n\
        \x20 forge validate ./api",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record a successful deployment.
    #[command(
        about = "Record a deployment",
        after_help = "EXAMPLES:\n\
            \x20 forge deploy             # asks which application\n\
            \x20 echo billing | forge deploy"
    )]
    Deploy,

    /// Answer every HTTP request with `Hello World!`.
    #[command(
        about = "Run the hello service",
        after_help = "EXAMPLES:\n\
            \x20 forge serve\n\
            \x20 forge serve --port 3000\n\
            \x20 FORGE_SERVICE__HOST=127.0.0.1 forge serve"
    )]
    Serve(ServeArgs),

    /// Create a project from a template.
    #[command(
        visible_alias = "new",
        about = "Create a project from a template",
        after_help = "EXAMPLES:\n\
            \x20 forge init --name deploy\n\
            \x20 forge init --kind service --from golang --name api --version 1.2.0\n\
            \x20 forge init --kind command --from py --name report --to ./tools/report"
    )]
    Init(InitArgs),

    /// List available templates.
    #[command(
        visible_alias = "ls",
        about = "List available templates",
        after_help = "EXAMPLES:\n\
            \x20 forge list\n\
            \x20 forge list --kind service\n\
            \x20 forge list --format json"
    )]
    List(ListArgs),

    /// Check an `ops.yml` manifest.
    #[command(
        about = "Validate an ops.yml manifest",
        after_help = "EXAMPLES:\n\
            \x20 forge validate\n\
            \x20 forge validate ./api\n\
            \x20 forge validate ./api/ops.yml --select api"
    )]
    Validate(ValidateArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 forge completions bash > ~/.local/share/bash-completion/completions/forge\n\
            \x20 forge completions zsh  > ~/.zfunc/_forge\n\
            \x20 forge completions fish > ~/.config/fish/completions/forge.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the Forge configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 forge config get service.port\n\
            \x20 forge config list\n\
            \x20 forge config init"
    )]
    Config(ConfigCommands),
}

// ── serve ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on (overrides `service.port`).
    #[arg(short = 'p', long = "port", value_name = "PORT")]
    pub port: Option<u16>,
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Template kind: `command` or `service`.
    #[arg(short = 'k', long = "kind", default_value = "command")]
    pub kind: String,

    /// Template target. Close spellings like `Node.js` or `py` are accepted.
    #[arg(short = 'f', long = "from", value_name = "TARGET", default_value = "node")]
    pub from: String,

    /// Package name written into the manifest.
    #[arg(short = 'n', long = "name")]
    pub name: String,

    #[arg(short = 'd', long = "description", default_value = "")]
    pub description: String,

    /// Package version (defaults to 0.1.0).
    #[arg(long = "version", value_name = "VERSION")]
    pub version: Option<String>,

    /// Destination directory (defaults to `./<name>`).
    #[arg(short = 't', long = "to", value_name = "DIR")]
    pub to: Option<PathBuf>,

    /// Write into an existing directory, replacing files with the same name
    #[arg(long)]
    pub force: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only templates of this kind.
    #[arg(short = 'k', long = "kind", value_enum)]
    pub kind: Option<KindFilter>,

    #[arg(long, value_enum, default_value_t = ListFormat::Table)]
    pub format: ListFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindFilter {
    Command,
    Service,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One id per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── validate ──────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Project directory or manifest file.
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Only check the named items.
    #[arg(short = 's', long = "select", value_name = "NAME", num_args = 1..)]
    pub select: Vec<String>,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `service.port`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the configuration file.
    Path,
    /// Write a default configuration file.
    Init {
        /// Overwrite an existing config file.
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn init_defaults_to_node_command() {
        let cli = Cli::parse_from(["forge", "init", "--name", "deploy"]);
        let Commands::Init(args) = cli.command else {
            panic!("expected Init command");
        };
        assert_eq!(args.kind, "command");
        assert_eq!(args.from, "node");
        assert_eq!(args.description, "");
        assert!(args.version.is_none() && args.to.is_none() && !args.force);
    }

    #[test]
    fn init_requires_a_name() {
        assert!(Cli::try_parse_from(["forge", "init"]).is_err());
    }

    #[test]
    fn new_is_an_alias_for_init() {
        let cli = Cli::parse_from(["forge", "new", "-n", "x", "-k", "service", "-f", "go"]);
        assert!(matches!(cli.command, Commands::Init(ref a) if a.kind == "service" && a.from == "go"));
    }

    #[test]
    fn serve_port_is_optional() {
        let cli = Cli::parse_from(["forge", "serve"]);
        assert!(matches!(cli.command, Commands::Serve(ServeArgs { port: None })));

        let cli = Cli::parse_from(["forge", "serve", "--port", "3000"]);
        assert!(matches!(cli.command, Commands::Serve(ServeArgs { port: Some(3000) })));

        assert!(Cli::try_parse_from(["forge", "serve", "--port", "70000"]).is_err());
    }

    #[test]
    fn validate_takes_path_and_selection() {
        let cli = Cli::parse_from(["forge", "validate", "api", "--select", "a", "b"]);
        let Commands::Validate(args) = cli.command else {
            panic!("expected Validate command");
        };
        assert_eq!(args.path, PathBuf::from("api"));
        assert_eq!(args.select, ["a", "b"]);

        let cli = Cli::parse_from(["forge", "validate"]);
        assert!(matches!(cli.command, Commands::Validate(ref a) if a.path == PathBuf::from(".")));
    }

    #[test]
    fn list_kind_filter_parses() {
        let cli = Cli::parse_from(["forge", "list", "--kind", "service", "--format", "csv"]);
        assert!(matches!(
            cli.command,
            Commands::List(ListArgs {
                kind: Some(KindFilter::Service),
                format: ListFormat::Csv
            })
        ));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["forge", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }
}
