// Command routing and dispatch

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stencil_generation::Case;

use crate::commands::*;
use crate::error::CliResult;

/// Stencil - render logic-less templates with identifier case helpers
#[derive(Parser, Debug)]
#[command(name = "stencil")]
#[command(bin_name = "stencil")]
#[command(about = "Render logic-less templates with identifier case helpers")]
#[command(
    long_about = "Stencil renders Mustache-style templates against a context made of a provider name, its resource identifiers, an owner name and the case helpers {{#capitalize}}, {{#camel}} and {{#snake}}.\n\nExample:\n  stencil render resource.mustache --provider \"addy mail\" -r mail_alias -r domain --owner AcmeCorp -o out.ts"
)]
#[command(version)]
#[command(author = "Stencil Contributors")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only report errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render a template file
    #[command(about = "Render a template against the generator context")]
    Render {
        /// Path to the template file
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,

        /// Write output to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Provider name
        #[arg(short, long, value_name = "NAME")]
        provider: Option<String>,

        /// Resource identifier (repeatable, order is kept)
        #[arg(short = 'r', long = "resource", value_name = "ID")]
        resources: Vec<String>,

        /// Owner name
        #[arg(long, value_name = "NAME")]
        owner: Option<String>,

        /// Extra context data (JSON or YAML mapping)
        #[arg(long, value_name = "FILE")]
        context: Option<PathBuf>,

        /// Configuration file (TOML, YAML or JSON)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Do not HTML-escape interpolated variables
        #[arg(long)]
        no_escape: bool,

        /// Fail on names missing from the context
        #[arg(long)]
        strict: bool,

        /// Also register pascal, kebab, shouty, upper and lower helpers
        #[arg(long)]
        extended_helpers: bool,
    },

    /// Convert identifiers between casings
    #[command(about = "Print identifiers converted to another casing")]
    Case {
        /// Target casing (capitalize, camel, snake, pascal, kebab, shouty, upper, lower)
        #[arg(short, long, value_name = "CASE")]
        to: Case,

        /// Identifiers to convert
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<String>,
    },
}

/// Command router
pub struct CommandRouter;

impl CommandRouter {
    /// Parse CLI arguments and route to appropriate handler
    pub fn route() -> CliResult<()> {
        let cli = Cli::parse();

        // Initialize logging based on CLI flags
        crate::logging::init_logging(cli.verbose, cli.quiet);

        Self::execute(&cli)
    }

    /// Execute a command
    pub fn execute(cli: &Cli) -> CliResult<()> {
        match &cli.command {
            Commands::Render {
                template,
                output,
                provider,
                resources,
                owner,
                context,
                config,
                no_escape,
                strict,
                extended_helpers,
            } => {
                let cmd = RenderCommand::new(template.clone())
                    .with_output(output.clone())
                    .with_provider(provider.clone())
                    .with_resources(resources.clone())
                    .with_owner(owner.clone())
                    .with_context_file(context.clone())
                    .with_config(config.clone())
                    .with_no_escape(*no_escape)
                    .with_strict(*strict)
                    .with_extended_helpers(*extended_helpers);
                cmd.execute()
            }
            Commands::Case { to, inputs } => {
                let cmd = CaseCommand::new(*to, inputs.clone());
                cmd.execute()
            }
        }
    }
}
