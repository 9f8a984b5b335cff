use crate::{
    commands::{Commands, SettingsArgs},
    error::CliError,
};
use clap::Parser;
use engine_config::settings::CompilerSettings;
use model::{
    core::bind_style::BindStyle, pagination::limits::CompileLimits, request::CompileRequest,
};
use planner::QueryCompiler;
use std::{path::Path, str::FromStr};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

#[derive(Parser)]
#[command(
    name = "sieve",
    version = "0.1.0",
    about = "Compile structured filters into parameterized SQL"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // Initialize logger; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            request,
            bind_style,
            settings,
            json,
        } => {
            let limits = load_limits(&settings)?;
            let mut request = load_request(&request).await?;

            if let Some(style) = bind_style {
                request.bind_style =
                    BindStyle::from_str(&style).map_err(|_| CliError::InvalidBindStyle(style))?;
            }

            let compiled = QueryCompiler::new(limits).compile(&request)?;
            output::print_query(&compiled, json)?;
        }
        Commands::Settings { settings } => {
            let limits = load_limits(&settings)?;
            println!("{}", output::to_json(&limits)?);
        }
    }

    Ok(())
}

fn load_limits(args: &SettingsArgs) -> Result<CompileLimits, CliError> {
    let settings = CompilerSettings::load(args.settings.as_deref(), args.env_file.as_deref())?;
    let limits = settings.limits()?;
    info!(
        "Using limits: default page size {}, max page size {}, max filter depth {}",
        limits.default_page_size, limits.max_page_size, limits.max_filter_depth
    );
    Ok(limits)
}

async fn load_request(path: &Path) -> Result<CompileRequest, CliError> {
    let source = tokio::fs::read_to_string(path).await?;
    let request = serde_json::from_str(&source)?;
    Ok(request)
}
