use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a JSON request into a SQL fragment and its bindings
    Compile {
        #[arg(help = "Path to the JSON request file")]
        request: PathBuf,

        #[arg(
            long,
            help = "Placeholder style: question, dollar, colon or at. Overrides the request"
        )]
        bind_style: Option<String>,

        #[command(flatten)]
        settings: SettingsArgs,

        #[arg(long, help = "Print the result as JSON instead of plain text")]
        json: bool,
    },
    /// Print the effective compiler settings
    Settings {
        #[command(flatten)]
        settings: SettingsArgs,
    },
}

#[derive(clap::Args)]
pub struct SettingsArgs {
    #[arg(long, help = "JSON settings file; defaults to $SIEVE_SETTINGS_FILE")]
    pub settings: Option<PathBuf>,

    #[arg(long, help = "Read additional variables from this .env file")]
    pub env_file: Option<PathBuf>,
}
