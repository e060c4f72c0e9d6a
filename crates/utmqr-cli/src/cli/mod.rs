//! CLI for UTMQR.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use utmqr_core::config;
use utmqr_core::export::ExportFormat;
use utmqr_core::url_builder::TrackingParameters;

use commands::{
    run_completions, run_filename, run_generate, run_interactive, run_man, run_url,
};

/// Top-level CLI for UTMQR.
#[derive(Debug, Parser)]
#[command(name = "utmqr")]
#[command(about = "UTMQR: build UTM tracking URLs and export them as QR codes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// The four tracking inputs shared by `url` and `generate`.
#[derive(Debug, Clone, Args)]
pub struct TagArgs {
    /// Base URL; `https://` is added when no scheme is given.
    pub base: String,

    /// utm_source value (e.g. google, newsletter).
    #[arg(long, short = 's', default_value = "")]
    pub source: String,

    /// utm_medium value (e.g. cpc, email, social).
    #[arg(long, short = 'm', default_value = "")]
    pub medium: String,

    /// utm_campaign value (e.g. summer_sale).
    #[arg(long, short = 'c', default_value = "")]
    pub campaign: String,
}

impl TagArgs {
    pub fn params(&self) -> TrackingParameters {
        TrackingParameters::new(&self.base, &self.source, &self.medium, &self.campaign)
    }
}

#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub tags: TagArgs,

    /// Export format (repeatable): png, svg, eps or pdf. Default: all four.
    /// EPS files contain the SVG markup under a PostScript MIME type.
    #[arg(long = "format", short = 'f', value_name = "FORMAT")]
    pub formats: Vec<ExportFormat>,

    /// Directory to write files into (default: config `output_dir`, else the current directory).
    #[arg(long, short = 'o', value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Also copy the generated URL to the clipboard (OSC 52).
    #[arg(long)]
    pub copy: bool,

    /// Print each artifact as a data: URI instead of writing files.
    #[arg(long)]
    pub data_uri: bool,

    /// Print a JSON summary instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Print the tracking URL for the given inputs.
    Url {
        #[command(flatten)]
        tags: TagArgs,

        /// Print a JSON object with the inputs and the URL.
        #[arg(long)]
        json: bool,
    },

    /// Build the tracking URL, render the QR code and export it.
    Generate(GenerateArgs),

    /// Print the export filename today's exports would get.
    Filename {
        /// Base URL as typed (used for naming only).
        base: String,

        /// Campaign name (blank gives "nocampaign").
        #[arg(long, short = 'c', default_value = "")]
        campaign: String,

        /// File extension.
        #[arg(long, default_value = "png")]
        ext: String,
    },

    /// Edit the inputs line by line and export on demand.
    Interactive {
        /// Directory to write files into (default: config `output_dir`, else the current directory).
        #[arg(long, short = 'o', value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },

    /// Print shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },

    /// Print the man page (roff).
    Man,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Url { tags, json } => run_url(&tags, json)?,
            CliCommand::Generate(args) => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                run_generate(&cfg, &args, std::io::stdout(), std::io::stderr())?;
            }
            CliCommand::Filename {
                base,
                campaign,
                ext,
            } => run_filename(&base, &campaign, &ext),
            CliCommand::Interactive { out_dir } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                let dir = commands::output_dir(&cfg, out_dir.as_deref())?;
                let stdin = std::io::stdin();
                run_interactive(&cfg, &dir, stdin.lock(), std::io::stdout())?;
            }
            CliCommand::Completions { shell } => run_completions(shell)?,
            CliCommand::Man => run_man()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
