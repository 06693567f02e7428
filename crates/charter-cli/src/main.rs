//! Charter CLI - generate deployment charts from container image metadata

use clap::{Parser, Subcommand};
use miette::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "charter")]
#[command(author = "Charter Contributors")]
#[command(version)]
#[command(about = "Generate deployment charts from a container image's own metadata", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List an image's resolved versions, oldest first
    Versions {
        /// Image short name (e.g. "radarr")
        image: String,
    },

    /// Render a chart for an image version
    Generate {
        /// Image short name (e.g. "radarr")
        image: String,

        /// Template tree to render
        #[arg(long, default_value = "template")]
        template_dir: PathBuf,

        /// Output directory; files land under <out>/<image>/
        #[arg(short, long, default_value = "out")]
        out: PathBuf,

        /// Raw tag to generate for (defaults to the newest resolved version)
        ///
        /// Named --tag, not --version: clap propagates the version flag to
        /// every subcommand and the two may not collide.
        #[arg(long)]
        tag: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Versions { image } => commands::versions::run(&image).await,
        Commands::Generate {
            image,
            template_dir,
            out,
            tag,
        } => commands::generate::run(&image, &template_dir, &out, tag.as_deref()).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_arguments_are_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_accepts_tag() {
        let cli = Cli::try_parse_from(["charter", "generate", "radarr", "--tag", "v1.2.3"]).unwrap();
        match cli.command {
            Commands::Generate { tag, .. } => assert_eq!(tag.as_deref(), Some("v1.2.3")),
            _ => panic!("expected generate subcommand"),
        }
    }
}
