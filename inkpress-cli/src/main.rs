//! # inkpress CLI
//!
//! Command-line interface for the inkpress static site generator.

use clap::Parser;
use inkpress_core::{run_build, BuildConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inkpress")]
#[command(author, version, about = "Small markdown-to-HTML static site generator", long_about = None)]
struct Cli {
    /// Content directory with markdown documents
    #[arg(long, default_value = "posts")]
    content: PathBuf,

    /// Template directory
    #[arg(long, default_value = "templates")]
    templates: PathBuf,

    /// Output directory for generated pages
    #[arg(long, default_value = "public")]
    output: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = BuildConfig {
        content_dir: cli.content,
        template_dir: cli.templates,
        output_dir: cli.output,
    };

    match run_build(&config).await {
        Ok(report) => {
            println!("Build successful. Generated {} post(s).", report.published);
            Ok(())
        }
        Err(err) => {
            eprintln!("Build failed: {err}");
            std::process::exit(1);
        }
    }
}
