//! discogen CLI entrypoint
//! Parses command-line arguments and dispatches to the core generator.

// Internal imports (std, crate)
use std::path::PathBuf;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use discogen_core::{Config, DiscoveryContext};
use reqwest::Url;
use tokio::fs;

#[derive(Parser)]
#[command(name = "discogen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate a typed client library from a discovery document
    Generate {
        /// Project name
        #[arg(long, default_value = "discogen_client")]
        project_name: String,
        /// Path or URL to the discovery document (YAML or JSON)
        ///
        /// Can be a local file path or an HTTP/HTTPS URL
        /// Example: --schema-path path/to/calendar.json
        /// Example: --schema-path https://www.googleapis.com/discovery/v1/apis/calendar/v3/rest
        #[arg(long)]
        schema_path: String,
        /// Output directory for generated code
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Base URI override for the generated service (Optional)
        #[arg(long)]
        base_url: Option<Url>,
        /// Top-level resource to include (repeatable; default is all)
        #[arg(long = "include-resource")]
        include_resources: Vec<String>,
        /// Top-level resource to exclude (repeatable)
        #[arg(long = "exclude-resource")]
        exclude_resources: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    match &cli.command {
        Commands::Generate {
            project_name,
            schema_path,
            output_dir,
            base_url,
            include_resources,
            exclude_resources,
        } => {
            // Resolve output directory - use project_name if not specified
            let output_path = output_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(project_name));

            // Load the discovery document from either a file or URL
            println!("Loading discovery document from: {}", schema_path);
            let ctx = DiscoveryContext::from_file_or_url(schema_path)
                .await
                .context("Failed to load discovery document")?;

            let mut config = Config::new(
                project_name.clone(),
                schema_path.clone(),
                output_path.to_string_lossy(),
            );
            config.include_all = include_resources.is_empty();
            config.include_resources = include_resources.clone();
            config.exclude_resources = exclude_resources.clone();
            config.base_url = base_url.clone();

            let report = discogen_core::generate(&ctx, &config)?;

            for issue in &report.issues {
                tracing::warn!(unit = %issue.unit, error = %issue.error, "skipped during generation");
                eprintln!("skipped {}: {}", issue.unit, issue.error);
            }
            if report.is_empty() {
                anyhow::bail!("generation produced no source units");
            }

            // Create output directory if it doesn't exist
            if !output_path.exists() {
                println!("Creating output directory: {}", output_path.display());
                fs::create_dir_all(&output_path)
                    .await
                    .map_err(|e| anyhow::anyhow!("Failed to create output directory: {}", e))?;
            }

            // Generation is complete at this point; only now touch the sink,
            // so a failed run never leaves a partial file behind.
            for unit in &report.units {
                let path = output_path.join(&unit.file_name);
                fs::write(&path, &unit.text)
                    .await
                    .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", path.display(), e))?;
            }

            println!(
                "✅ Generated {} source files in: {}",
                report.units.len(),
                output_path.display()
            );
        }
    }
    Ok(())
}
