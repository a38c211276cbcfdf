use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use dashboard::{Dashboard, Session};
use data_loader::{ArtifactContext, ArtifactLoader, ArtifactManifest};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Shopper's Spectrum - interactive customer segmentation and product recommendation dashboard
#[derive(Parser)]
#[command(name = "dashboard")]
#[command(about = "Interactive Shopper's Spectrum dashboard", long_about = None)]
struct Args {
    /// Directory holding (or receiving) the artifact files
    #[arg(short, long, default_value = ".")]
    artifact_dir: PathBuf,

    /// Optional TOML manifest overriding artifact identifiers and filenames
    #[arg(short, long)]
    manifest: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let context = match load_context(&args).await {
        Ok(context) => context,
        Err(e) => {
            eprintln!("{} Failed to load files: {:#}", "✗".red(), e);
            std::process::exit(1);
        }
    };

    let dashboard = Dashboard::new(Arc::new(context));
    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(dashboard, stdin.lock(), stdout.lock())
        .run()
        .context("Dashboard session ended with an I/O error")?;

    Ok(())
}

async fn load_context(args: &Args) -> Result<ArtifactContext> {
    let manifest = ArtifactManifest::load(args.manifest.as_deref())
        .context("Failed to read artifact manifest")?;
    let loader = Arc::new(ArtifactLoader::from_manifest(&args.artifact_dir, &manifest)?);

    println!("Loading artifacts from {}...", args.artifact_dir.display());
    let start = Instant::now();
    let context = ArtifactContext::load(loader, &manifest).await?;
    println!("{} Loaded artifacts in {:?}", "✓".green(), start.elapsed());

    Ok(context)
}
