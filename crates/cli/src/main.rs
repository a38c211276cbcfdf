use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use dashboard::render::print_blocks;
use dashboard::{
    Dashboard, Interaction, MAX_TOP_N, MIN_TOP_N, RecommendationForm, SegmentationForm,
};
use data_loader::{ArtifactContext, ArtifactLoader, ArtifactManifest, CustomerId};
use recommender::{predict_item_item, predict_user_user};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Shopper's Spectrum - customer segmentation and product recommendations
#[derive(Parser)]
#[command(name = "shopper-spectrum")]
#[command(
    about = "RFM customer segmentation and collaborative-filtering recommendations",
    long_about = None
)]
struct Cli {
    /// Directory holding (or receiving) the artifact files
    #[arg(short, long, default_value = ".", global = true)]
    artifact_dir: PathBuf,

    /// Optional TOML manifest overriding artifact identifiers and filenames
    #[arg(short, long, global = true)]
    manifest: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download any missing artifacts without loading them
    Fetch,

    /// Predict the customer segment for RFM values
    Segment {
        /// Days since last purchase
        #[arg(long, default_value = "325")]
        recency: f64,

        /// Number of purchases
        #[arg(long, default_value = "1")]
        frequency: u32,

        /// Total spend
        #[arg(long, default_value = "765322")]
        monetary: f64,
    },

    /// List the products most similar to a product
    Recommend {
        /// Product name, exactly as listed by `products`
        #[arg(long)]
        product: String,

        /// Number of similar products to list
        #[arg(
            long,
            default_value = "5",
            value_parser = clap::value_parser!(u64).range(MIN_TOP_N as u64..=MAX_TOP_N as u64)
        )]
        top_n: u64,
    },

    /// List the products available for recommendations
    Products {
        /// Only show products containing this text (case-insensitive)
        #[arg(long)]
        filter: Option<String>,
    },

    /// Predict how much a customer would buy of a product
    Score {
        /// Customer ID
        #[arg(long)]
        customer: CustomerId,

        /// Product name
        #[arg(long)]
        product: String,

        /// Which collaborative-filtering predictor to run
        #[arg(long, value_enum, default_value_t = Method::Both)]
        method: Method,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Method {
    /// Weighted by customer-customer similarity
    User,
    /// Weighted by product-product similarity
    Item,
    Both,
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

    let cli = Cli::parse();

    let manifest = ArtifactManifest::load(cli.manifest.as_deref())
        .context("Failed to read artifact manifest")?;
    let loader = Arc::new(
        ArtifactLoader::from_manifest(&cli.artifact_dir, &manifest)
            .context("Failed to set up artifact loader")?,
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Fetch => handle_fetch(&loader, &manifest).await?,
        Commands::Segment {
            recency,
            frequency,
            monetary,
        } => {
            let context = load_context(loader, &manifest).await?;
            handle_segment(context, recency, frequency, monetary)?
        }
        Commands::Recommend { product, top_n } => {
            let context = load_context(loader, &manifest).await?;
            handle_recommend(context, product, top_n as usize)?
        }
        Commands::Products { filter } => {
            let context = load_context(loader, &manifest).await?;
            handle_products(&context, filter.as_deref())
        }
        Commands::Score {
            customer,
            product,
            method,
        } => {
            let context = load_context(loader, &manifest).await?;
            handle_score(&context, customer, &product, method)?
        }
    }

    Ok(())
}

/// Load all artifacts, downloading anything missing first
async fn load_context(
    loader: Arc<ArtifactLoader>,
    manifest: &ArtifactManifest,
) -> Result<Arc<ArtifactContext>> {
    println!("Loading artifacts from {}...", loader.dir().display());
    let start = Instant::now();
    let context = ArtifactContext::load(loader, manifest)
        .await
        .context("Failed to load files")?;
    println!("{} Loaded artifacts in {:?}", "✓".green(), start.elapsed());
    Ok(Arc::new(context))
}

/// Handle the 'fetch' command
async fn handle_fetch(loader: &ArtifactLoader, manifest: &ArtifactManifest) -> Result<()> {
    let start = Instant::now();
    for spec in manifest.artifacts.iter() {
        let present = loader.path_for(spec).exists();
        let path = loader
            .fetch(spec)
            .await
            .with_context(|| format!("Failed to fetch {}", spec.filename))?;
        let status = if present { "present" } else { "downloaded" };
        println!("{} {} ({})", "✓".green(), path.display(), status);
    }
    info!("Fetch finished in {:?}", start.elapsed());
    Ok(())
}

/// Handle the 'segment' command through the Customer Segmentation page
fn handle_segment(
    context: Arc<ArtifactContext>,
    recency: f64,
    frequency: u32,
    monetary: f64,
) -> Result<()> {
    let interaction = Interaction::Segmentation {
        form: SegmentationForm {
            recency,
            frequency,
            monetary,
        },
        submitted: true,
    };
    render(&Dashboard::new(context), &interaction)
}

/// Handle the 'recommend' command through the Product Recommendation page
fn handle_recommend(context: Arc<ArtifactContext>, product: String, top_n: usize) -> Result<()> {
    let dashboard = Dashboard::new(context);
    if !dashboard.products().contains(&product) {
        bail!(
            "Product '{}' is not in the product list (see the 'products' command)",
            product
        );
    }

    let interaction = Interaction::Recommendation {
        form: RecommendationForm {
            product: Some(product),
            top_n,
        },
        submitted: true,
    };
    render(&dashboard, &interaction)
}

fn render(dashboard: &Dashboard, interaction: &Interaction) -> Result<()> {
    let blocks = dashboard.handle(interaction);
    let stdout = io::stdout();
    print_blocks(&mut stdout.lock(), &blocks).context("Failed to write output")
}

/// Handle the 'products' command
fn handle_products(context: &ArtifactContext, filter: Option<&str>) {
    let filter = filter.map(str::to_lowercase);
    let matches: Vec<(usize, &String)> = context
        .products()
        .iter()
        .enumerate()
        .filter(|(_, product)| {
            filter
                .as_deref()
                .is_none_or(|term| product.to_lowercase().contains(term))
        })
        .collect();

    println!(
        "{}",
        format!("Products ({} of {}):", matches.len(), context.products().len())
            .bold()
            .blue()
    );
    for (idx, product) in matches {
        println!("{}. {}", (idx + 1).to_string().green(), product);
    }
}

/// Handle the 'score' command
fn handle_score(
    context: &ArtifactContext,
    customer: CustomerId,
    product: &str,
    method: Method,
) -> Result<()> {
    let stdout = io::stdout();
    write_score(&mut stdout.lock(), context, customer, product, method)
        .context("Failed to write output")
}

/// Unknown customers and products are warnings; the predictors then report no prediction
fn write_score<W: Write>(
    out: &mut W,
    context: &ArtifactContext,
    customer: CustomerId,
    product: &str,
    method: Method,
) -> io::Result<()> {
    if !context.user_item().has_column(product) {
        writeln!(out, "{} Product '{}' not found", "!".yellow(), product)?;
    }
    if !context.user_item().has_row(&customer) {
        writeln!(out, "{} Customer {} has no purchase history", "!".yellow(), customer)?;
    }

    writeln!(
        out,
        "{}",
        format!("Predicted quantity of '{}' for customer {}:", product, customer)
            .bold()
            .blue()
    )?;
    if matches!(method, Method::User | Method::Both) {
        write_prediction(out, "User-based", predict_user_user(context, customer, product))?;
    }
    if matches!(method, Method::Item | Method::Both) {
        write_prediction(out, "Item-based", predict_item_item(context, customer, product))?;
    }
    Ok(())
}

fn write_prediction<W: Write>(out: &mut W, label: &str, score: Option<f64>) -> io::Result<()> {
    match score {
        Some(score) => writeln!(out, "{}{}: {:.4}", "• ".cyan(), label, score),
        None => writeln!(out, "{}{}: {}", "• ".cyan(), label, "no prediction".yellow()),
    }
}
