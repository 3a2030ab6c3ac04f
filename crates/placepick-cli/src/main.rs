use clap::{Args, Parser, Subcommand};
use placepick_client::PlacepickClient;
use placepick_core::Category;
use tracing_subscriber::EnvFilter;

mod output;
mod places;

#[derive(Debug, Parser)]
#[command(name = "placepick")]
#[command(about = "Browse cafes, restaurants and resorts through a placepick server")]
struct Cli {
    /// Base URL of the placepick server
    #[arg(
        long,
        global = true,
        env = "PLACEPICK_SERVER_URL",
        default_value = "http://localhost:3000"
    )]
    server: String,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value = "10")]
    timeout: u64,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Device position given explicitly, in provider `x`/`y` order.
#[derive(Debug, Clone, Args, PartialEq)]
struct LocationArgs {
    /// Longitude
    #[arg(long, requires = "y", allow_hyphen_values = true)]
    x: Option<String>,
    /// Latitude
    #[arg(long, requires = "x", allow_hyphen_values = true)]
    y: Option<String>,
    /// Search radius in meters (only with --x/--y)
    #[arg(long, requires = "x")]
    radius: Option<u32>,
}

impl From<LocationArgs> for places::LocationFlags {
    fn from(args: LocationArgs) -> Self {
        Self {
            x: args.x,
            y: args.y,
            radius: args.radius,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List places in a category, optionally loading more pages
    Browse {
        /// cafe, restaurant or resort
        category: Category,
        /// Region name (e.g. 서울, 제주)
        #[arg(long, conflicts_with = "x")]
        region: Option<String>,
        /// Sub-filter keyword (e.g. 감성카페)
        #[arg(long)]
        sub: Option<String>,
        /// accuracy or distance (distance needs --x/--y)
        #[arg(long, default_value = "accuracy")]
        sort: String,
        /// Items per page (1-15)
        #[arg(long, default_value = "3")]
        size: u32,
        /// Number of pages to load
        #[arg(long, default_value = "1")]
        pages: u32,
        #[command(flatten)]
        location: LocationArgs,
    },
    /// Free-text search across all categories
    Search {
        query: String,
        #[arg(long, default_value = "1")]
        page: u32,
        #[arg(long, default_value = "15")]
        size: u32,
    },
    /// Pick a random place
    Featured {
        /// Pick through Naver local search instead of the primary provider
        #[arg(long)]
        naver: bool,
        #[arg(long, conflicts_with = "x")]
        region: Option<String>,
        #[command(flatten)]
        location: LocationArgs,
    },
    /// Blog reviews and photos for one place
    Detail {
        category: Category,
        title: String,
        /// Image to use when no photo is found
        #[arg(long)]
        thumbnail: Option<String>,
    },
    /// Show categories, sub-filters, regions and radius options
    Categories,
    /// Check the server and which providers it has configured
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("placepick: pass a subcommand, or --help for usage");
        return Ok(());
    };

    let connect = || {
        PlacepickClient::new(&cli.server, cli.timeout)
            .map_err(|e| anyhow::anyhow!("failed to build client for {}: {e}", cli.server))
    };

    match command {
        Commands::Browse {
            category,
            region,
            sub,
            sort,
            size,
            pages,
            location,
        } => {
            let opts = places::BrowseOptions {
                region,
                sub,
                sort,
                size,
                pages,
                location: location.into(),
            };
            places::run_browse(&connect()?, category, &opts).await?;
        }
        Commands::Search { query, page, size } => {
            places::run_search(&connect()?, &query, page, size).await?;
        }
        Commands::Featured {
            naver,
            region,
            location,
        } => {
            places::run_featured(
                &connect()?,
                naver,
                region.as_deref(),
                &location.into(),
            )
            .await?;
        }
        Commands::Detail {
            category,
            title,
            thumbnail,
        } => places::run_detail(&connect()?, category, &title, thumbnail.as_deref()).await?,
        Commands::Health => places::run_health(&connect()?).await?,
        Commands::Categories => output::print_categories(),
    }

    Ok(())
}
