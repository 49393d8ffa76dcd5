use anyhow::Context;
use clap::{Parser, Subcommand};
use prodmatch::{read_listings, ClusterStats, ExtractedAttributes, MatchConfig, TitleMatcher};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Resolve scraped store listings to products
#[derive(Parser, Debug)]
#[command(name = "prodmatch")]
#[command(about = "Product identity resolution for store listings", long_about = None)]
struct Args {
    /// Path to a JSON match config
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level, used when RUST_LOG is not set
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score two titles and decide whether they are the same product
    Compare {
        title_a: String,
        title_b: String,

        /// Print the full score breakdown as JSON
        #[arg(long)]
        explain: bool,
    },
    /// Group a JSON array of listings into products
    Group {
        /// Input file, or `-` for stdin
        #[arg(default_value = "-")]
        input: String,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => MatchConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => MatchConfig::default(),
    };
    debug!(?config, "match config");
    let matcher = TitleMatcher::new(config);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Compare {
            title_a,
            title_b,
            explain,
        } => {
            let decision = matcher.decide(
                &ExtractedAttributes::from_title(&title_a),
                &ExtractedAttributes::from_title(&title_b),
            );
            if explain {
                serde_json::to_writer_pretty(&mut out, &decision)?;
                writeln!(out)?;
            } else {
                writeln!(out, "score: {:.4}", decision.score())?;
                writeln!(out, "match: {}", decision.is_match)?;
                writeln!(out, "top factor: {}", decision.breakdown.top_factor())?;
                if let Some(veto) = decision.breakdown.veto {
                    writeln!(out, "veto: {:?}", veto)?;
                }
            }
        }
        Command::Group { input } => {
            let listings = if input == "-" {
                read_listings(std::io::stdin().lock()).context("failed to read listings from stdin")?
            } else {
                prodmatch::load_listings(&input)
                    .with_context(|| format!("failed to read listings from {}", input))?
            };
            info!("Grouping {} listings", listings.len());

            let groups = prodmatch::group_listings(&listings, &matcher);
            let stats = ClusterStats::compute(&groups);
            info!(
                groups = stats.groups,
                singletons = stats.singletons,
                largest = stats.largest_group,
                "Grouping finished"
            );

            serde_json::to_writer_pretty(&mut out, &groups)?;
            writeln!(out)?;
        }
    }

    Ok(())
}
