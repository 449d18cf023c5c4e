use anyhow::Result;
use clap::{Parser, Subcommand};
use recsys_core::rules::{self, DatedItem, DEFAULT_TOP_N};
use recsys_core::{load_catalog, Backend, EngineConfig, Recommendation, Recommender};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "recommender")]
#[command(about = "Recommend catalog titles by content similarity or simple rules", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the titles most similar to a seed title
    Similar {
        /// Catalog CSV file
        #[arg(long, default_value = "netflix_titles.csv")]
        catalog: String,
        /// Seed title
        #[arg(long, default_value = "The Queen's Gambit")]
        title: String,
        /// Number of recommendations
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,
        /// Similarity backend: dense or inverted
        #[arg(long, default_value_t = Backend::Dense)]
        backend: Backend,
        /// Compute the dense matrix on a single thread
        #[arg(long, default_value_t = false)]
        sequential: bool,
        /// Print results as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the rule-based listings (recent movies, international shows, newest titles)
    Rules {
        /// Catalog CSV file
        #[arg(long, default_value = "netflix_titles.csv")]
        catalog: String,
        /// Rows per listing
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top_n: usize,
    },
}

#[derive(Serialize)]
struct SimilarOutput<'a> {
    seed: &'a str,
    results: &'a [Recommendation],
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Similar { catalog, title, count, backend, sequential, json } => {
            let config = EngineConfig { backend, parallel: !sequential };
            similar(&catalog, &title, count, &config, json)
        }
        Commands::Rules { catalog, top_n } => rule_listings(&catalog, top_n),
    }
}

fn similar(catalog: &str, title: &str, count: usize, config: &EngineConfig, json: bool) -> Result<()> {
    let items = load_catalog(catalog)?;
    let recommender = Recommender::build(&items, config);
    let results = recommender.recommend_scored(title, count)?;
    tracing::info!(catalog, seed = title, requested = count, returned = results.len(), "similar titles ready");

    if json {
        println!("{}", serde_json::to_string_pretty(&SimilarOutput { seed: title, results: &results })?);
        return Ok(());
    }
    println!("Content-Based: Top {count} Similar to '{title}'");
    for (i, rec) in results.iter().enumerate() {
        println!("{}. {}", i + 1, rec.title);
    }
    Ok(())
}

/// Which optional fields a listing prints under each title.
#[derive(Clone, Copy, Default)]
struct Columns {
    kind: bool,
    rating: bool,
    category: bool,
}

fn rule_listings(catalog: &str, top_n: usize) -> Result<()> {
    let items = load_catalog(catalog)?;
    let prepared = rules::prepare(&items);
    tracing::info!(catalog, items = items.len(), dated = prepared.len(), top_n, "building rule listings");

    print_listing(
        &format!("Top {top_n} Recently Added Movies (PG-13 or TV-MA)"),
        &rules::recent_movies(&prepared, top_n),
        Columns { rating: true, ..Columns::default() },
    );
    print_listing(
        &format!("Top {top_n} International TV Shows"),
        &rules::international_tv_shows(&prepared, top_n),
        Columns { rating: true, category: true, ..Columns::default() },
    );
    print_listing(
        &format!("Top {top_n} Most Recently Added Titles (Overall)"),
        &rules::most_recent(&prepared, top_n),
        Columns { kind: true, ..Columns::default() },
    );
    Ok(())
}

fn print_listing(heading: &str, rows: &[&DatedItem], columns: Columns) {
    println!("\n{heading}");
    for (i, row) in rows.iter().enumerate() {
        let item = &row.item;
        let year = item.release_year.map(|y| y.to_string()).unwrap_or_default();
        println!("{}. {} ({})", i + 1, item.title, year);
        if columns.kind {
            println!("   Type: {}", item.kind.as_deref().unwrap_or(""));
        }
        if columns.rating {
            println!("   Rating: {}", item.rating.as_deref().unwrap_or(""));
        }
        if columns.category {
            println!("   Category: {}", item.listed_in.as_deref().unwrap_or(""));
        }
        println!("   Date Added: {}", row.date_added);
        println!();
    }
}
