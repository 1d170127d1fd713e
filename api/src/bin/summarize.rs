//! Fills `summary_text` for every record of a scraped recipe catalog.

use std::path::PathBuf;

use clap::Parser;
use nutrifilter_core::{
    domain::recipe::helpers::with_summaries,
    infrastructure::catalog::{read_recipes, write_recipes},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "summarize", version, about = "Derive summary texts for a recipe catalog")]
struct SummarizeArgs {
    /// Raw catalog produced by the scraper.
    #[arg(long, env = "RAW_CATALOG_PATH", default_value = "recipes.json")]
    input: PathBuf,

    #[arg(long, env = "CATALOG_PATH", default_value = "recipes_with_summary.json")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = SummarizeArgs::parse();

    let recipes = read_recipes(&args.input).await?;
    let recipes = with_summaries(recipes);
    write_recipes(&args.output, &recipes).await?;

    info!(
        recipes = recipes.len(),
        output = %args.output.display(),
        "Wrote summarized catalog"
    );
    Ok(())
}
