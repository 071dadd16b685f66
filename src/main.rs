use anyhow::Result;
use blogindex::build::build_site;
use blogindex::config::{Config, SITE_NAME, SITE_URL};
use blogindex::logging;
use chrono::Utc;
use clap::Parser;
use tracing::info;
use url::Url;

/// Generates paginated JSON post indexes, sitemap.xml and rss.xml from the
/// posts in ./posts, writing them to the current directory.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Accepted and ignored, so build wrappers that pass extra arguments
    /// still run.
    #[arg(hide = true, trailing_var_arg = true)]
    _ignored: Vec<String>,
}

fn main() -> Result<()> {
    let _cli = Cli::parse();

    tracing::subscriber::set_global_default(logging::subscriber(std::io::stdout))?;

    info!("{} index & sitemap generator", SITE_NAME);

    let config = Config::for_site(Url::parse(SITE_URL)?);
    let summary = build_site(&config, Utc::now())?;

    info!(
        "Generation complete: {} posts, {} index pages",
        summary.total_posts, summary.total_pages
    );
    Ok(())
}
