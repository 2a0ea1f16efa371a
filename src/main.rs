// Auction valuation entry point.
//
// Startup sequence:
// 1. Initialize tracing (stderr, env-filtered)
// 2. Load config (copying defaults/ on first run)
// 3. Load and clean the auction CSV
// 4. Run the valuation pipeline
// 5. Print the leaderboard and purse report to stdout

use std::path::Path;

use anyhow::Context;
use tracing::info;

use auction_valuation::config;
use auction_valuation::report;
use auction_valuation::valuation;
use auction_valuation::valuation::snapshot::Selection;

fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: csv={}, top_n={}",
        config.auction_csv, config.report.top_n
    );

    let players = valuation::loader::load_auction(Path::new(&config.auction_csv))
        .context("failed to load auction CSV")?;
    info!("Loaded {} sold players", players.len());

    let snapshot = valuation::run(players).context("valuation pipeline failed")?;

    let role = match &config.report.role {
        Some(role) => Selection::One(role.clone()),
        None => Selection::All,
    };

    let mut stdout = std::io::stdout().lock();
    report::render(&snapshot, &role, config.report.top_n, &mut stdout)
        .context("failed to write report")?;

    Ok(())
}

/// Initialize tracing to stderr so the report on stdout stays clean.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("auction_valuation=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
