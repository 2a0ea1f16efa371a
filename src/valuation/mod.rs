// Valuation pipeline: clean → reshape → score → aggregate.
//
// `run` is the single entry point. It builds every derived table in one pass
// and publishes them as an immutable `AuctionSnapshot`; nothing downstream
// mutates pipeline output.

pub mod aggregate;
pub mod loader;
pub mod reshape;
pub mod score;
pub mod snapshot;
pub mod teams;

use std::path::Path;

use tracing::info;

use crate::valuation::loader::PlayerRecord;
use crate::valuation::teams::TeamBudgets;

pub use snapshot::AuctionSnapshot;

/// Everything that can stop a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] loader::LoadError),

    #[error(transparent)]
    Score(#[from] score::ScoreError),
}

/// Run the full pipeline over an already-cleaned player table.
pub fn run(players: Vec<PlayerRecord>) -> Result<AuctionSnapshot, score::ScoreError> {
    let budgets = TeamBudgets::fixed();

    let bids = reshape::melt(&players);
    let highest = score::highest_auction_bid(&players).unwrap_or(0.0);
    let role_maxima = score::RoleMaxima::from_bids(&bids);
    let scored = score::score_bids(&bids, &budgets, &role_maxima, highest)?;

    let leaderboard = aggregate::build_leaderboard(&scored, &players);
    let spend = aggregate::team_spend(&scored, &budgets);

    info!(
        "pipeline complete: {} players, {} scored bids, highest bid {}",
        players.len(),
        scored.len(),
        highest
    );

    Ok(AuctionSnapshot::new(
        players,
        scored,
        leaderboard,
        spend,
        highest,
        role_maxima,
    ))
}

/// Load the auction CSV and run the pipeline over it.
pub fn run_from_csv(path: &Path) -> Result<AuctionSnapshot, PipelineError> {
    let players = loader::load_auction(path)?;
    Ok(run(players)?)
}
