// Leaderboard and purse aggregation.
//
// Consumes the scored long table and produces the two summary views the
// presentation layer reads: the winning-bid leaderboard and the per-franchise
// spend/remaining summary. Both are rebuilt from scratch on every pipeline
// run.

use std::cmp::Ordering;

use tracing::warn;

use crate::valuation::loader::PlayerRecord;
use crate::valuation::score::ScoredBid;
use crate::valuation::teams::{Team, TeamBudgets};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One leaderboard row: the bid a player was actually sold on.
#[derive(Debug, Clone)]
pub struct LeaderboardEntry {
    pub name: String,
    pub team: Team,
    pub role: String,
    pub country: String,
    pub amount: f64,
    pub composite: f64,
}

/// Per-franchise purse usage.
#[derive(Debug, Clone, Copy)]
pub struct TeamSpend {
    pub team: Team,
    pub spent: f64,
    pub remaining: f64,
}

// ---------------------------------------------------------------------------
// Leaderboard
// ---------------------------------------------------------------------------

/// Winning bids only, sorted non-increasing by composite score.
///
/// The sort is stable, so bids with equal composites keep their pipeline row
/// order. A losing bid equal to the winning amount never produces a second
/// row for the player; only the `team == winner` record qualifies.
pub fn build_leaderboard(scored: &[ScoredBid], players: &[PlayerRecord]) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = scored
        .iter()
        .filter(|b| b.is_winning())
        .map(|b| LeaderboardEntry {
            name: b.name.clone(),
            team: b.team,
            role: b.role.clone(),
            country: b.country.clone(),
            amount: b.amount,
            composite: b.composite,
        })
        .collect();

    // A sold player whose winning bid was never recorded has no scored row
    // and cannot be ranked.
    if entries.len() < players.len() {
        for player in players {
            if player.winning_bid().is_none() {
                warn!(
                    "player '{}' sold to {} with no recorded bid amount; absent from leaderboard",
                    player.name, player.winner
                );
            }
        }
    }

    entries.sort_by(|a, b| {
        b.composite
            .partial_cmp(&a.composite)
            .unwrap_or(Ordering::Equal)
    });
    entries
}

// ---------------------------------------------------------------------------
// Spend summary
// ---------------------------------------------------------------------------

/// Sum each franchise's winning bids and subtract from its purse.
///
/// Every configured franchise appears, including those that bought nobody.
pub fn team_spend(scored: &[ScoredBid], budgets: &TeamBudgets) -> Vec<TeamSpend> {
    Team::ALL
        .iter()
        .map(|&team| {
            let spent: f64 = scored
                .iter()
                .filter(|b| b.team == team && b.is_winning())
                .map(|b| b.amount)
                .sum();
            TeamSpend {
                team,
                spent,
                remaining: budgets.purse(team) - spent,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
