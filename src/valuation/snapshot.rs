// Published pipeline output.
//
// Everything the presentation layer reads lives behind this snapshot: it is
// built once per pipeline run and only ever handed out by shared reference,
// so concurrent readers need no locking. None of the query methods mutate.

use std::collections::HashMap;

use crate::valuation::aggregate::{LeaderboardEntry, TeamSpend};
use crate::valuation::loader::PlayerRecord;
use crate::valuation::score::{RoleMaxima, ScoredBid};
use crate::valuation::teams::Team;

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// A filter over one attribute: everything, a single value, or a set of
/// values.
#[derive(Debug, Clone)]
pub enum Selection<T> {
    All,
    One(T),
    Many(Vec<T>),
}

impl<T: PartialEq> Selection<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::One(v) => v == value,
            Selection::Many(vs) => vs.contains(value),
        }
    }
}

// ---------------------------------------------------------------------------
// Breakdown types
// ---------------------------------------------------------------------------

/// Aggregation applied by `team_role_breakdown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Sum of bid amounts.
    TotalBid,
    /// Number of bids placed.
    PlayerCount,
    /// Mean bid amount.
    MeanBid,
}

/// One cell of the franchise × role breakdown.
#[derive(Debug, Clone)]
pub struct TeamRoleCell {
    pub team: Team,
    pub role: String,
    pub value: f64,
}

/// Player × franchise bid pivot, the feed for a valuation heatmap.
#[derive(Debug, Clone)]
pub struct BidMatrix {
    /// Column order.
    pub teams: Vec<Team>,
    /// One row per player, in pipeline order; `amounts` parallels `teams`.
    pub rows: Vec<BidMatrixRow>,
}

#[derive(Debug, Clone)]
pub struct BidMatrixRow {
    pub name: String,
    pub amounts: Vec<Option<f64>>,
}

// ---------------------------------------------------------------------------
// AuctionSnapshot
// ---------------------------------------------------------------------------

/// Immutable result of one pipeline run.
#[derive(Debug, Clone)]
pub struct AuctionSnapshot {
    players: Vec<PlayerRecord>,
    scored: Vec<ScoredBid>,
    leaderboard: Vec<LeaderboardEntry>,
    spend: Vec<TeamSpend>,
    highest_bid: f64,
    role_maxima: RoleMaxima,
}

impl AuctionSnapshot {
    pub(crate) fn new(
        players: Vec<PlayerRecord>,
        scored: Vec<ScoredBid>,
        leaderboard: Vec<LeaderboardEntry>,
        spend: Vec<TeamSpend>,
        highest_bid: f64,
        role_maxima: RoleMaxima,
    ) -> Self {
        AuctionSnapshot {
            players,
            scored,
            leaderboard,
            spend,
            highest_bid,
            role_maxima,
        }
    }

    // ---- Published tables ----

    /// The cleaned wide table, one row per sold player.
    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    /// The full scored long table (null bids already dropped).
    pub fn scored_bids(&self) -> &[ScoredBid] {
        &self.scored
    }

    /// Winning bids sorted non-increasing by composite score.
    pub fn leaderboard(&self) -> &[LeaderboardEntry] {
        &self.leaderboard
    }

    /// Per-franchise spend and purse remaining, every franchise present.
    pub fn team_spend(&self) -> &[TeamSpend] {
        &self.spend
    }

    /// The single highest bid in the auction.
    pub fn highest_bid(&self) -> f64 {
        self.highest_bid
    }

    /// Per-role bid maxima used as scoring denominators.
    pub fn role_maxima(&self) -> &RoleMaxima {
        &self.role_maxima
    }

    // ---- Filtered views ----

    /// Scored bids matching all three selections.
    pub fn filter_bids(
        &self,
        team: &Selection<Team>,
        set: &Selection<String>,
        role: &Selection<String>,
    ) -> Vec<&ScoredBid> {
        self.scored
            .iter()
            .filter(|b| team.matches(&b.team) && set.matches(&b.set) && role.matches(&b.role))
            .collect()
    }

    /// Leaderboard rows matching the role selection, order preserved.
    pub fn leaderboard_for(&self, role: &Selection<String>) -> Vec<&LeaderboardEntry> {
        self.leaderboard
            .iter()
            .filter(|e| role.matches(&e.role))
            .collect()
    }

    // ---- Category listings ----

    /// Distinct auction sets, in first-seen order.
    pub fn sets(&self) -> Vec<&str> {
        distinct(self.players.iter().map(|p| p.set.as_str()))
    }

    /// Distinct player roles, in first-seen order.
    pub fn roles(&self) -> Vec<&str> {
        distinct(self.players.iter().map(|p| p.role.as_str()))
    }

    // ---- Breakdowns ----

    /// Aggregate the scored bids per (franchise, role). Only pairs with at
    /// least one bid appear; order is franchise declaration order crossed
    /// with first-seen role order.
    pub fn team_role_breakdown(&self, metric: Metric) -> Vec<TeamRoleCell> {
        let mut sums: HashMap<(Team, &str), (f64, usize)> = HashMap::new();
        for bid in &self.scored {
            let entry = sums.entry((bid.team, bid.role.as_str())).or_insert((0.0, 0));
            entry.0 += bid.amount;
            entry.1 += 1;
        }

        let roles = self.roles();
        let mut cells = Vec::new();
        for &team in &Team::ALL {
            for &role in &roles {
                let Some(&(total, count)) = sums.get(&(team, role)) else {
                    continue;
                };
                let value = match metric {
                    Metric::TotalBid => total,
                    Metric::PlayerCount => count as f64,
                    Metric::MeanBid => total / count as f64,
                };
                cells.push(TeamRoleCell {
                    team,
                    role: role.to_string(),
                    value,
                });
            }
        }
        cells
    }

    /// Player × franchise bid pivot for the selected franchises.
    pub fn bid_matrix(&self, teams: &Selection<Team>) -> BidMatrix {
        let teams: Vec<Team> = Team::ALL
            .iter()
            .copied()
            .filter(|t| teams.matches(t))
            .collect();
        let rows = self
            .players
            .iter()
            .map(|p| BidMatrixRow {
                name: p.name.clone(),
                amounts: teams.iter().map(|&t| p.bid(t)).collect(),
            })
            .collect();
        BidMatrix { teams, rows }
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
