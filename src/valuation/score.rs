// Composite bid scoring.
//
// Each bid is normalized against three denominators: the bidding franchise's
// purse, the highest bid anywhere in the auction, and the highest bid for the
// player's role. The composite blends the three percentages with fixed model
// weights. Percentages are not clamped; a purse-relative score above 100
// would mean a single bid exceeded the whole purse, which the data never
// contains but the math tolerates.

use std::collections::HashMap;

use crate::valuation::loader::PlayerRecord;
use crate::valuation::reshape::BidRecord;
use crate::valuation::teams::{Team, TeamBudgets};

// ---------------------------------------------------------------------------
// Model weights
// ---------------------------------------------------------------------------

/// Weight on the purse-relative component.
pub const BID_STRENGTH_WEIGHT: f64 = 0.3;
/// Weight on the auction-wide component.
pub const RELATIVE_VALUE_WEIGHT: f64 = 0.4;
/// Weight on the role-relative component.
pub const ROLE_PRIORITY_WEIGHT: f64 = 0.3;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("no qualifying bids in the dataset; scores are undefined")]
    NoQualifyingBids,

    #[error("role `{role}` has a bid but no positive maximum; scores are undefined")]
    DegenerateRole { role: String },
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// A (player, franchise) bid annotated with its normalized scores.
///
/// Only records with an actual bid amount are scored; a franchise that never
/// bid on a player contributes nothing here.
#[derive(Debug, Clone)]
pub struct ScoredBid {
    pub name: String,
    pub set: String,
    pub role: String,
    pub country: String,
    pub winner: Team,
    pub team: Team,
    pub amount: f64,
    /// Bid as a percentage of the bidding franchise's purse.
    pub bid_strength: f64,
    /// Bid as a percentage of the highest bid in the whole auction.
    pub relative_value: f64,
    /// Bid as a percentage of the highest bid for this player's role.
    /// Always ≤ 100 by construction.
    pub role_priority: f64,
    /// Fixed-weight blend of the three sub-scores.
    pub composite: f64,
}

impl ScoredBid {
    /// True when this is the bid the player was actually sold on.
    pub fn is_winning(&self) -> bool {
        self.team == self.winner
    }
}

/// Highest bid recorded for each role, built once before scoring and passed
/// in as an explicit input rather than looked up ad hoc.
#[derive(Debug, Clone)]
pub struct RoleMaxima {
    maxima: HashMap<String, f64>,
}

impl RoleMaxima {
    /// Scan the long table for each role's highest bid (nulls ignored).
    pub fn from_bids(bids: &[BidRecord]) -> Self {
        let mut maxima: HashMap<String, f64> = HashMap::new();
        for bid in bids {
            if let Some(amount) = bid.amount {
                let entry = maxima.entry(bid.role.clone()).or_insert(amount);
                if amount > *entry {
                    *entry = amount;
                }
            }
        }
        RoleMaxima { maxima }
    }

    /// The highest bid for a role, if any franchise bid on that role at all.
    pub fn max_for(&self, role: &str) -> Option<f64> {
        self.maxima.get(role).copied()
    }
}

// ---------------------------------------------------------------------------
// Denominator computation
// ---------------------------------------------------------------------------

/// Highest bid across every franchise and player in the cleaned wide table.
/// Returns `None` when nobody bid on anybody.
pub fn highest_auction_bid(players: &[PlayerRecord]) -> Option<f64> {
    let mut highest: Option<f64> = None;
    for player in players {
        for &team in &Team::ALL {
            if let Some(amount) = player.bid(team) {
                if highest.map_or(true, |h| amount > h) {
                    highest = Some(amount);
                }
            }
        }
    }
    highest
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Score every record that carries a bid amount; records without one drop
/// out here.
///
/// A zero or missing denominator is a hard failure: substituting zero or
/// infinity would silently mislead the leaderboard.
pub fn score_bids(
    bids: &[BidRecord],
    budgets: &TeamBudgets,
    role_maxima: &RoleMaxima,
    highest_bid: f64,
) -> Result<Vec<ScoredBid>, ScoreError> {
    if highest_bid <= 0.0 {
        return Err(ScoreError::NoQualifyingBids);
    }

    let mut scored = Vec::new();
    for bid in bids {
        let Some(amount) = bid.amount else {
            continue;
        };

        let role_max = role_maxima
            .max_for(&bid.role)
            .filter(|m| *m > 0.0)
            .ok_or_else(|| ScoreError::DegenerateRole {
                role: bid.role.clone(),
            })?;

        let bid_strength = amount / budgets.purse(bid.team) * 100.0;
        let relative_value = amount / highest_bid * 100.0;
        let role_priority = amount / role_max * 100.0;
        let composite = BID_STRENGTH_WEIGHT * bid_strength
            + RELATIVE_VALUE_WEIGHT * relative_value
            + ROLE_PRIORITY_WEIGHT * role_priority;

        scored.push(ScoredBid {
            name: bid.name.clone(),
            set: bid.set.clone(),
            role: bid.role.clone(),
            country: bid.country.clone(),
            winner: bid.winner,
            team: bid.team,
            amount,
            bid_strength,
            relative_value,
            role_priority,
            composite,
        });
    }

    Ok(scored)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
