// Franchise identifiers and purse ceilings.
//
// The six franchises and their auction purses are a fixed property of the
// tournament, not something re-derived from the results file. Header
// validation in the loader and every scoring denominator key off this table.

use std::collections::HashMap;
use std::fmt;

/// Winner-field sentinel marking a player nobody bought.
pub const UNSOLD: &str = "Unsold";

// ---------------------------------------------------------------------------
// Team
// ---------------------------------------------------------------------------

/// One of the six fixed franchises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    MiCapeTown,
    PaarlRoyals,
    JoburgSuperKings,
    PretoriaCapitals,
    DurbanSuperGiants,
    SunrisersEasternCape,
}

impl Team {
    /// Every franchise, in declaration order. Reshaping iterates this slice,
    /// which fixes the long-table row order downstream sorts rely on.
    pub const ALL: [Team; 6] = [
        Team::MiCapeTown,
        Team::PaarlRoyals,
        Team::JoburgSuperKings,
        Team::PretoriaCapitals,
        Team::DurbanSuperGiants,
        Team::SunrisersEasternCape,
    ];

    /// The short code used as a bid column header and winner value in the
    /// auction CSV.
    pub fn code(&self) -> &'static str {
        match self {
            Team::MiCapeTown => "MI CT",
            Team::PaarlRoyals => "PR",
            Team::JoburgSuperKings => "JSK",
            Team::PretoriaCapitals => "PC",
            Team::DurbanSuperGiants => "DSG",
            Team::SunrisersEasternCape => "SEC",
        }
    }

    /// Full franchise name, for report output.
    pub fn full_name(&self) -> &'static str {
        match self {
            Team::MiCapeTown => "MI Cape Town",
            Team::PaarlRoyals => "Paarl Royals",
            Team::JoburgSuperKings => "Joburg Super Kings",
            Team::PretoriaCapitals => "Pretoria Capitals",
            Team::DurbanSuperGiants => "Durban's Super Giants",
            Team::SunrisersEasternCape => "Sunrisers Eastern Cape",
        }
    }

    /// Parse a CSV code into a franchise. Returns `None` for anything that is
    /// not a franchise code, including the unsold sentinel, which callers
    /// handle separately.
    pub fn from_code(code: &str) -> Option<Team> {
        let code = code.trim();
        Team::ALL.iter().copied().find(|t| t.code() == code)
    }

    /// Fixed auction purse ceiling for this franchise, in thousands of rand.
    pub fn purse(&self) -> f64 {
        match self {
            Team::MiCapeTown => 17_000.0,
            Team::PaarlRoyals => 20_740.0,
            Team::JoburgSuperKings => 20_740.0,
            Team::PretoriaCapitals => 28_050.0,
            Team::DurbanSuperGiants => 17_000.0,
            Team::SunrisersEasternCape => 28_050.0,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() rather than write_str() so report column widths apply.
        f.pad(self.code())
    }
}

// ---------------------------------------------------------------------------
// TeamBudgets
// ---------------------------------------------------------------------------

/// Immutable franchise → purse mapping handed to the score and aggregation
/// steps as an explicit input, so scoring never reaches back into constants.
#[derive(Debug, Clone)]
pub struct TeamBudgets {
    purses: HashMap<Team, f64>,
}

impl TeamBudgets {
    /// Build a mapping from an explicit purse table. Franchises absent from
    /// `purses` fall back to their fixed ceiling.
    pub fn new(purses: HashMap<Team, f64>) -> Self {
        let purses = Team::ALL
            .iter()
            .map(|&t| (t, purses.get(&t).copied().unwrap_or_else(|| t.purse())))
            .collect();
        TeamBudgets { purses }
    }

    /// The fixed tournament purse table.
    pub fn fixed() -> Self {
        TeamBudgets {
            purses: Team::ALL.iter().map(|&t| (t, t.purse())).collect(),
        }
    }

    pub fn purse(&self, team: Team) -> f64 {
        self.purses[&team]
    }
}

impl Default for TeamBudgets {
    fn default() -> Self {
        Self::fixed()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
