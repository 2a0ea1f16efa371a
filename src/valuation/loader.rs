// Auction CSV loading and cleanup.
//
// Reads the flat results table (one row per player, one bid column per
// franchise), drops blank-name and unsold rows, and coerces the
// display-format bid strings ("2,600") into numbers. A bid that still fails
// to parse after separator stripping fails the load; zeroing it silently
// would corrupt every downstream maximum and ratio.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::valuation::teams::{Team, UNSOLD};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One cleaned row of the wide results table: a sold player and every
/// franchise's bid on them.
#[derive(Debug, Clone)]
pub struct PlayerRecord {
    pub name: String,
    pub set: String,
    pub role: String,
    pub country: String,
    pub winner: Team,
    bids: HashMap<Team, f64>,
}

impl PlayerRecord {
    /// Build a record from explicit fields. `bids` holds only the franchises
    /// that actually bid; everyone else reads back as `None`.
    pub fn new(
        name: impl Into<String>,
        set: impl Into<String>,
        role: impl Into<String>,
        country: impl Into<String>,
        winner: Team,
        bids: HashMap<Team, f64>,
    ) -> Self {
        PlayerRecord {
            name: name.into(),
            set: set.into(),
            role: role.into(),
            country: country.into(),
            winner,
            bids,
        }
    }

    /// The given franchise's bid on this player, if it placed one.
    pub fn bid(&self, team: Team) -> Option<f64> {
        self.bids.get(&team).copied()
    }

    /// The winning franchise's bid, when one was recorded.
    pub fn winning_bid(&self) -> Option<f64> {
        self.bid(self.winner)
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing bid column for franchise `{team}`")]
    MissingTeamColumn { team: &'static str },

    #[error("row {row}: winner `{winner}` is not a configured franchise")]
    UnknownWinner { row: usize, winner: String },

    #[error("row {row} ({player}): bid `{value}` for {team} is not numeric")]
    MalformedBid {
        row: usize,
        player: String,
        team: &'static str,
        value: String,
    },

    #[error("validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Raw CSV serde struct (private)
// ---------------------------------------------------------------------------

/// Raw results row. The franchise bid columns (and any extra columns the
/// sheet carries) land in `extra` keyed by header; bid cleanup pulls them out
/// by franchise code.
#[derive(Debug, Deserialize)]
struct RawAuctionRow {
    #[serde(rename = "Full Name", default)]
    full_name: String,
    #[serde(rename = "Set", default)]
    set: String,
    #[serde(rename = "Role", default)]
    role: String,
    #[serde(rename = "Country", default)]
    country: String,
    #[serde(rename = "Winner", default)]
    winner: String,
    #[serde(flatten)]
    extra: HashMap<String, String>,
}

// ---------------------------------------------------------------------------
// Bid cleanup
// ---------------------------------------------------------------------------

/// Strip thousands separators and quoting artifacts, then parse. An empty
/// cell means the franchise never bid. `Err` carries the original string for
/// the error message.
fn clean_bid_amount(raw: &str) -> Result<Option<f64>, ()> {
    let stripped: String = raw.chars().filter(|c| *c != ',' && *c != '"').collect();
    let stripped = stripped.trim();
    if stripped.is_empty() {
        return Ok(None);
    }
    match stripped.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(()),
    }
}

// ---------------------------------------------------------------------------
// Reader-based loader (enables testing without temp files)
// ---------------------------------------------------------------------------

/// Load and clean the auction table from any reader.
pub fn load_from_reader<R: Read>(rdr: R) -> Result<Vec<PlayerRecord>, LoadError> {
    let mut reader = csv::Reader::from_reader(rdr);

    // Fail fast if the fixed franchise configuration is out of sync with the
    // file before touching any rows.
    let headers = reader.headers()?.clone();
    for &team in &Team::ALL {
        if !headers.iter().any(|h| h.trim() == team.code()) {
            return Err(LoadError::MissingTeamColumn { team: team.code() });
        }
    }

    let mut players = Vec::new();
    let mut skipped_blank = 0usize;
    let mut skipped_unsold = 0usize;

    for (idx, result) in reader.deserialize::<RawAuctionRow>().enumerate() {
        let row = idx + 1;
        let raw = result?;

        let name = raw.full_name.trim();
        if name.is_empty() {
            skipped_blank += 1;
            continue;
        }

        let winner_field = raw.winner.trim();
        if winner_field.is_empty() || winner_field == UNSOLD {
            debug!("skipping unsold player '{}'", name);
            skipped_unsold += 1;
            continue;
        }
        let winner = Team::from_code(winner_field).ok_or_else(|| LoadError::UnknownWinner {
            row,
            winner: winner_field.to_string(),
        })?;

        let mut bids = HashMap::new();
        for &team in &Team::ALL {
            let cell = raw.extra.get(team.code()).map(String::as_str).unwrap_or("");
            match clean_bid_amount(cell) {
                Ok(Some(amount)) => {
                    bids.insert(team, amount);
                }
                Ok(None) => {}
                Err(()) => {
                    return Err(LoadError::MalformedBid {
                        row,
                        player: name.to_string(),
                        team: team.code(),
                        value: cell.to_string(),
                    });
                }
            }
        }

        players.push(PlayerRecord {
            name: name.to_string(),
            set: raw.set.trim().to_string(),
            role: raw.role.trim().to_string(),
            country: raw.country.trim().to_string(),
            winner,
            bids,
        });
    }

    if players.is_empty() {
        return Err(LoadError::Validation(
            "auction CSV produced zero sold players".into(),
        ));
    }

    info!(
        "loaded {} sold players ({} blank rows, {} unsold skipped)",
        players.len(),
        skipped_blank,
        skipped_unsold
    );

    Ok(players)
}

// ---------------------------------------------------------------------------
// Public path-based loader
// ---------------------------------------------------------------------------

/// Load the auction results CSV from a file.
pub fn load_auction(path: &Path) -> Result<Vec<PlayerRecord>, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_from_reader(file)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Full Name,Set,Role,Country,Winner,MI CT,PR,JSK,PC,DSG,SEC";

    fn csv_with_rows(rows: &[&str]) -> String {
        let mut s = String::from(HEADER);
        for row in rows {
            s.push('\n');
            s.push_str(row);
        }
        s
    }

    // -- Bid cleanup --

    #[test]
    fn bid_cleanup_strips_separators_and_quotes() {
        assert_eq!(clean_bid_amount("2,600"), Ok(Some(2600.0)));
        assert_eq!(clean_bid_amount("\"9,200\""), Ok(Some(9200.0)));
        assert_eq!(clean_bid_amount(" 175 "), Ok(Some(175.0)));
        assert_eq!(clean_bid_amount("850.5"), Ok(Some(850.5)));
    }

    #[test]
    fn bid_cleanup_empty_means_no_bid() {
        assert_eq!(clean_bid_amount(""), Ok(None));
        assert_eq!(clean_bid_amount("   "), Ok(None));
        assert_eq!(clean_bid_amount("\"\""), Ok(None));
    }

    #[test]
    fn bid_cleanup_rejects_garbage() {
        assert!(clean_bid_amount("n/a").is_err());
        assert!(clean_bid_amount("2,6oo").is_err());
        assert!(clean_bid_amount("inf").is_err());
        assert!(clean_bid_amount("NaN").is_err());
    }

    // -- Row cleaning --

    #[test]
    fn loads_sold_players() {
        let data = csv_with_rows(&[
            "Aiden Markram,Set 1,Batsman,South Africa,SEC,,,,,,\"2,600\"",
            "Rashid Khan,Set 2,Bowler,Afghanistan,MI CT,\"1,800\",,,,,",
        ]);
        let players = load_from_reader(data.as_bytes()).unwrap();
        assert_eq!(players.len(), 2);

        assert_eq!(players[0].name, "Aiden Markram");
        assert_eq!(players[0].set, "Set 1");
        assert_eq!(players[0].role, "Batsman");
        assert_eq!(players[0].country, "South Africa");
        assert_eq!(players[0].winner, Team::SunrisersEasternCape);
        assert_eq!(players[0].bid(Team::SunrisersEasternCape), Some(2600.0));
        assert_eq!(players[0].bid(Team::MiCapeTown), None);
        assert_eq!(players[0].winning_bid(), Some(2600.0));

        assert_eq!(players[1].winner, Team::MiCapeTown);
        assert_eq!(players[1].winning_bid(), Some(1800.0));
    }

    #[test]
    fn blank_name_rows_dropped() {
        let data = csv_with_rows(&[
            ",,,,,,,,,,",
            "Aiden Markram,Set 1,Batsman,South Africa,SEC,,,,,,\"2,600\"",
            "   ,Set 1,Batsman,South Africa,SEC,,,,,,100",
        ]);
        let players = load_from_reader(data.as_bytes()).unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].name, "Aiden Markram");
    }

    #[test]
    fn unsold_rows_dropped() {
        let data = csv_with_rows(&[
            "Unsold Guy,Set 3,Bowler,England,Unsold,,,,,,",
            "Aiden Markram,Set 1,Batsman,South Africa,SEC,,,,,,\"2,600\"",
        ]);
        let players = load_from_reader(data.as_bytes()).unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].name, "Aiden Markram");
    }

    #[test]
    fn empty_winner_treated_as_not_sold() {
        let data = csv_with_rows(&[
            "No Winner,Set 3,Bowler,England,,,,,,,",
            "Aiden Markram,Set 1,Batsman,South Africa,SEC,,,,,,\"2,600\"",
        ]);
        let players = load_from_reader(data.as_bytes()).unwrap();
        assert_eq!(players.len(), 1);
    }

    #[test]
    fn unknown_winner_fails_fast() {
        let data = csv_with_rows(&[
            "Mystery Player,Set 1,Batsman,India,CSK,,,,,,\"2,600\"",
        ]);
        let err = load_from_reader(data.as_bytes()).unwrap_err();
        match err {
            LoadError::UnknownWinner { row, winner } => {
                assert_eq!(row, 1);
                assert_eq!(winner, "CSK");
            }
            other => panic!("expected UnknownWinner, got: {other}"),
        }
    }

    #[test]
    fn malformed_bid_fails_not_zeroes() {
        let data = csv_with_rows(&[
            "Aiden Markram,Set 1,Batsman,South Africa,SEC,,,,,,\"2,600\"",
            "Bad Row,Set 1,Batsman,South Africa,PR,,n/a,,,,",
        ]);
        let err = load_from_reader(data.as_bytes()).unwrap_err();
        match err {
            LoadError::MalformedBid {
                row,
                player,
                team,
                value,
            } => {
                assert_eq!(row, 2);
                assert_eq!(player, "Bad Row");
                assert_eq!(team, "PR");
                assert_eq!(value, "n/a");
            }
            other => panic!("expected MalformedBid, got: {other}"),
        }
    }

    #[test]
    fn missing_team_column_fails_fast() {
        // No SEC column at all.
        let data = "Full Name,Set,Role,Country,Winner,MI CT,PR,JSK,PC,DSG\n\
                    Aiden Markram,Set 1,Batsman,South Africa,MI CT,\"2,600\",,,,";
        let err = load_from_reader(data.as_bytes()).unwrap_err();
        match err {
            LoadError::MissingTeamColumn { team } => assert_eq!(team, "SEC"),
            other => panic!("expected MissingTeamColumn, got: {other}"),
        }
    }

    #[test]
    fn extra_columns_ignored() {
        let data = "Full Name,Set,Role,Country,Winner,MI CT,PR,JSK,PC,DSG,SEC,Notes\n\
                    Aiden Markram,Set 1,Batsman,South Africa,SEC,,,,,,\"2,600\",captaincy option";
        let players = load_from_reader(data.as_bytes()).unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].bid(Team::SunrisersEasternCape), Some(2600.0));
    }

    #[test]
    fn names_and_fields_trimmed() {
        let data = csv_with_rows(&[
            "  Aiden Markram  , Set 1 , Batsman , South Africa , SEC ,,,,,,\"2,600\"",
        ]);
        let players = load_from_reader(data.as_bytes()).unwrap();
        assert_eq!(players[0].name, "Aiden Markram");
        assert_eq!(players[0].set, "Set 1");
        assert_eq!(players[0].role, "Batsman");
        assert_eq!(players[0].country, "South Africa");
        assert_eq!(players[0].winner, Team::SunrisersEasternCape);
    }

    #[test]
    fn zero_sold_players_is_a_validation_error() {
        let data = csv_with_rows(&["Unsold Guy,Set 3,Bowler,England,Unsold,,,,,,"]);
        let err = load_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Validation(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_auction(Path::new("/nonexistent/auction.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
