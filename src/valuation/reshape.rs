// Wide-to-long reshaping.
//
// Melts the per-player results table into one row per (player, franchise)
// pair, carrying the player's identity and category fields alongside that
// franchise's bid.

use crate::valuation::loader::PlayerRecord;
use crate::valuation::teams::Team;

/// One (player, franchise) pair from the melted table.
#[derive(Debug, Clone)]
pub struct BidRecord {
    pub name: String,
    pub set: String,
    pub role: String,
    pub country: String,
    pub winner: Team,
    pub team: Team,
    pub amount: Option<f64>,
}

impl BidRecord {
    /// True when this is the bid the player was actually sold on.
    pub fn is_winning(&self) -> bool {
        self.team == self.winner
    }
}

/// Melt the wide table: every player crossed with every franchise.
///
/// Output order is players in input order, franchises in declaration order.
/// Downstream stable sorts rely on this as the tie order, so it must not
/// change between runs. Row count is always #players × #franchises.
pub fn melt(players: &[PlayerRecord]) -> Vec<BidRecord> {
    let mut records = Vec::with_capacity(players.len() * Team::ALL.len());
    for player in players {
        for &team in &Team::ALL {
            records.push(BidRecord {
                name: player.name.clone(),
                set: player.set.clone(),
                role: player.role.clone(),
                country: player.country.clone(),
                winner: player.winner,
                team,
                amount: player.bid(team),
            });
        }
    }
    records
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn player(name: &str, role: &str, winner: Team, bids: &[(Team, f64)]) -> PlayerRecord {
        let bids: HashMap<Team, f64> = bids.iter().copied().collect();
        PlayerRecord::new(name, "Set 1", role, "South Africa", winner, bids)
    }

    #[test]
    fn row_count_is_players_times_teams() {
        let players = vec![
            player("P1", "Batsman", Team::MiCapeTown, &[(Team::MiCapeTown, 500.0)]),
            player("P2", "Bowler", Team::PaarlRoyals, &[(Team::PaarlRoyals, 200.0)]),
            player("P3", "All-Rounder", Team::PretoriaCapitals, &[]),
        ];
        let bids = melt(&players);
        assert_eq!(bids.len(), players.len() * Team::ALL.len());
    }

    #[test]
    fn exactly_one_winning_record_per_player() {
        let players = vec![
            player("P1", "Batsman", Team::MiCapeTown, &[(Team::MiCapeTown, 500.0)]),
            player("P2", "Bowler", Team::PaarlRoyals, &[(Team::PaarlRoyals, 200.0)]),
        ];
        let bids = melt(&players);
        for p in &players {
            let winning: Vec<_> = bids
                .iter()
                .filter(|b| b.name == p.name && b.is_winning())
                .collect();
            assert_eq!(winning.len(), 1, "player {} should have one winning record", p.name);
            assert_eq!(winning[0].team, p.winner);
        }
    }

    #[test]
    fn amounts_line_up_with_wide_table() {
        let players = vec![player(
            "P1",
            "Batsman",
            Team::MiCapeTown,
            &[(Team::MiCapeTown, 500.0), (Team::SunrisersEasternCape, 450.0)],
        )];
        let bids = melt(&players);

        let by_team = |team: Team| bids.iter().find(|b| b.team == team).unwrap();
        assert_eq!(by_team(Team::MiCapeTown).amount, Some(500.0));
        assert_eq!(by_team(Team::SunrisersEasternCape).amount, Some(450.0));
        assert_eq!(by_team(Team::PaarlRoyals).amount, None);
    }

    #[test]
    fn category_fields_copied_to_every_record() {
        let players = vec![player("P1", "Wicket Keeper", Team::DurbanSuperGiants, &[])];
        let bids = melt(&players);
        assert!(bids
            .iter()
            .all(|b| b.role == "Wicket Keeper" && b.country == "South Africa" && b.set == "Set 1"));
    }

    #[test]
    fn franchise_order_follows_declaration_order() {
        let players = vec![
            player("P1", "Batsman", Team::MiCapeTown, &[]),
            player("P2", "Bowler", Team::PaarlRoyals, &[]),
        ];
        let bids = melt(&players);
        for (i, bid) in bids.iter().enumerate() {
            assert_eq!(bid.team, Team::ALL[i % Team::ALL.len()]);
        }
        assert!(bids[..Team::ALL.len()].iter().all(|b| b.name == "P1"));
        assert!(bids[Team::ALL.len()..].iter().all(|b| b.name == "P2"));
    }

    #[test]
    fn empty_input_melts_to_empty() {
        assert!(melt(&[]).is_empty());
    }
}
