// Plain-text report rendering.
//
// The terminal report is a thin consumer of the published snapshot; nothing
// here feeds back into the pipeline.

use std::io::Write;

use crate::valuation::snapshot::{AuctionSnapshot, Selection};

/// Write the leaderboard and purse summary to `out`.
///
/// `top_n` limits the number of leaderboard rows (0 = all); `role` narrows
/// the leaderboard the same way the interactive role filter would.
pub fn render(
    snapshot: &AuctionSnapshot,
    role: &Selection<String>,
    top_n: usize,
    out: &mut impl Write,
) -> std::io::Result<()> {
    let entries = snapshot.leaderboard_for(role);
    let shown = if top_n == 0 {
        entries.len()
    } else {
        top_n.min(entries.len())
    };

    writeln!(out, "Player composite-score leaderboard")?;
    writeln!(
        out,
        "{:<4} {:<24} {:<6} {:<14} {:<14} {:>10} {:>10}",
        "#", "Player", "Team", "Role", "Country", "Bid", "Composite"
    )?;
    for (rank, entry) in entries.iter().take(shown).enumerate() {
        writeln!(
            out,
            "{:<4} {:<24} {:<6} {:<14} {:<14} {:>10.0} {:>10.2}",
            rank + 1,
            entry.name,
            entry.team,
            entry.role,
            entry.country,
            entry.amount,
            entry.composite
        )?;
    }
    if shown < entries.len() {
        writeln!(out, "... {} more rows", entries.len() - shown)?;
    }

    writeln!(out)?;
    writeln!(out, "Purse utilization")?;
    writeln!(
        out,
        "{:<24} {:>10} {:>10} {:>10}",
        "Team", "Spent", "Remaining", "Purse"
    )?;
    for spend in snapshot.team_spend() {
        writeln!(
            out,
            "{:<24} {:>10.0} {:>10.0} {:>10.0}",
            spend.team.full_name(),
            spend.spent,
            spend.remaining,
            spend.spent + spend.remaining
        )?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::valuation;
    use crate::valuation::loader::PlayerRecord;
    use crate::valuation::teams::Team;
    use std::collections::HashMap;

    fn sample_snapshot() -> AuctionSnapshot {
        let bid = |team: Team, amount: f64| -> HashMap<Team, f64> {
            let mut m = HashMap::new();
            m.insert(team, amount);
            m
        };
        let players = vec![
            PlayerRecord::new(
                "Heinrich Klaasen",
                "Set 1",
                "Wicket Keeper",
                "South Africa",
                Team::DurbanSuperGiants,
                bid(Team::DurbanSuperGiants, 4100.0),
            ),
            PlayerRecord::new(
                "Kagiso Rabada",
                "Set 1",
                "Bowler",
                "South Africa",
                Team::MiCapeTown,
                bid(Team::MiCapeTown, 6100.0),
            ),
        ];
        valuation::run(players).unwrap()
    }

    fn render_to_string(role: &Selection<String>, top_n: usize) -> String {
        let snapshot = sample_snapshot();
        let mut buf = Vec::new();
        render(&snapshot, role, top_n, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn report_lists_players_and_teams() {
        let text = render_to_string(&Selection::All, 0);
        assert!(text.contains("Heinrich Klaasen"));
        assert!(text.contains("Kagiso Rabada"));
        assert!(text.contains("MI Cape Town"));
        assert!(text.contains("Durban's Super Giants"));
    }

    #[test]
    fn role_filter_narrows_leaderboard() {
        let text = render_to_string(&Selection::One("Bowler".to_string()), 0);
        assert!(text.contains("Kagiso Rabada"));
        assert!(!text.contains("Heinrich Klaasen"));
    }

    #[test]
    fn top_n_truncates_and_reports_remainder() {
        let text = render_to_string(&Selection::All, 1);
        assert!(text.contains("... 1 more rows"));
    }

    #[test]
    fn every_franchise_in_purse_section() {
        let text = render_to_string(&Selection::All, 0);
        for &team in &Team::ALL {
            assert!(text.contains(team.full_name()), "missing {}", team.full_name());
        }
    }
}
