//! Box score command implementation.
//!
//! Prints the batting and pitching tables of an enriched box score followed
//! by the HR/2B/TB/RBI notes, marking homers already in the ledger.

use anyhow::{bail, Result};
use chrono::NaiveDate;
use mentaculous_core::{teams, EnrichedTeam, NamedCount, Side};
use mentaculous_ops::{BoxScoreRequest, BoxScoreResponse, OpsContext};

use super::print_json;

/// Parse `away`, `home` or `both`.
pub fn parse_sides(team: &str) -> Result<Vec<Side>> {
    if team.eq_ignore_ascii_case("both") {
        return Ok(vec![Side::Away, Side::Home]);
    }
    match team.parse::<Side>() {
        Ok(side) => Ok(vec![side]),
        Err(_) => bail!("Unknown team: {}. Use away, home or both", team),
    }
}

/// Fetch, enrich and print a box score.
pub async fn execute(
    ctx: &OpsContext,
    game_pk: u64,
    date: Option<NaiveDate>,
    sides: &[Side],
    json: bool,
) -> Result<()> {
    let mut request = BoxScoreRequest::new(game_pk);
    request.date = date;
    let response = ctx.box_score(request).await?;
    if json {
        return print_json(&response);
    }

    let box_score = &response.box_score;
    println!(
        "⚾ {} @ {}  ({}, game {})",
        box_score.away.team.name, box_score.home.team.name, box_score.date, game_pk
    );
    for side in sides {
        println!();
        print_team(&response, box_score.team(*side));
    }
    Ok(())
}

fn print_team(response: &BoxScoreResponse, team: &EnrichedTeam) {
    println!("{} ({})", team.team.name, teams::abbreviation(&team.team.name));
    println!("{:─<78}", "");

    println!(
        "{:<22} {:>3} {:>2} {:>2} {:>2} {:>2} {:>3} {:>2} {:>2} {:>5} {:>5}  {}",
        "Batters", "Pos", "AB", "R", "H", "HR", "RBI", "BB", "SO", "AVG", "OPS", "Line"
    );
    for batter in team.batters() {
        let stats = batter.batting();
        println!(
            "{:<22} {:>3} {:>2} {:>2} {:>2} {:>2} {:>3} {:>2} {:>2} {:>5} {:>5}  {}",
            truncate(&batter.player.person.full_name, 22),
            batter.player.position.abbreviation,
            stats.at_bats,
            stats.runs,
            stats.hits,
            stats.home_runs,
            stats.rbi,
            stats.base_on_balls,
            stats.strike_outs,
            batter.season_rates.avg,
            batter.season_rates.ops,
            batter.batting_line.as_deref().unwrap_or(""),
        );
    }

    println!();
    println!(
        "{:<22} {:>5} {:>2} {:>2} {:>2} {:>2} {:>2} {:>2} {:>6}",
        "Pitchers", "IP", "H", "R", "ER", "BB", "SO", "HR", "ERA"
    );
    for pitcher in team.pitchers() {
        let stats = &pitcher.player.stats.pitching;
        println!(
            "{:<22} {:>5} {:>2} {:>2} {:>2} {:>2} {:>2} {:>2} {:>6}",
            truncate(&pitcher.player.person.full_name, 22),
            stats.innings_pitched.as_deref().unwrap_or("0.0"),
            stats.hits,
            stats.runs,
            stats.earned_runs,
            stats.base_on_balls,
            stats.strike_outs,
            stats.home_runs,
            pitcher
                .player
                .season_stats
                .pitching
                .era
                .as_deref()
                .unwrap_or("-"),
        );
    }

    let notes = team.supplemental();
    println!();
    if !notes.homers.is_empty() {
        let homers: Vec<String> = notes
            .homers
            .iter()
            .map(|h| {
                let game = if h.count > 1 {
                    format!(" {}", h.count)
                } else {
                    String::new()
                };
                let career = h
                    .career_total
                    .map(|c| format!(", {c} career"))
                    .unwrap_or_default();
                format!("{}{} ({}{})", h.name, game, h.season_total, career)
            })
            .collect();
        println!("HR: {}", homers.join("; "));
    }
    print_counts("2B", &notes.doubles);
    print_counts("TB", &notes.total_bases);
    print_counts("RBI", &notes.rbi);
    if !notes.two_out_rbi.is_empty() {
        println!("2-out RBI: {}", notes.two_out_rbi.join(", "));
    }
    if !notes.risp_left.is_empty() {
        println!("Runners left in scoring position, 2 out: {}", notes.risp_left.join(", "));
    }
    println!("Team RISP: {}", notes.team_risp);
    println!("Team LOB: {}", notes.team_lob);

    let events: Vec<_> = team
        .batters()
        .into_iter()
        .flat_map(|p| p.home_run_progress.iter().map(move |e| (p, e)))
        .collect();
    if !events.is_empty() {
        println!();
        println!("Home runs:");
        for (player, event) in events {
            let marker = if response.is_logged(&event.hr_id) {
                "✓ logged"
            } else {
                "  "
            };
            println!(
                "  {} #{} (career {})  {}  {}",
                player.player.person.full_name,
                event.season_hr_number,
                event.career_label(),
                event.hr_id,
                marker
            );
        }
        println!("Log one with: mtc log add <gamePk> <playerId> [--hr N]");
    }
}

fn print_counts(label: &str, counts: &[NamedCount]) {
    if counts.is_empty() {
        return;
    }
    let parts: Vec<String> = counts
        .iter()
        .map(|c| {
            if c.count > 1 {
                format!("{} {}", c.name, c.count)
            } else {
                c.name.clone()
            }
        })
        .collect();
    println!("{}: {}", label, parts.join(", "));
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sides() {
        assert_eq!(parse_sides("both").unwrap(), vec![Side::Away, Side::Home]);
        assert_eq!(parse_sides("HOME").unwrap(), vec![Side::Home]);
        assert!(parse_sides("left").is_err());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Judge", 22), "Judge");
        assert_eq!(truncate("Vladimir Guerrero Jr.", 10), "Vladimir …");
    }
}
