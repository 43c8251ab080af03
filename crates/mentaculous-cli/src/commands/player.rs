//! Player command implementation.

use anyhow::Result;
use mentaculous_core::{teams, PlayerId};
use mentaculous_ops::{OpsContext, PlayerRequest};

use super::print_json;

/// Print a player's bio, career line and year-by-year hitting.
pub async fn execute(ctx: &OpsContext, player_id: PlayerId, json: bool) -> Result<()> {
    let profile = ctx.player(PlayerRequest::new(player_id)).await?;
    if json {
        return print_json(&profile);
    }

    let bio = &profile.bio;
    println!("👤 {} ({})", bio.full_name, bio.id);
    println!("{:─<60}", "");
    let field = |label: &str, value: Option<String>| {
        if let Some(value) = value {
            println!("{:<10} {}", label, value);
        }
    };
    field(
        "Position:",
        bio.primary_position.as_ref().map(|p| p.name.clone()),
    );
    field("Team:", bio.current_team.as_ref().map(|t| t.name.clone()));
    field(
        "Born:",
        born(
            bio.birth_date.as_deref(),
            bio.birth_city.as_deref(),
            bio.birth_country.as_deref(),
        ),
    );
    field("Debut:", bio.mlb_debut_date.clone());
    field(
        "Size:",
        match (&bio.height, bio.weight) {
            (Some(h), Some(w)) => Some(format!("{h}, {w} lb")),
            (Some(h), None) => Some(h.clone()),
            (None, Some(w)) => Some(format!("{w} lb")),
            (None, None) => None,
        },
    );

    println!();
    println!(
        "{:<8} {:<4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>5} {:>5} {:>5}",
        "Season", "Team", "G", "AB", "H", "HR", "RBI", "AVG", "OBP", "OPS"
    );
    for row in &profile.seasons {
        let team = row
            .team
            .as_ref()
            .map(|t| teams::abbreviation(&t.name))
            .unwrap_or("");
        let s = &row.stat;
        println!(
            "{:<8} {:<4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>5} {:>5} {:>5}",
            row.season,
            team,
            s.games_played,
            s.at_bats,
            s.hits,
            s.home_runs,
            s.rbi,
            s.avg.as_deref().unwrap_or("-"),
            s.obp.as_deref().unwrap_or("-"),
            s.ops.as_deref().unwrap_or("-"),
        );
    }
    if let Some(s) = &profile.career {
        println!(
            "{:<8} {:<4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>5} {:>5} {:>5}",
            "Career",
            "",
            s.games_played,
            s.at_bats,
            s.hits,
            s.home_runs,
            s.rbi,
            s.avg.as_deref().unwrap_or("-"),
            s.obp.as_deref().unwrap_or("-"),
            s.ops.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}

fn born(date: Option<&str>, city: Option<&str>, country: Option<&str>) -> Option<String> {
    let place: Vec<&str> = [city, country].into_iter().flatten().collect();
    match (date, place.is_empty()) {
        (None, true) => None,
        (Some(date), true) => Some(date.to_string()),
        (None, false) => Some(place.join(", ")),
        (Some(date), false) => Some(format!("{} in {}", date, place.join(", "))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_born() {
        assert_eq!(born(None, None, None), None);
        assert_eq!(
            born(Some("1992-04-26"), Some("Sacramento"), Some("USA")).as_deref(),
            Some("1992-04-26 in Sacramento, USA")
        );
        assert_eq!(born(None, None, Some("DR")).as_deref(), Some("DR"));
    }
}
