//! Games command implementation.

use anyhow::Result;
use chrono::NaiveDate;
use mentaculous_core::{teams, Game};
use mentaculous_ops::{GamesRequest, OpsContext};

use super::print_json;

/// List the games scheduled on `date` (today when absent).
pub async fn execute(ctx: &OpsContext, date: Option<NaiveDate>, json: bool) -> Result<()> {
    let response = ctx.games(GamesRequest { date }).await?;
    if json {
        return print_json(&response);
    }

    println!("⚾ Games on {}", response.date);
    println!("{:─<60}", "");
    if response.games.is_empty() {
        println!("No games scheduled.");
        return Ok(());
    }
    for game in &response.games {
        println!("{}", game_line(game));
    }
    println!();
    println!("Open one with: mtc box <gamePk>");
    Ok(())
}

fn game_line(game: &Game) -> String {
    let away = &game.teams.away;
    let home = &game.teams.home;
    let score = match (away.score, home.score) {
        (Some(a), Some(h)) => format!("{a:>2}-{h:<2}"),
        _ => "  -  ".to_string(),
    };
    format!(
        "{:>8}  {:<3} @ {:<3}  {}  {}",
        game.game_pk,
        teams::abbreviation(&away.team.name),
        teams::abbreviation(&home.team.name),
        score,
        game.status.detailed_state,
    )
}
