//! Ledger command implementations.
//!
//! `mtc log show|add|remove|move|entry`.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use chrono::NaiveDate;
use mentaculous_core::{teams, Direction, HomeRunEvent, LedgerEntry, Mutation, PlayerId};
use mentaculous_ops::{
    AddHomeRunRequest, LedgerPageRequest, MoveEntryRequest, OpsContext, RemoveHomeRunRequest,
};

use super::print_json;

/// Show one page of the ledger. `page` starts at 1.
pub async fn show(ctx: &OpsContext, page: usize, json: bool) -> Result<()> {
    let response = ctx
        .ledger_page(LedgerPageRequest::page(page.saturating_sub(1)))
        .await?;
    if json {
        return print_json(&response);
    }

    println!("📒 Mentaculous");
    println!("{:─<72}", "");
    if response.entries.is_empty() {
        println!("No home runs logged yet.");
        println!("Log one with: mtc log add <gamePk> <playerId>");
        return Ok(());
    }
    for entry in &response.entries {
        println!("{}", entry_line(entry));
    }
    println!();
    println!(
        "Page {} of {}  ({} players)",
        response.index + 1,
        response.total_pages,
        response.total_players
    );
    Ok(())
}

/// Log a player's home runs from a game.
pub async fn add(
    ctx: &OpsContext,
    game_pk: u64,
    player_id: PlayerId,
    season_hr_number: Option<u32>,
    date: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    let mut request = AddHomeRunRequest::new(game_pk, player_id);
    request.season_hr_number = season_hr_number;
    request.date = date;
    let response = ctx.add_home_runs(request).await?;
    if json {
        return print_json(&response);
    }

    for event in &response.added {
        println!("✅ Logged {} {}", response.player_name, event_line(event));
    }
    for event in &response.already_logged {
        println!(
            "ℹ️  Already logged {} {}",
            response.player_name,
            event_line(event)
        );
    }
    if let Some(entry) = &response.entry {
        println!("{} now has {} logged", entry.player_name, entry.season_total());
    }
    Ok(())
}

/// Delete a logged home run, asking first unless `yes`.
pub async fn remove(
    ctx: &OpsContext,
    player_id: PlayerId,
    hr_id: &str,
    yes: bool,
    json: bool,
) -> Result<()> {
    let entry = ctx.ledger_entry(player_id).await?;
    let Some(event) = entry.home_runs.iter().find(|e| e.hr_id == hr_id) else {
        println!("{} has no logged home run {}", entry.player_name, hr_id);
        return Ok(());
    };

    if !yes {
        let question = format!("Delete {} {}?", entry.player_name, event_line(event));
        if !confirm(&question)? {
            println!("Cancelled");
            return Ok(());
        }
    }

    let response = ctx
        .remove_home_run(RemoveHomeRunRequest::new(player_id, hr_id))
        .await?;
    if json {
        return print_json(&response);
    }

    match response.mutation {
        Mutation::Removed {
            entry_removed: true,
        } => println!("🗑️  Removed {} and their entry", hr_id),
        Mutation::Removed { .. } => println!("🗑️  Removed {}", hr_id),
        _ => println!("Nothing to remove"),
    }
    Ok(())
}

/// Move a player one slot up or down.
pub async fn move_entry(
    ctx: &OpsContext,
    player_id: PlayerId,
    direction: Direction,
    json: bool,
) -> Result<()> {
    let response = ctx
        .move_entry(MoveEntryRequest::new(player_id, direction))
        .await?;
    if json {
        return print_json(&response);
    }

    match (response.mutation, response.position) {
        (Mutation::Moved, Some(position)) => {
            println!("Moved {} to position {}", player_id, position + 1)
        }
        (_, Some(position)) => println!("{} stays at position {}", player_id, position + 1),
        (_, None) => println!("{} is not in the ledger", player_id),
    }
    Ok(())
}

/// Print every logged home run of a player.
pub async fn entry(ctx: &OpsContext, player_id: PlayerId, json: bool) -> Result<()> {
    let entry = ctx.ledger_entry(player_id).await?;
    if json {
        return print_json(&entry);
    }

    println!(
        "{} ({}, {})",
        entry.player_name,
        entry.team_name,
        teams::abbreviation(&entry.team_name)
    );
    println!("Added {}", entry.added_at.format("%Y-%m-%d"));
    println!("{:─<72}", "");
    for event in &entry.home_runs {
        println!("{:<28} {}", event.hr_id, event_line(event));
    }
    println!();
    println!("Season total: {}", entry.season_total());
    Ok(())
}

fn entry_line(entry: &LedgerEntry) -> String {
    let latest = entry
        .latest()
        .map(event_line)
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{:<4} {:<24} {:>3}  {}",
        teams::abbreviation(&entry.team_name),
        entry.player_name,
        entry.season_total(),
        latest
    )
}

fn event_line(event: &HomeRunEvent) -> String {
    format!(
        "#{} (career {}) {} {}",
        event.season_hr_number,
        event.career_label(),
        event.date,
        event.opponent
    )
}

/// Ask a yes/no question on stdin. Anything but `y`/`yes` is a no.
fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes"
    ))
}
