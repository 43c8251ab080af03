//! The home-run ledger ("Mentaculous").
//!
//! A mapping from player to the ordered list of home runs the user logged for
//! them, plus a separately maintained display order. All changes go through
//! [`Ledger::apply`] so the invariants hold after every command:
//!
//! - an `hrId` appears at most once inside its entry;
//! - no entry has an empty `homeRuns` list;
//! - every entry appears exactly once in the display order, and the display
//!   order holds no id without an entry.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::hr::HomeRunEvent;
use crate::player::PlayerId;

/// Entries per page.
pub const DEFAULT_PAGE_SIZE: usize = 32;

// =============================================================================
// Entries
// =============================================================================

/// One player's aggregated log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub player_id: PlayerId,
    #[serde(default)]
    pub player_name: String,
    #[serde(default)]
    pub team_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<u32>,
    /// Insertion order, not game-date order.
    #[serde(default)]
    pub home_runs: Vec<HomeRunEvent>,
    /// Captured at first insertion and never rewritten.
    #[serde(default)]
    pub added_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// Number of logged home runs. This is the "current season total" shown
    /// next to the player.
    pub fn season_total(&self) -> usize {
        self.home_runs.len()
    }

    /// Most recently logged event.
    pub fn latest(&self) -> Option<&HomeRunEvent> {
        self.home_runs.last()
    }

    /// Whether `hr_id` is already logged for this player.
    pub fn contains(&self, hr_id: &str) -> bool {
        self.home_runs.iter().any(|hr| hr.hr_id == hr_id)
    }
}

// =============================================================================
// Commands
// =============================================================================

/// Direction for a display-order swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            other => Err(format!("unknown direction: {other} (expected up or down)")),
        }
    }
}

/// Descriptive fields captured when a player is first added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedPlayer {
    pub id: PlayerId,
    pub name: String,
    pub team_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<u32>,
}

/// A state change request.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerCommand {
    /// Log `event` for `player`. The opponent must already be resolved.
    Add {
        player: LoggedPlayer,
        event: HomeRunEvent,
        at: DateTime<Utc>,
    },
    /// Delete one logged event.
    Remove { player: PlayerId, hr_id: String },
    /// Swap the player with its neighbour in the display order.
    Reorder {
        player: PlayerId,
        direction: Direction,
    },
}

/// What a command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    rename_all = "snake_case",
    rename_all_fields = "camelCase",
    tag = "outcome"
)]
pub enum Mutation {
    /// A new event was logged; `new_entry` when the player was not in the ledger.
    Added { new_entry: bool },
    /// An event was deleted; `entry_removed` when it was the player's last.
    Removed { entry_removed: bool },
    /// Two neighbours swapped places.
    Moved,
    /// Nothing changed (duplicate add, unknown event, boundary move).
    Unchanged,
}

impl Mutation {
    /// Whether the ledger state differs from before the command.
    pub fn is_changed(&self) -> bool {
        !matches!(self, Mutation::Unchanged)
    }
}

// =============================================================================
// Ledger
// =============================================================================

/// In-memory ledger state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    entries: BTreeMap<PlayerId, LedgerEntry>,
    order: Vec<PlayerId>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from persisted parts.
    ///
    /// Entries with no home runs are dropped and each entry's `player_id` is
    /// taken from its map key. Without a stored order the display order is
    /// `addedAt` ascending. A stored order keeps its sequence, loses ids that
    /// have no entry (and repeats), and gains the missing entries at the end in
    /// `addedAt` order.
    pub fn from_parts(
        entries: BTreeMap<PlayerId, LedgerEntry>,
        stored_order: Option<Vec<PlayerId>>,
    ) -> Self {
        let entries: BTreeMap<PlayerId, LedgerEntry> = entries
            .into_iter()
            .filter(|(_, entry)| !entry.home_runs.is_empty())
            .map(|(id, mut entry)| {
                entry.player_id = id;
                (id, entry)
            })
            .collect();

        let mut seen = HashSet::new();
        let mut order: Vec<PlayerId> = stored_order
            .unwrap_or_default()
            .into_iter()
            .filter(|id| entries.contains_key(id) && seen.insert(*id))
            .collect();

        let mut missing: Vec<&LedgerEntry> = entries
            .values()
            .filter(|entry| !seen.contains(&entry.player_id))
            .collect();
        missing.sort_by(|a, b| {
            a.added_at
                .cmp(&b.added_at)
                .then(a.player_id.cmp(&b.player_id))
        });
        order.extend(missing.into_iter().map(|entry| entry.player_id));

        Self { entries, order }
    }

    /// Entries keyed by player.
    pub fn entries(&self) -> &BTreeMap<PlayerId, LedgerEntry> {
        &self.entries
    }

    /// Display order.
    pub fn order(&self) -> &[PlayerId] {
        &self.order
    }

    pub fn get(&self, player: PlayerId) -> Option<&LedgerEntry> {
        self.entries.get(&player)
    }

    /// Whether `hr_id` is logged for `player`.
    pub fn contains(&self, player: PlayerId, hr_id: &str) -> bool {
        self.entries
            .get(&player)
            .map(|entry| entry.contains(hr_id))
            .unwrap_or(false)
    }

    /// Number of players in the ledger.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of logged home runs.
    pub fn home_run_count(&self) -> usize {
        self.entries.values().map(LedgerEntry::season_total).sum()
    }

    /// Apply a command in place.
    pub fn apply(&mut self, command: LedgerCommand) -> Mutation {
        match command {
            LedgerCommand::Add { player, event, at } => self.add(player, event, at),
            LedgerCommand::Remove { player, hr_id } => self.remove(player, &hr_id),
            LedgerCommand::Reorder { player, direction } => self.reorder(player, direction),
        }
    }

    /// Apply a command and return the resulting state.
    pub fn mutate(mut self, command: LedgerCommand) -> Self {
        self.apply(command);
        self
    }

    fn add(&mut self, player: LoggedPlayer, event: HomeRunEvent, at: DateTime<Utc>) -> Mutation {
        let id = player.id;
        let new_entry = match self.entries.get_mut(&id) {
            Some(entry) => {
                if entry.contains(&event.hr_id) {
                    return Mutation::Unchanged;
                }
                if entry.team_id.is_none() {
                    entry.team_id = player.team_id;
                }
                entry.home_runs.push(event);
                false
            }
            None => {
                self.entries.insert(
                    id,
                    LedgerEntry {
                        player_id: id,
                        player_name: player.name,
                        team_name: player.team_name,
                        team_id: player.team_id,
                        home_runs: vec![event],
                        added_at: at,
                    },
                );
                true
            }
        };

        if !self.order.contains(&id) {
            self.order.push(id);
        }
        Mutation::Added { new_entry }
    }

    fn remove(&mut self, player: PlayerId, hr_id: &str) -> Mutation {
        let Some(entry) = self.entries.get_mut(&player) else {
            return Mutation::Unchanged;
        };
        let Some(index) = entry.home_runs.iter().position(|hr| hr.hr_id == hr_id) else {
            return Mutation::Unchanged;
        };

        entry.home_runs.remove(index);
        if entry.home_runs.is_empty() {
            self.entries.remove(&player);
            self.order.retain(|id| *id != player);
            Mutation::Removed {
                entry_removed: true,
            }
        } else {
            Mutation::Removed {
                entry_removed: false,
            }
        }
    }

    fn reorder(&mut self, player: PlayerId, direction: Direction) -> Mutation {
        let Some(index) = self.order.iter().position(|id| *id == player) else {
            return Mutation::Unchanged;
        };
        let target = match direction {
            Direction::Up => index.checked_sub(1),
            Direction::Down => Some(index + 1).filter(|t| *t < self.order.len()),
        };
        match target {
            Some(target) => {
                self.order.swap(index, target);
                Mutation::Moved
            }
            None => Mutation::Unchanged,
        }
    }

    /// Entries in display order, skipping ids without an entry.
    pub fn ordered_entries(&self) -> impl Iterator<Item = &LedgerEntry> {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    /// Number of pages at `page_size` (at least one).
    pub fn total_pages(&self, page_size: usize) -> usize {
        let count = self.ordered_entries().count();
        count.div_ceil(page_size.max(1)).max(1)
    }

    /// One page of the display order. `index` is clamped to the valid range.
    pub fn page(&self, index: usize, page_size: usize) -> Page<'_> {
        let size = page_size.max(1);
        let total_pages = self.total_pages(size);
        let index = index.min(total_pages - 1);
        let entries = self
            .ordered_entries()
            .skip(index * size)
            .take(size)
            .collect();
        Page {
            index,
            total_pages,
            entries,
        }
    }
}

/// A page of the ledger in display order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<'a> {
    /// Zero-based page index after clamping.
    pub index: usize,
    pub total_pages: usize,
    pub entries: Vec<&'a LedgerEntry>,
}
