mod catalog;
mod error;
mod models;
mod roster;

pub use catalog::{Catalog, LeagueCatalog};
pub use error::{CatalogError, Result, StoreError};
pub use models::{Player, PositionChart, RosterKey, normalize};

use roster::Roster;

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Default)]
struct Charts {
  rosters: HashMap<RosterKey, Roster>,
  next_seq: u64,
}

/// Shared handle to every depth chart in the process.
///
/// All operations run under one exclusive lock, validation included, so a
/// rank-based insert never observes a roster that changes underneath it.
#[derive(Clone)]
pub struct DepthChartStore {
  catalog: Arc<dyn Catalog>,
  charts: Arc<Mutex<Charts>>,
}

impl DepthChartStore {
  /// Create an empty store validating against the given catalog.
  pub fn new(catalog: impl Catalog + 'static) -> Self {
    Self {
      catalog: Arc::new(catalog),
      charts: Arc::new(Mutex::new(Charts::default())),
    }
  }

  fn validate_key(&self, key: &RosterKey) -> Result<()> {
    self
      .catalog
      .validate_league_team_position(key.league(), key.team(), key.position())?;
    Ok(())
  }

  /// Add a player to a depth chart.
  ///
  /// `rank` is the zero-based depth (0 = starter). Without a rank, or with a
  /// rank past the end, the player is appended unless already listed.
  pub async fn add_player(&self, key: &RosterKey, player: Player, rank: Option<i64>) -> Result<()> {
    player.validate().map_err(StoreError::InvalidPlayer)?;
    let rank = match rank {
      Some(r) if r < 0 => return Err(StoreError::InvalidRank(r)),
      // Anything beyond usize is past the end of any roster
      Some(r) => Some(usize::try_from(r).unwrap_or(usize::MAX)),
      None => None,
    };

    let mut charts = self.charts.lock().await;
    self.validate_key(key)?;

    let Charts { rosters, next_seq } = &mut *charts;
    let roster = rosters.entry(key.clone()).or_insert_with(|| {
      *next_seq += 1;
      Roster::new(*next_seq)
    });
    roster.insert(player, rank);

    debug!(
      league = key.league(),
      team = key.team(),
      position = key.position(),
      depth = roster.len(),
      "added player to depth chart"
    );
    Ok(())
  }

  /// Remove a player from a depth chart.
  ///
  /// Returns the removed player, or an empty list if it was not listed.
  /// A chart left empty is dropped.
  pub async fn remove_player(&self, key: &RosterKey, player: &Player) -> Result<Vec<Player>> {
    let mut charts = self.charts.lock().await;
    self.validate_key(key)?;

    let Some(roster) = charts.rosters.get_mut(key) else {
      return Ok(Vec::new());
    };
    let removed = roster.remove(player);
    if roster.is_empty() {
      charts.rosters.remove(key);
    }

    if removed.is_some() {
      debug!(
        league = key.league(),
        team = key.team(),
        position = key.position(),
        "removed player from depth chart"
      );
    }
    Ok(removed.into_iter().collect())
  }

  /// Players ranked strictly below `player` at the key's position.
  pub async fn get_backups(&self, key: &RosterKey, player: &Player) -> Result<Vec<Player>> {
    let charts = self.charts.lock().await;
    self.validate_key(key)?;

    Ok(
      charts
        .rosters
        .get(key)
        .map(|roster| roster.backups(player))
        .unwrap_or_default(),
    )
  }

  /// Every non-empty position of a team, in the order positions were first
  /// created. An empty result means the team has no charts yet.
  pub async fn get_full_chart(&self, league: &str, team: &str) -> Result<Vec<PositionChart>> {
    let league = normalize("league", league)?;
    let team = normalize("team", team)?;

    let charts = self.charts.lock().await;
    self.catalog.validate_league_team(&league, &team)?;

    let mut rosters: Vec<(&RosterKey, &Roster)> = charts
      .rosters
      .iter()
      .filter(|(key, roster)| key.is_team(&league, &team) && !roster.is_empty())
      .collect();
    rosters.sort_by_key(|(_, roster)| roster.created());

    Ok(
      rosters
        .into_iter()
        .map(|(key, roster)| PositionChart {
          position: key.position().to_string(),
          players: roster.players().to_vec(),
        })
        .collect(),
    )
  }
}
