use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Trim and upper-case a league/team/position component.
/// Blank input is rejected with the name of the offending field.
pub fn normalize(field: &'static str, value: &str) -> Result<String, CatalogError> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Err(CatalogError::MissingField(field));
  }
  Ok(trimmed.to_uppercase())
}

/// Identifies one depth chart: a single position on a single team.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RosterKey {
  league: String,
  team: String,
  position: String,
}

impl RosterKey {
  /// Build a key from raw input, normalizing every component.
  pub fn new(league: &str, team: &str, position: &str) -> Result<Self, CatalogError> {
    Ok(Self {
      league: normalize("league", league)?,
      team: normalize("team", team)?,
      position: normalize("position", position)?,
    })
  }

  pub fn league(&self) -> &str {
    &self.league
  }

  pub fn team(&self) -> &str {
    &self.team
  }

  pub fn position(&self) -> &str {
    &self.position
  }

  /// Whether this key belongs to the given (already normalized) team.
  pub(crate) fn is_team(&self, league: &str, team: &str) -> bool {
    self.league == league && self.team == team
  }
}

/// A player as listed on a depth chart.
///
/// Identity is the (number, name) pair supplied by the caller; two players
/// with the same number and name are the same player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
  /// Jersey number, must be positive
  pub number: u32,
  pub name: String,
}

impl Player {
  pub fn new(number: u32, name: impl Into<String>) -> Self {
    Self {
      number,
      name: name.into(),
    }
  }

  pub(crate) fn validate(&self) -> Result<(), &'static str> {
    if self.number == 0 {
      return Err("number must be positive");
    }
    if self.name.trim().is_empty() {
      return Err("name is required");
    }
    Ok(())
  }
}

/// All players at one position of a team, in depth order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionChart {
  pub position: String,
  pub players: Vec<Player>,
}
