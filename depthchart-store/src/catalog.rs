//! League catalog: which leagues exist and which teams and positions each allows.

use std::collections::{HashMap, HashSet};

use crate::error::CatalogError;
use crate::models::normalize;

/// Validation contract the store consults before touching any roster.
///
/// Implementations must normalize inputs with [`normalize`] so that catalog
/// lookups agree with [`crate::RosterKey`] equality.
pub trait Catalog: Send + Sync {
    fn validate_league(&self, league: &str) -> Result<(), CatalogError>;

    fn validate_league_team(&self, league: &str, team: &str) -> Result<(), CatalogError>;

    fn validate_league_team_position(
        &self,
        league: &str,
        team: &str,
        position: &str,
    ) -> Result<(), CatalogError>;
}

/// Teams and positions valid within one league.
#[derive(Debug, Clone, Default)]
struct League {
    teams: HashSet<String>,
    positions: HashSet<String>,
}

/// In-memory catalog, built once at startup and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct LeagueCatalog {
    leagues: HashMap<String, League>,
}

impl LeagueCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a league. Names are normalized; blank entries are ignored.
    /// Registering the same league twice merges its teams and positions.
    pub fn with_league<T, P>(mut self, league: &str, teams: T, positions: P) -> Self
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let Ok(name) = normalize("league", league) else {
            return self;
        };
        let entry = self.leagues.entry(name).or_default();
        entry.teams.extend(
            teams
                .into_iter()
                .filter_map(|t| normalize("team", t.as_ref()).ok()),
        );
        entry.positions.extend(
            positions
                .into_iter()
                .filter_map(|p| normalize("position", p.as_ref()).ok()),
        );
        self
    }

    pub fn league_count(&self) -> usize {
        self.leagues.len()
    }

    fn league(&self, league: &str) -> Result<(String, &League), CatalogError> {
        let name = normalize("league", league)?;
        match self.leagues.get(&name) {
            Some(data) => Ok((name, data)),
            None => Err(CatalogError::UnknownLeague(name)),
        }
    }

    fn check_team(league: &str, data: &League, team: &str) -> Result<(), CatalogError> {
        let team = normalize("team", team)?;
        if !data.teams.contains(&team) {
            return Err(CatalogError::UnknownTeam {
                league: league.to_string(),
                team,
            });
        }
        Ok(())
    }
}

impl Catalog for LeagueCatalog {
    fn validate_league(&self, league: &str) -> Result<(), CatalogError> {
        self.league(league).map(|_| ())
    }

    fn validate_league_team(&self, league: &str, team: &str) -> Result<(), CatalogError> {
        let (name, data) = self.league(league)?;
        Self::check_team(&name, data, team)
    }

    fn validate_league_team_position(
        &self,
        league: &str,
        team: &str,
        position: &str,
    ) -> Result<(), CatalogError> {
        let (name, data) = self.league(league)?;
        Self::check_team(&name, data, team)?;

        let position = normalize("position", position)?;
        if !data.positions.contains(&position) {
            return Err(CatalogError::UnknownPosition {
                league: name,
                position,
            });
        }
        Ok(())
    }
}
