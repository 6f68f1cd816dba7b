use thiserror::Error;

/// Reasons a league/team/position combination is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("unsupported league: {0}")]
    UnknownLeague(String),

    #[error("invalid team for {league}: {team}")]
    UnknownTeam { league: String, team: String },

    #[error("invalid position for {league}: {position}")]
    UnknownPosition { league: String, position: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("invalid player: {0}")]
    InvalidPlayer(&'static str),

    #[error("position_depth must be >= 0 if specified (got {0})")]
    InvalidRank(i64),

    #[error(transparent)]
    InvalidKey(#[from] CatalogError),
}

pub type Result<T> = std::result::Result<T, StoreError>;
