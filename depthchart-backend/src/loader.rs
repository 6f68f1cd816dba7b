//! Startup bulk load of depth charts from JSON files.
//!
//! Files live one directory below the data root, e.g. `data/nfl/tb_2022.json`:
//!
//! ```json
//! {"league": "NFL", "team": "TB", "season": "2022",
//!  "positions": {"QB": [{"number": 12, "name": "Tom Brady"}]}}
//! ```
//!
//! Every record is loaded independently. Bad files and bad records are
//! skipped with a warning and never abort the batch.

use std::path::{Path, PathBuf};

use depthchart_store::{DepthChartStore, Player, RosterKey};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse depth chart: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("missing league/team/positions")]
    Incomplete,
}

/// Outcome of a bulk load
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    /// Files that were parsed and applied
    pub files: usize,
    /// Players accepted by the store
    pub players: usize,
    /// Records skipped (malformed or rejected by the store)
    pub skipped: usize,
}

impl std::ops::AddAssign for LoadSummary {
    fn add_assign(&mut self, other: Self) {
        self.files += other.files;
        self.players += other.players;
        self.skipped += other.skipped;
    }
}

#[derive(Debug, Deserialize)]
struct DepthChartFile {
    league: Option<String>,
    team: Option<String>,
    /// Kept as raw values so one malformed record doesn't reject the whole file
    positions: Option<Map<String, Value>>,
}

/// Load every `<dir>/<league>/*.json` file into the store.
///
/// A missing directory loads nothing. Files are visited in path order so a
/// load is reproducible.
pub async fn load_dir(store: &DepthChartStore, dir: impl AsRef<Path>) -> LoadSummary {
    let dir = dir.as_ref();
    let mut summary = LoadSummary::default();

    let files = match chart_files(dir).await {
        Ok(files) => files,
        Err(LoadError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            info!(dir = %dir.display(), "no depth chart data directory, starting empty");
            return summary;
        }
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "failed to scan depth chart data directory");
            return summary;
        }
    };

    if files.is_empty() {
        info!(dir = %dir.display(), "no depth chart JSON files found");
    }

    for path in files {
        match load_file(store, &path).await {
            Ok(file_summary) => summary += file_summary,
            Err(e) => warn!(file = %path.display(), error = %e, "skipping depth chart file"),
        }
    }
    summary
}

/// Collect `*.json` files exactly one directory below `dir`.
async fn chart_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| LoadError::Io { path, source }
    };

    let mut files = Vec::new();
    let mut leagues = tokio::fs::read_dir(dir).await.map_err(io_err(dir))?;
    while let Some(league_dir) = leagues.next_entry().await.map_err(io_err(dir))? {
        let league_path = league_dir.path();
        if !league_path.is_dir() {
            continue;
        }
        let mut entries = tokio::fs::read_dir(&league_path)
            .await
            .map_err(io_err(&league_path))?;
        while let Some(entry) = entries.next_entry().await.map_err(io_err(&league_path))? {
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Load a single depth chart file.
pub async fn load_file(store: &DepthChartStore, path: &Path) -> Result<LoadSummary, LoadError> {
    info!(file = %path.display(), "loading depth chart");
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    load_chart(store, &path.display().to_string(), &json).await
}

/// Load one depth chart document. `source` names it in log lines.
pub async fn load_chart(
    store: &DepthChartStore,
    source: &str,
    json: &str,
) -> Result<LoadSummary, LoadError> {
    let chart: DepthChartFile = serde_json::from_str(json)?;
    let (Some(league), Some(team), Some(positions)) = (chart.league, chart.team, chart.positions)
    else {
        return Err(LoadError::Incomplete);
    };
    if positions.is_empty() {
        return Err(LoadError::Incomplete);
    }

    let mut summary = LoadSummary {
        files: 1,
        ..Default::default()
    };

    for (position, records) in &positions {
        let Value::Array(records) = records else {
            warn!(%source, %position, "skipping position, players must be a list");
            summary.skipped += 1;
            continue;
        };
        if records.is_empty() {
            continue;
        }

        let key = match RosterKey::new(&league, &team, position) {
            Ok(key) => key,
            Err(e) => {
                warn!(%source, %position, error = %e, "skipping position");
                summary.skipped += records.len();
                continue;
            }
        };

        for (depth, record) in records.iter().enumerate() {
            let player = match Player::deserialize(record) {
                Ok(player) => player,
                Err(e) => {
                    warn!(%source, %position, depth, error = %e, "skipping malformed player record");
                    summary.skipped += 1;
                    continue;
                }
            };
            match store.add_player(&key, player.clone(), Some(depth as i64)).await {
                Ok(()) => summary.players += 1,
                Err(e) => {
                    warn!(
                        %source, %position, depth,
                        player = ?player,
                        error = %e,
                        "skipping player due to validation error"
                    );
                    summary.skipped += 1;
                }
            }
        }
    }

    info!(
        %source, %league, %team,
        positions = positions.len(),
        players = summary.players,
        skipped = summary.skipped,
        "loaded depth chart"
    );
    Ok(summary)
}
