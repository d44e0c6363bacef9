use crate::config::LEADERBOARD_SIZE;
use crate::error::PersistenceError;
use crate::session::{BetRecord, Session, Statistics};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;

fn io_error(path: &Path, source: std::io::Error) -> PersistenceError {
    PersistenceError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Write to a sibling temp file, then rename over the target, so a crash
/// never leaves a half-written file behind.
async fn write_atomic(path: &Path, content: &str) -> Result<(), PersistenceError> {
    let mut tmp: OsString = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, content)
        .await
        .map_err(|e| io_error(&tmp, e))?;
    if let Err(e) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(io_error(path, e));
    }
    Ok(())
}

pub async fn save_session(path: &Path, session: &Session) -> Result<(), PersistenceError> {
    let content = serde_json::to_string_pretty(session).map_err(PersistenceError::Encode)?;
    write_atomic(path, &content).await?;
    info!("saved session to {}", path.display());
    Ok(())
}

/// Read a saved session. `Ok(None)` when there is no save file; any
/// unreadable content is an error and nothing is returned.
pub async fn load_session(path: &Path) -> Result<Option<Session>, PersistenceError> {
    if !fs::try_exists(path).await.map_err(|e| io_error(path, e))? {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| io_error(path, e))?;
    let session = serde_json::from_str(&content).map_err(|source| PersistenceError::Corrupt {
        path: path.display().to_string(),
        source,
    })?;
    info!("loaded session from {}", path.display());
    Ok(Some(session))
}

/// Remove the save file. Returns whether there was one.
pub async fn delete_save(path: &Path) -> Result<bool, PersistenceError> {
    match fs::remove_file(path).await {
        Ok(()) => {
            info!("deleted save {}", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(io_error(path, e)),
    }
}

#[derive(Serialize)]
struct HistoryExport<'a> {
    player: &'a str,
    statistics: Statistics,
    hot_numbers: Vec<(u8, u64)>,
    history: &'a [BetRecord],
}

/// Dump the statistics and full bet history as pretty JSON.
pub async fn export_history(path: &Path, player: &str, session: &Session) -> Result<(), PersistenceError> {
    let export = HistoryExport {
        player,
        statistics: session.statistics(),
        hot_numbers: session.hot_numbers(5),
        history: session.history(),
    };
    let content = serde_json::to_string_pretty(&export).map_err(PersistenceError::Encode)?;
    write_atomic(path, &content).await?;
    info!("exported {} records to {}", session.history().len(), path.display());
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub final_balance: u64,
    pub profit: i64,
    pub total_bets: u64,
    pub win_rate: f64,
}

impl LeaderboardEntry {
    pub fn from_session(name: &str, session: &Session) -> Self {
        let stats = session.statistics();
        LeaderboardEntry {
            name: name.to_string(),
            final_balance: stats.balance,
            profit: stats.profit,
            total_bets: stats.total_bets,
            win_rate: stats.win_rate,
        }
    }
}

/// Best finishing balances across sessions, highest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Insert in balance order and keep the top ten. A new entry goes after
    /// existing ones with the same balance.
    pub fn insert(&mut self, entry: LeaderboardEntry) {
        let pos = self
            .entries
            .partition_point(|e| e.final_balance >= entry.final_balance);
        self.entries.insert(pos, entry);
        self.entries.truncate(LEADERBOARD_SIZE);
    }

    /// Read the board strictly. `Ok(None)` when there is no file.
    pub async fn read(path: &Path) -> Result<Option<Self>, PersistenceError> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(path, e)),
        };
        let mut board: Leaderboard =
            serde_json::from_str(&content).map_err(|source| PersistenceError::Corrupt {
                path: path.display().to_string(),
                source,
            })?;
        board
            .entries
            .sort_by(|a, b| b.final_balance.cmp(&a.final_balance));
        board.entries.truncate(LEADERBOARD_SIZE);
        Ok(Some(board))
    }

    /// Load the board for display. A missing or unreadable file gives an
    /// empty board.
    pub async fn load(path: &Path) -> Self {
        match Leaderboard::read(path).await {
            Ok(board) => board.unwrap_or_default(),
            Err(e) => {
                warn!("ignoring unreadable leaderboard: {e}");
                Leaderboard::default()
            }
        }
    }

    pub async fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        let content = serde_json::to_string_pretty(self).map_err(PersistenceError::Encode)?;
        write_atomic(path, &content).await
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut bak: OsString = path.as_os_str().to_owned();
    bak.push(".bak");
    PathBuf::from(bak)
}

/// Add an entry to the board on disk. A board file that does not parse is
/// moved to `<path>.bak` and a fresh board is started in its place.
pub async fn submit_to_leaderboard(path: &Path, entry: LeaderboardEntry) -> Result<Leaderboard, PersistenceError> {
    let mut board = match Leaderboard::read(path).await {
        Ok(board) => board.unwrap_or_default(),
        Err(PersistenceError::Corrupt { source, .. }) => {
            let bak = backup_path(path);
            warn!(
                "leaderboard {} is unreadable ({source}), moving it to {} and starting over",
                path.display(),
                bak.display()
            );
            fs::rename(path, &bak)
                .await
                .map_err(|e| io_error(&bak, e))?;
            Leaderboard::default()
        }
        Err(e) => return Err(e),
    };
    board.insert(entry);
    board.save(path).await?;
    info!("leaderboard updated in {}", path.display());
    Ok(board)
}
