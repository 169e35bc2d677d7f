use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::records::{PlayerRecord, TeamRecord};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Default, Deserialize)]
struct PlayerDocument {
    #[serde(default)]
    players: Vec<PlayerRecord>,
}

#[derive(Serialize)]
struct PlayersOut<'a> {
    players: &'a [PlayerRecord],
}

#[derive(Serialize)]
struct TeamsOut<'a> {
    teams: &'a [TeamRecord],
}

/// Durable store plus checkpoint bookkeeping. `players.json` is the single
/// source of truth across runs; the in-memory mirror only exists to avoid
/// re-reading the file on every flush.
pub struct RecordStore {
    players_path: PathBuf,
    teams_path: PathBuf,
    backup_dir: PathBuf,
    records: Vec<PlayerRecord>,
    index: HashMap<String, usize>,
}

impl RecordStore {
    /// Open (or initialize) the store under `data_dir`. An absent
    /// `players.json` is created empty so readers always see valid JSON.
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self, StoreError> {
        let data_dir = data_dir.as_ref().to_path_buf();
        let backup_dir = data_dir.join("backups");
        fs::create_dir_all(&backup_dir)?;

        let players_path = data_dir.join("players.json");
        let teams_path = data_dir.join("teams.json");

        let records = if players_path.exists() {
            let raw = fs::read_to_string(&players_path)?;
            let document: PlayerDocument = serde_json::from_str(&raw)?;
            document.players
        } else {
            let empty = serde_json::to_string_pretty(&PlayersOut { players: &[] })?;
            fs::write(&players_path, empty)?;
            info!("Created new store at {}", players_path.display());
            Vec::new()
        };

        let index = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.url.clone(), i))
            .collect();

        info!(
            "Loaded {} existing records from {}",
            records.len(),
            players_path.display()
        );

        Ok(Self {
            players_path,
            teams_path,
            backup_dir,
            records,
            index,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Read-only view for consumers of the crawl output.
    pub fn records(&self) -> &[PlayerRecord] {
        &self.records
    }

    pub fn players_path(&self) -> &Path {
        &self.players_path
    }

    /// Identity values already persisted. A resumed run derives its skip set
    /// from these instead of re-crawling the pages behind them.
    pub fn known_urls(&self) -> HashSet<String> {
        self.index.keys().cloned().collect()
    }

    /// Merge the buffer into the durable store, upserting by `url`: a record
    /// whose url is already stored replaces it in place, anything else is
    /// appended. The buffer is drained only after the write lands; on failure
    /// it is left intact so the next attempt carries the same records.
    pub fn flush(&mut self, buffer: &mut Vec<PlayerRecord>) -> Result<usize, StoreError> {
        if buffer.is_empty() {
            return Ok(0);
        }

        let (merged, index) = merge(&self.records, &self.index, buffer);
        self.write_players(&merged)?;

        let flushed = buffer.len();
        self.records = merged;
        self.index = index;
        buffer.clear();

        info!(
            "Flushed {} records to {} (total {})",
            flushed,
            self.players_path.display(),
            self.records.len()
        );
        Ok(flushed)
    }

    /// Snapshot the current durable store contents, plus `extra` for the
    /// failure path where unflushed records must survive, into the backup
    /// directory. Snapshots are never overwritten: a colliding count-based
    /// name falls back to a unique suffix.
    pub fn backup(&self, extra: &[PlayerRecord]) -> Result<PathBuf, StoreError> {
        let (merged, _) = merge(&self.records, &self.index, extra);
        let count = merged.len();

        let mut path = self.backup_dir.join(format!("players_backup_{count}.json"));
        if path.exists() {
            path = self
                .backup_dir
                .join(format!("players_backup_{count}_{}.json", Uuid::now_v7()));
        }

        let json = serde_json::to_string_pretty(&PlayersOut { players: &merged })?;
        fs::write(&path, json)?;
        Ok(path)
    }

    /// Maintenance operation: keep the `keep_last_n` newest snapshots and
    /// delete the rest. The crawl loop never calls this on its own.
    pub fn prune_backups(&self, keep_last_n: usize) -> Result<usize, StoreError> {
        let mut snapshots: Vec<(SystemTime, PathBuf)> = Vec::new();
        for entry in fs::read_dir(&self.backup_dir)? {
            let entry = entry?;
            if entry
                .file_name()
                .to_string_lossy()
                .starts_with("players_backup_")
            {
                snapshots.push((entry.metadata()?.modified()?, entry.path()));
            }
        }
        snapshots.sort_by(|a, b| b.cmp(a));

        let mut deleted = 0;
        for (_, path) in snapshots.into_iter().skip(keep_last_n) {
            fs::remove_file(&path)?;
            deleted += 1;
        }
        Ok(deleted)
    }

    pub fn save_teams(&self, teams: &[TeamRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&TeamsOut { teams })?;
        fs::write(&self.teams_path, json)?;
        info!("Saved {} teams to {}", teams.len(), self.teams_path.display());
        Ok(())
    }

    fn write_players(&self, records: &[PlayerRecord]) -> Result<(), StoreError> {
        // Serialize the whole document before touching the file so readers
        // never see a torn write.
        let json = serde_json::to_string_pretty(&PlayersOut { players: records })?;
        fs::write(&self.players_path, json)?;
        Ok(())
    }
}

fn merge(
    records: &[PlayerRecord],
    index: &HashMap<String, usize>,
    incoming: &[PlayerRecord],
) -> (Vec<PlayerRecord>, HashMap<String, usize>) {
    let mut merged = records.to_vec();
    let mut index = index.clone();

    for record in incoming {
        match index.get(&record.url) {
            Some(&pos) => merged[pos] = record.clone(),
            None => {
                index.insert(record.url.clone(), merged.len());
                merged.push(record.clone());
            }
        }
    }

    (merged, index)
}
