//! Typed view of a fetched league document.
//!
//! The document is validated once here; every builder downstream works on
//! the already-checked [`LeagueDataset`] and cannot fail.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DatasetError>;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read league data from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid league data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("week key {0:?} is not a positive integer")]
    InvalidWeek(String),

    #[error("roster key {0:?} is not an integer")]
    InvalidRosterId(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupEntry {
    pub roster_id: u32,
    #[serde(default)]
    pub matchup_id: Option<u32>,
    #[serde(default, deserialize_with = "points_or_zero")]
    pub points: f64,
}

impl MatchupEntry {
    /// Entries without a usable matchup id (absent or zero) sit out the week.
    pub fn paired_matchup_id(&self) -> Option<u32> {
        self.matchup_id.filter(|id| *id != 0)
    }
}

fn points_or_zero<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

#[derive(Debug, Deserialize)]
struct DatasetDocument {
    matchups: HashMap<String, Vec<MatchupEntry>>,
    user_map: HashMap<String, User>,
    roster_to_user_map: HashMap<String, Option<String>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeagueDataset {
    pub users: HashMap<String, User>,
    pub roster_owner: HashMap<u32, String>,
    pub matchups_by_week: BTreeMap<u32, Vec<MatchupEntry>>,
}

impl LeagueDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_json_str(&raw)?;
        info!(
            "loaded {} ({} weeks, {} rosters, {} users)",
            path.display(),
            dataset.matchups_by_week.len(),
            dataset.roster_owner.len(),
            dataset.users.len()
        );
        Ok(dataset)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let doc: DatasetDocument = serde_json::from_str(raw)?;
        Self::from_document(doc)
    }

    fn from_document(doc: DatasetDocument) -> Result<Self> {
        let mut matchups_by_week = BTreeMap::new();
        for (key, entries) in doc.matchups {
            let week = key
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|w| *w > 0)
                .ok_or_else(|| DatasetError::InvalidWeek(key.clone()))?;
            matchups_by_week.insert(week, entries);
        }

        let mut roster_owner = HashMap::new();
        for (key, owner) in doc.roster_to_user_map {
            let roster_id = key
                .trim()
                .parse::<u32>()
                .map_err(|_| DatasetError::InvalidRosterId(key.clone()))?;
            // Orphaned rosters have a null owner; they resolve to a placeholder.
            if let Some(owner) = owner {
                roster_owner.insert(roster_id, owner);
            }
        }

        Ok(Self {
            users: doc.user_map,
            roster_owner,
            matchups_by_week,
        })
    }

    pub fn with_user(
        mut self,
        user_id: &str,
        display_name: Option<&str>,
        username: Option<&str>,
    ) -> Self {
        self.users.insert(
            user_id.to_string(),
            User {
                display_name: display_name.map(str::to_string),
                username: username.map(str::to_string),
            },
        );
        self
    }

    pub fn with_owner(mut self, roster_id: u32, user_id: &str) -> Self {
        self.roster_owner.insert(roster_id, user_id.to_string());
        self
    }

    pub fn with_matchup(
        mut self,
        week: u32,
        roster_id: u32,
        matchup_id: Option<u32>,
        points: f64,
    ) -> Self {
        self.matchups_by_week
            .entry(week)
            .or_default()
            .push(MatchupEntry {
                roster_id,
                matchup_id,
                points,
            });
        self
    }

    pub fn weeks(&self) -> impl Iterator<Item = u32> + '_ {
        self.matchups_by_week.keys().copied()
    }
}
