//! Pulls one season of league data from the Sleeper API and shapes it into
//! the document the report reads.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::{SecondsFormat, Utc};
use log::info;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::FetchConfig;
use crate::http_client::{get_text, http_client};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeagueSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leg: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_scored_leg: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleeperLeague {
    pub league_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_league_id: Option<String>,
    #[serde(default)]
    pub settings: LeagueSettings,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleeperUser {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleeperRoster {
    pub roster_id: u32,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleeperMatchup {
    pub roster_id: u32,
    #[serde(default)]
    pub matchup_id: Option<u32>,
    #[serde(default)]
    pub points: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The on-disk league document. Week and roster keys serialize as strings.
#[derive(Debug, Clone, Serialize)]
pub struct LeagueDocument {
    pub league_info: SleeperLeague,
    pub users: Vec<SleeperUser>,
    pub rosters: Vec<SleeperRoster>,
    pub matchups: BTreeMap<u32, Vec<SleeperMatchup>>,
    pub user_map: BTreeMap<String, SleeperUser>,
    pub roster_to_user_map: BTreeMap<u32, String>,
    pub fetched_at: String,
}

impl LeagueDocument {
    pub fn assemble(
        league_info: SleeperLeague,
        users: Vec<SleeperUser>,
        rosters: Vec<SleeperRoster>,
        matchups: BTreeMap<u32, Vec<SleeperMatchup>>,
    ) -> Self {
        let user_map = users
            .iter()
            .map(|u| (u.user_id.clone(), u.clone()))
            .collect();
        let roster_to_user_map = rosters
            .iter()
            .filter_map(|r| r.owner_id.clone().map(|owner| (r.roster_id, owner)))
            .collect();
        Self {
            league_info,
            users,
            rosters,
            matchups,
            user_map,
            roster_to_user_map,
            fetched_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serialize league document")
    }
}

pub fn parse_league_json(raw: &str) -> Result<SleeperLeague> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(anyhow!("league not found"));
    }
    serde_json::from_str(trimmed).context("invalid league json")
}

pub fn parse_users_json(raw: &str) -> Result<Vec<SleeperUser>> {
    parse_list(raw).context("invalid users json")
}

pub fn parse_rosters_json(raw: &str) -> Result<Vec<SleeperRoster>> {
    parse_list(raw).context("invalid rosters json")
}

pub fn parse_matchups_json(raw: &str) -> Result<Vec<SleeperMatchup>> {
    parse_list(raw).context("invalid matchups json")
}

fn parse_list<T: for<'de> Deserialize<'de>>(raw: &str) -> Result<Vec<T>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(trimmed)?)
}

/// Weeks to fetch: the league's current leg, capped at `max_weeks`, at least 1.
/// A leg of 0 means the season has not started and counts as unset.
pub fn week_count(league: &SleeperLeague, max_weeks: u32) -> u32 {
    league
        .settings
        .leg
        .filter(|leg| *leg > 0)
        .unwrap_or(max_weeks)
        .min(max_weeks)
        .max(1)
}

/// Follows `previous_league_id` from `start_id` until a league for `season`
/// turns up. Without a season the starting league is returned.
pub fn find_season<F>(start_id: &str, season: Option<&str>, mut fetch: F) -> Result<SleeperLeague>
where
    F: FnMut(&str) -> Result<SleeperLeague>,
{
    let mut visited = HashSet::new();
    let mut current = Some(start_id.to_string());
    let mut seen_seasons = Vec::new();

    while let Some(id) = current.take() {
        if !visited.insert(id.clone()) {
            break;
        }
        let league = fetch(&id)?;
        let Some(wanted) = season else {
            return Ok(league);
        };
        if league.season.as_deref() == Some(wanted) {
            return Ok(league);
        }
        if let Some(s) = league.season.clone() {
            seen_seasons.push(s);
        }
        current = league.previous_league_id.clone().filter(|p| !p.is_empty() && p != "0");
    }

    Err(anyhow!(
        "season {} not found (available: {})",
        season.unwrap_or_default(),
        seen_seasons.join(", ")
    ))
}

pub struct SleeperApi<'a> {
    client: &'a Client,
    base_url: &'a str,
}

impl<'a> SleeperApi<'a> {
    pub fn new(client: &'a Client, base_url: &'a str) -> Self {
        Self { client, base_url }
    }

    pub fn league(&self, league_id: &str) -> Result<SleeperLeague> {
        let body = get_text(self.client, &format!("{}/league/{league_id}", self.base_url))?;
        parse_league_json(&body).with_context(|| format!("league {league_id}"))
    }

    pub fn users(&self, league_id: &str) -> Result<Vec<SleeperUser>> {
        let body = get_text(
            self.client,
            &format!("{}/league/{league_id}/users", self.base_url),
        )?;
        parse_users_json(&body)
    }

    pub fn rosters(&self, league_id: &str) -> Result<Vec<SleeperRoster>> {
        let body = get_text(
            self.client,
            &format!("{}/league/{league_id}/rosters", self.base_url),
        )?;
        parse_rosters_json(&body)
    }

    pub fn matchups(&self, league_id: &str, week: u32) -> Result<Vec<SleeperMatchup>> {
        let body = get_text(
            self.client,
            &format!("{}/league/{league_id}/matchups/{week}", self.base_url),
        )?;
        parse_matchups_json(&body).with_context(|| format!("week {week}"))
    }
}

pub fn fetch_league_document(cfg: &FetchConfig) -> Result<LeagueDocument> {
    let client = http_client(cfg.timeout_secs)?;
    let api = SleeperApi::new(client, &cfg.base_url);

    let league = find_season(&cfg.league_id, cfg.season.as_deref(), |id| api.league(id))?;
    let league_id = league.league_id.clone();
    info!(
        "league {} ({}) season {}",
        league.name.as_deref().unwrap_or("?"),
        league_id,
        league.season.as_deref().unwrap_or("?")
    );

    let users = api.users(&league_id)?;
    let rosters = api.rosters(&league_id)?;

    let weeks = week_count(&league, cfg.max_weeks);
    let mut matchups = BTreeMap::new();
    for week in 1..=weeks {
        matchups.insert(week, api.matchups(&league_id, week)?);
    }
    info!(
        "fetched {} users, {} rosters, {} weeks",
        users.len(),
        rosters.len(),
        weeks
    );

    Ok(LeagueDocument::assemble(league, users, rosters, matchups))
}

/// Writes through a temp file so a failed run never leaves a truncated document.
pub fn write_document(path: &Path, doc: &LeagueDocument) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let json = doc.to_json_pretty()?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("swap {}", path.display()))?;
    Ok(())
}
