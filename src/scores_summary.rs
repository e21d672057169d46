use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::raw_scores::RawScores;
use crate::table::{Cell, Table, week_label};

pub const SHEET_NAME: &str = "Scores";

#[derive(Debug, Clone, PartialEq)]
pub struct TeamSummary {
    pub rank: usize,
    pub team: String,
    pub weeks: BTreeMap<u32, f64>,
    pub total: f64,
    pub avg_per_game: f64,
    pub median_per_game: f64,
}

/// Season scoring per team, ordered by rank (highest Total first).
///
/// Total, average and median only consider weeks the team actually has a
/// score for; missing weeks are never counted as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoresSummary {
    pub weeks: Vec<u32>,
    pub teams: Vec<TeamSummary>,
}

impl ScoresSummary {
    pub fn build(raw: &RawScores) -> Self {
        let mut teams: Vec<TeamSummary> = raw
            .teams
            .iter()
            .map(|t| {
                let points: Vec<f64> = t.weeks.values().copied().collect();
                TeamSummary {
                    rank: 0,
                    team: t.team.clone(),
                    weeks: t.weeks.clone(),
                    total: points.iter().sum(),
                    avg_per_game: mean(&points).unwrap_or(0.0),
                    median_per_game: median(&points).unwrap_or(0.0),
                }
            })
            .collect();

        // Stable: equal totals keep their raw-scores order.
        teams.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));
        for (idx, team) in teams.iter_mut().enumerate() {
            team.rank = idx + 1;
        }

        Self {
            weeks: raw.weeks.clone(),
            teams,
        }
    }

    pub fn team(&self, team: &str) -> Option<&TeamSummary> {
        self.teams.iter().find(|t| t.team == team)
    }

    pub fn max_total(&self) -> Option<f64> {
        self.teams.iter().map(|t| t.total).reduce(f64::max)
    }

    pub fn to_table(&self) -> Table {
        let mut header = vec!["Standings".to_string(), "Team".to_string()];
        header.extend(self.weeks.iter().map(|w| week_label(*w)));
        header.extend(["Total", "Avg/Game", "Median/Game"].map(String::from));

        let mut table = Table::new(SHEET_NAME, header);
        for team in &self.teams {
            let mut row = vec![Cell::Int(team.rank as i64), Cell::text(team.team.as_str())];
            row.extend(
                self.weeks
                    .iter()
                    .map(|w| Cell::opt_number(team.weeks.get(w).copied())),
            );
            row.push(Cell::Number(team.total));
            row.push(Cell::Number(team.avg_per_game));
            row.push(Cell::Number(team.median_per_game));
            table.rows.push(row);
        }
        table
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub(crate) fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}
