use std::cmp::Ordering;

use crate::raw_records::RawRecords;
use crate::scores_summary::ScoresSummary;
use crate::table::{Cell, Table};

pub const SHEET_NAME: &str = "Standings";

/// Keeps the points term strictly below one full win.
pub const POINTS_WEIGHT: f64 = 0.999999;

#[derive(Debug, Clone, PartialEq)]
pub struct Standing {
    pub rank: usize,
    pub team: String,
    pub wins: u32,
    pub losses: u32,
    pub total: f64,
    pub standing_value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Standings {
    pub teams: Vec<Standing>,
}

impl Standings {
    /// Joins records with scoring totals by team name. Teams present in only
    /// one of the two inputs are left out.
    pub fn build(records: &RawRecords, summary: &ScoresSummary) -> Self {
        let joined: Vec<(&str, u32, u32, f64)> = records
            .teams
            .iter()
            .filter_map(|r| {
                summary
                    .team(&r.team)
                    .map(|s| (r.team.as_str(), r.wins, r.losses, s.total))
            })
            .collect();

        let max_total = joined
            .iter()
            .map(|(.., total)| *total)
            .reduce(f64::max)
            .unwrap_or(0.0);

        let mut teams: Vec<Standing> = joined
            .into_iter()
            .map(|(team, wins, losses, total)| Standing {
                rank: 0,
                team: team.to_string(),
                wins,
                losses,
                total,
                standing_value: standing_value(wins, total, max_total),
            })
            .collect();

        teams.sort_by(|a, b| {
            b.standing_value
                .partial_cmp(&a.standing_value)
                .unwrap_or(Ordering::Equal)
        });
        for (idx, team) in teams.iter_mut().enumerate() {
            team.rank = idx + 1;
        }

        Self { teams }
    }

    pub fn team(&self, team: &str) -> Option<&Standing> {
        self.teams.iter().find(|t| t.team == team)
    }

    pub fn to_table(&self) -> Table {
        let header = ["Standings", "Team", "Wins", "Losses", "Total", "Standing Value"]
            .map(String::from)
            .to_vec();
        let mut table = Table::new(SHEET_NAME, header);
        for s in &self.teams {
            table.rows.push(vec![
                Cell::Int(s.rank as i64),
                Cell::text(s.team.as_str()),
                Cell::Int(i64::from(s.wins)),
                Cell::Int(i64::from(s.losses)),
                Cell::Number(s.total),
                Cell::Number(s.standing_value),
            ]);
        }
        table
    }
}

/// `wins + (total / max_total) * POINTS_WEIGHT`. A non-positive maximum
/// leaves only the wins.
pub fn standing_value(wins: u32, total: f64, max_total: f64) -> f64 {
    let points_term = if max_total > 0.0 {
        (total / max_total) * POINTS_WEIGHT
    } else {
        0.0
    };
    f64::from(wins) + points_term
}
