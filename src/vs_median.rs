use std::collections::BTreeMap;

use crate::raw_scores::RawScores;
use crate::scores_summary::median;
use crate::table::{Cell, Table, week_label};

pub const SHEET_NAME: &str = "Vs Median";
pub const MEDIAN_ROW: &str = "League Median";

#[derive(Debug, Clone, PartialEq)]
pub struct MedianGap {
    pub team: String,
    /// Season-to-date points minus the median season-to-date points, by week.
    pub weeks: BTreeMap<u32, f64>,
}

/// Weekly league median and each team's running distance from it.
///
/// The weekly median only uses teams with a score that week. Running totals
/// carry over weeks a team did not score.
#[derive(Debug, Clone, PartialEq)]
pub struct VsMedian {
    pub weeks: Vec<u32>,
    pub weekly_medians: BTreeMap<u32, f64>,
    pub teams: Vec<MedianGap>,
}

impl VsMedian {
    pub fn build(scores: &RawScores) -> Self {
        let weekly_medians = scores
            .weeks
            .iter()
            .filter_map(|week| {
                let points: Vec<f64> = scores
                    .teams
                    .iter()
                    .filter_map(|t| t.weeks.get(week).copied())
                    .collect();
                median(&points).map(|m| (*week, m))
            })
            .collect();

        let mut running = vec![0.0; scores.teams.len()];
        let mut teams: Vec<MedianGap> = scores
            .teams
            .iter()
            .map(|t| MedianGap {
                team: t.team.clone(),
                weeks: BTreeMap::new(),
            })
            .collect();

        for week in &scores.weeks {
            for (total, team) in running.iter_mut().zip(&scores.teams) {
                *total += team.weeks.get(week).copied().unwrap_or(0.0);
            }
            let Some(mid) = median(&running) else {
                continue;
            };
            for (gap, total) in teams.iter_mut().zip(&running) {
                gap.weeks.insert(*week, total - mid);
            }
        }

        Self {
            weeks: scores.weeks.clone(),
            weekly_medians,
            teams,
        }
    }

    pub fn team(&self, team: &str) -> Option<&MedianGap> {
        self.teams.iter().find(|t| t.team == team)
    }

    pub fn gap(&self, team: &str, week: u32) -> Option<f64> {
        self.team(team).and_then(|t| t.weeks.get(&week).copied())
    }

    /// Team rows first, then the weekly medians under [`MEDIAN_ROW`].
    pub fn to_table(&self) -> Table {
        let mut header = vec!["Team".to_string()];
        header.extend(self.weeks.iter().map(|w| week_label(*w)));

        let mut table = Table::new(SHEET_NAME, header);
        for team in &self.teams {
            let mut row = vec![Cell::text(team.team.as_str())];
            row.extend(
                self.weeks
                    .iter()
                    .map(|w| Cell::opt_number(team.weeks.get(w).copied())),
            );
            table.rows.push(row);
        }

        let mut medians = vec![Cell::text(MEDIAN_ROW)];
        medians.extend(
            self.weeks
                .iter()
                .map(|w| Cell::opt_number(self.weekly_medians.get(w).copied())),
        );
        table.rows.push(medians);
        table
    }
}
