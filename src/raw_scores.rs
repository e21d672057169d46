use std::collections::{BTreeMap, BTreeSet};

use crate::dataset::{LeagueDataset, MatchupEntry};
use crate::table::{Cell, Table, TeamRows, week_label};
use crate::team_names::TeamNames;

pub const SHEET_NAME: &str = "Raw Scores";

#[derive(Debug, Clone, PartialEq)]
pub struct TeamScores {
    pub team: String,
    /// Points by week. Weeks the team did not play are absent, not zero.
    pub weeks: BTreeMap<u32, f64>,
}

/// Points per team per week. Rows are in first-encounter order, week
/// columns ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct RawScores {
    pub weeks: Vec<u32>,
    pub teams: Vec<TeamScores>,
}

impl RawScores {
    pub fn build(dataset: &LeagueDataset, names: &TeamNames) -> Self {
        let mut builder = RawScoresBuilder::new(names);
        for (week, entries) in &dataset.matchups_by_week {
            for entry in entries {
                builder.record(*week, entry);
            }
        }
        builder.finish()
    }

    pub fn points(&self, team: &str, week: u32) -> Option<f64> {
        self.team(team).and_then(|t| t.weeks.get(&week).copied())
    }

    pub fn team(&self, team: &str) -> Option<&TeamScores> {
        self.teams.iter().find(|t| t.team == team)
    }

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
        table
    }
}

pub struct RawScoresBuilder<'a> {
    names: &'a TeamNames,
    weeks: BTreeSet<u32>,
    rows: TeamRows<BTreeMap<u32, f64>>,
}

impl<'a> RawScoresBuilder<'a> {
    pub fn new(names: &'a TeamNames) -> Self {
        Self {
            names,
            weeks: BTreeSet::new(),
            rows: TeamRows::new(),
        }
    }

    /// Two rosters that resolve to the same name share a row; the later
    /// entry in a week overwrites the earlier one.
    pub fn record(&mut self, week: u32, entry: &MatchupEntry) {
        let team = self.names.name(entry.roster_id);
        self.weeks.insert(week);
        self.rows.entry(&team).insert(week, entry.points);
    }

    pub fn finish(self) -> RawScores {
        RawScores {
            weeks: self.weeks.into_iter().collect(),
            teams: self
                .rows
                .into_rows()
                .into_iter()
                .map(|(team, weeks)| TeamScores { team, weeks })
                .collect(),
        }
    }
}
