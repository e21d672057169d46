use std::collections::{BTreeMap, BTreeSet};

use log::warn;

use crate::config::{LossRule, RecordRules, TieRule};
use crate::dataset::{LeagueDataset, MatchupEntry};
use crate::table::{Cell, Table, TeamRows, week_label};
use crate::team_names::TeamNames;

pub const SHEET_NAME: &str = "Raw Records";

#[derive(Debug, Clone, PartialEq)]
pub struct TeamRecord {
    pub team: String,
    /// 1 for a win, 0 for a loss; weeks without a decided matchup are absent.
    pub weeks: BTreeMap<u32, u8>,
    pub wins: u32,
    pub losses: u32,
}

/// A matchup group that was not exactly two entries and so produced no result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedMatchup {
    pub week: u32,
    pub matchup_id: u32,
    pub entries: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiedMatchup {
    pub week: u32,
    pub matchup_id: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawRecords {
    pub weeks: Vec<u32>,
    pub teams: Vec<TeamRecord>,
    pub skipped: Vec<SkippedMatchup>,
    pub ties: Vec<TiedMatchup>,
}

impl RawRecords {
    pub fn build(dataset: &LeagueDataset, names: &TeamNames, rules: RecordRules) -> Self {
        let mut builder = RawRecordsBuilder::new(names, rules);
        for (week, entries) in &dataset.matchups_by_week {
            builder.record_week(*week, entries);
        }
        builder.finish()
    }

    pub fn team(&self, team: &str) -> Option<&TeamRecord> {
        self.teams.iter().find(|t| t.team == team)
    }

    pub fn indicator(&self, team: &str, week: u32) -> Option<u8> {
        self.team(team).and_then(|t| t.weeks.get(&week).copied())
    }

    pub fn to_table(&self) -> Table {
        let mut header = vec!["Team".to_string(), "Wins".to_string(), "Losses".to_string()];
        header.extend(self.weeks.iter().map(|w| week_label(*w)));

        let mut table = Table::new(SHEET_NAME, header);
        for team in &self.teams {
            let mut row = vec![
                Cell::text(team.team.as_str()),
                Cell::Int(i64::from(team.wins)),
                Cell::Int(i64::from(team.losses)),
            ];
            row.extend(self.weeks.iter().map(|w| match team.weeks.get(w) {
                Some(v) => Cell::Int(i64::from(*v)),
                None => Cell::Empty,
            }));
            table.rows.push(row);
        }
        table
    }
}

pub struct RawRecordsBuilder<'a> {
    names: &'a TeamNames,
    rules: RecordRules,
    weeks: BTreeSet<u32>,
    rows: TeamRows<BTreeMap<u32, u8>>,
    skipped: Vec<SkippedMatchup>,
    ties: Vec<TiedMatchup>,
}

impl<'a> RawRecordsBuilder<'a> {
    pub fn new(names: &'a TeamNames, rules: RecordRules) -> Self {
        Self {
            names,
            rules,
            weeks: BTreeSet::new(),
            rows: TeamRows::new(),
            skipped: Vec::new(),
            ties: Vec::new(),
        }
    }

    pub fn record_week(&mut self, week: u32, entries: &[MatchupEntry]) {
        for (matchup_id, group) in group_by_matchup(entries) {
            let [first, second] = group.as_slice() else {
                warn!(
                    "week {week}: matchup {matchup_id} has {} entries, no result recorded",
                    group.len()
                );
                self.skipped.push(SkippedMatchup {
                    week,
                    matchup_id,
                    entries: group.len(),
                });
                continue;
            };

            let first_won = if first.points > second.points {
                true
            } else if first.points < second.points {
                false
            } else {
                self.ties.push(TiedMatchup { week, matchup_id });
                match self.rules.tie {
                    TieRule::SecondEntrant => {
                        warn!(
                            "week {week}: matchup {matchup_id} tied at {}, crediting roster {}",
                            first.points, second.roster_id
                        );
                        false
                    }
                    TieRule::Skip => {
                        warn!(
                            "week {week}: matchup {matchup_id} tied at {}, no result recorded",
                            first.points
                        );
                        continue;
                    }
                }
            };

            self.weeks.insert(week);
            // Encounter order, so a shared team name keeps the second entry's result.
            for (entry, won) in [(*first, first_won), (*second, !first_won)] {
                self.set(week, entry, u8::from(won));
            }
        }
    }

    fn set(&mut self, week: u32, entry: &MatchupEntry, value: u8) {
        let team = self.names.name(entry.roster_id);
        self.rows.entry(&team).insert(week, value);
    }

    pub fn finish(self) -> RawRecords {
        let week_columns = self.weeks.len() as u32;
        let loss_rule = self.rules.losses;
        let teams = self
            .rows
            .into_rows()
            .into_iter()
            .map(|(team, weeks)| {
                let wins: u32 = weeks.values().map(|v| u32::from(*v)).sum();
                let played = match loss_rule {
                    LossRule::RecordedWeeks => weeks.len() as u32,
                    LossRule::WeekColumns => week_columns,
                };
                TeamRecord {
                    team,
                    losses: played.saturating_sub(wins),
                    wins,
                    weeks,
                }
            })
            .collect();

        RawRecords {
            weeks: self.weeks.into_iter().collect(),
            teams,
            skipped: self.skipped,
            ties: self.ties,
        }
    }
}

/// Paired entries grouped by matchup id, groups in first-encounter order.
fn group_by_matchup(entries: &[MatchupEntry]) -> Vec<(u32, Vec<&MatchupEntry>)> {
    let mut groups: Vec<(u32, Vec<&MatchupEntry>)> = Vec::new();
    for entry in entries {
        let Some(id) = entry.paired_matchup_id() else {
            continue;
        };
        match groups.iter_mut().find(|(gid, _)| *gid == id) {
            Some((_, group)) => group.push(entry),
            None => groups.push((id, vec![entry])),
        }
    }
    groups
}
