use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::raw_records::RawRecords;
use crate::raw_scores::RawScores;
use crate::table::{Cell, Table, week_label};

pub const SHEET_NAME: &str = "Play Everyone";

/// A team's record had it played every other team every week.
#[derive(Debug, Clone, PartialEq)]
pub struct AllPlayRecord {
    pub team: String,
    /// All-play wins by week, for weeks the team has a score.
    pub weeks: BTreeMap<u32, u32>,
    pub all_play_wins: u32,
    pub all_play_losses: u32,
    pub all_play_pct: f64,
    pub wins: u32,
    pub losses: u32,
    /// Sum over weeks of all-play wins divided by opponents that week.
    pub expected_wins: f64,
    /// Actual wins minus expected wins. Positive means a lucky schedule.
    pub difference: f64,
}

/// All-play records, best all-play win percentage first.
///
/// Each week a team is compared with every other team that scored that week.
/// Equal scores count as neither a win nor a loss.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayEveryone {
    pub weeks: Vec<u32>,
    pub teams: Vec<AllPlayRecord>,
}

impl PlayEveryone {
    pub fn build(scores: &RawScores, records: &RawRecords) -> Self {
        let mut teams: Vec<AllPlayRecord> = scores
            .teams
            .iter()
            .map(|team| {
                let mut weeks = BTreeMap::new();
                let (mut wins, mut losses) = (0u32, 0u32);
                let mut expected = 0.0;

                for (week, points) in &team.weeks {
                    let (mut week_wins, mut opponents) = (0u32, 0u32);
                    for other in scores.teams.iter().filter(|o| o.team != team.team) {
                        let Some(theirs) = other.weeks.get(week) else {
                            continue;
                        };
                        opponents += 1;
                        match points.partial_cmp(theirs) {
                            Some(Ordering::Greater) => week_wins += 1,
                            Some(Ordering::Less) => losses += 1,
                            _ => {}
                        }
                    }
                    wins += week_wins;
                    if opponents > 0 {
                        expected += f64::from(week_wins) / f64::from(opponents);
                    }
                    weeks.insert(*week, week_wins);
                }

                let (actual_wins, actual_losses) = records
                    .team(&team.team)
                    .map(|r| (r.wins, r.losses))
                    .unwrap_or((0, 0));
                let decided = wins + losses;
                AllPlayRecord {
                    team: team.team.clone(),
                    weeks,
                    all_play_wins: wins,
                    all_play_losses: losses,
                    all_play_pct: if decided > 0 {
                        f64::from(wins) / f64::from(decided)
                    } else {
                        0.0
                    },
                    wins: actual_wins,
                    losses: actual_losses,
                    expected_wins: expected,
                    difference: f64::from(actual_wins) - expected,
                }
            })
            .collect();

        // Stable: equal percentages keep their raw-scores order.
        teams.sort_by(|a, b| {
            b.all_play_pct
                .partial_cmp(&a.all_play_pct)
                .unwrap_or(Ordering::Equal)
        });

        Self {
            weeks: scores.weeks.clone(),
            teams,
        }
    }

    pub fn team(&self, team: &str) -> Option<&AllPlayRecord> {
        self.teams.iter().find(|t| t.team == team)
    }

    pub fn to_table(&self) -> Table {
        let mut header = vec!["Team".to_string()];
        header.extend(self.weeks.iter().map(|w| week_label(*w)));
        header.extend(
            [
                "All-Play Wins",
                "All-Play Losses",
                "All-Play Pct",
                "Wins",
                "Losses",
                "Expected Wins",
                "Difference",
            ]
            .map(String::from),
        );

        let mut table = Table::new(SHEET_NAME, header);
        for team in &self.teams {
            let mut row = vec![Cell::text(team.team.as_str())];
            row.extend(self.weeks.iter().map(|w| match team.weeks.get(w) {
                Some(v) => Cell::Int(i64::from(*v)),
                None => Cell::Empty,
            }));
            row.push(Cell::Int(i64::from(team.all_play_wins)));
            row.push(Cell::Int(i64::from(team.all_play_losses)));
            row.push(Cell::Number(team.all_play_pct));
            row.push(Cell::Int(i64::from(team.wins)));
            row.push(Cell::Int(i64::from(team.losses)));
            row.push(Cell::Number(team.expected_wins));
            row.push(Cell::Number(team.difference));
            table.rows.push(row);
        }
        table
    }
}
