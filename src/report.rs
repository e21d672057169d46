use log::info;

use crate::config::RecordRules;
use crate::dataset::LeagueDataset;
use crate::play_everyone::PlayEveryone;
use crate::raw_records::RawRecords;
use crate::raw_scores::RawScores;
use crate::scores_summary::ScoresSummary;
use crate::standings::Standings;
use crate::table::Table;
use crate::team_names::TeamNames;
use crate::vs_median::VsMedian;

/// All derived tables for one season, built fresh from a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct LeagueReport {
    pub raw_scores: RawScores,
    pub raw_records: RawRecords,
    pub scores: ScoresSummary,
    pub standings: Standings,
    pub play_everyone: PlayEveryone,
    pub vs_median: VsMedian,
}

impl LeagueReport {
    pub fn build(dataset: &LeagueDataset, rules: RecordRules) -> Self {
        let names = TeamNames::for_dataset(dataset);
        let raw_scores = RawScores::build(dataset, &names);
        let raw_records = RawRecords::build(dataset, &names, rules);
        let scores = ScoresSummary::build(&raw_scores);
        let standings = Standings::build(&raw_records, &scores);
        let play_everyone = PlayEveryone::build(&raw_scores, &raw_records);
        let vs_median = VsMedian::build(&raw_scores);

        info!(
            "built report: {} teams, {} weeks, {} skipped matchups, {} ties",
            raw_scores.teams.len(),
            raw_scores.weeks.len(),
            raw_records.skipped.len(),
            raw_records.ties.len()
        );

        Self {
            raw_scores,
            raw_records,
            scores,
            standings,
            play_everyone,
            vs_median,
        }
    }

    /// Tables in sheet order: Raw Scores, Raw Records, Scores, Standings,
    /// Play Everyone, Vs Median.
    pub fn tables(&self) -> Vec<Table> {
        vec![
            self.raw_scores.to_table(),
            self.raw_records.to_table(),
            self.scores.to_table(),
            self.standings.to_table(),
            self.play_everyone.to_table(),
            self.vs_median.to_table(),
        ]
    }
}
