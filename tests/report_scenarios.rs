use std::fs;
use std::path::PathBuf;

use sleeper_report::config::{LossRule, RecordRules, TieRule};
use sleeper_report::dataset::LeagueDataset;
use sleeper_report::report::LeagueReport;
use sleeper_report::table::Cell;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn report(name: &str, rules: RecordRules) -> (LeagueDataset, LeagueReport) {
    let dataset = LeagueDataset::from_json_str(&read_fixture(name)).expect("fixture should parse");
    let report = LeagueReport::build(&dataset, rules);
    (dataset, report)
}

#[test]
fn two_team_round_trip() {
    let (_, report) = report("two_team_season.json", RecordRules::default());

    let a = report.raw_records.team("Team A").expect("team A");
    assert_eq!((a.wins, a.losses), (1, 1));
    assert_eq!(a.weeks.get(&1), Some(&1));
    let b = report.raw_records.team("Team B").expect("team B");
    assert_eq!((b.wins, b.losses), (1, 1));

    assert_eq!(report.scores.team("Team A").expect("A").total, 190.0);
    assert_eq!(report.scores.team("Team B").expect("B").total, 205.0);

    let order: Vec<&str> = report.standings.teams.iter().map(|s| s.team.as_str()).collect();
    assert_eq!(order, vec!["Team B", "Team A"]);
    assert_eq!(report.standings.teams[0].rank, 1);
}

#[test]
fn raw_scores_match_source_points() {
    let (dataset, report) = report("six_team_season.json", RecordRules::default());
    let names = sleeper_report::team_names::TeamNames::for_dataset(&dataset);

    for (week, entries) in &dataset.matchups_by_week {
        for entry in entries {
            let team = names.name(entry.roster_id);
            assert_eq!(
                report.raw_scores.points(&team, *week),
                Some(entry.points),
                "{team} week {week}"
            );
        }
    }
}

#[test]
fn decided_matchups_have_exactly_one_winner() {
    let (dataset, report) = report("six_team_season.json", RecordRules::default());
    let names = sleeper_report::team_names::TeamNames::for_dataset(&dataset);

    for (week, entries) in &dataset.matchups_by_week {
        let mut ids: Vec<u32> = entries.iter().filter_map(|e| e.paired_matchup_id()).collect();
        ids.sort_unstable();
        ids.dedup();
        for id in ids {
            let group: Vec<_> = entries
                .iter()
                .filter(|e| e.paired_matchup_id() == Some(id))
                .collect();
            if group.len() != 2 {
                continue;
            }
            let sum: u8 = group
                .iter()
                .map(|e| {
                    report
                        .raw_records
                        .indicator(&names.name(e.roster_id), *week)
                        .expect("indicator recorded")
                })
                .sum();
            assert_eq!(sum, 1, "week {week} matchup {id}");
        }
    }
}

#[test]
fn wins_and_totals_agree_with_weekly_cells() {
    let (_, report) = report("six_team_season.json", RecordRules::default());

    for team in &report.raw_records.teams {
        let wins: u32 = team.weeks.values().map(|v| u32::from(*v)).sum();
        assert_eq!(wins, team.wins, "{}", team.team);
    }
    for team in &report.scores.teams {
        let raw = report.raw_scores.team(&team.team).expect("raw row");
        let total: f64 = raw.weeks.values().sum();
        assert!((total - team.total).abs() < 1e-9, "{}", team.team);
    }
}

#[test]
fn six_team_standings_order_wins_first() {
    let (_, report) = report("six_team_season.json", RecordRules::default());

    let order: Vec<(&str, u32, u32)> = report
        .standings
        .teams
        .iter()
        .map(|s| (s.team.as_str(), s.wins, s.losses))
        .collect();
    assert_eq!(
        order,
        vec![
            ("Gridiron Gurus", 2, 1),
            ("blitz_brigade", 2, 1),
            ("Team 6", 2, 1),
            ("Fourth and Long", 1, 2),
            ("End Zone Elite", 1, 1),
            ("punt_return", 0, 2),
        ]
    );

    for pair in report.standings.teams.windows(2) {
        assert!(pair[0].standing_value >= pair[1].standing_value);
        assert!(pair[0].wins >= pair[1].wins);
    }

    assert_eq!(report.raw_records.skipped.len(), 1);
    assert_eq!(report.raw_records.skipped[0].week, 3);
    assert_eq!(report.raw_records.ties.len(), 1);
}

#[test]
fn scores_rank_by_total() {
    let (_, report) = report("six_team_season.json", RecordRules::default());
    let order: Vec<&str> = report.scores.teams.iter().map(|t| t.team.as_str()).collect();
    assert_eq!(
        order,
        vec![
            "Fourth and Long",
            "Gridiron Gurus",
            "blitz_brigade",
            "End Zone Elite",
            "Team 6",
            "punt_return",
        ]
    );
}

#[test]
fn legacy_loss_rule_counts_every_week_column() {
    let rules = RecordRules {
        losses: LossRule::WeekColumns,
        ..RecordRules::default()
    };
    let (_, report) = report("six_team_season.json", rules);
    let elite = report.raw_records.team("End Zone Elite").expect("elite");
    assert_eq!((elite.wins, elite.losses), (1, 2));
}

#[test]
fn skipped_ties_leave_both_teams_without_a_result() {
    let rules = RecordRules {
        tie: TieRule::Skip,
        ..RecordRules::default()
    };
    let (_, report) = report("six_team_season.json", rules);
    assert_eq!(report.raw_records.indicator("Fourth and Long", 2), None);
    assert_eq!(report.raw_records.indicator("Team 6", 2), None);
    let six = report.raw_records.team("Team 6").expect("team 6");
    assert_eq!((six.wins, six.losses), (1, 1));
}

#[test]
fn duplicate_display_names_overwrite_each_other() {
    let dataset = LeagueDataset::new()
        .with_user("u1", Some("Twins"), None)
        .with_user("u2", Some("Twins"), None)
        .with_owner(1, "u1")
        .with_owner(2, "u2")
        .with_matchup(1, 1, Some(1), 100.0)
        .with_matchup(1, 2, Some(1), 80.0);
    let report = LeagueReport::build(&dataset, RecordRules::default());

    // Last write wins: both rosters collapse into one row holding roster 2's values.
    assert_eq!(report.raw_scores.teams.len(), 1);
    assert_eq!(report.raw_scores.points("Twins", 1), Some(80.0));
    assert_eq!(report.raw_records.indicator("Twins", 1), Some(0));
    assert_eq!(report.standings.teams.len(), 1);
}

#[test]
fn tables_are_named_and_ordered_for_export() {
    let (_, report) = report("two_team_season.json", RecordRules::default());
    let tables = report.tables();
    let names: Vec<&str> = tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Raw Scores",
            "Raw Records",
            "Scores",
            "Standings",
            "Play Everyone",
            "Vs Median"
        ]
    );

    let standings = &tables[3];
    assert_eq!(
        standings.header,
        vec!["Standings", "Team", "Wins", "Losses", "Total", "Standing Value"]
    );
    assert_eq!(standings.rows[0][0], Cell::Int(1));
    assert_eq!(standings.rows[0][1], Cell::text("Team B"));
    assert_eq!(standings.rows[0][4], Cell::Number(205.0));

    let raw = &tables[0];
    assert_eq!(raw.header, vec!["Team", "Week 1", "Week 2"]);
}

#[test]
fn all_play_ignores_equal_scores() {
    let (_, report) = report("six_team_season.json", RecordRules::default());

    // Fourth and Long and Team 6 both score 99.0 in week 2.
    let fourth = report.play_everyone.team("Fourth and Long").expect("fourth");
    assert_eq!(fourth.weeks.get(&2), Some(&1));
    assert_eq!((fourth.all_play_wins, fourth.all_play_losses), (10, 4));
    assert_eq!((fourth.wins, fourth.losses), (1, 2));
    assert!((fourth.difference + 1.0).abs() < 1e-9);

    let t6 = report.play_everyone.team("Team 6").expect("team 6");
    assert_eq!((t6.all_play_wins, t6.all_play_losses), (3, 11));
    assert_eq!(report.play_everyone.teams[0].team, "Gridiron Gurus");
}

#[test]
fn vs_median_covers_every_team_and_week() {
    let (_, report) = report("six_team_season.json", RecordRules::default());
    let vm = &report.vs_median;

    assert_eq!(vm.weekly_medians.get(&1), Some(&99.625));
    assert_eq!(vm.weekly_medians.get(&3), Some(&106.0));
    assert_eq!(vm.teams.len(), 6);
    for team in &vm.teams {
        assert_eq!(team.weeks.len(), 3, "{}", team.team);
    }
    // Highest and lowest season totals.
    assert!(vm.gap("Fourth and Long", 3).expect("gap") > 0.0);
    assert!(vm.gap("punt_return", 3).expect("gap") < 0.0);
}
