use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use sleeper_report::config::RecordRules;
use sleeper_report::dataset::LeagueDataset;
use sleeper_report::report::LeagueReport;

const TEAMS: u32 = 12;
const WEEKS: u32 = 17;

fn synthetic_league() -> LeagueDataset {
    let mut ds = LeagueDataset::new();
    for roster in 1..=TEAMS {
        let user = format!("u{roster}");
        let name = format!("Team Name {roster}");
        ds = ds
            .with_user(&user, Some(name.as_str()), None)
            .with_owner(roster, &user);
    }
    for week in 1..=WEEKS {
        for roster in 1..=TEAMS {
            // Rotate opponents each week; pairs share a matchup id.
            let slot = (roster + week) % TEAMS;
            let matchup_id = slot / 2 + 1;
            let points = 80.0 + f64::from((roster * 37 + week * 11) % 70);
            ds = ds.with_matchup(week, roster, Some(matchup_id), points);
        }
    }
    ds
}

fn league_json() -> String {
    let ds = synthetic_league();
    let matchups: serde_json::Map<String, serde_json::Value> = ds
        .matchups_by_week
        .iter()
        .map(|(week, entries)| {
            (
                week.to_string(),
                serde_json::to_value(entries).expect("entries serialize"),
            )
        })
        .collect();
    let users = serde_json::to_value(&ds.users).expect("users serialize");
    let owners: serde_json::Map<String, serde_json::Value> = ds
        .roster_owner
        .iter()
        .map(|(roster, user)| (roster.to_string(), serde_json::Value::from(user.as_str())))
        .collect();
    serde_json::json!({
        "matchups": matchups,
        "user_map": users,
        "roster_to_user_map": owners,
    })
    .to_string()
}

fn bench_dataset_parse(c: &mut Criterion) {
    let raw = league_json();
    c.bench_function("dataset_parse", |b| {
        b.iter(|| {
            let ds = LeagueDataset::from_json_str(black_box(&raw)).unwrap();
            black_box(ds.matchups_by_week.len());
        })
    });
}

fn bench_report_build(c: &mut Criterion) {
    let ds = synthetic_league();
    c.bench_function("report_build", |b| {
        b.iter(|| {
            let report = LeagueReport::build(black_box(&ds), RecordRules::default());
            black_box(report.standings.teams.len());
        })
    });
}

fn bench_report_tables(c: &mut Criterion) {
    let report = LeagueReport::build(&synthetic_league(), RecordRules::default());
    c.bench_function("report_tables", |b| {
        b.iter(|| {
            let tables = black_box(&report).tables();
            black_box(tables.len());
        })
    });
}

criterion_group!(
    benches,
    bench_dataset_parse,
    bench_report_build,
    bench_report_tables
);
criterion_main!(benches);
