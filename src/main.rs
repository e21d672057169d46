use std::path::PathBuf;

use anyhow::{Context, Result};
use log::LevelFilter;

use sleeper_report::args::{cli_args, flag_value};
use sleeper_report::config::ReportConfig;
use sleeper_report::dataset::LeagueDataset;
use sleeper_report::report::LeagueReport;
use sleeper_report::report_export::export_tables;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(
            env_logger::Env::default().filter_or("SLEEPER_REPORT_LOG", "warn,sleeper_report=info"),
        )
        .init();

    let mut cfg = ReportConfig::from_env();
    let args = cli_args();
    if let Some(path) = flag_value(&args, "--data") {
        cfg.data_path = PathBuf::from(path);
    }
    if let Some(path) = flag_value(&args, "--out") {
        cfg.report_path = PathBuf::from(path);
    }

    println!("Loading data...");
    let dataset = LeagueDataset::load(&cfg.data_path)
        .with_context(|| format!("unable to load {}", cfg.data_path.display()))?;

    println!("Analyzing data...");
    let report = LeagueReport::build(&dataset, cfg.rules);
    let tables = report.tables();

    println!("Saving to Excel...");
    let summary = export_tables(&cfg.report_path, &tables)?;

    println!();
    println!("Analysis saved to {}", cfg.report_path.display());
    println!("Sheets: {} ({} rows)", summary.sheets.join(", "), summary.rows);
    if !report.raw_records.skipped.is_empty() {
        println!(
            "Skipped matchups: {} (not exactly two entries)",
            report.raw_records.skipped.len()
        );
    }
    if !report.raw_records.ties.is_empty() {
        println!(
            "Tied matchups: {} (rule: {:?})",
            report.raw_records.ties.len(),
            cfg.rules.tie
        );
    }
    println!();
    println!("Standings:");
    print!("{}", report.standings.to_table().to_text());

    Ok(())
}
