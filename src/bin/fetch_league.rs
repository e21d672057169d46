use std::path::PathBuf;

use anyhow::{Context, Result};
use log::LevelFilter;

use sleeper_report::args::{cli_args, flag_value};
use sleeper_report::config::FetchConfig;
use sleeper_report::sleeper_fetch;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(
            env_logger::Env::default().filter_or("SLEEPER_REPORT_LOG", "warn,sleeper_report=info"),
        )
        .init();

    let mut cfg = FetchConfig::from_env();
    let args = cli_args();
    if let Some(id) = flag_value(&args, "--league-id") {
        cfg.league_id = id;
    }
    if let Some(season) = flag_value(&args, "--season") {
        cfg.season = Some(season);
    }
    if let Some(raw) = flag_value(&args, "--weeks") {
        cfg.max_weeks = raw
            .parse::<u32>()
            .with_context(|| format!("--weeks expects a number, got {raw:?}"))?
            .clamp(1, 18);
    }
    if let Some(path) = flag_value(&args, "--out") {
        cfg.out_path = PathBuf::from(path);
    }

    println!("Fetching league {}...", cfg.league_id);
    let doc = sleeper_fetch::fetch_league_document(&cfg)?;
    sleeper_fetch::write_document(&cfg.out_path, &doc)?;

    println!("Data saved to {}", cfg.out_path.display());
    println!(
        "  - League: {}",
        doc.league_info.name.as_deref().unwrap_or("(unnamed)")
    );
    if let Some(season) = doc.league_info.season.as_deref() {
        println!("  - Season: {season}");
    }
    println!("  - Teams: {}", doc.users.len());
    println!("  - Weeks: {}", doc.matchups.len());

    Ok(())
}
