pub mod args;
pub mod config;
pub mod dataset;
pub mod http_client;
pub mod play_everyone;
pub mod raw_records;
pub mod raw_scores;
pub mod report;
pub mod report_export;
pub mod scores_summary;
pub mod sleeper_fetch;
pub mod standings;
pub mod table;
pub mod team_names;
pub mod vs_median;
