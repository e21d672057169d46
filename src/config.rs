use std::env;
use std::path::PathBuf;

use log::warn;

const DEFAULT_LEAGUE_ID: &str = "1227033344391254016";
const DEFAULT_BASE_URL: &str = "https://api.sleeper.app/v1";
const DEFAULT_MAX_WEEKS: u32 = 14;
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_DATA_PATH: &str = "league_data.json";
const DEFAULT_REPORT_PATH: &str = "fantasy_analysis.xlsx";

/// What to do when both sides of a matchup score exactly the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieRule {
    /// The entry encountered second is credited with the win. Matches
    /// reports generated before tie handling was configurable.
    #[default]
    SecondEntrant,
    /// Neither team gets an indicator for that week.
    Skip,
}

impl TieRule {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "second" | "second_entrant" | "legacy" => Some(Self::SecondEntrant),
            "skip" | "none" => Some(Self::Skip),
            _ => None,
        }
    }
}

/// How the Losses column is derived from the weekly indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LossRule {
    /// Weeks with a recorded indicator for the team, minus Wins.
    #[default]
    RecordedWeeks,
    /// Week columns in the whole table, minus Wins. Over-counts losses
    /// for teams that have gaps.
    WeekColumns,
}

impl LossRule {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "recorded" | "recorded_weeks" => Some(Self::RecordedWeeks),
            "columns" | "week_columns" | "legacy" => Some(Self::WeekColumns),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordRules {
    pub tie: TieRule,
    pub losses: LossRule,
}

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub data_path: PathBuf,
    pub report_path: PathBuf,
    pub rules: RecordRules,
}

impl ReportConfig {
    pub fn from_env() -> Self {
        let tie = rule_or_default(
            "REPORT_TIE_RULE",
            env_string("REPORT_TIE_RULE"),
            TieRule::parse,
        );
        let losses = rule_or_default(
            "REPORT_LOSS_RULE",
            env_string("REPORT_LOSS_RULE"),
            LossRule::parse,
        );

        Self {
            data_path: env_string("LEAGUE_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)),
            report_path: env_string("REPORT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_PATH)),
            rules: RecordRules { tie, losses },
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub league_id: String,
    pub base_url: String,
    pub max_weeks: u32,
    pub season: Option<String>,
    pub timeout_secs: u64,
    pub out_path: PathBuf,
}

impl FetchConfig {
    pub fn from_env() -> Self {
        let max_weeks = env_string("SLEEPER_MAX_WEEKS")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_WEEKS)
            .clamp(1, 18);
        let timeout_secs = env_string("HTTP_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .clamp(1, 120);

        Self {
            league_id: env_string("SLEEPER_LEAGUE_ID")
                .unwrap_or_else(|| DEFAULT_LEAGUE_ID.to_string()),
            base_url: env_string("SLEEPER_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            max_weeks,
            season: env_string("SLEEPER_SEASON"),
            timeout_secs,
            out_path: env_string("LEAGUE_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)),
        }
    }
}

/// Parsed rule, or the default when unset. Unrecognised values are logged
/// and fall back to the default.
fn rule_or_default<T>(key: &str, raw: Option<String>, parse: fn(&str) -> Option<T>) -> T
where
    T: Default + std::fmt::Debug,
{
    let Some(raw) = raw else {
        return T::default();
    };
    parse(&raw).unwrap_or_else(|| {
        let fallback = T::default();
        warn!("{key}={raw:?} not recognised, using {fallback:?}");
        fallback
    })
}

fn env_string(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tie_rule_accepts_aliases() {
        assert_eq!(TieRule::parse("Second"), Some(TieRule::SecondEntrant));
        assert_eq!(TieRule::parse(" skip "), Some(TieRule::Skip));
        assert_eq!(TieRule::parse("coin-flip"), None);
    }

    #[test]
    fn loss_rule_accepts_aliases() {
        assert_eq!(LossRule::parse("recorded"), Some(LossRule::RecordedWeeks));
        assert_eq!(LossRule::parse("LEGACY"), Some(LossRule::WeekColumns));
        assert_eq!(LossRule::parse(""), None);
    }

    #[test]
    fn unrecognised_rule_falls_back_to_default() {
        let tie = rule_or_default("REPORT_TIE_RULE", Some("coin-flip".into()), TieRule::parse);
        assert_eq!(tie, TieRule::SecondEntrant);
        let losses = rule_or_default("REPORT_LOSS_RULE", Some("columns".into()), LossRule::parse);
        assert_eq!(losses, LossRule::WeekColumns);
        let unset = rule_or_default("REPORT_TIE_RULE", None, TieRule::parse);
        assert_eq!(unset, TieRule::SecondEntrant);
    }

    #[test]
    fn default_rules_keep_legacy_ties_and_recorded_losses() {
        let rules = RecordRules::default();
        assert_eq!(rules.tie, TieRule::SecondEntrant);
        assert_eq!(rules.losses, LossRule::RecordedWeeks);
    }
}
