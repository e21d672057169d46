use std::collections::HashMap;

use log::debug;

use crate::dataset::LeagueDataset;

/// Display name for a roster: owner's display name, then username, then
/// a `Team {id}` placeholder. Never fails.
pub fn resolve_team_name(roster_id: u32, dataset: &LeagueDataset) -> String {
    let user = dataset
        .roster_owner
        .get(&roster_id)
        .and_then(|user_id| dataset.users.get(user_id));

    let name = user.and_then(|u| {
        non_blank(u.display_name.as_deref()).or_else(|| non_blank(u.username.as_deref()))
    });

    match name {
        Some(name) => name.to_string(),
        None => {
            debug!("roster {roster_id} has no resolvable owner name");
            placeholder_name(roster_id)
        }
    }
}

pub fn placeholder_name(roster_id: u32) -> String {
    format!("Team {roster_id}")
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// Names for every roster that appears in the dataset's matchups, resolved
/// once up front.
#[derive(Debug, Clone, Default)]
pub struct TeamNames {
    names: HashMap<u32, String>,
}

impl TeamNames {
    pub fn for_dataset(dataset: &LeagueDataset) -> Self {
        let mut names = HashMap::new();
        for entry in dataset.matchups_by_week.values().flatten() {
            names
                .entry(entry.roster_id)
                .or_insert_with(|| resolve_team_name(entry.roster_id, dataset));
        }
        Self { names }
    }

    pub fn name(&self, roster_id: u32) -> String {
        self.names
            .get(&roster_id)
            .cloned()
            .unwrap_or_else(|| placeholder_name(roster_id))
    }
}
