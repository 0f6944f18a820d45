//! Catalog statistics snapshot for dashboards.

use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use serde::{Deserialize, Serialize};

use super::{Screen, ScreenId, ScreenRegistry};

/// Read-only aggregate over one catalog snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStatistics {
    /// Records in the snapshot (counting shadowed duplicates).
    pub screen_count: usize,
    /// Declared `next` edges, resolved or not.
    pub nav_edge_count: usize,
    /// Declared `next` edges whose target id does not exist.
    pub unresolved_edge_count: usize,
    /// Distinct `dependsOn` identifiers across the catalog.
    pub api_dependency_count: usize,
    /// Screens nothing navigates to: no declared `entryPoints` and no
    /// resolved inbound `next` edge from a different screen (a self-loop
    /// does not count as inbound).
    pub orphans: Vec<ScreenId>,
    /// Screens with no owning team.
    pub unowned_count: usize,
}

/// Compute the statistics snapshot.
pub fn statistics(screens: &[Screen]) -> CatalogStatistics {
    let index: HashMap<&str, usize> = screens
        .iter()
        .enumerate()
        .map(|(position, screen)| (screen.id.as_str(), position))
        .collect();

    let winning = |position: usize| index[screens[position].id.as_str()] == position;

    let mut nav_edge_count = 0;
    let mut unresolved_edge_count = 0;
    let mut has_inbound: HashSet<usize> = HashSet::default();
    let mut apis: HashSet<&str> = HashSet::default();

    for (position, screen) in screens.iter().enumerate() {
        for api in &screen.depends_on {
            apis.insert(api.as_str());
        }

        if !winning(position) {
            continue;
        }

        for target in &screen.next {
            nav_edge_count += 1;
            match index.get(target.as_str()) {
                Some(&target_position) if target_position != position => {
                    has_inbound.insert(target_position);
                }
                Some(_) => {} // self-loop
                None => unresolved_edge_count += 1,
            }
        }
    }

    let orphans: Vec<ScreenId> = screens
        .iter()
        .enumerate()
        .filter(|&(position, screen)| {
            winning(position) && screen.entry_points.is_empty() && !has_inbound.contains(&position)
        })
        .map(|(_, screen)| screen.id.clone())
        .collect();

    let unowned_count = screens
        .iter()
        .filter(|screen| screen.owner.is_empty())
        .count();

    CatalogStatistics {
        screen_count: screens.len(),
        nav_edge_count,
        unresolved_edge_count,
        api_dependency_count: apis.len(),
        orphans,
        unowned_count,
    }
}

impl ScreenRegistry {
    /// Compute statistics snapshot for dashboards. See [`statistics`].
    pub fn statistics(&self) -> CatalogStatistics {
        statistics(self.screens())
    }
}
