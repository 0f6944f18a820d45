//! API-change impact analysis.
//!
//! Given a changed API or service identifier, find the screens that call it
//! directly and the screens that can navigate to those within a bounded
//! number of hops. Traversal runs breadth-first over the *reverse* of the
//! `next` graph ("who points at a direct dependent"), so each transitive
//! screen carries the shortest discovered path to its target.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use serde::{Deserialize, Serialize};

use super::{Screen, ScreenId, ScreenRegistry};

/// Default navigation-hop bound for transitive impact.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Per-call options for [`analyze_impact`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImpactOptions {
    /// Maximum navigation hops away from a direct dependent. Zero means
    /// direct dependents only.
    pub max_depth: usize,
}

impl Default for ImpactOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// One transitively impacted screen with its navigation path to the blast
/// zone: an ordered id list from this screen to the direct dependent it
/// reaches, inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitiveImpact {
    pub screen: Screen,
    pub path: Vec<ScreenId>,
}

/// Outcome of an impact-analysis pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactAnalysis {
    /// The API identifier that was queried.
    pub api: String,
    /// Screens whose `dependsOn` matches the API, in input order.
    pub direct: Vec<Screen>,
    /// Screens that can navigate to a direct dependent, in discovery order.
    pub transitive: Vec<TransitiveImpact>,
    pub total_count: usize,
}

/// Analyze which screens an API change reaches.
///
/// Direct dependents match `api_name` exactly or as a `prefix.` of a
/// `dependsOn` entry, so querying `"InvoiceAPI"` covers the whole
/// `InvoiceAPI.*` surface. Transitive dependents are found by multi-source
/// BFS from the direct set over reversed navigation edges, bounded by
/// `options.max_depth`; a visited set keyed by id keeps navigation loops from
/// looping the traversal and keeps direct dependents from being re-counted.
/// Pure and deterministic.
pub fn analyze_impact(screens: &[Screen], api_name: &str, options: &ImpactOptions) -> ImpactAnalysis {
    let index: HashMap<&str, usize> = screens
        .iter()
        .enumerate()
        .map(|(position, screen)| (screen.id.as_str(), position))
        .collect();

    let winning = |position: usize| index[screens[position].id.as_str()] == position;

    // Reverse adjacency: target -> declaring screens, both in input order.
    let mut inbound: HashMap<usize, Vec<usize>> = HashMap::default();
    for (position, screen) in screens.iter().enumerate() {
        if !winning(position) {
            continue;
        }
        for target in &screen.next {
            if let Some(&target_position) = index.get(target.as_str()) {
                inbound.entry(target_position).or_default().push(position);
            }
        }
    }

    let mut direct_positions: Vec<usize> = Vec::new();
    for (position, screen) in screens.iter().enumerate() {
        if winning(position) && screen.depends_on_api(api_name) {
            direct_positions.push(position);
        }
    }

    // BFS state: visited is pre-seeded with the direct set so a screen that
    // both calls the API and navigates into the blast zone is counted once.
    let mut visited: HashSet<usize> = direct_positions.iter().copied().collect();
    let mut queue: VecDeque<(usize, usize, Vec<ScreenId>)> = direct_positions
        .iter()
        .map(|&position| (position, 0, vec![screens[position].id.clone()]))
        .collect();

    let mut transitive: Vec<TransitiveImpact> = Vec::new();
    while let Some((position, depth, path)) = queue.pop_front() {
        if depth == options.max_depth {
            continue;
        }

        let Some(predecessors) = inbound.get(&position) else {
            continue;
        };

        for &predecessor in predecessors {
            if !visited.insert(predecessor) {
                continue;
            }

            let mut predecessor_path = Vec::with_capacity(path.len() + 1);
            predecessor_path.push(screens[predecessor].id.clone());
            predecessor_path.extend(path.iter().cloned());

            transitive.push(TransitiveImpact {
                screen: screens[predecessor].clone(),
                path: predecessor_path.clone(),
            });
            queue.push_back((predecessor, depth + 1, predecessor_path));
        }
    }

    let direct: Vec<Screen> = direct_positions
        .iter()
        .map(|&position| screens[position].clone())
        .collect();

    tracing::debug!(
        "impact of '{}': {} direct, {} transitive (max_depth {})",
        api_name,
        direct.len(),
        transitive.len(),
        options.max_depth
    );

    ImpactAnalysis {
        api: api_name.to_owned(),
        total_count: direct.len() + transitive.len(),
        direct,
        transitive,
    }
}

impl ScreenRegistry {
    /// Analyze API impact over the snapshot. See [`analyze_impact`].
    pub fn analyze_impact(&self, api_name: &str, options: &ImpactOptions) -> ImpactAnalysis {
        analyze_impact(self.screens(), api_name, options)
    }
}
