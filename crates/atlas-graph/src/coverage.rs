//! Adoption coverage accounting.
//!
//! Compares the declared catalog against the route files that exist in the
//! codebase: a route file counts as covered when some screen's originating
//! metadata file lives in the same directory. Route listings come from the
//! excluded scanner layer; this module only does the bookkeeping.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use path_clean::PathClean;
use serde::{Deserialize, Serialize};

use super::{Screen, ScreenRegistry};

/// Bucket for screens that declare no owner.
pub const UNASSIGNED_OWNER: &str = "unassigned";

/// Suggested metadata file extension for uncovered routes.
const SUGGESTED_EXTENSION: &str = "screens.ts";

/// One route file without screen metadata next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageGap {
    pub route: PathBuf,
    /// Sibling metadata path a team could add to close the gap.
    pub suggested_path: PathBuf,
}

/// Coverage snapshot for one catalog run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageData {
    pub total: usize,
    pub covered: usize,
    /// Rounded to the nearest integer; an empty denominator reads as fully
    /// covered (100).
    pub percentage: u32,
    pub missing: Vec<CoverageGap>,
    /// Screen counts per owning team; multi-owner screens count once per
    /// owner, ownerless screens under [`UNASSIGNED_OWNER`]. BTreeMap keeps
    /// serialization deterministic.
    pub by_owner: BTreeMap<String, usize>,
    pub by_tag: BTreeMap<String, usize>,
    pub timestamp: DateTime<Utc>,
}

/// Compute adoption coverage for the snapshot.
///
/// With route files supplied, coverage is counted per route file. Without
/// them there is nothing to compare against, so the calculation falls back to
/// counting the screens themselves (always 100%).
pub fn compute_coverage(screens: &[Screen], route_files: &[PathBuf]) -> CoverageData {
    let metadata_dirs: Vec<PathBuf> = screens
        .iter()
        .filter_map(|screen| screen.source_path.as_deref())
        .filter_map(|path| path.parent())
        .map(|dir| dir.clean())
        .collect();

    let (total, covered, missing) = if route_files.is_empty() {
        (screens.len(), screens.len(), Vec::new())
    } else {
        let mut covered = 0;
        let mut missing = Vec::new();
        for route in route_files {
            if is_route_covered(route, &metadata_dirs) {
                covered += 1;
            } else {
                missing.push(CoverageGap {
                    route: route.clone(),
                    suggested_path: route.with_extension(SUGGESTED_EXTENSION),
                });
            }
        }
        (route_files.len(), covered, missing)
    };

    let percentage = if total == 0 {
        100
    } else {
        ((covered as f64 / total as f64) * 100.0).round() as u32
    };

    tracing::debug!("coverage: {covered}/{total} ({percentage}%)");

    CoverageData {
        total,
        covered,
        percentage,
        missing,
        by_owner: owner_frequencies(screens),
        by_tag: tag_frequencies(screens),
        timestamp: Utc::now(),
    }
}

fn is_route_covered(route: &Path, metadata_dirs: &[PathBuf]) -> bool {
    let Some(route_dir) = route.parent() else {
        return false;
    };
    let route_dir = route_dir.clean();

    metadata_dirs.iter().any(|dir| *dir == route_dir)
}

fn owner_frequencies(screens: &[Screen]) -> BTreeMap<String, usize> {
    let mut by_owner = BTreeMap::new();
    for screen in screens {
        if screen.owner.is_empty() {
            *by_owner.entry(UNASSIGNED_OWNER.to_owned()).or_insert(0) += 1;
        } else {
            for owner in &screen.owner {
                *by_owner.entry(owner.clone()).or_insert(0) += 1;
            }
        }
    }
    by_owner
}

fn tag_frequencies(screens: &[Screen]) -> BTreeMap<String, usize> {
    let mut by_tag = BTreeMap::new();
    for screen in screens {
        for tag in &screen.tags {
            *by_tag.entry(tag.clone()).or_insert(0) += 1;
        }
    }
    by_tag
}

impl ScreenRegistry {
    /// Compute adoption coverage for the snapshot. See [`compute_coverage`].
    pub fn coverage(&self, route_files: &[PathBuf]) -> CoverageData {
        compute_coverage(self.screens(), route_files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Screen, ScreenId};

    fn id(s: &str) -> ScreenId {
        ScreenId::new(s).unwrap()
    }

    fn declared(name: &str, source_path: &str) -> Screen {
        Screen::builder(id(name), name, format!("/{name}"))
            .source_path(source_path)
            .build()
    }

    #[test]
    fn half_covered_is_fifty_percent() {
        let screens = vec![declared("billing", "src/billing/billing.screens.ts")];
        let routes = vec![
            PathBuf::from("src/billing/routes.tsx"),
            PathBuf::from("src/settings/routes.tsx"),
        ];

        let coverage = compute_coverage(&screens, &routes);
        assert_eq!(coverage.total, 2);
        assert_eq!(coverage.covered, 1);
        assert_eq!(coverage.percentage, 50);
        assert_eq!(coverage.missing.len(), 1);
    }

    #[test]
    fn gap_suggests_sibling_metadata_file() {
        let coverage = compute_coverage(&[], &[PathBuf::from("src/settings/routes.tsx")]);

        assert_eq!(
            coverage.missing,
            vec![CoverageGap {
                route: PathBuf::from("src/settings/routes.tsx"),
                suggested_path: PathBuf::from("src/settings/routes.screens.ts"),
            }]
        );
    }

    #[test]
    fn dot_segments_normalize_before_comparison() {
        let screens = vec![declared("billing", "src/billing/./meta/../billing.screens.ts")];
        let routes = vec![PathBuf::from("src/billing/routes.tsx")];

        let coverage = compute_coverage(&screens, &routes);
        assert_eq!(coverage.covered, 1);
    }

    #[test]
    fn no_route_files_falls_back_to_screen_count() {
        let screens = vec![
            declared("a", "src/a/a.screens.ts"),
            declared("b", "src/b/b.screens.ts"),
        ];

        let coverage = compute_coverage(&screens, &[]);
        assert_eq!(coverage.total, 2);
        assert_eq!(coverage.covered, 2);
        assert_eq!(coverage.percentage, 100);
        assert!(coverage.missing.is_empty());
    }

    #[test]
    fn empty_everything_is_one_hundred_percent() {
        let coverage = compute_coverage(&[], &[]);
        assert_eq!(coverage.total, 0);
        assert_eq!(coverage.percentage, 100);
    }

    #[test]
    fn percentage_rounds_to_nearest() {
        let screens = vec![declared("a", "src/a/a.screens.ts")];
        let routes = vec![
            PathBuf::from("src/a/routes.tsx"),
            PathBuf::from("src/b/routes.tsx"),
            PathBuf::from("src/c/routes.tsx"),
        ];

        // 1/3 = 33.33... rounds to 33.
        let coverage = compute_coverage(&screens, &routes);
        assert_eq!(coverage.percentage, 33);
    }

    #[test]
    fn owners_and_tags_are_tallied() {
        let screens = vec![
            Screen::builder(id("a"), "A", "/a")
                .owner(vec!["billing-team".into(), "platform".into()])
                .tags(vec!["payments".into()])
                .build(),
            Screen::builder(id("b"), "B", "/b")
                .tags(vec!["payments".into(), "admin".into()])
                .build(),
        ];

        let coverage = compute_coverage(&screens, &[]);
        assert_eq!(coverage.by_owner.get("billing-team"), Some(&1));
        assert_eq!(coverage.by_owner.get("platform"), Some(&1));
        assert_eq!(coverage.by_owner.get(UNASSIGNED_OWNER), Some(&1));
        assert_eq!(coverage.by_tag.get("payments"), Some(&2));
        assert_eq!(coverage.by_tag.get("admin"), Some(&1));
    }

    #[test]
    fn serializes_camel_case_wire_names() {
        let coverage = compute_coverage(&[], &[PathBuf::from("src/x/routes.tsx")]);

        let value = serde_json::to_value(&coverage).unwrap();
        assert!(value.get("byOwner").is_some());
        assert!(value.get("byTag").is_some());
        assert!(value["missing"][0].get("suggestedPath").is_some());
        assert!(value.get("timestamp").is_some());
    }
}
