//! Circular-navigation detection over the `next` graph.
//!
//! The detector enumerates navigation loops with a three-color depth-first
//! traversal driven by an explicit frame stack, so recursion depth never
//! depends on catalog size. Dangling edges (already reported by the
//! validator) are simply not traversed. Each distinct cycle - keyed by its
//! set of participating ids - is reported exactly once, as the ordered loop
//! `[v, ..., u, v]` starting and ending at the same id.

use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use serde::{Deserialize, Serialize};

use super::{Screen, ScreenId, ScreenRegistry};

/// Caller-supplied classification policy for detected cycles.
///
/// The engine does not decide whether a loop is acceptable; it only reports.
/// A cycle counts as allowed when `allow_all` is set, or when every directed
/// edge of the loop is on the allow-list. The default policy allows nothing,
/// so every detected cycle lands in `disallowed_cycles`.
#[derive(Debug, Clone, Default)]
pub struct CyclePolicy {
    allow_all: bool,
    allowed_edges: HashSet<(ScreenId, ScreenId)>,
}

impl CyclePolicy {
    /// Every detected cycle is disallowed (the default).
    pub fn deny_all() -> Self {
        Self::default()
    }

    /// Reclassify every detected cycle as allowed.
    pub fn allow_all() -> Self {
        Self {
            allow_all: true,
            allowed_edges: HashSet::default(),
        }
    }

    /// Mark one directed navigation edge as acceptable inside a cycle.
    pub fn with_allowed_edge(mut self, from: ScreenId, to: ScreenId) -> Self {
        self.allowed_edges.insert((from, to));
        self
    }

    /// Whether a reported loop (`[v, ..., v]`) is acceptable under this policy.
    pub fn is_cycle_allowed(&self, cycle: &[ScreenId]) -> bool {
        if self.allow_all {
            return true;
        }

        if cycle.len() < 2 || self.allowed_edges.is_empty() {
            return false;
        }

        cycle.windows(2).all(|edge| {
            self.allowed_edges
                .contains(&(edge[0].clone(), edge[1].clone()))
        })
    }
}

/// Outcome of a cycle-detection pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleReport {
    pub has_cycles: bool,
    /// All distinct loops, each starting and ending at the same id.
    pub cycles: Vec<Vec<ScreenId>>,
    /// The subset of `cycles` not acceptable under the caller's policy.
    pub disallowed_cycles: Vec<Vec<ScreenId>>,
}

#[derive(Clone, Copy, PartialEq)]
enum Color {
    Unvisited,
    InProgress,
    Done,
}

/// Detect all navigation cycles in the snapshot and classify them.
///
/// Deterministic: roots are taken in input order and edges in declared order.
/// For duplicate ids, the last declaration wins (matching registry lookup);
/// shadowed records contribute no nodes or edges.
pub fn detect_cycles(screens: &[Screen], policy: &CyclePolicy) -> CycleReport {
    let index: HashMap<&str, usize> = screens
        .iter()
        .enumerate()
        .map(|(position, screen)| (screen.id.as_str(), position))
        .collect();

    let winning = |position: usize| index[screens[position].id.as_str()] == position;

    // Forward adjacency over resolved edges only.
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); screens.len()];
    for (position, screen) in screens.iter().enumerate() {
        if !winning(position) {
            continue;
        }
        for target in &screen.next {
            if let Some(&target_position) = index.get(target.as_str()) {
                adjacency[position].push(target_position);
            }
        }
    }

    let mut colors = vec![Color::Unvisited; screens.len()];
    let mut path: Vec<usize> = Vec::new();
    let mut path_pos: Vec<Option<usize>> = vec![None; screens.len()];
    // DFS frames: (node, next edge offset). An explicit stack keeps deep
    // catalogs from exhausting the call stack.
    let mut stack: Vec<(usize, usize)> = Vec::new();

    let mut seen: HashSet<Vec<usize>> = HashSet::default();
    let mut cycles: Vec<Vec<ScreenId>> = Vec::new();

    for root in 0..screens.len() {
        if !winning(root) || colors[root] != Color::Unvisited {
            continue;
        }

        colors[root] = Color::InProgress;
        path_pos[root] = Some(path.len());
        path.push(root);
        stack.push((root, 0));

        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            if frame.1 < adjacency[node].len() {
                let target = adjacency[node][frame.1];
                frame.1 += 1;

                match colors[target] {
                    Color::Unvisited => {
                        colors[target] = Color::InProgress;
                        path_pos[target] = Some(path.len());
                        path.push(target);
                        stack.push((target, 0));
                    }
                    Color::InProgress => {
                        // Back edge: the loop is the path suffix from the
                        // target onward, closed with the target itself.
                        if let Some(start) = path_pos[target] {
                            let mut key = path[start..].to_vec();
                            key.sort_unstable();
                            if seen.insert(key) {
                                let mut cycle: Vec<ScreenId> = path[start..]
                                    .iter()
                                    .map(|&position| screens[position].id.clone())
                                    .collect();
                                cycle.push(screens[target].id.clone());
                                cycles.push(cycle);
                            }
                        }
                    }
                    Color::Done => {}
                }
            } else {
                stack.pop();
                colors[node] = Color::Done;
                path.pop();
                path_pos[node] = None;
            }
        }
    }

    let disallowed_cycles: Vec<Vec<ScreenId>> = cycles
        .iter()
        .filter(|cycle| !policy.is_cycle_allowed(cycle))
        .cloned()
        .collect();

    tracing::debug!(
        "cycle detection: {} cycles, {} disallowed",
        cycles.len(),
        disallowed_cycles.len()
    );

    CycleReport {
        has_cycles: !cycles.is_empty(),
        cycles,
        disallowed_cycles,
    }
}

/// Format a loop as a human-readable chain.
///
/// Example: `home -> search -> home`
pub fn format_cycle(cycle: &[ScreenId]) -> String {
    cycle
        .iter()
        .map(ScreenId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

impl ScreenRegistry {
    /// Detect navigation cycles in the snapshot. See [`detect_cycles`].
    pub fn detect_cycles(&self, policy: &CyclePolicy) -> CycleReport {
        detect_cycles(self.screens(), policy)
    }
}
