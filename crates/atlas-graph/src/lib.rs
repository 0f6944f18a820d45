//! # atlas-graph
//!
//! Pure graph analysis for screen catalogs and navigation graphs.
//!
//! This crate is the analysis engine behind the Atlas screen catalog: it takes
//! a snapshot of [`Screen`] records produced by an external loader and derives
//! everything the report and CLI layers need, without any I/O of its own.
//!
//! ## Overview
//!
//! A catalog run loads screen metadata into a [`ScreenRegistry`] and then asks
//! the engine questions about the navigation graph implied by the screens'
//! `next` edges:
//!
//! - **Reference validation**: every `next`/`entryPoints` id must resolve to a
//!   known screen; unresolved references come back as [`ValidationError`]
//!   values with a "did you mean" suggestion where one scores high enough.
//! - **Cycle detection**: all navigation loops, reported once each and
//!   classified against a caller-supplied [`CyclePolicy`].
//! - **Impact analysis**: given an API identifier, which screens call it
//!   directly and which can navigate to those screens within a bounded number
//!   of hops.
//! - **Coverage accounting**: how much of the route surface has adopted
//!   screen metadata, plus owner/tag frequency tables.
//! - **Catalog statistics**: a small snapshot for dashboards.
//!
//! ## Quick Start
//!
//! ```rust
//! use atlas_graph::{Screen, ScreenId, ScreenRegistry};
//!
//! # fn main() -> atlas_graph::Result<()> {
//! let screens = vec![
//!     Screen::builder(ScreenId::new("home")?, "Home", "/")
//!         .next(vec![ScreenId::new("dash")?])
//!         .build(),
//!     Screen::builder(ScreenId::new("dash")?, "Dashboard", "/dash")
//!         .depends_on(vec!["MetricsAPI.summary".into()])
//!         .build(),
//! ];
//!
//! let registry = ScreenRegistry::new(screens);
//! let report = registry.validate();
//! assert!(report.valid);
//! # Ok(())
//! # }
//! ```
//!
//! ## Design
//!
//! All entry points are synchronous pure functions over an immutable
//! `&[Screen]` snapshot. Malformed graph *content* (dangling references,
//! self-loops, disconnected screens) is always reported as data in a result
//! object, never as an error; the only fallible paths are the loader-facing
//! boundary ([`parse_screens`], [`ScreenId::new`]). Multiple callers may run
//! any combination of analyses concurrently on the same snapshot.

pub mod coverage;
pub mod cycles;
pub mod impact;
pub mod registry;
pub mod screen;
pub mod screen_id;
pub mod statistics;
pub mod suggestion;
pub mod validation;

pub use coverage::{CoverageData, CoverageGap, UNASSIGNED_OWNER, compute_coverage};
pub use cycles::{CyclePolicy, CycleReport, detect_cycles, format_cycle};
pub use impact::{
    DEFAULT_MAX_DEPTH, ImpactAnalysis, ImpactOptions, TransitiveImpact, analyze_impact,
};
pub use registry::ScreenRegistry;
pub use screen::{Link, Screen, ScreenBuilder, parse_screens};
pub use screen_id::{ScreenId, ScreenIdError};
pub use statistics::{CatalogStatistics, statistics};
pub use suggestion::{SUGGESTION_THRESHOLD, find_best_match};
pub use validation::{RefField, ValidationError, ValidationResult, validate};

/// Error types for atlas operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input was not a screen catalog (e.g. a JSON object where an array of
    /// screen records was expected). This is a loader/programmer error and
    /// fails fast; malformed graph content never lands here.
    #[error("invalid screen catalog: {0}")]
    InvalidCatalog(String),

    /// JSON syntax or record-shape error at the loader boundary.
    #[error("failed to parse screen records: {0}")]
    Parse(#[from] serde_json::Error),

    /// Invalid screen identifier.
    #[error(transparent)]
    ScreenId(#[from] ScreenIdError),
}

/// Result type alias for atlas operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests;
