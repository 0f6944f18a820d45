//! Reference integrity validation for the navigation graph.
//!
//! Every id mentioned in a screen's `next` or `entryPoints` must resolve to a
//! known screen. Unresolved references are reported as values - the validator
//! never fails and never mutates the snapshot. Whether unresolved references
//! abort a build is the caller's policy, not the engine's.

use rustc_hash::FxHashSet as HashSet;
use serde::{Deserialize, Serialize};

use super::suggestion::find_best_match;
use super::{Screen, ScreenId, ScreenRegistry};

/// Which reference field an error was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RefField {
    Next,
    EntryPoints,
}

/// One unresolved reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    /// Screen that declared the reference.
    pub screen_id: ScreenId,
    pub field: RefField,
    /// The id that did not resolve.
    pub invalid_ref: ScreenId,
    /// Closest known id, when one scores above the suggestion threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<ScreenId>,
}

/// Outcome of a validation pass. `valid` holds iff `errors` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

/// Validate every `next`/`entryPoints` reference against the known id set.
///
/// Errors come back in input order: screens as loaded, `next` before
/// `entryPoints` within a screen, references in declared order. Pure: no
/// I/O, no mutation of the snapshot.
pub fn validate(screens: &[Screen]) -> ValidationResult {
    let known: HashSet<&str> = screens.iter().map(|screen| screen.id.as_str()).collect();

    // Sorted candidate list keeps suggestions deterministic.
    let mut candidates: Vec<&str> = known.iter().copied().collect();
    candidates.sort_unstable();

    let mut errors = Vec::new();
    for screen in screens {
        check_refs(screen, RefField::Next, &screen.next, &known, &candidates, &mut errors);
        check_refs(
            screen,
            RefField::EntryPoints,
            &screen.entry_points,
            &known,
            &candidates,
            &mut errors,
        );
    }

    if !errors.is_empty() {
        tracing::debug!("validation found {} unresolved references", errors.len());
    }

    ValidationResult {
        valid: errors.is_empty(),
        errors,
    }
}

fn check_refs(
    screen: &Screen,
    field: RefField,
    refs: &[ScreenId],
    known: &HashSet<&str>,
    candidates: &[&str],
    errors: &mut Vec<ValidationError>,
) {
    for reference in refs {
        if known.contains(reference.as_str()) {
            continue;
        }

        let suggestion = find_best_match(reference.as_str(), candidates.iter().copied())
            .map(ScreenId::from_known);

        errors.push(ValidationError {
            screen_id: screen.id.clone(),
            field,
            invalid_ref: reference.clone(),
            suggestion,
        });
    }
}

impl ScreenRegistry {
    /// Validate the snapshot's references. See [`validate`].
    pub fn validate(&self) -> ValidationResult {
        validate(self.screens())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Screen;

    fn id(s: &str) -> ScreenId {
        ScreenId::new(s).unwrap()
    }

    #[test]
    fn clean_catalog_is_valid() {
        let screens = vec![
            Screen::builder(id("home"), "Home", "/")
                .next(vec![id("about")])
                .build(),
            Screen::builder(id("about"), "About", "/about")
                .entry_points(vec![id("home")])
                .build(),
        ];

        let result = validate(&screens);
        assert!(result.valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn unresolved_next_reports_one_error() {
        let screens = vec![
            Screen::builder(id("home"), "Home", "/")
                .next(vec![id("missingScreen")])
                .build(),
        ];

        let result = validate(&screens);
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);

        let error = &result.errors[0];
        assert_eq!(error.screen_id.as_str(), "home");
        assert_eq!(error.field, RefField::Next);
        assert_eq!(error.invalid_ref.as_str(), "missingScreen");
    }

    #[test]
    fn unresolved_entry_point_reports_field() {
        let screens = vec![
            Screen::builder(id("home"), "Home", "/")
                .entry_points(vec![id("nowhere")])
                .build(),
        ];

        let result = validate(&screens);
        assert_eq!(result.errors[0].field, RefField::EntryPoints);
    }

    #[test]
    fn near_miss_gets_a_suggestion() {
        let screens = vec![
            Screen::builder(id("home"), "Home", "/")
                .next(vec![id("abuot")])
                .build(),
            Screen::builder(id("about"), "About", "/about").build(),
        ];

        let result = validate(&screens);
        assert_eq!(
            result.errors[0].suggestion.as_ref().map(ScreenId::as_str),
            Some("about")
        );
    }

    #[test]
    fn distant_miss_gets_no_suggestion() {
        let screens = vec![
            Screen::builder(id("home"), "Home", "/")
                .next(vec![id("qqqqqqqqqqqq")])
                .build(),
        ];

        let result = validate(&screens);
        assert_eq!(result.errors[0].suggestion, None);
    }

    #[test]
    fn errors_keep_input_order() {
        let screens = vec![
            Screen::builder(id("a"), "A", "/a")
                .next(vec![id("missing1"), id("missing2")])
                .entry_points(vec![id("missing3")])
                .build(),
            Screen::builder(id("b"), "B", "/b")
                .next(vec![id("missing4")])
                .build(),
        ];

        let result = validate(&screens);
        let refs: Vec<&str> = result
            .errors
            .iter()
            .map(|e| e.invalid_ref.as_str())
            .collect();
        assert_eq!(refs, vec!["missing1", "missing2", "missing3", "missing4"]);
    }

    #[test]
    fn field_names_serialize_as_wire_contract() {
        let error = ValidationError {
            screen_id: id("home"),
            field: RefField::EntryPoints,
            invalid_ref: id("missing"),
            suggestion: None,
        };

        let value = serde_json::to_value(&error).unwrap();
        assert_eq!(value["screenId"], "home");
        assert_eq!(value["field"], "entryPoints");
        assert_eq!(value["invalidRef"], "missing");
        assert!(value.get("suggestion").is_none());
    }
}
