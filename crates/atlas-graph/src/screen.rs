use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ScreenId;

/// One screen record from the catalog.
///
/// Screens are declared by an external loader (metadata files, router
/// parsers); the engine treats a loaded `Vec<Screen>` as an immutable snapshot
/// for the duration of one invocation. Wire field names are camelCase
/// (`dependsOn`, `entryPoints`) to match the catalog's JSON contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    pub id: ScreenId,
    /// Display name shown in reports.
    pub title: String,
    /// Route path template; may contain `:param` segments. Not validated
    /// against any actual router.
    pub route: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning teams. Descriptive only; not used by graph algorithms.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub owner: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// External API/service identifiers this screen calls. Free-form strings,
    /// compared by exact match or `prefix.`-match during impact analysis.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    /// Screens that can navigate TO this screen. Declared redundantly with
    /// `next` for documentation; validated but never derived.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entry_points: Vec<ScreenId>,
    /// Screens this screen can navigate TO. The authoritative edge set for
    /// all graph algorithms.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub next: Vec<ScreenId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    /// Originating metadata file, attached by the loader. Only coverage
    /// accounting reads this (to derive the containing directory).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<PathBuf>,
}

/// External resource link attached to a screen (design doc, ticket, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Screen {
    /// Create a new screen builder with sensible defaults.
    pub fn builder(id: ScreenId, title: impl Into<String>, route: impl Into<String>) -> ScreenBuilder {
        ScreenBuilder {
            screen: Self {
                id,
                title: title.into(),
                route: route.into(),
                description: None,
                owner: Vec::new(),
                tags: Vec::new(),
                depends_on: Vec::new(),
                entry_points: Vec::new(),
                next: Vec::new(),
                links: Vec::new(),
                source_path: None,
            },
        }
    }

    /// Check whether this screen calls the given API, either exactly or via a
    /// dot-separated prefix (`"InvoiceAPI"` matches `"InvoiceAPI.getDetail"`).
    pub fn depends_on_api(&self, api_name: &str) -> bool {
        self.depends_on.iter().any(|dep| {
            dep == api_name
                || (dep.len() > api_name.len()
                    && dep.starts_with(api_name)
                    && dep.as_bytes()[api_name.len()] == b'.')
        })
    }
}

/// Builder for `Screen` to avoid long argument lists in constructors.
pub struct ScreenBuilder {
    screen: Screen,
}

impl ScreenBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.screen.description = Some(description.into());
        self
    }

    pub fn owner(mut self, owner: Vec<String>) -> Self {
        self.screen.owner = owner;
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.screen.tags = tags;
        self
    }

    pub fn depends_on(mut self, depends_on: Vec<String>) -> Self {
        self.screen.depends_on = depends_on;
        self
    }

    pub fn entry_points(mut self, entry_points: Vec<ScreenId>) -> Self {
        self.screen.entry_points = entry_points;
        self
    }

    pub fn next(mut self, next: Vec<ScreenId>) -> Self {
        self.screen.next = next;
        self
    }

    pub fn links(mut self, links: Vec<Link>) -> Self {
        self.screen.links = links;
        self
    }

    pub fn source_path(mut self, source_path: impl Into<PathBuf>) -> Self {
        self.screen.source_path = Some(source_path.into());
        self
    }

    pub fn build(self) -> Screen {
        self.screen
    }
}

/// Parse a JSON array of screen records from the loader boundary.
///
/// Schema validation is explicit construction: the input must be a JSON array
/// whose elements deserialize into [`Screen`]. Anything else is a loader
/// error and fails fast with a typed [`crate::Error`]; this is the only place
/// where the engine rejects input outright.
pub fn parse_screens(json: &str) -> crate::Result<Vec<Screen>> {
    let value: serde_json::Value = serde_json::from_str(json)?;

    if !value.is_array() {
        return Err(crate::Error::InvalidCatalog(format!(
            "expected a JSON array of screen records, got {}",
            json_type_name(&value)
        )));
    }

    let screens: Vec<Screen> = serde_json::from_value(value)?;
    tracing::debug!("parsed {} screen records", screens.len());
    Ok(screens)
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
