//! Component catalogs: selector name to variant.
//!
//! A catalog is a static, read-only table of interchangeable variants of one
//! component kind (CPU styles, DRAM timing models). It provides:
//! 1. **Registration:** Each `CatalogEntry` carries a variant and its required-parameter list.
//! 2. **Lookup:** Exact-name match, otherwise the documented default.
//! 3. **Defaulting events:** Every fallback is logged and reported, never raised.
//!
//! Adding a variant is a new table entry; the lookup code does not change.

use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

use crate::common::{ConfigError, ParamSet};

/// One registered variant.
#[derive(Debug)]
pub struct CatalogEntry<V: 'static> {
    /// Selector name users pass to request this variant.
    pub name: &'static str,
    /// The variant's constructor data.
    pub variant: V,
    /// Parameters the constructed component must carry.
    pub required_params: &'static [&'static str],
}

impl<V: 'static> CatalogEntry<V> {
    /// Checks that `params` contains every required parameter.
    ///
    /// # Arguments
    ///
    /// * `component` - Instance name, used in the error.
    /// * `params` - The fully resolved parameter map of the constructed component.
    pub fn check_required(&self, component: &str, params: &ParamSet) -> Result<(), ConfigError> {
        match self
            .required_params
            .iter()
            .find(|name| !params.contains_key(**name))
        {
            Some(missing) => Err(ConfigError::MissingParameter {
                component: component.to_string(),
                model: self.name.to_string(),
                param: (*missing).to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// A non-fatal defaulting event: the requested variant was not used.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DefaultingEvent {
    /// Component kind the catalog serves (e.g. `"CPU style"`).
    pub kind: &'static str,
    /// The selector that was requested; `None` if no selector was given.
    pub requested: Option<String>,
    /// The variant chosen instead.
    pub fallback: &'static str,
}

impl fmt::Display for DefaultingEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.requested {
            Some(name) => write!(
                f,
                "{} '{}' does not exist, using default {}",
                self.kind, name, self.fallback
            ),
            None => write!(f, "no {} selected, using default {}", self.kind, self.fallback),
        }
    }
}

/// The outcome of a catalog lookup.
#[derive(Debug)]
pub struct Selection<V: 'static> {
    /// The entry to construct.
    pub entry: &'static CatalogEntry<V>,
    /// Set when the requested selector was not used.
    pub fallback: Option<DefaultingEvent>,
}

/// Static registry of the variants of one component kind.
#[derive(Debug)]
pub struct Catalog<V: 'static> {
    kind: &'static str,
    entries: &'static [CatalogEntry<V>],
    default: usize,
}

impl<V: 'static> Catalog<V> {
    /// Creates a catalog over a static table.
    ///
    /// # Arguments
    ///
    /// * `kind` - Human-readable component kind used in diagnostics.
    /// * `entries` - The registered variants; must be non-empty.
    /// * `default` - Index into `entries` of the documented fallback.
    pub const fn new(
        kind: &'static str,
        entries: &'static [CatalogEntry<V>],
        default: usize,
    ) -> Self {
        assert!(default < entries.len(), "catalog default out of bounds");
        Self {
            kind,
            entries,
            default,
        }
    }

    /// Component kind this catalog serves.
    pub const fn kind(&self) -> &'static str {
        self.kind
    }

    /// All registered entries.
    pub const fn entries(&self) -> &'static [CatalogEntry<V>] {
        self.entries
    }

    /// The documented default entry.
    pub const fn default_entry(&self) -> &'static CatalogEntry<V> {
        &self.entries[self.default]
    }

    /// Exact-name lookup without fallback.
    pub fn get(&self, name: &str) -> Option<&'static CatalogEntry<V>> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Registered selector names.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|e| e.name)
    }

    /// Resolves a selector to an entry, falling back to the default.
    ///
    /// A recognized selector yields its entry and no event. An unrecognized
    /// selector, a missing selector, or an empty one yields the default entry
    /// and exactly one `DefaultingEvent`. Unrecognized names are logged at
    /// `warn`; a missing selector at `info`. This never fails.
    pub fn lookup(&self, selector: Option<&str>) -> Selection<V> {
        let requested = selector.filter(|s| !s.is_empty());
        if let Some(entry) = requested.and_then(|name| self.get(name)) {
            return Selection {
                entry,
                fallback: None,
            };
        }

        let entry = self.default_entry();
        let event = DefaultingEvent {
            kind: self.kind,
            requested: requested.map(str::to_string),
            fallback: entry.name,
        };
        if event.requested.is_some() {
            warn!("{event}");
        } else {
            info!("{event}");
        }
        Selection {
            entry,
            fallback: Some(event),
        }
    }
}
